use std::future::Future;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serenity::all::{
    Client, Command, CommandId, CommandInteraction, ComponentInteraction, Context, EventHandler, GatewayIntents,
    GuildId, Http, Interaction, Ready, ShardManager,
};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use nexusbot_core::{
    BotError, Caller, ChatPlatform, CommandDescriptor, CommandInvocation, ComponentActivation, Inbound,
    InteractionEvent, InteractionKind, RegisteredCommand,
};

use crate::discord_embeds::{DiscordReplySink, Pending};
use crate::discord_slash::{build_command, convert_options};

/// Interactions waiting to be dispatched.
const EVENT_BUFFER: usize = 64;

fn platform_error(context: &str, e: impl std::fmt::Display) -> BotError {
    BotError::Platform(format!("{context}: {e}"))
}

fn command_event(cmd: &CommandInteraction) -> InteractionEvent {
    InteractionEvent {
        id: cmd.id.to_string(),
        caller: Caller { id: cmd.user.id.to_string(), name: cmd.user.name.clone() },
        kind: InteractionKind::Command(CommandInvocation {
            name: cmd.data.name.clone(),
            args: convert_options(&cmd.data.options),
        }),
    }
}

fn component_event(component: &ComponentInteraction) -> InteractionEvent {
    InteractionEvent {
        id: component.id.to_string(),
        caller: Caller { id: component.user.id.to_string(), name: component.user.name.clone() },
        kind: InteractionKind::Component(ComponentActivation {
            custom_id: component.data.custom_id.clone(),
            source_text: component.message.embeds.first().and_then(|e| e.description.clone()),
        }),
    }
}

/// How the gateway client ended: `Err` carries the client's error text.
type ClientExit = Result<(), String>;

/// Event sender shared with the gateway handler. serenity keeps the handler
/// alive until its shard manager shuts down, so the stream is closed here
/// instead of by dropping the handler.
#[derive(Clone)]
struct EventSlot(Arc<Mutex<Option<mpsc::Sender<Inbound>>>>);

impl EventSlot {
    fn new(tx: mpsc::Sender<Inbound>) -> Self {
        Self(Arc::new(Mutex::new(Some(tx))))
    }

    fn sender(&self) -> Option<mpsc::Sender<Inbound>> {
        self.0.lock().ok().and_then(|slot| slot.clone())
    }

    fn close(&self) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = None;
        }
    }
}

/// Runs the client to completion, then closes the event stream and reports
/// how it ended.
async fn supervise<F>(client: F, events: EventSlot, exited: oneshot::Sender<ClientExit>)
where
    F: Future<Output = ClientExit>,
{
    let result = client.await;
    match &result {
        Ok(()) => info!("Discord client stopped"),
        Err(why) => error!("Client error: {}", why),
    }
    events.close();
    let _ = exited.send(result);
}

fn exit_error(exit: Result<ClientExit, oneshot::error::RecvError>) -> BotError {
    match exit {
        Ok(Err(why)) => BotError::Platform(format!("Discord client failed before ready: {why}")),
        Ok(Ok(())) => BotError::Platform("Discord client stopped before ready".into()),
        Err(_) => BotError::Platform("Discord client task ended before ready".into()),
    }
}

/// Waits for the session user name, or for the client to end first.
async fn wait_for_ready(
    mut ready: oneshot::Receiver<String>,
    mut exited: oneshot::Receiver<ClientExit>,
) -> Result<String, BotError> {
    tokio::select! {
        biased;
        exit = &mut exited => Err(exit_error(exit)),
        user = &mut ready => match user {
            Ok(user) => Ok(user),
            Err(_) => Err(exit_error(exited.await)),
        },
    }
}

struct Handler {
    events: EventSlot,
    ready: Mutex<Option<oneshot::Sender<String>>>,
}

impl Handler {
    async fn forward(&self, event: InteractionEvent, http: Arc<Http>, pending: Pending) {
        let Some(events) = self.events.sender() else {
            debug!("Event stream closed, dropping interaction");
            return;
        };
        let inbound = Inbound { event, session: Box::new(DiscordReplySink::new(http, pending)) };
        if events.send(inbound).await.is_err() {
            debug!("Dispatcher stopped, dropping interaction");
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        ctx.http.set_application_id(ready.application.id);
        info!("{} is connected!", ready.user.name);
        let waiter = self.ready.lock().ok().and_then(|mut slot| slot.take());
        if let Some(waiter) = waiter {
            let _ = waiter.send(ready.user.name.clone());
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(cmd) => {
                let event = command_event(&cmd);
                self.forward(event, ctx.http.clone(), Pending::Command(cmd)).await;
            }
            Interaction::Component(component) => {
                let event = component_event(&component);
                self.forward(event, ctx.http.clone(), Pending::Component(component)).await;
            }
            other => debug!(kind = ?other.kind(), "Ignoring interaction"),
        }
    }
}

/// Discord gateway connection plus the REST calls for command registration.
pub struct DiscordPlatform {
    token: String,
    guild_id: Option<GuildId>,
    http: Option<Arc<Http>>,
    shard_manager: Option<Arc<ShardManager>>,
    client_task: Option<JoinHandle<()>>,
}

impl DiscordPlatform {
    /// `guild_id` scopes command registration; `None` registers globally.
    pub fn new(token: impl Into<String>, guild_id: Option<u64>) -> Self {
        Self {
            token: token.into(),
            guild_id: guild_id.filter(|id| *id != 0).map(GuildId::new),
            http: None,
            shard_manager: None,
            client_task: None,
        }
    }

    fn http(&self) -> Result<&Arc<Http>, BotError> {
        self.http.as_ref().ok_or_else(|| BotError::Platform("not connected".into()))
    }
}

#[async_trait]
impl ChatPlatform for DiscordPlatform {
    fn name(&self) -> &str {
        "discord"
    }

    async fn connect(&mut self) -> Result<mpsc::Receiver<Inbound>, BotError> {
        info!("Starting Discord adapter");
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let (ready_tx, ready_rx) = oneshot::channel();
        let (exit_tx, exit_rx) = oneshot::channel();
        let events = EventSlot::new(tx);
        let handler = Handler { events: events.clone(), ready: Mutex::new(Some(ready_tx)) };

        // Slash commands and buttons need no privileged intents.
        let mut client = Client::builder(&self.token, GatewayIntents::empty())
            .event_handler(handler)
            .await
            .map_err(|e| platform_error("failed to build Discord client", e))?;

        let shards = client.shard_manager.clone();
        self.http = Some(client.http.clone());
        self.shard_manager = Some(shards.clone());
        let run = async move {
            let result = client.start().await.map_err(|e| e.to_string());
            shards.shutdown_all().await;
            result
        };
        self.client_task = Some(tokio::spawn(supervise(run, events, exit_tx)));

        match wait_for_ready(ready_rx, exit_rx).await {
            Ok(user) => {
                info!(user = %user, guild = ?self.guild_id, "Discord session ready");
                Ok(rx)
            }
            Err(e) => {
                self.close().await;
                Err(e)
            }
        }
    }

    async fn overwrite_commands(&self, commands: &[CommandDescriptor]) -> Result<Vec<RegisteredCommand>, BotError> {
        let http = self.http()?;
        let payload: Vec<_> = commands.iter().map(build_command).collect();
        let created = match self.guild_id {
            Some(guild) => guild.set_commands(http, payload).await,
            None => Command::set_global_commands(http, payload).await,
        }
        .map_err(|e| platform_error("failed to register commands", e))?;

        Ok(created
            .into_iter()
            .map(|c| RegisteredCommand { id: c.id.to_string(), name: c.name })
            .collect())
    }

    async fn delete_command(&self, command: &RegisteredCommand) -> Result<(), BotError> {
        let http = self.http()?;
        let id = command
            .id
            .parse::<u64>()
            .ok()
            .filter(|id| *id != 0)
            .map(CommandId::new)
            .ok_or_else(|| BotError::Platform(format!("invalid command id `{}`", command.id)))?;
        match self.guild_id {
            Some(guild) => guild.delete_command(http, id).await,
            None => Command::delete_global_command(http, id).await,
        }
        .map_err(|e| platform_error("failed to delete command", e))?;
        debug!(command = %command.name, "Deleted command");
        Ok(())
    }

    async fn close(&mut self) {
        if let Some(shards) = self.shard_manager.take() {
            shards.shutdown_all().await;
        }
        if let Some(task) = self.client_task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "Discord client task ended abnormally");
            }
        }
        info!("Discord connection closed");
    }
}
