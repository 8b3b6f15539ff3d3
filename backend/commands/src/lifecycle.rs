//! Bot lifecycle: registration, the dispatch loop, and shutdown cleanup.
use std::future::Future;
use std::sync::Arc;

use tracing::{error, info, warn};

use nexusbot_core::{BotError, ChatPlatform, CommandDescriptor, Inbound, RegisteredCommand};

use crate::dispatch::{DispatchOutcome, Dispatcher, InteractionHandler};
use crate::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Created,
    Registering,
    Running,
    ShuttingDown,
    Terminated,
}

/// What shutdown cleanup managed to do.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ShutdownReport {
    pub received: usize,
    /// Interactions with no bound handler.
    pub dropped: usize,
    /// Replies the platform rejected.
    pub delivery_failed: usize,
    pub deleted: usize,
    pub failed_deletions: usize,
}

pub struct Bot {
    registry: CommandRegistry,
    state: LifecycleState,
    remove_commands: bool,
}

impl Bot {
    pub fn new(remove_commands: bool) -> Self {
        Self { registry: CommandRegistry::new(), state: LifecycleState::Created, remove_commands }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn descriptors(&self) -> &[CommandDescriptor] {
        self.registry.descriptors()
    }

    fn open_for_registration(&mut self) -> Result<(), BotError> {
        match self.state {
            LifecycleState::Created | LifecycleState::Registering => {
                self.state = LifecycleState::Registering;
                Ok(())
            }
            _ => Err(BotError::RegistryClosed),
        }
    }

    pub fn register_command(
        &mut self,
        descriptor: CommandDescriptor,
        handler: Arc<dyn InteractionHandler>,
    ) -> Result<(), BotError> {
        self.open_for_registration()?;
        self.registry.register_command(descriptor, handler)
    }

    pub fn register_component(&mut self, custom_id: &str, handler: Arc<dyn InteractionHandler>) -> Result<(), BotError> {
        self.open_for_registration()?;
        self.registry.register_component(custom_id, handler)
    }

    /// Bind several components at once; stops at the first failure.
    pub fn register_components<'a>(
        &mut self,
        components: impl IntoIterator<Item = (&'a str, Arc<dyn InteractionHandler>)>,
    ) -> Result<(), BotError> {
        for (custom_id, handler) in components {
            self.register_component(custom_id, handler)?;
        }
        Ok(())
    }

    /// Connect, register commands, and dispatch events one at a time until
    /// `shutdown` resolves or the platform closes its event stream.
    ///
    /// Setup failures abort the run. Cleanup failures are logged and the
    /// remaining cleanup continues.
    pub async fn run<P, S>(&mut self, platform: &mut P, shutdown: S) -> Result<ShutdownReport, BotError>
    where
        P: ChatPlatform + ?Sized,
        S: Future<Output = ()>,
    {
        self.open_for_registration()?;
        info!(
            platform = platform.name(),
            commands = self.registry.command_count(),
            components = self.registry.component_count(),
            "Starting bot"
        );

        let mut events = match platform.connect().await {
            Ok(rx) => rx,
            Err(e) => {
                self.state = LifecycleState::Terminated;
                return Err(e);
            }
        };

        let registered = match platform.overwrite_commands(self.registry.descriptors()).await {
            Ok(registered) => registered,
            Err(e) => {
                error!(error = %e, "Failed to register commands");
                platform.close().await;
                self.state = LifecycleState::Terminated;
                return Err(e);
            }
        };
        info!(count = registered.len(), "Registered commands");
        self.state = LifecycleState::Running;

        let mut report = ShutdownReport::default();
        let dispatcher = Dispatcher::new(&self.registry);
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown signal received");
                    break;
                }
                inbound = events.recv() => match inbound {
                    Some(Inbound { event, session }) => {
                        report.received += 1;
                        match dispatcher.dispatch(&event, session.as_ref()).await {
                            DispatchOutcome::Replied => {}
                            DispatchOutcome::Dropped => report.dropped += 1,
                            DispatchOutcome::DeliveryFailed => report.delivery_failed += 1,
                        }
                    }
                    None => {
                        warn!("Platform event stream closed");
                        break;
                    }
                },
            }
        }

        self.state = LifecycleState::ShuttingDown;
        drop(events);
        platform.close().await;

        if self.remove_commands {
            self.remove_registered(platform, &registered, &mut report).await;
        }

        self.state = LifecycleState::Terminated;
        info!(
            received = report.received,
            dropped = report.dropped,
            delivery_failed = report.delivery_failed,
            "Bot stopped"
        );
        Ok(report)
    }

    async fn remove_registered<P>(&self, platform: &P, registered: &[RegisteredCommand], report: &mut ShutdownReport)
    where
        P: ChatPlatform + ?Sized,
    {
        info!(count = registered.len(), "Removing commands");
        for command in registered {
            match platform.delete_command(command).await {
                Ok(()) => report.deleted += 1,
                Err(e) => {
                    error!(command = %command.name, id = %command.id, error = %e, "Failed to delete command");
                    report.failed_deletions += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::sync::mpsc;

    use nexusbot_core::{Caller, CommandInvocation, InteractionEvent, InteractionKind, Reply, ReplySink};

    use crate::dispatch::tests::RecordingSink;
    use crate::format;

    #[derive(Default)]
    struct Calls {
        overwritten: Vec<String>,
        deleted: Vec<String>,
        closed: bool,
    }

    /// In-memory platform fed from a pre-filled channel.
    struct FakePlatform {
        events: Option<mpsc::Receiver<Inbound>>,
        fail_delete: Option<&'static str>,
        fail_overwrite: bool,
        calls: Arc<Mutex<Calls>>,
    }

    impl FakePlatform {
        fn new(events: mpsc::Receiver<Inbound>) -> Self {
            Self { events: Some(events), fail_delete: None, fail_overwrite: false, calls: Arc::default() }
        }
    }

    #[async_trait]
    impl ChatPlatform for FakePlatform {
        fn name(&self) -> &str {
            "fake"
        }

        async fn connect(&mut self) -> Result<mpsc::Receiver<Inbound>, BotError> {
            self.events.take().ok_or_else(|| BotError::Platform("already connected".into()))
        }

        async fn overwrite_commands(&self, commands: &[CommandDescriptor]) -> Result<Vec<RegisteredCommand>, BotError> {
            if self.fail_overwrite {
                return Err(BotError::Platform("missing access".into()));
            }
            let mut calls = self.calls.lock().unwrap();
            calls.overwritten = commands.iter().map(|c| c.name.clone()).collect();
            Ok(commands
                .iter()
                .enumerate()
                .map(|(i, c)| RegisteredCommand { id: format!("id-{i}"), name: c.name.clone() })
                .collect())
        }

        async fn delete_command(&self, command: &RegisteredCommand) -> Result<(), BotError> {
            if self.fail_delete == Some(command.name.as_str()) {
                return Err(BotError::Platform("unknown command".into()));
            }
            self.calls.lock().unwrap().deleted.push(command.name.clone());
            Ok(())
        }

        async fn close(&mut self) {
            self.calls.lock().unwrap().closed = true;
        }
    }

    struct Pong;

    #[async_trait]
    impl InteractionHandler for Pong {
        async fn handle(&self, _event: &InteractionEvent) -> anyhow::Result<Reply> {
            Ok(format::success("Pong", ""))
        }
    }

    /// Session whose interaction token has already expired.
    struct ExpiredSink;

    #[async_trait]
    impl ReplySink for ExpiredSink {
        async fn send(&self, _reply: Reply) -> Result<(), BotError> {
            Err(BotError::Platform("Unknown interaction".into()))
        }
    }

    fn inbound(name: &str, session: Box<dyn ReplySink>) -> Inbound {
        Inbound {
            event: InteractionEvent {
                id: format!("i-{name}"),
                caller: Caller { id: "42".into(), name: "alice".into() },
                kind: InteractionKind::Command(CommandInvocation { name: name.into(), args: vec![] }),
            },
            session,
        }
    }

    fn invoke(name: &str, sink: &RecordingSink) -> Inbound {
        inbound(name, Box::new(sink.clone()))
    }

    fn bot(remove_commands: bool) -> Bot {
        let mut bot = Bot::new(remove_commands);
        bot.register_command(CommandDescriptor::new("ping", "Ping"), Arc::new(Pong)).unwrap();
        bot.register_command(CommandDescriptor::new("pong", "Pong"), Arc::new(Pong)).unwrap();
        bot
    }

    #[tokio::test]
    async fn dispatches_until_stream_closes() {
        let (tx, rx) = mpsc::channel(8);
        let sink = RecordingSink::default();
        tx.send(invoke("ping", &sink)).await.unwrap();
        tx.send(invoke("unknown", &sink)).await.unwrap();
        tx.send(invoke("pong", &sink)).await.unwrap();
        drop(tx);

        let mut platform = FakePlatform::new(rx);
        let calls = platform.calls.clone();
        let mut bot = bot(false);
        let report = bot.run(&mut platform, std::future::pending()).await.unwrap();

        assert_eq!(report.received, 3);
        assert_eq!(report.dropped, 1);
        assert_eq!(report.delivery_failed, 0);
        assert_eq!(sink.taken().len(), 2);
        assert_eq!(bot.state(), LifecycleState::Terminated);
        let calls = calls.lock().unwrap();
        assert_eq!(calls.overwritten, vec!["ping", "pong"]);
        assert!(calls.closed);
        assert!(calls.deleted.is_empty());
    }

    #[tokio::test]
    async fn shutdown_removes_commands_and_survives_failures() {
        let (_tx, rx) = mpsc::channel(1);
        let mut platform = FakePlatform::new(rx);
        platform.fail_delete = Some("ping");
        let calls = platform.calls.clone();

        let mut bot = bot(true);
        let report = bot.run(&mut platform, async {}).await.unwrap();

        assert_eq!(report, ShutdownReport { deleted: 1, failed_deletions: 1, ..Default::default() });
        assert_eq!(calls.lock().unwrap().deleted, vec!["pong"]);
    }

    #[tokio::test]
    async fn registration_closes_once_running() {
        let (_tx, rx) = mpsc::channel(1);
        let mut platform = FakePlatform::new(rx);
        let mut bot = bot(false);
        bot.run(&mut platform, async {}).await.unwrap();

        let err = bot.register_command(CommandDescriptor::new("late", "Late"), Arc::new(Pong)).unwrap_err();
        assert!(matches!(err, BotError::RegistryClosed));
        assert!(matches!(bot.register_component("late", Arc::new(Pong)), Err(BotError::RegistryClosed)));
    }

    #[tokio::test]
    async fn connect_failure_aborts() {
        let (_tx, rx) = mpsc::channel(1);
        let mut platform = FakePlatform::new(rx);
        platform.events = None;
        let mut bot = bot(false);
        assert!(bot.run(&mut platform, async {}).await.is_err());
        assert_eq!(bot.state(), LifecycleState::Terminated);
    }

    #[tokio::test]
    async fn rejected_replies_are_counted() {
        let (tx, rx) = mpsc::channel(4);
        tx.send(inbound("ping", Box::new(ExpiredSink))).await.unwrap();
        tx.send(inbound("missing", Box::new(ExpiredSink))).await.unwrap();
        drop(tx);

        let mut platform = FakePlatform::new(rx);
        let report = bot(false).run(&mut platform, std::future::pending()).await.unwrap();

        assert_eq!(report, ShutdownReport { received: 2, dropped: 1, delivery_failed: 1, ..Default::default() });
    }

    #[tokio::test]
    async fn registration_failure_closes_without_dispatching() {
        let (tx, rx) = mpsc::channel(4);
        let sink = RecordingSink::default();
        tx.send(invoke("ping", &sink)).await.unwrap();

        let mut platform = FakePlatform::new(rx);
        platform.fail_overwrite = true;
        let calls = platform.calls.clone();
        let mut bot = bot(true);

        let err = bot.run(&mut platform, std::future::pending()).await.unwrap_err();
        assert!(err.to_string().contains("missing access"), "{err}");
        assert_eq!(bot.state(), LifecycleState::Terminated);
        assert!(sink.taken().is_empty());
        let calls = calls.lock().unwrap();
        assert!(calls.closed);
        assert!(calls.deleted.is_empty());
    }
}
