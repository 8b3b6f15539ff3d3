//! Outbound display records.
//!
//! A `Reply` is platform-neutral; the Discord adapter turns it into an
//! interaction response with a single embed and one row of buttons.
use serde::Serialize;
use tracing::warn;

/// Platform limit we hold replies to: one row of at most three buttons.
pub const MAX_BUTTONS: usize = 3;
/// Embeds carry at most three fields.
pub const MAX_FIELDS: usize = 3;

/// Outcome category of a reply. The color is fixed per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCategory {
    Affirmative,
    Caution,
    Negative,
}

impl ColorCategory {
    pub const GREEN: u32 = 0x65bf65;
    pub const YELLOW: u32 = 0xe6d132;
    pub const RED: u32 = 0xbf0f0f;

    pub fn rgb(self) -> u32 {
        match self {
            Self::Affirmative => Self::GREEN,
            Self::Caution => Self::YELLOW,
            Self::Negative => Self::RED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: ColorCategory,
    pub url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub footer: Option<String>,
    pub fields: Vec<EmbedField>,
}

impl Embed {
    pub fn new(title: impl Into<String>, description: impl Into<String>, color: ColorCategory) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color,
            url: None,
            thumbnail_url: None,
            footer: None,
            fields: Vec::new(),
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }

    /// Append an inline field. Fields past `MAX_FIELDS` are dropped.
    pub fn inline_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        if self.fields.len() >= MAX_FIELDS {
            warn!(field = %name, "Embed field limit reached, dropping field");
            return self;
        }
        self.fields.push(EmbedField { name, value: value.into(), inline: true });
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Success,
    Danger,
}

/// A clickable component. `custom_id` routes the click back to a handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub custom_id: String,
    pub label: String,
    pub style: ButtonStyle,
}

impl Button {
    pub fn new(custom_id: &str, label: &str, style: ButtonStyle) -> Self {
        Self { custom_id: custom_id.to_string(), label: label.to_string(), style }
    }
}

/// Whether the reply is a fresh message or replaces the message that
/// carried the triggering component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyMode {
    NewMessage,
    UpdateMessage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub mode: ReplyMode,
    pub embed: Embed,
    /// Only visible to the invoking user.
    pub ephemeral: bool,
    pub buttons: Vec<Button>,
}

impl Reply {
    pub fn new(embed: Embed) -> Self {
        Self { mode: ReplyMode::NewMessage, embed, ephemeral: false, buttons: Vec::new() }
    }

    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }

    pub fn update(mut self) -> Self {
        self.mode = ReplyMode::UpdateMessage;
        self
    }

    /// Attach buttons; anything past `MAX_BUTTONS` is dropped.
    pub fn with_buttons(mut self, buttons: impl IntoIterator<Item = Button>) -> Self {
        self.buttons = buttons.into_iter().take(MAX_BUTTONS).collect();
        self
    }

    pub fn color(&self) -> ColorCategory {
        self.embed.color
    }

    pub fn button_ids(&self) -> Vec<&str> {
        self.buttons.iter().map(|b| b.custom_id.as_str()).collect()
    }
}
