//! Output channel and delivery definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a single recipient session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipientId(pub String);

impl fmt::Display for RecipientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RecipientId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Title display timings, in host ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleTimes {
    /// Fade-in duration.
    pub fade_in: u32,
    /// Time the title stays fully visible.
    pub stay: u32,
    /// Fade-out duration.
    pub fade_out: u32,
}

impl TitleTimes {
    /// Creates custom title timings.
    pub const fn new(fade_in: u32, stay: u32, fade_out: u32) -> Self {
        Self {
            fade_in,
            stay,
            fade_out,
        }
    }
}

impl Default for TitleTimes {
    fn default() -> Self {
        Self::new(10, 70, 20)
    }
}

/// Where a resolved message goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "channel", rename_all = "snake_case")]
pub enum Channel {
    /// Every connected session, optionally only those holding `permission`.
    Broadcast {
        /// Permission a session needs to receive the message.
        permission: Option<String>,
    },
    /// Chat of a single session.
    Recipient {
        /// Target session.
        recipient: RecipientId,
    },
    /// Status bar of a single session.
    ActionBar {
        /// Target session.
        recipient: RecipientId,
    },
    /// Title and subtitle of a single session.
    Title {
        /// Target session.
        recipient: RecipientId,
        /// Resolved subtitle, possibly empty.
        subtitle: String,
        /// Display timings.
        times: TitleTimes,
    },
    /// Clears the title of a single session.
    ResetTitle {
        /// Target session.
        recipient: RecipientId,
    },
    /// Host console.
    Console,
}

impl Channel {
    /// Short name used in logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Broadcast { .. } => "broadcast",
            Self::Recipient { .. } => "recipient",
            Self::ActionBar { .. } => "action_bar",
            Self::Title { .. } => "title",
            Self::ResetTitle { .. } => "reset_title",
            Self::Console => "console",
        }
    }
}

/// A fully resolved message bound to a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    /// Destination.
    pub channel: Channel,
    /// Final styled text.
    pub text: String,
}

impl Delivery {
    /// Creates a delivery.
    pub fn new(channel: Channel, text: impl Into<String>) -> Self {
        Self {
            channel,
            text: text.into(),
        }
    }
}
