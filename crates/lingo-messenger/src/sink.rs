//! Output sinks that receive resolved deliveries.

use crate::channel::{Channel, Delivery};
use crate::error::{DeliveryError, DeliveryResult};
use lingo_i18n::strip_styling;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;
use tracing::{trace, warn};

/// Receives fully resolved messages.
///
/// Hosts implement this to bridge into their own chat, status bar, title or
/// console primitives.
pub trait MessageSink: Send + Sync {
    /// Delivers one message.
    fn deliver(&self, delivery: Delivery) -> DeliveryResult<()>;
}

/// Writes every delivery as a plain line, with styling codes removed.
pub struct ConsoleSink {
    out: Mutex<Box<dyn Write + Send>>,
    keep_styling: bool,
}

impl ConsoleSink {
    /// Sink writing to standard output.
    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    /// Sink writing to an arbitrary writer.
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
            keep_styling: false,
        }
    }

    /// Leave `§` codes in the output.
    #[must_use]
    pub fn keep_styling(mut self, keep: bool) -> Self {
        self.keep_styling = keep;
        self
    }

    fn clean(&self, text: &str) -> String {
        if self.keep_styling {
            text.to_string()
        } else {
            strip_styling(text)
        }
    }

    fn format_line(&self, delivery: &Delivery) -> Option<String> {
        let text = self.clean(&delivery.text);
        let line = match &delivery.channel {
            Channel::Broadcast { permission: None } => format!("[broadcast] {text}"),
            Channel::Broadcast {
                permission: Some(permission),
            } => format!("[broadcast:{permission}] {text}"),
            Channel::Recipient { recipient } => format!("[{recipient}] {text}"),
            Channel::ActionBar { recipient } => format!("[{recipient}:action_bar] {text}"),
            Channel::Title {
                recipient,
                subtitle,
                ..
            } => {
                let subtitle = self.clean(subtitle);
                if subtitle.is_empty() {
                    format!("[{recipient}:title] {text}")
                } else {
                    format!("[{recipient}:title] {text} | {subtitle}")
                }
            }
            Channel::ResetTitle { .. } => return None,
            Channel::Console => text,
        };
        Some(line)
    }
}

impl std::fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleSink")
            .field("keep_styling", &self.keep_styling)
            .finish_non_exhaustive()
    }
}

impl MessageSink for ConsoleSink {
    fn deliver(&self, delivery: Delivery) -> DeliveryResult<()> {
        trace!("Console sink received {} delivery", delivery.channel.name());
        let Some(line) = self.format_line(&delivery) else {
            return Ok(());
        };

        let mut out = self.out.lock();
        writeln!(out, "{line}")?;
        out.flush()?;
        Ok(())
    }
}

/// Forwards each delivery to several sinks.
///
/// Every sink is attempted; the first failure is reported after all ran.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn MessageSink>>,
}

impl FanoutSink {
    /// Creates an empty fan-out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sink.
    #[must_use]
    pub fn with(mut self, sink: Arc<dyn MessageSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Number of attached sinks.
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Whether no sink is attached.
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl MessageSink for FanoutSink {
    fn deliver(&self, delivery: Delivery) -> DeliveryResult<()> {
        let mut first_error: Option<DeliveryError> = None;
        for sink in &self.sinks {
            if let Err(e) = sink.deliver(delivery.clone()) {
                warn!("Sink failed on {} delivery: {}", delivery.channel.name(), e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
