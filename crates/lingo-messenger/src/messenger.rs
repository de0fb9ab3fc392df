//! High-level send operations over a [`MessageSink`].

use crate::channel::{Channel, Delivery, RecipientId, TitleTimes};
use crate::error::DeliveryResult;
use crate::sink::MessageSink;
use lingo_i18n::MessageResolver;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Resolves raw messages and routes them to a sink.
///
/// Every operation returns `Ok(true)` when something was delivered and
/// `Ok(false)` when the message was suppressed.
pub struct Messenger {
    resolver: Arc<MessageResolver>,
    sink: Arc<dyn MessageSink>,
    prefix: String,
}

impl std::fmt::Debug for Messenger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Messenger")
            .field("resolver", &self.resolver)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl Messenger {
    /// Creates a messenger without a recipient prefix.
    pub fn new(resolver: Arc<MessageResolver>, sink: Arc<dyn MessageSink>) -> Self {
        Self {
            resolver,
            sink,
            prefix: String::new(),
        }
    }

    /// Sets the raw prefix prepended to recipient messages.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// The underlying resolver.
    pub fn resolver(&self) -> &Arc<MessageResolver> {
        &self.resolver
    }

    /// The configured raw prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Sends to every session.
    pub fn broadcast<S: AsRef<str>>(&self, raw: &str, params: &[S]) -> DeliveryResult<bool> {
        self.dispatch(Channel::Broadcast { permission: None }, raw, params)
    }

    /// Sends to every session holding `permission`.
    pub fn broadcast_with_permission<S: AsRef<str>>(
        &self,
        permission: &str,
        raw: &str,
        params: &[S],
    ) -> DeliveryResult<bool> {
        self.dispatch(
            Channel::Broadcast {
                permission: Some(permission.to_string()),
            },
            raw,
            params,
        )
    }

    /// Sends to one session, behind the configured prefix.
    pub fn send<S: AsRef<str>>(
        &self,
        recipient: &RecipientId,
        raw: &str,
        params: &[S],
    ) -> DeliveryResult<bool> {
        self.send_with_prefix(recipient, &self.prefix, raw, params)
    }

    /// Sends to one session behind an explicit prefix.
    ///
    /// The prefix is never interpolated. Markup runs over prefix and message
    /// together, so a prefix may carry a token the message completes.
    #[instrument(skip(self, raw, params), fields(recipient = %recipient))]
    pub fn send_with_prefix<S: AsRef<str>>(
        &self,
        recipient: &RecipientId,
        prefix: &str,
        raw: &str,
        params: &[S],
    ) -> DeliveryResult<bool> {
        let Some(body) = self.resolver.render(raw, params) else {
            return Ok(false);
        };

        self.deliver(
            Channel::Recipient {
                recipient: recipient.clone(),
            },
            self.resolver.markup(&format!("{prefix}{body}")),
        )
    }

    /// Strict variant of [`Messenger::send`] for a single translation key.
    ///
    /// A missing locale or key is an error instead of literal output.
    pub fn send_key<S: AsRef<str>>(
        &self,
        recipient: &RecipientId,
        key: &str,
        params: &[S],
    ) -> DeliveryResult<()> {
        let body = self.resolver.render_key(key, params)?;

        self.deliver(
            Channel::Recipient {
                recipient: recipient.clone(),
            },
            self.resolver.markup(&format!("{}{body}", self.prefix)),
        )?;
        Ok(())
    }

    /// Shows a message on the session's status bar.
    pub fn action_bar<S: AsRef<str>>(
        &self,
        recipient: &RecipientId,
        raw: &str,
        params: &[S],
    ) -> DeliveryResult<bool> {
        self.dispatch(
            Channel::ActionBar {
                recipient: recipient.clone(),
            },
            raw,
            params,
        )
    }

    /// Shows a title with default timings.
    pub fn title<S: AsRef<str>>(
        &self,
        recipient: &RecipientId,
        title: &str,
        subtitle: &str,
        params: &[S],
    ) -> DeliveryResult<bool> {
        self.title_with_times(recipient, title, subtitle, TitleTimes::default(), params)
    }

    /// Shows a title with explicit timings.
    ///
    /// A suppressed part is shown empty. Nothing is sent when both are
    /// suppressed.
    pub fn title_with_times<S: AsRef<str>>(
        &self,
        recipient: &RecipientId,
        title: &str,
        subtitle: &str,
        times: TitleTimes,
        params: &[S],
    ) -> DeliveryResult<bool> {
        let title = self.resolver.resolve(title, params);
        let subtitle = self.resolver.resolve(subtitle, params);
        if title.is_none() && subtitle.is_none() {
            debug!("Title and subtitle both suppressed for {}", recipient);
            return Ok(false);
        }

        self.deliver(
            Channel::Title {
                recipient: recipient.clone(),
                subtitle: subtitle.unwrap_or_default(),
                times,
            },
            title.unwrap_or_default(),
        )
    }

    /// Clears the session's title.
    pub fn reset_title(&self, recipient: &RecipientId) -> DeliveryResult<()> {
        self.sink.deliver(Delivery::new(
            Channel::ResetTitle {
                recipient: recipient.clone(),
            },
            String::new(),
        ))
    }

    /// Writes to the host console.
    pub fn console<S: AsRef<str>>(&self, raw: &str, params: &[S]) -> DeliveryResult<bool> {
        self.dispatch(Channel::Console, raw, params)
    }

    fn dispatch<S: AsRef<str>>(
        &self,
        channel: Channel,
        raw: &str,
        params: &[S],
    ) -> DeliveryResult<bool> {
        match self.resolver.resolve(raw, params) {
            Some(text) => self.deliver(channel, text),
            None => {
                debug!("Skipping suppressed {} message", channel.name());
                Ok(false)
            }
        }
    }

    fn deliver(&self, channel: Channel, text: String) -> DeliveryResult<bool> {
        debug!("Delivering {} message", channel.name());
        self.sink.deliver(Delivery::new(channel, text))?;
        Ok(true)
    }
}
