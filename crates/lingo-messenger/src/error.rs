//! Delivery error types using thiserror.

use lingo_i18n::I18nError;

/// Errors raised while delivering a message.
#[derive(thiserror::Error, Debug)]
pub enum DeliveryError {
    /// The sink refused or failed to deliver.
    #[error("Sink error: {0}")]
    Sink(String),

    /// A strict translation failed before delivery.
    #[error("Translation error: {0}")]
    I18n(#[from] I18nError),

    /// I/O error while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for delivery operations.
pub type DeliveryResult<T> = Result<T, DeliveryError>;
