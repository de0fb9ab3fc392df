//! Application-wide error types using thiserror.

use lingo_common::LingoError;
use lingo_i18n::I18nError;
use lingo_messenger::DeliveryError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] LingoError),

    /// Locale loading or translation error.
    #[error("Localization error: {0}")]
    I18n(#[from] I18nError),

    /// Message delivery error.
    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    /// Error surfaced by the configuration loader.
    #[error("{0}")]
    Loader(#[from] Box<dyn std::error::Error + Send + Sync>),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
