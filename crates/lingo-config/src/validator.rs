//! Runtime validation entry point.

use crate::schema::Config;
use lingo_common::Result;
use tracing::warn;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration.
    pub fn validate(config: &Config) -> Result<()> {
        config.validate().map_err(|e| {
            warn!("Configuration rejected: {}", e);
            e.into()
        })
    }

    /// Validates a configuration and checks that its locale directory exists.
    pub fn validate_with_filesystem(config: &Config) -> Result<()> {
        Self::validate(config)?;
        if !config.locale.directory.is_dir() {
            warn!(
                "Locale directory does not exist: {:?}",
                config.locale.directory
            );
            return Err(lingo_common::LingoError::Config(format!(
                "locale directory {} does not exist",
                config.locale.directory.display()
            ))
            .into());
        }
        Ok(())
    }
}
