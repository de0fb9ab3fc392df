//! Main entry point for the `lingo` command.

use anyhow::Context;
use clap::Parser;
use lingo_cli::{App, AppResult, Cli};
use lingo_common::{LingoError, LocaleId};
use lingo_config::{apply_env_overrides, Config, ConfigLoader, LoggingConfig};
use lingo_messenger::ConsoleSink;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = load_config(&cli)
        .await
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    let _guard = init_tracing(&config.logging).context("failed to initialize logging")?;

    info!("Starting lingo with locale {}", config.locale.current);

    let sink = Arc::new(ConsoleSink::stdout().keep_styling(cli.styled));
    let app = App::new(config, sink).context("failed to initialize locales")?;

    match app.run(&cli.command) {
        Ok(true) => Ok(ExitCode::SUCCESS),
        Ok(false) => Ok(ExitCode::FAILURE),
        Err(e) => {
            error!("Command failed: {}", e);
            Err(e.into())
        }
    }
}

async fn load_config(cli: &Cli) -> AppResult<Config> {
    let loader = ConfigLoader::new(&cli.config);
    let mut config = loader.load_or_init().await?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    if let Some(locale) = &cli.locale {
        config.locale.current = LocaleId::new(locale.trim());
    }

    config.validate()?;
    Ok(config)
}

/// Installs the global subscriber; the guard must live until exit.
fn init_tracing(logging: &LoggingConfig) -> AppResult<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let (file_layer, guard) = match &logging.file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path.file_name().ok_or_else(|| {
                LingoError::Config(format!("logging.file {} has no file name", path.display()))
            })?;
            std::fs::create_dir_all(dir)?;

            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}
