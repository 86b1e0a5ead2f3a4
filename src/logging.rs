//! Logging initialization

use anyhow::Context;
use ptb_config::{LogConfig, LogFormat};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a global `tracing` subscriber configured from `config`.
///
/// `RUST_LOG` takes precedence over `config.level`. Fails if a global
/// subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .with_context(|| format!("invalid log level {:?}", config.level))?,
    };

    match config.format {
        LogFormat::Text => {
            let layer = fmt::layer()
                .with_ansi(config.color)
                .with_target(config.include_target);

            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
                .context("failed to install text logger")?;
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_ansi(config.color)
                .with_target(config.include_target);

            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
                .context("failed to install compact logger")?;
        }
        LogFormat::Json => {
            let layer = fmt::layer().json().with_target(config.include_target);

            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
                .context("failed to install json logger")?;
        }
    }

    tracing::info!("Logging initialized with level: {}", config.level);
    Ok(())
}
