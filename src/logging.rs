use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use color_eyre::Result;
use color_eyre::eyre::Context;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. `log` records from the rest of the crate are
/// bridged into it, so `log::info!` and `tracing` spans end up in the same sinks.
///
/// `console_level` and `file_level` accept `EnvFilter` directives, e.g. `info`
/// or `booking_directory=debug,tower_http=info`.
pub fn init_tracing(
    console_level: &str,
    log_file: Option<&Path>,
    file_level: &str,
) -> Result<()> {
    let console_filter =
        EnvFilter::try_new(console_level).wrap_err("Failed to create console log filter")?;
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_filter(console_filter);

    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).wrap_err_with(|| {
                    format!("Failed to create log directory: {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .wrap_err_with(|| format!("Failed to open log file: {}", path.display()))?;
            let file_filter =
                EnvFilter::try_new(file_level).wrap_err("Failed to create file log filter")?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .with_filter(file_filter),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .wrap_err("Failed to install log subscriber")?;

    Ok(())
}
