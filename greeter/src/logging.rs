use std::fs::File;
use std::path::Path;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing with optional file output.
///
/// Without a log file nothing is installed, so the TUI owns stdout.
/// The filter comes from `RUST_LOG` and falls back to `info`.
pub fn init_tracing(log_file: Option<&Path>) -> std::io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = File::create(path)?;
    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    Ok(())
}
