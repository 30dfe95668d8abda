use tracing::subscriber::SetGlobalDefaultError;

use crate::config::LogLevel;

/// Installs a compact `tracing` subscriber writing to stderr, so stdout only
/// carries the results.
pub fn init_logging(level: LogLevel) -> Result<(), SetGlobalDefaultError> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::from(level))
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}
