use tracing::subscriber::SetGlobalDefaultError;
use tracing::Level;

/// Maps `-v` repetitions to a max level: none = info, one = debug, more = trace.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs a compact fmt subscriber on stderr as the global default.
///
/// Binaries call this once at startup; the library itself only emits events.
pub fn init_logging(verbosity: u8) -> Result<(), SetGlobalDefaultError> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_max_level(level_for(verbosity))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}
