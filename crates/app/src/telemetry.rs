use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

/// Map verbosity count to tracing level
#[must_use]
pub const fn get_verbosity_level(verbosity: u8) -> Option<Level> {
    match verbosity {
        0 => None,
        1 => Some(Level::WARN),
        2 => Some(Level::INFO),
        3 => Some(Level::DEBUG),
        _ => Some(Level::TRACE),
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the verbosity flag when set.
pub fn init(verbosity: Option<Level>) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let default_level = verbosity.unwrap_or(Level::ERROR);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str().to_lowercase()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
}
