//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Honours `RUST_LOG`; anything it does not mention logs at `default_level`.
pub fn init(default_level: log::LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(default_level)
        .parse_default_env()
        .init();
}
