//! Process-wide logging setup shared by the binaries.

pub mod logging;

pub use logging::{LogConfig, LogFormat};

/// Initialize logging from the environment (`RUST_LOG`, `PANTRY_LOG_FORMAT`).
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    logging::init(LogConfig::from_env());
}
