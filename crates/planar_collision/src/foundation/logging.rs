//! Logging setup for binaries and tests
//!
//! The detector itself only goes through the `log` facade: `trace` for
//! degenerate-geometry fallbacks and ties, `warn` for rejected queries and a
//! full contact buffer, `debug` for configuration loading.

pub use log::{debug, info, warn, error, trace};
use log::LevelFilter;

/// Initialize env_logger at `default_level`, letting `RUST_LOG` override it
pub fn init(default_level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .init();
}

/// Initialize logging for tests, ignoring repeated initialization
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}
