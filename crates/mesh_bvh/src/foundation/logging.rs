//! Logging utilities and structured logging support
//!
//! The library only emits records through the `log` facade. Installing a
//! backend is left to the application.

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with a default filter (e.g. `"info"`)
///
/// `RUST_LOG` still takes precedence when it is set. Calling this more than
/// once is harmless; later calls are ignored.
pub fn init_with_level(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env).try_init();
}
