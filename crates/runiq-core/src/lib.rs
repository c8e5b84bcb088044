pub mod engine;
pub mod key;
pub mod options;

/// Core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
