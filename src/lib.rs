// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod edit;
pub mod error;
pub mod logging;
pub mod passage;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod ui;

pub use error::{Error, Result};

/// Cadence of the session clock; every tick adds exactly this much elapsed time.
pub const TICK_RATE_MS: u64 = 100;
