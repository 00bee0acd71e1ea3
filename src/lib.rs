pub mod cli;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod logging;
pub mod output;
pub mod report;
pub mod rules;
pub mod scanner;
pub mod server;
pub mod syntax;

pub use error::{Result, ValidatorError};

/// Version stamped into every report and the API descriptor.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_VALIDATION_FAILED: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
