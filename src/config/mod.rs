//! Configuration: constants, library settings and command-line options.

mod cli;
mod constants;
mod types;

// Re-export public API
pub use cli::{Command, Opt};
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
