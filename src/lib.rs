//! tailbridge library
//!
//! Core functionality for the tailbridge CLI: config resolution, app
//! validation, process invocation, scaffolding, and the stylesheet tag
//! helpers.

pub mod cli;
pub mod config;
pub mod paths;
pub mod runner;
pub mod scaffold;
pub mod standalone;
pub mod tags;
pub mod validate;

pub use cli::Cli;
pub use config::Config;
