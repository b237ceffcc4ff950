//! Command handlers for CLI operations
//!
//! Command execution logic, separated from parsing and validation.

pub mod serve;

pub use serve::ServeCommandHandler;
