//! CLI command implementations.

pub mod client;
pub mod config;
pub mod replica;
pub mod shell;
pub mod version;
