//! Subcommand implementations.

pub mod read;
pub mod write;
