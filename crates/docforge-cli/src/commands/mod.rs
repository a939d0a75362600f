//! Subcommand implementations.

pub mod gen;
pub mod verify;
