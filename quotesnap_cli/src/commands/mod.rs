//! CLI subcommand implementations.

pub mod snapshot;
