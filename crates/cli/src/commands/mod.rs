//! CLI subcommands.

pub mod backup;
pub mod migrate;
