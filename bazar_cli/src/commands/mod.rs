//! CLI subcommand implementations.

pub mod browse;
pub mod create;
pub mod open;
pub mod search;
pub mod show;
