//! CLI subcommand implementations.

pub mod add;
pub mod chart;
pub mod delete;
pub mod list;
pub mod status;
pub mod suggest;
