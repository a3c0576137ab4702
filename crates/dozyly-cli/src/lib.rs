//! Dozyly CLI library.
//!
//! This crate provides the command-line interface for the Dozyly sleep tracker.

mod cli;
pub mod commands;
mod config;
pub mod notice;

pub use cli::{AddArgs, Cli, Commands};
pub use config::Config;
