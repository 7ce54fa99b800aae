//! Monthly hours report CLI library.
//!
//! This crate provides the CLI interface: argument parsing, configuration,
//! and the console, JSON and PDF sinks for a [`hours_core::MonthlyReport`].

mod cli;
pub mod commands;
mod config;
pub mod pdf;
pub mod table;

pub use cli::Cli;
pub use config::Config;
