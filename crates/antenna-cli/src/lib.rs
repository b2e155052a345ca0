//! OpenClaw monitor CLI library.
//!
//! This crate provides the terminal front-end over `antenna-core`.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
