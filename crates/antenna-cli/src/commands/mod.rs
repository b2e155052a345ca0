//! CLI subcommand implementations.

pub mod activity;
pub mod dashboard;
pub mod status;
pub mod util;
pub mod watch;
