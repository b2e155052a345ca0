//! Session aggregation engine for the OpenClaw monitor.
//!
//! This crate reads the host's state tree (`~/.openclaw` by default) and
//! derives everything the front-ends display:
//! - Dashboard: one summary per session transcript, with cost accounting
//! - Hourly activity: message volume and cost over the trailing 24 hours
//!
//! Every call re-scans the filesystem. Nothing here writes to the tree.

mod catalog;
mod client;
mod histogram;
pub mod kind;
pub mod layout;
pub mod record;
mod scan;
mod summary;
pub mod time;

pub use catalog::{CatalogEntry, CronJob};
pub use client::{AggregationClient, Client};
pub use histogram::HourlyBucket;
pub use kind::{SessionKind, UnknownSessionKind};
pub use layout::StateLayout;
pub use record::TranscriptRecord;
pub use scan::{ScanError, SessionFile, list_transcripts};
pub use summary::{DashboardData, SessionGroups, SessionSummary};
