//! The aggregation facade shared by the front-ends.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};

use crate::catalog::{load_catalog, load_cron_names};
use crate::histogram::{HourlyBucket, build_histogram, empty_buckets};
use crate::layout::StateLayout;
use crate::scan::{SessionFile, list_transcripts};
use crate::summary::{DashboardData, summarize_sessions};

/// What a front-end needs from the aggregation engine.
///
/// Implementations never fail: unreadable inputs degrade to empty or zeroed
/// results.
pub trait AggregationClient {
    /// All sessions with cost accounting, most recently updated first.
    fn dashboard(&self) -> DashboardData;

    /// Message volume and cost for each of the last 24 hours, oldest first.
    fn hourly_activity(&self) -> Vec<HourlyBucket>;
}

/// Aggregates directly from the host's state tree on disk.
///
/// Holds no state besides the root path; every call re-scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    layout: StateLayout,
}

impl Client {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            layout: StateLayout::new(root),
        }
    }

    pub fn root(&self) -> &Path {
        self.layout.root()
    }

    pub const fn layout(&self) -> &StateLayout {
        &self.layout
    }

    fn transcripts(&self) -> Vec<SessionFile> {
        let sessions_dir = self.layout.sessions_dir();
        list_transcripts(&sessions_dir).unwrap_or_else(|e| {
            tracing::warn!(path = ?sessions_dir, error = %e, "failed to list sessions directory");
            Vec::new()
        })
    }

    /// Dashboard as seen at `now`. The zone of `now` defines "today".
    pub fn dashboard_at<Tz>(&self, now: &DateTime<Tz>) -> DashboardData
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let files = self.transcripts();
        if files.is_empty() {
            return DashboardData::default();
        }

        let catalog_path = self.layout.catalog_path();
        let catalog = load_catalog(&catalog_path).unwrap_or_else(|e| {
            tracing::warn!(path = ?catalog_path, error = %e, "ignoring unreadable session catalog");
            HashMap::new()
        });

        let cron_path = self.layout.cron_jobs_path();
        let cron_names = load_cron_names(&cron_path).unwrap_or_else(|e| {
            tracing::warn!(path = ?cron_path, error = %e, "ignoring unreadable cron catalog");
            HashMap::new()
        });

        tracing::debug!(
            transcripts = files.len(),
            catalog_entries = catalog.len(),
            cron_jobs = cron_names.len(),
            "building dashboard"
        );

        let sessions = summarize_sessions(&files, &catalog, &cron_names, now);
        DashboardData::from_sessions(sessions)
    }

    /// Hourly activity for the 24 hours ending at `now`, labelled in `now`'s zone.
    pub fn hourly_activity_at<Tz>(&self, now: &DateTime<Tz>) -> Vec<HourlyBucket>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let files = self.transcripts();
        if files.is_empty() {
            return empty_buckets(now);
        }
        build_histogram(&files, now)
    }
}

impl AggregationClient for Client {
    fn dashboard(&self) -> DashboardData {
        self.dashboard_at(&Local::now())
    }

    fn hourly_activity(&self) -> Vec<HourlyBucket> {
        self.hourly_activity_at(&Local::now())
    }
}
