//! Hourly activity over the trailing 24 hours.

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Duration, TimeZone};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::record::for_each_record;
use crate::scan::SessionFile;
use crate::time::{HOUR_MS, WINDOW_HOURS, WINDOW_MS, format_hour};

/// Activity within one hour of the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HourlyBucket {
    /// Wall-clock label `"HH:00"` of the hour's end.
    pub hour: String,
    pub messages: u64,
    pub cost: f64,
}

/// Per-bucket counters, mergeable across files.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Tally {
    messages: [u64; WINDOW_HOURS],
    cost: [f64; WINDOW_HOURS],
}

impl Tally {
    fn merge(mut self, other: Self) -> Self {
        for i in 0..WINDOW_HOURS {
            self.messages[i] += other.messages[i];
            self.cost[i] += other.cost[i];
        }
        self
    }
}

/// Bucket for a message at `ts_ms`, if it falls in `(cutoff_ms, now_ms]`.
fn bucket_index(ts_ms: i64, cutoff_ms: i64, now_ms: i64) -> Option<usize> {
    if ts_ms <= cutoff_ms || ts_ms > now_ms {
        return None;
    }
    let hours = (ts_ms - cutoff_ms) / HOUR_MS;
    // A message exactly at `now` lands one past the last bucket.
    usize::try_from(hours)
        .ok()
        .map(|i| i.min(WINDOW_HOURS - 1))
}

fn tally_transcript(path: &Path, cutoff_ms: i64, now_ms: i64) -> Tally {
    let mut tally = Tally::default();
    let result = for_each_record(path, |record| {
        if !record.is_message() {
            return;
        }
        let Some(i) = record
            .timestamp_ms()
            .and_then(|ts| bucket_index(ts, cutoff_ms, now_ms))
        else {
            return;
        };
        tally.messages[i] += 1;
        tally.cost[i] += record.cost();
    });

    match result {
        Ok(()) => tally,
        Err(e) => {
            tracing::warn!(path = ?path, error = %e, "failed to read transcript");
            Tally::default()
        }
    }
}

/// Empty buckets labelled for the window ending at `now`.
pub(crate) fn empty_buckets<Tz>(now: &DateTime<Tz>) -> Vec<HourlyBucket>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let cutoff = now.clone() - Duration::milliseconds(WINDOW_MS);
    (1..=WINDOW_MS / HOUR_MS)
        .map(|i| {
            let hour_end = cutoff.clone() + Duration::hours(i);
            HourlyBucket {
                hour: format_hour(&hour_end),
                messages: 0,
                cost: 0.0,
            }
        })
        .collect()
}

/// Bucket every message across `files` into the 24 hours ending at `now`.
pub(crate) fn build_histogram<Tz>(files: &[SessionFile], now: &DateTime<Tz>) -> Vec<HourlyBucket>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let now_ms = now.timestamp_millis();
    let cutoff_ms = now_ms - WINDOW_MS;

    let tally = files
        .par_iter()
        .map(|file| tally_transcript(&file.path, cutoff_ms, now_ms))
        .reduce(Tally::default, Tally::merge);

    let mut buckets = empty_buckets(now);
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.messages = tally.messages[i];
        bucket.cost = tally.cost[i];
    }
    buckets
}
