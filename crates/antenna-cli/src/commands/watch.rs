//! Watch command: redraws the dashboard and activity on an interval.

use std::io::Write;
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use antenna_core::AggregationClient;
use chrono::{DateTime, Local};

use super::activity::format_activity;
use super::dashboard::format_dashboard;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Renders one full frame as of `now`.
fn render_frame(
    client: &dyn AggregationClient,
    sessions_dir: &Path,
    now: &DateTime<Local>,
) -> String {
    let stamp = now.format("%H:%M:%S");
    let dashboard = format_dashboard(
        &client.dashboard(),
        sessions_dir,
        now.timestamp_millis(),
    );
    let activity = format_activity(&client.hourly_activity());
    format!("{CLEAR_SCREEN}Updated {stamp}\n\n{dashboard}\n{activity}")
}

/// Refreshes until interrupted, or `count` times when given.
pub fn run<W: Write>(
    writer: &mut W,
    client: &dyn AggregationClient,
    sessions_dir: &Path,
    interval: Duration,
    count: Option<u64>,
) -> Result<()> {
    let mut refreshes = 0_u64;
    loop {
        write!(writer, "{}", render_frame(client, sessions_dir, &Local::now()))?;
        writer.flush()?;
        refreshes += 1;
        tracing::trace!(refreshes, "redrew watch frame");

        if count.is_some_and(|limit| refreshes >= limit) {
            return Ok(());
        }
        thread::sleep(interval);
    }
}
