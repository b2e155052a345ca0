//! Dashboard command: sessions grouped by activity and kind.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use antenna_core::{AggregationClient, DashboardData, SessionSummary};
use chrono::Local;

use super::util::{format_cost, model_display, plural, time_ago, truncate, underline};

const NAME_WIDTH: usize = 24;
const MODEL_WIDTH: usize = 16;

fn format_row(output: &mut String, session: &SessionSummary, now_ms: i64) {
    let name = truncate(&session.name, NAME_WIDTH);
    let model = truncate(model_display(&session.model), MODEL_WIDTH);
    writeln!(
        output,
        "  {badge:<4}  {name:<NAME_WIDTH$}  {model:<MODEL_WIDTH$}  {count:>4} msgs  {total:>9}  today {today:>9}  {updated}",
        badge = session.kind.badge(),
        count = session.message_count,
        total = format_cost(session.total_cost),
        today = format_cost(session.today_cost),
        updated = time_ago(session.updated_at, now_ms),
    )
    .unwrap();
}

fn format_section(
    output: &mut String,
    title: &str,
    sessions: &[&SessionSummary],
    now_ms: i64,
) {
    if sessions.is_empty() {
        return;
    }
    let heading = format!("{title} ({})", sessions.len());
    writeln!(output).unwrap();
    writeln!(output, "{heading}").unwrap();
    writeln!(output, "{}", underline(&heading)).unwrap();
    for session in sessions {
        format_row(output, session, now_ms);
    }
}

/// Formats the human-readable dashboard. Session ages are relative to `now_ms`.
pub fn format_dashboard(data: &DashboardData, sessions_dir: &Path, now_ms: i64) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "ANTENNA: {} session{}",
        data.total_count,
        plural(u64::try_from(data.total_count).unwrap_or(u64::MAX))
    )
    .unwrap();
    writeln!(
        output,
        "Today: {}  Total: {}",
        format_cost(data.today_cost),
        format_cost(data.total_cost)
    )
    .unwrap();

    if data.sessions.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "No sessions found in {}.", sessions_dir.display()).unwrap();
        writeln!(output, "Hint: Run 'antenna status' to check the state directory.").unwrap();
        return output;
    }

    let groups = data.groups();
    format_section(&mut output, "ACTIVE", &groups.active, now_ms);
    format_section(&mut output, "IDLE", &groups.idle, now_ms);
    format_section(&mut output, "SUB-AGENTS", &groups.subagents, now_ms);
    format_section(&mut output, "CRON JOBS", &groups.cron, now_ms);

    output
}

/// Formats the dashboard as JSON.
pub fn format_dashboard_json(data: &DashboardData) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Runs the dashboard command.
pub fn run<W: Write>(
    writer: &mut W,
    client: &dyn AggregationClient,
    sessions_dir: &Path,
    json: bool,
) -> Result<()> {
    let data = client.dashboard();

    if json {
        writeln!(writer, "{}", format_dashboard_json(&data)?)?;
    } else {
        let now_ms = Local::now().timestamp_millis();
        write!(writer, "{}", format_dashboard(&data, sessions_dir, now_ms))?;
    }

    Ok(())
}
