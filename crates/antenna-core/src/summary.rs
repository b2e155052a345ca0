//! Per-session summaries and the dashboard envelope.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use chrono::{DateTime, TimeZone};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;
use crate::kind::{SessionKind, cron_job_id};
use crate::record::for_each_record;
use crate::scan::{ScanError, SessionFile};
use crate::time::{format_short_datetime, is_active, start_of_day};

/// Characters of the session id used in a cron fallback name.
const CRON_NAME_ID_CHARS: usize = 8;

/// Characters of the session id used as a fallback name for sub-agents.
const SHORT_ID_CHARS: usize = 12;

/// One monitored session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: String,
    pub name: String,
    pub kind: SessionKind,
    pub model: String,
    pub message_count: u64,
    pub total_cost: f64,
    /// Cost of messages timestamped after local midnight.
    pub today_cost: f64,
    /// Epoch milliseconds.
    pub updated_at: i64,
    pub is_active: bool,
}

/// Dashboard response: every session, most recently updated first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub sessions: Vec<SessionSummary>,
    pub total_count: usize,
    pub total_cost: f64,
    pub today_cost: f64,
}

impl DashboardData {
    /// Build the envelope, deriving count and totals from `sessions`.
    pub fn from_sessions(sessions: Vec<SessionSummary>) -> Self {
        let total_cost = sessions.iter().map(|s| s.total_cost).sum();
        let today_cost = sessions.iter().map(|s| s.today_cost).sum();
        Self {
            total_count: sessions.len(),
            sessions,
            total_cost,
            today_cost,
        }
    }

    pub fn groups(&self) -> SessionGroups<'_> {
        SessionGroups::from_sessions(&self.sessions)
    }
}

/// Sessions partitioned the way the dashboard lists them.
///
/// Main sessions split on activity; sub-agents and cron runs are listed on
/// their own regardless of activity. Order within a group follows the input.
#[derive(Debug, Default, PartialEq)]
pub struct SessionGroups<'a> {
    pub active: Vec<&'a SessionSummary>,
    pub idle: Vec<&'a SessionSummary>,
    pub subagents: Vec<&'a SessionSummary>,
    pub cron: Vec<&'a SessionSummary>,
}

impl<'a> SessionGroups<'a> {
    pub fn from_sessions(sessions: &'a [SessionSummary]) -> Self {
        let mut groups = Self::default();
        for session in sessions {
            match session.kind {
                SessionKind::Subagent => groups.subagents.push(session),
                SessionKind::Cron => groups.cron.push(session),
                SessionKind::Main if session.is_active => groups.active.push(session),
                SessionKind::Main => groups.idle.push(session),
            }
        }
        groups
    }
}

/// Message accounting for one transcript.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct SessionUsage {
    message_count: u64,
    total_cost: f64,
    today_cost: f64,
}

/// Count messages and costs in a transcript.
///
/// Cost counts towards today when its message is timestamped strictly after
/// `today_start_ms`.
fn tally_transcript(path: &Path, today_start_ms: i64) -> Result<SessionUsage, ScanError> {
    let mut usage = SessionUsage::default();
    for_each_record(path, |record| {
        if !record.is_message() {
            return;
        }
        usage.message_count += 1;
        let cost = record.cost();
        usage.total_cost += cost;
        if record.timestamp_ms().is_some_and(|ts| ts > today_start_ms) {
            usage.today_cost += cost;
        }
    })?;
    Ok(usage)
}

fn prefix_chars(s: &str, n: usize) -> &str {
    s.char_indices().nth(n).map_or(s, |(end, _)| &s[..end])
}

/// Name shown for a session whose catalog entry has no label.
fn fallback_name<Tz>(
    kind: SessionKind,
    session_id: &str,
    updated_at: i64,
    cron_name: Option<&str>,
    tz: &Tz,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match kind {
        SessionKind::Main => format_short_datetime(updated_at, tz),
        SessionKind::Cron => cron_name.map_or_else(
            || format!("cron-{}", prefix_chars(session_id, CRON_NAME_ID_CHARS)),
            str::to_string,
        ),
        SessionKind::Subagent => prefix_chars(session_id, SHORT_ID_CHARS).to_string(),
    }
}

/// Combine a transcript, its catalog entry and its accounting into a summary.
fn build_summary<Tz>(
    file: &SessionFile,
    usage: SessionUsage,
    entry: Option<&CatalogEntry>,
    cron_names: &HashMap<String, String>,
    now: &DateTime<Tz>,
) -> SessionSummary
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut summary = SessionSummary {
        session_id: file.session_id.clone(),
        name: String::new(),
        kind: SessionKind::Main,
        model: String::new(),
        message_count: usage.message_count,
        total_cost: usage.total_cost,
        today_cost: usage.today_cost,
        updated_at: file.modified_ms.unwrap_or(0),
        is_active: false,
    };

    let mut cron_name = None;
    if let Some(entry) = entry {
        summary.name.clone_from(&entry.label);
        summary.model.clone_from(&entry.model);
        summary.kind = SessionKind::from_key(&entry.key);
        if entry.updated_at > 0 {
            summary.updated_at = entry.updated_at;
        }
        cron_name = cron_job_id(&entry.key)
            .and_then(|id| cron_names.get(id))
            .map(String::as_str)
            .filter(|name| !name.is_empty());
    }

    summary.is_active = is_active(summary.updated_at, now.timestamp_millis());

    if summary.name.is_empty() {
        summary.name = fallback_name(
            summary.kind,
            &summary.session_id,
            summary.updated_at,
            cron_name,
            &now.timezone(),
        );
    }

    summary
}

/// Summarize every transcript, most recently updated first.
///
/// Transcripts that can't be read still produce a summary, with zero counts.
pub(crate) fn summarize_sessions<Tz>(
    files: &[SessionFile],
    catalog: &HashMap<String, CatalogEntry>,
    cron_names: &HashMap<String, String>,
    now: &DateTime<Tz>,
) -> Vec<SessionSummary>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let today_start_ms = start_of_day(now).timestamp_millis();

    let usages: Vec<SessionUsage> = files
        .par_iter()
        .map(|file| {
            tally_transcript(&file.path, today_start_ms).unwrap_or_else(|e| {
                tracing::warn!(path = ?file.path, error = %e, "failed to read transcript");
                SessionUsage::default()
            })
        })
        .collect();

    let mut sessions: Vec<SessionSummary> = files
        .iter()
        .zip(usages)
        .map(|(file, usage)| {
            build_summary(
                file,
                usage,
                catalog.get(&file.session_id),
                cron_names,
                now,
            )
        })
        .collect();

    sessions.sort_by(|a, b| {
        b.updated_at
            .cmp(&a.updated_at)
            .then_with(|| a.session_id.cmp(&b.session_id))
    });
    sessions
}
