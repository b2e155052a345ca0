//! Session catalog (`sessions.json`) and cron catalog (`cron/jobs.json`) loading.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::Deserialize;

use crate::scan::ScanError;

/// A catalog entry, re-keyed by session id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogEntry {
    pub session_id: String,
    /// Epoch milliseconds, 0 when unknown.
    pub updated_at: i64,
    /// Human label, empty when unset.
    pub label: String,
    pub model: String,
    /// The structured key the host filed this entry under.
    pub key: String,
}

/// Raw catalog value as written by the host.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCatalogEntry {
    #[serde(default)]
    session_id: String,
    #[serde(default)]
    updated_at: Option<i64>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    model: Option<String>,
}

/// A scheduled job from the cron catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CronJob {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct CronJobsFile {
    #[serde(default)]
    jobs: Vec<CronJob>,
}

/// Read a file, mapping "not found" to `None`.
fn read_optional(path: &Path) -> Result<Option<String>, ScanError> {
    match fs::read_to_string(path) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Parse catalog JSON into a lookup keyed by session id.
///
/// Entries that don't match the expected shape, or lack a session id, are
/// skipped individually. When several keys name the same session, the most
/// recently updated entry wins (ties go to the lexically first key).
pub fn parse_catalog(data: &str) -> Result<HashMap<String, CatalogEntry>, ScanError> {
    let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(data)?;
    let mut by_id: HashMap<String, CatalogEntry> = HashMap::with_capacity(raw.len());

    for (key, value) in raw {
        let entry: RawCatalogEntry = match serde_json::from_value(value) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::trace!(key = %key, error = %e, "skipping malformed catalog entry");
                continue;
            }
        };
        if entry.session_id.is_empty() {
            tracing::trace!(key = %key, "skipping catalog entry without session id");
            continue;
        }

        let entry = CatalogEntry {
            session_id: entry.session_id,
            updated_at: entry.updated_at.unwrap_or(0),
            label: entry.label.unwrap_or_default(),
            model: entry.model.unwrap_or_default(),
            key,
        };

        match by_id.get(&entry.session_id) {
            Some(existing) if existing.updated_at >= entry.updated_at => {}
            _ => {
                by_id.insert(entry.session_id.clone(), entry);
            }
        }
    }

    Ok(by_id)
}

/// Load the session catalog. A missing file is an empty catalog.
pub fn load_catalog(path: &Path) -> Result<HashMap<String, CatalogEntry>, ScanError> {
    match read_optional(path)? {
        Some(data) => parse_catalog(&data),
        None => {
            tracing::debug!(path = ?path, "no session catalog");
            Ok(HashMap::new())
        }
    }
}

/// Parse cron catalog JSON into an `id -> name` lookup.
pub fn parse_cron_names(data: &str) -> Result<HashMap<String, String>, ScanError> {
    let file: CronJobsFile = serde_json::from_str(data)?;
    Ok(file
        .jobs
        .into_iter()
        .filter(|job| !job.id.is_empty())
        .map(|job| (job.id, job.name))
        .collect())
}

/// Load cron job names. A missing file yields no names.
pub fn load_cron_names(path: &Path) -> Result<HashMap<String, String>, ScanError> {
    match read_optional(path)? {
        Some(data) => parse_cron_names(&data),
        None => {
            tracing::debug!(path = ?path, "no cron catalog");
            Ok(HashMap::new())
        }
    }
}
