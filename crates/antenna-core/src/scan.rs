//! Transcript discovery in the sessions directory.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::layout::TRANSCRIPT_EXTENSION;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A transcript file found in the sessions directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFile {
    pub path: PathBuf,
    /// File name without the `.jsonl` suffix.
    pub session_id: String,
    /// Filesystem modification time in epoch milliseconds, if it could be read.
    pub modified_ms: Option<i64>,
}

fn modified_ms(path: &Path) -> Option<i64> {
    match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(modified) => Some(DateTime::<Utc>::from(modified).timestamp_millis()),
        Err(e) => {
            tracing::debug!(path = ?path, error = %e, "failed to stat transcript");
            None
        }
    }
}

/// List the transcripts directly inside `sessions_dir`, ordered by session id.
///
/// Only entries named `<sessionId>.jsonl` are kept, so the catalog file is
/// never picked up. A missing directory yields no transcripts.
pub fn list_transcripts(sessions_dir: &Path) -> Result<Vec<SessionFile>, ScanError> {
    if !sessions_dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(sessions_dir)?.map(|entry| entry.map(|e| e.path()));
    Ok(collect_transcripts(entries))
}

/// Keep the transcript paths among `entries`. Unreadable entries are skipped.
fn collect_transcripts<I>(entries: I) -> Vec<SessionFile>
where
    I: IntoIterator<Item = io::Result<PathBuf>>,
{
    let suffix = format!(".{TRANSCRIPT_EXTENSION}");
    let mut seen: HashSet<String> = HashSet::new();
    let mut files = Vec::new();

    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        if path.is_dir() {
            continue;
        }

        let Some(session_id) = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_suffix(suffix.as_str()))
        else {
            continue;
        };

        if session_id.is_empty() {
            tracing::warn!(path = ?path, "skipping transcript with empty session ID");
            continue;
        }
        if !seen.insert(session_id.to_string()) {
            continue;
        }

        files.push(SessionFile {
            modified_ms: modified_ms(&path),
            session_id: session_id.to_string(),
            path,
        });
    }

    files.sort_by(|a, b| a.session_id.cmp(&b.session_id));
    files
}
