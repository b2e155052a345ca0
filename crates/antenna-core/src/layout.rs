//! Paths inside the host's state tree.

use std::path::{Path, PathBuf};

/// File extension of session transcripts.
pub const TRANSCRIPT_EXTENSION: &str = "jsonl";

/// Resolves the files the monitor reads, relative to the state root.
///
/// ```text
/// <root>/
///   agents/main/sessions/
///     sessions.json
///     <sessionId>.jsonl
///   cron/
///     jobs.json
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateLayout {
    root: PathBuf,
}

impl StateLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the transcripts and the session catalog.
    pub fn sessions_dir(&self) -> PathBuf {
        self.root.join("agents").join("main").join("sessions")
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.sessions_dir().join("sessions.json")
    }

    pub fn cron_jobs_path(&self) -> PathBuf {
        self.root.join("cron").join("jobs.json")
    }

    pub fn transcript_path(&self, session_id: &str) -> PathBuf {
        self.sessions_dir()
            .join(format!("{session_id}.{TRANSCRIPT_EXTENSION}"))
    }
}
