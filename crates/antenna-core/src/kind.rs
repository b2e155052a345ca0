//! Session kind, derived from the catalog's structured key.
//!
//! Catalog keys are colon-delimited, e.g. `agent:main:cron:<job-id>`.
//! Segment 2 carries the kind, segment 3 the cron job id.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Index of the kind marker within a structured key.
const KIND_SEGMENT: usize = 2;

/// Classification of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionKind {
    /// Interactive session (also the fallback for unknown markers).
    #[default]
    Main,
    /// Session spawned by a scheduled cron job.
    Cron,
    /// Session spawned by another agent.
    Subagent,
}

impl SessionKind {
    /// Classify a structured catalog key.
    ///
    /// Keys with fewer than three segments, or an unrecognized marker, are `Main`.
    pub fn from_key(key: &str) -> Self {
        match key.split(':').nth(KIND_SEGMENT) {
            Some("cron") => Self::Cron,
            Some("subagent") => Self::Subagent,
            _ => Self::Main,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Cron => "cron",
            Self::Subagent => "subagent",
        }
    }

    /// Short uppercase label shown next to a session in listings.
    pub const fn badge(&self) -> &'static str {
        match self {
            Self::Main => "MAIN",
            Self::Cron => "CRON",
            Self::Subagent => "SUB",
        }
    }
}

/// Extract the cron job id from a structured key.
///
/// Only keys whose kind marker is `cron` carry one.
pub fn cron_job_id(key: &str) -> Option<&str> {
    let mut segments = key.split(':').skip(KIND_SEGMENT);
    match (segments.next(), segments.next()) {
        (Some("cron"), Some(id)) if !id.is_empty() => Some(id),
        _ => None,
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionKind {
    type Err = UnknownSessionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" => Ok(Self::Main),
            "cron" => Ok(Self::Cron),
            "subagent" => Ok(Self::Subagent),
            _ => Err(UnknownSessionKind(s.to_string())),
        }
    }
}

impl Serialize for SessionKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SessionKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown session kind strings.
#[derive(Debug, Clone)]
pub struct UnknownSessionKind(String);

impl fmt::Display for UnknownSessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown session kind: {}", self.0)
    }
}

impl std::error::Error for UnknownSessionKind {}
