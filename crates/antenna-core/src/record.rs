//! Transcript record parsing.
//!
//! A transcript is line-delimited JSON. Only `message` records matter for
//! accounting, and only a handful of their fields are read:
//!
//! ```json
//! {"type":"message","message":{"timestamp":1760000000000,"usage":{"cost":{"total":0.12}}}}
//! ```
//!
//! Sub-objects with an unexpected shape are treated as absent instead of
//! failing the whole line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::scan::ScanError;

/// Buffer size for `BufReader` (64KB, transcripts can grow large)
const BUFFER_SIZE: usize = 64 * 1024;

/// Record type that counts as a message.
const MESSAGE_TYPE: &str = "message";

/// One parsed transcript line.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TranscriptRecord {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    record_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    message: Option<MessageBody>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct MessageBody {
    /// Epoch milliseconds.
    #[serde(default, deserialize_with = "lenient")]
    timestamp: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    usage: Option<Usage>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct Usage {
    #[serde(default, deserialize_with = "lenient")]
    cost: Option<Cost>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct Cost {
    #[serde(default, deserialize_with = "lenient")]
    total: Option<f64>,
}

/// Deserialize a field, collapsing any shape mismatch into `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl TranscriptRecord {
    /// Parse one transcript line.
    ///
    /// Returns `None` for blank lines and for lines that are not a JSON object.
    pub fn parse(line: &[u8]) -> Option<Self> {
        if line.iter().all(u8::is_ascii_whitespace) {
            return None;
        }
        match serde_json::from_slice(line) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::trace!(error = %e, "skipping malformed transcript line");
                None
            }
        }
    }

    /// Whether this record counts towards message accounting.
    pub fn is_message(&self) -> bool {
        self.record_type.as_deref() == Some(MESSAGE_TYPE) && self.message.is_some()
    }

    /// Message timestamp in epoch milliseconds, when positive.
    pub fn timestamp_ms(&self) -> Option<i64> {
        self.message
            .as_ref()
            .and_then(|m| m.timestamp)
            .filter(|ts| *ts > 0)
    }

    /// Cost contribution of this record.
    ///
    /// Zero unless `usage.cost.total` is present and a finite, non-negative number.
    pub fn cost(&self) -> f64 {
        self.message
            .as_ref()
            .and_then(|m| m.usage.as_ref())
            .and_then(|u| u.cost.as_ref())
            .and_then(|c| c.total)
            .filter(|total| total.is_finite() && *total >= 0.0)
            .unwrap_or(0.0)
    }
}

/// Visit every parseable record of a transcript, in file order.
///
/// Blank and malformed lines are skipped. Fails only if the file cannot be
/// opened or read.
pub fn for_each_record<F>(path: &Path, mut visit: F) -> Result<(), ScanError>
where
    F: FnMut(TranscriptRecord),
{
    let file = File::open(path)?;
    let reader = BufReader::with_capacity(BUFFER_SIZE, file);

    for line in reader.split(b'\n') {
        let line = line?;
        if let Some(record) = TranscriptRecord::parse(&line) {
            visit(record);
        }
    }

    Ok(())
}
