//! Snapshot documents and the JSON file writer.
//!
//! A run is serialized through one of two envelopes. The record list keeps
//! only captured quotes under `data`; the symbol map keys every configured
//! symbol and writes `null` for the ones that came back empty.

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::SecondsFormat;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::SnapshotError;
use crate::fetcher::{SnapshotRun, SymbolOutcome};
use crate::profile::{SnapshotLayout, SnapshotProfile};
use crate::quote::QuoteRecord;

#[derive(Debug, Serialize)]
pub struct RecordListSnapshot<'a> {
    pub timestamp: String,
    pub source: &'a str,
    pub success_count: usize,
    pub total_count: usize,
    pub data: Vec<&'a QuoteRecord>,
}

#[derive(Debug, Serialize)]
pub struct SymbolMapSnapshot<'a> {
    pub success_count: usize,
    pub total_count: usize,
    pub data: SymbolMap<'a>,
}

/// Serializes outcomes as an object in configured order, absent ones as `null`.
#[derive(Debug)]
pub struct SymbolMap<'a>(pub &'a [SymbolOutcome]);

impl Serialize for SymbolMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in self.0 {
            map.serialize_entry(&entry.spec.symbol, &entry.outcome.record())?;
        }
        map.end()
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SnapshotDocument<'a> {
    RecordList(RecordListSnapshot<'a>),
    SymbolMap(SymbolMapSnapshot<'a>),
}

impl<'a> SnapshotDocument<'a> {
    /// Build the document the profile's layout calls for.
    pub fn from_run(profile: &'a SnapshotProfile, run: &'a SnapshotRun) -> Self {
        match profile.layout {
            SnapshotLayout::RecordList => SnapshotDocument::RecordList(RecordListSnapshot {
                timestamp: run.started_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                source: &profile.source,
                success_count: run.success_count(),
                total_count: run.total_count(),
                data: run.records().collect(),
            }),
            SnapshotLayout::SymbolMap => SnapshotDocument::SymbolMap(SymbolMapSnapshot {
                success_count: run.success_count(),
                total_count: run.total_count(),
                data: SymbolMap(&run.outcomes),
            }),
        }
    }
}

/// Write a document as pretty-printed UTF-8 JSON, creating parent directories.
///
/// Non-ASCII text (display names) is written as-is, not `\u`-escaped.
pub fn write_snapshot(path: &Path, document: &SnapshotDocument<'_>) -> Result<(), SnapshotError> {
    let io_err = |source: std::io::Error| SnapshotError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let mut json = serde_json::to_string_pretty(document)?;
    json.push('\n');

    let mut file = fs::File::create(path).map_err(io_err)?;
    file.write_all(json.as_bytes()).map_err(io_err)?;
    file.sync_all().map_err(io_err)?;

    tracing::info!(path = %path.display(), bytes = json.len(), "snapshot written");
    Ok(())
}
