//! JSONL bundle writer.
//!
//! Collects prepared sessions into bundle records and writes them one line
//! per record, keeping a checksummed summary for the export transport. The
//! writer refuses a blocked preparation result unless the caller passes an
//! explicit override; surfacing that decision to the user is the caller's
//! job.

use crate::record::{BundleRecord, BUNDLE_SCHEMA_VERSION, DEFAULT_SOURCE};
use crate::{BundleError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};
use ts_common::Contributor;
use ts_prepare::{PreparationResult, PreparedSession};

/// Builder for a contribution bundle.
pub struct BundleWriter {
    source: String,
    contributor: Contributor,
    allow_blocked: bool,
    records: Vec<BundleRecord>,
}

impl BundleWriter {
    /// New writer for a contributor, with the default source label.
    pub fn new(contributor: Contributor) -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            contributor,
            allow_blocked: false,
            records: Vec::new(),
        }
    }

    /// Override the producing-system label.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Permit adding a blocked preparation result. This is the explicit
    /// override surface; never set it without a user decision upstream.
    pub fn allow_blocked(mut self, allow: bool) -> Self {
        self.allow_blocked = allow;
        self
    }

    /// Add one prepared session.
    pub fn add_session(&mut self, session: &PreparedSession) -> Result<()> {
        let record = BundleRecord::from_session(session, self.source.clone(), &self.contributor)?;
        record.validate()?;
        debug!(session_id = %session.session_id, bundle_id = %record.bundle_id, "session added to bundle");
        self.records.push(record);
        Ok(())
    }

    /// Add every session from a preparation result.
    ///
    /// Fails without adding anything when the result is blocked and no
    /// override was given.
    pub fn add_result(&mut self, result: &PreparationResult) -> Result<usize> {
        if result.redaction_report.blocked && !self.allow_blocked {
            return Err(BundleError::Blocked {
                warnings: result.redaction_report.residue_warnings.len(),
            });
        }
        for session in &result.sessions {
            self.add_session(session)?;
        }
        Ok(result.sessions.len())
    }

    /// Number of records collected so far.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Write all records as JSONL to a writer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<BundleSummary> {
        let mut entries = Vec::with_capacity(self.records.len());
        let mut total_bytes = 0u64;

        for record in &self.records {
            let line = record.to_json_line()?;
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;

            let mut hasher = Sha256::new();
            hasher.update(line.as_bytes());
            let bytes = line.len() as u64 + 1;
            total_bytes += bytes;
            entries.push(RecordEntry {
                bundle_id: record.bundle_id.clone(),
                sha256: hex::encode(hasher.finalize()),
                bytes,
            });
        }
        writer.flush()?;

        info!(
            records = entries.len(),
            total_bytes, "bundle written"
        );

        Ok(BundleSummary {
            schema_version: BUNDLE_SCHEMA_VERSION.to_string(),
            created_at: Utc::now(),
            source: self.source.clone(),
            record_count: entries.len(),
            total_bytes,
            records: entries,
        })
    }

    /// Write all records as JSONL to a file path.
    pub fn write_path<P: AsRef<Path>>(&self, path: P) -> Result<BundleSummary> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))
    }
}

/// Manifest-style summary of a written bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleSummary {
    /// Bundle line format version.
    pub schema_version: String,

    /// When the bundle was written.
    pub created_at: DateTime<Utc>,

    /// Producing system label.
    pub source: String,

    /// Number of records written.
    pub record_count: usize,

    /// Total bytes written including newlines.
    pub total_bytes: u64,

    /// Per-record checksums.
    pub records: Vec<RecordEntry>,
}

/// Checksum entry for one written line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordEntry {
    /// Record id.
    pub bundle_id: String,

    /// SHA-256 of the line payload (without the newline).
    pub sha256: String,

    /// Bytes written for the line including the newline.
    pub bytes: u64,
}
