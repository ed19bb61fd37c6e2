//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use super::state::RunState;
use crate::domain::errors::LeafexError;
use crate::domain::format::ImageFormat;
use crate::domain::Result;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::path::Path;
use std::time::Duration;
use uuid::Uuid;

/// Summary of an export run
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    /// Unique id of the run
    pub run_id: Uuid,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Document name, empty when no document was open
    pub document: String,

    /// Image format of the run, `None` if the run aborted first
    pub format: Option<ImageFormat>,

    /// Leaves found by collection
    pub total_leaves: usize,

    /// Text layers found by collection
    pub total_captions: usize,

    /// Leaves whose composite was written
    pub successful_exports: usize,

    /// Leaves whose encode failed
    pub failed_exports: usize,

    /// Leaves skipped because their directory could not be created
    pub skipped_leaves: usize,

    /// Caption files written
    pub captions_written: usize,

    /// Layers that were visible when hiding started
    pub hidden_count: usize,

    /// Layers whose visibility was restored
    pub restored_count: usize,

    /// Collection stopped early on an unreadable group
    pub collection_partial: bool,

    /// State the run finished in
    pub final_state: RunState,

    /// Duration of the run
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,

    /// Errors encountered during the run
    pub errors: Vec<ExportError>,
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            document: String::new(),
            format: None,
            total_leaves: 0,
            total_captions: 0,
            successful_exports: 0,
            failed_exports: 0,
            skipped_leaves: 0,
            captions_written: 0,
            hidden_count: 0,
            restored_count: 0,
            collection_partial: false,
            final_state: RunState::Idle,
            duration: Duration::from_secs(0),
            errors: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: ExportError) {
        self.errors.push(error);
    }

    /// True when the run aborted on a precondition
    pub fn is_aborted(&self) -> bool {
        matches!(self.final_state, RunState::Aborted(_))
    }

    /// Check if the run completed with no failures
    pub fn is_successful(&self) -> bool {
        self.final_state == RunState::Done && self.errors.is_empty()
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_leaves == 0 {
            return 100.0;
        }
        (self.successful_exports as f64 / self.total_leaves as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            document = %self.document,
            total_leaves = self.total_leaves,
            successful = self.successful_exports,
            failed = self.failed_exports,
            skipped = self.skipped_leaves,
            captions_written = self.captions_written,
            final_state = %self.final_state,
            duration_ms = self.duration.as_millis() as u64,
            success_rate = format!("{:.2}%", self.success_rate()),
            "Export completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Export completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = error.context.as_deref().unwrap_or(""),
                    "Export error"
                );
            }
        }
    }

    /// Writes the summary as pretty JSON to `path`
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write_report(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                LeafexError::FileSystem(format!(
                    "Failed to create report directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        std::fs::write(path, json).map_err(|e| {
            LeafexError::FileSystem(format!("Failed to write report {}: {}", path.display(), e))
        })
    }
}

impl Default for ExportSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Type of export error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportErrorType {
    /// A precondition failed and nothing was touched
    Precondition,
    /// A group could not be read during collection
    Collection,
    /// A target directory could not be created
    Directory,
    /// The encoder failed for a leaf
    Encode,
    /// A caption file could not be written
    Caption,
}

/// Export error with context
#[derive(Debug, Clone, Serialize)]
pub struct ExportError {
    /// Type of error
    pub error_type: ExportErrorType,

    /// Error message
    pub message: String,

    /// Optional context (e.g., layer name, target path)
    pub context: Option<String>,
}

impl ExportError {
    /// Create a new export error
    pub fn new(error_type: ExportErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }
}
