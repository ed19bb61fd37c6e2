//! Export orchestration
//!
//! This module provides the export run for Leafex:
//! - The run lifecycle ([`RunState`])
//! - The runner that drives a run end to end
//! - Summary and reporting

pub mod runner;
pub mod state;
pub mod summary;

pub use runner::{check_base_layer, ExportRunner, RunOptions};
pub use state::{AbortReason, RunState};
pub use summary::{ExportError, ExportErrorType, ExportSummary};
