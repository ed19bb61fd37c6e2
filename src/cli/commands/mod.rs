//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod export;
pub mod init;
pub mod inspect;
pub mod validate;

use crate::adapters::document::ManifestDocument;
use crate::config::LeafexConfig;
use std::path::{Path, PathBuf};

/// Exit code: completed without errors
pub const EXIT_OK: i32 = 0;
/// Exit code: completed with per-leaf or caption failures
pub const EXIT_PARTIAL: i32 = 1;
/// Exit code: configuration could not be loaded or is invalid
pub const EXIT_CONFIG: i32 = 2;
/// Exit code: a precondition failed and nothing was touched
pub const EXIT_ABORTED: i32 = 3;
/// Exit code: unexpected failure
pub const EXIT_FATAL: i32 = 5;

/// Manifest to open: the flag wins over `document.manifest`
pub(crate) fn resolve_manifest(flag: Option<&Path>, config: &LeafexConfig) -> Option<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| config.document.manifest.clone())
}

/// Opens the manifest, or `None` when no document was named
pub(crate) fn open_document(manifest: Option<&Path>) -> anyhow::Result<Option<ManifestDocument>> {
    match manifest {
        Some(path) => {
            tracing::info!(manifest = %path.display(), "Opening document");
            Ok(Some(ManifestDocument::load(path)?))
        }
        None => Ok(None),
    }
}
