//! Export runner - drives one export run end to end
//!
//! The runner checks the document preconditions, collects leaves, hides every
//! collected layer, exports each leaf in isolation, and finally puts every
//! layer's visibility back. Per-leaf failures are recorded in the
//! [`ExportSummary`] and never stop the run.

use super::state::{AbortReason, RunState};
use super::summary::{ExportError, ExportErrorType, ExportSummary};
use crate::adapters::document::LayerTree;
use crate::adapters::encoder::CompositeEncoder;
use crate::adapters::fs::FileSystem;
use crate::adapters::progress::ProgressReporter;
use crate::core::collect::TreeCollector;
use crate::core::visibility::{hide_leaf, show_leaf, VisibilityLedger};
use crate::domain::document::NodeRef;
use crate::domain::format::{EncodeOptions, ImageFormat};
use crate::domain::records::{CaptionRecord, CollectionResult, LeafRecord};
use crate::domain::Result;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Settings fixed for the duration of a run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Encoder options; `encode.format` decides the file extension
    pub encode: EncodeOptions,

    /// Write text layers to `.txt` files after restoring
    pub extract_captions: bool,

    /// Output root; the document's directory when `None`
    pub output_root: Option<PathBuf>,
}

impl RunOptions {
    pub fn new(encode: EncodeOptions) -> Self {
        Self {
            encode,
            extract_captions: false,
            output_root: None,
        }
    }

    pub fn with_captions(mut self, extract_captions: bool) -> Self {
        self.extract_captions = extract_captions;
        self
    }

    pub fn with_output_root(mut self, output_root: Option<PathBuf>) -> Self {
        self.output_root = output_root;
        self
    }

    pub fn format(&self) -> ImageFormat {
        self.encode.format
    }
}

/// Runs exports against one document at a time
pub struct ExportRunner {
    options: RunOptions,
    state: RunState,
}

impl ExportRunner {
    pub fn new(options: RunOptions) -> Self {
        Self {
            options,
            state: RunState::Idle,
        }
    }

    /// State reached by the most recent run
    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Executes a full run
    ///
    /// `document` is `None` when no document is open. Nothing is mutated,
    /// encoded or written unless every precondition holds.
    pub fn run(
        &mut self,
        document: Option<&mut dyn LayerTree>,
        encoder: &mut dyn CompositeEncoder,
        fs: &mut dyn FileSystem,
        mut progress: Option<&mut (dyn ProgressReporter + '_)>,
    ) -> ExportSummary {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();
        self.state = RunState::Idle;

        let Some(document) = document else {
            self.abort(AbortReason::NoActiveDocument, &mut summary);
            return self.finish(summary, start_time, progress);
        };

        summary.document = document.name().to_string();
        if let Err(reason) = check_base_layer(&*document) {
            self.abort(reason, &mut summary);
            return self.finish(summary, start_time, progress);
        }

        self.advance(RunState::Collecting);

        summary.format = Some(self.options.format());
        let output_root = self
            .options
            .output_root
            .clone()
            .unwrap_or_else(|| document.base_dir().to_path_buf());

        tracing::info!(
            document = %summary.document,
            output_root = %output_root.display(),
            format = %self.options.format(),
            "Starting export run"
        );

        let collection =
            TreeCollector::new(&output_root, self.options.format()).collect(&*document);
        summary.total_leaves = collection.leaves.len();
        summary.total_captions = collection.captions.len();
        if let Some(error) = &collection.interrupted {
            summary.collection_partial = true;
            summary.add_error(ExportError::new(
                ExportErrorType::Collection,
                format!("Collection stopped early: {error}"),
            ));
        }

        if collection.leaves.is_empty() {
            tracing::info!("No exportable leaves found");
        } else {
            self.export_leaves(document, &collection, encoder, fs, progress.as_deref_mut(), &mut summary);
        }

        if self.options.extract_captions {
            self.write_captions(&collection.captions, fs, &mut summary);
        }

        self.advance(RunState::Done);
        self.finish(summary, start_time, progress)
    }

    fn export_leaves(
        &mut self,
        document: &mut dyn LayerTree,
        collection: &CollectionResult,
        encoder: &mut dyn CompositeEncoder,
        fs: &mut dyn FileSystem,
        mut progress: Option<&mut (dyn ProgressReporter + '_)>,
        summary: &mut ExportSummary,
    ) {
        let ledger = VisibilityLedger::capture(&*document, collection);
        summary.hidden_count = VisibilityLedger::hide_all(document, collection);
        self.advance(RunState::Hidden);

        if let Some(progress) = progress.as_deref_mut() {
            progress.start(collection.leaves.len());
        }

        for (index, leaf) in collection.leaves.iter().enumerate() {
            self.advance(RunState::Exporting(index));
            if let Some(progress) = progress.as_deref_mut() {
                progress.set_status(&format!("Extract : {}", leaf.name));
            }

            self.export_leaf(index, leaf, document, encoder, fs, summary);

            if let Some(progress) = progress.as_deref_mut() {
                progress.advance();
            }
        }

        self.advance(RunState::Restoring);
        summary.restored_count = ledger.restore(document, collection);
        tracing::debug!(restored = summary.restored_count, "Visibility restored");
    }

    fn export_leaf(
        &self,
        index: usize,
        leaf: &LeafRecord,
        document: &mut dyn LayerTree,
        encoder: &mut dyn CompositeEncoder,
        fs: &mut dyn FileSystem,
        summary: &mut ExportSummary,
    ) {
        if let Some(dir) = leaf.output_dir() {
            if let Err(e) = ensure_directory(fs, dir) {
                tracing::error!(
                    layer = %leaf.name,
                    path = %dir.display(),
                    error = %e,
                    "Failed to create directory, leaf skipped"
                );
                summary.skipped_leaves += 1;
                summary.add_error(
                    ExportError::new(ExportErrorType::Directory, e.to_string())
                        .with_context(format!("layer={}", leaf.name)),
                );
                return;
            }
        }

        show_leaf(document, leaf);
        crate::log_leaf_export!(index, leaf.name, leaf.output_path);

        match encoder.encode_visible_composite(&*document, &leaf.output_path, &self.options.encode) {
            Ok(()) => summary.successful_exports += 1,
            Err(e) => {
                tracing::error!(
                    layer = %leaf.name,
                    path = %leaf.output_path.display(),
                    error = %e,
                    "Failed to export leaf"
                );
                summary.failed_exports += 1;
                summary.add_error(
                    ExportError::new(ExportErrorType::Encode, e.to_string())
                        .with_context(format!("layer={}", leaf.name)),
                );
            }
        }

        hide_leaf(document, leaf);
    }

    fn write_captions(
        &self,
        captions: &[CaptionRecord],
        fs: &mut dyn FileSystem,
        summary: &mut ExportSummary,
    ) {
        for caption in captions {
            if caption.text.is_empty() {
                tracing::debug!(layer = %caption.name, "Empty caption skipped");
                continue;
            }

            let written = match caption.output_dir() {
                Some(dir) => ensure_directory(fs, dir),
                None => Ok(()),
            }
            .and_then(|()| fs.write_text_file(&caption.output_path, &caption.text));

            match written {
                Ok(()) => {
                    tracing::info!(
                        layer = %caption.name,
                        path = %caption.output_path.display(),
                        "Caption written"
                    );
                    summary.captions_written += 1;
                }
                Err(e) => {
                    tracing::error!(
                        layer = %caption.name,
                        path = %caption.output_path.display(),
                        error = %e,
                        "Failed to write caption"
                    );
                    summary.add_error(
                        ExportError::new(ExportErrorType::Caption, e.to_string())
                            .with_context(format!("layer={}", caption.name)),
                    );
                }
            }
        }
    }

    fn abort(&mut self, reason: AbortReason, summary: &mut ExportSummary) {
        tracing::error!(reason = ?reason, "{}", reason.user_message());
        self.advance(RunState::Aborted(reason));
        summary.add_error(ExportError::new(
            ExportErrorType::Precondition,
            reason.user_message().to_string(),
        ));
    }

    fn advance(&mut self, next: RunState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal run transition {} -> {}",
            self.state,
            next
        );
        tracing::trace!(from = %self.state, to = %next, "Run state");
        self.state = next;
    }

    fn finish(
        &self,
        summary: ExportSummary,
        start_time: Instant,
        progress: Option<&mut (dyn ProgressReporter + '_)>,
    ) -> ExportSummary {
        if let Some(progress) = progress {
            progress.close();
        }

        let mut summary = summary.with_duration(start_time.elapsed());
        summary.final_state = self.state;
        crate::log_run_complete!(summary.successful_exports, summary.total_leaves, summary.duration);
        summary
    }
}

/// Checks that the bottom node of the document is a background layer
///
/// # Errors
///
/// Returns the abort reason when the check fails.
pub fn check_base_layer(document: &dyn LayerTree) -> std::result::Result<(), AbortReason> {
    match document.base_node() {
        None => Err(AbortReason::NoBaseLayer),
        Some(NodeRef::Group(_)) => Err(AbortReason::BaseLayerNotBackground),
        Some(NodeRef::Layer(id)) => match document.layer(id) {
            Some(layer) if layer.is_background => Ok(()),
            Some(_) => Err(AbortReason::BaseLayerNotBackground),
            None => Err(AbortReason::NoBaseLayer),
        },
    }
}

/// Creates `dir` unless it already exists
fn ensure_directory(fs: &mut dyn FileSystem, dir: &Path) -> Result<()> {
    if fs.directory_exists(dir) {
        return Ok(());
    }
    fs.create_directory(dir)?;
    tracing::info!(path = %dir.display(), "Directory created");
    Ok(())
}
