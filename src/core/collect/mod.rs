//! Layer tree collection
//!
//! Walks every top-level group of a document with an explicit stack and
//! produces a [`CollectionResult`]. Loose layers at the document root are not
//! part of any leaf set and are never visited.

pub mod record;

pub use record::{build_caption_record, build_leaf_record, find_caption, trace_ancestry};

use crate::adapters::document::LayerTree;
use crate::domain::document::{LayerKind, NodeRef};
use crate::domain::errors::{DocumentError, LeafexError};
use crate::domain::format::ImageFormat;
use crate::domain::ids::LayerId;
use crate::domain::records::{CollectionResult, LeafRecord};
use crate::domain::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Collects leaves and captions for one run
#[derive(Debug, Clone)]
pub struct TreeCollector {
    output_root: PathBuf,
    format: ImageFormat,
}

impl TreeCollector {
    /// Creates a collector writing under `output_root` with `format` targets
    pub fn new(output_root: impl Into<PathBuf>, format: ImageFormat) -> Self {
        Self {
            output_root: output_root.into(),
            format,
        }
    }

    /// Root directory of every output path
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Walks the document and returns everything found
    ///
    /// Groups are popped last-in first-out. If a group cannot be read the
    /// traversal stops and the partial result carries the error.
    pub fn collect(&self, document: &dyn LayerTree) -> CollectionResult {
        let mut result = CollectionResult::new();
        let mut stack = document.top_level_groups();

        while let Some(group) = stack.pop() {
            let children = match document.children(group) {
                Ok(children) => children,
                Err(e) => {
                    tracing::error!(group = %group, error = %e, "Failed to read group, collection stopped");
                    result.interrupted = Some(as_document_error(e, group.index()));
                    break;
                }
            };

            for node in &children {
                let outcome = match *node {
                    NodeRef::Group(child) => {
                        stack.push(child);
                        Ok(())
                    }
                    NodeRef::Layer(id) => self.collect_layer(document, id, &children, &mut result),
                };

                if let Err(e) = outcome {
                    tracing::error!(group = %group, error = %e, "Failed to build record, collection stopped");
                    result.interrupted = Some(as_document_error(e, group.index()));
                    stack.clear();
                    break;
                }
            }
        }

        for path in duplicate_targets(&result.leaves) {
            tracing::warn!(path = %path.display(), "Several leaves share one output path, the last export wins");
        }
        for path in irregular_targets(&result) {
            tracing::warn!(path = %path.display(), "Group name is empty or a dot segment, target leaves its folder");
        }

        tracing::debug!(
            leaves = result.leaves.len(),
            captions = result.captions.len(),
            partial = result.is_partial(),
            "Collection finished"
        );

        result
    }

    fn collect_layer(
        &self,
        document: &dyn LayerTree,
        id: LayerId,
        siblings: &[NodeRef],
        result: &mut CollectionResult,
    ) -> Result<()> {
        let Some(layer) = document.layer(id) else {
            return Err(DocumentError::UnknownLayer(id.index()).into());
        };

        match layer.kind {
            kind if kind.is_exportable() => {
                let record =
                    build_leaf_record(document, id, siblings, &self.output_root, self.format)?;
                tracing::trace!(layer = %record.name, path = %record.output_path.display(), "Leaf collected");
                result.leaves.push(record);
            }
            LayerKind::Text => {
                let record = build_caption_record(document, id, &self.output_root)?;
                result.captions.push(record);
            }
            _ => {}
        }
        Ok(())
    }
}

/// Collects `document` with a one-off [`TreeCollector`]
pub fn collect(
    document: &dyn LayerTree,
    output_root: &Path,
    format: ImageFormat,
) -> CollectionResult {
    TreeCollector::new(output_root, format).collect(document)
}

/// Output paths claimed by more than one leaf, in first-seen order
pub fn duplicate_targets(leaves: &[LeafRecord]) -> Vec<&Path> {
    let mut counts: HashMap<&Path, usize> = HashMap::new();
    let mut order = Vec::new();
    for leaf in leaves {
        let count = counts.entry(leaf.output_path.as_path()).or_insert(0);
        *count += 1;
        if *count == 2 {
            order.push(leaf.output_path.as_path());
        }
    }
    order
}

/// Output paths whose folder part has an empty, `.` or `..` segment
///
/// Such a group name does not add a folder of its own: `..` climbs out of
/// the parent and an empty name collapses into it.
pub fn irregular_targets(result: &CollectionResult) -> Vec<&Path> {
    let leaves = result
        .leaves
        .iter()
        .filter(|leaf| leaf.ancestry.iter().any(|s| is_irregular_segment(s)))
        .map(|leaf| leaf.output_path.as_path());
    let captions = result
        .captions
        .iter()
        .filter(|caption| {
            !caption.ancestry.is_empty() && is_irregular_segment(&caption.ancestry.join("_"))
        })
        .map(|caption| caption.output_path.as_path());
    leaves.chain(captions).collect()
}

fn is_irregular_segment(segment: &str) -> bool {
    matches!(segment, "" | "." | "..")
}

fn as_document_error(error: LeafexError, group: usize) -> DocumentError {
    match error {
        LeafexError::Document(inner) => inner,
        other => DocumentError::GroupUnreadable {
            name: format!("group#{group}"),
            reason: other.to_string(),
        },
    }
}
