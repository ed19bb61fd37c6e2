//! Collected export records
//!
//! Records are plain values produced once per run by the collector. They hold
//! layer ids, never the layers themselves, and are not mutated after
//! collection.

use super::document::LayerKind;
use super::errors::DocumentError;
use super::ids::LayerId;
use serde::Serialize;
use std::path::PathBuf;

/// One exportable layer and where it goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafRecord {
    /// The exported layer
    pub layer: LayerId,

    /// Raw layer name as shown by the host
    pub name: String,

    /// Layer kind, always normal or smart object
    pub kind: LayerKind,

    /// Sanitized group names from the document root down to the owning group
    pub ancestry: Vec<String>,

    /// `ancestry` joined with `/`
    pub ancestry_path: String,

    /// Target image file
    pub output_path: PathBuf,

    /// Sibling text layer with exactly the same name, if any
    pub caption: Option<LayerId>,
}

impl LeafRecord {
    /// Directory the image is written into
    pub fn output_dir(&self) -> Option<&std::path::Path> {
        self.output_path.parent()
    }
}

/// One text layer found during collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptionRecord {
    /// The text layer
    pub layer: LayerId,

    /// Raw layer name
    pub name: String,

    /// Sanitized group names from the document root down to the owning group
    pub ancestry: Vec<String>,

    /// Text content read at collection time
    pub text: String,

    /// Target `.txt` file
    pub output_path: PathBuf,
}

impl CaptionRecord {
    /// Directory the text file is written into
    pub fn output_dir(&self) -> Option<&std::path::Path> {
        self.output_path.parent()
    }
}

/// Everything one collection pass found
#[derive(Debug, Clone, Default)]
pub struct CollectionResult {
    /// Exportable leaves in collection order
    pub leaves: Vec<LeafRecord>,

    /// Text layers in collection order
    pub captions: Vec<CaptionRecord>,

    /// Set when traversal stopped early on an unreadable group
    pub interrupted: Option<DocumentError>,
}

impl CollectionResult {
    /// Creates an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// True when neither leaves nor captions were found
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty() && self.captions.is_empty()
    }

    /// True when traversal stopped before visiting every group
    pub fn is_partial(&self) -> bool {
        self.interrupted.is_some()
    }
}
