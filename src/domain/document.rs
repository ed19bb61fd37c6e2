//! Host document node model
//!
//! A layered document is a tree of groups and layers. Only the host mutates
//! its topology; Leafex reads structure and flips the `visible` flag.

use super::ids::{GroupId, LayerId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Kind of a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// Plain pixel layer
    #[default]
    Normal,
    /// Embedded smart object
    SmartObject,
    /// Text layer
    Text,
    /// Adjustment, fill, shape and anything else
    Other,
}

impl LayerKind {
    /// Whether layers of this kind are exported as images
    pub fn is_exportable(self) -> bool {
        matches!(self, LayerKind::Normal | LayerKind::SmartObject)
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayerKind::Normal => "normal",
            LayerKind::SmartObject => "smart_object",
            LayerKind::Text => "text",
            LayerKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// Reference to a child node of a group or of the document root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Group(GroupId),
    Layer(LayerId),
}

/// A group node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupNode {
    /// Display name
    pub name: String,

    /// Owning group, `None` for groups directly under the document root
    pub parent: Option<GroupId>,
}

/// A layer node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerNode {
    /// Display name
    pub name: String,

    /// Layer kind
    pub kind: LayerKind,

    /// Visibility flag
    pub visible: bool,

    /// Whether this is the document's opaque background layer
    pub is_background: bool,

    /// Owning group, `None` for loose layers directly under the document root
    pub parent: Option<GroupId>,

    /// Text content, present for text layers
    pub text: Option<String>,

    /// Raster source backing the layer, relative to the document directory
    pub source: Option<PathBuf>,
}

impl LayerNode {
    /// Creates a visible layer with no parent
    pub fn new(name: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            visible: true,
            is_background: false,
            parent: None,
            text: None,
            source: None,
        }
    }
}
