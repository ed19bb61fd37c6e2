//! JSON manifest document
//!
//! A manifest describes a layered document as nested JSON: groups with
//! ordered children, and layers with their kind, visibility, background flag,
//! caption text and optional raster source. Children are listed top of the
//! stack first, as a layers panel shows them.
//!
//! ```json
//! {
//!   "name": "hero.psd",
//!   "layers": [
//!     { "type": "group", "name": "Body", "children": [
//!       { "type": "layer", "name": "Arm", "source": "px/arm.png" },
//!       { "type": "layer", "name": "Arm", "kind": "text", "text": "Left arm" }
//!     ]},
//!     { "type": "layer", "name": "Background", "background": true, "source": "px/bg.png" }
//!   ]
//! }
//! ```

use super::traits::LayerTree;
use crate::domain::document::{GroupNode, LayerKind, LayerNode, NodeRef};
use crate::domain::errors::{DocumentError, LeafexError};
use crate::domain::ids::{GroupId, LayerId};
use crate::domain::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Serialized form of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Document name, informational
    #[serde(default)]
    pub name: String,

    /// Root children, top of the stack first
    #[serde(default)]
    pub layers: Vec<ManifestNode>,
}

/// Serialized node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ManifestNode {
    Group {
        name: String,
        #[serde(default)]
        children: Vec<ManifestNode>,
    },
    Layer(ManifestLayer),
}

/// Serialized layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestLayer {
    pub name: String,

    #[serde(default)]
    pub kind: LayerKind,

    #[serde(default = "default_true")]
    pub visible: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub background: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone)]
struct GroupEntry {
    node: GroupNode,
    children: Vec<NodeRef>,
}

/// In-memory document backed by a manifest
#[derive(Debug, Clone)]
pub struct ManifestDocument {
    name: String,
    base_dir: PathBuf,
    groups: Vec<GroupEntry>,
    layers: Vec<LayerNode>,
    root: Vec<NodeRef>,
}

impl ManifestDocument {
    /// Creates an empty document rooted at `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: String::new(),
            base_dir: base_dir.into(),
            groups: Vec::new(),
            layers: Vec::new(),
            root: Vec::new(),
        }
    }

    /// Loads a manifest file; the document's base directory is the file's directory
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// describes an invalid document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            LeafexError::Io(format!(
                "Failed to read manifest {}: {}",
                path.display(),
                e
            ))
        })?;
        let manifest: Manifest = serde_json::from_str(&contents)?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let document = Self::from_manifest(manifest, base_dir)?;
        tracing::debug!(
            manifest = %path.display(),
            groups = document.groups.len(),
            layers = document.layers.len(),
            "Loaded manifest document"
        );
        Ok(document)
    }

    /// Builds a document from a parsed manifest
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidManifest`] when a background layer is
    /// nested in a group, is not the bottom-most root node, or appears twice.
    pub fn from_manifest(manifest: Manifest, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let mut document = Self::new(base_dir);
        document.name = manifest.name;
        for node in manifest.layers {
            document.insert(None, node);
        }
        document.check_background()?;
        Ok(document)
    }

    /// Serializes the current state, visibility included
    pub fn to_manifest(&self) -> Manifest {
        Manifest {
            name: self.name.clone(),
            layers: self.root.iter().map(|node| self.export_node(*node)).collect(),
        }
    }

    /// Writes the current state back as a manifest file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.to_manifest())?;
        fs::write(path.as_ref(), json).map_err(|e| {
            LeafexError::Io(format!(
                "Failed to write manifest {}: {}",
                path.as_ref().display(),
                e
            ))
        })
    }

    /// Appends a group at the bottom of `parent` (or of the root)
    pub fn add_group(&mut self, parent: Option<GroupId>, name: impl Into<String>) -> GroupId {
        let id = GroupId::new(self.groups.len());
        self.groups.push(GroupEntry {
            node: GroupNode {
                name: name.into(),
                parent,
            },
            children: Vec::new(),
        });
        self.attach(parent, NodeRef::Group(id));
        id
    }

    /// Appends a layer at the bottom of `parent` (or of the root)
    pub fn add_layer(&mut self, parent: Option<GroupId>, mut layer: LayerNode) -> LayerId {
        let id = LayerId::new(self.layers.len());
        layer.parent = parent;
        self.layers.push(layer);
        self.attach(parent, NodeRef::Layer(id));
        id
    }

    /// Visibility of every layer, in arena order
    pub fn visibility_snapshot(&self) -> Vec<bool> {
        self.layers.iter().map(|layer| layer.visible).collect()
    }

    fn attach(&mut self, parent: Option<GroupId>, node: NodeRef) {
        match parent.and_then(|id| self.groups.get_mut(id.index())) {
            Some(entry) => entry.children.push(node),
            None => self.root.push(node),
        }
    }

    fn insert(&mut self, parent: Option<GroupId>, node: ManifestNode) {
        match node {
            ManifestNode::Group { name, children } => {
                let id = self.add_group(parent, name);
                for child in children {
                    self.insert(Some(id), child);
                }
            }
            ManifestNode::Layer(layer) => {
                self.add_layer(
                    parent,
                    LayerNode {
                        name: layer.name,
                        kind: layer.kind,
                        visible: layer.visible,
                        is_background: layer.background,
                        parent,
                        text: layer.text,
                        source: layer.source,
                    },
                );
            }
        }
    }

    fn export_node(&self, node: NodeRef) -> ManifestNode {
        match node {
            NodeRef::Group(id) => {
                let entry = &self.groups[id.index()];
                ManifestNode::Group {
                    name: entry.node.name.clone(),
                    children: entry
                        .children
                        .iter()
                        .map(|child| self.export_node(*child))
                        .collect(),
                }
            }
            NodeRef::Layer(id) => {
                let layer = &self.layers[id.index()];
                ManifestNode::Layer(ManifestLayer {
                    name: layer.name.clone(),
                    kind: layer.kind,
                    visible: layer.visible,
                    background: layer.is_background,
                    text: layer.text.clone(),
                    source: layer.source.clone(),
                })
            }
        }
    }

    fn check_background(&self) -> Result<()> {
        let backgrounds: Vec<usize> = self
            .layers
            .iter()
            .enumerate()
            .filter(|(_, layer)| layer.is_background)
            .map(|(index, _)| index)
            .collect();

        if backgrounds.len() > 1 {
            return Err(DocumentError::InvalidManifest(
                "a document can have at most one background layer".to_string(),
            )
            .into());
        }

        if let Some(&index) = backgrounds.first() {
            let id = LayerId::new(index);
            if self.layers[index].parent.is_some() || self.root.last() != Some(&NodeRef::Layer(id))
            {
                return Err(DocumentError::InvalidManifest(format!(
                    "background layer '{}' must be the bottom-most root layer",
                    self.layers[index].name
                ))
                .into());
            }
        }

        Ok(())
    }
}

impl LayerTree for ManifestDocument {
    fn name(&self) -> &str {
        &self.name
    }

    fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn root_children(&self) -> Vec<NodeRef> {
        self.root.clone()
    }

    fn children(&self, group: GroupId) -> Result<Vec<NodeRef>> {
        self.groups
            .get(group.index())
            .map(|entry| entry.children.clone())
            .ok_or_else(|| DocumentError::UnknownGroup(group.index()).into())
    }

    fn group(&self, id: GroupId) -> Option<&GroupNode> {
        self.groups.get(id.index()).map(|entry| &entry.node)
    }

    fn layer(&self, id: LayerId) -> Option<&LayerNode> {
        self.layers.get(id.index())
    }

    fn set_visible(&mut self, id: LayerId, visible: bool) {
        match self.layers.get_mut(id.index()) {
            Some(layer) => layer.visible = visible,
            None => tracing::debug!(layer = %id, "Ignoring visibility change for unknown layer"),
        }
    }
}
