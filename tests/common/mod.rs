//! Recording test doubles shared by the integration tests
#![allow(dead_code)]

use leafex::adapters::document::{visible_layers_bottom_up, LayerTree, ManifestDocument};
use leafex::adapters::encoder::CompositeEncoder;
use leafex::adapters::fs::FileSystem;
use leafex::adapters::progress::ProgressReporter;
use leafex::domain::{
    DocumentError, EncodeOptions, GroupId, GroupNode, LayerId, LayerKind, LayerNode, LeafexError,
    NodeRef, Result,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Wraps a document, counting visibility writes and optionally failing one group
pub struct RecordingTree {
    pub inner: ManifestDocument,
    pub visibility_calls: usize,
    pub unreadable: Option<GroupId>,
}

impl RecordingTree {
    pub fn new(inner: ManifestDocument) -> Self {
        Self {
            inner,
            visibility_calls: 0,
            unreadable: None,
        }
    }

    pub fn failing_group(mut self, group: GroupId) -> Self {
        self.unreadable = Some(group);
        self
    }
}

impl LayerTree for RecordingTree {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn base_dir(&self) -> &Path {
        self.inner.base_dir()
    }

    fn root_children(&self) -> Vec<NodeRef> {
        self.inner.root_children()
    }

    fn children(&self, group: GroupId) -> Result<Vec<NodeRef>> {
        if self.unreadable == Some(group) {
            return Err(DocumentError::GroupUnreadable {
                name: format!("{group}"),
                reason: "locked by host".to_string(),
            }
            .into());
        }
        self.inner.children(group)
    }

    fn group(&self, id: GroupId) -> Option<&GroupNode> {
        self.inner.group(id)
    }

    fn layer(&self, id: LayerId) -> Option<&LayerNode> {
        self.inner.layer(id)
    }

    fn set_visible(&mut self, id: LayerId, visible: bool) {
        self.visibility_calls += 1;
        self.inner.set_visible(id, visible);
    }
}

/// One call to the encoder
#[derive(Debug, Clone)]
pub struct EncodeCall {
    pub path: PathBuf,
    /// Names of the visible layers, bottom-up, at the time of the call
    pub visible: Vec<String>,
}

/// Encoder that records what it was asked to write
#[derive(Default)]
pub struct RecordingEncoder {
    pub supports_jpeg: bool,
    pub calls: Vec<EncodeCall>,
    /// File names (e.g. `Hat.png`) that fail to encode
    pub fail_on: HashSet<String>,
}

impl RecordingEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, file_name: &str) -> Self {
        self.fail_on.insert(file_name.to_string());
        self
    }
}

impl CompositeEncoder for RecordingEncoder {
    fn supports_jpeg(&self) -> bool {
        self.supports_jpeg
    }

    fn encode_visible_composite(
        &mut self,
        document: &dyn LayerTree,
        path: &Path,
        _options: &EncodeOptions,
    ) -> Result<()> {
        // An unreadable group leaves the list empty rather than failing the call
        let visible = visible_layers_bottom_up(document)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|id| document.layer(id).map(|layer| layer.name.clone()))
            .collect();
        self.calls.push(EncodeCall {
            path: path.to_path_buf(),
            visible,
        });

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        if self.fail_on.contains(&file_name) {
            return Err(LeafexError::Encode(format!("refused {file_name}")));
        }
        Ok(())
    }
}

/// In-memory filesystem that can refuse one directory
#[derive(Default)]
pub struct MemoryFileSystem {
    pub directories: HashSet<PathBuf>,
    pub files: Vec<(PathBuf, String)>,
    pub refuse: Option<PathBuf>,
    pub calls: usize,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refusing(mut self, dir: impl Into<PathBuf>) -> Self {
        self.refuse = Some(dir.into());
        self
    }
}

impl FileSystem for MemoryFileSystem {
    fn directory_exists(&self, path: &Path) -> bool {
        self.directories.contains(path)
    }

    fn create_directory(&mut self, path: &Path) -> Result<()> {
        self.calls += 1;
        if self.refuse.as_deref() == Some(path) {
            return Err(LeafexError::FileSystem(format!(
                "permission denied: {}",
                path.display()
            )));
        }
        self.directories.insert(path.to_path_buf());
        Ok(())
    }

    fn write_text_file(&mut self, path: &Path, content: &str) -> Result<()> {
        self.calls += 1;
        self.files.push((path.to_path_buf(), content.to_string()));
        Ok(())
    }
}

/// Progress reporter that keeps every call
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub started: Vec<usize>,
    pub statuses: Vec<String>,
    pub advanced: usize,
    pub closed: usize,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for RecordingProgress {
    fn start(&mut self, total: usize) {
        self.started.push(total);
    }

    fn set_status(&mut self, text: &str) {
        self.statuses.push(text.to_string());
    }

    fn advance(&mut self) {
        self.advanced += 1;
    }

    fn close(&mut self) {
        self.closed += 1;
    }
}

pub fn layer(name: &str, kind: LayerKind) -> LayerNode {
    LayerNode::new(name, kind)
}

pub fn hidden(name: &str, kind: LayerKind) -> LayerNode {
    let mut node = LayerNode::new(name, kind);
    node.visible = false;
    node
}

pub fn text(name: &str, content: &str, visible: bool) -> LayerNode {
    let mut node = LayerNode::new(name, LayerKind::Text);
    node.text = Some(content.to_string());
    node.visible = visible;
    node
}

pub fn background() -> LayerNode {
    let mut node = LayerNode::new("Background", LayerKind::Normal);
    node.is_background = true;
    node
}

/// Groups of the sample document, by name
pub struct SampleGroups {
    pub body: GroupId,
    pub head: GroupId,
    pub props: GroupId,
}

/// A small character sheet:
///
/// ```text
/// Body/
///   Arm            normal
///   Arm            text "Left arm" (hidden)
///   Head/
///     Eyes         smart object (hidden)
///     Eyes         text "Blue"
///     Hat          normal
///     Hat          text ""
/// Props/
///   Sword          normal
///   Levels         adjustment
/// Loose            normal, not in any group
/// Background       background
/// ```
pub fn sample_document() -> (ManifestDocument, SampleGroups) {
    let mut doc = ManifestDocument::new("/art");
    let body = doc.add_group(None, "Body");
    let props = doc.add_group(None, "Props");
    doc.add_layer(None, layer("Loose", LayerKind::Normal));
    doc.add_layer(None, background());

    doc.add_layer(Some(body), layer("Arm", LayerKind::Normal));
    doc.add_layer(Some(body), text("Arm", "Left arm", false));
    let head = doc.add_group(Some(body), "Head");
    doc.add_layer(Some(head), hidden("Eyes", LayerKind::SmartObject));
    doc.add_layer(Some(head), text("Eyes", "Blue", true));
    doc.add_layer(Some(head), layer("Hat", LayerKind::Normal));
    doc.add_layer(Some(head), text("Hat", "", true));

    doc.add_layer(Some(props), layer("Sword", LayerKind::Normal));
    doc.add_layer(Some(props), layer("Levels", LayerKind::Other));

    (doc, SampleGroups { body, head, props })
}
