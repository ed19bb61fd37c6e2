//! Record construction
//!
//! Builds [`LeafRecord`]s and [`CaptionRecord`]s from layer ids. Parent links
//! are followed here and nowhere else.

use crate::adapters::document::LayerTree;
use crate::core::sanitize::sanitize;
use crate::domain::document::{LayerKind, NodeRef};
use crate::domain::errors::DocumentError;
use crate::domain::format::ImageFormat;
use crate::domain::ids::{GroupId, LayerId};
use crate::domain::records::{CaptionRecord, LeafRecord};
use crate::domain::Result;
use std::path::{Path, PathBuf};

/// Sanitized names of `parent` and its ancestors, root first
///
/// # Errors
///
/// Returns an error if a group on the chain is unknown to the document.
pub fn trace_ancestry(document: &dyn LayerTree, parent: Option<GroupId>) -> Result<Vec<String>> {
    let mut names = Vec::new();
    let mut current = parent;
    while let Some(id) = current {
        let group = document
            .group(id)
            .ok_or(DocumentError::UnknownGroup(id.index()))?;
        names.push(sanitize(&group.name));
        current = group.parent;
    }
    names.reverse();
    Ok(names)
}

/// First text layer among `siblings` named exactly `name`
pub fn find_caption(document: &dyn LayerTree, siblings: &[NodeRef], name: &str) -> Option<LayerId> {
    siblings.iter().find_map(|node| match *node {
        NodeRef::Layer(id) => document
            .layer(id)
            .filter(|layer| layer.kind == LayerKind::Text && layer.name == name)
            .map(|_| id),
        NodeRef::Group(_) => None,
    })
}

fn join_under(root: &Path, ancestry: &[String]) -> PathBuf {
    ancestry.iter().fold(root.to_path_buf(), |path, segment| path.join(segment))
}

/// Builds the record for an exportable layer
///
/// `siblings` are the direct children of the layer's group, used to pair a
/// caption.
///
/// # Errors
///
/// Returns an error if the layer or one of its groups is unknown.
pub fn build_leaf_record(
    document: &dyn LayerTree,
    id: LayerId,
    siblings: &[NodeRef],
    output_root: &Path,
    format: ImageFormat,
) -> Result<LeafRecord> {
    let layer = document
        .layer(id)
        .ok_or(DocumentError::UnknownLayer(id.index()))?;
    let ancestry = trace_ancestry(document, layer.parent)?;
    let file_name = format!("{}.{}", sanitize(&layer.name), format.extension());
    let output_path = join_under(output_root, &ancestry).join(file_name);

    Ok(LeafRecord {
        layer: id,
        name: layer.name.clone(),
        kind: layer.kind,
        ancestry_path: ancestry.join("/"),
        ancestry,
        output_path,
        caption: find_caption(document, siblings, &layer.name),
    })
}

/// Builds the record for a text layer
///
/// The directory is the ancestry joined with `_` as a single segment under
/// `output_root`.
///
/// # Errors
///
/// Returns an error if the layer or one of its groups is unknown.
pub fn build_caption_record(
    document: &dyn LayerTree,
    id: LayerId,
    output_root: &Path,
) -> Result<CaptionRecord> {
    let layer = document
        .layer(id)
        .ok_or(DocumentError::UnknownLayer(id.index()))?;
    let ancestry = trace_ancestry(document, layer.parent)?;

    let mut dir = output_root.to_path_buf();
    if !ancestry.is_empty() {
        dir.push(ancestry.join("_"));
    }
    let output_path = dir.join(format!("{}.txt", sanitize(&layer.name)));

    Ok(CaptionRecord {
        layer: id,
        name: layer.name.clone(),
        ancestry,
        text: layer.text.clone().unwrap_or_default(),
        output_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::document::ManifestDocument;
    use crate::domain::document::LayerNode;

    fn text(name: &str, content: &str) -> LayerNode {
        let mut layer = LayerNode::new(name, LayerKind::Text);
        layer.text = Some(content.to_string());
        layer
    }

    #[test]
    fn test_trace_ancestry_sanitizes_root_first() {
        let mut doc = ManifestDocument::new("/art");
        let a = doc.add_group(None, "A");
        let b = doc.add_group(Some(a), "B:side");
        assert_eq!(
            trace_ancestry(&doc, Some(b)).unwrap(),
            vec!["A".to_string(), "B_side".to_string()]
        );
        assert!(trace_ancestry(&doc, None).unwrap().is_empty());
    }

    #[test]
    fn test_trace_ancestry_unknown_group() {
        let doc = ManifestDocument::new("/art");
        assert!(trace_ancestry(&doc, Some(GroupId::new(4))).is_err());
    }

    #[test]
    fn test_leaf_record_paths() {
        let mut doc = ManifestDocument::new("/art");
        let a = doc.add_group(None, "A");
        let b = doc.add_group(Some(a), "B");
        let leaf = doc.add_layer(Some(b), LayerNode::new("Leaf1", LayerKind::Normal));
        let siblings = doc.children(b).unwrap();

        let record =
            build_leaf_record(&doc, leaf, &siblings, Path::new("/art"), ImageFormat::Jpeg).unwrap();
        assert_eq!(record.ancestry_path, "A/B");
        assert_eq!(record.output_path, PathBuf::from("/art/A/B/Leaf1.jpg"));
        assert_eq!(record.caption, None);
    }

    #[test]
    fn test_leaf_name_is_sanitized_in_file_name_only() {
        let mut doc = ManifestDocument::new("/art");
        let a = doc.add_group(None, "A");
        let leaf = doc.add_layer(Some(a), LayerNode::new("eye?<L>", LayerKind::SmartObject));
        let siblings = doc.children(a).unwrap();

        let record =
            build_leaf_record(&doc, leaf, &siblings, Path::new("/out"), ImageFormat::Png).unwrap();
        assert_eq!(record.name, "eye?<L>");
        assert_eq!(record.output_path, PathBuf::from("/out/A/eye__L_.png"));
    }

    #[test]
    fn test_caption_pairing_first_exact_match() {
        let mut doc = ManifestDocument::new("/art");
        let g = doc.add_group(None, "G");
        let leaf = doc.add_layer(Some(g), LayerNode::new("X", LayerKind::Normal));
        doc.add_layer(Some(g), text("x", "lowercase"));
        let first = doc.add_layer(Some(g), text("X", "first"));
        doc.add_layer(Some(g), text("X", "second"));
        let siblings = doc.children(g).unwrap();

        assert_eq!(find_caption(&doc, &siblings, "X"), Some(first));
        let record =
            build_leaf_record(&doc, leaf, &siblings, Path::new("/art"), ImageFormat::Jpeg).unwrap();
        assert_eq!(record.caption, Some(first));
    }

    #[test]
    fn test_caption_ignores_non_text_namesakes() {
        let mut doc = ManifestDocument::new("/art");
        let g = doc.add_group(None, "G");
        doc.add_layer(Some(g), LayerNode::new("X", LayerKind::Normal));
        doc.add_layer(Some(g), LayerNode::new("X", LayerKind::Other));
        let siblings = doc.children(g).unwrap();
        assert_eq!(find_caption(&doc, &siblings, "X"), None);
    }

    #[test]
    fn test_caption_record_uses_underscore_ancestry() {
        let mut doc = ManifestDocument::new("/art");
        let a = doc.add_group(None, "A");
        let b = doc.add_group(Some(a), "B");
        let caption = doc.add_layer(Some(b), text("Title/1", "Hello"));

        let record = build_caption_record(&doc, caption, Path::new("/art")).unwrap();
        assert_eq!(record.output_path, PathBuf::from("/art/A_B/Title_1.txt"));
        assert_eq!(record.text, "Hello");
        assert_eq!(record.ancestry, vec!["A".to_string(), "B".to_string()]);
    }
}
