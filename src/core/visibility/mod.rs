//! Visibility capture, hide and restore
//!
//! A [`VisibilityLedger`] snapshots the visibility of every collected leaf and
//! caption before anything is hidden. Restoring consumes the ledger, so a
//! snapshot is applied at most once.

use crate::adapters::document::LayerTree;
use crate::domain::records::{CollectionResult, LeafRecord};

/// Pre-run visibility of collected layers, index-aligned with the collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityLedger {
    leaf_states: Vec<bool>,
    caption_states: Vec<bool>,
}

impl VisibilityLedger {
    /// Records the current visibility of every leaf and caption
    pub fn capture(document: &dyn LayerTree, collection: &CollectionResult) -> Self {
        Self {
            leaf_states: collection
                .leaves
                .iter()
                .map(|leaf| document.is_visible(leaf.layer))
                .collect(),
            caption_states: collection
                .captions
                .iter()
                .map(|caption| document.is_visible(caption.layer))
                .collect(),
        }
    }

    /// Builds a ledger from explicit states
    pub fn from_states(leaf_states: Vec<bool>, caption_states: Vec<bool>) -> Self {
        Self {
            leaf_states,
            caption_states,
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_states.len()
    }

    pub fn caption_count(&self) -> usize {
        self.caption_states.len()
    }

    /// Hides every leaf and caption
    ///
    /// Returns how many of them were visible beforehand.
    pub fn hide_all(document: &mut dyn LayerTree, collection: &CollectionResult) -> usize {
        let layers = collection
            .leaves
            .iter()
            .map(|leaf| leaf.layer)
            .chain(collection.captions.iter().map(|caption| caption.layer));

        let mut was_visible = 0;
        for id in layers {
            if document.is_visible(id) {
                was_visible += 1;
            }
            document.set_visible(id, false);
        }
        was_visible
    }

    /// Puts every layer back the way it was captured
    ///
    /// Only indices present in both the ledger and the collection are
    /// restored. Returns the number of layers written.
    pub fn restore(self, document: &mut dyn LayerTree, collection: &CollectionResult) -> usize {
        if self.leaf_states.len() != collection.leaves.len()
            || self.caption_states.len() != collection.captions.len()
        {
            tracing::warn!(
                ledger_leaves = self.leaf_states.len(),
                leaves = collection.leaves.len(),
                ledger_captions = self.caption_states.len(),
                captions = collection.captions.len(),
                "Visibility ledger does not match the collection, restoring the overlap only"
            );
        }

        let mut restored = 0;
        for (leaf, visible) in collection.leaves.iter().zip(self.leaf_states) {
            document.set_visible(leaf.layer, visible);
            restored += 1;
        }
        for (caption, visible) in collection.captions.iter().zip(self.caption_states) {
            document.set_visible(caption.layer, visible);
            restored += 1;
        }
        restored
    }
}

/// Makes a leaf and its paired caption visible
pub fn show_leaf(document: &mut dyn LayerTree, leaf: &LeafRecord) {
    set_leaf_visible(document, leaf, true);
}

/// Hides a leaf and its paired caption
pub fn hide_leaf(document: &mut dyn LayerTree, leaf: &LeafRecord) {
    set_leaf_visible(document, leaf, false);
}

fn set_leaf_visible(document: &mut dyn LayerTree, leaf: &LeafRecord, visible: bool) {
    document.set_visible(leaf.layer, visible);
    if let Some(caption) = leaf.caption {
        document.set_visible(caption, visible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::document::ManifestDocument;
    use crate::core::collect::collect;
    use crate::domain::document::{LayerKind, LayerNode};
    use crate::domain::format::ImageFormat;
    use std::path::Path;

    fn sample() -> ManifestDocument {
        let mut doc = ManifestDocument::new("/art");
        let g = doc.add_group(None, "G");
        doc.add_layer(Some(g), LayerNode::new("X", LayerKind::Normal));
        let mut caption = LayerNode::new("X", LayerKind::Text);
        caption.visible = false;
        doc.add_layer(Some(g), caption);
        let mut hidden = LayerNode::new("Y", LayerKind::Normal);
        hidden.visible = false;
        doc.add_layer(Some(g), hidden);
        doc
    }

    #[test]
    fn test_capture_hide_restore_round_trip() {
        let mut doc = sample();
        let before = doc.visibility_snapshot();
        let collection = collect(&doc, Path::new("/art"), ImageFormat::Png);

        let ledger = VisibilityLedger::capture(&doc, &collection);
        assert_eq!(ledger.leaf_count(), 2);
        assert_eq!(ledger.caption_count(), 1);

        assert_eq!(VisibilityLedger::hide_all(&mut doc, &collection), 1);
        assert!(doc.visibility_snapshot().iter().all(|visible| !visible));

        assert_eq!(ledger.restore(&mut doc, &collection), 3);
        assert_eq!(doc.visibility_snapshot(), before);
    }

    #[test]
    fn test_show_and_hide_leaf_toggle_caption() {
        let mut doc = sample();
        let collection = collect(&doc, Path::new("/art"), ImageFormat::Png);
        let leaf = &collection.leaves[0];
        let caption = leaf.caption.unwrap();

        show_leaf(&mut doc, leaf);
        assert!(doc.is_visible(leaf.layer));
        assert!(doc.is_visible(caption));

        hide_leaf(&mut doc, leaf);
        assert!(!doc.is_visible(leaf.layer));
        assert!(!doc.is_visible(caption));
    }

    #[test]
    fn test_restore_clamps_to_shorter_length() {
        let mut doc = sample();
        let collection = collect(&doc, Path::new("/art"), ImageFormat::Png);
        VisibilityLedger::hide_all(&mut doc, &collection);

        let ledger = VisibilityLedger::from_states(vec![true], Vec::new());
        assert_eq!(ledger.restore(&mut doc, &collection), 1);
        assert!(doc.is_visible(collection.leaves[0].layer));
        assert!(!doc.is_visible(collection.leaves[1].layer));
    }
}
