//! Host document abstraction
//!
//! This module defines the trait a layered document must implement to be
//! exported by Leafex.

use crate::domain::document::{GroupNode, LayerNode, NodeRef};
use crate::domain::ids::{GroupId, LayerId};
use crate::domain::Result;
use std::path::Path;

/// Read access to a layered document plus the single mutation Leafex needs:
/// flipping a layer's visibility.
///
/// Implementations are trees: a group is reachable from exactly one parent.
pub trait LayerTree {
    /// Display name of the document
    fn name(&self) -> &str {
        ""
    }

    /// Directory the document lives in; output paths are built under it
    fn base_dir(&self) -> &Path;

    /// Direct children of the document root, top of the stack first
    fn root_children(&self) -> Vec<NodeRef>;

    /// Direct children of a group, top of the stack first
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot enumerate the group.
    fn children(&self, group: GroupId) -> Result<Vec<NodeRef>>;

    /// Looks up a group node
    fn group(&self, id: GroupId) -> Option<&GroupNode>;

    /// Looks up a layer node
    fn layer(&self, id: LayerId) -> Option<&LayerNode>;

    /// Sets a layer's visibility flag. Unknown ids are ignored.
    fn set_visible(&mut self, id: LayerId, visible: bool);

    /// Current visibility of a layer, `false` for unknown ids
    fn is_visible(&self, id: LayerId) -> bool {
        self.layer(id).map(|layer| layer.visible).unwrap_or(false)
    }

    /// The bottom-most node of the document root, `None` for an empty document
    fn base_node(&self) -> Option<NodeRef> {
        self.root_children().last().copied()
    }

    /// Group ids directly under the document root
    fn top_level_groups(&self) -> Vec<GroupId> {
        self.root_children()
            .into_iter()
            .filter_map(|node| match node {
                NodeRef::Group(id) => Some(id),
                NodeRef::Layer(_) => None,
            })
            .collect()
    }
}

/// Visible layers in paint order, bottom of the stack first
///
/// Hidden layers are skipped; groups are descended into in place.
///
/// # Errors
///
/// Returns an error if any group cannot be enumerated.
pub fn visible_layers_bottom_up(tree: &dyn LayerTree) -> Result<Vec<LayerId>> {
    fn walk(tree: &dyn LayerTree, nodes: &[NodeRef], out: &mut Vec<LayerId>) -> Result<()> {
        for node in nodes.iter().rev() {
            match *node {
                NodeRef::Layer(id) => {
                    if tree.is_visible(id) {
                        out.push(id);
                    }
                }
                NodeRef::Group(id) => {
                    let children = tree.children(id)?;
                    walk(tree, &children, out)?;
                }
            }
        }
        Ok(())
    }

    let mut out = Vec::new();
    walk(tree, &tree.root_children(), &mut out)?;
    Ok(out)
}
