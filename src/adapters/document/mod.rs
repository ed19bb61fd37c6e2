//! Host document abstraction
//!
//! This module provides a trait-based abstraction over layered documents so
//! the export core never depends on a particular host.

pub mod manifest;
pub mod traits;

pub use manifest::{Manifest, ManifestDocument, ManifestLayer, ManifestNode};
pub use traits::{visible_layers_bottom_up, LayerTree};
