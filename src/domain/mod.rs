//! Domain models and types for Leafex.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Node identifiers** ([`GroupId`], [`LayerId`])
//! - **Host document nodes** ([`GroupNode`], [`LayerNode`], [`LayerKind`])
//! - **Export records** ([`LeafRecord`], [`CaptionRecord`], [`CollectionResult`])
//! - **Error types** ([`LeafexError`], [`DocumentError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Group and layer ids are distinct newtypes so one can never be passed where
//! the other is expected:
//!
//! ```rust
//! use leafex::domain::{GroupId, LayerId};
//!
//! let group = GroupId::new(0);
//! let layer = LayerId::new(0);
//! // let wrong: LayerId = group;  // Compile error!
//! # let _ = (group, layer);
//! ```

pub mod document;
pub mod errors;
pub mod format;
pub mod ids;
pub mod records;
pub mod result;

// Re-export commonly used types for convenience
pub use document::{GroupNode, LayerKind, LayerNode, NodeRef};
pub use errors::{DocumentError, LeafexError};
pub use format::{EncodeOptions, ImageFormat, MatteStyle, ScanType};
pub use ids::{GroupId, LayerId};
pub use records::{CaptionRecord, CollectionResult, LeafRecord};
pub use result::Result;
