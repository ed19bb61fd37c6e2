//! Host integrations for Leafex.
//!
//! - [`document`] - Layered document model ([`LayerTree`](document::LayerTree)) and the JSON manifest host
//! - [`encoder`] - "Save visible composite" primitive, backed by an external raster tool
//! - [`fs`] - Directory creation and text file writes
//! - [`progress`] - Optional progress reporting
//! - [`factory`] - Builds the adapters for a run from configuration
//!
//! # Design Pattern
//!
//! Every adapter sits behind a trait so the export core can be driven by
//! dry-run or recording implementations in tests.

pub mod document;
pub mod encoder;
pub mod factory;
pub mod fs;
pub mod progress;
