// Leafex - Layered document leaf exporter
// Copyright (c) 2025 Leafex Contributors
// Licensed under the MIT License

//! # Leafex - Layered document leaf exporter
//!
//! Leafex exports every leaf layer of a layered image document to its own
//! image file. Each export shows exactly one leaf (plus its caption, if it has
//! one) on top of the background, and the file lands in a directory tree that
//! mirrors the document's group hierarchy.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Collecting** leaf and caption layers from every top-level group
//! - **Isolating** one leaf at a time by toggling visibility
//! - **Encoding** the visible composite through an external raster tool
//! - **Restoring** every layer's visibility once the run is over
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Collection, visibility bookkeeping and the export run
//! - [`adapters`] - Host integrations (document, encoder, filesystem, progress)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use leafex::adapters::document::ManifestDocument;
//! use leafex::adapters::factory::RunAdapters;
//! use leafex::config::load_config;
//! use leafex::core::export::{ExportRunner, RunOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("leafex.toml")?;
//!     let mut document = ManifestDocument::load("art/hero.json")?;
//!     let mut adapters = RunAdapters::from_config(&config);
//!
//!     let format = config.export.format.resolve(|| adapters.encoder.supports_jpeg());
//!     let options = RunOptions::new(config.export.encode_options(format));
//!     let summary = ExportRunner::new(options).run(
//!         Some(&mut document),
//!         adapters.encoder.as_mut(),
//!         adapters.fs.as_mut(),
//!         None,
//!     );
//!
//!     println!("Exported {} leaves", summary.successful_exports);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library calls return [`domain::Result`], whose error type is
//! [`domain::LeafexError`]. Failures inside a run never abort it; they are
//! collected in the run's [`ExportSummary`](core::export::ExportSummary).
//!
//! ## Logging
//!
//! Leafex logs with the `tracing` crate. Call
//! [`logging::init_logging`] once at startup to install a subscriber.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
