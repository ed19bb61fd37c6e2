//! Core logic for Leafex.
//!
//! # Modules
//!
//! - [`sanitize`] - File-name sanitizing
//! - [`collect`] - Layer tree traversal and record construction
//! - [`visibility`] - Capture, hide and restore of layer visibility
//! - [`export`] - The export run and its summary
//!
//! # Export Workflow
//!
//! 1. **Check**: The bottom layer must be a background layer
//! 2. **Collect**: Walk every top-level group for leaves and captions
//! 3. **Hide**: Snapshot visibility, then hide every collected layer
//! 4. **Export**: Show one leaf (and its caption), encode, hide it again
//! 5. **Restore**: Put every layer back the way it was
//! 6. **Captions** (optional): Write text layers to `.txt` files
//!
//! # Example
//!
//! ```rust,no_run
//! use leafex::adapters::document::ManifestDocument;
//! use leafex::adapters::encoder::CommandEncoder;
//! use leafex::adapters::fs::LocalFileSystem;
//! use leafex::core::export::{ExportRunner, RunOptions};
//! use leafex::domain::{EncodeOptions, ImageFormat};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut document = ManifestDocument::load("art/hero.json")?;
//! let mut encoder = CommandEncoder::new("magick", Vec::new());
//! let mut fs = LocalFileSystem;
//!
//! let mut runner = ExportRunner::new(RunOptions::new(EncodeOptions::new(ImageFormat::Png)));
//! let summary = runner.run(Some(&mut document), &mut encoder, &mut fs, None);
//!
//! println!("Exported {} of {}", summary.successful_exports, summary.total_leaves);
//! # Ok(())
//! # }
//! ```

pub mod collect;
pub mod export;
pub mod sanitize;
pub mod visibility;
