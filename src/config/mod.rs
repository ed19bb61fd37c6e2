//! Configuration management for Leafex.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Leafex uses an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `LEAFEX_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level, verbose, headless and dry-run switches
//! - [`DocumentConfig`] - Document manifest and output root
//! - [`ExportConfig`] - Output format, captions, encoder quality and matte
//! - [`EncoderConfig`] - External raster tool
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//! headless = false
//!
//! [document]
//! manifest = "${ART_ROOT}/hero.json"
//!
//! [export]
//! format = "auto"
//! extract_captions = true
//! quality = 12
//! matte = "semigray"
//!
//! [encoder]
//! program = "magick"
//! ```
//!
//! # Validation
//!
//! ```rust,no_run
//! use leafex::config::load_config;
//!
//! # fn example() {
//! match load_config("leafex.toml") {
//!     Ok(config) => println!("Configuration valid"),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! # }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, DocumentConfig, EncoderConfig, ExportConfig, FormatPreference,
    LeafexConfig, LoggingConfig,
};
