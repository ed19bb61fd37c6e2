//! Configuration schema types
//!
//! This module defines the configuration structure for Leafex.

use crate::domain::format::{EncodeOptions, ImageFormat, MatteStyle, ScanType, MAX_QUALITY};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main Leafex configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LeafexConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Which document to export and where
    #[serde(default)]
    pub document: DocumentConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// External encoder settings
    #[serde(default)]
    pub encoder: EncoderConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LeafexConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.document.validate()?;
        self.export.validate()?;
        self.encoder.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Effective log level, `debug` when verbose logging is on
    pub fn effective_log_level(&self) -> &str {
        if self.application.verbose {
            "debug"
        } else {
            &self.application.log_level
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Debug logging, overrides `log_level`
    #[serde(default)]
    pub verbose: bool,

    /// No progress UI
    #[serde(default)]
    pub headless: bool,

    /// Dry run mode (toggle visibility, write nothing)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            verbose: false,
            headless: false,
            dry_run: false,
        }
    }
}

/// Document selection
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DocumentConfig {
    /// Manifest of the document to export
    #[serde(default)]
    pub manifest: Option<PathBuf>,

    /// Root for output files; defaults to the document's own directory
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl DocumentConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(manifest) = &self.manifest {
            if manifest.as_os_str().is_empty() {
                return Err("document.manifest cannot be empty".to_string());
            }
        }
        if let Some(output_dir) = &self.output_dir {
            if output_dir.as_os_str().is_empty() {
                return Err("document.output_dir cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

/// Output format choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormatPreference {
    /// JPEG if the encoder supports it, PNG otherwise
    #[default]
    Auto,
    Jpg,
    Png,
}

impl FormatPreference {
    /// Resolves the run's format; `supports_jpeg` is only consulted for `Auto`
    pub fn resolve(self, supports_jpeg: impl FnOnce() -> bool) -> ImageFormat {
        match self {
            FormatPreference::Auto => ImageFormat::for_capability(supports_jpeg()),
            FormatPreference::Jpg => ImageFormat::Jpeg,
            FormatPreference::Png => ImageFormat::Png,
        }
    }
}

impl std::str::FromStr for FormatPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(FormatPreference::Auto),
            "jpg" | "jpeg" => Ok(FormatPreference::Jpg),
            "png" => Ok(FormatPreference::Png),
            other => Err(format!(
                "Invalid format '{other}'. Must be one of: auto, jpg, png"
            )),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output format
    #[serde(default)]
    pub format: FormatPreference,

    /// Write sibling text layers to `.txt` files
    #[serde(default)]
    pub extract_captions: bool,

    /// Encoder quality, 0..=12
    #[serde(default = "default_quality")]
    pub quality: u8,

    /// Embed the document color profile
    #[serde(default)]
    pub embed_color_profile: bool,

    /// Matte used when flattening transparency
    #[serde(default)]
    pub matte: MatteStyle,

    /// JPEG scan layout
    #[serde(default)]
    pub scan: ScanType,

    /// Write a JSON run report here
    #[serde(default)]
    pub report_path: Option<PathBuf>,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.quality > MAX_QUALITY {
            return Err(format!(
                "export.quality must be between 0 and {}, got {}",
                MAX_QUALITY, self.quality
            ));
        }
        Ok(())
    }

    /// Encoder options for a run writing `format`
    pub fn encode_options(&self, format: ImageFormat) -> EncodeOptions {
        EncodeOptions::new(format)
            .with_quality(self.quality)
            .with_color_profile(self.embed_color_profile)
            .with_matte(self.matte)
            .with_scan(self.scan)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: FormatPreference::default(),
            extract_captions: false,
            quality: default_quality(),
            embed_color_profile: false,
            matte: MatteStyle::default(),
            scan: ScanType::default(),
            report_path: None,
        }
    }
}

/// External encoder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Raster tool invoked per leaf
    #[serde(default = "default_encoder_program")]
    pub program: String,

    /// Extra arguments placed before the output path
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl EncoderConfig {
    fn validate(&self) -> Result<(), String> {
        if self.program.trim().is_empty() {
            return Err("encoder.program cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            program: default_encoder_program(),
            extra_args: Vec::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_quality() -> u8 {
    MAX_QUALITY
}

fn default_encoder_program() -> String {
    "magick".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
