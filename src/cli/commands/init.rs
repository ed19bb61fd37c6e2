//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "leafex.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Leafex configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point document.manifest at your layered document");
                println!("  2. Make sure the encoder program is on PATH (default: magick)");
                println!("  3. Validate configuration: leafex validate-config");
                println!("  4. Preview targets: leafex inspect");
                println!("  5. Run export: leafex export");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Leafex Configuration File
# Batch exporter for leaf layers of layered image documents

[application]
log_level = "info"
headless = false
dry_run = false

[document]
manifest = "art/document.json"
# output_dir = "export"

[export]
format = "auto"
extract_captions = false
quality = 12

[encoder]
program = "magick"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Leafex Configuration File
# Batch exporter for leaf layers of layered image documents
#
# Every leaf layer (normal or smart object) under a top-level group is
# written to <output>/<group>/<subgroup>/<layer>.<ext> with only that layer
# visible. Visibility is restored afterwards.
#
# Values may reference environment variables with ${VAR}. Any key can be
# overridden with LEAFEX_<SECTION>_<KEY>, e.g. LEAFEX_EXPORT_FORMAT=png.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Debug logging, same as --verbose
verbose = false

# No progress bar, same as --headless
headless = false

# Toggle visibility but write no files
dry_run = false

# ============================================================================
# Document
# ============================================================================
[document]
# JSON manifest describing the layered document
manifest = "art/document.json"

# Root for output files; defaults to the manifest's directory
# output_dir = "${HOME}/exports"

# ============================================================================
# Export Configuration
# ============================================================================
[export]
# Output format: "auto" (JPEG when the encoder supports it), "jpg" or "png"
format = "auto"

# Write text layers to .txt files next to the images
extract_captions = false

# Encoder quality, 0-12
quality = 12

# Keep the document color profile in the output
embed_color_profile = false

# Matte for transparent areas:
# none | foreground | background | white | black | semigray
matte = "semigray"

# JPEG scans: baseline | optimized | progressive
scan = "baseline"

# Write a JSON summary of each run
# report_path = "export/leafex-report.json"

# ============================================================================
# Encoder
# ============================================================================
[encoder]
# ImageMagick-compatible program used to flatten visible layers
program = "magick"

# Extra arguments placed before the output path
extra_args = []

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON file logging
local_enabled = false

# Local log directory
local_path = "logs"

# Log rotation (daily, hourly, never)
local_rotation = "daily"
"#
        .to_string()
    }
}
