//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Leafex configuration file.

use super::{EXIT_CONFIG, EXIT_OK};
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates every section before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.effective_log_level());
        println!("  Headless: {}", config.application.headless);
        println!("  Dry Run: {}", config.application.dry_run);
        match &config.document.manifest {
            Some(manifest) => println!("  Manifest: {}", manifest.display()),
            None => println!("  Manifest: (none, pass --manifest)"),
        }
        if let Some(output_dir) = &config.document.output_dir {
            println!("  Output Directory: {}", output_dir.display());
        }
        println!("  Format: {:?}", config.export.format);
        println!("  Quality: {}", config.export.quality);
        println!("  Matte: {:?}", config.export.matte);
        println!("  Extract Captions: {}", config.export.extract_captions);
        println!("  Encoder: {}", config.encoder.program);
        if config.logging.local_enabled {
            println!(
                "  Log Files: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();
        Ok(EXIT_OK)
    }
}
