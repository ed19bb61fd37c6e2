//! Export command implementation
//!
//! This module implements the `export` command, which writes every leaf layer
//! of a document to its own image file.

use super::{open_document, resolve_manifest, EXIT_ABORTED, EXIT_CONFIG, EXIT_FATAL, EXIT_OK, EXIT_PARTIAL};
use crate::adapters::document::LayerTree;
use crate::adapters::factory::RunAdapters;
use crate::config::schema::FormatPreference;
use crate::config::{load_config_or_default, LeafexConfig};
use crate::core::export::{ExportRunner, ExportSummary, RunOptions};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Document manifest to export (overrides document.manifest)
    #[arg(short, long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Root directory for output files (overrides document.output_dir)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Run without a progress bar
    #[arg(long)]
    pub headless: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Also write text layers to .txt files
    #[arg(long)]
    pub extract_captions: bool,

    /// Toggle visibility but write no files
    #[arg(long)]
    pub dry_run: bool,

    /// Output format (auto, jpg, png)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<FormatPreference>,

    /// Write a JSON run report (overrides export.report_path)
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

impl ExportArgs {
    /// Applies command-line flags on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut LeafexConfig) {
        if let Some(manifest) = &self.manifest {
            config.document.manifest = Some(manifest.clone());
        }
        if let Some(output_dir) = &self.output_dir {
            config.document.output_dir = Some(output_dir.clone());
        }
        if let Some(format) = self.format {
            tracing::info!(format = ?format, "Overriding output format from CLI");
            config.export.format = format;
        }
        if let Some(report) = &self.report {
            config.export.report_path = Some(report.clone());
        }
        // Flags only ever switch these on.
        config.application.headless |= self.headless;
        config.application.verbose |= self.verbose;
        config.application.dry_run |= self.dry_run;
        config.export.extract_captions |= self.extract_captions;
    }

    /// Execute the export command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(EXIT_CONFIG);
            }
        };
        self.apply_overrides(&mut config);

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(EXIT_CONFIG);
        }

        let manifest = resolve_manifest(None, &config);
        let mut document = match open_document(manifest.as_deref()) {
            Ok(document) => document,
            Err(e) => {
                tracing::error!(error = %e, "Failed to open document");
                eprintln!("Failed to open document: {e}");
                return Ok(EXIT_FATAL);
            }
        };

        if config.application.dry_run {
            println!("🔍 DRY RUN MODE - No files will be written");
            println!();
        }

        let mut adapters = RunAdapters::from_config(&config);
        let format = config
            .export
            .format
            .resolve(|| adapters.encoder.supports_jpeg());
        let options = RunOptions::new(config.export.encode_options(format))
            .with_captions(config.export.extract_captions)
            .with_output_root(config.document.output_dir.clone());

        let mut runner = ExportRunner::new(options);
        let summary = runner.run(
            document.as_mut().map(|doc| doc as &mut dyn LayerTree),
            adapters.encoder.as_mut(),
            adapters.fs.as_mut(),
            adapters.progress.as_deref_mut(),
        );
        summary.log_summary();

        if let Some(path) = &config.export.report_path {
            match summary.write_report(path) {
                Ok(()) => tracing::info!(path = %path.display(), "Run report written"),
                Err(e) => crate::log_error_with_context!(&e, "Failed to write run report"),
            }
        }

        print_summary(&summary);
        Ok(exit_code(&summary))
    }
}

/// Maps a finished run to the process exit code
pub fn exit_code(summary: &ExportSummary) -> i32 {
    if summary.is_aborted() {
        EXIT_ABORTED
    } else if summary.is_successful() {
        EXIT_OK
    } else {
        EXIT_PARTIAL
    }
}

fn print_summary(summary: &ExportSummary) {
    if summary.is_aborted() {
        if let Some(error) = summary.errors.first() {
            eprintln!("❌ {}", error.message);
        }
        return;
    }

    println!();
    println!("📊 Export Summary:");
    println!("  Document: {}", summary.document);
    if let Some(format) = summary.format {
        println!("  Format: {format}");
    }
    println!("  Leaves: {}", summary.total_leaves);
    println!("  Successful: {}", summary.successful_exports);
    println!("  Failed: {}", summary.failed_exports);
    println!("  Skipped: {}", summary.skipped_leaves);
    if summary.captions_written > 0 {
        println!("  Captions Written: {}", summary.captions_written);
    }
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!("  Success Rate: {:.2}%", summary.success_rate());
    println!();

    if !summary.errors.is_empty() {
        println!("⚠️  Errors encountered:");
        for error in &summary.errors {
            println!("  - {:?}: {}", error.error_type, error.message);
            if let Some(context) = &error.context {
                println!("    Context: {context}");
            }
        }
        println!();
    }

    if summary.is_successful() {
        println!("✅ Export completed successfully!");
    } else {
        println!("⚠️  Export completed with failures");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::export::{AbortReason, ExportError, ExportErrorType, RunState};

    #[test]
    fn test_apply_overrides() {
        let args = ExportArgs {
            manifest: Some(PathBuf::from("hero.json")),
            headless: true,
            extract_captions: true,
            format: Some(FormatPreference::Png),
            ..ExportArgs::default()
        };
        let mut config = LeafexConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.document.manifest, Some(PathBuf::from("hero.json")));
        assert!(config.application.headless);
        assert!(config.export.extract_captions);
        assert!(!config.application.dry_run);
        assert_eq!(config.export.format, FormatPreference::Png);
    }

    #[test]
    fn test_flags_do_not_switch_config_off() {
        let mut config = LeafexConfig::default();
        config.application.dry_run = true;
        ExportArgs::default().apply_overrides(&mut config);
        assert!(config.application.dry_run);
    }

    #[test]
    fn test_exit_codes() {
        let mut summary = ExportSummary::new();
        summary.final_state = RunState::Done;
        assert_eq!(exit_code(&summary), EXIT_OK);

        summary.add_error(ExportError::new(ExportErrorType::Encode, "boom".to_string()));
        assert_eq!(exit_code(&summary), EXIT_PARTIAL);

        summary.final_state = RunState::Aborted(AbortReason::NoBaseLayer);
        assert_eq!(exit_code(&summary), EXIT_ABORTED);
    }
}
