//! Adapter factory
//!
//! Builds the encoder, filesystem and progress adapters an export run needs
//! from the loaded configuration.

use crate::adapters::encoder::{CommandEncoder, CompositeEncoder, DryRunEncoder};
use crate::adapters::fs::{DryRunFileSystem, FileSystem, LocalFileSystem};
use crate::adapters::progress::{ConsoleProgress, ProgressReporter};
use crate::config::schema::{EncoderConfig, LeafexConfig};

/// Create the composite encoder for a run
///
/// In dry-run mode the real encoder is still probed so the chosen format
/// matches what a real run would produce.
pub fn create_encoder(config: &EncoderConfig, dry_run: bool) -> Box<dyn CompositeEncoder> {
    let encoder = CommandEncoder::new(config.program.clone(), config.extra_args.clone());
    if dry_run {
        tracing::info!("Dry run: composites will not be written");
        Box::new(DryRunEncoder::new(encoder.supports_jpeg()))
    } else {
        tracing::debug!(program = %encoder.program(), "Using command encoder");
        Box::new(encoder)
    }
}

/// Create the filesystem adapter for a run
pub fn create_file_system(dry_run: bool) -> Box<dyn FileSystem> {
    if dry_run {
        Box::new(DryRunFileSystem::new())
    } else {
        Box::new(LocalFileSystem)
    }
}

/// Create a progress reporter, or none in headless mode
pub fn create_progress(headless: bool) -> Option<Box<dyn ProgressReporter>> {
    if headless {
        None
    } else {
        Some(Box::new(ConsoleProgress::new()))
    }
}

/// All adapters for one run, built from configuration
pub struct RunAdapters {
    pub encoder: Box<dyn CompositeEncoder>,
    pub fs: Box<dyn FileSystem>,
    pub progress: Option<Box<dyn ProgressReporter>>,
}

impl RunAdapters {
    pub fn from_config(config: &LeafexConfig) -> Self {
        let dry_run = config.application.dry_run;
        Self {
            encoder: create_encoder(&config.encoder, dry_run),
            fs: create_file_system(dry_run),
            progress: create_progress(config.application.headless),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_has_no_progress() {
        assert!(create_progress(true).is_none());
        assert!(create_progress(false).is_some());
    }

    #[test]
    fn test_dry_run_file_system_writes_nothing() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("planned");

        let mut fs = create_file_system(true);
        fs.create_directory(&dir).unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn test_dry_run_encoder_with_missing_program_falls_back_to_png() {
        let config = EncoderConfig {
            program: "leafex-no-such-encoder".to_string(),
            extra_args: Vec::new(),
        };
        let encoder = create_encoder(&config, true);
        assert!(!encoder.supports_jpeg());
    }
}
