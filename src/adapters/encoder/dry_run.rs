//! Encoder that only logs

use super::traits::CompositeEncoder;
use crate::adapters::document::LayerTree;
use crate::domain::format::EncodeOptions;
use crate::domain::Result;
use std::path::{Path, PathBuf};

/// Records intended writes without producing any file
#[derive(Debug, Clone, Default)]
pub struct DryRunEncoder {
    supports_jpeg: bool,
    planned: Vec<PathBuf>,
}

impl DryRunEncoder {
    /// Creates a dry-run encoder reporting the given JPEG capability
    pub fn new(supports_jpeg: bool) -> Self {
        Self {
            supports_jpeg,
            planned: Vec::new(),
        }
    }

    /// Paths that would have been written, in call order
    pub fn planned(&self) -> &[PathBuf] {
        &self.planned
    }
}

impl CompositeEncoder for DryRunEncoder {
    fn supports_jpeg(&self) -> bool {
        self.supports_jpeg
    }

    fn encode_visible_composite(
        &mut self,
        _document: &dyn LayerTree,
        path: &Path,
        options: &EncodeOptions,
    ) -> Result<()> {
        tracing::info!(
            path = %path.display(),
            format = %options.format,
            "[DRY RUN] Would write composite"
        );
        self.planned.push(path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::document::ManifestDocument;
    use crate::domain::format::ImageFormat;

    #[test]
    fn test_dry_run_records_paths() {
        let doc = ManifestDocument::new("/art");
        let mut encoder = DryRunEncoder::new(true);
        assert!(encoder.supports_jpeg());

        encoder
            .encode_visible_composite(
                &doc,
                Path::new("/art/A/x.jpg"),
                &EncodeOptions::new(ImageFormat::Jpeg),
            )
            .unwrap();
        assert_eq!(encoder.planned(), &[PathBuf::from("/art/A/x.jpg")]);
    }
}
