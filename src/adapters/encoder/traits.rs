//! Image encoder abstraction

use crate::adapters::document::LayerTree;
use crate::domain::format::EncodeOptions;
use crate::domain::Result;
use std::path::Path;

/// The host's "save visible composite to file" primitive
pub trait CompositeEncoder {
    /// Whether the higher-quality JPEG encoder is available
    fn supports_jpeg(&self) -> bool;

    /// Writes what is currently visible in `document` to `path`
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails. Failures are reported,
    /// never panicked on.
    fn encode_visible_composite(
        &mut self,
        document: &dyn LayerTree,
        path: &Path,
        options: &EncodeOptions,
    ) -> Result<()>;
}
