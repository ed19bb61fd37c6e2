//! External raster tool encoder
//!
//! Flattens the raster sources of all visible layers, bottom-up, over the
//! configured matte by invoking an ImageMagick-compatible program:
//!
//! ```text
//! magick bg.png arm.png -background #808080 -flatten -quality 100 -strip -interlace None out.jpg
//! ```

use super::traits::CompositeEncoder;
use crate::adapters::document::{visible_layers_bottom_up, LayerTree};
use crate::domain::errors::LeafexError;
use crate::domain::format::{EncodeOptions, ImageFormat, MatteStyle, ScanType, MAX_QUALITY};
use crate::domain::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Encoder that shells out to a raster tool
#[derive(Debug, Clone)]
pub struct CommandEncoder {
    program: String,
    extra_args: Vec<String>,
}

impl CommandEncoder {
    /// Creates an encoder for `program`, appending `extra_args` before the output path
    pub fn new(program: impl Into<String>, extra_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            extra_args,
        }
    }

    /// Program invoked for every leaf
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Raster sources of the visible layers, bottom-up, resolved against the document directory
    fn visible_sources(&self, document: &dyn LayerTree) -> Result<Vec<PathBuf>> {
        let mut sources = Vec::new();
        for id in visible_layers_bottom_up(document)? {
            let Some(layer) = document.layer(id) else {
                continue;
            };
            match &layer.source {
                Some(source) => sources.push(document.base_dir().join(source)),
                None => tracing::debug!(
                    layer = %layer.name,
                    "Visible layer has no raster source, skipping"
                ),
            }
        }
        Ok(sources)
    }

    /// Command-line arguments for one encode
    pub fn build_args(
        &self,
        sources: &[PathBuf],
        output: &Path,
        options: &EncodeOptions,
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = sources.iter().map(|s| s.as_os_str().to_owned()).collect();

        args.push("-background".into());
        args.push(matte_color(options.matte).into());
        args.push("-flatten".into());
        args.push("-alpha".into());
        args.push("off".into());

        if !options.embed_color_profile {
            args.push("-strip".into());
        }

        if options.format == ImageFormat::Jpeg {
            args.push("-quality".into());
            args.push(jpeg_quality(options.quality).to_string().into());
            match options.scan {
                ScanType::Baseline => {
                    args.push("-interlace".into());
                    args.push("None".into());
                }
                ScanType::Optimized => {
                    args.push("-interlace".into());
                    args.push("None".into());
                    args.push("-define".into());
                    args.push("jpeg:optimize-coding=true".into());
                }
                ScanType::Progressive => {
                    args.push("-interlace".into());
                    args.push("Plane".into());
                }
            }
        }

        args.extend(self.extra_args.iter().map(OsString::from));
        args.push(output.as_os_str().to_owned());
        args
    }
}

impl CompositeEncoder for CommandEncoder {
    fn supports_jpeg(&self) -> bool {
        match Command::new(&self.program).arg("-version").output() {
            Ok(output) if output.status.success() => {
                let text = String::from_utf8_lossy(&output.stdout).to_lowercase();
                let supported = text.contains("jpeg");
                tracing::debug!(program = %self.program, supported, "Probed JPEG support");
                supported
            }
            Ok(output) => {
                tracing::warn!(
                    program = %self.program,
                    status = %output.status,
                    "Encoder version probe failed, falling back to PNG"
                );
                false
            }
            Err(e) => {
                tracing::warn!(
                    program = %self.program,
                    error = %e,
                    "Encoder not runnable, falling back to PNG"
                );
                false
            }
        }
    }

    fn encode_visible_composite(
        &mut self,
        document: &dyn LayerTree,
        path: &Path,
        options: &EncodeOptions,
    ) -> Result<()> {
        let sources = self.visible_sources(document)?;
        if sources.is_empty() {
            return Err(LeafexError::Encode(format!(
                "Nothing visible with a raster source to write to {}",
                path.display()
            )));
        }

        let args = self.build_args(&sources, path, options);
        tracing::trace!(program = %self.program, args = ?args, "Running encoder");

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| LeafexError::Encode(format!("Failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LeafexError::Encode(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

/// Maps the 0..=12 host scale onto 1..=100
fn jpeg_quality(quality: u8) -> u32 {
    (u32::from(quality.min(MAX_QUALITY)) * 100 / u32::from(MAX_QUALITY)).max(1)
}

fn matte_color(matte: MatteStyle) -> &'static str {
    match matte {
        MatteStyle::None => "none",
        MatteStyle::Foreground | MatteStyle::Black => "#000000",
        MatteStyle::Background | MatteStyle::White => "#ffffff",
        MatteStyle::SemiGray => "#808080",
    }
}
