//! Output image formats

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Image format written for every leaf of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// File extension, without the dot
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
        }
    }

    /// Picks the format for a run from the host's JPEG capability
    pub fn for_capability(supports_jpeg: bool) -> Self {
        if supports_jpeg {
            ImageFormat::Jpeg
        } else {
            ImageFormat::Png
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            "png" => Ok(ImageFormat::Png),
            other => Err(format!("Unsupported image format '{other}'. Use jpg or png")),
        }
    }
}

/// How transparent pixels are flattened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatteStyle {
    None,
    Foreground,
    Background,
    White,
    Black,
    #[default]
    SemiGray,
}

/// JPEG scan layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScanType {
    #[default]
    Baseline,
    Optimized,
    Progressive,
}

/// Highest encoder quality
pub const MAX_QUALITY: u8 = 12;

/// Encoder settings, chosen once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncodeOptions {
    pub format: ImageFormat,

    /// 0..=12
    pub quality: u8,

    pub embed_color_profile: bool,

    pub matte: MatteStyle,

    pub scan: ScanType,
}

impl EncodeOptions {
    /// Maximum quality, no alpha, no embedded profile, semi-gray matte, baseline scans
    pub fn new(format: ImageFormat) -> Self {
        Self {
            format,
            quality: MAX_QUALITY,
            embed_color_profile: false,
            matte: MatteStyle::default(),
            scan: ScanType::default(),
        }
    }

    /// Sets the quality, clamped to 0..=12
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality.min(MAX_QUALITY);
        self
    }

    pub fn with_color_profile(mut self, embed: bool) -> Self {
        self.embed_color_profile = embed;
        self
    }

    pub fn with_matte(mut self, matte: MatteStyle) -> Self {
        self.matte = matte;
        self
    }

    pub fn with_scan(mut self, scan: ScanType) -> Self {
        self.scan = scan;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
        assert_eq!(ImageFormat::Png.extension(), "png");
    }

    #[test]
    fn test_capability_fallback() {
        assert_eq!(ImageFormat::for_capability(true), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::for_capability(false), ImageFormat::Png);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("JPEG".parse::<ImageFormat>().unwrap(), ImageFormat::Jpeg);
        assert_eq!("jpg".parse::<ImageFormat>().unwrap(), ImageFormat::Jpeg);
        assert_eq!("png".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
        assert!("tiff".parse::<ImageFormat>().is_err());
    }

    #[test]
    fn test_encode_options_defaults() {
        let options = EncodeOptions::new(ImageFormat::Jpeg);
        assert_eq!(options.quality, 12);
        assert!(!options.embed_color_profile);
        assert_eq!(options.matte, MatteStyle::SemiGray);
        assert_eq!(options.scan, ScanType::Baseline);
    }

    #[test]
    fn test_quality_is_clamped() {
        let options = EncodeOptions::new(ImageFormat::Png).with_quality(40);
        assert_eq!(options.quality, MAX_QUALITY);
    }

    #[test]
    fn test_matte_serde_names() {
        let matte: MatteStyle = serde_json::from_str("\"semigray\"").unwrap();
        assert_eq!(matte, MatteStyle::SemiGray);
        let scan: ScanType = serde_json::from_str("\"progressive\"").unwrap();
        assert_eq!(scan, ScanType::Progressive);
    }
}
