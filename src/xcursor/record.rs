use serde::{Deserialize, Serialize};

use super::error::XcursorError;

/// One decoded cursor image: nominal size, geometry, hotspot and a packed
/// ARGB pixel buffer (one `u32` per pixel, `0xAARRGGBB`, row-major from the
/// top-left).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Nominal size class from the chunk header. Usually matches the pixel
    /// dimensions but the format does not require that.
    pub size: u32,
    pub width: u32,
    pub height: u32,
    pub xhot: u32,
    pub yhot: u32,
    /// Frame delay in milliseconds, 0 for static cursors.
    pub delay: u32,
    pub pixels: Vec<u32>,
}

impl ImageRecord {
    /// Build a record from sidecar metadata and a pixel buffer, rejecting
    /// buffers that do not match the declared dimensions.
    pub fn from_meta(meta: &ImageMeta, pixels: Vec<u32>) -> Result<Self, XcursorError> {
        let expected = u64::from(meta.width) * u64::from(meta.height);
        if pixels.len() as u64 != expected {
            return Err(XcursorError::InconsistentBuffer {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(ImageRecord {
            size: meta.size,
            width: meta.width,
            height: meta.height,
            xhot: meta.xhot,
            yhot: meta.yhot,
            delay: meta.delay,
            pixels,
        })
    }

    /// Project the record onto its JSON metadata, without pixel data.
    pub fn meta(&self) -> ImageMeta {
        ImageMeta {
            size: self.size,
            width: self.width,
            height: self.height,
            xhot: self.xhot,
            yhot: self.yhot,
            delay: self.delay,
            png_file: None,
        }
    }
}

/// JSON-facing projection of an [`ImageRecord`]. The sidecar written next to
/// extracted PNGs is a pretty-printed array of these; files edited by hand
/// may omit `delay` and carry extra fields, both are tolerated on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMeta {
    pub size: u32,
    pub width: u32,
    pub height: u32,
    #[serde(rename = "xHot")]
    pub xhot: u32,
    #[serde(rename = "yHot")]
    pub yhot: u32,
    #[serde(default)]
    pub delay: u32,
    #[serde(rename = "pngFile", default, skip_serializing_if = "Option::is_none")]
    pub png_file: Option<String>,
}

impl ImageMeta {
    pub fn with_png_file(mut self, png_file: impl Into<String>) -> Self {
        self.png_file = Some(png_file.into());
        self
    }
}
