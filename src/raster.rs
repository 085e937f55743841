// PNG reading and writing at the codec boundary. Pixel words stay packed
// ARGB inside the codec and become straight-alpha RGBA here; no
// premultiplication or other color math is applied in either direction.

use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};
use std::fs;
use std::path::Path;

use crate::xcursor::ImageRecord;

/// Unpack a record's ARGB words into an RGBA image.
pub fn record_image(record: &ImageRecord) -> RgbaImage {
    let mut image = RgbaImage::new(record.width, record.height);
    for (pixel, argb) in image.pixels_mut().zip(&record.pixels) {
        let [a, r, g, b] = argb.to_be_bytes();
        *pixel = Rgba([r, g, b, a]);
    }
    image
}

/// Pack an RGBA image back into ARGB words, row-major from the top-left.
pub fn image_pixels(image: &RgbaImage) -> Vec<u32> {
    image
        .pixels()
        .map(|&Rgba([r, g, b, a])| u32::from_be_bytes([a, r, g, b]))
        .collect()
}

/// Load a raster file, resizing to the target dimensions when they differ.
pub fn load_png_resized(path: &Path, width: u32, height: u32) -> Result<RgbaImage> {
    let image = image::open(path)
        .with_context(|| format!("failed to read image {}", path.display()))?
        .to_rgba8();
    if image.width() == width && image.height() == height {
        return Ok(image);
    }
    Ok(imageops::resize(&image, width, height, FilterType::CatmullRom))
}

/// Write an RGBA image as PNG, creating parent directories as needed.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("failed to write PNG {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_argb_channel_order() {
        let record = ImageRecord {
            size: 1,
            width: 2,
            height: 1,
            xhot: 0,
            yhot: 0,
            delay: 0,
            pixels: vec![0x80FF_0000, 0x0102_0304],
        };
        let image = record_image(&record);

        assert_eq!(image.get_pixel(0, 0), &Rgba([0xFF, 0x00, 0x00, 0x80]));
        assert_eq!(image.get_pixel(1, 0), &Rgba([0x02, 0x03, 0x04, 0x01]));
    }

    #[test]
    fn test_argb_round_trip() {
        let pixels = vec![0x0000_0000, 0xFFFF_FFFF, 0x1234_5678, 0x00AB_CDEF];
        let record = ImageRecord {
            size: 2,
            width: 2,
            height: 2,
            xhot: 0,
            yhot: 0,
            delay: 0,
            pixels: pixels.clone(),
        };

        assert_eq!(image_pixels(&record_image(&record)), pixels);
    }

    #[test]
    fn test_save_and_reload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out").join("cursor.png");

        let image = RgbaImage::from_pixel(8, 4, Rgba([10, 20, 30, 255]));
        save_png(&image, &path).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded.dimensions(), (8, 4));
        assert_eq!(reloaded.get_pixel(7, 3), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_resize_on_mismatch() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("small.png");
        save_png(&RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255])), &path).unwrap();

        let exact = load_png_resized(&path, 8, 8).unwrap();
        assert_eq!(exact.dimensions(), (8, 8));

        let scaled = load_png_resized(&path, 24, 24).unwrap();
        assert_eq!(scaled.dimensions(), (24, 24));
    }
}
