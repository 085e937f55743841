use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::raster;
use crate::xcursor::{self, ImageMeta, ImageRecord, XcursorError};

/// Read a metadata sidecar, load the PNGs it references and encode them
/// into one XCursor file. PNG paths resolve relative to the sidecar;
/// images whose dimensions disagree with the metadata are resized.
pub fn run(in_json: &Path, out_file: &Path, verbose: bool) -> Result<()> {
    if verbose {
        println!(
            "png2xcur: in_json={}, out_file={}",
            in_json.display(),
            out_file.display()
        );
    }

    let text = fs::read_to_string(in_json)
        .with_context(|| format!("failed to read {}", in_json.display()))?;
    let metas: Vec<ImageMeta> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {}", in_json.display()))?;

    let base_dir = in_json.parent().unwrap_or(Path::new("."));

    let mut records = Vec::with_capacity(metas.len());
    for (index, meta) in metas.iter().enumerate() {
        let png_file = meta
            .png_file
            .as_deref()
            .ok_or(XcursorError::MissingRasterReference { index })?;
        let path = base_dir.join(png_file);
        if verbose {
            println!(
                "Image {}: {} ({}x{}, size={})",
                index,
                path.display(),
                meta.width,
                meta.height,
                meta.size
            );
        }

        let image = raster::load_png_resized(&path, meta.width, meta.height)?;
        records.push(ImageRecord::from_meta(meta, raster::image_pixels(&image))?);
    }

    let bytes = xcursor::encode(&records)?;
    if let Some(parent) = out_file.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(out_file, bytes)
        .with_context(|| format!("failed to write {}", out_file.display()))?;

    println!("Encoded {} images to {}", records.len(), out_file.display());
    Ok(())
}
