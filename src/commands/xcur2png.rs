use anyhow::{Context, Result, bail};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::raster;
use crate::xcursor::{self, ImageRecord};

/// Decode `in_file` and write one PNG per image plus a `{base}.json`
/// sidecar describing them, into `out_dir`.
pub fn run(in_file: &Path, out_dir: &Path, force: bool, verbose: bool) -> Result<()> {
    if verbose {
        println!(
            "xcur2png: in_file={}, out_dir={}, force={}",
            in_file.display(),
            out_dir.display(),
            force
        );
    }

    let data =
        fs::read(in_file).with_context(|| format!("failed to read {}", in_file.display()))?;
    let records = xcursor::decode(&data)
        .with_context(|| format!("failed to decode {}", in_file.display()))?;

    let file_name = in_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    println!("Decoded {} images from {}", records.len(), file_name);

    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create directory {}", out_dir.display()))?;

    let base = in_file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cursor".to_string());
    let names = png_names(&base, &records);

    let mut metas = Vec::with_capacity(records.len());
    for (index, (record, name)) in records.iter().zip(&names).enumerate() {
        if verbose {
            println!(
                "Image {}: size={}, {}x{}, hot=({},{}), delay={}",
                index,
                record.size,
                record.width,
                record.height,
                record.xhot,
                record.yhot,
                record.delay
            );
        }

        let path = out_dir.join(name);
        if !force && path.exists() {
            bail!(
                "file already exists: {} (use --force to overwrite)",
                path.display()
            );
        }
        raster::save_png(&raster::record_image(record), &path)?;
        println!("  Saved: {}", path.display());

        metas.push(record.meta().with_png_file(name.clone()));
    }

    let json_path = out_dir.join(format!("{}.json", base));
    if !force && json_path.exists() {
        bail!(
            "file already exists: {} (use --force to overwrite)",
            json_path.display()
        );
    }
    let json = serde_json::to_string_pretty(&metas)?;
    fs::write(&json_path, json)
        .with_context(|| format!("failed to write {}", json_path.display()))?;
    println!("  Saved: {}", json_path.display());

    Ok(())
}

/// Output names keyed by nominal size: `{base}_{size}.png` when the size
/// appears once, `{base}_{size}_{frame:03}.png` when it repeats (animation
/// frames share a size).
fn png_names(base: &str, records: &[ImageRecord]) -> Vec<String> {
    let mut per_size: HashMap<u32, usize> = HashMap::new();
    for record in records {
        *per_size.entry(record.size).or_insert(0) += 1;
    }

    let mut frame_index: HashMap<u32, usize> = HashMap::new();
    records
        .iter()
        .map(|record| {
            let counter = frame_index.entry(record.size).or_insert(0);
            let frame = *counter;
            *counter += 1;

            if per_size[&record.size] > 1 {
                format!("{}_{}_{:03}.png", base, record.size, frame)
            } else {
                format!("{}_{}.png", base, record.size)
            }
        })
        .collect()
}
