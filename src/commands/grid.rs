use anyhow::{Result, anyhow, bail};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::montage::{self, MontageEntry};
use crate::raster;
use crate::theme::{self, ThemeSource};
use crate::xcursor::{self, ImageRecord};

/// Render every cursor in a theme as one labeled sheet. Each cursor file
/// contributes the stored size closest to the largest nominal size found in
/// the theme, so mixed-density themes come out uniform.
pub fn run(
    in_path: &Path,
    out_file: &Path,
    bg_color: &str,
    font_file: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    if verbose {
        println!(
            "grid: in_path={}, out_file={}, bg_color={}",
            in_path.display(),
            out_file.display(),
            bg_color
        );
    }

    let background = montage::parse_color(bg_color).ok_or_else(|| {
        anyhow!("invalid background color {bg_color:?}, use #RRGGBB, #AARRGGBB or transparent")
    })?;
    let font = montage::load_font(font_file)?;

    if !in_path.exists() {
        bail!("file not found: {}", in_path.display());
    }
    let source = ThemeSource::open(in_path)?;
    let cursor_files = theme::find_cursor_files(source.root())?;
    if cursor_files.is_empty() {
        println!("No cursor files found");
        return Ok(());
    }
    if verbose {
        println!("Found {} cursor files", cursor_files.len());
    }

    let mut cursors: Vec<(String, Vec<ImageRecord>)> = Vec::new();
    for path in &cursor_files {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let data = fs::read(path)?;
        match xcursor::decode(&data) {
            Ok(records) if !records.is_empty() => {
                if verbose {
                    println!("  {}: {} sizes", name, records.len());
                }
                cursors.push((name, records));
            }
            Ok(_) => {}
            Err(e) => {
                if verbose {
                    eprintln!("  {}: skipped ({})", name, e);
                }
            }
        }
    }

    if cursors.is_empty() {
        println!("No valid cursor files found");
        return Ok(());
    }
    println!("Loaded {} cursor files", cursors.len());

    // Everything is rendered at the theme's largest nominal size.
    let target_size = cursors
        .iter()
        .flat_map(|(_, records)| records)
        .map(|record| record.size)
        .max()
        .unwrap_or(24);
    println!("Target size: {}px", target_size);

    let entries: Vec<MontageEntry> = cursors
        .iter()
        .filter_map(|(name, records)| {
            records
                .iter()
                .min_by_key(|record| record.size.abs_diff(target_size))
                .map(|record| MontageEntry {
                    label: name.clone(),
                    image: raster::record_image(record),
                })
        })
        .collect();

    let mut dimension_counts: HashMap<(u32, u32), usize> = HashMap::new();
    for entry in &entries {
        *dimension_counts
            .entry(entry.image.dimensions())
            .or_insert(0) += 1;
    }
    let mut stats: Vec<_> = dimension_counts.into_iter().collect();
    stats.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    for ((width, height), count) in stats {
        println!("- {} : {}x{}px", count, width, height);
    }

    let sheet = montage::render(&entries, background, &font);
    raster::save_png(&sheet, out_file)?;
    println!("Saved: {}", out_file.display());

    Ok(())
}
