// Renders a set of labeled cursor images as one grid sheet. All geometry
// derives from the largest image extents, from cell spacing down to the
// label font size.

use ab_glyph::{FontVec, PxScale};
use anyhow::{Context, Result, anyhow, bail};
use image::imageops;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::fs;
use std::path::Path;

/// Longest label drawn under a cell before ellipsizing.
const MAX_LABEL_CHARS: usize = 32;

/// Fallbacks probed when no font file is given on the command line.
const FONT_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/ttf-dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
];

/// One grid cell: a cursor image and the file name drawn under it.
pub struct MontageEntry {
    pub label: String,
    pub image: RgbaImage,
}

/// Grid geometry derived from the entry count and the largest image.
struct GridLayout {
    cols: u32,
    cell_w: u32,
    cell_h: u32,
    margin: u32,
    font_size: u32,
    width: u32,
    height: u32,
}

impl GridLayout {
    fn compute(count: u32, max_w: u32, max_h: u32) -> Self {
        let spacing_h = max_w / 8;
        let spacing_v = max_h / 8;
        let margin = max_w.min(max_h) / 2;
        let font_size = (max_w / 8).max(12);
        let text_height = font_size + 4;

        let cell_w = max_w + spacing_h;
        let cell_h = max_h + text_height + spacing_v;

        let cols = ((count as f64).sqrt() as u32).max(1);
        let rows = count.div_ceil(cols);

        GridLayout {
            cols,
            cell_w,
            cell_h,
            margin,
            font_size,
            width: 2 * margin + cols * cell_w - spacing_h,
            height: 2 * margin + rows * cell_h - spacing_v,
        }
    }

    fn cell_origin(&self, index: u32) -> (u32, u32) {
        let col = index % self.cols;
        let row = index / self.cols;
        (
            self.margin + col * self.cell_w,
            self.margin + row * self.cell_h,
        )
    }
}

/// Compose the sheet: one cell per entry with the label drawn under the
/// image area in black.
pub fn render(entries: &[MontageEntry], background: Rgba<u8>, font: &FontVec) -> RgbaImage {
    let max_w = entries.iter().map(|e| e.image.width()).max().unwrap_or(0);
    let max_h = entries.iter().map(|e| e.image.height()).max().unwrap_or(0);
    let layout = GridLayout::compute(entries.len() as u32, max_w, max_h);

    let mut canvas = RgbaImage::from_pixel(layout.width, layout.height, background);
    let scale = PxScale::from(layout.font_size as f32);

    for (index, entry) in entries.iter().enumerate() {
        let (cell_x, cell_y) = layout.cell_origin(index as u32);
        // Horizontally centered, top-aligned; the label band sits below
        // the tallest image, not below each image.
        let image_x = cell_x + (max_w - entry.image.width()) / 2;
        imageops::overlay(&mut canvas, &entry.image, i64::from(image_x), i64::from(cell_y));

        let label = ellipsize(&entry.label, MAX_LABEL_CHARS);
        let (text_w, _) = text_size(scale, font, &label);
        let text_x = cell_x as i32 + (max_w as i32 - text_w as i32) / 2;
        let text_y = (cell_y + max_h + 2) as i32;
        draw_text_mut(
            &mut canvas,
            Rgba([0, 0, 0, 255]),
            text_x,
            text_y,
            scale,
            font,
            &label,
        );
    }

    canvas
}

/// Parse `transparent`, `#RRGGBB` or `#AARRGGBB`; the leading `#` is
/// optional and hex digits are case-insensitive.
pub fn parse_color(value: &str) -> Option<Rgba<u8>> {
    if value.eq_ignore_ascii_case("transparent") {
        return Some(Rgba([0, 0, 0, 0]));
    }
    let hex = value.strip_prefix('#').unwrap_or(value);
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
            let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
            let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
            Some(Rgba([r, g, b, 0xFF]))
        }
        8 => {
            let a = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
            let r = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
            let g = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
            let b = u8::from_str_radix(hex.get(6..8)?, 16).ok()?;
            Some(Rgba([r, g, b, a]))
        }
        _ => None,
    }
}

/// Truncate to `max` characters, appending `…` past the limit.
pub fn ellipsize(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let mut out: String = value.chars().take(max).collect();
        out.push('…');
        out
    }
}

/// Load the label font: an explicit TTF/OTF path, or the first system
/// fallback that exists.
pub fn load_font(font_file: Option<&Path>) -> Result<FontVec> {
    let path = match font_file {
        Some(path) => {
            if !path.is_file() {
                bail!("font file not found: {}", path.display());
            }
            path.to_path_buf()
        }
        None => FONT_SEARCH_PATHS
            .iter()
            .map(Path::new)
            .find(|p| p.is_file())
            .ok_or_else(|| anyhow!("no usable system font found, pass one with --font-file"))?
            .to_path_buf(),
    };

    let bytes =
        fs::read(&path).with_context(|| format!("failed to read font {}", path.display()))?;
    FontVec::try_from_vec(bytes)
        .with_context(|| format!("failed to parse font {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_rgb() {
        assert_eq!(parse_color("#757575"), Some(Rgba([0x75, 0x75, 0x75, 0xFF])));
        assert_eq!(parse_color("00ff00"), Some(Rgba([0, 0xFF, 0, 0xFF])));
        assert_eq!(parse_color("#A1B2C3"), Some(Rgba([0xA1, 0xB2, 0xC3, 0xFF])));
    }

    #[test]
    fn test_parse_color_argb() {
        assert_eq!(
            parse_color("#80FF0000"),
            Some(Rgba([0xFF, 0x00, 0x00, 0x80]))
        );
        assert_eq!(parse_color("00000000"), Some(Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn test_parse_color_transparent() {
        assert_eq!(parse_color("transparent"), Some(Rgba([0, 0, 0, 0])));
        assert_eq!(parse_color("TRANSPARENT"), Some(Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn test_parse_color_rejects_garbage() {
        assert_eq!(parse_color(""), None);
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("red"), None);
        assert_eq!(parse_color("#GGHHII"), None);
        // multibyte input must not panic on byte slicing
        assert_eq!(parse_color("1ö234"), None);
    }

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize("left_ptr", 32), "left_ptr");
        let long = "a".repeat(40);
        let cut = ellipsize(&long, 32);
        assert_eq!(cut.chars().count(), 33);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn test_layout_five_cells() {
        let layout = GridLayout::compute(5, 32, 32);
        assert_eq!(layout.cols, 2);
        assert_eq!(layout.cell_w, 36);
        assert_eq!(layout.cell_h, 52);
        assert_eq!(layout.margin, 16);
        assert_eq!(layout.font_size, 12);
        assert_eq!(layout.width, 100);
        assert_eq!(layout.height, 184);

        assert_eq!(layout.cell_origin(0), (16, 16));
        assert_eq!(layout.cell_origin(3), (52, 68));
    }

    #[test]
    fn test_layout_single_cell() {
        let layout = GridLayout::compute(1, 24, 24);
        assert_eq!(layout.cols, 1);
        assert_eq!(layout.width, 48);
        assert_eq!(layout.height, 64);
    }

    #[test]
    fn test_layout_font_scales_with_cursor_size() {
        assert_eq!(GridLayout::compute(4, 256, 256).font_size, 32);
        assert_eq!(GridLayout::compute(4, 24, 24).font_size, 12);
    }

    #[test]
    fn test_render_smoke() {
        let Ok(font) = load_font(None) else {
            eprintln!("skipping: no system font available");
            return;
        };

        let entries = vec![
            MontageEntry {
                label: "left_ptr".to_string(),
                image: RgbaImage::from_pixel(24, 24, Rgba([255, 0, 0, 255])),
            },
            MontageEntry {
                label: "wait".to_string(),
                image: RgbaImage::from_pixel(16, 16, Rgba([0, 255, 0, 255])),
            },
        ];

        // One column of two 43px cells inside a 12px margin.
        let sheet = render(&entries, Rgba([0x75, 0x75, 0x75, 0xFF]), &font);
        assert_eq!(sheet.dimensions(), (48, 107));
        assert_eq!(sheet.get_pixel(0, 0), &Rgba([0x75, 0x75, 0x75, 0xFF]));
        // Largest entry fills its slot, so its top-left pixel is cursor red.
        assert_eq!(sheet.get_pixel(12, 12), &Rgba([255, 0, 0, 255]));
    }
}
