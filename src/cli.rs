use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "xcurgrid",
    version,
    about = "XCursor to PNG converter and cursor theme sheet renderer"
)]
pub struct Cli {
    /// Print per-file progress
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render a cursor theme directory or zip as one labeled grid sheet
    Grid {
        /// Theme directory or zip archive
        in_path: PathBuf,
        /// Output PNG file
        out_file: PathBuf,
        /// Background color: #RRGGBB, #AARRGGBB or "transparent"
        #[arg(short, long, default_value = "#757575")]
        bg_color: String,
        /// Label font (TTF/OTF); common system fonts are probed when omitted
        #[arg(short = 'F', long)]
        font_file: Option<PathBuf>,
    },
    /// Extract an XCursor file into PNGs plus a JSON metadata sidecar
    Xcur2png {
        /// XCursor file
        in_file: PathBuf,
        /// Output directory, created if missing
        out_dir: PathBuf,
        /// Overwrite existing output files
        #[arg(short, long)]
        force: bool,
    },
    /// Build an XCursor file from PNGs listed in a JSON metadata sidecar
    Png2xcur {
        /// JSON metadata file; PNG paths resolve relative to it
        in_json: PathBuf,
        /// Output XCursor file
        out_file: PathBuf,
    },
}
