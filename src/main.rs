use clap::Parser;

use xcurgrid::cli::{Cli, Command};
use xcurgrid::commands;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Grid {
            in_path,
            out_file,
            bg_color,
            font_file,
        } => commands::grid::run(
            &in_path,
            &out_file,
            &bg_color,
            font_file.as_deref(),
            cli.verbose,
        ),
        Command::Xcur2png {
            in_file,
            out_dir,
            force,
        } => commands::xcur2png::run(&in_file, &out_dir, force, cli.verbose),
        Command::Png2xcur { in_json, out_file } => {
            commands::png2xcur::run(&in_json, &out_file, cli.verbose)
        }
    }
}
