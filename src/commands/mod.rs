// Command implementations, one per CLI subcommand.

pub mod grid;
pub mod png2xcur;
pub mod xcur2png;
