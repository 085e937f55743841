// Library exports for xcurgrid

pub mod cli;
pub mod commands;
pub mod montage;
pub mod raster;
pub mod theme;
pub mod xcursor;

// Re-export commonly used types from the codec
pub use xcursor::{
    ImageMeta,
    ImageRecord,
    XcursorError,
    decode,
    encode,
};
