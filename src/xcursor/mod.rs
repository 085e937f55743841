//! XCursor binary format support.
//!
//! An XCursor file is a little-endian container: a 16 byte file header, a
//! table of contents with one 12 byte entry per chunk, then the chunks
//! themselves. Image chunks carry a 36 byte header followed by packed ARGB
//! pixels, one `u32` per pixel, row-major from the top-left.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod record;

pub use decoder::decode;
pub use encoder::encode;
pub use error::XcursorError;
pub use record::{ImageMeta, ImageRecord};

/// `"Xcur"` read as a little-endian u32.
pub const MAGIC: u32 = 0x7275_6358;

pub const FILE_HEADER_SIZE: u32 = 16;
pub const TOC_ENTRY_SIZE: u32 = 12;
pub const CHUNK_HEADER_SIZE: u32 = 36;
pub const FILE_VERSION: u32 = 1;

/// Chunk type of a stored cursor image.
pub const TYPE_IMAGE: u32 = 0xFFFD_0002;
/// Chunk type of an animation sequence. Listed in the TOC of animated
/// themes but not decoded; frames are plain image chunks anyway.
pub const TYPE_ANIMATION: u32 = 0xFFFD_0003;
