use std::io;

/// Failures from XCursor decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum XcursorError {
    #[error("invalid XCursor magic: 0x{0:08x}")]
    InvalidMagic(u32),

    #[error("unexpected end of cursor data")]
    TruncatedData,

    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("pixel buffer holds {actual} pixels, expected {expected}")]
    InconsistentBuffer { expected: u64, actual: usize },

    #[error("metadata entry {index} is missing its png file reference")]
    MissingRasterReference { index: usize },

    #[error("chunk data ends at byte {offset}, beyond the 32-bit offset range")]
    OffsetOverflow { offset: u64 },
}

impl From<io::Error> for XcursorError {
    // The codec only reads and writes in-memory buffers, so the one
    // reachable io failure is an unexpected EOF.
    fn from(_: io::Error) -> Self {
        XcursorError::TruncatedData
    }
}
