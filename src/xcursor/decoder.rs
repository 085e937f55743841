use byteorder::{LittleEndian, ReadBytesExt};
use std::io::Cursor;

use super::error::XcursorError;
use super::record::ImageRecord;
use super::{FILE_HEADER_SIZE, MAGIC, TOC_ENTRY_SIZE, TYPE_IMAGE};

/// Largest accepted width * height product, enough for a 4096x4096 cursor.
const MAX_PIXELS: u64 = 4096 * 4096;

/// Decode every image chunk of an XCursor buffer, in table-of-contents
/// order. Entries of other chunk types (animation sequences, comments,
/// unknown extensions) are skipped without being an error.
///
/// The declared header size, file version, chunk size and chunk version are
/// read but never checked; real-world themes get them wrong. The magic, the
/// pixel dimensions and the physical buffer length are enforced.
pub fn decode(data: &[u8]) -> Result<Vec<ImageRecord>, XcursorError> {
    let mut cursor = Cursor::new(data);

    let magic = cursor.read_u32::<LittleEndian>()?;
    if magic != MAGIC {
        return Err(XcursorError::InvalidMagic(magic));
    }
    let _header_size = cursor.read_u32::<LittleEndian>()?;
    let _version = cursor.read_u32::<LittleEndian>()?;
    let ntoc = cursor.read_u32::<LittleEndian>()?;

    // The whole table must physically fit before anything is allocated
    // for it; ntoc comes straight from the file.
    let toc_end = u64::from(FILE_HEADER_SIZE) + u64::from(ntoc) * u64::from(TOC_ENTRY_SIZE);
    if toc_end > data.len() as u64 {
        return Err(XcursorError::TruncatedData);
    }

    let mut positions = Vec::with_capacity(ntoc as usize);
    for _ in 0..ntoc {
        let chunk_type = cursor.read_u32::<LittleEndian>()?;
        let _subtype = cursor.read_u32::<LittleEndian>()?;
        let position = cursor.read_u32::<LittleEndian>()?;
        if chunk_type == TYPE_IMAGE {
            positions.push(position);
        }
    }

    let mut records = Vec::with_capacity(positions.len());
    for position in positions {
        records.push(read_image(data, position)?);
    }
    Ok(records)
}

/// Read one image chunk at the given absolute offset.
fn read_image(data: &[u8], position: u32) -> Result<ImageRecord, XcursorError> {
    let mut cursor = Cursor::new(data);
    cursor.set_position(u64::from(position));

    let _chunk_size = cursor.read_u32::<LittleEndian>()?;
    let _chunk_type = cursor.read_u32::<LittleEndian>()?;
    let size = cursor.read_u32::<LittleEndian>()?;
    let _chunk_version = cursor.read_u32::<LittleEndian>()?;
    let width = cursor.read_u32::<LittleEndian>()?;
    let height = cursor.read_u32::<LittleEndian>()?;
    let xhot = cursor.read_u32::<LittleEndian>()?;
    let yhot = cursor.read_u32::<LittleEndian>()?;
    let delay = cursor.read_u32::<LittleEndian>()?;

    let pixel_count = u64::from(width) * u64::from(height);
    if pixel_count == 0 || pixel_count > MAX_PIXELS {
        return Err(XcursorError::InvalidDimensions { width, height });
    }

    // Check the remaining length before sizing the buffer from it.
    if cursor.position() + pixel_count * 4 > data.len() as u64 {
        return Err(XcursorError::TruncatedData);
    }

    let mut pixels = vec![0u32; pixel_count as usize];
    cursor.read_u32_into::<LittleEndian>(&mut pixels)?;

    Ok(ImageRecord {
        size,
        width,
        height,
        xhot,
        yhot,
        delay,
        pixels,
    })
}
