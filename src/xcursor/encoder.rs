use byteorder::{LittleEndian, WriteBytesExt};

use super::error::XcursorError;
use super::record::ImageRecord;
use super::{CHUNK_HEADER_SIZE, FILE_HEADER_SIZE, FILE_VERSION, MAGIC, TOC_ENTRY_SIZE, TYPE_IMAGE};

/// Encode records into a complete XCursor file, one image chunk per record,
/// in the order given. Duplicate nominal sizes are kept; that is how
/// animation frames are stored.
///
/// Chunk offsets are derived up front as a running sum over the chunk
/// sizes, in u64. A file whose chunk data would pass the 32-bit offset
/// space fails with [`XcursorError::OffsetOverflow`], never wraps.
pub fn encode(records: &[ImageRecord]) -> Result<Vec<u8>, XcursorError> {
    let data_offset =
        u64::from(FILE_HEADER_SIZE) + u64::from(TOC_ENTRY_SIZE) * records.len() as u64;

    let chunk_sizes: Vec<u64> = records
        .iter()
        .map(|record| {
            u64::from(CHUNK_HEADER_SIZE) + u64::from(record.width) * u64::from(record.height) * 4
        })
        .collect();

    let offsets: Vec<u64> = chunk_sizes
        .iter()
        .scan(data_offset, |position, &size| {
            let start = *position;
            *position += size;
            Some(start)
        })
        .collect();

    let data_end = data_offset + chunk_sizes.iter().sum::<u64>();
    if data_end > u64::from(u32::MAX) {
        return Err(XcursorError::OffsetOverflow { offset: data_end });
    }

    for record in records {
        let expected = u64::from(record.width) * u64::from(record.height);
        if record.pixels.len() as u64 != expected {
            return Err(XcursorError::InconsistentBuffer {
                expected,
                actual: record.pixels.len(),
            });
        }
    }

    let mut out = Vec::with_capacity(data_end as usize);

    out.write_u32::<LittleEndian>(MAGIC)?;
    out.write_u32::<LittleEndian>(FILE_HEADER_SIZE)?;
    out.write_u32::<LittleEndian>(FILE_VERSION)?;
    out.write_u32::<LittleEndian>(records.len() as u32)?;

    for (record, &offset) in records.iter().zip(&offsets) {
        out.write_u32::<LittleEndian>(TYPE_IMAGE)?;
        out.write_u32::<LittleEndian>(record.size)?;
        out.write_u32::<LittleEndian>(offset as u32)?;
    }

    for (record, &chunk_size) in records.iter().zip(&chunk_sizes) {
        out.write_u32::<LittleEndian>(chunk_size as u32)?;
        out.write_u32::<LittleEndian>(TYPE_IMAGE)?;
        out.write_u32::<LittleEndian>(record.size)?;
        out.write_u32::<LittleEndian>(FILE_VERSION)?;
        out.write_u32::<LittleEndian>(record.width)?;
        out.write_u32::<LittleEndian>(record.height)?;
        out.write_u32::<LittleEndian>(record.xhot)?;
        out.write_u32::<LittleEndian>(record.yhot)?;
        out.write_u32::<LittleEndian>(record.delay)?;
        for &pixel in &record.pixels {
            out.write_u32::<LittleEndian>(pixel)?;
        }
    }

    Ok(out)
}
