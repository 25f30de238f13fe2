/// ATR container header
///
/// Layout (16 bytes, little-endian):
/// - 0-1: magic (0x0296)
/// - 2-3: image size in 16-byte paragraphs, low word
/// - 4-5: sector size
/// - 6: image size in paragraphs, high byte
/// - 7-10: CRC
/// - 11-14: unused
/// - 15: flags

use crate::error::{AtrError, Result};
use crate::format::constants::*;
use crate::format::Density;
use std::fmt;

/// Parsed (or synthesized) ATR header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AtrHeader {
    /// Whether a header with a valid signature was found
    pub magic_valid: bool,
    /// Size of the sector data in bytes
    pub size_in_bytes: u32,
    /// Bytes per sector
    pub sector_size: u16,
    /// Image CRC (informational)
    pub crc: u32,
    /// Unused header field
    pub unused: u32,
    /// Header flags (informational)
    pub flags: u8,
    /// Byte offset where sector data begins
    pub header_offset: u32,
}

impl AtrHeader {
    /// Parse a 16-byte ATR header
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() != ATR_HEADER_SIZE {
            return Err(AtrError::invalid_header(format!(
                "expected {} bytes, got {}",
                ATR_HEADER_SIZE,
                data.len()
            )));
        }

        let magic = u16::from_le_bytes([data[0], data[1]]);
        if magic != ATR_MAGIC {
            return Err(AtrError::invalid_header(format!(
                "bad signature 0x{:04X}",
                magic
            )));
        }

        let size_low = u16::from_le_bytes([
            data[HEADER_SIZE_LOW_OFFSET],
            data[HEADER_SIZE_LOW_OFFSET + 1],
        ]) as u32;
        let size_high = data[HEADER_SIZE_HIGH_OFFSET] as u32;
        let sector_size = u16::from_le_bytes([
            data[HEADER_SECTOR_SIZE_OFFSET],
            data[HEADER_SECTOR_SIZE_OFFSET + 1],
        ]);
        let crc = u32::from_le_bytes([
            data[HEADER_CRC_OFFSET],
            data[HEADER_CRC_OFFSET + 1],
            data[HEADER_CRC_OFFSET + 2],
            data[HEADER_CRC_OFFSET + 3],
        ]);
        let unused = u32::from_le_bytes([
            data[HEADER_UNUSED_OFFSET],
            data[HEADER_UNUSED_OFFSET + 1],
            data[HEADER_UNUSED_OFFSET + 2],
            data[HEADER_UNUSED_OFFSET + 3],
        ]);

        Ok(Self {
            magic_valid: true,
            size_in_bytes: (size_high * 65536 + size_low) * PARAGRAPH_SIZE,
            sector_size,
            crc,
            unused,
            flags: data[HEADER_FLAGS_OFFSET],
            header_offset: ATR_HEADER_SIZE as u32,
        })
    }

    /// Fill in the geometry of a header that declares no size, using the
    /// total image size. Only the two standard 720-sector sizes are known.
    pub fn infer_from_size(self, image_size: u64) -> Result<Self> {
        if self.size_in_bytes != 0 {
            return Ok(self);
        }

        let density = Density::from_image_size(image_size)
            .ok_or(AtrError::UndeterminedGeometry { size: image_size })?;

        Ok(Self {
            size_in_bytes: image_size as u32,
            sector_size: density.sector_size(),
            ..self
        })
    }

    /// Get the disk density
    pub fn density(&self) -> Density {
        Density::from_sector_size(self.sector_size)
    }
}

impl fmt::Display for AtrHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "size={}, sector size={}, crc={} flags={} unused={}",
            self.size_in_bytes, self.sector_size, self.crc, self.flags, self.unused
        )
    }
}
