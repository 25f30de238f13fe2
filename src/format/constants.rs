/// ATR format magic values and constants

/// ATR header signature (little-endian at offset 0)
pub const ATR_MAGIC: u16 = 0x0296;

/// Size of the ATR container header
pub const ATR_HEADER_SIZE: usize = 16;

/// Size of a headerless single density image (720 x 128 bytes)
pub const SINGLE_DENSITY_IMAGE_SIZE: u64 = 92_160;

/// Size of a headerless double density image (720 x 256 bytes)
pub const DOUBLE_DENSITY_IMAGE_SIZE: u64 = 184_320;

/// Sector size of a single density disk
pub const SINGLE_DENSITY_SECTOR_SIZE: u16 = 128;

/// Sector size of a double density disk
pub const DOUBLE_DENSITY_SECTOR_SIZE: u16 = 256;

/// Header size fields count 16-byte paragraphs
pub const PARAGRAPH_SIZE: u32 = 16;

/// First directory sector
pub const DIRECTORY_FIRST_SECTOR: u32 = 361;

/// Last directory sector
pub const DIRECTORY_LAST_SECTOR: u32 = 368;

/// Size of each directory entry
pub const DIR_ENTRY_SIZE: usize = 16;

/// Length of the filename field in a directory entry
pub const DIR_NAME_LENGTH: usize = 8;

/// Length of the extension field in a directory entry
pub const DIR_EXT_LENGTH: usize = 3;

/// Size of the link trailer at the end of each file data sector
pub const SECTOR_TRAILER_SIZE: usize = 3;

/// Offset of low size paragraphs in the header
pub const HEADER_SIZE_LOW_OFFSET: usize = 2;

/// Offset of sector size in the header
pub const HEADER_SECTOR_SIZE_OFFSET: usize = 4;

/// Offset of high size byte in the header
pub const HEADER_SIZE_HIGH_OFFSET: usize = 6;

/// Offset of CRC in the header
pub const HEADER_CRC_OFFSET: usize = 7;

/// Offset of the unused field in the header
pub const HEADER_UNUSED_OFFSET: usize = 11;

/// Offset of flags in the header
pub const HEADER_FLAGS_OFFSET: usize = 15;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_sizes_hold_720_sectors() {
        assert_eq!(
            SINGLE_DENSITY_IMAGE_SIZE,
            720 * SINGLE_DENSITY_SECTOR_SIZE as u64
        );
        assert_eq!(
            DOUBLE_DENSITY_IMAGE_SIZE,
            720 * DOUBLE_DENSITY_SECTOR_SIZE as u64
        );
    }

    #[test]
    fn test_directory_spans_eight_sectors() {
        assert_eq!(DIRECTORY_LAST_SECTOR - DIRECTORY_FIRST_SECTOR + 1, 8);
        assert_eq!(DIR_NAME_LENGTH + DIR_EXT_LENGTH + 5, DIR_ENTRY_SIZE);
    }
}
