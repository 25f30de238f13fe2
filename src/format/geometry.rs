/// Sector geometry and addressing
///
/// Sectors are numbered from 1. A disk may start with an initial region of
/// sectors that use a different size from the rest of the disk; images
/// read from a header or size heuristic are uniform unless an initial
/// region is configured with [`SectorGeometry::with_initial_region`].

use crate::error::{AtrError, Result};
use crate::format::header::AtrHeader;

/// Byte position and size of one sector within the image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorLocation {
    /// Byte offset from the start of the image
    pub offset: u64,
    /// Sector size in bytes
    pub size: u16,
}

/// Sector layout of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorGeometry {
    sector_size: u16,
    initial_sectors: u32,
    initial_sector_size: u16,
    data_offset: u64,
    data_size: u64,
}

impl SectorGeometry {
    /// Create a geometry where every sector has the same size
    pub fn uniform(sector_size: u16, data_offset: u64, data_size: u64) -> Self {
        Self {
            sector_size,
            initial_sectors: 0,
            initial_sector_size: sector_size,
            data_offset,
            data_size,
        }
    }

    /// Build the geometry described by a resolved header
    pub fn from_header(header: &AtrHeader, image_size: u64) -> Result<Self> {
        if header.sector_size == 0 {
            return Err(AtrError::UndeterminedGeometry { size: image_size });
        }

        Ok(Self::uniform(
            header.sector_size,
            header.header_offset as u64,
            header.size_in_bytes as u64,
        ))
    }

    /// Give the first `count` sectors a different size
    pub fn with_initial_region(mut self, count: u32, sector_size: u16) -> Self {
        self.initial_sectors = count;
        self.initial_sector_size = sector_size;
        self
    }

    /// Bulk sector size in bytes
    pub fn sector_size(&self) -> u16 {
        self.sector_size
    }

    /// Number of sectors in the initial region
    pub fn initial_sectors(&self) -> u32 {
        self.initial_sectors
    }

    /// Sector size of the initial region
    pub fn initial_sector_size(&self) -> u16 {
        self.initial_sector_size
    }

    /// Byte offset where sector data begins
    pub fn data_offset(&self) -> u64 {
        self.data_offset
    }

    /// Total number of sectors in the image
    pub fn sector_count(&self) -> u32 {
        if self.sector_size == 0 {
            return 0;
        }
        let initial_bytes = self.initial_region_bytes();
        if self.data_size <= initial_bytes {
            // Partial initial region: count only whole sectors
            return match self.initial_sector_size {
                0 => 0,
                size => (self.data_size / size as u64) as u32,
            };
        }
        let bulk = (self.data_size - initial_bytes) / self.sector_size as u64;
        self.initial_sectors.saturating_add(bulk.min(u32::MAX as u64) as u32)
    }

    fn initial_region_bytes(&self) -> u64 {
        self.initial_sectors as u64 * self.initial_sector_size as u64
    }

    /// Locate a sector by its 1-based number
    pub fn locate(&self, sector: u32) -> Result<SectorLocation> {
        let max = self.sector_count();
        if sector == 0 || sector > max {
            return Err(AtrError::OutOfRange { sector, max });
        }

        let index = (sector - 1) as u64;
        let location = if sector <= self.initial_sectors {
            SectorLocation {
                offset: index * self.initial_sector_size as u64,
                size: self.initial_sector_size,
            }
        } else {
            SectorLocation {
                offset: self.initial_region_bytes()
                    + (index - self.initial_sectors as u64) * self.sector_size as u64,
                size: self.sector_size,
            }
        };

        Ok(SectorLocation {
            offset: location.offset + self.data_offset,
            ..location
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_sector_at_data_offset() {
        let geometry = SectorGeometry::uniform(128, 16, 92_160);
        let loc = geometry.locate(1).unwrap();
        assert_eq!(loc.offset, 16);
        assert_eq!(loc.size, 128);
    }

    #[test]
    fn test_directory_sector_offset() {
        let geometry = SectorGeometry::uniform(128, 0, 92_160);
        assert_eq!(geometry.locate(361).unwrap().offset, 360 * 128);

        let geometry = SectorGeometry::uniform(256, 16, 184_320);
        assert_eq!(geometry.locate(361).unwrap().offset, 360 * 256 + 16);
    }

    #[test]
    fn test_sector_count() {
        assert_eq!(SectorGeometry::uniform(128, 16, 92_160).sector_count(), 720);
        assert_eq!(SectorGeometry::uniform(256, 0, 184_320).sector_count(), 720);
        assert_eq!(SectorGeometry::uniform(0, 0, 184_320).sector_count(), 0);
    }

    #[test]
    fn test_sector_zero_out_of_range() {
        let geometry = SectorGeometry::uniform(128, 0, 92_160);
        assert!(matches!(
            geometry.locate(0),
            Err(AtrError::OutOfRange { sector: 0, max: 720 })
        ));
    }

    #[test]
    fn test_sector_past_end_out_of_range() {
        let geometry = SectorGeometry::uniform(128, 0, 92_160);
        assert!(geometry.locate(720).is_ok());
        assert!(matches!(
            geometry.locate(721),
            Err(AtrError::OutOfRange { sector: 721, .. })
        ));
    }

    #[test]
    fn test_initial_region() {
        // Double density disk with three 128-byte boot sectors
        let geometry = SectorGeometry::uniform(256, 16, 3 * 128 + 717 * 256)
            .with_initial_region(3, 128);

        assert_eq!(geometry.sector_count(), 720);
        assert_eq!(geometry.locate(1).unwrap(), SectorLocation { offset: 16, size: 128 });
        assert_eq!(geometry.locate(3).unwrap(), SectorLocation { offset: 16 + 256, size: 128 });
        assert_eq!(geometry.locate(4).unwrap(), SectorLocation { offset: 16 + 384, size: 256 });
        assert_eq!(geometry.locate(5).unwrap().offset, 16 + 384 + 256);
    }

    #[test]
    fn test_from_header_without_sector_size() {
        let header = AtrHeader::default();
        assert!(matches!(
            SectorGeometry::from_header(&header, 5000),
            Err(AtrError::UndeterminedGeometry { size: 5000 })
        ));
    }

    proptest! {
        #[test]
        fn prop_locate_strides_by_sector_size(
            sector_size in prop::sample::select(vec![128u16, 256]),
            header in prop::bool::ANY,
            sector in 1u32..720,
        ) {
            let offset = if header { 16 } else { 0 };
            let geometry = SectorGeometry::uniform(sector_size, offset, 720 * sector_size as u64);
            let here = geometry.locate(sector).unwrap();
            let next = geometry.locate(sector + 1).unwrap();
            prop_assert_eq!(next.offset - here.offset, sector_size as u64);
            prop_assert_eq!(here.offset, offset + (sector as u64 - 1) * sector_size as u64);
        }
    }
}
