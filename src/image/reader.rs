/// Sector-level access to an ATR byte source

use crate::error::{AtrError, Result};
use crate::format::constants::ATR_HEADER_SIZE;
use crate::format::{AtrHeader, SectorGeometry};
use std::io::{Read, Seek, SeekFrom};
use tracing::debug;

/// Read the header of an image, falling back to the size heuristic for
/// headerless images. Returns the resolved header and total image size.
pub fn read_header<R: Read + Seek>(source: &mut R) -> Result<(AtrHeader, u64)> {
    let image_size = source.seek(SeekFrom::End(0))?;
    source.seek(SeekFrom::Start(0))?;

    let mut header_data = Vec::with_capacity(ATR_HEADER_SIZE);
    source
        .by_ref()
        .take(ATR_HEADER_SIZE as u64)
        .read_to_end(&mut header_data)?;

    let header = match AtrHeader::parse(&header_data) {
        Ok(header) => header,
        Err(AtrError::InvalidHeader(reason)) => {
            debug!(%reason, image_size, "No ATR header, treating image as raw sectors");
            AtrHeader::default()
        }
        Err(e) => return Err(e),
    };

    let header = header.infer_from_size(image_size)?;
    Ok((header, image_size))
}

/// Reads sectors from a byte source using a fixed geometry
#[derive(Debug)]
pub struct SectorReader<R> {
    source: R,
    geometry: SectorGeometry,
}

impl<R: Read + Seek> SectorReader<R> {
    /// Create a reader over a source with the given geometry
    pub fn new(source: R, geometry: SectorGeometry) -> Self {
        Self { source, geometry }
    }

    /// Get the geometry
    pub fn geometry(&self) -> &SectorGeometry {
        &self.geometry
    }

    /// Read one sector's raw bytes
    pub fn read_sector(&mut self, sector: u32) -> Result<Vec<u8>> {
        let location = self.geometry.locate(sector)?;
        self.source.seek(SeekFrom::Start(location.offset))?;

        let mut data = vec![0u8; location.size as usize];
        self.source.read_exact(&mut data)?;
        Ok(data)
    }

    /// Read a contiguous, inclusive range of sectors as one buffer
    pub fn read_sectors(&mut self, start: u32, end: u32) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        for sector in start..=end {
            data.extend_from_slice(&self.read_sector(sector)?);
        }
        Ok(data)
    }

    /// Give back the underlying source
    pub fn into_inner(self) -> R {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn numbered_sectors(count: u32, size: usize) -> Vec<u8> {
        (1..=count)
            .flat_map(|n| vec![n as u8; size])
            .collect()
    }

    #[test]
    fn test_read_header_headerless_single_density() {
        let mut source = Cursor::new(vec![0u8; 92_160]);
        let (header, size) = read_header(&mut source).unwrap();
        assert_eq!(size, 92_160);
        assert!(!header.magic_valid);
        assert_eq!(header.sector_size, 128);
        assert_eq!(header.header_offset, 0);
    }

    #[test]
    fn test_read_header_headerless_unknown_size() {
        let mut source = Cursor::new(vec![0u8; 4096]);
        assert!(matches!(
            read_header(&mut source),
            Err(AtrError::UndeterminedGeometry { size: 4096 })
        ));
    }

    #[test]
    fn test_read_header_short_source() {
        let mut source = Cursor::new(vec![0x96u8, 0x02, 0x00]);
        assert!(matches!(
            read_header(&mut source),
            Err(AtrError::UndeterminedGeometry { size: 3 })
        ));
    }

    #[test]
    fn test_read_sector() {
        let geometry = SectorGeometry::uniform(128, 0, 4 * 128);
        let mut reader = SectorReader::new(Cursor::new(numbered_sectors(4, 128)), geometry);

        let data = reader.read_sector(3).unwrap();
        assert_eq!(data.len(), 128);
        assert!(data.iter().all(|&b| b == 3));
    }

    #[test]
    fn test_read_sectors_concatenates() {
        let geometry = SectorGeometry::uniform(128, 0, 4 * 128);
        let mut reader = SectorReader::new(Cursor::new(numbered_sectors(4, 128)), geometry);

        let data = reader.read_sectors(2, 3).unwrap();
        assert_eq!(data.len(), 256);
        assert_eq!(data[0], 2);
        assert_eq!(data[255], 3);
    }

    #[test]
    fn test_read_sector_truncated_source() {
        // Geometry claims more data than the source holds
        let geometry = SectorGeometry::uniform(128, 0, 8 * 128);
        let mut reader = SectorReader::new(Cursor::new(numbered_sectors(4, 128)), geometry);
        assert!(matches!(reader.read_sector(6), Err(AtrError::Io(_))));
    }
}
