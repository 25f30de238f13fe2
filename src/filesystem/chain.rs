/// Sector chain traversal
///
/// Each data sector ends with a 3-byte trailer:
/// - byte -3: bits 7-2 file number, bits 1-0 high bits of next sector
/// - byte -2: low 8 bits of next sector
/// - byte -1: number of payload bytes in this sector
///
/// A next sector of 0 ends the chain.

use crate::error::{AtrError, Result};
use crate::filesystem::DirEntry;
use crate::format::constants::SECTOR_TRAILER_SIZE;
use crate::image::SectorReader;
use std::collections::HashSet;
use std::io::{Read, Seek};
use tracing::{trace, warn};

/// Link trailer of a file data sector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorTrailer {
    /// Directory slot of the file owning this sector
    pub file_number: u8,
    /// Next sector in the chain, 0 at the end
    pub next_sector: u16,
    /// Payload bytes at the start of this sector
    pub byte_count: u8,
}

impl SectorTrailer {
    /// Decode the trailer from the last 3 bytes of a raw sector
    pub fn parse(sector: &[u8]) -> Option<Self> {
        if sector.len() < SECTOR_TRAILER_SIZE {
            return None;
        }

        let trailer = &sector[sector.len() - SECTOR_TRAILER_SIZE..];
        Some(Self {
            file_number: trailer[0] >> 2,
            next_sector: (((trailer[0] & 0x03) as u16) << 8) | trailer[1] as u16,
            byte_count: trailer[2],
        })
    }

    /// Whether this is the last sector of the file
    pub fn is_last(&self) -> bool {
        self.next_sector == 0
    }
}

/// Read a file's contents by following its sector chain
///
/// Fails without returning partial data if any sector belongs to another
/// file or the chain revisits a sector.
pub fn read_chain<R: Read + Seek>(reader: &mut SectorReader<R>, entry: &DirEntry) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    let mut visited = HashSet::new();
    let mut sector = entry.starting_sector as u32;

    while sector > 0 {
        if !visited.insert(sector) {
            return Err(AtrError::ChainCycleDetected { sector });
        }

        let raw = reader.read_sector(sector)?;
        let trailer = SectorTrailer::parse(&raw).ok_or_else(|| {
            AtrError::parse(
                sector as u64,
                format!("{} byte sector cannot hold a link trailer", raw.len()),
            )
        })?;

        if trailer.file_number as u16 != entry.slot {
            return Err(AtrError::ChainFileNumberMismatch {
                sector,
                expected: entry.slot,
                found: trailer.file_number,
            });
        }

        let capacity = raw.len() - SECTOR_TRAILER_SIZE;
        let count = trailer.byte_count as usize;
        if count > capacity {
            warn!(sector, count, capacity, "Byte count overruns sector trailer, clamping");
        }
        data.extend_from_slice(&raw[..count.min(capacity)]);

        trace!(
            sector,
            next = trailer.next_sector,
            bytes = trailer.byte_count,
            "Followed file sector"
        );
        sector = trailer.next_sector as u32;
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::SectorGeometry;
    use std::io::Cursor;

    const SIZE: usize = 128;

    /// Build a 16-sector image with the given (sector, file, next, count) links
    fn chained_reader(links: &[(u32, u8, u16, u8)]) -> SectorReader<Cursor<Vec<u8>>> {
        let mut image = vec![0u8; 16 * SIZE];
        for &(sector, file, next, count) in links {
            let start = (sector as usize - 1) * SIZE;
            let raw = &mut image[start..start + SIZE];
            raw[..SIZE - 3].fill(sector as u8);
            raw[SIZE - 3] = (file << 2) | (next >> 8) as u8;
            raw[SIZE - 2] = next as u8;
            raw[SIZE - 1] = count;
        }
        let geometry = SectorGeometry::uniform(SIZE as u16, 0, image.len() as u64);
        SectorReader::new(Cursor::new(image), geometry)
    }

    fn entry(slot: u16, starting_sector: u16) -> DirEntry {
        let mut data = [0u8; 16];
        data[0] = 0x42;
        data[3..5].copy_from_slice(&starting_sector.to_le_bytes());
        data[5..13].copy_from_slice(b"TEST    ");
        DirEntry::parse(&data, slot).unwrap()
    }

    #[test]
    fn test_read_chain_concatenates_payloads() {
        let mut reader = chained_reader(&[(4, 2, 9, 125), (9, 2, 6, 125), (6, 2, 0, 10)]);
        let data = read_chain(&mut reader, &entry(2, 4)).unwrap();

        assert_eq!(data.len(), 260);
        assert!(data[..125].iter().all(|&b| b == 4));
        assert!(data[125..250].iter().all(|&b| b == 9));
        assert!(data[250..].iter().all(|&b| b == 6));
    }

    #[test]
    fn test_read_chain_empty_file() {
        let mut reader = chained_reader(&[]);
        assert!(read_chain(&mut reader, &entry(0, 0)).unwrap().is_empty());
    }

    #[test]
    fn test_read_chain_file_number_mismatch() {
        let mut reader = chained_reader(&[(4, 2, 5, 125), (5, 3, 0, 10)]);
        assert!(matches!(
            read_chain(&mut reader, &entry(2, 4)),
            Err(AtrError::ChainFileNumberMismatch {
                sector: 5,
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn test_read_chain_cycle() {
        let mut reader = chained_reader(&[(4, 1, 5, 125), (5, 1, 4, 125)]);
        assert!(matches!(
            read_chain(&mut reader, &entry(1, 4)),
            Err(AtrError::ChainCycleDetected { sector: 4 })
        ));
    }

    #[test]
    fn test_read_chain_self_link() {
        let mut reader = chained_reader(&[(7, 1, 7, 125)]);
        assert!(matches!(
            read_chain(&mut reader, &entry(1, 7)),
            Err(AtrError::ChainCycleDetected { sector: 7 })
        ));
    }

    #[test]
    fn test_read_chain_next_sector_out_of_range() {
        let mut reader = chained_reader(&[(4, 1, 700, 125)]);
        assert!(matches!(
            read_chain(&mut reader, &entry(1, 4)),
            Err(AtrError::OutOfRange { sector: 700, max: 16 })
        ));
    }

    #[test]
    fn test_read_chain_clamps_oversized_count() {
        let mut reader = chained_reader(&[(3, 0, 0, 200)]);
        let data = read_chain(&mut reader, &entry(0, 3)).unwrap();
        assert_eq!(data.len(), SIZE - 3);
    }

    #[test]
    fn test_parse_trailer() {
        let mut sector = vec![0u8; 128];
        // File 5, next sector 0x1A3, 125 bytes
        sector[125] = (5 << 2) | 0x01;
        sector[126] = 0xA3;
        sector[127] = 125;

        let trailer = SectorTrailer::parse(&sector).unwrap();
        assert_eq!(trailer.file_number, 5);
        assert_eq!(trailer.next_sector, 0x1A3);
        assert_eq!(trailer.byte_count, 125);
        assert!(!trailer.is_last());
    }

    #[test]
    fn test_parse_last_trailer() {
        let mut sector = vec![0u8; 256];
        sector[253] = 63 << 2;
        sector[255] = 17;

        let trailer = SectorTrailer::parse(&sector).unwrap();
        assert_eq!(trailer.file_number, 63);
        assert!(trailer.is_last());
        assert_eq!(trailer.byte_count, 17);
    }

    #[test]
    fn test_parse_short_sector() {
        assert!(SectorTrailer::parse(&[1, 2]).is_none());
    }
}
