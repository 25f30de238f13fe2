/// Directory scanning
///
/// The directory occupies sectors 361-368. Entries are read in order until
/// a never-used slot (flag byte 0) is found; deleted or otherwise unused
/// slots are skipped.

use crate::error::Result;
use crate::filesystem::DirEntry;
use crate::format::constants::{DIRECTORY_FIRST_SECTOR, DIRECTORY_LAST_SECTOR, DIR_ENTRY_SIZE};
use crate::image::SectorReader;
use std::io::{Read, Seek};
use tracing::debug;

/// Read the in-use directory entries, in directory order
pub fn read_directory<R: Read + Seek>(reader: &mut SectorReader<R>) -> Result<Vec<DirEntry>> {
    let dir_data = reader.read_sectors(DIRECTORY_FIRST_SECTOR, DIRECTORY_LAST_SECTOR)?;
    Ok(decode_directory(&dir_data))
}

/// Decode directory entries from the raw directory sectors
pub fn decode_directory(dir_data: &[u8]) -> Vec<DirEntry> {
    let mut entries = Vec::new();

    for (slot, chunk) in dir_data.chunks(DIR_ENTRY_SIZE).enumerate() {
        let entry = match DirEntry::parse(chunk, slot as u16) {
            Some(entry) => entry,
            None => break,
        };

        if entry.in_use() {
            entries.push(entry);
        } else if entry.is_end_marker() {
            debug!(slot, "End of directory");
            break;
        }
    }

    debug!(files = entries.len(), "Read directory");
    entries
}
