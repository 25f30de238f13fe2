/// Directory entry decoding
///
/// Each entry is 16 bytes:
/// - 0: flags
/// - 1-2: sector count (little-endian)
/// - 3-4: starting sector (little-endian)
/// - 5-12: filename, space padded
/// - 13-15: extension, space padded

use crate::filesystem::DirFlags;
use crate::format::constants::{DIR_ENTRY_SIZE, DIR_EXT_LENGTH, DIR_NAME_LENGTH};
use std::fmt;

const NAME_OFFSET: usize = 5;
const EXT_OFFSET: usize = NAME_OFFSET + DIR_NAME_LENGTH;

/// A decoded directory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Directory slot, also the file number stored in each data sector
    pub slot: u16,
    /// Raw flag byte
    pub flag: u8,
    /// Decoded flags
    pub flags: DirFlags,
    /// Number of sectors used by the file
    pub sector_count: u16,
    /// First sector of the file
    pub starting_sector: u16,
    /// Filename without padding
    pub name: String,
    /// Extension without padding
    pub ext: String,
}

impl DirEntry {
    /// Parse a directory entry from 16 bytes
    pub fn parse(data: &[u8], slot: u16) -> Option<Self> {
        if data.len() < DIR_ENTRY_SIZE {
            return None;
        }

        let flag = data[0];

        Some(Self {
            slot,
            flag,
            flags: DirFlags::from_byte(flag),
            sector_count: u16::from_le_bytes([data[1], data[2]]),
            starting_sector: u16::from_le_bytes([data[3], data[4]]),
            name: padded_field(&data[NAME_OFFSET..EXT_OFFSET]),
            ext: padded_field(&data[EXT_OFFSET..EXT_OFFSET + DIR_EXT_LENGTH]),
        })
    }

    /// Get the full filename, e.g. "HELLO.TXT"
    pub fn filename(&self) -> String {
        if self.ext.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.name, self.ext)
        }
    }

    /// Whether this slot was never allocated, marking the end of the directory
    pub fn is_end_marker(&self) -> bool {
        self.flag == 0
    }

    /// Whether the entry describes a live file
    pub fn in_use(&self) -> bool {
        self.flags.in_use
    }
}

fn padded_field(data: &[u8]) -> String {
    String::from_utf8_lossy(data).trim_end().to_string()
}

impl fmt::Display for DirEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let locked = if self.flags.locked { "*" } else { "" };
        write!(
            f,
            "File #{:<2}: {:1}{:<8}{:<3}  {:03}",
            self.slot, locked, self.name, self.ext, self.sector_count
        )?;
        if self.flags.mydos {
            write!(f, " (mydos)")?;
        }
        Ok(())
    }
}
