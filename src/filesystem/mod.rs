/// Atari DOS 2 / MyDOS filesystem structures

/// Sector chain traversal
pub mod chain;
/// Directory entry decoding
pub mod dirent;
/// Directory scanning
pub mod directory;

pub use chain::{read_chain, SectorTrailer};
pub use directory::read_directory;
pub use dirent::DirEntry;

use std::fmt;

/// Directory entry flag bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirFlags {
    /// File is open for output (0x01)
    pub opened_for_output: bool,
    /// Created by DOS 2 (0x02)
    pub dos2: bool,
    /// MyDOS file (0x04)
    pub mydos: bool,
    /// Subdirectory (0x10)
    pub directory: bool,
    /// Locked (0x20)
    pub locked: bool,
    /// Entry in use (0x40)
    pub in_use: bool,
    /// Deleted (0x80)
    pub deleted: bool,
}

impl DirFlags {
    /// Opened for output bit
    pub const OPENED_FOR_OUTPUT: u8 = 0x01;
    /// DOS 2 bit
    pub const DOS2: u8 = 0x02;
    /// MyDOS bit
    pub const MYDOS: u8 = 0x04;
    /// Subdirectory bit
    pub const DIRECTORY: u8 = 0x10;
    /// Locked bit
    pub const LOCKED: u8 = 0x20;
    /// In use bit
    pub const IN_USE: u8 = 0x40;
    /// Deleted bit
    pub const DELETED: u8 = 0x80;

    /// Decode flags from the raw directory byte
    pub fn from_byte(flag: u8) -> Self {
        Self {
            opened_for_output: (flag & Self::OPENED_FOR_OUTPUT) != 0,
            dos2: (flag & Self::DOS2) != 0,
            mydos: (flag & Self::MYDOS) != 0,
            directory: (flag & Self::DIRECTORY) != 0,
            locked: (flag & Self::LOCKED) != 0,
            in_use: (flag & Self::IN_USE) != 0,
            deleted: (flag & Self::DELETED) != 0,
        }
    }

    /// Encode the flags back to a directory byte
    pub fn bits(&self) -> u8 {
        let mut flag = 0;
        if self.opened_for_output {
            flag |= Self::OPENED_FOR_OUTPUT;
        }
        if self.dos2 {
            flag |= Self::DOS2;
        }
        if self.mydos {
            flag |= Self::MYDOS;
        }
        if self.directory {
            flag |= Self::DIRECTORY;
        }
        if self.locked {
            flag |= Self::LOCKED;
        }
        if self.in_use {
            flag |= Self::IN_USE;
        }
        if self.deleted {
            flag |= Self::DELETED;
        }
        flag
    }
}

impl From<u8> for DirFlags {
    fn from(flag: u8) -> Self {
        Self::from_byte(flag)
    }
}

impl fmt::Display for DirFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.opened_for_output {
            flags.push("OUT");
        }
        if self.dos2 {
            flags.push("DOS2");
        }
        if self.mydos {
            flags.push("MYDOS");
        }
        if self.directory {
            flags.push("DIR");
        }
        if self.locked {
            flags.push("LOCKED");
        }
        if self.in_use {
            flags.push("USED");
        }
        if self.deleted {
            flags.push("DELETED");
        }
        if flags.is_empty() {
            write!(f, "-")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}
