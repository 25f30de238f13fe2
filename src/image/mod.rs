/// ATR image container

/// Sector-level reader
pub mod reader;

pub use reader::{read_header, SectorReader};

use crate::error::{AtrError, Result};
use crate::filesystem::{read_chain, read_directory, DirEntry};
use crate::format::{AtrHeader, Density, SectorGeometry};
use std::fmt;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::debug;

/// An opened ATR disk image
///
/// The directory is read once when the image is opened. Reads seek the
/// underlying source, so every accessor that touches sector data takes
/// `&mut self`.
#[derive(Debug)]
pub struct DiskImage<R = File> {
    header: AtrHeader,
    image_size: u64,
    entries: Vec<DirEntry>,
    reader: SectorReader<R>,
}

impl DiskImage<File> {
    /// Open an ATR file from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

impl<R: Read + Seek> DiskImage<R> {
    /// Open an ATR image from any seekable byte source
    pub fn from_reader(mut source: R) -> Result<Self> {
        let (header, image_size) = read_header(&mut source)?;
        let geometry = SectorGeometry::from_header(&header, image_size)?;
        debug!(
            sector_size = geometry.sector_size(),
            sectors = geometry.sector_count(),
            header = header.magic_valid,
            "Resolved geometry"
        );

        let mut reader = SectorReader::new(source, geometry);
        let entries = read_directory(&mut reader)?;

        Ok(Self {
            header,
            image_size,
            entries,
            reader,
        })
    }

    /// Get the header
    pub fn header(&self) -> &AtrHeader {
        &self.header
    }

    /// Get the sector geometry
    pub fn geometry(&self) -> &SectorGeometry {
        self.reader.geometry()
    }

    /// Get the disk density
    pub fn density(&self) -> Density {
        self.header.density()
    }

    /// Total size of the image in bytes, including any header
    pub fn image_size(&self) -> u64 {
        self.image_size
    }

    /// In-use directory entries, in directory order
    pub fn list_files(&self) -> &[DirEntry] {
        &self.entries
    }

    /// Find a directory entry by its exact "NAME.EXT" filename
    pub fn entry(&self, filename: &str) -> Option<&DirEntry> {
        self.entries.iter().find(|e| e.filename() == filename)
    }

    /// Read a file by its exact "NAME.EXT" filename
    pub fn find_file(&mut self, filename: &str) -> Result<Vec<u8>> {
        let entry = self
            .entry(filename)
            .cloned()
            .ok_or_else(|| AtrError::NotFound(filename.to_string()))?;
        self.read_file(&entry)
    }

    /// Read a file's contents by following its sector chain
    pub fn read_file(&mut self, entry: &DirEntry) -> Result<Vec<u8>> {
        read_chain(&mut self.reader, entry)
    }

    /// Read one sector's raw bytes
    pub fn read_sector(&mut self, sector: u32) -> Result<Vec<u8>> {
        self.reader.read_sector(sector)
    }

    /// Read an inclusive range of sectors
    pub fn read_sectors(&mut self, start: u32, end: u32) -> Result<Vec<u8>> {
        self.reader.read_sectors(start, end)
    }

    /// Summary of the header and every in-use file
    pub fn describe(&self) -> String {
        self.to_string()
    }

    /// Give back the underlying source
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

impl<R> fmt::Display for DiskImage<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ATR Disk Image ({}) {} files",
            self.header,
            self.entries.len()
        )?;
        for entry in &self.entries {
            write!(f, "\n{}", entry)?;
        }
        Ok(())
    }
}
