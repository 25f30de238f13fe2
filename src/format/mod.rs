/// ATR format constants, header and sector geometry

/// Format constants
pub mod constants;
/// Sector geometry and addressing
pub mod geometry;
/// ATR container header
pub mod header;

pub use constants::*;
pub use geometry::{SectorGeometry, SectorLocation};
pub use header::AtrHeader;

/// Disk density
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Density {
    /// 128 byte sectors
    Single,
    /// 256 byte sectors
    Double,
    /// Any other sector size declared by a header
    Other(u16),
}

impl Density {
    /// Get the density for a sector size
    pub fn from_sector_size(sector_size: u16) -> Self {
        match sector_size {
            SINGLE_DENSITY_SECTOR_SIZE => Density::Single,
            DOUBLE_DENSITY_SECTOR_SIZE => Density::Double,
            other => Density::Other(other),
        }
    }

    /// Guess the density of a headerless image from its total size
    pub fn from_image_size(size: u64) -> Option<Self> {
        match size {
            SINGLE_DENSITY_IMAGE_SIZE => Some(Density::Single),
            DOUBLE_DENSITY_IMAGE_SIZE => Some(Density::Double),
            _ => None,
        }
    }

    /// Get the sector size in bytes
    pub fn sector_size(&self) -> u16 {
        match self {
            Density::Single => SINGLE_DENSITY_SECTOR_SIZE,
            Density::Double => DOUBLE_DENSITY_SECTOR_SIZE,
            Density::Other(size) => *size,
        }
    }

    /// Get a human-readable name for this density
    pub fn name(&self) -> &'static str {
        match self {
            Density::Single => "Single density",
            Density::Double => "Double density",
            Density::Other(_) => "Custom",
        }
    }
}
