/*!
# atrmanager

A Rust library for reading ATR disk image files with Atari DOS 2 / MyDOS
filesystem support.

## Features

- Read ATR images with a 16-byte header, or headerless 720-sector dumps
- Sector addressing with 128 and 256 byte sectors
- DOS 2 / MyDOS directory listing
- File extraction by following sector link chains
- Idiomatic Rust API with comprehensive error handling

## Quick Start

```rust,no_run
use atrmanager::DiskImage;

// Open an existing ATR file
let mut image = DiskImage::open("disk.atr")?;
println!("{}", image.describe());

// List files
for entry in image.list_files() {
    println!("{}: {} sectors", entry.filename(), entry.sector_count);
}

// Read a file
let contents = image.find_file("README.TXT")?;

// Read a raw sector
let boot = image.read_sector(1)?;
# Ok::<(), atrmanager::AtrError>(())
```

## Modules

- `format`: ATR header, constants and sector geometry
- `image`: The disk image container and sector reader
- `filesystem`: Directory entries and file sector chains
- `error`: Error types and Result alias
*/

#![warn(missing_docs)]

/// Error types and Result alias
pub mod error;
/// Directory entries and file sector chains
pub mod filesystem;
/// ATR header, constants and sector geometry
pub mod format;
/// Disk image container and sector reader
pub mod image;

// Re-export common types
pub use error::{AtrError, Result};
pub use filesystem::{DirEntry, DirFlags, SectorTrailer};
pub use format::{AtrHeader, Density, SectorGeometry, SectorLocation};
pub use image::{DiskImage, SectorReader};
