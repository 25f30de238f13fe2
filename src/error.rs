use thiserror::Error;

/// Result type alias for ATR operations
pub type Result<T> = std::result::Result<T, AtrError>;

/// Errors that can occur when working with ATR files
#[derive(Debug, Error)]
pub enum AtrError {
    /// I/O error occurred while reading the image
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed 16-byte container header
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Sector size could not be determined from the header or image size
    #[error("Cannot determine sector geometry for {size} byte image")]
    UndeterminedGeometry {
        /// Total image size in bytes
        size: u64,
    },

    /// Sector number outside the image
    #[error("Sector {sector} out of range (1-{max})")]
    OutOfRange {
        /// Requested sector number
        sector: u32,
        /// Highest sector number in the image
        max: u32,
    },

    /// A sector in a file chain belongs to another file
    #[error("Sector {sector} belongs to file {found}, expected file {expected}")]
    ChainFileNumberMismatch {
        /// Sector carrying the wrong file number
        sector: u32,
        /// Directory slot of the file being read
        expected: u16,
        /// File number found in the sector trailer
        found: u8,
    },

    /// A file chain visits the same sector twice
    #[error("Sector chain loops back to sector {sector}")]
    ChainCycleDetected {
        /// Sector that was reached a second time
        sector: u32,
    },

    /// Parse error at specific offset
    #[error("Parse error at offset {offset}: {message}")]
    ParseError {
        /// Byte offset where error occurred
        offset: u64,
        /// Error message
        message: String,
    },

    /// File not found in the directory
    #[error("File not found: {0}")]
    NotFound(String),
}

impl AtrError {
    /// Create a parse error with context
    pub fn parse<S: Into<String>>(offset: u64, message: S) -> Self {
        AtrError::ParseError {
            offset,
            message: message.into(),
        }
    }

    /// Create an invalid header error
    pub fn invalid_header<S: Into<String>>(message: S) -> Self {
        AtrError::InvalidHeader(message.into())
    }
}
