use std::io;

use thiserror::Error;

use super::chunk::ChunkType;
use super::icontype::OSType;

/// Errors produced while decoding, encoding, or managing icon packs.
#[derive(Debug, Error)]
pub enum Error {
    /// The data is not a well-formed PNG stream (bad signature, broken
    /// chunk structure, or undecodable image data).
    #[error("malformed PNG data: {0}")]
    MalformedPng(String),

    /// The data does not start with the `icns` magic literal.
    #[error("not an icns file (wrong magic literal)")]
    BadMagic,

    /// The file declares more data than it actually contains.
    #[error("file is truncated (needed {needed} bytes, but only {available} available)")]
    TruncatedFile {
        /// Number of bytes the file claims to contain.
        needed: u64,
        /// Number of bytes actually present.
        available: u64,
    },

    /// The ICO header declares a resource type other than icon (1).
    #[error("unsupported ICO image type ({0}, but must be 1)")]
    UnsupportedImageType(u16),

    /// A platform name or number did not match any known template.
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),

    /// A slot index was outside the pack.
    #[error("slot index {index} is out of range (pack has {len} slots)")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of slots in the pack.
        len: usize,
    },

    /// There are no valid slots that could be written.
    #[error("nothing to export (no valid icon images)")]
    NothingToExport,

    /// Generation was requested but the pack holds no valid image to scale.
    #[error("no valid icon image available to generate from")]
    NoSourceAvailable,

    /// An image was not square.
    #[error("image is not square ({width}x{height})")]
    UnsquareImage {
        /// Image width, in pixels.
        width: u32,
        /// Image height, in pixels.
        height: u32,
    },

    /// A square image did not match the size of the slot it was assigned to.
    #[error("image is {actual}x{actual}, but slot requires {expected}x{expected}")]
    SizeMismatch {
        /// The slot size.
        expected: u32,
        /// The image size.
        actual: u32,
    },

    /// No ICNS OSType is defined for an icon of this size.
    #[error("no icns icon type has dimensions {0}x{0}")]
    UnmappedIcnsSize(u32),

    /// An ICNS element declared a length shorter than its own header.
    #[error("invalid element length ({length}) for '{ostype}' element")]
    InvalidElementLength {
        /// The element's OSType.
        ostype: OSType,
        /// The declared element length.
        length: u32,
    },

    /// A critical chunk type was passed where an ancillary one is required.
    #[error("'{0}' is a critical chunk type")]
    CriticalChunk(ChunkType),

    /// A custom size list is empty, has duplicates, or is out of range.
    #[error("invalid size template: {0}")]
    InvalidTemplate(String),

    /// The input is not in a format the image codec can decode.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// An input file exceeds the configured size limit.
    #[error("file is too large ({size} bytes, but limit is {limit})")]
    FileTooLarge {
        /// Size of the file, in bytes.
        size: u64,
        /// Configured limit, in bytes.
        limit: u64,
    },

    /// The PNG encoder failed.
    #[error("PNG encoding failed: {0}")]
    Encoding(String),

    /// An underlying I/O operation failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns true if this error only concerns a single entry of a
    /// container, so decoding of the remaining entries may continue.
    pub fn is_entry_local(&self) -> bool {
        matches!(
            self,
            Error::MalformedPng(_)
                | Error::UnsquareImage { .. }
                | Error::UnsupportedFormat(_)
        )
    }
}
