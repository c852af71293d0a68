//! Library for packing images into icon files and extracting them again.
//!
//! Supports Windows icon (.ico) files and Apple Icon Image (.icns) files,
//! in both cases with PNG-encoded images only.  Each image may carry a
//! short text string, stored in a private `rIPt` chunk of its PNG data.
//!
//! An [`IconPack`](struct.IconPack.html) holds one slot per icon size
//! required by a [`Platform`](enum.Platform.html).  Images loaded from
//! files are placed into the slots of matching size with
//! [`reconcile`](fn.reconcile.html), and any slots still missing can be
//! filled by scaling the largest available image with
//! [`generate_missing`](fn.generate_missing.html).
//!
//! ```no_run
//! use iconpack::{ContainerFormat, ExportOptions, IconPack, LoadOptions,
//!                Platform, ScaleAlgorithm, Selection};
//!
//! # fn main() -> iconpack::Result<()> {
//! let mut pack = IconPack::new(Platform::Windows);
//! let entries = iconpack::load_file("logo.png", &LoadOptions::default())?;
//! iconpack::reconcile(&mut pack, entries)?;
//! iconpack::generate_missing(&mut pack,
//!                            Selection::AllMissing,
//!                            ScaleAlgorithm::Bicubic)?;
//! iconpack::save_file("logo.ico",
//!                     ContainerFormat::Ico,
//!                     pack.slots(),
//!                     &ExportOptions::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! See https://en.wikipedia.org/wiki/ICO_(file_format) and
//! https://en.wikipedia.org/wiki/Apple_Icon_Image_format for more
//! information about the file formats.

#![warn(missing_docs)]

use log::debug;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

pub mod chunk;
mod element;
mod entry;
mod error;
mod family;
mod ico;
mod icontype;
mod image;
mod options;
mod pack;
mod platform;
mod pngio;
mod reconcile;

pub use self::element::IconElement;
pub use self::entry::DecodedEntry;
pub use self::error::{Error, Result};
pub use self::family::{decode_icns, decode_icns_with, encode_icns,
                       IconFamily};
pub use self::ico::{decode_ico, encode_ico, IconDir, IconDirEntry};
pub use self::icontype::{IconType, OSType};
pub use self::image::{Image, PixelFormat, ScaleAlgorithm,
                      MAX_IMAGE_DIMENSION};
pub use self::options::{ExportOptions, LoadOptions};
pub use self::pack::{IconPack, IconSlot};
pub use self::platform::{sizes_for, Platform, MAX_ICON_SIZE, MIN_ICON_SIZE};
pub use self::reconcile::{generate_missing, reconcile, Selection};

/// The kind of file images are loaded from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SourceKind {
    /// A Windows icon file.
    Ico,
    /// An Apple icon file.
    Icns,
    /// A single PNG, BMP, or QOI image.
    RawImage,
}

impl SourceKind {
    /// Determines the kind of file from its extension, if recognized.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<SourceKind> {
        let extension = path.as_ref().extension()?.to_str()?;
        match extension.to_ascii_lowercase().as_str() {
            "ico" => Some(SourceKind::Ico),
            "icns" => Some(SourceKind::Icns),
            "png" | "bmp" | "qoi" => Some(SourceKind::RawImage),
            _ => None,
        }
    }

    /// Determines the kind of file from its first bytes.  Anything that is
    /// neither an ICNS nor an ICO file is assumed to be a raw image.
    pub fn sniff(data: &[u8]) -> SourceKind {
        if data.starts_with(b"icns") {
            SourceKind::Icns
        } else if data.starts_with(b"\0\0\x01\0") {
            SourceKind::Ico
        } else {
            SourceKind::RawImage
        }
    }
}

/// The kind of icon file images are written to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ContainerFormat {
    /// A Windows icon file.
    Ico,
    /// An Apple icon file.
    Icns,
}

impl ContainerFormat {
    /// Determines the format from a file extension, if recognized.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<ContainerFormat> {
        match SourceKind::from_path(path)? {
            SourceKind::Ico => Some(ContainerFormat::Ico),
            SourceKind::Icns => Some(ContainerFormat::Icns),
            SourceKind::RawImage => None,
        }
    }

    /// Returns the usual file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            ContainerFormat::Ico => "ico",
            ContainerFormat::Icns => "icns",
        }
    }
}

/// Decodes the images in an in-memory file of the given kind.  Images that
/// cannot be decoded individually are skipped with a warning; a raw image
/// that is not square yields no entries.
pub fn decode(kind: SourceKind, data: &[u8], options: &LoadOptions)
              -> Result<Vec<DecodedEntry>> {
    match kind {
        SourceKind::Ico => decode_ico(data),
        SourceKind::Icns => decode_icns_with(data, options),
        SourceKind::RawImage => {
            let mut entries = Vec::with_capacity(1);
            entry::keep_entry(DecodedEntry::from_raw_image(data),
                              "image",
                              &mut entries)?;
            Ok(entries)
        }
    }
}

/// Encodes the valid slots in the given container format.
pub fn encode(format: ContainerFormat,
              slots: &[IconSlot],
              options: &ExportOptions)
              -> Result<Vec<u8>> {
    match format {
        ContainerFormat::Ico => encode_ico(slots, options),
        ContainerFormat::Icns => encode_icns(slots, options),
    }
}

/// Reads and decodes an icon or image file.  The kind of file is taken
/// from its extension, or from its contents if the extension is not
/// recognized.
pub fn load_file<P: AsRef<Path>>(path: P, options: &LoadOptions)
                                 -> Result<Vec<DecodedEntry>> {
    let path = path.as_ref();
    let limit = options.max_file_size;
    let size = fs::metadata(path)?.len();
    if size > limit {
        return Err(Error::FileTooLarge { size, limit });
    }
    let data = read_bounded(File::open(path)?, limit)?;
    let kind = SourceKind::from_path(path)
        .unwrap_or_else(|| SourceKind::sniff(&data));
    debug!("loading {} as {:?} ({} bytes)", path.display(), kind, data.len());
    decode(kind, &data, options)
}

/// Reads everything from `reader`, failing once more than `limit` bytes
/// have been seen.
fn read_bounded<R: Read>(reader: R, limit: u64) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    reader.take(limit.saturating_add(1)).read_to_end(&mut data)?;
    let size = data.len() as u64;
    if size > limit {
        return Err(Error::FileTooLarge { size, limit });
    }
    Ok(data)
}

/// Encodes the valid slots and writes them to a file.  The whole file is
/// encoded before anything is written, so nothing is written on error.
pub fn save_file<P: AsRef<Path>>(path: P,
                                 format: ContainerFormat,
                                 slots: &[IconSlot],
                                 options: &ExportOptions)
                                 -> Result<()> {
    let data = encode(format, slots, options)?;
    fs::write(path.as_ref(), &data)?;
    debug!("wrote {} bytes to {}", data.len(), path.as_ref().display());
    Ok(())
}
