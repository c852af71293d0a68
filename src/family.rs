use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use log::{debug, warn};
use std::io::{Cursor, Read, Write};

use super::element::IconElement;
use super::entry::{self, DecodedEntry};
use super::error::{Error, Result};
use super::icontype::IconType;
use super::options::{ExportOptions, LoadOptions};
use super::pack::IconSlot;

/// The first four bytes of an ICNS file:
const ICNS_MAGIC_LITERAL: &[u8; 4] = b"icns";

/// The length of an icon family header, in bytes:
const ICON_FAMILY_HEADER_LENGTH: u32 = 8;

/// A set of icons stored in a single ICNS file.
pub struct IconFamily {
    /// The icon elements stored in the ICNS file.
    pub elements: Vec<IconElement>,
}

impl IconFamily {
    /// Creates a new, empty icon family.
    pub fn new() -> IconFamily {
        IconFamily { elements: Vec::new() }
    }

    /// Returns true if the icon family contains no icons nor any other
    /// elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Encodes a square image as a PNG element, using the canonical icon
    /// type for its size.  Returns an error if there is no such type.
    pub fn add_icon(&mut self, image_data: Vec<u8>, size: u32) -> Result<()> {
        let icon_type = IconType::from_pixel_size(size)
            .ok_or(Error::UnmappedIcnsSize(size))?;
        self.elements.push(IconElement::new(icon_type.ostype(), image_data));
        Ok(())
    }

    /// Reads an icon family from an ICNS file, reading at most
    /// `max_elements` elements.
    pub fn read<R: Read>(mut reader: R, max_elements: usize)
                         -> Result<IconFamily> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic).map_err(|_| Error::BadMagic)?;
        if magic != *ICNS_MAGIC_LITERAL {
            return Err(Error::BadMagic);
        }
        let file_length = reader.read_u32::<BigEndian>().map_err(|_| {
            Error::TruncatedFile {
                needed: u64::from(ICON_FAMILY_HEADER_LENGTH),
                available: 4,
            }
        })?;
        let mut file_position: u32 = ICON_FAMILY_HEADER_LENGTH;
        let mut family = IconFamily::new();
        while file_position < file_length {
            if family.elements.len() >= max_elements {
                warn!("stopped reading ICNS file after {} elements",
                      max_elements);
                break;
            }
            let element = IconElement::read(reader.by_ref())?;
            file_position = file_position.saturating_add(element.total_length());
            family.elements.push(element);
        }
        Ok(family)
    }

    /// Writes the icon family to an ICNS file.
    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(ICNS_MAGIC_LITERAL)?;
        writer.write_u32::<BigEndian>(self.total_length())?;
        for element in &self.elements {
            element.write(writer.by_ref())?;
        }
        Ok(())
    }

    /// Returns the encoded length of the file, in bytes, including the
    /// length of the header.
    pub fn total_length(&self) -> u32 {
        let mut length = ICON_FAMILY_HEADER_LENGTH;
        for element in &self.elements {
            length += element.total_length();
        }
        length
    }
}

impl Default for IconFamily {
    fn default() -> IconFamily {
        IconFamily::new()
    }
}

/// Decodes every PNG icon in an in-memory ICNS file.  Elements of other
/// types, and PNG icons that cannot be decoded, are skipped.
pub fn decode_icns(data: &[u8]) -> Result<Vec<DecodedEntry>> {
    decode_icns_with(data, &LoadOptions::default())
}

/// Like [`decode_icns`](fn.decode_icns.html), with explicit limits.
pub fn decode_icns_with(data: &[u8], options: &LoadOptions)
                        -> Result<Vec<DecodedEntry>> {
    let family = IconFamily::read(Cursor::new(data),
                                  options.max_icns_elements)?;
    let mut entries = Vec::new();
    for element in &family.elements {
        if element.icon_type().is_none() {
            debug!("ignoring '{}' element ({} bytes)",
                   element.ostype,
                   element.data.len());
            continue;
        }
        let label = format!("'{}' element", element.ostype);
        entry::keep_entry(element.decode(), &label, &mut entries)?;
    }
    debug!("decoded {} icons from {} ICNS elements",
           entries.len(),
           family.elements.len());
    Ok(entries)
}

/// Encodes the valid slots as an ICNS file.  Slots whose size has no ICNS
/// icon type are skipped with a warning.  Returns `Error::NothingToExport`
/// if no slot can be written.
pub fn encode_icns(slots: &[IconSlot], options: &ExportOptions)
                   -> Result<Vec<u8>> {
    let mut family = IconFamily::new();
    for slot in slots.iter().filter(|slot| slot.is_valid()) {
        if IconType::from_pixel_size(slot.size()).is_none() {
            warn!("skipping slot: {}", Error::UnmappedIcnsSize(slot.size()));
            continue;
        }
        family.add_icon(slot.encode_png(options)?, slot.size())?;
    }
    if family.is_empty() {
        return Err(Error::NothingToExport);
    }
    let mut output = Vec::with_capacity(family.total_length() as usize);
    family.write(&mut output)?;
    debug!("encoded {} icons into {} byte ICNS file",
           family.elements.len(),
           output.len());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icontype::OSType;
    use crate::image::Image;
    use crate::pack::IconPack;
    use crate::platform::Platform;
    use crate::pngio::tests::{corrupt_image_data, png_with_header};

    #[test]
    fn write_empty_icon_family() {
        let family = IconFamily::new();
        assert!(family.is_empty());
        assert_eq!(0, family.elements.len());
        let mut output: Vec<u8> = vec![];
        family.write(&mut output).expect("write failed");
        assert_eq!(b"icns\0\0\0\x08", &output as &[u8]);
    }

    #[test]
    fn read_icon_family_with_fake_elements() {
        let input: Cursor<&[u8]> =
            Cursor::new(b"icns\0\0\0\x1fquux\0\0\0\x0efoobarbaz!\0\0\0\x09#");
        let family = IconFamily::read(input, 16).expect("read failed");
        assert_eq!(2, family.elements.len());
        assert_eq!(OSType(*b"quux"), family.elements[0].ostype);
        assert_eq!(6, family.elements[0].data.len());
        assert_eq!(OSType(*b"baz!"), family.elements[1].ostype);
        assert_eq!(1, family.elements[1].data.len());
    }

    #[test]
    fn write_icon_family_with_fake_elements() {
        let mut family = IconFamily::new();
        family.elements
            .push(IconElement::new(OSType(*b"quux"), b"foobar".to_vec()));
        family.elements
            .push(IconElement::new(OSType(*b"baz!"), b"#".to_vec()));
        let mut output: Vec<u8> = vec![];
        family.write(&mut output).expect("write failed");
        assert_eq!(b"icns\0\0\0\x1fquux\0\0\0\x0efoobarbaz!\0\0\0\x09#",
                   &output as &[u8]);
    }

    #[test]
    fn element_limit() {
        let input: &[u8] = b"icns\0\0\0\x1fquux\0\0\0\x0efoobarbaz!\0\0\0\x09#";
        let family = IconFamily::read(input, 1).unwrap();
        assert_eq!(1, family.elements.len());
    }

    #[test]
    fn unknown_elements_are_skipped() {
        let input: &[u8] = b"icns\0\0\0\x1fquux\0\0\0\x0efoobarbaz!\0\0\0\x09#";
        assert!(decode_icns(input).unwrap().is_empty());
    }

    #[test]
    fn bad_magic() {
        assert!(matches!(decode_icns(b"icnx\0\0\0\x08"),
                         Err(Error::BadMagic)));
        assert!(matches!(decode_icns(b"ic"), Err(Error::BadMagic)));
    }

    #[test]
    fn truncated_family() {
        // Declares a second element that is not there.
        let input: &[u8] = b"icns\0\0\0\x20quux\0\0\0\x0efoobar";
        assert!(matches!(decode_icns(input),
                         Err(Error::TruncatedFile { .. })));
        assert!(matches!(decode_icns(b"icns\0\0"),
                         Err(Error::TruncatedFile { .. })));
    }

    #[test]
    fn zero_length_element() {
        let input: &[u8] = b"icns\0\0\0\x10quux\0\0\0\0";
        assert!(matches!(decode_icns(input),
                         Err(Error::InvalidElementLength { .. })));
    }

    #[test]
    fn encode_layout() {
        let mut pack = IconPack::new(Platform::Windows);
        pack.assign_slot(7, Image::placeholder(16), "").unwrap();
        let data = encode_icns(pack.slots(), &ExportOptions::default())
            .unwrap();
        let png = Image::placeholder(16).to_png_bytes().unwrap();
        assert_eq!(&data[..4], b"icns");
        assert_eq!(&data[4..8], &((16 + png.len()) as u32).to_be_bytes());
        assert_eq!(&data[8..12], b"icp4");
        assert_eq!(&data[12..16], &((8 + png.len()) as u32).to_be_bytes());
        assert_eq!(&data[16..], &png[..]);
    }

    #[test]
    fn encode_skips_unmapped_sizes() {
        let mut pack = IconPack::new(Platform::Windows);
        pack.assign_slot(2, Image::placeholder(96), "").unwrap();
        assert!(matches!(encode_icns(pack.slots(), &ExportOptions::default()),
                         Err(Error::NothingToExport)));
        pack.assign_slot(6, Image::placeholder(24), "").unwrap();
        pack.assign_slot(5, Image::placeholder(32), "").unwrap();
        let data = encode_icns(pack.slots(), &ExportOptions::default())
            .unwrap();
        let entries = decode_icns(&data).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].size, 32);
    }

    #[test]
    fn decode_alias_element() {
        let png = Image::placeholder(256).to_png_bytes().unwrap();
        let mut family = IconFamily::new();
        family.elements.push(IconElement::new(OSType(*b"ic08"), png));
        let mut data = Vec::new();
        family.write(&mut data).unwrap();
        let entries = decode_icns(&data).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].size, 256);
    }

    #[test]
    fn hostile_and_corrupt_pngs_are_skipped() {
        let mut corrupt = Image::new(64, 64).to_png_bytes().unwrap();
        corrupt_image_data(&mut corrupt);
        let mut family = IconFamily::new();
        family.elements
            .push(IconElement::new(OSType(*b"ic10"),
                                   png_with_header(60000, 60000)));
        family.elements.push(IconElement::new(OSType(*b"ic12"), corrupt));
        let png = Image::new(32, 32).to_png_bytes().unwrap();
        family.elements.push(IconElement::new(OSType(*b"ic11"), png));
        let mut data = Vec::new();
        family.write(&mut data).unwrap();
        let entries = decode_icns(&data).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].size, 32);
    }

    #[test]
    fn unsquare_png_is_skipped() {
        let mut family = IconFamily::new();
        let png = Image::new(16, 12).to_png_bytes().unwrap();
        family.elements.push(IconElement::new(OSType(*b"icp4"), png));
        let png = Image::new(16, 16).to_png_bytes().unwrap();
        family.elements.push(IconElement::new(OSType(*b"icp4"), png));
        let mut data = Vec::new();
        family.write(&mut data).unwrap();
        let entries = decode_icns(&data).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].size, 16);
    }
}
