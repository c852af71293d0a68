use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use log::debug;
use std::io::{Read, Write};

use super::entry::DecodedEntry;
use super::error::{Error, Result};
use super::icontype::{IconType, OSType};

/// The length of an icon element header, in bytes:
const ICON_ELEMENT_HEADER_LENGTH: u32 = 8;

/// One entry in an ICNS file.  Depending on the OSType, this may hold a PNG
/// icon image, or data this library does not interpret (such as a table of
/// contents or a legacy bitmap).
pub struct IconElement {
    /// The OSType for this element (e.g. `ic07` or `TOC `).
    pub ostype: OSType,
    /// The raw data payload for this element.
    pub data: Vec<u8>,
}

impl IconElement {
    /// Creates an icon element with the given OSType and data payload.
    pub fn new(ostype: OSType, data: Vec<u8>) -> IconElement {
        IconElement { ostype, data }
    }

    /// Decodes the icon element into an entry.  Returns an error if this
    /// element does not represent an icon type supported by this library, or
    /// if the data is malformed.
    pub fn decode(&self) -> Result<DecodedEntry> {
        let icon_type = self.icon_type().ok_or_else(|| {
            Error::UnsupportedFormat(format!("unsupported OSType: {}",
                                             self.ostype))
        })?;
        let entry = DecodedEntry::from_png(&self.data)?;
        if entry.size != icon_type.pixel_size() {
            debug!("'{}' element should be {}x{}, but PNG is {}x{}",
                   self.ostype,
                   icon_type.pixel_size(),
                   icon_type.pixel_size(),
                   entry.size,
                   entry.size);
        }
        Ok(entry)
    }

    /// Returns the type of icon encoded by this element, or `None` if this
    /// element does not encode a supported icon type.
    pub fn icon_type(&self) -> Option<IconType> {
        IconType::from_ostype(self.ostype)
    }

    /// Returns the encoded length of the element, in bytes, including the
    /// length of the header.
    pub fn total_length(&self) -> u32 {
        ICON_ELEMENT_HEADER_LENGTH + (self.data.len() as u32)
    }

    /// Reads an icon element from within an ICNS file.
    pub fn read<R: Read>(mut reader: R) -> Result<IconElement> {
        let mut header = Vec::with_capacity(8);
        reader.by_ref()
            .take(u64::from(ICON_ELEMENT_HEADER_LENGTH))
            .read_to_end(&mut header)?;
        if header.len() as u32 != ICON_ELEMENT_HEADER_LENGTH {
            return Err(Error::TruncatedFile {
                needed: u64::from(ICON_ELEMENT_HEADER_LENGTH),
                available: header.len() as u64,
            });
        }
        let mut header = &header[..];
        let mut raw_ostype = [0u8; 4];
        header.read_exact(&mut raw_ostype)?;
        let ostype = OSType(raw_ostype);
        let element_length = header.read_u32::<BigEndian>()?;
        if element_length < ICON_ELEMENT_HEADER_LENGTH {
            return Err(Error::InvalidElementLength {
                ostype,
                length: element_length,
            });
        }
        let data_length = element_length - ICON_ELEMENT_HEADER_LENGTH;
        // Only allocate as much as is actually there.
        let mut data = Vec::new();
        reader.take(u64::from(data_length)).read_to_end(&mut data)?;
        if data.len() as u64 != u64::from(data_length) {
            return Err(Error::TruncatedFile {
                needed: u64::from(data_length),
                available: data.len() as u64,
            });
        }
        Ok(IconElement::new(ostype, data))
    }

    /// Writes the icon element to within an ICNS file.
    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        let OSType(ref raw_ostype) = self.ostype;
        writer.write_all(raw_ostype)?;
        writer.write_u32::<BigEndian>(self.total_length())?;
        writer.write_all(&self.data)?;
        Ok(())
    }
}
