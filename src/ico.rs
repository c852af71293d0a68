use std::io::{Cursor, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::{debug, warn};

use super::entry::{self, DecodedEntry};
use super::error::{Error, Result};
use super::options::ExportOptions;
use super::pack::IconSlot;

/// The length of the ICONDIR header, in bytes.
const ICONDIR_LENGTH: usize = 6;

/// The length of one ICONDIRENTRY record, in bytes.
const ICONDIRENTRY_LENGTH: usize = 16;

/// The resource type number for icons (cursors use 2).
const ICON_RESOURCE_TYPE: u16 = 1;

/// The largest image an ICO directory entry can describe.
pub const MAX_ICO_SIZE: u32 = 256;

/// The images of a single ICO file, with their raw (PNG) payloads.
pub struct IconDir {
    entries: Vec<IconDirEntry>,
}

impl IconDir {
    /// Creates a new, empty icon directory.
    pub fn new() -> IconDir {
        IconDir { entries: Vec::new() }
    }

    /// Returns the entries in this directory.
    pub fn entries(&self) -> &[IconDirEntry] {
        &self.entries
    }

    /// Adds an entry holding an encoded PNG image of the given dimensions.
    pub fn add_png(&mut self, width: u32, height: u32, data: Vec<u8>) {
        self.entries.push(IconDirEntry {
            width,
            height,
            num_colors: 0,
            color_planes: 1,
            bits_per_pixel: 32,
            data,
        });
    }

    /// Parses an in-memory ICO file.  Returns an error if the header is
    /// invalid or the file is shorter than its directory declares.
    pub fn read(data: &[u8]) -> Result<IconDir> {
        check_length(data, ICONDIR_LENGTH as u64)?;
        let mut reader = Cursor::new(data);
        let reserved = reader.read_u16::<LittleEndian>()?;
        if reserved != 0 {
            warn!("reserved field in ICO header is {} (should be 0)",
                  reserved);
        }
        let restype = reader.read_u16::<LittleEndian>()?;
        if restype != ICON_RESOURCE_TYPE {
            return Err(Error::UnsupportedImageType(restype));
        }
        let num_entries = reader.read_u16::<LittleEndian>()? as usize;
        check_length(data,
                     (ICONDIR_LENGTH + ICONDIRENTRY_LENGTH * num_entries) as
                     u64)?;

        let mut spans = Vec::with_capacity(num_entries);
        let mut entries = Vec::with_capacity(num_entries);
        for _ in 0..num_entries {
            let width = reader.read_u8()?;
            let height = reader.read_u8()?;
            let num_colors = reader.read_u8()?;
            let _reserved = reader.read_u8()?;
            let color_planes = reader.read_u16::<LittleEndian>()?;
            let bits_per_pixel = reader.read_u16::<LittleEndian>()?;
            let data_size = reader.read_u32::<LittleEndian>()?;
            let data_offset = reader.read_u32::<LittleEndian>()?;
            spans.push((data_offset, data_size));
            entries.push(IconDirEntry {
                width: if width == 0 { 256 } else { u32::from(width) },
                height: if height == 0 { 256 } else { u32::from(height) },
                num_colors,
                color_planes,
                bits_per_pixel,
                data: Vec::new(),
            });
        }
        for (entry, (data_offset, data_size)) in entries.iter_mut()
            .zip(spans)
        {
            let start = u64::from(data_offset);
            let end = start + u64::from(data_size);
            check_length(data, end)?;
            entry.data = data[start as usize..end as usize].to_vec();
        }
        Ok(IconDir { entries })
    }

    /// Writes the icon directory out as an ICO file.
    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        if self.entries.len() > (u16::MAX as usize) {
            return Err(Error::Encoding(format!("too many entries in ICO \
                                                file (was {}, but max is \
                                                {})",
                                               self.entries.len(),
                                               u16::MAX)));
        }
        writer.write_u16::<LittleEndian>(0)?; // reserved
        writer.write_u16::<LittleEndian>(ICON_RESOURCE_TYPE)?;
        writer.write_u16::<LittleEndian>(self.entries.len() as u16)?;
        let mut data_offset =
            (ICONDIR_LENGTH + ICONDIRENTRY_LENGTH * self.entries.len()) as u32;
        for entry in &self.entries {
            writer.write_u8(encode_dimension(entry.width))?;
            writer.write_u8(encode_dimension(entry.height))?;
            writer.write_u8(entry.num_colors)?;
            writer.write_u8(0)?; // reserved
            writer.write_u16::<LittleEndian>(entry.color_planes)?;
            writer.write_u16::<LittleEndian>(entry.bits_per_pixel)?;
            let data_size = entry.data.len() as u32;
            writer.write_u32::<LittleEndian>(data_size)?;
            writer.write_u32::<LittleEndian>(data_offset)?;
            data_offset += data_size;
        }
        for entry in &self.entries {
            writer.write_all(&entry.data)?;
        }
        Ok(())
    }
}

impl Default for IconDir {
    fn default() -> IconDir {
        IconDir::new()
    }
}

/// One image record of an ICO file.
pub struct IconDirEntry {
    width: u32,
    height: u32,
    num_colors: u8,
    color_planes: u16,
    bits_per_pixel: u16,
    data: Vec<u8>,
}

impl IconDirEntry {
    /// Returns the width declared in the directory, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height declared in the directory, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the bit depth declared in the directory.
    pub fn bits_per_pixel(&self) -> u16 {
        self.bits_per_pixel
    }

    /// Returns the raw image payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Decodes this entry's PNG payload.
    pub fn decode(&self) -> Result<DecodedEntry> {
        let entry = DecodedEntry::from_png(&self.data)?;
        if entry.size != self.width || entry.size != self.height {
            debug!("ICO directory says {}x{}, but PNG is {}x{}",
                   self.width,
                   self.height,
                   entry.size,
                   entry.size);
        }
        Ok(entry)
    }
}

/// Decodes every PNG image in an in-memory ICO file.  Entries that cannot
/// be decoded (non-PNG payloads, broken PNG data, non-square images) are
/// skipped with a warning.
pub fn decode_ico(data: &[u8]) -> Result<Vec<DecodedEntry>> {
    let dir = IconDir::read(data)?;
    let mut entries = Vec::with_capacity(dir.entries.len());
    for (index, dir_entry) in dir.entries.iter().enumerate() {
        let label = format!("ICO entry {} ({}x{})",
                            index,
                            dir_entry.width,
                            dir_entry.height);
        entry::keep_entry(dir_entry.decode(), &label, &mut entries)?;
    }
    debug!("decoded {} of {} ICO entries", entries.len(), dir.entries.len());
    Ok(entries)
}

/// Encodes the valid slots as an ICO file.  Placeholder slots are left
/// out, as are slots larger than 256 pixels.  Returns
/// `Error::NothingToExport` if no slot can be written.
pub fn encode_ico(slots: &[IconSlot], options: &ExportOptions)
                  -> Result<Vec<u8>> {
    let mut dir = IconDir::new();
    for slot in slots.iter().filter(|slot| slot.is_valid()) {
        if slot.size() > MAX_ICO_SIZE {
            warn!("skipping {}x{} icon (ICO images are at most {}x{})",
                  slot.size(),
                  slot.size(),
                  MAX_ICO_SIZE,
                  MAX_ICO_SIZE);
            continue;
        }
        let data = slot.encode_png(options)?;
        dir.add_png(slot.size(), slot.size(), data);
    }
    if dir.entries.is_empty() {
        return Err(Error::NothingToExport);
    }
    let mut output = Vec::new();
    dir.write(&mut output)?;
    debug!("encoded {} images into {} byte ICO file",
           dir.entries.len(),
           output.len());
    Ok(output)
}

fn encode_dimension(size: u32) -> u8 {
    if size >= MAX_ICO_SIZE { 0 } else { size as u8 }
}

fn check_length(data: &[u8], needed: u64) -> Result<()> {
    let available = data.len() as u64;
    if available < needed {
        return Err(Error::TruncatedFile { needed, available });
    }
    Ok(())
}
