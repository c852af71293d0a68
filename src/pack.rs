use log::debug;

use super::chunk;
use super::entry;
use super::error::{Error, Result};
use super::image::Image;
use super::options::ExportOptions;
use super::platform::{self, Platform};

/// One required icon size within a pack.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IconSlot {
    size: u32,
    valid: bool,
    image: Image,
    text: String,
}

impl IconSlot {
    /// Creates an empty slot holding a placeholder image.
    fn new(size: u32) -> IconSlot {
        IconSlot {
            size,
            valid: false,
            image: Image::placeholder(size),
            text: String::new(),
        }
    }

    /// Returns the width (and height) of this slot, in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns true if the slot holds a real image rather than a
    /// placeholder.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns the slot's image (which is a placeholder if the slot is not
    /// valid).
    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Returns the slot's text, or an empty string.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Encodes the slot's image as PNG data, embedding its text if the
    /// options ask for it.
    pub fn encode_png(&self, options: &ExportOptions) -> Result<Vec<u8>> {
        entry::encode_payload(&self.image, &self.text, options.embed_text)
    }
}

/// A fixed list of icon slots, one per required size.
///
/// Slots never move or change size; only their content and validity do.
#[derive(Clone, Debug)]
pub struct IconPack {
    platform: Option<Platform>,
    slots: Vec<IconSlot>,
}

impl IconPack {
    /// Creates a pack of placeholder slots for the given platform.
    pub fn new(platform: Platform) -> IconPack {
        IconPack {
            platform: Some(platform),
            slots: platform.sizes().iter().map(|&size| IconSlot::new(size))
                .collect(),
        }
    }

    /// Creates a pack of placeholder slots for a custom list of sizes.
    /// The sizes should be listed largest first, since generation scales
    /// from the first valid slot.
    pub fn with_sizes(sizes: &[u32]) -> Result<IconPack> {
        platform::validate_sizes(sizes)?;
        Ok(IconPack {
            platform: None,
            slots: sizes.iter().map(|&size| IconSlot::new(size)).collect(),
        })
    }

    /// Returns the platform this pack was created for, or `None` for a
    /// custom pack.
    pub fn platform(&self) -> Option<Platform> {
        self.platform
    }

    /// Returns the slots of this pack, in template order.
    pub fn slots(&self) -> &[IconSlot] {
        &self.slots
    }

    /// Returns the slot at the given index.
    pub fn slot(&self, index: usize) -> Result<&IconSlot> {
        let len = self.slots.len();
        self.slots.get(index).ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Returns the number of slots in the pack.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the pack has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the index of the slot with the given size, if any.
    pub fn find_size(&self, size: u32) -> Option<usize> {
        self.slots.iter().position(|slot| slot.size == size)
    }

    /// Puts an image into a slot and marks it valid.  The image must be
    /// exactly the slot's size.  Text is shortened to fit the 39-byte limit
    /// of the text chunk.
    pub fn assign_slot(&mut self, index: usize, image: Image, text: &str)
                       -> Result<()> {
        let slot = self.slot_mut(index)?;
        if !image.is_square() {
            return Err(Error::UnsquareImage {
                width: image.width(),
                height: image.height(),
            });
        }
        if image.width() != slot.size {
            return Err(Error::SizeMismatch {
                expected: slot.size,
                actual: image.width(),
            });
        }
        slot.image = image;
        slot.text = chunk::truncate_text(text).to_string();
        slot.valid = true;
        Ok(())
    }

    /// Returns a slot to its placeholder state.  Does nothing if the slot
    /// is not valid.
    pub fn clear_slot(&mut self, index: usize) -> Result<()> {
        let slot = self.slot_mut(index)?;
        if slot.valid {
            *slot = IconSlot::new(slot.size);
            debug!("cleared {}x{} slot", slot.size, slot.size);
        }
        Ok(())
    }

    /// Returns every slot to its placeholder state.
    pub fn clear_all(&mut self) {
        for slot in self.slots.iter_mut().filter(|slot| slot.valid) {
            *slot = IconSlot::new(slot.size);
        }
    }

    /// Returns the number of valid slots.
    pub fn valid_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.valid).count()
    }

    /// Returns the index of the first valid slot.  Packs list their sizes
    /// largest first, so this is taken to be the largest available image;
    /// the sizes themselves are not compared.
    pub fn largest_valid_index(&self) -> Option<usize> {
        self.slots.iter().position(|slot| slot.valid)
    }

    /// Encodes the image in one valid slot as PNG data, for saving it as a
    /// standalone image file.
    pub fn export_slot_png(&self, index: usize, options: &ExportOptions)
                           -> Result<Vec<u8>> {
        let slot = self.slot(index)?;
        if !slot.valid {
            return Err(Error::NothingToExport);
        }
        slot.encode_png(options)
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> Result<&mut IconSlot> {
        let len = self.slots.len();
        self.slots.get_mut(index).ok_or(Error::IndexOutOfRange { index, len })
    }
}
