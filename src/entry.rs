use log::warn;

use super::chunk::{self, PNG_SIGNATURE};
use super::error::{Error, Result};
use super::image::Image;

/// One image decoded from an icon file, not yet placed in a pack.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecodedEntry {
    /// The width (and height) of the image, in pixels.
    pub size: u32,
    /// The decoded image.
    pub image: Image,
    /// The text stored with the image, or an empty string.
    pub text: String,
}

impl DecodedEntry {
    /// Creates an entry from a decoded image.  Returns an error if the
    /// image is not square.
    pub fn new(image: Image, text: String) -> Result<DecodedEntry> {
        if !image.is_square() {
            return Err(Error::UnsquareImage {
                width: image.width(),
                height: image.height(),
            });
        }
        Ok(DecodedEntry {
            size: image.width(),
            image,
            text: chunk::truncate_text(&text).to_string(),
        })
    }

    /// Decodes a PNG payload taken from an icon container, along with any
    /// text stored in it.
    pub fn from_png(data: &[u8]) -> Result<DecodedEntry> {
        if !data.starts_with(PNG_SIGNATURE) {
            let msg = "payload does not start with a PNG signature";
            return Err(Error::MalformedPng(msg.to_string()));
        }
        let image = Image::from_png_bytes(data)?;
        let text = chunk::read_text(data)?;
        DecodedEntry::new(image, text)
    }

    /// Decodes a standalone image file (PNG, BMP, or QOI).  Text is only
    /// read from PNG files.
    pub fn from_raw_image(data: &[u8]) -> Result<DecodedEntry> {
        if data.starts_with(PNG_SIGNATURE) {
            return DecodedEntry::from_png(data);
        }
        DecodedEntry::new(Image::decode(data)?, String::new())
    }
}

/// Encodes an image as a PNG payload for an icon container, embedding the
/// text when requested and non-empty.
pub(crate) fn encode_payload(image: &Image, text: &str, embed_text: bool)
                             -> Result<Vec<u8>> {
    let png = image.to_png_bytes()?;
    if embed_text {
        chunk::write_text(png, text)
    } else {
        Ok(png)
    }
}

/// Collects the result of decoding one entry of a container.  Errors that
/// only affect this entry are logged and the entry is dropped; any other
/// error is returned.
pub(crate) fn keep_entry(result: Result<DecodedEntry>,
                         label: &str,
                         entries: &mut Vec<DecodedEntry>)
                         -> Result<()> {
    match result {
        Ok(entry) => entries.push(entry),
        Err(error) if error.is_entry_local() => {
            warn!("skipping {}: {}", label, error);
        }
        Err(error) => return Err(error),
    }
    Ok(())
}
