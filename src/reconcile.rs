use log::{debug, warn};

use super::entry::DecodedEntry;
use super::error::{Error, Result};
use super::image::ScaleAlgorithm;
use super::pack::IconPack;

/// Which slots [`generate_missing`](fn.generate_missing.html) should fill.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Selection {
    /// Every slot that does not yet hold a valid image.
    AllMissing,
    /// Only the slot at this index (if it is not valid yet).
    Slot(usize),
}

/// Places decoded images into the pack slots of the same size.  A slot that
/// is already valid keeps its image, so when several images of one size are
/// loaded, the first one wins.  Images whose size matches no slot, and
/// entries whose image does not match their recorded size, are dropped with
/// a warning.  Returns the number of slots filled.
pub fn reconcile<I>(pack: &mut IconPack, entries: I) -> Result<usize>
    where I: IntoIterator<Item = DecodedEntry>
{
    let mut filled = 0;
    for entry in entries {
        let (width, height) = (entry.image.width(), entry.image.height());
        if width != height || width != entry.size {
            warn!("skipping {}x{} image recorded as {}x{}",
                  width,
                  height,
                  entry.size,
                  entry.size);
            continue;
        }
        let index = match pack.find_size(width) {
            Some(index) => index,
            None => {
                warn!("image size not supported by pack ({}x{})",
                      width,
                      height);
                continue;
            }
        };
        if pack.slot(index)?.is_valid() {
            debug!("keeping existing {}x{} image", width, height);
            continue;
        }
        pack.assign_slot(index, entry.image, &entry.text)?;
        filled += 1;
    }
    Ok(filled)
}

/// Fills invalid slots by scaling the largest available image (the first
/// valid slot) to each slot's size.  Generated slots get no text.  Returns
/// the number of slots generated, or `Error::NoSourceAvailable` if the pack
/// has no valid slot.
pub fn generate_missing(pack: &mut IconPack,
                        selection: Selection,
                        algorithm: ScaleAlgorithm)
                        -> Result<usize> {
    if let Selection::Slot(index) = selection {
        pack.slot(index)?;
    }
    let source_index =
        pack.largest_valid_index().ok_or(Error::NoSourceAvailable)?;
    let source = pack.slot(source_index)?.image().clone();

    let targets: Vec<usize> = match selection {
        Selection::AllMissing => (0..pack.len()).collect(),
        Selection::Slot(index) => vec![index],
    };
    let mut generated = 0;
    for index in targets {
        let slot = pack.slot(index)?;
        if slot.is_valid() {
            continue;
        }
        let size = slot.size();
        let image = source.resized(size, algorithm)?;
        pack.assign_slot(index, image, "")?;
        generated += 1;
    }
    debug!("generated {} icons from {}x{} source ({:?})",
           generated,
           source.width(),
           source.height(),
           algorithm);
    Ok(generated)
}
