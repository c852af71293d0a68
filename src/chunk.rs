//! Reading and writing auxiliary chunks inside PNG data.
//!
//! Each icon image can carry a short text string, stored in a private
//! ancillary chunk of type `rIPt` inside its PNG payload.  Standard PNG
//! decoders skip the chunk; this module finds it, and inserts it just
//! before the `IEND` chunk when encoding.

use std::fmt;
use std::str::FromStr;

use byteorder::{BigEndian, ByteOrder};
use crc32fast::Hasher;

use super::error::{Error, Result};

/// The signature that all PNG files start with.
pub const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

/// The chunk type used to carry an icon's text.
pub const TEXT_CHUNK_TYPE: ChunkType = ChunkType(*b"rIPt");

/// The maximum number of payload bytes returned by
/// [`read_chunk`](fn.read_chunk.html); icon text is bounded by this too.
pub const MAX_CHUNK_PAYLOAD: usize = 39;

const IEND_CHUNK_TYPE: ChunkType = ChunkType(*b"IEND");

/// Length, type, and CRC fields around each chunk's payload.
const CHUNK_OVERHEAD: usize = 12;

/// The four-byte type code of a PNG chunk.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ChunkType(pub [u8; 4]);

impl ChunkType {
    /// Returns true if decoders may safely ignore chunks of this type
    /// (that is, the first letter of the type code is lowercase).
    pub fn is_ancillary(self) -> bool {
        self.0[0] & 0x20 != 0
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        for &byte in &self.0 {
            write!(out, "{}", char::from(byte))?;
        }
        Ok(())
    }
}

impl FromStr for ChunkType {
    type Err = String;

    fn from_str(input: &str) -> std::result::Result<ChunkType, String> {
        let bytes = input.as_bytes();
        if bytes.len() != 4 || !bytes.iter().all(u8::is_ascii_alphabetic) {
            Err(format!("chunk type must be 4 ASCII letters (was {:?})",
                        input))
        } else {
            let mut raw = [0u8; 4];
            raw.clone_from_slice(bytes);
            Ok(ChunkType(raw))
        }
    }
}

/// One chunk located within a PNG stream.
struct ChunkSpan {
    chunk_type: ChunkType,
    /// Offset of the chunk's length field.
    start: usize,
    /// Range of the chunk's payload.
    data_start: usize,
    data_end: usize,
}

/// Walks the chunk sequence of a PNG stream, checking the structure as it
/// goes.  Stops after the `IEND` chunk.
fn chunk_spans(png: &[u8]) -> Result<Vec<ChunkSpan>> {
    if !png.starts_with(PNG_SIGNATURE) {
        return Err(Error::MalformedPng("missing PNG signature".to_string()));
    }
    let mut spans = Vec::new();
    let mut offset = PNG_SIGNATURE.len();
    loop {
        let remaining = png.len() - offset;
        if remaining < CHUNK_OVERHEAD {
            let msg = format!("truncated chunk header at offset {}", offset);
            return Err(Error::MalformedPng(msg));
        }
        let length = BigEndian::read_u32(&png[offset..]) as usize;
        let mut raw_type = [0u8; 4];
        raw_type.copy_from_slice(&png[offset + 4..offset + 8]);
        let chunk_type = ChunkType(raw_type);
        if length > remaining - CHUNK_OVERHEAD {
            let msg = format!("'{}' chunk at offset {} overruns the data \
                               ({} bytes declared)",
                              chunk_type,
                              offset,
                              length);
            return Err(Error::MalformedPng(msg));
        }
        let data_start = offset + 8;
        spans.push(ChunkSpan {
            chunk_type,
            start: offset,
            data_start,
            data_end: data_start + length,
        });
        offset = data_start + length + 4;
        if chunk_type == IEND_CHUNK_TYPE {
            return Ok(spans);
        }
    }
}

/// Finds the first chunk of the given type in a PNG stream and returns its
/// payload, truncated to [`MAX_CHUNK_PAYLOAD`](constant.MAX_CHUNK_PAYLOAD.html)
/// bytes.  Returns `None` if there is no such chunk, or an error if the PNG
/// structure is invalid.
pub fn read_chunk(png: &[u8], chunk_type: ChunkType) -> Result<Option<Vec<u8>>> {
    let spans = chunk_spans(png)?;
    let found = spans.iter().find(|span| span.chunk_type == chunk_type);
    Ok(found.map(|span| {
        let data = &png[span.data_start..span.data_end];
        data[..data.len().min(MAX_CHUNK_PAYLOAD)].to_vec()
    }))
}

/// Returns a copy of the PNG stream with an extra ancillary chunk of the
/// given type and payload inserted just before the `IEND` chunk.
pub fn write_chunk(png: &[u8], chunk_type: ChunkType, payload: &[u8])
                   -> Result<Vec<u8>> {
    if !chunk_type.is_ancillary() {
        return Err(Error::CriticalChunk(chunk_type));
    }
    if payload.len() > i32::MAX as usize {
        let msg = format!("chunk payload of {} bytes is too long",
                          payload.len());
        return Err(Error::Encoding(msg));
    }
    let spans = chunk_spans(png)?;
    let iend_start = match spans.last() {
        Some(span) => span.start,
        None => return Err(Error::MalformedPng("no IEND chunk".to_string())),
    };

    let mut output = Vec::with_capacity(png.len() + CHUNK_OVERHEAD +
                                        payload.len());
    output.extend_from_slice(&png[..iend_start]);
    let mut length = [0u8; 4];
    BigEndian::write_u32(&mut length, payload.len() as u32);
    output.extend_from_slice(&length);
    output.extend_from_slice(&chunk_type.0);
    output.extend_from_slice(payload);
    let mut hasher = Hasher::new();
    hasher.update(&chunk_type.0);
    hasher.update(payload);
    output.extend_from_slice(&hasher.finalize().to_be_bytes());
    output.extend_from_slice(&png[iend_start..]);
    Ok(output)
}

/// Reads the icon text stored in a PNG stream, or an empty string if there
/// is none.
pub fn read_text(png: &[u8]) -> Result<String> {
    Ok(match read_chunk(png, TEXT_CHUNK_TYPE)? {
        Some(payload) => String::from_utf8_lossy(&payload).into_owned(),
        None => String::new(),
    })
}

/// Stores icon text in a PNG stream.  Empty text leaves the data unchanged.
pub fn write_text(png: Vec<u8>, text: &str) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Ok(png);
    }
    write_chunk(&png, TEXT_CHUNK_TYPE, truncate_text(text).as_bytes())
}

/// Shortens text to at most [`MAX_CHUNK_PAYLOAD`](constant.MAX_CHUNK_PAYLOAD.html)
/// bytes without splitting a UTF-8 character.
pub fn truncate_text(text: &str) -> &str {
    if text.len() <= MAX_CHUNK_PAYLOAD {
        return text;
    }
    let mut end = MAX_CHUNK_PAYLOAD;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
