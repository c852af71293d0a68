use std::fmt;
use std::io::Cursor;

use ::image::imageops::{self, FilterType};
use ::image::{ImageReader, Limits, RgbaImage};

use super::error::{Error, Result};

/// The largest width or height accepted when decoding an image.  Larger
/// headers are rejected before any pixel memory is allocated.
pub const MAX_IMAGE_DIMENSION: u32 = 8192;

// Placeholder colors, as RGBA.
const PLACEHOLDER_BORDER: [u8; 4] = [80, 80, 80, 255];
const PLACEHOLDER_FILL: [u8; 4] = [130, 130, 130, 255];

/// An icon image, stored as 8-bit RGBA pixel data in row-major order.
#[derive(Clone, Eq, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    data: Box<[u8]>,
}

impl Image {
    /// Creates a new image with all pixel data set to zero (fully
    /// transparent black).
    pub fn new(width: u32, height: u32) -> Image {
        let data_bytes = 4 * (width as usize) * (height as usize);
        Image {
            width,
            height,
            data: vec![0u8; data_bytes].into_boxed_slice(),
        }
    }

    /// Creates an image from RGBA data.  Panics if `rgba_data` does not
    /// have exactly `4 * width * height` bytes.
    pub fn from_rgba_data(width: u32, height: u32, rgba_data: Vec<u8>)
                          -> Image {
        let expected_len = 4 * (width as usize) * (height as usize);
        if rgba_data.len() != expected_len {
            panic!("Invalid data length \
                    (was {}, but must be {} for {}x{} image)",
                   rgba_data.len(),
                   expected_len,
                   width,
                   height);
        }
        Image {
            width,
            height,
            data: rgba_data.into_boxed_slice(),
        }
    }

    /// Creates an image from pixel data in any of the supported pixel
    /// formats, converting it to RGBA.
    pub fn from_pixel_data(format: PixelFormat,
                           width: u32,
                           height: u32,
                           data: &[u8])
                           -> Image {
        let rgba_data = match format {
            PixelFormat::RGBA => data.to_vec(),
            PixelFormat::RGB => rgb_to_rgba(data),
            PixelFormat::GrayAlpha => gray_alpha_to_rgba(data),
            PixelFormat::Gray => gray_to_rgba(data),
        };
        Image::from_rgba_data(width, height, rgba_data)
    }

    /// Creates the neutral placeholder image shown in an empty slot: a
    /// dark gray square with a lighter interior, inset by one pixel.
    pub fn placeholder(size: u32) -> Image {
        let mut image = Image::new(size, size);
        let last = size.saturating_sub(1);
        for y in 0..size {
            for x in 0..size {
                let border = x == 0 || y == 0 || x == last || y == last;
                let color = if border {
                    PLACEHOLDER_BORDER
                } else {
                    PLACEHOLDER_FILL
                };
                image.set_pixel(x, y, color);
            }
        }
        image
    }

    /// Decodes an image from an in-memory file, detecting its format from
    /// the data (PNG, BMP, and QOI are supported).  Images wider or taller
    /// than `MAX_IMAGE_DIMENSION` are refused.
    pub fn decode(data: &[u8]) -> Result<Image> {
        let mut reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()?;
        let mut limits = Limits::default();
        limits.max_image_width = Some(MAX_IMAGE_DIMENSION);
        limits.max_image_height = Some(MAX_IMAGE_DIMENSION);
        reader.limits(limits);
        let decoded = reader.decode()
            .map_err(|err| Error::UnsupportedFormat(err.to_string()))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Image::from_rgba_data(width, height, rgba.into_raw()))
    }

    /// Returns a copy of this image scaled to `size` by `size` pixels.
    pub fn resized(&self, size: u32, algorithm: ScaleAlgorithm)
                   -> Result<Image> {
        if self.width == size && self.height == size {
            return Ok(self.clone());
        }
        let buffer =
            RgbaImage::from_raw(self.width, self.height, self.data.to_vec())
                .ok_or_else(|| {
                    Error::Encoding(format!("pixel buffer does not match \
                                             {}x{} image",
                                            self.width,
                                            self.height))
                })?;
        let scaled = imageops::resize(&buffer, size, size, algorithm.filter());
        Ok(Image::from_rgba_data(size, size, scaled.into_raw()))
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns true if the image is as wide as it is tall.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Returns a reference to the image's RGBA data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a mutable reference to the image's RGBA data.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Returns the RGBA value of the pixel at the given coordinates.
    /// Panics if the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let start = self.pixel_offset(x, y);
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.data[start..start + 4]);
        rgba
    }

    /// Sets the RGBA value of the pixel at the given coordinates.  Panics
    /// if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let start = self.pixel_offset(x, y);
        self.data[start..start + 4].copy_from_slice(&rgba);
    }

    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height,
                "pixel ({}, {}) is outside {}x{} image",
                x,
                y,
                self.width,
                self.height);
        4 * (y as usize * self.width as usize + x as usize)
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        out.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// A format for pixel data handed to
/// [`Image::from_pixel_data`](struct.Image.html#method.from_pixel_data).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PixelFormat {
    /// 32-bit color with alpha channel.
    RGBA,
    /// 24-bit color with no alpha.
    RGB,
    /// 16-bit grayscale with alpha channel.
    GrayAlpha,
    /// 8-bit grayscale with no alpha.
    Gray,
}

impl PixelFormat {
    /// Returns the number of bits needed to store a single pixel in this
    /// format.
    pub fn bits_per_pixel(self) -> u32 {
        match self {
            PixelFormat::RGBA => 32,
            PixelFormat::RGB => 24,
            PixelFormat::GrayAlpha => 16,
            PixelFormat::Gray => 8,
        }
    }
}

/// The algorithm used to scale a source image when generating a missing
/// icon size.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ScaleAlgorithm {
    /// Nearest-neighbor scaling; keeps hard pixel edges.
    NearestNeighbor,
    /// Smooth bicubic scaling.
    #[default]
    Bicubic,
}

impl ScaleAlgorithm {
    fn filter(self) -> FilterType {
        match self {
            ScaleAlgorithm::NearestNeighbor => FilterType::Nearest,
            ScaleAlgorithm::Bicubic => FilterType::CatmullRom,
        }
    }
}

/// Converts RGB image data into RGBA.
fn rgb_to_rgba(rgb: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(rgb.len() / 3 * 4);
    for pixel in rgb.chunks_exact(3) {
        rgba.extend_from_slice(pixel);
        rgba.push(u8::MAX);
    }
    rgba
}

/// Converts grayscale-with-alpha image data into RGBA.
fn gray_alpha_to_rgba(gray_alpha: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(gray_alpha.len() * 2);
    for pixel in gray_alpha.chunks_exact(2) {
        rgba.extend_from_slice(&[pixel[0], pixel[0], pixel[0], pixel[1]]);
    }
    rgba
}

/// Converts grayscale image data into RGBA.
fn gray_to_rgba(gray: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(gray.len() * 4);
    for &value in gray {
        rgba.extend_from_slice(&[value, value, value, u8::MAX]);
    }
    rgba
}
