use std::io::{BufRead, Cursor, Seek, Write};

use super::error::{Error, Result};
use super::image::{Image, PixelFormat, MAX_IMAGE_DIMENSION};

impl Image {
    /// Reads an image from a PNG file.
    pub fn read_png<R: BufRead + Seek>(input: R) -> Result<Image> {
        let mut decoder = png::Decoder::new(input);
        decoder.set_transformations(
            png::Transformations::STRIP_16 | png::Transformations::EXPAND,
        );
        let info = decoder.read_header_info().map_err(malformed)?;
        let (width, height) = (info.width, info.height);
        if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
            let msg = format!("{}x{} image exceeds the {}x{} limit",
                              width,
                              height,
                              MAX_IMAGE_DIMENSION,
                              MAX_IMAGE_DIMENSION);
            return Err(Error::MalformedPng(msg));
        }
        let mut reader = decoder.read_info().map_err(malformed)?;

        let (color_type, bit_depth) = reader.output_color_type();
        if bit_depth != png::BitDepth::Eight {
            let msg = format!("unsupported output bit depth: {:?}", bit_depth);
            return Err(Error::MalformedPng(msg));
        }
        let pixel_format = match color_type {
            png::ColorType::Rgba => PixelFormat::RGBA,
            png::ColorType::Rgb => PixelFormat::RGB,
            png::ColorType::GrayscaleAlpha => PixelFormat::GrayAlpha,
            png::ColorType::Grayscale => PixelFormat::Gray,
            png::ColorType::Indexed => {
                // EXPAND should never leave paletted output.
                let msg = "unexpanded indexed color output".to_string();
                return Err(Error::MalformedPng(msg));
            }
        };

        let buffer_size = reader.output_buffer_size().ok_or_else(|| {
            Error::MalformedPng(format!("{}x{} image is too large",
                                        width,
                                        height))
        })?;
        let mut buffer = vec![0u8; buffer_size];
        reader.next_frame(&mut buffer).map_err(malformed)?;
        reader.finish().map_err(malformed)?;
        Ok(Image::from_pixel_data(pixel_format, width, height, &buffer))
    }

    /// Reads an image from in-memory PNG data.
    pub fn from_png_bytes(data: &[u8]) -> Result<Image> {
        Image::read_png(Cursor::new(data))
    }

    /// Writes the image to a PNG file, as 8-bit RGBA.
    pub fn write_png<W: Write>(&self, output: W) -> Result<()> {
        let mut encoder = png::Encoder::new(output, self.width(), self.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header().map_err(encoding)?;
        writer.write_image_data(self.data()).map_err(encoding)?;
        writer.finish().map_err(encoding)?;
        Ok(())
    }

    /// Encodes the image as in-memory PNG data.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        self.write_png(&mut data)?;
        Ok(data)
    }
}

fn malformed(error: png::DecodingError) -> Error {
    Error::MalformedPng(error.to_string())
}

fn encoding(error: png::EncodingError) -> Error {
    Error::Encoding(error.to_string())
}
