//! Image XObject creation
//!
//! JPEG data is embedded untouched behind `DCTDecode`. PNG has no PDF
//! filter of its own, so it is decoded and stored as Flate-compressed
//! samples.
//!
//! Samples are built when an image is loaded, so an image that fails to
//! decode is rejected on its own instead of failing the document write.

use crate::types::{MediaType, Result};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::{ColorType, DynamicImage, ExtendedColorType, ImageDecoder, ImageReader};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::fmt;
use std::io::{Cursor, Write};

/// Encoded samples ready to become an image XObject
#[derive(Clone)]
pub struct ImageSamples {
    pub width: u32,
    pub height: u32,
    pub color_space: &'static str,
    pub filter: &'static str,
    /// Samples are stored inverted (Adobe CMYK JPEGs)
    pub inverted_cmyk: bool,
    pub data: Vec<u8>,
}

impl fmt::Debug for ImageSamples {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageSamples")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("color_space", &self.color_space)
            .field("filter", &self.filter)
            .field("inverted_cmyk", &self.inverted_cmyk)
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// Decode `data` fully and build the samples the writer will embed.
pub fn encode_samples(media_type: MediaType, data: &[u8]) -> Result<ImageSamples> {
    match media_type {
        MediaType::Jpeg => jpeg_samples(data),
        MediaType::Png => png_samples(data),
    }
}

/// Add an image XObject for `samples` to `output` and return its object ID.
pub fn create_image_xobject(output: &mut Document, samples: &ImageSamples) -> ObjectId {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", samples.width as i64);
    dict.set("Height", samples.height as i64);
    dict.set(
        "ColorSpace",
        Object::Name(samples.color_space.as_bytes().to_vec()),
    );
    dict.set("BitsPerComponent", 8_i64);
    dict.set("Filter", Object::Name(samples.filter.as_bytes().to_vec()));
    if samples.inverted_cmyk {
        dict.set(
            "Decode",
            Object::Array([1, 0, 1, 0, 1, 0, 1, 0].map(Object::Integer).to_vec()),
        );
    }

    // Already compressed: keep lopdf from filtering it again
    let mut stream = Stream::new(dict, samples.data.clone());
    stream.allows_compression = false;

    output.add_object(stream)
}

fn jpeg_samples(data: &[u8]) -> Result<ImageSamples> {
    let decoder = ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .into_decoder()?;
    let (width, height) = decoder.dimensions();
    let original = decoder.original_color_type();

    // The bytes are embedded as-is, but a file that can't be decoded here
    // wouldn't render in a viewer either
    DynamicImage::from_decoder(decoder)?;

    let (color_space, inverted_cmyk) = match original {
        ExtendedColorType::L8 | ExtendedColorType::L16 => ("DeviceGray", false),
        ExtendedColorType::Cmyk8 => ("DeviceCMYK", has_adobe_marker(data)),
        _ => ("DeviceRGB", false),
    };

    Ok(ImageSamples {
        width,
        height,
        color_space,
        filter: "DCTDecode",
        inverted_cmyk,
        data: data.to_vec(),
    })
}

fn png_samples(data: &[u8]) -> Result<ImageSamples> {
    let decoder = ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .into_decoder()?;
    let (width, height) = decoder.dimensions();
    let color_type = decoder.color_type();
    let image = DynamicImage::from_decoder(decoder)?;

    let (raw, color_space) = match color_type {
        ColorType::L8 | ColorType::L16 => (image.to_luma8().into_raw(), "DeviceGray"),
        ColorType::La8 | ColorType::La16 => {
            let gray = image
                .to_luma_alpha8()
                .pixels()
                .map(|p| blend_on_white(p[0], p[1]))
                .collect();
            (gray, "DeviceGray")
        }
        ColorType::Rgba8 | ColorType::Rgba16 | ColorType::Rgba32F => {
            let rgba = image.to_rgba8();
            let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
            for p in rgba.pixels() {
                rgb.extend([p[0], p[1], p[2]].map(|c| blend_on_white(c, p[3])));
            }
            (rgb, "DeviceRGB")
        }
        _ => (image.to_rgb8().into_raw(), "DeviceRGB"),
    };

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&raw)?;

    Ok(ImageSamples {
        width,
        height,
        color_space,
        filter: "FlateDecode",
        inverted_cmyk: false,
        data: encoder.finish()?,
    })
}

/// Whether a JPEG carries an Adobe APP14 segment before its scan data.
///
/// Adobe writers store CMYK samples inverted; other CMYK JPEGs don't.
fn has_adobe_marker(data: &[u8]) -> bool {
    if !data.starts_with(&[0xFF, 0xD8]) {
        return false;
    }

    let mut pos = 2;
    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            return false;
        }
        let marker = data[pos + 1];
        match marker {
            // Fill byte
            0xFF => {
                pos += 1;
                continue;
            }
            // Start of scan / end of image
            0xDA | 0xD9 => return false,
            _ => {}
        }

        let len = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        if len < 2 {
            return false;
        }
        let end = (pos + 2 + len).min(data.len());
        if marker == 0xEE && data[pos + 4..end].starts_with(b"Adobe") {
            return true;
        }
        pos += 2 + len;
    }

    false
}

/// Composite one channel over a white page
fn blend_on_white(value: u8, alpha: u8) -> u8 {
    let alpha = alpha as u32;
    ((value as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(marker: u8, body: &[u8]) -> Vec<u8> {
        let mut bytes = vec![0xFF, marker];
        bytes.extend(((body.len() + 2) as u16).to_be_bytes());
        bytes.extend(body);
        bytes
    }

    #[test]
    fn test_blend_on_white() {
        assert_eq!(blend_on_white(0, 255), 0);
        assert_eq!(blend_on_white(0, 0), 255);
        assert_eq!(blend_on_white(100, 255), 100);
        assert_eq!(blend_on_white(0, 128), 127);
    }

    #[test]
    fn test_adobe_marker_found_before_scan() {
        let mut jpeg = vec![0xFF, 0xD8];
        jpeg.extend(segment(0xE0, b"JFIF\0\x01\x02"));
        jpeg.extend(segment(0xEE, b"Adobe\0\x64\0\0\0\0\x02"));
        jpeg.extend(segment(0xDA, &[0; 8]));
        assert!(has_adobe_marker(&jpeg));
    }

    #[test]
    fn test_adobe_marker_absent() {
        let mut plain = vec![0xFF, 0xD8];
        plain.extend(segment(0xE0, b"JFIF\0\x01\x02"));
        plain.extend(segment(0xDA, &[0; 8]));
        assert!(!has_adobe_marker(&plain));

        // Only segments before the scan count
        let mut late = vec![0xFF, 0xD8];
        late.extend(segment(0xDA, &[0; 4]));
        late.extend(segment(0xEE, b"Adobe\0\x64\0\0\0\0\x02"));
        assert!(!has_adobe_marker(&late));

        // APP14 from another writer
        let mut other = vec![0xFF, 0xD8];
        other.extend(segment(0xEE, b"Other\0"));
        assert!(!has_adobe_marker(&other));

        assert!(!has_adobe_marker(b"not a jpeg"));
    }

    #[test]
    fn test_adobe_marker_truncated_segment() {
        let mut jpeg = vec![0xFF, 0xD8];
        jpeg.extend(segment(0xE1, &[0; 40]));
        jpeg.truncate(20);
        assert!(!has_adobe_marker(&jpeg));
    }
}
