//! Formats served directly by the `image` crate: JPEG, PNG, GIF, BMP, TIFF, ICO.
//!
//! Only JPEG reads [`Quality`]; the others are lossless.

use crate::error::CodecError;
use crate::imaging::params::Quality;
use image::codecs::bmp::BmpEncoder;
use image::codecs::gif::GifEncoder;
use image::codecs::ico::IcoEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::tiff::TiffEncoder;
use image::{DynamicImage, Frame, GenericImageView, ImageFormat, ImageReader};
use std::fs::File;
use std::io::{BufReader, Cursor};

fn decode_as(reader: BufReader<File>, format: ImageFormat) -> Result<DynamicImage, CodecError> {
    Ok(ImageReader::with_format(reader, format).decode()?)
}

pub fn decode_jpeg(reader: BufReader<File>) -> Result<DynamicImage, CodecError> {
    decode_as(reader, ImageFormat::Jpeg)
}

pub fn decode_png(reader: BufReader<File>) -> Result<DynamicImage, CodecError> {
    decode_as(reader, ImageFormat::Png)
}

pub fn decode_gif(reader: BufReader<File>) -> Result<DynamicImage, CodecError> {
    decode_as(reader, ImageFormat::Gif)
}

pub fn decode_bmp(reader: BufReader<File>) -> Result<DynamicImage, CodecError> {
    decode_as(reader, ImageFormat::Bmp)
}

pub fn decode_tiff(reader: BufReader<File>) -> Result<DynamicImage, CodecError> {
    decode_as(reader, ImageFormat::Tiff)
}

pub fn decode_ico(reader: BufReader<File>) -> Result<DynamicImage, CodecError> {
    decode_as(reader, ImageFormat::Ico)
}

/// Narrow to 8-bit RGB or RGBA, the layouts every encoder here accepts.
pub(crate) fn to_8bit(image: &DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => image.clone(),
        other if other.color().has_alpha() => DynamicImage::ImageRgba8(other.to_rgba8()),
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

pub fn encode_jpeg(
    image: &DynamicImage,
    quality: Quality,
    out: &mut Cursor<Vec<u8>>,
) -> Result<(u32, u32), CodecError> {
    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let encoder = JpegEncoder::new_with_quality(out, quality.value() as u8);
    rgb.write_with_encoder(encoder)?;
    Ok(rgb.dimensions())
}

pub fn encode_png(
    image: &DynamicImage,
    _quality: Quality,
    out: &mut Cursor<Vec<u8>>,
) -> Result<(u32, u32), CodecError> {
    to_8bit(image).write_with_encoder(PngEncoder::new(out))?;
    Ok(image.dimensions())
}

pub fn encode_gif(
    image: &DynamicImage,
    _quality: Quality,
    out: &mut Cursor<Vec<u8>>,
) -> Result<(u32, u32), CodecError> {
    let mut encoder = GifEncoder::new(out);
    encoder.encode_frame(Frame::new(image.to_rgba8()))?;
    Ok(image.dimensions())
}

pub fn encode_bmp(
    image: &DynamicImage,
    _quality: Quality,
    out: &mut Cursor<Vec<u8>>,
) -> Result<(u32, u32), CodecError> {
    to_8bit(image).write_with_encoder(BmpEncoder::new(out))?;
    Ok(image.dimensions())
}

pub fn encode_tiff(
    image: &DynamicImage,
    _quality: Quality,
    out: &mut Cursor<Vec<u8>>,
) -> Result<(u32, u32), CodecError> {
    to_8bit(image).write_with_encoder(TiffEncoder::new(out))?;
    Ok(image.dimensions())
}

/// Largest edge an ICO entry can store.
pub const ICO_MAX_EDGE: u32 = 256;

/// ICO entries are limited to 256×256; larger images are rejected.
pub fn encode_ico(
    image: &DynamicImage,
    _quality: Quality,
    out: &mut Cursor<Vec<u8>>,
) -> Result<(u32, u32), CodecError> {
    let (width, height) = image.dimensions();
    if width > ICO_MAX_EDGE || height > ICO_MAX_EDGE {
        return Err(format!(
            "ICO images are limited to {ICO_MAX_EDGE}x{ICO_MAX_EDGE} pixels, got {width}x{height}"
        )
        .into());
    }
    DynamicImage::ImageRgba8(image.to_rgba8()).write_with_encoder(IcoEncoder::new(out))?;
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, ImageBuffer, Luma, Rgb, RgbImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        }))
    }

    fn encoded(encode: crate::imaging::EncodeFn, image: &DynamicImage, quality: u32) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        encode(image, Quality::try_new(quality).unwrap(), &mut out).unwrap();
        out.into_inner()
    }

    #[test]
    fn to_8bit_keeps_alpha_and_drops_depth() {
        let wide = DynamicImage::ImageRgba16(ImageBuffer::new(4, 4));
        assert!(matches!(to_8bit(&wide), DynamicImage::ImageRgba8(_)));

        let gray: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::new(4, 4);
        assert!(matches!(
            to_8bit(&DynamicImage::ImageLuma16(gray)),
            DynamicImage::ImageRgb8(_)
        ));
    }

    #[test]
    fn jpeg_quality_changes_output_size() {
        let image = gradient(128, 128);
        let low = encoded(encode_jpeg, &image, 10);
        let high = encoded(encode_jpeg, &image, 95);
        assert!(low.len() < high.len(), "{} !< {}", low.len(), high.len());
    }

    #[test]
    fn jpeg_accepts_rgba_input() {
        let image = DynamicImage::ImageRgba8(gradient(16, 16).to_rgba8());
        let bytes = encoded(encode_jpeg, &image, 85);
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn lossless_encoders_ignore_quality() {
        let image = gradient(32, 24);
        for encode in [encode_png, encode_bmp, encode_tiff, encode_gif] {
            assert_eq!(encoded(encode, &image, 5), encoded(encode, &image, 100));
        }
    }

    #[test]
    fn png_output_decodes_to_same_dimensions() {
        let bytes = encoded(encode_png, &gradient(33, 17), 85);
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!(decoded.dimensions(), (33, 17));
    }

    #[test]
    fn ico_rejects_oversized_image() {
        let mut out = Cursor::new(Vec::new());
        let err = encode_ico(&gradient(300, 10), Quality::default(), &mut out).unwrap_err();
        assert_eq!(
            err.to_string(),
            "ICO images are limited to 256x256 pixels, got 300x10"
        );
        assert!(out.into_inner().is_empty());
    }
}
