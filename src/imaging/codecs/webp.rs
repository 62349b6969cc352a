//! WebP: `image` decodes, the `webp` crate encodes lossy at the requested quality.

use crate::error::CodecError;
use crate::imaging::params::Quality;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::fs::File;
use std::io::{BufReader, Cursor, Write};

pub fn decode(reader: BufReader<File>) -> Result<DynamicImage, CodecError> {
    Ok(ImageReader::with_format(reader, ImageFormat::WebP).decode()?)
}

pub fn encode(
    image: &DynamicImage,
    quality: Quality,
    out: &mut Cursor<Vec<u8>>,
) -> Result<(u32, u32), CodecError> {
    let (width, height) = (image.width(), image.height());
    let encoded = if image.color().has_alpha() {
        let rgba = image.to_rgba8();
        webp::Encoder::from_rgba(&rgba, width, height)
            .encode_simple(false, quality.value() as f32)
            .map_err(|e| format!("libwebp rejected the image: {e:?}"))?
            .to_vec()
    } else {
        let rgb = image.to_rgb8();
        webp::Encoder::from_rgb(&rgb, width, height)
            .encode_simple(false, quality.value() as f32)
            .map_err(|e| format!("libwebp rejected the image: {e:?}"))?
            .to_vec()
    };
    out.write_all(&encoded)?;
    Ok((width, height))
}
