//! HEIC/HEIF decoding.
//!
//! `libheif-rs` links the system libheif, so it sits behind the `heif` cargo
//! feature. Builds without it keep the format registered and report why
//! decoding is unavailable.

use crate::error::CodecError;
use image::DynamicImage;
use std::fs::File;
use std::io::BufReader;

#[cfg(feature = "heif")]
pub fn decode(mut reader: BufReader<File>) -> Result<DynamicImage, CodecError> {
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};
    use std::io::Read;

    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let lib_heif = LibHeif::new();
    let ctx = HeifContext::read_from_bytes(&bytes)?;
    let handle = ctx.primary_image_handle()?;
    let decoded = lib_heif.decode(&handle, ColorSpace::Rgb(RgbChroma::Rgba), None)?;
    let plane = decoded
        .planes()
        .interleaved
        .ok_or("libheif returned no interleaved RGBA plane")?;

    // Rows may be padded; copy only the visible bytes of each.
    let row_len = plane.width as usize * 4;
    let mut rgba = Vec::with_capacity(row_len * plane.height as usize);
    for row in plane.data.chunks(plane.stride).take(plane.height as usize) {
        rgba.extend_from_slice(&row[..row_len]);
    }
    image::RgbaImage::from_raw(plane.width, plane.height, rgba)
        .map(DynamicImage::ImageRgba8)
        .ok_or_else(|| "HEIF plane does not match its dimensions".into())
}

#[cfg(not(feature = "heif"))]
pub fn decode(_reader: BufReader<File>) -> Result<DynamicImage, CodecError> {
    Err("HEIC/HEIF decoding is disabled in this build (rebuild with the `heif` feature)".into())
}
