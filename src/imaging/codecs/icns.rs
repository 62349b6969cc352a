//! Apple icon families (`.icns`) via the `icns` crate.
//!
//! Decoding returns the largest icon in the family. Encoding writes a single
//! RGBA icon; ICNS only stores fixed square sizes, so other shapes are scaled
//! to the largest supported square that does not exceed the longer edge.

use crate::error::CodecError;
use crate::imaging::params::Quality;
use crate::imaging::resize::FILTER;
use icns::{IconFamily, Image, PixelFormat};
use image::{DynamicImage, RgbaImage};
use std::fs::File;
use std::io::{BufReader, Cursor};

/// Square edge lengths with an ICNS icon type.
const ICON_EDGES: [u32; 7] = [16, 32, 64, 128, 256, 512, 1024];

pub fn decode(reader: BufReader<File>) -> Result<DynamicImage, CodecError> {
    let family = IconFamily::read(reader)?;
    let largest = family
        .available_icons()
        .into_iter()
        .max_by_key(|icon_type| icon_type.pixel_width() * icon_type.pixel_height())
        .ok_or("icon family contains no icons")?;
    let icon = family
        .get_icon_with_type(largest)?
        .convert_to(PixelFormat::RGBA);
    let (width, height) = (icon.width(), icon.height());
    RgbaImage::from_raw(width, height, icon.into_data().into_vec())
        .map(DynamicImage::ImageRgba8)
        .ok_or_else(|| "icon data does not match its dimensions".into())
}

pub fn encode(
    image: &DynamicImage,
    _quality: Quality,
    out: &mut Cursor<Vec<u8>>,
) -> Result<(u32, u32), CodecError> {
    let edge = icon_edge(image.width(), image.height());
    let rgba = if (image.width(), image.height()) == (edge, edge) {
        image.to_rgba8()
    } else {
        image.resize_exact(edge, edge, FILTER).to_rgba8()
    };
    let icon = Image::from_data(PixelFormat::RGBA, edge, edge, rgba.into_raw())?;
    let mut family = IconFamily::new();
    family.add_icon(&icon)?;
    family.write(out)?;
    Ok((edge, edge))
}

/// Largest supported edge not exceeding the longer side (16 at minimum).
fn icon_edge(width: u32, height: u32) -> u32 {
    let longer = width.max(height);
    ICON_EDGES
        .iter()
        .rev()
        .copied()
        .find(|&edge| edge <= longer)
        .unwrap_or(ICON_EDGES[0])
}
