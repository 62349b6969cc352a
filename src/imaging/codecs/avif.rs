//! AVIF in both directions, pure Rust.
//!
//! | Direction | Crate / function |
//! |---|---|
//! | Encode | `image::codecs::avif::AvifEncoder` (rav1e, speed 6) |
//! | Decode | `avif-parse` (container) + `rav1d` (AV1) + BT.601 YUV→RGB |
//!
//! The `image` crate's `"avif"` feature only enables the encoder. Its decoder
//! needs `"avif-native"` (the dav1d C library), so decoding drives `rav1d`
//! directly. When the container has an alpha item it is decoded the same way
//! and merged into RGBA.

use crate::error::CodecError;
use crate::imaging::params::Quality;
use image::codecs::avif::AvifEncoder;
use image::{DynamicImage, RgbImage, RgbaImage};
use std::fs::File;
use std::io::{BufReader, Cursor, Read};

const ENCODE_SPEED: u8 = 6;

pub fn encode(
    image: &DynamicImage,
    quality: Quality,
    out: &mut Cursor<Vec<u8>>,
) -> Result<(u32, u32), CodecError> {
    let encoder = AvifEncoder::new_with_speed_quality(out, ENCODE_SPEED, quality.value() as u8);
    super::raster::to_8bit(image).write_with_encoder(encoder)?;
    Ok((image.width(), image.height()))
}

pub fn decode(mut reader: BufReader<File>) -> Result<DynamicImage, CodecError> {
    let mut file_data = Vec::new();
    reader.read_to_end(&mut file_data)?;
    decode_bytes(&file_data)
}

fn decode_bytes(file_data: &[u8]) -> Result<DynamicImage, CodecError> {
    let avif = avif_parse::read_avif(&mut Cursor::new(file_data))
        .map_err(|e| format!("invalid AVIF container: {e:?}"))?;
    let (width, height, rgb) = decode_av1(&avif.primary_item, YuvPlanes::to_rgb)?;

    let Some(alpha_item) = avif.alpha_item.as_deref() else {
        return RgbImage::from_raw(width, height, rgb)
            .map(DynamicImage::ImageRgb8)
            .ok_or_else(|| "decoded AVIF buffer does not match its dimensions".into());
    };

    let (alpha_width, alpha_height, alpha) = decode_av1(alpha_item, YuvPlanes::to_luma)?;
    if (alpha_width, alpha_height) != (width, height) {
        return Err(format!(
            "AVIF alpha plane is {alpha_width}x{alpha_height}, color is {width}x{height}"
        )
        .into());
    }
    let rgba: Vec<u8> = rgb
        .chunks_exact(3)
        .zip(alpha)
        .flat_map(|(c, a)| [c[0], c[1], c[2], a])
        .collect();
    RgbaImage::from_raw(width, height, rgba)
        .map(DynamicImage::ImageRgba8)
        .ok_or_else(|| "decoded AVIF buffer does not match its dimensions".into())
}

/// Decode one AV1 item with rav1d and convert its planes with `convert`.
fn decode_av1<T>(
    av1_bytes: &[u8],
    convert: fn(&YuvPlanes) -> T,
) -> Result<(u32, u32, T), CodecError> {
    use rav1d::include::dav1d::data::Dav1dData;
    use rav1d::include::dav1d::dav1d::Dav1dSettings;
    use rav1d::include::dav1d::headers::{
        DAV1D_PIXEL_LAYOUT_I400, DAV1D_PIXEL_LAYOUT_I420, DAV1D_PIXEL_LAYOUT_I422,
        DAV1D_PIXEL_LAYOUT_I444,
    };
    use rav1d::include::dav1d::picture::Dav1dPicture;
    use rav1d::src::lib as dav1d;
    use std::ptr::NonNull;

    let mut settings = std::mem::MaybeUninit::<Dav1dSettings>::uninit();
    unsafe { dav1d::dav1d_default_settings(NonNull::new(settings.as_mut_ptr()).ok_or("null settings")?) };
    let mut settings = unsafe { settings.assume_init() };
    settings.n_threads = 1;
    settings.max_frame_delay = 1;

    let mut ctx = None;
    let rc = unsafe { dav1d::dav1d_open(NonNull::new(&mut ctx), NonNull::new(&mut settings)) };
    if rc.0 != 0 {
        return Err(format!("rav1d open failed ({})", rc.0).into());
    }

    // Everything between open and close; the context is closed on every path.
    let decode_picture = || -> Result<(u32, u32, T), CodecError> {
        let mut data = Dav1dData::default();
        let buf_ptr = unsafe { dav1d::dav1d_data_create(NonNull::new(&mut data), av1_bytes.len()) };
        if buf_ptr.is_null() {
            return Err("rav1d data_create failed".into());
        }
        unsafe { std::ptr::copy_nonoverlapping(av1_bytes.as_ptr(), buf_ptr, av1_bytes.len()) };

        let rc = unsafe { dav1d::dav1d_send_data(ctx, NonNull::new(&mut data)) };
        if rc.0 != 0 {
            unsafe { dav1d::dav1d_data_unref(NonNull::new(&mut data)) };
            return Err(format!("rav1d send_data failed ({})", rc.0).into());
        }

        let mut pic: Dav1dPicture = unsafe { std::mem::zeroed() };
        let rc = unsafe { dav1d::dav1d_get_picture(ctx, NonNull::new(&mut pic)) };
        if rc.0 != 0 {
            return Err(format!("rav1d get_picture failed ({})", rc.0).into());
        }

        let width = pic.p.w as u32;
        let height = pic.p.h as u32;
        let planes = match (pic.data[0], pic.data[1], pic.data[2]) {
            (Some(y), _, _) if pic.p.layout == DAV1D_PIXEL_LAYOUT_I400 => {
                let y = y.as_ptr() as *const u8;
                Ok(YuvPlanes {
                    y_ptr: y,
                    u_ptr: y,
                    v_ptr: y,
                    y_stride: pic.stride[0],
                    uv_stride: 0,
                    width,
                    height,
                    bpc: pic.p.bpc as u32,
                    subsampling: (false, false),
                    monochrome: true,
                })
            }
            (Some(y), Some(u), Some(v)) => {
                let subsampling = match pic.p.layout {
                    DAV1D_PIXEL_LAYOUT_I420 => Ok((true, true)),
                    DAV1D_PIXEL_LAYOUT_I422 => Ok((true, false)),
                    DAV1D_PIXEL_LAYOUT_I444 => Ok((false, false)),
                    other => Err(format!("unsupported AVIF pixel layout: {other}")),
                };
                subsampling.map(|subsampling| YuvPlanes {
                    y_ptr: y.as_ptr() as *const u8,
                    u_ptr: u.as_ptr() as *const u8,
                    v_ptr: v.as_ptr() as *const u8,
                    y_stride: pic.stride[0],
                    uv_stride: pic.stride[1],
                    width,
                    height,
                    bpc: pic.p.bpc as u32,
                    subsampling,
                    monochrome: false,
                })
            }
            _ => Err("rav1d returned a picture without planes".to_string()),
        };
        let converted = planes.map(|planes| convert(&planes));
        unsafe { dav1d::dav1d_picture_unref(NonNull::new(&mut pic)) };
        Ok((width, height, converted?))
    };

    let decoded = decode_picture();
    unsafe { dav1d::dav1d_close(NonNull::new(&mut ctx)) };
    decoded
}

/// Borrowed YUV planes of a decoded rav1d picture.
struct YuvPlanes {
    y_ptr: *const u8,
    u_ptr: *const u8,
    v_ptr: *const u8,
    y_stride: isize,
    uv_stride: isize,
    width: u32,
    height: u32,
    bpc: u32,
    /// Chroma subsampling (horizontal, vertical); I420 is (true, true).
    subsampling: (bool, bool),
    monochrome: bool,
}

impl YuvPlanes {
    /// The luma plane alone, scaled to 8 bits. Used for alpha items.
    fn to_luma(&self) -> Vec<u8> {
        let scale = 255.0 / ((1u32 << self.bpc) - 1) as f32;
        let mut luma = Vec::with_capacity((self.width * self.height) as usize);
        for row in 0..self.height {
            for col in 0..self.width {
                let y = read_sample(self.y_ptr, self.y_stride, col, row, self.bpc);
                luma.push((y * scale).clamp(0.0, 255.0) as u8);
            }
        }
        luma
    }

    /// Convert to interleaved RGB8 with BT.601 coefficients.
    fn to_rgb(&self) -> Vec<u8> {
        let max_val = ((1u32 << self.bpc) - 1) as f32;
        let center = (1u32 << (self.bpc - 1)) as f32;
        let scale = 255.0 / max_val;
        let (ss_x, ss_y) = self.subsampling;

        let mut rgb = Vec::with_capacity((self.width * self.height * 3) as usize);
        for row in 0..self.height {
            for col in 0..self.width {
                let y = read_sample(self.y_ptr, self.y_stride, col, row, self.bpc);
                let pixel = if self.monochrome {
                    let v = (y * scale).clamp(0.0, 255.0);
                    [v, v, v]
                } else {
                    let c_col = if ss_x { col / 2 } else { col };
                    let c_row = if ss_y { row / 2 } else { row };
                    let cb = read_sample(self.u_ptr, self.uv_stride, c_col, c_row, self.bpc) - center;
                    let cr = read_sample(self.v_ptr, self.uv_stride, c_col, c_row, self.bpc) - center;
                    [
                        ((y + 1.402 * cr) * scale).clamp(0.0, 255.0),
                        ((y - 0.344136 * cb - 0.714136 * cr) * scale).clamp(0.0, 255.0),
                        ((y + 1.772 * cb) * scale).clamp(0.0, 255.0),
                    ]
                };
                rgb.extend(pixel.map(|c| c as u8));
            }
        }
        rgb
    }
}

/// One sample from a plane; depths above 8 bits are stored as u16.
#[inline]
fn read_sample(ptr: *const u8, stride: isize, x: u32, y: u32, bpc: u32) -> f32 {
    if bpc <= 8 {
        (unsafe { *ptr.offset(y as isize * stride + x as isize) }) as f32
    } else {
        let byte_offset = y as isize * stride + x as isize * 2;
        (unsafe { (ptr.offset(byte_offset) as *const u16).read_unaligned() }) as f32
    }
}
