//! Format registry: extension → decode/encode capability.
//!
//! The registry is a static table built at compile time. Each row names a
//! [`Format`], the extensions that select it, and a [`Support`] value per
//! direction holding either the codec routine or the reason none exists.
//! Decode-only formats carry that reason so the encoder can say *why* it
//! refuses instead of failing somewhere inside a third-party call.
//!
//! | Format | Extensions | Decode | Encode |
//! |---|---|---|---|
//! | JPEG | `jpg`, `jpeg` | yes | yes |
//! | PNG | `png` | yes | yes |
//! | GIF | `gif` | yes | yes |
//! | BMP | `bmp` | yes | yes |
//! | TIFF | `tif`, `tiff` | yes | yes |
//! | WebP | `webp` | yes | yes |
//! | AVIF | `avif` | yes | yes |
//! | ICO | `ico` | yes | yes |
//! | ICNS | `icns` | yes | yes |
//! | HEIC/HEIF | `heic`, `heif` | yes | no |
//! | JXL | `jxl` | yes | no |
//! | JPEG 2000 | `jp2` | no | no |

use super::codecs;
use super::params::Quality;
use crate::error::CodecError;
use image::DynamicImage;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Cursor};

/// Decode routine: consumes the opened input file.
pub type DecodeFn = fn(BufReader<File>) -> Result<DynamicImage, CodecError>;

/// Encode routine: writes the complete encoded image into an in-memory buffer
/// and returns the dimensions actually stored.
pub type EncodeFn =
    fn(&DynamicImage, Quality, &mut Cursor<Vec<u8>>) -> Result<(u32, u32), CodecError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Tiff,
    WebP,
    Avif,
    Ico,
    Icns,
    Heif,
    Jxl,
    Jp2,
}

impl Format {
    pub fn name(self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Gif => "GIF",
            Self::Bmp => "BMP",
            Self::Tiff => "TIFF",
            Self::WebP => "WebP",
            Self::Avif => "AVIF",
            Self::Ico => "ICO",
            Self::Icns => "ICNS",
            Self::Heif => "HEIC/HEIF",
            Self::Jxl => "JXL",
            Self::Jp2 => "JPEG 2000",
        }
    }

    /// Whether the encoder reads [`Quality`].
    pub fn is_lossy(self) -> bool {
        matches!(self, Self::Jpeg | Self::WebP | Self::Avif)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// One direction of a format's support.
#[derive(Clone, Copy)]
pub enum Support<F> {
    Available(F),
    /// No routine is compiled in; the text explains what is missing.
    Unavailable(&'static str),
}

impl<F> Support<F> {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

/// A registry row.
pub struct FormatEntry {
    pub format: Format,
    /// Lowercase, without leading dot. The first one is canonical.
    pub extensions: &'static [&'static str],
    pub decode: Support<DecodeFn>,
    pub encode: Support<EncodeFn>,
    /// Size limits of the encoder, shown in `--list-formats`.
    pub encode_limit: Option<&'static str>,
}

/// Public view of a registry row for one extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatCapability {
    pub extension: &'static str,
    pub format: Format,
    pub can_decode: bool,
    pub can_encode: bool,
    pub encode_limit: Option<&'static str>,
}

static REGISTRY: &[FormatEntry] = &[
    FormatEntry {
        format: Format::Jpeg,
        extensions: &["jpg", "jpeg"],
        decode: Support::Available(codecs::raster::decode_jpeg),
        encode: Support::Available(codecs::raster::encode_jpeg),
        encode_limit: None,
    },
    FormatEntry {
        format: Format::Png,
        extensions: &["png"],
        decode: Support::Available(codecs::raster::decode_png),
        encode: Support::Available(codecs::raster::encode_png),
        encode_limit: None,
    },
    FormatEntry {
        format: Format::Gif,
        extensions: &["gif"],
        decode: Support::Available(codecs::raster::decode_gif),
        encode: Support::Available(codecs::raster::encode_gif),
        encode_limit: None,
    },
    FormatEntry {
        format: Format::Bmp,
        extensions: &["bmp"],
        decode: Support::Available(codecs::raster::decode_bmp),
        encode: Support::Available(codecs::raster::encode_bmp),
        encode_limit: None,
    },
    FormatEntry {
        format: Format::Tiff,
        extensions: &["tiff", "tif"],
        decode: Support::Available(codecs::raster::decode_tiff),
        encode: Support::Available(codecs::raster::encode_tiff),
        encode_limit: None,
    },
    FormatEntry {
        format: Format::WebP,
        extensions: &["webp"],
        decode: Support::Available(codecs::webp::decode),
        encode: Support::Available(codecs::webp::encode),
        encode_limit: None,
    },
    FormatEntry {
        format: Format::Avif,
        extensions: &["avif"],
        decode: Support::Available(codecs::avif::decode),
        encode: Support::Available(codecs::avif::encode),
        encode_limit: None,
    },
    FormatEntry {
        format: Format::Ico,
        extensions: &["ico"],
        decode: Support::Available(codecs::raster::decode_ico),
        encode: Support::Available(codecs::raster::encode_ico),
        encode_limit: Some("at most 256x256"),
    },
    FormatEntry {
        format: Format::Icns,
        extensions: &["icns"],
        decode: Support::Available(codecs::icns::decode),
        encode: Support::Available(codecs::icns::encode),
        encode_limit: Some("scaled to a square of 16-1024 px"),
    },
    FormatEntry {
        format: Format::Heif,
        extensions: &["heic", "heif"],
        decode: Support::Available(codecs::heif::decode),
        encode: Support::Unavailable(
            "libheif-rs only provides decoding capability; no HEIC/HEIF encoder is available",
        ),
        encode_limit: None,
    },
    FormatEntry {
        format: Format::Jxl,
        extensions: &["jxl"],
        decode: Support::Available(codecs::jxl::decode),
        encode: Support::Unavailable(
            "jxl-oxide only provides decoding capability; no JPEG XL encoder is available",
        ),
        encode_limit: None,
    },
    FormatEntry {
        format: Format::Jp2,
        extensions: &["jp2"],
        decode: Support::Unavailable("no JPEG 2000 decoder is available"),
        encode: Support::Unavailable("no JPEG 2000 encoder is available"),
        encode_limit: None,
    },
];

/// Lowercase an extension and strip a leading dot.
pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// Find the registry row that owns `extension` (case-insensitive, dot optional).
pub fn lookup(extension: &str) -> Option<&'static FormatEntry> {
    let wanted = normalize_extension(extension);
    REGISTRY
        .iter()
        .find(|entry| entry.extensions.iter().any(|ext| *ext == wanted))
}

/// The registry row for a known format.
pub fn entry(format: Format) -> &'static FormatEntry {
    REGISTRY
        .iter()
        .find(|entry| entry.format == format)
        .unwrap_or_else(|| unreachable!("every Format variant has a registry row"))
}

/// Capability for `extension`, or `None` if no format claims it.
pub fn capability_for(extension: &str) -> Option<FormatCapability> {
    let wanted = normalize_extension(extension);
    lookup(&wanted).and_then(|entry| {
        let extension = entry.extensions.iter().copied().find(|ext| *ext == wanted)?;
        Some(FormatCapability {
            extension,
            format: entry.format,
            can_decode: entry.decode.is_available(),
            can_encode: entry.encode.is_available(),
            encode_limit: entry.encode_limit,
        })
    })
}

/// Every registered extension with its capability, in registry order.
pub fn capabilities() -> impl Iterator<Item = FormatCapability> {
    REGISTRY.iter().flat_map(|entry| {
        entry.extensions.iter().copied().map(|extension| FormatCapability {
            extension,
            format: entry.format,
            can_decode: entry.decode.is_available(),
            can_encode: entry.encode.is_available(),
            encode_limit: entry.encode_limit,
        })
    })
}

/// Extensions accepted as input.
pub fn supported_input_extensions() -> Vec<&'static str> {
    capabilities()
        .filter(|c| c.can_decode)
        .map(|c| c.extension)
        .collect()
}

/// Extensions accepted as output.
pub fn supported_output_extensions() -> Vec<&'static str> {
    capabilities()
        .filter(|c| c.can_encode)
        .map(|c| c.extension)
        .collect()
}
