//! Encoder dispatch: output format resolution and format-specific encode.

use super::formats::{self, Format, Support};
use super::params::Quality;
use crate::error::ConvertError;
use image::DynamicImage;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Format used when neither an explicit format nor an output extension is given.
pub const DEFAULT_OUTPUT_EXTENSION: &str = "jpg";

/// Decide the output format.
///
/// An explicit format name wins; otherwise the output path's extension is
/// used, falling back to JPEG when the path has none.
pub fn resolve_output_format(
    explicit: Option<&str>,
    output: &Path,
) -> Result<Format, ConvertError> {
    let name = match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => name,
        None => output
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_OUTPUT_EXTENSION),
    };
    formats::lookup(name)
        .map(|entry| entry.format)
        .ok_or_else(|| ConvertError::unknown_format(name))
}

/// A complete encoded file held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    /// Dimensions stored in the file. Codecs with fixed sizes (ICNS) may
    /// differ from the input image.
    pub width: u32,
    pub height: u32,
}

/// Encode `image` as `format` into a complete in-memory file.
///
/// Decode-only formats fail with [`ConvertError::EncodeUnsupported`] without
/// calling any codec. `quality` only reaches lossy encoders.
pub fn encode(
    image: &DynamicImage,
    format: Format,
    quality: Quality,
) -> Result<Encoded, ConvertError> {
    let encode_fn = match formats::entry(format).encode {
        Support::Available(encode_fn) => encode_fn,
        Support::Unavailable(reason) => {
            return Err(ConvertError::EncodeUnsupported { format, reason });
        }
    };

    let mut out = Cursor::new(Vec::new());
    let (width, height) = encode_fn(image, quality, &mut out)
        .map_err(|source| ConvertError::Encode { format, source })?;
    let bytes = out.into_inner();

    debug!(
        %format,
        quality = format.is_lossy().then_some(quality.value()),
        width,
        height,
        bytes = bytes.len(),
        "encoded"
    );
    Ok(Encoded {
        bytes,
        width,
        height,
    })
}
