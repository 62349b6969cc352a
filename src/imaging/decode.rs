//! Decoder dispatch: path → registry lookup → format-specific decode.

use super::formats::{self, Support};
use crate::error::ConvertError;
use image::DynamicImage;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Decode the image at `path`, choosing the codec from its extension.
///
/// Fails with [`ConvertError::UnsupportedFormat`] before touching the file
/// when the extension is unknown or has no decoder. The file handle is owned
/// by the codec call and closed when it returns.
pub fn decode(path: &Path) -> Result<DynamicImage, ConvertError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let entry = formats::lookup(extension).ok_or_else(|| {
        ConvertError::unknown_format(if extension.is_empty() {
            format!("{} (no extension)", path.display())
        } else {
            extension.to_string()
        })
    })?;

    let decode_fn = match entry.decode {
        Support::Available(decode_fn) => decode_fn,
        Support::Unavailable(reason) => {
            return Err(ConvertError::UnsupportedFormat {
                format: entry.format.to_string(),
                reason: reason.to_string(),
            });
        }
    };

    let file = File::open(path).map_err(|e| ConvertError::io(path, e))?;
    let image = decode_fn(BufReader::new(file)).map_err(|source| ConvertError::Decode {
        format: entry.format,
        source,
    })?;

    debug!(
        format = %entry.format,
        width = image.width(),
        height = image.height(),
        color = ?image.color(),
        "decoded {}",
        path.display()
    );
    Ok(image)
}
