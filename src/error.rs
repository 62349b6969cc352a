//! Error type shared by every pipeline stage.
//!
//! Each variant maps to one failure category the CLI reports:
//!
//! | Variant | Raised by |
//! |---|---|
//! | [`ConvertError::InvalidArgument`] | option parsing and validation |
//! | [`ConvertError::UnsupportedFormat`] | registry lookups (unknown extension, missing decoder) |
//! | [`ConvertError::Io`] | opening the input, creating or writing the output |
//! | [`ConvertError::Decode`] / [`ConvertError::Encode`] | third-party codec failures |
//! | [`ConvertError::EncodeUnsupported`] | decode-only formats used as output |
//! | [`ConvertError::Config`] | loading the defaults file |

use crate::config::ConfigError;
use crate::imaging::Format;
use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by a format-specific codec routine.
pub type CodecError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported image format '{format}': {reason}")]
    UnsupportedFormat { format: String, reason: String },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to decode {format} image: {source}")]
    Decode { format: Format, source: CodecError },

    #[error("Failed to encode {format} image: {source}")]
    Encode { format: Format, source: CodecError },

    #[error("Encoding to {format} is not supported: {reason}")]
    EncodeUnsupported {
        format: Format,
        reason: &'static str,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn unknown_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
            reason: "no codec is registered for this extension".into(),
        }
    }
}
