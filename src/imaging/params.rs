//! Parameter types for a single conversion.
//!
//! These types describe *what* to produce, not *how*. They are parsed from
//! CLI flags and config values, then handed to the
//! [`resize`](super::resize) engine and the [`encode`](super::encode)
//! dispatcher unchanged.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100, default 85).
//! - [`ResizeMode`]: Fit / Fill / Stretch aspect-ratio policy.
//! - [`PadColor`]: Letterbox color for Fit mode, parsed from `#RRGGBB`.
//! - [`Size`]: A `WIDTHxHEIGHT` pair.
//! - [`ProcessOptions`]: Everything one pipeline run needs.

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Quality setting for lossy image encoding (1-100).
///
/// Only JPEG, WebP and AVIF read it; lossless encoders ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    /// Reject values outside 1–100 instead of clamping them.
    pub fn try_new(value: u32) -> Result<Self, ConvertError> {
        if (1..=100).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConvertError::InvalidArgument(format!(
                "quality must be between 1 and 100, got {value}"
            )))
        }
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// How the source aspect ratio is treated when targeting a `width × height` box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    /// Scale to fit inside the box, then pad the remainder with the pad color.
    #[default]
    Fit,
    /// Scale to cover the box, then center-crop the overflow.
    Fill,
    /// Scale each axis independently to the exact box.
    Stretch,
}

impl FromStr for ResizeMode {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fit" => Ok(Self::Fit),
            "fill" => Ok(Self::Fill),
            "stretch" => Ok(Self::Stretch),
            _ => Err(ConvertError::InvalidArgument(format!(
                "invalid resize mode: {s} (expected fit, fill or stretch)"
            ))),
        }
    }
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fit => "fit",
            Self::Fill => "fill",
            Self::Stretch => "stretch",
        })
    }
}

/// Opaque RGB color used for Fit-mode padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PadColor(pub [u8; 3]);

impl PadColor {
    pub const WHITE: Self = Self([255, 255, 255]);

    /// The color as a fully opaque RGBA pixel.
    pub fn to_rgba(self) -> image::Rgba<u8> {
        let [r, g, b] = self.0;
        image::Rgba([r, g, b, 255])
    }
}

impl Default for PadColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for PadColor {
    type Err = ConvertError;

    /// Parse `#RRGGBB` (the `#` is optional, digits are case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            ConvertError::InvalidArgument(format!(
                "invalid pad color: {s} (expected #RRGGBB)"
            ))
        };
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl TryFrom<String> for PadColor {
    type Error = ConvertError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PadColor> for String {
    fn from(color: PadColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for PadColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}

/// Target box given as `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl FromStr for Size {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s.split_once('x').ok_or_else(|| {
            ConvertError::InvalidArgument(format!(
                "invalid size format: {s} (expected WIDTHxHEIGHT)"
            ))
        })?;
        Ok(Self {
            width: parse_dimension(w, "width")?,
            height: parse_dimension(h, "height")?,
        })
    }
}

/// Parse one positive pixel dimension.
pub fn parse_dimension(value: &str, axis: &str) -> Result<u32, ConvertError> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConvertError::InvalidArgument(format!(
            "invalid {axis}: {value} (expected a positive integer)"
        ))),
    }
}

/// Options for one decode → resize → encode run.
///
/// Built once per invocation (see [`crate::config::ConvertConfig::resolve`])
/// and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOptions {
    pub width: u32,
    pub height: u32,
    pub mode: ResizeMode,
    pub quality: Quality,
    /// Explicit output format name; derived from the output path when `None`.
    pub output_format: Option<String>,
    pub pad_color: PadColor,
}

impl ProcessOptions {
    pub fn new(width: u32, height: u32, mode: ResizeMode) -> Self {
        Self {
            width,
            height,
            mode,
            ..Self::default()
        }
    }

    /// Check the invariants the resize engine relies on.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConvertError::InvalidArgument(format!(
                "target size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Quality::try_new(self.quality.value())?;
        Ok(())
    }
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 512,
            mode: ResizeMode::Fit,
            quality: Quality::default(),
            output_format: None,
            pad_color: PadColor::WHITE,
        }
    }
}
