//! Conversion defaults loaded from `nim.toml`.
//!
//! Resolution order, lowest precedence first:
//!
//! 1. Stock defaults (see [`stock_config_toml`])
//! 2. A config file: `--config <PATH>`, or `nim.toml` in the working directory
//! 3. CLI flags ([`Overrides`])
//!
//! `--size WIDTHxHEIGHT` beats `--width`/`--height` and every config value.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//! width = 800
//! height = 512
//! mode = "fit"           # fit | fill | stretch
//! quality = 85           # 1-100, lossy formats only
//! pad_color = "#FFFFFF"  # Fit-mode letterbox color
//! # format = "png"       # Unset: derived from the output extension
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::error::ConvertError;
use crate::imaging::{PadColor, ProcessOptions, Quality, ResizeMode, Size};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "nim.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Values from `nim.toml`. Missing keys keep their stock default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    pub width: u32,
    pub height: u32,
    pub mode: ResizeMode,
    pub quality: u32,
    /// Output format name; `None` derives it from the output path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub pad_color: PadColor,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        let stock = ProcessOptions::default();
        Self {
            width: stock.width,
            height: stock.height,
            mode: stock.mode,
            quality: stock.quality.value(),
            format: stock.output_format,
            pad_color: stock.pad_color,
        }
    }
}

impl ConvertConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Validation(
                "width and height must be positive".into(),
            ));
        }
        if !(1..=100).contains(&self.quality) {
            return Err(ConfigError::Validation("quality must be 1-100".into()));
        }
        if self.format.as_deref().is_some_and(|f| f.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "format must not be empty; remove the key to derive it from the output path"
                    .into(),
            ));
        }
        Ok(())
    }

    /// Layer CLI overrides on top and produce the options for one run.
    pub fn resolve(&self, overrides: &Overrides) -> Result<ProcessOptions, ConvertError> {
        let (width, height) = match overrides.size {
            Some(Size { width, height }) => (width, height),
            None => (
                overrides.width.unwrap_or(self.width),
                overrides.height.unwrap_or(self.height),
            ),
        };
        let options = ProcessOptions {
            width,
            height,
            mode: overrides.mode.unwrap_or(self.mode),
            quality: Quality::try_new(overrides.quality.unwrap_or(self.quality))?,
            output_format: overrides.format.clone().or_else(|| self.format.clone()),
            pad_color: overrides.pad_color.unwrap_or(self.pad_color),
        };
        options.validate()?;
        Ok(options)
    }
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub size: Option<Size>,
    pub mode: Option<ResizeMode>,
    pub quality: Option<u32>,
    pub format: Option<String>,
    pub pad_color: Option<PadColor>,
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<ConvertConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ConvertConfig = toml::from_str(&content).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Find the config for this run.
///
/// An explicit path must exist. Otherwise `nim.toml` in `dir` is used when
/// present, and stock defaults when not.
pub fn discover_config(explicit: Option<&Path>, dir: &Path) -> Result<ConvertConfig, ConfigError> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    let candidate = dir.join(CONFIG_FILE_NAME);
    if candidate.is_file() {
        load_config(&candidate)
    } else {
        Ok(ConvertConfig::default())
    }
}

/// Returns a fully-commented stock `nim.toml` with all keys and explanations.
///
/// Used by `nim --gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# nim configuration
# =================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Command-line flags override them.
#
# nim reads ./nim.toml when present, or the file passed with --config.
# Unknown keys will cause an error.

# Target box in pixels. `--size WIDTHxHEIGHT` overrides both.
width = 800
height = 512

# How the source aspect ratio is handled:
#   fit     - scale to fit inside the box, pad the rest with pad_color
#   fill    - scale to cover the box, crop the overflow from the center
#   stretch - scale each axis independently to the exact box
mode = "fit"

# Encoding quality for JPEG, WebP and AVIF (1 = worst, 100 = best).
# Lossless formats ignore it.
quality = 85

# Letterbox color for fit mode, as #RRGGBB.
pad_color = "#FFFFFF"

# Output format (jpg, png, gif, bmp, tiff, webp, avif, ico, icns).
# When unset, it is derived from the output file extension, and JPEG is
# used if the output has no extension.
# format = "png"
"##
}
