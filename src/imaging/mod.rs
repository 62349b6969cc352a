//! Image processing: decode, resize, encode.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** JPEG, PNG, GIF, BMP, TIFF, WebP, ICO | `image::ImageReader` |
//! | **Decode** AVIF | `avif-parse` + `rav1d` |
//! | **Decode** ICNS / JXL / HEIC | `icns` / `jxl-oxide` / `libheif-rs` (feature `heif`) |
//! | **Resize** | `image::DynamicImage::resize_exact` with `Lanczos3` |
//! | **Encode** | `image` encoders; lossy WebP via `webp`; ICNS via `icns` |
//!
//! The module is split into:
//! - **Formats**: the static extension → capability registry
//! - **Parameters**: option types shared by the CLI and the pipeline
//! - **Calculations**: pure functions for fit/fill geometry (unit testable)
//! - **Decode / Resize / Encode**: one dispatcher per pipeline stage
//! - **Codecs**: per-format routines referenced from the registry

mod calculations;
pub mod codecs;
pub mod decode;
pub mod encode;
pub mod formats;
mod params;
pub mod resize;

pub use decode::decode;
pub use encode::{Encoded, encode, resolve_output_format};
pub use formats::{
    DecodeFn, EncodeFn, Format, FormatCapability, capability_for, supported_input_extensions,
    supported_output_extensions,
};
pub use params::{PadColor, ProcessOptions, Quality, ResizeMode, Size, parse_dimension};
pub use resize::resize;
