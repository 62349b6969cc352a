//! Format-specific decode and encode routines.
//!
//! Every function here matches [`DecodeFn`](super::formats::DecodeFn) or
//! [`EncodeFn`](super::formats::EncodeFn) and is only reached through the
//! registry in [`formats`](super::formats).

pub mod avif;
pub mod heif;
pub mod icns;
pub mod jxl;
pub mod raster;
pub mod webp;
