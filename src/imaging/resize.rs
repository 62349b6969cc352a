//! Resize engine: applies one [`ResizeMode`] to a decoded image.
//!
//! All three modes resample with Lanczos3. The filter is fixed, not an option.

use super::calculations::{calculate_fill_dimensions, calculate_fit_dimensions, center_offset};
use super::params::{PadColor, ProcessOptions, ResizeMode};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, RgbaImage};
use tracing::debug;

/// Resampling filter used by every resize in the crate.
pub(crate) const FILTER: FilterType = FilterType::Lanczos3;

/// Resize `image` to the box in `options` using its resize mode.
///
/// Output is always exactly `options.width × options.height`. The options
/// are expected to have passed [`ProcessOptions::validate`].
pub fn resize(image: DynamicImage, options: &ProcessOptions) -> DynamicImage {
    let target = (options.width, options.height);
    debug!(
        mode = %options.mode,
        from = ?image.dimensions(),
        to = ?target,
        "resizing"
    );
    match options.mode {
        ResizeMode::Fit => fit(image, target, options.pad_color),
        ResizeMode::Fill => fill(image, target),
        ResizeMode::Stretch => scale_to(image, target),
    }
}

/// Scale inside the box, then letterbox the remainder with `pad`.
fn fit(image: DynamicImage, target: (u32, u32), pad: PadColor) -> DynamicImage {
    let (w, h) = calculate_fit_dimensions(image.dimensions(), target);
    let scaled = scale_to(image, (w, h));
    if (w, h) == target {
        return scaled;
    }

    let (tgt_w, tgt_h) = target;
    let mut canvas = RgbaImage::from_pixel(tgt_w, tgt_h, pad.to_rgba());
    imageops::replace(
        &mut canvas,
        &scaled.to_rgba8(),
        center_offset(tgt_w, w) as i64,
        center_offset(tgt_h, h) as i64,
    );
    DynamicImage::ImageRgba8(canvas)
}

/// Scale to cover the box, then crop the overflow around the center.
fn fill(image: DynamicImage, target: (u32, u32)) -> DynamicImage {
    let (w, h) = calculate_fill_dimensions(image.dimensions(), target);
    let scaled = scale_to(image, (w, h));
    if (w, h) == target {
        return scaled;
    }

    let (tgt_w, tgt_h) = target;
    scaled.crop_imm(center_offset(w, tgt_w), center_offset(h, tgt_h), tgt_w, tgt_h)
}

fn scale_to(image: DynamicImage, (w, h): (u32, u32)) -> DynamicImage {
    if image.dimensions() == (w, h) {
        image
    } else {
        image.resize_exact(w, h, FILTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn solid(width: u32, height: u32, color: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(color)))
    }

    /// Left half red, right half blue.
    fn split_horizontal(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        }))
    }

    fn options(width: u32, height: u32, mode: ResizeMode) -> ProcessOptions {
        ProcessOptions::new(width, height, mode)
    }

    #[test]
    fn fit_square_upscale_needs_no_padding() {
        let out = resize(
            solid(100, 100, [255, 0, 0, 255]),
            &ProcessOptions {
                pad_color: PadColor([0, 255, 0]),
                ..options(200, 200, ResizeMode::Fit)
            },
        );
        assert_eq!(out.dimensions(), (200, 200));
        let rgba = out.to_rgba8();
        assert!(rgba.pixels().all(|p| p.0 == [255, 0, 0, 255]));
    }

    #[test]
    fn fit_pads_top_and_bottom_with_pad_color() {
        let out = resize(
            solid(100, 50, [0, 0, 255, 255]),
            &ProcessOptions {
                pad_color: PadColor([255, 0, 0]),
                ..options(100, 100, ResizeMode::Fit)
            },
        );
        assert_eq!(out.dimensions(), (100, 100));
        let rgba = out.to_rgba8();
        for x in 0..100 {
            for y in (0..25).chain(75..100) {
                assert_eq!(rgba.get_pixel(x, y).0, [255, 0, 0, 255], "band at {x},{y}");
            }
            for y in 25..75 {
                assert_eq!(rgba.get_pixel(x, y).0, [0, 0, 255, 255], "image at {x},{y}");
            }
        }
    }

    #[test]
    fn fit_pads_left_and_right_for_tall_source() {
        let out = resize(
            solid(50, 100, [0, 0, 0, 255]),
            &options(200, 200, ResizeMode::Fit),
        );
        let rgba = out.to_rgba8();
        assert_eq!(rgba.dimensions(), (200, 200));
        // Scaled image is 100x200 centered at x = 50
        assert_eq!(rgba.get_pixel(0, 100).0, [255, 255, 255, 255]);
        assert_eq!(rgba.get_pixel(49, 100).0, [255, 255, 255, 255]);
        assert_eq!(rgba.get_pixel(100, 100).0, [0, 0, 0, 255]);
        assert_eq!(rgba.get_pixel(150, 100).0, [255, 255, 255, 255]);
    }

    #[test]
    fn fit_keeps_transparent_pixels_inside_image_area() {
        let out = resize(
            solid(10, 5, [0, 0, 0, 0]),
            &options(10, 10, ResizeMode::Fit),
        );
        let rgba = out.to_rgba8();
        assert_eq!(rgba.get_pixel(5, 0).0, [255, 255, 255, 255]);
        assert_eq!(rgba.get_pixel(5, 5).0[3], 0);
    }

    #[test]
    fn fill_center_crops_to_exact_box() {
        // 100x50 → 50x50: scaled stays 100x50, crop keeps x in 25..75
        let out = resize(split_horizontal(100, 50), &options(50, 50, ResizeMode::Fill));
        assert_eq!(out.dimensions(), (50, 50));
        let rgba = out.to_rgba8();
        assert_eq!(rgba.get_pixel(5, 25).0, [255, 0, 0, 255]);
        assert_eq!(rgba.get_pixel(44, 25).0, [0, 0, 255, 255]);
    }

    #[test]
    fn fill_never_pads() {
        let out = resize(
            solid(30, 90, [9, 9, 9, 255]),
            &ProcessOptions {
                pad_color: PadColor([255, 0, 0]),
                ..options(80, 40, ResizeMode::Fill)
            },
        );
        assert_eq!(out.dimensions(), (80, 40));
        assert!(out.to_rgba8().pixels().all(|p| p.0 == [9, 9, 9, 255]));
    }

    #[test]
    fn stretch_ignores_aspect_ratio() {
        let out = resize(
            solid(100, 100, [1, 2, 3, 255]),
            &options(150, 75, ResizeMode::Stretch),
        );
        assert_eq!(out.dimensions(), (150, 75));
    }

    #[test]
    fn all_modes_hit_exact_box() {
        for mode in [ResizeMode::Fit, ResizeMode::Fill, ResizeMode::Stretch] {
            for (w, h) in [(1, 1), (17, 301), (640, 480)] {
                let out = resize(solid(123, 45, [0, 0, 0, 255]), &options(w, h, mode));
                assert_eq!(out.dimensions(), (w, h), "{mode} {w}x{h}");
            }
        }
    }
}
