//! Pure calculation functions for resize geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate dimensions that fit inside a target box while keeping the source
/// aspect ratio.
///
/// One dimension matches the target exactly, the other is less than or equal
/// to it. Images smaller than the box are scaled up.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `target` - Target box dimensions (width, height)
///
/// # Returns
/// * `(width, height)` - Fit dimensions, each within `1..=target`
pub fn calculate_fit_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let scale = (tgt_w as f64 / src_w as f64).min(tgt_h as f64 / src_h as f64);
    let w = (src_w as f64 * scale).round() as u32;
    let h = (src_h as f64 * scale).round() as u32;
    (w.clamp(1, tgt_w), h.clamp(1, tgt_h))
}

/// Calculate dimensions needed to fill a target area (resize before crop).
///
/// Returns dimensions that completely cover the target area while maintaining
/// the source aspect ratio. One dimension will match exactly, the other may exceed.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `target` - Target area dimensions (width, height)
///
/// # Returns
/// * `(width, height)` - Fill dimensions (at least one matches target)
pub fn calculate_fill_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let src_aspect = src_w as f64 / src_h as f64;
    let tgt_aspect = tgt_w as f64 / tgt_h as f64;

    if src_aspect > tgt_aspect {
        // Source is wider: height will match, width will exceed
        let h = tgt_h;
        let w = (h as f64 * src_aspect).round() as u32;
        (w.max(tgt_w), h)
    } else {
        // Source is taller: width will match, height will exceed
        let w = tgt_w;
        let h = (w as f64 / src_aspect).round() as u32;
        (w, h.max(tgt_h))
    }
}

/// Offset that centers `inner` within `outer` along one axis.
///
/// Odd remainders put the extra pixel after the inner span.
pub fn center_offset(outer: u32, inner: u32) -> u32 {
    outer.saturating_sub(inner) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // calculate_fit_dimensions tests
    // =========================================================================

    #[test]
    fn fit_wide_source_into_square() {
        // 100x50 into 100x100: width matches, height stays 50
        assert_eq!(calculate_fit_dimensions((100, 50), (100, 100)), (100, 50));
    }

    #[test]
    fn fit_tall_source_into_landscape() {
        // 600x800 into 800x512: height matches, width = 512 * 0.75 = 384
        assert_eq!(calculate_fit_dimensions((600, 800), (800, 512)), (384, 512));
    }

    #[test]
    fn fit_upscales_small_source() {
        assert_eq!(calculate_fit_dimensions((100, 100), (200, 200)), (200, 200));
    }

    #[test]
    fn fit_never_exceeds_target() {
        for source in [(1, 1000), (1000, 1), (333, 777), (4000, 3000)] {
            let (w, h) = calculate_fit_dimensions(source, (97, 61));
            assert!(w <= 97 && h <= 61, "{source:?} → {w}x{h}");
            assert!(w == 97 || h == 61, "{source:?} → {w}x{h} touches neither edge");
        }
    }

    #[test]
    fn fit_extreme_aspect_keeps_one_pixel() {
        // 1x10000 into 100x10: width rounds to 0 and is held at 1
        assert_eq!(calculate_fit_dimensions((1, 10000), (100, 10)), (1, 10));
    }

    // =========================================================================
    // calculate_fill_dimensions tests
    // =========================================================================

    #[test]
    fn fill_wider_source_to_portrait_target() {
        // 800x600 (4:3) → 400x500 target
        // Source is wider, so height matches: 500, width = 500 * (4/3) = 667
        assert_eq!(calculate_fill_dimensions((800, 600), (400, 500)), (667, 500));
    }

    #[test]
    fn fill_taller_source_to_landscape_target() {
        assert_eq!(calculate_fill_dimensions((600, 800), (500, 400)), (500, 667));
    }

    #[test]
    fn fill_same_aspect_ratio() {
        assert_eq!(calculate_fill_dimensions((800, 600), (400, 300)), (400, 300));
    }

    #[test]
    fn fill_landscape_source_to_square() {
        // 100x50 → 50x50: height matches, width = 100
        assert_eq!(calculate_fill_dimensions((100, 50), (50, 50)), (100, 50));
    }

    // =========================================================================
    // center_offset tests
    // =========================================================================

    #[test]
    fn center_offset_even_remainder() {
        assert_eq!(center_offset(100, 50), 25);
    }

    #[test]
    fn center_offset_odd_remainder() {
        assert_eq!(center_offset(101, 50), 25);
    }

    #[test]
    fn center_offset_no_remainder() {
        assert_eq!(center_offset(64, 64), 0);
    }
}
