//! Geometric transforms: rotation, affine sampling, crop frames.
//!
//! Affine draws use inverse mapping: for every destination pixel center the
//! inverse transform gives a point in the placement frame, which is then
//! sampled from the source. Points that land outside the placement stay
//! fully transparent, so rotated corners come out clear.
//!
//! # Rotation convention
//!
//! Angles are in degrees. In the y-down raster space used everywhere in
//! this workspace a **positive angle turns the image clockwise** on screen.
//! Rotation is about the source center, which is mapped onto the center of
//! the output.
//!
//! # Example
//!
//! ```rust
//! use bitmaprep_ops::transform::rotated_bounds;
//!
//! assert_eq!(rotated_bounds(200, 100, 90.0).unwrap(), (100, 200));
//! assert_eq!(rotated_bounds(200, 100, 180.0).unwrap(), (200, 100));
//! ```

use bitmaprep_core::alloc::try_filled;
use bitmaprep_core::pixel::TRANSPARENT;
use bitmaprep_core::{Error, Frame, Result, RgbaF};
use glam::{Affine2, Vec2};
use tracing::trace;

use crate::parallel::for_each_row_mut;

/// Slack below an integer that still rounds down when sizing rotated bounds.
///
/// Absorbs `cos(90°) != 0` style floating error so right-angle rotations do
/// not grow by a pixel.
const BOUNDS_EPSILON: f64 = 1e-6;

/// Interpolation used when sampling under an affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Interpolation {
    /// Nearest source pixel.
    Nearest,
    /// Bilinear blend of the four nearest pixels.
    #[default]
    Bilinear,
}

/// Output size of a `width x height` image rotated by `degrees`.
///
/// The axis-aligned bounding box of the rotated rectangle,
/// `w*|cos| + h*|sin|` by `w*|sin| + h*|cos|`, rounded outward and at
/// least 1x1.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] for a non-finite angle.
pub fn rotated_bounds(width: u32, height: u32, degrees: f32) -> Result<(u32, u32)> {
    if !degrees.is_finite() {
        return Err(Error::invalid_parameter(
            "degrees",
            degrees,
            "angle must be finite",
        ));
    }
    let rad = (degrees as f64).to_radians();
    let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
    let (w, h) = (width as f64, height as f64);

    let out_w = w * cos + h * sin;
    let out_h = w * sin + h * cos;
    let round_out = |v: f64| ((v - BOUNDS_EPSILON).ceil().max(1.0)) as u32;

    Ok((round_out(out_w), round_out(out_h)))
}

/// Transform that rotates a `src_w x src_h` placement at the origin by
/// `degrees` (clockwise positive) and centers it in a `dst_w x dst_h`
/// surface.
pub fn rotation_about_center(
    src_w: u32,
    src_h: u32,
    dst_w: u32,
    dst_h: u32,
    degrees: f32,
) -> Affine2 {
    let src_center = Vec2::new(src_w as f32 * 0.5, src_h as f32 * 0.5);
    let dst_center = Vec2::new(dst_w as f32 * 0.5, dst_h as f32 * 0.5);

    Affine2::from_translation(dst_center)
        * Affine2::from_angle(degrees.rem_euclid(360.0).to_radians())
        * Affine2::from_translation(-src_center)
}

/// Samples a premultiplied source block through an affine transform.
///
/// The source is stretched onto `placement` and `transform` then maps
/// placement space onto the `dst_w x dst_h` output grid. Returns
/// premultiplied output pixels; uncovered pixels are transparent.
///
/// # Errors
///
/// - [`Error::InvalidParameter`] if `transform` is not invertible
/// - [`Error::DimensionMismatch`] if `src` has the wrong length
/// - [`Error::AllocationFailed`] if the output cannot be allocated
#[allow(clippy::too_many_arguments)]
pub fn sample_affine(
    src: &[RgbaF],
    src_w: u32,
    src_h: u32,
    dst_w: u32,
    dst_h: u32,
    placement: Frame,
    transform: Affine2,
    interpolation: Interpolation,
) -> Result<Vec<RgbaF>> {
    let expected = src_w as usize * src_h as usize;
    if src.len() != expected {
        return Err(Error::dimension_mismatch(expected, src.len()));
    }
    if src_w == 0 || src_h == 0 {
        return Err(Error::invalid_dimensions(src_w, src_h, "source must not be empty"));
    }
    if dst_w == 0 || dst_h == 0 {
        return Err(Error::invalid_dimensions(dst_w, dst_h, "output must not be empty"));
    }
    if placement.is_empty() {
        return Err(Error::invalid_dimensions(
            placement.width,
            placement.height,
            "placement must not be empty",
        ));
    }
    let det = transform.matrix2.determinant();
    if !det.is_finite() || det.abs() < 1e-12 {
        return Err(Error::invalid_parameter(
            "transform",
            det,
            "transform must be invertible",
        ));
    }
    trace!(src_w, src_h, dst_w, dst_h, %placement, ?interpolation, "sample_affine");

    let inverse = transform.inverse();
    let origin = Vec2::new(placement.x as f32, placement.y as f32);
    let pw = placement.width as f32;
    let ph = placement.height as f32;
    let scale = Vec2::new(src_w as f32 / pw, src_h as f32 / ph);

    let mut dst = try_filled(dst_w as usize * dst_h as usize, TRANSPARENT)?;

    for_each_row_mut(&mut dst, dst_w as usize, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            let q = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let local = inverse.transform_point2(q) - origin;
            if local.x < 0.0 || local.y < 0.0 || local.x >= pw || local.y >= ph {
                continue;
            }
            // Continuous source coordinate with pixel centers at integers
            let s = local * scale - Vec2::splat(0.5);
            *out = match interpolation {
                Interpolation::Nearest => sample_nearest(src, src_w, src_h, s.x, s.y),
                Interpolation::Bilinear => sample_bilinear(src, src_w, src_h, s.x, s.y),
            };
        }
    });

    Ok(dst)
}

#[inline]
fn sample_nearest(src: &[RgbaF], w: u32, h: u32, x: f32, y: f32) -> RgbaF {
    let sx = (x.round().max(0.0) as u32).min(w - 1);
    let sy = (y.round().max(0.0) as u32).min(h - 1);
    src[sy as usize * w as usize + sx as usize]
}

/// Bilinear sample with clamp-to-edge addressing.
#[inline]
fn sample_bilinear(src: &[RgbaF], w: u32, h: u32, x: f32, y: f32) -> RgbaF {
    let max_x = (w - 1) as f32;
    let max_y = (h - 1) as f32;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(w as usize - 1);
    let y1 = (y0 + 1).min(h as usize - 1);
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;
    let stride = w as usize;

    let p00 = src[y0 * stride + x0];
    let p10 = src[y0 * stride + x1];
    let p01 = src[y1 * stride + x0];
    let p11 = src[y1 * stride + x1];

    let mut out = [0.0f32; 4];
    for c in 0..4 {
        let top = p00[c] * (1.0 - fx) + p10[c] * fx;
        let bot = p01[c] * (1.0 - fx) + p11[c] * fx;
        out[c] = top * (1.0 - fy) + bot * fy;
    }
    out
}

/// Frame of a `target_w x target_h` region centered in a
/// `src_w x src_h` image.
///
/// Offsets round toward negative infinity. A target larger than the source
/// yields a negative origin.
///
/// # Example
///
/// ```rust
/// use bitmaprep_core::Frame;
/// use bitmaprep_ops::transform::centered_crop_frame;
///
/// assert_eq!(centered_crop_frame(200, 100, 100, 100), Frame::new(50, 0, 100, 100));
/// ```
pub fn centered_crop_frame(src_w: u32, src_h: u32, target_w: u32, target_h: u32) -> Frame {
    let x = (src_w as i64 - target_w as i64).div_euclid(2);
    let y = (src_h as i64 - target_h as i64).div_euclid(2);
    Frame::new(
        x.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        y.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        target_w,
        target_h,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const RED: RgbaF = [1.0, 0.0, 0.0, 1.0];
    const BLUE: RgbaF = [0.0, 0.0, 1.0, 1.0];

    #[test]
    fn test_rotated_bounds_right_angles() {
        assert_eq!(rotated_bounds(200, 100, 0.0).unwrap(), (200, 100));
        assert_eq!(rotated_bounds(200, 100, 90.0).unwrap(), (100, 200));
        assert_eq!(rotated_bounds(200, 100, -90.0).unwrap(), (100, 200));
        assert_eq!(rotated_bounds(200, 100, 270.0).unwrap(), (100, 200));
        assert_eq!(rotated_bounds(200, 100, 360.0).unwrap(), (200, 100));
    }

    #[test]
    fn test_rotated_bounds_45() {
        // 100 * (cos45 + sin45) = 141.42 -> 142
        assert_eq!(rotated_bounds(100, 100, 45.0).unwrap(), (142, 142));
    }

    #[test]
    fn test_rotated_bounds_rejects_nan() {
        assert!(rotated_bounds(10, 10, f32::NAN).is_err());
    }

    #[test]
    fn test_rotation_maps_centers() {
        let t = rotation_about_center(200, 100, 100, 200, 90.0);
        let c = t.transform_point2(Vec2::new(100.0, 50.0));
        assert_abs_diff_eq!(c.x, 50.0, epsilon = 1e-3);
        assert_abs_diff_eq!(c.y, 100.0, epsilon = 1e-3);
    }

    #[test]
    fn test_rotation_is_clockwise() {
        // Left edge midpoint moves to the top edge midpoint
        let t = rotation_about_center(200, 100, 100, 200, 90.0);
        let p = t.transform_point2(Vec2::new(0.0, 50.0));
        assert_abs_diff_eq!(p.x, 50.0, epsilon = 1e-3);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_rotation_large_angle_matches_reduced() {
        let base = rotation_about_center(100, 10, 28, 101, 280.0);
        let wound = rotation_about_center(100, 10, 28, 101, 1.0e9);
        for p in [Vec2::ZERO, Vec2::new(100.0, 0.0), Vec2::new(37.5, 8.0)] {
            let (a, b) = (base.transform_point2(p), wound.transform_point2(p));
            assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-3);
            assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_sample_affine_rotate_90() {
        // 2x1: red | blue  ->  1x2: red on top, blue below
        let src = vec![RED, BLUE];
        let t = rotation_about_center(2, 1, 1, 2, 90.0);
        let placement = Frame::from_size(2, 1);
        let dst = sample_affine(&src, 2, 1, 1, 2, placement, t, Interpolation::Bilinear).unwrap();
        assert_abs_diff_eq!(dst[0][0], 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(dst[1][2], 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_sample_affine_identity_scale() {
        let src = vec![RED, BLUE, BLUE, RED];
        let dst = sample_affine(
            &src,
            2,
            2,
            4,
            4,
            Frame::from_size(4, 4),
            Affine2::IDENTITY,
            Interpolation::Nearest,
        )
        .unwrap();
        assert_eq!(dst[0], RED);
        assert_eq!(dst[3], BLUE);
        assert_eq!(dst[15], RED);
    }

    #[test]
    fn test_sample_affine_uncovered_is_transparent() {
        let src = vec![RED; 4];
        let t = rotation_about_center(2, 2, 4, 4, 45.0);
        let dst =
            sample_affine(&src, 2, 2, 4, 4, Frame::from_size(2, 2), t, Interpolation::Bilinear)
                .unwrap();
        assert_eq!(dst[0], TRANSPARENT);
        assert_abs_diff_eq!(dst[4 + 1][3], 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_sample_affine_singular() {
        let src = vec![RED; 4];
        let t = Affine2::from_scale(Vec2::new(0.0, 1.0));
        assert!(
            sample_affine(&src, 2, 2, 2, 2, Frame::from_size(2, 2), t, Interpolation::Nearest)
                .is_err()
        );
    }

    #[test]
    fn test_centered_crop_frame() {
        assert_eq!(centered_crop_frame(200, 100, 100, 100), Frame::new(50, 0, 100, 100));
        assert_eq!(centered_crop_frame(5, 5, 2, 2), Frame::new(1, 1, 2, 2));
        assert_eq!(centered_crop_frame(2, 2, 5, 5), Frame::new(-2, -2, 5, 5));
    }
}
