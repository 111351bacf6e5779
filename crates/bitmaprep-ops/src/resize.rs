//! Resampling and aspect-ratio sizing.
//!
//! Scaled draws go through [`resize_premultiplied`], a two-pass separable
//! resampler working on premultiplied RGBA floats so that transparent
//! pixels do not bleed dark fringes into their neighbours.
//!
//! # Filters
//!
//! - [`Filter::Nearest`] - Fastest, no interpolation (blocky)
//! - [`Filter::Bilinear`] - Linear interpolation, the default
//! - [`Filter::Bicubic`] - Mitchell-Netravali cubic
//! - [`Filter::Lanczos3`] - Sinc-based, sharpest
//!
//! When downscaling, filter support is widened by the scale factor so every
//! source pixel contributes. Downscale-then-upscale therefore acts as a blur
//! whose strength grows as the intermediate size shrinks.
//!
//! # Example
//!
//! ```rust
//! use bitmaprep_ops::resize::{fit_dimensions, fill_dimensions};
//!
//! assert_eq!(fit_dimensions(200, 100, 100, 100), (100, 50));
//! assert_eq!(fill_dimensions(200, 100, 100, 100), (200, 100));
//! ```

use bitmaprep_core::alloc::try_filled;
use bitmaprep_core::{Error, Result, RgbaF};
use tracing::trace;

use crate::parallel::for_each_row_mut;

/// Resampling filter for scaled draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Filter {
    /// Nearest-neighbor (fastest, no interpolation).
    Nearest,
    /// Bilinear interpolation.
    #[default]
    Bilinear,
    /// Bicubic interpolation (Mitchell-Netravali).
    Bicubic,
    /// Lanczos-3.
    Lanczos3,
}

impl Filter {
    /// Returns the support radius for this filter.
    #[inline]
    pub fn support(&self) -> f32 {
        match self {
            Filter::Nearest => 0.5,
            Filter::Bilinear => 1.0,
            Filter::Bicubic => 2.0,
            Filter::Lanczos3 => 3.0,
        }
    }

    /// Evaluates the filter kernel at position x.
    #[inline]
    pub fn weight(&self, x: f32) -> f32 {
        match self {
            Filter::Nearest => nearest_weight(x),
            Filter::Bilinear => bilinear_weight(x),
            Filter::Bicubic => bicubic_weight(x),
            Filter::Lanczos3 => lanczos_weight(x, 3.0),
        }
    }
}

#[inline]
fn nearest_weight(x: f32) -> f32 {
    if x.abs() <= 0.5 { 1.0 } else { 0.0 }
}

#[inline]
fn bilinear_weight(x: f32) -> f32 {
    let ax = x.abs();
    if ax < 1.0 { 1.0 - ax } else { 0.0 }
}

/// Mitchell-Netravali with B = C = 1/3.
#[inline]
fn bicubic_weight(x: f32) -> f32 {
    const B: f32 = 1.0 / 3.0;
    const C: f32 = 1.0 / 3.0;

    let ax = x.abs();
    if ax < 1.0 {
        ((12.0 - 9.0 * B - 6.0 * C) * ax * ax * ax
            + (-18.0 + 12.0 * B + 6.0 * C) * ax * ax
            + (6.0 - 2.0 * B))
            / 6.0
    } else if ax < 2.0 {
        ((-B - 6.0 * C) * ax * ax * ax
            + (6.0 * B + 30.0 * C) * ax * ax
            + (-12.0 * B - 48.0 * C) * ax
            + (8.0 * B + 24.0 * C))
            / 6.0
    } else {
        0.0
    }
}

#[inline]
fn lanczos_weight(x: f32, a: f32) -> f32 {
    let ax = x.abs();
    if ax < 1e-8 {
        1.0
    } else if ax < a {
        let pi_x = std::f32::consts::PI * ax;
        let pi_x_a = pi_x / a;
        (pi_x.sin() / pi_x) * (pi_x_a.sin() / pi_x_a)
    } else {
        0.0
    }
}

/// Resamples a premultiplied RGBA block to a new size.
///
/// `src` holds `src_w * src_h` pixels, row-major. Returns
/// `dst_w * dst_h` premultiplied pixels. Same-size requests return a copy.
///
/// # Errors
///
/// - [`Error::InvalidDimensions`] for zero sizes
/// - [`Error::DimensionMismatch`] if `src` has the wrong length
/// - [`Error::AllocationFailed`] if the output cannot be allocated
///
/// # Example
///
/// ```rust
/// use bitmaprep_ops::resize::{resize_premultiplied, Filter};
///
/// let src = vec![[0.5f32, 0.5, 0.5, 1.0]; 16 * 16];
/// let dst = resize_premultiplied(&src, 16, 16, 32, 8, Filter::Bilinear).unwrap();
/// assert_eq!(dst.len(), 32 * 8);
/// ```
pub fn resize_premultiplied(
    src: &[RgbaF],
    src_w: u32,
    src_h: u32,
    dst_w: u32,
    dst_h: u32,
    filter: Filter,
) -> Result<Vec<RgbaF>> {
    if src_w == 0 || src_h == 0 {
        return Err(Error::invalid_dimensions(src_w, src_h, "source size must be > 0"));
    }
    if dst_w == 0 || dst_h == 0 {
        return Err(Error::invalid_dimensions(
            dst_w,
            dst_h,
            "destination size must be > 0",
        ));
    }
    let expected = src_w as usize * src_h as usize;
    if src.len() != expected {
        return Err(Error::dimension_mismatch(expected, src.len()));
    }
    trace!(src_w, src_h, dst_w, dst_h, ?filter, "resize_premultiplied");

    if (src_w, src_h) == (dst_w, dst_h) {
        return bitmaprep_core::alloc::try_copy(src);
    }

    let (sw, sh, dw, dh) = (
        src_w as usize,
        src_h as usize,
        dst_w as usize,
        dst_h as usize,
    );

    // Two-pass separable resize: horizontal then vertical
    let temp = if sw == dw {
        bitmaprep_core::alloc::try_copy(src)?
    } else {
        resize_horizontal(src, sw, sh, dw, filter)?
    };
    if sh == dh {
        return Ok(temp);
    }
    resize_vertical(&temp, dw, sh, dh, filter)
}

/// Source taps for one destination coordinate along an axis.
struct Taps {
    first: usize,
    weights: Vec<f32>,
}

/// Precomputes normalized filter taps for every destination coordinate.
fn axis_taps(src_len: usize, dst_len: usize, filter: Filter) -> Vec<Taps> {
    let scale = src_len as f32 / dst_len as f32;
    let widen = scale.max(1.0);
    let support = filter.support() * widen;

    (0..dst_len)
        .map(|d| {
            // Map destination center to source space
            let center = (d as f32 + 0.5) * scale - 0.5;
            let lo = ((center - support).floor().max(0.0)) as usize;
            let hi = ((center + support).ceil().max(0.0) as usize).min(src_len - 1);

            let mut weights: Vec<f32> = (lo..=hi)
                .map(|s| filter.weight((s as f32 - center) / widen))
                .collect();
            let sum: f32 = weights.iter().sum();

            if sum.abs() > 1e-8 {
                for w in &mut weights {
                    *w /= sum;
                }
                Taps { first: lo, weights }
            } else {
                // Degenerate kernel: fall back to the nearest source sample
                let nearest = (center.round().max(0.0) as usize).min(src_len - 1);
                Taps {
                    first: nearest,
                    weights: vec![1.0],
                }
            }
        })
        .collect()
}

#[inline]
fn accumulate(acc: &mut RgbaF, px: &RgbaF, w: f32) {
    for c in 0..4 {
        acc[c] += px[c] * w;
    }
}

/// Keeps premultiplied invariants after negative-lobe filters.
#[inline]
fn sanitize(mut px: RgbaF) -> RgbaF {
    px[3] = px[3].clamp(0.0, 1.0);
    for c in 0..3 {
        px[c] = px[c].clamp(0.0, px[3]);
    }
    px
}

fn resize_horizontal(
    src: &[RgbaF],
    src_w: usize,
    src_h: usize,
    dst_w: usize,
    filter: Filter,
) -> Result<Vec<RgbaF>> {
    let mut dst = try_filled(dst_w * src_h, [0.0f32; 4])?;
    let taps = axis_taps(src_w, dst_w, filter);

    for_each_row_mut(&mut dst, dst_w, |y, out| {
        let row = &src[y * src_w..(y + 1) * src_w];
        for (px, tap) in out.iter_mut().zip(&taps) {
            let mut acc = [0.0f32; 4];
            for (i, &w) in tap.weights.iter().enumerate() {
                accumulate(&mut acc, &row[tap.first + i], w);
            }
            *px = sanitize(acc);
        }
    });

    Ok(dst)
}

fn resize_vertical(
    src: &[RgbaF],
    width: usize,
    src_h: usize,
    dst_h: usize,
    filter: Filter,
) -> Result<Vec<RgbaF>> {
    let mut dst = try_filled(width * dst_h, [0.0f32; 4])?;
    let taps = axis_taps(src_h, dst_h, filter);

    for_each_row_mut(&mut dst, width, |y, out| {
        let tap = &taps[y];
        for (x, px) in out.iter_mut().enumerate() {
            let mut acc = [0.0f32; 4];
            for (i, &w) in tap.weights.iter().enumerate() {
                accumulate(&mut acc, &src[(tap.first + i) * width + x], w);
            }
            *px = sanitize(acc);
        }
    });

    Ok(dst)
}

/// Largest aspect-preserving size that fits inside the target.
///
/// `scale = min(max_w / src_w, max_h / src_h)`; each side is rounded and
/// kept at least 1. The result is the fitted size itself, not padded out
/// to the target.
///
/// # Example
///
/// ```rust
/// use bitmaprep_ops::resize::fit_dimensions;
///
/// // Fit 1920x1080 into 640x480 box
/// assert_eq!(fit_dimensions(1920, 1080, 640, 480), (640, 360));
/// ```
pub fn fit_dimensions(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    let scale_w = max_w as f64 / src_w as f64;
    let scale_h = max_h as f64 / src_h as f64;
    let scale = scale_w.min(scale_h);

    let new_w = ((src_w as f64 * scale).round() as u32).max(1);
    let new_h = ((src_h as f64 * scale).round() as u32).max(1);

    (new_w, new_h)
}

/// Smallest aspect-preserving size that covers the target.
///
/// `scale = max(min_w / src_w, min_h / src_h)`. Rounding never leaves a
/// side shorter than the target, so a centered crop of the target size is
/// always fully covered.
///
/// # Example
///
/// ```rust
/// use bitmaprep_ops::resize::fill_dimensions;
///
/// // Fill 640x480 with 1920x1080 (crop sides)
/// assert_eq!(fill_dimensions(1920, 1080, 640, 480), (853, 480));
/// ```
pub fn fill_dimensions(src_w: u32, src_h: u32, min_w: u32, min_h: u32) -> (u32, u32) {
    let scale_w = min_w as f64 / src_w as f64;
    let scale_h = min_h as f64 / src_h as f64;
    let scale = scale_w.max(scale_h);

    let new_w = ((src_w as f64 * scale).round() as u32).max(min_w).max(1);
    let new_h = ((src_h as f64 * scale).round() as u32).max(min_h).max(1);

    (new_w, new_h)
}

/// Intermediate size for quality reduction: `percent` of each side,
/// at least 1x1.
pub fn reduced_dimensions(width: u32, height: u32, percent: f32) -> (u32, u32) {
    let w = ((width as f64 * percent as f64).round() as u32).clamp(1, width.max(1));
    let h = ((height as f64 * percent as f64).round() as u32).clamp(1, height.max(1));
    (w, h)
}
