//! Pixel types and channel conversions.
//!
//! Bitmaps store four 8-bit channels per pixel in `R, G, B, A` order with
//! **straight** (non-premultiplied) alpha. Two views of a pixel are exposed:
//!
//! - [`Rgba8`] - integer channels, 0-255
//! - [`RgbaF`] - normalized float channels, 0.0-1.0
//!
//! Resampling and compositing need premultiplied values, so this module also
//! provides [`premultiply`] / [`unpremultiply`]. Premultiplied data never
//! leaves the processing code; accessors always speak straight alpha.
//!
//! # Example
//!
//! ```
//! use bitmaprep_core::pixel::{channel_from_f32, channel_to_f32};
//!
//! assert_eq!(channel_from_f32(1.0), 255);
//! assert_eq!(channel_from_f32(0.5), 128);
//! assert!((channel_to_f32(128) - 0.502).abs() < 0.001);
//! ```

/// Number of channels per pixel.
pub const CHANNELS: usize = 4;

/// Index of the alpha channel.
pub const ALPHA: usize = 3;

/// Pixel with 8-bit channels `[R, G, B, A]`, straight alpha.
pub type Rgba8 = [u8; CHANNELS];

/// Pixel with normalized float channels `[R, G, B, A]`.
pub type RgbaF = [f32; CHANNELS];

/// Fully transparent pixel.
pub const TRANSPARENT: RgbaF = [0.0; CHANNELS];

/// Converts an 8-bit channel to the normalized 0.0-1.0 range.
#[inline]
pub fn channel_to_f32(v: u8) -> f32 {
    v as f32 / 255.0
}

/// Converts a normalized channel to 8 bits.
///
/// Values are clamped to 0.0-1.0 first; NaN maps to 0.
#[inline]
pub fn channel_from_f32(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Converts an 8-bit pixel to normalized floats.
#[inline]
pub fn to_f32(px: Rgba8) -> RgbaF {
    px.map(channel_to_f32)
}

/// Converts a normalized pixel to 8 bits.
#[inline]
pub fn from_f32(px: RgbaF) -> Rgba8 {
    px.map(channel_from_f32)
}

/// Multiplies the color channels by alpha.
#[inline]
pub fn premultiply(px: RgbaF) -> RgbaF {
    let a = px[ALPHA];
    [px[0] * a, px[1] * a, px[2] * a, a]
}

/// Divides the color channels by alpha.
///
/// Pixels with (near) zero alpha have no recoverable color and become
/// fully transparent black.
#[inline]
pub fn unpremultiply(px: RgbaF) -> RgbaF {
    let a = px[ALPHA];
    if a <= 1e-6 {
        return TRANSPARENT;
    }
    let inv = 1.0 / a;
    [px[0] * inv, px[1] * inv, px[2] * inv, a]
}

/// Converts an 8-bit straight pixel to premultiplied floats.
#[inline]
pub fn premultiplied_from_u8(px: Rgba8) -> RgbaF {
    premultiply(to_f32(px))
}

/// Converts a premultiplied float pixel back to 8-bit straight alpha.
#[inline]
pub fn premultiplied_to_u8(px: RgbaF) -> Rgba8 {
    from_f32(unpremultiply(px))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_channel_round_trip_exact() {
        for v in 0..=255u8 {
            assert_eq!(channel_from_f32(channel_to_f32(v)), v);
        }
    }

    #[test]
    fn test_channel_clamps() {
        assert_eq!(channel_from_f32(-0.5), 0);
        assert_eq!(channel_from_f32(3.0), 255);
        assert_eq!(channel_from_f32(f32::NAN), 0);
    }

    #[test]
    fn test_premultiply() {
        let p = premultiply([1.0, 0.5, 0.0, 0.5]);
        assert_abs_diff_eq!(p[0], 0.5);
        assert_abs_diff_eq!(p[1], 0.25);
        assert_abs_diff_eq!(p[3], 0.5);

        let back = unpremultiply(p);
        assert_abs_diff_eq!(back[0], 1.0);
        assert_abs_diff_eq!(back[1], 0.5);
    }

    #[test]
    fn test_unpremultiply_zero_alpha() {
        assert_eq!(unpremultiply([0.3, 0.3, 0.3, 0.0]), TRANSPARENT);
    }

    #[test]
    fn test_opaque_u8_round_trip() {
        let px = [12, 200, 99, 255];
        assert_eq!(premultiplied_to_u8(premultiplied_from_u8(px)), px);
    }
}
