//! Per-pixel color adjustments on RGBA8 buffers.
//!
//! Both operations touch the color channels only and leave alpha as stored.
//! They work directly on the straight-alpha bytes, so no premultiplied round
//! trip is involved and `invert` twice restores the input exactly.

use bitmaprep_core::pixel::{CHANNELS, channel_from_f32, channel_to_f32};
use bitmaprep_core::{Error, PixelBuffer, Result};
use tracing::trace;

use crate::parallel::for_each_row_mut;

/// Brightness range accepted by [`brightness`].
pub const BRIGHTNESS_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

/// Scales RGB toward black (`percent < 1`) or toward white (`percent > 1`).
///
/// For a normalized channel `c`:
///
/// - `percent <= 1`: `c * percent`
/// - `percent > 1`: `c + (1 - c) * (percent - 1)`
///
/// `percent == 1` leaves the buffer untouched.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `percent` is NaN or outside
/// `0.0..=2.0`.
///
/// # Example
///
/// ```rust
/// use bitmaprep_core::PixelBuffer;
/// use bitmaprep_ops::adjust::brightness;
///
/// let mut buf = PixelBuffer::try_new(1, 1).unwrap();
/// buf.fill([100, 100, 100, 255]);
/// brightness(&mut buf, 2.0).unwrap();
/// assert_eq!(buf.pixel(0, 0).unwrap(), [255, 255, 255, 255]);
/// ```
pub fn brightness(buf: &mut PixelBuffer, percent: f32) -> Result<()> {
    if !BRIGHTNESS_RANGE.contains(&percent) {
        return Err(Error::invalid_parameter(
            "percent",
            percent,
            "brightness must be within 0.0..=2.0",
        ));
    }
    trace!(width = buf.width(), height = buf.height(), percent, "brightness");
    if percent == 1.0 {
        return Ok(());
    }

    let stride = buf.stride();
    let adjust = move |c: f32| {
        if percent <= 1.0 {
            c * percent
        } else {
            c + (1.0 - c) * (percent - 1.0)
        }
    };

    for_each_row_mut(buf.data_mut(), stride, |_, row| {
        for px in row.chunks_exact_mut(CHANNELS) {
            for c in &mut px[..3] {
                *c = channel_from_f32(adjust(channel_to_f32(*c)));
            }
        }
    });
    Ok(())
}

/// Inverts RGB (`255 - c`), keeping alpha.
pub fn invert(buf: &mut PixelBuffer) {
    trace!(width = buf.width(), height = buf.height(), "invert");
    let stride = buf.stride();
    for_each_row_mut(buf.data_mut(), stride, |_, row| {
        for px in row.chunks_exact_mut(CHANNELS) {
            for c in &mut px[..3] {
                *c = 255 - *c;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: u32, h: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::try_new(w, h).unwrap();
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                let v = (x * 37 + y * 11) as u8;
                buf.set_pixel(x, y, [v, v.wrapping_mul(3), 255 - v, 100 + y as u8])
                    .unwrap();
            }
        }
        buf
    }

    #[test]
    fn test_brightness_identity() {
        let mut buf = gradient(5, 4);
        let before = buf.clone();
        brightness(&mut buf, 1.0).unwrap();
        assert_eq!(buf, before);
    }

    #[test]
    fn test_brightness_darken() {
        let mut buf = PixelBuffer::try_new(1, 1).unwrap();
        buf.fill([200, 100, 0, 77]);
        brightness(&mut buf, 0.5).unwrap();
        assert_eq!(buf.pixel(0, 0).unwrap(), [100, 50, 0, 77]);
    }

    #[test]
    fn test_brightness_zero_is_black() {
        let mut buf = gradient(3, 3);
        brightness(&mut buf, 0.0).unwrap();
        for px in buf.data().chunks_exact(4) {
            assert_eq!(&px[..3], &[0, 0, 0]);
        }
    }

    #[test]
    fn test_brightness_lighten() {
        let mut buf = PixelBuffer::try_new(1, 1).unwrap();
        buf.fill([0, 255, 51, 200]);
        brightness(&mut buf, 1.5).unwrap();
        // 0.2 + 0.8 * 0.5 = 0.6
        assert_eq!(buf.pixel(0, 0).unwrap(), [128, 255, 153, 200]);
    }

    #[test]
    fn test_brightness_out_of_range() {
        let mut buf = gradient(2, 2);
        let before = buf.clone();
        assert!(brightness(&mut buf, 2.5).is_err());
        assert!(brightness(&mut buf, -0.1).is_err());
        assert!(brightness(&mut buf, f32::NAN).is_err());
        assert_eq!(buf, before);
    }

    #[test]
    fn test_invert_twice_is_identity() {
        let mut buf = gradient(6, 3);
        let before = buf.clone();
        invert(&mut buf);
        assert_ne!(buf, before);
        invert(&mut buf);
        assert_eq!(buf, before);
    }

    #[test]
    fn test_invert_keeps_alpha() {
        let mut buf = PixelBuffer::try_new(1, 1).unwrap();
        buf.fill([10, 20, 30, 40]);
        invert(&mut buf);
        assert_eq!(buf.pixel(0, 0).unwrap(), [245, 235, 225, 40]);
    }
}
