//! Source-over compositing into pixel buffers.
//!
//! Every draw into a surface ends here: a block of premultiplied pixels is
//! laid over the destination buffer at a signed offset, clipped to the
//! buffer bounds. Fully opaque source pixels replace the destination and
//! fully transparent ones leave it untouched.
//!
//! Unscaled draws can skip the float path entirely with [`blit_rgba8`],
//! which copies straight-alpha bytes and keeps integer-aligned copies
//! exact.
//!
//! # Example
//!
//! ```rust
//! use bitmaprep_ops::composite::over_pixel;
//!
//! let fg = [0.5, 0.0, 0.0, 0.5]; // Semi-transparent red (premultiplied)
//! let bg = [0.0, 0.0, 1.0, 1.0]; // Opaque blue
//! let out = over_pixel(fg, bg);
//! assert!(out[0] > 0.4 && out[2] > 0.4);
//! ```

use bitmaprep_core::pixel::{self, ALPHA, CHANNELS};
use bitmaprep_core::{Error, PixelBuffer, Result, RgbaF};
use tracing::trace;

/// Porter-Duff Over on premultiplied pixels: `Fg + Bg * (1 - Fg.alpha)`.
#[inline]
pub fn over_pixel(fg: RgbaF, bg: RgbaF) -> RgbaF {
    let k = 1.0 - fg[ALPHA];
    [
        fg[0] + bg[0] * k,
        fg[1] + bg[1] * k,
        fg[2] + bg[2] * k,
        fg[3] + bg[3] * k,
    ]
}

/// Composites a premultiplied `src_w x src_h` block over `dst` with its
/// top-left corner at (`x`, `y`).
///
/// Parts of the block outside `dst` are discarded.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if `src` does not hold
/// `src_w * src_h` pixels.
pub fn composite_over(
    dst: &mut PixelBuffer,
    src: &[RgbaF],
    src_w: u32,
    src_h: u32,
    x: i32,
    y: i32,
) -> Result<()> {
    let expected = src_w as usize * src_h as usize;
    if src.len() != expected {
        return Err(Error::dimension_mismatch(expected, src.len()));
    }
    trace!(src_w, src_h, x, y, "composite_over");

    let frame = bitmaprep_core::Frame::new(x, y, src_w, src_h);
    let Some(clip) = frame.intersect_bounds(dst.width(), dst.height()) else {
        return Ok(());
    };

    // Offset of the clipped region inside the source block
    let sx0 = (clip.x as i64 - x as i64) as usize;
    let sy0 = (clip.y as i64 - y as i64) as usize;

    for row in 0..clip.height as usize {
        let src_row = &src[(sy0 + row) * src_w as usize..][..src_w as usize];
        let dst_row = dst.row_mut(clip.y + row as u32);
        for col in 0..clip.width as usize {
            let fg = src_row[sx0 + col];
            let o = (clip.x as usize + col) * CHANNELS;
            let out = &mut dst_row[o..o + CHANNELS];
            if fg[ALPHA] <= 0.0 {
                continue;
            }
            let blended = if fg[ALPHA] >= 1.0 {
                fg
            } else {
                let bg = pixel::premultiplied_from_u8([out[0], out[1], out[2], out[3]]);
                over_pixel(fg, bg)
            };
            out.copy_from_slice(&pixel::premultiplied_to_u8(blended));
        }
    }

    Ok(())
}

/// Blits straight-alpha RGBA8 `src` over `dst` without resampling.
///
/// Opaque source pixels and pixels landing on fully transparent
/// destination pixels are copied byte for byte; only partial coverage of
/// a non-empty destination goes through [`over_pixel`].
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if `src` does not hold
/// `src_w * src_h * 4` bytes.
pub fn blit_rgba8(
    dst: &mut PixelBuffer,
    src: &[u8],
    src_w: u32,
    src_h: u32,
    x: i32,
    y: i32,
) -> Result<()> {
    let expected = src_w as usize * src_h as usize * CHANNELS;
    if src.len() != expected {
        return Err(Error::dimension_mismatch(expected, src.len()));
    }
    trace!(src_w, src_h, x, y, "blit_rgba8");

    let frame = bitmaprep_core::Frame::new(x, y, src_w, src_h);
    let Some(clip) = frame.intersect_bounds(dst.width(), dst.height()) else {
        return Ok(());
    };

    let sx0 = (clip.x as i64 - x as i64) as usize;
    let sy0 = (clip.y as i64 - y as i64) as usize;
    let src_stride = src_w as usize * CHANNELS;

    for row in 0..clip.height as usize {
        let src_row = &src[(sy0 + row) * src_stride..][..src_stride];
        let dst_row = dst.row_mut(clip.y + row as u32);
        for col in 0..clip.width as usize {
            let s = (sx0 + col) * CHANNELS;
            let fg = &src_row[s..s + CHANNELS];
            let o = (clip.x as usize + col) * CHANNELS;
            let out = &mut dst_row[o..o + CHANNELS];
            match (fg[ALPHA], out[ALPHA]) {
                (0, _) => {}
                (255, _) | (_, 0) => out.copy_from_slice(fg),
                _ => {
                    let blended = over_pixel(
                        pixel::premultiplied_from_u8([fg[0], fg[1], fg[2], fg[3]]),
                        pixel::premultiplied_from_u8([out[0], out[1], out[2], out[3]]),
                    );
                    out.copy_from_slice(&pixel::premultiplied_to_u8(blended));
                }
            }
        }
    }

    Ok(())
}
