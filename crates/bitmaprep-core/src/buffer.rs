//! Owned RGBA8 pixel storage.
//!
//! [`PixelBuffer`] is the ground truth for a bitmap's pixels. It is
//! exclusively owned (no `Arc`, no copy-on-write) and always has at least one
//! pixel.
//!
//! # Memory Layout
//!
//! Pixels are stored **row-major**, top-to-bottom, four bytes each:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  ← Row 0
//!         [R G B A R G B A ...]  ← Row 1
//!         ...
//! ```
//!
//! Alpha is straight: color channels are never multiplied by alpha in storage.
//!
//! # Usage
//!
//! ```rust
//! use bitmaprep_core::PixelBuffer;
//!
//! let mut buf = PixelBuffer::try_new(4, 4).unwrap();
//! buf.set_pixel(1, 2, [255, 0, 0, 255]).unwrap();
//! assert_eq!(buf.pixel(1, 2).unwrap(), [255, 0, 0, 255]);
//! assert!(buf.pixel(4, 0).is_err());
//! ```

use crate::alloc::{rgba_byte_len, try_filled};
use crate::pixel::{self, CHANNELS, Rgba8, RgbaF};
use crate::{Error, Rect, Result};

/// Exclusively owned RGBA8 buffer with straight alpha.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Allocates a zero-filled (transparent black) buffer.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] if either dimension is zero
    /// - [`Error::AllocationFailed`] if the memory cannot be reserved
    pub fn try_new(width: u32, height: u32) -> Result<Self> {
        let len = rgba_byte_len(width, height)?;
        Ok(Self {
            data: try_filled(len, 0u8)?,
            width,
            height,
        })
    }

    /// Wraps existing RGBA8 data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `data.len()` is not
    /// `width * height * 4`.
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = rgba_byte_len(width, height)?;
        if data.len() != expected {
            return Err(Error::dimension_mismatch(expected, data.len()));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns a rectangle covering the whole buffer.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw RGBA8 bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw RGBA8 bytes.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer and returns its bytes.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Returns row `y` as a byte slice.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride();
        &self.data[start..start + self.stride()]
    }

    /// Returns row `y` as a mutable byte slice.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.stride();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    fn offset(&self, x: i32, y: i32) -> Result<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        Ok((y as usize * self.width as usize + x as usize) * CHANNELS)
    }

    /// Reads the 8-bit pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the coordinates are outside the
    /// buffer; nothing is read.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Result<Rgba8> {
        let o = self.offset(x, y)?;
        let mut px = [0u8; CHANNELS];
        px.copy_from_slice(&self.data[o..o + CHANNELS]);
        Ok(px)
    }

    /// Writes the 8-bit pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the coordinates are outside the
    /// buffer; nothing is written.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, px: Rgba8) -> Result<()> {
        let o = self.offset(x, y)?;
        self.data[o..o + CHANNELS].copy_from_slice(&px);
        Ok(())
    }

    /// Reads the pixel at (x, y) as normalized floats.
    #[inline]
    pub fn pixel_f32(&self, x: i32, y: i32) -> Result<RgbaF> {
        self.pixel(x, y).map(pixel::to_f32)
    }

    /// Writes the pixel at (x, y) from normalized floats.
    ///
    /// Channels are clamped to 0.0-1.0 and rounded to 8 bits.
    #[inline]
    pub fn set_pixel_f32(&mut self, x: i32, y: i32, px: RgbaF) -> Result<()> {
        self.set_pixel(x, y, pixel::from_f32(px))
    }

    /// Fills every pixel with `px`.
    pub fn fill(&mut self, px: Rgba8) {
        for chunk in self.data.chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Returns the pixels as premultiplied floats, row-major.
    pub fn to_premultiplied(&self) -> Result<Vec<RgbaF>> {
        premultiplied_from_bytes(&self.data)
    }

    /// Overwrites the buffer with premultiplied float pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `src` does not hold exactly
    /// one value per pixel.
    pub fn store_premultiplied(&mut self, src: &[RgbaF]) -> Result<()> {
        if src.len() != self.pixel_count() {
            return Err(Error::dimension_mismatch(self.pixel_count(), src.len()));
        }
        for (dst, p) in self.data.chunks_exact_mut(CHANNELS).zip(src) {
            dst.copy_from_slice(&pixel::premultiplied_to_u8(*p));
        }
        Ok(())
    }
}

/// Converts RGBA8 bytes to premultiplied floats.
pub(crate) fn premultiplied_from_bytes(data: &[u8]) -> Result<Vec<RgbaF>> {
    let mut out = Vec::new();
    let n = data.len() / CHANNELS;
    out.try_reserve_exact(n).map_err(|e| {
        Error::allocation_failed(n.saturating_mul(std::mem::size_of::<RgbaF>()), e.to_string())
    })?;
    out.extend(
        data.chunks_exact(CHANNELS)
            .map(|c| pixel::premultiplied_from_u8([c[0], c[1], c[2], c[3]])),
    );
    Ok(out)
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
