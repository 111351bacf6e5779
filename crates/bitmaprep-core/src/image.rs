//! Immutable image snapshots.
//!
//! [`Image`] is a read-only RGBA8 picture. It plays two roles:
//!
//! - the decoded source handed to a bitmap at construction time
//! - the cached snapshot a bitmap exports for display or hand-off
//!
//! # Memory Management
//!
//! Pixel data lives in an [`Arc<Vec<u8>>`], so cloning an `Image` is cheap
//! and never copies pixels. Because the data is never mutated after
//! construction, a clone is a stable copy that stays valid no matter what
//! happens to the bitmap it came from.
//!
//! # Usage
//!
//! ```rust
//! use bitmaprep_core::Image;
//!
//! let img = Image::from_rgba8(1, 1, vec![255, 0, 0, 255]).unwrap();
//! let shared = img.clone();
//! assert!(img.ptr_eq(&shared));
//! assert_eq!(shared.pixel(0, 0).unwrap(), [255, 0, 0, 255]);
//! ```

use std::sync::Arc;

use crate::alloc::{rgba_byte_len, try_copy};
use crate::buffer::premultiplied_from_bytes;
use crate::pixel::{self, CHANNELS, Rgba8, RgbaF};
use crate::{Error, PixelBuffer, Rect, Result};

/// Cheaply clonable, immutable RGBA8 image with straight alpha.
#[derive(Clone)]
pub struct Image {
    data: Arc<Vec<u8>>,
    width: u32,
    height: u32,
}

impl Image {
    /// Creates an image from RGBA8 bytes.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] if either dimension is zero
    /// - [`Error::DimensionMismatch`] if `data.len() != width * height * 4`
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = rgba_byte_len(width, height)?;
        if data.len() != expected {
            return Err(Error::dimension_mismatch(expected, data.len()));
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
        })
    }

    /// Creates an image filled with a single color.
    pub fn filled(width: u32, height: u32, px: Rgba8) -> Result<Self> {
        let mut buf = PixelBuffer::try_new(width, height)?;
        buf.fill(px);
        Ok(Self::from(buf))
    }

    /// Snapshots the current contents of a buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the copy cannot be allocated.
    pub fn from_buffer(buf: &PixelBuffer) -> Result<Self> {
        Ok(Self {
            data: Arc::new(try_copy(buf.data())?),
            width: buf.width(),
            height: buf.height(),
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns a rectangle covering the whole image.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Raw RGBA8 bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns `true` if both handles share the same pixel storage.
    #[inline]
    pub fn ptr_eq(&self, other: &Image) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Reads the 8-bit pixel at (x, y).
    pub fn pixel(&self, x: i32, y: i32) -> Result<Rgba8> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        let o = (y as usize * self.width as usize + x as usize) * CHANNELS;
        Ok([
            self.data[o],
            self.data[o + 1],
            self.data[o + 2],
            self.data[o + 3],
        ])
    }

    /// Reads the pixel at (x, y) as normalized floats.
    pub fn pixel_f32(&self, x: i32, y: i32) -> Result<RgbaF> {
        self.pixel(x, y).map(pixel::to_f32)
    }

    /// Returns the pixels as premultiplied floats, row-major.
    pub fn to_premultiplied(&self) -> Result<Vec<RgbaF>> {
        premultiplied_from_bytes(&self.data)
    }
}

impl From<PixelBuffer> for Image {
    fn from(buf: PixelBuffer) -> Self {
        let (width, height) = buf.dimensions();
        Self {
            data: Arc::new(buf.into_data()),
            width,
            height,
        }
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions() && self.data() == other.data()
    }
}

impl Eq for Image {}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("shared", &Arc::strong_count(&self.data))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba8() {
        let img = Image::from_rgba8(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.pixel(1, 0).unwrap(), [5, 6, 7, 8]);
    }

    #[test]
    fn test_from_rgba8_wrong_size() {
        assert!(Image::from_rgba8(2, 2, vec![0; 4]).is_err());
        assert!(Image::from_rgba8(0, 2, vec![]).is_err());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut buf = PixelBuffer::try_new(2, 2).unwrap();
        buf.fill([10, 20, 30, 255]);
        let snap = Image::from_buffer(&buf).unwrap();
        buf.fill([0, 0, 0, 0]);
        assert_eq!(snap.pixel(1, 1).unwrap(), [10, 20, 30, 255]);
    }

    #[test]
    fn test_clone_shares_storage() {
        let img = Image::filled(4, 4, [1, 1, 1, 1]).unwrap();
        let other = img.clone();
        assert!(img.ptr_eq(&other));
        assert_eq!(img, other);
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let img = Image::filled(4, 4, [0; 4]).unwrap();
        assert!(img.pixel(4, 0).unwrap_err().is_bounds_error());
        assert!(img.pixel(0, -1).unwrap_err().is_bounds_error());
    }
}
