//! Convenience scaling on [`Image`].
//!
//! Each method builds a temporary [`BitmapImage`], runs one operation on it
//! and hands back the exported result.

use bitmaprep_core::{Image, Result};

use crate::bitmap::BitmapImage;

/// One-shot bitmap operations on an [`Image`].
///
/// # Example
///
/// ```rust
/// use bitmaprep::ImageExt;
/// use bitmaprep_core::Image;
///
/// let img = Image::filled(200, 100, [0, 0, 0, 255]).unwrap();
/// assert_eq!(img.aspect_scale_to_size(100, 100).unwrap().dimensions(), (100, 50));
/// assert_eq!(img.fill_aspect_with_size(100, 100).unwrap().dimensions(), (100, 100));
/// ```
pub trait ImageExt {
    /// Wraps a copy of the image in a new [`BitmapImage`].
    fn bitmap_rep(&self) -> Result<BitmapImage>;

    /// Stretches to exactly `width x height`.
    fn scale_to_size(&self, width: u32, height: u32) -> Result<Image>;

    /// Scales to the largest aspect-preserving size inside `width x height`.
    fn aspect_scale_to_size(&self, width: u32, height: u32) -> Result<Image>;

    /// Scales to cover `width x height` and crops the centered region.
    fn fill_aspect_with_size(&self, width: u32, height: u32) -> Result<Image>;
}

impl ImageExt for Image {
    fn bitmap_rep(&self) -> Result<BitmapImage> {
        BitmapImage::from_image(self)
    }

    fn scale_to_size(&self, width: u32, height: u32) -> Result<Image> {
        let mut bmp = self.bitmap_rep()?;
        bmp.set_size(width, height)?;
        bmp.cg_image()
    }

    fn aspect_scale_to_size(&self, width: u32, height: u32) -> Result<Image> {
        let mut bmp = self.bitmap_rep()?;
        bmp.set_size_keeping_aspect_ratio(width, height)?;
        bmp.cg_image()
    }

    fn fill_aspect_with_size(&self, width: u32, height: u32) -> Result<Image> {
        let mut bmp = self.bitmap_rep()?;
        bmp.set_size_filling_with_aspect(width, height)?;
        bmp.cg_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap_rep_copies_pixels() {
        let img = Image::filled(3, 2, [4, 5, 6, 7]).unwrap();
        let bmp = img.bitmap_rep().unwrap();
        assert_eq!(bmp.dimensions(), (3, 2));
        assert_eq!(bmp.get_pixel_u8(2, 1).unwrap(), [4, 5, 6, 7]);
    }

    #[test]
    fn test_scale_to_size() {
        let img = Image::filled(4, 4, [10, 200, 30, 255]).unwrap();
        let out = img.scale_to_size(9, 2).unwrap();
        assert_eq!(out.dimensions(), (9, 2));
        assert_eq!(out.pixel(8, 1).unwrap(), [10, 200, 30, 255]);
    }

    #[test]
    fn test_same_size_returns_equal_image() {
        let img = Image::filled(5, 5, [1, 2, 3, 255]).unwrap();
        assert_eq!(img.scale_to_size(5, 5).unwrap(), img);
    }

    #[test]
    fn test_zero_target_fails() {
        let img = Image::filled(2, 2, [0; 4]).unwrap();
        assert!(img.aspect_scale_to_size(0, 2).is_err());
        assert!(img.fill_aspect_with_size(2, 0).is_err());
    }
}
