//! Drawable surface bound to one pixel buffer.
//!
//! A [`DrawingSurface`] is the only way pixels enter a bitmap other than the
//! per-pixel setters: resize, crop, rotate and quality reduction all
//! allocate a fresh surface and draw the current image into it.

use bitmaprep_core::{Error, Frame, Image, PixelBuffer, Result, Rgba8};
use bitmaprep_ops::composite::{blit_rgba8, composite_over};
use bitmaprep_ops::resize::resize_premultiplied;
use bitmaprep_ops::transform::sample_affine;
use bitmaprep_ops::{Filter, Interpolation};
use glam::Affine2;
use tracing::trace;

/// Exclusively owned drawable over a [`PixelBuffer`].
///
/// Draws are source-over. Scaled and transformed draws use the surface's
/// own filter settings.
///
/// # Example
///
/// ```rust
/// use bitmaprep::DrawingSurface;
/// use bitmaprep_core::{Frame, Image};
///
/// let red = Image::filled(2, 2, [255, 0, 0, 255]).unwrap();
/// let mut surface = DrawingSurface::allocate(4, 4).unwrap();
/// surface.draw_image(&red, Frame::new(1, 1, 2, 2), None).unwrap();
///
/// let snap = surface.snapshot().unwrap();
/// assert_eq!(snap.pixel(1, 1).unwrap(), [255, 0, 0, 255]);
/// assert_eq!(snap.pixel(0, 0).unwrap(), [0, 0, 0, 0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingSurface {
    buffer: PixelBuffer,
    filter: Filter,
    interpolation: Interpolation,
}

impl DrawingSurface {
    /// Allocates a transparent surface.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] if either side is zero
    /// - [`Error::AllocationFailed`] if the buffer cannot be reserved
    pub fn allocate(width: u32, height: u32) -> Result<Self> {
        Ok(Self::from_buffer(PixelBuffer::try_new(width, height)?))
    }

    /// Wraps an existing buffer.
    pub fn from_buffer(buffer: PixelBuffer) -> Self {
        Self {
            buffer,
            filter: Filter::default(),
            interpolation: Interpolation::default(),
        }
    }

    /// Sets the filter for scaled draws.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the interpolation for transformed draws.
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Changes the filter for later scaled draws.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Changes the interpolation for later transformed draws.
    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.interpolation = interpolation;
    }

    /// Filter used for scaled draws.
    #[inline]
    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Interpolation used for transformed draws.
    #[inline]
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Surface width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Surface height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Returns (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    /// Backing buffer.
    #[inline]
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Mutable backing buffer.
    #[inline]
    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    /// Fills the whole surface with `px`, replacing existing content.
    pub fn fill(&mut self, px: Rgba8) {
        self.buffer.fill(px);
    }

    /// Draws `image` stretched onto `dest`.
    ///
    /// Without a transform `dest` is in surface pixels and may lie partly or
    /// wholly outside the surface. With a transform, `dest` is the placement
    /// before the transform is applied and the result is mapped into surface
    /// space; uncovered pixels are left as they were.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] if `dest` is empty
    /// - [`Error::InvalidParameter`] if `transform` is singular
    /// - [`Error::AllocationFailed`] if scratch space cannot be reserved
    pub fn draw_image(
        &mut self,
        image: &Image,
        dest: Frame,
        transform: Option<Affine2>,
    ) -> Result<()> {
        if dest.is_empty() {
            return Err(Error::invalid_dimensions(
                dest.width,
                dest.height,
                "draw destination must not be empty",
            ));
        }
        let (iw, ih) = image.dimensions();
        trace!(
            image_w = iw,
            image_h = ih,
            %dest,
            transformed = transform.is_some(),
            "draw_image"
        );

        if let Some(transform) = transform {
            let (w, h) = self.dimensions();
            let src = image.to_premultiplied()?;
            let sampled =
                sample_affine(&src, iw, ih, w, h, dest, transform, self.interpolation)?;
            return composite_over(&mut self.buffer, &sampled, w, h, 0, 0);
        }

        if dest.intersect_bounds(self.width(), self.height()).is_none() {
            return Ok(());
        }
        if (dest.width, dest.height) == (iw, ih) {
            return blit_rgba8(&mut self.buffer, image.data(), iw, ih, dest.x, dest.y);
        }

        let src = image.to_premultiplied()?;
        let scaled = resize_premultiplied(&src, iw, ih, dest.width, dest.height, self.filter)?;
        composite_over(
            &mut self.buffer,
            &scaled,
            dest.width,
            dest.height,
            dest.x,
            dest.y,
        )
    }

    /// Copies the current contents into an immutable [`Image`].
    pub fn snapshot(&self) -> Result<Image> {
        Image::from_buffer(&self.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitmaprep_ops::transform::rotation_about_center;

    #[test]
    fn test_allocate_is_transparent() {
        let s = DrawingSurface::allocate(3, 2).unwrap();
        assert_eq!(s.dimensions(), (3, 2));
        assert!(s.buffer().data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_allocate_zero_fails() {
        assert!(DrawingSurface::allocate(0, 5).unwrap_err().is_size_error());
    }

    #[test]
    fn test_draw_unscaled_is_exact() {
        let img = Image::from_rgba8(2, 1, vec![10, 20, 30, 40, 50, 60, 70, 255]).unwrap();
        let mut s = DrawingSurface::allocate(2, 1).unwrap();
        s.draw_image(&img, Frame::from_size(2, 1), None).unwrap();
        assert_eq!(s.snapshot().unwrap(), img);
    }

    #[test]
    fn test_draw_scaled_fills_dest() {
        let img = Image::filled(2, 2, [0, 255, 0, 255]).unwrap();
        let mut s = DrawingSurface::allocate(8, 8).unwrap();
        s.draw_image(&img, Frame::from_size(8, 8), None).unwrap();
        assert_eq!(s.buffer().pixel(7, 7).unwrap(), [0, 255, 0, 255]);
        assert_eq!(s.buffer().pixel(0, 0).unwrap(), [0, 255, 0, 255]);
    }

    #[test]
    fn test_draw_outside_is_noop() {
        let img = Image::filled(2, 2, [255; 4]).unwrap();
        let mut s = DrawingSurface::allocate(2, 2).unwrap();
        s.draw_image(&img, Frame::new(-10, -10, 4, 4), None).unwrap();
        assert!(s.buffer().data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_draw_empty_dest_fails() {
        let img = Image::filled(2, 2, [255; 4]).unwrap();
        let mut s = DrawingSurface::allocate(2, 2).unwrap();
        assert!(s.draw_image(&img, Frame::new(0, 0, 0, 2), None).is_err());
    }

    #[test]
    fn test_draw_transformed() {
        let mut data = Vec::new();
        data.extend_from_slice(&[255, 0, 0, 255]);
        data.extend_from_slice(&[0, 0, 255, 255]);
        let img = Image::from_rgba8(2, 1, data).unwrap();

        let mut s = DrawingSurface::allocate(1, 2).unwrap();
        let t = rotation_about_center(2, 1, 1, 2, 90.0);
        s.draw_image(&img, Frame::from_size(2, 1), Some(t)).unwrap();
        assert_eq!(s.buffer().pixel(0, 0).unwrap(), [255, 0, 0, 255]);
        assert_eq!(s.buffer().pixel(0, 1).unwrap(), [0, 0, 255, 255]);
    }

    #[test]
    fn test_builders() {
        let s = DrawingSurface::allocate(1, 1)
            .unwrap()
            .with_filter(Filter::Lanczos3)
            .with_interpolation(Interpolation::Nearest);
        assert_eq!(s.filter(), Filter::Lanczos3);
        assert_eq!(s.interpolation(), Interpolation::Nearest);
    }
}
