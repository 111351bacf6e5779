//! Destinations for [`BitmapImage::draw_in_rect`](crate::BitmapImage::draw_in_rect).

use bitmaprep_core::{Frame, Image, Result};

use crate::surface::DrawingSurface;

/// Anything an [`Image`] can be drawn into.
///
/// Implementors stretch `image` onto `dest` with source-over blending.
pub trait DrawTarget {
    /// Draws `image` scaled to fill `dest`.
    fn draw(&mut self, image: &Image, dest: Frame) -> Result<()>;
}

impl DrawTarget for DrawingSurface {
    fn draw(&mut self, image: &Image, dest: Frame) -> Result<()> {
        self.draw_image(image, dest, None)
    }
}

impl<T: DrawTarget + ?Sized> DrawTarget for &mut T {
    fn draw(&mut self, image: &Image, dest: Frame) -> Result<()> {
        (**self).draw(image, dest)
    }
}
