//! The mutable bitmap.
//!
//! [`BitmapImage`] pairs a [`DrawingSurface`] with an [`ImageCache`]. Every
//! mutation goes to the surface and invalidates the cache; every read of
//! the exported image regenerates the cache first if it is dirty.
//!
//! # Operations
//!
//! | operation | result |
//! |---|---|
//! | [`set_size`](BitmapImage::set_size) and the aspect variants | in place |
//! | [`set_quality`](BitmapImage::set_quality) | in place |
//! | [`set_brightness`](BitmapImage::set_brightness) | in place |
//! | [`invert_colors`](BitmapImage::invert_colors) | in place |
//! | [`crop_with_frame`](BitmapImage::crop_with_frame) | new bitmap |
//! | [`rotate`](BitmapImage::rotate) | new bitmap |
//!
//! A failed operation leaves the bitmap exactly as it was: replacement
//! surfaces are fully drawn before they are swapped in.

use bitmaprep_core::{Error, Frame, Image, Rect, Result, Rgba8, RgbaF};
use bitmaprep_ops::adjust;
use bitmaprep_ops::resize::{fill_dimensions, fit_dimensions, reduced_dimensions};
use bitmaprep_ops::transform::{centered_crop_frame, rotated_bounds, rotation_about_center};
use glam::Affine2;
use tracing::{debug, trace, warn};

use crate::cache::ImageCache;
use crate::options::BitmapOptions;
use crate::resource::ResourceLoader;
use crate::surface::DrawingSurface;
use crate::target::DrawTarget;

/// Mutable RGBA bitmap with a lazily regenerated image snapshot.
///
/// # Example
///
/// ```rust
/// use bitmaprep::BitmapImage;
///
/// let mut bmp = BitmapImage::new(200, 100).unwrap();
/// bmp.set_pixel_u8(0, 0, [255, 0, 0, 255]).unwrap();
///
/// bmp.set_size_keeping_aspect_ratio(100, 100).unwrap();
/// assert_eq!(bmp.dimensions(), (100, 50));
///
/// let rotated = bmp.rotate(90.0).unwrap();
/// assert_eq!(rotated.dimensions(), (50, 100));
/// ```
#[derive(Debug, Clone)]
pub struct BitmapImage {
    surface: DrawingSurface,
    cache: ImageCache,
    options: BitmapOptions,
}

impl BitmapImage {
    /// Creates a transparent bitmap.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] if either side is zero
    /// - [`Error::AllocationFailed`] if the buffer cannot be reserved
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_options(width, height, BitmapOptions::default())
    }

    /// Creates a transparent bitmap with explicit options.
    pub fn with_options(width: u32, height: u32, options: BitmapOptions) -> Result<Self> {
        let surface = Self::surface_for(width, height, options)?;
        debug!(width, height, "bitmap created");
        Ok(Self::from_surface(surface, options))
    }

    /// Creates a bitmap the size of `image`, seeded by drawing it.
    pub fn from_image(image: &Image) -> Result<Self> {
        Self::from_image_with_options(image, BitmapOptions::default())
    }

    /// Creates a bitmap from `image` with explicit options.
    pub fn from_image_with_options(image: &Image, options: BitmapOptions) -> Result<Self> {
        let (width, height) = image.dimensions();
        let mut surface = Self::surface_for(width, height, options)?;
        surface.draw_image(image, Frame::from_size(width, height), None)?;
        debug!(width, height, "bitmap created from image");
        Ok(Self::from_surface(surface, options))
    }

    /// Loads the resource `name` and seeds a bitmap with it.
    ///
    /// # Errors
    ///
    /// Whatever the loader reports, typically [`Error::ResourceNotFound`].
    pub fn from_resource<L: ResourceLoader + ?Sized>(loader: &L, name: &str) -> Result<Self> {
        match loader.load(name) {
            Ok(image) => Self::from_image(&image),
            Err(err) => {
                warn!(name, error = %err, "failed to load bitmap resource");
                Err(err)
            }
        }
    }

    /// Like [`from_resource`](Self::from_resource) but yields `None` on failure.
    pub fn named<L: ResourceLoader + ?Sized>(loader: &L, name: &str) -> Option<Self> {
        Self::from_resource(loader, name).ok()
    }

    fn from_surface(surface: DrawingSurface, options: BitmapOptions) -> Self {
        Self {
            surface,
            cache: ImageCache::new(),
            options,
        }
    }

    fn surface_for(width: u32, height: u32, options: BitmapOptions) -> Result<DrawingSurface> {
        Ok(DrawingSurface::allocate(width, height)?
            .with_filter(options.filter)
            .with_interpolation(options.rotation_filter))
    }

    /// Draws `image` onto a new surface of the given size.
    fn render(
        &self,
        image: &Image,
        width: u32,
        height: u32,
        dest: Frame,
        transform: Option<Affine2>,
    ) -> Result<DrawingSurface> {
        let mut surface = Self::surface_for(width, height, self.options)?;
        surface.draw_image(image, dest, transform)?;
        Ok(surface)
    }

    /// Swaps in a fully drawn surface and marks the bitmap dirty.
    fn replace_surface(&mut self, surface: DrawingSurface) {
        self.surface = surface;
        self.cache.invalidate();
    }

    /// Current image without touching the cache.
    ///
    /// Clean caches are shared; dirty ones are bypassed with a one-off
    /// snapshot.
    fn source_image(&self) -> Result<Image> {
        match self.cache.current() {
            Some(image) => Ok(image.clone()),
            None => self.surface.snapshot(),
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// Returns (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.surface.dimensions()
    }

    /// Bounds at the origin, handy as a draw or crop frame.
    #[inline]
    pub fn size(&self) -> Rect {
        self.surface.buffer().bounds()
    }

    /// Options used for this bitmap's draws.
    #[inline]
    pub fn options(&self) -> BitmapOptions {
        self.options
    }

    /// Replaces the options; later draws use the new filters.
    pub fn set_options(&mut self, options: BitmapOptions) {
        self.options = options;
        self.surface.set_filter(options.filter);
        self.surface.set_interpolation(options.rotation_filter);
    }

    /// Returns `true` if the exported image no longer matches the surface.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.cache.is_dirty()
    }

    /// Marks the bitmap dirty after the surface was painted externally.
    pub fn set_needs_update(&mut self) {
        self.cache.invalidate();
    }

    /// Mutable access to the drawing surface. Marks the bitmap dirty.
    pub fn graphics_context(&mut self) -> &mut DrawingSurface {
        self.cache.invalidate();
        &mut self.surface
    }

    /// Read-only access to the drawing surface.
    #[inline]
    pub fn surface(&self) -> &DrawingSurface {
        &self.surface
    }

    // ------------------------------------------------------------------
    // Pixel access
    // ------------------------------------------------------------------

    /// Reads a pixel as normalized straight-alpha floats.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] unless `0 <= x < width` and `0 <= y < height`.
    pub fn get_pixel(&self, x: i32, y: i32) -> Result<RgbaF> {
        self.surface.buffer().pixel_f32(x, y)
    }

    /// Writes a pixel from normalized straight-alpha floats.
    ///
    /// Channels are clamped to 0.0-1.0.
    pub fn set_pixel(&mut self, x: i32, y: i32, px: RgbaF) -> Result<()> {
        self.surface.buffer_mut().set_pixel_f32(x, y, px)?;
        self.cache.invalidate();
        Ok(())
    }

    /// Reads a pixel as 8-bit straight-alpha channels.
    pub fn get_pixel_u8(&self, x: i32, y: i32) -> Result<Rgba8> {
        self.surface.buffer().pixel(x, y)
    }

    /// Writes a pixel from 8-bit straight-alpha channels.
    pub fn set_pixel_u8(&mut self, x: i32, y: i32, px: Rgba8) -> Result<()> {
        self.surface.buffer_mut().set_pixel(x, y, px)?;
        self.cache.invalidate();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Geometry
    // ------------------------------------------------------------------

    /// Stretches the bitmap to exactly `width x height`.
    ///
    /// Same-size requests do nothing and keep the cache state.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] for a zero side; allocation failures are
    /// reported as [`Error::AllocationFailed`]. Either way the bitmap is
    /// unchanged.
    pub fn set_size(&mut self, width: u32, height: u32) -> Result<()> {
        check_size(width, height)?;
        if self.dimensions() == (width, height) {
            trace!(width, height, "set_size: unchanged");
            return Ok(());
        }
        let image = self.image()?.clone();
        let surface = self.render(&image, width, height, Frame::from_size(width, height), None)?;
        debug!(
            from_w = image.width(),
            from_h = image.height(),
            width,
            height,
            "bitmap resized"
        );
        self.replace_surface(surface);
        Ok(())
    }

    /// Scales uniformly to the largest size fitting in `width x height`.
    ///
    /// The result is the fitted size itself, e.g. 200x100 into 100x100
    /// becomes 100x50.
    pub fn set_size_keeping_aspect_ratio(&mut self, width: u32, height: u32) -> Result<()> {
        check_size(width, height)?;
        let (w, h) = self.dimensions();
        let (fit_w, fit_h) = fit_dimensions(w, h, width, height);
        self.set_size(fit_w, fit_h)
    }

    /// Scales uniformly to cover `width x height`, then keeps the centered
    /// `width x height` region.
    pub fn set_size_filling_with_aspect(&mut self, width: u32, height: u32) -> Result<()> {
        check_size(width, height)?;
        let (w, h) = self.dimensions();
        let (scaled_w, scaled_h) = fill_dimensions(w, h, width, height);

        let image = self.image()?.clone();
        let scaled = if (scaled_w, scaled_h) == (w, h) {
            image
        } else {
            self.render(&image, scaled_w, scaled_h, Frame::from_size(scaled_w, scaled_h), None)?
                .snapshot()?
        };

        let crop = centered_crop_frame(scaled_w, scaled_h, width, height);
        let dest = Frame::new(-crop.x, -crop.y, scaled_w, scaled_h);
        let surface = self.render(&scaled, width, height, dest, None)?;
        debug!(scaled_w, scaled_h, width, height, "bitmap filled with aspect");
        self.replace_surface(surface);
        Ok(())
    }

    /// Copies `frame` into a new bitmap of the frame's size.
    ///
    /// Parts of the frame outside this bitmap come out fully transparent.
    /// The source is not modified.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] for an empty frame.
    pub fn crop_with_frame(&self, frame: Frame) -> Result<BitmapImage> {
        check_size(frame.width, frame.height)?;
        let image = self.source_image()?;
        let (w, h) = image.dimensions();
        let dest = Frame::new(frame.x.saturating_neg(), frame.y.saturating_neg(), w, h);
        let surface = self.render(&image, frame.width, frame.height, dest, None)?;
        debug!(%frame, "bitmap cropped");
        Ok(Self::from_surface(surface, self.options))
    }

    /// Rotates about the center into a new bitmap sized to the rotated
    /// bounds.
    ///
    /// Positive `degrees` turn the image clockwise on screen. Corners not
    /// covered by the source are transparent. The source is not modified.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] for a non-finite angle.
    pub fn rotate(&self, degrees: f32) -> Result<BitmapImage> {
        if !degrees.is_finite() {
            return Err(Error::invalid_parameter(
                "degrees",
                degrees,
                "angle must be finite",
            ));
        }
        // Bounds and drawing must see the same reduced angle
        let turn = degrees.rem_euclid(360.0);
        let (w, h) = self.dimensions();
        let (out_w, out_h) = rotated_bounds(w, h, turn)?;
        let image = self.source_image()?;
        let transform = rotation_about_center(w, h, out_w, out_h, turn);
        let surface = self.render(&image, out_w, out_h, Frame::from_size(w, h), Some(transform))?;
        debug!(degrees, out_w, out_h, "bitmap rotated");
        Ok(Self::from_surface(surface, self.options))
    }

    // ------------------------------------------------------------------
    // Color
    // ------------------------------------------------------------------

    /// Blurs by downsampling to `percent` of each side and scaling back.
    ///
    /// `percent == 1` leaves the bitmap untouched.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] unless `0 < percent <= 1`.
    pub fn set_quality(&mut self, percent: f32) -> Result<()> {
        if !(percent > 0.0 && percent <= 1.0) {
            return Err(Error::invalid_parameter(
                "percent",
                percent,
                "quality must be within (0.0, 1.0]",
            ));
        }
        if percent == 1.0 {
            return Ok(());
        }
        let (w, h) = self.dimensions();
        let (small_w, small_h) = reduced_dimensions(w, h, percent);

        let image = self.image()?.clone();
        let small = self
            .render(&image, small_w, small_h, Frame::from_size(small_w, small_h), None)?
            .snapshot()?;
        let surface = self.render(&small, w, h, Frame::from_size(w, h), None)?;
        debug!(percent, small_w, small_h, "bitmap quality reduced");
        self.replace_surface(surface);
        Ok(())
    }

    /// Darkens (`percent < 1`) or lightens (`percent > 1`) RGB in place.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] unless `0 <= percent <= 2`.
    pub fn set_brightness(&mut self, percent: f32) -> Result<()> {
        adjust::brightness(self.surface.buffer_mut(), percent)?;
        self.cache.invalidate();
        Ok(())
    }

    /// Replaces RGB with `255 - c`, alpha unchanged.
    pub fn invert_colors(&mut self) {
        adjust::invert(self.surface.buffer_mut());
        self.cache.invalidate();
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Exported image, regenerated first if dirty.
    ///
    /// The borrow ends at the next mutation; clone the [`Image`] to keep it.
    pub fn image(&mut self) -> Result<&Image> {
        let surface = &self.surface;
        self.cache.get_or_refresh(|| surface.snapshot())
    }

    /// Owned handle to the exported image.
    pub fn cg_image(&mut self) -> Result<Image> {
        self.image().cloned()
    }

    /// Draws the exported image stretched onto `rect` of `target`.
    pub fn draw_in_rect<T: DrawTarget + ?Sized>(
        &mut self,
        target: &mut T,
        rect: Frame,
    ) -> Result<()> {
        let image = self.image()?;
        target.draw(image, rect)
    }
}

impl DrawTarget for BitmapImage {
    fn draw(&mut self, image: &Image, dest: Frame) -> Result<()> {
        self.surface.draw_image(image, dest, None)?;
        self.cache.invalidate();
        Ok(())
    }
}

fn check_size(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(
            width,
            height,
            "width and height must be at least 1",
        ));
    }
    Ok(())
}
