//! # bitmaprep
//!
//! A mutable RGBA bitmap with a drawable surface and a lazily regenerated
//! image snapshot.
//!
//! [`BitmapImage`] owns a [`DrawingSurface`] (the pixels) and an
//! [`ImageCache`] (the exported [`Image`]). Mutations mark the cache dirty;
//! reading the exported image regenerates it on demand.
//!
//! # Quick Start
//!
//! ```rust
//! use bitmaprep::BitmapImage;
//! use bitmaprep_core::Frame;
//!
//! let mut bmp = BitmapImage::new(200, 100)?;
//! bmp.graphics_context().fill([40, 80, 120, 255]);
//!
//! // Pixel access, byte and float forms share storage
//! bmp.set_pixel_u8(10, 10, [255, 255, 255, 255])?;
//! assert_eq!(bmp.get_pixel(10, 10)?, [1.0, 1.0, 1.0, 1.0]);
//!
//! // In-place transforms
//! bmp.set_size_filling_with_aspect(100, 100)?;
//! bmp.set_brightness(1.2)?;
//! bmp.invert_colors();
//!
//! // Transforms producing new bitmaps
//! let corner = bmp.crop_with_frame(Frame::new(-10, -10, 50, 50))?;
//! let tilted = bmp.rotate(30.0)?;
//! assert_eq!(corner.dimensions(), (50, 50));
//! assert!(tilted.width() > 100);
//!
//! // Export
//! let image = bmp.image()?.clone();
//! assert_eq!(image.dimensions(), (100, 100));
//! # Ok::<(), bitmaprep_core::Error>(())
//! ```
//!
//! # Conventions
//!
//! - Origin at the top-left, Y down
//! - Straight alpha in every accessor
//! - Positive rotation angles turn clockwise on screen
//!
//! # Logging
//!
//! Operations emit `tracing` events: `trace` for raster work, `debug` for
//! bitmap and cache state changes, `warn` for missing resources. No
//! subscriber is installed.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod bitmap;
pub mod cache;
pub mod ext;
pub mod options;
pub mod resource;
pub mod surface;
pub mod target;

pub use bitmap::BitmapImage;
pub use cache::{CacheState, ImageCache};
pub use ext::ImageExt;
pub use options::{BitmapOptions, OptionsError};
pub use resource::{FnLoader, ResourceBundle, ResourceLoader};
pub use surface::DrawingSurface;
pub use target::DrawTarget;

pub use bitmaprep_core::{Error, Frame, Image, PixelBuffer, Rect, Result, Rgba8, RgbaF};
pub use bitmaprep_ops::{Filter, Interpolation};

/// Prelude module for convenient imports.
///
/// ```
/// use bitmaprep::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bitmap::BitmapImage;
    pub use crate::ext::ImageExt;
    pub use crate::options::BitmapOptions;
    pub use crate::resource::ResourceLoader;
    pub use crate::surface::DrawingSurface;
    pub use crate::target::DrawTarget;
    pub use bitmaprep_core::prelude::*;
    pub use bitmaprep_ops::{Filter, Interpolation};
}
