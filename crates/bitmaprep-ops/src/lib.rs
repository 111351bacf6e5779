//! # bitmaprep-ops
//!
//! Raster algorithms behind the bitmap transforms.
//!
//! Everything here is a pure function over pixel data; state, caching and
//! surfaces live in the `bitmaprep` crate.
//!
//! # Modules
//!
//! - [`resize`] - separable resampling and fit/fill sizing
//! - [`composite`] - source-over blits into a [`PixelBuffer`](bitmaprep_core::PixelBuffer)
//! - [`transform`] - rotation bounds, affine sampling, crop frames
//! - [`adjust`] - brightness and color inversion
//!
//! # Example
//!
//! ```rust
//! use bitmaprep_core::PixelBuffer;
//! use bitmaprep_ops::resize::{resize_premultiplied, Filter};
//!
//! let mut src = PixelBuffer::try_new(4, 4).unwrap();
//! src.fill([255, 0, 0, 255]);
//!
//! let pixels = src.to_premultiplied().unwrap();
//! let scaled = resize_premultiplied(&pixels, 4, 4, 2, 2, Filter::Bilinear).unwrap();
//!
//! let mut dst = PixelBuffer::try_new(2, 2).unwrap();
//! dst.store_premultiplied(&scaled).unwrap();
//! assert_eq!(dst.pixel(1, 1).unwrap(), [255, 0, 0, 255]);
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - row-parallel scans via rayon
//! - `serde` - `Serialize`/`Deserialize` for [`Filter`] and [`Interpolation`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod parallel;

pub mod adjust;
pub mod composite;
pub mod resize;
pub mod transform;

pub use resize::Filter;
pub use transform::Interpolation;
