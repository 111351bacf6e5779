//! # bitmaprep-core
//!
//! Core types for mutable RGBA bitmaps.
//!
//! This crate provides the foundational types used throughout the bitmaprep
//! workspace:
//!
//! - [`PixelBuffer`] - exclusively owned RGBA8 storage, the ground truth for
//!   pixel reads and writes
//! - [`Image`] - immutable, cheaply clonable snapshot of a buffer
//! - [`Rect`], [`Frame`] - pixel-aligned regions and placements
//! - [`pixel`] - 8-bit / float channel conversions and alpha helpers
//! - [`Error`] - the error taxonomy shared by every crate
//!
//! ## Crate Structure
//!
//! ```text
//! bitmaprep-core (this crate)
//!    ^
//!    |
//!    +-- bitmaprep-ops (resampling, compositing, rotation, color ops)
//!           ^
//!           |
//!           +-- bitmaprep (BitmapImage, surfaces, image cache)
//! ```
//!
//! ## Conventions
//!
//! - Origin at the top-left pixel, Y grows downward
//! - Four channels per pixel in `R, G, B, A` order
//! - Straight (non-premultiplied) alpha in storage and in every accessor

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod alloc;
pub mod buffer;
pub mod error;
pub mod image;
pub mod pixel;
pub mod rect;

// Re-exports for convenience
pub use buffer::PixelBuffer;
pub use error::*;
pub use image::Image;
pub use pixel::{Rgba8, RgbaF};
pub use rect::*;

/// Prelude module for convenient imports.
///
/// ```
/// use bitmaprep_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::PixelBuffer;
    pub use crate::error::{Error, Result};
    pub use crate::image::Image;
    pub use crate::pixel::{Rgba8, RgbaF};
    pub use crate::rect::{Frame, Rect};
}
