//! Rectangle types for bitmap regions.
//!
//! - [`Rect`] - a region inside a buffer (unsigned origin)
//! - [`Frame`] - a placement that may hang off any edge (signed origin), used
//!   for crop frames and draw destinations
//!
//! # Coordinate System
//!
//! Origin (0, 0) is the **top-left** pixel, X grows to the right and Y grows
//! downward, matching raster row order.
//!
//! ```text
//! (0,0) ────────► X
//!   │
//!   │   ┌──────────┐
//!   │   │  Bitmap  │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```
//!
//! # Usage
//!
//! ```rust
//! use bitmaprep_core::{Frame, Rect};
//!
//! let frame = Frame::new(-10, 5, 40, 40);
//! let visible = frame.intersect_bounds(20, 20).unwrap();
//! assert_eq!(visible, Rect::new(0, 5, 20, 15));
//! ```

/// A rectangle inside a buffer, defined by origin and size.
///
/// Edges are inclusive on the left/top and exclusive on the right/bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: u32,
    /// Y coordinate of the top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle at (0, 0) with the given dimensions.
    ///
    /// ```rust
    /// use bitmaprep_core::Rect;
    ///
    /// let rect = Rect::from_size(1920, 1080);
    /// assert_eq!((rect.x, rect.y), (0, 0));
    /// ```
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Returns `true` if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rect({}, {}, {}x{})",
            self.x, self.y, self.width, self.height
        )
    }
}

/// A placement rectangle with a signed origin.
///
/// Unlike [`Rect`], a frame may start left of or above the buffer and may
/// extend past its right/bottom edges. Crop frames and draw destinations use
/// it; the part that actually touches the buffer is found with
/// [`intersect_bounds`](Frame::intersect_bounds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Frame {
    /// X coordinate of the left edge
    pub x: i32,
    /// Y coordinate of the top edge
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Frame {
    /// Creates a new frame.
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a frame at (0, 0) with the given dimensions.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Returns `true` if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// X coordinate of the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Y coordinate of the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Returns the part of this frame that lies inside a `width x height`
    /// buffer, or `None` if it misses the buffer entirely.
    pub fn intersect_bounds(&self, width: u32, height: u32) -> Option<Rect> {
        let x0 = (self.x as i64).max(0);
        let y0 = (self.y as i64).max(0);
        let x1 = self.right().min(width as i64);
        let y1 = self.bottom().min(height as i64);

        if x0 < x1 && y0 < y1 {
            Some(Rect::new(
                x0 as u32,
                y0 as u32,
                (x1 - x0) as u32,
                (y1 - y0) as u32,
            ))
        } else {
            None
        }
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Frame({}, {}, {}x{})",
            self.x, self.y, self.width, self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(Rect::from_size(0, 10).is_empty());
        assert!(!Rect::new(3, 3, 1, 1).is_empty());
        assert!(Frame::new(-4, 2, 5, 0).is_empty());
    }

    #[test]
    fn test_frame_edges() {
        let f = Frame::new(-5, 8, 10, 10);
        assert_eq!((f.right(), f.bottom()), (5, 18));
        let far = Frame::new(i32::MAX, 0, u32::MAX, 1);
        assert_eq!(far.right(), i32::MAX as i64 + u32::MAX as i64);
    }

    #[test]
    fn test_frame_inside() {
        let f = Frame::new(2, 3, 4, 4);
        assert_eq!(f.intersect_bounds(10, 10), Some(Rect::new(2, 3, 4, 4)));
    }

    #[test]
    fn test_frame_partially_outside() {
        let f = Frame::new(-5, 8, 10, 10);
        assert_eq!(f.intersect_bounds(10, 10), Some(Rect::new(0, 8, 5, 2)));
    }

    #[test]
    fn test_frame_miss() {
        let f = Frame::new(-20, -20, 10, 10);
        assert!(f.intersect_bounds(10, 10).is_none());
        assert!(Frame::new(10, 0, 3, 3).intersect_bounds(10, 10).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Rect::new(1, 2, 3, 4).to_string(), "Rect(1, 2, 3x4)");
        assert_eq!(Frame::new(-1, 2, 3, 4).to_string(), "Frame(-1, 2, 3x4)");
    }
}
