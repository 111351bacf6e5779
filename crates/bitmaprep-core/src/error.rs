//! Error types for bitmap operations.
//!
//! Every failure in the workspace is reported through the single [`Error`]
//! enum defined here. Failures are local to the call that produced them:
//! a rejected resize, crop or pixel write leaves the bitmap exactly as it was.
//!
//! # Usage
//!
//! ```rust
//! use bitmaprep_core::{Error, Result};
//!
//! fn check(x: i32, y: i32, width: u32, height: u32) -> Result<()> {
//!     if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
//!         return Err(Error::out_of_bounds(x, y, width, height));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(4, 0, 4, 4).unwrap_err().is_bounds_error());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - derive macro for the error implementation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while creating or transforming a bitmap.
///
/// # Categories
///
/// - **Bounds errors**: [`OutOfBounds`](Error::OutOfBounds)
/// - **Size errors**: [`InvalidDimensions`](Error::InvalidDimensions),
///   [`DimensionMismatch`](Error::DimensionMismatch)
/// - **Allocation errors**: [`AllocationFailed`](Error::AllocationFailed)
/// - **Parameter errors**: [`InvalidParameter`](Error::InvalidParameter)
/// - **Loading errors**: [`ResourceNotFound`](Error::ResourceNotFound), [`Io`](Error::Io)
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel coordinates are outside the buffer.
    ///
    /// Coordinates are signed so that negative requests can be reported
    /// as-is instead of wrapping around.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bitmaprep_core::Error;
    ///
    /// let err = Error::out_of_bounds(-1, 3, 80, 60);
    /// assert!(err.to_string().contains("-1"));
    /// ```
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was requested
        x: i32,
        /// Y coordinate that was requested
        y: i32,
        /// Buffer width
        width: u32,
        /// Buffer height
        height: u32,
    },

    /// Requested width or height is zero, or the byte size overflows.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Why the size was rejected
        reason: String,
    },

    /// Pixel data does not match the declared size.
    #[error("dimension mismatch: expected {expected} elements, got {got}")]
    DimensionMismatch {
        /// Expected element count
        expected: usize,
        /// Actual element count
        got: usize,
    },

    /// Memory for a new buffer could not be reserved.
    ///
    /// The operation that needed the buffer fails; the bitmap keeps its
    /// previous contents.
    #[error("failed to allocate {requested} bytes: {reason}")]
    AllocationFailed {
        /// Bytes requested
        requested: usize,
        /// Failure reason
        reason: String,
    },

    /// A parameter is outside its accepted range.
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f32,
        /// Accepted range or other explanation
        reason: String,
    },

    /// A named resource could not be found by the loader.
    #[error("resource not found: {name}")]
    ResourceNotFound {
        /// Resource name that was requested
        name: String,
    },

    /// I/O error raised by a resource loader.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(expected: usize, got: usize) -> Self {
        Self::DimensionMismatch { expected, got }
    }

    /// Creates an [`Error::AllocationFailed`] error.
    #[inline]
    pub fn allocation_failed(requested: usize, reason: impl Into<String>) -> Self {
        Self::AllocationFailed {
            requested,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidParameter`] error.
    #[inline]
    pub fn invalid_parameter(name: &'static str, value: f32, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::ResourceNotFound`] error.
    #[inline]
    pub fn resource_not_found(name: impl Into<String>) -> Self {
        Self::ResourceNotFound { name: name.into() }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }

    /// Returns `true` if this is a size-related error.
    #[inline]
    pub fn is_size_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. } | Self::DimensionMismatch { .. }
        )
    }

    /// Returns `true` if this is an allocation error.
    #[inline]
    pub fn is_allocation_error(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. })
    }

    /// Returns `true` if a named resource was missing.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }
}
