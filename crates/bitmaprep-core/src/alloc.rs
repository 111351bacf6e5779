//! Fallible buffer allocation.
//!
//! Large buffers (new surfaces for resize, crop and rotate) are reserved with
//! [`Vec::try_reserve_exact`] so that running out of memory surfaces as
//! [`Error::AllocationFailed`] instead of aborting the process.

use crate::pixel::CHANNELS;
use crate::{Error, Result};

/// Returns the byte length of an RGBA8 buffer, rejecting zero sizes and
/// overflow.
pub fn rgba_byte_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(
            width,
            height,
            "width and height must be at least 1",
        ));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows usize"))
}

/// Allocates a vector of `len` copies of `value`.
pub fn try_filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|e| {
        Error::allocation_failed(len.saturating_mul(std::mem::size_of::<T>()), e.to_string())
    })?;
    v.resize(len, value);
    Ok(v)
}

/// Allocates a copy of `src`.
pub fn try_copy<T: Clone>(src: &[T]) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(src.len()).map_err(|e| {
        Error::allocation_failed(src.len().saturating_mul(std::mem::size_of::<T>()), e.to_string())
    })?;
    v.extend_from_slice(src);
    Ok(v)
}
