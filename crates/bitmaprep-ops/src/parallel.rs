//! Row-parallel drivers for per-pixel scans.
//!
//! With the `parallel` feature (default) rows are distributed with rayon;
//! without it the same closures run on the calling thread. Results are
//! identical either way.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Calls `f(y, row)` for every `row_len`-sized row of `data`.
#[cfg(feature = "parallel")]
pub(crate) fn for_each_row_mut<T, F>(data: &mut [T], row_len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    data.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

/// Calls `f(y, row)` for every `row_len`-sized row of `data` (single-threaded fallback).
#[cfg(not(feature = "parallel"))]
pub(crate) fn for_each_row_mut<T, F>(data: &mut [T], row_len: usize, f: F)
where
    F: Fn(usize, &mut [T]),
{
    data.chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}
