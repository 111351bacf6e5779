//! Lazily regenerated image snapshot.
//!
//! The cache is a two-state machine:
//!
//! ```text
//!            invalidate()
//!   Clean ----------------> Dirty { stale }
//!     ^                         |
//!     +--- get_or_refresh() ----+
//! ```
//!
//! A new cache starts `Dirty` with no stale image, so the first read always
//! regenerates. Invalidating a clean cache keeps the old snapshot around as
//! `stale` until the next refresh replaces it.

use bitmaprep_core::{Image, Result};
use tracing::debug;

/// State of an [`ImageCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheState {
    /// The cached image is missing or does not reflect the surface.
    Dirty {
        /// Last snapshot taken before the invalidation, if any.
        stale: Option<Image>,
    },
    /// The cached image matches the surface.
    Clean(Image),
}

/// Snapshot cache with an explicit dirty flag.
///
/// # Example
///
/// ```rust
/// use bitmaprep::ImageCache;
/// use bitmaprep_core::Image;
///
/// let mut cache = ImageCache::new();
/// assert!(cache.is_dirty());
///
/// let img = cache
///     .get_or_refresh(|| Image::filled(1, 1, [1, 2, 3, 4]))
///     .unwrap()
///     .clone();
/// assert!(!cache.is_dirty());
///
/// cache.invalidate();
/// assert!(cache.is_dirty());
/// assert_eq!(cache.stale(), Some(&img));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCache {
    state: CacheState,
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageCache {
    /// Creates a dirty, empty cache.
    pub fn new() -> Self {
        Self {
            state: CacheState::Dirty { stale: None },
        }
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> &CacheState {
        &self.state
    }

    /// Returns `true` if the next read must regenerate.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        matches!(self.state, CacheState::Dirty { .. })
    }

    /// Marks the cache stale. Idempotent.
    pub fn invalidate(&mut self) {
        if let CacheState::Clean(image) = &self.state {
            let stale = Some(image.clone());
            self.state = CacheState::Dirty { stale };
            debug!("image cache invalidated");
        }
    }

    /// The valid image, if the cache is clean.
    pub fn current(&self) -> Option<&Image> {
        match &self.state {
            CacheState::Clean(image) => Some(image),
            CacheState::Dirty { .. } => None,
        }
    }

    /// The outdated image kept since the last invalidation.
    pub fn stale(&self) -> Option<&Image> {
        match &self.state {
            CacheState::Dirty { stale } => stale.as_ref(),
            CacheState::Clean(_) => None,
        }
    }

    /// Returns the clean image, calling `refresh` first if dirty.
    ///
    /// If `refresh` fails the cache stays dirty and keeps its stale image.
    pub fn get_or_refresh<F>(&mut self, refresh: F) -> Result<&Image>
    where
        F: FnOnce() -> Result<Image>,
    {
        if self.is_dirty() {
            let image = refresh()?;
            debug!(
                width = image.width(),
                height = image.height(),
                "image cache regenerated"
            );
            self.state = CacheState::Clean(image);
        }
        let CacheState::Clean(image) = &self.state else {
            unreachable!("cache was refreshed above")
        };
        Ok(image)
    }
}
