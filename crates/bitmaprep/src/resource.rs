//! Named image resources.
//!
//! Decoding is outside this crate. A [`ResourceLoader`] hands out already
//! decoded [`Image`]s by name; [`ResourceBundle`] is the in-memory version
//! and [`FnLoader`] adapts any closure (for example one that reads and
//! decodes files).

use std::collections::HashMap;
use std::fmt;

use bitmaprep_core::{Error, Image, Result};

/// Source of decoded images looked up by name.
pub trait ResourceLoader {
    /// Loads the image called `name`.
    ///
    /// # Errors
    ///
    /// [`Error::ResourceNotFound`] when no such resource exists; loaders
    /// that touch the filesystem may also return [`Error::Io`].
    fn load(&self, name: &str) -> Result<Image>;
}

impl<L: ResourceLoader + ?Sized> ResourceLoader for &L {
    fn load(&self, name: &str) -> Result<Image> {
        (**self).load(name)
    }
}

/// In-memory map of named images.
///
/// # Example
///
/// ```rust
/// use bitmaprep::{ResourceBundle, ResourceLoader};
/// use bitmaprep_core::Image;
///
/// let bundle = ResourceBundle::new().with("dot", Image::filled(1, 1, [0, 0, 0, 255]).unwrap());
/// assert!(bundle.load("dot").is_ok());
/// assert!(bundle.load("missing").unwrap_err().is_not_found());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResourceBundle {
    images: HashMap<String, Image>,
}

impl ResourceBundle {
    /// Creates an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `image` under `name`, builder style.
    pub fn with(mut self, name: impl Into<String>, image: Image) -> Self {
        self.insert(name, image);
        self
    }

    /// Adds `image` under `name`, returning the image it replaced.
    pub fn insert(&mut self, name: impl Into<String>, image: Image) -> Option<Image> {
        self.images.insert(name.into(), image)
    }

    /// Removes and returns the image called `name`.
    pub fn remove(&mut self, name: &str) -> Option<Image> {
        self.images.remove(name)
    }

    /// Returns `true` if `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    /// Number of images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns `true` if the bundle holds no images.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Resource names, unordered.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.images.keys().map(String::as_str)
    }
}

impl ResourceLoader for ResourceBundle {
    fn load(&self, name: &str) -> Result<Image> {
        self.images
            .get(name)
            .cloned()
            .ok_or_else(|| Error::resource_not_found(name))
    }
}

/// [`ResourceLoader`] backed by a closure.
///
/// ```rust
/// use bitmaprep::{FnLoader, ResourceLoader};
/// use bitmaprep_core::{Error, Image};
///
/// let loader = FnLoader::new(|name: &str| match name {
///     "white" => Image::filled(1, 1, [255; 4]),
///     _ => Err(Error::resource_not_found(name)),
/// });
/// assert!(loader.load("white").is_ok());
/// ```
pub struct FnLoader<F> {
    load: F,
}

impl<F> FnLoader<F>
where
    F: Fn(&str) -> Result<Image>,
{
    /// Wraps `load`.
    pub fn new(load: F) -> Self {
        Self { load }
    }
}

impl<F> ResourceLoader for FnLoader<F>
where
    F: Fn(&str) -> Result<Image>,
{
    fn load(&self, name: &str) -> Result<Image> {
        (self.load)(name)
    }
}

impl<F> fmt::Debug for FnLoader<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnLoader").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_insert_and_load() {
        let mut bundle = ResourceBundle::new();
        assert!(bundle.is_empty());
        let img = Image::filled(2, 3, [9; 4]).unwrap();
        assert!(bundle.insert("a", img.clone()).is_none());
        assert!(bundle.contains("a"));
        assert_eq!(bundle.len(), 1);

        let loaded = bundle.load("a").unwrap();
        assert!(loaded.ptr_eq(&img));
        assert_eq!(bundle.names().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_bundle_missing() {
        let bundle = ResourceBundle::new();
        let err = bundle.load("nope").unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_bundle_remove() {
        let mut bundle = ResourceBundle::new().with("x", Image::filled(1, 1, [0; 4]).unwrap());
        assert!(bundle.remove("x").is_some());
        assert!(bundle.load("x").is_err());
    }

    #[test]
    fn test_fn_loader_io_error() {
        let loader = FnLoader::new(|_: &str| {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked").into())
        });
        assert!(matches!(loader.load("any"), Err(Error::Io(_))));
    }

    #[test]
    fn test_loader_by_reference() {
        let bundle = ResourceBundle::new().with("k", Image::filled(1, 1, [1; 4]).unwrap());
        let by_ref: &dyn ResourceLoader = &bundle;
        assert!((&by_ref).load("k").is_ok());
    }
}
