//! Per-bitmap drawing options.
//!
//! Options can be built in code or loaded from YAML:
//!
//! ```yaml
//! filter: lanczos3
//! rotation_filter: nearest
//! ```
//!
//! Missing keys fall back to [`BitmapOptions::default`].

use std::path::Path;

use bitmaprep_ops::{Filter, Interpolation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or saving [`BitmapOptions`].
#[derive(Debug, Error)]
pub enum OptionsError {
    /// I/O error reading or writing an options file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse or emit error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Filters used by a bitmap's scaled and rotated draws.
///
/// Crop and rotate results inherit the options of the bitmap they came from.
///
/// # Example
///
/// ```rust
/// use bitmaprep::BitmapOptions;
/// use bitmaprep_ops::{Filter, Interpolation};
///
/// let opts = BitmapOptions::from_yaml_str("filter: bicubic").unwrap();
/// assert_eq!(opts.filter, Filter::Bicubic);
/// assert_eq!(opts.rotation_filter, Interpolation::Bilinear);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BitmapOptions {
    /// Resampling filter for resize and quality reduction.
    pub filter: Filter,
    /// Interpolation for rotation.
    pub rotation_filter: Interpolation,
}

impl BitmapOptions {
    /// Sets the resampling filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the rotation interpolation.
    pub fn with_rotation_filter(mut self, rotation_filter: Interpolation) -> Self {
        self.rotation_filter = rotation_filter;
        self
    }

    /// Parses options from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, OptionsError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads options from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Serializes options to YAML text.
    pub fn to_yaml_string(&self) -> Result<String, OptionsError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
