//! Error types for layer metadata derivation.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for metadata operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Input is not a FeatureCollection, Feature or Geometry
    #[error("Invalid GeoJSON: {0}")]
    InvalidGeoJson(String),

    /// Geometry has an unusable coordinate structure
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Spatial reference could not be resolved
    #[error("Invalid spatial reference: {0}")]
    InvalidSpatialReference(String),

    /// Extent override has an unrecognized shape
    #[error("Received invalid extent: {0}")]
    InvalidExtent(String),

    /// Options bag has a value of the wrong type
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Settings file does not exist or cannot be accessed
    #[error("Settings file not found: {}", .0.display())]
    SettingsNotFound(PathBuf),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid geometry error.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }
}

/// Result type alias for metadata operations.
pub type Result<T> = std::result::Result<T, Error>;
