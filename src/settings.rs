//! Builder settings.
//!
//! Settings are plain JSON. Lookup order for [`Settings::load`]: the path in
//! `LAYER_METADATA_SETTINGS`, then `<config dir>/layer-metadata/settings.json`.
//! A missing or unreadable file yields the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::crs::{SpatialReference, WGS84_WKID};
use crate::util::{Error, Result};

/// Environment variable overriding the settings path.
pub const SETTINGS_ENV: &str = "LAYER_METADATA_SETTINGS";

/// Tunables applied when the input does not say otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `maxRecordCount` when neither options nor metadata set one.
    pub max_record_count: u32,
    /// Name of the synthetic object-id field.
    pub object_id_field: String,
    /// Spatial reference used when no CRS is found anywhere.
    pub default_wkid: u32,
    /// Length reported for inferred string fields.
    pub string_field_length: u32,
    /// Layer name when none is given.
    pub default_layer_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_record_count: 2000,
            object_id_field: "OBJECTID".to_string(),
            default_wkid: WGS84_WKID,
            string_field_length: 128,
            default_layer_name: "Not Set".to_string(),
        }
    }
}

impl Settings {
    /// Default settings file path.
    pub fn path() -> Option<PathBuf> {
        if let Some(p) = std::env::var_os(SETTINGS_ENV) {
            return Some(PathBuf::from(p));
        }
        dirs::config_dir().map(|mut p| {
            p.push("layer-metadata");
            p.push("settings.json");
            p
        })
    }

    /// Load settings from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(Self::path())
    }

    /// Load settings from `path`; a missing path or an unreadable or
    /// malformed file yields the defaults.
    pub fn load_from(path: Option<PathBuf>) -> Self {
        path.and_then(|p| {
            Self::from_file(&p)
                .map_err(|e| tracing::debug!("Using default settings ({}): {}", p.display(), e))
                .ok()
        })
        .unwrap_or_default()
    }

    /// Load settings from an explicit file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::SettingsNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Save settings to an explicit file, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Spatial reference used when nothing else resolves.
    pub fn fallback_spatial_reference(&self) -> SpatialReference {
        SpatialReference::from_wkid(self.default_wkid)
    }
}
