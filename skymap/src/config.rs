//! Render parameters and map style.
//!
//! [`SkyMapConfig`] holds the numeric constants of a render (scale, margin,
//! marker sizing). [`MapStyle`] holds colours, stroke widths and font sizes
//! and can be loaded from a JSON file; any top-level field left out of the
//! file keeps its default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::svg::{LineStyle, TextStyle};

/// Declination limit of the plotted band, degrees either side of the equator
pub const DEC_LIMIT_DEG: f64 = 60.0;

/// Errors that can occur when building a render configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {name}: {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Failed to read style file {}: {source}", path.display())]
    StyleRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse style file {}: {source}", path.display())]
    StyleParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Numeric parameters fixed for the whole render
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyMapConfig {
    /// Pixels per degree
    pub scale: f64,
    /// Padding around the plotted band in pixels
    pub margin: f64,
    /// Gamma applied to the normalized magnitude when sizing markers
    pub gamma: f64,
    /// Marker radius of a 0m star in pixels
    pub max_radius: f64,
}

impl Default for SkyMapConfig {
    fn default() -> Self {
        Self {
            scale: 4.0,
            margin: 10.0,
            gamma: 1.6,
            max_radius: 4.5,
        }
    }
}

impl SkyMapConfig {
    /// Reject parameters that would produce a degenerate canvas
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [("scale", self.scale), ("gamma", self.gamma)];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidParameter {
                    name,
                    value,
                    reason: "must be positive",
                });
            }
        }

        let non_negative = [("margin", self.margin), ("max_radius", self.max_radius)];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidParameter {
                    name,
                    value,
                    reason: "must not be negative",
                });
            }
        }

        Ok(())
    }
}

/// Colours, stroke widths and font sizes of every map layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapStyle {
    /// Fill of the plotted band
    pub background: String,
    /// Meridians and parallels
    pub grid: LineStyle,
    /// Stroke width of the equator, drawn heavier than other parallels
    pub equator_width: f64,
    /// Hour and degree labels along the grid
    pub grid_label: TextStyle,
    pub boundary: LineStyle,
    pub asterism: LineStyle,
    pub star_fill: String,
    pub constellation_label: TextStyle,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            background: "#122947".to_string(),
            grid: LineStyle::solid("#336699", 0.8, 0.5),
            equator_width: 1.0,
            grid_label: TextStyle::new("#336699", 10.0),
            boundary: LineStyle::dashed("#FF5090", 0.8, 0.5, "5,1"),
            asterism: LineStyle::solid("#45ad6a", 0.8, 0.5),
            star_fill: "#E0E0E0".to_string(),
            constellation_label: TextStyle::new("#a0a0a0", 11.0),
        }
    }
}

impl MapStyle {
    /// Load a style from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::StyleRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::StyleParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
