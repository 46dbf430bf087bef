//! Equirectangular full-sky star map rendering.
//!
//! Stars, constellation boundaries, asterism lines and labels from the
//! [`catalog`] datasets are drawn onto a 360° × 120° band (declination ±60°)
//! and written out as an SVG document.
//!
//! # Examples
//!
//! ```rust
//! use catalog::SkyDatasets;
//! use skymap::{MapStyle, SkyMapConfig, SkyMapRenderer};
//!
//! let renderer = SkyMapRenderer::new(&SkyMapConfig::default(), MapStyle::default());
//! let map = renderer.render(&SkyDatasets::default());
//!
//! // Background plus 13 meridians, 7 parallels and their labels
//! assert_eq!(map.document.len(), 41);
//! ```

pub mod config;
pub mod magnitude;
pub mod projection;
pub mod render;
pub mod svg;
pub mod wrap;

pub use config::{ConfigError, MapStyle, SkyMapConfig};
pub use render::{RenderSummary, SkyMap, SkyMapRenderer};
