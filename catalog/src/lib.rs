//! Bright star and constellation datasets
//!
//! This crate loads the four tables used to draw a constellation map:
//! bright stars keyed by Hipparcos number, constellation names with a label
//! anchor star, constellation boundary segments and asterism (stick figure)
//! line segments.

pub mod constellations;
pub mod loader;
pub mod stars;

pub use constellations::{AsterismSegment, BoundarySegment, ConstellationRecord};
pub use loader::{CatalogError, DatasetPaths, SkyDatasets};
pub use stars::{StarRecord, StarTable};

/// Generic trait for star tables keyed by catalog number
pub trait StarCatalog {
    /// Star entry type for this catalog
    type Star;

    /// Get a star by its catalog identifier
    fn get_star(&self, id: u32) -> Option<&Self::Star>;

    /// Get all stars in the catalog, in load order
    fn stars(&self) -> impl Iterator<Item = &Self::Star>;

    /// Get the number of stars in the catalog
    fn len(&self) -> usize;

    /// Check if the catalog is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
