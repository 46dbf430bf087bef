//! Bright star table keyed by Hipparcos number

use std::collections::HashMap;

use serde::Deserialize;

use crate::loader::CatalogError;
use crate::StarCatalog;

/// One row of the bright star dataset.
///
/// Coordinates are equatorial, in degrees. Only the columns needed for
/// drawing are kept; the rest of the row is ignored at load time.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct StarRecord {
    /// Hipparcos catalog number
    #[serde(rename = "HIP")]
    pub hip: u32,

    /// Right ascension in degrees [0, 360]
    #[serde(rename = "RAdeg")]
    pub ra_deg: f64,

    /// Declination in degrees [-90, 90]
    #[serde(rename = "DEdeg")]
    pub dec_deg: f64,

    /// Apparent visual magnitude
    #[serde(rename = "Vmag")]
    pub magnitude: f64,
}

impl StarRecord {
    pub fn new(hip: u32, ra_deg: f64, dec_deg: f64, magnitude: f64) -> Self {
        Self {
            hip,
            ra_deg,
            dec_deg,
            magnitude,
        }
    }
}

/// Stars in file order with an O(1) index by Hipparcos number.
///
/// Iteration always follows load order, which is also the order markers are
/// drawn in. The hash index only answers lookups.
#[derive(Debug, Clone, Default)]
pub struct StarTable {
    stars: Vec<StarRecord>,
    index: HashMap<u32, usize>,
}

impl StarTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from records, rejecting duplicated catalog numbers
    pub fn from_records<I>(records: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = StarRecord>,
    {
        let mut table = Self::new();
        for star in records {
            table.insert(star)?;
        }
        Ok(table)
    }

    /// Append a star at the end of the table
    pub fn insert(&mut self, star: StarRecord) -> Result<(), CatalogError> {
        if self.index.contains_key(&star.hip) {
            return Err(CatalogError::DuplicateStar(star.hip));
        }
        self.index.insert(star.hip, self.stars.len());
        self.stars.push(star);
        Ok(())
    }

    /// Check whether a catalog number is present
    pub fn contains(&self, hip: u32) -> bool {
        self.index.contains_key(&hip)
    }
}

impl StarCatalog for StarTable {
    type Star = StarRecord;

    fn get_star(&self, id: u32) -> Option<&StarRecord> {
        self.index.get(&id).map(|&i| &self.stars[i])
    }

    fn stars(&self) -> impl Iterator<Item = &StarRecord> {
        self.stars.iter()
    }

    fn len(&self) -> usize {
        self.stars.len()
    }
}
