//! Constellation names, boundaries and asterism lines

use serde::Deserialize;

/// A constellation and the star its label is drawn next to
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConstellationRecord {
    /// Three letter IAU abbreviation (e.g. "UMa")
    #[serde(rename = "Cst_short")]
    pub code: String,

    /// Hipparcos number of the label anchor star.
    /// An empty cell means the constellation has no anchor.
    #[serde(rename = "HIP_center")]
    pub anchor_hip: Option<u32>,
}

impl ConstellationRecord {
    pub fn new(code: impl Into<String>, anchor_hip: Option<u32>) -> Self {
        Self {
            code: code.into(),
            anchor_hip,
        }
    }
}

/// One edge of a constellation boundary polygon, endpoints in degrees
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BoundarySegment {
    #[serde(rename = "RA1")]
    pub ra1: f64,
    #[serde(rename = "Dec1")]
    pub dec1: f64,
    #[serde(rename = "RA2")]
    pub ra2: f64,
    #[serde(rename = "Dec2")]
    pub dec2: f64,
}

impl BoundarySegment {
    pub fn new(ra1: f64, dec1: f64, ra2: f64, dec2: f64) -> Self {
        Self {
            ra1,
            dec1,
            ra2,
            dec2,
        }
    }

    /// Both endpoints as (ra, dec) pairs
    pub fn endpoints(&self) -> [(f64, f64); 2] {
        [(self.ra1, self.dec1), (self.ra2, self.dec2)]
    }
}

/// A stick figure line joining two stars of a constellation
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AsterismSegment {
    #[serde(rename = "HIP1")]
    pub hip1: u32,
    #[serde(rename = "HIP2")]
    pub hip2: u32,

    /// Constellation the line belongs to, when the dataset provides it
    #[serde(rename = "Cst", default)]
    pub constellation: Option<String>,
}

impl AsterismSegment {
    pub fn new(hip1: u32, hip2: u32) -> Self {
        Self {
            hip1,
            hip2,
            constellation: None,
        }
    }

    pub fn with_constellation(mut self, code: impl Into<String>) -> Self {
        self.constellation = Some(code.into());
        self
    }
}
