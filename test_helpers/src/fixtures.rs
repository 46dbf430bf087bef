//! Builders for small on-disk datasets

use std::fs;
use std::io;
use std::path::Path;

use catalog::DatasetPaths;

/// In-memory rows for the four dataset files.
///
/// Rows are written with the same headers as the published datasets,
/// including a few columns the loader does not read.
#[derive(Debug, Clone, Default)]
pub struct DatasetFixture {
    stars: Vec<String>,
    constellations: Vec<String>,
    boundaries: Vec<String>,
    asterisms: Vec<String>,
}

impl DatasetFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handful of real stars around Orion and Andromeda, with one boundary
    /// edge and one asterism line that both cross the 0h meridian.
    pub fn sample_sky() -> Self {
        Self::new()
            // Orion
            .star(27989, 0.45, 88.79287, 7.40703)
            .star(24436, 0.18, 78.63446, -8.20164)
            .star(26727, 1.74, 85.18969, -1.94257)
            .star(26311, 1.69, 84.05339, -1.20192)
            .star(25930, 2.25, 83.00167, -0.29909)
            // Pegasus / Andromeda, either side of 0h
            .star(677, 2.07, 2.09653, 29.09043)
            .star(113881, 2.44, 345.94357, 28.08279)
            .star(1067, 2.83, 3.30897, 15.18359)
            // Polaris sits above the rendered band
            .star(11767, 1.97, 37.95456, 89.26411)
            .constellation("Ori", Some(26311))
            .constellation("And", Some(677))
            .constellation("UMi", Some(11767))
            .constellation("Oct", None)
            .boundary(344.46, 35.17, 1.76, 35.17)
            .boundary(72.50, 15.50, 72.50, -4.00)
            .asterism(26727, 26311, "Ori")
            .asterism(26311, 25930, "Ori")
            .asterism(113881, 677, "Peg")
            .asterism(677, 1067, "Peg")
    }

    pub fn star(mut self, hip: u32, vmag: f64, ra_deg: f64, dec_deg: f64) -> Self {
        self.stars
            .push(format!("{hip},{vmag},{:.5},{:.5},{ra_deg},{dec_deg}", ra_deg / 15.0, dec_deg));
        self
    }

    pub fn constellation(mut self, code: &str, anchor_hip: Option<u32>) -> Self {
        let anchor = anchor_hip.map(|h| h.to_string()).unwrap_or_default();
        self.constellations.push(format!("{code},{code},{anchor}"));
        self
    }

    pub fn boundary(mut self, ra1: f64, dec1: f64, ra2: f64, dec2: f64) -> Self {
        self.boundaries.push(format!("{ra1},{dec1},{ra2},{dec2}"));
        self
    }

    pub fn asterism(mut self, hip1: u32, hip2: u32, code: &str) -> Self {
        self.asterisms.push(format!("{hip1},{hip2},{code}"));
        self
    }

    /// Write the four CSV files into `dir` under their standard names
    pub fn write_to(&self, dir: &Path) -> io::Result<DatasetPaths> {
        let paths = DatasetPaths::in_dir(dir);
        write_csv(&paths.stars, "HIP,Vmag,RAh,DEd,RAdeg,DEdeg", &self.stars)?;
        write_csv(
            &paths.constellations,
            "Cst_short,Cst_name,HIP_center",
            &self.constellations,
        )?;
        write_csv(&paths.boundaries, "RA1,Dec1,RA2,Dec2", &self.boundaries)?;
        write_csv(&paths.asterisms, "HIP1,HIP2,Cst", &self.asterisms)?;
        Ok(paths)
    }
}

fn write_csv(path: &Path, header: &str, rows: &[String]) -> io::Result<()> {
    let mut contents = String::with_capacity(header.len() + 1 + rows.len() * 32);
    contents.push_str(header);
    contents.push('\n');
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    fs::write(path, contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fixture_writes_headers_only() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DatasetFixture::new().write_to(dir.path()).unwrap();
        let contents = fs::read_to_string(&paths.boundaries).unwrap();
        assert_eq!(contents, "RA1,Dec1,RA2,Dec2\n");
    }

    #[test]
    fn test_missing_anchor_written_as_empty_cell() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DatasetFixture::new()
            .constellation("Oct", None)
            .write_to(dir.path())
            .unwrap();
        let contents = fs::read_to_string(&paths.constellations).unwrap();
        assert!(contents.ends_with("Oct,Oct,\n"));
    }
}
