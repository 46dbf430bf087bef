//! CSV loading for the four map datasets
//!
//! Every dataset is a headered CSV file. Columns are matched by name, so
//! column order does not matter and unused columns are ignored. Any row that
//! fails to parse or carries out-of-range coordinates aborts the load: a
//! partially loaded table is never returned.

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use log::info;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::constellations::{AsterismSegment, BoundarySegment, ConstellationRecord};
use crate::stars::{StarRecord, StarTable};
use crate::StarCatalog;

pub const STARS_FILE: &str = "dataset_bright_stars.csv";
pub const CONSTELLATIONS_FILE: &str = "constellations.csv";
pub const BOUNDARIES_FILE: &str = "constbnd_draw.csv";
pub const ASTERISMS_FILE: &str = "cst_lines.csv";

/// Errors that can occur while loading datasets
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}, line {line}: {message}", path.display())]
    InvalidRecord {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("Duplicate star HIP {0}")]
    DuplicateStar(u32),
}

/// Locations of the four dataset files
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetPaths {
    pub stars: PathBuf,
    pub constellations: PathBuf,
    pub boundaries: PathBuf,
    pub asterisms: PathBuf,
}

impl DatasetPaths {
    /// Standard dataset file names inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            stars: dir.join(STARS_FILE),
            constellations: dir.join(CONSTELLATIONS_FILE),
            boundaries: dir.join(BOUNDARIES_FILE),
            asterisms: dir.join(ASTERISMS_FILE),
        }
    }
}

/// All tables needed to draw a map, read-only once loaded
#[derive(Debug, Clone, Default)]
pub struct SkyDatasets {
    pub stars: StarTable,
    pub constellations: Vec<ConstellationRecord>,
    pub boundaries: Vec<BoundarySegment>,
    pub asterisms: Vec<AsterismSegment>,
}

impl SkyDatasets {
    /// Load all four datasets, failing on the first malformed file
    pub fn load(paths: &DatasetPaths) -> Result<Self, CatalogError> {
        let stars = load_stars(&paths.stars)?;
        info!("Loaded {} stars from {}", stars.len(), paths.stars.display());

        let constellations = load_constellations(&paths.constellations)?;
        info!(
            "Loaded {} constellations from {}",
            constellations.len(),
            paths.constellations.display()
        );

        let boundaries = load_boundaries(&paths.boundaries)?;
        info!(
            "Loaded {} boundary segments from {}",
            boundaries.len(),
            paths.boundaries.display()
        );

        let asterisms = load_asterisms(&paths.asterisms)?;
        info!(
            "Loaded {} asterism segments from {}",
            asterisms.len(),
            paths.asterisms.display()
        );

        Ok(Self {
            stars,
            constellations,
            boundaries,
            asterisms,
        })
    }
}

/// Load the bright star table
pub fn load_stars<P: AsRef<Path>>(path: P) -> Result<StarTable, CatalogError> {
    let path = path.as_ref();
    let mut table = StarTable::new();

    for (line, star) in read_rows::<StarRecord>(path)? {
        let invalid = |message: String| CatalogError::InvalidRecord {
            path: path.to_path_buf(),
            line,
            message,
        };
        check_ra(star.ra_deg).map_err(invalid)?;
        check_dec(star.dec_deg).map_err(invalid)?;
        if !star.magnitude.is_finite() {
            return Err(invalid(format!("magnitude {} is not finite", star.magnitude)));
        }
        table.insert(star).map_err(|e| invalid(e.to_string()))?;
    }

    Ok(table)
}

/// Load constellation codes and label anchors
pub fn load_constellations<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<ConstellationRecord>, CatalogError> {
    let path = path.as_ref();
    let rows = read_rows::<ConstellationRecord>(path)?;

    rows.into_iter()
        .map(|(line, record)| {
            if record.code.is_empty() {
                return Err(CatalogError::InvalidRecord {
                    path: path.to_path_buf(),
                    line,
                    message: "empty constellation code".to_string(),
                });
            }
            Ok(record)
        })
        .collect()
}

/// Load constellation boundary segments
pub fn load_boundaries<P: AsRef<Path>>(path: P) -> Result<Vec<BoundarySegment>, CatalogError> {
    let path = path.as_ref();
    let rows = read_rows::<BoundarySegment>(path)?;

    rows.into_iter()
        .map(|(line, segment)| {
            for (ra, dec) in segment.endpoints() {
                let checked = check_ra(ra).and_then(|_| check_dec(dec));
                checked.map_err(|message| CatalogError::InvalidRecord {
                    path: path.to_path_buf(),
                    line,
                    message,
                })?;
            }
            Ok(segment)
        })
        .collect()
}

/// Load asterism line segments
pub fn load_asterisms<P: AsRef<Path>>(path: P) -> Result<Vec<AsterismSegment>, CatalogError> {
    let rows = read_rows::<AsterismSegment>(path.as_ref())?;
    Ok(rows.into_iter().map(|(_, segment)| segment).collect())
}

/// Deserialize every row of a headered CSV file, tagged with its line number
fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<(u64, T)>, CatalogError> {
    let read_error = |source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(path)
        .map_err(read_error)?;
    let headers = reader.headers().map_err(read_error)?.clone();

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                return Err(CatalogError::InvalidRecord {
                    path: path.to_path_buf(),
                    line,
                    message: e.to_string(),
                });
            }
        }

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row = record
            .deserialize::<T>(Some(&headers))
            .map_err(|e| CatalogError::InvalidRecord {
                path: path.to_path_buf(),
                line,
                message: e.to_string(),
            })?;
        rows.push((line, row));
    }

    Ok(rows)
}

fn check_ra(ra: f64) -> Result<(), String> {
    if (0.0..=360.0).contains(&ra) {
        Ok(())
    } else {
        Err(format!("right ascension {ra} outside [0, 360]"))
    }
}

fn check_dec(dec: f64) -> Result<(), String> {
    if (-90.0..=90.0).contains(&dec) {
        Ok(())
    } else {
        Err(format!("declination {dec} outside [-90, 90]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_stars_selects_named_columns() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            STARS_FILE,
            "HIP,Name,Vmag,RAdeg,DEdeg,B-V\n\
             32349,Sirius,-1.44,101.28716,-16.71612,0.009\n\
             91262,Vega,0.03,279.23410,38.78299,-0.001\n",
        );

        let stars = load_stars(&path).unwrap();
        assert_eq!(stars.len(), 2);
        let sirius = stars.get_star(32349).unwrap();
        assert_relative_eq!(sirius.ra_deg, 101.28716);
        assert_relative_eq!(sirius.dec_deg, -16.71612);
        assert_relative_eq!(sirius.magnitude, -1.44);
    }

    #[test]
    fn test_malformed_star_row_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            STARS_FILE,
            "HIP,Vmag,RAdeg,DEdeg\n\
             677,2.07,2.09653,29.09043\n\
             746,bright,2.29452,59.14978\n",
        );

        match load_stars(&path) {
            Err(CatalogError::InvalidRecord { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected InvalidRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_out_of_range_declination_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, STARS_FILE, "HIP,Vmag,RAdeg,DEdeg\n1,5.0,10.0,95.0\n");
        let err = load_stars(&path).unwrap_err();
        assert!(err.to_string().contains("declination"));
    }

    #[test]
    fn test_duplicate_star_reports_line() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            STARS_FILE,
            "HIP,Vmag,RAdeg,DEdeg\n677,2.07,2.1,29.1\n677,2.07,2.1,29.1\n",
        );
        let err = load_stars(&path).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRecord { line: 3, .. }));
        assert!(err.to_string().contains("677"));
    }

    #[test]
    fn test_constellations_allow_missing_anchor() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            CONSTELLATIONS_FILE,
            "Cst_short,Cst_name,Cst_ru,HIP_center\n\
             And,Andromeda,Андромеда,3092\n\
             Oct,Octans,Октант,\n",
        );

        let records = load_constellations(&path).unwrap();
        assert_eq!(
            records,
            vec![
                ConstellationRecord::new("And", Some(3092)),
                ConstellationRecord::new("Oct", None),
            ]
        );
    }

    #[test]
    fn test_bom_header_tolerated() {
        let dir = TempDir::new().unwrap();
        let stars = write(
            &dir,
            STARS_FILE,
            "\u{feff}HIP,Vmag,RAdeg,DEdeg\n677,2.07,2.09653,29.09043\n",
        );
        let names = write(
            &dir,
            CONSTELLATIONS_FILE,
            "\u{feff}Cst_short,HIP_center\nAnd,3092\n",
        );

        let stars = load_stars(&stars).unwrap();
        assert!(stars.contains(677));
        assert_eq!(
            load_constellations(&names).unwrap(),
            vec![ConstellationRecord::new("And", Some(3092))]
        );
    }

    #[test]
    fn test_boundaries_and_asterisms() {
        let dir = TempDir::new().unwrap();
        let bnd = write(
            &dir,
            BOUNDARIES_FILE,
            "RA1,Dec1,RA2,Dec2\n344.46,35.17,1.76,35.17\n",
        );
        let lines = write(
            &dir,
            ASTERISMS_FILE,
            "HIP1,HIP2,Cst_num,Cst\n677,3092,1,And\n3092,5447,1,And\n",
        );

        let boundaries = load_boundaries(&bnd).unwrap();
        assert_eq!(boundaries, vec![BoundarySegment::new(344.46, 35.17, 1.76, 35.17)]);

        let asterisms = load_asterisms(&lines).unwrap();
        assert_eq!(asterisms.len(), 2);
        assert_eq!(asterisms[0], AsterismSegment::new(677, 3092).with_constellation("And"));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let result = load_boundaries(dir.path().join("absent.csv"));
        assert!(matches!(result, Err(CatalogError::Read { .. })));
    }

    #[test]
    fn test_load_all_from_dir() {
        let dir = TempDir::new().unwrap();
        write(&dir, STARS_FILE, "HIP,Vmag,RAdeg,DEdeg\n677,2.07,2.09653,29.09043\n");
        write(&dir, CONSTELLATIONS_FILE, "Cst_short,HIP_center\nAnd,677\n");
        write(&dir, BOUNDARIES_FILE, "RA1,Dec1,RA2,Dec2\n");
        write(&dir, ASTERISMS_FILE, "HIP1,HIP2\n");

        let datasets = SkyDatasets::load(&DatasetPaths::in_dir(dir.path())).unwrap();
        assert_eq!(datasets.stars.len(), 1);
        assert_eq!(datasets.constellations.len(), 1);
        assert!(datasets.boundaries.is_empty());
        assert!(datasets.asterisms.is_empty());
    }
}
