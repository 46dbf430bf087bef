//! Equirectangular projection of equatorial coordinates onto the map canvas.
//!
//! Right ascension increases to the left, as seen from inside the celestial
//! sphere, so RA 0h sits at the right edge of the plot and RA 24h at the left.
//! Declination is linear in y with +60° at the top of the plotted band.
//!
//! ```text
//! x = (360 - ra) * scale + margin
//! y = 60 * scale + margin - dec * scale
//! ```
//!
//! # Examples
//!
//! ```rust
//! use skymap::projection::EquirectangularProjector;
//!
//! let projector = EquirectangularProjector::new(4.0, 10.0);
//! let p = projector.project(180.0, 0.0).unwrap();
//! assert_eq!((p.x, p.y), (730.0, 250.0));
//!
//! // Polaris is outside the plotted band
//! assert!(projector.project(37.95, 89.26).is_none());
//! ```

use crate::config::{SkyMapConfig, DEC_LIMIT_DEG};

/// A position on the canvas in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Same point moved horizontally by `dx` pixels
    pub fn shifted_x(self, dx: f64) -> Self {
        Self::new(self.x + dx, self.y)
    }
}

/// Linear mapping from (RA, Dec) in degrees to canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquirectangularProjector {
    scale: f64,
    margin: f64,
}

impl EquirectangularProjector {
    /// # Arguments
    /// * `scale` - Pixels per degree
    /// * `margin` - Border around the plotted band in pixels
    pub fn new(scale: f64, margin: f64) -> Self {
        Self { scale, margin }
    }

    pub fn from_config(config: &SkyMapConfig) -> Self {
        Self::new(config.scale, config.margin)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Whether a declination falls inside the plotted band [-60°, 60°]
    pub fn in_band(dec_deg: f64) -> bool {
        (-DEC_LIMIT_DEG..=DEC_LIMIT_DEG).contains(&dec_deg)
    }

    /// Project a point, or `None` when its declination is outside the band
    pub fn project(&self, ra_deg: f64, dec_deg: f64) -> Option<Point> {
        Self::in_band(dec_deg).then(|| self.project_unclipped(ra_deg, dec_deg))
    }

    /// Project without the declination clip.
    ///
    /// Used for line endpoints, where a segment may leave the band and the
    /// viewer is expected to clip it at the canvas edge.
    pub fn project_unclipped(&self, ra_deg: f64, dec_deg: f64) -> Point {
        Point::new(
            (360.0 - ra_deg) * self.scale + self.margin,
            DEC_LIMIT_DEG * self.scale + self.margin - dec_deg * self.scale,
        )
    }

    /// Inverse of [`project_unclipped`](Self::project_unclipped), returns (ra, dec) in degrees
    pub fn unproject(&self, point: Point) -> (f64, f64) {
        let ra = 360.0 - (point.x - self.margin) / self.scale;
        let dec = (DEC_LIMIT_DEG * self.scale + self.margin - point.y) / self.scale;
        (ra, dec)
    }

    /// Width in pixels of the full 360° band
    pub fn plot_width(&self) -> f64 {
        360.0 * self.scale
    }

    /// Height in pixels of the ±60° band
    pub fn plot_height(&self) -> f64 {
        2.0 * DEC_LIMIT_DEG * self.scale
    }

    /// Total canvas width including margins
    pub fn canvas_width(&self) -> f64 {
        self.plot_width() + 2.0 * self.margin
    }

    /// Total canvas height including margins
    pub fn canvas_height(&self) -> f64 {
        self.plot_height() + 2.0 * self.margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_reference_point() {
        let projector = EquirectangularProjector::new(4.0, 10.0);
        let p = projector.project(180.0, 0.0).unwrap();
        assert_eq!(p, Point::new(730.0, 250.0));
    }

    #[test]
    fn test_seam_is_one_full_width() {
        let projector = EquirectangularProjector::new(4.0, 10.0);
        let at_zero = projector.project(0.0, 12.0).unwrap();
        let at_full = projector.project(360.0, 12.0).unwrap();
        assert_relative_eq!(at_zero.x - at_full.x, 360.0 * 4.0);
        assert_eq!(at_zero.y, at_full.y);
    }

    #[test]
    fn test_band_corners_map_to_plot_rectangle() {
        let projector = EquirectangularProjector::new(4.0, 10.0);
        let top_right = projector.project(0.0, 60.0).unwrap();
        let bottom_left = projector.project(360.0, -60.0).unwrap();
        assert_eq!(top_right, Point::new(10.0 + 1440.0, 10.0));
        assert_eq!(bottom_left, Point::new(10.0, 10.0 + 480.0));
        assert_eq!(projector.canvas_width(), 1460.0);
        assert_eq!(projector.canvas_height(), 500.0);
    }

    #[rstest]
    #[case(60.0001)]
    #[case(-60.0001)]
    #[case(89.26)]
    #[case(-90.0)]
    fn test_outside_band_is_clipped(#[case] dec: f64) {
        let projector = EquirectangularProjector::new(4.0, 10.0);
        assert!(projector.project(10.0, dec).is_none());
    }

    #[rstest]
    #[case(0.0, -60.0)]
    #[case(45.5, 30.25)]
    #[case(101.28716, -16.71612)]
    #[case(279.2341, 38.78299)]
    #[case(359.999, 60.0)]
    fn test_projection_inverts(#[case] ra: f64, #[case] dec: f64) {
        for (scale, margin) in [(1.0, 0.0), (4.0, 10.0), (2.5, 7.0)] {
            let projector = EquirectangularProjector::new(scale, margin);
            let p = projector.project(ra, dec).unwrap();
            let (ra_back, dec_back) = projector.unproject(p);
            assert_relative_eq!(ra_back, ra, epsilon = 1e-9);
            assert_relative_eq!(dec_back, dec, epsilon = 1e-9);

            assert!(p.x >= margin && p.x <= margin + projector.plot_width());
            assert!(p.y >= margin && p.y <= margin + projector.plot_height());
        }
    }

    #[test]
    fn test_unclipped_keeps_polar_points() {
        let projector = EquirectangularProjector::new(1.0, 0.0);
        let p = projector.project_unclipped(0.0, 90.0);
        assert_eq!(p, Point::new(360.0, -30.0));
    }
}
