//! Star marker sizing from apparent magnitude

/// Faintest magnitude that still gets a visible marker
pub const MAGNITUDE_LIMIT: f64 = 6.6;

/// Converts apparent magnitude to a disk radius in pixels.
///
/// `radius = ((6.6 - m) / 6.6) ^ gamma * max_radius`
///
/// A gamma above 1 shrinks mid-range stars (3-4m) so the brightest stars
/// stand out, while faint stars keep a small but non-zero disk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerSizer {
    gamma: f64,
    max_radius: f64,
}

impl MarkerSizer {
    pub fn new(gamma: f64, max_radius: f64) -> Self {
        Self { gamma, max_radius }
    }

    /// Marker radius for magnitude `m`, clipped to zero past the limit
    pub fn radius(&self, magnitude: f64) -> f64 {
        let base = (MAGNITUDE_LIMIT - magnitude) / MAGNITUDE_LIMIT;
        if base.is_nan() || base <= 0.0 {
            return 0.0;
        }
        base.powf(self.gamma) * self.max_radius
    }
}

impl Default for MarkerSizer {
    fn default() -> Self {
        Self::new(1.6, 4.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_magnitude_gets_max_radius() {
        let sizer = MarkerSizer::default();
        assert_relative_eq!(sizer.radius(0.0), 4.5);
    }

    #[test]
    fn test_radius_decreases_with_magnitude() {
        let sizer = MarkerSizer::default();
        let mut previous = f64::INFINITY;
        let mut m = -1.5;
        while m <= MAGNITUDE_LIMIT {
            let r = sizer.radius(m);
            assert!(r >= 0.0, "negative radius {r} at m={m}");
            assert!(r < previous, "radius not decreasing at m={m}");
            previous = r;
            m += 0.1;
        }
    }

    #[test]
    fn test_gamma_applied() {
        let sizer = MarkerSizer::new(1.6, 4.5);
        // base 0.5 at m = 3.3
        assert_relative_eq!(sizer.radius(3.3), 0.5f64.powf(1.6) * 4.5, epsilon = 1e-12);
    }

    #[test]
    fn test_faint_stars_clip_to_zero() {
        let sizer = MarkerSizer::default();
        assert_eq!(sizer.radius(MAGNITUDE_LIMIT), 0.0);
        assert_eq!(sizer.radius(7.2), 0.0);
        assert_eq!(sizer.radius(f64::NAN), 0.0);
    }
}
