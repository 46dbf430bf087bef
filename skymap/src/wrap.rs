//! Splitting of lines that cross the 0h meridian.
//!
//! A boundary edge or asterism line between RA 350° and RA 10° is short on
//! the sky, but its projected endpoints sit at opposite edges of the map. A
//! straight line between them would cross the whole canvas. Such a segment
//! is drawn twice instead, once continued past the left edge and once past
//! the right edge. The off-canvas parts are left for the viewer to clip.

use crate::projection::Point;

/// A straight line between two canvas points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// Result of checking a projected segment against the meridian seam
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeridianSplit {
    /// The segment does not wrap and is drawn as is
    Single(Segment),
    /// The segment wraps; draw both copies
    Wrapped([Segment; 2]),
}

impl MeridianSplit {
    /// The segments to draw, in emission order
    pub fn segments(&self) -> &[Segment] {
        match self {
            MeridianSplit::Single(segment) => std::slice::from_ref(segment),
            MeridianSplit::Wrapped(pair) => pair,
        }
    }

    pub fn is_wrapped(&self) -> bool {
        matches!(self, MeridianSplit::Wrapped(_))
    }
}

/// Check a projected segment for a seam crossing and split it if needed.
///
/// A crossing is assumed when one endpoint lies left of `60 * scale` and the
/// other right of `300 * scale`, i.e. the endpoints are within 60° of the
/// seam on opposite sides.
pub fn split_at_meridian(start: Point, end: Point, scale: f64) -> MeridianSplit {
    let left_edge = 60.0 * scale;
    let right_edge = 300.0 * scale;
    let full_turn = 360.0 * scale;

    if start.x < left_edge && end.x > right_edge {
        MeridianSplit::Wrapped([
            Segment::new(start, end.shifted_x(-full_turn)),
            Segment::new(start.shifted_x(full_turn), end),
        ])
    } else if end.x < left_edge && start.x > right_edge {
        MeridianSplit::Wrapped([
            Segment::new(start.shifted_x(-full_turn), end),
            Segment::new(start, end.shifted_x(full_turn)),
        ])
    } else {
        MeridianSplit::Single(Segment::new(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossing_splits_in_two() {
        let split = split_at_meridian(Point::new(50.0, 10.0), Point::new(310.0, 20.0), 1.0);
        assert!(split.is_wrapped());

        let segments = split.segments();
        assert_eq!(segments.len(), 2);
        assert_eq!(
            segments[0],
            Segment::new(Point::new(50.0, 10.0), Point::new(-50.0, 20.0))
        );
        assert_eq!(
            segments[1],
            Segment::new(Point::new(410.0, 10.0), Point::new(310.0, 20.0))
        );

        for segment in segments {
            // Each copy spans the short way round, 100 px here
            assert_eq!((segment.start.x - segment.end.x).abs(), 100.0);
            // and stays within one map width of the canvas
            for x in [segment.start.x, segment.end.x] {
                assert!((-360.0..=720.0).contains(&x));
            }
        }
    }

    #[test]
    fn test_reverse_crossing_is_symmetric() {
        let forward = split_at_meridian(Point::new(50.0, 10.0), Point::new(310.0, 20.0), 1.0);
        let backward = split_at_meridian(Point::new(310.0, 20.0), Point::new(50.0, 10.0), 1.0);

        let MeridianSplit::Wrapped(back) = backward else {
            panic!("reverse segment should wrap");
        };
        assert_eq!(
            back[0],
            Segment::new(Point::new(-50.0, 20.0), Point::new(50.0, 10.0))
        );
        assert_eq!(
            back[1],
            Segment::new(Point::new(310.0, 20.0), Point::new(410.0, 10.0))
        );
        assert!(forward.is_wrapped());
    }

    #[test]
    fn test_ordinary_segment_untouched() {
        let start = Point::new(100.0, 5.0);
        let end = Point::new(250.0, 6.0);
        assert_eq!(
            split_at_meridian(start, end, 1.0),
            MeridianSplit::Single(Segment::new(start, end))
        );
    }

    #[test]
    fn test_thresholds_scale_with_map() {
        // 4 px per degree: 230 < 240 and 1210 > 1200 crosses
        let crossing = split_at_meridian(Point::new(230.0, 0.0), Point::new(1210.0, 0.0), 4.0);
        assert!(crossing.is_wrapped());

        // 250 is not left of 240, so this is a long but legitimate line
        let long = split_at_meridian(Point::new(250.0, 0.0), Point::new(1210.0, 0.0), 4.0);
        assert!(!long.is_wrapped());
    }
}
