//! Assembly of the full-sky map.
//!
//! Layers are emitted bottom to top:
//!
//! 1. background band
//! 2. RA/Dec grid with labels
//! 3. constellation boundaries
//! 4. asterism lines
//! 5. star markers
//! 6. constellation labels
//!
//! Unresolved star references (asterism endpoints, label anchors) are logged
//! and skipped; they never abort a render.

use catalog::{SkyDatasets, StarCatalog, StarTable};
use log::{debug, warn};

use crate::config::{MapStyle, SkyMapConfig, DEC_LIMIT_DEG};
use crate::magnitude::MarkerSizer;
use crate::projection::{EquirectangularProjector, Point};
use crate::svg::{LineStyle, SvgDocument, TextAnchor};
use crate::wrap::split_at_meridian;

/// Number of meridians drawn, one every 2h including both edges
pub const RA_GRID_LINES: usize = 13;
/// Number of parallels drawn, one every 20° from +60° to -60°
pub const DEC_GRID_LINES: usize = 7;

const RA_GRID_STEP_DEG: f64 = 30.0;
const DEC_GRID_STEP_DEG: f64 = 20.0;
const EQUATOR_INDEX: usize = 3;

/// Feature counts from one render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Boundary segments drawn (a wrapped edge counts once)
    pub boundaries: usize,
    /// Boundary segments split at the 0h meridian
    pub wrapped_boundaries: usize,
    pub asterisms: usize,
    pub wrapped_asterisms: usize,
    /// Asterism lines skipped because a star was missing
    pub skipped_asterisms: usize,
    pub stars: usize,
    /// Stars outside the ±60° band
    pub stars_outside_band: usize,
    /// Stars fainter than the marker limit
    pub stars_too_faint: usize,
    pub labels: usize,
    pub labels_outside_band: usize,
    /// Labels skipped because the anchor star is missing
    pub missing_labels: usize,
}

/// A finished map together with what went into it
#[derive(Debug, Clone)]
pub struct SkyMap {
    pub document: SvgDocument,
    pub summary: RenderSummary,
}

/// Renders [`SkyDatasets`] into an equirectangular SVG map
#[derive(Debug, Clone)]
pub struct SkyMapRenderer {
    style: MapStyle,
    projector: EquirectangularProjector,
    sizer: MarkerSizer,
}

impl SkyMapRenderer {
    pub fn new(config: &SkyMapConfig, style: MapStyle) -> Self {
        Self {
            style,
            projector: EquirectangularProjector::from_config(config),
            sizer: MarkerSizer::new(config.gamma, config.max_radius),
        }
    }

    pub fn projector(&self) -> &EquirectangularProjector {
        &self.projector
    }

    /// Draw every layer of the map
    pub fn render(&self, data: &SkyDatasets) -> SkyMap {
        let mut document =
            SvgDocument::new(self.projector.canvas_width(), self.projector.canvas_height());
        let mut summary = RenderSummary::default();

        self.draw_background(&mut document);
        self.draw_grid(&mut document);
        self.draw_boundaries(&mut document, data, &mut summary);
        self.draw_asterisms(&mut document, data, &mut summary);
        self.draw_stars(&mut document, &data.stars, &mut summary);
        self.draw_labels(&mut document, data, &mut summary);

        SkyMap { document, summary }
    }

    fn draw_background(&self, doc: &mut SvgDocument) {
        let margin = self.projector.margin();
        doc.rect(
            Point::new(margin, margin),
            self.projector.plot_width(),
            self.projector.plot_height(),
            &self.style.background,
        );
    }

    fn draw_grid(&self, doc: &mut SvgDocument) {
        let scale = self.projector.scale();
        let margin = self.projector.margin();
        let width = self.projector.canvas_width();
        let height = self.projector.canvas_height();
        let label_style = &self.style.grid_label;

        for i in 0..RA_GRID_LINES {
            let x = i as f64 * RA_GRID_STEP_DEG * scale + margin;
            doc.line(
                Point::new(x, margin),
                Point::new(x, height - margin),
                &self.style.grid,
            );

            // Left edge is 24h, printed as 0h like the right edge
            let hours = (24 - 2 * i) % 24;
            let shift = if hours == 0 { -12.0 } else { 3.0 };
            doc.text(
                Point::new(x + shift, DEC_LIMIT_DEG * scale + margin - 5.0),
                &format!("{hours}h"),
                label_style,
                TextAnchor::Start,
            );
        }

        for i in 0..DEC_GRID_LINES {
            let y = i as f64 * DEC_GRID_STEP_DEG * scale + margin;
            let style = if i == EQUATOR_INDEX {
                self.style.grid.with_width(self.style.equator_width)
            } else {
                self.style.grid.clone()
            };
            doc.line(Point::new(margin, y), Point::new(width - margin, y), &style);

            let dec = DEC_LIMIT_DEG as i64 - DEC_GRID_STEP_DEG as i64 * i as i64;
            // Top label goes under its line, the rest above
            let shift = if i == 0 { 10.0 } else { -5.0 };
            doc.text(
                Point::new(margin + 3.0, y + shift),
                &dec.to_string(),
                label_style,
                TextAnchor::Start,
            );
        }
    }

    fn draw_boundaries(
        &self,
        doc: &mut SvgDocument,
        data: &SkyDatasets,
        summary: &mut RenderSummary,
    ) {
        for segment in &data.boundaries {
            let start = self.projector.project_unclipped(segment.ra1, segment.dec1);
            let end = self.projector.project_unclipped(segment.ra2, segment.dec2);
            if self.draw_wrapped(doc, start, end, &self.style.boundary) {
                summary.wrapped_boundaries += 1;
            }
            summary.boundaries += 1;
        }
    }

    fn draw_asterisms(
        &self,
        doc: &mut SvgDocument,
        data: &SkyDatasets,
        summary: &mut RenderSummary,
    ) {
        for segment in &data.asterisms {
            let owner = segment.constellation.as_deref().unwrap_or("?");
            let stars = (
                data.stars.get_star(segment.hip1),
                data.stars.get_star(segment.hip2),
            );
            let (first, second) = match stars {
                (Some(first), Some(second)) => (first, second),
                (first, _) => {
                    let missing = if first.is_none() {
                        segment.hip1
                    } else {
                        segment.hip2
                    };
                    warn!("HIP {missing} ({owner} line) is missing from the star table");
                    summary.skipped_asterisms += 1;
                    continue;
                }
            };

            let start = self.projector.project_unclipped(first.ra_deg, first.dec_deg);
            let end = self.projector.project_unclipped(second.ra_deg, second.dec_deg);
            if self.draw_wrapped(doc, start, end, &self.style.asterism) {
                summary.wrapped_asterisms += 1;
            }
            summary.asterisms += 1;
        }
    }

    fn draw_stars(&self, doc: &mut SvgDocument, stars: &StarTable, summary: &mut RenderSummary) {
        for star in stars.stars() {
            let Some(center) = self.projector.project(star.ra_deg, star.dec_deg) else {
                summary.stars_outside_band += 1;
                continue;
            };

            let radius = self.sizer.radius(star.magnitude);
            if radius <= 0.0 {
                debug!("HIP {} at {}m is below the marker limit", star.hip, star.magnitude);
                summary.stars_too_faint += 1;
                continue;
            }

            doc.circle(center, radius, &self.style.star_fill);
            summary.stars += 1;
        }
    }

    fn draw_labels(
        &self,
        doc: &mut SvgDocument,
        data: &SkyDatasets,
        summary: &mut RenderSummary,
    ) {
        for constellation in &data.constellations {
            let code = &constellation.code;
            let Some(hip) = constellation.anchor_hip else {
                warn!("{code} has no label anchor star");
                summary.missing_labels += 1;
                continue;
            };
            let Some(star) = data.stars.get_star(hip) else {
                warn!("HIP {hip} {code} is missing from the star table");
                summary.missing_labels += 1;
                continue;
            };

            match self.projector.project(star.ra_deg, star.dec_deg) {
                Some(position) => {
                    doc.text(
                        position,
                        code,
                        &self.style.constellation_label,
                        TextAnchor::Middle,
                    );
                    summary.labels += 1;
                }
                None => summary.labels_outside_band += 1,
            }
        }
    }

    /// Emit a line, split at the 0h meridian when needed. Returns whether it wrapped.
    fn draw_wrapped(
        &self,
        doc: &mut SvgDocument,
        start: Point,
        end: Point,
        style: &LineStyle,
    ) -> bool {
        let split = split_at_meridian(start, end, self.projector.scale());
        for segment in split.segments() {
            doc.line(segment.start, segment.end, style);
        }
        split.is_wrapped()
    }
}
