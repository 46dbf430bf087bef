//! Minimal SVG document model.
//!
//! The map only needs four primitives. Elements are kept in a `Vec` in the
//! order they were added, which is also their paint order: later elements are
//! drawn over earlier ones.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::projection::Point;

/// Stroke attributes for line primitives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub stroke: String,
    pub opacity: f64,
    pub width: f64,
    /// Dash pattern such as "5,1", solid when absent
    pub dasharray: Option<String>,
}

impl LineStyle {
    pub fn solid(stroke: &str, opacity: f64, width: f64) -> Self {
        Self {
            stroke: stroke.to_string(),
            opacity,
            width,
            dasharray: None,
        }
    }

    pub fn dashed(stroke: &str, opacity: f64, width: f64, dasharray: &str) -> Self {
        Self {
            dasharray: Some(dasharray.to_string()),
            ..Self::solid(stroke, opacity, width)
        }
    }

    /// Copy of this style with a different stroke width
    pub fn with_width(&self, width: f64) -> Self {
        Self {
            width,
            ..self.clone()
        }
    }
}

/// Fill and size for text primitives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub fill: String,
    pub font_size: f64,
}

impl TextStyle {
    pub fn new(fill: &str, font_size: f64) -> Self {
        Self {
            fill: fill.to_string(),
            font_size,
        }
    }
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
}

/// A single drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        fill: String,
    },
    Line {
        start: Point,
        end: Point,
        style: LineStyle,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: String,
    },
    Text {
        position: Point,
        content: String,
        style: TextStyle,
        anchor: TextAnchor,
    },
}

impl Element {
    /// SVG tag name of this element
    pub fn tag(&self) -> &'static str {
        match self {
            Element::Rect { .. } => "rect",
            Element::Line { .. } => "line",
            Element::Circle { .. } => "circle",
            Element::Text { .. } => "text",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Rect {
                origin,
                width,
                height,
                fill,
            } => write!(
                f,
                r#"<rect x="{}" y="{}" width="{}" height="{}" stroke-width="0" fill="{}"/>"#,
                origin.x,
                origin.y,
                width,
                height,
                escape_xml(fill)
            ),
            Element::Line { start, end, style } => {
                write!(
                    f,
                    r#"<line x1="{}" x2="{}" y1="{}" y2="{}" stroke="{}" stroke-opacity="{}" stroke-width="{}""#,
                    start.x,
                    end.x,
                    start.y,
                    end.y,
                    escape_xml(&style.stroke),
                    style.opacity,
                    style.width
                )?;
                if let Some(dash) = &style.dasharray {
                    write!(f, r#" stroke-dasharray="{}""#, escape_xml(dash))?;
                }
                write!(f, "/>")
            }
            Element::Circle {
                center,
                radius,
                fill,
            } => write!(
                f,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}" stroke-width="0"/>"#,
                center.x,
                center.y,
                radius,
                escape_xml(fill)
            ),
            Element::Text {
                position,
                content,
                style,
                anchor,
            } => {
                write!(
                    f,
                    r#"<text x="{}" y="{}" fill="{}" font-size="{}""#,
                    position.x,
                    position.y,
                    escape_xml(&style.fill),
                    style.font_size
                )?;
                if *anchor == TextAnchor::Middle {
                    write!(f, r#" text-anchor="middle""#)?;
                }
                write!(f, ">{}</text>", escape_xml(content))
            }
        }
    }
}

/// An SVG document built by appending elements
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    width: f64,
    height: f64,
    elements: Vec<Element>,
}

impl SvgDocument {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn rect(&mut self, origin: Point, width: f64, height: f64, fill: &str) {
        self.push(Element::Rect {
            origin,
            width,
            height,
            fill: fill.to_string(),
        });
    }

    pub fn line(&mut self, start: Point, end: Point, style: &LineStyle) {
        self.push(Element::Line {
            start,
            end,
            style: style.clone(),
        });
    }

    pub fn circle(&mut self, center: Point, radius: f64, fill: &str) {
        self.push(Element::Circle {
            center,
            radius,
            fill: fill.to_string(),
        });
    }

    pub fn text(&mut self, position: Point, content: &str, style: &TextStyle, anchor: TextAnchor) {
        self.push(Element::Text {
            position,
            content: content.to_string(),
            style: style.clone(),
            anchor,
        });
    }

    /// Elements in paint order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of elements with the given tag name
    pub fn count(&self, tag: &str) -> usize {
        self.elements.iter().filter(|e| e.tag() == tag).count()
    }

    /// Serialize and write the document to `path`
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        fs::write(path, self.to_string())
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            r#"<svg version="1.1" baseProfile="full" width="{}" height="{}" xmlns="http://www.w3.org/2000/svg">"#,
            self.width, self.height
        )?;
        for element in &self.elements {
            writeln!(f, "{element}")?;
        }
        writeln!(f, "</svg>")
    }
}

/// Escape XML special characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
