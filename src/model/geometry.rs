//! Geospatial values and their well-known-text rendering.
//!
//! Only the output direction lives here: the writer embeds the WKT of these
//! types as JSON strings. Parsing WKT is left to the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `POINT (x y)`
    pub fn to_wkt(&self) -> String {
        format!("POINT ({} {})", self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// An ordered sequence of points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    pub points: Vec<Point>,
}

impl LineString {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_point(mut self, x: f64, y: f64) -> Self {
        self.add_point(x, y);
        self
    }

    pub fn add_point(&mut self, x: f64, y: f64) {
        self.points.push(Point::new(x, y));
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `LINESTRING (x1 y1, x2 y2, ...)`, or `LINESTRING EMPTY`.
    pub fn to_wkt(&self) -> String {
        if self.is_empty() {
            return "LINESTRING EMPTY".to_owned();
        }
        format!("LINESTRING {}", self)
    }
}

/// Renders the parenthesised coordinate list, shared with polygon rings.
impl fmt::Display for LineString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{point}")?;
        }
        f.write_str(")")
    }
}

/// A polygon: an exterior ring followed by any interior rings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub rings: Vec<LineString>,
}

impl Polygon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new ring; subsequent points go into it.
    pub fn start_ring(&mut self) {
        self.rings.push(LineString::new());
    }

    /// Append a point to the current ring, starting one if needed.
    pub fn add_point(&mut self, x: f64, y: f64) {
        match self.rings.last_mut() {
            Some(ring) => ring.add_point(x, y),
            None => self.rings.push(LineString::new().with_point(x, y)),
        }
    }

    pub fn with_ring(mut self, points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        self.start_ring();
        for (x, y) in points {
            self.add_point(x, y);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rings.iter().all(LineString::is_empty)
    }

    /// `POLYGON ((x y, ...), (x y, ...))`, or `POLYGON EMPTY`.
    pub fn to_wkt(&self) -> String {
        if self.is_empty() {
            return "POLYGON EMPTY".to_owned();
        }
        let rings: Vec<String> = self
            .rings
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| r.to_string())
            .collect();
        format!("POLYGON ({})", rings.join(", "))
    }
}
