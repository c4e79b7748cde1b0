use crate::geom::{BBox2, Vec2};
use serde::{Deserialize, Serialize};

/// ACI 1.
pub const RED: u8 = 1;
/// ACI 5.
pub const BLUE: u8 = 5;

pub const OUTER_LOOP_LAYER: &str = "OUTER_LOOP";
pub const INNER_LOOP_LAYER: &str = "INNER_LOOP";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    pub fn is_degenerate(&self, eps: f64) -> bool {
        self.start.approx_eq(self.end, eps)
    }

    /// Same endpoints in either orientation.
    pub fn same_endpoints(&self, other: &Segment, eps: f64) -> bool {
        (self.start.approx_eq(other.start, eps) && self.end.approx_eq(other.end, eps))
            || (self.start.approx_eq(other.end, eps) && self.end.approx_eq(other.start, eps))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Vec2>,
}

impl Polyline {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Closed when the chain has more than two points and its ends meet.
    pub fn is_closed(&self, eps: f64) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => self.points.len() > 2 && first.approx_eq(*last, eps),
            _ => false,
        }
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points.windows(2).map(|w| Segment::new(w[0], w[1]))
    }

    pub fn bbox(&self) -> BBox2 {
        let mut bbox = BBox2::empty();
        for p in &self.points {
            bbox.include_point(*p);
        }
        bbox
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopRole {
    Outer,
    Inner,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loop {
    pub points: Vec<Vec2>,
    pub signed_area: f64,
    pub role: LoopRole,
}

impl Loop {
    pub fn abs_area(&self) -> f64 {
        self.signed_area.abs()
    }

    pub fn is_outer(&self) -> bool {
        self.role == LoopRole::Outer
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub name: String,
    pub color_index: u8,
}

impl LayerSpec {
    pub fn new(name: impl Into<String>, color_index: u8) -> Self {
        Self {
            name: name.into(),
            color_index,
        }
    }

    pub fn outer() -> Self {
        Self::new(OUTER_LOOP_LAYER, RED)
    }

    pub fn inner() -> Self {
        Self::new(INNER_LOOP_LAYER, BLUE)
    }

    pub fn for_role<'a>(role: LoopRole, outer: &'a LayerSpec, inner: &'a LayerSpec) -> &'a LayerSpec {
        match role {
            LoopRole::Outer => outer,
            LoopRole::Inner => inner,
        }
    }
}
