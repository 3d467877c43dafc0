//! Triangle geometry for shape-accurate collision checks
//!
//! Triangles are ephemeral values rebuilt from a cell's center, size and
//! rotation for every check. Degenerate (zero-area) triangles never overlap
//! anything.

use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::game::constants::geometry::EPSILON;
use crate::util::vec2::Vec2;

/// Triangle described by its three vertices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub x3: f32,
    pub y3: f32,
}

impl Triangle {
    /// Equilateral triangle with vertices `size` away from the center.
    /// The first vertex points along `rotation`.
    pub fn new(center_x: f32, center_y: f32, size: f32, rotation: f32) -> Self {
        let center = Vec2::new(center_x, center_y);
        let v = |k: f32| center + Vec2::from_angle(rotation + k * TAU / 3.0) * size;
        let (a, b, c) = (v(0.0), v(1.0), v(2.0));
        Self::from_vertices(a, b, c)
    }

    pub fn from_vertices(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self {
            x1: a.x,
            y1: a.y,
            x2: b.x,
            y2: b.y,
            x3: c.x,
            y3: c.y,
        }
    }

    #[inline]
    pub fn vertices(&self) -> [Vec2; 3] {
        [
            Vec2::new(self.x1, self.y1),
            Vec2::new(self.x2, self.y2),
            Vec2::new(self.x3, self.y3),
        ]
    }

    /// Edges as (start, end) pairs in winding order
    pub fn edges(&self) -> [(Vec2, Vec2); 3] {
        let [a, b, c] = self.vertices();
        [(a, b), (b, c), (c, a)]
    }

    /// Twice the signed area
    #[inline]
    fn doubled_area(&self) -> f32 {
        let [a, b, c] = self.vertices();
        (b - a).cross(c - a)
    }

    pub fn is_degenerate(&self) -> bool {
        !self.doubled_area().is_finite() || self.doubled_area().abs() <= EPSILON
    }
}

/// Free-function form of [`Triangle::new`]
#[inline]
pub fn create_triangle(center_x: f32, center_y: f32, size: f32, rotation: f32) -> Triangle {
    Triangle::new(center_x, center_y, size, rotation)
}

/// Which side of the directed line `a -> b` the point `p` lies on
#[inline]
fn side(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    (b - a).cross(p - a)
}

/// Same-side test; points on an edge or vertex count as inside
pub fn is_point_in_triangle(px: f32, py: f32, triangle: &Triangle) -> bool {
    if triangle.is_degenerate() {
        return false;
    }

    let p = Vec2::new(px, py);
    let [a, b, c] = triangle.vertices();
    let d1 = side(p, a, b);
    let d2 = side(p, b, c);
    let d3 = side(p, c, a);

    let has_neg = d1 < -EPSILON || d2 < -EPSILON || d3 < -EPSILON;
    let has_pos = d1 > EPSILON || d2 > EPSILON || d3 > EPSILON;

    !(has_neg && has_pos)
}

/// Segment intersection of (x1,y1)-(x2,y2) and (x3,y3)-(x4,y4).
/// Parallel and collinear segments never intersect.
#[allow(clippy::too_many_arguments)]
pub fn do_lines_intersect(
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    x3: f32,
    y3: f32,
    x4: f32,
    y4: f32,
) -> bool {
    segments_intersect(
        Vec2::new(x1, y1),
        Vec2::new(x2, y2),
        Vec2::new(x3, y3),
        Vec2::new(x4, y4),
    )
}

fn segments_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    let r = p2 - p1;
    let s = p4 - p3;
    let denom = r.cross(s);

    if !denom.is_finite() || denom.abs() <= EPSILON {
        return false;
    }

    let qp = p3 - p1;
    let t = qp.cross(s) / denom;
    let u = qp.cross(r) / denom;

    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// True when either triangle has a vertex inside the other or any pair of
/// edges crosses
pub fn do_triangles_overlap(t1: &Triangle, t2: &Triangle) -> bool {
    if t1.is_degenerate() || t2.is_degenerate() {
        return false;
    }

    let contains_vertex = |outer: &Triangle, inner: &Triangle| {
        inner
            .vertices()
            .iter()
            .any(|v| is_point_in_triangle(v.x, v.y, outer))
    };

    if contains_vertex(t1, t2) || contains_vertex(t2, t1) {
        return true;
    }

    t1.edges().iter().any(|&(a, b)| {
        t2.edges()
            .iter()
            .any(|&(c, d)| segments_intersect(a, b, c, d))
    })
}
