//! Basic 2D types and tolerances used by the hull engine.
//!
//! - `Point`: value-type coordinate pair, generic over the coordinate type.
//! - `Orientation`: turn direction of an ordered point triple.
//! - `HullCfg`: centralizes the collinearity tolerance for float coordinates.
//! - `Hull`: ordered CCW vertex sequence with a few read-only predicates.
//!
//! References
//! - Code cross-refs: `orient::{Coord, orientation}`, `graham::GrahamScan`

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::orient::{rescaled, Coord};

/// Point in the plane. Equality and ordering are by value (x, then y).
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Point<T = f64> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    #[inline]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: Coord> Point<T> {
    /// Lossy view as an `f64` vector (exact for `f32`/`f64`, rounded for large integers).
    #[inline]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x.to_f64(), self.y.to_f64())
    }
}

impl From<Vector2<f64>> for Point<f64> {
    #[inline]
    fn from(v: Vector2<f64>) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Point<f64>> for Vector2<f64> {
    #[inline]
    fn from(p: Point<f64>) -> Self {
        Vector2::new(p.x, p.y)
    }
}

impl<T> From<(T, T)> for Point<T> {
    #[inline]
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

/// Turn direction of `a → b → c`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Counter-clockwise turn (positive cross product).
    Left,
    /// Clockwise turn (negative cross product).
    Right,
    Collinear,
}

/// Hull configuration (tolerances).
///
/// `eps_collinear` bounds the sine of the turn angle below which a float
/// triple counts as collinear: `|cross(b−a, c−a)| <= eps · |b−a| · |c−a|`.
/// Being relative, it scales with coordinate magnitude. Integer coordinates
/// ignore it and use exact arithmetic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HullCfg {
    pub eps_collinear: f64,
}

impl Default for HullCfg {
    fn default() -> Self {
        Self {
            eps_collinear: 1e-12,
        }
    }
}

/// Convex hull as an ordered vertex sequence.
///
/// Invariants (as produced by `GrahamScan`):
/// - Every vertex is a member of the input point set.
/// - For 3+ vertices: CCW order, starting at the lowest-y (then lowest-x) point,
///   and no three cyclically consecutive vertices are collinear.
/// - Fewer than 3 vertices means a degenerate hull (empty, point, or segment).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hull<T = f64> {
    pub vertices: Vec<Point<T>>,
}

impl<T> Default for Hull<T> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }
}

impl<T> From<Vec<Point<T>>> for Hull<T> {
    #[inline]
    fn from(vertices: Vec<Point<T>>) -> Self {
        Self { vertices }
    }
}

impl<T: Coord> Hull<T> {
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Fewer than three vertices (empty, single point, or segment).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Twice the signed area (shoelace). Positive for CCW vertex order.
    pub fn twice_signed_area(&self) -> f64 {
        let n = self.vertices.len();
        let mut acc = 0.0;
        for i in 0..n {
            let p = self.vertices[i].to_vector();
            let q = self.vertices[(i + 1) % n].to_vector();
            acc += p.perp(&q);
        }
        acc
    }

    /// Inside or on the boundary, with on-boundary decided by `cfg` tolerance.
    pub fn contains(&self, p: Point<T>, cfg: &HullCfg) -> bool {
        let eps = cfg.eps_collinear;
        match self.vertices.as_slice() {
            [] => false,
            [a] => *a == p,
            [a, b] if a == b => *a == p,
            [a, b] => {
                if T::orientation(*a, *b, p, eps) != Orientation::Collinear {
                    return false;
                }
                // Collinear: p must lie between a and b.
                let (a, b, p) = (a.to_vector() * 0.5, b.to_vector() * 0.5, p.to_vector() * 0.5);
                let dir = rescaled(b - a);
                let t = (p - a).dot(&dir);
                t >= 0.0 && t <= (b - a).dot(&dir)
            }
            vs => {
                let n = vs.len();
                (0..n).all(|i| T::orientation(vs[i], vs[(i + 1) % n], p, eps) != Orientation::Right)
            }
        }
    }
}
