//! Graham scan convex hull.
//!
//! Purpose
//! - Compute the convex hull of a finite point multiset: pivot selection,
//!   angular sort around the pivot, then a stack scan that keeps only
//!   strict left turns.
//!
//! Conventions
//! - Output is CCW, starting at the pivot (lowest y, then lowest x).
//! - Collinear boundary points are dropped; only the extreme point on each
//!   ray from the pivot survives, and interior collinear points on hull edges
//!   are popped by the scan.
//! - Inputs of size ≤ 2 are returned verbatim after validation.
//! - Collinear inputs yield the two extreme points along their line.
//!
//! Complexity
//! - O(n log n) for the sort; the scan is amortized O(n).
//!
//! References
//! - Code cross-refs: `orient::Coord`, `types::{Hull, HullCfg}`, `channel::HullChannel`

use std::cmp::Ordering;

use super::orient::{rescaled, Coord};
use super::types::{Hull, HullCfg, Orientation, Point};
use crate::error::HullError;

/// Hull computation seam used by `HullChannel` (alternative engines can be injected).
pub trait HullEngine<T: Coord>: Send + Sync + 'static {
    fn compute_hull(&self, points: &[Point<T>]) -> Result<Hull<T>, HullError>;
}

/// Graham scan engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct GrahamScan {
    pub cfg: HullCfg,
}

impl GrahamScan {
    #[inline]
    pub fn new(cfg: HullCfg) -> Self {
        Self { cfg }
    }

    /// Convex hull of `points` (see module docs for conventions).
    ///
    /// Errors with `HullError::InvalidInput` naming the first point with a
    /// non-finite (or, for integers, out-of-range) coordinate. Validation
    /// runs before any other work, so no partial hull is produced.
    pub fn compute_hull<T: Coord>(&self, points: &[Point<T>]) -> Result<Hull<T>, HullError> {
        validate(points)?;
        if points.len() <= 2 {
            return Ok(Hull::from(points.to_vec()));
        }
        let eps = self.cfg.eps_collinear;
        let Some(pivot) = lowest_point(points) else {
            return Ok(Hull::default());
        };

        let mut sorted: Vec<Point<T>> = points.iter().copied().filter(|p| *p != pivot).collect();
        if sorted.is_empty() {
            // every point is a copy of the pivot
            return Ok(Hull::from(vec![pivot]));
        }
        sorted.sort_by(|a, b| T::polar_cmp(pivot, *a, *b));

        let rays = merge_rays(pivot, sorted, eps);
        if rays
            .iter()
            .all(|r| T::orientation(pivot, rays[0], *r, eps) == Orientation::Collinear)
        {
            return Ok(Hull::from(collinear_extremes(pivot, &rays)));
        }

        let mut stack: Vec<Point<T>> = Vec::with_capacity(rays.len() + 1);
        stack.push(pivot);
        stack.push(rays[0]);
        for &p in &rays[1..] {
            while stack.len() >= 2 {
                let m = stack.len();
                if T::orientation(stack[m - 2], stack[m - 1], p, eps) == Orientation::Left {
                    break;
                }
                stack.pop();
            }
            stack.push(p);
        }
        Ok(Hull::from(stack))
    }
}

impl<T: Coord> HullEngine<T> for GrahamScan {
    #[inline]
    fn compute_hull(&self, points: &[Point<T>]) -> Result<Hull<T>, HullError> {
        GrahamScan::compute_hull(self, points)
    }
}

/// Graham scan with default tolerances.
pub fn graham_scan<T: Coord>(points: &[Point<T>]) -> Result<Hull<T>, HullError> {
    GrahamScan::default().compute_hull(points)
}

fn validate<T: Coord>(points: &[Point<T>]) -> Result<(), HullError> {
    match points.iter().position(|p| !(p.x.is_valid() && p.y.is_valid())) {
        Some(index) => Err(HullError::InvalidInput { index }),
        None => Ok(()),
    }
}

/// Lowest y, ties by lowest x; first occurrence wins.
fn lowest_point<T: Coord>(points: &[Point<T>]) -> Option<Point<T>> {
    points.iter().copied().min_by(|a, b| {
        match a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal) {
            Ordering::Equal => a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal),
            o => o,
        }
    })
}

/// Collapse runs of angle-sorted points sharing a ray from `pivot`, keeping the farthest.
fn merge_rays<T: Coord>(pivot: Point<T>, sorted: Vec<Point<T>>, eps: f64) -> Vec<Point<T>> {
    let mut rays: Vec<Point<T>> = Vec::with_capacity(sorted.len());
    let mut head: Option<Point<T>> = None;
    for p in sorted {
        if let (Some(h), Some(last)) = (head, rays.last_mut()) {
            if same_ray(pivot, h, p, eps) {
                if T::dist_cmp(pivot, p, *last) == Ordering::Greater {
                    *last = p;
                }
                continue;
            }
        }
        head = Some(p);
        rays.push(p);
    }
    rays
}

/// `a` and `b` lie on one ray from `o` (collinear, pointing the same way).
#[inline]
fn same_ray<T: Coord>(o: Point<T>, a: Point<T>, b: Point<T>, eps: f64) -> bool {
    T::orientation(o, a, b, eps) == Orientation::Collinear && T::same_direction(o, a, b)
}

/// Two extreme points of a collinear set, lowest (y, x) first.
///
/// Only reached when tolerance merges near-collinear rays on both sides of the pivot;
/// with exact collinearity the pivot itself is one of the extremes.
fn collinear_extremes<T: Coord>(pivot: Point<T>, rays: &[Point<T>]) -> Vec<Point<T>> {
    // Half-scale offsets and a unit-scale direction keep the projection finite.
    let o = pivot.to_vector() * 0.5;
    let dir = rescaled(rays[0].to_vector() * 0.5 - o);
    let proj = |p: &Point<T>| (p.to_vector() * 0.5 - o).dot(&dir);
    let mut lo = pivot;
    let mut hi = pivot;
    for r in rays {
        if proj(r) < proj(&lo) {
            lo = *r;
        }
        if proj(r) > proj(&hi) {
            hi = *r;
        }
    }
    let first_is_lo = match lo.y.partial_cmp(&hi.y).unwrap_or(Ordering::Equal) {
        Ordering::Equal => lo.x.partial_cmp(&hi.x).unwrap_or(Ordering::Equal) != Ordering::Greater,
        o => o == Ordering::Less,
    };
    if first_is_lo {
        vec![lo, hi]
    } else {
        vec![hi, lo]
    }
}
