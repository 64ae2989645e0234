//! Orientation primitive and the coordinate trait behind it.
//!
//! Purpose
//! - Decide left/right/collinear for three points via the sign of
//!   `cross(b−a, c−a)`, plus the angular and distance comparisons the
//!   Graham scan needs around its pivot.
//!
//! Numerics
//! - Floats (`f32`, `f64`): evaluated in `f64`; a relative tolerance
//!   (`HullCfg::eps_collinear`) absorbs rounding near collinearity. Offsets
//!   whose products overflow or underflow are rescaled first, so any finite
//!   coordinates give a meaningful answer.
//! - Integers (`i32`, `i64`): exact, widened to `i128`; no tolerance.
//!   `i64` coordinates must stay strictly inside `±2^62` so widened cross
//!   products and squared distances cannot overflow; larger values are
//!   rejected as invalid input.
//!
//! References
//! - Code cross-refs: `types::{Point, Orientation, HullCfg}`, `graham::GrahamScan`

use std::cmp::Ordering;
use std::fmt;

use nalgebra::Vector2;

use super::types::{HullCfg, Orientation, Point};

/// Numeric coordinate usable by the hull engine.
pub trait Coord: Copy + PartialOrd + fmt::Debug + Send + Sync + 'static {
    /// Accepted as engine input (finite for floats, in exact range for integers).
    fn is_valid(self) -> bool;

    fn to_f64(self) -> f64;

    /// Turn direction of `a → b → c`; `eps` is ignored by exact types.
    fn orientation(a: Point<Self>, b: Point<Self>, c: Point<Self>, eps: f64) -> Orientation;

    /// Polar order of `a` vs `b` around `pivot`: angle ascending, then distance.
    ///
    /// Pre: both points lie in the half-open upper half-plane of `pivot`
    /// (angles in `[0, π)`), which holds when `pivot` is the lowest-y, lowest-x point.
    fn polar_cmp(pivot: Point<Self>, a: Point<Self>, b: Point<Self>) -> Ordering;

    /// Compare `|a − o|` with `|b − o|`.
    fn dist_cmp(o: Point<Self>, a: Point<Self>, b: Point<Self>) -> Ordering;

    /// `a − o` and `b − o` point into the same open half-plane (positive dot product).
    fn same_direction(o: Point<Self>, a: Point<Self>, b: Point<Self>) -> bool;
}

/// Turn direction of `a → b → c` under the configured tolerance.
#[inline]
pub fn orientation<T: Coord>(a: Point<T>, b: Point<T>, c: Point<T>, cfg: &HullCfg) -> Orientation {
    T::orientation(a, b, c, cfg.eps_collinear)
}

/// `a − o` and `b − o`, both halved when either full difference overflows.
#[inline]
fn offsets(o: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> (Vector2<f64>, Vector2<f64>) {
    let (da, db) = (a - o, b - o);
    if da.iter().chain(db.iter()).all(|v| v.is_finite()) {
        (da, db)
    } else {
        (half_offset(o, a), half_offset(o, b))
    }
}

/// `v` divided by its largest absolute component; the zero vector stays zero.
#[inline]
pub(crate) fn rescaled(v: Vector2<f64>) -> Vector2<f64> {
    let m = v.amax();
    if m > 0.0 {
        v / m
    } else {
        v
    }
}

#[inline]
fn orient_float(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>, eps: f64) -> Orientation {
    let (ab, ac) = offsets(a, b, c);
    let mut cross = ab.perp(&ac);
    let mut scale = ab.norm() * ac.norm();
    if !(scale.is_normal() && cross.is_finite()) {
        // Only the directions matter; compare them at unit scale.
        let (u, v) = (rescaled(ab), rescaled(ac));
        cross = u.perp(&v);
        scale = u.norm() * v.norm();
    }
    if cross.abs() <= eps * scale {
        Orientation::Collinear
    } else if cross > 0.0 {
        Orientation::Left
    } else {
        Orientation::Right
    }
}

/// Half of `p − o`; finite for any finite inputs.
#[inline]
fn half_offset(o: Vector2<f64>, p: Vector2<f64>) -> Vector2<f64> {
    p * 0.5 - o * 0.5
}

#[inline]
fn length(v: Vector2<f64>) -> f64 {
    v.x.hypot(v.y)
}

// Sort keys are computed per point at one fixed scale so the order stays total.
#[inline]
fn polar_cmp_float(pivot: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> Ordering {
    let (da, db) = (half_offset(pivot, a), half_offset(pivot, b));
    da.y
        .atan2(da.x)
        .total_cmp(&db.y.atan2(db.x))
        .then_with(|| length(da).total_cmp(&length(db)))
}

#[inline]
fn dist_cmp_float(o: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> Ordering {
    length(half_offset(o, a)).total_cmp(&length(half_offset(o, b)))
}

#[inline]
fn same_direction_float(o: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> bool {
    let (da, db) = offsets(o, a, b);
    rescaled(da).dot(&rescaled(db)) > 0.0
}

#[inline]
fn cross_exact(a: (i128, i128), b: (i128, i128), c: (i128, i128)) -> i128 {
    (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0)
}

#[inline]
fn dot_exact(o: (i128, i128), a: (i128, i128), b: (i128, i128)) -> i128 {
    (a.0 - o.0) * (b.0 - o.0) + (a.1 - o.1) * (b.1 - o.1)
}

#[inline]
fn dist2_exact(o: (i128, i128), a: (i128, i128)) -> i128 {
    dot_exact(o, a, a)
}

macro_rules! impl_coord_float {
    ($($t:ty),*) => {$(
        impl Coord for $t {
            #[inline]
            fn is_valid(self) -> bool {
                self.is_finite()
            }
            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
            #[inline]
            fn orientation(a: Point<Self>, b: Point<Self>, c: Point<Self>, eps: f64) -> Orientation {
                orient_float(a.to_vector(), b.to_vector(), c.to_vector(), eps)
            }
            #[inline]
            fn polar_cmp(pivot: Point<Self>, a: Point<Self>, b: Point<Self>) -> Ordering {
                polar_cmp_float(pivot.to_vector(), a.to_vector(), b.to_vector())
            }
            #[inline]
            fn dist_cmp(o: Point<Self>, a: Point<Self>, b: Point<Self>) -> Ordering {
                dist_cmp_float(o.to_vector(), a.to_vector(), b.to_vector())
            }
            #[inline]
            fn same_direction(o: Point<Self>, a: Point<Self>, b: Point<Self>) -> bool {
                same_direction_float(o.to_vector(), a.to_vector(), b.to_vector())
            }
        }
    )*};
}

macro_rules! impl_coord_int {
    ($($t:ty => $limit:expr),*) => {$(
        impl Coord for $t {
            #[inline]
            fn is_valid(self) -> bool {
                (self as i128).abs() <= $limit
            }
            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
            #[inline]
            fn orientation(a: Point<Self>, b: Point<Self>, c: Point<Self>, _eps: f64) -> Orientation {
                let w = |p: Point<Self>| (p.x as i128, p.y as i128);
                match cross_exact(w(a), w(b), w(c)).cmp(&0) {
                    Ordering::Greater => Orientation::Left,
                    Ordering::Less => Orientation::Right,
                    Ordering::Equal => Orientation::Collinear,
                }
            }
            #[inline]
            fn polar_cmp(pivot: Point<Self>, a: Point<Self>, b: Point<Self>) -> Ordering {
                let w = |p: Point<Self>| (p.x as i128, p.y as i128);
                // a before b iff b is left of pivot→a
                match cross_exact(w(pivot), w(a), w(b)).cmp(&0) {
                    Ordering::Greater => Ordering::Less,
                    Ordering::Less => Ordering::Greater,
                    Ordering::Equal => dist2_exact(w(pivot), w(a)).cmp(&dist2_exact(w(pivot), w(b))),
                }
            }
            #[inline]
            fn dist_cmp(o: Point<Self>, a: Point<Self>, b: Point<Self>) -> Ordering {
                let w = |p: Point<Self>| (p.x as i128, p.y as i128);
                dist2_exact(w(o), w(a)).cmp(&dist2_exact(w(o), w(b)))
            }
            #[inline]
            fn same_direction(o: Point<Self>, a: Point<Self>, b: Point<Self>) -> bool {
                let w = |p: Point<Self>| (p.x as i128, p.y as i128);
                dot_exact(w(o), w(a), w(b)) > 0
            }
        }
    )*};
}

impl_coord_float!(f32, f64);
impl_coord_int!(i32 => i32::MAX as i128 + 1, i64 => (1i128 << 62) - 1);

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point<f64> {
        Point::new(x, y)
    }

    #[test]
    fn basic_turns() {
        let cfg = HullCfg::default();
        assert_eq!(orientation(p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), &cfg), Orientation::Left);
        assert_eq!(orientation(p(0.0, 0.0), p(1.0, 0.0), p(1.0, -1.0), &cfg), Orientation::Right);
        assert_eq!(orientation(p(0.0, 0.0), p(1.0, 0.0), p(3.0, 0.0), &cfg), Orientation::Collinear);
        // Repeated point is collinear with anything.
        assert_eq!(orientation(p(2.0, 2.0), p(2.0, 2.0), p(5.0, -1.0), &cfg), Orientation::Collinear);
    }

    #[test]
    fn tolerance_is_relative_to_scale() {
        // sin(turn) ~ 1e-9 at both scales
        let eps_loose = HullCfg { eps_collinear: 1e-6 };
        let eps_tight = HullCfg { eps_collinear: 1e-12 };
        for s in [1.0, 1e6] {
            let a = p(0.0, 0.0);
            let b = p(s, 0.0);
            let c = p(2.0 * s, 2.0 * s * 1e-9);
            assert_eq!(orientation(a, b, c, &eps_loose), Orientation::Collinear);
            assert_eq!(orientation(a, b, c, &eps_tight), Orientation::Left);
        }
    }

    #[test]
    fn tolerance_threshold_counts_as_collinear() {
        // Right triangle: |cross| = |ab|·|ac|, i.e. sin = 1 exactly.
        let (a, b, c) = (p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0));
        assert_eq!(orientation(a, b, c, &HullCfg { eps_collinear: 1.0 }), Orientation::Collinear);
        assert_eq!(orientation(a, b, c, &HullCfg { eps_collinear: 0.5 }), Orientation::Left);
    }

    #[test]
    fn integer_turns_are_exact() {
        let cfg = HullCfg { eps_collinear: 1.0 };
        let big = 1i64 << 61;
        let a = Point::new(-big, -big);
        let b = Point::new(big, big - 1);
        let c = Point::new(big - 1, big);
        // Float rounding would call this collinear; the tolerance does not apply either.
        assert_eq!(orientation(a, b, c, &cfg), Orientation::Left);
        assert_eq!(orientation(a, c, b, &cfg), Orientation::Right);
        assert_eq!(
            orientation(Point::new(0i32, 0), Point::new(2, 2), Point::new(5, 5), &cfg),
            Orientation::Collinear
        );
    }

    #[test]
    fn extreme_float_magnitudes_keep_their_turns() {
        let cfg = HullCfg::default();
        for s in [1e200, 1e-200] {
            let (a, b) = (p(0.0, 0.0), p(4.0 * s, 0.0));
            assert_eq!(orientation(a, b, p(4.0 * s, 4.0 * s), &cfg), Orientation::Left);
            assert_eq!(orientation(a, b, p(2.0 * s, -s), &cfg), Orientation::Right);
            assert_eq!(orientation(a, b, p(8.0 * s, 0.0), &cfg), Orientation::Collinear);
        }
        // Differences that overflow f64 are taken at half scale.
        let (a, b, c) = (p(-1e308, -1e308), p(1e308, -1e308), p(0.0, 1e308));
        assert_eq!(orientation(a, b, c, &cfg), Orientation::Left);
        assert_eq!(orientation(a, c, b, &cfg), Orientation::Right);
        assert_eq!(f64::polar_cmp(a, p(1e308, 1e308), p(-1e308, 1e308)), Ordering::Less);
        assert_eq!(f64::dist_cmp(a, p(1e308, 1e308), p(0.0, 0.0)), Ordering::Greater);
    }

    #[test]
    fn integer_extremes_stay_exact() {
        let l = (1i64 << 62) - 1;
        let o = Point::new(-l, -l);
        assert_eq!(i64::dist_cmp(o, Point::new(l, l), Point::new(l, l - 1)), Ordering::Greater);
        assert_eq!(i64::polar_cmp(o, Point::new(0, 0), Point::new(l, l)), Ordering::Less);
        assert!(i64::same_direction(o, Point::new(0, 0), Point::new(l, l)));
        assert!(!i64::same_direction(Point::new(0, 0), Point::new(l, l), o));
    }

    #[test]
    fn validity_rules() {
        assert!(1.5f64.is_valid());
        assert!(!f64::NAN.is_valid());
        assert!(!f64::INFINITY.is_valid());
        assert!(!f32::NEG_INFINITY.is_valid());
        assert!(i32::MIN.is_valid());
        assert!(((1i64 << 62) - 1).is_valid());
        assert!((-(1i64 << 62) + 1).is_valid());
        assert!(!(1i64 << 62).is_valid());
        assert!(!(-(1i64 << 62)).is_valid());
        assert!(!i64::MAX.is_valid());
    }

    #[test]
    fn polar_order_angle_then_distance() {
        let o = p(0.0, 0.0);
        assert_eq!(f64::polar_cmp(o, p(1.0, 0.0), p(0.0, 1.0)), Ordering::Less);
        assert_eq!(f64::polar_cmp(o, p(-1.0, 1.0), p(1.0, 1.0)), Ordering::Greater);
        assert_eq!(f64::polar_cmp(o, p(1.0, 1.0), p(2.0, 2.0)), Ordering::Less);
        let oi = Point::new(0i64, 0);
        assert_eq!(i64::polar_cmp(oi, Point::new(3, 0), Point::new(1, 0)), Ordering::Greater);
        assert_eq!(i64::polar_cmp(oi, Point::new(5, 1), Point::new(-5, 1)), Ordering::Less);
    }
}
