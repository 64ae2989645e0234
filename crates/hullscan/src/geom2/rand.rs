//! Random point sets in 2D (polar disk sampling + replay tokens).
//!
//! Purpose
//! - Provide a small, deterministic point-set generator for demos, the CLI and
//!   benchmarks. The hull engine never depends on it.
//!
//! Model
//! - Draw `r = R·u` and `θ = 2π·v` with `u, v` uniform on [0, 1) and place the
//!   point at `center + r·(cos θ, sin θ)`. Linear radius sampling concentrates
//!   points toward the center, which leaves a visibly sparse hull boundary.
//! - Optional `floor` snapping to the integer grid.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.
//!
//! References
//! - Code cross-refs: `Point`, `graham_scan`

use super::types::Point;
use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Disk sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct DiskCfg {
    pub count: usize,
    pub radius: f64,
    pub center: Vector2<f64>,
    /// Floor coordinates to integers (values stay `f64` in `sample_disk`).
    pub snap_to_grid: bool,
}

impl Default for DiskCfg {
    fn default() -> Self {
        Self {
            count: 100,
            radius: 180.0,
            center: Vector2::new(200.0, 200.0),
            snap_to_grid: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

fn draw(cfg: DiskCfg, tok: ReplayToken) -> impl Iterator<Item = Vector2<f64>> {
    let mut rng = tok.to_std_rng();
    let r0 = cfg.radius.max(0.0);
    (0..cfg.count).map(move |_| {
        let r = r0 * rng.gen::<f64>();
        let th = std::f64::consts::TAU * rng.gen::<f64>();
        let v = cfg.center + Vector2::new(th.cos(), th.sin()) * r;
        if cfg.snap_to_grid {
            v.map(f64::floor)
        } else {
            v
        }
    })
}

/// Draw `cfg.count` points in the disk.
pub fn sample_disk(cfg: DiskCfg, tok: ReplayToken) -> Vec<Point<f64>> {
    draw(cfg, tok).map(Point::from).collect()
}

/// Same draw as `sample_disk` with grid snapping forced, as exact integer points.
pub fn sample_disk_grid(cfg: DiskCfg, tok: ReplayToken) -> Vec<Point<i64>> {
    let cfg = DiskCfg {
        snap_to_grid: true,
        ..cfg
    };
    draw(cfg, tok)
        .map(|v| Point::new(v.x as i64, v.y as i64))
        .collect()
}
