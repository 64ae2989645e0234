//! 2D convex hull geometry.
//!
//! Purpose
//! - Provide the Graham scan engine (`GrahamScan`, `graham_scan`) and the
//!   orientation primitive it is built on, generic over float and integer
//!   coordinates.
//! - Keep the API minimal and numerically explicit (eps-aware for floats,
//!   exact for integers).
//!
//! References
//! - Code cross-refs: `Point`, `Hull`, `HullCfg`, `Coord`, `orientation`

mod graham;
mod orient;
pub mod rand;
mod types;

pub use graham::{graham_scan, GrahamScan, HullEngine};
pub use orient::{orientation, Coord};
pub use types::{Hull, HullCfg, Orientation, Point};
