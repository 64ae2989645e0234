//! Convex hulls of planar point sets (Graham scan) behind an async channel.
//!
//! Layout
//! - `geom2`: points, the orientation primitive, the Graham scan engine, and
//!   reproducible point sampling.
//! - `channel`: `HullChannel`, which runs the engine on a background worker and
//!   delivers only the newest request's result.
//! - `error`: typed outcomes shared by both.
//!
//! API Policy
//! - `api` and `prelude` are the curated import surfaces; module paths may move.

pub mod api;
pub mod channel;
pub mod error;
pub mod geom2;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{ChannelError, HullError, HullResult};
pub use geom2::{graham_scan, GrahamScan, Hull, HullCfg, Point};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::channel::{Delivery, HullChannel, Pending, Response};
    pub use crate::error::{ChannelError, HullError};
    pub use crate::geom2::rand::{sample_disk, sample_disk_grid, DiskCfg, ReplayToken};
    pub use crate::geom2::{
        graham_scan, orientation, Coord, GrahamScan, Hull, HullCfg, HullEngine, Orientation, Point,
    };
}
