//! Curated API surface for callers (renderers, the CLI, benches).
//!
//! Prefer these re-exports for clarity and consistency; internal module
//! paths may move between versions.

// Geometry
pub use crate::geom2::{
    graham_scan, orientation, Coord, GrahamScan, Hull, HullCfg, HullEngine, Orientation, Point,
};
// Sampling
pub use crate::geom2::rand::{
    sample_disk, sample_disk_grid, DiskCfg as DiskSampleCfg, ReplayToken as SampleReplay,
};
// Async computation boundary
pub use crate::channel::{Delivery, HullChannel, Outcome, Pending, Request, Response};
pub use crate::error::{ChannelError, HullError, HullResult};
