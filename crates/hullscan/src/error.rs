//! Error taxonomy.
//!
//! - `HullError`: per-request outcome, delivered through the channel just like a hull.
//!   `InvalidInput` comes from engine validation; `Computation` only from the channel.
//! - `ChannelError`: constructing a channel outside a Tokio runtime.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum HullError {
    #[error("invalid input: point {index} has a non-finite or out-of-range coordinate")]
    #[serde(rename = "InvalidInputError")]
    InvalidInput { index: usize },

    #[error("computation failed: {reason}")]
    #[serde(rename = "ComputationError")]
    Computation { reason: String },
}

#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("no Tokio runtime available to host the hull worker: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

pub type HullResult<T> = Result<T, HullError>;
