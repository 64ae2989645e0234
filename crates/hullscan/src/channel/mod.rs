//! Asynchronous hull computation with tagged requests and monotonic delivery.
//!
//! Purpose
//! - Run the hull engine off the caller's control flow: `submit` returns a
//!   `Pending` handle immediately; awaiting it yields the outcome.
//! - Surface only the newest request's result. Each submit gets a strictly
//!   increasing tag; a response is delivered only if its tag is the latest
//!   issued and exceeds every tag delivered before. Older responses resolve as
//!   `Delivery::Superseded` (their computation still runs; only delivery is
//!   suppressed).
//!
//! Model
//! - One blocking worker consumes jobs FIFO from an unbounded queue; replies
//!   travel back on per-job oneshot channels.
//! - Self-healing: a panicking job is answered with `HullError::Computation`
//!   and the worker is recreated on the same queue. If the queue itself is
//!   lost, the next `submit` rebuilds queue and worker.
//!
//! References
//! - Code cross-refs: `worker::{spawn, supervise}`, `wire::{Request, Response}`,
//!   `geom2::{GrahamScan, HullEngine}`

mod wire;
mod worker;

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{ready, Context, Poll};

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, warn};

pub use wire::{Outcome, Request, Response};

use crate::error::{ChannelError, HullError};
use crate::geom2::{Coord, GrahamScan, HullCfg, HullEngine, Point};
use worker::{Engine, Job};

/// Counters shared by the channel, its pending handles, and the supervisor.
#[derive(Debug, Default)]
pub(crate) struct Shared {
    /// Highest tag issued.
    latest: AtomicU64,
    /// Highest tag delivered.
    delivered: AtomicU64,
    /// Worker recreations so far.
    restarts: AtomicU64,
}

impl Shared {
    fn deliver<T>(&self, response: Response<T>) -> Delivery<T> {
        let tag = response.tag;
        let latest = self.latest.load(Ordering::SeqCst);
        if tag < latest {
            debug!(tag, latest, "response superseded");
            return Delivery::Superseded { tag, latest };
        }
        let prev = self.delivered.fetch_max(tag, Ordering::SeqCst);
        if prev >= tag {
            return Delivery::Superseded { tag, latest: prev };
        }
        Delivery::Delivered(response)
    }
}

/// Result of awaiting a `Pending`.
#[derive(Clone, Debug, PartialEq)]
pub enum Delivery<T = f64> {
    Delivered(Response<T>),
    /// A newer request (`latest`) was issued or delivered first.
    Superseded { tag: u64, latest: u64 },
}

impl<T> Delivery<T> {
    #[inline]
    pub fn is_delivered(&self) -> bool {
        matches!(self, Delivery::Delivered(_))
    }

    pub fn into_response(self) -> Option<Response<T>> {
        match self {
            Delivery::Delivered(r) => Some(r),
            Delivery::Superseded { .. } => None,
        }
    }
}

/// Handle to a submitted request; resolves to a `Delivery`.
#[must_use = "a Pending does nothing unless awaited"]
pub struct Pending<T = f64> {
    tag: u64,
    rx: oneshot::Receiver<Response<T>>,
    shared: Arc<Shared>,
}

impl<T> Pending<T> {
    #[inline]
    pub fn tag(&self) -> u64 {
        self.tag
    }
}

impl<T> Future for Pending<T> {
    type Output = Delivery<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let tag = self.tag;
        let response = match ready!(Pin::new(&mut self.rx).poll(cx)) {
            Ok(response) => response,
            Err(_) => Response::new(
                tag,
                Err(HullError::Computation {
                    reason: "hull worker dropped the request".to_string(),
                }),
            ),
        };
        Poll::Ready(self.shared.deliver(response))
    }
}

/// Computation channel around a hull engine.
///
/// Pre: constructed inside a Tokio runtime; the runtime handle is kept, so
/// `submit` itself may be called from any thread.
pub struct HullChannel<T: Coord = f64> {
    queue: Mutex<mpsc::UnboundedSender<Job<T>>>,
    engine: Engine<T>,
    shared: Arc<Shared>,
    runtime: Handle,
}

impl<T: Coord> HullChannel<T> {
    pub fn new<E: HullEngine<T>>(engine: E) -> Result<Self, ChannelError> {
        let runtime = Handle::try_current()?;
        let engine: Engine<T> = Arc::new(engine);
        let shared = Arc::new(Shared::default());
        let queue = worker::spawn(&runtime, Arc::clone(&engine), Arc::clone(&shared));
        Ok(Self {
            queue: Mutex::new(queue),
            engine,
            shared,
            runtime,
        })
    }

    /// Channel around `GrahamScan` with the given tolerances.
    pub fn with_graham(cfg: HullCfg) -> Result<Self, ChannelError> {
        Self::new(GrahamScan::new(cfg))
    }

    /// Queue a hull computation for a defensive copy of `points`.
    ///
    /// Returns immediately. Tags are assigned under the queue lock, so queue
    /// order always matches tag order.
    pub fn submit(&self, points: &[Point<T>]) -> Pending<T> {
        let (reply, rx) = oneshot::channel();
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        let tag = self.shared.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let job = Job {
            tag,
            points: points.to_vec(),
            reply,
        };
        if let Err(mpsc::error::SendError(job)) = queue.send(job) {
            let restarts = self.shared.restarts.fetch_add(1, Ordering::SeqCst) + 1;
            warn!(tag, restarts, "hull worker queue closed; recreating worker");
            *queue = worker::spawn(&self.runtime, Arc::clone(&self.engine), Arc::clone(&self.shared));
            if queue.send(job).is_err() {
                // Dropped reply surfaces as `HullError::Computation` on the pending handle.
                error!(tag, "hull worker unavailable");
            }
        }
        Pending {
            tag,
            rx,
            shared: Arc::clone(&self.shared),
        }
    }

    /// Highest tag issued so far (0 before the first submit).
    #[inline]
    pub fn latest_tag(&self) -> u64 {
        self.shared.latest.load(Ordering::SeqCst)
    }

    /// Highest tag delivered so far (0 if none).
    #[inline]
    pub fn delivered_tag(&self) -> u64 {
        self.shared.delivered.load(Ordering::SeqCst)
    }

    /// How many times the worker has been recreated.
    #[inline]
    pub fn restarts(&self) -> u64 {
        self.shared.restarts.load(Ordering::SeqCst)
    }
}
