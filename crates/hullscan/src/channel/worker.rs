//! Background worker and its supervisor.
//!
//! - The worker is a blocking task draining a FIFO job queue, one job at a time.
//! - A panicking computation is caught, answered with `HullError::Computation`,
//!   and ends the worker; the supervisor then starts a fresh worker on the same
//!   queue, so jobs queued behind the crash are still served.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::Ordering;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, warn};

use super::wire::Response;
use super::Shared;
use crate::error::HullError;
use crate::geom2::{Coord, HullEngine, Point};

pub(super) struct Job<T> {
    pub tag: u64,
    pub points: Vec<Point<T>>,
    pub reply: oneshot::Sender<Response<T>>,
}

pub(super) type Engine<T> = Arc<dyn HullEngine<T>>;

enum WorkerExit<T> {
    /// Every sender is gone; nothing left to serve.
    Closed,
    /// The job `tag` panicked; the queue is handed back for a restart.
    Crashed {
        queue: mpsc::UnboundedReceiver<Job<T>>,
        tag: u64,
    },
}

/// Start a supervised worker on `runtime` and return its queue.
pub(super) fn spawn<T: Coord>(
    runtime: &Handle,
    engine: Engine<T>,
    shared: Arc<Shared>,
) -> mpsc::UnboundedSender<Job<T>> {
    let (tx, rx) = mpsc::unbounded_channel();
    runtime.spawn(supervise(rx, engine, shared));
    tx
}

async fn supervise<T: Coord>(
    mut queue: mpsc::UnboundedReceiver<Job<T>>,
    engine: Engine<T>,
    shared: Arc<Shared>,
) {
    loop {
        let worker_engine = Arc::clone(&engine);
        let worker = tokio::task::spawn_blocking(move || run(queue, worker_engine));
        match worker.await {
            Ok(WorkerExit::Closed) => {
                debug!("hull worker stopped: channel dropped");
                return;
            }
            Ok(WorkerExit::Crashed { queue: q, tag }) => {
                let restarts = shared.restarts.fetch_add(1, Ordering::SeqCst) + 1;
                warn!(tag, restarts, "restarting hull worker");
                queue = q;
            }
            Err(err) => {
                // Queue is gone with the task; the next submit rebuilds it.
                error!(%err, "hull worker lost");
                return;
            }
        }
    }
}

fn run<T: Coord>(mut queue: mpsc::UnboundedReceiver<Job<T>>, engine: Engine<T>) -> WorkerExit<T> {
    while let Some(Job { tag, points, reply }) = queue.blocking_recv() {
        match panic::catch_unwind(AssertUnwindSafe(|| engine.compute_hull(&points))) {
            Ok(result) => {
                debug!(tag, points = points.len(), ok = result.is_ok(), "hull computed");
                // The caller may have dropped its handle; nothing to deliver then.
                let _ = reply.send(Response::new(tag, result));
            }
            Err(payload) => {
                let reason = panic_reason(payload.as_ref());
                error!(tag, %reason, "hull computation panicked");
                let _ = reply.send(Response::new(tag, Err(HullError::Computation { reason })));
                return WorkerExit::Crashed { queue, tag };
            }
        }
    }
    WorkerExit::Closed
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("worker panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("worker panicked: {s}")
    } else {
        "worker panicked".to_string()
    }
}
