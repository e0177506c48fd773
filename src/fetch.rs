//! Request slots: one value per slot, fed by at most one live request
//!
//! Issuing a new request aborts the previous one and bumps the slot's
//! generation, so a late response from a superseded request can never
//! overwrite newer data. Dropping the slot aborts whatever is in flight.

use std::future::Future;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::LoadingTracker;

/// What a slot currently holds
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Idle,
    Loading,
    Ready(T),
    /// Error text, kept for a one-line notice
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }
}

struct Tagged<T> {
    generation: u64,
    result: Result<T, ApiError>,
}

pub struct Slot<T> {
    label: &'static str,
    generation: u64,
    tx: UnboundedSender<Tagged<T>>,
    rx: UnboundedReceiver<Tagged<T>>,
    task: Option<JoinHandle<()>>,
    state: Loadable<T>,
}

impl<T: Send + 'static> Slot<T> {
    pub fn new(label: &'static str) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            label,
            generation: 0,
            tx,
            rx,
            task: None,
            state: Loadable::Idle,
        }
    }

    /// Start a request, superseding any earlier one
    pub fn request<F>(&mut self, runtime: &Handle, loading: &LoadingTracker, fut: F)
    where
        F: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        // only the newest generation may fill the slot
        self.cancel();
        self.generation += 1;
        self.state = Loadable::Loading;

        let generation = self.generation;
        let tx = self.tx.clone();
        let guard = loading.begin();
        debug!(slot = self.label, generation, "request issued");

        self.task = Some(runtime.spawn(async move {
            let result = fut.await;
            // loading ends before the result is queued
            drop(guard);
            // a closed channel means the owning view is gone
            let _ = tx.send(Tagged { generation, result });
        }));
    }

    /// Fill the slot without a request
    pub fn seed(&mut self, value: T) {
        self.cancel();
        self.generation += 1;
        self.state = Loadable::Ready(value);
    }

    /// Abort the in-flight request, if any
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Drain arrived responses; returns true when the slot changed
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(Tagged { generation, result }) = self.rx.try_recv() {
            if generation != self.generation {
                debug!(slot = self.label, generation, current = self.generation, "stale response dropped");
                continue;
            }
            // the current request has answered
            self.task = None;
            self.state = match result {
                Ok(value) => Loadable::Ready(value),
                Err(err) => {
                    warn!(slot = self.label, error = %err, "request failed");
                    Loadable::Failed(err.to_string())
                }
            };
            changed = true;
        }
        changed
    }

    pub fn state(&self) -> &Loadable<T> {
        &self.state
    }
}

impl<T> Drop for Slot<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
