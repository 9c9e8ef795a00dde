//! Single-flight execution of asynchronous actions.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};

use futures::future::LocalBoxFuture;
use tracing::debug;

/// Runs at most one action at a time.
///
/// Clones share the same busy flag. A trigger while an action is in flight
/// is ignored, not queued.
#[derive(Debug, Clone, Default)]
pub struct SingleFlight {
    busy: Arc<AtomicBool>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Start `start` unless an action is already in flight.
    ///
    /// The busy flag is raised before `start` runs, so a trigger issued from
    /// inside `start` is already ignored. It drops again when the returned
    /// [`Flight`] completes or is dropped, whichever comes first.
    pub fn trigger<T, F>(&self, start: F) -> Option<Flight<T>>
    where
        F: FnOnce() -> LocalBoxFuture<'static, T>,
    {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("ignoring trigger while an action is in flight");
            return None;
        }

        let guard = FlightGuard {
            busy: Arc::clone(&self.busy),
        };

        Some(Flight {
            inner: start(),
            guard: Some(guard),
        })
    }
}

/// An action started by [`SingleFlight::trigger`].
#[must_use = "the action only runs when polled"]
pub struct Flight<T> {
    inner: LocalBoxFuture<'static, T>,
    guard: Option<FlightGuard>,
}

impl<T> Future for Flight<T> {
    type Output = T;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
        let output = self.inner.as_mut().poll(cx);
        if output.is_ready() {
            self.guard = None;
        }
        output
    }
}

struct FlightGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
