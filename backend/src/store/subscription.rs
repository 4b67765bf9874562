//! Live-query subscription handle.
//!
//! A subscription delivers full snapshots over an unbounded channel and
//! unregisters itself from the store when cancelled or dropped, so a view
//! that goes away cannot leak a callback into the store. For UI code the
//! handle splits into a [`SnapshotStream`] (moved into the reader task) and a
//! [`SubscriptionGuard`] (held by the view's cleanup); dropping the guard
//! closes the stream, which ends the reader.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::mpsc::UnboundedReceiver;
use futures::Stream;
use shared::Record;

/// The full current set of records matching a subscription's filter.
pub type Snapshot = Vec<Record>;

/// Receiving half of a live query.
pub struct SnapshotStream {
    receiver: UnboundedReceiver<Snapshot>,
}

impl SnapshotStream {
    /// Take the next snapshot if one is already queued. Returns `None` when
    /// nothing is pending or the store side has gone away.
    pub fn try_snapshot(&mut self) -> Option<Snapshot> {
        self.receiver.try_recv().ok()
    }

    /// Drain the queue and keep only the most recent snapshot, if any.
    pub fn latest_snapshot(&mut self) -> Option<Snapshot> {
        let mut latest = None;
        while let Some(snapshot) = self.try_snapshot() {
            latest = Some(snapshot);
        }
        latest
    }
}

impl Stream for SnapshotStream {
    type Item = Snapshot;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.receiver).poll_next(cx)
    }
}

/// Unregisters the watcher when dropped.
pub struct SubscriptionGuard {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl SubscriptionGuard {
    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

/// Handle to one live query. Implements [`Stream`] over snapshots.
pub struct RecordSubscription {
    stream: SnapshotStream,
    guard: SubscriptionGuard,
}

impl RecordSubscription {
    pub fn new(
        receiver: UnboundedReceiver<Snapshot>,
        cancel: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            stream: SnapshotStream { receiver },
            guard: SubscriptionGuard {
                cancel: Some(Box::new(cancel)),
            },
        }
    }

    /// See [`SnapshotStream::try_snapshot`].
    pub fn try_snapshot(&mut self) -> Option<Snapshot> {
        self.stream.try_snapshot()
    }

    /// See [`SnapshotStream::latest_snapshot`].
    pub fn latest_snapshot(&mut self) -> Option<Snapshot> {
        self.stream.latest_snapshot()
    }

    /// Stop delivery and unregister from the store.
    pub fn cancel(mut self) {
        self.guard.cancel_now();
    }

    /// Split into the stream and the guard controlling its lifetime.
    pub fn split(self) -> (SnapshotStream, SubscriptionGuard) {
        (self.stream, self.guard)
    }
}

impl Stream for RecordSubscription {
    type Item = Snapshot;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.stream).poll_next(cx)
    }
}
