// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Completion coordination: close the sink once, after the last forwarder.

use core::fmt;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use event_listener::Event;
use muxion_core::{debug, warn, Sender};
use std::sync::Arc;

/// Join state of one multiplexing operation.
struct Completion {
    sources: usize,
    active: AtomicUsize,
    complete: AtomicBool,
    event: Event,
}

impl Completion {
    fn is_complete(&self) -> bool {
        self.complete.load(Ordering::Acquire)
    }
}

/// Counts forwarders down and closes the sink on the final departure.
pub(crate) struct Coordinator<T> {
    completion: Arc<Completion>,
    sink: Sender<T>,
}

impl<T> Coordinator<T> {
    pub(crate) fn new(sink: Sender<T>, sources: usize) -> Arc<Self> {
        Arc::new(Self {
            completion: Arc::new(Completion {
                sources,
                active: AtomicUsize::new(sources),
                complete: AtomicBool::new(false),
                event: Event::new(),
            }),
            sink,
        })
    }

    pub(crate) fn sink(&self) -> &Sender<T> {
        &self.sink
    }

    pub(crate) fn observer(&self) -> FanIn {
        FanIn {
            completion: Arc::clone(&self.completion),
        }
    }

    /// Record that one forwarder has terminated.
    ///
    /// Only the decrement that reaches zero closes the sink, so the sink is
    /// closed exactly once however the forwarders interleave.
    pub(crate) fn depart(&self) {
        let previous = self.completion.active.fetch_sub(1, Ordering::AcqRel);
        if previous == 1 {
            self.finish();
        }
    }

    /// Close the sink and publish completion.
    ///
    /// Called by the last departing forwarder, or directly when there are no sources.
    pub(crate) fn finish(&self) {
        if self.sink.close() {
            debug!(
                "fan-in of {} sources complete, sink closed",
                self.completion.sources
            );
        } else {
            warn!("fan-in complete, but the sink had already been closed elsewhere");
        }
        self.completion.complete.store(true, Ordering::Release);
        self.completion.event.notify(usize::MAX);
    }
}

/// Observer of a running multiplexing operation.
///
/// Returned by [`run`](crate::run) and [`fan_in`](crate::fan_in). It only
/// observes: dropping it does not stop the operation, and there is no way to
/// cancel one.
#[derive(Clone)]
pub struct FanIn {
    completion: Arc<Completion>,
}

impl FanIn {
    /// Number of sources the operation started with.
    #[must_use]
    pub fn sources(&self) -> usize {
        self.completion.sources
    }

    /// Number of forwarders whose source has not closed yet.
    #[must_use]
    pub fn active(&self) -> usize {
        self.completion.active.load(Ordering::Acquire)
    }

    /// Whether every source has closed and the sink has been closed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completion.is_complete()
    }

    /// Wait until the sink has been closed.
    ///
    /// # Example
    ///
    /// ```
    /// use muxion::{channel, fan_in};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let (sink_tx, sink_rx) = channel::<u8>();
    /// let (source_tx, source_rx) = channel::<u8>();
    ///
    /// let fan_in = fan_in(sink_tx, [source_rx]);
    /// source_tx.close();
    ///
    /// fan_in.completed().await;
    /// assert_eq!(sink_rx.recv().await, None);
    /// # }
    /// ```
    pub async fn completed(&self) {
        loop {
            if self.completion.is_complete() {
                return;
            }
            let listener = self.completion.event.listen();
            if self.completion.is_complete() {
                return;
            }
            listener.await;
        }
    }
}

impl fmt::Debug for FanIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FanIn")
            .field("sources", &self.sources())
            .field("active", &self.active())
            .field("complete", &self.is_complete())
            .finish()
    }
}
