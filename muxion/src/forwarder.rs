// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::coordinator::Coordinator;
use muxion_core::{debug, spawn::spawn, trace, warn, Receiver};
use std::sync::Arc;

/// Relays every element of one source into the shared sink.
///
/// Each received element is sent before the next receive is attempted, so a
/// forwarder holds at most one element and backpressure on the sink reaches
/// the source's producer unchanged. Dropping a forwarder, whether it ran to
/// completion or never ran at all, counts as its departure.
pub(crate) struct Forwarder<T> {
    index: usize,
    source: Receiver<T>,
    coordinator: Arc<Coordinator<T>>,
}

impl<T> Forwarder<T>
where
    T: Send + 'static,
{
    pub(crate) fn new(index: usize, source: Receiver<T>, coordinator: Arc<Coordinator<T>>) -> Self {
        Self {
            index,
            source,
            coordinator,
        }
    }

    pub(crate) fn spawn(self) {
        spawn(self.run());
    }

    async fn run(self) {
        trace!("forwarder {} started", self.index);
        let sink = self.coordinator.sink();
        let mut forwarded: u64 = 0;

        while let Some(element) = self.source.recv().await {
            if sink.send(element).await.is_err() {
                warn!(
                    "forwarder {}: sink refused an element after {} forwarded, stopping",
                    self.index, forwarded
                );
                break;
            }
            forwarded += 1;
        }

        debug!(
            "forwarder {} terminated after forwarding {} elements",
            self.index, forwarded
        );
    }
}

impl<T> Drop for Forwarder<T> {
    fn drop(&mut self) {
        self.coordinator.depart();
    }
}
