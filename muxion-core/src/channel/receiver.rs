// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::shared::Shared;
use core::any::type_name;
use core::fmt;
use futures::stream::{self, Stream};
use std::sync::Arc;

/// Receive-only view of a rendezvous channel.
///
/// Receivers can be cloned; each offered value is taken by exactly one of them.
pub struct Receiver<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Receiver<T> {
    pub(super) fn attach(shared: Arc<Shared<T>>) -> Self {
        shared.attach_receiver();
        Self { shared }
    }

    /// Take the next offered value, waiting for a sender if none is on offer.
    ///
    /// Returns `None` once the channel is closed, or once every sender has
    /// been dropped. Dropping the future before it completes takes nothing.
    pub async fn recv(&self) -> Option<T> {
        loop {
            let listener = {
                let mut state = self.shared.state.lock();
                if state.closed {
                    return None;
                }
                if let Some(value) = state.slot.take() {
                    state.taken = state.offers;
                    drop(state);
                    self.shared.vacated.notify(usize::MAX);
                    return Some(value);
                }
                if state.senders == 0 {
                    return None;
                }
                self.shared.offered.listen()
            };
            listener.await;
        }
    }

    /// Whether a receive would return `None` right now.
    pub fn is_closed(&self) -> bool {
        let state = self.shared.state.lock();
        state.closed || (state.senders == 0 && state.slot.is_none())
    }

    /// Whether both views belong to the same channel.
    pub fn same_channel(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    /// Adapt this receiver into a [`Stream`] that ends when the channel does.
    ///
    /// # Example
    ///
    /// ```
    /// use futures::StreamExt;
    /// use muxion_core::channel;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let (tx, rx) = channel::<&str>();
    /// tokio::spawn(async move {
    ///     for word in ["a", "b"] {
    ///         tx.send(word).await.unwrap();
    ///     }
    /// });
    ///
    /// let words: Vec<_> = rx.into_stream().collect().await;
    /// assert_eq!(words, ["a", "b"]);
    /// # }
    /// ```
    pub fn into_stream(self) -> impl Stream<Item = T> {
        stream::unfold(self, |receiver| async move {
            let value = receiver.recv().await?;
            Some((value, receiver))
        })
    }
}

impl<T> Clone for Receiver<T> {
    fn clone(&self) -> Self {
        Self::attach(Arc::clone(&self.shared))
    }
}

impl<T> Drop for Receiver<T> {
    fn drop(&mut self) {
        self.shared.detach_receiver();
    }
}

impl<T> fmt::Debug for Receiver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Receiver")
            .field("element", &type_name::<T>())
            .finish_non_exhaustive()
    }
}
