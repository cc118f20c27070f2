// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::send_error::SendError;
use super::shared::Shared;
use core::any::type_name;
use core::fmt;
use std::sync::Arc;

/// Send-only view of a rendezvous channel.
///
/// Cloning a `Sender` creates another view of the same channel. The channel
/// reports disconnection to its receivers once it is closed or once every
/// send-capable view has been dropped.
pub struct Sender<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Sender<T> {
    pub(super) fn attach(shared: Arc<Shared<T>>) -> Self {
        shared.attach_sender();
        Self { shared }
    }

    /// Hand `value` to a receiver, waiting until one has taken it.
    ///
    /// The future completes only after a receiver has taken the value, so a
    /// successful send means the value has been delivered. Concurrent senders
    /// are served one value at a time, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns the value inside a [`SendError`] if the channel is closed, or
    /// every receiver is dropped, before the value is taken.
    ///
    /// # Cancel safety
    ///
    /// Dropping the future before it completes may or may not have delivered
    /// the value. If a receiver already took it, it stays delivered; otherwise
    /// the offer is withdrawn, the value is dropped and no receiver will
    /// observe it later.
    ///
    /// # Example
    ///
    /// ```
    /// use muxion_core::channel;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let (tx, rx) = channel::<u32>();
    ///
    /// let producer = tokio::spawn(async move { tx.send(7).await });
    ///
    /// assert_eq!(rx.recv().await, Some(7));
    /// assert!(producer.await.unwrap().is_ok());
    /// # }
    /// ```
    pub async fn send(&self, value: T) -> Result<(), SendError<T>> {
        let ticket = self.offer(value).await?;
        Handoff {
            shared: self.shared.as_ref(),
            ticket,
            settled: false,
        }
        .delivered()
        .await
    }

    /// Park `value` in the slot as soon as it is free, returning the ticket of the offer.
    async fn offer(&self, value: T) -> Result<u64, SendError<T>> {
        loop {
            let listener = {
                let mut state = self.shared.state.lock();
                if state.closed || state.receivers == 0 {
                    return Err(SendError(value));
                }
                if state.slot.is_none() {
                    state.slot = Some(value);
                    state.offers += 1;
                    let ticket = state.offers;
                    drop(state);
                    self.shared.offered.notify(usize::MAX);
                    return Ok(ticket);
                }
                self.shared.vacated.listen()
            };
            listener.await;
        }
    }

    /// Close the channel for every view.
    ///
    /// Pending and future receives return `None`; pending and future sends
    /// fail. Returns `true` if this call closed the channel, `false` if it was
    /// already closed.
    pub fn close(&self) -> bool {
        self.shared.close()
    }

    /// Whether a send would fail right now.
    pub fn is_closed(&self) -> bool {
        let state = self.shared.state.lock();
        state.closed || state.receivers == 0
    }

    /// Whether both views belong to the same channel.
    pub fn same_channel(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl<T> Clone for Sender<T> {
    fn clone(&self) -> Self {
        Self::attach(Arc::clone(&self.shared))
    }
}

impl<T> Drop for Sender<T> {
    fn drop(&mut self) {
        self.shared.detach_sender();
    }
}

impl<T> fmt::Debug for Sender<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sender")
            .field("element", &type_name::<T>())
            .finish_non_exhaustive()
    }
}

/// An offer sitting in the slot, waiting for a receiver to take it.
struct Handoff<'a, T> {
    shared: &'a Shared<T>,
    ticket: u64,
    settled: bool,
}

impl<T> Handoff<'_, T> {
    async fn delivered(mut self) -> Result<(), SendError<T>> {
        loop {
            let listener = {
                let mut state = self.shared.state.lock();
                if state.taken >= self.ticket {
                    self.settled = true;
                    return Ok(());
                }
                if state.closed || state.receivers == 0 {
                    self.settled = true;
                    let withdrawn = state.slot.take();
                    drop(state);
                    self.shared.vacated.notify(usize::MAX);
                    return withdrawn.map_or(Ok(()), |value| Err(SendError(value)));
                }
                self.shared.vacated.listen()
            };
            listener.await;
        }
    }
}

impl<T> Drop for Handoff<'_, T> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        // Not yet taken, so the slot still holds this offer.
        let withdrawn = {
            let mut state = self.shared.state.lock();
            if state.taken < self.ticket {
                state.slot.take()
            } else {
                None
            }
        };
        if withdrawn.is_some() {
            self.shared.vacated.notify(usize::MAX);
        }
    }
}
