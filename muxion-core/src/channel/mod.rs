// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Unbuffered (rendezvous) channels with explicit close.
//!
//! A value passes from a [`Sender`] to a [`Receiver`] only when both sides
//! meet: `send` completes once a receiver has taken the value, and `recv`
//! waits until a sender offers one. There is no internal queue, so a slow
//! consumer directly slows down every producer.
//!
//! A channel has three views that differ only in direction:
//!
//! - [`Sender`] can send and close,
//! - [`Receiver`] can receive,
//! - [`Channel`] can do both.
//!
//! All views are cheap to clone and share one underlying channel.

mod receiver;
mod send_error;
mod sender;
mod shared;

pub use receiver::Receiver;
pub use send_error::SendError;
pub use sender::Sender;

use core::fmt;
use shared::Shared;
use std::sync::Arc;

/// Create a rendezvous channel, returning its send-only and receive-only views.
///
/// # Example
///
/// ```
/// use muxion_core::channel;
///
/// # #[tokio::main]
/// # async fn main() {
/// let (tx, rx) = channel::<i32>();
/// tokio::spawn(async move {
///     tx.send(1).await.unwrap();
///     tx.close();
/// });
///
/// assert_eq!(rx.recv().await, Some(1));
/// assert_eq!(rx.recv().await, None);
/// # }
/// ```
pub fn channel<T>() -> (Sender<T>, Receiver<T>) {
    let shared = Arc::new(Shared::new());
    (
        Sender::attach(Arc::clone(&shared)),
        Receiver::attach(shared),
    )
}

/// Bidirectional view of a rendezvous channel.
///
/// Holding a `Channel` keeps the channel connected in both directions, so
/// receivers only observe the end of a channel shared this way once it is
/// explicitly [closed](Channel::close).
pub struct Channel<T> {
    sender: Sender<T>,
    receiver: Receiver<T>,
}

impl<T> Channel<T> {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// A send-only view of this channel.
    pub fn sender(&self) -> Sender<T> {
        self.sender.clone()
    }

    /// A receive-only view of this channel.
    pub fn receiver(&self) -> Receiver<T> {
        self.receiver.clone()
    }

    /// Separate this channel into its send-only and receive-only views.
    pub fn split(self) -> (Sender<T>, Receiver<T>) {
        (self.sender, self.receiver)
    }

    /// See [`Sender::send`].
    ///
    /// # Errors
    ///
    /// Returns the value inside a [`SendError`] if the channel is closed
    /// before a receiver takes it.
    pub async fn send(&self, value: T) -> Result<(), SendError<T>> {
        self.sender.send(value).await
    }

    /// See [`Receiver::recv`].
    pub async fn recv(&self) -> Option<T> {
        self.receiver.recv().await
    }

    /// See [`Sender::close`].
    pub fn close(&self) -> bool {
        self.sender.close()
    }

    pub fn is_closed(&self) -> bool {
        self.receiver.is_closed()
    }
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            receiver: self.receiver.clone(),
        }
    }
}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("element", &core::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}
