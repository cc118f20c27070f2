// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! # muxion
//!
//! A dynamic fan-in multiplexer: merge any number of channels ("sources")
//! carrying the same element type into a single channel ("sink").
//!
//! ## Overview
//!
//! - Every source gets its own forwarding task, which relays elements into
//!   the sink one at a time. Per-source order is preserved; elements of
//!   different sources interleave in no particular order.
//! - Channels are unbuffered rendezvous channels, so backpressure from the
//!   sink's consumer reaches every producer.
//! - The sink is closed exactly once, after the last source has closed.
//!
//! Two entry points are provided:
//!
//! - [`fan_in`] takes a typed [`Sender`] and typed [`Receiver`]s; the compiler
//!   checks element type and direction.
//! - [`run`] takes type-erased [`Handle`]s and checks them at runtime,
//!   returning a [`MuxError`] before anything starts if a handle is null, not
//!   a channel, has the wrong direction, or carries the wrong element type.
//!
//! ## Quick Start
//!
//! ```rust
//! use muxion::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let sink = Channel::<u32>::new();
//! let sources: Vec<Channel<u32>> = (0..3).map(|_| Channel::new()).collect();
//!
//! let handles: Vec<Handle> = sources.iter().map(|source| source.receiver().into()).collect();
//! run(&sink.sender().into(), &handles)?;
//!
//! tokio::spawn(async move {
//!     for (value, source) in [666, 777, 10].into_iter().zip(&sources) {
//!         source.send(value).await.unwrap();
//!     }
//!     for source in &sources {
//!         source.close();
//!     }
//! });
//!
//! let mut merged = Vec::new();
//! while let Some(value) = sink.recv().await {
//!     merged.push(value);
//! }
//! merged.sort_unstable();
//! assert_eq!(merged, [10, 666, 777]);
//! # Ok(())
//! # }
//! ```

pub mod coordinator;
mod forwarder;
pub mod handle;
mod mux;
pub mod validate;

pub use self::coordinator::FanIn;
pub use self::handle::{Handle, StreamDescriptor};
pub use self::mux::{fan_in, run};
pub use self::validate::validate;

// Re-export core types
pub use muxion_core::{
    channel, Capability, Channel, Direction, MuxError, Position, Receiver, Result, SendError,
    Sender,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{fan_in, run, validate, FanIn, Handle};
    pub use muxion_core::{channel, Channel, MuxError, Receiver, Sender};
}
