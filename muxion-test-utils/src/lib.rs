// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the muxion fan-in multiplexer.
//!
//! This crate is for development and testing only.
//!
//! - [`helpers`]: timeout-guarded receive/send assertions and producers
//! - [`fixtures`]: ready-made invalid handles and channel sets
//!
//! Every helper that waits takes a timeout in milliseconds and panics when it
//! expires, so a hanging multiplexer fails the test instead of stalling it.
//!
//! ```rust
//! use muxion::{channel, fan_in};
//! use muxion_test_utils::helpers::{collect_until_closed, feed_round_robin};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (sink_tx, sink_rx) = channel::<i32>();
//! let (source_tx, source_rx) = channel::<i32>();
//!
//! fan_in(sink_tx, [source_rx]);
//! feed_round_robin(vec![source_tx], vec![1, 2, 3]);
//!
//! assert_eq!(collect_until_closed(&sink_rx, 1000).await, [1, 2, 3]);
//! # }
//! ```

pub mod fixtures;
pub mod helpers;
