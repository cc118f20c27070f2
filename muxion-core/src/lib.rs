// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Building blocks for the muxion fan-in multiplexer.
//!
//! - [`channel`]: unbuffered rendezvous channels with send-only, receive-only
//!   and bidirectional views
//! - [`MuxError`]: the errors a multiplexing call can be rejected with
//! - [`spawn`](spawn::spawn): detached task spawning on the configured runtime

pub mod channel;
pub mod direction;
pub mod error;
#[doc(hidden)]
pub mod logging;
pub mod spawn;

pub use self::channel::{channel, Channel, Receiver, SendError, Sender};
pub use self::direction::{Capability, Direction};
pub use self::error::{MuxError, Position, Result};
