// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the muxion fan-in multiplexer
//!
//! Every failure is detected synchronously, before any forwarding task is
//! spawned. A returned [`MuxError`] therefore means that nothing happened:
//! no handle was consumed, closed or read from, and the call can be retried
//! with corrected arguments.
//!
//! # Examples
//!
//! ```
//! use muxion_core::{MuxError, Position, Result};
//!
//! fn check_sink(present: bool) -> Result<()> {
//!     if present {
//!         Ok(())
//!     } else {
//!         Err(MuxError::null_handle(Position::Sink))
//!     }
//! }
//!
//! assert!(check_sink(false).is_err());
//! ```

use crate::direction::{Capability, Direction};
use core::fmt;

/// Where in a multiplexing call an offending handle was supplied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    Sink,
    /// Zero-based index into the source list.
    Source(usize),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sink => f.write_str("sink"),
            Self::Source(index) => write!(f, "source #{index}"),
        }
    }
}

/// Root error type for starting a multiplexing operation
///
/// Variants are listed in the order the validator checks them.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MuxError {
    /// The handle is absent
    ///
    /// Produced by `Handle::null()` and by converting a `None` option.
    #[error("{position} is a null handle")]
    NullHandle {
        /// Which argument was null
        position: Position,
    },

    /// The handle wraps a value that is not a channel view
    ///
    /// This covers plain values as well as references or boxes around a
    /// channel: only the channel views themselves are accepted.
    #[error("{position} is not a stream handle (got a value of type `{type_name}`)")]
    NotAStream {
        /// Which argument was rejected
        position: Position,
        /// Type name of the rejected value
        type_name: &'static str,
    },

    /// The handle lacks the capability its role requires
    #[error("{position} must support {required}, but it is {found}")]
    WrongDirection {
        /// Which argument was rejected
        position: Position,
        /// Capability the role needs (send for the sink, receive for sources)
        required: Capability,
        /// Direction of the supplied handle
        found: Direction,
    },

    /// A source carries a different element type than the sink
    #[error("source #{index} carries `{found}` elements, but the sink carries `{expected}`")]
    TypeMismatch {
        /// Index of the mismatching source
        index: usize,
        /// Element type name of the sink
        expected: &'static str,
        /// Element type name of the source
        found: &'static str,
    },
}

impl MuxError {
    #[must_use]
    pub const fn null_handle(position: Position) -> Self {
        Self::NullHandle { position }
    }

    #[must_use]
    pub const fn not_a_stream(position: Position, type_name: &'static str) -> Self {
        Self::NotAStream {
            position,
            type_name,
        }
    }

    #[must_use]
    pub const fn wrong_direction(position: Position, required: Capability, found: Direction) -> Self {
        Self::WrongDirection {
            position,
            required,
            found,
        }
    }

    #[must_use]
    pub const fn type_mismatch(index: usize, expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch {
            index,
            expected,
            found,
        }
    }

    /// The argument that caused the failure
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::NullHandle { position }
            | Self::NotAStream { position, .. }
            | Self::WrongDirection { position, .. } => *position,
            Self::TypeMismatch { index, .. } => Position::Source(*index),
        }
    }

    /// Whether the failure concerns the sink rather than a source
    #[must_use]
    pub const fn is_sink_error(&self) -> bool {
        matches!(self.position(), Position::Sink)
    }
}

/// Specialized Result type for muxion operations
pub type Result<T> = core::result::Result<T, MuxError>;
