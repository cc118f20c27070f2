// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;

/// Which operations a channel view is allowed to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// A [`Sender`](crate::Sender): can send and close, cannot receive.
    SendOnly,
    /// A [`Receiver`](crate::Receiver): can receive, cannot send or close.
    ReceiveOnly,
    /// A [`Channel`](crate::Channel): can do both.
    Bidirectional,
}

impl Direction {
    #[must_use]
    pub const fn can_send(self) -> bool {
        matches!(self, Self::SendOnly | Self::Bidirectional)
    }

    #[must_use]
    pub const fn can_receive(self) -> bool {
        matches!(self, Self::ReceiveOnly | Self::Bidirectional)
    }

    /// Whether a handle with this direction offers `capability`.
    #[must_use]
    pub const fn supports(self, capability: Capability) -> bool {
        match capability {
            Capability::Send => self.can_send(),
            Capability::Receive => self.can_receive(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SendOnly => "send-only",
            Self::ReceiveOnly => "receive-only",
            Self::Bidirectional => "bidirectional",
        })
    }
}

/// A single operation a multiplexing role requires from its handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    Send,
    Receive,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Send => "send",
            Self::Receive => "receive",
        })
    }
}
