// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Type-erased stream handles for the dynamic entry point.
//!
//! A [`Handle`] is what [`run`](crate::run) accepts in place of a concrete
//! channel view. It carries a runtime type descriptor (element type and
//! direction) so that a heterogeneous argument list can be checked before any
//! work starts.

use crate::coordinator::FanIn;
use crate::mux::fan_in;
use core::any::{type_name, Any, TypeId};
use core::fmt;
use muxion_core::{Capability, Channel, Direction, MuxError, Position, Receiver, Result, Sender};
use std::sync::Arc;

/// Runtime description of a channel view: element type plus direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StreamDescriptor {
    element: TypeId,
    element_name: &'static str,
    direction: Direction,
}

impl StreamDescriptor {
    #[must_use]
    pub fn of<T: 'static>(direction: Direction) -> Self {
        Self {
            element: TypeId::of::<T>(),
            element_name: type_name::<T>(),
            direction,
        }
    }

    #[must_use]
    pub const fn element(&self) -> TypeId {
        self.element
    }

    #[must_use]
    pub const fn element_name(&self) -> &'static str {
        self.element_name
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether both views carry the same element type, regardless of direction.
    #[must_use]
    pub fn is_compatible_with(&self, other: &Self) -> bool {
        self.element == other.element
    }
}

/// A receive-capable view with its element type erased.
pub(crate) struct ErasedSource {
    pub(crate) descriptor: StreamDescriptor,
    pub(crate) receiver: Box<dyn Any + Send>,
}

/// A concrete channel view behind a [`Handle`].
pub(crate) trait Endpoint: Send + Sync {
    fn descriptor(&self) -> StreamDescriptor;

    fn clone_endpoint(&self) -> Box<dyn Endpoint>;

    /// A fresh receive-only view, for use as source number `index`.
    fn source(&self, index: usize) -> Result<ErasedSource>;

    /// Start forwarding `sources` into a fresh send-only view of this endpoint.
    fn fan_in(&self, sources: Vec<ErasedSource>) -> Result<FanIn>;
}

fn start_fan_in<T>(sink: Sender<T>, sources: Vec<ErasedSource>) -> Result<FanIn>
where
    T: Send + 'static,
{
    let receivers = sources
        .into_iter()
        .enumerate()
        .map(|(index, source)| {
            let found = source.descriptor.element_name();
            source
                .receiver
                .downcast::<Receiver<T>>()
                .map(|receiver| *receiver)
                .map_err(|_| MuxError::type_mismatch(index, type_name::<T>(), found))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(fan_in(sink, receivers))
}

impl<T: Send + 'static> Endpoint for Sender<T> {
    fn descriptor(&self) -> StreamDescriptor {
        StreamDescriptor::of::<T>(Direction::SendOnly)
    }

    fn clone_endpoint(&self) -> Box<dyn Endpoint> {
        Box::new(self.clone())
    }

    fn source(&self, index: usize) -> Result<ErasedSource> {
        Err(MuxError::wrong_direction(
            Position::Source(index),
            Capability::Receive,
            Direction::SendOnly,
        ))
    }

    fn fan_in(&self, sources: Vec<ErasedSource>) -> Result<FanIn> {
        start_fan_in(self.clone(), sources)
    }
}

impl<T: Send + 'static> Endpoint for Receiver<T> {
    fn descriptor(&self) -> StreamDescriptor {
        StreamDescriptor::of::<T>(Direction::ReceiveOnly)
    }

    fn clone_endpoint(&self) -> Box<dyn Endpoint> {
        Box::new(self.clone())
    }

    fn source(&self, _index: usize) -> Result<ErasedSource> {
        Ok(ErasedSource {
            descriptor: self.descriptor(),
            receiver: Box::new(self.clone()),
        })
    }

    fn fan_in(&self, _sources: Vec<ErasedSource>) -> Result<FanIn> {
        Err(MuxError::wrong_direction(
            Position::Sink,
            Capability::Send,
            Direction::ReceiveOnly,
        ))
    }
}

impl<T: Send + 'static> Endpoint for Channel<T> {
    fn descriptor(&self) -> StreamDescriptor {
        StreamDescriptor::of::<T>(Direction::Bidirectional)
    }

    fn clone_endpoint(&self) -> Box<dyn Endpoint> {
        Box::new(self.clone())
    }

    fn source(&self, _index: usize) -> Result<ErasedSource> {
        Ok(ErasedSource {
            descriptor: self.descriptor(),
            receiver: Box::new(self.receiver()),
        })
    }

    fn fan_in(&self, sources: Vec<ErasedSource>) -> Result<FanIn> {
        start_fan_in(self.sender(), sources)
    }
}

pub(crate) enum Kind {
    Null,
    /// Type name of the wrapped value, and the value itself.
    Opaque(&'static str, Arc<dyn Any + Send + Sync>),
    Stream(Box<dyn Endpoint>),
}

/// A type-erased argument to [`run`](crate::run).
///
/// Build one from a channel view with `From`/`Into`, or use
/// [`Handle::null`] and [`Handle::opaque`] for arguments that are not
/// channel views. Cloning a handle clones the underlying view.
///
/// # Example
///
/// ```
/// use muxion::{Channel, Direction, Handle};
///
/// let channel = Channel::<u8>::new();
///
/// let source: Handle = channel.receiver().into();
/// let descriptor = source.descriptor().unwrap();
/// assert_eq!(descriptor.direction(), Direction::ReceiveOnly);
///
/// let nil: Handle = None::<Channel<u8>>.into();
/// assert!(nil.is_null());
/// ```
pub struct Handle {
    kind: Kind,
}

impl Handle {
    /// An absent handle.
    #[must_use]
    pub const fn null() -> Self {
        Self { kind: Kind::Null }
    }

    /// Wrap an arbitrary value that is not a channel view.
    ///
    /// The value lives as long as the handle and its clones, so wrapping a
    /// channel view keeps that channel connected. Its type name is used in
    /// error reports. References and boxes around channels are opaque too.
    #[must_use]
    pub fn opaque<V>(value: V) -> Self
    where
        V: Any + Send + Sync,
    {
        Self {
            kind: Kind::Opaque(type_name::<V>(), Arc::new(value)),
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self.kind, Kind::Null)
    }

    /// Element type and direction, if this handle wraps a channel view.
    #[must_use]
    pub fn descriptor(&self) -> Option<StreamDescriptor> {
        match &self.kind {
            Kind::Stream(endpoint) => Some(endpoint.descriptor()),
            Kind::Null | Kind::Opaque(..) => None,
        }
    }

    pub(crate) const fn kind(&self) -> &Kind {
        &self.kind
    }

    fn stream<E: Endpoint + 'static>(endpoint: E) -> Self {
        Self {
            kind: Kind::Stream(Box::new(endpoint)),
        }
    }
}

impl Default for Handle {
    fn default() -> Self {
        Self::null()
    }
}

impl Clone for Handle {
    fn clone(&self) -> Self {
        let kind = match &self.kind {
            Kind::Null => Kind::Null,
            Kind::Opaque(name, value) => Kind::Opaque(*name, Arc::clone(value)),
            Kind::Stream(endpoint) => Kind::Stream(endpoint.clone_endpoint()),
        };
        Self { kind }
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Null => f.write_str("Handle::Null"),
            Kind::Opaque(name, _) => f.debug_tuple("Handle::Opaque").field(name).finish(),
            Kind::Stream(endpoint) => f
                .debug_tuple("Handle::Stream")
                .field(&endpoint.descriptor())
                .finish(),
        }
    }
}

impl<T: Send + 'static> From<Sender<T>> for Handle {
    fn from(sender: Sender<T>) -> Self {
        Self::stream(sender)
    }
}

impl<T: Send + 'static> From<Receiver<T>> for Handle {
    fn from(receiver: Receiver<T>) -> Self {
        Self::stream(receiver)
    }
}

impl<T: Send + 'static> From<Channel<T>> for Handle {
    fn from(channel: Channel<T>) -> Self {
        Self::stream(channel)
    }
}

/// `None` becomes a null handle, like an unset channel variable.
impl<H: Into<Handle>> From<Option<H>> for Handle {
    fn from(handle: Option<H>) -> Self {
        handle.map_or_else(Self::null, Into::into)
    }
}
