// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::coordinator::{Coordinator, FanIn};
use crate::forwarder::Forwarder;
use crate::handle::{Handle, Kind};
use crate::validate::validate;
use muxion_core::{debug, MuxError, Position, Receiver, Result, Sender};
use std::sync::Arc;

/// Merge `sources` into `sink`, statically typed.
///
/// Spawns one forwarding task per source and returns immediately. Elements
/// of each source reach the sink in the order they were sent; elements of
/// different sources interleave in no particular order. Once every source
/// has closed, the sink is closed exactly once. With no sources at all the
/// sink is closed right away.
///
/// # Panics
///
/// With the `runtime-tokio` feature, panics when called outside of a Tokio
/// runtime.
///
/// # Example
///
/// ```
/// use muxion::{channel, fan_in};
///
/// # #[tokio::main]
/// # async fn main() {
/// let (sink_tx, sink_rx) = channel::<i32>();
/// let (source_tx, source_rx) = channel::<i32>();
///
/// fan_in(sink_tx, [source_rx]);
///
/// tokio::spawn(async move {
///     for value in [666, 777, 10] {
///         source_tx.send(value).await.unwrap();
///     }
///     source_tx.close();
/// });
///
/// let mut merged = Vec::new();
/// while let Some(value) = sink_rx.recv().await {
///     merged.push(value);
/// }
/// assert_eq!(merged, [666, 777, 10]);
/// # }
/// ```
pub fn fan_in<T, I>(sink: Sender<T>, sources: I) -> FanIn
where
    T: Send + 'static,
    I: IntoIterator<Item = Receiver<T>>,
{
    let sources: Vec<Receiver<T>> = sources.into_iter().collect();
    debug!("starting fan-in of {} sources", sources.len());

    let coordinator = Coordinator::new(sink, sources.len());
    let observer = coordinator.observer();

    if sources.is_empty() {
        coordinator.finish();
        return observer;
    }

    // Every source gets its forwarder before any is spawned: if spawning
    // panics, the forwarders not yet spawned are dropped and still depart.
    let forwarders: Vec<Forwarder<T>> = sources
        .into_iter()
        .enumerate()
        .map(|(index, source)| Forwarder::new(index, source, Arc::clone(&coordinator)))
        .collect();
    for forwarder in forwarders {
        forwarder.spawn();
    }

    observer
}

/// Merge `sources` into `sink`, checking handles at runtime.
///
/// This is the dynamic counterpart of [`fan_in`]: the handles are validated
/// first (see [`validate`]), and only if every check passes are forwarding
/// tasks spawned on clones of the handles. The caller's handles are borrowed,
/// never consumed, so a rejected call leaves every channel exactly as it was.
///
/// A successful return means the operation has started, not that it has
/// finished; use the returned [`FanIn`] or watch the sink close.
///
/// # Errors
///
/// Returns the first [`MuxError`] found by [`validate`]. Nothing has been
/// spawned in that case.
///
/// # Panics
///
/// With the `runtime-tokio` feature, panics when called outside of a Tokio
/// runtime.
///
/// # Example
///
/// ```
/// use muxion::{run, Channel, Handle};
///
/// # #[tokio::main]
/// # async fn main() -> anyhow::Result<()> {
/// let sink = Channel::<String>::new();
/// let first = Channel::<String>::new();
/// let second = Channel::<String>::new();
///
/// let sources: Vec<Handle> = vec![first.receiver().into(), second.receiver().into()];
/// run(&sink.sender().into(), &sources)?;
///
/// first.close();
/// second.send("lambda".to_string()).await?;
/// second.close();
///
/// assert_eq!(sink.recv().await.as_deref(), Some("lambda"));
/// assert_eq!(sink.recv().await, None);
/// # Ok(())
/// # }
/// ```
pub fn run(sink: &Handle, sources: &[Handle]) -> Result<FanIn> {
    if let Err(error) = validate(sink, sources) {
        debug!("fan-in rejected: {}", error);
        return Err(error);
    }

    let Kind::Stream(sink) = sink.kind() else {
        return Err(MuxError::null_handle(Position::Sink));
    };

    let sources = sources
        .iter()
        .enumerate()
        .map(|(index, source)| match source.kind() {
            Kind::Stream(endpoint) => endpoint.source(index),
            Kind::Null | Kind::Opaque(..) => Err(MuxError::null_handle(Position::Source(index))),
        })
        .collect::<Result<Vec<_>>>()?;

    sink.fan_in(sources)
}
