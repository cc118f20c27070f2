// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::handle::{Handle, Kind, StreamDescriptor};
use muxion_core::{Capability, MuxError, Position, Result};

/// Check that `sink` and `sources` can be multiplexed, without touching them.
///
/// The sink is checked first, then each source in order; the first violation
/// found is returned:
///
/// 1. the handle is not null ([`MuxError::NullHandle`]),
/// 2. it wraps a channel view ([`MuxError::NotAStream`]),
/// 3. the sink can send and every source can receive ([`MuxError::WrongDirection`]),
/// 4. every source carries the sink's element type ([`MuxError::TypeMismatch`]).
///
/// # Errors
///
/// Returns the first violation found, as described above.
///
/// # Example
///
/// ```
/// use muxion::{validate, Channel, Handle, MuxError, Position};
///
/// let sink = Channel::<i32>::new();
/// let source = Channel::<u32>::new();
///
/// let error = validate(&sink.into(), &[Handle::null(), source.into()]).unwrap_err();
/// assert_eq!(error, MuxError::null_handle(Position::Source(0)));
/// ```
pub fn validate(sink: &Handle, sources: &[Handle]) -> Result<()> {
    let expected = inspect(sink, Position::Sink, Capability::Send)?;

    for (index, source) in sources.iter().enumerate() {
        let found = inspect(source, Position::Source(index), Capability::Receive)?;
        if !found.is_compatible_with(&expected) {
            return Err(MuxError::type_mismatch(
                index,
                expected.element_name(),
                found.element_name(),
            ));
        }
    }

    Ok(())
}

fn inspect(handle: &Handle, position: Position, required: Capability) -> Result<StreamDescriptor> {
    let descriptor = match handle.kind() {
        Kind::Null => return Err(MuxError::null_handle(position)),
        Kind::Opaque(type_name, _) => return Err(MuxError::not_a_stream(position, *type_name)),
        Kind::Stream(endpoint) => endpoint.descriptor(),
    };

    if descriptor.direction().supports(required) {
        Ok(descriptor)
    } else {
        Err(MuxError::wrong_direction(
            position,
            required,
            descriptor.direction(),
        ))
    }
}
