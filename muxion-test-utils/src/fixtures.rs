// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use muxion::{Channel, Handle};
use std::sync::LazyLock;

static POINTED_TO: LazyLock<Channel<i32>> = LazyLock::new(Channel::new);

/// Handles that must be rejected in either role next to a `Channel<i32>`.
///
/// | name               | what it is                          |
/// |--------------------|-------------------------------------|
/// | `nil`              | [`Handle::null`]                    |
/// | `nil_channel`      | a `None::<Channel<i32>>`            |
/// | `not_channel`      | a plain `i32`                       |
/// | `pointer_to_channel` | a reference to a `Channel<i32>`   |
/// | `boxed_channel`    | a `Box<Channel<i32>>`               |
/// | `wrong_type`       | a `Channel<u32>`                    |
pub fn invalid_handles() -> Vec<(&'static str, Handle)> {
    let valid = Channel::<i32>::new();
    let nil_channel: Option<Channel<i32>> = None;

    vec![
        ("nil", Handle::null()),
        ("nil_channel", nil_channel.into()),
        ("not_channel", Handle::opaque(1)),
        ("pointer_to_channel", Handle::opaque(&*POINTED_TO)),
        ("boxed_channel", Handle::opaque(Box::new(valid.clone()))),
        ("wrong_type", Channel::<u32>::new().into()),
    ]
}

/// `count` independent channels of the same element type.
pub fn channels<T>(count: usize) -> Vec<Channel<T>> {
    (0..count).map(|_| Channel::new()).collect()
}

/// Receive-only handles for every channel in `channels`.
pub fn source_handles<T: Send + 'static>(channels: &[Channel<T>]) -> Vec<Handle> {
    channels
        .iter()
        .map(|channel| channel.receiver().into())
        .collect()
}
