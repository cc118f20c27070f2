// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use muxion::{channel, run, Channel, Direction, Handle, StreamDescriptor};
use std::any::TypeId;

#[test]
fn test_descriptor_reflects_view_direction() {
    // Arrange
    let channel = Channel::<u16>::new();

    // Act
    let send: Handle = channel.sender().into();
    let receive: Handle = channel.receiver().into();
    let both: Handle = channel.into();

    // Assert
    let directions: Vec<Direction> = [send, receive, both]
        .iter()
        .map(|handle| handle.descriptor().map(|d| d.direction()))
        .collect::<Option<_>>()
        .unwrap();
    assert_eq!(
        directions,
        [
            Direction::SendOnly,
            Direction::ReceiveOnly,
            Direction::Bidirectional
        ]
    );
}

#[test]
fn test_descriptor_carries_element_type() {
    let handle: Handle = Channel::<String>::new().receiver().into();

    let descriptor = handle.descriptor().unwrap();

    assert_eq!(descriptor.element(), TypeId::of::<String>());
    assert_eq!(descriptor.element_name(), std::any::type_name::<String>());
}

#[test]
fn test_compatibility_ignores_direction() {
    let send = StreamDescriptor::of::<i32>(Direction::SendOnly);
    let receive = StreamDescriptor::of::<i32>(Direction::ReceiveOnly);
    let other = StreamDescriptor::of::<i64>(Direction::ReceiveOnly);

    assert!(send.is_compatible_with(&receive));
    assert!(!send.is_compatible_with(&other));
    assert_ne!(send, receive);
}

#[test]
fn test_null_and_opaque_have_no_descriptor() {
    // Arrange
    let nil_channel: Option<Channel<i32>> = None;

    // Act
    let handles = [
        Handle::null(),
        Handle::default(),
        nil_channel.into(),
        Handle::opaque(42_u8),
    ];

    // Assert
    assert!(handles[0].is_null());
    assert!(handles[1].is_null());
    assert!(handles[2].is_null());
    assert!(!handles[3].is_null());
    assert!(handles.iter().all(|handle| handle.descriptor().is_none()));
}

#[test]
fn test_some_channel_becomes_stream_handle() {
    let handle: Handle = Some(Channel::<i32>::new()).into();

    assert!(!handle.is_null());
    assert_eq!(
        handle.descriptor().map(|d| d.direction()),
        Some(Direction::Bidirectional)
    );
}

#[test]
fn test_clone_keeps_kind() {
    let handles = [
        Handle::null(),
        Handle::opaque(1_i32),
        Channel::<i32>::new().sender().into(),
    ];

    for handle in &handles {
        let clone = handle.clone();
        assert_eq!(clone.is_null(), handle.is_null());
        assert_eq!(clone.descriptor(), handle.descriptor());
    }
}

#[test]
fn test_debug_output() {
    assert_eq!(format!("{:?}", Handle::null()), "Handle::Null");
    assert_eq!(
        format!("{:?}", Handle::opaque(1_i32)),
        "Handle::Opaque(\"i32\")"
    );

    let stream: Handle = Channel::<i32>::new().receiver().into();
    assert!(format!("{stream:?}").starts_with("Handle::Stream(StreamDescriptor {"));
}

#[test]
fn test_opaque_handle_keeps_wrapped_value_alive() {
    // Arrange
    let (tx, rx) = channel::<i32>();
    let sink = Channel::<i32>::new();
    let wrapped = Handle::opaque(Box::new(tx));

    // Act
    let rejected = run(&sink.sender().into(), &[wrapped.clone()]);

    // Assert
    assert!(rejected.is_err());
    assert!(!rx.is_closed(), "the boxed sender must still be connected");

    drop(wrapped);
    assert!(rx.is_closed());
}
