// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use muxion::{Receiver, Sender};
use std::fmt::Debug;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};

/// Receive the next value, panicking if nothing arrives within `timeout_ms`.
///
/// Returns `None` if the channel closed in time.
pub async fn recv_within<T>(receiver: &Receiver<T>, timeout_ms: u64) -> Option<T> {
    match timeout(Duration::from_millis(timeout_ms), receiver.recv()).await {
        Ok(value) => value,
        Err(_) => panic!("no value or close within {timeout_ms}ms"),
    }
}

/// Receive the next value, panicking on timeout or if the channel closed.
pub async fn unwrap_recv<T>(receiver: &Receiver<T>, timeout_ms: u64) -> T {
    recv_within(receiver, timeout_ms)
        .await
        .expect("channel closed, expected a value")
}

/// Assert that the channel is closed, or closes within `timeout_ms`, without yielding a value.
pub async fn assert_closed_within<T: Debug>(receiver: &Receiver<T>, timeout_ms: u64) {
    if let Some(value) = recv_within(receiver, timeout_ms).await {
        panic!("expected the channel to close, received {value:?}");
    }
}

/// Assert that no value is received for `timeout_ms`.
pub async fn assert_no_element_emitted<T: Debug>(receiver: &Receiver<T>, timeout_ms: u64) {
    tokio::select! {
        value = receiver.recv() => {
            panic!("Unexpected element emitted, expected no output, got {value:?}");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}

/// Assert that offering `value` does not complete within `timeout_ms`.
///
/// The offer is withdrawn afterwards, so nobody can receive `value` later.
pub async fn assert_send_blocks<T>(sender: &Sender<T>, value: T, timeout_ms: u64) {
    let attempt = timeout(Duration::from_millis(timeout_ms), sender.send(value)).await;
    assert!(
        attempt.is_err(),
        "send completed, expected it to block: nobody should be receiving"
    );
}

/// Drain `receiver` until it closes, panicking if that takes longer than `timeout_ms`.
pub async fn collect_until_closed<T>(receiver: &Receiver<T>, timeout_ms: u64) -> Vec<T> {
    let drain = async {
        let mut values = Vec::new();
        while let Some(value) = receiver.recv().await {
            values.push(value);
        }
        values
    };

    match timeout(Duration::from_millis(timeout_ms), drain).await {
        Ok(values) => values,
        Err(_) => panic!("channel did not close within {timeout_ms}ms"),
    }
}

/// Spawn a producer that sends `values` round-robin over `sources`, then closes them all.
///
/// Value `i` goes to source `i % sources.len()`.
///
/// # Panics
///
/// The spawned task panics if a send fails.
pub fn feed_round_robin<T>(sources: Vec<Sender<T>>, values: Vec<T>) -> JoinHandle<()>
where
    T: Send + 'static,
{
    tokio::spawn(async move {
        if !sources.is_empty() {
            for (index, value) in values.into_iter().enumerate() {
                let source = &sources[index % sources.len()];
                assert!(source.send(value).await.is_ok(), "source #{index} refused a value");
            }
        }
        for source in &sources {
            source.close();
        }
    })
}
