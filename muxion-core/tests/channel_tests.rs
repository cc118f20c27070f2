// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::{FutureExt, StreamExt};
use muxion_core::{channel, Channel, SendError};
use std::time::Duration;
use tokio::time::{sleep, timeout};

#[tokio::test]
async fn test_send_completes_only_after_receive() -> anyhow::Result<()> {
    // Arrange
    let (tx, rx) = channel::<i32>();

    // Act
    let producer = tokio::spawn(async move { tx.send(666).await });
    sleep(Duration::from_millis(50)).await;

    // Assert
    assert!(!producer.is_finished(), "send must wait for a receiver");
    assert_eq!(rx.recv().await, Some(666));
    assert!(producer.await?.is_ok());

    Ok(())
}

#[tokio::test]
async fn test_recv_waits_for_a_sender() -> anyhow::Result<()> {
    // Arrange
    let channel = Channel::<&str>::new();
    let receiver = channel.receiver();

    // Act
    let consumer = tokio::spawn(async move { receiver.recv().await });
    sleep(Duration::from_millis(50)).await;
    assert!(!consumer.is_finished(), "recv must wait for a sender");
    channel.send("lambda").await?;

    // Assert
    assert_eq!(consumer.await?, Some("lambda"));

    Ok(())
}

#[tokio::test]
async fn test_recv_returns_none_after_close() {
    // Arrange
    let channel = Channel::<i32>::new();

    // Act
    channel.close();

    // Assert
    assert_eq!(channel.recv().await, None);
    assert!(channel.is_closed());
}

#[tokio::test]
async fn test_close_wakes_pending_receiver() -> anyhow::Result<()> {
    // Arrange
    let channel = Channel::<i32>::new();
    let receiver = channel.receiver();
    let consumer = tokio::spawn(async move { receiver.recv().await });
    sleep(Duration::from_millis(20)).await;

    // Act
    channel.close();

    // Assert
    assert_eq!(timeout(Duration::from_millis(500), consumer).await??, None);

    Ok(())
}

#[test]
fn test_close_reports_only_the_first_call() {
    let (tx, _rx) = channel::<i32>();
    let other = tx.clone();

    assert!(tx.close());
    assert!(!tx.close());
    assert!(!other.close());
    assert!(other.is_closed());
}

#[tokio::test]
async fn test_send_on_closed_channel_returns_value() {
    // Arrange
    let (tx, _rx) = channel::<String>();
    tx.close();

    // Act
    let result = tx.send("kept".to_string()).await;

    // Assert
    assert_eq!(result, Err(SendError("kept".to_string())));
}

#[tokio::test]
async fn test_close_withdraws_pending_offer() -> anyhow::Result<()> {
    // Arrange
    let (tx, rx) = channel::<i32>();
    let closer = tx.clone();
    let producer = tokio::spawn(async move { tx.send(7).await });
    sleep(Duration::from_millis(20)).await;

    // Act
    closer.close();

    // Assert
    let result = timeout(Duration::from_millis(500), producer).await??;
    assert_eq!(result.map_err(SendError::into_inner), Err(7));
    assert_eq!(rx.recv().await, None);

    Ok(())
}

#[tokio::test]
async fn test_send_fails_when_every_receiver_is_dropped() -> anyhow::Result<()> {
    // Arrange
    let (tx, rx) = channel::<i32>();
    let producer = tokio::spawn(async move { tx.send(1).await });
    sleep(Duration::from_millis(20)).await;

    // Act
    drop(rx);

    // Assert
    let result = timeout(Duration::from_millis(500), producer).await??;
    assert!(result.is_err());

    Ok(())
}

#[tokio::test]
async fn test_recv_returns_none_when_every_sender_is_dropped() {
    // Arrange
    let (tx, rx) = channel::<i32>();
    let second = tx.clone();

    // Act
    drop(tx);
    assert!(!rx.is_closed(), "one sender is still attached");
    drop(second);

    // Assert
    assert!(rx.is_closed());
    assert_eq!(rx.recv().await, None);
}

#[tokio::test]
async fn test_dropped_send_withdraws_offer() -> anyhow::Result<()> {
    // Arrange
    let (tx, rx) = channel::<i32>();

    // Act
    let attempt = timeout(Duration::from_millis(20), tx.send(1)).await;
    let producer = tokio::spawn(async move { tx.send(2).await });

    // Assert
    assert!(attempt.is_err(), "nobody was receiving");
    assert_eq!(rx.recv().await, Some(2));
    assert!(producer.await?.is_ok());

    Ok(())
}

#[tokio::test]
async fn test_concurrent_senders_deliver_each_value_once_in_per_sender_order(
) -> anyhow::Result<()> {
    // Arrange
    let (tx, rx) = channel::<(usize, usize)>();
    let producers: Vec<_> = (0..4)
        .map(|producer| {
            let tx = tx.clone();
            tokio::spawn(async move {
                for sequence in 0..25 {
                    tx.send((producer, sequence)).await.unwrap();
                }
            })
        })
        .collect();
    drop(tx);

    // Act
    let received: Vec<(usize, usize)> = rx.into_stream().collect().await;

    // Assert
    for producer in producers {
        producer.await?;
    }
    assert_eq!(received.len(), 100);
    for producer in 0..4 {
        let sequences: Vec<usize> = received
            .iter()
            .filter(|(from, _)| *from == producer)
            .map(|(_, sequence)| *sequence)
            .collect();
        assert_eq!(sequences, (0..25).collect::<Vec<_>>());
    }

    Ok(())
}

#[tokio::test]
async fn test_each_value_is_taken_by_exactly_one_receiver() -> anyhow::Result<()> {
    // Arrange
    let (tx, rx) = channel::<u32>();
    let consumers: Vec<_> = (0..3)
        .map(|_| {
            let rx = rx.clone();
            tokio::spawn(async move {
                let mut taken = Vec::new();
                while let Some(value) = rx.recv().await {
                    taken.push(value);
                }
                taken
            })
        })
        .collect();
    drop(rx);

    // Act
    for value in 0..30 {
        tx.send(value).await?;
    }
    tx.close();

    // Assert
    let mut all = Vec::new();
    for consumer in consumers {
        all.extend(consumer.await?);
    }
    all.sort_unstable();
    assert_eq!(all, (0..30).collect::<Vec<_>>());

    Ok(())
}

#[test]
fn test_views_share_one_channel() {
    let (other_tx, other_rx) = channel::<i32>();
    let shared = Channel::<i32>::new();

    assert!(shared.sender().same_channel(&shared.sender()));
    assert!(shared.receiver().same_channel(&shared.receiver()));
    assert!(!shared.sender().same_channel(&other_tx));
    assert!(!shared.receiver().same_channel(&other_rx));

    shared.sender().close();
    assert!(shared.is_closed());
    assert!(shared.receiver().is_closed());
}

#[test]
fn test_debug_names_element_type() {
    let channel = Channel::<u64>::new();

    assert!(format!("{channel:?}").contains("u64"));
    assert!(format!("{:?}", channel.sender()).starts_with("Sender"));
    assert!(format!("{:?}", channel.receiver()).starts_with("Receiver"));
}

#[tokio::test]
async fn test_split_views_carry_the_channel() -> anyhow::Result<()> {
    // Arrange
    let (tx, rx) = Channel::<i32>::new().split();

    // Act
    let producer = tokio::spawn(async move { tx.send(5).await });

    // Assert
    assert_eq!(rx.recv().await, Some(5));
    assert!(producer.await?.is_ok());
    // The split sender was the last one and is gone with the task.
    assert_eq!(rx.recv().await, None);

    Ok(())
}

#[tokio::test]
async fn test_dropped_send_after_take_stays_delivered() -> anyhow::Result<()> {
    // Arrange
    let (tx, rx) = channel::<i32>();
    let mut send = Box::pin(tx.send(9));
    assert!(send.as_mut().now_or_never().is_none());

    // Act
    let taken = rx.recv().await;
    drop(send);

    // Assert
    assert_eq!(taken, Some(9));
    let producer = tokio::spawn(async move { tx.send(10).await });
    assert_eq!(rx.recv().await, Some(10));
    assert!(producer.await?.is_ok());

    Ok(())
}
