// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic detached task spawning.
//!
//! The runtime is picked by feature flag, in priority order:
//!
//! - **Tokio**: `tokio::spawn` (`runtime-tokio`, default)
//! - **smol**: `smol::spawn` (`runtime-smol`)
//! - **async-std**: `async_std::task::spawn` (`runtime-async-std`)

use core::future::Future;

#[cfg(not(any(
    feature = "runtime-tokio",
    feature = "runtime-smol",
    feature = "runtime-async-std"
)))]
compile_error!(
    "muxion-core needs one of the `runtime-tokio`, `runtime-smol` or `runtime-async-std` features"
);

/// Run `future` in the background on the configured runtime.
///
/// The task is detached: nothing waits for it and nothing can abort it.
///
/// # Panics
///
/// With `runtime-tokio`, panics when called outside of a Tokio runtime.
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    #[cfg(feature = "runtime-tokio")]
    tokio::spawn(future);

    #[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
    smol::spawn(future).detach();

    #[cfg(all(
        feature = "runtime-async-std",
        not(feature = "runtime-tokio"),
        not(feature = "runtime-smol")
    ))]
    async_std::task::spawn(future);
}
