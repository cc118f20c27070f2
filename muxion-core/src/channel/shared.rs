// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use event_listener::Event;
use parking_lot::Mutex;

/// State shared by every view of one rendezvous channel.
///
/// The channel has a single slot. A sender parks its value there and waits
/// until a receiver has taken it; other senders wait for the slot to be
/// vacated before offering their own value.
pub(super) struct Shared<T> {
    pub(super) state: Mutex<State<T>>,
    /// Signalled when a value is offered, the channel closes, or the last sender leaves.
    pub(super) offered: Event,
    /// Signalled when the slot is vacated, the channel closes, or the last receiver leaves.
    pub(super) vacated: Event,
}

pub(super) struct State<T> {
    pub(super) slot: Option<T>,
    /// Number of offers made so far; the offer currently in the slot has ticket `offers`.
    pub(super) offers: u64,
    /// Ticket of the most recently taken offer.
    pub(super) taken: u64,
    pub(super) closed: bool,
    pub(super) senders: usize,
    pub(super) receivers: usize,
}

impl<T> Shared<T> {
    pub(super) fn new() -> Self {
        Self {
            state: Mutex::new(State {
                slot: None,
                offers: 0,
                taken: 0,
                closed: false,
                senders: 0,
                receivers: 0,
            }),
            offered: Event::new(),
            vacated: Event::new(),
        }
    }

    /// Close the channel, waking every waiter.
    ///
    /// Returns `true` only for the call that performed the transition.
    pub(super) fn close(&self) -> bool {
        {
            let mut state = self.state.lock();
            if state.closed {
                return false;
            }
            state.closed = true;
        }
        self.offered.notify(usize::MAX);
        self.vacated.notify(usize::MAX);
        true
    }

    pub(super) fn attach_sender(&self) {
        self.state.lock().senders += 1;
    }

    pub(super) fn detach_sender(&self) {
        let last = {
            let mut state = self.state.lock();
            state.senders -= 1;
            state.senders == 0
        };
        if last {
            self.offered.notify(usize::MAX);
        }
    }

    pub(super) fn attach_receiver(&self) {
        self.state.lock().receivers += 1;
    }

    pub(super) fn detach_receiver(&self) {
        let last = {
            let mut state = self.state.lock();
            state.receivers -= 1;
            state.receivers == 0
        };
        if last {
            self.vacated.notify(usize::MAX);
        }
    }
}
