// SPDX-License-Identifier: MPL-2.0
//! Single-slot overwrite buffer between one producer and one consumer.
//!
//! The producer never waits: each [`LatestSlot::publish`] replaces whatever the
//! consumer has not taken yet. The consumer only ever sees the most recent
//! value, which gives "collect latest" semantics without a queue.

use parking_lot::Mutex;
use tokio::sync::Notify;

#[derive(Debug)]
struct SlotState<T> {
    value: Option<T>,
    closed: bool,
}

/// A mutable slot plus a wake signal.
#[derive(Debug)]
pub struct LatestSlot<T> {
    state: Mutex<SlotState<T>>,
    wake: Notify,
}

impl<T> LatestSlot<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SlotState {
                value: None,
                closed: false,
            }),
            wake: Notify::new(),
        }
    }

    /// Stores `value`, replacing any value the consumer has not taken yet.
    ///
    /// Returns `true` when an unconsumed value was superseded. Values published
    /// after [`close`](Self::close) are discarded.
    pub fn publish(&self, value: T) -> bool {
        let superseded = {
            let mut state = self.state.lock();
            if state.closed {
                return false;
            }
            state.value.replace(value).is_some()
        };
        self.wake.notify_one();
        superseded
    }

    /// Takes the pending value without waiting.
    pub fn try_take(&self) -> Option<T> {
        self.state.lock().value.take()
    }

    /// Waits for the next value.
    ///
    /// Returns `None` once the slot is closed and nothing is pending.
    pub async fn next(&self) -> Option<T> {
        loop {
            {
                let mut state = self.state.lock();
                if let Some(value) = state.value.take() {
                    return Some(value);
                }
                if state.closed {
                    return None;
                }
            }
            // A publish between the check above and this await leaves a stored
            // permit, so the wakeup is not lost.
            self.wake.notified().await;
        }
    }

    /// Refuses further values and wakes the consumer.
    pub fn close(&self) {
        self.state.lock().closed = true;
        self.wake.notify_one();
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }
}

impl<T> Default for LatestSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn publish_overwrites_pending_value() {
        let slot = LatestSlot::new();
        assert!(!slot.publish(1));
        assert!(slot.publish(2));
        assert!(slot.publish(3));
        assert_eq!(slot.try_take(), Some(3));
        assert_eq!(slot.try_take(), None);
    }

    #[test]
    fn publish_after_take_does_not_report_superseded() {
        let slot = LatestSlot::new();
        slot.publish("a");
        assert_eq!(slot.try_take(), Some("a"));
        assert!(!slot.publish("b"));
    }

    #[test]
    fn publish_after_close_is_ignored() {
        let slot = LatestSlot::new();
        slot.close();
        assert!(!slot.publish(true));
        assert_eq!(slot.try_take(), None);
        assert!(slot.is_closed());
    }

    #[tokio::test]
    async fn next_returns_latest_of_a_burst() {
        let slot = LatestSlot::new();
        for value in [true, false, true] {
            slot.publish(value);
        }
        assert_eq!(slot.next().await, Some(true));
    }

    #[tokio::test]
    async fn next_drains_pending_value_before_reporting_close() {
        let slot = LatestSlot::new();
        slot.publish(7);
        slot.close();
        assert_eq!(slot.next().await, Some(7));
        assert_eq!(slot.next().await, None);
    }

    #[tokio::test]
    async fn next_wakes_when_value_is_published_later() {
        let slot = Arc::new(LatestSlot::new());
        let consumer = {
            let slot = Arc::clone(&slot);
            tokio::spawn(async move { slot.next().await })
        };
        tokio::task::yield_now().await;
        slot.publish(42);
        assert_eq!(consumer.await.unwrap(), Some(42));
    }

    #[tokio::test]
    async fn close_wakes_a_waiting_consumer() {
        let slot: Arc<LatestSlot<u8>> = Arc::new(LatestSlot::new());
        let consumer = {
            let slot = Arc::clone(&slot);
            tokio::spawn(async move { slot.next().await })
        };
        tokio::task::yield_now().await;
        slot.close();
        assert_eq!(consumer.await.unwrap(), None);
    }
}
