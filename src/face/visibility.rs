//! Visibility tracking: the only mutable state shared across frames.
//!
//! The host pushes [`VisibilityEvent`]s through a [`VisibilityNotifier`] from any thread. The face
//! owns the receiving [`VisibilitySubscription`] and drains it at the start of every frame, so an
//! event sent before a render call is always applied before that frame computes its progress.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::animation::clock::MillisClock;

/// One visibility change reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityEvent {
    /// New visibility state.
    pub visible: bool,
    /// Clock reading when the change happened.
    pub at_ms: u64,
}

/// Host-side sender for visibility changes.
#[derive(Clone)]
pub struct VisibilityNotifier {
    tx: Sender<VisibilityEvent>,
    clock: Arc<dyn MillisClock>,
}

impl std::fmt::Debug for VisibilityNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityNotifier").finish_non_exhaustive()
    }
}

impl VisibilityNotifier {
    /// Report a visibility change stamped with the current clock reading.
    ///
    /// Returns `false` once the face has been torn down and nobody is listening anymore.
    pub fn set_visible(&self, visible: bool) -> bool {
        self.send(VisibilityEvent {
            visible,
            at_ms: self.clock.now_ms(),
        })
    }

    /// Report a pre-stamped event.
    pub fn send(&self, event: VisibilityEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Receiving end of the visibility stream, released exactly once.
#[derive(Debug)]
pub struct VisibilitySubscription {
    rx: Option<Receiver<VisibilityEvent>>,
}

impl VisibilitySubscription {
    /// `true` until [`VisibilitySubscription::release`] has been called.
    pub fn is_active(&self) -> bool {
        self.rx.is_some()
    }

    /// Take every event queued so far without blocking.
    pub fn drain(&mut self) -> Vec<VisibilityEvent> {
        match &self.rx {
            Some(rx) => rx.try_iter().collect(),
            None => Vec::new(),
        }
    }

    /// Drop the receiver. Returns `true` only for the call that actually released it.
    pub fn release(&mut self) -> bool {
        self.rx.take().is_some()
    }
}

/// Create a connected notifier/subscription pair stamping events with `clock`.
pub fn visibility_channel(
    clock: Arc<dyn MillisClock>,
) -> (VisibilityNotifier, VisibilitySubscription) {
    let (tx, rx) = mpsc::channel();
    (
        VisibilityNotifier { tx, clock },
        VisibilitySubscription { rx: Some(rx) },
    )
}

/// Timestamp of the most recent time the face became visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationClock {
    last_visible_ms: u64,
}

impl AnimationClock {
    /// Start the clock as if the face became visible at `at_ms`.
    pub fn new(at_ms: u64) -> Self {
        Self {
            last_visible_ms: at_ms,
        }
    }

    /// Last visibility timestamp in milliseconds.
    pub fn last_visible_ms(&self) -> u64 {
        self.last_visible_ms
    }

    /// Signed milliseconds between the last visibility event and `now_ms`.
    pub fn elapsed_ms(&self, now_ms: u64) -> i64 {
        let now = i128::from(now_ms);
        let last = i128::from(self.last_visible_ms);
        (now - last).clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }

    fn mark_visible(&mut self, at_ms: u64, now_ms: u64) {
        self.last_visible_ms = at_ms.min(now_ms);
    }
}

/// Applies visibility events to the [`AnimationClock`].
#[derive(Debug)]
pub struct VisibilityTracker {
    clock: AnimationClock,
    subscription: VisibilitySubscription,
    visible: bool,
}

impl VisibilityTracker {
    /// Track `subscription`, starting the animation clock at `now_ms`.
    pub fn new(subscription: VisibilitySubscription, now_ms: u64) -> Self {
        Self {
            clock: AnimationClock::new(now_ms),
            subscription,
            visible: false,
        }
    }

    /// Current animation clock.
    pub fn clock(&self) -> AnimationClock {
        self.clock
    }

    /// Last reported visibility state.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// `true` while the subscription has not been released.
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_active()
    }

    /// Apply queued events. Only a hidden-to-visible edge restarts the animation clock.
    ///
    /// Returns the number of restarts applied.
    pub fn pump(&mut self, now_ms: u64) -> usize {
        let mut restarts = 0;
        for event in self.subscription.drain() {
            if event.visible && !self.visible {
                self.clock.mark_visible(event.at_ms, now_ms);
                restarts += 1;
                tracing::debug!(
                    at_ms = event.at_ms,
                    last_visible_ms = self.clock.last_visible_ms(),
                    "face became visible"
                );
            }
            self.visible = event.visible;
        }
        restarts
    }

    /// Release the subscription. Returns `true` only on the first call.
    pub fn release(&mut self) -> bool {
        self.subscription.release()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/face/visibility.rs"]
mod tests;
