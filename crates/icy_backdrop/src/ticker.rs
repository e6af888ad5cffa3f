//! Frame tick distribution.
//!
//! The backdrop never talks to the windowing layer directly. It subscribes a
//! callback on a [`FrameScheduler`]; the application decides where ticks come
//! from (usually `window::frames()`) and forwards them with [`FrameClock::fire`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use parking_lot::Mutex;

pub type FrameCallback = Box<dyn FnMut(Instant) + Send>;

/// Identifies one registration on a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

impl SubscriptionHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

pub trait FrameScheduler: Send + Sync {
    fn subscribe(&self, callback: FrameCallback) -> SubscriptionHandle;

    /// Returns false if the handle was not (or no longer) registered.
    fn unsubscribe(&self, handle: SubscriptionHandle) -> bool;
}

/// Callback registry fired once per displayed frame.
///
/// Callbacks run on the firing thread while the registry is locked, so they
/// must not subscribe or unsubscribe on the same clock.
#[derive(Default)]
pub struct FrameClock {
    next_id: AtomicU64,
    callbacks: Mutex<Vec<(u64, FrameCallback)>>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invokes every subscribed callback once. Returns the number of callbacks run.
    pub fn fire(&self, now: Instant) -> usize {
        let mut callbacks = self.callbacks.lock();
        for (_, callback) in callbacks.iter_mut() {
            callback(now);
        }
        callbacks.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.callbacks.lock().len()
    }

    /// True while at least one callback wants frames.
    pub fn is_active(&self) -> bool {
        self.subscriber_count() > 0
    }
}

impl FrameScheduler for FrameClock {
    fn subscribe(&self, callback: FrameCallback) -> SubscriptionHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.callbacks.lock().push((id, callback));
        SubscriptionHandle(id)
    }

    fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        let mut callbacks = self.callbacks.lock();
        let before = callbacks.len();
        callbacks.retain(|(id, _)| *id != handle.0);
        callbacks.len() != before
    }
}

impl std::fmt::Debug for FrameClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameClock").field("subscribers", &self.subscriber_count()).finish()
    }
}
