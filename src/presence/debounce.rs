//! Coalesces bursts of update requests into one reconciliation pass

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;

/// Delay between the first request and the resulting pass
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(1500);

struct Slot {
    pending: AtomicBool,
    notify: Notify,
}

/// Single-slot update signal. At most one pass is pending at any time;
/// requests made while one is pending are absorbed into it.
#[derive(Clone)]
pub struct UpdateScheduler {
    slot: Arc<Slot>,
}

impl UpdateScheduler {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Slot {
                pending: AtomicBool::new(false),
                notify: Notify::new(),
            }),
        }
    }

    /// Arms the slot. Returns `false` when a pass was already pending.
    pub fn request_update(&self) -> bool {
        if self.slot.pending.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.slot.notify.notify_one();
        true
    }

    pub fn is_pending(&self) -> bool {
        self.slot.pending.load(Ordering::Acquire)
    }

    /// Waits for a request, then for the window to close. The slot is
    /// released at fire time so requests made during the pass arm the next one.
    async fn next_fire(&self, window: Duration) {
        self.slot.notify.notified().await;
        tokio::time::sleep(window).await;
        self.slot.pending.store(false, Ordering::Release);
    }

    /// Drives `pass` forever, once per fired window
    pub async fn run<F, Fut>(&self, window: Duration, mut pass: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        loop {
            self.next_fire(window).await;
            pass().await;
        }
    }
}

impl Default for UpdateScheduler {
    fn default() -> Self {
        Self::new()
    }
}
