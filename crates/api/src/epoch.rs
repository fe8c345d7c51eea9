use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Guards against stale responses: each load takes a ticket, and starting a
/// newer load (or navigating away) invalidates every older ticket.
#[derive(Debug, Clone, Default)]
pub struct RequestEpoch {
    current: Arc<AtomicU64>,
}

/// Proof that a load was started at a particular epoch.
#[derive(Debug, Clone)]
pub struct Ticket {
    epoch: Arc<AtomicU64>,
    value: u64,
}

impl RequestEpoch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load, invalidating all outstanding tickets.
    pub fn begin(&self) -> Ticket {
        let value = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            epoch: Arc::clone(&self.current),
            value,
        }
    }

    /// Invalidate all outstanding tickets without starting a load.
    pub fn cancel(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.epoch.load(Ordering::SeqCst) == self.value
    }

    /// Pass a result through only if this ticket is still current.
    pub fn accept<T>(&self, result: T) -> Option<T> {
        if self.is_current() {
            Some(result)
        } else {
            tracing::debug!(ticket = self.value, "discarding stale response");
            None
        }
    }
}
