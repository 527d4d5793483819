// SPDX-License-Identifier: MPL-2.0
//! Window resize debouncing.
//!
//! Resize events arrive in bursts while the user drags a window edge. The
//! debouncer keeps only the latest size and releases it once no new event
//! has arrived for the configured delay. Time is passed in explicitly so the
//! host decides how it is driven (a periodic tick, a timer subscription).

use crate::domain::layout::ContainerSize;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    size: ContainerSize,
    last_event: Instant,
}

/// Collapses bursts of container resizes into one.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    delay: Duration,
    pending: Option<Pending>,
}

impl ResizeDebouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records a resize event, restarting the quiet period.
    pub fn push(&mut self, size: ContainerSize, at: Instant) {
        self.pending = Some(Pending {
            size,
            last_event: at,
        });
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the latest size once the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<ContainerSize> {
        let pending = self.pending?;
        if now.saturating_duration_since(pending.last_event) < self.delay {
            return None;
        }
        self.pending = None;
        Some(pending.size)
    }

    /// Drops any pending resize.
    pub fn clear(&mut self) {
        self.pending = None;
    }
}
