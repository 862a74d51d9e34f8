//! Resize debouncing.
//!
//! Canvas resize notifications arrive in bursts. Each new one pushes the
//! deadline back; the relayout runs once, with the last size, after the
//! canvas has been quiet for the whole window.

use std::time::Duration;

use tokio::time::Instant;

use minispace_domain::geometry::CanvasSize;

pub const DEFAULT_WINDOW: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    window: Duration,
    pending: Option<(Instant, CanvasSize)>,
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl ResizeDebouncer {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Record a resize observed at `now`, superseding any pending one.
    pub fn record(&mut self, size: CanvasSize, now: Instant) {
        self.pending = Some((now + self.window, size));
    }

    /// When the pending resize becomes due.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(deadline, _)| deadline)
    }

    /// The size to lay out for, once the quiet window has elapsed.
    pub fn take_due(&mut self, now: Instant) -> Option<CanvasSize> {
        match self.pending {
            Some((deadline, size)) if deadline <= now => {
                self.pending = None;
                Some(size)
            }
            _ => None,
        }
    }
}
