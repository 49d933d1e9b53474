/// Holds at most one live timer handle. Handles are expected to cancel the
/// underlying timer when dropped, as `gloo_timers::callback::{Interval,
/// Timeout}` do, so replacing or clearing the slot cancels the old timer.
#[derive(Debug)]
pub struct TimerSlot<H> {
    handle: Option<H>,
    starts: u64,
}

impl<H> Default for TimerSlot<H> {
    fn default() -> Self {
        Self {
            handle: None,
            starts: 0,
        }
    }
}

impl<H> TimerSlot<H> {
    /// Cancels any running timer, then stores `handle`.
    pub fn start(&mut self, handle: H) {
        self.stop();
        self.handle = Some(handle);
        self.starts = self.starts.saturating_add(1);
    }

    /// Cancels the running timer, if any. Safe to call repeatedly.
    pub fn stop(&mut self) -> bool {
        self.handle.take().is_some()
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    pub fn starts(&self) -> u64 {
        self.starts
    }
}

pub fn elapsed_label(seconds: u64) -> String {
    format!("Processing time: {seconds}s")
}
