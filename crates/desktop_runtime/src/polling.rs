//! Cancellable repeating timers for window-scoped background work.

use std::time::Duration;

use leptos::{leptos_dom::helpers::IntervalHandle, set_interval_with_handle};

/// Interval timer that is cleared on [`RepeatingTask::cancel`] or when dropped, so an owner going
/// away can never leave an orphaned tick behind.
pub struct RepeatingTask {
    handle: Option<IntervalHandle>,
}

impl RepeatingTask {
    /// Schedules `tick` every `every`.
    ///
    /// # Errors
    ///
    /// Returns the host's description when the interval could not be installed.
    pub fn start(every: Duration, tick: impl Fn() + 'static) -> Result<Self, String> {
        let handle = set_interval_with_handle(tick, every)
            .map_err(|err| format!("interval install failed: {err:?}"))?;
        Ok(Self {
            handle: Some(handle),
        })
    }

    /// Stops the timer. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.clear();
        }
    }
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
