// Copyright 2026 the Tapmark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `setTimeout`-backed debounce timers.

use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Timeout;

use tapmark_core::host::Timers;

/// Schedules one-shot timeouts that all invoke the same callback.
///
/// Dropping a [`Timeout`] clears it, so cancelling is just a drop.
pub struct TimeoutTimers {
    on_fire: Rc<dyn Fn()>,
}

impl core::fmt::Debug for TimeoutTimers {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TimeoutTimers").finish_non_exhaustive()
    }
}

impl TimeoutTimers {
    /// Creates a timer source whose timeouts call `on_fire`.
    pub fn new(on_fire: impl Fn() + 'static) -> Self {
        Self {
            on_fire: Rc::new(on_fire),
        }
    }
}

impl Timers for TimeoutTimers {
    type Handle = Timeout;

    fn schedule(&mut self, delay: Duration) -> Timeout {
        let on_fire = Rc::clone(&self.on_fire);
        Timeout::new(timeout_millis(delay), move || on_fire())
    }

    fn cancel(&mut self, handle: Timeout) {
        drop(handle);
    }
}

/// Converts a delay to the millisecond count `setTimeout` takes.
fn timeout_millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_truncate_and_saturate() {
        assert_eq!(timeout_millis(Duration::from_millis(10)), 10);
        assert_eq!(timeout_millis(Duration::from_micros(100_900)), 100);
        assert_eq!(timeout_millis(Duration::from_secs(u64::MAX)), u32::MAX);
    }
}
