// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click counting: consecutive presses on the same target within a window.
//!
//! A press on the same target as the previous press, less than
//! [`ClickCounter::window`] seconds later, increments the count. Anything else
//! (a different target, no target, or a slower press) resets it to 1.
//!
//! ```
//! use tether_event_state::click::ClickCounter;
//!
//! let mut clicks = ClickCounter::new();
//! assert_eq!(clicks.on_press(Some(7_u32), 10.0), 1);
//! assert_eq!(clicks.on_press(Some(7), 10.2), 2);
//! assert_eq!(clicks.on_press(Some(7), 11.0), 1);
//! ```

/// Default click-speed window in seconds.
pub const DEFAULT_CLICK_WINDOW: f64 = 0.3;

/// Tracks the last press target and time to derive a click count.
#[derive(Clone, Debug, PartialEq)]
pub struct ClickCounter<K> {
    window: f64,
    last_target: Option<K>,
    last_time: Option<f64>,
    count: u32,
}

impl<K: Copy + PartialEq> Default for ClickCounter<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + PartialEq> ClickCounter<K> {
    /// Create a counter using [`DEFAULT_CLICK_WINDOW`].
    pub fn new() -> Self {
        Self::with_window(DEFAULT_CLICK_WINDOW)
    }

    /// Create a counter with a custom click-speed window (seconds).
    pub fn with_window(window: f64) -> Self {
        Self {
            window,
            last_target: None,
            last_time: None,
            count: 0,
        }
    }

    /// The click-speed window in seconds.
    pub fn window(&self) -> f64 {
        self.window
    }

    /// The count produced by the most recent press (0 before any press).
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Timestamp of the most recent press.
    pub fn last_time(&self) -> Option<f64> {
        self.last_time
    }

    /// Record a press on `target` at `now` (seconds) and return the click count.
    pub fn on_press(&mut self, target: Option<K>, now: f64) -> u32 {
        let repeated = target.is_some()
            && target == self.last_target
            && self.last_time.is_some_and(|t| now - t < self.window);
        self.count = if repeated { self.count + 1 } else { 1 };
        self.last_target = target;
        self.last_time = Some(now);
        self.count
    }

    /// Forget the previous press so the next one starts a new sequence.
    pub fn reset(&mut self) {
        self.last_target = None;
        self.last_time = None;
        self.count = 0;
    }
}
