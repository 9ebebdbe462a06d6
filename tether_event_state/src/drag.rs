// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press/drag gesture state: record the press, promote to a drag, release.
//!
//! ## Usage
//!
//! 1) On a button press call [`PressGesture::press`] with the press-time
//!    positions.
//! 2) Every frame while pressed, test the movement against a threshold (see
//!    [`exceeds_screen_threshold`] and
//!    [`Configuration::exceeds_drag_threshold`](crate::config::Configuration::exceeds_drag_threshold))
//!    and call [`PressGesture::promote`] when it is exceeded.
//! 3) On release call [`PressGesture::release`] and act on the returned [`Release`].
//!
//! Click eligibility lives in the phase itself: only [`GesturePhase::Pressed`]
//! can be click-eligible, so a dragging gesture can never produce a click.
//!
//! ## Minimal example
//!
//! ```
//! use glam::DVec3;
//! use kurbo::Point;
//! use tether_event_state::drag::{PressGesture, PressPose};
//!
//! let mut gesture = PressGesture::default();
//! gesture.press(PressPose {
//!     screen: Point::new(100.0, 100.0),
//!     spatial: DVec3::ZERO,
//!     spatial_target: DVec3::ZERO,
//!     distance: 2.0,
//!     segment_index: 0,
//! });
//! assert!(gesture.eligible_for_click());
//!
//! assert!(gesture.promote());
//! assert!(gesture.is_dragging());
//! assert!(!gesture.eligible_for_click());
//!
//! let release = gesture.release().unwrap();
//! assert!(release.was_dragging);
//! assert!(!release.click);
//! ```

use glam::DVec3;
use kurbo::Point;

/// Where the pointer was when the button went down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PressPose {
    /// Screen-space position at press.
    pub screen: Point,
    /// Resolved spatial position at press.
    pub spatial: DVec3,
    /// Spatial target position at press.
    pub spatial_target: DVec3,
    /// Ray distance to the pressed point.
    pub distance: f64,
    /// Ray polyline segment that produced the press hit.
    pub segment_index: usize,
}

/// Phase of a press gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GesturePhase {
    /// No button held.
    #[default]
    Idle,
    /// Button held, not yet dragging.
    Pressed {
        /// Whether a release would count as a click.
        eligible_for_click: bool,
    },
    /// Button held and the press was promoted to a drag.
    Dragging,
}

/// Outcome of [`PressGesture::release`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Release {
    /// The press was still click-eligible.
    pub click: bool,
    /// The press had been promoted to a drag.
    pub was_dragging: bool,
}

/// Tracks one pointer's press and drag.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PressGesture {
    phase: GesturePhase,
    pose: Option<PressPose>,
}

impl PressGesture {
    /// Current phase.
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Press-time positions while a press is active.
    pub fn pose(&self) -> Option<&PressPose> {
        self.pose.as_ref()
    }

    /// Returns `true` while the button is held (pressed or dragging).
    pub fn is_pressed(&self) -> bool {
        !matches!(self.phase, GesturePhase::Idle)
    }

    /// Returns `true` once the press was promoted to a drag.
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, GesturePhase::Dragging)
    }

    /// Whether releasing now would count as a click.
    pub fn eligible_for_click(&self) -> bool {
        matches!(
            self.phase,
            GesturePhase::Pressed {
                eligible_for_click: true
            }
        )
    }

    /// Start a press. Any previous press is discarded.
    pub fn press(&mut self, pose: PressPose) {
        self.phase = GesturePhase::Pressed {
            eligible_for_click: true,
        };
        self.pose = Some(pose);
    }

    /// Promote a held press to a drag.
    ///
    /// Returns `true` only on the transition; idle or already dragging
    /// gestures are left alone.
    pub fn promote(&mut self) -> bool {
        if let GesturePhase::Pressed { .. } = self.phase {
            self.phase = GesturePhase::Dragging;
            true
        } else {
            false
        }
    }

    /// Abandon a drag while keeping the button held.
    ///
    /// Used when another pointer takes over the dragged object. The gesture
    /// returns to a non-clickable press so that releasing fires neither a click
    /// nor an end of drag.
    pub fn abandon_drag(&mut self) {
        if self.is_dragging() {
            self.phase = GesturePhase::Pressed {
                eligible_for_click: false,
            };
        }
    }

    /// End the press and return what happened, or `None` if nothing was pressed.
    pub fn release(&mut self) -> Option<Release> {
        let release = match self.phase {
            GesturePhase::Idle => return None,
            GesturePhase::Pressed { eligible_for_click } => Release {
                click: eligible_for_click,
                was_dragging: false,
            },
            GesturePhase::Dragging => Release {
                click: false,
                was_dragging: true,
            },
        };
        self.phase = GesturePhase::Idle;
        self.pose = None;
        Some(release)
    }
}

/// Whether the squared screen distance between `press` and `current` reaches
/// `pixels` squared.
pub fn exceeds_screen_threshold(press: Point, current: Point, pixels: f64) -> bool {
    (current - press).hypot2() >= pixels * pixels
}
