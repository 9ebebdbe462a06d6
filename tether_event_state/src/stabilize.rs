// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positional stabilization and smoothing for tracked 3D pointers.
//!
//! Hand tremor moves a far-away ray hit by centimetres even when the user means
//! to hold still. Two filters address this:
//!
//! - [`Stabilizer`] is a dead-zone that trails the raw input. While the raw
//!   position stays within `radius` of the stabilized one nothing moves; once
//!   it leaves, the stabilized position follows just enough to keep the raw
//!   position on the edge of the radius.
//! - [`smooth`] is an exponential filter between the previous output and the
//!   stabilized value.
//!
//! ## Smoothing time convention
//!
//! [`smooth`] computes `lerp(previous, target, 1 - smoothing_time^dt)`. A
//! `smoothing_time` near `0` therefore lands almost on `target` every frame
//! (little smoothing) and a value near `1` barely moves (heavy smoothing).
//! A value of `0` disables the filter and snaps to `target`. Tuned constants
//! depend on this exact shape, so it is not re-parameterized.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use glam::DVec3;

/// Dead-zone filter over a 3D position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stabilizer {
    position: Option<DVec3>,
}

impl Stabilizer {
    /// Create a stabilizer with no history; the first input passes through.
    pub fn new() -> Self {
        Self { position: None }
    }

    /// The last stabilized position.
    pub fn position(&self) -> Option<DVec3> {
        self.position
    }

    /// Restart the filter at `position`.
    pub fn reset(&mut self, position: DVec3) {
        self.position = Some(position);
    }

    /// Forget the history.
    pub fn clear(&mut self) {
        self.position = None;
    }

    /// Feed a raw position and return the stabilized one.
    ///
    /// With `delta = raw - previous`: if `|delta| >= radius` the stabilized
    /// position advances by `delta - normalize(delta) * radius`, otherwise it
    /// stays where it is.
    pub fn stabilize(&mut self, raw: DVec3, radius: f64) -> DVec3 {
        let previous = self.position.unwrap_or(raw);
        let delta = raw - previous;
        let length = delta.length();
        let next = if length > 0.0 && length >= radius {
            previous + (delta - delta / length * radius)
        } else {
            previous
        };
        self.position = Some(next);
        next
    }
}

/// Exponential smoothing step between `previous` and `target`.
///
/// See the [module docs](self) for the meaning of `smoothing_time`.
pub fn smooth(previous: DVec3, target: DVec3, smoothing_time: f64, delta_time: f64) -> DVec3 {
    if smoothing_time > 0.0 {
        previous.lerp(target, 1.0 - smoothing_time.powf(delta_time))
    } else {
        target
    }
}
