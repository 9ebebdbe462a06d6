// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pointer interaction configuration and reticle hints.
//!
//! A [`Configuration`] is a plain value. Pointers start with a router-wide
//! default and swap in the configuration supplied by whatever addressable
//! object they enter. Values are replaced as a whole, never merged.
//!
//! ```
//! use tether_event_state::config::Configuration;
//!
//! let far_panel = Configuration {
//!     stabilization_radius: 0.02,
//!     ..Configuration::default()
//! };
//! assert!(far_panel.validate().is_ok());
//!
//! // Beyond the reference distance the radius grows linearly.
//! assert!(far_panel.stabilization_radius_at(6.0) > far_panel.stabilization_radius_at(1.0));
//! ```

use alloc::sync::Arc;
use core::fmt;

use glam::DVec3;

use crate::distance_scaled;

/// Inputs handed to a [`PositionOverride`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionQuery {
    /// Origin of the ray segment in use.
    pub ray_origin: DVec3,
    /// Normalized direction of the ray segment in use.
    pub ray_direction: DVec3,
    /// World point of the current valid raycast hit.
    pub hit_point: Option<DVec3>,
    /// Current spatial drag distance along the ray.
    pub distance: f64,
    /// Current resolved position before this frame's update.
    pub previous: DVec3,
    /// Whether the pointer's button is held.
    pub pressed: bool,
    /// Whether the press has been promoted to a drag.
    pub dragging: bool,
    /// Seconds since the previous frame.
    pub delta_time: f64,
}

/// A current/target position pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedPosition {
    /// Position the pointer is displayed at this frame.
    pub current: DVec3,
    /// Position the pointer is heading to (used for drag thresholds).
    pub target: DVec3,
}

/// Inputs handed to a [`DragThresholdOverride`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragThresholdQuery {
    /// Spatial target position recorded at press.
    pub press_target: DVec3,
    /// Spatial target position this frame.
    pub current_target: DVec3,
    /// Ray distance recorded at press.
    pub press_distance: f64,
    /// Distance-corrected threshold the default test would use.
    pub threshold: f64,
}

/// Custom position strategy. Returning `None` falls back to the default strategy.
pub type PositionOverride = Arc<dyn Fn(&PositionQuery) -> Option<ResolvedPosition> + Send + Sync>;

/// Custom drag-threshold test. Returns `true` when the press should become a drag.
pub type DragThresholdOverride = Arc<dyn Fn(&DragThresholdQuery) -> bool + Send + Sync>;

/// Errors reported by [`Configuration::validate`].
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A distance field is negative or not finite.
    #[error("`{field}` must be a finite, non-negative distance (got {value})")]
    InvalidDistance {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The smoothing time constant lies outside `[0, 1)`.
    #[error("smoothing time must lie in [0, 1) (got {0})")]
    SmoothingTime(f64),
}

/// Interaction tuning for one pointer.
#[derive(Clone)]
pub struct Configuration {
    /// Base spatial drag threshold in metres.
    pub drag_threshold: f64,
    /// Distance beyond which the drag threshold grows linearly.
    pub min_drag_threshold_reference_distance: f64,
    /// Base stabilization dead-zone radius in metres.
    pub stabilization_radius: f64,
    /// Distance beyond which the stabilization radius grows linearly.
    pub min_stabilization_reference_distance: f64,
    /// Exponential smoothing constant; see [`crate::stabilize::smooth`].
    pub smoothing_time: f64,
    /// Snap the spatial position back to the press position when a drag starts.
    pub start_drag_from_press_position: bool,
    /// Replaces the World-domain position strategy.
    pub position_override: Option<PositionOverride>,
    /// Replaces the spatial drag-threshold test.
    pub drag_threshold_override: Option<DragThresholdOverride>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            drag_threshold: 0.05,
            min_drag_threshold_reference_distance: 2.0,
            stabilization_radius: 0.01,
            min_stabilization_reference_distance: 2.0,
            smoothing_time: 0.0,
            start_drag_from_press_position: true,
            position_override: None,
            drag_threshold_override: None,
        }
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("drag_threshold", &self.drag_threshold)
            .field(
                "min_drag_threshold_reference_distance",
                &self.min_drag_threshold_reference_distance,
            )
            .field("stabilization_radius", &self.stabilization_radius)
            .field(
                "min_stabilization_reference_distance",
                &self.min_stabilization_reference_distance,
            )
            .field("smoothing_time", &self.smoothing_time)
            .field(
                "start_drag_from_press_position",
                &self.start_drag_from_press_position,
            )
            .field("position_override", &self.position_override.is_some())
            .field(
                "drag_threshold_override",
                &self.drag_threshold_override.is_some(),
            )
            .finish()
    }
}

impl Configuration {
    /// Check that every distance is finite and non-negative and that the
    /// smoothing constant is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let distances = [
            ("drag_threshold", self.drag_threshold),
            (
                "min_drag_threshold_reference_distance",
                self.min_drag_threshold_reference_distance,
            ),
            ("stabilization_radius", self.stabilization_radius),
            (
                "min_stabilization_reference_distance",
                self.min_stabilization_reference_distance,
            ),
        ];
        for (field, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDistance { field, value });
            }
        }
        if !(0.0..1.0).contains(&self.smoothing_time) {
            return Err(ConfigError::SmoothingTime(self.smoothing_time));
        }
        Ok(())
    }

    /// Drag threshold for a press made `distance` metres away.
    pub fn drag_threshold_at(&self, distance: f64) -> f64 {
        distance_scaled(
            self.drag_threshold,
            self.min_drag_threshold_reference_distance,
            distance,
        )
    }

    /// Stabilization radius for a target `distance` metres away.
    pub fn stabilization_radius_at(&self, distance: f64) -> f64 {
        distance_scaled(
            self.stabilization_radius,
            self.min_stabilization_reference_distance,
            distance,
        )
    }

    /// Whether moving from `press_target` to `current_target` promotes a press
    /// made at `press_distance` to a drag.
    ///
    /// Uses [`Self::drag_threshold_override`] when present.
    pub fn exceeds_drag_threshold(
        &self,
        press_target: DVec3,
        current_target: DVec3,
        press_distance: f64,
    ) -> bool {
        let threshold = self.drag_threshold_at(press_distance);
        match &self.drag_threshold_override {
            Some(test) => test(&DragThresholdQuery {
                press_target,
                current_target,
                press_distance,
                threshold,
            }),
            None => press_target.distance(current_target) >= threshold,
        }
    }
}

/// Visual feedback hints for the pointer's reticle.
///
/// The router never draws anything; it only tracks which hints are active so
/// a renderer can read them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReticleData {
    /// Whether the reticle is drawn at all.
    pub visible: bool,
    /// Reticle diameter in metres at one metre distance.
    pub size: f64,
    /// Orient the reticle along the hit surface normal.
    pub align_to_normal: bool,
    /// Draw the ray polyline up to the reticle.
    pub show_ray: bool,
}

impl Default for ReticleData {
    fn default() -> Self {
        Self {
            visible: true,
            size: 0.01,
            align_to_normal: true,
            show_ray: true,
        }
    }
}
