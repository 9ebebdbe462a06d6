// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router-wide settings, frame timing and host-supplied services.

use glam::DVec3;
use kurbo::Point;
use tether_event_state::click::DEFAULT_CLICK_WINDOW;
use tether_event_state::config::{Configuration, ReticleData};
use tether_responder::classify::LayerDomains;
use tether_responder::types::LayerMask;

use crate::error::RouterError;

/// Timing of one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Monotonic frame index; a repeated index is not processed twice.
    pub frame: u64,
    /// Seconds since an arbitrary epoch.
    pub now: f64,
    /// Seconds since the previous frame.
    pub delta: f64,
}

/// World → screen conversion for the viewing camera.
pub trait Projection {
    /// Screen position of `point` in pixels, or `None` if it cannot be projected
    /// (for example behind the camera).
    fn world_to_screen(&self, point: DVec3) -> Option<Point>;
}

/// Overrides the router's default configuration and reticle, typically
/// registered by a World-side tool.
pub trait DefaultsProvider {
    /// Configuration used when no addressed object supplies one.
    fn configuration(&self) -> Option<Configuration> {
        None
    }

    /// Reticle hints used when no addressed object supplies them.
    fn reticle(&self) -> Option<ReticleData> {
        None
    }
}

/// Router-wide tuning.
#[derive(Clone, Debug)]
pub struct RouterSettings {
    /// Layers any pointer may hit.
    pub layer_mask: LayerMask,
    /// Layer fallback used by the domain classifier.
    pub layer_domains: LayerDomains,
    /// Distance along the ray of the cursor when nothing is hit.
    pub invalid_raycast_distance: f64,
    /// Closest a spatial drag may be pulled in by scrolling.
    pub minimum_distance: f64,
    /// Metres per second of drag distance change per unit of vertical scroll.
    pub scroll_distance_sensitivity: f64,
    /// Screen distance in pixels that promotes a press on flat UI to a drag.
    pub pixel_drag_threshold: f64,
    /// Click-speed window in seconds.
    pub click_window: f64,
    /// Configuration applied when no object supplies one.
    pub default_configuration: Configuration,
    /// Reticle hints applied when no object supplies any.
    pub default_reticle: ReticleData,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            layer_mask: LayerMask::all(),
            layer_domains: LayerDomains::default(),
            invalid_raycast_distance: 10.0,
            minimum_distance: 0.1,
            scroll_distance_sensitivity: 1.0,
            pixel_drag_threshold: 10.0,
            click_window: DEFAULT_CLICK_WINDOW,
            default_configuration: Configuration::default(),
            default_reticle: ReticleData::default(),
        }
    }
}

impl RouterSettings {
    /// Check every distance and the default configuration.
    pub fn validate(&self) -> Result<(), RouterError> {
        let values = [
            ("invalid_raycast_distance", self.invalid_raycast_distance),
            ("minimum_distance", self.minimum_distance),
            ("scroll_distance_sensitivity", self.scroll_distance_sensitivity),
            ("pixel_drag_threshold", self.pixel_drag_threshold),
            ("click_window", self.click_window),
        ];
        for (field, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(RouterError::InvalidSetting { field, value });
            }
        }
        self.default_configuration.validate()?;
        Ok(())
    }
}

/// Configuration and reticle applied when the addressed object supplies none.
#[derive(Clone, Debug)]
pub(crate) struct Defaults {
    pub(crate) configuration: Configuration,
    pub(crate) reticle: ReticleData,
}

impl Defaults {
    /// Router defaults, with anything `provider` supplies taking precedence.
    pub(crate) fn resolve(settings: &RouterSettings, provider: Option<&dyn DefaultsProvider>) -> Self {
        Self {
            configuration: provider
                .and_then(|p| p.configuration())
                .unwrap_or_else(|| settings.default_configuration.clone()),
            reticle: provider
                .and_then(|p| p.reticle())
                .unwrap_or(settings.default_reticle),
        }
    }
}
