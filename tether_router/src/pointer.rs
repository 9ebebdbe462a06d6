// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointers: one per tracked ray-emitting device.
//!
//! A [`Pointer`] pulls a [`PointerSample`] from its [`PointerSource`] at the
//! start of every frame and keeps it until the frame's edges are cleared. It
//! also owns the [`Configuration`] and [`ReticleData`] currently in effect,
//! which the router replaces whenever the pointer addresses a new object.

use alloc::boxed::Box;
use core::fmt;

use glam::DVec3;
use kurbo::Vec2;
use smallvec::SmallVec;
use tether_event_state::config::{Configuration, ReticleData};
use tether_responder::types::{LayerMask, PointerId};

use crate::settings::FrameTime;

/// Ray sample points of one frame, origin first.
pub type RayPoints = SmallVec<[DVec3; 4]>;

/// Primary button transition this frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ButtonEdge {
    /// No transition.
    #[default]
    NoChange,
    /// The button went down.
    Pressed,
    /// The button went up.
    Released,
}

/// Joystick edge this frame.
///
/// The router does not act on it; it is kept on the pointer for consumers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum JoystickEdge {
    /// No transition.
    #[default]
    None,
    /// Pushed up.
    Up,
    /// Pushed down.
    Down,
    /// Pushed left.
    Left,
    /// Pushed right.
    Right,
    /// Pushed forward (3D sticks).
    Forward,
    /// Pulled back (3D sticks).
    Back,
}

/// What a device reports for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerSample {
    /// Ray polyline, origin first. Curved rays carry more than two points.
    pub ray: RayPoints,
    /// Primary button edge.
    pub button: ButtonEdge,
    /// Scroll delta.
    pub scroll: Vec2,
    /// Joystick edge.
    pub joystick: JoystickEdge,
}

impl PointerSample {
    /// A straight ray from `origin` to `end` with no input.
    pub fn straight(origin: DVec3, end: DVec3) -> Self {
        Self {
            ray: SmallVec::from_slice(&[origin, end]),
            ..Self::default()
        }
    }
}

/// A tracked device feeding a pointer.
pub trait PointerSource {
    /// Sample the device for the frame described by `time`.
    fn sample(&mut self, time: &FrameTime) -> PointerSample;
}

/// A registered input device.
pub struct Pointer {
    id: PointerId,
    source: Box<dyn PointerSource>,
    sample: PointerSample,
    /// Extra distance added to the fixed invalid-raycast distance.
    pub distance_offset: f64,
    /// Layers this pointer's raycasts consider, combined with the router mask.
    pub layer_mask: LayerMask,
    configuration: Configuration,
    reticle: ReticleData,
}

impl fmt::Debug for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pointer")
            .field("id", &self.id)
            .field("sample", &self.sample)
            .field("distance_offset", &self.distance_offset)
            .field("layer_mask", &self.layer_mask)
            .field("configuration", &self.configuration)
            .field("reticle", &self.reticle)
            .finish_non_exhaustive()
    }
}

impl Pointer {
    /// Create a pointer reading from `source`, with default configuration and
    /// a mask accepting every layer.
    pub fn new(id: PointerId, source: impl PointerSource + 'static) -> Self {
        Self {
            id,
            source: Box::new(source),
            sample: PointerSample::default(),
            distance_offset: 0.0,
            layer_mask: LayerMask::all(),
            configuration: Configuration::default(),
            reticle: ReticleData::default(),
        }
    }

    /// Restrict raycasts to `mask`.
    #[must_use]
    pub fn with_layer_mask(mut self, mask: LayerMask) -> Self {
        self.layer_mask = mask;
        self
    }

    /// Pointer id.
    pub fn id(&self) -> PointerId {
        self.id
    }

    /// This frame's ray polyline.
    pub fn ray(&self) -> &[DVec3] {
        &self.sample.ray
    }

    /// This frame's button edge.
    pub fn button(&self) -> ButtonEdge {
        self.sample.button
    }

    /// This frame's scroll delta.
    pub fn scroll(&self) -> Vec2 {
        self.sample.scroll
    }

    /// This frame's joystick edge.
    pub fn joystick(&self) -> JoystickEdge {
        self.sample.joystick
    }

    /// Configuration in effect.
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Reticle hints in effect.
    pub fn reticle(&self) -> &ReticleData {
        &self.reticle
    }

    /// Replace the configuration.
    pub fn set_configuration(&mut self, configuration: Configuration) {
        self.configuration = configuration;
    }

    /// Replace the reticle hints.
    pub fn set_reticle(&mut self, reticle: ReticleData) {
        self.reticle = reticle;
    }

    pub(crate) fn refresh(&mut self, time: &FrameTime) {
        self.sample = self.source.sample(time);
    }

    /// Drop this frame's edges; the ray is kept until the next refresh.
    pub(crate) fn clear_edges(&mut self) {
        self.sample.button = ButtonEdge::NoChange;
        self.sample.scroll = Vec2::ZERO;
        self.sample.joystick = JoystickEdge::None;
    }
}
