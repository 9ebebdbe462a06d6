// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event payloads handed to handlers and bus subscribers.
//!
//! Conventional UI handlers think in screen space and receive [`UiEventData`];
//! spatial widgets think in world space and receive [`SpatialEventData`]. The
//! router builds both views of the same pointer state as an [`EventData`] and the
//! dispatcher hands each handler the one matching its flavour.

use glam::DVec3;
use kurbo::{Point, Vec2};

use crate::types::{Domain, EventKind, ObjectId, PointerId};

/// Screen-space view of a pointer interaction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UiEventData {
    /// Originating pointer, `None` for focus-driven events.
    pub pointer: Option<PointerId>,
    /// Pointer position in screen pixels.
    pub position: Point,
    /// Movement since the previous frame in pixels.
    pub delta: Vec2,
    /// Screen position at the last press.
    pub press_position: Point,
    /// Consecutive click count of the current or last press.
    pub click_count: u32,
    /// Scroll delta this frame.
    pub scroll: Vec2,
    /// Whether the current press has become a drag.
    pub dragging: bool,
    /// World point of the current raycast hit, if any.
    pub hit_point: Option<DVec3>,
    /// Surface normal of the current raycast hit, if any.
    pub hit_normal: Option<DVec3>,
}

/// World-space view of a pointer interaction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpatialEventData {
    /// Originating pointer, `None` for focus-driven events.
    pub pointer: Option<PointerId>,
    /// Resolved (stabilized, smoothed) spatial position.
    pub position: DVec3,
    /// Unfiltered spatial target position.
    pub target_position: DVec3,
    /// Spatial position at the last press.
    pub press_position: DVec3,
    /// Origin of the active ray segment.
    pub ray_origin: DVec3,
    /// Normalized direction of the active ray segment.
    pub ray_direction: DVec3,
    /// Distance along the ray used while dragging.
    pub distance: f64,
    /// Consecutive click count of the current or last press.
    pub click_count: u32,
    /// Scroll delta this frame.
    pub scroll: Vec2,
    /// Whether the current press has become a drag.
    pub dragging: bool,
}

/// Both flavours of one interaction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EventData {
    /// Screen-space view.
    pub ui: UiEventData,
    /// World-space view.
    pub spatial: SpatialEventData,
}

impl EventData {
    /// Payload for events not caused by a pointer, such as focus updates.
    pub fn detached() -> Self {
        Self {
            ui: UiEventData {
                pointer: None,
                position: Point::ZERO,
                delta: Vec2::ZERO,
                press_position: Point::ZERO,
                click_count: 0,
                scroll: Vec2::ZERO,
                dragging: false,
                hit_point: None,
                hit_normal: None,
            },
            spatial: SpatialEventData {
                pointer: None,
                position: DVec3::ZERO,
                target_position: DVec3::ZERO,
                press_position: DVec3::ZERO,
                ray_origin: DVec3::ZERO,
                ray_direction: DVec3::NEG_Z,
                distance: 0.0,
                click_count: 0,
                scroll: Vec2::ZERO,
                dragging: false,
            },
        }
    }
}

/// What bus subscribers observe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BusEvent {
    /// Interaction kind.
    pub kind: EventKind,
    /// Originating pointer, `None` for focus-driven events.
    pub pointer: Option<PointerId>,
    /// Object the interaction concerns, if any.
    pub object: Option<ObjectId>,
    /// Domain the object was classified as.
    pub domain: Domain,
    /// Resolved spatial position.
    pub position: DVec3,
    /// Screen position.
    pub screen_position: Point,
    /// Click count of the current or last press.
    pub click_count: u32,
    /// Scroll delta this frame.
    pub scroll: Vec2,
}

impl BusEvent {
    /// Build a bus event from an interaction payload.
    pub fn new(kind: EventKind, object: Option<ObjectId>, domain: Domain, data: &EventData) -> Self {
        Self {
            kind,
            pointer: data.spatial.pointer,
            object,
            domain,
            position: data.spatial.position,
            screen_position: data.ui.position,
            click_count: data.ui.click_count,
            scroll: data.ui.scroll,
        }
    }
}
