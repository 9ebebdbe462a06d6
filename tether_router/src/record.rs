// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-pointer event record.
//!
//! The router owns one [`PointerEventRecord`] per registered pointer and
//! rewrites it every frame. Press, drag and hover bookkeeping for UI targets
//! ([`UiBookkeeping`]) and for World content ([`WorldBookkeeping`]) are kept
//! apart; a press is handled by exactly one of them, chosen when the button
//! goes down.

use glam::DVec3;
use kurbo::{Point, Vec2};
use tether_event_state::click::ClickCounter;
use tether_event_state::drag::PressGesture;
use tether_event_state::hover::HoverState;
use tether_event_state::stabilize::Stabilizer;
use tether_responder::event::{EventData, SpatialEventData, UiEventData};
use tether_responder::scene::Chain;
use tether_responder::types::{Domain, ObjectId, PointerId, UiFlavor};

use crate::raycast::{RaycastResult, Segment};

/// Which button pipeline handles a press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pipeline {
    /// Conventional or spatial UI objects, through handlers.
    Ui,
    /// World content, through the outside-UI bus channel.
    World,
}

impl Pipeline {
    /// Pipeline serving `domain`.
    pub fn for_domain(domain: Domain) -> Self {
        if domain.is_ui() { Self::Ui } else { Self::World }
    }
}

/// Press and drag state for UI targets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiBookkeeping {
    /// Object that received the press (down handler, or click handler).
    pub press: Option<ObjectId>,
    /// Object a drag would move, resolved at press time.
    pub drag: Option<ObjectId>,
    /// Handler flavour of [`Self::drag`].
    pub drag_flavor: Option<UiFlavor>,
}

/// Press and drag state for World content.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorldBookkeeping {
    /// The button is held on World content.
    pub pressed: bool,
    /// Someone subscribes to World drags, so the press may become one.
    pub draggable: bool,
    /// World object under the pointer at press time, if any.
    pub press_object: Option<ObjectId>,
}

/// Transient state of one pointer.
#[derive(Clone, Debug)]
pub struct PointerEventRecord {
    pub(crate) pointer: PointerId,
    pub(crate) screen: Point,
    pub(crate) previous_screen: Point,
    pub(crate) spatial: DVec3,
    pub(crate) spatial_target: DVec3,
    pub(crate) press_screen: Point,
    pub(crate) press_spatial: DVec3,
    pub(crate) distance: f64,
    pub(crate) raycast: RaycastResult,
    pub(crate) segment: Option<Segment>,
    pub(crate) captured: bool,
    pub(crate) chain: Chain,
    pub(crate) target_domain: Domain,
    pub(crate) target_object: Option<ObjectId>,
    pub(crate) enter_domain: Domain,
    pub(crate) addressed: Option<ObjectId>,
    pub(crate) drag_domain: Option<Domain>,
    pub(crate) pipeline: Option<Pipeline>,
    pub(crate) moving: bool,
    pub(crate) scroll: Vec2,
    pub(crate) gesture: PressGesture,
    pub(crate) clicks: ClickCounter<ObjectId>,
    pub(crate) stabilizer: Stabilizer,
    pub(crate) hover: HoverState<ObjectId>,
    pub(crate) ui: UiBookkeeping,
    pub(crate) world: WorldBookkeeping,
}

impl PointerEventRecord {
    pub(crate) fn new(pointer: PointerId, click_window: f64) -> Self {
        Self {
            pointer,
            screen: Point::ZERO,
            previous_screen: Point::ZERO,
            spatial: DVec3::ZERO,
            spatial_target: DVec3::ZERO,
            press_screen: Point::ZERO,
            press_spatial: DVec3::ZERO,
            distance: 0.0,
            raycast: RaycastResult::default(),
            segment: None,
            captured: false,
            chain: Chain::new(),
            target_domain: Domain::World,
            target_object: None,
            enter_domain: Domain::World,
            addressed: None,
            drag_domain: None,
            pipeline: None,
            moving: false,
            scroll: Vec2::ZERO,
            gesture: PressGesture::default(),
            clicks: ClickCounter::with_window(click_window),
            stabilizer: Stabilizer::new(),
            hover: HoverState::new(),
            ui: UiBookkeeping::default(),
            world: WorldBookkeeping::default(),
        }
    }

    /// Pointer this record belongs to.
    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    /// Screen position in pixels.
    pub fn screen_position(&self) -> Point {
        self.screen
    }

    /// Resolved (stabilized, smoothed) spatial position.
    pub fn spatial_position(&self) -> DVec3 {
        self.spatial
    }

    /// Unfiltered spatial target position.
    pub fn spatial_target(&self) -> DVec3 {
        self.spatial_target
    }

    /// Spatial position at the last press.
    pub fn press_spatial_position(&self) -> DVec3 {
        self.press_spatial
    }

    /// Distance along the ray used by spatial drags.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// This frame's raycast.
    pub fn raycast(&self) -> &RaycastResult {
        &self.raycast
    }

    /// Whether an interceptor turned a miss into a hit this frame.
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Ownership chain of the current hit, leaf first.
    pub fn hit_chain(&self) -> &[ObjectId] {
        &self.chain
    }

    /// Domain addressed by the current hit.
    pub fn target_domain(&self) -> Domain {
        self.target_domain
    }

    /// First non-World object of the current hit chain.
    pub fn target_object(&self) -> Option<ObjectId> {
        self.target_object
    }

    /// Domain recorded by the last hover change.
    pub fn enter_domain(&self) -> Domain {
        self.enter_domain
    }

    /// Domain of the drag object of the current press.
    pub fn drag_domain(&self) -> Option<Domain> {
        self.drag_domain
    }

    /// Pipeline handling the current press.
    pub fn pipeline(&self) -> Option<Pipeline> {
        self.pipeline
    }

    /// Whether the pointer moved this frame.
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Whether the button is held.
    pub fn is_pressed(&self) -> bool {
        self.gesture.is_pressed()
    }

    /// Whether the current press became a drag.
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// Whether releasing now would click.
    pub fn eligible_for_click(&self) -> bool {
        self.gesture.eligible_for_click()
    }

    /// Click count of the current or last press.
    pub fn click_count(&self) -> u32 {
        self.clicks.count()
    }

    /// Time of the last press.
    pub fn click_time(&self) -> Option<f64> {
        self.clicks.last_time()
    }

    /// Hovered objects, leaf first.
    pub fn hovered(&self) -> &[ObjectId] {
        self.hover.hovered()
    }

    /// UI press bookkeeping.
    pub fn ui(&self) -> &UiBookkeeping {
        &self.ui
    }

    /// World press bookkeeping.
    pub fn world(&self) -> &WorldBookkeeping {
        &self.world
    }

    /// Snapshot the record as handler and bus payloads.
    pub fn event_data(&self) -> EventData {
        let dragging = self.gesture.is_dragging();
        let hit = self.raycast.hit;
        let (ray_origin, ray_direction) = self
            .segment
            .map_or((self.spatial, DVec3::NEG_Z), |s| (s.origin, s.direction()));
        EventData {
            ui: UiEventData {
                pointer: Some(self.pointer),
                position: self.screen,
                delta: self.screen - self.previous_screen,
                press_position: self.press_screen,
                click_count: self.clicks.count(),
                scroll: self.scroll,
                dragging,
                hit_point: hit.map(|h| h.point),
                hit_normal: hit.map(|h| h.normal),
            },
            spatial: SpatialEventData {
                pointer: Some(self.pointer),
                position: self.spatial,
                target_position: self.spatial_target,
                press_position: self.press_spatial,
                ray_origin,
                ray_direction,
                distance: self.distance,
                click_count: self.clicks.count(),
                scroll: self.scroll,
                dragging,
            },
        }
    }

    /// Forget all press state, keeping hover.
    pub(crate) fn clear_press(&mut self) {
        self.pipeline = None;
        self.drag_domain = None;
        self.ui = UiBookkeeping::default();
        self.world = WorldBookkeeping::default();
    }
}
