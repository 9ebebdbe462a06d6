// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The frame orchestrator and pointer registry.
//!
//! [`InputRouter::tick`] runs once per frame. For every registered pointer, in
//! registration order, it:
//!
//! 1. pulls a fresh sample from the pointer's source,
//! 2. casts the ray polyline (pointer mask ∩ router mask), letting the
//!    interceptor rewrite a miss,
//! 3. classifies the hit's ownership chain into a target domain,
//! 4. resolves the spatial position and projects it to the screen,
//! 5. runs the button, hover, drag and scroll steps,
//! 6. clears the pointer's edges.
//!
//! Pointers are processed strictly one after another; a drag capture taken by
//! an earlier pointer is visible to later ones in the same frame.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use tether_responder::bus::EventBus;
use tether_responder::classify::target_domain;
use tether_responder::dispatcher::Dispatcher;
use tether_responder::event::EventData;
use tether_responder::focus::{FocusEvent, FocusState, focus_path};
use tether_responder::scene::{SceneGraph, ancestry};
use tether_responder::types::{EventKind, ObjectId, PointerId};

use crate::capture::Captures;
use crate::error::RouterError;
use crate::hover::{clear_hover, process_hover};
use crate::pointer::Pointer;
use crate::position;
use crate::press::{cancel_press, process_button, process_drag, process_scroll};
use crate::raycast::{Interceptor, RaycastHit, RaycastProvider, cast_polyline};
use crate::record::PointerEventRecord;
use crate::settings::{Defaults, DefaultsProvider, FrameTime, Projection, RouterSettings};

/// Host services borrowed for one frame.
pub struct FrameContext<'a> {
    /// Scene the pointers interact with.
    pub scene: &'a mut dyn SceneGraph,
    /// Segment raycaster.
    pub raycaster: &'a dyn RaycastProvider,
    /// Camera projection; pointers are skipped while it is missing.
    pub projection: Option<&'a dyn Projection>,
    /// Timing of this frame.
    pub time: FrameTime,
}

impl fmt::Debug for FrameContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameContext")
            .field("projection", &self.projection.is_some())
            .field("time", &self.time)
            .finish_non_exhaustive()
    }
}

/// What one [`InputRouter::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Pointers that ran their full pipeline.
    pub processed: usize,
    /// Pointers skipped for the rest of the frame.
    pub skipped: usize,
}

#[derive(Debug)]
struct Entry {
    pointer: Pointer,
    record: PointerEventRecord,
}

/// Routes every registered pointer through raycasting, position resolution
/// and the press/hover/drag/scroll pipelines once per frame.
pub struct InputRouter {
    settings: RouterSettings,
    bus: EventBus,
    entries: Vec<Entry>,
    captures: Captures,
    focus: FocusState<ObjectId>,
    interceptor: Option<Interceptor>,
    outside_defaults: Option<Box<dyn DefaultsProvider>>,
    active: bool,
    last_frame: Option<u64>,
    projection_warned: bool,
    scratch: Vec<RaycastHit>,
}

impl fmt::Debug for InputRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputRouter")
            .field("settings", &self.settings)
            .field("bus", &self.bus)
            .field("entries", &self.entries)
            .field("captures", &self.captures)
            .field("focus", &self.focus)
            .field("interceptor", &self.interceptor.is_some())
            .field("outside_defaults", &self.outside_defaults.is_some())
            .field("active", &self.active)
            .field("last_frame", &self.last_frame)
            .finish_non_exhaustive()
    }
}

impl InputRouter {
    /// Create an active router publishing on `bus`.
    pub fn new(settings: RouterSettings, bus: EventBus) -> Result<Self, RouterError> {
        settings.validate()?;
        Ok(Self {
            settings,
            bus,
            entries: Vec::new(),
            captures: Captures::new(),
            focus: FocusState::new(),
            interceptor: None,
            outside_defaults: None,
            active: true,
            last_frame: None,
            projection_warned: false,
            scratch: Vec::new(),
        })
    }

    /// Router-wide settings.
    pub fn settings(&self) -> &RouterSettings {
        &self.settings
    }

    /// The event bus.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// The event bus, for subscribing.
    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// Whether this router is the active input system.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enable or disable frame processing.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn defaults(&self) -> Defaults {
        Defaults::resolve(&self.settings, self.outside_defaults.as_deref())
    }

    /// Add a pointer. It starts with the current default configuration and
    /// reticle.
    pub fn register(&mut self, mut pointer: Pointer) -> Result<(), RouterError> {
        let id = pointer.id();
        if self.entries.iter().any(|e| e.pointer.id() == id) {
            return Err(RouterError::DuplicatePointer(id));
        }
        let defaults = self.defaults();
        pointer.set_configuration(defaults.configuration);
        pointer.set_reticle(defaults.reticle);
        log::debug!("registered {id:?}");
        self.entries.push(Entry {
            pointer,
            record: PointerEventRecord::new(id, self.settings.click_window),
        });
        Ok(())
    }

    /// Remove a pointer, closing what it left open in `scene`.
    ///
    /// A held press ends with an up (and an end-drag when dragging) but never
    /// a click or drop. Every hovered object then receives an exit, and the
    /// pointer's drag captures are released.
    pub fn unregister(
        &mut self,
        id: PointerId,
        scene: &mut dyn SceneGraph,
    ) -> Result<Pointer, RouterError> {
        let index = self.index_of(id)?;
        let Entry {
            pointer,
            mut record,
        } = self.entries.remove(index);
        let mut d = Dispatcher::new(scene, &mut self.bus, &self.settings.layer_domains);
        cancel_press(&mut record, &mut d, &mut self.captures);
        clear_hover(&mut record, &mut d);
        self.captures.release_all(id);
        log::debug!("unregistered {id:?}");
        Ok(pointer)
    }

    fn index_of(&self, id: PointerId) -> Result<usize, RouterError> {
        self.entries
            .iter()
            .position(|e| e.pointer.id() == id)
            .ok_or(RouterError::UnknownPointer(id))
    }

    /// A registered pointer.
    pub fn pointer(&self, id: PointerId) -> Option<&Pointer> {
        self.entries
            .iter()
            .find(|e| e.pointer.id() == id)
            .map(|e| &e.pointer)
    }

    /// A registered pointer, mutably.
    pub fn pointer_mut(&mut self, id: PointerId) -> Option<&mut Pointer> {
        self.entries
            .iter_mut()
            .find(|e| e.pointer.id() == id)
            .map(|e| &mut e.pointer)
    }

    /// The event record of a registered pointer.
    pub fn record(&self, id: PointerId) -> Option<&PointerEventRecord> {
        self.entries
            .iter()
            .find(|e| e.pointer.id() == id)
            .map(|e| &e.record)
    }

    /// Registered pointer ids in processing order.
    pub fn pointer_ids(&self) -> impl Iterator<Item = PointerId> + '_ {
        self.entries.iter().map(|e| e.pointer.id())
    }

    /// Install or remove the miss interceptor.
    pub fn set_interceptor(&mut self, interceptor: Option<Interceptor>) {
        self.interceptor = interceptor;
    }

    /// Install or remove the provider overriding the default configuration
    /// and reticle.
    ///
    /// Pointers addressing nothing adopt the new defaults at once; the others
    /// pick them up when their addressed object next changes.
    pub fn set_outside_defaults(&mut self, provider: Option<Box<dyn DefaultsProvider>>) {
        self.outside_defaults = provider;
        let defaults = self.defaults();
        for entry in self.entries.iter_mut().filter(|e| e.record.addressed.is_none()) {
            entry.pointer.set_configuration(defaults.configuration.clone());
            entry.pointer.set_reticle(defaults.reticle);
        }
    }

    /// Whether some pointer is dragging `object`.
    pub fn is_captured(&self, object: ObjectId) -> bool {
        self.captures.owner(object).is_some()
    }

    /// The pointer dragging `object`.
    pub fn captured_by(&self, object: ObjectId) -> Option<PointerId> {
        self.captures.owner(object)
    }

    /// Object holding logical focus.
    pub fn focused(&self) -> Option<ObjectId> {
        self.focus.focused()
    }

    /// Move logical focus to `object`, or drop it.
    ///
    /// Objects leaving the focused path are deselected inner-most first, then
    /// objects joining it are selected outer-most first. Only objects whose
    /// handlers react to the transition receive it.
    pub fn set_focus(&mut self, scene: &mut dyn SceneGraph, object: Option<ObjectId>) {
        let path = object.map(|o| focus_path(&*scene, o)).unwrap_or_default();
        let transitions = self.focus.update_path(&path);
        let mut d = Dispatcher::new(scene, &mut self.bus, &self.settings.layer_domains);
        deliver_focus(&mut d, &transitions);
    }

    fn update_focus(&mut self, scene: &mut dyn SceneGraph) {
        let Some(focused) = self.focus.focused() else {
            return;
        };
        let mut d = Dispatcher::new(scene, &mut self.bus, &self.settings.layer_domains);
        if !d.scene().is_alive(focused) {
            log::debug!("focused {focused:?} is gone");
            let transitions = self.focus.clear();
            deliver_focus(&mut d, &transitions);
            return;
        }
        if d.handles(focused, EventKind::UpdateSelected) {
            d.dispatch(Some(focused), EventKind::UpdateSelected, &EventData::detached());
        }
    }

    /// Run one frame.
    ///
    /// Returns `None` when the router is inactive or `ctx.time.frame` was
    /// already processed.
    pub fn tick(&mut self, ctx: &mut FrameContext<'_>) -> Option<TickSummary> {
        if !self.active {
            return None;
        }
        if self.last_frame == Some(ctx.time.frame) {
            log::debug!("frame {} already processed", ctx.time.frame);
            return None;
        }
        self.last_frame = Some(ctx.time.frame);

        self.update_focus(&mut *ctx.scene);

        let defaults = self.defaults();
        let mut summary = TickSummary::default();
        for index in 0..self.entries.len() {
            if self.step(index, ctx, &defaults) {
                summary.processed += 1;
            } else {
                summary.skipped += 1;
            }
        }
        Some(summary)
    }

    /// Run one pointer's pipeline outside of [`Self::tick`].
    ///
    /// Returns `Ok(false)` when the pointer was skipped or the router is
    /// inactive.
    pub fn process_pointer(
        &mut self,
        id: PointerId,
        ctx: &mut FrameContext<'_>,
    ) -> Result<bool, RouterError> {
        let index = self.index_of(id)?;
        if !self.active {
            return Ok(false);
        }
        let defaults = self.defaults();
        Ok(self.step(index, ctx, &defaults))
    }

    fn step(&mut self, index: usize, ctx: &mut FrameContext<'_>, defaults: &Defaults) -> bool {
        let Self {
            settings,
            bus,
            entries,
            captures,
            interceptor,
            projection_warned,
            scratch,
            ..
        } = self;
        let Some(Entry { pointer, record }) = entries.get_mut(index) else {
            return false;
        };
        let time = ctx.time;

        pointer.refresh(&time);
        record.scroll = pointer.scroll();

        let previous_object = record.raycast.object();
        let previous_target = record.spatial_target;
        let mask = pointer.layer_mask & settings.layer_mask;
        record.raycast = cast_polyline(ctx.raycaster, &*ctx.scene, pointer.ray(), mask, scratch);
        record.captured = false;
        if !record.raycast.is_valid()
            && let Some(intercept) = interceptor.as_mut()
            && let Some(result) = intercept(pointer.id(), pointer.ray())
            && result.object().is_some_and(|o| ctx.scene.is_alive(o))
        {
            record.raycast = result;
            record.captured = true;
        }

        record.chain = record
            .raycast
            .object()
            .map(|o| ancestry(&*ctx.scene, o))
            .unwrap_or_default();
        let (domain, object) = target_domain(&*ctx.scene, &record.chain, &settings.layer_domains);
        if domain != record.target_domain {
            log::trace!("{:?} now targets {domain:?}", pointer.id());
        }
        record.target_domain = domain;
        record.target_object = object;

        position::resolve(pointer, record, &*ctx.scene, settings, &time);

        let Some(projection) = ctx.projection else {
            if !*projection_warned {
                log::warn!("no projection available; skipping pointers until one is provided");
                *projection_warned = true;
            }
            pointer.clear_edges();
            return false;
        };
        *projection_warned = false;
        record.previous_screen = record.screen;
        if let Some(screen) = projection.world_to_screen(record.spatial) {
            record.screen = screen;
        }
        record.moving = record.screen != record.previous_screen
            || record.spatial_target != previous_target
            || record.raycast.object() != previous_object;

        let mut d = Dispatcher::new(&mut *ctx.scene, bus, &settings.layer_domains);
        process_button(pointer, record, &mut d, captures, settings, &time);
        process_hover(pointer, record, &mut d, defaults);
        process_drag(pointer, record, &mut d, captures, settings);
        process_scroll(pointer, record, &mut d, settings, &time);

        pointer.clear_edges();
        true
    }
}

fn deliver_focus(d: &mut Dispatcher<'_>, transitions: &[FocusEvent<ObjectId>]) {
    let data = EventData::detached();
    for transition in transitions {
        let (object, kind) = (transition.target(), transition.kind());
        if d.handles(object, kind) {
            d.dispatch(Some(object), kind, &data);
        }
    }
}
