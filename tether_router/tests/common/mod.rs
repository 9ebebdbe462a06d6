// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared rig for router integration tests.
//!
//! Surfaces are planes of constant `z`, optionally bounded in `x`/`y`. Every
//! pointer shoots from the origin; the projection maps one metre to 1000
//! pixels.

#![allow(
    dead_code,
    missing_docs,
    unreachable_pub,
    reason = "Integration-test helper module; not every test uses every helper."
)]

use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec3;
use kurbo::{Point, Vec2};
use tether_event_state::config::{Configuration, ReticleData};
use tether_responder::adapters::tree::SceneTree;
use tether_responder::bus::{Channel, EventBus};
use tether_responder::event::{BusEvent, SpatialEventData, UiEventData};
use tether_responder::handler::{Handler, PointerHandler};
use tether_responder::types::{Domain, EventKind, EventMask, Layer, LayerMask, ObjectId, PointerId, UiFlavor};
use tether_router::pointer::{ButtonEdge, Pointer, PointerSample, PointerSource};
use tether_router::raycast::{RaycastHit, RaycastProvider, Segment};
use tether_router::router::{FrameContext, InputRouter, TickSummary};
use tether_router::settings::{FrameTime, Projection, RouterSettings};

pub const FRAME: f64 = 0.1;
pub const PIXELS_PER_METRE: f64 = 1000.0;

/// One delivered handler event: receiving object, kind, originating pointer.
pub type Delivered = (ObjectId, EventKind, Option<PointerId>);
pub type Log = Rc<RefCell<Vec<Delivered>>>;

/// One bus event: kind, object, domain.
pub type Published = (EventKind, Option<ObjectId>, Domain);
pub type BusLog = Rc<RefCell<Vec<Published>>>;

pub struct Recorder {
    pub object: ObjectId,
    pub caps: EventMask,
    pub log: Log,
    pub configuration: Option<Configuration>,
    pub reticle: Option<ReticleData>,
}

impl PointerHandler<UiEventData> for Recorder {
    fn capabilities(&self) -> EventMask {
        self.caps
    }

    fn handle(&mut self, kind: EventKind, event: &UiEventData) {
        self.log.borrow_mut().push((self.object, kind, event.pointer));
    }

    fn configuration(&self) -> Option<Configuration> {
        self.configuration.clone()
    }

    fn reticle(&self) -> Option<ReticleData> {
        self.reticle
    }
}

impl PointerHandler<SpatialEventData> for Recorder {
    fn capabilities(&self) -> EventMask {
        self.caps
    }

    fn handle(&mut self, kind: EventKind, event: &SpatialEventData) {
        self.log.borrow_mut().push((self.object, kind, event.pointer));
    }

    fn configuration(&self) -> Option<Configuration> {
        self.configuration.clone()
    }

    fn reticle(&self) -> Option<ReticleData> {
        self.reticle
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Surface {
    pub object: ObjectId,
    pub z: f64,
    pub layer: Layer,
    pub bounds: Option<(Point, Point)>,
}

#[derive(Debug, Default)]
pub struct Walls(pub Vec<Surface>);

impl RaycastProvider for Walls {
    fn raycast(&self, segment: &Segment, mask: LayerMask, hits: &mut Vec<RaycastHit>) {
        let d = segment.direction();
        if d.z.abs() < 1e-12 {
            return;
        }
        for s in self.0.iter().filter(|s| mask.includes(s.layer)) {
            let t = (s.z - segment.origin.z) / d.z;
            if t < 0.0 || t > segment.length() {
                continue;
            }
            let point = segment.at(t);
            if let Some((min, max)) = s.bounds {
                if point.x < min.x || point.x > max.x || point.y < min.y || point.y > max.y {
                    continue;
                }
            }
            hits.push(RaycastHit {
                object: s.object,
                point,
                normal: DVec3::Z,
                distance: t,
                layer: s.layer,
            });
        }
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    }
}

pub struct Ortho;

impl Projection for Ortho {
    fn world_to_screen(&self, p: DVec3) -> Option<Point> {
        Some(Point::new(p.x * PIXELS_PER_METRE, -p.y * PIXELS_PER_METRE))
    }
}

struct Scripted(Rc<RefCell<PointerSample>>);

impl PointerSource for Scripted {
    fn sample(&mut self, _: &FrameTime) -> PointerSample {
        let mut state = self.0.borrow_mut();
        let sample = state.clone();
        state.button = ButtonEdge::NoChange;
        state.scroll = Vec2::ZERO;
        sample
    }
}

/// Test-side handle on a scripted pointer.
#[derive(Clone)]
pub struct Hand {
    pub id: PointerId,
    state: Rc<RefCell<PointerSample>>,
}

impl Hand {
    /// Aim from the origin through `point`.
    pub fn aim(&self, point: DVec3) {
        let end = point.normalize() * 20.0;
        self.state.borrow_mut().ray = PointerSample::straight(DVec3::ZERO, end).ray;
    }

    /// Aim at `(x, y)` on the plane `z`.
    pub fn aim_at(&self, x: f64, y: f64, z: f64) {
        self.aim(DVec3::new(x, y, z));
    }

    pub fn press(&self) {
        self.state.borrow_mut().button = ButtonEdge::Pressed;
    }

    pub fn release(&self) {
        self.state.borrow_mut().button = ButtonEdge::Released;
    }

    pub fn scroll(&self, y: f64) {
        self.state.borrow_mut().scroll = Vec2::new(0.0, y);
    }

    pub fn set_ray(&self, points: &[DVec3]) {
        self.state.borrow_mut().ray = points.iter().copied().collect();
    }
}

pub struct Rig {
    pub scene: SceneTree,
    pub walls: Walls,
    pub router: InputRouter,
    pub log: Log,
    pub projection: bool,
    frame: u64,
}

impl Rig {
    pub fn new() -> Self {
        Self::with_settings(RouterSettings::default())
    }

    pub fn with_settings(settings: RouterSettings) -> Self {
        Self {
            scene: SceneTree::new(),
            walls: Walls::default(),
            router: InputRouter::new(settings, EventBus::new()).expect("valid settings"),
            log: Log::default(),
            projection: true,
            frame: 0,
        }
    }

    pub fn hand(&mut self, id: u32) -> Hand {
        let state = Rc::new(RefCell::new(PointerSample::straight(
            DVec3::ZERO,
            DVec3::new(0.0, 0.0, -20.0),
        )));
        let id = PointerId(id);
        self.router
            .register(Pointer::new(id, Scripted(state.clone())))
            .expect("fresh pointer id");
        Hand { id, state }
    }

    /// An object with an unbounded surface at `z`.
    pub fn wall(&mut self, parent: Option<ObjectId>, layer: Layer, z: f64) -> ObjectId {
        let object = self.scene.insert(parent, layer);
        self.walls.0.push(Surface {
            object,
            z,
            layer,
            bounds: None,
        });
        object
    }

    /// An object with a surface at `z` covering `min..=max` in `x`/`y`.
    pub fn panel(
        &mut self,
        parent: Option<ObjectId>,
        layer: Layer,
        z: f64,
        min: (f64, f64),
        max: (f64, f64),
    ) -> ObjectId {
        let object = self.scene.insert(parent, layer);
        self.walls.0.push(Surface {
            object,
            z,
            layer,
            bounds: Some((Point::new(min.0, min.1), Point::new(max.0, max.1))),
        });
        object
    }

    /// An object with no surface of its own.
    pub fn group(&mut self, parent: Option<ObjectId>, layer: Layer) -> ObjectId {
        self.scene.insert(parent, layer)
    }

    pub fn recorder(&self, object: ObjectId, caps: EventMask) -> Recorder {
        Recorder {
            object,
            caps,
            log: self.log.clone(),
            configuration: None,
            reticle: None,
        }
    }

    pub fn attach(&mut self, object: ObjectId, flavor: UiFlavor, caps: EventMask) {
        let recorder = self.recorder(object, caps);
        self.attach_recorder(object, flavor, recorder);
    }

    pub fn attach_recorder(&mut self, object: ObjectId, flavor: UiFlavor, recorder: Recorder) {
        let handler = match flavor {
            UiFlavor::Conventional => Handler::conventional(recorder),
            UiFlavor::Spatial => Handler::spatial(recorder),
        };
        assert!(self.scene.attach(object, handler), "object is alive");
    }

    pub fn subscribe(&mut self, channel: Channel, kinds: EventMask) -> BusLog {
        let log = BusLog::default();
        let sink = log.clone();
        self.router
            .bus_mut()
            .subscribe(channel, kinds, move |e: &BusEvent| {
                sink.borrow_mut().push((e.kind, e.object, e.domain));
            });
        log
    }

    pub fn time(&self) -> FrameTime {
        FrameTime {
            frame: self.frame,
            now: self.frame as f64 * FRAME,
            delta: FRAME,
        }
    }

    /// Advance to the next frame and tick.
    pub fn step(&mut self) -> Option<TickSummary> {
        self.frame += 1;
        self.tick_again()
    }

    /// Tick without advancing the frame index.
    pub fn tick_again(&mut self) -> Option<TickSummary> {
        let time = self.time();
        let projection: Option<&dyn Projection> = if self.projection { Some(&Ortho) } else { None };
        let mut ctx = FrameContext {
            scene: &mut self.scene,
            raycaster: &self.walls,
            projection,
            time,
        };
        self.router.tick(&mut ctx)
    }

    pub fn steps(&mut self, n: usize) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Drain delivered handler events.
    pub fn take(&self) -> Vec<Delivered> {
        core::mem::take(&mut *self.log.borrow_mut())
    }

    /// Drain delivered kinds, dropping moves.
    pub fn take_kinds(&self) -> Vec<(ObjectId, EventKind)> {
        self.take()
            .into_iter()
            .filter(|(_, kind, _)| *kind != EventKind::Move)
            .map(|(object, kind, _)| (object, kind))
            .collect()
    }
}
