// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tether Router: per-frame routing of ray-based pointers in VR/AR scenes.
//!
//! ## Overview
//!
//! Every frame, for each registered [`Pointer`](crate::pointer::Pointer), the
//! [`InputRouter`](crate::router::InputRouter) decides which of three competing
//! domains the pointer addresses (flat UI panels, spatial widgets, or ordinary
//! World content), where the pointer's 3D cursor sits, and which
//! press/click/drag/hover transitions fire.
//!
//! The router owns nothing of the scene. The host lends it, per frame, a
//! [`SceneGraph`](tether_responder::scene::SceneGraph), a
//! [`RaycastProvider`](crate::raycast::RaycastProvider) and a
//! [`Projection`](crate::settings::Projection) through a
//! [`FrameContext`](crate::router::FrameContext).
//!
//! - UI interactions go to the nearest capable
//!   [`Handler`](tether_responder::handler::Handler) along the hit's ownership
//!   chain and are mirrored on the UI bus channel.
//! - World interactions have no handlers; they are published on the outside-UI
//!   channel of the router's [`EventBus`](tether_responder::bus::EventBus).
//!
//! A press is handled by exactly one of those two pipelines, locked when the
//! button goes down.
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use glam::DVec3;
//! use kurbo::Point;
//! use tether_responder::adapters::tree::SceneTree;
//! use tether_responder::bus::EventBus;
//! use tether_responder::event::UiEventData;
//! use tether_responder::handler::{Handler, PointerHandler};
//! use tether_responder::types::{EventKind, EventMask, Layer, LayerMask, ObjectId, PointerId};
//! use tether_router::pointer::{ButtonEdge, Pointer, PointerSample, PointerSource};
//! use tether_router::raycast::{RaycastHit, RaycastProvider, Segment};
//! use tether_router::router::{FrameContext, InputRouter};
//! use tether_router::settings::{FrameTime, Projection, RouterSettings};
//!
//! // A button that counts clicks.
//! struct Button(Rc<Cell<u32>>);
//! impl PointerHandler<UiEventData> for Button {
//!     fn capabilities(&self) -> EventMask { EventMask::ENTER | EventMask::CLICK }
//!     fn handle(&mut self, kind: EventKind, _: &UiEventData) {
//!         if kind == EventKind::Click { self.0.set(self.0.get() + 1); }
//!     }
//! }
//!
//! // A panel at z = -2 filling the whole view.
//! struct Panel(ObjectId);
//! impl RaycastProvider for Panel {
//!     fn raycast(&self, s: &Segment, _: LayerMask, hits: &mut Vec<RaycastHit>) {
//!         let d = s.direction();
//!         if d.z < 0.0 {
//!             let t = (-2.0 - s.origin.z) / d.z;
//!             hits.push(RaycastHit { object: self.0, point: s.at(t), normal: DVec3::Z, distance: t, layer: Layer::UI });
//!         }
//!     }
//! }
//!
//! struct Flat;
//! impl Projection for Flat {
//!     fn world_to_screen(&self, p: DVec3) -> Option<Point> { Some(Point::new(p.x * 100.0, p.y * 100.0)) }
//! }
//!
//! // Presses on frame 1, releases on frame 2.
//! struct Trigger;
//! impl PointerSource for Trigger {
//!     fn sample(&mut self, time: &FrameTime) -> PointerSample {
//!         let mut s = PointerSample::straight(DVec3::ZERO, DVec3::new(0.0, 0.0, -10.0));
//!         s.button = match time.frame { 1 => ButtonEdge::Pressed, 2 => ButtonEdge::Released, _ => ButtonEdge::NoChange };
//!         s
//!     }
//! }
//!
//! let clicks = Rc::new(Cell::new(0));
//! let mut scene = SceneTree::new();
//! let button = scene.insert(None, Layer::UI);
//! scene.attach(button, Handler::conventional(Button(clicks.clone())));
//!
//! let mut router = InputRouter::new(RouterSettings::default(), EventBus::new()).unwrap();
//! router.register(Pointer::new(PointerId(0), Trigger)).unwrap();
//!
//! for frame in 0..3 {
//!     let mut ctx = FrameContext {
//!         scene: &mut scene,
//!         raycaster: &Panel(button),
//!         projection: Some(&Flat),
//!         time: FrameTime { frame, now: frame as f64 * 0.1, delta: 0.1 },
//!     };
//!     router.tick(&mut ctx);
//! }
//! assert_eq!(clicks.get(), 1);
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod capture;
pub mod error;
mod hover;
pub mod pointer;
pub mod position;
mod press;
pub mod raycast;
pub mod record;
pub mod router;
pub mod settings;
