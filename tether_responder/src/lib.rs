// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tether Responder: who receives a spatial pointer interaction, and who hears about it.
//!
//! ## Overview
//!
//! Scene objects that react to pointers carry a [`Handler`](crate::handler::Handler):
//! either a conventional UI handler (screen-space payloads) or a spatial widget
//! handler (world-space payloads), each with an [`EventMask`](crate::types::EventMask)
//! of the interactions it handles. Objects without handlers are World content.
//!
//! This crate does not raycast and does not track pointer state. It answers
//! three questions for a router:
//!
//! - Which [`Domain`](crate::types::Domain) does an object belong to?
//!   See [`classify`](crate::classify::classify).
//! - Which object along an ownership chain handles a kind of interaction?
//!   See [`Dispatcher::nearest_handler`](crate::dispatcher::Dispatcher::nearest_handler).
//! - Who else observes it? See [`EventBus`](crate::bus::EventBus).
//!
//! ## Scene seam
//!
//! The engine's scene graph is reached through the
//! [`SceneGraph`](crate::scene::SceneGraph) trait: parent links, liveness,
//! layers, UI planes and handler access. With the `scene_tree` feature,
//! [`SceneTree`](crate::adapters::tree::SceneTree) provides a small in-memory
//! implementation.
//!
//! ## Logical focus
//!
//! [`FocusState`](crate::focus::FocusState) tracks the focused object's
//! ownership path and reports select/deselect transitions when focus moves.
//!
//! ## Example
//!
//! ```
//! use tether_responder::adapters::tree::SceneTree;
//! use tether_responder::classify::{LayerDomains, classify};
//! use tether_responder::event::SpatialEventData;
//! use tether_responder::handler::{Handler, PointerHandler};
//! use tether_responder::types::{Domain, EventKind, EventMask, Layer};
//!
//! struct Knob;
//! impl PointerHandler<SpatialEventData> for Knob {
//!     fn capabilities(&self) -> EventMask { EventMask::ENTER | EventMask::DRAGGING }
//!     fn handle(&mut self, _: EventKind, _: &SpatialEventData) {}
//! }
//!
//! let mut scene = SceneTree::new();
//! let knob = scene.insert(None, Layer::DEFAULT);
//! scene.attach(knob, Handler::spatial(Knob));
//! let rock = scene.insert(None, Layer::DEFAULT);
//!
//! let layers = LayerDomains::default();
//! assert_eq!(classify(&scene, knob, &layers), Domain::SpatialUi);
//! assert_eq!(classify(&scene, rock, &layers), Domain::World);
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod bus;
pub mod classify;
pub mod dispatcher;
pub mod event;
pub mod focus;
pub mod handler;
pub mod scene;
pub mod types;
