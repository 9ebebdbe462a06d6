// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher: deliver interactions to scene objects and mirror them on the bus.
//!
//! Delivery to one object follows fixed rules:
//!
//! - A missing or dead object is a no-op; nothing is delivered or published.
//! - The object's [`Handler`](crate::handler::Handler) is asked first as a
//!   conventional handler, then as a spatial one (an object carries one flavour,
//!   so at most one answers). The answering flavour is the domain recorded for
//!   the event.
//! - If no handler answers, the object is classified with
//!   [`classify`](crate::classify::classify).
//! - The event is then published on [`Channel::Ui`] for UI domains, or on
//!   [`Channel::OutsideUi`] for World.
//!
//! Hierarchical delivery ([`Dispatcher::dispatch_hierarchy`]) walks from a hit
//! object up its ownership chain and delivers to the nearest object that
//! handles the kind.
//!
//! ## Minimal example
//!
//! ```
//! use tether_responder::adapters::tree::SceneTree;
//! use tether_responder::bus::EventBus;
//! use tether_responder::classify::LayerDomains;
//! use tether_responder::dispatcher::Dispatcher;
//! use tether_responder::event::{EventData, UiEventData};
//! use tether_responder::handler::{Handler, PointerHandler};
//! use tether_responder::types::{Domain, EventKind, EventMask, Layer};
//!
//! struct Panel;
//! impl PointerHandler<UiEventData> for Panel {
//!     fn capabilities(&self) -> EventMask { EventMask::CLICK }
//!     fn handle(&mut self, _: EventKind, _: &UiEventData) {}
//! }
//!
//! let mut scene = SceneTree::new();
//! let panel = scene.insert(None, Layer::UI);
//! scene.attach(panel, Handler::conventional(Panel));
//! let label = scene.insert(Some(panel), Layer::UI);
//!
//! let mut bus = EventBus::new();
//! let layers = LayerDomains::default();
//! let mut dispatcher = Dispatcher::new(&mut scene, &mut bus, &layers);
//!
//! // The label has no handler; the click lands on its owning panel.
//! let data = EventData::detached();
//! assert_eq!(dispatcher.dispatch_hierarchy(Some(label), EventKind::Click, &data), Some(panel));
//! assert_eq!(dispatcher.dispatch(None, EventKind::Click, &data), None);
//! ```

use crate::bus::{Channel, EventBus};
use crate::classify::{LayerDomains, classify};
use crate::event::{BusEvent, EventData};
use crate::scene::{SceneGraph, ancestry};
use crate::types::{Domain, EventKind, ObjectId};

/// Delivers events for one pipeline step.
pub struct Dispatcher<'a> {
    scene: &'a mut dyn SceneGraph,
    bus: &'a mut EventBus,
    layers: &'a LayerDomains,
}

impl core::fmt::Debug for Dispatcher<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("bus", &self.bus)
            .field("layers", &self.layers)
            .finish_non_exhaustive()
    }
}

impl<'a> Dispatcher<'a> {
    /// Borrow the scene, bus and layer table for a dispatch pass.
    pub fn new(
        scene: &'a mut dyn SceneGraph,
        bus: &'a mut EventBus,
        layers: &'a LayerDomains,
    ) -> Self {
        Self { scene, bus, layers }
    }

    /// The scene being dispatched into.
    pub fn scene(&self) -> &dyn SceneGraph {
        &*self.scene
    }

    /// The bus events are mirrored on.
    pub fn bus(&self) -> &EventBus {
        self.bus
    }

    /// Layer fallback table used for classification.
    pub fn layers(&self) -> &LayerDomains {
        self.layers
    }

    /// Domain of `object`.
    pub fn classify(&self, object: ObjectId) -> Domain {
        classify(&*self.scene, object, self.layers)
    }

    /// Whether `object` carries a handler reacting to `kind`.
    pub fn handles(&self, object: ObjectId, kind: EventKind) -> bool {
        self.scene
            .handler(object)
            .is_some_and(|handler| handler.handles(kind))
    }

    /// Nearest object, starting at `start` and walking up its owners, whose
    /// handler reacts to `kind`.
    pub fn nearest_handler(&self, start: Option<ObjectId>, kind: EventKind) -> Option<ObjectId> {
        let start = start?;
        ancestry(&*self.scene, start)
            .into_iter()
            .find(|&object| self.handles(object, kind))
    }

    /// Deliver `kind` to `object` and publish it on the bus.
    ///
    /// Returns the domain recorded for the event, or `None` when the object is
    /// missing or dead.
    pub fn dispatch(
        &mut self,
        object: Option<ObjectId>,
        kind: EventKind,
        data: &EventData,
    ) -> Option<Domain> {
        let object = object.filter(|&o| self.scene.is_alive(o))?;
        let answered = self
            .scene
            .handler_mut(object)
            .and_then(|handler| handler.deliver(kind, data));
        let domain = match answered {
            Some(flavor) => flavor.into(),
            None => self.classify(object),
        };
        let channel = if domain.is_ui() {
            Channel::Ui
        } else {
            Channel::OutsideUi
        };
        self.bus
            .publish(channel, &BusEvent::new(kind, Some(object), domain, data));
        Some(domain)
    }

    /// Deliver `kind` to the nearest handler of `start`'s chain.
    ///
    /// Returns the object that received it.
    pub fn dispatch_hierarchy(
        &mut self,
        start: Option<ObjectId>,
        kind: EventKind,
        data: &EventData,
    ) -> Option<ObjectId> {
        let target = self.nearest_handler(start, kind)?;
        self.dispatch(Some(target), kind, data);
        Some(target)
    }

    /// Publish a World interaction on [`Channel::OutsideUi`] without a handler.
    ///
    /// Used for presses and drags on World content, which have no per-object
    /// handlers; `object` may be `None` when nothing was hit.
    pub fn publish_outside(&mut self, kind: EventKind, object: Option<ObjectId>, data: &EventData) {
        self.bus.publish(
            Channel::OutsideUi,
            &BusEvent::new(kind, object, Domain::World, data),
        );
    }
}
