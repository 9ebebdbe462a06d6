// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover step: enter/exit along ownership chains, move, and per-object
//! configuration.
//!
//! Hover is frozen while the button is held, so a release resynchronises it in
//! the same frame. When the addressed object (the first non-World object of
//! the hit chain) changes, the pointer adopts that object's configuration and
//! reticle, or the router defaults when it supplies none.

use tether_event_state::hover::HoverEvent;
use tether_responder::dispatcher::Dispatcher;
use tether_responder::handler::Handler;
use tether_responder::scene::SceneGraph;
use tether_responder::types::{Domain, EventKind, ObjectId};

use crate::pointer::Pointer;
use crate::record::PointerEventRecord;
use crate::settings::Defaults;

/// Replace the pointer's configuration and reticle with those of `addressed`.
pub(crate) fn adopt(
    pointer: &mut Pointer,
    scene: &dyn SceneGraph,
    addressed: Option<ObjectId>,
    defaults: &Defaults,
) {
    let handler = addressed.and_then(|o| scene.handler(o));
    pointer.set_configuration(
        handler
            .and_then(Handler::configuration)
            .unwrap_or_else(|| defaults.configuration.clone()),
    );
    pointer.set_reticle(
        handler
            .and_then(Handler::reticle)
            .unwrap_or(defaults.reticle),
    );
}

/// Diff the hovered chain against this frame's hit chain.
pub(crate) fn process_hover(
    pointer: &mut Pointer,
    record: &mut PointerEventRecord,
    d: &mut Dispatcher<'_>,
    defaults: &Defaults,
) {
    if record.gesture.is_pressed() {
        return;
    }
    let data = record.event_data();

    if record.hover.hovered() != record.chain.as_slice() {
        for transition in record.hover.update_chain(&record.chain) {
            match transition {
                HoverEvent::Exit(object) => d.dispatch(Some(object), EventKind::Exit, &data),
                HoverEvent::Enter(object) => d.dispatch(Some(object), EventKind::Enter, &data),
            };
        }
        if record.enter_domain != record.target_domain {
            log::trace!(
                "{:?} entered {:?}",
                record.pointer,
                record.target_domain
            );
        }
        record.enter_domain = record.target_domain;
        if record.addressed != record.target_object {
            record.addressed = record.target_object;
            adopt(pointer, d.scene(), record.addressed, defaults);
        }
    }

    if record.moving {
        for &object in record.hover.hovered() {
            d.dispatch(Some(object), EventKind::Move, &data);
        }
    }
}

/// Exit every hovered object, leaf first.
pub(crate) fn clear_hover(record: &mut PointerEventRecord, d: &mut Dispatcher<'_>) {
    let data = record.event_data();
    for transition in record.hover.clear() {
        if let HoverEvent::Exit(object) = transition {
            d.dispatch(Some(object), EventKind::Exit, &data);
        }
    }
    record.enter_domain = Domain::World;
}
