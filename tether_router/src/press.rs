// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Button, drag and scroll pipelines.
//!
//! A press is handled by the UI pipeline or the World pipeline, picked from the
//! target domain when the button goes down and kept until it comes back up.
//!
//! - UI presses go to the nearest down handler along the hit chain (else the
//!   nearest click handler). The nearest drag handler is resolved at the same
//!   time and told it may become the drag target.
//! - World presses have no handlers; they are published on the outside-UI bus
//!   channel and may become drags only when somebody listens for World drags.
//!
//! Drag promotion compares movement since the press against a threshold: the
//! pointer configuration's spatial test for spatial widgets and World content,
//! the router's pixel threshold for flat UI.

use tether_event_state::drag::{PressPose, exceeds_screen_threshold};
use tether_responder::bus::Channel;
use tether_responder::dispatcher::Dispatcher;
use tether_responder::handler::Handler;
use tether_responder::types::{Domain, EventKind, EventMask, UiFlavor};

use crate::capture::Captures;
use crate::pointer::{ButtonEdge, Pointer};
use crate::position::advance_distance;
use crate::record::{Pipeline, PointerEventRecord};
use crate::settings::{FrameTime, RouterSettings};

/// Act on this frame's button edge.
pub(crate) fn process_button(
    pointer: &Pointer,
    record: &mut PointerEventRecord,
    d: &mut Dispatcher<'_>,
    captures: &mut Captures,
    settings: &RouterSettings,
    time: &FrameTime,
) {
    match pointer.button() {
        ButtonEdge::NoChange => {}
        ButtonEdge::Pressed => {
            if record.gesture.is_pressed() {
                // The release edge was lost; finish that press first.
                release(record, d, captures);
            }
            press(pointer, record, d, settings, time);
        }
        ButtonEdge::Released => release(record, d, captures),
    }
}

fn press(
    pointer: &Pointer,
    record: &mut PointerEventRecord,
    d: &mut Dispatcher<'_>,
    settings: &RouterSettings,
    time: &FrameTime,
) {
    let hit = record.raycast.hit;
    let invalid = settings.invalid_raycast_distance + pointer.distance_offset;
    let pipeline = Pipeline::for_domain(record.target_domain);

    record.distance = hit.map_or(invalid, |h| h.distance);
    record.press_screen = record.screen;
    record.press_spatial = record.spatial;
    record.stabilizer.reset(record.spatial);
    record.gesture.press(PressPose {
        screen: record.screen,
        spatial: record.spatial,
        spatial_target: record.spatial_target,
        distance: if hit.is_some() {
            record.raycast.ray_distance
        } else {
            invalid
        },
        segment_index: record.raycast.segment_index,
    });
    record.pipeline = Some(pipeline);

    let leaf = record.raycast.object();
    match pipeline {
        Pipeline::Ui => {
            let target = d
                .nearest_handler(leaf, EventKind::Down)
                .or_else(|| d.nearest_handler(leaf, EventKind::Click));
            record.clicks.on_press(target, time.now);
            record.ui.press = target;

            let drag = d.nearest_handler(leaf, EventKind::Drag);
            let flavor = drag.and_then(|o| d.scene().handler(o).map(Handler::flavor));
            record.ui.drag = drag;
            record.ui.drag_flavor = flavor;
            record.drag_domain = flavor.map(Domain::from);

            let data = record.event_data();
            if let Some(target) = target.filter(|&t| d.handles(t, EventKind::Down)) {
                d.dispatch(Some(target), EventKind::Down, &data);
            }
            if drag.is_some() {
                d.dispatch(drag, EventKind::InitializePotentialDrag, &data);
            }
        }
        Pipeline::World => {
            record.world.pressed = true;
            record.world.press_object = leaf;
            record.world.draggable = d
                .bus()
                .has_subscribers(Channel::OutsideUi, EventMask::DRAGGING);
            record.clicks.on_press(leaf, time.now);
            let data = record.event_data();
            d.publish_outside(EventKind::Down, leaf, &data);
        }
    }
}

fn release(record: &mut PointerEventRecord, d: &mut Dispatcher<'_>, captures: &mut Captures) {
    // Built before the gesture resets so end-of-drag payloads still say dragging.
    let data = record.event_data();
    let Some(outcome) = record.gesture.release() else {
        return;
    };
    let current = record.raycast.object();
    let pointer = record.pointer;

    match record.pipeline.unwrap_or(Pipeline::Ui) {
        Pipeline::Ui => {
            let pressed = record.ui.press;
            if pressed.is_some() {
                d.dispatch(pressed, EventKind::Up, &data);
            }
            if outcome.click
                && pressed.is_some()
                && d.nearest_handler(current, EventKind::Click) == pressed
            {
                d.dispatch(pressed, EventKind::Click, &data);
            } else if outcome.was_dragging {
                d.dispatch_hierarchy(current, EventKind::Drop, &data);
            }
            if outcome.was_dragging {
                if let Some(drag) = record.ui.drag {
                    d.dispatch(Some(drag), EventKind::EndDrag, &data);
                    captures.release(drag, pointer);
                }
            }
        }
        Pipeline::World => {
            let pressed = record.world.press_object;
            d.publish_outside(EventKind::Up, pressed, &data);
            if outcome.click && current == pressed {
                d.publish_outside(EventKind::Click, current, &data);
            } else if outcome.was_dragging {
                d.publish_outside(EventKind::Drop, current, &data);
            }
            if outcome.was_dragging {
                d.publish_outside(EventKind::EndDrag, pressed, &data);
                if let Some(object) = pressed {
                    captures.release(object, pointer);
                }
            }
        }
    }
    record.clear_press();
}

/// End an open press without a click or drop, as when the pointer goes away.
///
/// The pressed target still gets its up and a drag in progress its end-drag.
pub(crate) fn cancel_press(
    record: &mut PointerEventRecord,
    d: &mut Dispatcher<'_>,
    captures: &mut Captures,
) {
    let data = record.event_data();
    let Some(outcome) = record.gesture.release() else {
        return;
    };
    let pointer = record.pointer;

    match record.pipeline.unwrap_or(Pipeline::Ui) {
        Pipeline::Ui => {
            if record.ui.press.is_some() {
                d.dispatch(record.ui.press, EventKind::Up, &data);
            }
            if outcome.was_dragging {
                if let Some(drag) = record.ui.drag {
                    d.dispatch(Some(drag), EventKind::EndDrag, &data);
                    captures.release(drag, pointer);
                }
            }
        }
        Pipeline::World => {
            let pressed = record.world.press_object;
            d.publish_outside(EventKind::Up, pressed, &data);
            if outcome.was_dragging {
                d.publish_outside(EventKind::EndDrag, pressed, &data);
                if let Some(object) = pressed {
                    captures.release(object, pointer);
                }
            }
        }
    }
    record.clear_press();
}

/// Promote a held press to a drag, or advance a drag in progress.
pub(crate) fn process_drag(
    pointer: &Pointer,
    record: &mut PointerEventRecord,
    d: &mut Dispatcher<'_>,
    captures: &mut Captures,
    settings: &RouterSettings,
) {
    let Some(pipeline) = record.pipeline else {
        return;
    };
    let id = record.pointer;
    let object = match pipeline {
        Pipeline::Ui => record.ui.drag,
        Pipeline::World => record.world.press_object,
    };

    if record.gesture.is_dragging() {
        if let Some(object) = object.filter(|&o| !captures.holds(o, id)) {
            log::debug!(
                "{id:?} lost its drag of {object:?} to {:?}",
                captures.owner(object)
            );
            record.gesture.abandon_drag();
            match pipeline {
                Pipeline::Ui => {
                    record.ui.drag = None;
                    record.ui.drag_flavor = None;
                    record.drag_domain = None;
                }
                Pipeline::World => record.world.draggable = false,
            }
            return;
        }
        let data = record.event_data();
        match pipeline {
            Pipeline::Ui => {
                d.dispatch(object, EventKind::Drag, &data);
            }
            Pipeline::World => d.publish_outside(EventKind::Drag, object, &data),
        }
        return;
    }

    if !record.moving {
        return;
    }
    let Some(pose) = record.gesture.pose().copied() else {
        return;
    };
    let config = pointer.configuration();
    let spatial_test = || {
        config.exceeds_drag_threshold(pose.spatial_target, record.spatial_target, pose.distance)
    };
    let exceeded = match pipeline {
        Pipeline::Ui if object.is_none() => false,
        Pipeline::Ui if record.ui.drag_flavor == Some(UiFlavor::Conventional) => {
            exceeds_screen_threshold(pose.screen, record.screen, settings.pixel_drag_threshold)
        }
        Pipeline::Ui => spatial_test(),
        Pipeline::World => record.world.draggable && spatial_test(),
    };
    if !exceeded || !record.gesture.promote() {
        return;
    }

    if config.start_drag_from_press_position {
        record.spatial = pose.spatial;
        record.stabilizer.reset(pose.spatial);
    }
    if let Some(object) = object {
        if let Some(previous) = captures.claim(object, id) {
            log::debug!("{id:?} took the drag of {object:?} from {previous:?}");
        }
    }
    let data = record.event_data();
    match pipeline {
        Pipeline::Ui => {
            d.dispatch(object, EventKind::BeginDrag, &data);
        }
        Pipeline::World => d.publish_outside(EventKind::BeginDrag, object, &data),
    }
}

/// Deliver this frame's scroll delta.
///
/// Scrolling is ignored while dragging; spatial drags consume it as distance.
/// Scrolling at nothing moves the free cursor along the ray by adjusting the
/// pointer's distance offset.
pub(crate) fn process_scroll(
    pointer: &mut Pointer,
    record: &PointerEventRecord,
    d: &mut Dispatcher<'_>,
    settings: &RouterSettings,
    time: &FrameTime,
) {
    let scroll = pointer.scroll();
    if (scroll.x == 0.0 && scroll.y == 0.0) || record.gesture.is_dragging() {
        return;
    }
    let target = record.hover.target().or_else(|| record.raycast.object());
    let pipeline = record
        .pipeline
        .unwrap_or_else(|| Pipeline::for_domain(record.target_domain));
    let data = record.event_data();
    match pipeline {
        Pipeline::Ui => {
            d.dispatch_hierarchy(target, EventKind::Scroll, &data);
        }
        Pipeline::World => {
            if target.is_none() && !record.gesture.is_pressed() {
                let base = settings.invalid_raycast_distance;
                let moved = advance_distance(
                    base + pointer.distance_offset,
                    scroll.y,
                    settings.scroll_distance_sensitivity,
                    time.delta,
                    settings.minimum_distance,
                );
                pointer.distance_offset = moved - base;
            }
            d.publish_outside(EventKind::Scroll, target, &data);
        }
    }
}
