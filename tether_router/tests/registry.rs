// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry, frame bookkeeping, per-object configuration and logical focus.

mod common;

use common::{Ortho, Rig, Walls};
use tether_event_state::config::{Configuration, ReticleData};
use tether_responder::bus::Channel;
use tether_responder::types::{Domain, EventKind, EventMask, Layer, PointerId, UiFlavor};
use tether_router::error::RouterError;
use tether_router::router::{FrameContext, TickSummary};
use tether_router::settings::{DefaultsProvider, FrameTime};

#[test]
fn missing_projection_skips_pointers_until_restored() {
    let mut rig = Rig::new();
    let panel = rig.panel(None, Layer::UI, -2.0, (-0.5, -0.5), (0.5, 0.5));
    rig.attach(panel, UiFlavor::Conventional, EventMask::ENTER);
    let hand = rig.hand(1);
    hand.aim_at(0.0, 0.0, -2.0);

    rig.projection = false;
    assert_eq!(
        rig.step(),
        Some(TickSummary {
            processed: 0,
            skipped: 1
        })
    );
    assert!(rig.take().is_empty());
    assert!(rig.router.record(hand.id).unwrap().hovered().is_empty());

    rig.projection = true;
    assert_eq!(
        rig.step(),
        Some(TickSummary {
            processed: 1,
            skipped: 0
        })
    );
    assert_eq!(rig.take_kinds(), [(panel, EventKind::Enter)]);
}

#[test]
fn each_frame_is_processed_once() {
    let mut rig = Rig::new();
    let panel = rig.panel(None, Layer::UI, -2.0, (-0.5, -0.5), (0.5, 0.5));
    rig.attach(panel, UiFlavor::Conventional, EventMask::ENTER | EventMask::CLICK);
    let hand = rig.hand(1);
    hand.aim_at(0.0, 0.0, -2.0);
    rig.step();

    hand.press();
    assert!(rig.step().is_some());
    hand.release();
    assert_eq!(rig.tick_again(), None);
    // The release is still pending and fires on the next frame.
    rig.step();
    assert_eq!(
        rig.take_kinds(),
        [(panel, EventKind::Enter), (panel, EventKind::Click)]
    );

    rig.router.set_active(false);
    assert_eq!(rig.step(), None);
}

#[test]
fn unknown_pointer_is_an_error() {
    let mut rig = Rig::new();
    let walls = Walls::default();
    let mut ctx = FrameContext {
        scene: &mut rig.scene,
        raycaster: &walls,
        projection: Some(&Ortho),
        time: FrameTime::default(),
    };
    assert_eq!(
        rig.router.process_pointer(PointerId(9), &mut ctx),
        Err(RouterError::UnknownPointer(PointerId(9)))
    );
    assert!(matches!(
        rig.router.unregister(PointerId(9), &mut rig.scene),
        Err(RouterError::UnknownPointer(PointerId(9)))
    ));
}

#[test]
fn process_pointer_runs_one_pipeline() {
    let mut rig = Rig::new();
    let panel = rig.panel(None, Layer::UI, -2.0, (-0.5, -0.5), (0.5, 0.5));
    rig.attach(panel, UiFlavor::Conventional, EventMask::ENTER);
    let hand = rig.hand(1);
    let other = rig.hand(2);
    hand.aim_at(0.0, 0.0, -2.0);
    other.aim_at(0.0, 0.0, -2.0);

    let walls = core::mem::take(&mut rig.walls);
    let mut ctx = FrameContext {
        scene: &mut rig.scene,
        raycaster: &walls,
        projection: Some(&Ortho),
        time: FrameTime::default(),
    };
    assert_eq!(rig.router.process_pointer(hand.id, &mut ctx), Ok(true));
    assert_eq!(rig.take(), [(panel, EventKind::Enter, Some(hand.id))]);
    assert!(rig.router.record(other.id).unwrap().hovered().is_empty());
}

#[test]
fn unregistering_mid_drag_closes_press_drag_and_hover() {
    let mut rig = Rig::new();
    let knob = rig.wall(None, Layer::SPATIAL_UI, -2.0);
    rig.attach(
        knob,
        UiFlavor::Spatial,
        EventMask::HOVER | EventMask::DOWN | EventMask::UP | EventMask::CLICK | EventMask::DRAGGING,
    );
    let hand = rig.hand(1);
    hand.aim_at(0.0, 0.0, -2.0);
    rig.step();
    hand.press();
    rig.step();
    hand.aim_at(0.2, 0.0, -2.0);
    rig.step();
    assert_eq!(rig.router.captured_by(knob), Some(hand.id));
    assert_eq!(
        rig.take_kinds(),
        [
            (knob, EventKind::Enter),
            (knob, EventKind::Down),
            (knob, EventKind::BeginDrag),
        ]
    );

    let pointer = rig.router.unregister(hand.id, &mut rig.scene).unwrap();
    assert_eq!(pointer.id(), hand.id);
    assert_eq!(
        rig.take(),
        [
            (knob, EventKind::Up, Some(hand.id)),
            (knob, EventKind::EndDrag, Some(hand.id)),
            (knob, EventKind::Exit, Some(hand.id)),
        ]
    );
    assert!(!rig.router.is_captured(knob));
    assert_eq!(rig.router.pointer_ids().count(), 0);

    rig.step();
    assert!(rig.take().is_empty());
}

#[test]
fn unregistering_exits_the_hovered_chain_leaf_first() {
    let mut rig = Rig::new();
    let window = rig.group(None, Layer::UI);
    let button = rig.panel(Some(window), Layer::UI, -2.0, (-0.5, -0.5), (0.5, 0.5));
    rig.attach(window, UiFlavor::Conventional, EventMask::HOVER);
    rig.attach(button, UiFlavor::Conventional, EventMask::HOVER | EventMask::CLICK);
    let hand = rig.hand(1);
    hand.aim_at(0.0, 0.0, -2.0);
    rig.step();
    rig.take();

    rig.router.unregister(hand.id, &mut rig.scene).unwrap();
    assert_eq!(
        rig.take_kinds(),
        [(button, EventKind::Exit), (window, EventKind::Exit)]
    );
}

#[test]
fn unregistering_a_world_drag_publishes_its_end() {
    let mut rig = Rig::new();
    let rock = rig.wall(None, Layer::DEFAULT, -2.0);
    let outside = rig.subscribe(Channel::OutsideUi, EventMask::DRAGGING | EventMask::UP);
    let hand = rig.hand(1);
    hand.aim_at(0.0, 0.0, -2.0);
    rig.step();
    hand.press();
    rig.step();
    hand.aim_at(0.2, 0.0, -2.0);
    rig.step();
    assert_eq!(rig.router.captured_by(rock), Some(hand.id));
    outside.borrow_mut().clear();

    rig.router.unregister(hand.id, &mut rig.scene).unwrap();
    assert_eq!(
        *outside.borrow(),
        [
            (EventKind::Up, Some(rock), Domain::World),
            (EventKind::EndDrag, Some(rock), Domain::World),
        ]
    );
    assert!(!rig.router.is_captured(rock));
}

#[test]
fn addressed_objects_replace_configuration_and_reticle() {
    let mut rig = Rig::new();
    let panel = rig.panel(None, Layer::UI, -2.0, (-0.5, -0.5), (0.5, 0.5));
    let mut recorder = rig.recorder(panel, EventMask::ENTER);
    recorder.configuration = Some(Configuration {
        drag_threshold: 0.2,
        ..Configuration::default()
    });
    recorder.reticle = Some(ReticleData {
        visible: false,
        ..ReticleData::default()
    });
    rig.attach_recorder(panel, UiFlavor::Conventional, recorder);
    // A bare collider inside the panel addresses the panel.
    let label = rig.panel(Some(panel), Layer::DEFAULT, -1.9, (-0.1, -0.1), (0.1, 0.1));
    let hand = rig.hand(1);

    hand.aim_at(0.3, 0.0, -2.0);
    rig.step();
    let pointer = rig.router.pointer(hand.id).unwrap();
    assert_eq!(pointer.configuration().drag_threshold, 0.2);
    assert!(!pointer.reticle().visible);

    hand.aim_at(0.0, 0.0, -1.9);
    rig.step();
    let record = rig.router.record(hand.id).unwrap();
    assert_eq!(record.hit_chain(), [label, panel]);
    assert_eq!(record.target_object(), Some(panel));
    assert_eq!(rig.router.pointer(hand.id).unwrap().configuration().drag_threshold, 0.2);

    // Nothing addressed: defaults come back whole.
    hand.aim_at(3.0, 0.0, -2.0);
    rig.step();
    let pointer = rig.router.pointer(hand.id).unwrap();
    assert_eq!(pointer.configuration().drag_threshold, 0.05);
    assert_eq!(pointer.reticle(), &ReticleData::default());
}

struct Tool;

impl DefaultsProvider for Tool {
    fn configuration(&self) -> Option<Configuration> {
        Some(Configuration {
            smoothing_time: 0.5,
            ..Configuration::default()
        })
    }
}

#[test]
fn outside_defaults_apply_to_idle_pointers() {
    let mut rig = Rig::new();
    let hand = rig.hand(1);
    rig.step();

    rig.router.set_outside_defaults(Some(Box::new(Tool)));
    let pointer = rig.router.pointer(hand.id).unwrap();
    assert_eq!(pointer.configuration().smoothing_time, 0.5);
    assert_eq!(pointer.reticle(), &ReticleData::default());

    let late = rig.hand(2);
    assert_eq!(rig.router.pointer(late.id).unwrap().configuration().smoothing_time, 0.5);

    rig.router.set_outside_defaults(None);
    assert_eq!(rig.router.pointer(hand.id).unwrap().configuration().smoothing_time, 0.0);
}

#[test]
fn focus_moves_along_ownership_paths() {
    let mut rig = Rig::new();
    let form = rig.group(None, Layer::UI);
    let field = rig.group(Some(form), Layer::UI);
    let button = rig.group(Some(form), Layer::UI);
    rig.attach(form, UiFlavor::Conventional, EventMask::SELECT | EventMask::DESELECT);
    rig.attach(
        field,
        UiFlavor::Conventional,
        EventMask::SELECT | EventMask::DESELECT | EventMask::UPDATE_SELECTED,
    );
    rig.attach(button, UiFlavor::Conventional, EventMask::CLICK);

    rig.router.set_focus(&mut rig.scene, Some(field));
    assert_eq!(rig.router.focused(), Some(field));
    assert_eq!(
        rig.take_kinds(),
        [(form, EventKind::Select), (field, EventKind::Select)]
    );

    rig.steps(2);
    assert_eq!(
        rig.take(),
        [
            (field, EventKind::UpdateSelected, None),
            (field, EventKind::UpdateSelected, None),
        ]
    );

    // The button cannot be selected but still takes focus; the form stays selected.
    rig.router.set_focus(&mut rig.scene, Some(button));
    assert_eq!(rig.take_kinds(), [(field, EventKind::Deselect)]);
    rig.step();
    assert!(rig.take().is_empty());

    // A destroyed focus holder drops focus on the next frame.
    rig.scene.remove(button);
    rig.step();
    assert_eq!(rig.router.focused(), None);
    assert_eq!(rig.take_kinds(), [(form, EventKind::Deselect)]);
}
