// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial position resolution.
//!
//! Exactly one [`Strategy`] computes a pointer's current and target position
//! each frame, chosen by priority:
//!
//! 1. [`Strategy::UiPlane`]: dragging flat UI. The ray is projected onto the
//!    dragged panel's plane; current and target coincide.
//! 2. [`Strategy::SpatialDrag`]: dragging a spatial widget. The drag distance
//!    follows scroll input and the raw point at that distance along the ray is
//!    stabilized and smoothed into the current position.
//! 3. [`Strategy::World`]: the pointer addresses World content or is captured.
//!    A configuration-supplied [`PositionOverride`] runs first. The default
//!    follows the ray like a spatial drag while a World press is held on an
//!    object or being dragged; otherwise it takes the hit point, else the
//!    invalid-distance point. Filtering only applies while dragging or while
//!    captured without a press.
//! 4. [`Strategy::RaycastFollow`]: a valid hit; both positions are the hit point.
//! 5. [`Strategy::InvalidDistance`]: nothing hit; both positions lie at the
//!    fixed invalid distance along the ray.
//!
//! Rays with fewer than two usable points resolve with [`Strategy::NoRay`].
//!
//! [`PositionOverride`]: tether_event_state::config::PositionOverride

use glam::DVec3;
use tether_event_state::config::{Configuration, PositionQuery};
use tether_event_state::stabilize::smooth;
use tether_responder::scene::{Plane, SceneGraph, ancestry};
use tether_responder::types::{Domain, ObjectId, UiFlavor};

use crate::pointer::Pointer;
use crate::raycast::{Segment, segment_at};
use crate::record::{Pipeline, PointerEventRecord};
use crate::settings::{FrameTime, RouterSettings};

/// Strategy that produced a frame's position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Projection onto a dragged panel's plane.
    UiPlane,
    /// Distance along the ray, stabilized and smoothed.
    SpatialDrag,
    /// World content or a captured pointer.
    World,
    /// The raycast hit point.
    RaycastFollow,
    /// The fixed invalid distance along the ray.
    InvalidDistance,
    /// No usable ray this frame.
    NoRay,
}

/// Drag distance after applying vertical scroll.
///
/// `max(minimum, distance + scroll_y * sensitivity * delta_time)`.
pub fn advance_distance(
    distance: f64,
    scroll_y: f64,
    sensitivity: f64,
    delta_time: f64,
    minimum: f64,
) -> f64 {
    (distance + scroll_y * sensitivity * delta_time).max(minimum)
}

/// Plane of the dragged object, or of its nearest owner that has one.
fn drag_plane(scene: &dyn SceneGraph, object: Option<ObjectId>) -> Option<Plane> {
    ancestry(scene, object?)
        .into_iter()
        .find_map(|o| scene.plane(o))
}

fn place(record: &mut PointerEventRecord, point: DVec3) {
    record.spatial = point;
    record.spatial_target = point;
    record.stabilizer.reset(point);
}

/// Dead-zone then smoothing, both measured from the current position.
fn filter(record: &mut PointerEventRecord, raw: DVec3, config: &Configuration, dt: f64) {
    let radius = config.stabilization_radius_at(record.distance);
    record.stabilizer.reset(record.spatial);
    let stabilized = record.stabilizer.stabilize(raw, radius);
    record.spatial = smooth(record.spatial, stabilized, config.smoothing_time, dt);
    record.spatial_target = raw;
}

fn follow_ray(
    record: &mut PointerEventRecord,
    segment: &Segment,
    config: &Configuration,
    settings: &RouterSettings,
    scroll_y: f64,
    dt: f64,
    filtered: bool,
) {
    record.distance = advance_distance(
        record.distance,
        scroll_y,
        settings.scroll_distance_sensitivity,
        dt,
        settings.minimum_distance,
    );
    let raw = segment.at(record.distance);
    if filtered {
        filter(record, raw, config, dt);
    } else {
        place(record, raw);
    }
}

/// Resolve the pointer's spatial position for this frame.
pub(crate) fn resolve(
    pointer: &Pointer,
    record: &mut PointerEventRecord,
    scene: &dyn SceneGraph,
    settings: &RouterSettings,
    time: &FrameTime,
) -> Strategy {
    let ray = pointer.ray();
    let index = record
        .gesture
        .pose()
        .map_or(record.raycast.segment_index, |pose| pose.segment_index);
    let (Some(segment), Some(first)) = (segment_at(ray, index), segment_at(ray, 0)) else {
        record.segment = None;
        if let Some(&point) = ray.first() {
            place(record, point);
        }
        return Strategy::NoRay;
    };
    record.segment = Some(segment);

    let config = pointer.configuration();
    let dt = time.delta;
    let scroll_y = pointer.scroll().y;
    let dragging = record.gesture.is_dragging();
    let hit = record.raycast.hit;
    let invalid = first.at(settings.invalid_raycast_distance + pointer.distance_offset);

    if dragging && record.pipeline == Some(Pipeline::Ui) {
        if let Some(flavor) = record.ui.drag_flavor {
            if flavor == UiFlavor::Conventional {
                if let Some(plane) = drag_plane(scene, record.ui.drag) {
                    place(record, plane.project_ray(segment.origin, segment.direction()));
                    return Strategy::UiPlane;
                }
            }
            follow_ray(record, &segment, config, settings, scroll_y, dt, true);
            return Strategy::SpatialDrag;
        }
    }

    let world = match record.pipeline {
        Some(pipeline) => pipeline == Pipeline::World,
        None => record.target_domain == Domain::World,
    };
    if world || record.captured {
        let pressed = record.gesture.is_pressed();
        let filtered = dragging || (record.captured && !pressed);
        if let Some(custom) = &config.position_override {
            let query = PositionQuery {
                ray_origin: segment.origin,
                ray_direction: segment.direction(),
                hit_point: hit.map(|h| h.point),
                distance: record.distance,
                previous: record.spatial,
                pressed,
                dragging,
                delta_time: dt,
            };
            if let Some(resolved) = custom(&query) {
                record.spatial = resolved.current;
                record.spatial_target = resolved.target;
                record.stabilizer.reset(resolved.current);
                return Strategy::World;
            }
        }
        if dragging || (pressed && record.world.press_object.is_some()) {
            follow_ray(record, &segment, config, settings, scroll_y, dt, filtered);
        } else {
            let target = hit.map_or(invalid, |h| h.point);
            if filtered {
                filter(record, target, config, dt);
            } else {
                place(record, target);
            }
        }
        return Strategy::World;
    }

    match hit {
        Some(hit) => {
            place(record, hit.point);
            Strategy::RaycastFollow
        }
        None => {
            place(record, invalid);
            Strategy::InvalidDistance
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::{PointerSample, PointerSource};
    use crate::raycast::{RaycastHit, RaycastResult};
    use alloc::sync::Arc;
    use kurbo::{Point, Vec2};
    use smallvec::smallvec;
    use tether_event_state::config::ResolvedPosition;
    use tether_event_state::drag::PressPose;
    use tether_responder::adapters::tree::SceneTree;
    use tether_responder::types::{Layer, PointerId};

    const EPS: f64 = 1e-9;

    struct Fixed(PointerSample);

    impl PointerSource for Fixed {
        fn sample(&mut self, _: &FrameTime) -> PointerSample {
            self.0.clone()
        }
    }

    fn pointer(sample: PointerSample) -> Pointer {
        let mut p = Pointer::new(PointerId(1), Fixed(sample));
        p.refresh(&FrameTime::default());
        p
    }

    fn forward() -> PointerSample {
        PointerSample::straight(DVec3::ZERO, DVec3::new(0.0, 0.0, -20.0))
    }

    fn frame() -> FrameTime {
        FrameTime {
            frame: 1,
            now: 1.0,
            delta: 0.5,
        }
    }

    fn hit_at(object: ObjectId, z: f64) -> RaycastResult {
        RaycastResult {
            hit: Some(RaycastHit {
                object,
                point: DVec3::new(0.0, 0.0, z),
                normal: DVec3::Z,
                distance: -z,
                layer: Layer::DEFAULT,
            }),
            segment_index: 0,
            ray_distance: -z,
        }
    }

    fn press(record: &mut PointerEventRecord, distance: f64) {
        record.gesture.press(PressPose {
            screen: Point::ZERO,
            spatial: DVec3::new(0.0, 0.0, -distance),
            spatial_target: DVec3::new(0.0, 0.0, -distance),
            distance,
            segment_index: 0,
        });
        record.distance = distance;
        record.stabilizer.reset(DVec3::new(0.0, 0.0, -distance));
        record.spatial = DVec3::new(0.0, 0.0, -distance);
    }

    #[test]
    fn miss_lands_at_invalid_distance_plus_offset() {
        let scene = SceneTree::new();
        let mut p = pointer(forward());
        p.distance_offset = 1.5;
        let mut record = PointerEventRecord::new(PointerId(1), 0.3);
        record.target_domain = Domain::ConventionalUi;
        let settings = RouterSettings::default();

        let strategy = resolve(&p, &mut record, &scene, &settings, &frame());
        assert_eq!(strategy, Strategy::InvalidDistance);
        assert!((record.spatial - DVec3::new(0.0, 0.0, -11.5)).length() < EPS);
        assert_eq!(record.spatial, record.spatial_target);
    }

    #[test]
    fn ui_hit_is_followed() {
        let mut scene = SceneTree::new();
        let panel = scene.insert(None, Layer::UI);
        let mut record = PointerEventRecord::new(PointerId(1), 0.3);
        record.raycast = hit_at(panel, -2.0);
        record.target_domain = Domain::ConventionalUi;

        let strategy = resolve(
            &pointer(forward()),
            &mut record,
            &scene,
            &RouterSettings::default(),
            &frame(),
        );
        assert_eq!(strategy, Strategy::RaycastFollow);
        assert_eq!(record.spatial, DVec3::new(0.0, 0.0, -2.0));
    }

    #[test]
    fn short_ray_keeps_or_pins_position() {
        let scene = SceneTree::new();
        let settings = RouterSettings::default();
        let mut record = PointerEventRecord::new(PointerId(1), 0.3);
        record.spatial = DVec3::X;

        let empty = pointer(PointerSample::default());
        assert_eq!(resolve(&empty, &mut record, &scene, &settings, &frame()), Strategy::NoRay);
        assert_eq!(record.spatial, DVec3::X);

        let single = pointer(PointerSample {
            ray: smallvec![DVec3::Y],
            ..PointerSample::default()
        });
        assert_eq!(resolve(&single, &mut record, &scene, &settings, &frame()), Strategy::NoRay);
        assert_eq!(record.spatial, DVec3::Y);
    }

    #[test]
    fn spatial_drag_holds_inside_dead_zone() {
        let mut scene = SceneTree::new();
        let knob = scene.insert(None, Layer::DEFAULT);
        let settings = RouterSettings::default();
        let mut record = PointerEventRecord::new(PointerId(1), 0.3);
        record.pipeline = Some(Pipeline::Ui);
        record.ui.drag = Some(knob);
        record.ui.drag_flavor = Some(UiFlavor::Spatial);
        press(&mut record, 2.0);
        record.gesture.promote();

        // Aim 0.005 m sideways at 2 m: inside the 0.01 m radius.
        let p = pointer(PointerSample::straight(DVec3::ZERO, DVec3::new(0.05, 0.0, -20.0)));
        assert_eq!(resolve(&p, &mut record, &scene, &settings, &frame()), Strategy::SpatialDrag);
        assert_eq!(record.spatial, DVec3::new(0.0, 0.0, -2.0));
        assert!((record.spatial_target.x - 2.0 * 0.05 / 20.0_f64.hypot(0.05)).abs() < EPS);
    }

    #[test]
    fn smoothed_drag_holds_inside_dead_zone() {
        let mut scene = SceneTree::new();
        let knob = scene.insert(None, Layer::DEFAULT);
        let settings = RouterSettings::default();
        let smoothed = Configuration {
            smoothing_time: 0.5,
            ..Configuration::default()
        };
        let mut record = PointerEventRecord::new(PointerId(1), 0.3);
        record.pipeline = Some(Pipeline::Ui);
        record.ui.drag = Some(knob);
        record.ui.drag_flavor = Some(UiFlavor::Spatial);
        press(&mut record, 2.0);
        record.gesture.promote();

        // A 10 cm swing: the cursor eases part of the way towards it.
        let mut p = pointer(PointerSample::straight(DVec3::ZERO, DVec3::new(1.0, 0.0, -20.0)));
        p.set_configuration(smoothed.clone());
        resolve(&p, &mut record, &scene, &settings, &frame());
        let eased = record.spatial;
        assert!(eased.x > 0.0 && eased.x < record.spatial_target.x - 0.01);

        // Aim straight through the eased cursor: the raw point lies well inside
        // the dead-zone around it, so nothing moves.
        let mut p = pointer(PointerSample::straight(DVec3::ZERO, eased.normalize() * 20.0));
        p.set_configuration(smoothed);
        resolve(&p, &mut record, &scene, &settings, &frame());
        assert!((record.spatial_target - eased).length() < 0.01);
        assert!((record.spatial - eased).length() < EPS);
    }

    #[test]
    fn scroll_pushes_spatial_drag_out() {
        let mut scene = SceneTree::new();
        let knob = scene.insert(None, Layer::DEFAULT);
        let settings = RouterSettings::default();
        let mut record = PointerEventRecord::new(PointerId(1), 0.3);
        record.pipeline = Some(Pipeline::Ui);
        record.ui.drag = Some(knob);
        record.ui.drag_flavor = Some(UiFlavor::Spatial);
        press(&mut record, 2.0);
        record.gesture.promote();

        let mut sample = forward();
        sample.scroll = Vec2::new(0.0, 2.0);
        resolve(&pointer(sample), &mut record, &scene, &settings, &frame());
        assert!((record.distance - 3.0).abs() < EPS);
        assert!((record.spatial_target - DVec3::new(0.0, 0.0, -3.0)).length() < EPS);
        // At 3 m the dead-zone has grown to 0.02 m and trails the raw point by that much.
        assert!((record.spatial - DVec3::new(0.0, 0.0, -2.98)).length() < EPS);
    }

    #[test]
    fn flat_drag_projects_onto_panel_plane() {
        let mut scene = SceneTree::new();
        let panel = scene.insert(None, Layer::UI);
        let handle = scene.insert(Some(panel), Layer::UI);
        scene.set_plane(panel, Plane::new(DVec3::new(0.0, 0.0, -2.0), DVec3::Z));
        let mut record = PointerEventRecord::new(PointerId(1), 0.3);
        record.pipeline = Some(Pipeline::Ui);
        record.ui.drag = Some(handle);
        record.ui.drag_flavor = Some(UiFlavor::Conventional);
        press(&mut record, 2.0);
        record.gesture.promote();

        let p = pointer(PointerSample::straight(DVec3::ZERO, DVec3::new(1.0, 0.0, -10.0)));
        let strategy = resolve(&p, &mut record, &scene, &RouterSettings::default(), &frame());
        assert_eq!(strategy, Strategy::UiPlane);
        assert!((record.spatial - DVec3::new(0.2, 0.0, -2.0)).length() < EPS);
        assert_eq!(record.spatial, record.spatial_target);
    }

    #[test]
    fn override_replaces_world_strategy() {
        let scene = SceneTree::new();
        let mut p = pointer(forward());
        p.set_configuration(Configuration {
            position_override: Some(Arc::new(|q: &PositionQuery| {
                Some(ResolvedPosition {
                    current: q.ray_origin + DVec3::Y,
                    target: q.ray_origin + DVec3::Y * 2.0,
                })
            })),
            ..Configuration::default()
        });
        let mut record = PointerEventRecord::new(PointerId(1), 0.3);

        let strategy = resolve(&p, &mut record, &scene, &RouterSettings::default(), &frame());
        assert_eq!(strategy, Strategy::World);
        assert_eq!(record.spatial, DVec3::Y);
        assert_eq!(record.spatial_target, DVec3::Y * 2.0);
    }

    #[test]
    fn world_press_on_object_follows_ray() {
        let mut scene = SceneTree::new();
        let rock = scene.insert(None, Layer::DEFAULT);
        let mut record = PointerEventRecord::new(PointerId(1), 0.3);
        record.pipeline = Some(Pipeline::World);
        record.world.pressed = true;
        record.world.press_object = Some(rock);
        press(&mut record, 4.0);

        // The ray turned away from the rock; the cursor stays 4 m out, unfiltered.
        let p = pointer(PointerSample::straight(DVec3::ZERO, DVec3::new(0.0, -20.0, 0.0)));
        assert_eq!(
            resolve(&p, &mut record, &scene, &RouterSettings::default(), &frame()),
            Strategy::World
        );
        assert!((record.spatial - DVec3::new(0.0, -4.0, 0.0)).length() < EPS);
        assert_eq!(record.spatial, record.spatial_target);
    }

    #[test]
    fn distance_never_drops_below_minimum() {
        assert_eq!(advance_distance(1.0, -100.0, 1.0, 1.0, 0.1), 0.1);
        assert_eq!(advance_distance(1.0, 1.0, 2.0, 0.5, 0.1), 2.0);
    }
}
