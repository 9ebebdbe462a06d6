// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene-graph seam.
//!
//! The router never owns scene objects. It asks a [`SceneGraph`] for ownership
//! (parent links), liveness, layers, handlers and, for flat UI, the plane a
//! panel lies in.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use glam::DVec3;
use smallvec::SmallVec;

use crate::handler::Handler;
use crate::types::{Layer, ObjectId};

/// Upper bound on ownership chain length; deeper (or cyclic) chains are cut.
pub const MAX_CHAIN_DEPTH: usize = 256;

/// A leaf→root ownership chain.
pub type Chain = SmallVec<[ObjectId; 8]>;

/// An oriented plane, used to project rays onto flat UI while dragging.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    /// A point on the plane (the panel's pivot).
    pub pivot: DVec3,
    /// Unit normal, pointing out of the panel's front face.
    pub normal: DVec3,
}

impl Plane {
    /// Build a plane, normalizing `normal`.
    pub fn new(pivot: DVec3, normal: DVec3) -> Self {
        Self {
            pivot,
            normal: normal.normalize_or_zero(),
        }
    }

    /// Intersect the ray `origin + t * direction` (`t >= 0`) with the plane.
    ///
    /// Returns `None` when the ray is parallel to the plane or points away from it.
    pub fn intersect_ray(&self, origin: DVec3, direction: DVec3) -> Option<DVec3> {
        let denom = direction.dot(self.normal);
        if denom.abs() <= f64::EPSILON {
            return None;
        }
        let t = (self.pivot - origin).dot(self.normal) / denom;
        (t >= 0.0).then(|| origin + direction * t)
    }

    /// Orthogonal projection of `point` onto the plane.
    pub fn project_point(&self, point: DVec3) -> DVec3 {
        point - self.normal * (point - self.pivot).dot(self.normal)
    }

    /// Where a ray lands on the plane.
    ///
    /// Uses the ray intersection when there is one; otherwise the ray origin is
    /// carried straight onto the plane from its back side.
    pub fn project_ray(&self, origin: DVec3, direction: DVec3) -> DVec3 {
        self.intersect_ray(origin, direction)
            .unwrap_or_else(|| self.project_point(origin))
    }
}

/// Scene access needed by the classifier, dispatcher and router.
pub trait SceneGraph {
    /// Owning parent of `object`.
    fn parent(&self, object: ObjectId) -> Option<ObjectId>;

    /// Whether `object` still exists.
    fn is_alive(&self, object: ObjectId) -> bool;

    /// Layer of `object`; [`Layer::DEFAULT`] when unknown.
    fn layer(&self, object: ObjectId) -> Layer;

    /// Plane of a flat UI object, used while dragging it.
    fn plane(&self, object: ObjectId) -> Option<Plane>;

    /// Handler attached to `object`.
    fn handler(&self, object: ObjectId) -> Option<&Handler>;

    /// Mutable handler attached to `object`.
    fn handler_mut(&mut self, object: ObjectId) -> Option<&mut Handler>;
}

/// Walk from `leaf` up through its live owners.
///
/// The chain starts at `leaf` and stops at the first missing or dead object.
/// It is empty when `leaf` itself is dead.
pub fn ancestry(scene: &dyn SceneGraph, leaf: ObjectId) -> Chain {
    let mut chain = Chain::new();
    let mut next = Some(leaf);
    while let Some(object) = next {
        if !scene.is_alive(object) || chain.len() >= MAX_CHAIN_DEPTH || chain.contains(&object) {
            break;
        }
        chain.push(object);
        next = scene.parent(object);
    }
    chain
}
