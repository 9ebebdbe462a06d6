// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raycasting seam and polyline casting.
//!
//! The host's physics or UI layer implements [`RaycastProvider`] for single
//! segments. The router walks a pointer's ray polyline segment by segment and
//! stops at the first one that reports a live hit.

use alloc::boxed::Box;
use alloc::vec::Vec;

use glam::DVec3;
use tether_responder::scene::SceneGraph;
use tether_responder::types::{Layer, LayerMask, ObjectId, PointerId};

/// One straight piece of a ray polyline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Start point.
    pub origin: DVec3,
    /// End point.
    pub end: DVec3,
}

impl Segment {
    /// Segment from `origin` to `end`.
    pub fn new(origin: DVec3, end: DVec3) -> Self {
        Self { origin, end }
    }

    /// Length of the segment.
    pub fn length(&self) -> f64 {
        self.origin.distance(self.end)
    }

    /// Unit direction, or zero for a degenerate segment.
    pub fn direction(&self) -> DVec3 {
        (self.end - self.origin).normalize_or_zero()
    }

    /// Returns `true` when both ends coincide.
    pub fn is_degenerate(&self) -> bool {
        self.origin == self.end
    }

    /// Point `distance` along the segment's direction from its origin.
    pub fn at(&self, distance: f64) -> DVec3 {
        self.origin + self.direction() * distance
    }
}

/// A candidate hit reported by a [`RaycastProvider`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastHit {
    /// Object owning the hit surface.
    pub object: ObjectId,
    /// World-space hit point.
    pub point: DVec3,
    /// Surface normal at the hit point.
    pub normal: DVec3,
    /// Distance from the segment origin.
    pub distance: f64,
    /// Layer of the hit surface.
    pub layer: Layer,
}

/// Intersects single ray segments with the scene.
pub trait RaycastProvider {
    /// Append hits along `segment` on layers in `mask` to `hits`, nearest first.
    ///
    /// Must be deterministic for identical inputs within a frame.
    fn raycast(&self, segment: &Segment, mask: LayerMask, hits: &mut Vec<RaycastHit>);
}

/// Outcome of casting a whole polyline.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RaycastResult {
    /// The nearest live hit of the first segment that had one.
    pub hit: Option<RaycastHit>,
    /// Index of that segment, or of the first usable segment when nothing was hit.
    pub segment_index: usize,
    /// Distance from the ray origin to the hit, summed over earlier segments.
    pub ray_distance: f64,
}

impl RaycastResult {
    /// Returns `true` when something was hit.
    pub fn is_valid(&self) -> bool {
        self.hit.is_some()
    }

    /// Owner of the hit.
    pub fn object(&self) -> Option<ObjectId> {
        self.hit.map(|h| h.object)
    }
}

/// Rewrites a miss, for example to keep a pointer captured by a modal surface.
///
/// Called with the pointer and its ray only when the cast hit nothing; returning
/// a result with a hit marks the pointer as captured for the frame.
pub type Interceptor = Box<dyn FnMut(PointerId, &[DVec3]) -> Option<RaycastResult>>;

/// Segment `index` of `ray`, falling back to the first non-degenerate segment.
pub fn segment_at(ray: &[DVec3], index: usize) -> Option<Segment> {
    let mut segments = ray.windows(2).map(|w| Segment::new(w[0], w[1]));
    match ray.get(index..index + 2) {
        Some(&[origin, end]) if origin != end => Some(Segment::new(origin, end)),
        _ => segments.find(|s| !s.is_degenerate()),
    }
}

/// Cast `ray` segment by segment against `provider`.
///
/// Degenerate segments are skipped, hits on dead objects are discarded, and a
/// ray with fewer than two points is not cast at all. `scratch` is reused
/// between calls to avoid allocation.
pub fn cast_polyline(
    provider: &dyn RaycastProvider,
    scene: &dyn SceneGraph,
    ray: &[DVec3],
    mask: LayerMask,
    scratch: &mut Vec<RaycastHit>,
) -> RaycastResult {
    let mut first_usable = None;
    let mut travelled = 0.0;
    for (index, pair) in ray.windows(2).enumerate() {
        let segment = Segment::new(pair[0], pair[1]);
        if segment.is_degenerate() {
            continue;
        }
        first_usable.get_or_insert(index);
        scratch.clear();
        provider.raycast(&segment, mask, scratch);
        let live = scratch
            .iter()
            .find(|hit| mask.includes(hit.layer) && scene.is_alive(hit.object));
        if let Some(&hit) = live {
            return RaycastResult {
                hit: Some(hit),
                segment_index: index,
                ray_distance: travelled + hit.distance,
            };
        }
        travelled += segment.length();
    }
    RaycastResult {
        hit: None,
        segment_index: first_usable.unwrap_or(0),
        ray_distance: 0.0,
    }
}
