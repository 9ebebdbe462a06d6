// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag captures: which pointer currently drags which object.
//!
//! Pointers are processed in order, so a capture written by one pointer is
//! visible to every pointer after it in the same frame. A later claim on an
//! already captured object steals it; the previous owner notices on its next
//! pipeline run and drops its drag without an end-drag.

use hashbrown::HashMap;
use tether_responder::types::{ObjectId, PointerId};

/// Object → dragging pointer map.
#[derive(Clone, Debug, Default)]
pub struct Captures {
    owners: HashMap<ObjectId, PointerId>,
}

impl Captures {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer dragging `object`.
    pub fn owner(&self, object: ObjectId) -> Option<PointerId> {
        self.owners.get(&object).copied()
    }

    /// Whether `pointer` still holds `object`.
    pub fn holds(&self, object: ObjectId, pointer: PointerId) -> bool {
        self.owner(object) == Some(pointer)
    }

    /// Record `pointer` as dragging `object`.
    ///
    /// Returns the other pointer it was taken from, if any.
    pub fn claim(&mut self, object: ObjectId, pointer: PointerId) -> Option<PointerId> {
        self.owners
            .insert(object, pointer)
            .filter(|&previous| previous != pointer)
    }

    /// Release `object` if `pointer` holds it.
    pub fn release(&mut self, object: ObjectId, pointer: PointerId) {
        if self.holds(object, pointer) {
            self.owners.remove(&object);
        }
    }

    /// Release everything `pointer` holds.
    pub fn release_all(&mut self, pointer: PointerId) {
        self.owners.retain(|_, owner| *owner != pointer);
    }

    /// Number of captured objects.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    /// Returns `true` when nothing is captured.
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}
