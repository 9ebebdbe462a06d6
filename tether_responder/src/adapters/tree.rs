// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory scene tree implementing [`SceneGraph`].
//!
//! Engines keep their own scene graph and implement [`SceneGraph`] over it. This
//! tree is for tools, tests and small applications that have nothing else.
//!
//! Removing an object removes its whole subtree; ids are never reused, so a
//! stale id simply reports dead.

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::handler::Handler;
use crate::scene::{Plane, SceneGraph};
use crate::types::{Layer, ObjectId};

#[derive(Debug)]
struct Node {
    parent: Option<ObjectId>,
    layer: Layer,
    plane: Option<Plane>,
    handler: Option<Handler>,
}

/// A parent-linked object tree.
#[derive(Debug, Default)]
pub struct SceneTree {
    next: u64,
    nodes: HashMap<ObjectId, Node>,
}

impl SceneTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new object under `parent` (or as a root) on `layer`.
    ///
    /// A dead `parent` makes the new object a root.
    pub fn insert(&mut self, parent: Option<ObjectId>, layer: Layer) -> ObjectId {
        let id = ObjectId(self.next);
        self.next += 1;
        let parent = parent.filter(|p| self.nodes.contains_key(p));
        self.nodes.insert(
            id,
            Node {
                parent,
                layer,
                plane: None,
                handler: None,
            },
        );
        id
    }

    /// Attach `handler` to `object`, replacing any previous one.
    ///
    /// Returns `false` if `object` is dead.
    pub fn attach(&mut self, object: ObjectId, handler: Handler) -> bool {
        match self.nodes.get_mut(&object) {
            Some(node) => {
                node.handler = Some(handler);
                true
            }
            None => false,
        }
    }

    /// Remove and return the handler of `object`.
    pub fn detach(&mut self, object: ObjectId) -> Option<Handler> {
        self.nodes.get_mut(&object)?.handler.take()
    }

    /// Set the plane a flat UI object lies in.
    pub fn set_plane(&mut self, object: ObjectId, plane: Plane) {
        if let Some(node) = self.nodes.get_mut(&object) {
            node.plane = Some(plane);
        }
    }

    /// Move `object` to `layer`.
    pub fn set_layer(&mut self, object: ObjectId, layer: Layer) {
        if let Some(node) = self.nodes.get_mut(&object) {
            node.layer = layer;
        }
    }

    /// Remove `object` and everything it owns.
    ///
    /// Returns the number of objects removed.
    pub fn remove(&mut self, object: ObjectId) -> usize {
        if !self.nodes.contains_key(&object) {
            return 0;
        }
        let mut doomed = Vec::from([object]);
        let mut i = 0;
        while i < doomed.len() {
            let owner = doomed[i];
            doomed.extend(
                self.nodes
                    .iter()
                    .filter(|(_, node)| node.parent == Some(owner))
                    .map(|(&id, _)| id),
            );
            i += 1;
        }
        for id in &doomed {
            self.nodes.remove(id);
        }
        doomed.len()
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when the tree holds no objects.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl SceneGraph for SceneTree {
    fn parent(&self, object: ObjectId) -> Option<ObjectId> {
        self.nodes.get(&object)?.parent
    }

    fn is_alive(&self, object: ObjectId) -> bool {
        self.nodes.contains_key(&object)
    }

    fn layer(&self, object: ObjectId) -> Layer {
        self.nodes
            .get(&object)
            .map_or(Layer::DEFAULT, |node| node.layer)
    }

    fn plane(&self, object: ObjectId) -> Option<Plane> {
        self.nodes.get(&object)?.plane
    }

    fn handler(&self, object: ObjectId) -> Option<&Handler> {
        self.nodes.get(&object)?.handler.as_ref()
    }

    fn handler_mut(&mut self, object: ObjectId) -> Option<&mut Handler> {
        self.nodes.get_mut(&object)?.handler.as_mut()
    }
}
