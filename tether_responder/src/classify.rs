// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Domain classification of raycast hit owners.
//!
//! An object is classified by what it can do first and by where it lives second:
//!
//! 1. A spatial handler that reacts to [`EventKind::Enter`] makes it [`Domain::SpatialUi`].
//! 2. A conventional handler that reacts to [`EventKind::Enter`] makes it [`Domain::ConventionalUi`].
//! 3. Otherwise its layer is looked up in [`LayerDomains`], which defaults to [`Domain::World`].
//!
//! A hit's *target domain* is the domain of the first object along its
//! ownership chain that is not World, so a bare collider inside a UI panel still
//! routes to the panel.

use crate::handler::Handler;
use crate::scene::SceneGraph;
use crate::types::{Domain, EventKind, Layer, ObjectId, UiFlavor};

/// Layer → domain fallback table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerDomains {
    table: [Domain; Layer::COUNT],
}

impl Default for LayerDomains {
    /// [`Layer::UI`] is conventional UI, [`Layer::SPATIAL_UI`] is spatial UI,
    /// everything else is World.
    fn default() -> Self {
        Self::all_world()
            .with(Layer::UI, Domain::ConventionalUi)
            .with(Layer::SPATIAL_UI, Domain::SpatialUi)
    }
}

impl LayerDomains {
    /// A table mapping every layer to World.
    pub const fn all_world() -> Self {
        Self {
            table: [Domain::World; Layer::COUNT],
        }
    }

    /// Assign `domain` to `layer`.
    #[must_use]
    pub fn with(mut self, layer: Layer, domain: Domain) -> Self {
        self.set(layer, domain);
        self
    }

    /// Assign `domain` to `layer` in place.
    pub fn set(&mut self, layer: Layer, domain: Domain) {
        self.table[layer.index()] = domain;
    }

    /// Domain assigned to `layer`.
    pub fn get(&self, layer: Layer) -> Domain {
        self.table[layer.index()]
    }
}

/// Domain of a single object; dead objects are World.
pub fn classify(scene: &dyn SceneGraph, object: ObjectId, layers: &LayerDomains) -> Domain {
    if !scene.is_alive(object) {
        return Domain::World;
    }
    let handler = scene.handler(object);
    let answers = |flavor: UiFlavor| {
        handler.is_some_and(|h: &Handler| h.flavor() == flavor && h.handles(EventKind::Enter))
    };
    if answers(UiFlavor::Spatial) {
        Domain::SpatialUi
    } else if answers(UiFlavor::Conventional) {
        Domain::ConventionalUi
    } else {
        layers.get(scene.layer(object))
    }
}

/// First non-World object of a leaf→root `chain` and its domain.
///
/// Returns `(Domain::World, None)` when every object is World (or the chain is empty).
pub fn target_domain(
    scene: &dyn SceneGraph,
    chain: &[ObjectId],
    layers: &LayerDomains,
) -> (Domain, Option<ObjectId>) {
    chain
        .iter()
        .find_map(|&object| {
            let domain = classify(scene, object, layers);
            domain.is_ui().then_some((domain, Some(object)))
        })
        .unwrap_or((Domain::World, None))
}
