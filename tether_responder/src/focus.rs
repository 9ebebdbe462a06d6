// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Logical focus: which object (a text field, a slider being edited) receives
//! per-frame update callbacks independent of where pointers aim.
//!
//! Focus is tracked as a root→leaf ownership path so that moving focus between
//! siblings only deselects and selects the parts of the path that changed.
//!
//! - Deselect transitions run inner-most first.
//! - Select transitions run outer-most first.
//!
//! ```
//! use tether_responder::focus::{FocusEvent, FocusState};
//! let mut f: FocusState<u32> = FocusState::new();
//! assert_eq!(f.update_path(&[1, 2]).as_slice(), &[FocusEvent::Select(1), FocusEvent::Select(2)]);
//! assert_eq!(f.update_path(&[1, 3]).as_slice(), &[FocusEvent::Deselect(2), FocusEvent::Select(3)]);
//! assert_eq!(f.focused(), Some(3));
//! ```

use smallvec::SmallVec;

use crate::scene::{Chain, SceneGraph, ancestry};
use crate::types::{EventKind, ObjectId};

/// A focus transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FocusEvent<K> {
    /// Focus moves onto the object.
    Select(K),
    /// Focus leaves the object.
    Deselect(K),
}

impl<K: Copy> FocusEvent<K> {
    /// The object this transition concerns.
    pub fn target(&self) -> K {
        match *self {
            Self::Select(k) | Self::Deselect(k) => k,
        }
    }

    /// Event kind delivered for this transition.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Select(_) => EventKind::Select,
            Self::Deselect(_) => EventKind::Deselect,
        }
    }
}

/// Transitions produced by one focus change.
pub type FocusTransitions<K> = SmallVec<[FocusEvent<K>; 8]>;

/// Focus state over root→leaf paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusState<K: Copy + Eq> {
    path: SmallVec<[K; 8]>,
}

impl<K: Copy + Eq> Default for FocusState<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq> FocusState<K> {
    /// No focus.
    pub fn new() -> Self {
        Self {
            path: SmallVec::new(),
        }
    }

    /// Current root→leaf focus path.
    pub fn path(&self) -> &[K] {
        &self.path
    }

    /// The focused leaf, if any.
    pub fn focused(&self) -> Option<K> {
        self.path.last().copied()
    }

    /// Drop focus, deselecting the whole path inner-most first.
    pub fn clear(&mut self) -> FocusTransitions<K> {
        let out = self.path.iter().rev().map(|&k| FocusEvent::Deselect(k)).collect();
        self.path.clear();
        out
    }

    /// Move focus to `new_path` and return the transitions.
    pub fn update_path(&mut self, new_path: &[K]) -> FocusTransitions<K> {
        let shared = self
            .path
            .iter()
            .zip(new_path)
            .take_while(|(a, b)| a == b)
            .count();

        let mut out = FocusTransitions::new();
        out.extend(self.path[shared..].iter().rev().map(|&k| FocusEvent::Deselect(k)));
        out.extend(new_path[shared..].iter().map(|&k| FocusEvent::Select(k)));
        self.path.clear();
        self.path.extend_from_slice(new_path);
        out
    }
}

/// Root→leaf path of `object` through its live owners.
///
/// Empty when `object` is dead.
pub fn focus_path(scene: &dyn SceneGraph, object: ObjectId) -> Chain {
    let mut chain = ancestry(scene, object);
    chain.reverse();
    chain
}
