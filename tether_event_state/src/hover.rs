// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover state helper: diff ownership chains into enter/exit transitions.
//!
//! ## Usage
//!
//! 1) Resolve the object under the pointer and walk its ownership chain from
//!    the hit object (leaf) up to the root.
//! 2) Call [`HoverState::update_chain`] with that leaf→root chain.
//! 3) Deliver the returned [`HoverEvent`]s in order.
//!
//! Only the part of each chain below the nearest common ancestor changes:
//! the previous chain is walked upward and every object is exited until the
//! common ancestor is reached (excluded); then the new chain is walked upward
//! and every object is entered until the same ancestor. Both walks go from the
//! leaf towards the root.
//!
//! An empty chain means nothing is under the pointer; every hovered object
//! exits and the state clears.
//!
//! ## Minimal example
//!
//! ```
//! use tether_event_state::hover::{HoverEvent, HoverState};
//!
//! let mut h: HoverState<u32> = HoverState::new();
//! assert_eq!(h.update_chain(&[2, 1]).as_slice(), &[HoverEvent::Enter(2), HoverEvent::Enter(1)]);
//! assert_eq!(h.update_chain(&[]).as_slice(), &[HoverEvent::Exit(2), HoverEvent::Exit(1)]);
//! assert!(h.is_empty());
//! ```

use smallvec::SmallVec;

/// Inline capacity used for ownership chains and transition lists.
pub const CHAIN_INLINE: usize = 8;

/// A hover transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// The pointer starts hovering the given object.
    Enter(K),
    /// The pointer stops hovering the given object.
    Exit(K),
}

/// Transitions produced by one [`HoverState::update_chain`] call, exits first.
pub type HoverTransitions<K> = SmallVec<[HoverEvent<K>; CHAIN_INLINE]>;

/// The hovered ownership chain of one pointer, leaf first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverState<K: Copy + Eq> {
    hovered: SmallVec<[K; CHAIN_INLINE]>,
}

impl<K: Copy + Eq> Default for HoverState<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq> HoverState<K> {
    /// Create an empty hover state.
    pub fn new() -> Self {
        Self {
            hovered: SmallVec::new(),
        }
    }

    /// The hovered chain, leaf first.
    pub fn hovered(&self) -> &[K] {
        &self.hovered
    }

    /// The innermost hovered object, if any.
    pub fn target(&self) -> Option<K> {
        self.hovered.first().copied()
    }

    /// Whether `key` is part of the hovered chain.
    pub fn contains(&self, key: K) -> bool {
        self.hovered.contains(&key)
    }

    /// Returns `true` when nothing is hovered.
    pub fn is_empty(&self) -> bool {
        self.hovered.is_empty()
    }

    /// Exit every hovered object, innermost first, and clear the state.
    pub fn clear(&mut self) -> HoverTransitions<K> {
        let out = self.hovered.iter().map(|&k| HoverEvent::Exit(k)).collect();
        self.hovered.clear();
        out
    }

    /// Replace the hovered chain and return the transitions between the two.
    ///
    /// `chain` is ordered from the hit object up to the root. The returned list
    /// holds every exit (previous leaf upward) before every enter (new leaf upward).
    pub fn update_chain(&mut self, chain: &[K]) -> HoverTransitions<K> {
        if chain.is_empty() {
            return self.clear();
        }

        // Nearest common ancestor: the first object of the new chain that the
        // previous chain also contains.
        let common = chain
            .iter()
            .enumerate()
            .find_map(|(new_idx, k)| {
                self.hovered
                    .iter()
                    .position(|h| h == k)
                    .map(|old_idx| (old_idx, new_idx))
            });
        let (old_end, new_end) = common.unwrap_or((self.hovered.len(), chain.len()));

        let mut out = HoverTransitions::new();
        out.extend(self.hovered[..old_end].iter().map(|&k| HoverEvent::Exit(k)));
        out.extend(chain[..new_end].iter().map(|&k| HoverEvent::Enter(k)));

        self.hovered.clear();
        self.hovered.extend_from_slice(chain);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn fresh_chain_enters_leaf_first() {
        let mut h: HoverState<u32> = HoverState::new();
        let ev = h.update_chain(&[3, 2, 1]);
        assert_eq!(
            ev.as_slice(),
            &[
                HoverEvent::Enter(3),
                HoverEvent::Enter(2),
                HoverEvent::Enter(1)
            ]
        );
        assert_eq!(h.target(), Some(3));
    }

    #[test]
    fn same_chain_is_silent() {
        let mut h: HoverState<u32> = HoverState::new();
        let _ = h.update_chain(&[3, 2, 1]);
        assert!(h.update_chain(&[3, 2, 1]).is_empty());
    }

    #[test]
    fn moving_to_parent_only_exits_child() {
        let mut h: HoverState<u32> = HoverState::new();
        let _ = h.update_chain(&[3, 2, 1]);
        let ev = h.update_chain(&[2, 1]);
        assert_eq!(ev.as_slice(), &[HoverEvent::Exit(3)]);
        assert_eq!(h.hovered(), &[2, 1]);
    }

    #[test]
    fn moving_to_child_only_enters_child() {
        let mut h: HoverState<u32> = HoverState::new();
        let _ = h.update_chain(&[2, 1]);
        let ev = h.update_chain(&[5, 2, 1]);
        assert_eq!(ev.as_slice(), &[HoverEvent::Enter(5)]);
    }

    #[test]
    fn disjoint_chains_exit_all_then_enter_all() {
        let mut h: HoverState<u32> = HoverState::new();
        let _ = h.update_chain(&[3, 2, 1]);
        let ev = h.update_chain(&[9, 8]);
        assert_eq!(
            ev.as_slice(),
            &[
                HoverEvent::Exit(3),
                HoverEvent::Exit(2),
                HoverEvent::Exit(1),
                HoverEvent::Enter(9),
                HoverEvent::Enter(8),
            ]
        );
    }

    #[test]
    fn empty_chain_exits_everything() {
        let mut h: HoverState<u32> = HoverState::new();
        let _ = h.update_chain(&[3, 2]);
        let ev = h.update_chain(&[]);
        assert_eq!(ev.as_slice(), &[HoverEvent::Exit(3), HoverEvent::Exit(2)]);
        assert!(h.is_empty());
        assert!(h.update_chain(&[]).is_empty());
    }

    // Every object alternates enter/exit and the totals balance once the
    // pointer leaves everything.
    #[test]
    fn enter_and_exit_counts_balance() {
        let mut h: HoverState<u32> = HoverState::new();
        let sequence: [&[u32]; 5] = [&[3, 2, 1], &[4, 2, 1], &[7, 6], &[4, 2, 1], &[]];
        let mut log: Vec<HoverEvent<u32>> = Vec::new();
        for chain in sequence {
            log.extend(h.update_chain(chain));
        }

        let enters = log.iter().filter(|e| matches!(e, HoverEvent::Enter(_))).count();
        let exits = log.iter().filter(|e| matches!(e, HoverEvent::Exit(_))).count();
        assert_eq!(enters, exits);

        for key in [1_u32, 2, 3, 4, 6, 7] {
            let mut inside = false;
            for e in &log {
                match *e {
                    HoverEvent::Enter(k) if k == key => {
                        assert!(!inside, "double enter for {key}");
                        inside = true;
                    }
                    HoverEvent::Exit(k) if k == key => {
                        assert!(inside, "exit without enter for {key}");
                        inside = false;
                    }
                    _ => {}
                }
            }
            assert!(!inside, "{key} still hovered");
        }
    }
}
