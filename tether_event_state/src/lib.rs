// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tether Event State: per-pointer interaction state machines for spatial input.
//!
//! This crate provides small, focused state machines that a ray-based pointer
//! router composes every frame. Each module handles one interaction concern:
//!
//! - [`hover`]: enter/exit transitions between two leaf→root ownership chains
//! - [`click`]: multi-click counting over a fixed click-speed window
//! - [`drag`]: press/drag gesture phases and drag threshold tests
//! - [`stabilize`]: tremor dead-zone and exponential smoothing of 3D positions
//! - [`config`]: the per-pointer [`Configuration`](config::Configuration) value type
//!
//! The crate does not know about scene graphs, raycasts or handlers. Callers feed
//! it pre-computed chains, positions and timestamps and interpret the results.
//!
//! ## Hover chains
//!
//! ```rust
//! use tether_event_state::hover::{HoverEvent, HoverState};
//!
//! let mut hover = HoverState::new();
//!
//! // Chains are leaf first: button 3 inside panel 2 inside canvas 1.
//! assert_eq!(
//!     hover.update_chain(&[3, 2, 1]).as_slice(),
//!     &[HoverEvent::Enter(3), HoverEvent::Enter(2), HoverEvent::Enter(1)]
//! );
//!
//! // Moving to a sibling only touches the part below the common ancestor.
//! assert_eq!(
//!     hover.update_chain(&[4, 2, 1]).as_slice(),
//!     &[HoverEvent::Exit(3), HoverEvent::Enter(4)]
//! );
//! ```
//!
//! ## Stabilization
//!
//! ```rust
//! use glam::DVec3;
//! use tether_event_state::stabilize::Stabilizer;
//!
//! let mut stabilizer = Stabilizer::new();
//! stabilizer.reset(DVec3::ZERO);
//!
//! // Inside the 1 cm dead-zone nothing moves.
//! let held = stabilizer.stabilize(DVec3::new(0.005, 0.0, 0.0), 0.01);
//! assert_eq!(held, DVec3::ZERO);
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

pub mod click;
pub mod config;
pub mod drag;
pub mod hover;
pub mod stabilize;

/// Scale a base distance linearly once `distance` passes `reference`.
///
/// Returns `base + max(0, distance - reference) * base`. Both the stabilization
/// radius and the spatial drag threshold grow this way so that far-away targets
/// tolerate proportionally larger hand motion.
///
/// ```
/// use tether_event_state::distance_scaled;
///
/// // Closer than the reference: the base value applies unchanged.
/// assert_eq!(distance_scaled(0.5, 2.0, 1.0), 0.5);
/// // Two units past the reference: base + 2 * base.
/// assert_eq!(distance_scaled(0.5, 2.0, 4.0), 1.5);
/// ```
#[must_use]
pub fn distance_scaled(base: f64, reference: f64, distance: f64) -> f64 {
    base + (distance - reference).max(0.0) * base
}
