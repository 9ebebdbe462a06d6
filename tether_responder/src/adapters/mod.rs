// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene adapters.
//!
//! ## Feature
//!
//! [`tree`] is enabled with `scene_tree` (on by default).

#[cfg(feature = "scene_tree")]
pub mod tree;
