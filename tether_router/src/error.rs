// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router errors.
//!
//! Runtime degradation (no projection, short rays, dead targets) is never an
//! error; only misuse of the registry and invalid settings are reported.

use tether_event_state::config::ConfigError;
use tether_responder::types::PointerId;

/// Errors returned by [`InputRouter`](crate::router::InputRouter) and
/// [`RouterSettings::validate`](crate::settings::RouterSettings::validate).
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum RouterError {
    /// The pointer id is not registered.
    #[error("pointer {0:?} is not registered")]
    UnknownPointer(PointerId),
    /// A pointer with this id is already registered.
    #[error("pointer {0:?} is already registered")]
    DuplicatePointer(PointerId),
    /// A router setting is out of range.
    #[error("`{field}` must be a finite, non-negative value (got {value})")]
    InvalidSetting {
        /// Name of the offending setting.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
