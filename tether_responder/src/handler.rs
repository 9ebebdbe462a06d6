// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handler capabilities attached to scene objects.
//!
//! An object that reacts to pointers carries exactly one [`Handler`], tagged
//! with its flavour when it is attached. Capability questions ("does this object
//! handle clicks?") are answered from the handler's [`EventMask`] instead of
//! probing types at dispatch time.
//!
//! ```
//! use tether_responder::event::UiEventData;
//! use tether_responder::handler::{Handler, PointerHandler};
//! use tether_responder::types::{EventKind, EventMask, UiFlavor};
//!
//! #[derive(Default)]
//! struct Button {
//!     clicks: u32,
//! }
//!
//! impl PointerHandler<UiEventData> for Button {
//!     fn capabilities(&self) -> EventMask {
//!         EventMask::ENTER | EventMask::DOWN | EventMask::CLICK
//!     }
//!
//!     fn handle(&mut self, kind: EventKind, _event: &UiEventData) {
//!         if kind == EventKind::Click {
//!             self.clicks += 1;
//!         }
//!     }
//! }
//!
//! let handler = Handler::conventional(Button::default());
//! assert_eq!(handler.flavor(), UiFlavor::Conventional);
//! assert!(handler.handles(EventKind::Click));
//! assert!(!handler.handles(EventKind::Drag));
//! ```

use alloc::boxed::Box;
use core::fmt;

use tether_event_state::config::{Configuration, ReticleData};

use crate::event::{EventData, SpatialEventData, UiEventData};
use crate::types::{EventKind, EventMask, UiFlavor};

/// Receives pointer interactions with payload `E`.
pub trait PointerHandler<E> {
    /// The event kinds this handler reacts to.
    fn capabilities(&self) -> EventMask;

    /// Handle one interaction. Only called for kinds in [`Self::capabilities`].
    fn handle(&mut self, kind: EventKind, event: &E);

    /// Configuration a pointer adopts while it addresses this object.
    fn configuration(&self) -> Option<Configuration> {
        None
    }

    /// Reticle hints a pointer adopts while it addresses this object.
    fn reticle(&self) -> Option<ReticleData> {
        None
    }
}

/// A handler tagged with its flavour.
pub enum Handler {
    /// Flat UI handler, screen-space payloads.
    Conventional(Box<dyn PointerHandler<UiEventData>>),
    /// Spatial widget handler, world-space payloads.
    Spatial(Box<dyn PointerHandler<SpatialEventData>>),
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("flavor", &self.flavor())
            .field("capabilities", &self.capabilities())
            .finish_non_exhaustive()
    }
}

impl Handler {
    /// Wrap a conventional UI handler.
    pub fn conventional(handler: impl PointerHandler<UiEventData> + 'static) -> Self {
        Self::Conventional(Box::new(handler))
    }

    /// Wrap a spatial widget handler.
    pub fn spatial(handler: impl PointerHandler<SpatialEventData> + 'static) -> Self {
        Self::Spatial(Box::new(handler))
    }

    /// Flavour of the wrapped handler.
    pub fn flavor(&self) -> UiFlavor {
        match self {
            Self::Conventional(_) => UiFlavor::Conventional,
            Self::Spatial(_) => UiFlavor::Spatial,
        }
    }

    /// Capabilities of the wrapped handler.
    pub fn capabilities(&self) -> EventMask {
        match self {
            Self::Conventional(h) => h.capabilities(),
            Self::Spatial(h) => h.capabilities(),
        }
    }

    /// Whether the wrapped handler reacts to `kind`.
    pub fn handles(&self, kind: EventKind) -> bool {
        self.capabilities().contains(kind.mask())
    }

    /// Configuration supplied by the wrapped handler.
    pub fn configuration(&self) -> Option<Configuration> {
        match self {
            Self::Conventional(h) => h.configuration(),
            Self::Spatial(h) => h.configuration(),
        }
    }

    /// Reticle hints supplied by the wrapped handler.
    pub fn reticle(&self) -> Option<ReticleData> {
        match self {
            Self::Conventional(h) => h.reticle(),
            Self::Spatial(h) => h.reticle(),
        }
    }

    /// Deliver `kind` with the payload matching the flavour.
    ///
    /// Returns the flavour that answered, or `None` if the handler does not
    /// react to `kind`.
    pub fn deliver(&mut self, kind: EventKind, data: &EventData) -> Option<UiFlavor> {
        if !self.handles(kind) {
            return None;
        }
        match self {
            Self::Conventional(h) => {
                h.handle(kind, &data.ui);
                Some(UiFlavor::Conventional)
            }
            Self::Spatial(h) => {
                h.handle(kind, &data.spatial);
                Some(UiFlavor::Spatial)
            }
        }
    }
}
