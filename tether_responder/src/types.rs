// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core vocabulary: object and pointer handles, domains, layers and event kinds.

use bitflags::bitflags;

/// Handle of a scene-graph object.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

/// Identifier of a tracked pointer device.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u32);

/// What a pointer currently targets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Flat UI panels addressed in screen space.
    ConventionalUi,
    /// Freely movable 3D widgets.
    SpatialUi,
    /// Ordinary scene content ("outside UI").
    #[default]
    World,
}

impl Domain {
    /// Returns `true` for either UI flavour.
    pub fn is_ui(self) -> bool {
        !matches!(self, Self::World)
    }
}

/// Which handler flavour an object carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UiFlavor {
    /// Handlers receive [`UiEventData`](crate::event::UiEventData).
    Conventional,
    /// Handlers receive [`SpatialEventData`](crate::event::SpatialEventData).
    Spatial,
}

impl From<UiFlavor> for Domain {
    fn from(flavor: UiFlavor) -> Self {
        match flavor {
            UiFlavor::Conventional => Self::ConventionalUi,
            UiFlavor::Spatial => Self::SpatialUi,
        }
    }
}

/// One of 32 scene layers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Layer(u8);

impl Layer {
    /// Catch-all layer for scene content.
    pub const DEFAULT: Self = Self(0);
    /// Layer conventionally holding flat UI panels.
    pub const UI: Self = Self(5);
    /// Layer conventionally holding spatial widgets.
    pub const SPATIAL_UI: Self = Self(6);
    /// Number of distinct layers.
    pub const COUNT: usize = 32;

    /// Build a layer from its index, or `None` if `index >= 32`.
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < Self::COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Index in `0..32`.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Single-layer mask.
    pub const fn mask(self) -> LayerMask {
        LayerMask::from_bits_retain(1 << self.0)
    }
}

bitflags! {
    /// Set of layers a raycast considers.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct LayerMask: u32 {
        /// [`Layer::DEFAULT`].
        const DEFAULT = 1;
        /// [`Layer::UI`].
        const UI = 1 << 5;
        /// [`Layer::SPATIAL_UI`].
        const SPATIAL_UI = 1 << 6;
        // Layers are user-assigned; keep unnamed bits.
        const _ = !0;
    }
}

impl LayerMask {
    /// Returns `true` if `layer` is part of the mask.
    pub fn includes(self, layer: Layer) -> bool {
        self.contains(layer.mask())
    }
}

/// A pointer interaction delivered to handlers and bus subscribers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The pointer started hovering the object.
    Enter,
    /// The pointer stopped hovering the object.
    Exit,
    /// The button went down on the object.
    Down,
    /// The button went up after going down on the object.
    Up,
    /// Down and up on the same object without dragging.
    Click,
    /// The pointer moved while hovering the object.
    Move,
    /// A press on the object exceeded the drag threshold.
    BeginDrag,
    /// A drag in progress, every frame.
    Drag,
    /// The drag ended.
    EndDrag,
    /// A drag was released over the object.
    Drop,
    /// Scroll input while hovering the object.
    Scroll,
    /// The object may become the drag target of the current press.
    InitializePotentialDrag,
    /// The object gained logical focus.
    Select,
    /// The object lost logical focus.
    Deselect,
    /// Once per frame while the object holds logical focus.
    UpdateSelected,
}

impl EventKind {
    /// The capability bit matching this kind.
    pub const fn mask(self) -> EventMask {
        match self {
            Self::Enter => EventMask::ENTER,
            Self::Exit => EventMask::EXIT,
            Self::Down => EventMask::DOWN,
            Self::Up => EventMask::UP,
            Self::Click => EventMask::CLICK,
            Self::Move => EventMask::MOVE,
            Self::BeginDrag => EventMask::BEGIN_DRAG,
            Self::Drag => EventMask::DRAG,
            Self::EndDrag => EventMask::END_DRAG,
            Self::Drop => EventMask::DROP,
            Self::Scroll => EventMask::SCROLL,
            Self::InitializePotentialDrag => EventMask::INITIALIZE_POTENTIAL_DRAG,
            Self::Select => EventMask::SELECT,
            Self::Deselect => EventMask::DESELECT,
            Self::UpdateSelected => EventMask::UPDATE_SELECTED,
        }
    }
}

bitflags! {
    /// Set of [`EventKind`]s: handler capabilities or subscription filters.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EventMask: u16 {
        /// [`EventKind::Enter`].
        const ENTER = 1 << 0;
        /// [`EventKind::Exit`].
        const EXIT = 1 << 1;
        /// [`EventKind::Down`].
        const DOWN = 1 << 2;
        /// [`EventKind::Up`].
        const UP = 1 << 3;
        /// [`EventKind::Click`].
        const CLICK = 1 << 4;
        /// [`EventKind::Move`].
        const MOVE = 1 << 5;
        /// [`EventKind::BeginDrag`].
        const BEGIN_DRAG = 1 << 6;
        /// [`EventKind::Drag`].
        const DRAG = 1 << 7;
        /// [`EventKind::EndDrag`].
        const END_DRAG = 1 << 8;
        /// [`EventKind::Drop`].
        const DROP = 1 << 9;
        /// [`EventKind::Scroll`].
        const SCROLL = 1 << 10;
        /// [`EventKind::InitializePotentialDrag`].
        const INITIALIZE_POTENTIAL_DRAG = 1 << 11;
        /// [`EventKind::Select`].
        const SELECT = 1 << 12;
        /// [`EventKind::Deselect`].
        const DESELECT = 1 << 13;
        /// [`EventKind::UpdateSelected`].
        const UPDATE_SELECTED = 1 << 14;

        /// Hover transitions.
        const HOVER = Self::ENTER.bits() | Self::EXIT.bits() | Self::MOVE.bits();
        /// Drag lifecycle.
        const DRAGGING = Self::BEGIN_DRAG.bits() | Self::DRAG.bits() | Self::END_DRAG.bits();
    }
}
