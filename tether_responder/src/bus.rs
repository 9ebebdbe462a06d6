// Copyright 2025 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event bus: observe interactions without being a scene object.
//!
//! Two channels exist:
//!
//! - [`Channel::Ui`] carries every interaction delivered to a UI object, so
//!   tools (analytics, tutorials, haptics) can watch the UI.
//! - [`Channel::OutsideUi`] carries interactions with World content. Editing
//!   tools that manipulate scene geometry subscribe here.
//!
//! The bus is an ordinary value owned by the router. Subscriptions live until
//! their [`SubscriptionId`] is passed to [`EventBus::unsubscribe`], so the
//! owning component controls the lifetime explicitly.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use tether_responder::bus::{Channel, EventBus};
//! use tether_responder::event::{BusEvent, EventData};
//! use tether_responder::types::{Domain, EventKind, EventMask};
//!
//! let mut bus = EventBus::new();
//! let clicks = Rc::new(Cell::new(0));
//! let counter = clicks.clone();
//! let id = bus.subscribe(Channel::Ui, EventMask::CLICK, move |_| counter.set(counter.get() + 1));
//!
//! let click = BusEvent::new(EventKind::Click, None, Domain::ConventionalUi, &EventData::detached());
//! bus.publish(Channel::Ui, &click);
//! assert_eq!(clicks.get(), 1);
//!
//! assert!(bus.unsubscribe(id));
//! bus.publish(Channel::Ui, &click);
//! assert_eq!(clicks.get(), 1);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::event::BusEvent;
use crate::types::EventMask;

/// Bus channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Interactions with conventional or spatial UI objects.
    Ui,
    /// Interactions with World content.
    OutsideUi,
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    channel: Channel,
    kinds: EventMask,
    callback: Box<dyn FnMut(&BusEvent)>,
}

/// Multicast of pointer interactions to subscribers.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("next_id", &self.next_id)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl EventBus {
    /// Create a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `callback` for every event of a kind in `kinds` published on `channel`.
    pub fn subscribe(
        &mut self,
        channel: Channel,
        kinds: EventMask,
        callback: impl FnMut(&BusEvent) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            channel,
            kinds,
            callback: Box::new(callback),
        });
        id
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    /// Whether anyone listens on `channel` for any kind in `kinds`.
    pub fn has_subscribers(&self, channel: Channel, kinds: EventMask) -> bool {
        self.subscribers
            .iter()
            .any(|s| s.channel == channel && s.kinds.intersects(kinds))
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns `true` when nobody is subscribed.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Deliver `event` to matching subscribers, in subscription order.
    pub fn publish(&mut self, channel: Channel, event: &BusEvent) {
        let mask = event.kind.mask();
        for s in &mut self.subscribers {
            if s.channel == channel && s.kinds.contains(mask) {
                (s.callback)(event);
            }
        }
    }
}
