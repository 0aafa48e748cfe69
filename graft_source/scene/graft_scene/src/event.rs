//! Native UI events and their dispatch along the element tree.

use std::cell::RefCell;
use std::rc::Rc;

use graft_ids::ElementID;
use graft_structs::{Vector2, Vector3};
use graft_variant::NativeValue;

use crate::World;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Pointer,
    Keyboard,
    Change,
    Navigation,
    Routed,
}

macro_rules! event_kinds {
    ($($kind:ident => $name:literal, $category:ident, $bubbles:literal;)+) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum EventKind {
            $($kind),+
        }

        impl EventKind {
            pub const ALL: &'static [EventKind] = &[$(EventKind::$kind),+];

            /// Lowercase DOM-style type name (`pointerdown`, `keyup`).
            pub const fn type_name(self) -> &'static str {
                match self {
                    $(EventKind::$kind => $name),+
                }
            }

            pub const fn category(self) -> EventCategory {
                match self {
                    $(EventKind::$kind => EventCategory::$category),+
                }
            }

            pub const fn bubbles(self) -> bool {
                match self {
                    $(EventKind::$kind => $bubbles),+
                }
            }

            pub fn from_type_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(EventKind::$kind),)+
                    _ => None,
                }
            }
        }
    };
}

event_kinds! {
    PointerDown => "pointerdown", Pointer, true;
    PointerUp => "pointerup", Pointer, true;
    PointerMove => "pointermove", Pointer, true;
    PointerEnter => "pointerenter", Pointer, false;
    PointerLeave => "pointerleave", Pointer, false;
    PointerOver => "pointerover", Pointer, true;
    PointerOut => "pointerout", Pointer, true;
    PointerCancel => "pointercancel", Pointer, true;
    Click => "click", Pointer, true;
    Wheel => "wheel", Pointer, true;
    KeyDown => "keydown", Keyboard, true;
    KeyUp => "keyup", Keyboard, true;
    FocusIn => "focusin", Routed, true;
    FocusOut => "focusout", Routed, true;
    Focus => "focus", Routed, false;
    Blur => "blur", Routed, false;
    Change => "change", Change, true;
    Input => "input", Change, true;
    NavigationMove => "navigationmove", Navigation, true;
    NavigationSubmit => "navigationsubmit", Navigation, true;
    NavigationCancel => "navigationcancel", Navigation, true;
    GeometryChanged => "geometrychanged", Routed, false;
    AttachToPanel => "attachtopanel", Routed, false;
    DetachFromPanel => "detachfrompanel", Routed, false;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub command: bool,
}

/// Category-specific payload of a native event.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum EventData {
    #[default]
    None,
    Pointer {
        position: Vector2,
        delta: Vector2,
        button: i32,
        pointer_id: i32,
        click_count: i32,
        modifiers: Modifiers,
    },
    Wheel {
        delta: Vector3,
    },
    Keyboard {
        key: String,
        character: Option<char>,
        modifiers: Modifiers,
    },
    Change {
        previous: NativeValue,
        new: NativeValue,
    },
    Navigation {
        direction: Vector2,
    },
}

/// One native event as delivered to subscribers.
#[derive(Clone, Debug, PartialEq)]
pub struct NativeEvent {
    pub kind: EventKind,
    pub target: ElementID,
    /// Element whose subscription is being invoked.
    pub current_target: ElementID,
    /// Unscaled host time, seconds.
    pub timestamp: f64,
    pub data: EventData,
}

impl NativeEvent {
    pub fn new(kind: EventKind, target: ElementID, timestamp: f64, data: EventData) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            timestamp,
            data,
        }
    }
}

pub type EventCallback = Rc<dyn Fn(&NativeEvent)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

pub(crate) struct Subscription {
    pub(crate) id: SubscriptionId,
    pub(crate) callback: EventCallback,
}

/// Delivers `event` to the target's subscribers and, for bubbling kinds, to
/// each ancestor's. No world borrow is held while callbacks run, so they may
/// mutate the world. Returns the number of callbacks invoked.
pub fn dispatch_event(world: &RefCell<World>, event: NativeEvent) -> usize {
    let route: Vec<(ElementID, Vec<EventCallback>)> = {
        let world = world.borrow();
        let mut route = Vec::new();
        let mut next = Some(event.target);
        while let Some(element) = next {
            let callbacks = world.subscribers(element, event.kind);
            if !callbacks.is_empty() {
                route.push((element, callbacks));
            }
            next = if event.kind.bubbles() {
                world.element_parent(element)
            } else {
                None
            };
        }
        route
    };

    let mut invoked = 0;
    let mut hop = event;
    for (element, callbacks) in route {
        hop.current_target = element;
        for callback in callbacks {
            callback(&hop);
            invoked += 1;
        }
    }
    log::trace!("{} dispatched to {invoked} callbacks", hop.kind.type_name());
    invoked
}
