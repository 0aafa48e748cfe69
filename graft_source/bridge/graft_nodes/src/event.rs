//! Event records handed to UI handlers, and the current-event slot.
//!
//! Records are pooled per category and reset between dispatches. A record
//! only lives for the synchronous extent of one handler call.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use graft_ids::NativeHandle;
use graft_scene::{EventCallback, EventCategory, EventData, EventKind, Modifiers, NativeEvent};
use graft_structs::{Vector2, Vector3};
use graft_variant::{WireMap, WireValue};

use crate::host::{Host, WeakHost};
use crate::node::Node;

// ---- Current event ----

/// What the current-event slot remembers about the dispatch in progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurrentEvent {
    pub kind: EventKind,
    /// Host unscaled clock, milliseconds.
    pub time_stamp: f64,
}

thread_local! {
    static CURRENT: Cell<Option<CurrentEvent>> = const { Cell::new(None) };
}

/// The single current-event slot shared by every node.
pub struct EventDispatchContext;

impl EventDispatchContext {
    pub fn current_event() -> Option<CurrentEvent> {
        CURRENT.with(Cell::get)
    }
}

/// Sets the current event for its lifetime and restores the previous one on
/// drop, so a handler may start an unrelated dispatch of its own.
#[must_use = "the current event is restored when the scope is dropped"]
pub struct DispatchScope {
    previous: Option<CurrentEvent>,
}

impl DispatchScope {
    pub fn enter(event: CurrentEvent) -> Self {
        let previous = CURRENT.with(|slot| slot.replace(Some(event)));
        Self { previous }
    }
}

impl Drop for DispatchScope {
    fn drop(&mut self) {
        CURRENT.with(|slot| slot.set(self.previous));
    }
}

// ---- Handlers ----

/// A scripting-side event callback. Travels on the wire as an external.
#[derive(Clone)]
pub struct Handler(Rc<dyn Fn(&Event)>);

impl Handler {
    pub fn new(f: impl Fn(&Event) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, event: &Event) {
        (self.0)(event)
    }

    /// Wraps the handler in a fresh external. Prop diffs compare externals
    /// by identity, so keep the returned value to pass the same handler again.
    pub fn to_wire(&self) -> WireValue {
        WireValue::external(self.clone())
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler")
    }
}

const EVENT_PROPS: &[(&str, EventKind)] = &[
    ("onPointerDown", EventKind::PointerDown),
    ("onPointerUp", EventKind::PointerUp),
    ("onPointerMove", EventKind::PointerMove),
    ("onPointerEnter", EventKind::PointerEnter),
    ("onPointerLeave", EventKind::PointerLeave),
    ("onPointerOver", EventKind::PointerOver),
    ("onPointerOut", EventKind::PointerOut),
    ("onPointerCancel", EventKind::PointerCancel),
    ("onClick", EventKind::Click),
    ("onWheel", EventKind::Wheel),
    ("onKeyDown", EventKind::KeyDown),
    ("onKeyUp", EventKind::KeyUp),
    ("onFocusIn", EventKind::FocusIn),
    ("onFocusOut", EventKind::FocusOut),
    ("onFocus", EventKind::Focus),
    ("onBlur", EventKind::Blur),
    ("onChange", EventKind::Change),
    ("onInput", EventKind::Input),
    ("onNavigationMove", EventKind::NavigationMove),
    ("onNavigationSubmit", EventKind::NavigationSubmit),
    ("onNavigationCancel", EventKind::NavigationCancel),
    ("onGeometryChanged", EventKind::GeometryChanged),
    ("onAttachToPanel", EventKind::AttachToPanel),
    ("onDetachFromPanel", EventKind::DetachFromPanel),
];

/// The native event a UI element prop such as `onClick` subscribes to.
pub fn event_kind_for_prop(key: &str) -> Option<EventKind> {
    EVENT_PROPS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|&(_, kind)| kind)
}

pub fn event_prop_names() -> impl Iterator<Item = &'static str> {
    EVENT_PROPS.iter().map(|&(name, _)| name)
}

// ---- Records ----

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerDetail {
    pub position: Vector2,
    /// Pointer motion, or the scroll amount for wheel events.
    pub delta: Vector3,
    pub button: i32,
    pub pointer_id: i32,
    pub click_count: i32,
    pub modifiers: Modifiers,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyboardDetail {
    pub key: String,
    pub character: Option<char>,
    pub modifiers: Modifiers,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChangeDetail {
    pub previous: WireValue,
    pub new: WireValue,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavigationDetail {
    pub direction: Vector2,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EventDetail {
    Routed,
    Pointer(PointerDetail),
    Keyboard(KeyboardDetail),
    Change(ChangeDetail),
    Navigation(NavigationDetail),
}

impl EventDetail {
    fn blank(category: EventCategory) -> Self {
        match category {
            EventCategory::Pointer => EventDetail::Pointer(PointerDetail::default()),
            EventCategory::Keyboard => EventDetail::Keyboard(KeyboardDetail::default()),
            EventCategory::Change => EventDetail::Change(ChangeDetail::default()),
            EventCategory::Navigation => EventDetail::Navigation(NavigationDetail::default()),
            EventCategory::Routed => EventDetail::Routed,
        }
    }
}

/// The record a handler receives.
#[derive(Debug)]
pub struct Event {
    kind: EventKind,
    time_stamp: f64,
    target: Option<Node>,
    current_target: Option<Node>,
    detail: EventDetail,
}

impl Event {
    fn blank(kind: EventKind) -> Self {
        Self {
            kind,
            time_stamp: 0.0,
            target: None,
            current_target: None,
            detail: EventDetail::blank(kind.category()),
        }
    }

    #[inline]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    #[inline]
    pub fn event_type(&self) -> &'static str {
        self.kind.type_name()
    }

    /// Milliseconds on the host's unscaled clock.
    #[inline]
    pub fn time_stamp(&self) -> f64 {
        self.time_stamp
    }

    pub fn target(&self) -> Option<&Node> {
        self.target.as_ref()
    }

    /// The element whose handler is running; differs from the target while
    /// an event bubbles.
    pub fn current_target(&self) -> Option<&Node> {
        self.current_target.as_ref()
    }

    pub fn detail(&self) -> &EventDetail {
        &self.detail
    }

    pub fn pointer(&self) -> Option<&PointerDetail> {
        match &self.detail {
            EventDetail::Pointer(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn keyboard(&self) -> Option<&KeyboardDetail> {
        match &self.detail {
            EventDetail::Keyboard(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn change(&self) -> Option<&ChangeDetail> {
        match &self.detail {
            EventDetail::Change(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn navigation(&self) -> Option<&NavigationDetail> {
        match &self.detail {
            EventDetail::Navigation(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> CurrentEvent {
        CurrentEvent {
            kind: self.kind,
            time_stamp: self.time_stamp,
        }
    }

    /// DOM-style object form for the scripting side.
    pub fn to_wire(&self) -> WireValue {
        let mut map = WireMap::new();
        let mut put = |key: &str, value: WireValue| {
            map.insert(Arc::from(key), value);
        };
        put("type", WireValue::string(self.event_type()));
        put("timeStamp", WireValue::Number(self.time_stamp));
        put("target", self.target.as_ref().map_or(WireValue::Null, Node::to_wire));
        put(
            "currentTarget",
            self.current_target.as_ref().map_or(WireValue::Null, Node::to_wire),
        );
        match &self.detail {
            EventDetail::Routed => {}
            EventDetail::Pointer(p) => {
                put("position", numbers(&[p.position.x, p.position.y]));
                put("delta", numbers(&[p.delta.x, p.delta.y, p.delta.z]));
                put("button", WireValue::Number(p.button as f64));
                put("pointerId", WireValue::Number(p.pointer_id as f64));
                put("clickCount", WireValue::Number(p.click_count as f64));
                put_modifiers(&mut put, &p.modifiers);
            }
            EventDetail::Keyboard(k) => {
                put("key", WireValue::string(&k.key));
                put(
                    "character",
                    k.character.map_or(WireValue::Null, |c| WireValue::string(c.to_string())),
                );
                put_modifiers(&mut put, &k.modifiers);
            }
            EventDetail::Change(c) => {
                put("previousValue", c.previous.clone());
                put("newValue", c.new.clone());
            }
            EventDetail::Navigation(n) => {
                put("direction", numbers(&[n.direction.x, n.direction.y]));
            }
        }
        WireValue::Object(map)
    }

    fn fill(&mut self, host: &Host, native: &NativeEvent) {
        self.kind = native.kind;
        self.time_stamp = (native.timestamp * 1000.0).trunc();
        self.target = host.wrap(NativeHandle::Element(native.target));
        self.current_target = host.wrap(NativeHandle::Element(native.current_target));
        match (&mut self.detail, &native.data) {
            (
                EventDetail::Pointer(p),
                EventData::Pointer {
                    position,
                    delta,
                    button,
                    pointer_id,
                    click_count,
                    modifiers,
                },
            ) => {
                p.position = *position;
                p.delta = Vector3::new(delta.x, delta.y, 0.0);
                p.button = *button;
                p.pointer_id = *pointer_id;
                p.click_count = *click_count;
                p.modifiers.clone_from(modifiers);
            }
            (EventDetail::Pointer(p), EventData::Wheel { delta }) => p.delta = *delta,
            (
                EventDetail::Keyboard(k),
                EventData::Keyboard {
                    key,
                    character,
                    modifiers,
                },
            ) => {
                k.key.push_str(key);
                k.character = *character;
                k.modifiers.clone_from(modifiers);
            }
            (EventDetail::Change(c), EventData::Change { previous, new }) => {
                let conversions = host.accessor().conversions();
                c.previous = conversions.to_wire(previous).unwrap_or_default();
                c.new = conversions.to_wire(new).unwrap_or_default();
            }
            (EventDetail::Navigation(n), EventData::Navigation { direction }) => {
                n.direction = *direction;
            }
            _ => {}
        }
    }

    fn reset(&mut self) {
        self.time_stamp = 0.0;
        self.target = None;
        self.current_target = None;
        match &mut self.detail {
            EventDetail::Routed => {}
            EventDetail::Pointer(p) => {
                p.position = Vector2::zero();
                p.delta = Vector3::zero();
                p.button = 0;
                p.pointer_id = 0;
                p.click_count = 0;
                p.modifiers = Modifiers::default();
            }
            EventDetail::Keyboard(k) => {
                k.key.clear();
                k.character = None;
                k.modifiers = Modifiers::default();
            }
            EventDetail::Change(c) => {
                c.previous = WireValue::Undefined;
                c.new = WireValue::Undefined;
            }
            EventDetail::Navigation(n) => n.direction = Vector2::zero(),
        }
    }
}

fn numbers(values: &[f32]) -> WireValue {
    WireValue::Array(values.iter().map(|&v| WireValue::Number(v as f64)).collect())
}

fn put_modifiers(put: &mut impl FnMut(&str, WireValue), modifiers: &Modifiers) {
    put("shiftKey", WireValue::Bool(modifiers.shift));
    put("ctrlKey", WireValue::Bool(modifiers.ctrl));
    put("altKey", WireValue::Bool(modifiers.alt));
    put("metaKey", WireValue::Bool(modifiers.command));
}

// ---- Pool ----

const POOL_LIMIT: usize = 16;

/// Free records, one list per category.
#[derive(Default)]
pub(crate) struct EventPool {
    free: [Vec<Event>; 5],
}

impl EventPool {
    fn slot(category: EventCategory) -> usize {
        match category {
            EventCategory::Pointer => 0,
            EventCategory::Keyboard => 1,
            EventCategory::Change => 2,
            EventCategory::Navigation => 3,
            EventCategory::Routed => 4,
        }
    }

    fn take(&mut self, kind: EventKind) -> Event {
        match self.free[Self::slot(kind.category())].pop() {
            Some(mut event) => {
                event.kind = kind;
                event
            }
            None => Event::blank(kind),
        }
    }

    fn recycle(&mut self, mut event: Event) {
        event.reset();
        let list = &mut self.free[Self::slot(event.kind.category())];
        if list.len() < POOL_LIMIT {
            list.push(event);
        }
    }

    pub(crate) fn available(&self, category: EventCategory) -> usize {
        self.free[Self::slot(category)].len()
    }
}

/// The native callback installed for one handler prop: fills a pooled
/// record, runs the handler inside a dispatch scope, then recycles it.
pub(crate) fn route(host: WeakHost, handler: Handler) -> EventCallback {
    Rc::new(move |native: &NativeEvent| {
        let Some(host) = host.upgrade() else {
            return;
        };
        let mut event = host.events().borrow_mut().take(native.kind);
        event.fill(&host, native);
        {
            let _scope = DispatchScope::enter(event.snapshot());
            handler.call(&event);
        }
        host.events().borrow_mut().recycle(event);
    })
}
