use std::fmt;

/// Lane an update is scheduled on. Lower values are more urgent; zero means
/// no priority has been set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventPriority(pub u32);

/// Input that must be answered before the next frame.
pub const DISCRETE_EVENTS: &[&str] = &[
    "click",
    "contextmenu",
    "dblclick",
    "pointercancel",
    "pointerdown",
    "pointerup",
    "keydown",
    "keyup",
    "keypress",
    "resize",
];

/// High-frequency input whose updates may be batched.
pub const CONTINUOUS_EVENTS: &[&str] = &[
    "pointermove",
    "pointerout",
    "pointerover",
    "pointerenter",
    "pointerleave",
    "wheel",
];

impl EventPriority {
    pub const NONE: Self = Self(0);
    pub const DISCRETE: Self = Self(0b10);
    pub const CONTINUOUS: Self = Self(0b1000);
    pub const DEFAULT: Self = Self(0b10_0000);
    pub const IDLE: Self = Self(0x1000_0000);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Priority of updates scheduled while an event of `event_type` is
    /// being handled.
    pub fn for_event_type(event_type: &str) -> Self {
        if DISCRETE_EVENTS.contains(&event_type) {
            Self::DISCRETE
        } else if CONTINUOUS_EVENTS.contains(&event_type) {
            Self::CONTINUOUS
        } else {
            Self::DEFAULT
        }
    }
}

impl fmt::Display for EventPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NONE => f.write_str("none"),
            Self::DISCRETE => f.write_str("discrete"),
            Self::CONTINUOUS => f.write_str("continuous"),
            Self::DEFAULT => f.write_str("default"),
            Self::IDLE => f.write_str("idle"),
            Self(lane) => write!(f, "lane {lane:#x}"),
        }
    }
}
