//! Generational handles for host-side objects, components and UI elements.
//! All IDs use u64 = index (low 32 bits) | generation (high 32 bits). Index 0 = nil.
//! IDs are issued by the owning arena; slot reuse bumps generation so stale IDs never
//! resolve to a newer object living in the same slot.

use std::fmt;
use std::hash::Hash;

pub const fn string_to_u64(s: &str) -> u64 {
    let mut hash: u64 = 0xA0761D6478BD642F;
    let bytes = s.as_bytes();
    let mut i = 0usize;

    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(0xE7037ED1A0B428DB);
        hash = mix64(hash);
        i += 1;
    }

    mix64(hash ^ (bytes.len() as u64))
}

pub const fn mix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^= x >> 31;
    x
}

/// Shared surface of every generational ID so arenas can be generic over them.
pub trait GenerationalId: Copy + Eq + Hash + fmt::Debug {
    fn from_parts(index: u32, generation: u32) -> Self;
    fn index(self) -> u32;
    fn generation(self) -> u32;
}

// ---- Generational ID: base encoding ----
// u64 layout: low 32 = index (0 = nil, 1.. = slot), high 32 = generation.

macro_rules! define_generational_id {
    ($type_name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $type_name(pub u64);

        impl $type_name {
            #[inline]
            pub const fn nil() -> Self {
                Self(0)
            }

            #[inline]
            pub const fn index(self) -> u32 {
                (self.0 & 0xFFFF_FFFF) as u32
            }

            #[inline]
            pub const fn generation(self) -> u32 {
                (self.0 >> 32) as u32
            }

            #[inline]
            pub const fn from_parts(index: u32, generation: u32) -> Self {
                Self((index as u64) | ((generation as u64) << 32))
            }

            #[inline]
            pub const fn as_u64(self) -> u64 {
                self.0
            }

            #[inline]
            pub const fn from_u64(value: u64) -> Self {
                Self(value)
            }

            #[inline]
            pub const fn is_nil(self) -> bool {
                self.0 == 0
            }
        }

        impl GenerationalId for $type_name {
            #[inline]
            fn from_parts(index: u32, generation: u32) -> Self {
                $type_name::from_parts(index, generation)
            }
            #[inline]
            fn index(self) -> u32 {
                $type_name::index(self)
            }
            #[inline]
            fn generation(self) -> u32 {
                $type_name::generation(self)
            }
        }

        impl Default for $type_name {
            fn default() -> Self {
                Self::nil()
            }
        }

        impl fmt::Debug for $type_name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    concat!(stringify!($type_name), "({}:{})"),
                    self.index(),
                    self.generation()
                )
            }
        }

        impl fmt::Display for $type_name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}:{}", self.index(), self.generation())
            }
        }
    };
}

define_generational_id!(
    ObjectID,
    "Game object ID, allocated by the world's object arena."
);
define_generational_id!(
    ComponentID,
    "Component ID, allocated by the world's component arena."
);
define_generational_id!(
    ElementID,
    "UI element ID, allocated by the world's element arena."
);

/// A handle to any native object the bridge can wrap.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NativeHandle {
    Object(ObjectID),
    Component(ComponentID),
    Element(ElementID),
}

impl NativeHandle {
    #[inline]
    pub const fn as_object(self) -> Option<ObjectID> {
        match self {
            NativeHandle::Object(id) => Some(id),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_component(self) -> Option<ComponentID> {
        match self {
            NativeHandle::Component(id) => Some(id),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_element(self) -> Option<ElementID> {
        match self {
            NativeHandle::Element(id) => Some(id),
            _ => None,
        }
    }

    pub const fn kind_name(self) -> &'static str {
        match self {
            NativeHandle::Object(_) => "GameObject",
            NativeHandle::Component(_) => "Component",
            NativeHandle::Element(_) => "VisualElement",
        }
    }
}

impl From<ObjectID> for NativeHandle {
    fn from(id: ObjectID) -> Self {
        NativeHandle::Object(id)
    }
}

impl From<ComponentID> for NativeHandle {
    fn from(id: ComponentID) -> Self {
        NativeHandle::Component(id)
    }
}

impl From<ElementID> for NativeHandle {
    fn from(id: ElementID) -> Self {
        NativeHandle::Element(id)
    }
}

impl fmt::Debug for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeHandle::Object(id) => write!(f, "{id:?}"),
            NativeHandle::Component(id) => write!(f, "{id:?}"),
            NativeHandle::Element(id) => write!(f, "{id:?}"),
        }
    }
}

impl fmt::Display for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeHandle::Object(id) => write!(f, "GameObject({id})"),
            NativeHandle::Component(id) => write!(f, "Component({id})"),
            NativeHandle::Element(id) => write!(f, "VisualElement({id})"),
        }
    }
}
