use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter;

use graft_ids::string_to_u64;

/// Static runtime type identity with a single-inheritance ancestor chain.
pub struct TypeInfo {
    pub name: &'static str,
    pub base: Option<&'static TypeInfo>,
}

impl TypeInfo {
    pub const fn new(name: &'static str) -> Self {
        Self { name, base: None }
    }

    pub const fn derived(name: &'static str, base: &'static TypeInfo) -> Self {
        Self {
            name,
            base: Some(base),
        }
    }

    /// `self` first, then each base up to the root.
    pub fn ancestors(&'static self) -> impl Iterator<Item = &'static TypeInfo> {
        iter::successors(Some(self), |ty| ty.base)
    }

    pub fn is_a(&'static self, other: &TypeInfo) -> bool {
        self.ancestors().any(|ty| ty == other)
    }

    #[inline]
    pub const fn key(&self) -> u64 {
        string_to_u64(self.name)
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A native value whose fields are reachable through a registered property bag.
///
/// Derived types embed their base struct; `upcast` hands out the embedded
/// struct that was registered for `ty`, which is what descriptors declared on
/// a base type operate on.
pub trait PropertyContainer: Any + 'static {
    fn type_info(&self) -> &'static TypeInfo;
    fn upcast(&self, ty: &TypeInfo) -> Option<&dyn Any>;
    fn upcast_mut(&mut self, ty: &TypeInfo) -> Option<&mut dyn Any>;
}

/// Implements [`PropertyContainer`] for a struct, optionally chaining to an
/// embedded base field.
///
/// ```ignore
/// impl_property_container!(VisualElement, &VISUAL_ELEMENT);
/// impl_property_container!(Label, &LABEL, base);
/// ```
#[macro_export]
macro_rules! impl_property_container {
    ($ty:ty, $info:expr) => {
        impl $crate::PropertyContainer for $ty {
            fn type_info(&self) -> &'static $crate::TypeInfo {
                $info
            }

            fn upcast(&self, ty: &$crate::TypeInfo) -> Option<&dyn ::std::any::Any> {
                if ty == $info {
                    Some(self as &dyn ::std::any::Any)
                } else {
                    None
                }
            }

            fn upcast_mut(&mut self, ty: &$crate::TypeInfo) -> Option<&mut dyn ::std::any::Any> {
                if ty == $info {
                    Some(self as &mut dyn ::std::any::Any)
                } else {
                    None
                }
            }
        }
    };
    ($ty:ty, $info:expr, $base:ident) => {
        impl $crate::PropertyContainer for $ty {
            fn type_info(&self) -> &'static $crate::TypeInfo {
                $info
            }

            fn upcast(&self, ty: &$crate::TypeInfo) -> Option<&dyn ::std::any::Any> {
                if ty == $info {
                    Some(self as &dyn ::std::any::Any)
                } else {
                    $crate::PropertyContainer::upcast(&self.$base, ty)
                }
            }

            fn upcast_mut(&mut self, ty: &$crate::TypeInfo) -> Option<&mut dyn ::std::any::Any> {
                if ty == $info {
                    Some(self as &mut dyn ::std::any::Any)
                } else {
                    $crate::PropertyContainer::upcast_mut(&mut self.$base, ty)
                }
            }
        }
    };
}
