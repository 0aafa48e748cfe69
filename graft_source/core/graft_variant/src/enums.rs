use std::fmt;
use std::hash::{Hash, Hasher};

/// Static description of a native enum or flags type: its name and members.
pub struct EnumInfo {
    pub name: &'static str,
    pub members: &'static [(&'static str, u64)],
}

impl EnumInfo {
    pub fn name_of(&self, bits: u64) -> Option<&'static str> {
        self.members
            .iter()
            .find(|(_, value)| *value == bits)
            .map(|(name, _)| *name)
    }

    /// Exact match first, then case-insensitive.
    pub fn value_of(&self, name: &str) -> Option<u64> {
        let name = name.trim();
        self.members
            .iter()
            .find(|(member, _)| *member == name)
            .or_else(|| {
                self.members
                    .iter()
                    .find(|(member, _)| member.eq_ignore_ascii_case(name))
            })
            .map(|(_, value)| *value)
    }

    pub fn first_value(&self) -> u64 {
        self.members.first().map_or(0, |(_, value)| *value)
    }

    /// Names of every non-zero member fully contained in `bits`, in declaration order.
    pub fn flag_names(&self, bits: u64) -> Vec<&'static str> {
        if bits == 0 {
            return Vec::new();
        }
        self.members
            .iter()
            .filter(|(_, value)| *value != 0 && bits & *value == *value)
            .map(|(name, _)| *name)
            .collect()
    }

    /// Parses a comma and/or whitespace separated member list. Empty input is 0.
    pub fn parse_flags(&self, text: &str) -> Option<u64> {
        text.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .try_fold(0u64, |acc, part| self.value_of(part).map(|v| acc | v))
    }

    /// Canonical joined form used by flags setters, e.g. `"A,B"`.
    pub fn join_flags(&self, bits: u64) -> String {
        self.flag_names(bits).join(",")
    }
}

impl PartialEq for EnumInfo {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for EnumInfo {}

impl Hash for EnumInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for EnumInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A value of some native enum or flags type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumValue {
    pub info: &'static EnumInfo,
    pub bits: u64,
}

impl EnumValue {
    pub const fn new(info: &'static EnumInfo, bits: u64) -> Self {
        Self { info, bits }
    }
}

impl fmt::Debug for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.info.name_of(self.bits) {
            Some(name) => write!(f, "{}::{}", self.info.name, name),
            None => write!(f, "{}({:#x})", self.info.name, self.bits),
        }
    }
}

/// Rust enums that mirror a single-valued native enum.
pub trait NativeEnum: Copy + 'static {
    fn info() -> &'static EnumInfo;
    fn bits(self) -> u64;
    fn from_bits(bits: u64) -> Option<Self>;
}

/// Bit-set newtypes that mirror a multi-valued native enum.
pub trait NativeFlags: Copy + 'static {
    fn info() -> &'static EnumInfo;
    fn bits(self) -> u64;
    fn from_bits(bits: u64) -> Self;
}

/// Declares a native enum: a plain Rust enum plus its `EnumInfo` and `NativeType` impls.
#[macro_export]
macro_rules! native_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $native:literal {
            $($variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $crate::NativeEnum for $name {
            fn info() -> &'static $crate::EnumInfo {
                static INFO: $crate::EnumInfo = $crate::EnumInfo {
                    name: $native,
                    members: &[$((stringify!($variant), $value)),+],
                };
                &INFO
            }

            fn bits(self) -> u64 {
                match self {
                    $($name::$variant => $value),+
                }
            }

            fn from_bits(bits: u64) -> Option<Self> {
                match bits {
                    $($value => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl $crate::NativeType for $name {
            fn value_type() -> $crate::ValueType {
                $crate::ValueType::Enum(<$name as $crate::NativeEnum>::info())
            }

            fn into_native(self) -> $crate::NativeValue {
                $crate::NativeValue::Enum($crate::EnumValue::new(
                    <$name as $crate::NativeEnum>::info(),
                    $crate::NativeEnum::bits(self),
                ))
            }

            fn from_native(value: &$crate::NativeValue) -> Option<Self> {
                match value {
                    $crate::NativeValue::Enum(v)
                        if v.info == <$name as $crate::NativeEnum>::info() =>
                    {
                        <$name as $crate::NativeEnum>::from_bits(v.bits)
                    }
                    _ => None,
                }
            }
        }
    };
}

/// Declares a native flags type: a `u64` newtype with named constants.
#[macro_export]
macro_rules! native_flags {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident : $native:literal {
            $(const $konst:ident = $member:literal = $value:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
        $vis struct $name(pub u64);

        impl $name {
            $(pub const $konst: $name = $name($value);)+

            #[inline]
            pub const fn contains(self, other: $name) -> bool {
                self.0 & other.0 == other.0
            }

            #[inline]
            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }
        }

        impl ::std::ops::BitOr for $name {
            type Output = $name;
            fn bitor(self, rhs: $name) -> $name {
                $name(self.0 | rhs.0)
            }
        }

        impl ::std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: $name) {
                self.0 |= rhs.0;
            }
        }

        impl $crate::NativeFlags for $name {
            fn info() -> &'static $crate::EnumInfo {
                static INFO: $crate::EnumInfo = $crate::EnumInfo {
                    name: $native,
                    members: &[$(($member, $value)),+],
                };
                &INFO
            }

            fn bits(self) -> u64 {
                self.0
            }

            fn from_bits(bits: u64) -> Self {
                $name(bits)
            }
        }

        impl $crate::NativeType for $name {
            fn value_type() -> $crate::ValueType {
                $crate::ValueType::Flags(<$name as $crate::NativeFlags>::info())
            }

            fn into_native(self) -> $crate::NativeValue {
                $crate::NativeValue::Flags($crate::EnumValue::new(
                    <$name as $crate::NativeFlags>::info(),
                    self.0,
                ))
            }

            fn from_native(value: &$crate::NativeValue) -> Option<Self> {
                match value {
                    $crate::NativeValue::Flags(v)
                        if v.info == <$name as $crate::NativeFlags>::info() =>
                    {
                        Some($name(v.bits))
                    }
                    _ => None,
                }
            }
        }
    };
}
