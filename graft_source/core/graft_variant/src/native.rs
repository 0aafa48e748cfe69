use std::fmt;
use std::sync::Arc;

use graft_ids::{ComponentID, ElementID, NativeHandle, ObjectID};
use graft_structs::*;

use crate::{EnumInfo, EnumValue, External};

/// Which kinds of native object a reference-typed property accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Any,
    GameObject,
    Component,
    Element,
}

impl ObjectKind {
    pub fn accepts(self, handle: NativeHandle) -> bool {
        matches!(
            (self, handle),
            (ObjectKind::Any, _)
                | (ObjectKind::GameObject, NativeHandle::Object(_))
                | (ObjectKind::Component, NativeHandle::Component(_))
                | (ObjectKind::Element, NativeHandle::Element(_))
        )
    }
}

/// Declared type of a native property. Registry lookups key on this.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    Bool,
    Char,
    Int,
    Float,
    String,

    Vector2,
    Vector2Int,
    Vector3,
    Vector3Int,
    Vector4,
    Quaternion,
    Color,
    Rect,
    RectInt,
    Bounds,
    BoundsInt,
    Matrix4x4,
    Version,

    Enum(&'static EnumInfo),
    Flags(&'static EnumInfo),
    Object(ObjectKind),
    Array(Box<ValueType>),

    /// Host-side callable (event handlers).
    Callback,
    /// A type only reachable through an explicitly registered converter.
    Custom(&'static str),
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Enum(info) | ValueType::Flags(info) => write!(f, "{}", info.name),
            ValueType::Object(ObjectKind::Any) => write!(f, "Object"),
            ValueType::Object(kind) => write!(f, "{kind:?}"),
            ValueType::Array(element) => write!(f, "{element}[]"),
            ValueType::Custom(name) => write!(f, "{name}"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// A value in native (host-side) representation.
#[derive(Clone, Debug, PartialEq)]
pub enum NativeValue {
    Null,

    Bool(bool),
    Char(char),
    Int(i64),
    Float(f64),
    String(Arc<str>),

    Vector2(Vector2),
    Vector2Int(Vector2Int),
    Vector3(Vector3),
    Vector3Int(Vector3Int),
    Vector4(Vector4),
    Quaternion(Quaternion),
    Color(Color),
    Rect(Rect),
    RectInt(RectInt),
    Bounds(Bounds),
    BoundsInt(BoundsInt),
    Matrix4x4(Matrix4x4),
    Version(Version),

    Enum(EnumValue),
    Flags(EnumValue),
    Object(Option<NativeHandle>),
    Array(Vec<NativeValue>),

    Callback(External),
    Custom(&'static str, External),
}

impl NativeValue {
    #[inline]
    pub fn string<S: AsRef<str>>(s: S) -> Self {
        NativeValue::String(Arc::<str>::from(s.as_ref()))
    }

    /// The declared type this value carries, where it is self-describing.
    pub fn value_type(&self) -> Option<ValueType> {
        Some(match self {
            NativeValue::Null | NativeValue::Array(_) => return None,
            NativeValue::Bool(_) => ValueType::Bool,
            NativeValue::Char(_) => ValueType::Char,
            NativeValue::Int(_) => ValueType::Int,
            NativeValue::Float(_) => ValueType::Float,
            NativeValue::String(_) => ValueType::String,
            NativeValue::Vector2(_) => ValueType::Vector2,
            NativeValue::Vector2Int(_) => ValueType::Vector2Int,
            NativeValue::Vector3(_) => ValueType::Vector3,
            NativeValue::Vector3Int(_) => ValueType::Vector3Int,
            NativeValue::Vector4(_) => ValueType::Vector4,
            NativeValue::Quaternion(_) => ValueType::Quaternion,
            NativeValue::Color(_) => ValueType::Color,
            NativeValue::Rect(_) => ValueType::Rect,
            NativeValue::RectInt(_) => ValueType::RectInt,
            NativeValue::Bounds(_) => ValueType::Bounds,
            NativeValue::BoundsInt(_) => ValueType::BoundsInt,
            NativeValue::Matrix4x4(_) => ValueType::Matrix4x4,
            NativeValue::Version(_) => ValueType::Version,
            NativeValue::Enum(v) => ValueType::Enum(v.info),
            NativeValue::Flags(v) => ValueType::Flags(v.info),
            NativeValue::Object(_) => ValueType::Object(ObjectKind::Any),
            NativeValue::Callback(_) => ValueType::Callback,
            NativeValue::Custom(name, _) => ValueType::Custom(*name),
        })
    }

    pub fn kind_name(&self) -> String {
        match self {
            NativeValue::Null => "null".to_string(),
            NativeValue::Array(_) => "array".to_string(),
            other => other
                .value_type()
                .map_or_else(|| "unknown".to_string(), |t| t.to_string()),
        }
    }

    pub fn as_array(&self) -> Option<&[NativeValue]> {
        match self {
            NativeValue::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

impl fmt::Display for NativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeValue::Null => write!(f, "null"),
            NativeValue::Bool(v) => write!(f, "{v}"),
            NativeValue::Char(v) => write!(f, "{v:?}"),
            NativeValue::Int(v) => write!(f, "{v}"),
            NativeValue::Float(v) => write!(f, "{v}"),
            NativeValue::String(v) => write!(f, "{:?}", v.as_ref()),
            NativeValue::Enum(v) => match v.info.name_of(v.bits) {
                Some(name) => write!(f, "{name}"),
                None => write!(f, "{}", v.bits),
            },
            NativeValue::Flags(v) => write!(f, "[{}]", v.info.flag_names(v.bits).join(", ")),
            NativeValue::Object(Some(handle)) => write!(f, "{handle}"),
            NativeValue::Object(None) => write!(f, "none"),
            NativeValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            NativeValue::Callback(_) => write!(f, "<callback>"),
            NativeValue::Custom(name, _) => write!(f, "<{name}>"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Rust types that can live behind a property descriptor.
pub trait NativeType: Sized + 'static {
    fn value_type() -> ValueType;
    fn into_native(self) -> NativeValue;
    fn from_native(value: &NativeValue) -> Option<Self>;
}

impl NativeType for bool {
    fn value_type() -> ValueType {
        ValueType::Bool
    }
    fn into_native(self) -> NativeValue {
        NativeValue::Bool(self)
    }
    fn from_native(value: &NativeValue) -> Option<Self> {
        match value {
            NativeValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl NativeType for char {
    fn value_type() -> ValueType {
        ValueType::Char
    }
    fn into_native(self) -> NativeValue {
        NativeValue::Char(self)
    }
    fn from_native(value: &NativeValue) -> Option<Self> {
        match value {
            NativeValue::Char(v) => Some(*v),
            _ => None,
        }
    }
}

macro_rules! impl_native_int {
    ($($ty:ty),+) => {
        $(impl NativeType for $ty {
            fn value_type() -> ValueType {
                ValueType::Int
            }
            fn into_native(self) -> NativeValue {
                NativeValue::Int(self as i64)
            }
            fn from_native(value: &NativeValue) -> Option<Self> {
                match value {
                    NativeValue::Int(v) => <$ty>::try_from(*v).ok(),
                    _ => None,
                }
            }
        })+
    };
}

impl_native_int!(i32, i64, u32);

impl NativeType for f32 {
    fn value_type() -> ValueType {
        ValueType::Float
    }
    fn into_native(self) -> NativeValue {
        NativeValue::Float(self as f64)
    }
    fn from_native(value: &NativeValue) -> Option<Self> {
        match value {
            NativeValue::Float(v) => Some(*v as f32),
            _ => None,
        }
    }
}

impl NativeType for f64 {
    fn value_type() -> ValueType {
        ValueType::Float
    }
    fn into_native(self) -> NativeValue {
        NativeValue::Float(self)
    }
    fn from_native(value: &NativeValue) -> Option<Self> {
        match value {
            NativeValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl NativeType for String {
    fn value_type() -> ValueType {
        ValueType::String
    }
    fn into_native(self) -> NativeValue {
        NativeValue::String(Arc::from(self))
    }
    fn from_native(value: &NativeValue) -> Option<Self> {
        match value {
            NativeValue::String(v) => Some(v.as_ref().to_string()),
            _ => None,
        }
    }
}

impl NativeType for Arc<str> {
    fn value_type() -> ValueType {
        ValueType::String
    }
    fn into_native(self) -> NativeValue {
        NativeValue::String(self)
    }
    fn from_native(value: &NativeValue) -> Option<Self> {
        match value {
            NativeValue::String(v) => Some(Arc::clone(v)),
            _ => None,
        }
    }
}

macro_rules! impl_native_struct {
    ($($ty:ident),+) => {
        $(impl NativeType for $ty {
            fn value_type() -> ValueType {
                ValueType::$ty
            }
            fn into_native(self) -> NativeValue {
                NativeValue::$ty(self)
            }
            fn from_native(value: &NativeValue) -> Option<Self> {
                match value {
                    NativeValue::$ty(v) => Some(*v),
                    _ => None,
                }
            }
        })+
    };
}

impl_native_struct!(
    Vector2, Vector2Int, Vector3, Vector3Int, Vector4, Quaternion, Color, Rect, RectInt, Bounds,
    BoundsInt, Matrix4x4, Version
);

macro_rules! impl_native_ref {
    ($ty:ty, $kind:ident, $variant:ident) => {
        impl NativeType for Option<$ty> {
            fn value_type() -> ValueType {
                ValueType::Object(ObjectKind::$kind)
            }
            fn into_native(self) -> NativeValue {
                NativeValue::Object(self.map(NativeHandle::$variant))
            }
            fn from_native(value: &NativeValue) -> Option<Self> {
                match value {
                    NativeValue::Object(None) | NativeValue::Null => Some(None),
                    NativeValue::Object(Some(NativeHandle::$variant(id))) => Some(Some(*id)),
                    _ => None,
                }
            }
        }
    };
}

impl_native_ref!(ObjectID, GameObject, Object);
impl_native_ref!(ComponentID, Component, Component);
impl_native_ref!(ElementID, Element, Element);

impl NativeType for Option<NativeHandle> {
    fn value_type() -> ValueType {
        ValueType::Object(ObjectKind::Any)
    }
    fn into_native(self) -> NativeValue {
        NativeValue::Object(self)
    }
    fn from_native(value: &NativeValue) -> Option<Self> {
        match value {
            NativeValue::Object(handle) => Some(*handle),
            NativeValue::Null => Some(None),
            _ => None,
        }
    }
}

impl<T: NativeType> NativeType for Vec<T> {
    fn value_type() -> ValueType {
        ValueType::Array(Box::new(T::value_type()))
    }
    fn into_native(self) -> NativeValue {
        NativeValue::Array(self.into_iter().map(T::into_native).collect())
    }
    fn from_native(value: &NativeValue) -> Option<Self> {
        match value {
            NativeValue::Array(items) => items.iter().map(T::from_native).collect(),
            _ => None,
        }
    }
}

impl ValueType {
    /// The value an unset (`undefined`/`null`) assignment resets to.
    /// `None` for custom types, which only their registered converter can produce.
    pub fn default_value(&self) -> Option<NativeValue> {
        Some(match self {
            ValueType::Bool => NativeValue::Bool(false),
            ValueType::Char => NativeValue::Char('\0'),
            ValueType::Int => NativeValue::Int(0),
            ValueType::Float => NativeValue::Float(0.0),
            ValueType::String => NativeValue::string(""),
            ValueType::Vector2 => NativeValue::Vector2(Vector2::default()),
            ValueType::Vector2Int => NativeValue::Vector2Int(Vector2Int::default()),
            ValueType::Vector3 => NativeValue::Vector3(Vector3::default()),
            ValueType::Vector3Int => NativeValue::Vector3Int(Vector3Int::default()),
            ValueType::Vector4 => NativeValue::Vector4(Vector4::default()),
            ValueType::Quaternion => NativeValue::Quaternion(Quaternion::default()),
            ValueType::Color => NativeValue::Color(Color::default()),
            ValueType::Rect => NativeValue::Rect(Rect::default()),
            ValueType::RectInt => NativeValue::RectInt(RectInt::default()),
            ValueType::Bounds => NativeValue::Bounds(Bounds::default()),
            ValueType::BoundsInt => NativeValue::BoundsInt(BoundsInt::default()),
            ValueType::Matrix4x4 => NativeValue::Matrix4x4(Matrix4x4::default()),
            ValueType::Version => NativeValue::Version(Version::default()),
            ValueType::Enum(info) => NativeValue::Enum(EnumValue::new(*info, info.first_value())),
            ValueType::Flags(info) => NativeValue::Flags(EnumValue::new(*info, 0)),
            ValueType::Object(_) => NativeValue::Object(None),
            ValueType::Array(_) => NativeValue::Array(Vec::new()),
            ValueType::Callback => NativeValue::Null,
            ValueType::Custom(_) => return None,
        })
    }
}
