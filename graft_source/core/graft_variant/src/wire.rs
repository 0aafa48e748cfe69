use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};

/// Key/value map as it crosses the wire (props batches, event payloads).
pub type WireMap = BTreeMap<Arc<str>, WireValue>;

/// The only value shape that crosses the scripting/native boundary.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum WireValue {
    #[default]
    Undefined,
    Null,

    Bool(bool),
    Number(f64),
    String(Arc<str>),

    /// Opaque host-side reference (wrapper, native handle, handler, asset).
    External(External),

    Array(Vec<WireValue>),
    Object(WireMap),
}

/// A reference-counted opaque payload. Equality is reference identity.
#[derive(Clone)]
pub struct External {
    value: Rc<dyn Any>,
    type_name: &'static str,
}

impl External {
    pub fn new<T: Any>(value: T) -> Self {
        Self::from_rc(Rc::new(value))
    }

    pub fn from_rc<T: Any>(value: Rc<T>) -> Self {
        Self {
            value,
            type_name: std::any::type_name::<T>(),
        }
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn downcast_rc<T: Any>(&self) -> Option<Rc<T>> {
        Rc::clone(&self.value).downcast::<T>().ok()
    }

    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &External) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.value), Rc::as_ptr(&other.value))
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for External {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for External {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "External<{}>({:p})", self.type_name, Rc::as_ptr(&self.value))
    }
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireValue::Undefined => write!(f, "undefined"),
            WireValue::Null => write!(f, "null"),
            WireValue::Bool(v) => write!(f, "{v}"),
            WireValue::Number(v) => write!(f, "{v}"),
            WireValue::String(v) => write!(f, "{:?}", v.as_ref()),
            WireValue::External(v) => write!(f, "<external {}>", v.type_name()),
            WireValue::Array(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            }
            WireValue::Object(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", key.as_ref(), value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

// -------------------- Constructors / accessors --------------------

impl WireValue {
    #[inline]
    pub fn string<S: AsRef<str>>(s: S) -> Self {
        WireValue::String(Arc::<str>::from(s.as_ref()))
    }

    #[inline]
    pub fn external<T: Any>(value: T) -> Self {
        WireValue::External(External::new(value))
    }

    pub fn object<K, I>(entries: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, WireValue)>,
    {
        WireValue::Object(
            entries
                .into_iter()
                .map(|(k, v)| (Arc::<str>::from(k.as_ref()), v))
                .collect(),
        )
    }

    #[inline]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, WireValue::Undefined)
    }

    /// `null` or `undefined`.
    #[inline]
    pub const fn is_nullish(&self) -> bool {
        matches!(self, WireValue::Undefined | WireValue::Null)
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            WireValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            WireValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            WireValue::String(v) => Some(v.as_ref()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_external(&self) -> Option<&External> {
        match self {
            WireValue::External(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&[WireValue]> {
        match self {
            WireValue::Array(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&WireMap> {
        match self {
            WireValue::Object(v) => Some(v),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&WireValue> {
        self.as_object()?.get(key)
    }

    /// Name of the wire tag, as a scripting runtime would report it.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            WireValue::Undefined => "undefined",
            WireValue::Null => "null",
            WireValue::Bool(_) => "boolean",
            WireValue::Number(_) => "number",
            WireValue::String(_) => "string",
            WireValue::External(_) => "external",
            WireValue::Array(_) => "array",
            WireValue::Object(_) => "object",
        }
    }
}

// -------------------- From impls --------------------

impl From<bool> for WireValue {
    fn from(v: bool) -> Self {
        WireValue::Bool(v)
    }
}

impl From<f64> for WireValue {
    fn from(v: f64) -> Self {
        WireValue::Number(v)
    }
}

impl From<f32> for WireValue {
    fn from(v: f32) -> Self {
        WireValue::Number(v as f64)
    }
}

impl From<i32> for WireValue {
    fn from(v: i32) -> Self {
        WireValue::Number(v as f64)
    }
}

impl From<&str> for WireValue {
    fn from(v: &str) -> Self {
        WireValue::string(v)
    }
}

impl From<String> for WireValue {
    fn from(v: String) -> Self {
        WireValue::String(Arc::<str>::from(v))
    }
}

impl From<Arc<str>> for WireValue {
    fn from(v: Arc<str>) -> Self {
        WireValue::String(v)
    }
}

impl From<External> for WireValue {
    fn from(v: External) -> Self {
        WireValue::External(v)
    }
}

impl From<Vec<WireValue>> for WireValue {
    fn from(v: Vec<WireValue>) -> Self {
        WireValue::Array(v)
    }
}

impl From<WireMap> for WireValue {
    fn from(v: WireMap) -> Self {
        WireValue::Object(v)
    }
}

impl<T: Into<WireValue>> From<Option<T>> for WireValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(WireValue::Null, Into::into)
    }
}

// -------------------- JSON conversion --------------------

impl WireValue {
    pub fn from_json_value(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => WireValue::Null,
            JsonValue::Bool(v) => WireValue::Bool(v),
            JsonValue::Number(v) => v.as_f64().map_or(WireValue::Null, WireValue::Number),
            JsonValue::String(v) => WireValue::from(v),
            JsonValue::Array(values) => {
                WireValue::Array(values.into_iter().map(WireValue::from_json_value).collect())
            }
            JsonValue::Object(object) => WireValue::Object(
                object
                    .into_iter()
                    .map(|(k, v)| (Arc::<str>::from(k), WireValue::from_json_value(v)))
                    .collect::<WireMap>(),
            ),
        }
    }

    /// Externals and `undefined` have no JSON form and become `null`.
    pub fn to_json_value(&self) -> JsonValue {
        match self {
            WireValue::Undefined | WireValue::Null | WireValue::External(_) => JsonValue::Null,
            WireValue::Bool(v) => JsonValue::Bool(*v),
            WireValue::Number(v) => float_to_json(*v),
            WireValue::String(v) => JsonValue::String(v.as_ref().to_string()),
            WireValue::Array(v) => JsonValue::Array(v.iter().map(WireValue::to_json_value).collect()),
            WireValue::Object(v) => JsonValue::Object(
                v.iter()
                    .map(|(k, v)| (k.as_ref().to_string(), v.to_json_value()))
                    .collect::<JsonMap<String, JsonValue>>(),
            ),
        }
    }
}

fn float_to_json(value: f64) -> JsonValue {
    if value.fract() == 0.0 && value.abs() < (i64::MAX as f64) {
        return JsonValue::Number(JsonNumber::from(value as i64));
    }
    match JsonNumber::from_f64(value) {
        Some(v) => JsonValue::Number(v),
        None => JsonValue::Null,
    }
}
