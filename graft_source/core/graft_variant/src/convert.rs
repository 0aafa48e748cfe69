use std::rc::Rc;

use graft_ids::NativeHandle;
use graft_structs::*;
use rustc_hash::FxHashMap;

use crate::{ConversionError, EnumValue, External, NativeType, NativeValue, ValueType, WireValue};

type ToWireFn = Rc<dyn Fn(&NativeValue) -> Result<WireValue, ConversionError>>;
type FromWireFn = Rc<dyn Fn(&WireValue) -> Result<NativeValue, ConversionError>>;

/// Pulls a native handle out of an opaque external (e.g. a node wrapper).
pub type HandleExtractor = fn(&External) -> Option<NativeHandle>;

#[derive(Clone)]
struct Converter {
    to_wire: ToWireFn,
    from_wire: FromWireFn,
}

/// Bidirectional wire ⇄ native conversion.
///
/// Lookup order: an exact converter registered for the declared type, then
/// structural dispatch (enums, flags, object references, arrays, numeric
/// aggregates). Primitive types only convert through registered converters;
/// [`ConversionRegistry::new`] installs the defaults for them.
#[derive(Clone)]
pub struct ConversionRegistry {
    exact: FxHashMap<ValueType, Converter>,
    handle_extractors: Vec<HandleExtractor>,
}

impl Default for ConversionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversionRegistry {
    /// A registry with only structural dispatch; primitives have no converter.
    pub fn empty() -> Self {
        Self {
            exact: FxHashMap::default(),
            handle_extractors: Vec::new(),
        }
    }

    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_primitives();
        registry
    }

    /// Registers (or replaces) the converter pair for `ty`.
    pub fn register<F, G>(&mut self, ty: ValueType, to_wire: F, from_wire: G)
    where
        F: Fn(&NativeValue) -> Result<WireValue, ConversionError> + 'static,
        G: Fn(&WireValue) -> Result<NativeValue, ConversionError> + 'static,
    {
        log::trace!("conversion registered for {ty}");
        self.exact.insert(
            ty,
            Converter {
                to_wire: Rc::new(to_wire),
                from_wire: Rc::new(from_wire),
            },
        );
    }

    /// Typed form of [`register`](Self::register): converters work on `T` directly.
    pub fn register_type<T, F, G>(&mut self, to_wire: F, from_wire: G)
    where
        T: NativeType,
        F: Fn(&T) -> WireValue + 'static,
        G: Fn(&WireValue) -> Result<T, ConversionError> + 'static,
    {
        let ty = T::value_type();
        let expected = ty.to_string();
        self.register(
            ty,
            move |native: &NativeValue| {
                let typed = T::from_native(native)
                    .ok_or_else(|| ConversionError::mismatch(&expected, native.kind_name()))?;
                Ok(to_wire(&typed))
            },
            move |wire: &WireValue| from_wire(wire).map(T::into_native),
        );
    }

    pub fn register_handle_extractor(&mut self, extractor: HandleExtractor) {
        self.handle_extractors.push(extractor);
    }

    pub fn has_exact(&self, ty: &ValueType) -> bool {
        self.exact.contains_key(ty)
    }

    // ---- wire → native ----

    pub fn from_wire(&self, value: &WireValue, ty: &ValueType) -> Result<NativeValue, ConversionError> {
        if let Some(converter) = self.exact.get(ty) {
            return (converter.from_wire)(value);
        }
        if value.is_nullish() {
            if let Some(default) = ty.default_value() {
                return Ok(default);
            }
        }
        self.structural_from_wire(value, ty)
    }

    /// Direct string → native conversion, without going through wire shapes.
    pub fn from_str(&self, text: &str, ty: &ValueType) -> Result<NativeValue, ConversionError> {
        match ty {
            ValueType::Bool => {
                let t = text.trim();
                if t.eq_ignore_ascii_case("true") {
                    Ok(NativeValue::Bool(true))
                } else if t.eq_ignore_ascii_case("false") {
                    Ok(NativeValue::Bool(false))
                } else {
                    Err(ConversionError::parse(ty, text))
                }
            }
            ValueType::Char => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(NativeValue::Char(c)),
                    _ => Err(ConversionError::parse(ty, text)),
                }
            }
            ValueType::Int => text
                .trim()
                .parse::<i64>()
                .map(NativeValue::Int)
                .map_err(|_| ConversionError::parse(ty, text)),
            ValueType::Float => text
                .trim()
                .parse::<f64>()
                .map(NativeValue::Float)
                .map_err(|_| ConversionError::parse(ty, text)),
            ValueType::String => Ok(NativeValue::string(text)),
            ValueType::Enum(info) => info
                .value_of(text)
                .or_else(|| {
                    text.trim()
                        .parse::<u64>()
                        .ok()
                        .filter(|bits| info.name_of(*bits).is_some())
                })
                .map(|bits| NativeValue::Enum(EnumValue::new(*info, bits)))
                .ok_or_else(|| ConversionError::UnknownMember {
                    ty: info.name,
                    name: text.to_string(),
                }),
            ValueType::Flags(info) => info
                .parse_flags(text)
                .map(|bits| NativeValue::Flags(EnumValue::new(*info, bits)))
                .ok_or_else(|| ConversionError::UnknownMember {
                    ty: info.name,
                    name: text.to_string(),
                }),
            ValueType::Version => text
                .parse::<Version>()
                .map(NativeValue::Version)
                .map_err(|_| ConversionError::parse(ty, text)),
            ValueType::Color => Color::from_hex(text)
                .map(NativeValue::Color)
                .map_err(|_| ConversionError::parse(ty, text)),
            ValueType::Custom(_) => match self.exact.get(ty) {
                Some(converter) => (converter.from_wire)(&WireValue::string(text)),
                None => Err(ConversionError::NoConverter(ty.to_string())),
            },
            _ => Err(ConversionError::parse(ty, text)),
        }
    }

    pub fn try_convert<T: NativeType>(&self, value: &WireValue) -> Result<T, ConversionError> {
        let ty = T::value_type();
        let native = self.from_wire(value, &ty)?;
        T::from_native(&native).ok_or_else(|| ConversionError::mismatch(&ty, native.kind_name()))
    }

    /// Extracts a native handle from an external, via the registered extractors.
    pub fn extract_handle(&self, external: &External) -> Option<NativeHandle> {
        if let Some(handle) = external.downcast_ref::<NativeHandle>() {
            return Some(*handle);
        }
        self.handle_extractors.iter().find_map(|extract| extract(external))
    }

    fn structural_from_wire(
        &self,
        value: &WireValue,
        ty: &ValueType,
    ) -> Result<NativeValue, ConversionError> {
        match ty {
            ValueType::Enum(info) => {
                let bits = match value {
                    WireValue::String(name) => {
                        info.value_of(name)
                            .ok_or_else(|| ConversionError::UnknownMember {
                                ty: info.name,
                                name: name.to_string(),
                            })?
                    }
                    WireValue::Number(n) => integral_bits(*n)
                        .filter(|bits| info.name_of(*bits).is_some())
                        .ok_or_else(|| ConversionError::OutOfRange {
                            ty: info.name.to_string(),
                            value: n.to_string(),
                        })?,
                    other => return Err(ConversionError::mismatch(ty, other.kind_name())),
                };
                Ok(NativeValue::Enum(EnumValue::new(*info, bits)))
            }
            ValueType::Flags(info) => {
                let bits = match value {
                    WireValue::Array(items) => {
                        let mut bits = 0u64;
                        for item in items {
                            let name = item
                                .as_str()
                                .ok_or_else(|| ConversionError::mismatch(ty, item.kind_name()))?;
                            bits |= info.value_of(name).ok_or_else(|| {
                                ConversionError::UnknownMember {
                                    ty: info.name,
                                    name: name.to_string(),
                                }
                            })?;
                        }
                        bits
                    }
                    WireValue::String(text) => {
                        info.parse_flags(text)
                            .ok_or_else(|| ConversionError::UnknownMember {
                                ty: info.name,
                                name: text.to_string(),
                            })?
                    }
                    WireValue::Number(n) => integral_bits(*n).ok_or_else(|| {
                        ConversionError::OutOfRange {
                            ty: info.name.to_string(),
                            value: n.to_string(),
                        }
                    })?,
                    other => return Err(ConversionError::mismatch(ty, other.kind_name())),
                };
                Ok(NativeValue::Flags(EnumValue::new(*info, bits)))
            }
            ValueType::Object(kind) => match value {
                WireValue::External(external) => {
                    let handle = self
                        .extract_handle(external)
                        .ok_or_else(|| ConversionError::mismatch(ty, external.type_name()))?;
                    if !kind.accepts(handle) {
                        return Err(ConversionError::mismatch(ty, handle.kind_name()));
                    }
                    Ok(NativeValue::Object(Some(handle)))
                }
                other => Err(ConversionError::mismatch(ty, other.kind_name())),
            },
            ValueType::Array(element) => match value {
                WireValue::Array(items) => items
                    .iter()
                    .map(|item| self.from_wire(item, element))
                    .collect::<Result<Vec<_>, _>>()
                    .map(NativeValue::Array),
                other => Err(ConversionError::mismatch(ty, other.kind_name())),
            },
            ValueType::Callback => match value {
                WireValue::External(external) => Ok(NativeValue::Callback(external.clone())),
                other => Err(ConversionError::mismatch(ty, other.kind_name())),
            },
            ValueType::Vector2 => decode::<Vector2>(value).map(NativeValue::Vector2),
            ValueType::Vector2Int => decode::<Vector2Int>(value).map(NativeValue::Vector2Int),
            ValueType::Vector3 => decode::<Vector3>(value).map(NativeValue::Vector3),
            ValueType::Vector3Int => decode::<Vector3Int>(value).map(NativeValue::Vector3Int),
            ValueType::Vector4 => decode::<Vector4>(value).map(NativeValue::Vector4),
            ValueType::Quaternion => decode::<Quaternion>(value).map(NativeValue::Quaternion),
            ValueType::Color => decode::<Color>(value).map(NativeValue::Color),
            ValueType::Rect => decode::<Rect>(value).map(NativeValue::Rect),
            ValueType::RectInt => decode::<RectInt>(value).map(NativeValue::RectInt),
            ValueType::Bounds => decode::<Bounds>(value).map(NativeValue::Bounds),
            ValueType::BoundsInt => decode::<BoundsInt>(value).map(NativeValue::BoundsInt),
            ValueType::Matrix4x4 => decode::<Matrix4x4>(value).map(NativeValue::Matrix4x4),
            ValueType::Version => decode::<Version>(value).map(NativeValue::Version),
            ValueType::Bool
            | ValueType::Char
            | ValueType::Int
            | ValueType::Float
            | ValueType::String
            | ValueType::Custom(_) => Err(ConversionError::NoConverter(ty.to_string())),
        }
    }

    // ---- native → wire ----

    pub fn to_wire(&self, value: &NativeValue) -> Result<WireValue, ConversionError> {
        if let Some(converter) = value.value_type().and_then(|ty| self.exact.get(&ty)) {
            return (converter.to_wire)(value);
        }
        Ok(match value {
            NativeValue::Null => WireValue::Null,
            NativeValue::Vector2(v) => encode(v),
            NativeValue::Vector2Int(v) => encode(v),
            NativeValue::Vector3(v) => encode(v),
            NativeValue::Vector3Int(v) => encode(v),
            NativeValue::Vector4(v) => encode(v),
            NativeValue::Quaternion(v) => encode(v),
            NativeValue::Color(v) => encode(v),
            NativeValue::Rect(v) => encode(v),
            NativeValue::RectInt(v) => encode(v),
            NativeValue::Bounds(v) => encode(v),
            NativeValue::BoundsInt(v) => encode(v),
            NativeValue::Matrix4x4(v) => encode(v),
            NativeValue::Version(v) => encode(v),
            NativeValue::Enum(v) => match v.info.name_of(v.bits) {
                Some(name) => WireValue::string(name),
                None => WireValue::Number(v.bits as f64),
            },
            NativeValue::Flags(v) => WireValue::Array(
                v.info
                    .flag_names(v.bits)
                    .into_iter()
                    .map(WireValue::string)
                    .collect(),
            ),
            NativeValue::Object(Some(handle)) => WireValue::external(*handle),
            NativeValue::Object(None) => WireValue::Null,
            NativeValue::Array(items) => WireValue::Array(
                items
                    .iter()
                    .map(|item| self.to_wire(item))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            NativeValue::Callback(external) => WireValue::External(external.clone()),
            other => return Err(ConversionError::NoConverter(other.kind_name())),
        })
    }

    pub fn try_to_wire<T: NativeType>(&self, value: T) -> Result<WireValue, ConversionError> {
        self.to_wire(&value.into_native())
    }

    // ---- defaults ----

    fn register_primitives(&mut self) {
        self.register(
            ValueType::Bool,
            |v| match v {
                NativeValue::Bool(b) => Ok(WireValue::Bool(*b)),
                other => Err(ConversionError::mismatch("Bool", other.kind_name())),
            },
            |w| match w {
                WireValue::Bool(b) => Ok(NativeValue::Bool(*b)),
                w if w.is_nullish() => Ok(NativeValue::Bool(false)),
                other => Err(ConversionError::mismatch("Bool", other.kind_name())),
            },
        );
        self.register(
            ValueType::Char,
            |v| match v {
                NativeValue::Char(c) => Ok(WireValue::string(c.to_string())),
                other => Err(ConversionError::mismatch("Char", other.kind_name())),
            },
            |w| match w {
                WireValue::String(s) if s.chars().count() == 1 => {
                    Ok(NativeValue::Char(s.chars().next().unwrap_or('\0')))
                }
                WireValue::Number(n) => char::from_u32(*n as u32)
                    .map(NativeValue::Char)
                    .ok_or_else(|| ConversionError::OutOfRange {
                        ty: "Char".to_string(),
                        value: n.to_string(),
                    }),
                w if w.is_nullish() => Ok(NativeValue::Char('\0')),
                other => Err(ConversionError::mismatch("Char", other.kind_name())),
            },
        );
        self.register(
            ValueType::Int,
            |v| match v {
                NativeValue::Int(i) => Ok(WireValue::Number(*i as f64)),
                other => Err(ConversionError::mismatch("Int", other.kind_name())),
            },
            |w| match w {
                WireValue::Number(n) if n.is_finite() => Ok(NativeValue::Int(n.trunc() as i64)),
                WireValue::Number(n) => Err(ConversionError::OutOfRange {
                    ty: "Int".to_string(),
                    value: n.to_string(),
                }),
                w if w.is_nullish() => Ok(NativeValue::Int(0)),
                other => Err(ConversionError::mismatch("Int", other.kind_name())),
            },
        );
        self.register(
            ValueType::Float,
            |v| match v {
                NativeValue::Float(f) => Ok(WireValue::Number(*f)),
                other => Err(ConversionError::mismatch("Float", other.kind_name())),
            },
            |w| match w {
                WireValue::Number(n) => Ok(NativeValue::Float(*n)),
                w if w.is_nullish() => Ok(NativeValue::Float(0.0)),
                other => Err(ConversionError::mismatch("Float", other.kind_name())),
            },
        );
        self.register(
            ValueType::String,
            |v| match v {
                NativeValue::String(s) => Ok(WireValue::String(s.clone())),
                other => Err(ConversionError::mismatch("String", other.kind_name())),
            },
            |w| match w {
                WireValue::String(s) => Ok(NativeValue::String(s.clone())),
                w if w.is_nullish() => Ok(NativeValue::string("")),
                other => Err(ConversionError::mismatch("String", other.kind_name())),
            },
        );
    }
}

fn integral_bits(n: f64) -> Option<u64> {
    (n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64).then_some(n as u64)
}

fn decode<A: Aggregate>(value: &WireValue) -> Result<A, ConversionError> {
    let items = value
        .as_array()
        .ok_or_else(|| ConversionError::mismatch(A::NAME, value.kind_name()))?;
    if items.len() != A::ARITY {
        return Err(ConversionError::Arity {
            ty: A::NAME,
            expected: A::ARITY,
            found: items.len(),
        });
    }
    let components = items
        .iter()
        .map(|item| {
            item.as_number()
                .ok_or_else(|| ConversionError::mismatch("number", item.kind_name()))
        })
        .collect::<Result<Vec<f64>, _>>()?;
    A::from_components(&components).ok_or(ConversionError::Arity {
        ty: A::NAME,
        expected: A::ARITY,
        found: components.len(),
    })
}

fn encode<A: Aggregate>(value: &A) -> WireValue {
    WireValue::Array(value.components().into_iter().map(WireValue::Number).collect())
}
