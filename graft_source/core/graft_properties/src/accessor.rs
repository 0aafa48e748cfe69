use std::cell::RefCell;
use std::sync::Arc;

use graft_variant::{
    ConversionError, ConversionRegistry, NativeValue, ValueType, WireMap, WireValue,
};
use smallvec::SmallVec;

use crate::{
    Access, AccessFailure, PathSegment, PropertyBag, PropertyCatalog, PropertyContainer,
    PropertyDescriptor, PropertyError, PropertyPath, TypeInfo, ValueAccess,
};

pub const DEFAULT_MULTI_VALUE_SUFFIXES: [&str; 2] = ["Flags", "Hints"];

/// Scratch state for one path walk. Pooled by the accessor and reset between uses.
#[derive(Default)]
struct PathVisitor {
    joined: String,
    depth: usize,
}

impl PathVisitor {
    fn reset(&mut self) {
        self.joined.clear();
        self.depth = 0;
    }
}

enum Resolved<'a> {
    Value(NativeValue),
    Container(&'a dyn PropertyContainer),
}

enum Assignment<'v> {
    Wire(&'v WireValue),
    Native(NativeValue),
}

/// Typed get/set of dotted property paths over catalogued containers.
pub struct PropertyAccessor {
    catalog: PropertyCatalog,
    conversions: ConversionRegistry,
    multi_value_suffixes: Vec<String>,
    visitors: RefCell<Vec<PathVisitor>>,
}

impl PropertyAccessor {
    pub fn new(catalog: PropertyCatalog, conversions: ConversionRegistry) -> Self {
        Self {
            catalog,
            conversions,
            multi_value_suffixes: DEFAULT_MULTI_VALUE_SUFFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            visitors: RefCell::new(Vec::new()),
        }
    }

    /// Replaces the property-name suffixes whose array values are joined
    /// into the flags string form before conversion.
    pub fn with_multi_value_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.multi_value_suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    pub fn catalog(&self) -> &PropertyCatalog {
        &self.catalog
    }

    #[inline]
    pub fn catalog_mut(&mut self) -> &mut PropertyCatalog {
        &mut self.catalog
    }

    #[inline]
    pub fn conversions(&self) -> &ConversionRegistry {
        &self.conversions
    }

    #[inline]
    pub fn conversions_mut(&mut self) -> &mut ConversionRegistry {
        &mut self.conversions
    }

    pub fn is_multi_value(&self, name: &str) -> bool {
        self.multi_value_suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_str()))
    }

    // ---- get ----

    pub fn try_get(
        &self,
        container: Option<&dyn PropertyContainer>,
        path: &PropertyPath,
    ) -> Result<WireValue, PropertyError> {
        let container = container.ok_or(PropertyError::NullContainer)?;
        self.with_visitor(|visitor| match self.resolve(visitor, container, path)? {
            Resolved::Value(value) => self.to_wire(&value, path),
            Resolved::Container(nested) => self.container_to_wire(nested, path),
        })
    }

    pub fn try_get_native(
        &self,
        container: Option<&dyn PropertyContainer>,
        path: &PropertyPath,
    ) -> Result<NativeValue, PropertyError> {
        let container = container.ok_or(PropertyError::NullContainer)?;
        self.with_visitor(|visitor| match self.resolve(visitor, container, path)? {
            Resolved::Value(value) => Ok(value),
            Resolved::Container(nested) => Err(invalid_path(path, nested.type_info())),
        })
    }

    // ---- set ----

    pub fn try_set(
        &self,
        container: Option<&mut dyn PropertyContainer>,
        path: &PropertyPath,
        value: &WireValue,
    ) -> Result<(), PropertyError> {
        let container = container.ok_or(PropertyError::NullContainer)?;
        log::trace!("set {path} on {} = {value}", container.type_info());
        self.with_visitor(|visitor| self.assign(visitor, container, path, Assignment::Wire(value)))
    }

    pub fn try_set_native(
        &self,
        container: Option<&mut dyn PropertyContainer>,
        path: &PropertyPath,
        value: NativeValue,
    ) -> Result<(), PropertyError> {
        let container = container.ok_or(PropertyError::NullContainer)?;
        log::trace!("set {path} on {} = {value}", container.type_info());
        self.with_visitor(|visitor| self.assign(visitor, container, path, Assignment::Native(value)))
    }

    /// Every catalogued property as an indented `name: Type = value` line,
    /// recursing into nested containers.
    pub fn dump(&self, container: &dyn PropertyContainer) -> Vec<String> {
        let mut lines = Vec::new();
        self.dump_into(container, 0, &mut lines);
        lines
    }

    // ---- internals ----

    fn with_visitor<R>(&self, f: impl FnOnce(&mut PathVisitor) -> R) -> R {
        let mut visitor = self.visitors.borrow_mut().pop().unwrap_or_default();
        let result = f(&mut visitor);
        visitor.reset();
        self.visitors.borrow_mut().push(visitor);
        result
    }

    fn lookup(
        &self,
        ty: &'static TypeInfo,
        segment: &PathSegment,
        path: &PropertyPath,
    ) -> Result<&PropertyDescriptor, PropertyError> {
        let bag = self
            .catalog
            .bag_for(ty)
            .ok_or(PropertyError::MissingPropertyBag(ty.name))?;
        segment
            .name()
            .and_then(|name| bag.get(name))
            .ok_or_else(|| invalid_path(path, ty))
    }

    fn resolve<'a>(
        &self,
        visitor: &mut PathVisitor,
        container: &'a dyn PropertyContainer,
        path: &PropertyPath,
    ) -> Result<Resolved<'a>, PropertyError> {
        let segments = path.segments();
        if segments.is_empty() {
            return Err(invalid_path(path, container.type_info()));
        }

        let mut current = container;
        for (i, segment) in segments.iter().enumerate() {
            let ty = current.type_info();
            let descriptor = self.lookup(ty, segment, path)?;
            visitor.depth += 1;
            let owner = current
                .upcast(descriptor.owner())
                .ok_or_else(|| container_type(ty, descriptor))?;
            match descriptor.access() {
                Access::Nested { access, .. } => {
                    current = access
                        .get(owner)
                        .ok_or_else(|| container_type(ty, descriptor))?;
                }
                Access::Value(access) => {
                    let mut value = access
                        .get(owner)
                        .map_err(|_| container_type(ty, descriptor))?;
                    for next in &segments[i + 1..] {
                        let element = match (next, &value) {
                            (PathSegment::Index(index), NativeValue::Array(items)) => {
                                items.get(*index).cloned()
                            }
                            _ => None,
                        };
                        value = element.ok_or_else(|| invalid_path(path, ty))?;
                    }
                    return Ok(Resolved::Value(value));
                }
            }
        }
        log::trace!("{path} resolved to a {} container after {} steps", current.type_info(), visitor.depth);
        Ok(Resolved::Container(current))
    }

    fn assign(
        &self,
        visitor: &mut PathVisitor,
        container: &mut dyn PropertyContainer,
        path: &PropertyPath,
        assignment: Assignment<'_>,
    ) -> Result<(), PropertyError> {
        let segments = path.segments();
        if segments.is_empty() {
            return Err(invalid_path(path, container.type_info()));
        }

        let mut current = container;
        for (i, segment) in segments.iter().enumerate() {
            let ty = current.type_info();
            let descriptor = self.lookup(ty, segment, path)?;
            visitor.depth += 1;
            let owner = current
                .upcast_mut(descriptor.owner())
                .ok_or_else(|| container_type(ty, descriptor))?;
            match descriptor.access() {
                Access::Nested { access, .. } => {
                    let nested = access
                        .get_mut(owner)
                        .ok_or_else(|| container_type(ty, descriptor))?;
                    if i + 1 == segments.len() {
                        return self.assign_container(visitor, nested, path, assignment);
                    }
                    current = nested;
                }
                Access::Value(access) => {
                    if descriptor.is_read_only() {
                        return Err(PropertyError::AccessViolation {
                            path: path.to_string(),
                        });
                    }
                    return self.assign_value(
                        visitor,
                        owner,
                        descriptor,
                        &**access,
                        &segments[i + 1..],
                        path,
                        assignment,
                    );
                }
            }
        }
        Ok(())
    }

    /// Object-shaped wire values apply key by key onto a nested container.
    fn assign_container(
        &self,
        visitor: &mut PathVisitor,
        container: &mut dyn PropertyContainer,
        path: &PropertyPath,
        assignment: Assignment<'_>,
    ) -> Result<(), PropertyError> {
        let entries = match assignment {
            Assignment::Wire(WireValue::Object(entries)) => entries,
            other => return self.assign_shorthand(visitor, container, path, other),
        };
        for (key, value) in entries {
            let mut inner = path.clone();
            inner.push(PathSegment::Name(key.clone()));
            let relative = PropertyPath::from_segments([PathSegment::Name(key.clone())]);
            self.assign(visitor, &mut *container, &relative, Assignment::Wire(value))
                .map_err(|err| rebase(err, &inner))?;
        }
        Ok(())
    }

    fn assign_shorthand(
        &self,
        visitor: &mut PathVisitor,
        container: &mut dyn PropertyContainer,
        path: &PropertyPath,
        assignment: Assignment<'_>,
    ) -> Result<(), PropertyError> {
        let ty = container.type_info();
        let Some(name) = self.catalog.bag_for(ty).and_then(PropertyBag::shorthand) else {
            let found = match &assignment {
                Assignment::Wire(wire) => wire.kind_name().to_string(),
                Assignment::Native(native) => native.kind_name(),
            };
            return Err(cast(path, ty.name, found));
        };
        let mut inner = path.clone();
        inner.push(PathSegment::Name(Arc::from(name)));
        let relative = PropertyPath::from_segments([PathSegment::Name(Arc::from(name))]);
        self.assign(visitor, container, &relative, assignment)
            .map_err(|err| rebase(err, &inner))
    }

    #[allow(clippy::too_many_arguments)]
    fn assign_value(
        &self,
        visitor: &mut PathVisitor,
        owner: &mut dyn std::any::Any,
        descriptor: &PropertyDescriptor,
        access: &dyn ValueAccess,
        rest: &[PathSegment],
        path: &PropertyPath,
        assignment: Assignment<'_>,
    ) -> Result<(), PropertyError> {
        let declared = descriptor.value_type();
        if rest.is_empty() {
            let value = self.convert(visitor, declared, path, assignment)?;
            return write(access, owner, descriptor, &value, path);
        }

        // element assignment: read, replace the element, write the whole value back
        let mut indices: SmallVec<[usize; 4]> = SmallVec::new();
        let mut element_type = declared;
        for segment in rest {
            match (segment, element_type) {
                (PathSegment::Index(index), ValueType::Array(inner)) => {
                    indices.push(*index);
                    element_type = &**inner;
                }
                _ => return Err(invalid_path(path, descriptor.owner())),
            }
        }

        let mut whole = access
            .get(owner)
            .map_err(|_| container_type(descriptor.owner(), descriptor))?;
        let element = self.convert(visitor, element_type, path, assignment)?;
        if !replace_element(&mut whole, &indices, element) {
            return Err(invalid_path(path, descriptor.owner()));
        }
        write(access, owner, descriptor, &whole, path)
    }

    fn convert(
        &self,
        visitor: &mut PathVisitor,
        ty: &ValueType,
        path: &PropertyPath,
        assignment: Assignment<'_>,
    ) -> Result<NativeValue, PropertyError> {
        match assignment {
            Assignment::Native(value) => Ok(value),
            Assignment::Wire(wire) => {
                self.convert_wire(visitor, ty, path, wire)
                    .map_err(|source| PropertyError::InvalidCast {
                        path: path.to_string(),
                        source,
                    })
            }
        }
    }

    fn convert_wire(
        &self,
        visitor: &mut PathVisitor,
        ty: &ValueType,
        path: &PropertyPath,
        wire: &WireValue,
    ) -> Result<NativeValue, ConversionError> {
        match wire {
            WireValue::String(text) => self
                .conversions
                .from_str(text, ty)
                .or_else(|_| self.conversions.from_wire(wire, ty)),
            WireValue::External(external) => match ty {
                ValueType::Object(kind) => {
                    let handle = self.conversions.extract_handle(external).ok_or_else(|| {
                        ConversionError::Mismatch {
                            expected: ty.to_string(),
                            found: external.type_name().to_string(),
                        }
                    })?;
                    if !kind.accepts(handle) {
                        return Err(ConversionError::Mismatch {
                            expected: ty.to_string(),
                            found: handle.kind_name().to_string(),
                        });
                    }
                    Ok(NativeValue::Object(Some(handle)))
                }
                _ => self.conversions.from_wire(wire, ty),
            },
            WireValue::Array(items)
                if path.last_name().is_some_and(|name| self.is_multi_value(name)) =>
            {
                visitor.joined.clear();
                for item in items {
                    let name = item.as_str().ok_or_else(|| ConversionError::Mismatch {
                        expected: ty.to_string(),
                        found: item.kind_name().to_string(),
                    })?;
                    if !visitor.joined.is_empty() {
                        visitor.joined.push(',');
                    }
                    visitor.joined.push_str(name);
                }
                self.conversions
                    .from_str(&visitor.joined, ty)
                    .or_else(|_| self.conversions.from_wire(wire, ty))
            }
            _ => self.conversions.from_wire(wire, ty),
        }
    }

    fn to_wire(&self, value: &NativeValue, path: &PropertyPath) -> Result<WireValue, PropertyError> {
        self.conversions
            .to_wire(value)
            .map_err(|source| PropertyError::InvalidCast {
                path: path.to_string(),
                source,
            })
    }

    fn container_to_wire(
        &self,
        container: &dyn PropertyContainer,
        path: &PropertyPath,
    ) -> Result<WireValue, PropertyError> {
        let ty = container.type_info();
        let bag = self
            .catalog
            .bag_for(ty)
            .ok_or(PropertyError::MissingPropertyBag(ty.name))?;
        let mut map = WireMap::new();
        for descriptor in bag.iter() {
            let owner = container
                .upcast(descriptor.owner())
                .ok_or_else(|| container_type(ty, descriptor))?;
            let wire = match descriptor.access() {
                Access::Value(access) => {
                    let value = access
                        .get(owner)
                        .map_err(|_| container_type(ty, descriptor))?;
                    self.to_wire(&value, path)?
                }
                Access::Nested { access, .. } => {
                    let nested = access
                        .get(owner)
                        .ok_or_else(|| container_type(ty, descriptor))?;
                    self.container_to_wire(nested, path)?
                }
            };
            map.insert(Arc::from(descriptor.name()), wire);
        }
        Ok(WireValue::Object(map))
    }

    fn dump_into(&self, container: &dyn PropertyContainer, depth: usize, lines: &mut Vec<String>) {
        let ty = container.type_info();
        let indent = depth * 2;
        let Some(bag) = self.catalog.bag_for(ty) else {
            lines.push(format!("{:indent$}<no property bag for {ty}>", ""));
            return;
        };
        for descriptor in bag.iter() {
            let Some(owner) = container.upcast(descriptor.owner()) else {
                continue;
            };
            match descriptor.access() {
                Access::Value(access) => {
                    let Ok(value) = access.get(owner) else {
                        continue;
                    };
                    let marker = if descriptor.is_read_only() { " (read-only)" } else { "" };
                    lines.push(format!(
                        "{:indent$}{}: {}{marker} = {value}",
                        "",
                        descriptor.name(),
                        descriptor.value_type(),
                    ));
                }
                Access::Nested { ty: nested_ty, access } => {
                    lines.push(format!("{:indent$}{}: {nested_ty}", "", descriptor.name()));
                    if let Some(nested) = access.get(owner) {
                        self.dump_into(nested, depth + 1, lines);
                    }
                }
            }
        }
    }
}

fn write(
    access: &dyn ValueAccess,
    owner: &mut dyn std::any::Any,
    descriptor: &PropertyDescriptor,
    value: &NativeValue,
    path: &PropertyPath,
) -> Result<(), PropertyError> {
    access.set(owner, value).map_err(|failure| match failure {
        AccessFailure::Owner => container_type(descriptor.owner(), descriptor),
        AccessFailure::ReadOnly => PropertyError::AccessViolation {
            path: path.to_string(),
        },
        AccessFailure::Value => cast(path, descriptor.value_type(), value.kind_name()),
    })
}

fn replace_element(target: &mut NativeValue, indices: &[usize], value: NativeValue) -> bool {
    match indices.split_first() {
        None => {
            *target = value;
            true
        }
        Some((index, rest)) => match target {
            NativeValue::Array(items) => items
                .get_mut(*index)
                .is_some_and(|item| replace_element(item, rest, value)),
            _ => false,
        },
    }
}

fn invalid_path(path: &PropertyPath, ty: &'static TypeInfo) -> PropertyError {
    PropertyError::InvalidPath {
        path: path.to_string(),
        ty: ty.name,
    }
}

fn container_type(ty: &'static TypeInfo, descriptor: &PropertyDescriptor) -> PropertyError {
    PropertyError::InvalidContainerType {
        ty: ty.name,
        expected: descriptor.owner().name,
    }
}

fn cast(path: &PropertyPath, expected: impl ToString, found: impl ToString) -> PropertyError {
    PropertyError::InvalidCast {
        path: path.to_string(),
        source: ConversionError::Mismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        },
    }
}

/// Re-expresses an error from a relative sub-walk against the full path.
fn rebase(err: PropertyError, full: &PropertyPath) -> PropertyError {
    match err {
        PropertyError::InvalidCast { source, .. } => PropertyError::InvalidCast {
            path: full.to_string(),
            source,
        },
        PropertyError::InvalidPath { ty, .. } => PropertyError::InvalidPath {
            path: full.to_string(),
            ty,
        },
        PropertyError::AccessViolation { .. } => PropertyError::AccessViolation {
            path: full.to_string(),
        },
        other => other,
    }
}
