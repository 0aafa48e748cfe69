use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use graft_variant::{NativeType, NativeValue, ValueType};
use indexmap::IndexMap;

use crate::{PropertyContainer, TypeInfo};

/// Why a descriptor refused a read or write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessFailure {
    /// The upcast owner is not the struct the descriptor was built for.
    Owner,
    ReadOnly,
    /// The converted value does not fit the field.
    Value,
}

/// Typed getter/setter pair over an owner struct, erased to `dyn Any`.
pub trait ValueAccess {
    fn get(&self, owner: &dyn Any) -> Result<NativeValue, AccessFailure>;
    fn set(&self, owner: &mut dyn Any, value: &NativeValue) -> Result<(), AccessFailure>;
}

/// Borrow of a nested property container held by an owner struct.
pub trait NestedAccess {
    fn get<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn PropertyContainer>;
    fn get_mut<'a>(&self, owner: &'a mut dyn Any) -> Option<&'a mut dyn PropertyContainer>;
}

pub struct Field<C, V> {
    get: fn(&C) -> V,
    set: Option<fn(&mut C, V)>,
}

impl<C: 'static, V: NativeType> ValueAccess for Field<C, V> {
    fn get(&self, owner: &dyn Any) -> Result<NativeValue, AccessFailure> {
        let owner = owner.downcast_ref::<C>().ok_or(AccessFailure::Owner)?;
        Ok((self.get)(owner).into_native())
    }

    fn set(&self, owner: &mut dyn Any, value: &NativeValue) -> Result<(), AccessFailure> {
        let set = self.set.ok_or(AccessFailure::ReadOnly)?;
        let owner = owner.downcast_mut::<C>().ok_or(AccessFailure::Owner)?;
        let value = V::from_native(value).ok_or(AccessFailure::Value)?;
        set(owner, value);
        Ok(())
    }
}

pub struct NestedField<C, N> {
    get: fn(&C) -> &N,
    get_mut: fn(&mut C) -> &mut N,
}

impl<C: 'static, N: PropertyContainer> NestedAccess for NestedField<C, N> {
    fn get<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn PropertyContainer> {
        let owner = owner.downcast_ref::<C>()?;
        Some((self.get)(owner) as &dyn PropertyContainer)
    }

    fn get_mut<'a>(&self, owner: &'a mut dyn Any) -> Option<&'a mut dyn PropertyContainer> {
        let owner = owner.downcast_mut::<C>()?;
        Some((self.get_mut)(owner) as &mut dyn PropertyContainer)
    }
}

pub enum Access {
    Value(Box<dyn ValueAccess>),
    Nested {
        ty: &'static TypeInfo,
        access: Box<dyn NestedAccess>,
    },
}

/// One catalogued property: name, declared type, read-only flag and accessors.
#[derive(Clone)]
pub struct PropertyDescriptor {
    name: &'static str,
    value_type: ValueType,
    read_only: bool,
    owner: &'static TypeInfo,
    access: Rc<Access>,
}

impl PropertyDescriptor {
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared type. Nested containers report `Custom(<container type>)`.
    #[inline]
    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    #[inline]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// The type whose struct the accessors operate on (the declaring type).
    #[inline]
    pub fn owner(&self) -> &'static TypeInfo {
        self.owner
    }

    #[inline]
    pub fn access(&self) -> &Access {
        &self.access
    }

    pub fn is_nested(&self) -> bool {
        matches!(*self.access, Access::Nested { .. })
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("value_type", &self.value_type)
            .field("read_only", &self.read_only)
            .field("owner", &self.owner)
            .finish()
    }
}

/// Ordered property descriptors registered for one native type.
#[derive(Clone, Debug)]
pub struct PropertyBag {
    ty: &'static TypeInfo,
    properties: IndexMap<&'static str, PropertyDescriptor>,
    shorthand: Option<&'static str>,
}

impl PropertyBag {
    pub fn builder<C: PropertyContainer>(ty: &'static TypeInfo) -> PropertyBagBuilder<C> {
        PropertyBagBuilder {
            bag: PropertyBag {
                ty,
                properties: IndexMap::new(),
                shorthand: None,
            },
            _owner: PhantomData,
        }
    }

    #[inline]
    pub fn ty(&self) -> &'static TypeInfo {
        self.ty
    }

    pub fn get(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.get(name)
    }

    /// Property that receives a plain value assigned to the container as a whole.
    #[inline]
    pub fn shorthand(&self) -> Option<&'static str> {
        self.shorthand
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.values()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

pub struct PropertyBagBuilder<C> {
    bag: PropertyBag,
    _owner: PhantomData<fn(&C)>,
}

impl<C: PropertyContainer> PropertyBagBuilder<C> {
    /// Copies every descriptor of a base type's bag. Copied descriptors keep
    /// their declaring owner, so they resolve through `upcast`.
    pub fn inherit(mut self, base: &PropertyBag) -> Self {
        for descriptor in base.iter() {
            self.bag.properties.insert(descriptor.name, descriptor.clone());
        }
        self
    }

    pub fn property<V: NativeType>(self, name: &'static str, get: fn(&C) -> V, set: fn(&mut C, V)) -> Self {
        self.value(name, V::value_type(), get, Some(set))
    }

    pub fn read_only<V: NativeType>(self, name: &'static str, get: fn(&C) -> V) -> Self {
        self.value(name, V::value_type(), get, None)
    }

    /// A property whose declared type is narrower than `V::value_type()`.
    pub fn typed<V: NativeType>(
        self,
        name: &'static str,
        value_type: ValueType,
        get: fn(&C) -> V,
        set: Option<fn(&mut C, V)>,
    ) -> Self {
        self.value(name, value_type, get, set)
    }

    pub fn nested<N: PropertyContainer>(
        mut self,
        name: &'static str,
        ty: &'static TypeInfo,
        get: fn(&C) -> &N,
        get_mut: fn(&mut C) -> &mut N,
    ) -> Self {
        let descriptor = PropertyDescriptor {
            name,
            value_type: ValueType::Custom(ty.name),
            read_only: false,
            owner: self.bag.ty,
            access: Rc::new(Access::Nested {
                ty,
                access: Box::new(NestedField { get, get_mut }),
            }),
        };
        self.bag.properties.insert(name, descriptor);
        self
    }

    /// Routes a non-object assignment on the whole container to `name`,
    /// so `style.width = 100` lands on `style.width.value`.
    pub fn shorthand(mut self, name: &'static str) -> Self {
        self.bag.shorthand = Some(name);
        self
    }

    pub fn build(self) -> PropertyBag {
        self.bag
    }

    fn value<V: NativeType>(
        mut self,
        name: &'static str,
        value_type: ValueType,
        get: fn(&C) -> V,
        set: Option<fn(&mut C, V)>,
    ) -> Self {
        let descriptor = PropertyDescriptor {
            name,
            value_type,
            read_only: set.is_none(),
            owner: self.bag.ty,
            access: Rc::new(Access::Value(Box::new(Field { get, set }))),
        };
        self.bag.properties.insert(name, descriptor);
        self
    }
}
