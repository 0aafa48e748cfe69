use indexmap::IndexMap;

use crate::{PropertyBag, TypeInfo};

/// Registry of property bags keyed by native type.
///
/// Lookup for an instance walks its ancestor chain and stops at the first
/// type with a bag. Bags are never merged at lookup time; a derived bag that
/// wants base properties copies them with
/// [`PropertyBagBuilder::inherit`](crate::PropertyBagBuilder::inherit).
#[derive(Clone, Debug, Default)]
pub struct PropertyCatalog {
    bags: IndexMap<u64, PropertyBag>,
}

impl PropertyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a bag, replacing any previous bag for the same type.
    pub fn register(&mut self, bag: PropertyBag) {
        log::trace!("property bag registered for {} ({} properties)", bag.ty(), bag.len());
        self.bags.insert(bag.ty().key(), bag);
    }

    pub fn exact(&self, ty: &TypeInfo) -> Option<&PropertyBag> {
        self.bags.get(&ty.key())
    }

    pub fn bag_for(&self, ty: &'static TypeInfo) -> Option<&PropertyBag> {
        ty.ancestors().find_map(|ancestor| self.exact(ancestor))
    }

    /// Registered types in registration order.
    pub fn types(&self) -> impl Iterator<Item = &'static TypeInfo> + '_ {
        self.bags.values().map(PropertyBag::ty)
    }

    pub fn len(&self) -> usize {
        self.bags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bags.is_empty()
    }
}
