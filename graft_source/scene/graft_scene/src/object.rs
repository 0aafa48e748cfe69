use graft_ids::{ComponentID, ObjectID};
use graft_properties::impl_property_container;

use crate::types::{GAME_OBJECT, HideFlags, OBJECT};

/// Fields every native object carries.
#[derive(Clone, Debug, Default)]
pub struct ObjectCore {
    pub name: String,
    pub hide_flags: HideFlags,
}

impl ObjectCore {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hide_flags: HideFlags::NONE,
        }
    }
}

impl_property_container!(ObjectCore, &OBJECT);

/// A scene-graph container: hierarchy, activation and attached components.
#[derive(Clone, Debug)]
pub struct GameObject {
    pub base: ObjectCore,
    pub tag: String,
    pub layer: i32,
    pub is_static: bool,
    pub(crate) active_self: bool,
    pub(crate) parent: Option<ObjectID>,
    pub(crate) children: Vec<ObjectID>,
    pub(crate) components: Vec<ComponentID>,
}

impl GameObject {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            base: ObjectCore::named(name),
            tag: "Untagged".to_string(),
            layer: 0,
            is_static: false,
            active_self: true,
            parent: None,
            children: Vec::new(),
            components: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.base.name
    }

    #[inline]
    pub fn active_self(&self) -> bool {
        self.active_self
    }

    #[inline]
    pub fn parent(&self) -> Option<ObjectID> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[ObjectID] {
        &self.children
    }

    #[inline]
    pub fn components(&self) -> &[ComponentID] {
        &self.components
    }

    /// The Transform is always the first component.
    #[inline]
    pub fn transform(&self) -> Option<ComponentID> {
        self.components.first().copied()
    }
}

impl_property_container!(GameObject, &GAME_OBJECT, base);
