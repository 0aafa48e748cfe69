use std::fmt;

use graft_ids::ObjectID;
use graft_properties::{PropertyContainer, TypeInfo, impl_property_container};
use graft_structs::Bounds;

use crate::object::ObjectCore;
use crate::types::COMPONENT;

mod behaviour;
mod renderer;
mod transform;

pub use behaviour::{Behaviour, Camera, Light, UIDocument};
pub use renderer::{MeshRenderer, Renderer};
pub use transform::Transform;

/// Fields shared by every component.
#[derive(Clone, Debug, Default)]
pub struct ComponentCore {
    pub base: ObjectCore,
    pub game_object: ObjectID,
}

impl ComponentCore {
    pub fn new(game_object: ObjectID) -> Self {
        Self {
            base: ObjectCore::default(),
            game_object,
        }
    }
}

impl_property_container!(ComponentCore, &COMPONENT, base);

/// A behaviour attached to exactly one game object.
pub trait Component: PropertyContainer {
    fn core(&self) -> &ComponentCore;
    fn core_mut(&mut self) -> &mut ComponentCore;
    fn clone_box(&self) -> Box<dyn Component>;
    fn as_container(&self) -> &dyn PropertyContainer;
    fn as_container_mut(&mut self) -> &mut dyn PropertyContainer;

    /// `None` when the type has no enabled flag.
    fn enabled(&self) -> Option<bool> {
        None
    }

    /// Returns false when the type has no enabled flag.
    fn set_enabled(&mut self, _enabled: bool) -> bool {
        false
    }

    /// Extent in the owning object's local space, for renderers.
    fn local_bounds(&self) -> Option<Bounds> {
        None
    }
}

/// Implements [`Component`] by pointing at the embedded core (and optionally
/// an enabled flag) through a field path.
///
/// ```ignore
/// impl_component!(Transform, core = base);
/// impl_component!(Light, core = base.base, enabled = base.enabled);
/// ```
#[macro_export]
macro_rules! impl_component {
    ($ty:ty, core = $($core:ident).+ $(, enabled = $($enabled:ident).+)?) => {
        impl $crate::Component for $ty {
            fn core(&self) -> &$crate::ComponentCore {
                &self.$($core).+
            }

            fn core_mut(&mut self) -> &mut $crate::ComponentCore {
                &mut self.$($core).+
            }

            fn clone_box(&self) -> Box<dyn $crate::Component> {
                Box::new(self.clone())
            }

            fn as_container(&self) -> &dyn $crate::PropertyContainer {
                self
            }

            fn as_container_mut(&mut self) -> &mut dyn $crate::PropertyContainer {
                self
            }

            $(
                fn enabled(&self) -> Option<bool> {
                    Some(self.$($enabled).+)
                }

                fn set_enabled(&mut self, enabled: bool) -> bool {
                    self.$($enabled).+ = enabled;
                    true
                }
            )?
        }
    };
}

/// Registration record for a component type.
#[derive(Clone, Copy)]
pub struct ComponentType {
    pub info: &'static TypeInfo,
    pub create: fn(ObjectID) -> Box<dyn Component>,
    /// Non-destroyable kinds are reset to defaults instead of removed.
    pub destroyable: bool,
}

impl ComponentType {
    pub const fn new(info: &'static TypeInfo, create: fn(ObjectID) -> Box<dyn Component>) -> Self {
        Self {
            info,
            create,
            destroyable: true,
        }
    }

    pub const fn indestructible(mut self) -> Self {
        self.destroyable = false;
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.info.name
    }
}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentType")
            .field("info", &self.info)
            .field("destroyable", &self.destroyable)
            .finish()
    }
}

/// Every object carries exactly one of these, created with the object.
pub fn transform_type() -> ComponentType {
    ComponentType::new(&crate::types::TRANSFORM, |go| Box::new(Transform::new(go))).indestructible()
}

pub fn builtin_component_types() -> [ComponentType; 5] {
    [
        transform_type(),
        ComponentType::new(&crate::types::LIGHT, |go| Box::new(Light::new(go))),
        ComponentType::new(&crate::types::CAMERA, |go| Box::new(Camera::new(go))),
        ComponentType::new(&crate::types::UI_DOCUMENT, |go| Box::new(UIDocument::new(go))),
        ComponentType::new(&crate::types::MESH_RENDERER, |go| Box::new(MeshRenderer::new(go))),
    ]
}
