use graft_ids::ObjectID;
use graft_properties::{PropertyContainer, impl_property_container};
use graft_structs::{Bounds, Vector3};

use crate::Component;
use crate::components::ComponentCore;
use crate::types::{MESH_RENDERER, RENDERER};

#[derive(Clone, Debug)]
pub struct Renderer {
    pub base: ComponentCore,
    pub enabled: bool,
    pub sorting_order: i32,
    /// Mesh extent in the owning object's local space.
    pub local_bounds: Bounds,
}

impl Renderer {
    pub fn new(game_object: ObjectID) -> Self {
        Self {
            base: ComponentCore::new(game_object),
            enabled: true,
            sorting_order: 0,
            local_bounds: Bounds::new(Vector3::zero(), Vector3::one()),
        }
    }
}

impl_property_container!(Renderer, &RENDERER, base);

#[derive(Clone, Debug)]
pub struct MeshRenderer {
    pub base: Renderer,
    pub cast_shadows: bool,
    pub receive_shadows: bool,
}

impl MeshRenderer {
    pub fn new(game_object: ObjectID) -> Self {
        Self {
            base: Renderer::new(game_object),
            cast_shadows: true,
            receive_shadows: true,
        }
    }
}

impl_property_container!(MeshRenderer, &MESH_RENDERER, base);

impl Component for MeshRenderer {
    fn core(&self) -> &ComponentCore {
        &self.base.base
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.base.base
    }

    fn clone_box(&self) -> Box<dyn Component> {
        Box::new(self.clone())
    }

    fn as_container(&self) -> &dyn PropertyContainer {
        self
    }

    fn as_container_mut(&mut self) -> &mut dyn PropertyContainer {
        self
    }

    fn enabled(&self) -> Option<bool> {
        Some(self.base.enabled)
    }

    fn set_enabled(&mut self, enabled: bool) -> bool {
        self.base.enabled = enabled;
        true
    }

    fn local_bounds(&self) -> Option<Bounds> {
        Some(self.base.local_bounds)
    }
}
