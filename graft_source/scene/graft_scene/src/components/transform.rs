use graft_ids::ObjectID;
use graft_properties::impl_property_container;
use graft_structs::{Matrix4x4, Quaternion, Vector3};

use crate::components::ComponentCore;
use crate::impl_component;
use crate::types::TRANSFORM;

/// Local placement of a game object relative to its parent.
#[derive(Clone, Debug)]
pub struct Transform {
    pub base: ComponentCore,
    pub local_position: Vector3,
    pub local_rotation: Quaternion,
    pub local_scale: Vector3,
}

impl Transform {
    pub fn new(game_object: ObjectID) -> Self {
        Self {
            base: ComponentCore::new(game_object),
            local_position: Vector3::zero(),
            local_rotation: Quaternion::identity(),
            local_scale: Vector3::one(),
        }
    }

    pub fn reset_local(&mut self) {
        self.local_position = Vector3::zero();
        self.local_rotation = Quaternion::identity();
        self.local_scale = Vector3::one();
    }

    pub fn is_identity(&self) -> bool {
        self.local_position == Vector3::zero()
            && self.local_rotation == Quaternion::identity()
            && self.local_scale == Vector3::one()
    }

    pub fn local_matrix(&self) -> Matrix4x4 {
        Matrix4x4::trs(self.local_position, self.local_rotation, self.local_scale)
    }

    pub fn local_euler_angles(&self) -> Vector3 {
        self.local_rotation.to_euler_degrees()
    }

    pub fn set_local_euler_angles(&mut self, degrees: Vector3) {
        self.local_rotation = Quaternion::from_euler_degrees(degrees);
    }
}

impl_property_container!(Transform, &TRANSFORM, base);
impl_component!(Transform, core = base);
