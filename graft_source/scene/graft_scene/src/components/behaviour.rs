use graft_ids::{ElementID, ObjectID};
use graft_properties::impl_property_container;
use graft_structs::{Color, Rect};

use crate::components::ComponentCore;
use crate::impl_component;
use crate::types::{BEHAVIOUR, CAMERA, LIGHT, LightType, UI_DOCUMENT};

/// Components that can be switched on and off.
#[derive(Clone, Debug)]
pub struct Behaviour {
    pub base: ComponentCore,
    pub enabled: bool,
}

impl Behaviour {
    pub fn new(game_object: ObjectID) -> Self {
        Self {
            base: ComponentCore::new(game_object),
            enabled: true,
        }
    }
}

impl_property_container!(Behaviour, &BEHAVIOUR, base);

#[derive(Clone, Debug)]
pub struct Light {
    pub base: Behaviour,
    pub light_type: LightType,
    pub color: Color,
    pub intensity: f32,
    pub range: f32,
    pub spot_angle: f32,
}

impl Light {
    pub fn new(game_object: ObjectID) -> Self {
        Self {
            base: Behaviour::new(game_object),
            light_type: LightType::Point,
            color: Color::WHITE,
            intensity: 1.0,
            range: 10.0,
            spot_angle: 30.0,
        }
    }
}

impl_property_container!(Light, &LIGHT, base);
impl_component!(Light, core = base.base, enabled = base.enabled);

#[derive(Clone, Debug)]
pub struct Camera {
    pub base: Behaviour,
    pub field_of_view: f32,
    pub near_clip_plane: f32,
    pub far_clip_plane: f32,
    pub orthographic: bool,
    pub orthographic_size: f32,
    pub depth: f32,
    pub background_color: Color,
    /// Normalized viewport rectangle on the screen.
    pub rect: Rect,
}

impl Camera {
    pub fn new(game_object: ObjectID) -> Self {
        Self {
            base: Behaviour::new(game_object),
            field_of_view: 60.0,
            near_clip_plane: 0.3,
            far_clip_plane: 1000.0,
            orthographic: false,
            orthographic_size: 5.0,
            depth: 0.0,
            background_color: Color::new(0.19, 0.3, 0.47, 0.0),
            rect: Rect::new(0.0, 0.0, 1.0, 1.0),
        }
    }
}

impl_property_container!(Camera, &CAMERA, base);
impl_component!(Camera, core = base.base, enabled = base.enabled);

/// Hosts a retained-mode UI tree. The root element is created on first use.
#[derive(Clone, Debug)]
pub struct UIDocument {
    pub base: Behaviour,
    pub sort_order: f32,
    pub(crate) root: Option<ElementID>,
}

impl UIDocument {
    pub fn new(game_object: ObjectID) -> Self {
        Self {
            base: Behaviour::new(game_object),
            sort_order: 0.0,
            root: None,
        }
    }

    #[inline]
    pub fn root(&self) -> Option<ElementID> {
        self.root
    }
}

impl_property_container!(UIDocument, &UI_DOCUMENT, base);
impl_component!(UIDocument, core = base.base, enabled = base.enabled);
