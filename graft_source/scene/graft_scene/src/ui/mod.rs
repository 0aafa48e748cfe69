use std::fmt;

use graft_properties::{PropertyContainer, TypeInfo};

mod controls;
mod element;
pub mod style;

pub use controls::{Button, Label, TextElement, TextField, Toggle};
pub use element::VisualElement;

/// A node of the retained-mode UI tree. Every element embeds a
/// [`VisualElement`] that carries the hierarchy and common state.
pub trait UiElement: PropertyContainer {
    fn core(&self) -> &VisualElement;
    fn core_mut(&mut self) -> &mut VisualElement;
    fn clone_box(&self) -> Box<dyn UiElement>;
    fn as_container(&self) -> &dyn PropertyContainer;
    fn as_container_mut(&mut self) -> &mut dyn PropertyContainer;
}

/// Implements [`UiElement`] by delegating to the embedded visual element.
///
/// ```ignore
/// impl_ui_element!(VisualElement);
/// impl_ui_element!(Label, base.base);
/// ```
#[macro_export]
macro_rules! impl_ui_element {
    ($ty:ty) => {
        impl $crate::UiElement for $ty {
            fn core(&self) -> &$crate::VisualElement {
                self
            }

            fn core_mut(&mut self) -> &mut $crate::VisualElement {
                self
            }

            fn clone_box(&self) -> Box<dyn $crate::UiElement> {
                Box::new(self.clone())
            }

            fn as_container(&self) -> &dyn $crate::PropertyContainer {
                self
            }

            fn as_container_mut(&mut self) -> &mut dyn $crate::PropertyContainer {
                self
            }
        }
    };
    ($ty:ty, $($core:ident).+) => {
        impl $crate::UiElement for $ty {
            fn core(&self) -> &$crate::VisualElement {
                &self.$($core).+
            }

            fn core_mut(&mut self) -> &mut $crate::VisualElement {
                &mut self.$($core).+
            }

            fn clone_box(&self) -> Box<dyn $crate::UiElement> {
                Box::new(self.clone())
            }

            fn as_container(&self) -> &dyn $crate::PropertyContainer {
                self
            }

            fn as_container_mut(&mut self) -> &mut dyn $crate::PropertyContainer {
                self
            }
        }
    };
}

/// Registration record for an element type.
#[derive(Clone, Copy)]
pub struct ElementType {
    pub info: &'static TypeInfo,
    pub create: fn() -> Box<dyn UiElement>,
}

impl ElementType {
    pub const fn new(info: &'static TypeInfo, create: fn() -> Box<dyn UiElement>) -> Self {
        Self { info, create }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.info.name
    }
}

impl fmt::Debug for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementType({})", self.info.name)
    }
}

pub fn builtin_element_types() -> [ElementType; 6] {
    use crate::types::*;
    [
        ElementType::new(&VISUAL_ELEMENT, || Box::new(VisualElement::default())),
        ElementType::new(&TEXT_ELEMENT, || Box::new(TextElement::default())),
        ElementType::new(&LABEL, || Box::new(Label::default())),
        ElementType::new(&BUTTON, || Box::new(Button::default())),
        ElementType::new(&TEXT_FIELD, || Box::new(TextField::default())),
        ElementType::new(&TOGGLE, || Box::new(Toggle::default())),
    ]
}
