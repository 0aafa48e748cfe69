use graft_properties::impl_property_container;

use crate::impl_ui_element;
use crate::types::{BUTTON, LABEL, TEXT_ELEMENT, TEXT_FIELD, TOGGLE};
use crate::ui::VisualElement;

#[derive(Clone, Debug, Default)]
pub struct TextElement {
    pub base: VisualElement,
    pub text: String,
    pub enable_rich_text: bool,
}

impl_property_container!(TextElement, &TEXT_ELEMENT, base);
impl_ui_element!(TextElement, base);

#[derive(Clone, Debug, Default)]
pub struct Label {
    pub base: TextElement,
}

impl_property_container!(Label, &LABEL, base);
impl_ui_element!(Label, base.base);

#[derive(Clone, Debug)]
pub struct Button {
    pub base: TextElement,
}

impl Default for Button {
    fn default() -> Self {
        let mut base = TextElement::default();
        base.base.focusable = true;
        Self { base }
    }
}

impl_property_container!(Button, &BUTTON, base);
impl_ui_element!(Button, base.base);

#[derive(Clone, Debug)]
pub struct TextField {
    pub base: VisualElement,
    pub value: String,
    pub label: String,
    pub max_length: i32,
    pub is_password_field: bool,
    pub is_read_only: bool,
    pub multiline: bool,
}

impl Default for TextField {
    fn default() -> Self {
        Self {
            base: VisualElement {
                focusable: true,
                ..VisualElement::default()
            },
            value: String::new(),
            label: String::new(),
            max_length: -1,
            is_password_field: false,
            is_read_only: false,
            multiline: false,
        }
    }
}

impl_property_container!(TextField, &TEXT_FIELD, base);
impl_ui_element!(TextField, base);

#[derive(Clone, Debug)]
pub struct Toggle {
    pub base: VisualElement,
    pub value: bool,
    pub label: String,
    pub text: String,
}

impl Default for Toggle {
    fn default() -> Self {
        Self {
            base: VisualElement {
                focusable: true,
                ..VisualElement::default()
            },
            value: false,
            label: String::new(),
            text: String::new(),
        }
    }
}

impl_property_container!(Toggle, &TOGGLE, base);
impl_ui_element!(Toggle, base);
