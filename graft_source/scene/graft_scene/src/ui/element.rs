use graft_ids::ElementID;
use graft_properties::impl_property_container;
use graft_structs::Rect;

use crate::impl_ui_element;
use crate::types::{PickingMode, UsageHints, VISUAL_ELEMENT};
use crate::ui::style::Style;

/// Base UI element: common state, inline style and the tree links.
#[derive(Clone, Debug)]
pub struct VisualElement {
    pub name: String,
    pub visible: bool,
    pub enabled_self: bool,
    pub focusable: bool,
    pub tooltip: String,
    pub picking_mode: PickingMode,
    pub usage_hints: UsageHints,
    pub tab_index: i32,
    pub view_data_key: String,
    pub class_list: Vec<String>,
    pub style: Style,
    pub(crate) parent: Option<ElementID>,
    pub(crate) children: Vec<ElementID>,
}

impl Default for VisualElement {
    fn default() -> Self {
        Self {
            name: String::new(),
            visible: true,
            enabled_self: true,
            focusable: false,
            tooltip: String::new(),
            picking_mode: PickingMode::Position,
            usage_hints: UsageHints::NONE,
            tab_index: 0,
            view_data_key: String::new(),
            class_list: Vec::new(),
            style: Style::default(),
            parent: None,
            children: Vec::new(),
        }
    }
}

impl VisualElement {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn parent(&self) -> Option<ElementID> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[ElementID] {
        &self.children
    }

    /// Layout rectangle relative to the parent, resolved from inline style
    /// against the parent's size.
    pub fn layout_in(&self, parent_size: (f32, f32)) -> Rect {
        let (pw, ph) = parent_size;
        Rect::new(
            self.style.left.resolve(pw) + self.style.margin_left.resolve(pw),
            self.style.top.resolve(ph) + self.style.margin_top.resolve(ph),
            self.style.width.resolve(pw),
            self.style.height.resolve(ph),
        )
    }

    /// Layout with percentages resolved against nothing.
    pub fn layout(&self) -> Rect {
        self.layout_in((0.0, 0.0))
    }
}

impl_property_container!(VisualElement, &VISUAL_ELEMENT);
impl_ui_element!(VisualElement);
