//! Inline style values. Each value is its own property container so paths
//! like `style.paddingLeft.value.value` resolve down to the scalar.

use graft_properties::impl_property_container;
use graft_structs::Color;

use crate::types::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Length {
    pub value: f32,
    pub unit: LengthUnit,
}

impl Length {
    pub const fn px(value: f32) -> Self {
        Self {
            value,
            unit: LengthUnit::Pixel,
        }
    }

    pub const fn percent(value: f32) -> Self {
        Self {
            value,
            unit: LengthUnit::Percent,
        }
    }

    /// Pixels, given the extent percentages are relative to.
    pub fn resolve(&self, reference: f32) -> f32 {
        match self.unit {
            LengthUnit::Pixel => self.value,
            LengthUnit::Percent => reference * self.value / 100.0,
        }
    }
}

impl_property_container!(Length, &LENGTH);

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StyleLength {
    pub value: Length,
    pub keyword: StyleKeyword,
}

impl StyleLength {
    pub fn resolve(&self, reference: f32) -> f32 {
        match self.keyword {
            StyleKeyword::Undefined | StyleKeyword::Initial => self.value.resolve(reference),
            _ => 0.0,
        }
    }
}

impl_property_container!(StyleLength, &STYLE_LENGTH);

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StyleFloat {
    pub value: f32,
    pub keyword: StyleKeyword,
}

impl_property_container!(StyleFloat, &STYLE_FLOAT);

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StyleColor {
    pub value: Color,
    pub keyword: StyleKeyword,
}

impl_property_container!(StyleColor, &STYLE_COLOR);

macro_rules! style_enum {
    ($($name:ident($value:ty) => $info:ident),+ $(,)?) => {
        $(
            #[derive(Clone, Copy, Debug, Default, PartialEq)]
            pub struct $name {
                pub value: $value,
                pub keyword: StyleKeyword,
            }

            impl_property_container!($name, &$info);
        )+
    };
}

style_enum!(
    StyleJustify(Justify) => STYLE_JUSTIFY,
    StyleAlign(Align) => STYLE_ALIGN,
    StyleFlexDirection(FlexDirection) => STYLE_FLEX_DIRECTION,
    StyleWhiteSpace(WhiteSpace) => STYLE_WHITE_SPACE,
    StyleDisplay(DisplayStyle) => STYLE_DISPLAY,
);

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    pub width: StyleLength,
    pub height: StyleLength,
    pub left: StyleLength,
    pub top: StyleLength,
    pub padding_left: StyleLength,
    pub padding_right: StyleLength,
    pub padding_top: StyleLength,
    pub padding_bottom: StyleLength,
    pub margin_left: StyleLength,
    pub margin_right: StyleLength,
    pub margin_top: StyleLength,
    pub margin_bottom: StyleLength,
    pub font_size: StyleLength,
    pub flex_grow: StyleFloat,
    pub flex_shrink: StyleFloat,
    pub opacity: StyleFloat,
    pub color: StyleColor,
    pub background_color: StyleColor,
    pub justify_content: StyleJustify,
    pub align_items: StyleAlign,
    pub flex_direction: StyleFlexDirection,
    pub white_space: StyleWhiteSpace,
    pub display: StyleDisplay,
}

impl_property_container!(Style, &STYLE);
