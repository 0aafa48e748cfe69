//! Property bags for every built-in scene type. Derived bags copy their base
//! bag's descriptors explicitly; the catalog never merges at lookup time.

use graft_properties::{PropertyBag, PropertyCatalog};

use crate::components::{
    Behaviour, Camera, ComponentCore, Light, MeshRenderer, Renderer, Transform, UIDocument,
};
use crate::object::{GameObject, ObjectCore};
use crate::types::*;
use crate::ui::style::*;
use crate::ui::{TextElement, TextField, Toggle, VisualElement};

macro_rules! nested_fields {
    ($builder:expr, $owner:ty { $($name:literal => $field:ident: $info:expr),+ $(,)? }) => {
        $builder$(.nested($name, $info, |s: &$owner| &s.$field, |s: &mut $owner| &mut s.$field))+
    };
}

macro_rules! keyword_style {
    ($ty:ty, $info:expr) => {
        PropertyBag::builder::<$ty>($info)
            .property("value", |s| s.value, |s, v| s.value = v)
            .property("keyword", |s| s.keyword, |s, v| s.keyword = v)
            .shorthand("value")
            .build()
    };
}

pub fn catalog() -> PropertyCatalog {
    let mut catalog = PropertyCatalog::new();

    // ---- Objects ----

    let object = PropertyBag::builder::<ObjectCore>(&OBJECT)
        .property("name", |o| o.name.clone(), |o, v| o.name = v)
        .property("hideFlags", |o| o.hide_flags, |o, v| o.hide_flags = v)
        .build();
    let game_object = PropertyBag::builder::<GameObject>(&GAME_OBJECT)
        .inherit(&object)
        .property("tag", |g| g.tag.clone(), |g, v| g.tag = v)
        .property("layer", |g| g.layer, |g, v| g.layer = v)
        .property("isStatic", |g| g.is_static, |g, v| g.is_static = v)
        .read_only("activeSelf", |g| g.active_self)
        .build();

    // ---- Components ----

    let component = PropertyBag::builder::<ComponentCore>(&COMPONENT)
        .inherit(&object)
        .read_only("gameObject", |c| Some(c.game_object))
        .build();
    let transform = PropertyBag::builder::<Transform>(&TRANSFORM)
        .inherit(&component)
        .property("localPosition", |t| t.local_position, |t, v| t.local_position = v)
        .property("localRotation", |t| t.local_rotation, |t, v| t.local_rotation = v)
        .property("localScale", |t| t.local_scale, |t, v| t.local_scale = v)
        .property(
            "localEulerAngles",
            |t| t.local_euler_angles(),
            |t, v| t.set_local_euler_angles(v),
        )
        .build();
    let behaviour = PropertyBag::builder::<Behaviour>(&BEHAVIOUR)
        .inherit(&component)
        .property("enabled", |b| b.enabled, |b, v| b.enabled = v)
        .build();
    let light = PropertyBag::builder::<Light>(&LIGHT)
        .inherit(&behaviour)
        .property("type", |l| l.light_type, |l, v| l.light_type = v)
        .property("color", |l| l.color, |l, v| l.color = v)
        .property("intensity", |l| l.intensity, |l, v| l.intensity = v)
        .property("range", |l| l.range, |l, v| l.range = v)
        .property("spotAngle", |l| l.spot_angle, |l, v| l.spot_angle = v)
        .build();
    let camera = PropertyBag::builder::<Camera>(&CAMERA)
        .inherit(&behaviour)
        .property("fieldOfView", |c| c.field_of_view, |c, v| c.field_of_view = v)
        .property("nearClipPlane", |c| c.near_clip_plane, |c, v| c.near_clip_plane = v)
        .property("farClipPlane", |c| c.far_clip_plane, |c, v| c.far_clip_plane = v)
        .property("orthographic", |c| c.orthographic, |c, v| c.orthographic = v)
        .property("orthographicSize", |c| c.orthographic_size, |c, v| c.orthographic_size = v)
        .property("depth", |c| c.depth, |c, v| c.depth = v)
        .property("backgroundColor", |c| c.background_color, |c, v| c.background_color = v)
        .property("rect", |c| c.rect, |c, v| c.rect = v)
        .build();
    let document = PropertyBag::builder::<UIDocument>(&UI_DOCUMENT)
        .inherit(&behaviour)
        .property("sortOrder", |d| d.sort_order, |d, v| d.sort_order = v)
        .read_only("rootVisualElement", |d| d.root)
        .build();
    let renderer = PropertyBag::builder::<Renderer>(&RENDERER)
        .inherit(&component)
        .property("enabled", |r| r.enabled, |r, v| r.enabled = v)
        .property("sortingOrder", |r| r.sorting_order, |r, v| r.sorting_order = v)
        .property("localBounds", |r| r.local_bounds, |r, v| r.local_bounds = v)
        .build();
    let mesh_renderer = PropertyBag::builder::<MeshRenderer>(&MESH_RENDERER)
        .inherit(&renderer)
        .property("castShadows", |m| m.cast_shadows, |m, v| m.cast_shadows = v)
        .property("receiveShadows", |m| m.receive_shadows, |m, v| m.receive_shadows = v)
        .build();

    // ---- UI elements ----

    let visual_element = PropertyBag::builder::<VisualElement>(&VISUAL_ELEMENT)
        .property("name", |e| e.name.clone(), |e, v| e.name = v)
        .property("visible", |e| e.visible, |e, v| e.visible = v)
        .property("enabled", |e| e.enabled_self, |e, v| e.enabled_self = v)
        .property("focusable", |e| e.focusable, |e, v| e.focusable = v)
        .property("tooltip", |e| e.tooltip.clone(), |e, v| e.tooltip = v)
        .property("pickingMode", |e| e.picking_mode, |e, v| e.picking_mode = v)
        .property("usageHints", |e| e.usage_hints, |e, v| e.usage_hints = v)
        .property("tabIndex", |e| e.tab_index, |e, v| e.tab_index = v)
        .property("viewDataKey", |e| e.view_data_key.clone(), |e, v| e.view_data_key = v)
        .property("classList", |e| e.class_list.clone(), |e, v| e.class_list = v)
        .read_only("layout", |e| e.layout())
        .nested(
            "style",
            &STYLE,
            |e: &VisualElement| &e.style,
            |e: &mut VisualElement| &mut e.style,
        )
        .build();
    let text_element = PropertyBag::builder::<TextElement>(&TEXT_ELEMENT)
        .inherit(&visual_element)
        .property("text", |t| t.text.clone(), |t, v| t.text = v)
        .property("enableRichText", |t| t.enable_rich_text, |t, v| t.enable_rich_text = v)
        .build();
    let text_field = PropertyBag::builder::<TextField>(&TEXT_FIELD)
        .inherit(&visual_element)
        .property("value", |t| t.value.clone(), |t, v| t.value = v)
        .property("label", |t| t.label.clone(), |t, v| t.label = v)
        .property("maxLength", |t| t.max_length, |t, v| t.max_length = v)
        .property("isPasswordField", |t| t.is_password_field, |t, v| t.is_password_field = v)
        .property("isReadOnly", |t| t.is_read_only, |t, v| t.is_read_only = v)
        .property("multiline", |t| t.multiline, |t, v| t.multiline = v)
        .build();
    let toggle = PropertyBag::builder::<Toggle>(&TOGGLE)
        .inherit(&visual_element)
        .property("value", |t| t.value, |t, v| t.value = v)
        .property("label", |t| t.label.clone(), |t, v| t.label = v)
        .property("text", |t| t.text.clone(), |t, v| t.text = v)
        .build();

    // ---- Style ----

    let style = nested_fields!(PropertyBag::builder::<Style>(&STYLE), Style {
        "width" => width: &STYLE_LENGTH,
        "height" => height: &STYLE_LENGTH,
        "left" => left: &STYLE_LENGTH,
        "top" => top: &STYLE_LENGTH,
        "paddingLeft" => padding_left: &STYLE_LENGTH,
        "paddingRight" => padding_right: &STYLE_LENGTH,
        "paddingTop" => padding_top: &STYLE_LENGTH,
        "paddingBottom" => padding_bottom: &STYLE_LENGTH,
        "marginLeft" => margin_left: &STYLE_LENGTH,
        "marginRight" => margin_right: &STYLE_LENGTH,
        "marginTop" => margin_top: &STYLE_LENGTH,
        "marginBottom" => margin_bottom: &STYLE_LENGTH,
        "fontSize" => font_size: &STYLE_LENGTH,
        "flexGrow" => flex_grow: &STYLE_FLOAT,
        "flexShrink" => flex_shrink: &STYLE_FLOAT,
        "opacity" => opacity: &STYLE_FLOAT,
        "color" => color: &STYLE_COLOR,
        "backgroundColor" => background_color: &STYLE_COLOR,
        "justifyContent" => justify_content: &STYLE_JUSTIFY,
        "alignItems" => align_items: &STYLE_ALIGN,
        "flexDirection" => flex_direction: &STYLE_FLEX_DIRECTION,
        "whiteSpace" => white_space: &STYLE_WHITE_SPACE,
        "display" => display: &STYLE_DISPLAY,
    })
    .build();
    let length = PropertyBag::builder::<Length>(&LENGTH)
        .property("value", |l| l.value, |l, v| l.value = v)
        .property("unit", |l| l.unit, |l, v| l.unit = v)
        .shorthand("value")
        .build();
    let style_length = PropertyBag::builder::<StyleLength>(&STYLE_LENGTH)
        .nested(
            "value",
            &LENGTH,
            |s: &StyleLength| &s.value,
            |s: &mut StyleLength| &mut s.value,
        )
        .property("keyword", |s| s.keyword, |s, v| s.keyword = v)
        .shorthand("value")
        .build();

    for bag in [
        object,
        game_object,
        component,
        transform,
        behaviour,
        light,
        camera,
        document,
        renderer,
        mesh_renderer,
        visual_element,
        text_element,
        text_field,
        toggle,
        style,
        length,
        style_length,
        keyword_style!(StyleFloat, &STYLE_FLOAT),
        keyword_style!(StyleColor, &STYLE_COLOR),
        keyword_style!(StyleJustify, &STYLE_JUSTIFY),
        keyword_style!(StyleAlign, &STYLE_ALIGN),
        keyword_style!(StyleFlexDirection, &STYLE_FLEX_DIRECTION),
        keyword_style!(StyleWhiteSpace, &STYLE_WHITE_SPACE),
        keyword_style!(StyleDisplay, &STYLE_DISPLAY),
    ] {
        catalog.register(bag);
    }
    catalog
}
