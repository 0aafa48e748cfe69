//! Runtime type identities and native enums of the built-in scene types.

use graft_properties::TypeInfo;
use graft_variant::{native_enum, native_flags};

pub static OBJECT: TypeInfo = TypeInfo::new("Object");
pub static GAME_OBJECT: TypeInfo = TypeInfo::derived("GameObject", &OBJECT);

pub static COMPONENT: TypeInfo = TypeInfo::derived("Component", &OBJECT);
pub static TRANSFORM: TypeInfo = TypeInfo::derived("Transform", &COMPONENT);
pub static BEHAVIOUR: TypeInfo = TypeInfo::derived("Behaviour", &COMPONENT);
pub static LIGHT: TypeInfo = TypeInfo::derived("Light", &BEHAVIOUR);
pub static CAMERA: TypeInfo = TypeInfo::derived("Camera", &BEHAVIOUR);
pub static UI_DOCUMENT: TypeInfo = TypeInfo::derived("UIDocument", &BEHAVIOUR);
pub static RENDERER: TypeInfo = TypeInfo::derived("Renderer", &COMPONENT);
pub static MESH_RENDERER: TypeInfo = TypeInfo::derived("MeshRenderer", &RENDERER);

pub static VISUAL_ELEMENT: TypeInfo = TypeInfo::new("VisualElement");
pub static TEXT_ELEMENT: TypeInfo = TypeInfo::derived("TextElement", &VISUAL_ELEMENT);
pub static LABEL: TypeInfo = TypeInfo::derived("Label", &TEXT_ELEMENT);
pub static BUTTON: TypeInfo = TypeInfo::derived("Button", &TEXT_ELEMENT);
pub static TEXT_FIELD: TypeInfo = TypeInfo::derived("TextField", &VISUAL_ELEMENT);
pub static TOGGLE: TypeInfo = TypeInfo::derived("Toggle", &VISUAL_ELEMENT);

pub static STYLE: TypeInfo = TypeInfo::new("IStyle");
pub static LENGTH: TypeInfo = TypeInfo::new("Length");
pub static STYLE_FLOAT: TypeInfo = TypeInfo::new("StyleFloat");
pub static STYLE_LENGTH: TypeInfo = TypeInfo::new("StyleLength");
pub static STYLE_COLOR: TypeInfo = TypeInfo::new("StyleColor");
pub static STYLE_JUSTIFY: TypeInfo = TypeInfo::new("StyleEnum<Justify>");
pub static STYLE_ALIGN: TypeInfo = TypeInfo::new("StyleEnum<Align>");
pub static STYLE_FLEX_DIRECTION: TypeInfo = TypeInfo::new("StyleEnum<FlexDirection>");
pub static STYLE_WHITE_SPACE: TypeInfo = TypeInfo::new("StyleEnum<WhiteSpace>");
pub static STYLE_DISPLAY: TypeInfo = TypeInfo::new("StyleEnum<DisplayStyle>");

native_flags! {
    pub struct HideFlags: "HideFlags" {
        const NONE = "None" = 0;
        const HIDE_IN_HIERARCHY = "HideInHierarchy" = 1;
        const HIDE_IN_INSPECTOR = "HideInInspector" = 2;
        const DONT_SAVE_IN_EDITOR = "DontSaveInEditor" = 4;
        const NOT_EDITABLE = "NotEditable" = 8;
        const DONT_SAVE_IN_BUILD = "DontSaveInBuild" = 16;
        const DONT_UNLOAD_UNUSED_ASSET = "DontUnloadUnusedAsset" = 32;
    }
}

native_flags! {
    pub struct UsageHints: "UsageHints" {
        const NONE = "None" = 0;
        const DYNAMIC_TRANSFORM = "DynamicTransform" = 1;
        const GROUP_TRANSFORM = "GroupTransform" = 2;
        const MASK_CONTAINER = "MaskContainer" = 4;
        const DYNAMIC_COLOR = "DynamicColor" = 8;
    }
}

native_enum! {
    pub enum LightType: "LightType" {
        Spot = 0,
        Directional = 1,
        Point = 2,
    }
}

native_enum! {
    pub enum PickingMode: "PickingMode" {
        Position = 0,
        Ignore = 1,
    }
}

native_enum! {
    pub enum LengthUnit: "LengthUnit" {
        Pixel = 0,
        Percent = 1,
    }
}

native_enum! {
    pub enum StyleKeyword: "StyleKeyword" {
        Undefined = 0,
        Null = 1,
        Auto = 2,
        None = 3,
        Initial = 4,
    }
}

native_enum! {
    pub enum Justify: "Justify" {
        FlexStart = 0,
        Center = 1,
        FlexEnd = 2,
        SpaceBetween = 3,
        SpaceAround = 4,
    }
}

native_enum! {
    pub enum Align: "Align" {
        Auto = 0,
        FlexStart = 1,
        Center = 2,
        FlexEnd = 3,
        Stretch = 4,
    }
}

native_enum! {
    pub enum FlexDirection: "FlexDirection" {
        Column = 0,
        ColumnReverse = 1,
        Row = 2,
        RowReverse = 3,
    }
}

native_enum! {
    pub enum WhiteSpace: "WhiteSpace" {
        Normal = 0,
        NoWrap = 1,
    }
}

native_enum! {
    pub enum DisplayStyle: "DisplayStyle" {
        Flex = 0,
        None = 1,
    }
}

macro_rules! default_member {
    ($($ty:ident => $member:ident),+ $(,)?) => {
        $(impl Default for $ty {
            fn default() -> Self {
                $ty::$member
            }
        })+
    };
}

default_member!(
    LightType => Spot,
    PickingMode => Position,
    LengthUnit => Pixel,
    StyleKeyword => Undefined,
    Justify => FlexStart,
    Align => Auto,
    FlexDirection => Column,
    WhiteSpace => Normal,
    DisplayStyle => Flex,
);
