use std::sync::Arc;

use graft_structs::Rect;
use graft_variant::WireValue;
use serde::{Deserialize, Serialize};

/// A node's on-screen extent in CSS pixels, top-left origin.
///
/// Edges sit on pixel centres: `left = x + 0.5`, `top = y + 0.5`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DomRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl DomRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x + 0.5
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y + 0.5
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left() + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top() + self.height
    }

    /// Object form with both the box and the edge fields.
    pub fn to_wire(&self) -> WireValue {
        let mut wire = serde_json::to_value(self)
            .map(WireValue::from_json_value)
            .unwrap_or_default();
        if let WireValue::Object(map) = &mut wire {
            for (key, value) in [
                ("left", self.left()),
                ("top", self.top()),
                ("right", self.right()),
                ("bottom", self.bottom()),
            ] {
                map.insert(Arc::from(key), WireValue::Number(value as f64));
            }
        }
        wire
    }
}

impl From<Rect> for DomRect {
    fn from(rect: Rect) -> Self {
        Self::new(rect.x, rect.y, rect.width, rect.height)
    }
}
