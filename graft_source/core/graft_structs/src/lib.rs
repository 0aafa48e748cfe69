mod aggregate;
pub mod bounds;
pub mod color;
pub mod matrix;
pub mod quaternion;
pub mod rect;
pub mod vectors;
pub mod version;

pub use aggregate::Aggregate;
pub use bounds::{Bounds, BoundsInt};
pub use color::Color;
pub use matrix::Matrix4x4;
pub use quaternion::Quaternion;
pub use rect::{Rect, RectInt};
pub use vectors::{Vector2, Vector2Int, Vector3, Vector3Int, Vector4};
pub use version::Version;
