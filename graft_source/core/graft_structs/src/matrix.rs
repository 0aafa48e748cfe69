use serde::{Deserialize, Serialize};

use crate::{Aggregate, Quaternion, Vector3, Vector4};

/// 4×4 matrix stored row-major: `m[row * 4 + col]`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Matrix4x4 {
    pub m: [f32; 16],
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix4x4 {
    pub const fn from_rows(m: [f32; 16]) -> Self {
        Self { m }
    }

    pub fn identity() -> Self {
        Self::from_glam(glam::Mat4::IDENTITY)
    }

    pub fn from_columns(c0: Vector4, c1: Vector4, c2: Vector4, c3: Vector4) -> Self {
        Self::from_glam(glam::Mat4::from_cols(
            c0.to_glam(),
            c1.to_glam(),
            c2.to_glam(),
            c3.to_glam(),
        ))
    }

    pub fn trs(position: Vector3, rotation: Quaternion, scale: Vector3) -> Self {
        Self::from_glam(glam::Mat4::from_scale_rotation_translation(
            scale.to_glam(),
            rotation.to_glam(),
            position.to_glam(),
        ))
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[row * 4 + col]
    }

    pub fn column(&self, col: usize) -> Vector4 {
        Vector4::new(self.m[col], self.m[4 + col], self.m[8 + col], self.m[12 + col])
    }

    pub fn to_glam(self) -> glam::Mat4 {
        glam::Mat4::from_cols_array(&self.m).transpose()
    }

    pub fn from_glam(m: glam::Mat4) -> Self {
        Self {
            m: m.transpose().to_cols_array(),
        }
    }

    pub fn multiply_point(&self, p: Vector3) -> Vector3 {
        Vector3::from_glam(self.to_glam().project_point3(p.to_glam()))
    }
}

impl Aggregate for Matrix4x4 {
    const ARITY: usize = 16;
    const NAME: &'static str = "Matrix4x4";

    fn components(&self) -> Vec<f64> {
        self.m.iter().copied().map(f64::from).collect()
    }

    fn from_components(components: &[f64]) -> Option<Self> {
        if components.len() != Self::ARITY {
            return None;
        }
        let mut m = [0.0f32; 16];
        for (slot, value) in m.iter_mut().zip(components) {
            *slot = *value as f32;
        }
        Some(Self { m })
    }
}
