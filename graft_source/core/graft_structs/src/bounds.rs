use serde::{Deserialize, Serialize};

use crate::{Aggregate, Vector3, Vector3Int};

/// Axis-aligned box stored as center and full size.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct Bounds {
    pub center: Vector3,
    pub size: Vector3,
}

/// Integer box stored as minimum corner and size.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct BoundsInt {
    pub position: Vector3Int,
    pub size: Vector3Int,
}

impl Bounds {
    pub const fn new(center: Vector3, size: Vector3) -> Self {
        Self { center, size }
    }

    pub fn extents(&self) -> Vector3 {
        self.size * 0.5
    }

    pub fn min(&self) -> Vector3 {
        self.center - self.extents()
    }

    pub fn max(&self) -> Vector3 {
        self.center + self.extents()
    }

    pub fn from_min_max(min: Vector3, max: Vector3) -> Self {
        Self::new((min + max) * 0.5, max - min)
    }

    /// The eight corners, min corner first.
    pub fn corners(&self) -> [Vector3; 8] {
        let (lo, hi) = (self.min(), self.max());
        [
            Vector3::new(lo.x, lo.y, lo.z),
            Vector3::new(hi.x, lo.y, lo.z),
            Vector3::new(lo.x, hi.y, lo.z),
            Vector3::new(hi.x, hi.y, lo.z),
            Vector3::new(lo.x, lo.y, hi.z),
            Vector3::new(hi.x, lo.y, hi.z),
            Vector3::new(lo.x, hi.y, hi.z),
            Vector3::new(hi.x, hi.y, hi.z),
        ]
    }
}

impl BoundsInt {
    pub const fn new(position: Vector3Int, size: Vector3Int) -> Self {
        Self { position, size }
    }
}

impl Aggregate for Bounds {
    const ARITY: usize = 6;
    const NAME: &'static str = "Bounds";

    fn components(&self) -> Vec<f64> {
        let (c, s) = (self.center, self.size);
        vec![c.x, c.y, c.z, s.x, s.y, s.z]
            .into_iter()
            .map(f64::from)
            .collect()
    }

    fn from_components(components: &[f64]) -> Option<Self> {
        match components {
            [cx, cy, cz, sx, sy, sz] => Some(Self::new(
                Vector3::new(*cx as f32, *cy as f32, *cz as f32),
                Vector3::new(*sx as f32, *sy as f32, *sz as f32),
            )),
            _ => None,
        }
    }
}

impl Aggregate for BoundsInt {
    const ARITY: usize = 6;
    const NAME: &'static str = "BoundsInt";

    fn components(&self) -> Vec<f64> {
        let (p, s) = (self.position, self.size);
        vec![p.x, p.y, p.z, s.x, s.y, s.z]
            .into_iter()
            .map(f64::from)
            .collect()
    }

    fn from_components(components: &[f64]) -> Option<Self> {
        match components {
            [px, py, pz, sx, sy, sz] => Some(Self::new(
                Vector3Int::new(*px as i32, *py as i32, *pz as i32),
                Vector3Int::new(*sx as i32, *sy as i32, *sz as i32),
            )),
            _ => None,
        }
    }
}
