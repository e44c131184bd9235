use std::sync::Arc;

use crate::geometry::BufferGeometry;
use crate::material::MaterialSlot;
use crate::nodes::object3d::Object3D;

/// Polyline over a geometry's vertices. The same struct backs the
/// continuous, closed-loop and segment-pair variants; which one a node is
/// lives in the surrounding object enum (and in `base.ty`).
#[derive(Clone, Debug)]
pub struct Line {
    pub geometry: Option<Arc<BufferGeometry>>,
    pub material: MaterialSlot,
    pub base: Object3D,
}

impl Line {
    pub fn new(ty: &'static str) -> Self {
        Self {
            geometry: None,
            material: MaterialSlot::None,
            base: Object3D::new(ty),
        }
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new("Line")
    }
}

/// Point cloud over a geometry's vertices.
#[derive(Clone, Debug)]
pub struct Points {
    pub geometry: Option<Arc<BufferGeometry>>,
    pub material: MaterialSlot,
    pub base: Object3D,
}

impl Points {
    pub fn new() -> Self {
        Self {
            geometry: None,
            material: MaterialSlot::None,
            base: Object3D::new("Points"),
        }
    }
}

impl Default for Points {
    fn default() -> Self {
        Self::new()
    }
}

/// Camera-facing quad. Has a material but no geometry of its own.
#[derive(Clone, Debug)]
pub struct Sprite {
    pub material: MaterialSlot,
    pub center: [f32; 2],
    pub base: Object3D,
}

impl Sprite {
    pub fn new() -> Self {
        Self {
            material: MaterialSlot::None,
            center: [0.5, 0.5],
            base: Object3D::new("Sprite"),
        }
    }
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new()
    }
}

crate::impl_base_object!(Line);
crate::impl_base_object!(Points);
crate::impl_base_object!(Sprite);
