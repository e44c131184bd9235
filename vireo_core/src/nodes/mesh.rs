use std::sync::Arc;

use glam::Mat4;

use crate::geometry::{BufferAttribute, BufferGeometry};
use crate::material::MaterialSlot;
use crate::nodes::object3d::Object3D;
use crate::skeleton::Skeleton;

/// Renderable surface: a geometry plus one material or a per-group list.
#[derive(Clone, Debug)]
pub struct Mesh {
    pub geometry: Option<Arc<BufferGeometry>>,
    pub material: MaterialSlot,
    pub base: Object3D,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            geometry: None,
            material: MaterialSlot::None,
            base: Object3D::new("Mesh"),
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

/// How a skinned mesh relates to its skeleton's coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BindMode {
    #[default]
    Attached,
    Detached,
}

impl BindMode {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "detached" => Self::Detached,
            _ => Self::Attached,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Attached => "attached",
            Self::Detached => "detached",
        }
    }
}

/// Mesh deformed by a bone hierarchy.
///
/// The skeleton is filled in after the subtree containing the bone nodes
/// has been built; until then (or when the definition dangles) it stays
/// `None`.
#[derive(Clone, Debug)]
pub struct SkinnedMesh {
    pub geometry: Option<Arc<BufferGeometry>>,
    pub material: MaterialSlot,
    pub bind_mode: BindMode,
    pub bind_matrix: Mat4,
    pub skeleton: Option<Arc<Skeleton>>,
    pub base: Object3D,
}

impl SkinnedMesh {
    pub fn new() -> Self {
        Self {
            geometry: None,
            material: MaterialSlot::None,
            bind_mode: BindMode::Attached,
            bind_matrix: Mat4::IDENTITY,
            skeleton: None,
            base: Object3D::new("SkinnedMesh"),
        }
    }
}

impl Default for SkinnedMesh {
    fn default() -> Self {
        Self::new()
    }
}

/// Mesh drawn `count` times with per-instance transforms (and optionally
/// colors) held in flat attributes: 16 floats per instance matrix, 3 per
/// color.
#[derive(Clone, Debug)]
pub struct InstancedMesh {
    pub geometry: Option<Arc<BufferGeometry>>,
    pub material: MaterialSlot,
    pub count: u32,
    pub instance_matrix: Option<BufferAttribute>,
    pub instance_color: Option<BufferAttribute>,
    pub base: Object3D,
}

impl InstancedMesh {
    pub fn new() -> Self {
        Self {
            geometry: None,
            material: MaterialSlot::None,
            count: 0,
            instance_matrix: None,
            instance_color: None,
            base: Object3D::new("InstancedMesh"),
        }
    }

    /// Transform of instance `i`, read out of the flat attribute.
    pub fn matrix_at(&self, i: usize) -> Option<Mat4> {
        let attr = self.instance_matrix.as_ref()?;
        if attr.item_size != 16 || i >= attr.count() {
            return None;
        }
        let mut cols = [0.0f32; 16];
        for (c, slot) in cols.iter_mut().enumerate() {
            *slot = attr.component(i, c) as f32;
        }
        Some(Mat4::from_cols_array(&cols))
    }
}

impl Default for InstancedMesh {
    fn default() -> Self {
        Self::new()
    }
}

/// Joint in a skeleton. Carries no payload of its own; its transform is
/// what the skeleton samples.
#[derive(Clone, Debug)]
pub struct Bone {
    pub base: Object3D,
}

impl Bone {
    pub fn new() -> Self {
        Self {
            base: Object3D::new("Bone"),
        }
    }
}

impl Default for Bone {
    fn default() -> Self {
        Self::new()
    }
}

crate::impl_base_object!(Mesh);
crate::impl_base_object!(SkinnedMesh);
crate::impl_base_object!(InstancedMesh);
crate::impl_base_object!(Bone);
