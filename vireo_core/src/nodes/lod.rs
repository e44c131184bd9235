use crate::nodes::object3d::Object3D;
use crate::object_arena::NodeId;

/// One detail level: the child object shown while the camera distance is
/// at least `distance` away (with `hysteresis` easing the switchover).
#[derive(Clone, Copy, Debug)]
pub struct LodLevel {
    pub object: NodeId,
    pub distance: f32,
    pub hysteresis: f32,
}

/// Level-of-detail switch. Levels reference this node's own children, so
/// they resolve right after the subtree is built; a level whose object
/// uuid matches no child is dropped with a warning.
#[derive(Clone, Debug)]
pub struct Lod {
    pub levels: Vec<LodLevel>,
    pub auto_update: bool,
    pub base: Object3D,
}

impl Lod {
    pub fn new() -> Self {
        Self {
            levels: Vec::new(),
            auto_update: true,
            base: Object3D::new("LOD"),
        }
    }
}

impl Default for Lod {
    fn default() -> Self {
        Self::new()
    }
}

crate::impl_base_object!(Lod);
