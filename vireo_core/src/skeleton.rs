use glam::Mat4;

use crate::object_arena::NodeId;

/// Bind hierarchy of a skinned mesh: bone handles in document order plus
/// the matching inverse bind matrices.
///
/// Bones are ordinary `Bone` nodes living in the same tree as the owning
/// mesh, so entries are arena handles, resolved only after that subtree
/// has been built. A bone uuid with no matching node leaves a `None` slot
/// rather than compacting the list, keeping index correspondence with
/// `bone_inverses` intact.
#[derive(Clone, Debug, Default)]
pub struct Skeleton {
    pub uuid: String,
    pub bones: Vec<Option<NodeId>>,
    pub bone_inverses: Vec<Mat4>,
}

impl Skeleton {
    /// Number of bone slots (including unresolved ones).
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }
}
