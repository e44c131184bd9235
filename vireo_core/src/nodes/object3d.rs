use std::borrow::Cow;
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::animation::AnimationClip;
use crate::object_arena::NodeId;
use crate::structs::{Color, Transform3D};

fn default_layers() -> u32 {
    1
}

/// Shared state of every scene object.
///
/// Concrete node kinds wrap this by value (`base` field + `Deref`), the
/// same composition the rest of the object model uses instead of an
/// inheritance chain. Identity (`uuid`) is a document-scoped string key;
/// graph links (`parent`, `children`) are arena handles.
#[derive(Clone, Debug)]
pub struct Object3D {
    pub uuid: String,
    pub name: String,
    /// Type tag as it appeared in the document. Preserved even when the
    /// kind fell back to the generic object.
    pub ty: Cow<'static, str>,
    pub transform: Transform3D,
    pub visible: bool,
    pub frustum_culled: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub render_order: i32,
    /// Layer membership bitmask.
    pub layers: u32,
    pub matrix_auto_update: bool,
    pub user_data: Option<Value>,

    pub parent: NodeId,
    pub children: Vec<NodeId>,

    /// Clips attached to this object (usually only the root carries any).
    pub animations: Vec<Arc<AnimationClip>>,
}

impl Object3D {
    pub fn new(ty: impl Into<Cow<'static, str>>) -> Self {
        Self {
            uuid: Uuid::new_v4().to_string(),
            name: String::new(),
            ty: ty.into(),
            transform: Transform3D::default(),
            visible: true,
            frustum_culled: true,
            cast_shadow: false,
            receive_shadow: false,
            render_order: 0,
            layers: default_layers(),
            matrix_auto_update: true,
            user_data: None,
            parent: NodeId::nil(),
            children: Vec::new(),
            animations: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub fn remove_child(&mut self, child: NodeId) {
        self.children.retain(|c| *c != child);
    }
}

impl Default for Object3D {
    fn default() -> Self {
        Self::new("Object3D")
    }
}

/// Pure container node.
#[derive(Clone, Debug)]
pub struct Group {
    pub base: Object3D,
}

impl Group {
    pub fn new() -> Self {
        Self {
            base: Object3D::new("Group"),
        }
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::new()
    }
}

/// Root container of a document.
#[derive(Clone, Debug)]
pub struct Scene3D {
    pub background: Option<Color>,
    pub base: Object3D,
}

impl Scene3D {
    pub fn new() -> Self {
        Self {
            background: None,
            base: Object3D::new("Scene"),
        }
    }
}

impl Default for Scene3D {
    fn default() -> Self {
        Self::new()
    }
}

crate::impl_base_object!(Group);
crate::impl_base_object!(Scene3D);
