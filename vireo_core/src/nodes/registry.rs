use std::sync::Arc;

use crate::geometry::BufferGeometry;
use crate::material::MaterialSlot;
use crate::nodes::camera::{OrthographicCamera, PerspectiveCamera};
use crate::nodes::light::{
    AmbientLight, DirectionalLight, HemisphereLight, LightProbe, PointLight, RectAreaLight,
    SpotLight,
};
use crate::nodes::line::{Line, Points, Sprite};
use crate::nodes::lod::Lod;
use crate::nodes::mesh::{Bone, InstancedMesh, Mesh, SkinnedMesh};
use crate::nodes::object3d::{Group, Object3D, Scene3D};

/// Access to the shared [`Object3D`] state every node kind embeds.
pub trait BaseObject {
    fn base(&self) -> &Object3D;
    fn base_mut(&mut self) -> &mut Object3D;
}

impl BaseObject for Object3D {
    fn base(&self) -> &Object3D {
        self
    }

    fn base_mut(&mut self) -> &mut Object3D {
        self
    }
}

/// Implements [`BaseObject`] plus `Deref`/`DerefMut` to the embedded base
/// for a node struct with a `base: Object3D` field.
#[macro_export]
macro_rules! impl_base_object {
    ($ty:ty) => {
        impl $crate::nodes::registry::BaseObject for $ty {
            fn base(&self) -> &$crate::nodes::object3d::Object3D {
                &self.base
            }

            fn base_mut(&mut self) -> &mut $crate::nodes::object3d::Object3D {
                &mut self.base
            }
        }

        impl std::ops::Deref for $ty {
            type Target = $crate::nodes::object3d::Object3D;

            fn deref(&self) -> &Self::Target {
                &self.base
            }
        }

        impl std::ops::DerefMut for $ty {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.base
            }
        }
    };
}

macro_rules! define_objects {
    ( $( $variant:ident => $ty:ty ),+ $(,)? ) => {
        /// Every node kind the object model distinguishes. Variant names
        /// double as the document type tags.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum NodeType {
            $( $variant, )+
        }

        impl NodeType {
            pub fn tag(&self) -> &'static str {
                match self {
                    $( NodeType::$variant => stringify!($variant), )+
                }
            }

            /// Unrecognized tags fall back to the generic object kind so a
            /// document written by a newer tool still loads.
            pub fn from_tag(tag: &str) -> NodeType {
                match tag {
                    $( stringify!($variant) => NodeType::$variant, )+
                    _ => NodeType::Object3D,
                }
            }

            pub fn is_known(tag: &str) -> bool {
                matches!(tag, $( stringify!($variant) )|+)
            }
        }

        /// A node of any kind, stored by value in the arena.
        #[derive(Clone, Debug)]
        pub enum SceneObject {
            $( $variant($ty), )+
        }

        impl SceneObject {
            pub fn node_type(&self) -> NodeType {
                match self {
                    $( SceneObject::$variant(_) => NodeType::$variant, )+
                }
            }

            pub fn base(&self) -> &Object3D {
                match self {
                    $( SceneObject::$variant(n) => n.base(), )+
                }
            }

            pub fn base_mut(&mut self) -> &mut Object3D {
                match self {
                    $( SceneObject::$variant(n) => n.base_mut(), )+
                }
            }
        }
    };
}

define_objects! {
    Object3D => Object3D,
    Group => Group,
    Scene => Scene3D,
    Mesh => Mesh,
    SkinnedMesh => SkinnedMesh,
    InstancedMesh => InstancedMesh,
    Bone => Bone,
    Line => Line,
    LineLoop => Line,
    LineSegments => Line,
    Points => Points,
    Sprite => Sprite,
    PerspectiveCamera => PerspectiveCamera,
    OrthographicCamera => OrthographicCamera,
    AmbientLight => AmbientLight,
    DirectionalLight => DirectionalLight,
    PointLight => PointLight,
    SpotLight => SpotLight,
    HemisphereLight => HemisphereLight,
    RectAreaLight => RectAreaLight,
    LightProbe => LightProbe,
    LOD => Lod,
}

impl SceneObject {
    pub fn uuid(&self) -> &str {
        &self.base().uuid
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    pub fn children(&self) -> &[crate::object_arena::NodeId] {
        &self.base().children
    }

    /// Geometry bound to this node, for the kinds that carry one.
    pub fn geometry(&self) -> Option<&Arc<BufferGeometry>> {
        match self {
            SceneObject::Mesh(n) => n.geometry.as_ref(),
            SceneObject::SkinnedMesh(n) => n.geometry.as_ref(),
            SceneObject::InstancedMesh(n) => n.geometry.as_ref(),
            SceneObject::Line(n) | SceneObject::LineLoop(n) | SceneObject::LineSegments(n) => {
                n.geometry.as_ref()
            }
            SceneObject::Points(n) => n.geometry.as_ref(),
            _ => None,
        }
    }

    /// Material binding of this node, for the kinds that carry one.
    pub fn material(&self) -> Option<&MaterialSlot> {
        match self {
            SceneObject::Mesh(n) => Some(&n.material),
            SceneObject::SkinnedMesh(n) => Some(&n.material),
            SceneObject::InstancedMesh(n) => Some(&n.material),
            SceneObject::Line(n) | SceneObject::LineLoop(n) | SceneObject::LineSegments(n) => {
                Some(&n.material)
            }
            SceneObject::Points(n) => Some(&n.material),
            SceneObject::Sprite(n) => Some(&n.material),
            _ => None,
        }
    }

    pub fn as_mesh(&self) -> Option<&Mesh> {
        match self {
            SceneObject::Mesh(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_skinned_mesh(&self) -> Option<&SkinnedMesh> {
        match self {
            SceneObject::SkinnedMesh(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_skinned_mesh_mut(&mut self) -> Option<&mut SkinnedMesh> {
        match self {
            SceneObject::SkinnedMesh(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_instanced_mesh(&self) -> Option<&InstancedMesh> {
        match self {
            SceneObject::InstancedMesh(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_lod(&self) -> Option<&Lod> {
        match self {
            SceneObject::LOD(n) => Some(n),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_roundtrip() {
        for tag in ["Mesh", "Scene", "SkinnedMesh", "LOD", "PointLight"] {
            assert_eq!(NodeType::from_tag(tag).tag(), tag);
        }
    }

    #[test]
    fn test_unknown_tag_falls_back() {
        assert_eq!(NodeType::from_tag("HoloDisplay"), NodeType::Object3D);
        assert!(!NodeType::is_known("HoloDisplay"));
        assert!(NodeType::is_known("LineSegments"));
    }

    #[test]
    fn test_base_access_through_enum() {
        let mut obj = SceneObject::Mesh(Mesh::new());
        obj.base_mut().name = "hull".into();
        assert_eq!(obj.name(), "hull");
        assert_eq!(obj.node_type(), NodeType::Mesh);
        assert_eq!(obj.node_type().tag(), "Mesh");
    }
}
