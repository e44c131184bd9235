pub mod camera;
pub mod light;
pub mod line;
pub mod lod;
pub mod mesh;
pub mod object3d;
pub mod registry;

pub use camera::{OrthographicCamera, PerspectiveCamera};
pub use light::{
    AmbientLight, DirectionalLight, HemisphereLight, LightProbe, LightShadow, PointLight,
    RectAreaLight, SpotLight,
};
pub use line::{Line, Points, Sprite};
pub use lod::{Lod, LodLevel};
pub use mesh::{BindMode, Bone, InstancedMesh, Mesh, SkinnedMesh};
pub use object3d::{Group, Object3D, Scene3D};
pub use registry::{BaseObject, NodeType, SceneObject};
