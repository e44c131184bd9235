use crate::nodes::object3d::Object3D;
use crate::object_arena::NodeId;
use crate::structs::Color;

fn white() -> Color {
    Color::white()
}

/// Shadow settings of a shadow-casting light. The shadow camera is a real
/// camera node kept outside the tree (nil parent), referenced by handle.
#[derive(Clone, Debug)]
pub struct LightShadow {
    pub bias: f32,
    pub normal_bias: f32,
    pub radius: f32,
    pub map_size: [u32; 2],
    pub intensity: Option<f32>,
    pub camera: NodeId,
}

impl Default for LightShadow {
    fn default() -> Self {
        Self {
            bias: 0.0,
            normal_bias: 0.0,
            radius: 1.0,
            map_size: [512, 512],
            intensity: None,
            camera: NodeId::nil(),
        }
    }
}

/// Uniform fill light with no position or direction.
#[derive(Clone, Debug)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
    pub base: Object3D,
}

impl AmbientLight {
    pub fn new() -> Self {
        Self {
            color: white(),
            intensity: 1.0,
            base: Object3D::new("AmbientLight"),
        }
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self::new()
    }
}

/// Parallel-ray light aimed from its position toward a target node.
///
/// The target is another object in the same document, referenced by uuid
/// there and by handle here; it stays nil until the whole tree exists and
/// the reference can be resolved.
#[derive(Clone, Debug)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub target: NodeId,
    pub shadow: Option<LightShadow>,
    pub base: Object3D,
}

impl DirectionalLight {
    pub fn new() -> Self {
        Self {
            color: white(),
            intensity: 1.0,
            target: NodeId::nil(),
            shadow: None,
            base: Object3D::new("DirectionalLight"),
        }
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new()
    }
}

/// Omnidirectional light with distance falloff.
#[derive(Clone, Debug)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    pub distance: f32,
    pub decay: f32,
    pub shadow: Option<LightShadow>,
    pub base: Object3D,
}

impl PointLight {
    pub fn new() -> Self {
        Self {
            color: white(),
            intensity: 1.0,
            distance: 0.0,
            decay: 2.0,
            shadow: None,
            base: Object3D::new("PointLight"),
        }
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new()
    }
}

/// Cone light aimed at a target node, with angular falloff.
#[derive(Clone, Debug)]
pub struct SpotLight {
    pub color: Color,
    pub intensity: f32,
    pub distance: f32,
    /// Half-angle of the cone, radians.
    pub angle: f32,
    pub penumbra: f32,
    pub decay: f32,
    pub target: NodeId,
    pub shadow: Option<LightShadow>,
    pub base: Object3D,
}

impl SpotLight {
    pub fn new() -> Self {
        Self {
            color: white(),
            intensity: 1.0,
            distance: 0.0,
            angle: std::f32::consts::PI / 3.0,
            penumbra: 0.0,
            decay: 2.0,
            target: NodeId::nil(),
            shadow: None,
            base: Object3D::new("SpotLight"),
        }
    }
}

impl Default for SpotLight {
    fn default() -> Self {
        Self::new()
    }
}

/// Gradient light between a sky color and a ground color.
#[derive(Clone, Debug)]
pub struct HemisphereLight {
    pub color: Color,
    pub ground_color: Color,
    pub intensity: f32,
    pub base: Object3D,
}

impl HemisphereLight {
    pub fn new() -> Self {
        Self {
            color: white(),
            ground_color: white(),
            intensity: 1.0,
            base: Object3D::new("HemisphereLight"),
        }
    }
}

impl Default for HemisphereLight {
    fn default() -> Self {
        Self::new()
    }
}

/// Rectangular area light.
#[derive(Clone, Debug)]
pub struct RectAreaLight {
    pub color: Color,
    pub intensity: f32,
    pub width: f32,
    pub height: f32,
    pub base: Object3D,
}

impl RectAreaLight {
    pub fn new() -> Self {
        Self {
            color: white(),
            intensity: 1.0,
            width: 10.0,
            height: 10.0,
            base: Object3D::new("RectAreaLight"),
        }
    }
}

impl Default for RectAreaLight {
    fn default() -> Self {
        Self::new()
    }
}

/// Light probe carrying 9 third-order spherical harmonics coefficients
/// (27 scalars, rgb-interleaved).
#[derive(Clone, Debug)]
pub struct LightProbe {
    pub sh: [f32; 27],
    pub intensity: f32,
    pub base: Object3D,
}

impl LightProbe {
    pub fn new() -> Self {
        Self {
            sh: [0.0; 27],
            intensity: 1.0,
            base: Object3D::new("LightProbe"),
        }
    }
}

impl Default for LightProbe {
    fn default() -> Self {
        Self::new()
    }
}

crate::impl_base_object!(AmbientLight);
crate::impl_base_object!(DirectionalLight);
crate::impl_base_object!(PointLight);
crate::impl_base_object!(SpotLight);
crate::impl_base_object!(HemisphereLight);
crate::impl_base_object!(RectAreaLight);
crate::impl_base_object!(LightProbe);
