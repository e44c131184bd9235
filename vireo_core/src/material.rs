use std::borrow::Cow;
use std::sync::Arc;

use serde_json::Value;

use crate::structs::Color;
use crate::texture::Texture;

/// Known material type tags. Unknown tags load as [`MaterialKind::Other`]
/// so a newer document still round-trips.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaterialKind {
    MeshBasic,
    MeshStandard,
    MeshPhysical,
    MeshPhong,
    MeshLambert,
    MeshToon,
    MeshNormal,
    MeshDepth,
    MeshMatcap,
    LineBasic,
    LineDashed,
    PointsMaterial,
    SpriteMaterial,
    ShadowMaterial,
    Other,
}

impl MaterialKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "MeshBasicMaterial" => Self::MeshBasic,
            "MeshStandardMaterial" => Self::MeshStandard,
            "MeshPhysicalMaterial" => Self::MeshPhysical,
            "MeshPhongMaterial" => Self::MeshPhong,
            "MeshLambertMaterial" => Self::MeshLambert,
            "MeshToonMaterial" => Self::MeshToon,
            "MeshNormalMaterial" => Self::MeshNormal,
            "MeshDepthMaterial" => Self::MeshDepth,
            "MeshMatcapMaterial" => Self::MeshMatcap,
            "LineBasicMaterial" => Self::LineBasic,
            "LineDashedMaterial" => Self::LineDashed,
            "PointsMaterial" => Self::PointsMaterial,
            "SpriteMaterial" => Self::SpriteMaterial,
            "ShadowMaterial" => Self::ShadowMaterial,
            _ => Self::Other,
        }
    }
}

/// Reconstructed material: a type tag plus the recognized subset of the
/// document's flat property bag.
///
/// Enumerated render-state properties (`side`, `blending`, `depthFunc`,
/// ...) are opaque integers; the loader copies them through without
/// reinterpretation. Properties it does not recognize are ignored, so
/// documents written by newer tools still load.
#[derive(Clone, Debug)]
pub struct Material {
    pub uuid: String,
    pub ty: Cow<'static, str>,
    pub kind: MaterialKind,
    pub name: String,

    pub color: Option<Color>,
    pub emissive: Option<Color>,
    pub emissive_intensity: Option<f32>,
    pub roughness: Option<f32>,
    pub metalness: Option<f32>,
    pub shininess: Option<f32>,
    pub specular: Option<Color>,

    pub opacity: f32,
    pub transparent: bool,
    pub visible: bool,
    pub side: Option<i64>,
    pub blending: Option<i64>,
    pub depth_func: Option<i64>,
    pub depth_test: bool,
    pub depth_write: bool,
    pub alpha_test: Option<f32>,
    pub wireframe: bool,
    pub flat_shading: bool,
    pub vertex_colors: bool,
    pub fog: Option<bool>,

    // line / point payload
    pub linewidth: Option<f32>,
    pub dash_size: Option<f32>,
    pub gap_size: Option<f32>,
    pub size: Option<f32>,
    pub size_attenuation: Option<bool>,

    // texture slots, resolved against the document's texture collection
    pub map: Option<Arc<Texture>>,
    pub alpha_map: Option<Arc<Texture>>,
    pub normal_map: Option<Arc<Texture>>,
    pub bump_map: Option<Arc<Texture>>,
    pub ao_map: Option<Arc<Texture>>,
    pub emissive_map: Option<Arc<Texture>>,
    pub env_map: Option<Arc<Texture>>,
    pub light_map: Option<Arc<Texture>>,
    pub roughness_map: Option<Arc<Texture>>,
    pub metalness_map: Option<Arc<Texture>>,
    pub specular_map: Option<Arc<Texture>>,

    pub user_data: Option<Value>,
}

impl Material {
    pub fn new(ty: impl Into<Cow<'static, str>>) -> Self {
        let ty = ty.into();
        Self {
            uuid: String::new(),
            kind: MaterialKind::from_tag(&ty),
            ty,
            name: String::new(),
            color: None,
            emissive: None,
            emissive_intensity: None,
            roughness: None,
            metalness: None,
            shininess: None,
            specular: None,
            opacity: 1.0,
            transparent: false,
            visible: true,
            side: None,
            blending: None,
            depth_func: None,
            depth_test: true,
            depth_write: true,
            alpha_test: None,
            wireframe: false,
            flat_shading: false,
            vertex_colors: false,
            fog: None,
            linewidth: None,
            dash_size: None,
            gap_size: None,
            size: None,
            size_attenuation: None,
            map: None,
            alpha_map: None,
            normal_map: None,
            bump_map: None,
            ao_map: None,
            emissive_map: None,
            env_map: None,
            light_map: None,
            roughness_map: None,
            metalness_map: None,
            specular_map: None,
            user_data: None,
        }
    }
}

/// Material binding of a mesh-like node: either one shared material or an
/// ordered list aligned with the geometry's draw groups.
#[derive(Clone, Debug, Default)]
pub enum MaterialSlot {
    #[default]
    None,
    Single(Arc<Material>),
    /// Multi-material: order matches the `materialIndex` values of the
    /// geometry's draw groups.
    Array(Vec<Option<Arc<Material>>>),
}

impl MaterialSlot {
    pub fn first(&self) -> Option<&Arc<Material>> {
        match self {
            MaterialSlot::None => None,
            MaterialSlot::Single(m) => Some(m),
            MaterialSlot::Array(v) => v.iter().flatten().next(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, MaterialSlot::None)
    }
}
