use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::structs::Vector3;

use super::attribute::{Attribute, BufferAttribute};

/// Draw-range partition of a geometry, mapping a start/count range to a
/// material slot for multi-material rendering.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct DrawGroup {
    pub start: usize,
    pub count: usize,
    #[serde(rename = "materialIndex", default)]
    pub material_index: usize,
}

/// Precomputed bounding volume, stored as authored; the loader never
/// recomputes bounds.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct BoundingSphere {
    pub center: Vector3,
    pub radius: f32,
}

/// Reconstructed geometry: named attributes, optional index, draw groups,
/// morph targets and bounding volume.
///
/// Parametric kinds (`"BoxGeometry"`, ...) keep their type tag and the
/// constructor parameter record verbatim alongside the generated
/// attribute data, so a reserialized document reproduces the original
/// definition.
#[derive(Clone, Debug, Default)]
pub struct BufferGeometry {
    pub uuid: String,
    pub name: String,
    pub ty: Cow<'static, str>,
    /// Constructor parameters for parametric kinds, verbatim from the
    /// document. `None` for plain buffer geometries.
    pub parameters: Option<serde_json::Map<String, Value>>,
    pub attributes: IndexMap<String, Attribute>,
    pub index: Option<BufferAttribute>,
    pub groups: Vec<DrawGroup>,
    pub bounding_sphere: Option<BoundingSphere>,
    pub morph_attributes: IndexMap<String, Vec<Attribute>>,
    pub morph_targets_relative: bool,
    /// Instanced geometry variant carries an explicit instance count.
    pub instance_count: Option<u32>,
    pub user_data: Option<Value>,
}

impl BufferGeometry {
    pub fn new() -> Self {
        Self {
            ty: Cow::Borrowed("BufferGeometry"),
            ..Default::default()
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, attribute: Attribute) {
        self.attributes.insert(name.into(), attribute);
    }

    /// Parameter accessor for parametric kinds.
    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.parameters.as_ref()?.get(name)
    }

    /// Vertex count of the `position` attribute, 0 when absent.
    pub fn vertex_count(&self) -> usize {
        self.attribute("position").map_or(0, |a| a.count())
    }
}
