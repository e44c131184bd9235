use std::borrow::Cow;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::geometry::{
    primitives, Attribute, BoundingSphere, BufferAttribute, BufferGeometry, DrawGroup,
    PrimitiveData, TypedArray,
};
use crate::loader::buffers::{AttributeError, BufferStore};
use crate::loader::compat::CollectionView;
use crate::loader::diagnostics::{DiagnosticKind, Diagnostics};
use crate::loader::json;

/// Parses the `geometries` collection into a uuid-keyed map of shared
/// geometries. A definition that cannot be reconstructed is skipped with
/// a warning; references to it dangle and are reported at resolution
/// time instead.
pub fn parse_geometries(
    doc: &Value,
    store: &mut BufferStore<'_>,
    diags: &mut Diagnostics,
) -> IndexMap<String, Arc<BufferGeometry>> {
    let mut out = IndexMap::new();
    for (uuid, def) in CollectionView::of(doc, "geometries").iter() {
        let uuid = match uuid {
            Some(uuid) => uuid,
            None => {
                diags.warn(DiagnosticKind::MalformedEntry, "geometry without a uuid");
                continue;
            }
        };
        match parse_geometry(uuid, def, store, diags) {
            Some(mut geometry) => {
                geometry.uuid = uuid.to_string();
                if let Some(name) = json::get_str(def, "name") {
                    geometry.name = name.to_string();
                }
                geometry.user_data = def.get("userData").cloned();
                out.insert(uuid.to_string(), Arc::new(geometry));
            }
            None => continue,
        }
    }
    out
}

pub(crate) fn parse_geometry(
    uuid: &str,
    def: &Value,
    store: &mut BufferStore<'_>,
    diags: &mut Diagnostics,
) -> Option<BufferGeometry> {
    let tag = json::get_str(def, "type").unwrap_or("BufferGeometry");
    if matches!(tag, "BufferGeometry" | "InstancedBufferGeometry") {
        return match parse_buffer_geometry(tag, def, store) {
            Ok(geometry) => Some(geometry),
            Err(err) => {
                diags.warn(err.diagnostic_kind(), format!("geometry {uuid:?}: {err}"));
                None
            }
        };
    }
    match parametric_geometry(tag, def) {
        Some(geometry) => Some(geometry),
        None => {
            diags.warn(
                DiagnosticKind::UnsupportedGeometryType,
                format!("geometry {uuid:?} has type {tag:?}"),
            );
            None
        }
    }
}

fn parse_buffer_geometry(
    tag: &str,
    def: &Value,
    store: &mut BufferStore<'_>,
) -> Result<BufferGeometry, AttributeError> {
    let data = def
        .get("data")
        .ok_or_else(|| AttributeError::Malformed("buffer geometry has no data".into()))?;
    let mut geometry = BufferGeometry::new();
    geometry.ty = Cow::Owned(tag.to_string());

    if let Some(attributes) = data.get("attributes").and_then(Value::as_object) {
        for (name, attr_def) in attributes {
            geometry.set_attribute(name.clone(), store.parse_attribute(attr_def)?);
        }
    }
    if let Some(index_def) = data.get("index") {
        // index buffers are never interleaved
        geometry.index = Some(store.parse_buffer_attribute(index_def)?);
    }
    if let Some(groups) = data.get("groups") {
        geometry.groups =
            serde_json::from_value::<Vec<DrawGroup>>(groups.clone()).unwrap_or_default();
    }
    if let Some(sphere) = data.get("boundingSphere") {
        geometry.bounding_sphere = serde_json::from_value::<BoundingSphere>(sphere.clone()).ok();
    }
    if let Some(morphs) = data.get("morphAttributes").and_then(Value::as_object) {
        for (name, defs) in morphs {
            let defs = defs.as_array().cloned().unwrap_or_default();
            let mut targets = Vec::with_capacity(defs.len());
            for morph_def in &defs {
                targets.push(store.parse_attribute(morph_def)?);
            }
            geometry.morph_attributes.insert(name.clone(), targets);
        }
    }
    geometry.morph_targets_relative =
        json::get_bool(data, "morphTargetsRelative").unwrap_or(false);
    if tag == "InstancedBufferGeometry" {
        geometry.instance_count = json::get_u32(def, "instanceCount");
    }
    Ok(geometry)
}

/// Canonical parametric tag, folding the legacy `*BufferGeometry` and
/// `CubeGeometry` aliases onto their current names.
fn canonical_tag(tag: &str) -> String {
    if tag == "CubeGeometry" {
        return "BoxGeometry".to_string();
    }
    match tag.strip_suffix("BufferGeometry") {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}Geometry"),
        _ => tag.to_string(),
    }
}

fn param_f32(def: &Value, key: &str, default: f32) -> f32 {
    json::get_f32(def, key).unwrap_or(default)
}

fn param_u32(def: &Value, key: &str, default: u32) -> u32 {
    json::get_u32(def, key).unwrap_or(default)
}

const TWO_PI: f32 = std::f32::consts::PI * 2.0;

/// Dispatches a parametric type tag to its generator. Returns `None` for
/// tags no generator covers.
fn parametric_geometry(tag: &str, def: &Value) -> Option<BufferGeometry> {
    let canonical = canonical_tag(tag);
    let data = match canonical.as_str() {
        "PlaneGeometry" => primitives::plane(
            param_f32(def, "width", 1.0),
            param_f32(def, "height", 1.0),
            param_u32(def, "widthSegments", 1),
            param_u32(def, "heightSegments", 1),
        ),
        "BoxGeometry" => primitives::cuboid(
            param_f32(def, "width", 1.0),
            param_f32(def, "height", 1.0),
            param_f32(def, "depth", 1.0),
            param_u32(def, "widthSegments", 1),
            param_u32(def, "heightSegments", 1),
            param_u32(def, "depthSegments", 1),
        ),
        "SphereGeometry" => primitives::sphere(
            param_f32(def, "radius", 1.0),
            param_u32(def, "widthSegments", 32),
            param_u32(def, "heightSegments", 16),
            param_f32(def, "phiStart", 0.0),
            param_f32(def, "phiLength", TWO_PI),
            param_f32(def, "thetaStart", 0.0),
            param_f32(def, "thetaLength", std::f32::consts::PI),
        ),
        "CylinderGeometry" => primitives::cylinder(
            param_f32(def, "radiusTop", 1.0),
            param_f32(def, "radiusBottom", 1.0),
            param_f32(def, "height", 1.0),
            param_u32(def, "radialSegments", 32),
            param_u32(def, "heightSegments", 1),
            json::get_bool(def, "openEnded").unwrap_or(false),
            param_f32(def, "thetaStart", 0.0),
            param_f32(def, "thetaLength", TWO_PI),
        ),
        // a cone is a cylinder with a zero-radius top
        "ConeGeometry" => primitives::cylinder(
            0.0,
            param_f32(def, "radius", 1.0),
            param_f32(def, "height", 1.0),
            param_u32(def, "radialSegments", 32),
            param_u32(def, "heightSegments", 1),
            json::get_bool(def, "openEnded").unwrap_or(false),
            param_f32(def, "thetaStart", 0.0),
            param_f32(def, "thetaLength", TWO_PI),
        ),
        "CircleGeometry" => primitives::circle(
            param_f32(def, "radius", 1.0),
            param_u32(def, "segments", 32),
            param_f32(def, "thetaStart", 0.0),
            param_f32(def, "thetaLength", TWO_PI),
        ),
        "RingGeometry" => primitives::ring(
            param_f32(def, "innerRadius", 0.5),
            param_f32(def, "outerRadius", 1.0),
            param_u32(def, "thetaSegments", 32),
            param_u32(def, "phiSegments", 1),
            param_f32(def, "thetaStart", 0.0),
            param_f32(def, "thetaLength", TWO_PI),
        ),
        "TorusGeometry" => primitives::torus(
            param_f32(def, "radius", 1.0),
            param_f32(def, "tube", 0.4),
            param_u32(def, "radialSegments", 12),
            param_u32(def, "tubularSegments", 48),
            param_f32(def, "arc", TWO_PI),
        ),
        "TorusKnotGeometry" => primitives::torus_knot(
            param_f32(def, "radius", 1.0),
            param_f32(def, "tube", 0.4),
            param_u32(def, "tubularSegments", 64),
            param_u32(def, "radialSegments", 8),
            param_u32(def, "p", 2),
            param_u32(def, "q", 3),
        ),
        "CapsuleGeometry" => primitives::capsule(
            param_f32(def, "radius", 1.0),
            param_f32(def, "length", 1.0),
            param_u32(def, "capSegments", 4),
            param_u32(def, "radialSegments", 8),
        ),
        "TetrahedronGeometry" => primitives::tetrahedron(
            param_f32(def, "radius", 1.0),
            param_u32(def, "detail", 0),
        ),
        "OctahedronGeometry" => primitives::octahedron(
            param_f32(def, "radius", 1.0),
            param_u32(def, "detail", 0),
        ),
        "IcosahedronGeometry" => primitives::icosahedron(
            param_f32(def, "radius", 1.0),
            param_u32(def, "detail", 0),
        ),
        "DodecahedronGeometry" => primitives::dodecahedron(
            param_f32(def, "radius", 1.0),
            param_u32(def, "detail", 0),
        ),
        _ => return None,
    };
    Some(wrap_primitive(canonical, def, data))
}

/// Wraps generated vertex streams into a geometry, keeping the named
/// constructor parameters verbatim so reserialization reproduces the
/// original definition.
fn wrap_primitive(canonical: String, def: &Value, data: PrimitiveData) -> BufferGeometry {
    let mut geometry = BufferGeometry::new();
    geometry.ty = Cow::Owned(canonical);
    geometry.set_attribute(
        "position",
        Attribute::Buffer(BufferAttribute::new(
            TypedArray::Float32(data.positions),
            3,
            false,
        )),
    );
    geometry.set_attribute(
        "normal",
        Attribute::Buffer(BufferAttribute::new(
            TypedArray::Float32(data.normals),
            3,
            false,
        )),
    );
    geometry.set_attribute(
        "uv",
        Attribute::Buffer(BufferAttribute::new(TypedArray::Float32(data.uvs), 2, false)),
    );
    if !data.indices.is_empty() {
        geometry.index = Some(BufferAttribute::new(
            TypedArray::Uint32(data.indices),
            1,
            false,
        ));
    }
    if let Some(obj) = def.as_object() {
        let params: serde_json::Map<String, Value> = obj
            .iter()
            .filter(|(k, _)| !matches!(k.as_str(), "uuid" | "type" | "name" | "userData"))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        geometry.parameters = Some(params);
    }
    geometry
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn load(doc: Value) -> (IndexMap<String, Arc<BufferGeometry>>, Diagnostics) {
        let mut diags = Diagnostics::new();
        let mut store = BufferStore::new(&doc);
        let map = parse_geometries(&doc, &mut store, &mut diags);
        (map, diags)
    }

    #[test]
    fn test_buffer_geometry_with_index_and_groups() {
        let doc = json!({
            "geometries": [{
                "uuid": "geom-1",
                "type": "BufferGeometry",
                "data": {
                    "attributes": {
                        "position": {
                            "itemSize": 3,
                            "type": "Float32Array",
                            "array": [0, 0, 0, 1, 0, 0, 0, 1, 0, 1, 1, 0],
                            "normalized": false
                        }
                    },
                    "index": { "itemSize": 1, "type": "Uint16Array", "array": [0, 1, 2, 2, 1, 3] },
                    "groups": [
                        { "start": 0, "count": 3, "materialIndex": 0 },
                        { "start": 3, "count": 3, "materialIndex": 1 }
                    ],
                    "boundingSphere": { "center": [0.5, 0.5, 0.0], "radius": 0.7071 }
                }
            }]
        });
        let (map, diags) = load(doc);
        assert!(diags.is_empty());
        let geometry = &map["geom-1"];
        assert_eq!(geometry.vertex_count(), 4);
        assert_eq!(geometry.index.as_ref().unwrap().count(), 6);
        assert_eq!(geometry.groups[1].material_index, 1);
        assert_eq!(geometry.bounding_sphere.unwrap().radius, 0.7071);
    }

    #[test]
    fn test_parametric_box_keeps_parameters() {
        let doc = json!({
            "geometries": [{
                "uuid": "geom-1",
                "type": "BoxGeometry",
                "width": 2.0,
                "height": 3.0,
                "depth": 4.0
            }]
        });
        let (map, diags) = load(doc);
        assert!(diags.is_empty());
        let geometry = &map["geom-1"];
        assert_eq!(geometry.ty, "BoxGeometry");
        assert_eq!(geometry.parameter("width"), Some(&json!(2.0)));
        assert_eq!(geometry.parameter("depth"), Some(&json!(4.0)));
        // 6 faces, 1x1 segments, 4 vertices each
        assert_eq!(geometry.vertex_count(), 24);
        assert_eq!(geometry.index.as_ref().unwrap().count(), 36);
    }

    #[test]
    fn test_legacy_aliases() {
        let doc = json!({
            "geometries": [
                { "uuid": "a", "type": "CubeGeometry" },
                { "uuid": "b", "type": "SphereBufferGeometry", "radius": 2.0 }
            ]
        });
        let (map, diags) = load(doc);
        assert!(diags.is_empty());
        assert_eq!(map["a"].ty, "BoxGeometry");
        assert_eq!(map["b"].ty, "SphereGeometry");
    }

    #[test]
    fn test_unknown_type_is_skipped() {
        let doc = json!({
            "geometries": [{ "uuid": "geom-1", "type": "NurbsGeometry" }]
        });
        let (map, diags) = load(doc);
        assert!(map.is_empty());
        assert!(diags.has(DiagnosticKind::UnsupportedGeometryType));
    }

    #[test]
    fn test_unsupported_array_type_skips_owning_geometry_only() {
        let doc = json!({
            "geometries": [
                {
                    "uuid": "bad",
                    "type": "BufferGeometry",
                    "data": {
                        "attributes": {
                            "position": { "itemSize": 3, "type": "Float64Array", "array": [0, 0, 0] }
                        }
                    }
                },
                { "uuid": "good", "type": "PlaneGeometry" }
            ]
        });
        let (map, diags) = load(doc);
        assert!(!map.contains_key("bad"));
        assert!(map.contains_key("good"));
        assert!(diags.has(DiagnosticKind::UnsupportedAttributeType));
    }
}
