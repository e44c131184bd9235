pub mod animation;
pub mod geometry;
pub mod loader;
pub mod material;
pub mod nodes;
pub mod object_arena;
pub mod scene;
pub mod skeleton;
pub mod structs;
pub mod texture;

pub use animation::{AnimationClip, Interpolation, KeyframeTrack, TrackKind, TrackValues};
pub use geometry::{
    Attribute, BufferAttribute, BufferGeometry, ElementType, InterleavedBuffer,
    InterleavedBufferAttribute, TypedArray,
};
pub use loader::{Diagnostic, DiagnosticKind, LoadError, LoadedDocument, ObjectLoader};
pub use material::{Material, MaterialKind, MaterialSlot};
pub use nodes::{BaseObject, NodeType, SceneObject};
pub use object_arena::{NodeId, ObjectArena};
pub use scene::SceneGraph;
pub use skeleton::Skeleton;
pub use structs::{Color, Quaternion, Transform3D, Vector3};
pub use texture::{Image, NullResolver, ResourceResolver, Texture};

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;

    fn parse(doc: serde_json::Value) -> LoadedDocument {
        let _ = env_logger::builder().is_test(true).try_init();
        ObjectLoader::new().parse(&doc).unwrap()
    }

    #[test]
    fn test_box_mesh_with_red_material() {
        let loaded = parse(json!({
            "metadata": { "version": 4.5, "type": "Object" },
            "geometries": [
                { "uuid": "geom-1", "type": "BoxGeometry", "width": 2.0, "height": 1.0, "depth": 1.0 }
            ],
            "materials": [
                { "uuid": "mat-1", "type": "MeshStandardMaterial", "color": 0xff0000u32 }
            ],
            "object": {
                "uuid": "scene-1",
                "type": "Scene",
                "children": [
                    {
                        "uuid": "mesh-1",
                        "type": "Mesh",
                        "geometry": "geom-1",
                        "material": "mat-1",
                        "position": [1.0, 2.0, 3.0]
                    }
                ]
            }
        }));

        assert!(loaded.diagnostics.is_empty());
        let root = loaded.root().unwrap();
        assert_eq!(root.node_type(), NodeType::Scene);
        let mesh_id = root.children()[0];
        let mesh = loaded.graph.object(mesh_id).unwrap().as_mesh().unwrap();
        let geometry = mesh.geometry.as_ref().unwrap();
        assert_eq!(geometry.ty, "BoxGeometry");
        assert_eq!(geometry.parameter("width"), Some(&json!(2.0)));
        let material = mesh.material.first().unwrap();
        assert_eq!(material.color, Some(Color::new(1.0, 0.0, 0.0)));
        assert_eq!(mesh.base.transform.position, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_shared_geometry_is_reference_identical() {
        let loaded = parse(json!({
            "geometries": {
                "geom-1": { "uuid": "geom-1", "type": "SphereGeometry", "radius": 3.0 }
            },
            "object": {
                "uuid": "root",
                "type": "Group",
                "children": [
                    { "uuid": "a", "type": "Mesh", "geometry": "geom-1" },
                    { "uuid": "b", "type": "Mesh", "geometry": "geom-1" }
                ]
            }
        }));

        let root = loaded.root().unwrap();
        let get = |i: usize| {
            loaded
                .graph
                .object(root.children()[i])
                .unwrap()
                .geometry()
                .unwrap()
                .clone()
        };
        assert!(Arc::ptr_eq(&get(0), &get(1)));
    }

    #[test]
    fn test_legacy_and_current_schemas_agree() {
        let legacy = parse(json!({
            "metadata": { "version": 4 },
            "materials": [{ "uuid": "m", "type": "MeshBasicMaterial", "color": 0x00ff00u32 }],
            "object": { "uuid": "r", "type": "Mesh", "material": "m" }
        }));
        let current = parse(json!({
            "metadata": { "version": 5 },
            "materials": { "m": { "type": "MeshBasicMaterial", "color": 0x00ff00u32 } },
            "object": { "uuid": "r", "type": "Mesh", "material": "m" }
        }));
        // no metadata block at all reads as the legacy shape
        let unversioned = parse(json!({
            "materials": [{ "uuid": "m", "type": "MeshBasicMaterial", "color": 0x00ff00u32 }],
            "object": { "uuid": "r", "type": "Mesh", "material": "m" }
        }));

        for loaded in [&legacy, &current, &unversioned] {
            let material = loaded
                .root()
                .unwrap()
                .material()
                .unwrap()
                .first()
                .unwrap();
            assert_eq!(material.color, Some(Color::new(0.0, 1.0, 0.0)));
        }
    }

    #[test]
    fn test_matrix_wins_over_trs() {
        let loaded = parse(json!({
            "object": {
                "uuid": "r",
                "type": "Object3D",
                "matrix": [
                    2.0, 0.0, 0.0, 0.0,
                    0.0, 2.0, 0.0, 0.0,
                    0.0, 0.0, 2.0, 0.0,
                    5.0, 6.0, 7.0, 1.0
                ],
                "position": [99.0, 99.0, 99.0]
            }
        }));
        let transform = &loaded.root().unwrap().base().transform;
        assert_eq!(transform.position, Vector3::new(5.0, 6.0, 7.0));
        assert!((transform.scale.x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_missing_root_object_is_fatal() {
        let result = ObjectLoader::new().parse(&json!({ "geometries": [] }));
        assert!(matches!(result, Err(LoadError::MalformedDocument(_))));
    }

    #[test]
    fn test_dangling_references_degrade_to_warnings() {
        let loaded = parse(json!({
            "object": {
                "uuid": "r",
                "type": "Mesh",
                "geometry": "missing-geom",
                "material": "missing-mat"
            }
        }));
        let mesh = loaded.root().unwrap().as_mesh().unwrap();
        assert!(mesh.geometry.is_none());
        assert!(mesh.material.is_none());
        let kinds: Vec<DiagnosticKind> = loaded.diagnostics.iter().map(|d| d.kind).collect();
        assert!(kinds.contains(&DiagnosticKind::UnresolvedGeometry));
        assert!(kinds.contains(&DiagnosticKind::UnresolvedMaterial));
    }

    #[test]
    fn test_four_level_hierarchy_in_document_order() {
        let loaded = parse(json!({
            "object": {
                "uuid": "l0", "type": "Scene",
                "children": [{
                    "uuid": "l1", "type": "Group",
                    "children": [{
                        "uuid": "l2", "type": "Group",
                        "children": [
                            { "uuid": "l3a", "type": "Object3D" },
                            { "uuid": "l3b", "type": "Object3D" }
                        ]
                    }]
                }]
            }
        }));
        let order: Vec<String> = loaded
            .graph
            .descendants(loaded.graph.root)
            .into_iter()
            .map(|id| loaded.graph.object(id).unwrap().uuid().to_string())
            .collect();
        assert_eq!(order, ["l0", "l1", "l2", "l3a", "l3b"]);
        let l3a = loaded.graph.find_by_uuid("l3a").unwrap();
        let l2 = loaded.graph.find_by_uuid("l2").unwrap();
        assert_eq!(loaded.graph.object(l3a).unwrap().base().parent, l2);
    }

    #[test]
    fn test_instanced_mesh_translations() {
        // three instances translated along x: 0, 10, 20
        let mut matrix = Vec::with_capacity(48);
        for i in 0..3 {
            let mut m = [
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ];
            m[12] = (i * 10) as f64;
            matrix.extend_from_slice(&m);
        }
        let loaded = parse(json!({
            "geometries": [{ "uuid": "g", "type": "BoxGeometry" }],
            "object": {
                "uuid": "r",
                "type": "InstancedMesh",
                "geometry": "g",
                "count": 3,
                "instanceMatrix": {
                    "itemSize": 16,
                    "type": "Float32Array",
                    "array": matrix,
                    "normalized": false
                }
            }
        }));
        let mesh = loaded.root().unwrap().as_instanced_mesh().unwrap();
        assert_eq!(mesh.count, 3);
        let attr = mesh.instance_matrix.as_ref().unwrap();
        assert_eq!(attr.count(), 3);
        assert_eq!(attr.component(1, 12), 10.0);
        assert_eq!(attr.component(2, 12), 20.0);
        assert_eq!(mesh.matrix_at(2).unwrap().w_axis.x, 20.0);
    }

    #[test]
    fn test_skinned_mesh_resolves_bones_after_subtree() {
        let loaded = parse(json!({
            "skeletons": [{
                "uuid": "skel-1",
                "bones": ["bone-root", "bone-tip"],
                "boneInverses": [
                    [1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1],
                    [1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, -1, 0, 1]
                ]
            }],
            "object": {
                "uuid": "scene", "type": "Scene",
                "children": [{
                    "uuid": "skin", "type": "SkinnedMesh",
                    "skeleton": "skel-1",
                    "bindMode": "attached",
                    "children": [{
                        "uuid": "bone-root", "type": "Bone", "name": "Spine",
                        "children": [
                            { "uuid": "bone-tip", "type": "Bone", "name": "Head", "position": [0.0, 1.0, 0.0] }
                        ]
                    }]
                }]
            }
        }));
        assert!(loaded.diagnostics.is_empty());
        let skin_id = loaded.graph.find_by_uuid("skin").unwrap();
        let mesh = loaded
            .graph
            .object(skin_id)
            .unwrap()
            .as_skinned_mesh()
            .unwrap();
        let skeleton = mesh.skeleton.as_ref().unwrap();
        assert_eq!(skeleton.len(), 2);
        let root_bone = skeleton.bones[0].unwrap();
        let tip = skeleton.bones[1].unwrap();
        assert_eq!(loaded.graph.object(root_bone).unwrap().name(), "Spine");
        assert_eq!(loaded.graph.object(tip).unwrap().name(), "Head");
        assert_eq!(loaded.graph.object(tip).unwrap().base().parent, root_bone);
        assert_eq!(skeleton.bone_inverses[1].w_axis.y, -1.0);
        assert!(Arc::ptr_eq(skeleton, &loaded.skeletons["skel-1"]));
    }

    #[test]
    fn test_lod_levels_resolve_against_own_children() {
        let loaded = parse(json!({
            "geometries": [{ "uuid": "g", "type": "SphereGeometry" }],
            "object": {
                "uuid": "lod", "type": "LOD",
                "levels": [
                    { "object": "near", "distance": 0.0, "hysteresis": 0.0 },
                    { "object": "far", "distance": 50.0, "hysteresis": 0.1 },
                    { "object": "elsewhere", "distance": 100.0, "hysteresis": 0.0 }
                ],
                "children": [
                    { "uuid": "near", "type": "Mesh", "geometry": "g" },
                    { "uuid": "far", "type": "Mesh", "geometry": "g" }
                ]
            }
        }));
        let lod = loaded.root().unwrap().as_lod().unwrap();
        assert_eq!(lod.levels.len(), 2);
        assert_eq!(lod.levels[1].distance, 50.0);
        assert_eq!(
            loaded.graph.object(lod.levels[1].object).unwrap().uuid(),
            "far"
        );
        assert!(loaded
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::UnresolvedLodObject));
    }

    #[test]
    fn test_directional_light_target_post_pass() {
        let loaded = parse(json!({
            "object": {
                "uuid": "scene", "type": "Scene",
                "children": [
                    { "uuid": "sun", "type": "DirectionalLight", "intensity": 2.0, "target": "hero" },
                    { "uuid": "hero", "type": "Object3D" }
                ]
            }
        }));
        assert!(loaded.diagnostics.is_empty());
        let sun = loaded.graph.find_by_uuid("sun").unwrap();
        match loaded.graph.object(sun).unwrap() {
            SceneObject::DirectionalLight(light) => {
                assert_eq!(light.intensity, 2.0);
                assert_eq!(loaded.graph.object(light.target).unwrap().uuid(), "hero");
            }
            other => panic!("expected a directional light, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_node_type_falls_back_to_object() {
        let loaded = parse(json!({
            "object": {
                "uuid": "r", "type": "Scene",
                "children": [
                    {
                        "uuid": "x", "type": "PortalNode", "name": "gate",
                        "position": [3.0, 0.0, 0.0],
                        "children": [
                            { "uuid": "y", "type": "Mesh" }
                        ]
                    }
                ]
            }
        }));
        let id = loaded.graph.find_by_uuid("x").unwrap();
        let node = loaded.graph.object(id).unwrap();
        assert_eq!(node.node_type(), NodeType::Object3D);
        assert_eq!(node.base().ty, "PortalNode");
        // shared fields and the subtree survive the fallback
        assert_eq!(node.base().transform.position.x, 3.0);
        let child = loaded.graph.find_by_uuid("y").unwrap();
        assert_eq!(node.children(), &[child]);
        assert!(loaded
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::UnsupportedNodeType));
    }

    #[test]
    fn test_embedded_definitions_load_by_value() {
        // the oldest documents embed geometry/material definitions on the
        // node instead of citing a collection entry
        let loaded = parse(json!({
            "object": {
                "uuid": "r", "type": "Mesh",
                "geometry": { "uuid": "g", "type": "BoxGeometry", "width": 3.0 },
                "material": { "uuid": "m", "type": "MeshBasicMaterial", "color": 0x0000ffu32 }
            }
        }));
        assert!(loaded.diagnostics.is_empty());
        let mesh = loaded.root().unwrap().as_mesh().unwrap();
        assert_eq!(
            mesh.geometry.as_ref().unwrap().parameter("width"),
            Some(&json!(3.0))
        );
        assert_eq!(
            mesh.material.first().unwrap().color,
            Some(Color::new(0.0, 0.0, 1.0))
        );
    }

    #[test]
    fn test_serialize_roundtrip_preserves_parameters_and_sharing() {
        let source = json!({
            "geometries": [
                { "uuid": "g", "type": "TorusGeometry", "radius": 2.0, "tube": 0.5 }
            ],
            "materials": [
                { "uuid": "m", "type": "MeshPhongMaterial", "color": 0x2194ceu32, "shininess": 30.0 }
            ],
            "object": {
                "uuid": "scene", "type": "Scene",
                "children": [
                    { "uuid": "a", "type": "Mesh", "geometry": "g", "material": "m", "position": [0.0, 1.0, 0.0] },
                    { "uuid": "b", "type": "Mesh", "geometry": "g", "material": "m" }
                ]
            }
        });
        let first = parse(source);
        let reparsed = parse(loader::to_json(&first));

        let root = reparsed.root().unwrap();
        assert_eq!(root.children().len(), 2);
        let a = reparsed.graph.object(root.children()[0]).unwrap();
        let b = reparsed.graph.object(root.children()[1]).unwrap();
        assert!(Arc::ptr_eq(a.geometry().unwrap(), b.geometry().unwrap()));
        assert_eq!(a.geometry().unwrap().parameter("radius"), Some(&json!(2.0)));
        assert_eq!(
            a.base().transform.position,
            Vector3::new(0.0, 1.0, 0.0)
        );
        let material = a.material().unwrap().first().unwrap();
        assert_eq!(material.color, Some(Color::from_hex(0x2194ce)));
        assert_eq!(material.shininess, Some(30.0));
    }

    #[test]
    fn test_serialize_roundtrip_keeps_interleaved_aliasing() {
        let words: Vec<u32> = [
            0.0f32, 0.0, 0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, 1.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, 1.0,
        ]
        .iter()
        .map(|f| f.to_bits())
        .collect();
        let source = json!({
            "buffers": {
                "array": { "ab": words },
                "interleaved": { "ib": { "buffer": "ab", "type": "Float32Array", "stride": 5 } }
            },
            "geometries": [{
                "uuid": "g",
                "type": "BufferGeometry",
                "data": {
                    "attributes": {
                        "position": { "isInterleavedBufferAttribute": true, "itemSize": 3, "data": "ib", "offset": 0 },
                        "uv": { "isInterleavedBufferAttribute": true, "itemSize": 2, "data": "ib", "offset": 3 }
                    }
                }
            }],
            "object": { "uuid": "r", "type": "Mesh", "geometry": "g" }
        });
        let reparsed = parse(loader::to_json(&parse(source)));

        let geometry = reparsed.root().unwrap().geometry().unwrap();
        let position = geometry.attribute("position").unwrap().as_interleaved().unwrap();
        let uv = geometry.attribute("uv").unwrap().as_interleaved().unwrap();
        assert!(Arc::ptr_eq(&position.data, &uv.data));
        assert_eq!(position.component(1, 0), 1.0);
        assert_eq!(uv.component(2, 1), 1.0);
    }

    #[test]
    fn test_interleaved_buffer_shared_across_geometries() {
        let words: Vec<u32> = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]
            .iter()
            .map(|f| f.to_bits())
            .collect();
        let loaded = parse(json!({
            "buffers": {
                "array": { "ab": words },
                "interleaved": { "ib": { "buffer": "ab", "type": "Float32Array", "stride": 3 } }
            },
            "geometries": [
                {
                    "uuid": "g1",
                    "type": "BufferGeometry",
                    "data": { "attributes": {
                        "position": { "isInterleavedBufferAttribute": true, "itemSize": 3, "data": "ib", "offset": 0 }
                    } }
                },
                {
                    "uuid": "g2",
                    "type": "BufferGeometry",
                    "data": { "attributes": {
                        "position": { "isInterleavedBufferAttribute": true, "itemSize": 3, "data": "ib", "offset": 0 }
                    } }
                }
            ],
            "object": { "uuid": "r", "type": "Object3D" }
        }));
        let a = loaded.geometries["g1"].attribute("position").unwrap();
        let b = loaded.geometries["g2"].attribute("position").unwrap();
        let a = a.as_interleaved().unwrap();
        let b = b.as_interleaved().unwrap();
        assert!(Arc::ptr_eq(&a.data, &b.data));
        assert_eq!(b.component(1, 2), 6.0);
    }

    #[test]
    fn test_unsupported_instance_attribute_type_warns() {
        let loaded = parse(json!({
            "geometries": [{ "uuid": "g", "type": "BoxGeometry" }],
            "object": {
                "uuid": "r",
                "type": "InstancedMesh",
                "geometry": "g",
                "count": 2,
                "instanceColor": {
                    "itemSize": 3,
                    "type": "Float64Array",
                    "array": [1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
                }
            }
        }));
        let mesh = loaded.root().unwrap().as_instanced_mesh().unwrap();
        assert_eq!(mesh.count, 2);
        assert!(mesh.instance_color.is_none());
        assert!(loaded
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::UnsupportedAttributeType));
    }
}
