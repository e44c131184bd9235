//! Turns a reconstructed document back into its JSON form.
//!
//! Output always uses the current schema generation: collections are
//! objects keyed by uuid, transforms are explicit TRS fields, interleaved
//! backing stores go to the top-level `buffers` section as packed words.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::geometry::{Attribute, BufferAttribute, BufferGeometry, InterleavedBuffer, TypedArray};
use crate::loader::object_loader::LoadedDocument;
use crate::material::{Material, MaterialSlot};
use crate::nodes::{LightShadow, SceneObject};
use crate::object_arena::NodeId;
use crate::structs::Transform3D;
use crate::texture::Texture;

pub fn to_json(doc: &LoadedDocument) -> Value {
    let mut ser = Serializer {
        doc,
        buffer_arrays: Map::new(),
        interleaved: Map::new(),
        interleaved_ids: HashMap::new(),
    };

    let mut geometries = Map::new();
    for (uuid, geometry) in &doc.geometries {
        geometries.insert(uuid.clone(), ser.geometry(geometry));
    }
    let mut materials = Map::new();
    for (uuid, material) in &doc.materials {
        materials.insert(uuid.clone(), serialize_material(material));
    }
    let mut textures = Map::new();
    for (uuid, texture) in &doc.textures {
        textures.insert(uuid.clone(), serialize_texture(texture));
    }
    let mut images = Map::new();
    for (uuid, image) in &doc.images {
        images.insert(uuid.clone(), json!({ "uuid": uuid, "url": image.url }));
    }
    let mut animations = Map::new();
    for (uuid, clip) in &doc.animations {
        animations.insert(uuid.clone(), serialize_clip(clip));
    }
    let mut skeletons = Map::new();
    for (uuid, skeleton) in &doc.skeletons {
        let bones: Vec<Value> = skeleton
            .bones
            .iter()
            .map(|bone| match bone.and_then(|id| doc.graph.object(id)) {
                Some(node) => Value::String(node.uuid().to_string()),
                None => Value::Null,
            })
            .collect();
        let inverses: Vec<Value> = skeleton
            .bone_inverses
            .iter()
            .map(|m| json!(m.to_cols_array().to_vec()))
            .collect();
        skeletons.insert(
            uuid.clone(),
            json!({ "uuid": uuid, "bones": bones, "boneInverses": inverses }),
        );
    }

    let object = ser.node(doc.graph.root).unwrap_or(Value::Null);

    let mut out = Map::new();
    out.insert(
        "metadata".into(),
        json!({ "version": 5, "type": "Object", "generator": "vireo_core" }),
    );
    if !geometries.is_empty() {
        out.insert("geometries".into(), Value::Object(geometries));
    }
    if !materials.is_empty() {
        out.insert("materials".into(), Value::Object(materials));
    }
    if !textures.is_empty() {
        out.insert("textures".into(), Value::Object(textures));
    }
    if !images.is_empty() {
        out.insert("images".into(), Value::Object(images));
    }
    if !animations.is_empty() {
        out.insert("animations".into(), Value::Object(animations));
    }
    if !skeletons.is_empty() {
        out.insert("skeletons".into(), Value::Object(skeletons));
    }
    if !ser.interleaved.is_empty() {
        out.insert(
            "buffers".into(),
            json!({ "array": ser.buffer_arrays, "interleaved": ser.interleaved }),
        );
    }
    out.insert("object".into(), object);
    Value::Object(out)
}

struct Serializer<'a> {
    doc: &'a LoadedDocument,
    buffer_arrays: Map<String, Value>,
    interleaved: Map<String, Value>,
    /// Backing-store identity to generated uuid, so aliasing attributes
    /// cite the same `data` key on the way out.
    interleaved_ids: HashMap<*const InterleavedBuffer, String>,
}

impl<'a> Serializer<'a> {
    fn geometry(&mut self, geometry: &BufferGeometry) -> Value {
        let mut out = Map::new();
        out.insert("uuid".into(), json!(geometry.uuid));
        out.insert("type".into(), json!(geometry.ty));
        if !geometry.name.is_empty() {
            out.insert("name".into(), json!(geometry.name));
        }
        if let Some(user_data) = &geometry.user_data {
            out.insert("userData".into(), user_data.clone());
        }

        if let Some(params) = &geometry.parameters {
            // parametric kinds reproduce their constructor record verbatim
            for (key, value) in params {
                out.insert(key.clone(), value.clone());
            }
            return Value::Object(out);
        }

        let mut data = Map::new();
        let mut attributes = Map::new();
        for (name, attribute) in &geometry.attributes {
            attributes.insert(name.clone(), self.attribute(attribute));
        }
        data.insert("attributes".into(), Value::Object(attributes));
        if let Some(index) = &geometry.index {
            data.insert("index".into(), self.buffer_attribute(index));
        }
        if !geometry.groups.is_empty() {
            data.insert("groups".into(), json!(geometry.groups));
        }
        if let Some(sphere) = &geometry.bounding_sphere {
            data.insert("boundingSphere".into(), json!(sphere));
        }
        if !geometry.morph_attributes.is_empty() {
            let mut morphs = Map::new();
            for (name, targets) in &geometry.morph_attributes {
                let list: Vec<Value> = targets.iter().map(|a| self.attribute(a)).collect();
                morphs.insert(name.clone(), Value::Array(list));
            }
            data.insert("morphAttributes".into(), Value::Object(morphs));
            data.insert(
                "morphTargetsRelative".into(),
                json!(geometry.morph_targets_relative),
            );
        }
        out.insert("data".into(), Value::Object(data));
        if let Some(count) = geometry.instance_count {
            out.insert("instanceCount".into(), json!(count));
        }
        Value::Object(out)
    }

    fn attribute(&mut self, attribute: &Attribute) -> Value {
        match attribute {
            Attribute::Buffer(attr) => self.buffer_attribute(attr),
            Attribute::Interleaved(attr) => {
                let data = self.interleaved_uuid(&attr.data);
                json!({
                    "isInterleavedBufferAttribute": true,
                    "itemSize": attr.item_size,
                    "data": data,
                    "offset": attr.offset,
                    "normalized": attr.normalized,
                })
            }
        }
    }

    fn buffer_attribute(&mut self, attr: &BufferAttribute) -> Value {
        let mut out = Map::new();
        out.insert("itemSize".into(), json!(attr.item_size));
        out.insert("type".into(), json!(attr.array.element_type().tag()));
        out.insert("array".into(), array_to_json(&attr.array));
        out.insert("normalized".into(), json!(attr.normalized));
        if let Some(mesh_per_attribute) = attr.mesh_per_attribute {
            out.insert("isInstancedBufferAttribute".into(), json!(true));
            out.insert("meshPerAttribute".into(), json!(mesh_per_attribute));
        }
        Value::Object(out)
    }

    /// Registers a shared backing buffer once and returns its uuid.
    fn interleaved_uuid(&mut self, buffer: &Arc<InterleavedBuffer>) -> String {
        let key = Arc::as_ptr(buffer);
        if let Some(uuid) = self.interleaved_ids.get(&key) {
            return uuid.clone();
        }
        let uuid = Uuid::new_v4().to_string();
        let array_uuid = Uuid::new_v4().to_string();
        self.buffer_arrays
            .insert(array_uuid.clone(), json!(buffer.array.to_packed_words()));
        let mut def = Map::new();
        def.insert("buffer".into(), json!(array_uuid));
        def.insert("type".into(), json!(buffer.array.element_type().tag()));
        def.insert("stride".into(), json!(buffer.stride));
        if let Some(mesh_per_attribute) = buffer.mesh_per_attribute {
            def.insert("isInstancedInterleavedBuffer".into(), json!(true));
            def.insert("meshPerAttribute".into(), json!(mesh_per_attribute));
        }
        self.interleaved.insert(uuid.clone(), Value::Object(def));
        self.interleaved_ids.insert(key, uuid.clone());
        uuid
    }

    fn node(&mut self, id: NodeId) -> Option<Value> {
        let node = self.doc.graph.object(id)?;
        let base = node.base();
        let mut out = Map::new();
        out.insert("uuid".into(), json!(base.uuid));
        out.insert("type".into(), json!(base.ty));
        if !base.name.is_empty() {
            out.insert("name".into(), json!(base.name));
        }
        serialize_transform(&mut out, &base.transform);
        if !base.visible {
            out.insert("visible".into(), json!(false));
        }
        if !base.frustum_culled {
            out.insert("frustumCulled".into(), json!(false));
        }
        if base.cast_shadow {
            out.insert("castShadow".into(), json!(true));
        }
        if base.receive_shadow {
            out.insert("receiveShadow".into(), json!(true));
        }
        if base.render_order != 0 {
            out.insert("renderOrder".into(), json!(base.render_order));
        }
        if base.layers != 1 {
            out.insert("layers".into(), json!(base.layers));
        }
        if !base.matrix_auto_update {
            out.insert("matrixAutoUpdate".into(), json!(false));
        }
        if let Some(user_data) = &base.user_data {
            out.insert("userData".into(), user_data.clone());
        }
        if !base.animations.is_empty() {
            let uuids: Vec<&str> = base.animations.iter().map(|c| c.uuid.as_str()).collect();
            out.insert("animations".into(), json!(uuids));
        }

        self.node_payload(node, &mut out);

        if !base.children.is_empty() {
            let children: Vec<Value> = base
                .children
                .iter()
                .filter_map(|&child| self.node(child))
                .collect();
            out.insert("children".into(), Value::Array(children));
        }
        Some(Value::Object(out))
    }

    fn node_payload(&mut self, node: &SceneObject, out: &mut Map<String, Value>) {
        if let Some(geometry) = node.geometry() {
            out.insert("geometry".into(), json!(geometry.uuid));
        }
        if let Some(material) = node.material() {
            match material {
                MaterialSlot::None => {}
                MaterialSlot::Single(m) => {
                    out.insert("material".into(), json!(m.uuid));
                }
                MaterialSlot::Array(list) => {
                    let uuids: Vec<Value> = list
                        .iter()
                        .map(|m| match m {
                            Some(m) => Value::String(m.uuid.clone()),
                            None => Value::Null,
                        })
                        .collect();
                    out.insert("material".into(), Value::Array(uuids));
                }
            }
        }
        match node {
            SceneObject::Scene(scene) => {
                if let Some(background) = &scene.background {
                    out.insert("background".into(), json!(background.to_hex()));
                }
            }
            SceneObject::SkinnedMesh(mesh) => {
                out.insert("bindMode".into(), json!(mesh.bind_mode.tag()));
                out.insert(
                    "bindMatrix".into(),
                    json!(mesh.bind_matrix.to_cols_array().to_vec()),
                );
                if let Some(skeleton) = &mesh.skeleton {
                    out.insert("skeleton".into(), json!(skeleton.uuid));
                }
            }
            SceneObject::InstancedMesh(mesh) => {
                out.insert("count".into(), json!(mesh.count));
                if let Some(attr) = &mesh.instance_matrix {
                    out.insert("instanceMatrix".into(), self.buffer_attribute(attr));
                }
                if let Some(attr) = &mesh.instance_color {
                    out.insert("instanceColor".into(), self.buffer_attribute(attr));
                }
            }
            SceneObject::Sprite(sprite) => {
                out.insert("center".into(), json!(sprite.center.to_vec()));
            }
            SceneObject::PerspectiveCamera(camera) => {
                out.insert("fov".into(), json!(camera.fov));
                out.insert("aspect".into(), json!(camera.aspect));
                out.insert("near".into(), json!(camera.near));
                out.insert("far".into(), json!(camera.far));
                out.insert("zoom".into(), json!(camera.zoom));
                out.insert("focus".into(), json!(camera.focus));
                out.insert("filmGauge".into(), json!(camera.film_gauge));
                out.insert("filmOffset".into(), json!(camera.film_offset));
            }
            SceneObject::OrthographicCamera(camera) => {
                out.insert("left".into(), json!(camera.left));
                out.insert("right".into(), json!(camera.right));
                out.insert("top".into(), json!(camera.top));
                out.insert("bottom".into(), json!(camera.bottom));
                out.insert("near".into(), json!(camera.near));
                out.insert("far".into(), json!(camera.far));
                out.insert("zoom".into(), json!(camera.zoom));
            }
            SceneObject::AmbientLight(light) => {
                out.insert("color".into(), json!(light.color.to_hex()));
                out.insert("intensity".into(), json!(light.intensity));
            }
            SceneObject::DirectionalLight(light) => {
                out.insert("color".into(), json!(light.color.to_hex()));
                out.insert("intensity".into(), json!(light.intensity));
                self.light_target(light.target, out);
                self.shadow(&light.shadow, out);
            }
            SceneObject::PointLight(light) => {
                out.insert("color".into(), json!(light.color.to_hex()));
                out.insert("intensity".into(), json!(light.intensity));
                out.insert("distance".into(), json!(light.distance));
                out.insert("decay".into(), json!(light.decay));
                self.shadow(&light.shadow, out);
            }
            SceneObject::SpotLight(light) => {
                out.insert("color".into(), json!(light.color.to_hex()));
                out.insert("intensity".into(), json!(light.intensity));
                out.insert("distance".into(), json!(light.distance));
                out.insert("angle".into(), json!(light.angle));
                out.insert("penumbra".into(), json!(light.penumbra));
                out.insert("decay".into(), json!(light.decay));
                self.light_target(light.target, out);
                self.shadow(&light.shadow, out);
            }
            SceneObject::HemisphereLight(light) => {
                out.insert("color".into(), json!(light.color.to_hex()));
                out.insert("groundColor".into(), json!(light.ground_color.to_hex()));
                out.insert("intensity".into(), json!(light.intensity));
            }
            SceneObject::RectAreaLight(light) => {
                out.insert("color".into(), json!(light.color.to_hex()));
                out.insert("intensity".into(), json!(light.intensity));
                out.insert("width".into(), json!(light.width));
                out.insert("height".into(), json!(light.height));
            }
            SceneObject::LightProbe(probe) => {
                out.insert("sh".into(), json!(probe.sh.to_vec()));
                out.insert("intensity".into(), json!(probe.intensity));
            }
            SceneObject::LOD(lod) => {
                if !lod.auto_update {
                    out.insert("autoUpdate".into(), json!(false));
                }
                let levels: Vec<Value> = lod
                    .levels
                    .iter()
                    .filter_map(|level| {
                        let object = self.doc.graph.object(level.object)?;
                        Some(json!({
                            "object": object.uuid(),
                            "distance": level.distance,
                            "hysteresis": level.hysteresis,
                        }))
                    })
                    .collect();
                out.insert("levels".into(), Value::Array(levels));
            }
            _ => {}
        }
    }

    fn light_target(&self, target: NodeId, out: &mut Map<String, Value>) {
        if let Some(node) = self.doc.graph.object(target) {
            out.insert("target".into(), json!(node.uuid()));
        }
    }

    fn shadow(&mut self, shadow: &Option<LightShadow>, out: &mut Map<String, Value>) {
        let shadow = match shadow {
            Some(shadow) => shadow,
            None => return,
        };
        let mut def = Map::new();
        if shadow.bias != 0.0 {
            def.insert("bias".into(), json!(shadow.bias));
        }
        if shadow.normal_bias != 0.0 {
            def.insert("normalBias".into(), json!(shadow.normal_bias));
        }
        if shadow.radius != 1.0 {
            def.insert("radius".into(), json!(shadow.radius));
        }
        if let Some(intensity) = shadow.intensity {
            def.insert("intensity".into(), json!(intensity));
        }
        def.insert("mapSize".into(), json!(shadow.map_size.to_vec()));
        if let Some(camera) = self.node(shadow.camera) {
            def.insert("camera".into(), camera);
        }
        out.insert("shadow".into(), Value::Object(def));
    }
}

fn serialize_transform(out: &mut Map<String, Value>, transform: &Transform3D) {
    let p = &transform.position;
    if (p.x, p.y, p.z) != (0.0, 0.0, 0.0) {
        out.insert("position".into(), json!([p.x, p.y, p.z]));
    }
    let q = &transform.rotation;
    if (q.x, q.y, q.z, q.w) != (0.0, 0.0, 0.0, 1.0) {
        out.insert("quaternion".into(), json!([q.x, q.y, q.z, q.w]));
    }
    let s = &transform.scale;
    if (s.x, s.y, s.z) != (1.0, 1.0, 1.0) {
        out.insert("scale".into(), json!([s.x, s.y, s.z]));
    }
}

/// Writes integer storage as integers and float storage as floats.
fn array_to_json(array: &TypedArray) -> Value {
    match array {
        TypedArray::Float32(v) => json!(v),
        TypedArray::Int8(v) => json!(v),
        TypedArray::Uint8(v) | TypedArray::Uint8Clamped(v) => json!(v),
        TypedArray::Int16(v) => json!(v),
        TypedArray::Uint16(v) => json!(v),
        TypedArray::Int32(v) => json!(v),
        TypedArray::Uint32(v) => json!(v),
    }
}

fn serialize_material(material: &Material) -> Value {
    let mut out = Map::new();
    out.insert("uuid".into(), json!(material.uuid));
    out.insert("type".into(), json!(material.ty));
    if !material.name.is_empty() {
        out.insert("name".into(), json!(material.name));
    }
    if let Some(color) = &material.color {
        out.insert("color".into(), json!(color.to_hex()));
    }
    if let Some(emissive) = &material.emissive {
        out.insert("emissive".into(), json!(emissive.to_hex()));
    }
    if let Some(specular) = &material.specular {
        out.insert("specular".into(), json!(specular.to_hex()));
    }
    let scalar_slots: [(&str, Option<f32>); 8] = [
        ("emissiveIntensity", material.emissive_intensity),
        ("roughness", material.roughness),
        ("metalness", material.metalness),
        ("shininess", material.shininess),
        ("alphaTest", material.alpha_test),
        ("linewidth", material.linewidth),
        ("dashSize", material.dash_size),
        ("gapSize", material.gap_size),
    ];
    for (key, value) in scalar_slots {
        if let Some(value) = value {
            out.insert(key.into(), json!(value));
        }
    }
    if material.opacity != 1.0 {
        out.insert("opacity".into(), json!(material.opacity));
        out.insert("transparent".into(), json!(material.transparent));
    } else if material.transparent {
        out.insert("transparent".into(), json!(true));
    }
    if !material.visible {
        out.insert("visible".into(), json!(false));
    }
    if let Some(side) = material.side {
        out.insert("side".into(), json!(side));
    }
    if let Some(blending) = material.blending {
        out.insert("blending".into(), json!(blending));
    }
    if let Some(depth_func) = material.depth_func {
        out.insert("depthFunc".into(), json!(depth_func));
    }
    if !material.depth_test {
        out.insert("depthTest".into(), json!(false));
    }
    if !material.depth_write {
        out.insert("depthWrite".into(), json!(false));
    }
    if material.wireframe {
        out.insert("wireframe".into(), json!(true));
    }
    if material.flat_shading {
        out.insert("flatShading".into(), json!(true));
    }
    if material.vertex_colors {
        out.insert("vertexColors".into(), json!(true));
    }
    if let Some(fog) = material.fog {
        out.insert("fog".into(), json!(fog));
    }
    if let Some(size) = material.size {
        out.insert("size".into(), json!(size));
    }
    if let Some(size_attenuation) = material.size_attenuation {
        out.insert("sizeAttenuation".into(), json!(size_attenuation));
    }
    let texture_slots: [(&str, &Option<Arc<Texture>>); 11] = [
        ("map", &material.map),
        ("alphaMap", &material.alpha_map),
        ("normalMap", &material.normal_map),
        ("bumpMap", &material.bump_map),
        ("aoMap", &material.ao_map),
        ("emissiveMap", &material.emissive_map),
        ("envMap", &material.env_map),
        ("lightMap", &material.light_map),
        ("roughnessMap", &material.roughness_map),
        ("metalnessMap", &material.metalness_map),
        ("specularMap", &material.specular_map),
    ];
    for (key, texture) in texture_slots {
        if let Some(texture) = texture {
            out.insert(key.into(), json!(texture.uuid));
        }
    }
    if let Some(user_data) = &material.user_data {
        out.insert("userData".into(), user_data.clone());
    }
    Value::Object(out)
}

fn serialize_texture(texture: &Texture) -> Value {
    let mut out = Map::new();
    out.insert("uuid".into(), json!(texture.uuid));
    if !texture.name.is_empty() {
        out.insert("name".into(), json!(texture.name));
    }
    if let Some(image) = &texture.image {
        out.insert("image".into(), json!(image.uuid));
    }
    if let Some(mapping) = texture.mapping {
        out.insert("mapping".into(), json!(mapping));
    }
    if let Some(wrap) = texture.wrap {
        out.insert("wrap".into(), json!(wrap.to_vec()));
    }
    if let Some(repeat) = texture.repeat {
        out.insert("repeat".into(), json!(repeat.to_vec()));
    }
    if let Some(offset) = texture.offset {
        out.insert("offset".into(), json!(offset.to_vec()));
    }
    if let Some(rotation) = texture.rotation {
        out.insert("rotation".into(), json!(rotation));
    }
    if let Some(mag_filter) = texture.mag_filter {
        out.insert("magFilter".into(), json!(mag_filter));
    }
    if let Some(min_filter) = texture.min_filter {
        out.insert("minFilter".into(), json!(min_filter));
    }
    if let Some(anisotropy) = texture.anisotropy {
        out.insert("anisotropy".into(), json!(anisotropy));
    }
    if !texture.flip_y {
        out.insert("flipY".into(), json!(false));
    }
    if let Some(user_data) = &texture.user_data {
        out.insert("userData".into(), user_data.clone());
    }
    Value::Object(out)
}

fn serialize_clip(clip: &crate::animation::AnimationClip) -> Value {
    let tracks: Vec<Value> = clip
        .tracks
        .iter()
        .map(|track| {
            let values = match &track.values {
                crate::animation::TrackValues::Float(v) => json!(v),
                crate::animation::TrackValues::Bool(v) => json!(v),
                crate::animation::TrackValues::Str(v) => json!(v),
            };
            json!({
                "name": track.name,
                "type": track.kind.tag(),
                "times": track.times,
                "values": values,
                "interpolation": track.interpolation.code(),
            })
        })
        .collect();
    let mut out = Map::new();
    out.insert("uuid".into(), json!(clip.uuid));
    out.insert("name".into(), json!(clip.name));
    out.insert("duration".into(), json!(clip.duration));
    if let Some(blend_mode) = clip.blend_mode {
        out.insert("blendMode".into(), json!(blend_mode));
    }
    out.insert("tracks".into(), Value::Array(tracks));
    Value::Object(out)
}
