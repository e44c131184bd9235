use std::collections::HashMap;
use std::sync::Arc;

use glam::Mat4;
use indexmap::IndexMap;
use serde_json::Value;
use uuid::Uuid;

use crate::animation::AnimationClip;
use crate::geometry::BufferGeometry;
use crate::loader::animation_loader::parse_animations;
use crate::loader::buffers::BufferStore;
use crate::loader::compat::CollectionView;
use crate::loader::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::loader::error::LoadError;
use crate::loader::geometry_loader::{parse_geometries, parse_geometry};
use crate::loader::json;
use crate::loader::material_loader::{parse_material, parse_materials};
use crate::loader::texture_loader::{parse_images, parse_textures};
use crate::material::{Material, MaterialSlot};
use crate::nodes::{
    AmbientLight, BindMode, Bone, DirectionalLight, Group, HemisphereLight, InstancedMesh,
    LightProbe, LightShadow, Line, Lod, LodLevel, Mesh, NodeType, Object3D, OrthographicCamera,
    PerspectiveCamera, PointLight, Points, RectAreaLight, Scene3D, SceneObject, SkinnedMesh,
    SpotLight, Sprite,
};
use crate::object_arena::NodeId;
use crate::scene::SceneGraph;
use crate::skeleton::Skeleton;
use crate::structs::Transform3D;
use crate::texture::{Image, NullResolver, ResourceResolver, Texture};

/// Everything reconstructed from one document: the object tree plus the
/// uuid-keyed resource maps and the warnings collected along the way.
#[derive(Debug)]
pub struct LoadedDocument {
    pub graph: SceneGraph,
    pub geometries: IndexMap<String, Arc<BufferGeometry>>,
    pub materials: IndexMap<String, Arc<Material>>,
    pub textures: IndexMap<String, Arc<Texture>>,
    pub images: IndexMap<String, Arc<Image>>,
    pub animations: IndexMap<String, Arc<AnimationClip>>,
    pub skeletons: IndexMap<String, Arc<Skeleton>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadedDocument {
    pub fn root(&self) -> Option<&SceneObject> {
        self.graph.root()
    }
}

/// Reconstructs a scene document from its JSON form.
///
/// The only fatal failures are unparsable JSON and a missing root
/// `object`; everything else degrades to a diagnostic so a best-effort
/// tree always comes back.
pub struct ObjectLoader<R = NullResolver> {
    resolver: R,
}

impl ObjectLoader<NullResolver> {
    pub fn new() -> Self {
        Self {
            resolver: NullResolver,
        }
    }
}

impl Default for ObjectLoader<NullResolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ResourceResolver> ObjectLoader<R> {
    pub fn with_resolver(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn parse_str(&self, source: &str) -> Result<LoadedDocument, LoadError> {
        let doc: Value = serde_json::from_str(source)?;
        self.parse(&doc)
    }

    pub fn parse(&self, doc: &Value) -> Result<LoadedDocument, LoadError> {
        let root_def = doc
            .get("object")
            .ok_or_else(|| LoadError::malformed("document has no root object"))?;

        let mut diags = Diagnostics::new();
        let mut store = BufferStore::new(doc);

        let images = parse_images(doc, &self.resolver, &mut diags);
        let textures = parse_textures(doc, &images, &mut diags);
        let materials = parse_materials(doc, &textures, &mut diags);
        let geometries = parse_geometries(doc, &mut store, &mut diags);
        let animations = parse_animations(doc, &mut diags);

        let mut builder = TreeBuilder {
            store,
            diags,
            geometries: &geometries,
            materials: &materials,
            textures: &textures,
            animations: &animations,
            graph: SceneGraph::new(),
            by_uuid: HashMap::new(),
            pending_skins: Vec::new(),
            pending_targets: Vec::new(),
        };

        let root = builder
            .walk(root_def, NodeId::nil())
            .ok_or_else(|| LoadError::malformed("root object could not be reconstructed"))?;
        builder.graph.root = root;

        builder.resolve_light_targets();
        let skeletons = builder.resolve_skeletons(doc);

        // Drop the builder's borrows of the resource maps before moving them.
        let graph = builder.graph;
        let diagnostics = builder.diags.into_entries();

        Ok(LoadedDocument {
            graph,
            geometries,
            materials,
            textures,
            images,
            animations,
            skeletons,
            diagnostics,
        })
    }
}

struct TreeBuilder<'a> {
    store: BufferStore<'a>,
    diags: Diagnostics,
    geometries: &'a IndexMap<String, Arc<BufferGeometry>>,
    materials: &'a IndexMap<String, Arc<Material>>,
    textures: &'a IndexMap<String, Arc<Texture>>,
    animations: &'a IndexMap<String, Arc<AnimationClip>>,
    graph: SceneGraph,
    by_uuid: HashMap<String, NodeId>,
    /// Skinned meshes waiting on a skeleton uuid; resolved once the whole
    /// tree exists, since bones live in it as ordinary nodes.
    pending_skins: Vec<(NodeId, String)>,
    pending_targets: Vec<(NodeId, String)>,
}

impl<'a> TreeBuilder<'a> {
    /// Reconstructs one node definition and its subtree. Children attach
    /// in document order; level-of-detail bindings resolve right after
    /// this node's own children exist.
    fn walk(&mut self, def: &Value, parent: NodeId) -> Option<NodeId> {
        let object = self.build_node(def)?;
        let id = self.graph.insert(object);
        if !parent.is_nil() {
            self.graph.attach(id, parent);
        }
        if let Some(node) = self.graph.object(id) {
            self.by_uuid.insert(node.uuid().to_string(), id);
        }

        // references to other nodes resolve once the whole tree exists
        if let Some(target) = json::get_str(def, "target") {
            if matches!(
                self.graph.object(id),
                Some(SceneObject::DirectionalLight(_) | SceneObject::SpotLight(_))
            ) {
                self.pending_targets.push((id, target.to_string()));
            }
        }
        if let Some(skeleton) = json::get_str(def, "skeleton") {
            if matches!(self.graph.object(id), Some(SceneObject::SkinnedMesh(_))) {
                self.pending_skins.push((id, skeleton.to_string()));
            }
        }

        if let Some(children) = def.get("children").and_then(Value::as_array) {
            for child_def in children {
                self.walk(child_def, id);
            }
        }

        if let Some(levels) = def.get("levels").and_then(Value::as_array) {
            self.resolve_lod_levels(id, levels);
        }
        Some(id)
    }

    fn build_node(&mut self, def: &Value) -> Option<SceneObject> {
        let tag = json::get_str(def, "type").unwrap_or("Object3D");
        if !NodeType::is_known(tag) {
            self.diags.warn(
                DiagnosticKind::UnsupportedNodeType,
                format!("object type {tag:?} loads as a generic object"),
            );
        }
        let mut object = match NodeType::from_tag(tag) {
            NodeType::Object3D => SceneObject::Object3D(Object3D::default()),
            NodeType::Group => SceneObject::Group(Group::new()),
            NodeType::Scene => {
                let mut scene = Scene3D::new();
                scene.background = json::get_color(def, "background");
                SceneObject::Scene(scene)
            }
            NodeType::Mesh => {
                let mut mesh = Mesh::new();
                mesh.geometry = self.resolve_geometry(def);
                mesh.material = self.resolve_material_slot(def);
                SceneObject::Mesh(mesh)
            }
            NodeType::SkinnedMesh => {
                let mut mesh = SkinnedMesh::new();
                mesh.geometry = self.resolve_geometry(def);
                mesh.material = self.resolve_material_slot(def);
                mesh.bind_mode = json::get_str(def, "bindMode")
                    .map(BindMode::from_tag)
                    .unwrap_or_default();
                if let Some(matrix) = json::get_mat4(def, "bindMatrix") {
                    mesh.bind_matrix = matrix;
                }
                SceneObject::SkinnedMesh(mesh)
            }
            NodeType::InstancedMesh => {
                let mut mesh = InstancedMesh::new();
                mesh.geometry = self.resolve_geometry(def);
                mesh.material = self.resolve_material_slot(def);
                mesh.instance_matrix = self.resolve_instance_attribute(def, "instanceMatrix");
                mesh.instance_color = self.resolve_instance_attribute(def, "instanceColor");
                mesh.count = json::get_u32(def, "count").unwrap_or_else(|| {
                    mesh.instance_matrix.as_ref().map_or(0, |a| a.count() as u32)
                });
                SceneObject::InstancedMesh(mesh)
            }
            NodeType::Bone => SceneObject::Bone(Bone::new()),
            NodeType::Line => {
                SceneObject::Line(self.build_line(def, "Line"))
            }
            NodeType::LineLoop => {
                SceneObject::LineLoop(self.build_line(def, "LineLoop"))
            }
            NodeType::LineSegments => {
                SceneObject::LineSegments(self.build_line(def, "LineSegments"))
            }
            NodeType::Points => {
                let mut points = Points::new();
                points.geometry = self.resolve_geometry(def);
                points.material = self.resolve_material_slot(def);
                SceneObject::Points(points)
            }
            NodeType::Sprite => {
                let mut sprite = Sprite::new();
                sprite.material = self.resolve_material_slot(def);
                if let Some(center) = def.get("center").and_then(json::as_f32_vec) {
                    if center.len() == 2 {
                        sprite.center = [center[0], center[1]];
                    }
                }
                SceneObject::Sprite(sprite)
            }
            NodeType::PerspectiveCamera => {
                let mut camera = PerspectiveCamera::new();
                camera.fov = json::get_f32(def, "fov").unwrap_or(camera.fov);
                camera.aspect = json::get_f32(def, "aspect").unwrap_or(camera.aspect);
                camera.near = json::get_f32(def, "near").unwrap_or(camera.near);
                camera.far = json::get_f32(def, "far").unwrap_or(camera.far);
                camera.zoom = json::get_f32(def, "zoom").unwrap_or(camera.zoom);
                camera.focus = json::get_f32(def, "focus").unwrap_or(camera.focus);
                camera.film_gauge = json::get_f32(def, "filmGauge").unwrap_or(camera.film_gauge);
                camera.film_offset = json::get_f32(def, "filmOffset").unwrap_or(camera.film_offset);
                SceneObject::PerspectiveCamera(camera)
            }
            NodeType::OrthographicCamera => {
                let mut camera = OrthographicCamera::new();
                camera.left = json::get_f32(def, "left").unwrap_or(camera.left);
                camera.right = json::get_f32(def, "right").unwrap_or(camera.right);
                camera.top = json::get_f32(def, "top").unwrap_or(camera.top);
                camera.bottom = json::get_f32(def, "bottom").unwrap_or(camera.bottom);
                camera.near = json::get_f32(def, "near").unwrap_or(camera.near);
                camera.far = json::get_f32(def, "far").unwrap_or(camera.far);
                camera.zoom = json::get_f32(def, "zoom").unwrap_or(camera.zoom);
                SceneObject::OrthographicCamera(camera)
            }
            NodeType::AmbientLight => {
                let mut light = AmbientLight::new();
                light.color = json::get_color(def, "color").unwrap_or(light.color);
                light.intensity = json::get_f32(def, "intensity").unwrap_or(light.intensity);
                SceneObject::AmbientLight(light)
            }
            NodeType::DirectionalLight => {
                let mut light = DirectionalLight::new();
                light.color = json::get_color(def, "color").unwrap_or(light.color);
                light.intensity = json::get_f32(def, "intensity").unwrap_or(light.intensity);
                light.shadow = self.parse_shadow(def);
                SceneObject::DirectionalLight(light)
            }
            NodeType::PointLight => {
                let mut light = PointLight::new();
                light.color = json::get_color(def, "color").unwrap_or(light.color);
                light.intensity = json::get_f32(def, "intensity").unwrap_or(light.intensity);
                light.distance = json::get_f32(def, "distance").unwrap_or(light.distance);
                light.decay = json::get_f32(def, "decay").unwrap_or(light.decay);
                light.shadow = self.parse_shadow(def);
                SceneObject::PointLight(light)
            }
            NodeType::SpotLight => {
                let mut light = SpotLight::new();
                light.color = json::get_color(def, "color").unwrap_or(light.color);
                light.intensity = json::get_f32(def, "intensity").unwrap_or(light.intensity);
                light.distance = json::get_f32(def, "distance").unwrap_or(light.distance);
                light.angle = json::get_f32(def, "angle").unwrap_or(light.angle);
                light.penumbra = json::get_f32(def, "penumbra").unwrap_or(light.penumbra);
                light.decay = json::get_f32(def, "decay").unwrap_or(light.decay);
                light.shadow = self.parse_shadow(def);
                SceneObject::SpotLight(light)
            }
            NodeType::HemisphereLight => {
                let mut light = HemisphereLight::new();
                light.color = json::get_color(def, "color").unwrap_or(light.color);
                light.ground_color =
                    json::get_color(def, "groundColor").unwrap_or(light.ground_color);
                light.intensity = json::get_f32(def, "intensity").unwrap_or(light.intensity);
                SceneObject::HemisphereLight(light)
            }
            NodeType::RectAreaLight => {
                let mut light = RectAreaLight::new();
                light.color = json::get_color(def, "color").unwrap_or(light.color);
                light.intensity = json::get_f32(def, "intensity").unwrap_or(light.intensity);
                light.width = json::get_f32(def, "width").unwrap_or(light.width);
                light.height = json::get_f32(def, "height").unwrap_or(light.height);
                SceneObject::RectAreaLight(light)
            }
            NodeType::LightProbe => {
                let mut probe = LightProbe::new();
                probe.intensity = json::get_f32(def, "intensity").unwrap_or(probe.intensity);
                if let Some(sh) = json::get_f32_slice(def, "sh") {
                    if sh.len() == 27 {
                        probe.sh.copy_from_slice(&sh);
                    }
                }
                SceneObject::LightProbe(probe)
            }
            NodeType::LOD => {
                let mut lod = Lod::new();
                lod.auto_update = json::get_bool(def, "autoUpdate").unwrap_or(true);
                SceneObject::LOD(lod)
            }
        };

        self.fill_base(def, tag, object.base_mut());
        Some(object)
    }

    fn build_line(&mut self, def: &Value, ty: &'static str) -> Line {
        let mut line = Line::new(ty);
        line.geometry = self.resolve_geometry(def);
        line.material = self.resolve_material_slot(def);
        line
    }

    fn fill_base(&mut self, def: &Value, tag: &str, base: &mut Object3D) {
        base.uuid = json::get_str(def, "uuid")
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        if !NodeType::is_known(tag) {
            base.ty = std::borrow::Cow::Owned(tag.to_string());
        }
        base.name = json::get_str(def, "name").unwrap_or_default().to_string();

        // a composed matrix wins over explicit TRS fields
        if let Some(matrix) = json::get_mat4(def, "matrix") {
            base.transform = Transform3D::from_mat4(matrix);
        } else {
            if let Some(position) = def.get("position").and_then(json::as_f32_vec) {
                if position.len() == 3 {
                    base.transform.position =
                        crate::structs::Vector3::new(position[0], position[1], position[2]);
                }
            }
            if let Some(rotation) = def.get("rotation").and_then(json::as_f32_vec) {
                if rotation.len() >= 3 {
                    base.transform.rotation =
                        crate::structs::Quaternion::from_euler(rotation[0], rotation[1], rotation[2]);
                }
            }
            if let Some(quat) = def.get("quaternion").and_then(json::as_f32_vec) {
                if quat.len() == 4 {
                    base.transform.rotation =
                        crate::structs::Quaternion::new(quat[0], quat[1], quat[2], quat[3]);
                }
            }
            if let Some(scale) = def.get("scale").and_then(json::as_f32_vec) {
                if scale.len() == 3 {
                    base.transform.scale =
                        crate::structs::Vector3::new(scale[0], scale[1], scale[2]);
                }
            }
        }

        base.visible = json::get_bool(def, "visible").unwrap_or(true);
        base.frustum_culled = json::get_bool(def, "frustumCulled").unwrap_or(true);
        base.cast_shadow = json::get_bool(def, "castShadow").unwrap_or(false);
        base.receive_shadow = json::get_bool(def, "receiveShadow").unwrap_or(false);
        base.render_order = json::get_i64(def, "renderOrder").unwrap_or(0) as i32;
        base.layers = json::get_u32(def, "layers").unwrap_or(1);
        base.matrix_auto_update = json::get_bool(def, "matrixAutoUpdate").unwrap_or(true);
        base.user_data = def.get("userData").cloned();

        if let Some(clip_uuids) = def.get("animations").and_then(Value::as_array) {
            for clip_uuid in clip_uuids.iter().filter_map(Value::as_str) {
                match self.animations.get(clip_uuid) {
                    Some(clip) => base.animations.push(clip.clone()),
                    None => self.diags.warn(
                        DiagnosticKind::UnresolvedAnimation,
                        format!("object {:?} references animation {clip_uuid:?}", base.uuid),
                    ),
                }
            }
        }
    }

    fn resolve_geometry(&mut self, def: &Value) -> Option<Arc<BufferGeometry>> {
        match def.get("geometry")? {
            Value::String(uuid) => {
                let geometry = self.geometries.get(uuid).cloned();
                if geometry.is_none() {
                    self.diags.warn(
                        DiagnosticKind::UnresolvedGeometry,
                        format!("no geometry {uuid:?}"),
                    );
                }
                geometry
            }
            // oldest documents could embed the definition by value
            embedded @ Value::Object(_) => {
                let uuid = json::get_str(embedded, "uuid").unwrap_or_default();
                parse_geometry(uuid, embedded, &mut self.store, &mut self.diags).map(|mut g| {
                    g.uuid = uuid.to_string();
                    Arc::new(g)
                })
            }
            _ => None,
        }
    }

    fn resolve_material_slot(&mut self, def: &Value) -> MaterialSlot {
        match def.get("material") {
            Some(embedded @ Value::Object(_)) => {
                let mut material = parse_material(embedded, self.textures, &mut self.diags);
                material.uuid = json::get_str(embedded, "uuid").unwrap_or_default().to_string();
                MaterialSlot::Single(Arc::new(material))
            }
            Some(Value::String(uuid)) => match self.materials.get(uuid) {
                Some(material) => MaterialSlot::Single(material.clone()),
                None => {
                    self.diags.warn(
                        DiagnosticKind::UnresolvedMaterial,
                        format!("no material {uuid:?}"),
                    );
                    MaterialSlot::None
                }
            },
            Some(Value::Array(uuids)) => {
                let mut slots = Vec::with_capacity(uuids.len());
                for uuid in uuids {
                    let uuid = uuid.as_str().unwrap_or_default();
                    let material = self.materials.get(uuid).cloned();
                    if material.is_none() {
                        self.diags.warn(
                            DiagnosticKind::UnresolvedMaterial,
                            format!("no material {uuid:?}"),
                        );
                    }
                    slots.push(material);
                }
                MaterialSlot::Array(slots)
            }
            _ => MaterialSlot::None,
        }
    }

    fn resolve_instance_attribute(
        &mut self,
        def: &Value,
        key: &str,
    ) -> Option<crate::geometry::BufferAttribute> {
        let attr_def = def.get(key)?;
        match self.store.parse_buffer_attribute(attr_def) {
            Ok(attr) => Some(attr),
            Err(err) => {
                self.diags
                    .warn(err.diagnostic_kind(), format!("{key}: {err}"));
                None
            }
        }
    }

    /// Shadow block of a light. The shadow camera is a full nested node
    /// definition, reconstructed into the arena but left outside the tree.
    fn parse_shadow(&mut self, def: &Value) -> Option<LightShadow> {
        let shadow_def = def.get("shadow")?;
        let mut shadow = LightShadow::default();
        shadow.bias = json::get_f32(shadow_def, "bias").unwrap_or(shadow.bias);
        shadow.normal_bias = json::get_f32(shadow_def, "normalBias").unwrap_or(shadow.normal_bias);
        shadow.radius = json::get_f32(shadow_def, "radius").unwrap_or(shadow.radius);
        shadow.intensity = json::get_f32(shadow_def, "intensity");
        if let Some(size) = shadow_def.get("mapSize").and_then(Value::as_array) {
            if let (Some(w), Some(h)) = (
                size.first().and_then(Value::as_u64),
                size.get(1).and_then(Value::as_u64),
            ) {
                shadow.map_size = [w as u32, h as u32];
            }
        }
        if let Some(camera_def) = shadow_def.get("camera") {
            if let Some(camera) = self.walk(camera_def, NodeId::nil()) {
                shadow.camera = camera;
            }
        }
        Some(shadow)
    }

    /// Binds level definitions against this node's own children, which
    /// all exist by the time this runs.
    fn resolve_lod_levels(&mut self, id: NodeId, levels: &[Value]) {
        let mut resolved = Vec::with_capacity(levels.len());
        for level in levels {
            let object_uuid = json::get_str(level, "object").unwrap_or_default();
            let child = self
                .graph
                .object(id)
                .map(|node| node.children().to_vec())
                .unwrap_or_default()
                .into_iter()
                .find(|&c| {
                    self.graph.object(c).map(|n| n.uuid() == object_uuid) == Some(true)
                });
            let object = match child {
                Some(child) => child,
                None => {
                    self.diags.warn(
                        DiagnosticKind::UnresolvedLodObject,
                        format!("no child {object_uuid:?} for a detail level"),
                    );
                    continue;
                }
            };
            resolved.push(LodLevel {
                object,
                distance: json::get_f32(level, "distance").unwrap_or(0.0),
                hysteresis: json::get_f32(level, "hysteresis").unwrap_or(0.0),
            });
        }
        if let Some(SceneObject::LOD(lod)) = self.graph.object_mut(id) {
            lod.levels = resolved;
        }
    }

    fn resolve_light_targets(&mut self) {
        let pending = std::mem::take(&mut self.pending_targets);
        for (id, uuid) in pending {
            let target = match self.by_uuid.get(&uuid) {
                Some(&target) => target,
                None => {
                    self.diags.warn(
                        DiagnosticKind::UnresolvedLightTarget,
                        format!("no object {uuid:?}"),
                    );
                    continue;
                }
            };
            match self.graph.object_mut(id) {
                Some(SceneObject::DirectionalLight(light)) => light.target = target,
                Some(SceneObject::SpotLight(light)) => light.target = target,
                _ => {}
            }
        }
    }

    /// Parses the `skeletons` collection and hands each skinned mesh its
    /// skeleton. Runs after the whole tree exists so bone uuids can
    /// resolve to arena handles.
    fn resolve_skeletons(&mut self, doc: &Value) -> IndexMap<String, Arc<Skeleton>> {
        let mut skeletons: IndexMap<String, Arc<Skeleton>> = IndexMap::new();
        for (uuid, def) in CollectionView::of(doc, "skeletons").iter() {
            let uuid = match uuid {
                Some(uuid) => uuid,
                None => {
                    self.diags
                        .warn(DiagnosticKind::MalformedEntry, "skeleton without a uuid");
                    continue;
                }
            };
            let bone_uuids: Vec<&str> = def
                .get("bones")
                .and_then(Value::as_array)
                .map(|b| b.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();
            let mut bones = Vec::with_capacity(bone_uuids.len());
            for bone_uuid in &bone_uuids {
                match self.by_uuid.get(*bone_uuid) {
                    Some(&id) => bones.push(Some(id)),
                    None => {
                        self.diags.warn(
                            DiagnosticKind::UnresolvedBone,
                            format!("skeleton {uuid:?} references bone {bone_uuid:?}"),
                        );
                        bones.push(None);
                    }
                }
            }
            let bone_inverses = def
                .get("boneInverses")
                .and_then(Value::as_array)
                .map(|list| {
                    list.iter()
                        .filter_map(json::as_f32_vec)
                        .filter(|flat| flat.len() == 16)
                        .map(|flat| {
                            let mut cols = [0.0f32; 16];
                            cols.copy_from_slice(&flat);
                            Mat4::from_cols_array(&cols)
                        })
                        .collect()
                })
                .unwrap_or_default();
            skeletons.insert(
                uuid.to_string(),
                Arc::new(Skeleton {
                    uuid: uuid.to_string(),
                    bones,
                    bone_inverses,
                }),
            );
        }

        let pending = std::mem::take(&mut self.pending_skins);
        for (id, uuid) in pending {
            match skeletons.get(&uuid) {
                Some(skeleton) => {
                    if let Some(mesh) = self
                        .graph
                        .object_mut(id)
                        .and_then(SceneObject::as_skinned_mesh_mut)
                    {
                        mesh.skeleton = Some(skeleton.clone());
                    }
                }
                None => self.diags.warn(
                    DiagnosticKind::UnresolvedSkeleton,
                    format!("no skeleton {uuid:?}"),
                ),
            }
        }
        skeletons
    }
}
