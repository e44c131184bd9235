use std::borrow::Cow;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::loader::compat::CollectionView;
use crate::loader::diagnostics::{DiagnosticKind, Diagnostics};
use crate::loader::json;
use crate::material::Material;
use crate::texture::Texture;

const TEXTURE_SLOTS: &[&str] = &[
    "map",
    "alphaMap",
    "normalMap",
    "bumpMap",
    "aoMap",
    "emissiveMap",
    "envMap",
    "lightMap",
    "roughnessMap",
    "metalnessMap",
    "specularMap",
];

/// Parses the `materials` collection into a uuid-keyed map of shared
/// materials, resolving texture references against the texture map.
pub fn parse_materials(
    doc: &Value,
    textures: &IndexMap<String, Arc<Texture>>,
    diags: &mut Diagnostics,
) -> IndexMap<String, Arc<Material>> {
    let mut out = IndexMap::new();
    for (uuid, def) in CollectionView::of(doc, "materials").iter() {
        let uuid = match uuid {
            Some(uuid) => uuid,
            None => {
                diags.warn(DiagnosticKind::MalformedEntry, "material without a uuid");
                continue;
            }
        };
        let mut material = parse_material(def, textures, diags);
        material.uuid = uuid.to_string();
        out.insert(uuid.to_string(), Arc::new(material));
    }
    out
}

pub(crate) fn parse_material(
    def: &Value,
    textures: &IndexMap<String, Arc<Texture>>,
    diags: &mut Diagnostics,
) -> Material {
    let tag = json::get_str(def, "type").unwrap_or("MeshStandardMaterial");
    let mut m = Material::new(Cow::Owned(tag.to_string()));
    m.name = json::get_str(def, "name").unwrap_or_default().to_string();

    m.color = json::get_color(def, "color");
    m.emissive = json::get_color(def, "emissive");
    m.emissive_intensity = json::get_f32(def, "emissiveIntensity");
    m.roughness = json::get_f32(def, "roughness");
    m.metalness = json::get_f32(def, "metalness");
    m.shininess = json::get_f32(def, "shininess");
    m.specular = json::get_color(def, "specular");

    m.opacity = json::get_f32(def, "opacity").unwrap_or(1.0);
    m.transparent = json::get_bool(def, "transparent").unwrap_or(false);
    m.visible = json::get_bool(def, "visible").unwrap_or(true);
    m.side = json::get_i64(def, "side");
    m.blending = json::get_i64(def, "blending");
    m.depth_func = json::get_i64(def, "depthFunc");
    m.depth_test = json::get_bool(def, "depthTest").unwrap_or(true);
    m.depth_write = json::get_bool(def, "depthWrite").unwrap_or(true);
    m.alpha_test = json::get_f32(def, "alphaTest");
    m.wireframe = json::get_bool(def, "wireframe").unwrap_or(false);
    m.flat_shading = json::get_bool(def, "flatShading").unwrap_or(false);
    m.vertex_colors = json::get_bool(def, "vertexColors").unwrap_or(false);
    m.fog = json::get_bool(def, "fog");

    m.linewidth = json::get_f32(def, "linewidth");
    m.dash_size = json::get_f32(def, "dashSize");
    m.gap_size = json::get_f32(def, "gapSize");
    m.size = json::get_f32(def, "size");
    m.size_attenuation = json::get_bool(def, "sizeAttenuation");

    for &slot in TEXTURE_SLOTS {
        let tex_uuid = match json::get_str(def, slot) {
            Some(tex_uuid) => tex_uuid,
            None => continue,
        };
        let texture = textures.get(tex_uuid).cloned();
        if texture.is_none() {
            diags.warn(
                DiagnosticKind::UnresolvedTexture,
                format!("material slot {slot:?} references texture {tex_uuid:?}"),
            );
            continue;
        }
        match slot {
            "map" => m.map = texture,
            "alphaMap" => m.alpha_map = texture,
            "normalMap" => m.normal_map = texture,
            "bumpMap" => m.bump_map = texture,
            "aoMap" => m.ao_map = texture,
            "emissiveMap" => m.emissive_map = texture,
            "envMap" => m.env_map = texture,
            "lightMap" => m.light_map = texture,
            "roughnessMap" => m.roughness_map = texture,
            "metalnessMap" => m.metalness_map = texture,
            "specularMap" => m.specular_map = texture,
            _ => unreachable!(),
        }
    }

    m.user_data = def.get("userData").cloned();
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::MaterialKind;
    use crate::structs::Color;
    use serde_json::json;

    #[test]
    fn test_standard_material_fields() {
        let doc = json!({
            "materials": [{
                "uuid": "mat-1",
                "type": "MeshStandardMaterial",
                "name": "hull",
                "color": 0xff0000u32,
                "roughness": 0.5,
                "metalness": 1.0,
                "transparent": true,
                "opacity": 0.25,
                "side": 2
            }]
        });
        let mut diags = Diagnostics::new();
        let materials = parse_materials(&doc, &IndexMap::new(), &mut diags);
        assert!(diags.is_empty());
        let m = &materials["mat-1"];
        assert_eq!(m.kind, MaterialKind::MeshStandard);
        assert_eq!(m.color, Some(Color::new(1.0, 0.0, 0.0)));
        assert_eq!(m.roughness, Some(0.5));
        assert_eq!(m.opacity, 0.25);
        assert!(m.transparent);
        assert_eq!(m.side, Some(2));
    }

    #[test]
    fn test_unknown_material_type_still_loads() {
        let doc = json!({
            "materials": [{ "uuid": "mat-1", "type": "HoloMaterial", "color": 255 }]
        });
        let mut diags = Diagnostics::new();
        let materials = parse_materials(&doc, &IndexMap::new(), &mut diags);
        let m = &materials["mat-1"];
        assert_eq!(m.kind, MaterialKind::Other);
        assert_eq!(m.ty, "HoloMaterial");
        assert_eq!(m.color, Some(Color::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_dangling_texture_reference() {
        let doc = json!({
            "materials": [{ "uuid": "mat-1", "type": "MeshBasicMaterial", "map": "tex-9" }]
        });
        let mut diags = Diagnostics::new();
        let materials = parse_materials(&doc, &IndexMap::new(), &mut diags);
        assert!(materials["mat-1"].map.is_none());
        assert!(diags.has(DiagnosticKind::UnresolvedTexture));
    }
}
