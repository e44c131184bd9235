use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::loader::compat::CollectionView;
use crate::loader::diagnostics::{DiagnosticKind, Diagnostics};
use crate::loader::json;
use crate::texture::{Image, ResourceResolver, Texture};

/// Parses the `images` collection and hands every entry to the resolver,
/// which fetches the actual bytes out of band.
pub fn parse_images(
    doc: &Value,
    resolver: &dyn ResourceResolver,
    diags: &mut Diagnostics,
) -> IndexMap<String, Arc<Image>> {
    let mut out = IndexMap::new();
    for (uuid, def) in CollectionView::of(doc, "images").iter() {
        let uuid = match uuid {
            Some(uuid) => uuid,
            None => {
                diags.warn(DiagnosticKind::MalformedEntry, "image without a uuid");
                continue;
            }
        };
        // cube images carry an array of urls; only the first is kept as
        // the representative source here
        let url = match def.get("url") {
            Some(Value::String(url)) => url.clone(),
            Some(Value::Array(urls)) => urls
                .first()
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            _ => String::new(),
        };
        resolver.request_image(uuid, &url);
        out.insert(
            uuid.to_string(),
            Arc::new(Image {
                uuid: uuid.to_string(),
                url,
            }),
        );
    }
    out
}

/// Parses the `textures` collection, resolving each entry's image against
/// the already-built image map.
pub fn parse_textures(
    doc: &Value,
    images: &IndexMap<String, Arc<Image>>,
    diags: &mut Diagnostics,
) -> IndexMap<String, Arc<Texture>> {
    let mut out = IndexMap::new();
    for (uuid, def) in CollectionView::of(doc, "textures").iter() {
        let uuid = match uuid {
            Some(uuid) => uuid,
            None => {
                diags.warn(DiagnosticKind::MalformedEntry, "texture without a uuid");
                continue;
            }
        };
        let image = match json::get_str(def, "image") {
            Some(image_uuid) => {
                let image = images.get(image_uuid).cloned();
                if image.is_none() {
                    diags.warn(
                        DiagnosticKind::UnresolvedImage,
                        format!("texture {uuid:?} references image {image_uuid:?}"),
                    );
                }
                image
            }
            None => None,
        };
        let pair_u32 = |key: &str| -> Option<[u32; 2]> {
            let arr = def.get(key)?.as_array()?;
            Some([arr.first()?.as_u64()? as u32, arr.get(1)?.as_u64()? as u32])
        };
        let pair_f32 = |key: &str| -> Option<[f32; 2]> {
            let arr = def.get(key)?.as_array()?;
            Some([
                arr.first()?.as_f64()? as f32,
                arr.get(1)?.as_f64()? as f32,
            ])
        };
        out.insert(
            uuid.to_string(),
            Arc::new(Texture {
                uuid: uuid.to_string(),
                name: json::get_str(def, "name").unwrap_or_default().to_string(),
                image,
                mapping: json::get_u32(def, "mapping"),
                wrap: pair_u32("wrap"),
                repeat: pair_f32("repeat"),
                offset: pair_f32("offset"),
                rotation: json::get_f32(def, "rotation"),
                mag_filter: json::get_u32(def, "magFilter"),
                min_filter: json::get_u32(def, "minFilter"),
                anisotropy: json::get_u32(def, "anisotropy"),
                flip_y: json::get_bool(def, "flipY").unwrap_or(true),
                user_data: def.get("userData").cloned(),
            }),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::NullResolver;
    use serde_json::json;

    #[test]
    fn test_texture_resolves_image() {
        let doc = json!({
            "images": [{ "uuid": "img-1", "url": "crate.png" }],
            "textures": [{ "uuid": "tex-1", "image": "img-1", "wrap": [1000, 1000] }]
        });
        let mut diags = Diagnostics::new();
        let images = parse_images(&doc, &NullResolver, &mut diags);
        let textures = parse_textures(&doc, &images, &mut diags);
        assert!(diags.is_empty());
        let tex = &textures["tex-1"];
        assert_eq!(tex.image.as_ref().unwrap().url, "crate.png");
        assert_eq!(tex.wrap, Some([1000, 1000]));
        assert!(tex.flip_y);
    }

    #[test]
    fn test_missing_image_warns_and_continues() {
        let doc = json!({
            "textures": [{ "uuid": "tex-1", "image": "nope" }]
        });
        let mut diags = Diagnostics::new();
        let images = parse_images(&doc, &NullResolver, &mut diags);
        let textures = parse_textures(&doc, &images, &mut diags);
        assert!(textures["tex-1"].image.is_none());
        assert!(diags.has(DiagnosticKind::UnresolvedImage));
    }
}
