use std::sync::Arc;

use serde_json::Value;

/// Out-of-band image resource referenced by textures.
///
/// The core only tracks identity and the source url; decoding and upload
/// belong to the caller's resource pipeline.
#[derive(Clone, Debug, Default)]
pub struct Image {
    pub uuid: String,
    pub url: String,
}

/// Texture definition resolved against the document's image collection.
/// Sampler-state fields are carried as opaque integers, matching how the
/// document stores them.
#[derive(Clone, Debug, Default)]
pub struct Texture {
    pub uuid: String,
    pub name: String,
    pub image: Option<Arc<Image>>,
    pub mapping: Option<u32>,
    pub wrap: Option<[u32; 2]>,
    pub repeat: Option<[f32; 2]>,
    pub offset: Option<[f32; 2]>,
    pub rotation: Option<f32>,
    pub mag_filter: Option<u32>,
    pub min_filter: Option<u32>,
    pub anisotropy: Option<u32>,
    pub flip_y: bool,
    pub user_data: Option<Value>,
}

/// Collaborator that loads out-of-band resources (image bytes, video,
/// audio) keyed by the same uuids the document uses.
///
/// `pending` is the completion contract: a caller that kicked off
/// asynchronous fetches reports how many are still in flight,
/// so a loading wrapper can delay its completion callback until the count
/// reaches zero. The parse itself never blocks on it.
pub trait ResourceResolver {
    /// Called once per distinct image uuid in the document.
    fn request_image(&self, uuid: &str, url: &str);

    /// Number of requested resources that have not settled yet.
    fn pending(&self) -> usize;
}

/// Resolver for documents with no external resources (and for tests):
/// accepts every request and reports nothing pending.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullResolver;

impl ResourceResolver for NullResolver {
    fn request_image(&self, _uuid: &str, _url: &str) {}

    fn pending(&self) -> usize {
        0
    }
}
