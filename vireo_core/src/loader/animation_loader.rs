use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use uuid::Uuid;

use crate::animation::{AnimationClip, Interpolation, KeyframeTrack, TrackKind, TrackValues};
use crate::loader::compat::CollectionView;
use crate::loader::diagnostics::{DiagnosticKind, Diagnostics};
use crate::loader::json;

/// Parses the `animations` collection into a uuid-keyed map of shared
/// clips. Entries without a uuid get a generated one; they can still be
/// reached by document order through the map.
pub fn parse_animations(doc: &Value, diags: &mut Diagnostics) -> IndexMap<String, Arc<AnimationClip>> {
    let mut out = IndexMap::new();
    for (uuid, def) in CollectionView::of(doc, "animations").iter() {
        let uuid = uuid
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let clip = match parse_clip(&uuid, def, diags) {
            Some(clip) => clip,
            None => continue,
        };
        out.insert(uuid, Arc::new(clip));
    }
    out
}

fn parse_clip(uuid: &str, def: &Value, diags: &mut Diagnostics) -> Option<AnimationClip> {
    let tracks_def = match def.get("tracks").and_then(Value::as_array) {
        Some(tracks) => tracks,
        None => {
            diags.warn(
                DiagnosticKind::MalformedEntry,
                format!("animation {uuid:?} has no tracks"),
            );
            return None;
        }
    };
    let mut tracks = Vec::with_capacity(tracks_def.len());
    for track_def in tracks_def {
        match parse_track(track_def) {
            Some(track) => tracks.push(track),
            None => diags.warn(
                DiagnosticKind::MalformedEntry,
                format!("animation {uuid:?} has a track without a name or times"),
            ),
        }
    }
    // a missing or negative duration means "span of the longest track"
    let duration = match json::get_f32(def, "duration") {
        Some(d) if d >= 0.0 => d,
        _ => tracks
            .iter()
            .flat_map(|t| t.times.last().copied())
            .fold(0.0f32, f32::max),
    };
    Some(AnimationClip {
        uuid: uuid.to_string(),
        name: json::get_str(def, "name").unwrap_or_default().to_string(),
        duration,
        tracks,
        blend_mode: json::get_i64(def, "blendMode"),
    })
}

fn parse_track(def: &Value) -> Option<KeyframeTrack> {
    let name = json::get_str(def, "name")?.to_string();
    let kind = json::get_str(def, "type")
        .and_then(TrackKind::from_tag)
        .unwrap_or_else(|| TrackKind::infer_from_path(&name));
    let times = json::get_f32_slice(def, "times")?;
    let raw_values = def.get("values").and_then(Value::as_array)?;
    let values = match kind {
        TrackKind::Bool => TrackValues::Bool(
            raw_values.iter().filter_map(Value::as_bool).collect(),
        ),
        TrackKind::String => TrackValues::Str(
            raw_values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        ),
        _ => TrackValues::Float(
            raw_values
                .iter()
                .filter_map(Value::as_f64)
                .map(|v| v as f32)
                .collect(),
        ),
    };
    let interpolation = json::get_i64(def, "interpolation")
        .and_then(Interpolation::from_code)
        .unwrap_or_default();
    Some(KeyframeTrack {
        name,
        kind,
        times,
        values,
        interpolation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clip_with_typed_tracks() {
        let doc = json!({
            "animations": [{
                "uuid": "clip-1",
                "name": "orbit",
                "duration": 2.0,
                "tracks": [
                    {
                        "name": ".position",
                        "type": "vector",
                        "times": [0.0, 1.0],
                        "values": [0, 0, 0, 1, 2, 3],
                        "interpolation": 2300
                    },
                    {
                        "name": ".quaternion",
                        "times": [0.0],
                        "values": [0, 0, 0, 1]
                    }
                ]
            }]
        });
        let mut diags = Diagnostics::new();
        let clips = parse_animations(&doc, &mut diags);
        assert!(diags.is_empty());
        let clip = &clips["clip-1"];
        assert_eq!(clip.name, "orbit");
        assert_eq!(clip.tracks.len(), 2);
        assert_eq!(clip.tracks[0].interpolation, Interpolation::Discrete);
        assert_eq!(clip.tracks[1].kind, TrackKind::Quaternion);
        assert_eq!(clip.tracks[1].interpolation, Interpolation::Linear);
    }

    #[test]
    fn test_missing_duration_spans_longest_track() {
        let doc = json!({
            "animations": [{
                "uuid": "clip-1",
                "name": "fade",
                "duration": -1,
                "tracks": [
                    { "name": ".material.opacity", "times": [0.0, 3.5], "values": [1.0, 0.0] }
                ]
            }]
        });
        let mut diags = Diagnostics::new();
        let clips = parse_animations(&doc, &mut diags);
        assert_eq!(clips["clip-1"].duration, 3.5);
    }
}
