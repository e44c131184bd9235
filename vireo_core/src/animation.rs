/// Value kind of a keyframe track, deciding how many scalars make up one
/// keyframe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackKind {
    Vector,
    Quaternion,
    Number,
    Color,
    Bool,
    String,
}

impl TrackKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "vector" => Some(Self::Vector),
            "quaternion" => Some(Self::Quaternion),
            "number" => Some(Self::Number),
            "color" => Some(Self::Color),
            "bool" => Some(Self::Bool),
            "string" => Some(Self::String),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Vector => "vector",
            Self::Quaternion => "quaternion",
            Self::Number => "number",
            Self::Color => "color",
            Self::Bool => "bool",
            Self::String => "string",
        }
    }

    /// Infer the kind from the dotted target path when a definition omits
    /// the explicit tag.
    pub fn infer_from_path(path: &str) -> Self {
        let leaf = path.rsplit('.').next().unwrap_or(path);
        // strip a trailing [index]/[name] accessor
        let leaf = leaf.split('[').next().unwrap_or(leaf);
        match leaf {
            "position" | "scale" => Self::Vector,
            "quaternion" => Self::Quaternion,
            "color" => Self::Color,
            "visible" => Self::Bool,
            _ => Self::Number,
        }
    }

    /// Scalars per keyframe.
    pub fn value_size(&self) -> usize {
        match self {
            Self::Vector | Self::Color => 3,
            Self::Quaternion => 4,
            Self::Number | Self::Bool | Self::String => 1,
        }
    }
}

/// Interpolation mode, stored in documents as the enumerated integers
/// 2300/2301/2302.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Interpolation {
    Discrete,
    #[default]
    Linear,
    Smooth,
}

impl Interpolation {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            2300 => Some(Self::Discrete),
            2301 => Some(Self::Linear),
            2302 => Some(Self::Smooth),
            _ => None,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Discrete => 2300,
            Self::Linear => 2301,
            Self::Smooth => 2302,
        }
    }
}

/// Keyframe values; numeric kinds share the flat float representation,
/// boolean and string tracks keep their own.
#[derive(Clone, Debug, PartialEq)]
pub enum TrackValues {
    Float(Vec<f32>),
    Bool(Vec<bool>),
    Str(Vec<String>),
}

impl TrackValues {
    pub fn len(&self) -> usize {
        match self {
            Self::Float(v) => v.len(),
            Self::Bool(v) => v.len(),
            Self::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One animated property: a dotted target path plus parallel time/value
/// arrays.
///
/// The path (`".position"`, `".material.opacity"`,
/// `".bones[Spine].quaternion"`) is never resolved at load time; binding
/// against a live object graph is the runtime's job.
#[derive(Clone, Debug)]
pub struct KeyframeTrack {
    pub name: String,
    pub kind: TrackKind,
    pub times: Vec<f32>,
    pub values: TrackValues,
    pub interpolation: Interpolation,
}

impl KeyframeTrack {
    /// Scalar values of keyframe `i` for numeric kinds.
    pub fn keyframe(&self, i: usize) -> Option<&[f32]> {
        let size = self.kind.value_size();
        match &self.values {
            TrackValues::Float(v) => v.get(i * size..(i + 1) * size),
            _ => None,
        }
    }

    pub fn keyframe_count(&self) -> usize {
        self.times.len()
    }
}

/// Named clip grouping an ordered list of tracks.
#[derive(Clone, Debug)]
pub struct AnimationClip {
    pub uuid: String,
    pub name: String,
    pub duration: f32,
    pub tracks: Vec<KeyframeTrack>,
    pub blend_mode: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_arity() {
        assert_eq!(TrackKind::Vector.value_size(), 3);
        assert_eq!(TrackKind::Quaternion.value_size(), 4);
        assert_eq!(TrackKind::Color.value_size(), 3);
        assert_eq!(TrackKind::Number.value_size(), 1);
    }

    #[test]
    fn test_infer_from_path() {
        assert_eq!(TrackKind::infer_from_path(".position"), TrackKind::Vector);
        assert_eq!(
            TrackKind::infer_from_path(".bones[Spine].quaternion"),
            TrackKind::Quaternion
        );
        assert_eq!(
            TrackKind::infer_from_path(".material.opacity"),
            TrackKind::Number
        );
        assert_eq!(TrackKind::infer_from_path(".visible"), TrackKind::Bool);
    }

    #[test]
    fn test_keyframe_partition() {
        let track = KeyframeTrack {
            name: ".position".into(),
            kind: TrackKind::Vector,
            times: vec![0.0, 1.0],
            values: TrackValues::Float(vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0]),
            interpolation: Interpolation::Linear,
        };
        assert_eq!(track.keyframe(1), Some(&[1.0, 2.0, 3.0][..]));
    }
}
