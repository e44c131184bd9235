use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Unit quaternion, serialized as `[x, y, z, w]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Serialize for Quaternion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [self.x, self.y, self.z, self.w].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Quaternion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let arr = <[f32; 4]>::deserialize(deserializer)?;
        Ok(Quaternion::new(arr[0], arr[1], arr[2], arr[3]))
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Quaternion({}, {}, {}, {})",
            self.x, self.y, self.z, self.w
        )
    }
}

impl Quaternion {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 1.0,
        }
    }

    #[inline(always)]
    pub fn to_glam(self) -> glam::Quat {
        glam::Quat::from_xyzw(self.x, self.y, self.z, self.w)
    }

    #[inline(always)]
    pub fn from_glam(q: glam::Quat) -> Self {
        Self {
            x: q.x,
            y: q.y,
            z: q.z,
            w: q.w,
        }
    }

    /// Build from intrinsic XYZ Euler angles in radians, the order scene
    /// documents use for the `rotation` field.
    pub fn from_euler(x: f32, y: f32, z: f32) -> Self {
        Self::from_glam(glam::Quat::from_euler(glam::EulerRot::XYZ, x, y, z))
    }

    pub fn normalize(&self) -> Self {
        Self::from_glam(self.to_glam().normalize())
    }

    pub fn mul(&self, rhs: Self) -> Self {
        Self::from_glam(self.to_glam() * rhs.to_glam())
    }

    pub fn rotate_vec3(&self, v: super::Vector3) -> super::Vector3 {
        super::Vector3::from_glam(self.to_glam() * v.to_glam())
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}
