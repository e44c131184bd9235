use glam::Mat4;
use serde::{Deserialize, Serialize};

use super::{Quaternion, Vector3};

fn default_position() -> Vector3 {
    Vector3::zero()
}
fn is_default_position(v: &Vector3) -> bool {
    *v == default_position()
}

fn default_rotation() -> Quaternion {
    Quaternion::identity()
}
fn is_default_rotation(v: &Quaternion) -> bool {
    *v == default_rotation()
}

fn default_scale() -> Vector3 {
    Vector3::one()
}
fn is_default_scale(v: &Vector3) -> bool {
    *v == default_scale()
}

/// Local transform of a scene object.
///
/// A document carries either these three fields explicitly or a single
/// composed column-major 4x4 matrix; the matrix form is decomposed into
/// position/rotation/scale on load via [`Transform3D::from_mat4`].
#[derive(Serialize, Deserialize, Clone, Debug, Copy, PartialEq)]
pub struct Transform3D {
    #[serde(
        default = "default_position",
        skip_serializing_if = "is_default_position"
    )]
    pub position: Vector3,

    #[serde(
        default = "default_rotation",
        skip_serializing_if = "is_default_rotation"
    )]
    pub rotation: Quaternion,

    #[serde(default = "default_scale", skip_serializing_if = "is_default_scale")]
    pub scale: Vector3,
}

impl Transform3D {
    pub fn new(position: Vector3, rotation: Quaternion, scale: Vector3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Check whether all components are default.
    pub fn is_default(&self) -> bool {
        is_default_position(&self.position)
            && is_default_rotation(&self.rotation)
            && is_default_scale(&self.scale)
    }

    /// Converts to a `glam::Mat4` (Scale -> Rotate -> Translate)
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale.to_glam(),
            self.rotation.to_glam(),
            self.position.to_glam(),
        )
    }

    /// Converts a `Mat4` back into a `Transform3D`
    /// (approximation for non-uniform scaling)
    pub fn from_mat4(mat: Mat4) -> Self {
        let position = Vector3::from_glam(mat.w_axis.truncate());

        // extract basis vectors -> scale
        let sx = mat.x_axis.truncate().length();
        let sy = mat.y_axis.truncate().length();
        let sz = mat.z_axis.truncate().length();
        let scale = Vector3::new(sx, sy, sz);

        // normalize matrix for rotation extraction
        let rot_mat = Mat4::from_cols(
            mat.x_axis / sx,
            mat.y_axis / sy,
            mat.z_axis / sz,
            glam::Vec4::W,
        );
        let rotation = Quaternion::from_glam(glam::Quat::from_mat4(&rot_mat));

        Transform3D {
            position,
            rotation,
            scale,
        }
    }

    /// Decompose a flat column-major 16-element array, the wire form of
    /// the `matrix` field.
    pub fn from_cols_array(cols: &[f32; 16]) -> Self {
        Self::from_mat4(Mat4::from_cols_array(cols))
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            position: default_position(),
            rotation: default_rotation(),
            scale: default_scale(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_translation_and_scale() {
        let mat = Mat4::from_scale_rotation_translation(
            glam::Vec3::new(2.0, 2.0, 2.0),
            glam::Quat::IDENTITY,
            glam::Vec3::new(5.0, 10.0, 15.0),
        );
        let t = Transform3D::from_mat4(mat);
        assert_eq!(t.position, Vector3::new(5.0, 10.0, 15.0));
        assert_eq!(t.scale, Vector3::new(2.0, 2.0, 2.0));
        assert_eq!(t.rotation, Quaternion::identity());
    }

    #[test]
    fn test_roundtrip_through_mat4() {
        let t = Transform3D::new(
            Vector3::new(1.0, -2.0, 3.0),
            Quaternion::from_euler(0.3, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
        );
        let back = Transform3D::from_mat4(t.to_mat4());
        assert!((back.position.x - 1.0).abs() < 1e-5);
        assert!((back.rotation.x - t.rotation.x).abs() < 1e-5);
        assert!((back.rotation.w - t.rotation.w).abs() < 1e-5);
    }
}
