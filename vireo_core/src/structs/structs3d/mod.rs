pub mod quaternion;
pub mod transform3d;
pub mod vector3;

pub use quaternion::Quaternion;
pub use transform3d::Transform3D;
pub use vector3::Vector3;
