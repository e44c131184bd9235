use crate::nodes::object3d::Object3D;

/// Perspective projection camera. `fov` is the vertical field of view in
/// degrees, as documents store it.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub zoom: f32,
    pub focus: f32,
    pub film_gauge: f32,
    pub film_offset: f32,
    pub base: Object3D,
}

impl PerspectiveCamera {
    pub fn new() -> Self {
        Self {
            fov: 50.0,
            aspect: 1.0,
            near: 0.1,
            far: 2000.0,
            zoom: 1.0,
            focus: 10.0,
            film_gauge: 35.0,
            film_offset: 0.0,
            base: Object3D::new("PerspectiveCamera"),
        }
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new()
    }
}

/// Orthographic projection camera defined by its frustum planes.
#[derive(Clone, Debug)]
pub struct OrthographicCamera {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
    pub zoom: f32,
    pub base: Object3D,
}

impl OrthographicCamera {
    pub fn new() -> Self {
        Self {
            left: -1.0,
            right: 1.0,
            top: 1.0,
            bottom: -1.0,
            near: 0.1,
            far: 2000.0,
            zoom: 1.0,
            base: Object3D::new("OrthographicCamera"),
        }
    }
}

impl Default for OrthographicCamera {
    fn default() -> Self {
        Self::new()
    }
}

crate::impl_base_object!(PerspectiveCamera);
crate::impl_base_object!(OrthographicCamera);
