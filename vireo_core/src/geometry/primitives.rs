//! Parametric primitive tessellation.
//!
//! Each generator produces flat position/normal/uv streams plus a
//! triangle index list; the geometry loader wraps them into a
//! [`BufferGeometry`](super::BufferGeometry) and keeps the constructor
//! parameters verbatim for round-tripping.

use std::f32::consts::PI;

use glam::Vec3;

/// Raw vertex streams shared by all generators.
#[derive(Debug, Default, Clone)]
pub struct PrimitiveData {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub uvs: Vec<f32>,
    pub indices: Vec<u32>,
}

impl PrimitiveData {
    fn push_vertex(&mut self, pos: Vec3, normal: Vec3, uv: [f32; 2]) {
        self.positions.extend_from_slice(&pos.to_array());
        self.normals.extend_from_slice(&normal.to_array());
        self.uvs.extend_from_slice(&uv);
    }

    fn vertex_count(&self) -> u32 {
        (self.positions.len() / 3) as u32
    }
}

pub fn plane(width: f32, height: f32, width_segments: u32, height_segments: u32) -> PrimitiveData {
    let mut data = PrimitiveData::default();
    build_plane(
        &mut data,
        Axis::X,
        Axis::Y,
        Axis::Z,
        1.0,
        -1.0,
        width,
        height,
        0.0,
        width_segments.max(1),
        height_segments.max(1),
    );
    data
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
    Z,
}

fn set_axis(v: &mut Vec3, axis: Axis, value: f32) {
    match axis {
        Axis::X => v.x = value,
        Axis::Y => v.y = value,
        Axis::Z => v.z = value,
    }
}

/// One segmented quad face; the box generator calls this once per side
/// with remapped axes, the plane generator once.
#[allow(clippy::too_many_arguments)]
fn build_plane(
    data: &mut PrimitiveData,
    u_axis: Axis,
    v_axis: Axis,
    w_axis: Axis,
    udir: f32,
    vdir: f32,
    width: f32,
    height: f32,
    depth: f32,
    grid_x: u32,
    grid_y: u32,
) {
    let segment_width = width / grid_x as f32;
    let segment_height = height / grid_y as f32;
    let width_half = width / 2.0;
    let height_half = height / 2.0;
    let depth_half = depth / 2.0;
    let base = data.vertex_count();

    for iy in 0..=grid_y {
        let y = iy as f32 * segment_height - height_half;
        for ix in 0..=grid_x {
            let x = ix as f32 * segment_width - width_half;

            let mut pos = Vec3::ZERO;
            set_axis(&mut pos, u_axis, x * udir);
            set_axis(&mut pos, v_axis, y * vdir);
            set_axis(&mut pos, w_axis, depth_half);

            let mut normal = Vec3::ZERO;
            set_axis(&mut normal, w_axis, if depth >= 0.0 { 1.0 } else { -1.0 });

            let uv = [
                ix as f32 / grid_x as f32,
                1.0 - iy as f32 / grid_y as f32,
            ];
            data.push_vertex(pos, normal, uv);
        }
    }

    let row = grid_x + 1;
    for iy in 0..grid_y {
        for ix in 0..grid_x {
            let a = base + ix + row * iy;
            let b = base + ix + row * (iy + 1);
            let c = base + (ix + 1) + row * (iy + 1);
            let d = base + (ix + 1) + row * iy;
            data.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn cuboid(
    width: f32,
    height: f32,
    depth: f32,
    width_segments: u32,
    height_segments: u32,
    depth_segments: u32,
) -> PrimitiveData {
    let (ws, hs, ds) = (
        width_segments.max(1),
        height_segments.max(1),
        depth_segments.max(1),
    );
    let mut data = PrimitiveData::default();
    // +x, -x
    build_plane(&mut data, Axis::Z, Axis::Y, Axis::X, -1.0, -1.0, depth, height, width, ds, hs);
    build_plane(&mut data, Axis::Z, Axis::Y, Axis::X, 1.0, -1.0, depth, height, -width, ds, hs);
    // +y, -y
    build_plane(&mut data, Axis::X, Axis::Z, Axis::Y, 1.0, 1.0, width, depth, height, ws, ds);
    build_plane(&mut data, Axis::X, Axis::Z, Axis::Y, 1.0, -1.0, width, depth, -height, ws, ds);
    // +z, -z
    build_plane(&mut data, Axis::X, Axis::Y, Axis::Z, 1.0, -1.0, width, height, depth, ws, hs);
    build_plane(&mut data, Axis::X, Axis::Y, Axis::Z, -1.0, -1.0, width, height, -depth, ws, hs);
    data
}

#[allow(clippy::too_many_arguments)]
pub fn sphere(
    radius: f32,
    width_segments: u32,
    height_segments: u32,
    phi_start: f32,
    phi_length: f32,
    theta_start: f32,
    theta_length: f32,
) -> PrimitiveData {
    let lon = width_segments.max(3);
    let lat = height_segments.max(2);
    let mut data = PrimitiveData::default();

    for iy in 0..=lat {
        let v = iy as f32 / lat as f32;
        let theta = theta_start + v * theta_length;
        for ix in 0..=lon {
            let u = ix as f32 / lon as f32;
            let phi = phi_start + u * phi_length;
            let n = Vec3::new(
                -theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            );
            data.push_vertex(n * radius, n, [u, 1.0 - v]);
        }
    }

    let row = lon + 1;
    for iy in 0..lat {
        for ix in 0..lon {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 || theta_start > 0.0 {
                data.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != lat - 1 || theta_start + theta_length < PI {
                data.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    data
}

#[allow(clippy::too_many_arguments)]
pub fn cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
    height_segments: u32,
    open_ended: bool,
    theta_start: f32,
    theta_length: f32,
) -> PrimitiveData {
    let radial = radial_segments.max(3);
    let rows = height_segments.max(1);
    let half_height = height / 2.0;
    let mut data = PrimitiveData::default();

    // torso
    let slope = (radius_bottom - radius_top) / height;
    for iy in 0..=rows {
        let v = iy as f32 / rows as f32;
        let radius = v * (radius_bottom - radius_top) + radius_top;
        for ix in 0..=radial {
            let u = ix as f32 / radial as f32;
            let theta = u * theta_length + theta_start;
            let (sin, cos) = (theta.sin(), theta.cos());
            let pos = Vec3::new(radius * sin, -v * height + half_height, radius * cos);
            let normal = Vec3::new(sin, slope, cos).normalize();
            data.push_vertex(pos, normal, [u, 1.0 - v]);
        }
    }
    let row = radial + 1;
    for iy in 0..rows {
        for ix in 0..radial {
            let a = iy * row + ix;
            let b = (iy + 1) * row + ix;
            let c = (iy + 1) * row + ix + 1;
            let d = iy * row + ix + 1;
            if radius_top > 0.0 {
                data.indices.extend_from_slice(&[a, b, d]);
            }
            if radius_bottom > 0.0 {
                data.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    // caps
    if !open_ended {
        if radius_top > 0.0 {
            build_cap(&mut data, radius_top, half_height, radial, theta_start, theta_length, true);
        }
        if radius_bottom > 0.0 {
            build_cap(&mut data, radius_bottom, -half_height, radial, theta_start, theta_length, false);
        }
    }
    data
}

fn build_cap(
    data: &mut PrimitiveData,
    radius: f32,
    y: f32,
    radial: u32,
    theta_start: f32,
    theta_length: f32,
    top: bool,
) {
    let normal = Vec3::new(0.0, if top { 1.0 } else { -1.0 }, 0.0);
    let center = data.vertex_count();
    data.push_vertex(Vec3::new(0.0, y, 0.0), normal, [0.5, 0.5]);
    for ix in 0..=radial {
        let u = ix as f32 / radial as f32;
        let theta = u * theta_length + theta_start;
        let (sin, cos) = (theta.sin(), theta.cos());
        data.push_vertex(
            Vec3::new(radius * sin, y, radius * cos),
            normal,
            [cos * 0.5 + 0.5, sin * 0.5 * (if top { 1.0 } else { -1.0 }) + 0.5],
        );
    }
    for ix in 0..radial {
        let a = center + 1 + ix;
        let b = center + 2 + ix;
        if top {
            data.indices.extend_from_slice(&[b, a, center]);
        } else {
            data.indices.extend_from_slice(&[a, b, center]);
        }
    }
}

pub fn circle(radius: f32, segments: u32, theta_start: f32, theta_length: f32) -> PrimitiveData {
    let segments = segments.max(3);
    let mut data = PrimitiveData::default();
    let normal = Vec3::Z;
    data.push_vertex(Vec3::ZERO, normal, [0.5, 0.5]);
    for i in 0..=segments {
        let theta = theta_start + i as f32 / segments as f32 * theta_length;
        let pos = Vec3::new(radius * theta.cos(), radius * theta.sin(), 0.0);
        data.push_vertex(pos, normal, [(pos.x / radius + 1.0) / 2.0, (pos.y / radius + 1.0) / 2.0]);
    }
    for i in 1..=segments {
        data.indices.extend_from_slice(&[i, i + 1, 0]);
    }
    data
}

#[allow(clippy::too_many_arguments)]
pub fn ring(
    inner_radius: f32,
    outer_radius: f32,
    theta_segments: u32,
    phi_segments: u32,
    theta_start: f32,
    theta_length: f32,
) -> PrimitiveData {
    let theta_segments = theta_segments.max(3);
    let phi_segments = phi_segments.max(1);
    let mut data = PrimitiveData::default();
    let step = (outer_radius - inner_radius) / phi_segments as f32;

    let mut radius = inner_radius;
    for _ in 0..=phi_segments {
        for t in 0..=theta_segments {
            let segment = theta_start + t as f32 / theta_segments as f32 * theta_length;
            let pos = Vec3::new(radius * segment.cos(), radius * segment.sin(), 0.0);
            data.push_vertex(
                pos,
                Vec3::Z,
                [
                    (pos.x / outer_radius + 1.0) / 2.0,
                    (pos.y / outer_radius + 1.0) / 2.0,
                ],
            );
        }
        radius += step;
    }

    let row = theta_segments + 1;
    for phi in 0..phi_segments {
        let base = phi * row;
        for t in 0..theta_segments {
            let a = base + t;
            let b = base + row + t;
            let c = base + row + t + 1;
            let d = base + t + 1;
            data.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    data
}

pub fn torus(
    radius: f32,
    tube: f32,
    radial_segments: u32,
    tubular_segments: u32,
    arc: f32,
) -> PrimitiveData {
    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);
    let mut data = PrimitiveData::default();

    for j in 0..=radial {
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * arc;
            let v = j as f32 / radial as f32 * PI * 2.0;
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let pos = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            data.push_vertex(
                pos,
                (pos - center).normalize(),
                [i as f32 / tubular as f32, j as f32 / radial as f32],
            );
        }
    }

    let row = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            data.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    data
}

pub fn torus_knot(
    radius: f32,
    tube: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> PrimitiveData {
    let tubular = tubular_segments.max(3);
    let radial = radial_segments.max(3);
    let mut data = PrimitiveData::default();

    let curve = |t: f32| -> Vec3 {
        let qr = q as f32 / p as f32 * t;
        let cs = (2.0 + qr.cos()) * 0.5;
        Vec3::new(cs * t.cos(), cs * t.sin(), qr.sin() * 0.5) * radius
    };

    for i in 0..=tubular {
        let u = i as f32 / tubular as f32 * p as f32 * PI * 2.0;
        let p1 = curve(u);
        let p2 = curve(u + 0.01);

        // Frenet-ish frame
        let t = (p2 - p1).normalize();
        let n = (p2 + p1).normalize();
        let b = t.cross(n).normalize();
        let n = b.cross(t).normalize();

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * PI * 2.0;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            let pos = p1 + n * cx + b * cy;
            data.push_vertex(
                pos,
                (pos - p1).normalize(),
                [i as f32 / tubular as f32, j as f32 / radial as f32],
            );
        }
    }

    let row = radial + 1;
    for j in 1..=tubular {
        for i in 1..=radial {
            let a = row * (j - 1) + (i - 1);
            let b = row * j + (i - 1);
            let c = row * j + i;
            let d = row * (j - 1) + i;
            data.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    data
}

pub fn capsule(radius: f32, length: f32, cap_segments: u32, radial_segments: u32) -> PrimitiveData {
    let caps = cap_segments.max(1);
    let radial = radial_segments.max(3);
    let half = length / 2.0;
    let mut data = PrimitiveData::default();

    // rings from top pole over both hemispheres to bottom pole; the
    // midsection comes out of the seam between the two hemispheres
    let rows = caps * 2 + 1;
    for iy in 0..=rows {
        // theta over a full sphere, with the equator duplicated to insert
        // the straight section
        let (theta, y_offset) = if iy <= caps {
            (iy as f32 / caps as f32 * (PI / 2.0), half)
        } else {
            (((iy - 1) as f32 - caps as f32) / caps as f32 * (PI / 2.0) + PI / 2.0, -half)
        };
        for ix in 0..=radial {
            let u = ix as f32 / radial as f32;
            let phi = u * PI * 2.0;
            let n = Vec3::new(
                theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            );
            let pos = n * radius + Vec3::new(0.0, y_offset, 0.0);
            data.push_vertex(pos, n, [u, 1.0 - iy as f32 / rows as f32]);
        }
    }

    let row = radial + 1;
    for iy in 0..rows {
        for ix in 0..radial {
            let a = iy * row + ix;
            let b = (iy + 1) * row + ix;
            let c = (iy + 1) * row + ix + 1;
            let d = iy * row + ix + 1;
            data.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    data
}

/// Shared builder for the platonic solids: subdivide each face `detail`
/// times and project every vertex onto the sphere of the given radius.
/// Normals point away from the origin.
pub fn polyhedron(vertices: &[f32], indices: &[u32], radius: f32, detail: u32) -> PrimitiveData {
    let mut data = PrimitiveData::default();
    let n = detail + 1;

    let vertex_at = |i: u32| -> Vec3 {
        let i = i as usize * 3;
        Vec3::new(vertices[i], vertices[i + 1], vertices[i + 2])
    };

    for face in indices.chunks_exact(3) {
        let (a, b, c) = (vertex_at(face[0]), vertex_at(face[1]), vertex_at(face[2]));

        // barycentric subdivision of the face
        let mut rows: Vec<Vec<Vec3>> = Vec::new();
        for i in 0..=n {
            let t = i as f32 / n as f32;
            let left = a.lerp(c, t);
            let right = b.lerp(c, t);
            let cols = n - i;
            let mut row = Vec::new();
            for j in 0..=cols {
                if cols == 0 {
                    row.push(left);
                } else {
                    row.push(left.lerp(right, j as f32 / cols as f32));
                }
            }
            rows.push(row);
        }

        let mut push_tri = |p0: Vec3, p1: Vec3, p2: Vec3| {
            for p in [p0, p1, p2] {
                let unit = p.normalize();
                let uv = [
                    unit.z.atan2(unit.x) / (2.0 * PI) + 0.5,
                    1.0 - (unit.y.clamp(-1.0, 1.0).acos() / PI),
                ];
                data.push_vertex(unit * radius, unit, uv);
            }
        };

        for i in 0..n as usize {
            for j in 0..rows[i + 1].len() {
                if j + 1 < rows[i].len() {
                    push_tri(rows[i][j], rows[i][j + 1], rows[i + 1][j]);
                }
                if j + 1 < rows[i + 1].len() {
                    push_tri(rows[i][j + 1], rows[i + 1][j + 1], rows[i + 1][j]);
                }
            }
        }
    }
    data
}

pub fn tetrahedron(radius: f32, detail: u32) -> PrimitiveData {
    let vertices = [
        1.0, 1.0, 1.0, -1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, -1.0,
    ];
    let indices = [2, 1, 0, 0, 3, 2, 1, 3, 0, 2, 3, 1];
    polyhedron(&vertices, &indices, radius, detail)
}

pub fn octahedron(radius: f32, detail: u32) -> PrimitiveData {
    let vertices = [
        1.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0, 0.0, //
        0.0, -1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, -1.0,
    ];
    let indices = [
        0, 2, 4, 0, 4, 3, 0, 3, 5, 0, 5, 2, 1, 2, 5, 1, 5, 3, 1, 3, 4, 1, 4, 2,
    ];
    polyhedron(&vertices, &indices, radius, detail)
}

pub fn icosahedron(radius: f32, detail: u32) -> PrimitiveData {
    let t = (1.0 + 5.0f32.sqrt()) / 2.0;
    let vertices = [
        -1.0, t, 0.0, 1.0, t, 0.0, -1.0, -t, 0.0, 1.0, -t, 0.0, //
        0.0, -1.0, t, 0.0, 1.0, t, 0.0, -1.0, -t, 0.0, 1.0, -t, //
        t, 0.0, -1.0, t, 0.0, 1.0, -t, 0.0, -1.0, -t, 0.0, 1.0,
    ];
    let indices = [
        0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, //
        1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1, 8, //
        3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, //
        4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
    ];
    polyhedron(&vertices, &indices, radius, detail)
}

pub fn dodecahedron(radius: f32, detail: u32) -> PrimitiveData {
    let t = (1.0 + 5.0f32.sqrt()) / 2.0;
    let r = 1.0 / t;
    let vertices = [
        // (±1, ±1, ±1)
        -1.0, -1.0, -1.0, -1.0, -1.0, 1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, //
        1.0, -1.0, -1.0, 1.0, -1.0, 1.0, 1.0, 1.0, -1.0, 1.0, 1.0, 1.0, //
        // (0, ±1/t, ±t)
        0.0, -r, -t, 0.0, -r, t, 0.0, r, -t, 0.0, r, t, //
        // (±1/t, ±t, 0)
        -r, -t, 0.0, -r, t, 0.0, r, -t, 0.0, r, t, 0.0, //
        // (±t, 0, ±1/t)
        -t, 0.0, -r, t, 0.0, -r, -t, 0.0, r, t, 0.0, r,
    ];
    let indices = [
        3, 11, 7, 3, 7, 15, 3, 15, 13, 7, 19, 17, 7, 17, 6, 7, 6, 15, //
        17, 4, 8, 17, 8, 10, 17, 10, 6, 8, 0, 16, 8, 16, 2, 8, 2, 10, //
        0, 12, 1, 0, 1, 18, 0, 18, 16, 6, 10, 2, 6, 2, 13, 6, 13, 15, //
        2, 16, 18, 2, 18, 3, 2, 3, 13, 18, 1, 9, 18, 9, 11, 18, 11, 3, //
        4, 14, 12, 4, 12, 0, 4, 0, 8, 11, 9, 5, 11, 5, 19, 11, 19, 7, //
        19, 5, 14, 19, 14, 4, 19, 4, 17, 1, 12, 14, 1, 14, 5, 1, 5, 9,
    ];
    polyhedron(&vertices, &indices, radius, detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_counts() {
        let data = plane(2.0, 2.0, 1, 1);
        assert_eq!(data.positions.len() / 3, 4);
        assert_eq!(data.indices.len(), 6);
    }

    #[test]
    fn test_cuboid_counts() {
        let data = cuboid(1.0, 1.0, 1.0, 1, 1, 1);
        assert_eq!(data.positions.len() / 3, 24);
        assert_eq!(data.indices.len(), 36);
        // extents
        let max = data
            .positions
            .iter()
            .cloned()
            .fold(f32::MIN, f32::max);
        assert!((max - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_sphere_radius() {
        let data = sphere(2.0, 8, 6, 0.0, PI * 2.0, 0.0, PI);
        for chunk in data.positions.chunks_exact(3) {
            let len = (chunk[0] * chunk[0] + chunk[1] * chunk[1] + chunk[2] * chunk[2]).sqrt();
            assert!((len - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_octahedron_on_sphere() {
        // platonic solids come out as a non-indexed soup: 8 faces, each
        // split into detail+1 squared triangles
        let data = octahedron(1.5, 1);
        assert!(data.indices.is_empty());
        assert_eq!(data.positions.len() / 3, 8 * 4 * 3);
        for chunk in data.positions.chunks_exact(3) {
            let len = (chunk[0] * chunk[0] + chunk[1] * chunk[1] + chunk[2] * chunk[2]).sqrt();
            assert!((len - 1.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_tetrahedron_counts() {
        let data = tetrahedron(1.0, 0);
        assert!(data.indices.is_empty());
        assert_eq!(data.positions.len() / 3, 12);
    }
}
