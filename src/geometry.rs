//! CPU-side mesh builders. Meshes are non-indexed triangle lists with
//! interleaved-free position / normal arrays, ready for `drawArrays`.

use glam::Vec3;

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Replaces the normals with one face normal per triangle.
    pub fn flat_shaded(mut self) -> Self {
        self.normals = self
            .positions
            .chunks_exact(3)
            .flat_map(|tri| {
                let n = (tri[1] - tri[0]).cross(tri[2] - tri[0]).normalize_or_zero();
                [n, n, n]
            })
            .collect();
        self
    }

    pub fn position_data(&self) -> Vec<f32> {
        flatten(&self.positions)
    }

    pub fn normal_data(&self) -> Vec<f32> {
        flatten(&self.normals)
    }
}

fn flatten(v: &[Vec3]) -> Vec<f32> {
    v.iter().flat_map(|p| p.to_array()).collect()
}

/// Subdivides every face of a base polyhedron into `(detail + 1)²` triangles
/// and projects the vertices onto a sphere of `radius`.
///
/// Detail 0 keeps hard facets (face normals); any subdivision yields a
/// sphere-like surface with radial normals.
pub fn polyhedron(vertices: &[Vec3], indices: &[usize], radius: f32, detail: u32) -> Mesh {
    let mut positions = Vec::with_capacity(indices.len() * (detail as usize + 1).pow(2));
    for face in indices.chunks_exact(3) {
        subdivide_face(vertices[face[0]], vertices[face[1]], vertices[face[2]], detail, &mut positions);
    }
    for p in &mut positions {
        *p = p.normalize() * radius;
    }

    let mesh = Mesh {
        normals: Vec::new(),
        positions,
    };
    if detail == 0 {
        mesh.flat_shaded()
    } else {
        let normals = mesh.positions.iter().map(|p| p.normalize()).collect();
        Mesh { normals, ..mesh }
    }
}

fn subdivide_face(a: Vec3, b: Vec3, c: Vec3, detail: u32, out: &mut Vec<Vec3>) {
    let cols = detail as usize + 1;

    // v[i][j]: row i walks from edge a-b toward c
    let mut v: Vec<Vec<Vec3>> = Vec::with_capacity(cols + 1);
    for i in 0..=cols {
        let t = i as f32 / cols as f32;
        let aj = a.lerp(c, t);
        let bj = b.lerp(c, t);
        let rows = cols - i;
        let row = (0..=rows)
            .map(|j| if rows == 0 { aj } else { aj.lerp(bj, j as f32 / rows as f32) })
            .collect();
        v.push(row);
    }

    for i in 0..cols {
        for j in 0..2 * (cols - i) - 1 {
            let k = j / 2;
            if j % 2 == 0 {
                out.extend([v[i][k + 1], v[i + 1][k], v[i][k]]);
            } else {
                out.extend([v[i][k + 1], v[i + 1][k + 1], v[i + 1][k]]);
            }
        }
    }
}

const PHI: f32 = 1.618_034;

pub fn icosahedron(radius: f32, detail: u32) -> Mesh {
    let t = PHI;
    let vertices = [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ];
    #[rustfmt::skip]
    let indices = [
        0, 11, 5,   0, 5, 1,    0, 1, 7,    0, 7, 10,   0, 10, 11,
        1, 5, 9,    5, 11, 4,   11, 10, 2,  10, 7, 6,   7, 1, 8,
        3, 9, 4,    3, 4, 2,    3, 2, 6,    3, 6, 8,    3, 8, 9,
        4, 9, 5,    2, 4, 11,   6, 2, 10,   8, 6, 7,    9, 8, 1,
    ];
    polyhedron(&vertices, &indices, radius, detail)
}

pub fn dodecahedron(radius: f32, detail: u32) -> Mesh {
    let t = PHI;
    let r = 1.0 / t;
    let vertices = [
        // (±1, ±1, ±1)
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, 1.0, 1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(1.0, 1.0, 1.0),
        // (0, ±1/φ, ±φ)
        Vec3::new(0.0, -r, -t),
        Vec3::new(0.0, -r, t),
        Vec3::new(0.0, r, -t),
        Vec3::new(0.0, r, t),
        // (±1/φ, ±φ, 0)
        Vec3::new(-r, -t, 0.0),
        Vec3::new(-r, t, 0.0),
        Vec3::new(r, -t, 0.0),
        Vec3::new(r, t, 0.0),
        // (±φ, 0, ±1/φ)
        Vec3::new(-t, 0.0, -r),
        Vec3::new(t, 0.0, -r),
        Vec3::new(-t, 0.0, r),
        Vec3::new(t, 0.0, r),
    ];
    #[rustfmt::skip]
    let indices = [
        3, 11, 7,   3, 7, 15,   3, 15, 13,
        7, 19, 17,  7, 17, 6,   7, 6, 15,
        17, 4, 8,   17, 8, 10,  17, 10, 6,
        8, 0, 16,   8, 16, 2,   8, 2, 10,
        0, 12, 1,   0, 1, 18,   0, 18, 16,
        6, 10, 2,   6, 2, 13,   6, 13, 15,
        2, 16, 18,  2, 18, 3,   2, 3, 13,
        18, 1, 9,   18, 9, 11,  18, 11, 3,
        4, 14, 12,  4, 12, 0,   4, 0, 8,
        11, 9, 5,   11, 5, 19,  11, 19, 7,
        19, 5, 14,  19, 14, 4,  19, 4, 17,
        1, 12, 14,  1, 14, 5,   1, 5, 9,
    ];
    polyhedron(&vertices, &indices, radius, detail)
}

/// Axis-aligned box centred on the origin.
pub fn cuboid(width: f32, height: f32, depth: f32) -> Mesh {
    let h = Vec3::new(width, height, depth) * 0.5;
    let mut positions = Vec::with_capacity(36);
    let mut normals = Vec::with_capacity(36);

    // (normal, u axis, v axis) per face, u × v = normal
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    for (n, u, v) in faces {
        let corner = |su: f32, sv: f32| (n + u * su + v * sv) * h;
        let (a, b, c, d) = (corner(-1.0, -1.0), corner(1.0, -1.0), corner(1.0, 1.0), corner(-1.0, 1.0));
        positions.extend([a, b, c, a, c, d]);
        normals.extend([n; 6]);
    }

    Mesh { positions, normals }
}
