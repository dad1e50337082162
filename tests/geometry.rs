use reactor_story::geometry::{cuboid, dodecahedron, icosahedron, Mesh};

fn assert_on_sphere(mesh: &Mesh, radius: f32) {
    for p in &mesh.positions {
        assert!((p.length() - radius).abs() < 1e-4 * radius.max(1.0), "{p} off radius {radius}");
    }
}

fn assert_outward(mesh: &Mesh) {
    for (tri, normals) in mesh.positions.chunks_exact(3).zip(mesh.normals.chunks_exact(3)) {
        let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
        for n in normals {
            assert!(n.dot(centroid) > 0.0, "inward normal {n} at {centroid}");
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }
}

#[test]
fn icosahedron_subdivision_counts() {
    for detail in [0, 1, 2, 5] {
        let mesh = icosahedron(1.0, detail);
        let expected = 20 * (detail as usize + 1).pow(2);
        assert_eq!(mesh.triangle_count(), expected, "detail {detail}");
        assert_eq!(mesh.normals.len(), mesh.vertex_count());
        assert_on_sphere(&mesh, 1.0);
        assert_outward(&mesh);
    }
}

#[test]
fn dodecahedron_subdivision_counts() {
    for detail in [0, 1, 3] {
        let mesh = dodecahedron(2.5, detail);
        assert_eq!(mesh.triangle_count(), 36 * (detail as usize + 1).pow(2), "detail {detail}");
        assert_on_sphere(&mesh, 2.5);
        assert_outward(&mesh);
    }
}

#[test]
fn core_mesh_is_dense() {
    let mesh = icosahedron(1.0, 60);
    assert_eq!(mesh.triangle_count(), 20 * 61 * 61);
    assert_eq!(mesh.position_data().len(), mesh.vertex_count() * 3);
}

#[test]
fn detail_zero_keeps_facets() {
    let mesh = dodecahedron(1.0, 0);
    for normals in mesh.normals.chunks_exact(3) {
        assert_eq!(normals[0], normals[1]);
        assert_eq!(normals[1], normals[2]);
    }
}

#[test]
fn smooth_normals_are_radial_until_flattened() {
    let smooth = dodecahedron(1.0, 1);
    for (p, n) in smooth.positions.iter().zip(&smooth.normals) {
        assert!((*p - *n).length() < 1e-4);
    }

    let flat = smooth.flat_shaded();
    assert_eq!(flat.normals.len(), flat.vertex_count());
    assert_outward(&flat);
    for normals in flat.normals.chunks_exact(3) {
        assert_eq!(normals[0], normals[2]);
    }
}

#[test]
fn cuboid_has_six_outward_faces() {
    let mesh = cuboid(0.08, 0.08, 1.0);
    assert_eq!(mesh.vertex_count(), 36);
    assert_outward(&mesh);
    for p in &mesh.positions {
        assert!((p.x.abs() - 0.04).abs() < 1e-6 || (p.y.abs() - 0.04).abs() < 1e-6 || (p.z.abs() - 0.5).abs() < 1e-6);
        assert!(p.x.abs() <= 0.04 + 1e-6 && p.y.abs() <= 0.04 + 1e-6 && p.z.abs() <= 0.5 + 1e-6);
    }
    // winding agrees with the stored normal
    for (tri, n) in mesh.positions.chunks_exact(3).zip(mesh.normals.chunks_exact(3)) {
        let face = (tri[1] - tri[0]).cross(tri[2] - tri[0]).normalize();
        assert!((face - n[0]).length() < 1e-5);
    }
}
