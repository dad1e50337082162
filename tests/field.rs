use glam::{Vec2, Vec3};
use reactor_story::field::{
    generate_positions, ray_records, rng, rock_records, star_records, tunnel_records, Distribution, StarShell, RAY_BALL,
    ROCK_CORE, ROCK_END, ROCK_START, TUNNEL,
};

const TOLERANCE: f32 = 1e-3;

fn within_cube(p: Vec3, extent: Vec3) -> bool {
    (p.abs() - extent * 0.5).max_element() <= TOLERANCE
}

#[test]
fn exact_counts() {
    let mut rng = rng(Some(1));
    for count in [0, 1, 7, 80, 600] {
        assert_eq!(rock_records(count, &mut rng).len(), count);
        assert_eq!(tunnel_records(count, &mut rng).len(), count);
        assert_eq!(ray_records(count, &mut rng).len(), count);
        assert_eq!(star_records(count, &StarShell::default(), &mut rng).len(), count);
        assert_eq!(generate_positions(count, &TUNNEL, &mut rng).len(), count);
    }
}

#[test]
fn shells_respect_radii() {
    let mut rng = rng(Some(2));
    let distributions = [
        Distribution::Shell { inner: 0.0, outer: 0.5 },
        Distribution::Shell { inner: 3.0, outer: 4.0 },
        Distribution::LinearShell { inner: 150.0, outer: 250.0 },
    ];
    for distribution in distributions {
        let (inner, outer) = distribution.radius_bounds();
        for p in generate_positions(2000, &distribution, &mut rng) {
            let r = p.length();
            assert!(r >= inner - TOLERANCE && r <= outer + TOLERANCE, "{distribution:?}: r={r}");
        }
    }
}

#[test]
fn tunnel_keeps_its_hole_open() {
    let mut rng = rng(Some(3));
    let Distribution::Tunnel { z_near, depth, .. } = TUNNEL else {
        unreachable!()
    };
    let (hole, outer) = TUNNEL.radius_bounds();
    assert_eq!((hole, outer), (5.0, 25.0));

    let positions = generate_positions(3000, &TUNNEL, &mut rng);
    for p in &positions {
        let r = Vec2::new(p.x, p.y).length();
        assert!(r >= hole - TOLERANCE && r <= outer + TOLERANCE, "r={r}");
        assert!(p.z <= z_near + TOLERANCE && p.z >= z_near - depth - TOLERANCE, "z={}", p.z);
    }

    // squared falloff crowds the inner half of the band
    let inner = positions
        .iter()
        .filter(|p| Vec2::new(p.x, p.y).length() < hole + 10.0)
        .count();
    assert!(inner > positions.len() * 6 / 10, "{inner} of {}", positions.len());
}

#[test]
fn rock_anchors_stay_in_their_boxes() {
    let mut rng = rng(Some(4));
    for record in rock_records(500, &mut rng) {
        let extent = |d: Distribution| match d {
            Distribution::UniformCube { extent } => extent,
            _ => unreachable!(),
        };
        assert!(within_cube(record.start_pos, extent(ROCK_START)), "{:?}", record.start_pos);
        assert!(within_cube(record.core_pos, extent(ROCK_CORE)), "{:?}", record.core_pos);
        assert!(within_cube(record.end_pos, extent(ROCK_END)), "{:?}", record.end_pos);
        assert!((0.2..=1.0).contains(&record.scale));
        assert!(record.rotation_seed.min_element() >= 0.0);
        assert!(record.rotation_seed.max_element() <= std::f32::consts::PI);
    }
}

#[test]
fn rays_point_outward() {
    let mut rng = rng(Some(5));
    let (_, outer) = RAY_BALL.radius_bounds();
    for ray in ray_records(200, &mut rng) {
        assert!(ray.position.length() <= outer + TOLERANCE);
        assert!((0.2..=2.2).contains(&ray.speed));
        assert!((1.0..=9.0).contains(&ray.length));
        assert!((0.0..=1.0).contains(&ray.phase));

        if ray.position.length() > 0.05 {
            let axis = ray.orientation * Vec3::Z;
            // roll keeps the axis, pitch tilts it by at most 0.05 rad
            assert!(axis.dot(ray.position.normalize()) > 0.99, "axis {axis} at {}", ray.position);
        }
    }
}

#[test]
fn stars_are_grey_and_sized_by_factor() {
    let mut rng = rng(Some(6));
    let shell = StarShell::default();
    for star in star_records(300, &shell, &mut rng) {
        let r = star.position.length();
        assert!(r >= shell.radius - TOLERANCE && r <= shell.radius + shell.depth + TOLERANCE);
        assert_eq!(star.color.x, star.color.y);
        assert_eq!(star.color.y, star.color.z);
        assert!(star.size >= 0.5 * shell.factor && star.size <= shell.factor);
    }
}

#[test]
fn stars_fill_the_shell_from_the_outside_in() {
    let mut rng = rng(Some(11));
    let shell = StarShell::default();
    let stars = star_records(600, &shell, &mut rng);
    let radii: Vec<f32> = stars.iter().map(|s| s.position.length()).collect();

    assert!(radii[0] <= shell.radius + shell.depth + TOLERANCE);
    for pair in radii.windows(2) {
        assert!(pair[1] <= pair[0] + TOLERANCE, "{pair:?}");
    }
    // each step averages half of depth / count
    let innermost = radii[radii.len() - 1];
    assert!(innermost > shell.radius + shell.depth * 0.4, "{innermost}");
    assert!(innermost < shell.radius + shell.depth * 0.6, "{innermost}");
}

#[test]
fn tunnel_records_follow_authored_ranges() {
    let mut rng = rng(Some(7));
    for record in tunnel_records(300, &mut rng) {
        let s = record.transform.scale;
        assert!(s.x == s.y && s.y == s.z);
        assert!((1.0..=6.0).contains(&s.x));
        assert!(record.spin.abs().max_element() <= 0.1);
    }
}

#[test]
fn seeded_layouts_repeat() {
    let a = rock_records(80, &mut rng(Some(42)));
    let b = rock_records(80, &mut rng(Some(42)));
    let c = rock_records(80, &mut rng(Some(43)));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn unseeded_layouts_vary() {
    let a = rock_records(80, &mut rng(None));
    let b = rock_records(80, &mut rng(None));
    assert_ne!(a, b);
}
