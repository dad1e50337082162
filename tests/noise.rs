use glam::Vec3;
use reactor_story::animate::CoreAnimator;
use reactor_story::noise::simplex3;
use reactor_story::shaders::{crack_color, displace, displacement_noise};

fn grid(step: f32, extent: i32) -> impl Iterator<Item = Vec3> {
    (-extent..=extent).flat_map(move |x| {
        (-extent..=extent)
            .flat_map(move |y| (-extent..=extent).map(move |z| Vec3::new(x as f32, y as f32, z as f32) * step))
    })
}

#[test]
fn simplex_is_deterministic() {
    for p in grid(0.37, 4) {
        assert_eq!(simplex3(p).to_bits(), simplex3(p).to_bits(), "at {p}");
    }
}

#[test]
fn simplex_is_bounded() {
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for p in grid(0.13, 20) {
        let n = simplex3(p + Vec3::new(0.031, -0.017, 0.005));
        assert!(n.is_finite(), "at {p}");
        assert!(n.abs() <= 1.1, "{n} at {p}");
        min = min.min(n);
        max = max.max(n);
    }
    // uses most of the range
    assert!(min < -0.5 && max > 0.5, "range {min}..{max}");
}

#[test]
fn simplex_is_continuous() {
    // lattice ties on the main diagonal are the one place the corner order flips
    let jitter = Vec3::new(0.0123, -0.0371, 0.0057);
    let eps = 1e-3;
    for p in grid(0.29, 6).map(|p| p + jitter) {
        let n = simplex3(p);
        for dir in [Vec3::X, Vec3::Y, Vec3::Z, Vec3::ONE.normalize()] {
            let m = simplex3(p + dir * eps);
            assert!((n - m).abs() < 0.02, "jump {n} -> {m} at {p} along {dir}");
        }
    }
}

#[test]
fn displacement_moves_along_normal() {
    let p = Vec3::new(0.3, 0.8, -0.52).normalize();
    let (moved, n) = displace(p, p, 1.5, 0.8);
    assert!((n - displacement_noise(p, 1.5)).abs() < 1e-6);
    let offset = moved - p;
    assert!(offset.cross(p).length() < 1e-5, "offset not along normal: {offset}");
    assert!((offset.length() - (n * 0.8).abs()).abs() < 1e-5);

    let (still, _) = displace(p, p, 1.5, 0.0);
    assert_eq!(still, p);
}

#[test]
fn cracks_glow_and_surface_stays_dark() {
    let palette = CoreAnimator::default_palette();

    // deep in a crack: pure glow at five times the glow colour
    let crack = crack_color(-0.9, &palette);
    assert!((crack - palette.glow * 5.0).length() < 1e-5, "{crack}");

    // high ground: plain surface between the two rock colours
    let surface = crack_color(0.8, &palette);
    let expected = palette.color_a.lerp(palette.color_b, 0.9);
    assert!((surface - expected).length() < 1e-5, "{surface}");
    assert!(surface.max_element() < 0.05);

    assert!(crack_color(-0.1, &palette).x > surface.x);
}
