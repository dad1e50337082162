//! Randomised layouts for instanced fields: the imploding rock shell, the
//! asteroid tunnel, the explosion rays and the star shell.
//!
//! Layouts are drawn once at mount. By default the RNG is seeded from entropy
//! so every page load gets a fresh arrangement; passing a seed makes a layout
//! reproducible.

use std::f32::consts::{PI, TAU};

use glam::{Quat, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::math::{srgb_to_linear, Transform};

/// Entropy-seeded unless `seed` is given.
pub fn rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

/// Spatial policy for sampling instance positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Distribution {
    /// Each axis uniform in `±extent / 2`.
    UniformCube { extent: Vec3 },
    /// Uniform in volume between two radii; `inner = 0` is a solid ball.
    Shell { inner: f32, outer: f32 },
    /// Radius uniform between the two radii, so density rises toward the
    /// inner surface.
    LinearShell { inner: f32, outer: f32 },
    /// Points around the z axis, excluded from a central hole. Radius is
    /// `hole_radius + u^falloff * band`, so larger falloffs pack instances
    /// into an inner layer with a sparse outer one.
    Tunnel {
        hole_radius: f32,
        band: f32,
        falloff: f32,
        z_near: f32,
        depth: f32,
    },
}

impl Distribution {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        match *self {
            Distribution::UniformCube { extent } => Vec3::new(
                (rng.gen::<f32>() - 0.5) * extent.x,
                (rng.gen::<f32>() - 0.5) * extent.y,
                (rng.gen::<f32>() - 0.5) * extent.z,
            ),
            Distribution::Shell { inner, outer } => {
                let (i3, o3) = (inner.powi(3), outer.powi(3));
                let r = (i3 + rng.gen::<f32>() * (o3 - i3)).cbrt();
                unit_direction(rng) * r
            }
            Distribution::LinearShell { inner, outer } => {
                let r = inner + rng.gen::<f32>() * (outer - inner);
                unit_direction(rng) * r
            }
            Distribution::Tunnel {
                hole_radius,
                band,
                falloff,
                z_near,
                depth,
            } => {
                let z = z_near - rng.gen::<f32>() * depth;
                let angle = rng.gen::<f32>() * TAU;
                let radius = hole_radius + rng.gen::<f32>().powf(falloff) * band;
                Vec3::new(angle.cos() * radius, angle.sin() * radius, z)
            }
        }
    }

    /// Radial bounds every sample satisfies, measured from the origin (or from
    /// the z axis for the tunnel).
    pub fn radius_bounds(&self) -> (f32, f32) {
        match *self {
            Distribution::UniformCube { extent } => (0.0, (extent * 0.5).length()),
            Distribution::Shell { inner, outer } | Distribution::LinearShell { inner, outer } => (inner, outer),
            Distribution::Tunnel { hole_radius, band, .. } => (hole_radius, hole_radius + band),
        }
    }
}

/// Uniform direction on the unit sphere.
fn unit_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
}

/// Exactly `count` positions drawn from `distribution`.
pub fn generate_positions<R: Rng + ?Sized>(count: usize, distribution: &Distribution, rng: &mut R) -> Vec<Vec3> {
    (0..count).map(|_| distribution.sample(rng)).collect()
}

/// One rock of the imploding shell: three authored anchors it travels between.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RockRecord {
    /// Resting place after dispersion.
    pub start_pos: Vec3,
    /// Slot inside the assembled core.
    pub core_pos: Vec3,
    /// Wide debris field at the top of the page.
    pub end_pos: Vec3,
    pub scale: f32,
    pub rotation_seed: Vec3,
}

pub const ROCK_START: Distribution = Distribution::UniformCube {
    extent: Vec3::new(40.0, 40.0, 20.0),
};
pub const ROCK_CORE: Distribution = Distribution::UniformCube { extent: Vec3::splat(3.0) };
pub const ROCK_END: Distribution = Distribution::UniformCube { extent: Vec3::splat(80.0) };

pub fn rock_records<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<RockRecord> {
    (0..count)
        .map(|_| RockRecord {
            start_pos: ROCK_START.sample(rng),
            core_pos: ROCK_CORE.sample(rng),
            end_pos: ROCK_END.sample(rng),
            scale: 0.2 + rng.gen::<f32>() * 0.8,
            rotation_seed: Vec3::new(rng.gen::<f32>() * PI, rng.gen::<f32>() * PI, rng.gen::<f32>() * PI),
        })
        .collect()
}

/// A tumbling asteroid of the background tunnel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TunnelRecord {
    pub transform: Transform,
    /// Angular velocity per Euler axis, radians per second.
    pub spin: Vec3,
}

pub const TUNNEL: Distribution = Distribution::Tunnel {
    hole_radius: 5.0,
    band: 20.0,
    falloff: 2.0,
    z_near: 30.0,
    depth: 250.0,
};

pub fn tunnel_records<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<TunnelRecord> {
    (0..count)
        .map(|_| {
            let position = TUNNEL.sample(rng);
            let rotation = Vec3::new(rng.gen::<f32>() * PI, rng.gen::<f32>() * PI, rng.gen::<f32>() * PI);
            let scale = 1.0 + rng.gen::<f32>() * 5.0;
            let spin = Vec3::new(
                (rng.gen::<f32>() - 0.5) * 0.2,
                (rng.gen::<f32>() - 0.5) * 0.2,
                (rng.gen::<f32>() - 0.5) * 0.2,
            );
            TunnelRecord {
                transform: Transform {
                    position,
                    rotation,
                    scale: Vec3::splat(scale),
                },
                spin,
            }
        })
        .collect()
}

/// One streak of the explosion burst.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayRecord {
    pub position: Vec3,
    pub orientation: Quat,
    pub speed: f32,
    pub length: f32,
    pub phase: f32,
}

pub const RAY_BALL: Distribution = Distribution::Shell { inner: 0.0, outer: 0.5 };

/// Rays start inside a small ball and point away from its centre, with a
/// little roll and pitch so the burst does not look combed.
pub fn ray_records<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<RayRecord> {
    (0..count)
        .map(|_| {
            let speed = 0.2 + rng.gen::<f32>() * 2.0;
            let length = 1.0 + rng.gen::<f32>() * 8.0;
            let phase = rng.gen::<f32>();

            let position = RAY_BALL.sample(rng);
            let outward = position.try_normalize().unwrap_or(Vec3::Z);
            let orientation = Quat::from_rotation_arc(Vec3::Z, outward)
                * Quat::from_rotation_z(rng.gen::<f32>() * 0.2)
                * Quat::from_rotation_x((rng.gen::<f32>() - 0.5) * 0.1);

            RayRecord {
                position,
                orientation,
                speed,
                length,
                phase,
            }
        })
        .collect()
}

/// A point of the star shell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarRecord {
    pub position: Vec3,
    pub color: Vec3,
    pub size: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarShell {
    pub radius: f32,
    pub depth: f32,
    pub factor: f32,
}

impl Default for StarShell {
    fn default() -> Self {
        Self {
            radius: 150.0,
            depth: 100.0,
            factor: 6.0,
        }
    }
}

/// Desaturated stars at 90% lightness.
///
/// Radii start at the outer edge and step inward by a random fraction of
/// `depth / count` per star, so the shell fills from outside in and the
/// innermost stars sit about halfway through `depth`.
pub fn star_records<R: Rng + ?Sized>(count: usize, shell: &StarShell, rng: &mut R) -> Vec<StarRecord> {
    let grey = Vec3::splat(srgb_to_linear(0.9));
    let step = shell.depth / count.max(1) as f32;
    let mut radius = shell.radius + shell.depth;
    (0..count)
        .map(|_| {
            radius -= step * rng.gen::<f32>();
            StarRecord {
                position: unit_direction(rng) * radius,
                color: grey,
                size: (0.5 + 0.5 * rng.gen::<f32>()) * shell.factor,
            }
        })
        .collect()
}
