//! Per-frame animators.
//!
//! Each animator owns its transforms and uniforms and is the only thing that
//! writes them. Apart from [`CameraRig`], every output is a pure function of
//! the scroll offset and the elapsed clock, so scrubbing the page in either
//! direction replays exactly the same frames.

use glam::{Mat4, Vec2, Vec3};

use crate::field::{RayRecord, RockRecord, StarRecord, TunnelRecord};
use crate::math::{damp, finite_or, smoothstep, srgb_hex, Transform};
use crate::phase::{self, ScrollOffset};
use crate::shaders::CrackPalette;

/// Read-only inputs every animator sees for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext {
    pub scroll: ScrollOffset,
    /// Seconds since the experience started.
    pub elapsed: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Pointer in `[-1, 1]²`, y up.
    pub pointer: Vec2,
}

impl FrameContext {
    pub fn at(scroll: f32, elapsed: f32) -> Self {
        Self {
            scroll: ScrollOffset::new(scroll),
            elapsed,
            delta: 0.0,
            pointer: Vec2::ZERO,
        }
    }
}

pub trait Animate {
    fn animate(&mut self, frame: &FrameContext);
}

/// Vertical sway added once a rock has settled after dispersion.
pub const SETTLED_DRIFT: f32 = 0.3;

/// Bound of [`swing_clock`], in seconds.
pub const SWING: f32 = 20.0;

/// Clock for motion whose rate is scaled by the scroll offset.
///
/// Runs at real speed near the start and swings back and forth within
/// `±SWING`, so scrolling never turns an object by more than its rate times
/// `SWING`, however long the page has been open.
pub fn swing_clock(elapsed: f32) -> f32 {
    SWING * (elapsed / SWING).sin()
}

/// Transform of one shell rock for the given frame.
pub fn rock_transform(record: &RockRecord, frame: &FrameContext) -> Transform {
    let implosion = phase::IMPLOSION.range(frame.scroll);
    let dispersion = phase::DISPERSION.range(frame.scroll);
    let time = frame.elapsed;

    let mut position;
    let mut rotation = record.rotation_seed;

    if dispersion > 0.0 {
        let t = smoothstep(0.0, 1.0, dispersion);
        position = record.core_pos.lerp(record.start_pos, t);

        let settle = smoothstep(0.9, 1.0, dispersion);
        position.y += (time + record.start_pos.x).sin() * SETTLED_DRIFT * settle;
    } else {
        position = record.end_pos.lerp(record.core_pos, implosion);

        let orbit = phase::orbit_strength(frame.scroll);
        if orbit > 0.0 {
            let speed = 0.1 + record.start_pos.x % 0.2;
            let angle = swing_clock(time) * speed * orbit;
            let (s, c) = angle.sin_cos();
            let (x, z) = (position.x, position.z);
            position.x = x * c - z * s;
            position.z = x * s + z * c;
        }
    }

    // tumble fades out as the rocks lock into the core
    let tumble = swing_clock(time) * 2.0 * (1.0 - implosion);
    rotation.x += tumble;
    rotation.y += tumble;

    let scale = if implosion < 1.0 {
        record.scale.min(record.scale * implosion * 5.0)
    } else {
        record.scale
    };

    Transform {
        position,
        rotation,
        scale: Vec3::splat(scale),
    }
    .sanitized()
}

/// Rocks that start as a wide debris field, implode into the core and later
/// disperse to their resting places.
pub struct RockShell {
    records: Vec<RockRecord>,
    transforms: Vec<Transform>,
    matrices: Vec<Mat4>,
}

impl RockShell {
    pub fn new(records: Vec<RockRecord>) -> Self {
        let transforms = vec![Transform::default(); records.len()];
        let matrices = vec![Mat4::IDENTITY; records.len()];
        Self {
            records,
            transforms,
            matrices,
        }
    }

    pub fn records(&self) -> &[RockRecord] {
        &self.records
    }

    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    pub fn matrices(&self) -> &[Mat4] {
        &self.matrices
    }
}

impl Animate for RockShell {
    fn animate(&mut self, frame: &FrameContext) {
        for ((record, transform), matrix) in self.records.iter().zip(&mut self.transforms).zip(&mut self.matrices) {
            *transform = rock_transform(record, frame);
            *matrix = transform.matrix();
        }
    }
}

/// Uniforms of the displaced core program.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoreUniforms {
    pub time: f32,
    pub displacement_strength: f32,
    pub palette: CrackPalette,
}

/// The glowing core and its point light, both shrinking away mid-page.
pub struct CoreAnimator {
    pub transform: Transform,
    pub light_intensity: f32,
    pub uniforms: CoreUniforms,
    peak_intensity: f32,
    peak_scale: f32,
}

impl CoreAnimator {
    pub const PEAK_INTENSITY: f32 = 15.0;
    pub const PEAK_SCALE: f32 = 2.0;

    pub fn new(displacement_strength: f32, palette: CrackPalette) -> Self {
        Self {
            transform: Transform::default(),
            light_intensity: Self::PEAK_INTENSITY,
            uniforms: CoreUniforms {
                time: 0.0,
                displacement_strength,
                palette,
            },
            peak_intensity: Self::PEAK_INTENSITY,
            peak_scale: Self::PEAK_SCALE,
        }
    }

    pub fn default_palette() -> CrackPalette {
        CrackPalette {
            color_a: srgb_hex(0x050505),
            color_b: srgb_hex(0x1a1a1a),
            glow: srgb_hex(0xff3300),
        }
    }
}

impl Animate for CoreAnimator {
    fn animate(&mut self, frame: &FrameContext) {
        let fade = phase::CORE_FADE.range(frame.scroll);
        self.light_intensity = (self.peak_intensity * (1.0 - fade)).max(0.0);

        let scale = (self.peak_scale * (1.0 - fade)).max(0.0);
        self.transform = Transform {
            position: Vec3::ZERO,
            rotation: Vec3::new(0.0, frame.elapsed * 0.2, frame.elapsed * 0.1),
            scale: Vec3::splat(scale),
        }
        .sanitized();

        self.uniforms.time = finite_or(frame.elapsed, 0.0);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RayUniforms {
    pub time: f32,
    pub progress: f32,
}

/// Additive streaks fired from the core once it collapses.
pub struct RayBurst {
    records: Vec<RayRecord>,
    pub transform: Transform,
    pub uniforms: RayUniforms,
}

impl RayBurst {
    pub fn new(records: Vec<RayRecord>) -> Self {
        Self {
            records,
            transform: Transform::default(),
            uniforms: RayUniforms::default(),
        }
    }

    pub fn records(&self) -> &[RayRecord] {
        &self.records
    }

    /// Static per-instance matrices, uploaded once.
    pub fn instance_matrices(&self) -> Vec<Mat4> {
        self.records
            .iter()
            .map(|r| Mat4::from_rotation_translation(r.orientation, r.position))
            .collect()
    }

    pub fn speeds(&self) -> Vec<f32> {
        self.records.iter().map(|r| r.speed).collect()
    }

    pub fn lengths(&self) -> Vec<f32> {
        self.records.iter().map(|r| r.length).collect()
    }

    pub fn phases(&self) -> Vec<f32> {
        self.records.iter().map(|r| r.phase).collect()
    }
}

impl Animate for RayBurst {
    fn animate(&mut self, frame: &FrameContext) {
        self.uniforms.time = frame.elapsed;
        self.uniforms.progress = phase::RAYS.eased(frame.scroll);
        self.transform = Transform {
            rotation: Vec3::new(0.0, frame.elapsed * 0.12, frame.elapsed * 0.06),
            ..Transform::default()
        }
        .sanitized();
    }
}

/// Slowly tumbling asteroids lining the background tunnel.
pub struct TunnelField {
    records: Vec<TunnelRecord>,
    matrices: Vec<Mat4>,
}

impl TunnelField {
    pub fn new(records: Vec<TunnelRecord>) -> Self {
        let matrices = records.iter().map(|r| r.transform.matrix()).collect();
        Self { records, matrices }
    }

    pub fn matrices(&self) -> &[Mat4] {
        &self.matrices
    }
}

impl Animate for TunnelField {
    fn animate(&mut self, frame: &FrameContext) {
        for (record, matrix) in self.records.iter().zip(&mut self.matrices) {
            let transform = Transform {
                rotation: record.transform.rotation + record.spin * frame.elapsed,
                ..record.transform
            }
            .sanitized();
            *matrix = transform.matrix();
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StarUniforms {
    pub time: f32,
}

/// Star shell turning slowly behind everything.
pub struct StarField {
    records: Vec<StarRecord>,
    speed: f32,
    pub transform: Transform,
    pub uniforms: StarUniforms,
}

impl StarField {
    pub fn new(records: Vec<StarRecord>, speed: f32) -> Self {
        Self {
            records,
            speed,
            transform: Transform::default(),
            uniforms: StarUniforms::default(),
        }
    }

    pub fn records(&self) -> &[StarRecord] {
        &self.records
    }
}

impl Animate for StarField {
    fn animate(&mut self, frame: &FrameContext) {
        self.transform.rotation = Vec3::new(frame.elapsed * 0.05, frame.elapsed * 0.02, 0.0);
        self.transform = self.transform.sanitized();
        self.uniforms.time = frame.elapsed * self.speed;
    }
}

/// Camera with a scroll-driven vertical glide and pointer parallax.
///
/// The only animator that keeps state between frames: it eases toward its
/// targets so pointer jitter does not reach the picture.
pub struct CameraRig {
    pub camera: Transform,
    /// Rotation of the group that holds the story objects.
    pub scene_group: Transform,
}

impl CameraRig {
    pub fn new(position: Vec3) -> Self {
        Self {
            camera: Transform::from_position(position),
            scene_group: Transform::default(),
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        let rotation = self.camera.quat();
        Mat4::from_rotation_translation(rotation, self.camera.position).inverse()
    }
}

impl Animate for CameraRig {
    fn animate(&mut self, frame: &FrameContext) {
        let progress = phase::FULL.range(frame.scroll);

        let camera = &mut self.camera;
        camera.position.y = damp(camera.position.y, -progress * 2.0, frame.delta * 3.0);
        camera.rotation.x = damp(camera.rotation.x, frame.pointer.y * 0.1, frame.delta * 2.0);
        camera.rotation.y = damp(camera.rotation.y, -frame.pointer.x * 0.1, frame.delta * 2.0);
        *camera = camera.sanitized();

        self.scene_group.rotation.z = progress * 0.2;
        self.scene_group = self.scene_group.sanitized();
    }
}
