//! Scene composition: camera, lights, post effects and the animators that
//! make up the story, assembled once from a [`SceneConfig`].

use glam::{Mat4, Vec3};

use crate::animate::{Animate, CameraRig, CoreAnimator, FrameContext, RayBurst, RockShell, StarField, TunnelField};
use crate::config::{PostConfig, SceneConfig};
use crate::error::{Result, VizError};
use crate::field::{self, StarShell};
use crate::math::{parse_hex_color, srgb_hex};
use crate::shaders::{CrackPalette, MAX_POINT_LIGHTS};

pub fn color(hex: &str) -> Result<Vec3> {
    parse_hex_color(hex).ok_or_else(|| VizError::InvalidColor(hex.to_owned()))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Perspective {
    /// Vertical field of view, radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Perspective {
    pub fn projection(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        Mat4::perspective_rh_gl(self.fov_y, aspect, self.near, self.far)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector pointing from the surface toward the light.
    pub direction: Vec3,
    /// Colour pre-multiplied by intensity.
    pub radiance: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub radiance: Vec3,
    /// Cutoff distance, 0 for none.
    pub distance: f32,
    pub decay: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Lights {
    pub ambient: Vec3,
    pub directional: DirectionalLight,
    /// Fixed fill lights; the core light is appended per frame.
    pub fills: Vec<PointLight>,
}

impl Lights {
    fn cinematic() -> Self {
        Self {
            ambient: Vec3::ONE * 0.1,
            directional: DirectionalLight {
                direction: Vec3::new(10.0, 10.0, 5.0).normalize(),
                radiance: Vec3::ONE * 4.0,
            },
            fills: vec![
                // teal rim
                PointLight {
                    position: Vec3::new(-10.0, 0.0, -20.0),
                    radiance: srgb_hex(0x00f0ff) * 2.0,
                    distance: 50.0,
                    decay: 2.0,
                },
                // magenta contrast
                PointLight {
                    position: Vec3::new(10.0, -10.0, -50.0),
                    radiance: srgb_hex(0xff00ff),
                    distance: 50.0,
                    decay: 2.0,
                },
            ],
        }
    }
}

/// Core light description; intensity comes from [`CoreAnimator`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoreLight {
    pub color: Vec3,
    pub distance: f32,
    pub decay: f32,
}

pub struct Scene {
    pub background: Vec3,
    pub perspective: Perspective,
    pub lights: Lights,
    pub core_light: CoreLight,
    pub post: PostConfig,
    pub core_detail: u32,

    pub rig: CameraRig,
    pub core: CoreAnimator,
    pub rays: RayBurst,
    pub shell: RockShell,
    pub tunnel: TunnelField,
    pub stars: StarField,
}

impl Scene {
    pub fn new(config: &SceneConfig) -> Result<Self> {
        let mut rng = field::rng(config.seed);
        let counts = &config.counts;

        let palette = CrackPalette {
            color_a: color(&config.core.color_a)?,
            color_b: color(&config.core.color_b)?,
            glow: color(&config.core.glow)?,
        };
        let shell = StarShell {
            radius: config.stars.radius,
            depth: config.stars.depth,
            factor: config.stars.factor,
        };

        let scene = Self {
            background: color(&config.render.background)?,
            perspective: Perspective {
                fov_y: config.camera.fov.to_radians(),
                near: config.camera.near,
                far: config.camera.far,
            },
            lights: Lights::cinematic(),
            core_light: CoreLight {
                color: color(&config.core.light_color)?,
                distance: config.core.light_distance,
                decay: config.core.light_decay,
            },
            post: config.post.clone(),
            core_detail: config.core.detail,

            rig: CameraRig::new(Vec3::from_array(config.camera.position)),
            core: CoreAnimator::new(config.core.displacement_strength, palette),
            rays: RayBurst::new(field::ray_records(counts.rays, &mut rng)),
            shell: RockShell::new(field::rock_records(counts.shell_rocks, &mut rng)),
            tunnel: TunnelField::new(field::tunnel_records(counts.tunnel_rocks, &mut rng)),
            stars: StarField::new(field::star_records(counts.stars, &shell, &mut rng), config.stars.speed),
        };
        log::info!(
            "scene composed: {} shell rocks, {} tunnel rocks, {} rays, {} stars",
            counts.shell_rocks,
            counts.tunnel_rocks,
            counts.rays,
            counts.stars
        );
        Ok(scene)
    }

    /// Runs every animator once. None of them reads another's output, so the
    /// order carries no meaning.
    pub fn advance(&mut self, frame: &FrameContext) {
        let animators: [&mut dyn Animate; 6] = [
            &mut self.rig,
            &mut self.stars,
            &mut self.tunnel,
            &mut self.shell,
            &mut self.core,
            &mut self.rays,
        ];
        for animator in animators {
            animator.animate(frame);
        }
    }

    pub fn view(&self) -> Mat4 {
        self.rig.view_matrix()
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        self.perspective.projection(aspect)
    }

    /// Rotation of the group that carries the story objects.
    pub fn group_matrix(&self) -> Mat4 {
        self.rig.scene_group.matrix()
    }

    pub fn core_model(&self) -> Mat4 {
        self.group_matrix() * self.core.transform.matrix()
    }

    pub fn rays_model(&self) -> Mat4 {
        self.group_matrix() * self.rays.transform.matrix()
    }

    pub fn stars_model(&self) -> Mat4 {
        self.stars.transform.matrix()
    }

    /// Fill lights plus the core light at its current intensity, world space.
    pub fn point_lights(&self) -> Vec<PointLight> {
        let core_position = self.core_model().transform_point3(Vec3::ZERO);
        let mut lights = self.lights.fills.clone();
        lights.push(PointLight {
            position: core_position,
            radiance: self.core_light.color * self.core.light_intensity,
            distance: self.core_light.distance,
            decay: self.core_light.decay,
        });
        lights.truncate(MAX_POINT_LIGHTS);
        lights
    }
}
