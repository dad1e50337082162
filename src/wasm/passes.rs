//! One struct per draw: it owns its program and buffers and knows which
//! scene state it reads.

use glam::{Mat4, Vec3};
use web_sys::{
    WebGl2RenderingContext as GL, WebGlBuffer, WebGlFramebuffer, WebGlRenderbuffer, WebGlTexture,
    WebGlVertexArrayObject,
};

use super::gl::{self, Program};
use crate::error::{Result, VizError};
use crate::geometry::{self, Mesh};
use crate::scene::{PointLight, Scene};
use crate::shaders;

/// Matrices shared by every pass within a frame.
pub struct FrameMatrices {
    pub projection: Mat4,
    pub view: Mat4,
    pub pixel_ratio: f32,
}

fn mesh_vao(gl: &GL, mesh: &Mesh) -> Result<WebGlVertexArrayObject> {
    let vao = gl::create_vao(gl)?;
    gl.bind_vertex_array(Some(&vao));
    gl::float_attribute(gl, 0, 3, &mesh.position_data(), 0)?;
    if !mesh.normals.is_empty() {
        gl::float_attribute(gl, 1, 3, &mesh.normal_data(), 0)?;
    }
    Ok(vao)
}

pub struct CorePass {
    program: Program,
    vao: WebGlVertexArrayObject,
    count: i32,
}

impl CorePass {
    pub fn new(gl: &GL, detail: u32) -> Result<Self> {
        let program = Program::new(gl, &shaders::core_program())?;
        let mesh = geometry::icosahedron(1.0, detail);
        let vao = mesh_vao(gl, &mesh)?;
        gl.bind_vertex_array(None);
        log::debug!("core mesh: {} triangles", mesh.triangle_count());
        Ok(Self {
            program,
            vao,
            count: mesh.vertex_count() as i32,
        })
    }

    pub fn draw(&self, gl: &GL, scene: &Scene, frame: &FrameMatrices) {
        // fully faded
        if scene.core.transform.scale.x <= 0.0 {
            return;
        }
        let uniforms = &scene.core.uniforms;
        self.program.bind();
        self.program.set_camera(&frame.projection, &frame.view, &scene.core_model());
        self.program.set_f32("uTime", uniforms.time);
        self.program.set_f32("uDisplacementStrength", uniforms.displacement_strength);
        self.program.set_vec3("uColorA", uniforms.palette.color_a);
        self.program.set_vec3("uColorB", uniforms.palette.color_b);
        self.program.set_vec3("uColorGlow", uniforms.palette.glow);

        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays(GL::TRIANGLES, 0, self.count);
        gl.bind_vertex_array(None);
    }
}

/// Lit, instanced rocks. Used for both the imploding shell and the tunnel.
pub struct RockPass {
    program: Program,
    vao: WebGlVertexArrayObject,
    instances: WebGlBuffer,
    count: i32,
    instance_count: i32,
    color: Vec3,
    flat: bool,
}

impl RockPass {
    pub fn new(gl: &GL, mesh: &Mesh, matrices: &[Mat4], color: Vec3, flat: bool) -> Result<Self> {
        let program = Program::new(gl, &shaders::rock_program())?;
        let vao = mesh_vao(gl, mesh)?;
        let instances = gl::matrix_attribute(gl, 2, matrices, GL::DYNAMIC_DRAW)?;
        gl.bind_vertex_array(None);
        Ok(Self {
            program,
            vao,
            instances,
            count: mesh.vertex_count() as i32,
            instance_count: matrices.len() as i32,
            color,
            flat,
        })
    }

    pub fn update(&mut self, gl: &GL, matrices: &[Mat4]) {
        gl::upload_f32(gl, &self.instances, &gl::matrix_data(matrices), GL::DYNAMIC_DRAW);
        self.instance_count = matrices.len() as i32;
    }

    pub fn draw(&self, gl: &GL, scene: &Scene, model: &Mat4, lights: &[PointLight], frame: &FrameMatrices) {
        if self.instance_count == 0 {
            return;
        }
        let p = &self.program;
        p.bind();
        p.set_camera(&frame.projection, &frame.view, model);
        p.set_vec3("uColor", self.color);
        p.set_bool("uFlatShading", self.flat);
        p.set_vec3("uAmbient", scene.lights.ambient);
        p.set_vec3("uDirectionalDir", scene.lights.directional.direction);
        p.set_vec3("uDirectionalColor", scene.lights.directional.radiance);
        p.set_i32("uPointCount", lights.len() as i32);
        for (i, light) in lights.iter().enumerate() {
            p.set_vec3(&format!("uPointPosition[{i}]"), light.position);
            p.set_vec3(&format!("uPointColor[{i}]"), light.radiance);
            p.set_f32(&format!("uPointDistance[{i}]"), light.distance);
            p.set_f32(&format!("uPointDecay[{i}]"), light.decay);
        }

        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays_instanced(GL::TRIANGLES, 0, self.count, self.instance_count);
        gl.bind_vertex_array(None);
    }
}

pub struct RayPass {
    program: Program,
    vao: WebGlVertexArrayObject,
    count: i32,
    instance_count: i32,
}

impl RayPass {
    pub fn new(gl: &GL, scene: &Scene) -> Result<Self> {
        let program = Program::new(gl, &shaders::ray_program())?;
        let mesh = geometry::cuboid(0.08, 0.08, 1.0);
        let rays = &scene.rays;

        let vao = gl::create_vao(gl)?;
        gl.bind_vertex_array(Some(&vao));
        gl::float_attribute(gl, 0, 3, &mesh.position_data(), 0)?;
        gl::matrix_attribute(gl, 2, &rays.instance_matrices(), GL::STATIC_DRAW)?;
        gl::float_attribute(gl, 6, 1, &rays.speeds(), 1)?;
        gl::float_attribute(gl, 7, 1, &rays.lengths(), 1)?;
        gl::float_attribute(gl, 8, 1, &rays.phases(), 1)?;
        gl.bind_vertex_array(None);

        Ok(Self {
            program,
            vao,
            count: mesh.vertex_count() as i32,
            instance_count: rays.records().len() as i32,
        })
    }

    pub fn draw(&self, gl: &GL, scene: &Scene, frame: &FrameMatrices) {
        let uniforms = &scene.rays.uniforms;
        if uniforms.progress <= 0.0 || self.instance_count == 0 {
            return;
        }
        self.program.bind();
        self.program.set_camera(&frame.projection, &frame.view, &scene.rays_model());
        self.program.set_f32("uTime", uniforms.time);
        self.program.set_f32("uProgress", uniforms.progress);

        additive(gl, true);
        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays_instanced(GL::TRIANGLES, 0, self.count, self.instance_count);
        gl.bind_vertex_array(None);
        additive(gl, false);
    }
}

pub struct StarPass {
    program: Program,
    vao: WebGlVertexArrayObject,
    count: i32,
}

impl StarPass {
    pub fn new(gl: &GL, scene: &Scene) -> Result<Self> {
        let program = Program::new(gl, &shaders::star_program())?;
        let stars = scene.stars.records();
        let positions: Vec<f32> = stars.iter().flat_map(|s| s.position.to_array()).collect();
        let colors: Vec<f32> = stars.iter().flat_map(|s| s.color.to_array()).collect();
        let sizes: Vec<f32> = stars.iter().map(|s| s.size).collect();

        let vao = gl::create_vao(gl)?;
        gl.bind_vertex_array(Some(&vao));
        gl::float_attribute(gl, 0, 3, &positions, 0)?;
        gl::float_attribute(gl, 1, 3, &colors, 0)?;
        gl::float_attribute(gl, 2, 1, &sizes, 0)?;
        gl.bind_vertex_array(None);

        Ok(Self {
            program,
            vao,
            count: stars.len() as i32,
        })
    }

    pub fn draw(&self, gl: &GL, scene: &Scene, frame: &FrameMatrices) {
        self.program.bind();
        self.program.set_camera(&frame.projection, &frame.view, &scene.stars_model());
        self.program.set_f32("uTime", scene.stars.uniforms.time);
        self.program.set_f32("uPixelRatio", frame.pixel_ratio);

        additive(gl, true);
        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays(GL::POINTS, 0, self.count);
        gl.bind_vertex_array(None);
        additive(gl, false);
    }
}

/// Additive blending without depth writes, for glowing transparent layers.
fn additive(gl: &GL, on: bool) {
    if on {
        gl.enable(GL::BLEND);
        gl.blend_func(GL::SRC_ALPHA, GL::ONE);
        gl.depth_mask(false);
    } else {
        gl.disable(GL::BLEND);
        gl.depth_mask(true);
    }
}

/// Offscreen target the scene renders into, composited with bloom, grain and
/// vignette onto the canvas.
pub struct PostPass {
    program: Program,
    vao: WebGlVertexArrayObject,
    framebuffer: WebGlFramebuffer,
    color: WebGlTexture,
    depth: WebGlRenderbuffer,
    size: (i32, i32),
}

impl PostPass {
    pub fn new(gl: &GL, width: i32, height: i32) -> Result<Self> {
        let program = Program::new(gl, &shaders::post_program())?;
        let vao = gl::create_vao(gl)?;
        let framebuffer = gl.create_framebuffer().ok_or(VizError::ResourceCreation("framebuffer"))?;
        let color = gl.create_texture().ok_or(VizError::ResourceCreation("texture"))?;
        let depth = gl.create_renderbuffer().ok_or(VizError::ResourceCreation("renderbuffer"))?;

        let mut pass = Self {
            program,
            vao,
            framebuffer,
            color,
            depth,
            size: (0, 0),
        };
        pass.resize(gl, width, height)?;
        Ok(pass)
    }

    pub fn resize(&mut self, gl: &GL, width: i32, height: i32) -> Result<()> {
        let (width, height) = (width.max(1), height.max(1));
        if self.size == (width, height) {
            return Ok(());
        }

        gl.bind_texture(GL::TEXTURE_2D, Some(&self.color));
        gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
            GL::TEXTURE_2D,
            0,
            GL::RGBA8 as i32,
            width,
            height,
            0,
            GL::RGBA,
            GL::UNSIGNED_BYTE,
            None,
        )?;
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);

        gl.bind_renderbuffer(GL::RENDERBUFFER, Some(&self.depth));
        gl.renderbuffer_storage(GL::RENDERBUFFER, GL::DEPTH_COMPONENT24, width, height);

        gl.bind_framebuffer(GL::FRAMEBUFFER, Some(&self.framebuffer));
        gl.framebuffer_texture_2d(GL::FRAMEBUFFER, GL::COLOR_ATTACHMENT0, GL::TEXTURE_2D, Some(&self.color), 0);
        gl.framebuffer_renderbuffer(GL::FRAMEBUFFER, GL::DEPTH_ATTACHMENT, GL::RENDERBUFFER, Some(&self.depth));
        let status = gl.check_framebuffer_status(GL::FRAMEBUFFER);
        gl.bind_framebuffer(GL::FRAMEBUFFER, None);
        gl.bind_texture(GL::TEXTURE_2D, None);

        if status != GL::FRAMEBUFFER_COMPLETE {
            return Err(VizError::ResourceCreation("complete framebuffer"));
        }
        self.size = (width, height);
        Ok(())
    }

    /// Redirects subsequent draws into the offscreen target.
    pub fn begin(&self, gl: &GL) {
        gl.bind_framebuffer(GL::FRAMEBUFFER, Some(&self.framebuffer));
    }

    pub fn finish(&self, gl: &GL, scene: &Scene, time: f32) {
        gl.bind_framebuffer(GL::FRAMEBUFFER, None);
        gl.disable(GL::DEPTH_TEST);

        let post = &scene.post;
        let vignette = post.vignette.unwrap_or(crate::config::VignetteConfig {
            offset: 0.0,
            darkness: 0.0,
        });
        let p = &self.program;
        p.bind();
        gl.active_texture(GL::TEXTURE0);
        gl.bind_texture(GL::TEXTURE_2D, Some(&self.color));
        p.set_i32("uScene", 0);
        p.set_vec2("uTexel", 1.0 / self.size.0 as f32, 1.0 / self.size.1 as f32);
        p.set_f32("uTime", time);
        p.set_f32("uBloomThreshold", post.bloom_threshold);
        p.set_f32("uBloomSmoothing", post.bloom_smoothing);
        p.set_f32("uBloomIntensity", post.bloom_intensity);
        p.set_f32("uBloomRadius", post.bloom_radius);
        p.set_f32("uNoiseOpacity", post.noise_opacity);
        p.set_f32("uVignetteOffset", vignette.offset);
        p.set_f32("uVignetteDarkness", vignette.darkness);

        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays(GL::TRIANGLES, 0, 3);
        gl.bind_vertex_array(None);
        gl.bind_texture(GL::TEXTURE_2D, None);
        gl.enable(GL::DEPTH_TEST);
    }
}
