//! Thin helpers over the WebGL2 context: program compilation, uniforms and
//! vertex buffers.

use glam::{Mat4, Vec3};
use web_sys::{WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader, WebGlUniformLocation, WebGlVertexArrayObject};

use crate::error::{Result, VizError};
use crate::shaders::ProgramSource;

fn compile_shader(gl: &GL, kind: u32, source: &str, label: &'static str) -> Result<WebGlShader> {
    let shader = gl.create_shader(kind).ok_or(VizError::ResourceCreation("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl.get_shader_parameter(&shader, GL::COMPILE_STATUS).as_bool().unwrap_or(false) {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(VizError::ShaderCompile { label, log })
    }
}

/// A linked program plus the context it belongs to.
pub struct Program {
    gl: GL,
    program: WebGlProgram,
}

impl Program {
    pub fn new(gl: &GL, source: &ProgramSource) -> Result<Self> {
        let vs = compile_shader(gl, GL::VERTEX_SHADER, &source.vertex, source.label)?;
        let fs = compile_shader(gl, GL::FRAGMENT_SHADER, &source.fragment, source.label)?;

        let program = gl.create_program().ok_or(VizError::ResourceCreation("program"))?;
        gl.attach_shader(&program, &vs);
        gl.attach_shader(&program, &fs);
        gl.link_program(&program);
        gl.delete_shader(Some(&vs));
        gl.delete_shader(Some(&fs));

        if !gl.get_program_parameter(&program, GL::LINK_STATUS).as_bool().unwrap_or(false) {
            let log = gl.get_program_info_log(&program).unwrap_or_default();
            gl.delete_program(Some(&program));
            return Err(VizError::ProgramLink {
                label: source.label,
                log,
            });
        }
        log::debug!("linked {} program", source.label);
        Ok(Self { gl: gl.clone(), program })
    }

    pub fn bind(&self) {
        self.gl.use_program(Some(&self.program));
    }

    fn location(&self, name: &str) -> Option<WebGlUniformLocation> {
        self.gl.get_uniform_location(&self.program, name)
    }

    pub fn set_f32(&self, name: &str, v: f32) {
        self.gl.uniform1f(self.location(name).as_ref(), v);
    }

    pub fn set_i32(&self, name: &str, v: i32) {
        self.gl.uniform1i(self.location(name).as_ref(), v);
    }

    pub fn set_bool(&self, name: &str, v: bool) {
        self.set_i32(name, i32::from(v));
    }

    pub fn set_vec2(&self, name: &str, x: f32, y: f32) {
        self.gl.uniform2f(self.location(name).as_ref(), x, y);
    }

    pub fn set_vec3(&self, name: &str, v: Vec3) {
        self.gl.uniform3f(self.location(name).as_ref(), v.x, v.y, v.z);
    }

    pub fn set_mat4(&self, name: &str, m: &Mat4) {
        self.gl
            .uniform_matrix4fv_with_f32_array(self.location(name).as_ref(), false, &m.to_cols_array());
    }

    /// Projection, view and model in one go; every pass but post needs them.
    pub fn set_camera(&self, projection: &Mat4, view: &Mat4, model: &Mat4) {
        self.set_mat4("uProjection", projection);
        self.set_mat4("uView", view);
        self.set_mat4("uModel", model);
    }
}

pub fn create_vao(gl: &GL) -> Result<WebGlVertexArrayObject> {
    gl.create_vertex_array().ok_or(VizError::ResourceCreation("vertex array"))
}

pub fn create_buffer(gl: &GL) -> Result<WebGlBuffer> {
    gl.create_buffer().ok_or(VizError::ResourceCreation("buffer"))
}

pub fn upload_f32(gl: &GL, buffer: &WebGlBuffer, data: &[f32], usage: u32) {
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(buffer));
    let array = js_sys::Float32Array::from(data);
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &array, usage);
}

/// Creates, fills and binds a float attribute to `location`. A VAO must be
/// bound.
pub fn float_attribute(gl: &GL, location: u32, size: i32, data: &[f32], divisor: u32) -> Result<WebGlBuffer> {
    let buffer = create_buffer(gl)?;
    upload_f32(gl, &buffer, data, GL::STATIC_DRAW);
    gl.enable_vertex_attrib_array(location);
    gl.vertex_attrib_pointer_with_i32(location, size, GL::FLOAT, false, 0, 0);
    gl.vertex_attrib_divisor(location, divisor);
    Ok(buffer)
}

/// Per-instance `mat4` spread over four consecutive attribute slots starting
/// at `location`. A VAO must be bound.
pub fn matrix_attribute(gl: &GL, location: u32, matrices: &[Mat4], usage: u32) -> Result<WebGlBuffer> {
    let buffer = create_buffer(gl)?;
    upload_f32(gl, &buffer, &matrix_data(matrices), usage);
    for column in 0..4 {
        let slot = location + column;
        gl.enable_vertex_attrib_array(slot);
        gl.vertex_attrib_pointer_with_i32(slot, 4, GL::FLOAT, false, 64, (column * 16) as i32);
        gl.vertex_attrib_divisor(slot, 1);
    }
    Ok(buffer)
}

pub fn matrix_data(matrices: &[Mat4]) -> Vec<f32> {
    matrices.iter().flat_map(|m| m.to_cols_array()).collect()
}
