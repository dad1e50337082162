#![cfg(target_arch = "wasm32")]

use reactor_story::shaders::{self, ProgramSource};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext as GL};

wasm_bindgen_test_configure!(run_in_browser);

fn context() -> GL {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas: HtmlCanvasElement = document.create_element("canvas").unwrap().dyn_into().unwrap();
    canvas.set_width(64);
    canvas.set_height(64);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas.get_context("webgl2").unwrap().expect("webgl2 unavailable").dyn_into().unwrap()
}

fn link(gl: &GL, source: &ProgramSource) -> Result<(), String> {
    let program = gl.create_program().unwrap();
    for (kind, text) in [(GL::VERTEX_SHADER, &source.vertex), (GL::FRAGMENT_SHADER, &source.fragment)] {
        let shader = gl.create_shader(kind).unwrap();
        gl.shader_source(&shader, text);
        gl.compile_shader(&shader);
        if !gl.get_shader_parameter(&shader, GL::COMPILE_STATUS).as_bool().unwrap_or(false) {
            return Err(gl.get_shader_info_log(&shader).unwrap_or_default());
        }
        gl.attach_shader(&program, &shader);
    }
    gl.link_program(&program);
    if gl.get_program_parameter(&program, GL::LINK_STATUS).as_bool().unwrap_or(false) {
        Ok(())
    } else {
        Err(gl.get_program_info_log(&program).unwrap_or_default())
    }
}

#[wasm_bindgen_test]
fn every_program_links() {
    let gl = context();
    for source in [
        shaders::core_program(),
        shaders::rock_program(),
        shaders::ray_program(),
        shaders::star_program(),
        shaders::post_program(),
    ] {
        if let Err(log) = link(&gl, &source) {
            panic!("{} failed: {log}", source.label);
        }
    }
}

#[wasm_bindgen_test]
fn canvas_has_size() {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document.create_element("canvas").unwrap();
    canvas.set_attribute("style", "width: 320px; height: 200px").unwrap();
    document.body().unwrap().append_child(&canvas).unwrap();

    let rect = canvas.get_bounding_client_rect();
    assert!(rect.width() > 0.0 && rect.height() > 0.0);
}
