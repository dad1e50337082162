use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, HtmlCanvasElement, WebGl2RenderingContext as GL, Window};

use super::input::Inputs;
use super::passes::{CorePass, FrameMatrices, PostPass, RayPass, RockPass, StarPass};
use crate::animate::FrameContext;
use crate::clock::FrameClock;
use crate::config::{RenderConfig, SceneConfig};
use crate::error::{Result, VizError};
use crate::geometry;
use crate::math::srgb_hex;
use crate::phase::ScrollTracker;
use crate::scene::Scene;

/// Logs and drops a pass that failed to build, so the rest still draws.
fn optional<T>(label: &str, pass: Result<T>) -> Option<T> {
    match pass {
        Ok(pass) => Some(pass),
        Err(err) => {
            log::warn!("{label} pass disabled: {err}");
            None
        }
    }
}

struct Renderer {
    gl: GL,
    canvas: HtmlCanvasElement,
    render: RenderConfig,
    scene: Scene,
    core: Option<CorePass>,
    shell: Option<RockPass>,
    tunnel: Option<RockPass>,
    rays: Option<RayPass>,
    stars: Option<StarPass>,
    post: Option<PostPass>,
    pixel_ratio: f32,
}

impl Renderer {
    fn new(gl: GL, canvas: HtmlCanvasElement, config: &SceneConfig) -> Result<Self> {
        let scene = Scene::new(config)?;

        let shell_mesh = geometry::dodecahedron(1.0, 0);
        let tunnel_mesh = geometry::dodecahedron(1.0, 1).flat_shaded();

        let core = optional("core", CorePass::new(&gl, scene.core_detail));
        let shell = optional(
            "rock shell",
            RockPass::new(&gl, &shell_mesh, scene.shell.matrices(), srgb_hex(0x1a1a1a), false),
        );
        let tunnel = optional(
            "tunnel",
            RockPass::new(&gl, &tunnel_mesh, scene.tunnel.matrices(), srgb_hex(0x1a1a1d), true),
        );
        let rays = optional("rays", RayPass::new(&gl, &scene));
        let stars = optional("stars", StarPass::new(&gl, &scene));
        let post = if scene.post.enabled {
            optional("post", PostPass::new(&gl, canvas.width() as i32, canvas.height() as i32))
        } else {
            None
        };

        gl.enable(GL::DEPTH_TEST);
        gl.disable(GL::CULL_FACE);

        Ok(Self {
            gl,
            canvas,
            render: config.render.clone(),
            scene,
            core,
            shell,
            tunnel,
            rays,
            stars,
            post,
            pixel_ratio: 1.0,
        })
    }

    /// Matches the drawing buffer to the CSS size at the clamped pixel ratio.
    fn resize(&mut self, window: &Window) {
        let css_w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0) as f32;
        let css_h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0) as f32;
        self.pixel_ratio = self.render.pixel_ratio(window.device_pixel_ratio() as f32, css_w);

        let w = (css_w * self.pixel_ratio).round().max(1.0) as u32;
        let h = (css_h * self.pixel_ratio).round().max(1.0) as u32;
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        self.gl.viewport(0, 0, w as i32, h as i32);

        if let Some(post) = self.post.as_mut() {
            if let Err(err) = post.resize(&self.gl, w as i32, h as i32) {
                log::warn!("post pass disabled: {err}");
                self.post = None;
            }
        }
    }

    fn frame(&mut self, frame: &FrameContext) {
        self.scene.advance(frame);

        let gl = &self.gl;
        let scene = &self.scene;
        let aspect = self.canvas.width() as f32 / self.canvas.height().max(1) as f32;
        let matrices = FrameMatrices {
            projection: scene.projection(aspect),
            view: scene.view(),
            pixel_ratio: self.pixel_ratio,
        };

        if let Some(shell) = self.shell.as_mut() {
            shell.update(gl, scene.shell.matrices());
        }
        if let Some(tunnel) = self.tunnel.as_mut() {
            tunnel.update(gl, scene.tunnel.matrices());
        }

        if let Some(post) = &self.post {
            post.begin(gl);
        }
        let bg = scene.background;
        gl.clear_color(bg.x, bg.y, bg.z, 1.0);
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);

        let group = scene.group_matrix();
        let lights = scene.point_lights();
        if let Some(core) = &self.core {
            core.draw(gl, scene, &matrices);
        }
        if let Some(shell) = &self.shell {
            shell.draw(gl, scene, &group, &lights, &matrices);
        }
        if let Some(tunnel) = &self.tunnel {
            tunnel.draw(gl, scene, &group, &lights, &matrices);
        }
        if let Some(stars) = &self.stars {
            stars.draw(gl, scene, &matrices);
        }
        if let Some(rays) = &self.rays {
            rays.draw(gl, scene, &matrices);
        }

        if let Some(post) = &self.post {
            post.finish(gl, scene, frame.elapsed);
        }
    }
}

/// Start render loop: scroll + clock -> scene -> passes, once per frame.
pub fn start(canvas: HtmlCanvasElement, inputs: Inputs, config: &SceneConfig) -> Result<()> {
    let window = window().ok_or(VizError::ContextUnavailable("window"))?;
    let performance = window.performance().ok_or(VizError::ContextUnavailable("performance"))?;
    let gl: GL = canvas
        .get_context("webgl2")?
        .ok_or(VizError::ContextUnavailable("WebGL2"))?
        .dyn_into()
        .map_err(|_| VizError::ContextUnavailable("WebGL2"))?;

    let renderer = Rc::new(RefCell::new(Renderer::new(gl, canvas, config)?));
    renderer.borrow_mut().resize(&window);

    // Resize lazily on the next frame
    let resized = Rc::new(Cell::new(false));
    let resize_closure = {
        let resized = resized.clone();
        Closure::wrap(Box::new(move || resized.set(true)) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    let mut tracker = ScrollTracker::new(config.scroll.pages, config.scroll.damping);
    let mut clock = FrameClock::new();

    // The frame closure re-schedules itself through `f`.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let loop_window = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if resized.replace(false) {
            renderer.borrow_mut().resize(&loop_window);
        }

        let (elapsed, delta) = clock.tick(performance.now());
        let (top, height, client) = inputs.scroll_metrics();
        tracker.set_scroll_metrics(top, height, client);
        let frame = FrameContext {
            scroll: tracker.update(delta),
            elapsed,
            delta,
            pointer: inputs.pointer(),
        };
        renderer.borrow_mut().frame(&frame);

        // schedule next
        if let Some(next) = f.borrow().as_ref() {
            if let Err(err) = loop_window.request_animation_frame(next.as_ref().unchecked_ref()) {
                log::error!("render loop stopped: {err:?}");
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(first) = g.borrow().as_ref() {
        window.request_animation_frame(first.as_ref().unchecked_ref())?;
    }
    log::info!("render loop started");
    Ok(())
}
