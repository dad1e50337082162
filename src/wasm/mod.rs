use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, HtmlElement};

use crate::config::SceneConfig;
use crate::error::{Result, VizError};

mod audio;
mod gl;
mod input;
mod passes;
mod render;

use audio::Drone;
use input::Inputs;

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or_else(|| VizError::MissingElement(id.to_owned()))
}

/// Reads the optional `<script id="scene-config" type="application/json">`
/// block. A malformed block is reported and the authored defaults are used.
fn load_config(document: &Document) -> SceneConfig {
    let json = document
        .get_element_by_id("scene-config")
        .and_then(|el| el.text_content())
        .filter(|text| !text.trim().is_empty());
    match json.map(|text| SceneConfig::from_json(&text)) {
        Some(Ok(config)) => {
            log::info!("using page scene config");
            config
        }
        Some(Err(err)) => {
            log::warn!("{err}; falling back to defaults");
            SceneConfig::default()
        }
        None => SceneConfig::default(),
    }
}

/// Page state shared by the loader and sound buttons.
struct App {
    document: Document,
    config: SceneConfig,
    canvas: HtmlCanvasElement,
    scroll: HtmlElement,
    drone: RefCell<Drone>,
    started: Cell<bool>,
}

impl App {
    /// Hides the loader and starts rendering. Later calls do nothing.
    fn enter(&self, with_audio: bool) -> Result<()> {
        if self.started.replace(true) {
            return Ok(());
        }
        if let Ok(loader) = element::<HtmlElement>(&self.document, "loader") {
            loader.set_hidden(true);
        }
        if let Some(body) = self.document.body() {
            body.class_list().add_1("started")?;
        }

        let window = web_sys::window().ok_or(VizError::ContextUnavailable("window"))?;
        let content = element::<HtmlElement>(&self.document, "scroll-content").ok();
        let inputs = Inputs::install(&window, self.scroll.clone(), content, self.config.scroll.pages)?;
        render::start(self.canvas.clone(), inputs, &self.config)?;

        if with_audio {
            if let Err(err) = self.drone.borrow_mut().play() {
                log::warn!("audio unavailable: {err}");
            }
        }
        self.show_sound_state();
        Ok(())
    }

    fn toggle_sound(&self) -> Result<()> {
        self.drone.borrow_mut().toggle()?;
        self.show_sound_state();
        Ok(())
    }

    fn show_sound_state(&self) {
        if let Ok(button) = element::<HtmlElement>(&self.document, "sound") {
            button.set_hidden(false);
            button.set_text_content(Some(self.drone.borrow().label()));
        }
    }
}

/// Wires a click on `#id` to `action`, logging whatever it fails with.
fn on_click(app: &Rc<App>, id: &str, action: fn(&App) -> Result<()>) -> Result<bool> {
    let Ok(button) = element::<HtmlElement>(&app.document, id) else {
        return Ok(false);
    };
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move || {
        if let Err(err) = action(&app) {
            log::error!("{err}");
        }
    }) as Box<dyn FnMut()>);
    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(true)
}

#[wasm_bindgen(start)]
pub fn main() -> std::result::Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // a second init (tests) is harmless
    let _ = console_log::init_with_level(log::Level::Info);

    let window = web_sys::window().ok_or(VizError::ContextUnavailable("window"))?;
    let document = window.document().ok_or(VizError::ContextUnavailable("document"))?;
    let config = load_config(&document);

    let app = Rc::new(App {
        canvas: element(&document, "c")?,
        scroll: element(&document, "scroll")?,
        drone: RefCell::new(Drone::new(config.audio.clone())),
        started: Cell::new(false),
        config,
        document,
    });

    let enter = on_click(&app, "enter", |app| app.enter(true))?;
    let mute = on_click(&app, "mute", |app| app.enter(false))?;
    on_click(&app, "sound", App::toggle_sound)?;

    // no loader on the page: start straight away, silently
    if !enter && !mute {
        app.enter(false)?;
    }
    Ok(())
}
