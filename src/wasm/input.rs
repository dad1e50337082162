//! Scroll surface and pointer, the two inputs the animators consume.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{HtmlElement, PointerEvent, Window};

use crate::error::{Result, VizError};

pub struct Inputs {
    scroll: HtmlElement,
    pointer: Rc<Cell<Vec2>>,
}

impl Inputs {
    /// Sizes the scroll content to `pages` viewports and starts tracking the
    /// pointer.
    pub fn install(window: &Window, scroll: HtmlElement, content: Option<HtmlElement>, pages: f32) -> Result<Self> {
        if let Some(content) = content {
            content
                .style()
                .set_property("min-height", &format!("{}vh", pages * 100.0))?;
        }

        let pointer = Rc::new(Cell::new(Vec2::ZERO));
        let on_move = {
            let pointer = pointer.clone();
            let window = window.clone();
            Closure::wrap(Box::new(move |event: PointerEvent| {
                let (Some(w), Some(h)) = (
                    window.inner_width().ok().and_then(|v| v.as_f64()),
                    window.inner_height().ok().and_then(|v| v.as_f64()),
                ) else {
                    return;
                };
                if w <= 0.0 || h <= 0.0 {
                    return;
                }
                let x = (event.client_x() as f64 / w) * 2.0 - 1.0;
                let y = -((event.client_y() as f64 / h) * 2.0 - 1.0);
                pointer.set(Vec2::new(x as f32, y as f32).clamp(Vec2::NEG_ONE, Vec2::ONE));
            }) as Box<dyn FnMut(PointerEvent)>)
        };
        window
            .add_event_listener_with_callback("pointermove", on_move.as_ref().unchecked_ref())
            .map_err(VizError::from)?;
        on_move.forget();

        Ok(Self { scroll, pointer })
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer.get()
    }

    /// `(scroll_top, scroll_height, client_height)` of the scroll surface.
    pub fn scroll_metrics(&self) -> (f32, f32, f32) {
        (
            self.scroll.scroll_top() as f32,
            self.scroll.scroll_height() as f32,
            self.scroll.client_height() as f32,
        )
    }
}
