use crate::{dom::TelemetryWriter, Shared};
use field_render::FieldRenderer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameLoop {
    pub ctx: Shared,
    pub renderer: FieldRenderer<'static>,
    pub canvas: web::HtmlCanvasElement,
    pub readout: TelemetryWriter,
}

impl FrameLoop {
    /// One display frame; returns false once the surface is unrecoverable.
    fn frame(&mut self, now_ms: f64) -> bool {
        let size = (self.canvas.width(), self.canvas.height());
        if size != self.renderer.size() {
            self.renderer.resize(size.0, size.1);
            self.ctx.borrow_mut().resize(size.0, size.1);
        }
        let out = self.ctx.borrow_mut().frame(now_ms);
        if let Some(level) = out.quality_changed {
            log::debug!("[quality] level {:.2}, {} points", level, out.visible_points);
        }
        match self.renderer.render(&out) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (w, h) = self.renderer.size();
                self.renderer.resize(w, h);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[gpu] out of memory; stopping the field");
                return false;
            }
            Err(e) => log::warn!("[gpu] frame skipped: {e:?}"),
        }
        self.readout.write(&out.telemetry);
        true
    }

    pub fn start(self) {
        let state = Rc::new(RefCell::new(self));
        let tick: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let tick_clone = tick.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
            if state.borrow_mut().frame(now_ms) {
                schedule(&tick_clone);
            }
        }) as Box<dyn FnMut(f64)>));
        schedule(&tick);
    }
}

fn schedule(tick: &Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
