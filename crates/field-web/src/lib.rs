#![cfg(target_arch = "wasm32")]
use field_core::{FieldConfig, SimulationContext, Theme};
use field_render::FieldRenderer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod dom;
mod events;
mod frame;
mod input;

pub(crate) type Shared = Rc<RefCell<SimulationContext>>;

const CANVAS_ID: &str = "field-canvas";

thread_local! {
    static CONTEXT: RefCell<Option<Shared>> = const { RefCell::new(None) };
}

fn with_context<R>(f: impl FnOnce(&mut SimulationContext) -> R) -> Option<R> {
    CONTEXT.with(|slot| slot.borrow().as_ref().map(|ctx| f(&mut ctx.borrow_mut())))
}

/// Switch attractor by numeric id (0..=4).
#[wasm_bindgen]
pub fn set_mode(id: u32) -> Result<(), JsValue> {
    match with_context(|ctx| ctx.set_mode_id(id)) {
        Some(Ok(_)) => Ok(()),
        Some(Err(e)) => Err(JsValue::from_str(&e.to_string())),
        None => Err(JsValue::from_str("field not started")),
    }
}

#[wasm_bindgen]
pub fn set_theme(light: bool) {
    if with_context(|ctx| ctx.set_theme(Theme::from_light(light))).is_none() {
        log::warn!("set_theme before start");
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("field-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            // The page keeps working without the background.
            log::error!("field init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let device = dom::detect_device_profile(&window);
    let config = FieldConfig::for_device(device).with_seed(js_sys::Date::now() as u64);
    let (width, height) = dom::sync_canvas_backing_size(&canvas);
    let mut sim = SimulationContext::new(config.clone())?;
    sim.resize(width, height);
    let ctx: Shared = Rc::new(RefCell::new(sim));
    CONTEXT.with(|slot| *slot.borrow_mut() = Some(ctx.clone()));
    log::info!("[init] {:?}, {} points", device, config.point_count()?);

    events::wire_resize(&window, canvas.clone(), ctx.clone());
    events::wire_pointer(&window, ctx.clone());
    events::wire_orientation(&window, ctx.clone());

    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
    let renderer = FieldRenderer::new(&instance, surface, width, height, &config).await?;

    frame::FrameLoop {
        ctx,
        renderer,
        canvas,
        readout: dom::TelemetryWriter::new(&document),
    }
    .start();
    Ok(())
}
