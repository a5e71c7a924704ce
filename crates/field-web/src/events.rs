use crate::{dom, input, Shared};
use field_core::{OrientationPermission, Tilt};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn listen<E: JsCast + 'static>(
    target: &web::EventTarget,
    kind: &str,
    mut handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(_)>);
    if let Err(e) = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
        log::warn!("[events] could not listen for {kind}: {e:?}");
    }
    closure.forget();
}

fn viewport_size(window: &web::Window) -> (f64, f64) {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (w, h)
}

/// Pointer and touch movement over the whole page drive focus/aperture or the well camera.
pub fn wire_pointer(window: &web::Window, ctx: Shared) {
    {
        let ctx = ctx.clone();
        let win = window.clone();
        listen(window, "pointermove", move |ev: web::PointerEvent| {
            let (w, h) = viewport_size(&win);
            let [nx, ny] = input::viewport_uv(ev.client_x() as f64, ev.client_y() as f64, w, h);
            ctx.borrow_mut().pointer(nx, ny, ev.time_stamp());
        });
    }
    let win = window.clone();
    listen(window, "touchmove", move |ev: web::TouchEvent| {
        let Some(touch) = ev.touches().get(0) else {
            return;
        };
        let (w, h) = viewport_size(&win);
        let [nx, ny] = input::viewport_uv(touch.client_x() as f64, touch.client_y() as f64, w, h);
        ctx.borrow_mut().pointer(nx, ny, ev.time_stamp());
    });
}

/// `DeviceOrientationEvent.requestPermission` when the platform gates sensor access.
fn permission_request_fn(window: &web::Window) -> Option<(JsValue, js_sys::Function)> {
    let ctor = js_sys::Reflect::get(window, &JsValue::from_str("DeviceOrientationEvent")).ok()?;
    if ctor.is_undefined() {
        return None;
    }
    let request = js_sys::Reflect::get(&ctor, &JsValue::from_str("requestPermission")).ok()?;
    request.dyn_into::<js_sys::Function>().ok().map(|f| (ctor, f))
}

async fn request_permission(ctor: JsValue, request: js_sys::Function) -> bool {
    let promise = match request.call0(&ctor) {
        Ok(p) => js_sys::Promise::from(p),
        Err(e) => {
            log::info!("[orientation] permission request rejected: {e:?}");
            return false;
        }
    };
    match JsFuture::from(promise).await {
        Ok(answer) => answer.as_string().as_deref() == Some("granted"),
        Err(e) => {
            log::info!("[orientation] permission request failed: {e:?}");
            false
        }
    }
}

fn wire_permission_gesture(window: &web::Window, ctx: Shared, ctor: JsValue, request: js_sys::Function) {
    let on_gesture = move |ctx: &Shared| {
        if !ctx.borrow_mut().begin_permission_request() {
            return;
        }
        let ctx = ctx.clone();
        let ctor = ctor.clone();
        let request = request.clone();
        spawn_local(async move {
            let granted = request_permission(ctor, request).await;
            ctx.borrow_mut().set_orientation_permission(granted);
        });
    };
    let on_click = on_gesture.clone();
    let click_ctx = ctx.clone();
    listen(window, "click", move |_: web::Event| on_click(&click_ctx));
    listen(window, "touchend", move |_: web::Event| on_gesture(&ctx));
}

/// Orientation readings always flow in; the controller ignores them until granted.
pub fn wire_orientation(window: &web::Window, ctx: Shared) {
    match permission_request_fn(window) {
        Some((ctor, request)) => {
            log::debug!("[orientation] gated; waiting for a gesture");
            wire_permission_gesture(window, ctx.clone(), ctor, request);
        }
        None => {
            let mut c = ctx.borrow_mut();
            if c.orientation_permission() == OrientationPermission::NotRequested {
                c.begin_permission_request();
                c.set_orientation_permission(true);
            }
        }
    }
    listen(window, "deviceorientation", move |ev: web::DeviceOrientationEvent| {
        if let Some([a, b, g]) = input::orientation_reading(ev.alpha(), ev.beta(), ev.gamma()) {
            ctx.borrow_mut().orientation(Tilt::new(a, b, g), ev.time_stamp());
        }
    });
}

pub fn wire_resize(window: &web::Window, canvas: web::HtmlCanvasElement, ctx: Shared) {
    listen(window, "resize", move |_: web::Event| {
        let (w, h) = dom::sync_canvas_backing_size(&canvas);
        ctx.borrow_mut().resize(w, h);
    });
}
