use field_core::{DeviceProfile, Status, Telemetry};
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::input;

/// Touch-first devices get the reduced grid and higher quality floor.
pub fn detect_device_profile(window: &web::Window) -> DeviceProfile {
    let coarse = window
        .match_media("(pointer: coarse)")
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false);
    if coarse {
        DeviceProfile::Constrained
    } else {
        DeviceProfile::Desktop
    }
}

/// Match the canvas backing store to its CSS box times devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let rect = canvas.get_bounding_client_rect();
    let (w, h) = input::backing_size(rect.width(), rect.height(), dpr);
    canvas.set_width(w);
    canvas.set_height(h);
    (w, h)
}

/// Writes the debug readout; elements that are missing are skipped.
pub struct TelemetryWriter {
    fields: Vec<(&'static str, web::HtmlElement)>,
    status: Option<web::HtmlElement>,
    last: Option<Telemetry>,
}

impl TelemetryWriter {
    pub fn new(document: &web::Document) -> Self {
        let lookup = |id: &str| {
            document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
        };
        let ids = [
            "val-focus",
            "val-aperture",
            "val-status",
            "val-fps",
            "val-points",
            "val-quality",
            "val-eq",
            "track-title",
        ];
        let fields = ids
            .iter()
            .filter_map(|&id| lookup(id).map(|el| (id, el)))
            .collect::<Vec<_>>();
        log::debug!("[telemetry] {} readout elements", fields.len());
        Self {
            fields,
            status: lookup("val-status"),
            last: None,
        }
    }

    pub fn write(&mut self, telemetry: &Telemetry) {
        if self.fields.is_empty() || self.last.as_ref() == Some(telemetry) {
            return;
        }
        for (id, text) in telemetry.fields() {
            if let Some((_, el)) = self.fields.iter().find(|(fid, _)| *fid == id) {
                el.set_inner_text(&text);
            }
        }
        let status_changed = self.last.as_ref().map(|t| t.status) != Some(telemetry.status);
        if status_changed {
            if let Some(el) = &self.status {
                set_status_color(el, telemetry.status);
            }
        }
        self.last = Some(telemetry.clone());
    }
}

fn set_status_color(el: &web::HtmlElement, status: Status) {
    let _ = el.style().set_property("color", status.css_color());
}
