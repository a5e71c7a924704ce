// Pure input mapping, kept free of web-sys so host tests can include it.

/// Viewport-normalized pointer position, each axis clamped to `[0, 1]`.
#[inline]
pub fn viewport_uv(client_x: f64, client_y: f64, width: f64, height: f64) -> [f32; 2] {
    if width > 0.0 && height > 0.0 {
        let u = (client_x / width).clamp(0.0, 1.0);
        let v = (client_y / height).clamp(0.0, 1.0);
        [u as f32, v as f32]
    } else {
        [0.5, 0.5]
    }
}

/// Backing-store size for a CSS box at the given device pixel ratio.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let w = (css_width * dpr) as u32;
    let h = (css_height * dpr) as u32;
    (w.max(1), h.max(1))
}

/// Orientation angles arrive as nullable doubles; a reading is usable only when all three are present.
#[inline]
pub fn orientation_reading(
    alpha: Option<f64>,
    beta: Option<f64>,
    gamma: Option<f64>,
) -> Option<[f32; 3]> {
    match (alpha, beta, gamma) {
        (Some(a), Some(b), Some(g)) if a.is_finite() && b.is_finite() && g.is_finite() => {
            Some([a as f32, b as f32, g as f32])
        }
        _ => None,
    }
}
