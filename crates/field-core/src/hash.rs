use glam::Vec2;

/// `x - floor(x)`, matching WGSL `fract` for negative inputs.
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Stateless per-texel noise shared with `simulate.wgsl`.
///
/// Returns a value in `[0, 1)`. Only spatial decorrelation matters here, so
/// small differences between CPU and GPU `sin` precision are acceptable.
#[inline]
pub fn hash12(co: Vec2) -> f32 {
    fract((co.dot(Vec2::new(12.9898, 78.233))).sin() * 43758.5453)
}

/// `hash12(uv + offset)` with the offset added to both components.
#[inline]
pub fn hash_offset(uv: Vec2, offset: f32) -> f32 {
    hash12(uv + Vec2::splat(offset))
}
