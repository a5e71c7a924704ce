//! Fragment shaping rules, mirrored by the fragment stage of
//! `shaders/points.wgsl`. Kept on the CPU for tests and the headless preview.

use crate::constants::{
    APERTURE_FADE_RANGE, BASE_ALPHA, HORIZON_FADE, LIGHT_ALPHA_BOOST, MIN_ALPHA_WIDE, RIM_FADE,
};
use crate::projector::smoothstep;
use glam::{Vec2, Vec3, Vec4};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn from_light(light: bool) -> Self {
        if light {
            Theme::Light
        } else {
            Theme::Dark
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_light(self) -> bool {
        matches!(self, Theme::Light)
    }

    /// Dark backgrounds emit light; light backgrounds need opaque-looking ink.
    pub fn blend_mode(self) -> BlendMode {
        match self {
            Theme::Dark => BlendMode::Additive,
            Theme::Light => BlendMode::Alpha,
        }
    }

    pub fn clear_color(self) -> [f64; 4] {
        match self {
            // #020204
            Theme::Dark => [2.0 / 255.0, 2.0 / 255.0, 4.0 / 255.0, 1.0],
            Theme::Light => [0.95, 0.94, 0.92, 1.0],
        }
    }

    pub fn alpha_boost(self) -> f32 {
        match self {
            Theme::Dark => 1.0,
            Theme::Light => LIGHT_ALPHA_BOOST,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlendMode {
    Additive,
    Alpha,
}

/// Gradient family selected per mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Palette {
    /// Three-stop star gradient.
    Stellar,
    /// Two-stop accretion-disk gradient.
    Ember,
}

impl Palette {
    pub fn id(self) -> u32 {
        match self {
            Palette::Stellar => 0,
            Palette::Ember => 1,
        }
    }
}

pub const DARK_STOPS: [Vec3; 3] = [
    Vec3::new(0.5, 0.7, 1.0),
    Vec3::new(1.0, 0.95, 0.9),
    Vec3::new(1.0, 0.6, 0.3),
];
pub const DARK_EMBER: Vec3 = Vec3::new(1.0, 0.3, 0.05);

pub const LIGHT_STOPS: [Vec3; 3] = [
    Vec3::new(0.08, 0.12, 0.28),
    Vec3::new(0.20, 0.20, 0.26),
    Vec3::new(0.42, 0.18, 0.06),
];

pub fn gradient(palette: Palette, theme: Theme, t: f32) -> Vec3 {
    let stops = match theme {
        Theme::Dark => DARK_STOPS,
        Theme::Light => LIGHT_STOPS,
    };
    match (palette, theme) {
        (Palette::Ember, Theme::Dark) => DARK_EMBER.lerp(stops[1], t * 0.8),
        (Palette::Ember, Theme::Light) => stops[2].lerp(stops[0], t * 0.8),
        (Palette::Stellar, _) if t < 0.5 => stops[0].lerp(stops[1], t * 2.0),
        (Palette::Stellar, _) => stops[1].lerp(stops[2], (t - 0.5) * 2.0),
    }
}

/// Rotate `rgb` about the grey axis by `angle` radians.
pub fn hue_rotate(rgb: Vec3, angle: f32) -> Vec3 {
    let k = Vec3::splat(0.577_350_26);
    let (s, c) = angle.sin_cos();
    rgb * c + k.cross(rgb) * s + k * k.dot(rgb) * (1.0 - c)
}

pub fn twinkle(time: f32, seed: f32) -> f32 {
    0.7 + 0.3 * (time * (2.0 + seed * 3.0) + seed * 10.0).sin()
}

/// Radial falloff inside the point footprint; `coord` spans `[-0.5, 0.5]^2`.
pub fn glow(coord: Vec2) -> Option<f32> {
    let d = coord.length();
    if d > 0.5 {
        return None;
    }
    Some((1.0 - d * 2.0).max(0.0).powf(1.5))
}

/// Base alpha before theme, gravity-well and fog factors.
pub fn defocus_alpha(blur: f32, aperture: f32) -> f32 {
    let fade = blur.max(0.0).sqrt();
    let af = smoothstep(0.0, APERTURE_FADE_RANGE, aperture);
    let min_alpha = BASE_ALPHA + (MIN_ALPHA_WIDE - BASE_ALPHA) * af;
    BASE_ALPHA + (min_alpha - BASE_ALPHA) * fade
}

/// Hides respawns at the horizon and on the outer spawn ring.
pub fn gravity_well_fade(r: f32) -> f32 {
    smoothstep(HORIZON_FADE[0], HORIZON_FADE[1], r) * (1.0 - smoothstep(RIM_FADE[0], RIM_FADE[1], r))
}

pub fn fog_factor(density: f32, depth: f32) -> f32 {
    let f = density * depth;
    (-(f * f)).exp()
}

/// Everything the fragment rule reads for one point.
#[derive(Clone, Copy, Debug)]
pub struct FragmentInput {
    pub coord: Vec2,
    pub seed: f32,
    pub blur: f32,
    pub visual: Vec3,
    pub depth: f32,
}

/// Per-frame uniforms the fragment rule reads.
#[derive(Clone, Copy, Debug)]
pub struct ShadeParams {
    pub palette: Palette,
    pub theme: Theme,
    pub hue_shift: f32,
    pub time: f32,
    pub aperture: f32,
    pub fog_density: f32,
}

/// Premultiplication is left to the blend state; `None` means discarded.
pub fn shade(frag: &FragmentInput, params: &ShadeParams) -> Option<Vec4> {
    let g = glow(frag.coord)?;
    let base = hue_rotate(gradient(params.palette, params.theme, frag.seed), params.hue_shift);
    let scint = twinkle(params.time, frag.seed) + (1.0 - twinkle(params.time, frag.seed)) * frag.blur;

    let mut alpha = defocus_alpha(frag.blur, params.aperture);
    alpha = (alpha * params.theme.alpha_boost()).min(1.0);
    if params.palette == Palette::Ember {
        alpha *= gravity_well_fade(frag.visual.length());
    }
    alpha *= fog_factor(params.fog_density, frag.depth);

    let rgb = match params.theme {
        Theme::Dark => base * scint * g,
        Theme::Light => base,
    };
    let alpha = match params.theme {
        Theme::Dark => alpha,
        Theme::Light => alpha * g * scint,
    };
    Some(rgb.extend(alpha))
}
