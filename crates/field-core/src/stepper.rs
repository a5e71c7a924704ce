//! CPU reference stepper: the same ping-pong scheme the compute pass uses,
//! over two host-side arenas.

use crate::attractor::{self, StepInput};
use crate::error::FieldError;
use crate::mode::AttractorMode;
use crate::particle::{seed_field, texel_uv, ParticleState};
use rand::Rng;

#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;

/// Per-tick parameters broadcast to every texel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepParams {
    pub mode: AttractorMode,
    pub dt: f32,
    pub speed: f32,
    pub time: f32,
}

pub struct SimulationStepper {
    width: u32,
    front: Vec<ParticleState>,
    back: Vec<ParticleState>,
    ticks: u64,
}

impl SimulationStepper {
    /// Seeds a `width × width` grid from `rng`.
    pub fn new<R: Rng + ?Sized>(width: u32, rng: &mut R) -> Result<Self, FieldError> {
        if width == 0 {
            return Err(FieldError::EmptyGrid);
        }
        let count = (width as usize) * (width as usize);
        Self::from_states(width, seed_field(count, rng))
    }

    pub fn from_states(width: u32, states: Vec<ParticleState>) -> Result<Self, FieldError> {
        if width == 0 {
            return Err(FieldError::EmptyGrid);
        }
        let expected = (width as usize) * (width as usize);
        if states.len() != expected {
            return Err(FieldError::StateSizeMismatch {
                expected,
                actual: states.len(),
            });
        }
        Ok(Self {
            width,
            back: vec![ParticleState::default(); expected],
            front: states,
            ticks: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn len(&self) -> usize {
        self.front.len()
    }

    pub fn is_empty(&self) -> bool {
        self.front.is_empty()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// State written by the most recent tick.
    pub fn current(&self) -> &[ParticleState] {
        &self.front
    }

    /// Reads `front`, writes `back`, then swaps the two arenas.
    pub fn step(&mut self, params: &StepParams) {
        let width = self.width;
        let src = &self.front;
        let advance = |(i, out): (usize, &mut ParticleState)| {
            let input = StepInput {
                dt: params.dt,
                speed: params.speed,
                time: params.time,
                uv: texel_uv(i, width),
            };
            *out = attractor::step(src[i], params.mode, &input);
        };

        #[cfg(not(target_arch = "wasm32"))]
        self.back.par_iter_mut().enumerate().for_each(advance);
        #[cfg(target_arch = "wasm32")]
        self.back.iter_mut().enumerate().for_each(advance);

        std::mem::swap(&mut self.front, &mut self.back);
        self.ticks += 1;
    }
}
