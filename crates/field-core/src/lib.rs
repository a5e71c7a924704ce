pub mod attractor;
pub mod camera;
pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod hash;
pub mod horizon;
pub mod interaction;
pub mod mode;
pub mod params;
pub mod particle;
pub mod projector;
pub mod quality;
pub mod shading;
pub mod stepper;
pub mod telemetry;
pub mod uniforms;

pub static SIMULATE_WGSL: &str = include_str!("../shaders/simulate.wgsl");
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");
pub static HORIZON_WGSL: &str = include_str!("../shaders/horizon.wgsl");

pub use attractor::{step, StepInput};
pub use camera::{Camera, SystemRotation};
pub use config::{DeviceProfile, FieldConfig};
pub use context::{FrameOutput, SimulationContext};
pub use error::FieldError;
pub use horizon::{rim_glow, SphereMesh};
pub use interaction::{InteractionController, OrientationPermission, OrientationState, Tilt};
pub use mode::{AttractorMode, ModeChange, ModeController, ModeProfile};
pub use params::{SimulationParameters, Targets};
pub use particle::{generate_scatter, pack_scatter, seed_field, ParticleState, VisualPoint};
pub use projector::{project, ProjectedPoint, ViewParams};
pub use quality::{QualityGovernor, QualityState};
pub use shading::{BlendMode, Palette, Theme};
pub use stepper::{SimulationStepper, StepParams};
pub use telemetry::{Status, Telemetry};
pub use uniforms::{HorizonUniforms, SimUniforms, ViewUniforms};
