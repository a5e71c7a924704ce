// Shared simulation/visual tuning constants used by both web and native frontends.

// Particle grid
pub const SUB_PARTICLES: u32 = 8; // visual points sharing one simulated trajectory
pub const GRID_WIDTH_DESKTOP: u32 = 1000;
pub const GRID_WIDTH_CONSTRAINED: u32 = 512;
pub const GRID_WIDTH_MAX: u32 = 2048; // scatter table fills a 128 MiB storage binding
pub const SEED_FIELD_EXTENT: f32 = 100.0; // initial states span [-50, 50)^3

// Integration
pub const INTEGRATION_DT: f32 = 0.04;
pub const PHASE_RATE: f32 = 0.003; // phase advance per sub-step at speed 1
pub const AGE_RATE: f32 = 0.5; // gravity-well age advance, scaled by dt * speed

// Gravity well
pub const HORIZON_RADIUS: f32 = 25.0;
pub const SPAWN_RADIUS_MIN: f32 = 120.0;
pub const SPAWN_RADIUS_SPAN: f32 = 60.0;
pub const SPAWN_Z_SPREAD: f32 = 5.0;
pub const LIFETIME_MIN: f32 = 0.5;
pub const LIFETIME_SPAN: f32 = 4.0;

// Projection
pub const SPHERE_RADIUS: f32 = 300.0;
pub const INTENSITY_SCALE: f32 = 0.015;
pub const INTENSITY_PUSH: f32 = 40.0;
pub const FOCUS_FUZZ: f32 = 200.0;
pub const DOF_RAMP: f32 = 500.0;
pub const BASE_POINT_SIZE: f32 = 1.0;
pub const SEED_POINT_SIZE: f32 = 2.0;
pub const BLUR_POINT_SIZE: f32 = 1.5;
pub const SIZE_ATTENUATION: f32 = 500.0;
pub const CONSTRAINED_SIZE_SCALE: f32 = 0.7;

// Camera
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 2000.0;
pub const CAMERA_EASE: f32 = 0.05;
pub const CAMERA_TILT_RANGE: f32 = 100.0;

// Scene
pub const FOG_DENSITY: f32 = 0.002;
pub const ROTATION_Y_IDLE: f32 = 0.0001;
pub const ROTATION_Y_SPEED: f32 = 0.002;
pub const ROTATION_X_IDLE: f32 = 0.00005;
pub const ROTATION_X_SPEED: f32 = 0.001;
pub const ROTATION_X_SETTLE: f32 = 0.95; // gravity well flattens back to the disk plane

// Shading
pub const LIGHT_ALPHA_BOOST: f32 = 1.5;
pub const BASE_ALPHA: f32 = 0.3;
pub const MIN_ALPHA_WIDE: f32 = 0.002;
pub const APERTURE_FADE_RANGE: f32 = 10.0;
pub const HORIZON_FADE: [f32; 2] = [20.0, 35.0];

// Black-hole sphere drawn in the gravity well
pub const HORIZON_SPHERE_RADIUS: f32 = 20.0;
pub const HORIZON_SPHERE_SEGMENTS: u32 = 64;
pub const HORIZON_GLOW: [f32; 3] = [0.6, 0.8, 1.0];
pub const HORIZON_RIM_POWER: f32 = 4.0;
pub const RIM_FADE: [f32; 2] = [140.0, 180.0];

// Default depth-of-field
pub const DEFAULT_FOCUS: f32 = 300.0;
pub const DEFAULT_APERTURE: f32 = 5.0;

// Parameter smoothing (fraction of the gap closed per frame)
pub const SMOOTHING_RATE: f32 = 0.1;
pub const SMOOTHING_RATE_CONSTRAINED: f32 = 0.05;
pub const SPEED_RISE: f32 = 0.08;
pub const SPEED_FALL: f32 = 0.05;
pub const SPEED_DEAD_ZONE: f32 = 0.005;
pub const STATUS_ACTIVE_SPEED: f32 = 0.1;

// Interaction
pub const IDLE_TIMEOUT_MS: f64 = 200.0;
pub const POINTER_FOCUS_BASE: f32 = 100.0;
pub const POINTER_FOCUS_SPAN: f32 = 500.0;
pub const POINTER_APERTURE_SPAN: f32 = 10.0;

// Device orientation
pub const ORIENTATION_SMOOTHING: f32 = 0.3; // weight of the newest reading
pub const ORIENTATION_ACTIVATE_DEG: f32 = 25.0;
pub const ORIENTATION_STABLE_STDDEV_DEG: f32 = 1.5;
pub const ORIENTATION_DEBOUNCE_MS: f64 = 800.0;
pub const ORIENTATION_WINDOW: usize = 20;
pub const ORIENTATION_TILT_CYCLE_DEG: f32 = 90.0;
pub const ORIENTATION_TURN_CYCLE_DEG: f32 = 180.0;
pub const ORIENTATION_FOCUS_MID: f32 = 350.0;
pub const ORIENTATION_FOCUS_HALF: f32 = 250.0;
pub const ORIENTATION_APERTURE_MID: f32 = 5.0;
pub const ORIENTATION_APERTURE_HALF: f32 = 5.0;

// Quality governor
pub const QUALITY_WARMUP_MS: f64 = 2000.0;
pub const QUALITY_WINDOW_MS: f64 = 1000.0;
pub const QUALITY_TARGET_FPS: f32 = 60.0;
pub const QUALITY_GAIN: f32 = 0.005;
pub const QUALITY_RESTORE_DAMPING: f32 = 0.15;
pub const QUALITY_MAX_STEP: f32 = 0.15;
pub const QUALITY_HYSTERESIS: f32 = 0.01;
pub const QUALITY_FLOOR: f32 = 0.25;
pub const QUALITY_FLOOR_CONSTRAINED: f32 = 0.5;

// GPU dispatch
pub const WORKGROUP_SIZE: u32 = 256;
