use field_core::constants::INTEGRATION_DT;
use field_core::{FieldConfig, SimulationContext, SimulationStepper, StepParams, Theme};
use field_render::FieldRenderer;
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::event::*;
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

mod cli;

use cli::Options;

fn field_config(opts: &Options) -> FieldConfig {
    let config = FieldConfig::default();
    match opts.grid_width {
        Some(w) => config.with_grid_width(w),
        None => config,
    }
}

/// Step the CPU reference field and report throughput.
fn run_headless(opts: &Options, ticks: u64) -> anyhow::Result<()> {
    let config = field_config(opts);
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut stepper = SimulationStepper::new(config.grid_width, &mut rng)?;
    let profile = opts.mode.profile();
    log::info!(
        "[headless] {} trajectories, mode {}, {} ticks",
        stepper.len(),
        profile.label,
        ticks
    );

    let start = Instant::now();
    let report_every = (ticks / 10).max(1);
    for tick in 0..ticks {
        stepper.step(&StepParams {
            mode: opts.mode,
            dt: INTEGRATION_DT,
            speed: profile.max_speed,
            time: tick as f32 * INTEGRATION_DT,
        });
        if (tick + 1) % report_every == 0 {
            log::debug!("[headless] tick {}/{}", tick + 1, ticks);
        }
    }
    let secs = start.elapsed().as_secs_f64().max(1e-9);

    let states = stepper.current();
    let mean_radius =
        states.iter().map(|s| s.position.length() as f64).sum::<f64>() / states.len() as f64;
    log::info!(
        "[headless] {:.2}s, {:.1} ticks/s, {:.2}M states/s, mean |p| {:.2}",
        secs,
        ticks as f64 / secs,
        (ticks as f64 * states.len() as f64) / secs / 1e6,
        mean_radius
    );
    Ok(())
}

fn run_window(opts: &Options) -> anyhow::Result<()> {
    let config = field_config(opts);
    let mut ctx = SimulationContext::new(config.clone())?;
    ctx.set_mode(opts.mode);
    ctx.set_theme(Theme::from_light(opts.light));

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Attractor field (native)")
        .build(&event_loop)?;
    let size = window.inner_size();
    ctx.resize(size.width, size.height);

    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(&window)?;
    let mut renderer = pollster::block_on(FieldRenderer::new(
        &instance,
        surface,
        size.width,
        size.height,
        &config,
    ))?;
    let window = &window;
    let start = Instant::now();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => {
                renderer.resize(size.width, size.height);
                ctx.resize(size.width, size.height);
            }
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::CursorMoved { position, .. } => {
                let size = window.inner_size();
                let nx = (position.x / size.width.max(1) as f64).clamp(0.0, 1.0) as f32;
                let ny = (position.y / size.height.max(1) as f64).clamp(0.0, 1.0) as f32;
                ctx.pointer(nx, ny, start.elapsed().as_secs_f64() * 1000.0);
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.logical_key.as_ref() {
                    Key::Character("t" | "T") => ctx.set_theme(ctx.theme().toggle()),
                    Key::Character(digit) => {
                        if let Some(id) = digit.parse::<u32>().ok().and_then(|d| d.checked_sub(1)) {
                            if let Err(e) = ctx.set_mode_id(id) {
                                log::warn!("{e}");
                            }
                        }
                    }
                    Key::Named(NamedKey::Escape) => elwt.exit(),
                    _ => {}
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            let out = ctx.frame(start.elapsed().as_secs_f64() * 1000.0);
            if let Some(level) = out.quality_changed {
                log::debug!("[quality] level {:.2}, {} points", level, out.visible_points);
            }
            match renderer.render(&out) {
                Ok(_) => window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => {
                    let size = window.inner_size();
                    renderer.resize(size.width, size.height);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(_) => {}
            }
        }
        _ => {}
    })?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = cli::parse(args.iter().map(String::as_str))?;
    match opts.headless {
        Some(ticks) => run_headless(&opts, ticks),
        None => run_window(&opts),
    }
}
