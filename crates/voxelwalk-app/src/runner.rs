//! Application runner and event loop.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::app::VoxelApp;
use crate::context::AppContext;
use crate::frame::FrameContext;

/// Frame rate used by [`run_headless`] when no target is configured.
const HEADLESS_FPS: u32 = 60;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Window title.
    pub title: String,
    /// Initial window width.
    pub width: u32,
    /// Initial window height.
    pub height: u32,
    /// Target frames per second (None for unlimited).
    pub target_fps: Option<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "voxelwalk".to_string(),
            width: 1280,
            height: 720,
            target_fps: None,
        }
    }
}

impl AppConfig {
    /// Create a new config with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the window dimensions.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the target FPS.
    #[must_use]
    pub const fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = Some(fps);
        self
    }

    fn target_frame_time(&self) -> Option<Duration> {
        self.target_fps
            .filter(|&fps| fps > 0)
            .map(|fps| Duration::from_nanos(1_000_000_000 / u64::from(fps)))
    }
}

/// Install the `tracing` subscriber, filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();
}

/// Min/max/average frame rate over a run.
#[derive(Debug, Clone)]
struct FrameStats {
    min_fps: f64,
    max_fps: f64,
    fps_sum: f64,
    frames: u64,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            min_fps: f64::MAX,
            max_fps: 0.0,
            fps_sum: 0.0,
            frames: 0,
        }
    }
}

impl FrameStats {
    fn record(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let fps = 1.0 / f64::from(dt);
        self.min_fps = self.min_fps.min(fps);
        self.max_fps = self.max_fps.max(fps);
        self.fps_sum += fps;
        self.frames += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    fn log_summary(&self) {
        if self.frames == 0 {
            return;
        }
        let avg_fps = self.fps_sum / self.frames as f64;
        info!("FPS Statistics:");
        info!("  Min: {:.1}", self.min_fps);
        info!("  Max: {:.1}", self.max_fps);
        info!("  Avg: {:.1}", avg_fps);
        info!("  Total frames: {}", self.frames);
    }
}

/// Run a VoxelApp in a window until it is closed or asks to exit.
pub fn run_app<A: VoxelApp + 'static>(config: AppConfig) -> anyhow::Result<()> {
    init_logging();
    info!("{} starting...", config.title);

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut runner = AppRunner::<A> {
        config,
        state: None,
    };
    event_loop
        .run_app(&mut runner)
        .context("event loop terminated with an error")?;
    Ok(())
}

/// Run a VoxelApp without a window for `frames` frames at a fixed time step.
///
/// The step is `1 / target_fps`, or 1/60 s when no target is set. Returns the
/// app after cleanup so callers can inspect its final state.
#[allow(clippy::cast_precision_loss)]
pub fn run_headless<A: VoxelApp>(config: AppConfig, frames: u64) -> anyhow::Result<A> {
    init_logging();
    info!(frames, "{} starting headless...", config.title);

    let mut ctx = AppContext::headless(config.width, config.height);
    let mut app = A::init(&mut ctx).context("failed to initialize application")?;
    let dt = 1.0 / config.target_fps.filter(|&fps| fps > 0).unwrap_or(HEADLESS_FPS) as f32;
    let mut stats = FrameStats::default();

    for _ in 0..frames {
        app.update(&mut ctx, dt);
        let frame = FrameContext::new(dt, ctx.frame_count);
        app.render(&ctx, &frame)
            .with_context(|| format!("render failed on frame {}", ctx.frame_count))?;
        ctx.frame_count += 1;
        stats.record(dt);
        if ctx.exit_requested() {
            info!("Exit requested");
            break;
        }
    }

    stats.log_summary();
    app.cleanup(&mut ctx);
    Ok(app)
}

/// Internal application runner that implements winit's ApplicationHandler.
struct AppRunner<A: VoxelApp> {
    config: AppConfig,
    state: Option<AppState<A>>,
}

struct AppState<A: VoxelApp> {
    ctx: AppContext,
    app: A,
    target_frame_time: Option<Duration>,
    stats: FrameStats,
}

impl<A: VoxelApp + 'static> ApplicationHandler for AppRunner<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match self.create_state(event_loop) {
            Ok(state) => {
                self.state = Some(state);
                info!("Application ready!");
            }
            Err(e) => {
                error!("Failed to initialize application: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.app.on_event(&event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested");
                self.shutdown(event_loop);
            }
            WindowEvent::RedrawRequested => {
                let Some(state) = &mut self.state else {
                    return;
                };
                if let Err(e) = state.render_frame() {
                    error!("Render error: {e:#}");
                }
                if state.ctx.exit_requested() {
                    info!("Exit requested");
                    self.shutdown(event_loop);
                } else if let Some(window) = state.ctx.window() {
                    window.request_redraw();
                }
            }
            WindowEvent::Resized(size) => {
                if let Some(state) = &mut self.state {
                    if let Err(e) = state.handle_resize(size.width, size.height) {
                        error!("Resize error: {e:#}");
                    }
                }
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let Some(state) = &mut self.state {
            state.app.on_device_event(device_id, &event);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.state.as_ref().and_then(|state| state.ctx.window()) {
            window.request_redraw();
        }
    }
}

impl<A: VoxelApp + 'static> AppRunner<A> {
    fn create_state(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<AppState<A>> {
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("failed to create window")?,
        );

        let mut ctx = AppContext::windowed(window);
        let app = A::init(&mut ctx)?;

        Ok(AppState {
            ctx,
            app,
            target_frame_time: self.config.target_frame_time(),
            stats: FrameStats::default(),
        })
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(mut state) = self.state.take() {
            state.cleanup();
        }
        event_loop.exit();
    }
}

impl<A: VoxelApp> AppState<A> {
    fn render_frame(&mut self) -> anyhow::Result<()> {
        let frame_start = Instant::now();

        let now = Instant::now();
        let dt = now.duration_since(self.ctx.last_frame_time).as_secs_f32();
        self.ctx.last_frame_time = now;
        self.stats.record(dt);

        self.app.update(&mut self.ctx, dt);
        let frame = FrameContext::new(dt, self.ctx.frame_count);
        self.app.render(&self.ctx, &frame)?;
        self.ctx.frame_count += 1;

        // Frame pacing
        if let Some(target) = self.target_frame_time {
            let elapsed = frame_start.elapsed();
            if elapsed < target {
                thread::sleep(target - elapsed);
            }
        }

        Ok(())
    }

    fn handle_resize(&mut self, width: u32, height: u32) -> anyhow::Result<()> {
        if width == 0 || height == 0 {
            return Ok(());
        }

        self.ctx.resize(width, height);
        self.app.on_resize(&mut self.ctx, width, height)?;

        info!("Resized to {}x{}", width, height);
        Ok(())
    }

    fn cleanup(&mut self) {
        self.stats.log_summary();

        info!("Starting cleanup...");
        self.app.cleanup(&mut self.ctx);
        info!("Cleanup complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        updates: u32,
        rendered: Vec<u64>,
        total_dt: f32,
        cleaned_up: bool,
    }

    impl VoxelApp for Counter {
        fn init(ctx: &mut AppContext) -> anyhow::Result<Self> {
            assert!(ctx.is_headless());
            Ok(Self::default())
        }

        fn update(&mut self, ctx: &mut AppContext, dt: f32) {
            self.updates += 1;
            self.total_dt += dt;
            if self.updates == 10 {
                ctx.request_exit();
            }
        }

        fn render(&mut self, _ctx: &AppContext, frame: &FrameContext) -> anyhow::Result<()> {
            self.rendered.push(frame.frame_number);
            Ok(())
        }

        fn cleanup(&mut self, _ctx: &mut AppContext) {
            self.cleaned_up = true;
        }
    }

    #[test]
    fn headless_runs_fixed_steps() {
        let app = run_headless::<Counter>(AppConfig::default().with_target_fps(30), 4).unwrap();
        assert_eq!(app.updates, 4);
        assert_eq!(app.rendered, vec![0, 1, 2, 3]);
        assert!((app.total_dt - 4.0 / 30.0).abs() < 1e-5);
        assert!(app.cleaned_up);
    }

    #[test]
    fn headless_stops_on_exit_request() {
        let app = run_headless::<Counter>(AppConfig::default(), 50).unwrap();
        assert_eq!(app.updates, 10);
        assert_eq!(app.rendered.len(), 10);
        assert!(app.cleaned_up);
    }

    #[test]
    fn frame_time_ignores_zero_target() {
        assert_eq!(AppConfig::default().target_frame_time(), None);
        assert_eq!(AppConfig::default().with_target_fps(0).target_frame_time(), None);
        assert_eq!(
            AppConfig::default().with_target_fps(100).target_frame_time(),
            Some(Duration::from_millis(10))
        );
    }

    #[test]
    fn stats_skip_zero_dt() {
        let mut stats = FrameStats::default();
        stats.record(0.0);
        stats.record(0.5);
        stats.record(0.25);
        assert_eq!(stats.frames, 2);
        assert!((stats.min_fps - 2.0).abs() < 1e-9);
        assert!((stats.max_fps - 4.0).abs() < 1e-9);
    }
}
