//! Viewer application: a game session driven by window or scripted input.

use tracing::{error, info, warn};
use voxelwalk_app::{
    player_input, AppContext, DeviceEvent, DeviceId, FrameContext, GameSession, HudSnapshot,
    MemoryBackend, SessionConfig, VoxelApp, WindowEvent,
};
use voxelwalk_input::{InputManager, KeyCode, PointerRequest};
use voxelwalk_world::WorldSeed;

/// Seconds between HUD log lines.
const HUD_INTERVAL: f32 = 1.0;

/// Command line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerArgs {
    pub seed: WorldSeed,
    pub radius: i32,
    pub headless: bool,
    pub frames: u64,
    pub walk_forward: bool,
}

impl Default for ViewerArgs {
    fn default() -> Self {
        Self {
            seed: 0,
            radius: voxelwalk_core::constants::WORLD_SIZE,
            headless: false,
            frames: 600,
            walk_forward: false,
        }
    }
}

impl ViewerArgs {
    /// Parse options from the process arguments.
    pub fn from_args() -> Self {
        Self::parse(std::env::args().skip(1))
    }

    /// Parse options, ignoring unknown flags and unparsable values.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => parse_value(&arg, args.next(), &mut parsed.seed),
                "--radius" => parse_value(&arg, args.next(), &mut parsed.radius),
                "--frames" => parse_value(&arg, args.next(), &mut parsed.frames),
                "--headless" => parsed.headless = true,
                "--walk-forward" => parsed.walk_forward = true,
                other => warn!("Ignoring unknown argument {other}"),
            }
        }

        parsed
    }

    fn session_config(&self) -> SessionConfig {
        let mut config = SessionConfig::default();
        config.world.load_radius = self.radius;
        config.world.terrain.seed = self.seed;
        config
    }
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>, out: &mut T) {
    match value.as_deref().map(str::parse) {
        Some(Ok(v)) => *out = v,
        _ => warn!("Ignoring {flag}: expected a value"),
    }
}

/// Viewer application state.
pub struct Viewer {
    session: GameSession<MemoryBackend>,
    input: InputManager,
    hud_elapsed: f32,
}

impl VoxelApp for Viewer {
    fn init(ctx: &mut AppContext) -> anyhow::Result<Self> {
        let args = ViewerArgs::from_args();
        info!(?args, "starting viewer");

        let mut session = GameSession::new(args.session_config(), MemoryBackend::new())?;
        session.set_aspect(ctx.aspect_ratio());

        let mut input = InputManager::new();
        if ctx.is_headless() && args.walk_forward {
            input.press_key(KeyCode::KeyW);
        }

        info!("Click to capture the mouse, Escape to release it");
        Ok(Self {
            session,
            input,
            hud_elapsed: 0.0,
        })
    }

    fn update(&mut self, ctx: &mut AppContext, dt: f32) {
        for action in self.input.poll_actions() {
            if let Err(e) = self.session.apply_action(action) {
                error!("Failed to apply {action:?}: {e}");
            }
        }

        if let Some(request) = self.input.take_pointer_request() {
            ctx.set_pointer_locked(request == PointerRequest::Lock);
            self.input.set_pointer_locked(ctx.pointer_locked());
        }

        let movement = player_input(&self.input);
        if let Err(e) = self.session.step(dt, &movement) {
            error!("Update error: {e}");
        }
        self.input.end_frame();

        self.hud_elapsed += dt;
        if self.hud_elapsed >= HUD_INTERVAL {
            self.hud_elapsed = 0.0;
            info!("{}", self.session.hud());
        }
    }

    fn render(&mut self, _ctx: &AppContext, _frame: &FrameContext) -> anyhow::Result<()> {
        self.session.render()?;
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn on_resize(&mut self, _ctx: &mut AppContext, width: u32, height: u32) -> anyhow::Result<()> {
        self.session.set_aspect(width as f32 / height as f32);
        Ok(())
    }

    fn on_event(&mut self, event: &WindowEvent) -> bool {
        self.input.process_window_event(event)
    }

    fn on_device_event(&mut self, _device_id: DeviceId, event: &DeviceEvent) {
        self.input.process_device_event(event);
    }

    fn cleanup(&mut self, _ctx: &mut AppContext) {
        let backend = self.session.backend();
        info!(
            uploads = backend.upload_count(),
            renders = backend.render_count(),
            "final {}",
            self.session.hud()
        );
        self.session.shutdown();
    }
}

impl Viewer {
    #[must_use]
    pub fn hud(&self) -> HudSnapshot {
        self.session.hud()
    }
}
