//! voxelwalk viewer
//!
//! Walk around procedurally generated block terrain, dig and build.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p voxelwalk-viewer -- [OPTIONS]
//! ```
//!
//! ## Controls
//!
//! - Click to capture the mouse, `Escape` to release it
//! - `W`/`A`/`S`/`D` move, `Space` jumps, hold `Shift` to walk
//! - Left click removes the targeted block, right click places one
//! - `1`..`6` select Dirt, Grass, Stone, Wood, Leaves, Water
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod app;

use tracing::info;
use voxelwalk_app::{run_app, run_headless, AppConfig};

use crate::app::{Viewer, ViewerArgs};

const WIDTH: u32 = 1280;
const HEIGHT: u32 = 720;
const TARGET_FPS: u32 = 144;

fn main() -> anyhow::Result<()> {
    // Check for help flag before starting the app
    if std::env::args().any(|arg| arg == "-h" || arg == "--help") {
        print_help();
        return Ok(());
    }

    let args = ViewerArgs::from_args();
    let config = AppConfig::new("voxelwalk")
        .with_size(WIDTH, HEIGHT)
        .with_target_fps(TARGET_FPS);

    if args.headless {
        let viewer = run_headless::<Viewer>(config.with_target_fps(60), args.frames)?;
        info!(hud = %viewer.hud(), "headless run finished");
        return Ok(());
    }

    run_app::<Viewer>(config)
}

fn print_help() {
    eprintln!(
        "voxelwalk viewer

USAGE:
    cargo run -p voxelwalk-viewer -- [OPTIONS]

WORLD OPTIONS:
    --seed <N>              Terrain seed (default: 0)
    --radius <N>            Chunk load radius around the player (default: 4)

HEADLESS OPTIONS:
    --headless              Run without a window at a fixed 60 FPS step
    --frames <N>            Frames to simulate when headless (default: 600)
    --walk-forward          Hold the forward key for the whole headless run

OTHER:
    -h, --help              Print this help message

CONTROLS:
    Click                   Capture the mouse
    Escape                  Release the mouse
    W A S D                 Move
    Space                   Jump
    Shift                   Walk
    Left / right click      Remove / place block
    1..6                    Select Dirt, Grass, Stone, Wood, Leaves, Water

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log level (e.g., info, debug, trace)"
    );
}
