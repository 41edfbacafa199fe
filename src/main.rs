//! Whaleshark headless runner.
//!
//! Builds the game world, plugs in a scripted demo player and drives frames
//! at a fixed host rate:
//!
//! 1. Load `config.ini` (missing keys keep their defaults)
//! 2. Build the world, open the save file and start the audio log thread
//! 3. Run frames until the frame budget is spent or quit is requested
//! 4. Stop the audio thread and print a session summary
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --frames 600
//! RUST_LOG=debug cargo run -- --frames 120 --seed 7 --debug
//! ```

use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

use whaleshark::game::{DemoInput, GameLoop, build_world, report_session};
use whaleshark::resources::audio::shutdown_audio;
use whaleshark::resources::gameconfig::GameConfig;
use whaleshark::resources::input::InputDriver;
use whaleshark::resources::save::{JsonFileStore, SaveService};
use whaleshark::systems::audio::audio_log_thread;
use whaleshark::systems::debughud::setup_debug_hud;

#[derive(Parser, Debug)]
#[command(version, about = "Run the platformer core headless")]
struct Cli {
    /// INI configuration file.
    #[arg(long, default_value = "./config.ini")]
    config: PathBuf,
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u64,
    /// Save file; overrides the one named in the configuration.
    #[arg(long)]
    save: Option<PathBuf>,
    /// Host frame rate; overrides the configured target.
    #[arg(long)]
    fps: Option<u32>,
    /// Seed for the demo player.
    #[arg(long)]
    seed: Option<u64>,
    /// Enable the developer overlay (readout logged at debug level).
    #[arg(long)]
    debug: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if let Some(path) = cli.save {
        config.save_path = path;
    }
    if let Some(fps) = cli.fps {
        config.target_fps = fps;
    }
    let dt = config.frame_delta();
    let save = SaveService::new(JsonFileStore::new(config.save_path.clone()));

    let (mut world, audio_rx) = build_world(config, save);
    let demo = match cli.seed {
        Some(seed) => DemoInput::seeded(seed),
        None => DemoInput::new(),
    };
    world.insert_resource(InputDriver::new(demo));
    if cli.debug {
        setup_debug_hud(&mut world);
    }

    let audio_thread = std::thread::spawn(move || audio_log_thread(audio_rx));

    let mut game = GameLoop::new(world);
    info!("running {} frames at {:.4}s", cli.frames, dt);
    for _ in 0..cli.frames {
        game.frame(dt);
        if game.should_quit() {
            info!("quit requested; stopping early");
            break;
        }
    }

    report_session(&game.world);
    shutdown_audio(&mut game.world);
    if audio_thread.join().is_err() {
        warn!("audio thread panicked");
    }
}
