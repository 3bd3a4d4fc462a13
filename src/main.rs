use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use mazekiller::autopilot::Autopilot;
use mazekiller::config::GameConfig;
use mazekiller::game::{Game, GameEvent, GameMode};
use mazekiller::renderer::Renderer;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless MazeKiller session driven by an autopilot", long_about = None)]
struct Args {
    /// JSON config file; missing fields use the defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for collectible placement and shop prices.
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Frames to simulate before stopping.
    #[arg(short, long, default_value_t = 7200)]
    frames: u64,

    /// Simulated frames per second.
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Start directly on this level instead of the main menu.
    #[arg(short, long)]
    level: Option<u32>,

    /// Write the last rendered gameplay frame to this PNG.
    #[arg(long)]
    screenshot: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn run(args: Args) -> mazekiller::Result<()> {
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let dt = 1.0 / args.fps.max(1.0);

    let mut renderer =
        Renderer::new(config.screen.width, config.screen.height, config.fog_distance);
    let mut game = Game::new(config, args.seed)?;
    if let Some(level) = args.level {
        game.start_level(level)?;
    }

    let mut autopilot = Autopilot::new();
    let mut rendered = false;
    let mut frame = 0;
    while frame < args.frames {
        frame += 1;
        let input = autopilot.next_input(&game);
        for event in game.update(dt, &input) {
            match event {
                GameEvent::CoinCollected { gold } => debug!(frame, gold, total = game.gold(), "coin"),
                GameEvent::BoostCollected => debug!(frame, "speed boost"),
                GameEvent::PursuerNear => debug!(frame, "pursuer close"),
                GameEvent::PursuerFar => debug!(frame, "pursuer gone"),
                other => info!(frame, event = ?other, "session event"),
            }
        }

        if args.screenshot.is_some() && game.mode() == GameMode::Playing {
            renderer.render(&game);
            rendered = true;
        }
        if matches!(game.mode(), GameMode::Won | GameMode::Lost) {
            break;
        }
    }

    info!(
        frames = frame,
        mode = ?game.mode(),
        level = game.current_level(),
        gold = game.gold(),
        "session finished"
    );

    if let Some(path) = &args.screenshot {
        if !rendered {
            renderer.render(&game);
        }
        renderer.framebuffer().save_png(path)?;
        info!(path = %path.display(), "screenshot written");
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "session failed");
            ExitCode::FAILURE
        }
    }
}
