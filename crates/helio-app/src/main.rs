//! The `helio` binary.

use clap::Parser;
use helio_app::frame_loop::FrameLoop;
use helio_app::platform::PlatformDirs;
use helio_app::{AppError, Session};
use helio_config::{CliArgs, Config};
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();
    if let Err(e) = run(&args) {
        error!("{e}");
        eprintln!("helio: {e}");
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<(), AppError> {
    if !args.duration.is_finite() || args.duration < 0.0 {
        return Err(AppError::InvalidDuration(args.duration));
    }

    let dirs = PlatformDirs::resolve()?;
    dirs.create_dirs()?;
    let config_dir = args.config.clone().unwrap_or_else(|| dirs.config_dir.clone());

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(args);

    helio_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!(config = %config_dir.display(), data = %dirs.data_dir.display(), "Starting Helio");

    let mut session = Session::new(&config, &dirs.data_dir)?;
    if let Some(focus) = &args.focus {
        session.driver_mut().fly_to_body(focus)?;
    }

    let mut frames = FrameLoop::new(args.fps)?;
    while frames.elapsed() < args.duration {
        let dt = frames.next_frame();
        session.step(dt);
    }

    let summary = session.finish()?;
    info!(
        frames = summary.frames,
        orbit_updates = summary.orbit_updates,
        sim_date = %summary.sim_date,
        "Helio stopped"
    );
    Ok(())
}
