use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use raylib::prelude::*;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use carousel::config::PageConfig;
use carousel::constants::*;
use carousel::gallery::load_sorted_image_paths;
use carousel::Mount;

mod engine;
mod texture_loader;

use crate::engine::{CarouselEngine, Gallery};

/// Show image directories as auto-rotating carousels
#[derive(Parser, Debug)]
#[command(name = "carousel", version, about, long_about = None)]
struct Args {
    /// Image directories, one carousel each
    dirs: Vec<PathBuf>,

    /// Time between automatic advances, in milliseconds
    #[arg(long, default_value_t = DEFAULT_INTERVAL_MS, value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: u64,

    /// Page config file listing carousels (overrides DIRS)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Window width
    #[arg(long, default_value_t = RENDER_WIDTH)]
    width: i32,

    /// Window height
    #[arg(long, default_value_t = RENDER_HEIGHT)]
    height: i32,

    /// Frames per second
    #[arg(long, default_value_t = FPS)]
    fps: u32,

    /// Debug logging
    #[arg(long, short)]
    verbose: bool,
}

impl Args {
    /// Carousel mounts paired with the directory feeding each of them.
    fn sources(&self) -> Result<Vec<(Mount, PathBuf)>> {
        if let Some(path) = &self.config {
            let config = PageConfig::load(path)
                .with_context(|| format!("failed to load page config {:?}", path))?;
            return Ok(config
                .carousels
                .iter()
                .map(|c| (c.mount(), c.images.clone()))
                .collect());
        }

        let interval = Duration::from_millis(self.interval_ms);
        Ok(self
            .dirs
            .iter()
            .enumerate()
            .map(|(i, dir)| (Mount::new(format!("carousel-{}", i + 1), interval), dir.clone()))
            .collect())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let sources = args.sources()?;
    if sources.is_empty() {
        bail!("no carousels to show: pass image directories or --config <page.toml>");
    }

    // --- Scan Directories ---
    let galleries: Vec<Gallery> = sources
        .into_iter()
        .map(|(mount, dir)| {
            let images = match load_sorted_image_paths(&dir) {
                Ok(paths) => {
                    if paths.is_empty() {
                        warn!(container = %mount.container_id, "no images in {:?}", dir);
                    }
                    Some(paths)
                }
                Err(e) => {
                    warn!(container = %mount.container_id, "{}", e);
                    None
                }
            };
            Gallery { mount, images }
        })
        .collect();

    let (mut rl, thread) = raylib::init()
        .size(args.width, args.height)
        .title("Carousel")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(args.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut engine = CarouselEngine::initialize(&mut rl, &thread, galleries);
    if engine.active_count() == 0 {
        warn!("no carousel has anything to show");
    }

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        engine.update(dt, &rl);
        engine.render_frame(&mut rl, &thread);
    }

    engine.shutdown();
    info!("bye");
    Ok(())
}
