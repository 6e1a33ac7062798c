use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use tracing::info;

use hanami_story::{HanamiConfig, StoryScript};
use hanami_tui::event_handler::{EventHandler, TuiEvent};
use hanami_tui::{logging, try_init_tui, App};

#[derive(Parser)]
#[command(version, about = "Nobita and Shizuka's story, told under the cherry trees", long_about = None)]
pub struct Cli {
    /// Start with auto-play disabled
    #[arg(long)]
    no_autoplay: bool,

    /// Seconds between auto-advanced dialogue lines
    #[arg(short, long)]
    interval: Option<u64>,

    /// Disable the ambient heart bursts
    #[arg(long)]
    no_ambient: bool,

    /// Write logs to the hanami data directory
    #[arg(long)]
    log_file: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = HanamiConfig::load_or_default();
    // CLI flags override the config file
    if cli.no_autoplay {
        config.autoplay = false;
    }
    if cli.no_ambient {
        config.ambient_hearts = false;
    }
    if let Some(secs) = cli.interval {
        config.dialogue_interval_secs = secs.max(1);
    }

    let _guard = logging::init_logging("hanami", cli.log_file || config.file_logging)
        .context("Failed to initialize logging")?;

    info!(
        autoplay = config.autoplay,
        interval_secs = config.dialogue_interval_secs,
        "Starting hanami"
    );

    let mut tui = try_init_tui().context("Failed to initialize terminal")?;
    let mut app = App::new(&config, StoryScript::proposal_story(), Instant::now());

    let (event_handler, mut tui_event_rx) = EventHandler::new();
    event_handler.start();

    app.start(Instant::now());

    // Main TUI loop
    tui.draw(&app)?;
    let mut last_render = Instant::now();
    let min_render_interval = Duration::from_millis(33); // ~30 FPS max
    let mut last_tick = Instant::now();

    loop {
        let now = Instant::now();
        if now.duration_since(last_render) >= min_render_interval {
            tui.draw(&app)?;
            last_render = now;
        }

        match tui_event_rx.recv().await {
            Some(TuiEvent::Key(key)) => app.handle_key(key, Instant::now()),
            Some(TuiEvent::Tick) => {
                let now = Instant::now();
                app.on_tick(now, now.duration_since(last_tick));
                last_tick = now;
            }
            Some(TuiEvent::Quit) | None => break,
        }

        if app.should_quit {
            break;
        }
    }

    info!("Shutting down");

    // Explicitly restore terminal before exiting
    drop(tui);

    Ok(())
}
