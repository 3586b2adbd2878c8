/// Keepsake Slideshow - headless memory slideshow host
use clap::{Parser, ValueEnum};
use keepsake_slideshow::{EndOfSlidesPolicy, SessionStatus, SlideshowSession};
use slideshow_cli::{input, load_memories, run_session, CliConfig, RunOptions, SimulatedBackend};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "slideshow-cli")]
#[command(about = "Play a memory slideshow in the terminal", long_about = None)]
#[command(after_help = input::HELP)]
struct Cli {
    /// JSON file with an array of memory records
    memories: PathBuf,

    /// Configuration file path (default: ./slideshow.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Milliseconds between automatic advances
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// What automatic advance does after the last slide
    #[arg(short, long, value_enum)]
    end: Option<EndArg>,

    /// Background music URI to select on start
    #[arg(short, long)]
    music: Option<String>,

    /// Wait for `play` instead of starting music as soon as it loads
    #[arg(long)]
    no_autoplay: bool,

    /// Close after this many automatic advances
    #[arg(long)]
    advances: Option<usize>,

    /// Close after this many seconds
    #[arg(long)]
    seconds: Option<u64>,

    /// Print events to stdout as JSON lines
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum EndArg {
    Loop,
    Pause,
    Close,
}

impl From<EndArg> for EndOfSlidesPolicy {
    fn from(arg: EndArg) -> Self {
        match arg {
            EndArg::Loop => EndOfSlidesPolicy::Loop,
            EndArg::Pause => EndOfSlidesPolicy::Pause,
            EndArg::Close => EndOfSlidesPolicy::Close,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keepsake_slideshow=info,slideshow_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration, then apply command-line overrides
    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(interval_ms) = cli.interval_ms {
        config.slideshow.advance_interval_ms = interval_ms;
    }
    if let Some(end) = cli.end {
        config.slideshow.end_of_slides = end.into();
    }
    if cli.no_autoplay {
        config.slideshow.autoplay_music = false;
    }
    config.validate()?;

    tracing::info!(
        "Advancing every {:?}, {:?} at the end",
        config.slideshow.advance_interval(),
        config.slideshow.end_of_slides
    );

    let memories = load_memories(&cli.memories)?;

    let backend = Arc::new(SimulatedBackend::new(config.audio.load_delay()));
    let mut session = SlideshowSession::new(backend.clone(), config.slideshow, || {
        tracing::info!("Dismissed");
    })?;

    // Commands from stdin; the reader thread is left behind on exit
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        if let Err(e) = input::forward_commands(std::io::stdin().lock(), &tx) {
            tracing::warn!("Stopped reading commands: {}", e);
        }
    });

    let options = RunOptions {
        music: cli.music,
        max_advances: cli.advances,
        duration: cli.seconds.map(Duration::from_secs),
        json_events: cli.json,
    };

    let summary = run_session(&mut session, &memories, rx, &options).await?;

    if summary.activation == SessionStatus::Active {
        tracing::info!(
            "Done: {} automatic advances, {} commands",
            summary.advances,
            summary.commands
        );
    }
    if backend.live_handles() > 0 {
        tracing::warn!("{} audio handles were not released", backend.live_handles());
    }

    Ok(())
}
