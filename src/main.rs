use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use grid_snake::config::{ConfigError, FRAME_INTERVAL, GameConfig};
use grid_snake::controller::GameController;
use grid_snake::input::{GameInput, InputHandler};
use grid_snake::renderer;
use grid_snake::scheduler::IntervalScheduler;
use grid_snake::score::{HighScoreStore, JsonFileStore, MemoryStore};
use grid_snake::terminal::TerminalGuard;
use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

const LOG_FILE_NAME: &str = "grid-snake.log";

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON file with gameplay settings; the flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Board height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Starting tick interval in milliseconds.
    #[arg(long = "initial-interval")]
    initial_interval: Option<u64>,

    /// Fastest tick interval in milliseconds.
    #[arg(long = "min-interval")]
    min_interval: Option<u64>,

    /// Interval reduction per food, in milliseconds.
    #[arg(long = "interval-step")]
    interval_step: Option<u64>,

    /// High-score file (defaults to the platform data directory).
    #[arg(long = "scores-file", conflicts_with = "no_save")]
    scores_file: Option<PathBuf>,

    /// Keep the high score in memory only.
    #[arg(long = "no-save")]
    no_save: bool,

    /// Log file (defaults to the platform data directory).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    #[arg(long = "log-level", value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Everything printed before the terminal switches to raw mode stays visible.
    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Invalid configuration: {error}");
            return ExitCode::from(2);
        }
    };

    if let Err(error) = init_logging(&cli) {
        eprintln!("Logging disabled: {error}");
    }

    match run(&cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("terminal error: {error}");
            eprintln!("Terminal error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<GameConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };

    if let Some(width) = cli.width {
        config.grid.width = width;
    }
    if let Some(height) = cli.height {
        config.grid.height = height;
    }
    if let Some(initial) = cli.initial_interval {
        config.initial_interval_ms = initial;
    }
    if let Some(min) = cli.min_interval {
        config.min_interval_ms = min;
    }
    if let Some(step) = cli.interval_step {
        config.interval_step_ms = step;
    }

    config.validate()?;
    Ok(config)
}

fn init_logging(cli: &Cli) -> io::Result<()> {
    let level = LevelFilter::from(cli.log_level);
    if level == LevelFilter::Off {
        return Ok(());
    }

    let path = cli.log_file.clone().unwrap_or_else(default_log_path);
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    WriteLogger::init(level, Config::default(), File::create(&path)?)
        .map_err(io::Error::other)
}

fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("grid-snake")
        .join(LOG_FILE_NAME)
}

fn open_store(cli: &Cli) -> Box<dyn HighScoreStore> {
    if cli.no_save {
        return Box::new(MemoryStore::default());
    }

    let store = match &cli.scores_file {
        Some(path) => JsonFileStore::new(path.clone()),
        None => JsonFileStore::default_location(),
    };
    info!("high scores at {}", store.path().display());
    Box::new(store)
}

fn run(cli: &Cli, config: GameConfig) -> io::Result<()> {
    info!(
        "starting on a {}x{} board, {}ms initial tick",
        config.grid.width, config.grid.height, config.initial_interval_ms
    );

    let mut controller = GameController::new(config, IntervalScheduler::new(), open_store(cli));
    let mut input = InputHandler::new();
    let mut guard = TerminalGuard::open()?;

    loop {
        guard
            .terminal_mut()
            .draw(|frame| renderer::render(frame, controller.session()))?;

        let timeout = controller
            .scheduler()
            .time_until_due(Instant::now())
            .map_or(FRAME_INTERVAL, |remaining| remaining.min(FRAME_INTERVAL));

        if let Some(game_input) = input.poll_input(timeout)? {
            if game_input == GameInput::Quit {
                break;
            }

            controller.apply_input(game_input);
        }

        let _ = controller.update();
    }

    info!("quit with high score {}", controller.session().high_score);
    guard.close()
}
