use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use serde::Deserialize;
use thiserror::Error;

use crate::geometry::{CellSize, GridSize};
use crate::snake::INITIAL_SNAKE_LENGTH;

/// Default board width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 20;

/// Default board height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Tick interval at the start of a session, in milliseconds.
pub const DEFAULT_INITIAL_INTERVAL_MS: u64 = 150;

/// Interval reduction applied each time food is eaten.
pub const DEFAULT_INTERVAL_STEP_MS: u64 = 5;

/// Fastest allowed tick interval.
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 50;

/// Points granted per food.
pub const DEFAULT_FOOD_REWARD: u32 = 10;

/// Terminal footprint of one board cell: two columns keep cells roughly square.
pub const TERMINAL_CELL_SIZE: CellSize = CellSize {
    width: 2,
    height: 1,
};

/// Frame pacing for the render/input loop.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub const GLYPH_CELL: &str = "██";
pub const GLYPH_FOOD: &str = "◆ ";
pub const GLYPH_HEAD_UP: &str = "▀▀";
pub const GLYPH_HEAD_DOWN: &str = "▄▄";
pub const GLYPH_HEAD_LEFT: &str = "▌█";
pub const GLYPH_HEAD_RIGHT: &str = "█▐";

pub const COLOR_HEAD: Color = Color::Green;
/// Body segments cycle through these shades by index.
pub const COLOR_BODY: [Color; 3] = [Color::LightGreen, Color::Yellow, Color::Green];
pub const COLOR_FOOD: Color = Color::Red;
pub const COLOR_BORDER: Color = Color::DarkGray;
pub const COLOR_BORDER_PAUSED: Color = Color::Rgb(0xff, 0x98, 0x00);
pub const COLOR_BORDER_OVER: Color = Color::Rgb(0xf4, 0x43, 0x36);

/// Setup-time configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board must be at least 1x1 cells, got {width}x{height}")]
    EmptyBoard { width: u16, height: u16 },

    #[error(
        "board {width}x{height} is too small for the starting snake; need width >= {min_width} and room for food"
    )]
    BoardTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
    },

    #[error("minimum interval must be positive")]
    ZeroMinInterval,

    #[error("initial interval {initial_ms}ms is below the minimum {min_ms}ms")]
    InitialBelowMinimum { initial_ms: u64, min_ms: u64 },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Fixed gameplay parameters for one process.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub grid: GridSize,
    pub initial_interval_ms: u64,
    pub interval_step_ms: u64,
    pub min_interval_ms: u64,
    pub food_reward: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize {
                width: DEFAULT_GRID_WIDTH,
                height: DEFAULT_GRID_HEIGHT,
            },
            initial_interval_ms: DEFAULT_INITIAL_INTERVAL_MS,
            interval_step_ms: DEFAULT_INTERVAL_STEP_MS,
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
            food_reward: DEFAULT_FOOD_REWARD,
        }
    }
}

impl GameConfig {
    /// Reads a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks the preconditions the tick engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridSize { width, height } = self.grid;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyBoard { width, height });
        }

        // The body trails left of a head placed at width / 2.
        let min_width = (INITIAL_SNAKE_LENGTH as u16 - 1) * 2;
        if width < min_width || self.grid.total_cells() <= INITIAL_SNAKE_LENGTH {
            return Err(ConfigError::BoardTooSmall {
                width,
                height,
                min_width,
            });
        }

        if self.min_interval_ms == 0 {
            return Err(ConfigError::ZeroMinInterval);
        }

        if self.initial_interval_ms < self.min_interval_ms {
            return Err(ConfigError::InitialBelowMinimum {
                initial_ms: self.initial_interval_ms,
                min_ms: self.min_interval_ms,
            });
        }

        Ok(())
    }

    /// Interval after one speed step, clamped at the floor.
    #[must_use]
    pub fn next_interval_ms(&self, current_ms: u64) -> u64 {
        current_ms
            .saturating_sub(self.interval_step_ms)
            .max(self.min_interval_ms)
    }
}
