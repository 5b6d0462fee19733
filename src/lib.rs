//! Grid-based Snake: a timer-paced tick engine with a terminal front end.
//!
//! The core (`direction`, `snake`, `food`, `game`, `controller`) is free of
//! I/O. Timing and persistence are reached through the [`scheduler::Scheduler`]
//! and [`score::HighScoreStore`] traits; drawing and keyboard input live in
//! `renderer`, `ui` and `input`.

pub mod config;
pub mod controller;
pub mod direction;
pub mod food;
pub mod game;
pub mod geometry;
pub mod input;
pub mod renderer;
pub mod scheduler;
pub mod score;
pub mod snake;
pub mod terminal;

pub mod ui {
    pub mod hud;
    pub mod menu;
}
