use std::time::Duration;

use log::{debug, error, info, warn};

use crate::config::GameConfig;
use crate::direction::Direction;
use crate::game::{GameSession, GameStatus, TickReport};
use crate::input::GameInput;
use crate::scheduler::Scheduler;
use crate::score::HighScoreStore;

/// Owns the session and routes every lifecycle change, tick and turn
/// request through it.
///
/// The scheduler is armed exactly while the session is running. Every
/// transition is idempotent: asking for the state the session is already in
/// changes nothing.
#[derive(Debug)]
pub struct GameController<S, P> {
    session: GameSession,
    scheduler: S,
    store: P,
}

impl<S: Scheduler, P: HighScoreStore> GameController<S, P> {
    /// Loads the high score once and creates an idle session.
    ///
    /// An unreadable score record is logged and treated as zero.
    pub fn new(config: GameConfig, scheduler: S, mut store: P) -> Self {
        let high_score = store.load().unwrap_or_else(|error| {
            warn!("ignoring unreadable high score: {error}");
            0
        });
        info!("loaded high score {high_score}");

        Self::with_session(GameSession::new(config, high_score), scheduler, store)
    }

    /// Wraps an existing session, e.g. a seeded one.
    pub fn with_session(session: GameSession, scheduler: S, store: P) -> Self {
        Self {
            session,
            scheduler,
            store,
        }
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Direct session access for setting up scenarios.
    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    #[must_use]
    pub fn store(&self) -> &P {
        &self.store
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.session.status
    }

    /// `idle | over -> running`. Starting from `over` begins a fresh game.
    pub fn start(&mut self) -> bool {
        match self.session.status {
            GameStatus::Idle => {}
            GameStatus::Over => self.session.reinitialize(),
            GameStatus::Running | GameStatus::Paused => return false,
        }

        self.session.status = GameStatus::Running;
        self.arm();
        info!("game started");
        true
    }

    /// `running -> paused`.
    pub fn pause(&mut self) -> bool {
        if self.session.status != GameStatus::Running {
            return false;
        }

        self.session.status = GameStatus::Paused;
        self.scheduler.disarm();
        info!("game paused at score {}", self.session.score);
        true
    }

    /// `paused -> running`.
    pub fn resume(&mut self) -> bool {
        if self.session.status != GameStatus::Paused {
            return false;
        }

        self.session.status = GameStatus::Running;
        self.arm();
        info!("game resumed");
        true
    }

    /// Pauses a running game or resumes a paused one.
    pub fn toggle_pause(&mut self) -> bool {
        self.pause() || self.resume()
    }

    /// Returns to `idle` with a fresh snake, food, score and interval.
    /// Always succeeds.
    pub fn reset(&mut self) {
        self.scheduler.disarm();
        self.session.reinitialize();
        info!("game reset");
    }

    /// `running -> over`, stopping the tick source.
    pub fn game_over(&mut self) -> bool {
        if self.session.status != GameStatus::Running {
            return false;
        }

        self.session.status = GameStatus::Over;
        self.scheduler.disarm();
        info!("game over, final score {}", self.session.score);
        true
    }

    /// Forwards a turn request to the direction buffer.
    pub fn request_turn(&mut self, direction: Direction) -> bool {
        self.session.request_turn(direction)
    }

    /// Applies one command from the input source.
    ///
    /// Turns are only taken while running; `Quit` is left to the caller.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                if self.session.status == GameStatus::Running {
                    let _ = self.request_turn(direction);
                }
            }
            GameInput::StartOrPause => {
                if !self.start() {
                    let _ = self.toggle_pause();
                }
            }
            GameInput::Start => {
                let _ = self.start();
            }
            GameInput::TogglePause => {
                let _ = self.toggle_pause();
            }
            GameInput::Reset => self.reset(),
            GameInput::Quit => {}
        }
    }

    /// Runs a tick if the scheduler has one due.
    pub fn update(&mut self) -> Option<TickReport> {
        if !self.scheduler.take_due() {
            return None;
        }

        Some(self.tick())
    }

    /// Advances the session one tick and carries out what the tick asks for:
    /// persisting a new record, rearming at a new speed, or stopping.
    pub fn tick(&mut self) -> TickReport {
        let report = self.session.tick();
        if !report.advanced {
            return report;
        }

        if let Some(high_score) = report.new_high_score {
            if let Err(error) = self.store.save(high_score) {
                error!("failed to save high score {high_score}: {error}");
            }
        }

        if let Some(reason) = report.death_reason {
            self.scheduler.disarm();
            info!(
                "game over ({reason:?}), final score {}",
                self.session.score
            );
            return report;
        }

        if let Some(interval_ms) = report.rearm_interval_ms {
            debug!("rearming tick source at {interval_ms}ms");
            self.scheduler.arm(Duration::from_millis(interval_ms));
        }

        report
    }

    fn arm(&mut self) {
        self.scheduler
            .arm(Duration::from_millis(self.session.interval_ms));
    }
}
