use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::direction::{Direction, DirectionBuffer};
use crate::food::place_food;
use crate::geometry::{Cell, GridSize};
use crate::snake::Snake;

/// Lifecycle of one session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Idle,
    Running,
    Paused,
    Over,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
    /// Food was eaten and no free cell remained for the next one.
    BoardFull,
}

/// What one call to [`GameSession::tick`] did.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TickReport {
    /// False when the tick was dropped because the session was not running.
    pub advanced: bool,
    pub ate_food: bool,
    /// New tick interval; the scheduler has to be rearmed with it.
    pub rearm_interval_ms: Option<u64>,
    /// Set when this tick raised the high score.
    pub new_high_score: Option<u32>,
    /// Set when this tick ended the session.
    pub death_reason: Option<DeathReason>,
}

impl TickReport {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.death_reason.is_some()
    }
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub snake: Snake,
    pub food: Cell,
    pub score: u32,
    pub high_score: u32,
    /// High score as it stood when this game began.
    pub previous_high_score: u32,
    pub interval_ms: u64,
    pub tick_count: u64,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    direction: DirectionBuffer,
    config: GameConfig,
    rng: StdRng,
}

impl GameSession {
    /// Creates an idle session seeded from system entropy.
    #[must_use]
    pub fn new(config: GameConfig, high_score: u32) -> Self {
        Self::with_rng(config, high_score, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(config: GameConfig, high_score: u32, seed: u64) -> Self {
        Self::with_rng(config, high_score, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, high_score: u32, rng: StdRng) -> Self {
        let snake = Snake::initial(config.grid);
        let mut session = Self {
            food: snake.head(),
            snake,
            score: 0,
            high_score,
            previous_high_score: high_score,
            interval_ms: config.initial_interval_ms,
            tick_count: 0,
            status: GameStatus::Idle,
            death_reason: None,
            direction: DirectionBuffer::new(Direction::Right),
            config,
            rng,
        };
        session.reinitialize();
        session
    }

    /// Puts the session back to its starting state, keeping the high score
    /// and the random stream.
    pub fn reinitialize(&mut self) {
        self.snake = Snake::initial(self.config.grid);
        self.direction = DirectionBuffer::new(Direction::Right);
        self.score = 0;
        self.previous_high_score = self.high_score;
        self.interval_ms = self.config.initial_interval_ms;
        self.tick_count = 0;
        self.status = GameStatus::Idle;
        self.death_reason = None;
        // A validated config always leaves room beside the starting snake.
        if let Some(food) = place_food(&mut self.rng, self.config.grid, &self.snake) {
            self.food = food;
        }
    }

    /// Records a turn for the next tick; reversals are dropped.
    pub fn request_turn(&mut self, direction: Direction) -> bool {
        self.direction.request_turn(direction)
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        if self.status != GameStatus::Running {
            return report;
        }

        report.advanced = true;
        self.tick_count += 1;

        let direction = self.direction.commit();
        let next_head = self.snake.head().step(direction);

        if !next_head.is_within_bounds(self.config.grid) {
            return self.end(report, DeathReason::WallCollision);
        }

        // The tail still counts: it has not moved out of the way yet.
        if self.snake.occupies(next_head) {
            return self.end(report, DeathReason::SelfCollision);
        }

        self.snake.push_head(next_head);

        if next_head != self.food {
            let _ = self.snake.pop_tail();
            return report;
        }

        report.ate_food = true;
        self.score = self.score.saturating_add(self.config.food_reward);
        debug!("food eaten at {next_head:?}, score {}", self.score);

        if self.score > self.high_score {
            self.high_score = self.score;
            report.new_high_score = Some(self.score);
        }

        if self.interval_ms > self.config.min_interval_ms {
            let next = self.config.next_interval_ms(self.interval_ms);
            if next != self.interval_ms {
                debug!("tick interval {}ms -> {next}ms", self.interval_ms);
                self.interval_ms = next;
                report.rearm_interval_ms = Some(next);
            }
        }

        match place_food(&mut self.rng, self.config.grid, &self.snake) {
            Some(food) => self.food = food,
            None => return self.end(report, DeathReason::BoardFull),
        }

        report
    }

    fn end(&mut self, mut report: TickReport, reason: DeathReason) -> TickReport {
        debug!("session over after {} ticks: {reason:?}", self.tick_count);
        self.status = GameStatus::Over;
        self.death_reason = Some(reason);
        report.death_reason = Some(reason);
        report
    }

    /// Points the snake in `direction`, discarding any pending turn.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = DirectionBuffer::new(direction);
    }

    /// Direction the snake is currently facing.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction.current()
    }

    /// Direction that the next tick will commit.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.direction.pending()
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.config.grid
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns true when this game beat the high score it started with.
    #[must_use]
    pub fn is_new_record(&self) -> bool {
        self.score > self.previous_high_score
    }
}

#[cfg(test)]
mod tests {
    use super::{DeathReason, GameSession, GameStatus};
    use crate::config::GameConfig;
    use crate::direction::Direction;
    use crate::geometry::{Cell, GridSize};
    use crate::snake::Snake;

    fn running_session(seed: u64) -> GameSession {
        let mut session = GameSession::new_with_seed(GameConfig::default(), 0, seed);
        session.status = GameStatus::Running;
        session
    }

    fn body(session: &GameSession) -> Vec<Cell> {
        session.snake.segments().copied().collect()
    }

    #[test]
    fn plain_tick_moves_head_and_drops_tail() {
        let mut session = running_session(1);
        session.food = Cell::new(0, 0);

        let report = session.tick();

        assert!(report.advanced);
        assert!(!report.ate_food);
        assert_eq!(
            body(&session),
            vec![Cell::new(11, 10), Cell::new(10, 10), Cell::new(9, 10)]
        );
    }

    #[test]
    fn eating_grows_scores_and_speeds_up() {
        let mut session = running_session(2);
        session.food = Cell::new(11, 10);

        let report = session.tick();

        assert!(report.ate_food);
        assert_eq!(session.score, 10);
        assert_eq!(
            body(&session),
            vec![
                Cell::new(11, 10),
                Cell::new(10, 10),
                Cell::new(9, 10),
                Cell::new(8, 10)
            ]
        );
        assert_eq!(session.interval_ms, 145);
        assert_eq!(report.rearm_interval_ms, Some(145));
        assert!(!session.snake.occupies(session.food));
    }

    #[test]
    fn wall_collision_keeps_body_and_commits_direction() {
        let mut session = running_session(3);
        session.snake = Snake::from_segments(vec![
            Cell::new(0, 10),
            Cell::new(0, 11),
            Cell::new(0, 12),
        ]);
        session.set_direction(Direction::Up);
        assert!(session.request_turn(Direction::Left));
        let before = body(&session);

        let report = session.tick();

        assert_eq!(report.death_reason, Some(DeathReason::WallCollision));
        assert_eq!(session.status, GameStatus::Over);
        assert_eq!(body(&session), before);
        assert_eq!(session.direction(), Direction::Left);
    }

    #[test]
    fn moving_into_tail_cell_is_self_collision() {
        let mut session = running_session(4);
        // 2x2 loop: the head steps onto the current tail.
        session.snake = Snake::from_segments(vec![
            Cell::new(5, 5),
            Cell::new(6, 5),
            Cell::new(6, 6),
            Cell::new(5, 6),
        ]);
        session.food = Cell::new(0, 0);
        session.request_turn(Direction::Down);

        let report = session.tick();

        assert_eq!(report.death_reason, Some(DeathReason::SelfCollision));
        assert_eq!(session.snake.len(), 4);
    }

    #[test]
    fn tick_outside_running_is_ignored() {
        let mut session = GameSession::new_with_seed(GameConfig::default(), 0, 5);
        let before = body(&session);

        for status in [GameStatus::Idle, GameStatus::Paused, GameStatus::Over] {
            session.status = status;
            let report = session.tick();
            assert!(!report.advanced);
            assert_eq!(body(&session), before);
            assert_eq!(session.tick_count, 0);
        }
    }

    #[test]
    fn interval_never_drops_below_floor() {
        let config = GameConfig {
            initial_interval_ms: 52,
            interval_step_ms: 5,
            min_interval_ms: 50,
            ..GameConfig::default()
        };
        let mut session = GameSession::new_with_seed(config, 0, 6);
        session.status = GameStatus::Running;

        session.food = Cell::new(11, 10);
        assert_eq!(session.tick().rearm_interval_ms, Some(50));

        session.food = Cell::new(12, 10);
        let report = session.tick();
        assert!(report.ate_food);
        assert_eq!(report.rearm_interval_ms, None);
        assert_eq!(session.interval_ms, 50);
    }

    #[test]
    fn high_score_only_rises() {
        let mut session = GameSession::new_with_seed(GameConfig::default(), 15, 7);
        session.status = GameStatus::Running;

        session.food = Cell::new(11, 10);
        assert_eq!(session.tick().new_high_score, None);
        assert_eq!(session.high_score, 15);

        session.food = Cell::new(12, 10);
        assert_eq!(session.tick().new_high_score, Some(20));
        assert_eq!(session.high_score, 20);
        assert!(session.is_new_record());
    }

    #[test]
    fn huge_reward_saturates_score() {
        let config = GameConfig {
            food_reward: u32::MAX,
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());
        let mut session = GameSession::new_with_seed(config, 0, 12);
        session.status = GameStatus::Running;

        session.food = Cell::new(11, 10);
        assert!(session.tick().ate_food);
        session.food = Cell::new(12, 10);
        let report = session.tick();

        assert!(report.ate_food);
        assert_eq!(session.score, u32::MAX);
        assert_eq!(session.high_score, u32::MAX);
        assert_eq!(session.status, GameStatus::Running);
    }

    #[test]
    fn last_food_on_full_board_ends_session() {
        let config = GameConfig {
            grid: GridSize {
                width: 4,
                height: 1,
            },
            ..GameConfig::default()
        };
        let mut session = GameSession::new_with_seed(config, 0, 8);
        session.status = GameStatus::Running;
        // Initial snake: (2,0) (1,0) (0,0); the only free cell is (3,0).
        assert_eq!(session.food, Cell::new(3, 0));

        let report = session.tick();

        assert!(report.ate_food);
        assert_eq!(report.death_reason, Some(DeathReason::BoardFull));
        assert_eq!(session.status, GameStatus::Over);
        assert_eq!(session.score, 10);
    }

    #[test]
    fn reinitialize_restores_starting_state() {
        let mut session = running_session(9);
        session.food = Cell::new(11, 10);
        session.tick();

        session.reinitialize();

        assert_eq!(session.status, GameStatus::Idle);
        assert_eq!(session.score, 0);
        assert_eq!(session.snake.len(), 3);
        assert_eq!(session.interval_ms, 150);
        assert_eq!(session.direction(), Direction::Right);
        assert_eq!(session.high_score, 10);
    }
}
