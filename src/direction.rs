/// Canonical movement directions on the grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit offset `(dx, dy)`; y grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Current facing plus the turn waiting for the next tick.
///
/// Any number of requests between two ticks collapse into one effective turn:
/// each accepted request overwrites the pending slot, and validity is always
/// judged against the committed direction, never against the pending one.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DirectionBuffer {
    current: Direction,
    pending: Direction,
}

impl DirectionBuffer {
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            current: direction,
            pending: direction,
        }
    }

    /// Records a turn request. Reversals of the current direction are dropped
    /// silently. Returns whether the request was accepted.
    pub fn request_turn(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.current, direction) {
            return false;
        }

        self.pending = direction;
        true
    }

    /// Makes the pending direction current and returns it.
    pub fn commit(&mut self) -> Direction {
        self.current = self.pending;
        self.current
    }

    #[must_use]
    pub fn current(&self) -> Direction {
        self.current
    }

    #[must_use]
    pub fn pending(&self) -> Direction {
        self.pending
    }
}
