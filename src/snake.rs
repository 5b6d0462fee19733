use std::collections::VecDeque;

use crate::geometry::{Cell, GridSize};

/// Number of segments in a freshly spawned snake.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Snake body, head first.
///
/// The body never becomes empty: segments are only removed after a new head
/// has been pushed.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Creates the starting snake: head in the middle of the board with the
    /// rest of the body trailing to the left.
    #[must_use]
    pub fn initial(bounds: GridSize) -> Self {
        let head = Cell::new(i32::from(bounds.width / 2), i32::from(bounds.height / 2));
        let body = (0..INITIAL_SNAKE_LENGTH)
            .map(|offset| Cell::new(head.x - offset as i32, head.y))
            .collect();

        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>) -> Self {
        let snake = Self {
            body: VecDeque::from(segments),
        };
        assert!(!snake.is_empty(), "snake needs at least one segment");
        snake
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Prepends a new head.
    pub fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    /// Drops the tail segment, keeping at least the head.
    pub fn pop_tail(&mut self) -> Option<Cell> {
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}
