use serde::{Deserialize, Serialize};

use crate::direction::Direction;

/// Grid position in logical cell coordinates.
///
/// Coordinates are signed so that a step off the board is representable
/// and can be rejected by [`Cell::is_within_bounds`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the cell lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one unit away in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Logical board dimensions in cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Iterates over every cell, row by row.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let width = i32::from(self.width);
        (0..i32::from(self.height)).flat_map(move |y| (0..width).map(move |x| Cell { x, y }))
    }
}

/// Size of one cell on the drawing surface.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CellSize {
    pub width: u16,
    pub height: u16,
}

/// Axis-aligned rectangle on the drawing surface, relative to the board origin.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PixelRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// Maps a cell to its rectangle on the drawing surface.
///
/// Returns `None` for cells outside `bounds` or whose rectangle would not fit
/// the surface coordinate range.
#[must_use]
pub fn cell_rect(cell: Cell, bounds: GridSize, size: CellSize) -> Option<PixelRect> {
    if !cell.is_within_bounds(bounds) {
        return None;
    }

    let x = u16::try_from(cell.x).ok()?.checked_mul(size.width)?;
    let y = u16::try_from(cell.y).ok()?.checked_mul(size.height)?;

    Some(PixelRect {
        x,
        y,
        width: size.width,
        height: size.height,
    })
}

/// Returns the surface extent covered by a whole board.
#[must_use]
pub fn board_extent(bounds: GridSize, size: CellSize) -> (u16, u16) {
    (
        bounds.width.saturating_mul(size.width),
        bounds.height.saturating_mul(size.height),
    )
}
