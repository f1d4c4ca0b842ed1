use super::{Role, BOARD_SIZE};
use crate::error::SessionError;
use crate::services::win_conditions;

/// A position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    row: usize,
    col: usize,
}

impl Cell {
    /// Create a cell, checking that both coordinates are on the board
    ///
    /// # Errors
    ///
    /// Returns `CellOutOfRange` if `row` or `col` is not in `0..3`
    pub fn new(row: usize, col: usize) -> Result<Self, SessionError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(SessionError::CellOutOfRange { row, col });
        }
        Ok(Self { row, col })
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Iterate over all nine cells, row by row
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Cell { row, col }))
    }
}

/// 3x3 grid of optional role marks
///
/// The board is `Copy`, so every placement yields a fresh value and earlier
/// snapshots never observe later moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [[Option<Role>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from explicit rows
    #[cfg(test)]
    pub fn from_rows(cells: [[Option<Role>; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Mark at the given cell, if any
    pub fn get(&self, cell: Cell) -> Option<Role> {
        self.cells[cell.row][cell.col]
    }

    /// Rows of the grid, top to bottom
    pub fn rows(&self) -> &[[Option<Role>; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Place a mark for `role`
    ///
    /// # Errors
    ///
    /// Returns `IllegalMove` if the cell is already occupied
    pub fn place(&self, role: Role, cell: Cell) -> Result<Board, SessionError> {
        if self.get(cell).is_some() {
            return Err(SessionError::IllegalMove {
                row: cell.row,
                col: cell.col,
            });
        }

        let mut next = *self;
        next.cells[cell.row][cell.col] = Some(role);
        Ok(next)
    }

    /// True when all nine cells hold a mark
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// Number of marks placed so far
    pub fn mark_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Role owning the first completed line, if any
    pub fn winner(&self) -> Option<Role> {
        win_conditions::determine_winner(self)
    }
}
