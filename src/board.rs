use crate::{GameError, Position};
use itertools::iproduct;
use ndarray::Array2;
use rand::Rng;

/// Sentinel `value` marking a mine cell.
pub const MINE: i8 = -1;

/// One grid position: the mine/adjacency value plus player-visible state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Either [`MINE`] or the number of mines among the up-to-8 neighbors.
    pub value: i8,
    pub revealed: bool,
    pub flagged: bool,
    pub pos: Position,
}

impl Cell {
    fn covered(pos: Position) -> Self {
        Self {
            value: 0,
            revealed: false,
            flagged: false,
            pos,
        }
    }

    pub fn is_mine(&self) -> bool {
        self.value == MINE
    }
}

/// A rectangular minefield with adjacency counts precomputed.
///
/// Dimensions and mine placement are fixed once generated; only the
/// `revealed`/`flagged` state of cells mutates afterwards. Invariant:
/// exactly `mine_count` cells carry [`MINE`], and every other cell's
/// `value` is the exact number of mines in its in-bounds 8-neighborhood.
#[derive(Debug, Clone)]
pub struct Board {
    cells: Array2<Cell>,
    rows: u32,
    cols: u32,
    mine_count: u32,
}

impl Board {
    /// Generates a board with `mine_count` mines placed uniformly at random.
    pub fn new(rows: u32, cols: u32, mine_count: u32) -> Result<Self, GameError> {
        Self::with_rng(rows, cols, mine_count, &mut rand::thread_rng())
    }

    /// Like [`Board::new`] but drawing randomness from `rng`, so callers
    /// can seed generation for reproducibility.
    pub fn with_rng<R: Rng + ?Sized>(
        rows: u32,
        cols: u32,
        mine_count: u32,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        let mut board = Self::empty(rows, cols, mine_count)?;
        board.place_mines(rng);
        board.compute_adjacency();
        Ok(board)
    }

    /// Builds a board with mines at exactly the given positions, for tests
    /// and callers that need a deterministic layout. Duplicate mine
    /// positions are rejected as `InvalidParameters`.
    pub fn with_mines(rows: u32, cols: u32, mines: &[Position]) -> Result<Self, GameError> {
        let mine_count = mines.len() as u32;
        let mut board = Self::empty(rows, cols, mine_count)?;

        for &pos in mines {
            if !board.is_within_bounds(pos) {
                return Err(GameError::OutOfBounds(pos));
            }
            let cell = board.cell_mut(pos);
            if cell.is_mine() {
                return Err(GameError::InvalidParameters {
                    rows,
                    cols,
                    mines: mine_count,
                });
            }
            cell.value = MINE;
        }

        board.compute_adjacency();
        Ok(board)
    }

    fn empty(rows: u32, cols: u32, mine_count: u32) -> Result<Self, GameError> {
        if rows == 0 || cols == 0 || u64::from(mine_count) > u64::from(rows) * u64::from(cols) {
            return Err(GameError::InvalidParameters {
                rows,
                cols,
                mines: mine_count,
            });
        }

        let cells = Array2::from_shape_fn((rows as usize, cols as usize), |(r, c)| {
            Cell::covered(Position::new(r as i32, c as i32))
        });

        Ok(Self {
            cells,
            rows,
            cols,
            mine_count,
        })
    }

    /// Rejection sampling: pick uniformly random cells, retrying on
    /// collisions, until `mine_count` distinct cells are mined. Terminates
    /// because `mine_count <= rows * cols` was validated up front.
    fn place_mines<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut mines_placed = 0;

        while mines_placed < self.mine_count {
            let row = rng.gen_range(0..self.rows) as usize;
            let col = rng.gen_range(0..self.cols) as usize;

            let cell = &mut self.cells[[row, col]];
            if !cell.is_mine() {
                cell.value = MINE;
                mines_placed += 1;
            }
        }
    }

    /// Fills in `value` for every non-mine cell. Each axis clamps against
    /// its own bound, so edge neighborhoods on non-square boards are
    /// counted correctly.
    fn compute_adjacency(&mut self) {
        for (row, col) in iproduct!(0..self.rows as i32, 0..self.cols as i32) {
            let pos = Position::new(row, col);
            if self.cells[[row as usize, col as usize]].is_mine() {
                continue;
            }

            let count = self
                .neighbors(pos)
                .filter(|&p| self.cells[[p.row as usize, p.col as usize]].is_mine())
                .count() as i8;
            self.cells[[row as usize, col as usize]].value = count;
        }
    }

    pub fn is_within_bounds(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.row < self.rows as i32 && pos.col >= 0 && pos.col < self.cols as i32
    }

    pub fn get_cell(&self, pos: Position) -> Result<&Cell, GameError> {
        if !self.is_within_bounds(pos) {
            return Err(GameError::OutOfBounds(pos));
        }
        Ok(&self.cells[[pos.row as usize, pos.col as usize]])
    }

    /// Access without bounds checking for the state machine. Caller
    /// ensures `pos` is in bounds.
    pub(crate) fn cell_unchecked(&self, pos: Position) -> &Cell {
        &self.cells[[pos.row as usize, pos.col as usize]]
    }

    /// Mutable access for the state machine. Caller ensures `pos` is in
    /// bounds.
    pub(crate) fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        &mut self.cells[[pos.row as usize, pos.col as usize]]
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> + '_ {
        self.cells.iter_mut()
    }

    /// The in-bounds neighbors of `pos`.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        pos.neighbors().filter(|&p| self.is_within_bounds(p))
    }

    pub fn iter_positions(&self) -> impl Iterator<Item = Position> {
        iproduct!(0..self.rows as i32, 0..self.cols as i32)
            .map(|(row, col)| Position::new(row, col))
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    pub fn mine_count(&self) -> u32 {
        self.mine_count
    }
}
