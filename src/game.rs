use crate::{Board, Cell, GameError, Position};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Reveal,
    Flag,
}

/// One game session: a board plus win/loss bookkeeping.
///
/// Created per session from generation parameters, mutated in place by
/// reveal/flag operations, and read-only once the status turns terminal.
/// There is no in-place reset; a new game is a new `Game`.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    status: GameStatus,
    cells_remaining: u32,
    flagged_count: u32,
}

impl Game {
    pub fn new(rows: u32, cols: u32, mine_count: u32) -> Result<Self, GameError> {
        Ok(Self::from_board(Board::new(rows, cols, mine_count)?))
    }

    /// Like [`Game::new`] but with caller-supplied randomness for
    /// reproducible boards.
    pub fn with_rng<R: Rng + ?Sized>(
        rows: u32,
        cols: u32,
        mine_count: u32,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        Ok(Self::from_board(Board::with_rng(
            rows, cols, mine_count, rng,
        )?))
    }

    /// Wraps an already generated board in a fresh session.
    pub fn from_board(board: Board) -> Self {
        let (rows, cols) = board.dimensions();
        let cells_remaining = rows * cols - board.mine_count();
        Self {
            board,
            status: GameStatus::InProgress,
            cells_remaining,
            flagged_count: 0,
        }
    }

    /// Single dispatch point for UI collaborators.
    pub fn perform_action(&mut self, pos: Position, action: Action) -> Result<(), GameError> {
        match action {
            Action::Reveal => self.reveal(pos),
            Action::Flag => self.toggle_flag(pos),
        }
    }

    /// Opens the cell at `pos`.
    ///
    /// Already-revealed and flagged targets are no-ops: a flag protects its
    /// cell from accidental reveal and must be toggled off first. Revealing
    /// a mine discloses the entire board and loses the game; revealing a
    /// zero-value cell expands its whole region.
    pub fn reveal(&mut self, pos: Position) -> Result<(), GameError> {
        self.check_in_progress()?;
        let cell = *self.board.get_cell(pos)?;

        if cell.revealed || cell.flagged {
            return Ok(());
        }

        if cell.is_mine() {
            self.disclose_all();
            self.status = GameStatus::Lost;
        } else if cell.value == 0 {
            self.flood_reveal(pos);
        } else {
            self.reveal_cell(pos);
        }

        Ok(())
    }

    /// Flips the flag on an unrevealed cell. Flags carry no win/loss
    /// weight; they only block [`Game::reveal`] on their cell.
    pub fn toggle_flag(&mut self, pos: Position) -> Result<(), GameError> {
        self.check_in_progress()?;
        if self.board.get_cell(pos)?.revealed {
            return Err(GameError::AlreadyRevealed(pos));
        }

        let cell = self.board.cell_mut(pos);
        cell.flagged = !cell.flagged;
        if cell.flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }

        Ok(())
    }

    /// Work-list expansion of a zero-value region: zero cells pull their
    /// unrevealed neighbors onto the list, numbered cells reveal without
    /// expanding. `revealed` doubles as the visited marker, so each cell
    /// is processed at most once per call.
    fn flood_reveal(&mut self, start: Position) {
        let mut to_visit = vec![start];

        while let Some(pos) = to_visit.pop() {
            let cell = *self.board.cell_unchecked(pos);
            if cell.revealed {
                continue;
            }
            self.reveal_cell(pos);

            if cell.value == 0 {
                to_visit.extend(
                    self.board
                        .neighbors(pos)
                        .filter(|&p| !self.board.cell_unchecked(p).revealed),
                );
            }
        }
    }

    /// Marks one non-mine cell revealed, clears its flag, decrements
    /// `cells_remaining` exactly once, then checks the win condition.
    fn reveal_cell(&mut self, pos: Position) {
        let cell = self.board.cell_mut(pos);
        cell.revealed = true;
        let was_flagged = std::mem::replace(&mut cell.flagged, false);
        if was_flagged {
            self.flagged_count -= 1;
        }

        self.cells_remaining -= 1;
        if self.cells_remaining == 0 {
            self.status = GameStatus::Won;
        }
    }

    /// The canonical "game over" reveal: every cell opened, every flag
    /// cleared, mines included.
    fn disclose_all(&mut self) {
        for cell in self.board.cells_mut() {
            cell.revealed = true;
            cell.flagged = false;
        }
        self.flagged_count = 0;
    }

    fn check_in_progress(&self) -> Result<(), GameError> {
        if self.status == GameStatus::InProgress {
            Ok(())
        } else {
            Err(GameError::GameAlreadyOver)
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn get_cell(&self, pos: Position) -> Result<&Cell, GameError> {
        self.board.get_cell(pos)
    }

    /// Non-mine cells still unrevealed; the game is won when this reaches
    /// zero.
    pub fn cells_remaining(&self) -> u32 {
        self.cells_remaining
    }

    /// Mines minus placed flags. Informational only; goes negative when
    /// the player over-flags.
    pub fn flags_remaining(&self) -> i64 {
        i64::from(self.board.mine_count()) - i64::from(self.flagged_count)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.board.dimensions()
    }

    pub fn mine_count(&self) -> u32 {
        self.board.mine_count()
    }
}

#[cfg(test)]
mod tests {
    use super::GameStatus::*;
    use super::*;
    use crate::Board;

    fn game_with_mines(rows: u32, cols: u32, mines: &[Position]) -> Game {
        Game::from_board(Board::with_mines(rows, cols, mines).unwrap())
    }

    fn revealed_positions(game: &Game) -> Vec<Position> {
        let (rows, cols) = game.dimensions();
        let mut out = Vec::new();
        for row in 0..rows as i32 {
            for col in 0..cols as i32 {
                let pos = Position::new(row, col);
                if game.get_cell(pos).unwrap().revealed {
                    out.push(pos);
                }
            }
        }
        out
    }

    #[test]
    fn test_single_cell_reveal_decrements_once() {
        let mut game = game_with_mines(3, 3, &[Position::new(0, 0)]);
        let before = game.cells_remaining();

        game.reveal(Position::new(0, 1)).unwrap();

        assert_eq!(game.cells_remaining(), before - 1);
        assert_eq!(game.status(), InProgress);
        assert!(game.get_cell(Position::new(0, 1)).unwrap().revealed);
    }

    #[test]
    fn test_revealing_revealed_cell_is_noop() {
        let mut game = game_with_mines(3, 3, &[Position::new(0, 0)]);
        game.reveal(Position::new(0, 1)).unwrap();
        let before = game.cells_remaining();

        game.reveal(Position::new(0, 1)).unwrap();

        assert_eq!(game.cells_remaining(), before);
    }

    #[test]
    fn test_flood_fill_wins_three_by_three() {
        // One mine in the corner, reveal the opposite corner (value 0).
        // The flood opens every non-mine cell, winning immediately.
        let mut game = game_with_mines(3, 3, &[Position::new(0, 0)]);

        game.reveal(Position::new(2, 2)).unwrap();

        assert_eq!(game.status(), Won);
        assert_eq!(game.cells_remaining(), 0);
        assert!(!game.get_cell(Position::new(0, 0)).unwrap().revealed);
        assert_eq!(revealed_positions(&game).len(), 8);
    }

    #[test]
    fn test_flood_fill_stops_at_numbered_border() {
        // 5x1 column with a mine in the middle: the flood from the top must
        // open exactly the zero cell and its numbered border, nothing past
        // the mine.
        let mut game = game_with_mines(5, 1, &[Position::new(2, 0)]);

        game.reveal(Position::new(0, 0)).unwrap();

        assert_eq!(
            revealed_positions(&game),
            vec![Position::new(0, 0), Position::new(1, 0)]
        );
        assert_eq!(game.cells_remaining(), 2);
        assert_eq!(game.status(), InProgress);
    }

    #[test]
    fn test_flood_fill_on_non_square_board() {
        // Mine in one corner of a 2x5 board; flooding from the far side
        // opens all nine safe cells. Exercises per-axis bounds clamping.
        let mut game = game_with_mines(2, 5, &[Position::new(0, 0)]);

        game.reveal(Position::new(0, 4)).unwrap();

        assert_eq!(game.status(), Won);
        assert_eq!(game.cells_remaining(), 0);
        assert!(!game.get_cell(Position::new(0, 0)).unwrap().revealed);
    }

    #[test]
    fn test_flood_fill_reveals_and_unflags_flagged_cells() {
        let mut game = game_with_mines(3, 3, &[Position::new(0, 0)]);
        game.toggle_flag(Position::new(1, 1)).unwrap();
        assert_eq!(game.flags_remaining(), 0);

        game.reveal(Position::new(2, 2)).unwrap();

        let cell = game.get_cell(Position::new(1, 1)).unwrap();
        assert!(cell.revealed);
        assert!(!cell.flagged);
        assert_eq!(game.flags_remaining(), 1);
        assert_eq!(game.status(), Won);
    }

    #[test]
    fn test_revealing_mine_discloses_entire_board() {
        let mines = [
            Position::new(0, 0),
            Position::new(1, 2),
            Position::new(2, 4),
            Position::new(3, 1),
            Position::new(4, 3),
        ];
        let mut game = game_with_mines(5, 5, &mines);
        game.toggle_flag(Position::new(4, 4)).unwrap();

        game.reveal(Position::new(0, 0)).unwrap();

        assert_eq!(game.status(), Lost);
        assert_eq!(revealed_positions(&game).len(), 25);
        for pos in revealed_positions(&game) {
            assert!(!game.get_cell(pos).unwrap().flagged);
        }
        assert_eq!(game.flags_remaining(), 5);
    }

    #[test]
    fn test_flag_blocks_reveal() {
        let mut game = game_with_mines(3, 3, &[Position::new(0, 0)]);
        game.toggle_flag(Position::new(0, 0)).unwrap();

        game.reveal(Position::new(0, 0)).unwrap();

        assert_eq!(game.status(), InProgress);
        assert!(!game.get_cell(Position::new(0, 0)).unwrap().revealed);
    }

    #[test]
    fn test_toggle_flag_twice_restores_state() {
        let mut game = game_with_mines(3, 3, &[Position::new(0, 0)]);
        let before = game.flags_remaining();

        game.toggle_flag(Position::new(1, 1)).unwrap();
        assert_eq!(game.flags_remaining(), before - 1);
        game.toggle_flag(Position::new(1, 1)).unwrap();

        assert!(!game.get_cell(Position::new(1, 1)).unwrap().flagged);
        assert_eq!(game.flags_remaining(), before);
    }

    #[test]
    fn test_flags_remaining_goes_negative_when_overflagged() {
        let mut game = game_with_mines(2, 2, &[Position::new(0, 0)]);
        game.toggle_flag(Position::new(0, 1)).unwrap();
        game.toggle_flag(Position::new(1, 0)).unwrap();

        assert_eq!(game.flags_remaining(), -1);
    }

    #[test]
    fn test_flagging_revealed_cell_is_rejected() {
        let mut game = game_with_mines(3, 3, &[Position::new(0, 0)]);
        game.reveal(Position::new(0, 1)).unwrap();

        assert!(matches!(
            game.toggle_flag(Position::new(0, 1)),
            Err(GameError::AlreadyRevealed(_))
        ));
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let mut game = game_with_mines(3, 3, &[Position::new(0, 0)]);

        assert!(matches!(
            game.reveal(Position::new(3, 0)),
            Err(GameError::OutOfBounds(_))
        ));
        assert!(matches!(
            game.toggle_flag(Position::new(0, -1)),
            Err(GameError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_operations_rejected_after_game_over() {
        let mut game = game_with_mines(2, 2, &[Position::new(0, 0)]);
        game.reveal(Position::new(0, 0)).unwrap();
        assert_eq!(game.status(), Lost);
        let remaining = game.cells_remaining();

        assert!(matches!(
            game.reveal(Position::new(1, 1)),
            Err(GameError::GameAlreadyOver)
        ));
        assert!(matches!(
            game.toggle_flag(Position::new(1, 1)),
            Err(GameError::GameAlreadyOver)
        ));
        assert_eq!(game.status(), Lost);
        assert_eq!(game.cells_remaining(), remaining);
    }

    #[test]
    fn test_win_by_single_cell_reveals() {
        // No zero cells anywhere: each safe cell borders the mine.
        let mut game = game_with_mines(2, 2, &[Position::new(0, 0)]);

        game.reveal(Position::new(0, 1)).unwrap();
        game.reveal(Position::new(1, 0)).unwrap();
        assert_eq!(game.status(), InProgress);
        game.reveal(Position::new(1, 1)).unwrap();

        assert_eq!(game.status(), Won);
        assert_eq!(game.cells_remaining(), 0);
    }

    #[test]
    fn test_perform_action_dispatches() {
        let mut game = game_with_mines(3, 3, &[Position::new(0, 0)]);

        game.perform_action(Position::new(1, 1), Action::Flag)
            .unwrap();
        assert!(game.get_cell(Position::new(1, 1)).unwrap().flagged);

        game.perform_action(Position::new(0, 1), Action::Reveal)
            .unwrap();
        assert!(game.get_cell(Position::new(0, 1)).unwrap().revealed);
    }
}
