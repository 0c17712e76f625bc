/// Grid coordinates of a single cell, fixed at creation and used as the
/// cell's identity. Signed so that neighbor arithmetic on the border stays
/// representable; the board decides which neighbors actually exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Iterates the up-to-8 surrounding positions (Chebyshev distance 1),
    /// without any bounds checking.
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        (-1..=1).flat_map(move |dr| {
            (-1..=1).filter_map(move |dc| {
                if dr == 0 && dc == 0 {
                    None
                } else {
                    Some(Position::new(self.row + dr, self.col + dc))
                }
            })
        })
    }
}
