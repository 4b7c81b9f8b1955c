use super::*;
use duel_core::Seat;
use serde::Serialize;

/// Marker on the board. Seat 0 plays X and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    X,
    O,
}

impl Marker {
    pub fn of(seat: Seat) -> Self {
        match seat {
            0 => Self::X,
            _ => Self::O,
        }
    }
    pub fn owner(&self) -> Seat {
        match self {
            Self::X => 0,
            Self::O => 1,
        }
    }
}

/// The 8 winning lines: rows, columns, diagonals.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Tic-Tac-Toe state: nine cells and whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToe {
    cells: [Option<Marker>; 9],
    turn: Seat,
}

impl TicTacToe {
    pub fn new() -> Self {
        Self {
            cells: [None; 9],
            turn: 0,
        }
    }
    pub fn cells(&self) -> &[Option<Marker>; 9] {
        &self.cells
    }
    pub fn turn(&self) -> Seat {
        self.turn
    }
    /// Claim a cell for the seat's marker. Alternation is strict.
    pub fn apply(&self, seat: Seat, cell: usize) -> Result<Self, RuleViolation> {
        if self.terminal().is_some() {
            return Err(RuleViolation::Terminal);
        }
        if seat != self.turn {
            return Err(RuleViolation::OutOfTurn);
        }
        if cell >= self.cells.len() {
            return Err(RuleViolation::CellOutOfBounds(cell));
        }
        if self.cells[cell].is_some() {
            return Err(RuleViolation::CellTaken(cell));
        }
        let mut next = self.clone();
        next.cells[cell] = Some(Marker::of(seat));
        next.turn = seat ^ 1;
        Ok(next)
    }
    /// Scans the 8 fixed lines; a full board with no line is a draw.
    pub fn terminal(&self) -> Option<Outcome> {
        for line in LINES {
            if let [Some(a), Some(b), Some(c)] = line.map(|i| self.cells[i]) {
                if a == b && b == c {
                    return Some(Outcome::Winner(a.owner()));
                }
            }
        }
        if self.cells.iter().all(Option::is_some) {
            return Some(Outcome::Draw);
        }
        None
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(moves: &[(Seat, usize)]) -> TicTacToe {
        moves.iter().fold(TicTacToe::new(), |state, &(seat, cell)| {
            state.apply(seat, cell).unwrap()
        })
    }

    #[test]
    fn x_wins_middle_row_on_fifth_move() {
        let prefix = play(&[(0, 4), (1, 0), (0, 3), (1, 6)]);
        assert_eq!(prefix.terminal(), None);
        let done = prefix.apply(0, 5).unwrap();
        assert_eq!(done.terminal(), Some(Outcome::Winner(0)));
    }
    #[test]
    fn x_moves_first() {
        assert_eq!(TicTacToe::new().apply(1, 0), Err(RuleViolation::OutOfTurn));
    }
    #[test]
    fn alternation_is_enforced() {
        let state = play(&[(0, 0)]);
        assert_eq!(state.apply(0, 1), Err(RuleViolation::OutOfTurn));
    }
    #[test]
    fn taken_and_out_of_bounds_cells_are_rejected() {
        let state = play(&[(0, 4)]);
        assert_eq!(state.apply(1, 4), Err(RuleViolation::CellTaken(4)));
        assert_eq!(state.apply(1, 9), Err(RuleViolation::CellOutOfBounds(9)));
    }
    #[test]
    fn full_board_without_line_draws() {
        // x o x / x o o / o x x
        let state = play(&[
            (0, 0),
            (1, 1),
            (0, 2),
            (1, 4),
            (0, 3),
            (1, 5),
            (0, 7),
            (1, 6),
            (0, 8),
        ]);
        assert_eq!(state.terminal(), Some(Outcome::Draw));
    }
    #[test]
    fn no_moves_after_terminal() {
        let state = play(&[(0, 0), (1, 3), (0, 1), (1, 4), (0, 2)]);
        assert_eq!(state.terminal(), Some(Outcome::Winner(0)));
        assert_eq!(state.apply(1, 5), Err(RuleViolation::Terminal));
    }
}
