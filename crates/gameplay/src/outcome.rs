use duel_core::GUESS_MAX;
use duel_core::GUESS_MIN;
use duel_core::Seat;

/// Terminal result of a minigame, by seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Seat),
    Draw,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Winner(seat) => write!(f, "seat {} wins", seat),
            Self::Draw => write!(f, "draw"),
        }
    }
}

/// A rejected move.
///
/// Local and recoverable: reported to the offending connection only,
/// the session state is left untouched. Never fatal to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    /// Not this seat's move to make.
    OutOfTurn,
    /// Move shape does not belong to this session's game kind.
    WrongGame,
    /// Cell index outside the board.
    CellOutOfBounds(usize),
    /// Cell already claimed.
    CellTaken(usize),
    /// Choice already submitted for the current round.
    AlreadyChosen,
    /// Guess or target outside the declared range.
    OutOfRange(u32),
    /// The secret target may only be set once.
    TargetAlreadySet,
    /// Guessing cannot start before the target is set.
    TargetNotSet,
    /// The match already reached a terminal state.
    Terminal,
}

impl std::fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfTurn => write!(f, "not your turn"),
            Self::WrongGame => write!(f, "move does not belong to this game"),
            Self::CellOutOfBounds(cell) => write!(f, "cell {} is off the board", cell),
            Self::CellTaken(cell) => write!(f, "cell {} is already taken", cell),
            Self::AlreadyChosen => write!(f, "choice already submitted for this round"),
            Self::OutOfRange(value) => {
                write!(f, "{} is outside {}..={}", value, GUESS_MIN, GUESS_MAX)
            }
            Self::TargetAlreadySet => write!(f, "the target is already set"),
            Self::TargetNotSet => write!(f, "no target has been set yet"),
            Self::Terminal => write!(f, "the match is already over"),
        }
    }
}

impl std::error::Error for RuleViolation {}
