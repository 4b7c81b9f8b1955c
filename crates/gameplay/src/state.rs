use super::*;
use duel_core::Seat;

/// Per-session game state, one variant per [`GameKind`].
///
/// The variant is selected when the session is created and never
/// changes; the wrong move shape for the variant is a [`RuleViolation`],
/// not a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameState {
    TicTacToe(TicTacToe),
    RockPaperScissors(RockPaperScissors),
    NumberGuessing(NumberGuessing),
}

impl GameState {
    pub fn new(kind: GameKind) -> Self {
        match kind {
            GameKind::TicTacToe => Self::TicTacToe(TicTacToe::new()),
            GameKind::RockPaperScissors => Self::RockPaperScissors(RockPaperScissors::new()),
            GameKind::NumberGuessing => Self::NumberGuessing(NumberGuessing::new()),
        }
    }
    pub fn kind(&self) -> GameKind {
        match self {
            Self::TicTacToe(_) => GameKind::TicTacToe,
            Self::RockPaperScissors(_) => GameKind::RockPaperScissors,
            Self::NumberGuessing(_) => GameKind::NumberGuessing,
        }
    }
    /// Validate and apply one move, returning the successor state.
    /// A violation leaves the current state untouched.
    pub fn apply(&self, seat: Seat, play: &Play) -> Result<Self, RuleViolation> {
        match (self, play) {
            (Self::TicTacToe(s), Play::Mark { cell }) => {
                s.apply(seat, *cell).map(Self::TicTacToe)
            }
            (Self::RockPaperScissors(s), Play::Throw { choice }) => {
                s.apply(seat, *choice).map(Self::RockPaperScissors)
            }
            (Self::NumberGuessing(s), Play::Target { value }) => {
                s.set_target(seat, *value).map(Self::NumberGuessing)
            }
            (Self::NumberGuessing(s), Play::Guess { value }) => {
                s.guess(seat, *value).map(Self::NumberGuessing)
            }
            _ => Err(RuleViolation::WrongGame),
        }
    }
    pub fn terminal(&self) -> Option<Outcome> {
        match self {
            Self::TicTacToe(s) => s.terminal(),
            Self::RockPaperScissors(s) => s.terminal(),
            Self::NumberGuessing(s) => s.terminal(),
        }
    }
    /// Public projection safe to broadcast to both seats.
    ///
    /// Hides what one side must not see: pending throws stay secret
    /// until the round resolves, and the guessing target stays secret
    /// until the match is over.
    pub fn snapshot(&self) -> serde_json::Value {
        match self {
            Self::TicTacToe(s) => serde_json::json!({
                "game_type": self.kind(),
                "board": s.cells(),
                "turn": s.turn(),
            }),
            Self::RockPaperScissors(s) => serde_json::json!({
                "game_type": self.kind(),
                "scores": s.scores(),
                "round": s.round(),
                "chosen": [s.has_chosen(0), s.has_chosen(1)],
                "last_round": s.last(),
            }),
            Self::NumberGuessing(s) => serde_json::json!({
                "game_type": self.kind(),
                "guesses": s
                    .guesses()
                    .iter()
                    .map(|(value, hint)| serde_json::json!({ "value": value, "hint": hint }))
                    .collect::<Vec<_>>(),
                "remaining": s.remaining(),
                "target_set": s.target().is_some(),
                "target": self.terminal().and(s.target()),
            }),
        }
    }
}
