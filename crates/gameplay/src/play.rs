use super::*;
use serde::Deserialize;
use serde::Serialize;

/// A single inbound move, shaped per game kind.
///
/// The shape is validated structurally by serde at the transport edge;
/// whether the move is *legal* (right seat, right moment, free cell,
/// in-range value) is the engine's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Play {
    /// Claim a Tic-Tac-Toe cell (row-major, 0..9).
    Mark { cell: usize },
    /// Throw a Rock-Paper-Scissors choice for the current round.
    Throw { choice: Choice },
    /// Guess the secret number.
    Guess { value: u32 },
    /// Set the secret number. First joiner only, once, before any guesses.
    Target { value: u32 },
}

impl Play {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mark { .. } => "mark",
            Self::Throw { .. } => "throw",
            Self::Guess { .. } => "guess",
            Self::Target { .. } => "target",
        }
    }
}

impl std::fmt::Display for Play {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mark { cell } => write!(f, "mark {}", cell),
            Self::Throw { choice } => write!(f, "throw {}", choice),
            Self::Guess { value } => write!(f, "guess {}", value),
            Self::Target { .. } => write!(f, "set target"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn deserialize_tagged_shapes() {
        let mark: Play = serde_json::from_str(r#"{"type":"mark","cell":4}"#).unwrap();
        assert_eq!(mark, Play::Mark { cell: 4 });
        let throw: Play = serde_json::from_str(r#"{"type":"throw","choice":"rock"}"#).unwrap();
        assert_eq!(throw, Play::Throw { choice: Choice::Rock });
        assert!(serde_json::from_str::<Play>(r#"{"type":"mark"}"#).is_err());
    }
    #[test]
    fn target_display_never_leaks_the_value() {
        let play = Play::Target { value: 42 };
        assert!(!play.to_string().contains("42"));
    }
}
