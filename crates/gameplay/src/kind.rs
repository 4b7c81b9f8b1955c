use serde::Deserialize;
use serde::Serialize;

/// Which minigame a session runs.
///
/// Chosen once at session creation (it arrives with the first join event)
/// and fixed for the session's lifetime; every subsequent move is
/// dispatched to the matching engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    TicTacToe,
    RockPaperScissors,
    NumberGuessing,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [
        Self::TicTacToe, //
        Self::RockPaperScissors,
        Self::NumberGuessing,
    ];
    /// Human-readable label for logs and the status surface.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TicTacToe => "Tic Tac Toe",
            Self::RockPaperScissors => "Rock Paper Scissors",
            Self::NumberGuessing => "Number Guessing",
        }
    }
}

impl TryFrom<&str> for GameKind {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "tic_tac_toe" | "Tic Tac Toe" => Ok(Self::TicTacToe),
            "rock_paper_scissors" | "Rock Paper Scissors" => Ok(Self::RockPaperScissors),
            "number_guessing" | "Number Guessing" => Ok(Self::NumberGuessing),
            other => Err(anyhow::anyhow!("unknown game type: {}", other)),
        }
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TicTacToe => write!(f, "tic_tac_toe"),
            Self::RockPaperScissors => write!(f, "rock_paper_scissors"),
            Self::NumberGuessing => write!(f, "number_guessing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn parse_wire_names() {
        assert_eq!(GameKind::try_from("tic_tac_toe").unwrap(), GameKind::TicTacToe);
        assert_eq!(
            GameKind::try_from("Rock Paper Scissors").unwrap(),
            GameKind::RockPaperScissors
        );
        assert!(GameKind::try_from("chess").is_err());
    }
    #[test]
    fn display_roundtrips() {
        for kind in GameKind::ALL {
            assert_eq!(GameKind::try_from(kind.to_string().as_str()).unwrap(), kind);
        }
    }
}
