use duel_core::GameId;
use duel_core::Wallet;
use duel_gameplay::GameKind;
use duel_gameplay::Play;
use serde::Deserialize;

/// Messages received from clients over WebSocket.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Attach this connection to a game identifier.
    JoinGame {
        game_id: GameId,
        wallet: Wallet,
        game_type: GameKind,
    },
    /// Submit one move for the session's game.
    GameMove { game_id: GameId, play: Play },
}

/// Errors produced while decoding client frames.
#[derive(Debug, Clone)]
pub enum ProtocolError {
    InvalidFrame(String),
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFrame(s) => write!(f, "invalid frame: {}", s),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// The protocol layer between wire frames and coordinator commands.
pub struct Protocol;

impl Protocol {
    /// Parses a client frame. Failures are local to the frame: the
    /// connection stays open and the session is untouched.
    pub fn decode(s: &str) -> Result<ClientMessage, ProtocolError> {
        serde_json::from_str(s).map_err(|e| ProtocolError::InvalidFrame(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn decode_join() {
        let frame = r#"{"type":"join_game","game_id":12,"wallet":"0xAb","game_type":"tic_tac_toe"}"#;
        match Protocol::decode(frame).unwrap() {
            ClientMessage::JoinGame {
                game_id,
                wallet,
                game_type,
            } => {
                assert_eq!(game_id, 12);
                assert_eq!(wallet, Wallet::new("0xab"));
                assert_eq!(game_type, GameKind::TicTacToe);
            }
            _ => panic!("expected join"),
        }
    }
    #[test]
    fn decode_move() {
        let frame = r#"{"type":"game_move","game_id":12,"play":{"type":"throw","choice":"paper"}}"#;
        assert!(matches!(
            Protocol::decode(frame).unwrap(),
            ClientMessage::GameMove { game_id: 12, .. }
        ));
    }
    #[test]
    fn decode_rejects_malformed_frames() {
        assert!(Protocol::decode("not json").is_err());
        assert!(Protocol::decode(r#"{"type":"join_game"}"#).is_err());
        assert!(Protocol::decode(r#"{"type":"warp","game_id":1}"#).is_err());
    }
}
