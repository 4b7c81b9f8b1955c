use super::*;
use duel_core::GameId;
use duel_core::Seat;
use duel_core::Wallet;
use duel_gameplay::GameKind;
use serde::Serialize;

/// Messages sent from server to client over WebSocket.
///
/// Every game-scoped message carries the game identifier so clients
/// can associate frames with the session they joined and discard
/// anything stale.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Join acknowledged: seat assignment and the current state, so a
    /// re-attaching participant resumes exactly where it left off.
    Joined {
        game_id: GameId,
        seat: Seat,
        status: SessionStatus,
        state: serde_json::Value,
    },
    /// The opposing participant took the second seat.
    PeerJoined { game_id: GameId, wallet: Wallet },
    /// Both seats are filled; play begins.
    GameStart {
        game_id: GameId,
        game_type: GameKind,
        wallets: Vec<Wallet>,
    },
    /// A move was accepted; the redacted state both seats may see.
    GameMove {
        game_id: GameId,
        state: serde_json::Value,
    },
    /// Sender's move was rejected; session state is untouched.
    MoveRejected { game_id: GameId, reason: String },
    /// A previously seated participant re-attached.
    PeerRejoined { game_id: GameId, wallet: Wallet },
    /// The opponent disconnected from an active session.
    OpponentLeft { game_id: GameId },
    /// Final authoritative result. Emitted exactly once per session.
    SessionEnded { game_id: GameId, verdict: String },
    /// Request-level failure outside any game rule.
    Error { reason: String },
}

impl ServerMessage {
    pub fn joined(session: &Session, seat: Seat) -> Self {
        Self::Joined {
            game_id: session.game_id(),
            seat,
            status: session.status(),
            state: session.state().snapshot(),
        }
    }
    pub fn peer_joined(game_id: GameId, wallet: &Wallet) -> Self {
        Self::PeerJoined {
            game_id,
            wallet: wallet.clone(),
        }
    }
    pub fn game_start(session: &Session) -> Self {
        Self::GameStart {
            game_id: session.game_id(),
            game_type: session.kind(),
            wallets: session.wallets(),
        }
    }
    pub fn game_move(session: &Session) -> Self {
        Self::GameMove {
            game_id: session.game_id(),
            state: session.state().snapshot(),
        }
    }
    pub fn move_rejected(game_id: GameId, reason: impl std::fmt::Display) -> Self {
        Self::MoveRejected {
            game_id,
            reason: reason.to_string(),
        }
    }
    pub fn peer_rejoined(game_id: GameId, wallet: &Wallet) -> Self {
        Self::PeerRejoined {
            game_id,
            wallet: wallet.clone(),
        }
    }
    pub fn opponent_left(game_id: GameId) -> Self {
        Self::OpponentLeft { game_id }
    }
    pub fn session_ended(game_id: GameId, verdict: &Verdict) -> Self {
        Self::SessionEnded {
            game_id,
            verdict: verdict.to_string(),
        }
    }
    pub fn error(reason: impl std::fmt::Display) -> Self {
        Self::Error {
            reason: reason.to_string(),
        }
    }
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize server message")
    }
}
