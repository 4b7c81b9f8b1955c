use super::*;
use duel_core::ConnectionId;
use duel_core::GameId;
use duel_core::Wallet;
use duel_gameplay::GameKind;
use duel_gameplay::Play;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::oneshot;

/// Commands consumed by the coordinator's dispatch loop.
///
/// One command is processed to completion before the next is taken, so
/// events for a given session are handled strictly in receipt order.
pub enum Command {
    /// A connection wants a seat in a game.
    Join {
        conn: ConnectionId,
        tx: UnboundedSender<String>,
        game_id: GameId,
        wallet: Wallet,
        kind: GameKind,
    },
    /// A connection submitted a move. Carries its reply channel so
    /// rejections reach the sender even before a successful join.
    Move {
        conn: ConnectionId,
        tx: UnboundedSender<String>,
        game_id: GameId,
        play: Play,
    },
    /// The transport lost a connection. Always delivered, even on
    /// abrupt network loss; handled idempotently.
    Disconnect { conn: ConnectionId },
    /// Read-only listing for the status surface.
    Snapshot {
        reply: oneshot::Sender<Vec<SessionSummary>>,
    },
    /// Periodic lifecycle sweep: join timeouts and grace evictions.
    Sweep,
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Join {
                game_id, wallet, kind, ..
            } => write!(f, "join game {} by {} ({})", game_id, wallet, kind),
            Self::Move { game_id, play, .. } => write!(f, "game {}: {}", game_id, play),
            Self::Disconnect { conn } => write!(f, "disconnect {}", conn),
            Self::Snapshot { .. } => write!(f, "snapshot"),
            Self::Sweep => write!(f, "sweep"),
        }
    }
}
