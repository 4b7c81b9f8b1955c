use super::*;
use duel_core::ConnectionId;
use duel_core::GameId;
use duel_core::SEATS;
use duel_core::Seat;
use duel_core::Wallet;
use duel_gameplay::GameKind;
use duel_gameplay::GameState;
use serde::Serialize;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedSender;

/// Lifecycle status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Waiting for the second participant.
    Forming,
    /// Both seats filled; moves are accepted.
    Active,
    /// A rules engine reported a terminal state.
    Completed,
    /// A participant left mid-game, or the second never arrived.
    Abandoned,
}

impl SessionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Abandoned)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forming => write!(f, "forming"),
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
            Self::Abandoned => write!(f, "abandoned"),
        }
    }
}

/// Final authoritative result forwarded to the settlement ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Winner(Wallet),
    Draw,
    Void,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Winner(wallet) => write!(f, "{}", wallet),
            Self::Draw => write!(f, "draw"),
            Self::Void => write!(f, "void"),
        }
    }
}

/// One seat: who sits there and, while connected, how to reach them.
#[derive(Debug)]
struct SeatState {
    wallet: Wallet,
    conn: Option<(ConnectionId, UnboundedSender<String>)>,
}

/// A live session binding an on-chain game identifier to two
/// participants and the per-kind rules state.
///
/// Lifecycle transitions are driven by [`Registry`]; the session itself
/// only knows who sits where and how to reach them.
#[derive(Debug)]
pub struct Session {
    game_id: GameId,
    kind: GameKind,
    status: SessionStatus,
    seats: Vec<SeatState>,
    state: GameState,
    created: Instant,
    ended: Option<Instant>,
    verdict: Option<Verdict>,
}

impl Session {
    pub fn new(game_id: GameId, kind: GameKind, now: Instant) -> Self {
        Self {
            game_id,
            kind,
            status: SessionStatus::Forming,
            seats: Vec::with_capacity(SEATS),
            state: GameState::new(kind),
            created: now,
            ended: None,
            verdict: None,
        }
    }
    pub fn game_id(&self) -> GameId {
        self.game_id
    }
    pub fn kind(&self) -> GameKind {
        self.kind
    }
    pub fn status(&self) -> SessionStatus {
        self.status
    }
    pub fn state(&self) -> &GameState {
        &self.state
    }
    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }
    pub fn created(&self) -> Instant {
        self.created
    }
    pub fn ended(&self) -> Option<Instant> {
        self.ended
    }
    pub fn wallet(&self, seat: Seat) -> Option<&Wallet> {
        self.seats.get(seat).map(|s| &s.wallet)
    }
    pub fn wallets(&self) -> Vec<Wallet> {
        self.seats.iter().map(|s| s.wallet.clone()).collect()
    }
    pub fn participants(&self) -> usize {
        self.seats.len()
    }
    pub fn seat_of(&self, wallet: &Wallet) -> Option<Seat> {
        self.seats.iter().position(|s| &s.wallet == wallet)
    }
    pub fn seat_of_conn(&self, conn: ConnectionId) -> Option<Seat> {
        self.seats
            .iter()
            .position(|s| s.conn.as_ref().map(|(id, _)| *id) == Some(conn))
    }
    pub fn connected(&self) -> usize {
        self.seats.iter().filter(|s| s.conn.is_some()).count()
    }

    /// Seats a new participant. Caller guarantees capacity.
    pub(crate) fn seat(&mut self, wallet: Wallet, conn: ConnectionId, tx: UnboundedSender<String>) -> Seat {
        self.seats.push(SeatState {
            wallet,
            conn: Some((conn, tx)),
        });
        self.seats.len() - 1
    }
    /// Re-binds a seat to a fresh connection, returning the connection
    /// it replaced, if any.
    pub(crate) fn rebind(
        &mut self,
        seat: Seat,
        conn: ConnectionId,
        tx: UnboundedSender<String>,
    ) -> Option<ConnectionId> {
        let old = self.seats[seat].conn.replace((conn, tx));
        old.map(|(id, _)| id)
    }
    /// Releases the seat bound to this connection, if any.
    pub(crate) fn detach(&mut self, conn: ConnectionId) -> Option<Seat> {
        let seat = self.seat_of_conn(conn)?;
        self.seats[seat].conn = None;
        Some(seat)
    }
    pub(crate) fn set_state(&mut self, state: GameState) {
        self.state = state;
    }
    pub(crate) fn finish(&mut self, status: SessionStatus, verdict: Verdict, now: Instant) {
        self.status = status;
        self.verdict = Some(verdict);
        self.ended = Some(now);
    }
    pub(crate) fn activate(&mut self) {
        self.status = SessionStatus::Active;
    }

    /// Sends a message to a specific seat, if connected.
    pub fn unicast(&self, seat: Seat, message: &ServerMessage) {
        match self.seats.get(seat).and_then(|s| s.conn.as_ref()) {
            Some((_, tx)) => match tx.send(message.to_json()) {
                Ok(()) => log::debug!("[session {}] unicast to seat {}", self.game_id, seat),
                Err(e) => log::warn!(
                    "[session {}] unicast to seat {} failed: {:?}",
                    self.game_id,
                    seat,
                    e
                ),
            },
            None => log::debug!("[session {}] seat {} not connected", self.game_id, seat),
        }
    }
    /// Sends a message to every connected seat.
    pub fn broadcast(&self, message: &ServerMessage) {
        for (i, seat) in self.seats.iter().enumerate() {
            if let Some((_, tx)) = seat.conn.as_ref() {
                if let Err(e) = tx.send(message.to_json()) {
                    log::warn!(
                        "[session {}] broadcast to seat {} failed: {:?}",
                        self.game_id,
                        i,
                        e
                    );
                }
            }
        }
    }
}

/// Read-only session listing for the status surface.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: GameId,
    pub game_type: GameKind,
    pub status: SessionStatus,
    pub participants: usize,
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        Self {
            id: session.game_id(),
            game_type: session.kind(),
            status: session.status(),
            participants: session.participants(),
        }
    }
}
