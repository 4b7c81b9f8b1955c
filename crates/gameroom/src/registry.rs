use super::*;
use duel_core::ConnectionId;
use duel_core::GameId;
use duel_core::SEATS;
use duel_core::Seat;
use duel_core::Wallet;
use duel_gameplay::GameKind;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Errors from session lifecycle operations.
///
/// All are local to the offending request; none affect other sessions
/// and none are fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Both seats are taken, or the session already ended.
    Full,
    /// Unknown or already evicted game identifier.
    NotFound,
    /// Completion was already recorded with a different verdict.
    AlreadyCompleted,
    /// The wallet is already live in another session.
    AlreadyInSession(GameId),
    /// Join named a different game type than the session was created with.
    WrongKind,
    /// The connection is not bound to a seat in this session.
    NotParticipant,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Full => write!(f, "session is full"),
            Self::NotFound => write!(f, "session not found"),
            Self::AlreadyCompleted => write!(f, "session already completed with a different result"),
            Self::AlreadyInSession(id) => write!(f, "wallet is already playing game {}", id),
            Self::WrongKind => write!(f, "game type does not match this session"),
            Self::NotParticipant => write!(f, "connection is not a participant"),
        }
    }
}

impl std::error::Error for SessionError {}

/// What a join did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joined {
    /// Created the session; waiting for an opponent.
    Created,
    /// Took the second seat; the session is now active.
    Started,
    /// Re-attached to a seat held before a disconnect.
    Rejoined,
}

/// What a sweep did.
#[derive(Debug, Default)]
pub struct SweepReport {
    /// `Forming` sessions abandoned for outliving the join timeout.
    pub expired: Vec<GameId>,
    /// Terminal sessions removed after their grace period.
    pub evicted: Vec<GameId>,
}

/// Owner of the session and connection tables.
///
/// Every mutating operation on a given session goes through here, and
/// the registry itself is only ever touched from the coordinator's
/// dispatch task, so no two mutations can interleave. The clock is
/// injected; nothing in here waits on real time.
pub struct Registry {
    sessions: HashMap<GameId, Session>,
    connections: HashMap<ConnectionId, GameId>,
    seated: HashMap<Wallet, GameId>,
    clock: Arc<dyn Clock>,
    config: LifecycleConfig,
}

impl Registry {
    pub fn new(clock: Arc<dyn Clock>, config: LifecycleConfig) -> Self {
        Self {
            sessions: HashMap::new(),
            connections: HashMap::new(),
            seated: HashMap::new(),
            clock,
            config,
        }
    }
    pub fn len(&self) -> usize {
        self.sessions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
    pub fn get(&self, game_id: GameId) -> Result<&Session, SessionError> {
        self.sessions.get(&game_id).ok_or(SessionError::NotFound)
    }
    pub fn get_mut(&mut self, game_id: GameId) -> Result<&mut Session, SessionError> {
        self.sessions.get_mut(&game_id).ok_or(SessionError::NotFound)
    }
    /// Session currently bound to a connection.
    pub fn session_of(&self, conn: ConnectionId) -> Option<GameId> {
        self.connections.get(&conn).copied()
    }
    /// Read-only listing for the status surface.
    pub fn snapshot(&self) -> Vec<SessionSummary> {
        let mut summaries: Vec<SessionSummary> =
            self.sessions.values().map(SessionSummary::from).collect();
        summaries.sort_by_key(|s| s.id);
        summaries
    }

    /// Creates a session on the first join for a game identifier,
    /// attaches the second distinct wallet on the next, re-binds a
    /// returning wallet to its original seat, and rejects everything
    /// else without mutating existing seats.
    pub fn join(
        &mut self,
        game_id: GameId,
        wallet: Wallet,
        kind: GameKind,
        conn: ConnectionId,
        tx: UnboundedSender<String>,
    ) -> Result<(Seat, Joined), SessionError> {
        match self.sessions.get_mut(&game_id) {
            None => {
                if let Some(&other) = self.seated.get(&wallet) {
                    return Err(SessionError::AlreadyInSession(other));
                }
                let mut session = Session::new(game_id, kind, self.clock.now());
                let seat = session.seat(wallet.clone(), conn, tx);
                self.sessions.insert(game_id, session);
                self.connections.insert(conn, game_id);
                self.seated.insert(wallet, game_id);
                Ok((seat, Joined::Created))
            }
            Some(session) => {
                if session.kind() != kind {
                    return Err(SessionError::WrongKind);
                }
                if let Some(seat) = session.seat_of(&wallet) {
                    // Reconnection: same wallet, same seat, state untouched.
                    // A fresh connection supersedes any stale binding.
                    if let Some(stale) = session.rebind(seat, conn, tx) {
                        self.connections.remove(&stale);
                    }
                    self.connections.insert(conn, game_id);
                    return Ok((seat, Joined::Rejoined));
                }
                if session.status().is_terminal() || session.participants() >= SEATS {
                    return Err(SessionError::Full);
                }
                if let Some(&other) = self.seated.get(&wallet) {
                    return Err(SessionError::AlreadyInSession(other));
                }
                let seat = session.seat(wallet.clone(), conn, tx);
                session.activate();
                self.connections.insert(conn, game_id);
                self.seated.insert(wallet, game_id);
                Ok((seat, Joined::Started))
            }
        }
    }

    /// Records the terminal verdict. Idempotent: repeating the same
    /// verdict is a no-op (`false`); a differing verdict is rejected.
    pub fn complete(&mut self, game_id: GameId, verdict: Verdict) -> Result<bool, SessionError> {
        let now = self.clock.now();
        let session = self.sessions.get_mut(&game_id).ok_or(SessionError::NotFound)?;
        if session.status().is_terminal() {
            return match session.verdict() {
                Some(existing) if *existing == verdict => Ok(false),
                _ => Err(SessionError::AlreadyCompleted),
            };
        }
        session.finish(SessionStatus::Completed, verdict, now);
        self.unseat(game_id);
        Ok(true)
    }

    /// Marks an active session abandoned with a void verdict. No-op
    /// from any other status.
    pub fn abandon(&mut self, game_id: GameId) -> Result<bool, SessionError> {
        let now = self.clock.now();
        let session = self.sessions.get_mut(&game_id).ok_or(SessionError::NotFound)?;
        if session.status() != SessionStatus::Active {
            return Ok(false);
        }
        session.finish(SessionStatus::Abandoned, Verdict::Void, now);
        self.unseat(game_id);
        Ok(true)
    }

    /// Unbinds a connection, reporting the seat it held.
    pub fn release(&mut self, conn: ConnectionId) -> Option<(GameId, Seat)> {
        let game_id = self.connections.remove(&conn)?;
        let session = self.sessions.get_mut(&game_id)?;
        session.detach(conn).map(|seat| (game_id, seat))
    }

    /// Removes a session and every table entry pointing at it.
    pub fn evict(&mut self, game_id: GameId) {
        if let Some(session) = self.sessions.remove(&game_id) {
            self.connections.retain(|_, id| *id != game_id);
            for wallet in session.wallets() {
                if self.seated.get(&wallet) == Some(&game_id) {
                    self.seated.remove(&wallet);
                }
            }
            log::debug!("[registry] evicted game {}", game_id);
        }
    }

    /// Expires overdue `Forming` sessions and evicts terminal sessions
    /// past their grace period. Never touches `Active` sessions.
    pub fn sweep(&mut self) -> SweepReport {
        let now = self.clock.now();
        let mut report = SweepReport::default();
        for (id, session) in self.sessions.iter() {
            match session.status() {
                SessionStatus::Forming => {
                    if now.duration_since(session.created()) >= self.config.join_timeout {
                        report.expired.push(*id);
                    }
                }
                status if status.is_terminal() => {
                    if session
                        .ended()
                        .map(|ended| now.duration_since(ended) >= self.config.grace)
                        .unwrap_or(false)
                    {
                        report.evicted.push(*id);
                    }
                }
                _ => {}
            }
        }
        for &id in &report.expired {
            if let Some(session) = self.sessions.get_mut(&id) {
                session.finish(SessionStatus::Abandoned, Verdict::Void, now);
            }
            self.unseat(id);
            log::info!("[registry] game {} expired waiting for an opponent", id);
        }
        for &id in &report.evicted {
            self.evict(id);
        }
        report
    }

    /// Frees the wallets of a now-terminal session so they may join
    /// elsewhere.
    fn unseat(&mut self, game_id: GameId) {
        if let Some(session) = self.sessions.get(&game_id) {
            for wallet in session.wallets() {
                if self.seated.get(&wallet) == Some(&game_id) {
                    self.seated.remove(&wallet);
                }
            }
        }
    }
}
