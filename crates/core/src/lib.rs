//! Core type aliases, identity newtypes, and constants for the duel
//! session server.
//!
//! This crate provides the foundational vocabulary shared across the
//! workspace: who a participant is, how connections and games are
//! identified, and the tunable limits of the session lifecycle.

use serde::Deserialize;
use serde::Serialize;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// On-chain game identifier, assigned by the settlement ledger.
pub type GameId = u64;
/// Seat index within a session (0 = first joiner).
pub type Seat = usize;

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Participant identity: a wallet address as presented by the client.
/// Addresses compare case-insensitively, so the string is normalized to
/// lowercase on construction (and on deserialization).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct Wallet(String);

impl Wallet {
    pub fn new<S>(address: S) -> Self
    where
        S: Into<String>,
    {
        Self(address.into().to_lowercase())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Wallet {
    fn from(address: String) -> Self {
        Self::new(address)
    }
}
impl From<&str> for Wallet {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl Display for Wallet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for one transport connection. Bound to at most one
/// participant and one session for its lifetime; never reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(uuid::Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }
    pub fn inner(&self) -> uuid::Uuid {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ConnectionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ConnectionId").field(&self.0).finish()
    }
}
impl Display for ConnectionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

// ============================================================================
// SESSION LIFECYCLE PARAMETERS
// ============================================================================
/// Number of seats in a session.
pub const SEATS: usize = 2;
/// Grace period before a terminal session is evicted (seconds).
pub const GRACE_PERIOD: u64 = 60;
/// Bound on how long a session may wait for its second participant (seconds).
pub const JOIN_TIMEOUT: u64 = 120;
/// Interval between registry sweeps (seconds).
pub const SWEEP_INTERVAL: u64 = 5;

// ============================================================================
// GAME RULE PARAMETERS
// ============================================================================
/// Guesses available before a Number-Guessing match draws.
pub const GUESS_BUDGET: usize = 7;
/// Lower bound of the declared guessing range (inclusive).
pub const GUESS_MIN: u32 = 1;
/// Upper bound of the declared guessing range (inclusive).
pub const GUESS_MAX: u32 = 100;
/// Rounds played before a Rock-Paper-Scissors match is decided on score.
pub const ROUND_LIMIT: u8 = 5;
/// Round wins that end a Rock-Paper-Scissors match early.
pub const ROUND_TARGET: u8 = 3;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn wallet_normalizes_case() {
        let a = Wallet::new("0xAbCd");
        let b = Wallet::new("0xabcd");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "0xabcd");
    }
    #[test]
    fn connection_ids_are_unique() {
        assert_ne!(ConnectionId::new(), ConnectionId::new());
    }
}
