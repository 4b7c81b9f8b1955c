//! Session registry and coordination runtime for live duels.
//!
//! This crate turns blockchain-originated game identifiers into live
//! two-player sessions: it matches connections to seats, advances the
//! per-kind rules engine move-by-move, detects terminal conditions,
//! and emits the final authoritative result exactly once per session.
//!
//! ## Architecture
//!
//! - [`Registry`] — owns the session and connection tables; all
//!   lifecycle transitions (create, attach, complete, abandon, evict)
//! - [`Coordinator`] — single dispatch task; every mutation of session
//!   state happens here, one [`Command`] at a time, in receipt order
//! - [`Session`] — one game identifier, two seats, one rules state
//! - [`Settlement`] — outward seam the final verdict is forwarded to
//!
//! ## Wire types
//!
//! - [`ClientMessage`] / [`Protocol`] — inbound frames
//! - [`ServerMessage`] — outbound frames, constructor-style
//!
//! Concurrency model: commands are processed to completion before the
//! next is taken, so events for a given session are strictly serialized
//! without locks. Sessions are independent; there is no cross-session
//! ordering guarantee and none is needed.
mod clock;
mod command;
mod coordinator;
mod message;
mod protocol;
mod registry;
mod session;
mod settlement;

pub use clock::*;
pub use command::*;
pub use coordinator::*;
pub use message::*;
pub use protocol::*;
pub use registry::*;
pub use session::*;
pub use settlement::*;
