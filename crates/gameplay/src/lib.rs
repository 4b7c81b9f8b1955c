//! Deterministic rules engines for the duel minigames.
//!
//! Each engine is a pure state machine: given the current state, the
//! acting seat, and a structurally validated move, it produces the next
//! state or a [`RuleViolation`]. No I/O, no clock, no randomness.
//! Replaying an identical move sequence always yields an identical
//! outcome, which is what makes the reported winner non-repudiable.
//!
//! ## Engines
//!
//! - [`TicTacToe`] — alternating marks, 8 winning lines
//! - [`RockPaperScissors`] — simultaneous rounds, first to 3 or best of 5
//! - [`NumberGuessing`] — secret target, bounded guess budget
//!
//! ## Shared vocabulary
//!
//! - [`GameKind`] — which engine a session runs, fixed at creation
//! - [`Play`] — the inbound move vocabulary, one shape per engine
//! - [`GameState`] — enum over the three engines with uniform dispatch
//! - [`Outcome`] — terminal result by seat
mod guessing;
mod kind;
mod outcome;
mod play;
mod rps;
mod state;
mod tictactoe;

pub use guessing::*;
pub use kind::*;
pub use outcome::*;
pub use play::*;
pub use rps::*;
pub use state::*;
pub use tictactoe::*;
