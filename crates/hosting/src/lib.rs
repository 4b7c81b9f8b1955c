//! WebSocket transport and HTTP surface for live duels.
//!
//! The transport layer is deliberately thin: it carries structured
//! frames between the socket and the coordinator's inbox and delegates
//! every semantic decision upward.
//!
//! ## Core Types
//!
//! - [`Arena`] — owns the coordinator inbox; spawns the dispatch task
//!   and the lifecycle sweeper; bridges each connection
//!
//! ## HTTP Handlers
//!
//! The [`handlers`] submodule exposes the actix-web routes: server
//! info, the read-only session listing, and the WebSocket upgrade.
mod arena;
pub mod handlers;

pub use arena::*;
