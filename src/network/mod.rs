//! Network Layer
//!
//! HTTP transport for the browser client. Game rules live in `game/`; this
//! layer parses requests, locks the engine and serializes the result.

pub mod protocol;
pub mod server;

pub use protocol::{ActionRequest, ErrorResponse};
pub use server::{build_router, GameServer, GameServerError, ServerConfig, SharedEngine};
