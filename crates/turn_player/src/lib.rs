//! Turn-by-turn driver for the quiescent engine: the agent that owns the
//! authoritative board, the stdin/stdout protocol, and self-play.

pub mod agent;
pub mod protocol;
pub mod selfplay;

pub use agent::Agent;
pub use protocol::{run_session, Command, ProtocolError, SessionError};
pub use selfplay::{play_game, GameOutcome, GameRecord, OpponentKind, SelfPlayConfig};
