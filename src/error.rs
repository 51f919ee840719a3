//! Invalid-argument conditions
//!
//! Every variant is a caller bug: a stale actor id, a malformed level, or a
//! document that doesn't decode. Nothing here is retried.

use thiserror::Error;

use crate::sim::ActorId;

#[derive(Debug, Error)]
pub enum LevelError {
    /// The id doesn't name a live actor in this level
    #[error("invalid argument: no live actor with id {0}")]
    UnknownActor(ActorId),

    /// Probe actors only exist for hypothetical queries
    #[error("invalid argument: actor #{0} is a probe and cannot join a level")]
    ProbeInLevel(usize),

    /// Plan set, symbol table or settings failed to decode
    #[error("invalid argument: {0}")]
    Json(#[from] serde_json::Error),
}
