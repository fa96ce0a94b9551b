//! Match snapshots for save-state and replay
//!
//! A match is fully described by [`Simulation`]; a snapshot is a versioned
//! JSON envelope around it. Nothing is persisted between matches unless the
//! embedding application chooses to keep these.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::Simulation;

/// Bumped on any breaking change to the serialized state shape
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    state: &'a Simulation,
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    state: Simulation,
}

/// Capture the full match state
pub fn to_json(sim: &Simulation) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(&EnvelopeRef {
        version: SNAPSHOT_VERSION,
        state: sim,
    })?)
}

/// Restore a match captured by [`to_json`]
pub fn from_json(json: &str) -> Result<Simulation, SnapshotError> {
    let envelope: Envelope = serde_json::from_str(json)?;
    if envelope.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion(envelope.version));
    }
    Ok(envelope.state)
}
