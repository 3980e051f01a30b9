//=========================================================================
// Host Errors
//=========================================================================
//
// Recoverable host-side failures.
//
// Interop accessors never fail: using a stale entity id is a contract
// violation, not an error. What lands here is setup and bookkeeping:
// bad ids at construction, unknown script classes, duplicate attachment,
// unreadable configuration.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::entity::EntityId;

//=== HostError ===========================================================

/// Errors raised by host-side setup and instance bookkeeping.
#[derive(Debug, Error)]
pub enum HostError {
    /// Id 0 is reserved as the "no entity" sentinel.
    #[error("entity id 0 is reserved for the \"no entity\" sentinel")]
    NullEntity,

    #[error("entity {0} does not exist")]
    UnknownEntity(EntityId),

    #[error("entity {0} already exists")]
    DuplicateEntity(EntityId),

    #[error("no script class named `{0}` is registered")]
    UnknownScript(String),

    /// At most one instance per (entity, script class) pair.
    #[error("script `{script}` is already attached to entity {entity}")]
    DuplicateInstance { entity: EntityId, script: String },

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The preview window's event loop could not start or failed.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}
