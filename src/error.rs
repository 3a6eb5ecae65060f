//! Unified error type.
//!
//! Everything fallible in this crate fails before traversal starts:
//! reading or parsing a snapshot, validating its object references, or
//! resolving the requested root. Traversal itself is total over a
//! validated graph — per-symbol oddities (no source location, opaque
//! signature) are rendered inline, not raised — so the only runtime
//! failure left is the output stream.

use std::path::PathBuf;

use thiserror::Error;

use crate::reflect::ObjectId;

/// Unified error type for the CLI and library entry points.
#[derive(Debug, Error)]
pub enum LsapiError {
    /// Snapshot file could not be read.
    #[error("failed to read snapshot {}: {source}", path.display())]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot JSON could not be parsed.
    #[error("malformed snapshot: {0}")]
    SnapshotParse(#[from] serde_json::Error),

    /// An object reference points outside the snapshot arena.
    #[error("member '{name}' of {parent} refers to missing object {target}")]
    DanglingReference {
        parent: String,
        name: String,
        target: ObjectId,
    },

    /// The requested root namespace is not in the snapshot.
    #[error("package '{name}' not found in snapshot")]
    RootNotFound { name: String },

    /// Writing to the output stream failed.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}
