//! Session errors

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the frame loop and its file inputs
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session has no cup layout; call setup first")]
    NotSetUp,

    #[error("no cups to set up the session with")]
    NoCups,

    #[error("failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A capture, detector or tracker back-end failed
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}
