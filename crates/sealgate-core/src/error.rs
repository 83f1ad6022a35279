//! Error types for the release protocol boundary.
//!
//! This is the surface untrusted callers see, so the collapse policy is
//! enforced here: every secret-dependent failure - malformed envelope, wrong
//! key material, wrong container password, bad padding - becomes the single
//! generic [`ReleaseError::Failed`]. Authorization and I/O failures keep
//! their identity; neither carries a secret-dependent signal.

use sealgate_crypto::{CryptoError, KeyStoreError};
use sealgate_proto::EnvelopeError;
use thiserror::Error;

/// Caller-visible outcome of a failed release attempt.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// The key-share directory refused the request. Not secret-dependent:
    /// the caller already knows which room they asked for and as whom.
    #[error("not authorized for room {room_id}")]
    NotAuthorized {
        /// Room the caller asked for
        room_id: String,
    },

    /// The sealed content could not be opened. One message for every
    /// underlying cause; nothing about the cause crosses this boundary.
    #[error("unable to open sealed content")]
    Failed,

    /// Underlying file missing or unreadable. Distinguishable by design.
    #[error("content I/O: {0}")]
    Io(#[from] std::io::Error),
}

impl ReleaseError {
    /// True if retrying with different caller input could help. `Failed`
    /// and `NotAuthorized` are answer-shaped; `Io` is environmental.
    pub fn is_environmental(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

impl From<EnvelopeError> for ReleaseError {
    fn from(_: EnvelopeError) -> Self {
        Self::Failed
    }
}

impl From<CryptoError> for ReleaseError {
    fn from(_: CryptoError) -> Self {
        Self::Failed
    }
}

impl From<KeyStoreError> for ReleaseError {
    fn from(err: KeyStoreError) -> Self {
        match err {
            // A missing or unreadable container is an operational problem
            KeyStoreError::Io(io) => Self::Io(io),
            // Everything else could encode whether the password was close
            _ => Self::Failed,
        }
    }
}
