//! Structural errors for envelope parsing.
//!
//! Every variant here is a malformed-envelope condition: the byte layout
//! itself is inconsistent, before any key material is involved. These errors
//! are safe to report in detail - structure is not secret-dependent. Failures
//! that DO depend on key material (bad padding, wrong key) never appear here;
//! they belong to the crypto layer, which collapses them into one generic
//! outcome.

use thiserror::Error;

/// Result alias for envelope parsing.
pub type Result<T> = std::result::Result<T, EnvelopeError>;

/// Structurally invalid envelope layout.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    /// Buffer is shorter than the fixed sections require
    #[error("envelope truncated: need at least {needed} bytes, have {actual}")]
    Truncated {
        /// Minimum byte count the layout requires at this point
        needed: usize,
        /// Bytes actually available
        actual: usize,
    },

    /// Wrapped-key length prefix claims more bytes than the buffer holds
    #[error("wrapped key length {claimed} exceeds remaining {remaining} bytes")]
    WrappedKeyOverrun {
        /// Length the 4-byte prefix claims
        claimed: usize,
        /// Bytes remaining after the prefix
        remaining: usize,
    },

    /// Ciphertext section is empty or not block-aligned
    #[error("ciphertext length {len} is not a positive multiple of {block} bytes")]
    InvalidCiphertextLength {
        /// Actual ciphertext length
        len: usize,
        /// Cipher block size the padding guarantees
        block: usize,
    },

    /// Wrapped key is too large to express in the 4-byte length prefix
    #[error("wrapped key of {len} bytes does not fit the length prefix")]
    WrappedKeyTooLarge {
        /// Actual wrapped key length
        len: usize,
    },
}
