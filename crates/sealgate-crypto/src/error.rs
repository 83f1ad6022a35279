//! Error types for sealing, opening, and key-store operations.
//!
//! Secret-dependent failure causes are collapsed before they become values:
//! [`CryptoError::DecryptionFailed`] and [`KeyStoreError::LoadFailed`] carry
//! no detail at all, so a caller (or an attacker driving a caller) cannot
//! distinguish wrong-key from tampered-data from bad-padding. Causes that are
//! not secret-dependent (I/O, encryption-side misuse) keep their detail.

use thiserror::Error;

/// Errors from sealing and opening envelopes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Decryption failed. Deliberately cause-free: wrong key, wrong
    /// passphrase, tampered ciphertext, and invalid padding all produce this
    /// exact value.
    #[error("decryption failed")]
    DecryptionFailed,

    /// Encryption-side failure (e.g. plaintext too large for the wrapping
    /// key). Never secret-dependent; detail is safe.
    #[error("encryption failed: {reason}")]
    EncryptionFailed {
        /// What the underlying cipher reported
        reason: String,
    },

    /// Envelope variant does not match the requested decryption path. A
    /// caller bug, not a crypto failure: the caller must state the variant,
    /// and stated wrong.
    #[error("envelope variant does not match the requested decryption path")]
    VariantMismatch,
}

/// Errors from generating, saving, and loading asymmetric keys.
#[derive(Debug, Error)]
pub enum KeyStoreError {
    /// Private-key export requires a non-empty container password
    #[error("container password must not be empty")]
    EmptyPassword,

    /// Key load failed. Deliberately cause-free: wrong container password and
    /// corrupted container are indistinguishable.
    #[error("key load failed")]
    LoadFailed,

    /// Key generation failed
    #[error("key generation failed: {reason}")]
    Generation {
        /// What the key generator reported
        reason: String,
    },

    /// Self-signed certificate generation failed
    #[error("certificate generation failed: {reason}")]
    Certificate {
        /// What the certificate builder reported
        reason: String,
    },

    /// Key serialization for export failed
    #[error("key export failed: {reason}")]
    Export {
        /// What the encoder reported
        reason: String,
    },

    /// Underlying file missing or unreadable. Distinguishable by design -
    /// file presence is not a secret.
    #[error("key file I/O: {0}")]
    Io(#[from] std::io::Error),
}
