//! Sealgate Cryptographic Primitives
//!
//! Cryptographic building blocks for the two-factor content release. Pure
//! functions where possible; callers provide random bytes (or an RNG) so
//! sealing is deterministically testable.
//!
//! # Key Lifecycle
//!
//! Two release paths exist, depending on how a piece of content was sealed.
//!
//! ```text
//! derived-key path:
//!
//! Keyshare (server-held) + Passphrase (caller-held)
//!        │
//!        ▼
//! SHA-256("{keyshare}:{passphrase}") → KeyMaterial (256 bit)
//!        │
//!        ▼
//! AES-256-CBC → open symmetric envelope
//!
//! wrapped-key path:
//!
//! KeyMaterial rendered as uppercase hex
//!        │
//!        ▼
//! container password → load RSA-2048 private key
//!        │
//!        ▼
//! RSA-OAEP-SHA256 unwrap → content key → AES-256-CBC → open envelope
//! ```
//!
//! Key material lives for one release attempt and is zeroized on drop. The
//! wrapped-key path generates a fresh random content key and IV per sealing;
//! OAEP wrapping is randomized, so sealing the same plaintext twice yields
//! different artifacts.
//!
//! # Security
//!
//! Failure collapse:
//! - Wrong key, wrong passphrase, tampered ciphertext, and invalid padding
//!   all surface as one fixed [`CryptoError::DecryptionFailed`] value
//! - Wrong container password and corrupted container both surface as
//!   [`KeyStoreError::LoadFailed`]
//! - Only structural envelope problems and file I/O carry detail; neither is
//!   secret-dependent
//!
//! Known weakness, kept for artifact compatibility:
//! - Key derivation is a single unsalted SHA-256 pass (see [`kdf`]); the
//!   keyshare is the entropy source and the passphrase only a second factor

#![forbid(unsafe_code)]

pub mod error;
pub mod kdf;
pub mod keystore;
pub mod seal;

pub use error::{CryptoError, KeyStoreError};
pub use kdf::{KeyMaterial, derive_key};
pub use keystore::{Identity, KeyPair};
// Re-exported so consumers name recipient keys without a direct rsa dependency
pub use rsa::{RsaPrivateKey, RsaPublicKey};
pub use seal::{CONTENT_KEY_SIZE, open_symmetric, open_wrapped, seal_symmetric, seal_wrapped};
