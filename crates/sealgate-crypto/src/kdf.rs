//! Decryption-key derivation from keyshare and passphrase.
//!
//! The two partial secrets are joined with a fixed colon separator and hashed
//! once with SHA-256; the raw digest is the AES key. Determinism is the
//! point: the same derived value doubles as a private-key container password
//! (rendered as uppercase hex) on the wrapped-key release path.
//!
//! # Security
//!
//! - Deterministic: same inputs always produce the same output
//! - No salt, no iteration count. This is acceptable here only because the
//!   keyshare is high-entropy and role-gated; a low-entropy passphrase alone
//!   would be brute-forceable. A hardened scheme (memory-hard KDF plus a
//!   per-envelope salt) would change the sealed-artifact format and is out of
//!   scope while existing artifacts must keep opening.

use sha2::{Digest, Sha256};
use zeroize::Zeroize;

/// Separator between keyshare and passphrase in the hash input.
const SEPARATOR: &[u8] = b":";

/// A 256-bit symmetric key derived for one release attempt.
///
/// Never persisted; the bytes are zeroized when the value is dropped.
#[derive(Clone)]
pub struct KeyMaterial {
    /// The raw SHA-256 digest, used directly as an AES-256 key
    key: [u8; 32],
}

impl KeyMaterial {
    /// Raw key bytes for the symmetric cipher.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.key
    }

    /// Uppercase-hex rendering, used where the derived value acts as a
    /// human-facing or container password.
    pub fn to_password_hex(&self) -> String {
        hex::encode_upper(self.key)
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

/// Derive key material from a keyshare and a passphrase.
///
/// Computes `SHA-256(keyshare || ":" || passphrase)` over the UTF-8 bytes.
/// The separator is fixed and not configurable. Hashing cannot fail, so this
/// returns the key directly.
pub fn derive_key(keyshare: &str, passphrase: &str) -> KeyMaterial {
    let mut hasher = Sha256::new();
    hasher.update(keyshare.as_bytes());
    hasher.update(SEPARATOR);
    hasher.update(passphrase.as_bytes());

    KeyMaterial { key: hasher.finalize().into() }
}
