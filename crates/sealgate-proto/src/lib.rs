//! Wire format for sealed content envelopes.
//!
//! A sealed envelope is the on-disk artifact protecting one text blob. Two
//! layouts exist, tagged by which decryption path the artifact was authored
//! for rather than by a type byte:
//!
//! ```text
//! symmetric:    [IV: 16 bytes] [ciphertext: 16·k bytes]
//! wrapped-key:  [wrappedKeyLength: 4 bytes, LE u32]
//!               [wrappedKey: N bytes]
//!               [IV: 16 bytes]
//!               [ciphertext: 16·k bytes]
//! ```
//!
//! The symmetric layout carries no key material at all; the key is derived
//! elsewhere from a keyshare and a passphrase. The wrapped-key layout embeds
//! the content key encrypted under a recipient public key, so only the
//! private-key holder can recover it. Callers must state which layout a byte
//! blob uses; this crate never guesses.
//!
//! # Security
//!
//! This layer provides structural validity only: the length prefix is checked
//! against the actual buffer before anything is copied, and the ciphertext
//! section must be a positive multiple of the cipher block size. It does NOT
//! guarantee that the ciphertext decrypts or that the wrapped key unwraps -
//! those failures are reported by the crypto layer, deliberately without
//! structural detail.
#![forbid(unsafe_code)]

pub mod envelope;
pub mod errors;

pub use envelope::{BLOCK_SIZE, Envelope, IV_SIZE, WRAPPED_KEY_LEN_SIZE};
pub use errors::{EnvelopeError, Result};
