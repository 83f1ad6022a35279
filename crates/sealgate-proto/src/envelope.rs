//! Tagged envelope type and byte-exact encode/decode.
//!
//! An `Envelope` is a pure data holder (IV + ciphertext, optionally preceded
//! by a wrapped content key). Encoding writes the exact on-wire layout;
//! decoding validates structure before copying anything.
//!
//! # Invariants
//!
//! - Block Alignment: the ciphertext section is a positive multiple of
//!   [`BLOCK_SIZE`]. Padding guarantees this at sealing time; [`Envelope`]
//!   decode enforces it on the way back in.
//!
//! - Prefix Consistency: for the wrapped-key layout, the 4-byte length prefix
//!   MUST match the embedded key exactly. [`Envelope::encode`] derives the
//!   prefix from the key it writes, and [`Envelope::decode_wrapped`] rejects
//!   prefixes that overrun the buffer.

use bytes::{BufMut, Bytes};

use crate::errors::{EnvelopeError, Result};

/// Initialization vector size in bytes (one cipher block).
pub const IV_SIZE: usize = 16;

/// Cipher block size; padded ciphertext is always a multiple of this.
pub const BLOCK_SIZE: usize = 16;

/// Size of the wrapped-key length prefix (little-endian u32).
pub const WRAPPED_KEY_LEN_SIZE: usize = 4;

/// A sealed content artifact.
///
/// The variant records which decryption path the artifact was authored for.
/// There is no discriminator byte on the wire - the two layouts are only
/// distinguishable by how they were produced, so decoding requires the caller
/// to state the expected variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    /// `IV || ciphertext`; the key is derived outside the envelope.
    Symmetric {
        /// Fresh per-encryption initialization vector
        iv: [u8; IV_SIZE],
        /// Block-aligned ciphertext
        ciphertext: Bytes,
    },

    /// `len || wrappedKey || IV || ciphertext`; the content key travels
    /// inside, encrypted under the recipient public key.
    WrappedKey {
        /// Content key encrypted under the recipient public key
        wrapped_key: Bytes,
        /// Fresh per-encryption initialization vector
        iv: [u8; IV_SIZE],
        /// Block-aligned ciphertext
        ciphertext: Bytes,
    },
}

impl Envelope {
    /// Initialization vector of either variant.
    pub fn iv(&self) -> &[u8; IV_SIZE] {
        match self {
            Self::Symmetric { iv, .. } | Self::WrappedKey { iv, .. } => iv,
        }
    }

    /// Ciphertext section of either variant.
    pub fn ciphertext(&self) -> &Bytes {
        match self {
            Self::Symmetric { ciphertext, .. } | Self::WrappedKey { ciphertext, .. } => ciphertext,
        }
    }

    /// Exact encoded size in bytes.
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::Symmetric { ciphertext, .. } => IV_SIZE + ciphertext.len(),
            Self::WrappedKey { wrapped_key, ciphertext, .. } => {
                WRAPPED_KEY_LEN_SIZE + wrapped_key.len() + IV_SIZE + ciphertext.len()
            },
        }
    }

    /// Encode into a buffer, writing the exact wire layout.
    ///
    /// # Errors
    ///
    /// - `EnvelopeError::WrappedKeyTooLarge` if the wrapped key cannot be
    ///   expressed in the 4-byte prefix (cannot happen for any real RSA
    ///   modulus; rejected rather than silently truncated)
    pub fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        match self {
            Self::Symmetric { iv, ciphertext } => {
                dst.put_slice(iv);
                dst.put_slice(ciphertext);
            },
            Self::WrappedKey { wrapped_key, iv, ciphertext } => {
                let len = u32::try_from(wrapped_key.len())
                    .map_err(|_| EnvelopeError::WrappedKeyTooLarge { len: wrapped_key.len() })?;
                dst.put_slice(&len.to_le_bytes());
                dst.put_slice(wrapped_key);
                dst.put_slice(iv);
                dst.put_slice(ciphertext);
            },
        }
        Ok(())
    }

    /// Encode into a fresh byte vector.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut wire = Vec::with_capacity(self.encoded_len());
        self.encode(&mut wire)?;
        Ok(wire)
    }

    /// Decode a symmetric-layout envelope: `IV || ciphertext`.
    ///
    /// # Errors
    ///
    /// - `EnvelopeError::Truncated` if the buffer cannot hold an IV and at
    ///   least one ciphertext block
    /// - `EnvelopeError::InvalidCiphertextLength` if the ciphertext section
    ///   is not a positive multiple of [`BLOCK_SIZE`]
    pub fn decode_symmetric(bytes: &[u8]) -> Result<Self> {
        let Some((iv, ciphertext)) = split_iv(bytes) else {
            return Err(EnvelopeError::Truncated {
                needed: IV_SIZE + BLOCK_SIZE,
                actual: bytes.len(),
            });
        };
        check_ciphertext(ciphertext)?;

        Ok(Self::Symmetric { iv, ciphertext: Bytes::copy_from_slice(ciphertext) })
    }

    /// Decode a wrapped-key-layout envelope:
    /// `len || wrappedKey || IV || ciphertext`.
    ///
    /// All validation happens before any section is copied.
    ///
    /// # Errors
    ///
    /// - `EnvelopeError::Truncated` if the prefix or the post-key sections
    ///   are missing
    /// - `EnvelopeError::WrappedKeyOverrun` if the prefix claims more bytes
    ///   than the buffer holds
    /// - `EnvelopeError::InvalidCiphertextLength` if the ciphertext section
    ///   is not a positive multiple of [`BLOCK_SIZE`]
    pub fn decode_wrapped(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < WRAPPED_KEY_LEN_SIZE {
            return Err(EnvelopeError::Truncated {
                needed: WRAPPED_KEY_LEN_SIZE,
                actual: bytes.len(),
            });
        }
        let (prefix, rest) = bytes.split_at(WRAPPED_KEY_LEN_SIZE);

        let mut len_bytes = [0u8; WRAPPED_KEY_LEN_SIZE];
        len_bytes.copy_from_slice(prefix);
        let claimed = u32::from_le_bytes(len_bytes) as usize;

        if claimed > rest.len() {
            return Err(EnvelopeError::WrappedKeyOverrun { claimed, remaining: rest.len() });
        }

        let (wrapped_key, tail) = rest.split_at(claimed);
        let Some((iv, ciphertext)) = split_iv(tail) else {
            return Err(EnvelopeError::Truncated {
                needed: WRAPPED_KEY_LEN_SIZE + claimed + IV_SIZE + BLOCK_SIZE,
                actual: bytes.len(),
            });
        };
        check_ciphertext(ciphertext)?;

        Ok(Self::WrappedKey {
            wrapped_key: Bytes::copy_from_slice(wrapped_key),
            iv,
            ciphertext: Bytes::copy_from_slice(ciphertext),
        })
    }
}

/// Split a buffer into IV array and ciphertext slice. `None` if too short.
fn split_iv(bytes: &[u8]) -> Option<([u8; IV_SIZE], &[u8])> {
    if bytes.len() < IV_SIZE + BLOCK_SIZE {
        return None;
    }
    let (head, ciphertext) = bytes.split_at(IV_SIZE);
    let iv = <[u8; IV_SIZE]>::try_from(head).ok()?;
    Some((iv, ciphertext))
}

/// Padded ciphertext is a positive multiple of the block size; anything else
/// is structurally invalid.
fn check_ciphertext(ciphertext: &[u8]) -> Result<()> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(EnvelopeError::InvalidCiphertextLength {
            len: ciphertext.len(),
            block: BLOCK_SIZE,
        });
    }
    Ok(())
}
