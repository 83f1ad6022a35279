//! Sealing and opening of content envelopes.
//!
//! AES-256-CBC with PKCS7 padding for the content itself; RSA-OAEP-SHA256
//! for wrapping the content key on the asymmetric path. Functions are pure
//! over their arguments - the IV (symmetric path) and the RNG (wrapped path)
//! come from the caller, which keeps sealing deterministically testable.
//!
//! # Security
//!
//! - IVs are fresh per sealing and never reused under one key; the caller
//!   owns that invariant on the symmetric path
//! - OAEP wrapping is randomized: sealing the same plaintext twice under the
//!   same recipient produces different wrapped bytes
//! - Every opening failure (unwrap, key size, padding) collapses into the
//!   one cause-free [`CryptoError::DecryptionFailed`] value. CBC+PKCS7 has
//!   no authentication tag, so tamper detection rests on padding validation
//!   and the caller's plaintext checks - the error value leaks nothing about
//!   which check tripped

use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};
use rand::{CryptoRng, RngCore};
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sealgate_proto::{Envelope, IV_SIZE};
use sha2::Sha256;
use zeroize::{Zeroize, Zeroizing};

use crate::{error::CryptoError, kdf::KeyMaterial};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Size of the symmetric content key in bytes (AES-256).
pub const CONTENT_KEY_SIZE: usize = 32;

/// Seal plaintext into a symmetric envelope under externally derived key
/// material.
///
/// The envelope carries no key material; whoever holds the same keyshare and
/// passphrase can re-derive the key. The caller MUST provide a fresh random
/// IV per sealing in production.
pub fn seal_symmetric(plaintext: &[u8], key: &KeyMaterial, iv: [u8; IV_SIZE]) -> Envelope {
    let ciphertext = encrypt_cbc(key.as_bytes(), &iv, plaintext);
    Envelope::Symmetric { iv, ciphertext: ciphertext.into() }
}

/// Open a symmetric envelope with derived key material.
///
/// # Errors
///
/// - `CryptoError::VariantMismatch` if the envelope is wrapped-key
/// - `CryptoError::DecryptionFailed` for every cryptographic failure
pub fn open_symmetric(envelope: &Envelope, key: &KeyMaterial) -> Result<Vec<u8>, CryptoError> {
    let Envelope::Symmetric { iv, ciphertext } = envelope else {
        return Err(CryptoError::VariantMismatch);
    };
    decrypt_cbc(key.as_bytes(), iv, ciphertext)
}

/// Seal plaintext into a wrapped-key envelope for a recipient public key.
///
/// Generates a fresh 256-bit content key and 128-bit IV from the caller's
/// RNG, encrypts the plaintext, and wraps the content key with
/// RSA-OAEP-SHA256. The content key is zeroized before returning.
///
/// # Errors
///
/// - `CryptoError::EncryptionFailed` if OAEP wrapping rejects the content
///   key (e.g. the recipient modulus is too small to carry it)
pub fn seal_wrapped<R>(
    plaintext: &[u8],
    recipient: &RsaPublicKey,
    rng: &mut R,
) -> Result<Envelope, CryptoError>
where
    R: CryptoRng + RngCore,
{
    let mut content_key = [0u8; CONTENT_KEY_SIZE];
    rng.fill_bytes(&mut content_key);
    let mut iv = [0u8; IV_SIZE];
    rng.fill_bytes(&mut iv);

    let ciphertext = encrypt_cbc(&content_key, &iv, plaintext);

    let wrapped = recipient.encrypt(rng, Oaep::new::<Sha256>(), &content_key);
    content_key.zeroize();
    let wrapped_key =
        wrapped.map_err(|e| CryptoError::EncryptionFailed { reason: e.to_string() })?;

    Ok(Envelope::WrappedKey { wrapped_key: wrapped_key.into(), iv, ciphertext: ciphertext.into() })
}

/// Open a wrapped-key envelope with the recipient private key.
///
/// # Errors
///
/// - `CryptoError::VariantMismatch` if the envelope is symmetric
/// - `CryptoError::DecryptionFailed` for every cryptographic failure:
///   unwrap rejection (wrong key, corrupted wrapping), an unwrapped key of
///   the wrong size, or padding failure on the content
pub fn open_wrapped(envelope: &Envelope, private: &RsaPrivateKey) -> Result<Vec<u8>, CryptoError> {
    let Envelope::WrappedKey { wrapped_key, iv, ciphertext } = envelope else {
        return Err(CryptoError::VariantMismatch);
    };

    let content_key = Zeroizing::new(
        private
            .decrypt(Oaep::new::<Sha256>(), wrapped_key)
            .map_err(|_| CryptoError::DecryptionFailed)?,
    );
    let key = <&[u8; CONTENT_KEY_SIZE]>::try_from(content_key.as_slice())
        .map_err(|_| CryptoError::DecryptionFailed)?;

    decrypt_cbc(key, iv, ciphertext)
}

fn encrypt_cbc(key: &[u8; 32], iv: &[u8; IV_SIZE], plaintext: &[u8]) -> Vec<u8> {
    Aes256CbcEnc::new(key.into(), iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

fn decrypt_cbc(
    key: &[u8; 32],
    iv: &[u8; IV_SIZE],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    Aes256CbcDec::new(key.into(), iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed)
}
