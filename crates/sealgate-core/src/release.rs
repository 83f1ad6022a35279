//! Release protocol: authorize, derive, decode, open.
//!
//! One access attempt is a straight-line sequence - there is no waiting
//! state, so the machine is a function rather than stored state:
//!
//! ```text
//! START ──> AUTHORIZE ──> OBTAIN_SECRET ──> DERIVE_KEY ──> DECODE ──> OPEN
//!               │                                            │
//!               │ Denied                                     │ any crypto
//!               ▼                                            ▼ cause
//!          FAILED (NotAuthorized)                       FAILED (generic)
//! ```
//!
//! `OPEN` is terminal and idempotent: the recovered text is cached per room,
//! and later attempts return it without re-running the protocol. `FAILED`
//! is terminal with no lockout or retry counter - retry policy belongs to
//! the authentication layer, not here.
//!
//! # Concurrency
//!
//! Two callers racing on a room's first unlock both do the decryption work;
//! the operation is pure and both produce the same text, so the cache insert
//! is last-writer-wins instead of holding a lock across the crypto.

use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

use sealgate_crypto::{KeyPair, derive_key, open_symmetric, open_wrapped};
use sealgate_proto::Envelope;

use crate::{
    error::ReleaseError,
    shares::{AuthorizationDecision, Role, ShareDirectory},
};

/// A room's sealed artifact and the release path it was authored for.
#[derive(Debug, Clone)]
pub enum SealedContent {
    /// Symmetric envelope; the derived digest is the AES key directly.
    Derived {
        /// Raw envelope bytes (`IV || ciphertext`)
        envelope: Vec<u8>,
    },

    /// Wrapped-key envelope; the derived digest, rendered as uppercase hex,
    /// is the password of the private-key container that unwraps it.
    Wrapped {
        /// Raw envelope bytes (`len || wrappedKey || IV || ciphertext`)
        envelope: Vec<u8>,
        /// Password-protected private-key container
        key_container: PathBuf,
    },
}

impl SealedContent {
    /// Read a symmetric envelope from disk.
    pub fn derived_from_file(path: &Path) -> io::Result<Self> {
        Ok(Self::Derived { envelope: std::fs::read(path)? })
    }

    /// Read a wrapped-key envelope from disk, remembering its container.
    pub fn wrapped_from_file(
        envelope_path: &Path,
        key_container: impl Into<PathBuf>,
    ) -> io::Result<Self> {
        Ok(Self::Wrapped {
            envelope: std::fs::read(envelope_path)?,
            key_container: key_container.into(),
        })
    }
}

/// Gate over sealed room content.
///
/// Holds the share directory and the opened-room cache. The directory is
/// immutable; the cache is the one piece of shared mutable state in the
/// protocol and tolerates racing first unlocks.
pub struct ContentGate {
    directory: ShareDirectory,
    opened: RwLock<HashMap<String, String>>,
}

impl ContentGate {
    /// Gate over the given share directory.
    pub fn new(directory: ShareDirectory) -> Self {
        Self { directory, opened: RwLock::new(HashMap::new()) }
    }

    /// The share directory backing this gate.
    pub fn directory(&self) -> &ShareDirectory {
        &self.directory
    }

    /// Whether a room has already been released to some caller.
    pub fn already_open(&self, room_id: &str) -> bool {
        self.opened.read().unwrap_or_else(PoisonError::into_inner).contains_key(room_id)
    }

    /// Run one release attempt for a room.
    ///
    /// Authorizes the caller, combines the granted share with the caller's
    /// passphrase, and opens the sealed artifact along the path it was
    /// authored for. On success the text is cached and replayed for later
    /// attempts on the same room.
    ///
    /// # Errors
    ///
    /// - `ReleaseError::NotAuthorized` if the directory denies the caller
    /// - `ReleaseError::Io` if the key container cannot be read
    /// - `ReleaseError::Failed` for every cryptographic cause, with one
    ///   fixed message regardless of which step tripped
    pub fn unlock(
        &self,
        room_id: &str,
        caller: Role,
        passphrase: &str,
        sealed: &SealedContent,
    ) -> Result<String, ReleaseError> {
        // OPEN replay: an already-released room skips the protocol
        if let Some(text) =
            self.opened.read().unwrap_or_else(PoisonError::into_inner).get(room_id)
        {
            return Ok(text.clone());
        }

        // AUTHORIZE
        let share = match self.directory.get_share(room_id, caller) {
            AuthorizationDecision::Granted(share) => share,
            AuthorizationDecision::Denied => {
                return Err(ReleaseError::NotAuthorized { room_id: room_id.to_string() });
            },
        };

        // OBTAIN_SECRET + DERIVE_KEY
        let key = derive_key(&share, passphrase);

        // DECODE
        let plaintext = match sealed {
            SealedContent::Derived { envelope } => {
                let envelope = Envelope::decode_symmetric(envelope)?;
                open_symmetric(&envelope, &key)?
            },
            SealedContent::Wrapped { envelope, key_container } => {
                let keys = KeyPair::load(key_container, &key.to_password_hex())?;
                let envelope = Envelope::decode_wrapped(envelope)?;
                open_wrapped(&envelope, keys.private())?
            },
        };

        // Sealed content is text by contract; anything else means the
        // padding happened to survive a bad key
        let text = String::from_utf8(plaintext).map_err(|_| ReleaseError::Failed)?;

        // OPEN
        let mut opened = self.opened.write().unwrap_or_else(PoisonError::into_inner);
        opened.entry(room_id.to_string()).or_insert_with(|| text.clone());

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use sealgate_crypto::seal_symmetric;
    use sealgate_proto::IV_SIZE;

    use super::*;

    fn sealed_fixture(share: &str, passphrase: &str, text: &str) -> SealedContent {
        let key = derive_key(share, passphrase);
        let envelope = seal_symmetric(text.as_bytes(), &key, [0x2F; IV_SIZE]);
        SealedContent::Derived { envelope: envelope.to_bytes().unwrap() }
    }

    #[test]
    fn derived_path_releases_content() {
        let gate = ContentGate::new(ShareDirectory::with_default_rooms());
        let sealed =
            sealed_fixture("SecretKeyShare123ForRoom1", "TheQuickBrownFox", "Look at the ceiling.");

        let text =
            gate.unlock("room_secret", Role::Player, "TheQuickBrownFox", &sealed).unwrap();
        assert_eq!(text, "Look at the ceiling.");
        assert!(gate.already_open("room_secret"));
    }

    #[test]
    fn denied_caller_is_not_authorized() {
        let gate = ContentGate::new(ShareDirectory::with_default_rooms());
        let sealed =
            sealed_fixture("AdminOnlyKeyShare789ForRoom3", "TheQuickBrownFox", "Admin sanctum.");

        let result = gate.unlock("room_admin", Role::Player, "TheQuickBrownFox", &sealed);
        assert!(matches!(result, Err(ReleaseError::NotAuthorized { .. })));
        assert!(!gate.already_open("room_admin"));
    }

    #[test]
    fn wrong_passphrase_is_generic_failure() {
        let gate = ContentGate::new(ShareDirectory::with_default_rooms());
        let sealed =
            sealed_fixture("SecretKeyShare123ForRoom1", "TheQuickBrownFox", "Look up.");

        let result = gate.unlock("room_secret", Role::Player, "TheSlowBrownFox", &sealed);
        assert!(matches!(result, Err(ReleaseError::Failed)));
    }

    #[test]
    fn replay_skips_the_protocol() {
        let gate = ContentGate::new(ShareDirectory::with_default_rooms());
        let sealed =
            sealed_fixture("SecretKeyShare123ForRoom1", "TheQuickBrownFox", "Cached text.");

        gate.unlock("room_secret", Role::Player, "TheQuickBrownFox", &sealed).unwrap();

        // Even a wrong passphrase now succeeds: the room is already open
        // and the cached text is returned without touching the envelope
        let replay =
            gate.unlock("room_secret", Role::Player, "wrong passphrase", &sealed).unwrap();
        assert_eq!(replay, "Cached text.");
    }

    #[test]
    fn missing_envelope_file_is_io() {
        let dir = tempfile::tempdir().unwrap();
        let result = SealedContent::derived_from_file(&dir.path().join("absent.enc"));
        assert!(result.is_err());
    }
}
