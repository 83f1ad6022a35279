//! Sealgate release protocol core.
//!
//! Ties the leaf pieces together: a read-only directory of per-room key
//! shares gated by caller role, and the per-attempt release sequence that
//! authorizes a caller, derives key material, and opens the sealed envelope.
//!
//! ```text
//! Caller (role, passphrase)
//!   ├─ ShareDirectory (authorization)  ← room → share, room → required role
//!   └─ ContentGate (release protocol)
//!       ├─ KDF (sealgate-crypto)
//!       ├─ KeyPair container (sealgate-crypto, wrapped-key path)
//!       └─ Envelope codec (sealgate-proto / sealgate-crypto)
//! ```
//!
//! The consuming game layer sees exactly two operations:
//! [`ShareDirectory::get_share`] and [`ContentGate::unlock`].

#![forbid(unsafe_code)]

pub mod error;
pub mod release;
pub mod shares;

pub use error::ReleaseError;
pub use release::{ContentGate, SealedContent};
pub use shares::{AuthorizationDecision, Role, ShareDirectory};
