//! Key-share authorization.
//!
//! Each protected room has exactly one share value and a minimum caller
//! role. The directory decides release eligibility; it never performs any
//! cryptography itself.
//!
//! # Security
//!
//! An unknown room and an insufficient role produce the same
//! [`AuthorizationDecision::Denied`]. Distinguishing them would let an
//! unprivileged caller enumerate which protected rooms exist.

use std::collections::HashMap;

/// Caller role attached to a release request.
///
/// Exactly two roles exist and `Admin` is not a superset by hierarchy -
/// the one rule is that admin-gated rooms require exactly `Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Regular participant
    Player,
    /// Operator; required for admin-gated rooms
    Admin,
}

/// Outcome of a share request. No partial grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationDecision {
    /// Caller may have the room's share
    Granted(
        /// The share value for the requested room
        String,
    ),
    /// Unknown room or insufficient role; deliberately not saying which
    Denied,
}

/// One room's share and gate.
#[derive(Debug, Clone)]
struct RoomShare {
    share: String,
    required: Role,
}

/// Immutable room → share directory with role gates.
///
/// Fixed at construction; no interior mutability, so it is freely shared
/// across concurrent callers without locking.
#[derive(Debug, Clone, Default)]
pub struct ShareDirectory {
    rooms: HashMap<String, RoomShare>,
}

impl ShareDirectory {
    /// Empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a room's share and its minimum role. Replaces any previous
    /// entry for the room; intended for construction-time use only.
    pub fn insert(&mut self, room_id: impl Into<String>, share: impl Into<String>, required: Role) {
        self.rooms.insert(room_id.into(), RoomShare { share: share.into(), required });
    }

    /// The stock deployment: two player rooms and one admin-gated room.
    pub fn with_default_rooms() -> Self {
        let mut directory = Self::new();
        directory.insert("room_secret", "SecretKeyShare123ForRoom1", Role::Player);
        directory.insert("room_treasure", "TreasureKeyShare456ForRoom2", Role::Player);
        directory.insert("room_admin", "AdminOnlyKeyShare789ForRoom3", Role::Admin);
        directory
    }

    /// Whether a room is registered at all.
    pub fn has_room(&self, room_id: &str) -> bool {
        self.rooms.contains_key(room_id)
    }

    /// Decide whether `caller` may receive `room_id`'s share.
    ///
    /// Admin-gated rooms require exactly [`Role::Admin`]; every other room
    /// is open to any caller. Unknown rooms are `Denied`, indistinguishable
    /// from a role rejection.
    pub fn get_share(&self, room_id: &str, caller: Role) -> AuthorizationDecision {
        match self.rooms.get(room_id) {
            Some(room) if room.required == Role::Admin && caller != Role::Admin => {
                AuthorizationDecision::Denied
            },
            Some(room) => AuthorizationDecision::Granted(room.share.clone()),
            None => AuthorizationDecision::Denied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_room_grants_to_player() {
        let directory = ShareDirectory::with_default_rooms();
        assert_eq!(
            directory.get_share("room_secret", Role::Player),
            AuthorizationDecision::Granted("SecretKeyShare123ForRoom1".to_string())
        );
    }

    #[test]
    fn admin_room_grants_to_admin() {
        let directory = ShareDirectory::with_default_rooms();
        assert_eq!(
            directory.get_share("room_admin", Role::Admin),
            AuthorizationDecision::Granted("AdminOnlyKeyShare789ForRoom3".to_string())
        );
    }

    #[test]
    fn admin_room_denies_player() {
        let directory = ShareDirectory::with_default_rooms();
        assert_eq!(directory.get_share("room_admin", Role::Player), AuthorizationDecision::Denied);
    }

    #[test]
    fn player_room_grants_to_admin() {
        // Admin passes every gate; only the reverse is restricted
        let directory = ShareDirectory::with_default_rooms();
        assert_eq!(
            directory.get_share("room_treasure", Role::Admin),
            AuthorizationDecision::Granted("TreasureKeyShare456ForRoom2".to_string())
        );
    }

    #[test]
    fn unknown_room_denies_even_admin() {
        let directory = ShareDirectory::with_default_rooms();
        assert_eq!(directory.get_share("unknown_room", Role::Admin), AuthorizationDecision::Denied);
    }

    #[test]
    fn unknown_room_and_wrong_role_are_indistinguishable() {
        let directory = ShareDirectory::with_default_rooms();
        let unknown = directory.get_share("no_such_room", Role::Player);
        let gated = directory.get_share("room_admin", Role::Player);
        assert_eq!(unknown, gated);
    }

    #[test]
    fn custom_rooms_can_be_registered() {
        let mut directory = ShareDirectory::new();
        directory.insert("vault", "VaultShare000", Role::Admin);

        assert!(directory.has_room("vault"));
        assert!(!directory.has_room("room_secret"));
        assert_eq!(
            directory.get_share("vault", Role::Admin),
            AuthorizationDecision::Granted("VaultShare000".to_string())
        );
    }
}
