// ================
// common/src/lib.rs
// ================
//! Common identity types
//! shared between the credential core and whatever API layer sits on top.
//! This module defines the persisted identity record and its inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role assigned to an identity. The set is closed; new registrations
/// always receive the lowest-privilege [`UserRole::User`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Administrative access
    Admin,
    /// Regular user (lowest privilege, the default)
    #[default]
    User,
}

/// A persisted identity record.
///
/// Built in one step with its real credential hash via [`Identity::new`];
/// there is no observable half-built state. The `id` is the only field the
/// store touches: it is assigned on first save and immutable afterward.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Identity {
    /// Opaque unique id, empty until the store assigns it on first save
    #[serde(default)]
    pub id: String,
    /// Unique login handle (e.g. email), matched exactly (case-sensitive)
    pub identifier: String,
    /// Free-form display name, no uniqueness constraint
    pub display_name: String,
    /// Optional avatar reference, empty when unset
    #[serde(default)]
    pub avatar_ref: String,
    /// Assigned role
    pub role: UserRole,
    /// PHC-format credential digest; never the plaintext password
    pub credential_hash: String,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// Build a complete in-memory identity, ready for its first save.
    /// The credential hash must already be derived; this constructor never
    /// sees a plaintext password.
    pub fn new(
        identifier: String,
        display_name: String,
        avatar_ref: String,
        role: UserRole,
        credential_hash: String,
    ) -> Self {
        Self {
            id: String::new(),
            identifier,
            display_name,
            avatar_ref,
            role,
            credential_hash,
            created_at: Utc::now(),
        }
    }

    /// Whether the store has assigned this record its durable id yet.
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Registration input.
/// # Fields
/// * `identifier` - Unique login handle, format-validated by the caller
/// * `password` - Plaintext password, hashed and discarded by the service
/// * `display_name` - Free-form display name
/// * `avatar_ref` - Optional avatar reference, defaults to empty
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewIdentity {
    pub identifier: String,
    pub password: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar_ref: Option<String>,
}
