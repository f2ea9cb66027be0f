// ============================
// identity-lib/src/service.rs
// ============================
//! Core business logic for credential management: registration with
//! identifier uniqueness, password verification, and identity resolution.
use metrics::counter;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::hasher::CredentialHasher;
use crate::metrics::{
    IDENTITY_REGISTERED, LOOKUP_MISS, REGISTER_CONFLICT, VERIFY_OK, VERIFY_REJECTED,
};
use crate::store::IdentityStore;
use identity_common::{Identity, NewIdentity, UserRole};

/// Credential service over an injected store and hasher.
///
/// Stateless and safely reentrant: all durable state lives behind the
/// [`IdentityStore`], so one instance can serve any number of concurrent
/// callers. Both collaborators arrive as explicit constructor arguments;
/// there is no ambient lookup.
#[derive(Clone)]
pub struct CredentialService {
    store: Arc<dyn IdentityStore>,
    hasher: Arc<dyn CredentialHasher>,
}

impl CredentialService {
    pub fn new(store: Arc<dyn IdentityStore>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { store, hasher }
    }

    /// Register a new identity.
    ///
    /// The identifier must be unused; registration never overwrites or
    /// merges with an existing identity. The plaintext password is hashed,
    /// then discarded; it is never stored or logged. Callers are expected
    /// to have format-validated the input already (see [`crate::validation`]).
    ///
    /// The lookup here is an advisory fast path; the store's `save` is the
    /// authoritative uniqueness check, so a concurrent registration racing
    /// past the lookup still ends in [`AppError::Conflict`].
    pub async fn register(&self, new: NewIdentity) -> Result<Identity, AppError> {
        if self.store.find_by_identifier(&new.identifier).await?.is_some() {
            warn!(identifier = %new.identifier, "registration rejected: identifier taken");
            counter!(REGISTER_CONFLICT).increment(1);
            return Err(AppError::Conflict);
        }

        let credential_hash = self.hasher.hash(&new.password).await?;

        // built in one step: the identity is never observable without its hash
        let identity = Identity::new(
            new.identifier,
            new.display_name,
            new.avatar_ref.unwrap_or_default(),
            UserRole::User,
            credential_hash,
        );

        let persisted = self.store.save(identity).await.inspect_err(|e| {
            if matches!(e, AppError::Conflict) {
                counter!(REGISTER_CONFLICT).increment(1);
            }
        })?;

        debug!(identifier = %persisted.identifier, id = %persisted.id, "identity registered");
        counter!(IDENTITY_REGISTERED).increment(1);

        Ok(persisted)
    }

    /// Verify a password against the identity registered for `identifier`.
    ///
    /// Returns the resolved identity on success. An unknown identifier is
    /// [`AppError::NotFound`] and a failed comparison is
    /// [`AppError::Unauthorized`]; the kinds stay distinct for telemetry,
    /// while [`AppError::sanitized_message`] collapses them for callers that
    /// must not leak which identifiers exist.
    pub async fn verify(&self, identifier: &str, password: &str) -> Result<Identity, AppError> {
        let Some(identity) = self.store.find_by_identifier(identifier).await? else {
            counter!(VERIFY_REJECTED).increment(1);
            return Err(AppError::NotFound);
        };

        if !self.hasher.verify(password, &identity.credential_hash).await {
            warn!(identifier = %identifier, "verification rejected: credential mismatch");
            counter!(VERIFY_REJECTED).increment(1);
            return Err(AppError::Unauthorized);
        }

        counter!(VERIFY_OK).increment(1);
        Ok(identity)
    }

    /// Resolve an identity by primary key. No credential comparison occurs.
    pub async fn lookup(&self, id: &str) -> Result<Identity, AppError> {
        match self.store.find_by_id(id).await? {
            Some(identity) => Ok(identity),
            None => {
                counter!(LOOKUP_MISS).increment(1);
                Err(AppError::NotFound)
            },
        }
    }
}
