// ============================
// identity-lib/src/hasher.rs
// ============================
//! Credential hashing capability: one-way password digests and
//! constant-time verification.
use async_trait::async_trait;
use scrypt::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Params, Scrypt,
};
use zeroize::Zeroize;

use crate::config::ScryptSettings;
use crate::error::AppError;

/// One-way credential hashing and verification.
///
/// Digests are opaque to callers but self-describing on the wire (PHC string
/// format: algorithm identifier, cost parameters, salt), so a future
/// algorithm migration can inspect stored digests without a schema change.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Derive a salted, one-way digest from a plaintext password.
    async fn hash(&self, plain: &str) -> Result<String, AppError>;

    /// Compare a plaintext password against a stored digest in constant
    /// time. Malformed digests compare as a failed match, never an error.
    async fn verify(&self, plain: &str, digest: &str) -> bool;
}

/// scrypt-backed [`CredentialHasher`].
///
/// Hashing is CPU-bound by design; both operations run on the blocking
/// thread pool so they never stall the async runtime.
#[derive(Clone, Copy)]
pub struct ScryptHasher {
    params: Params,
}

impl ScryptHasher {
    /// Hasher with the scrypt crate's recommended cost parameters.
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Hasher with explicit cost parameters. Lower costs are intended for
    /// tests; production callers should stay at or above the defaults.
    pub fn with_params(log_n: u8, r: u32, p: u32) -> Result<Self, AppError> {
        let params = Params::new(log_n, r, p, 32).map_err(|e| AppError::Hash(e.to_string()))?;
        Ok(Self { params })
    }

    /// Hasher configured from application settings.
    pub fn from_settings(settings: &ScryptSettings) -> Result<Self, AppError> {
        Self::with_params(settings.log_n, settings.r, settings.p)
    }
}

impl Default for ScryptHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialHasher for ScryptHasher {
    async fn hash(&self, plain: &str) -> Result<String, AppError> {
        let mut plain = plain.to_string();
        let params = self.params;

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            let result = Scrypt
                .hash_password_customized(plain.as_bytes(), None, None, params, &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| AppError::Hash(e.to_string()));
            // the plaintext copy dies here
            plain.zeroize();
            result
        })
        .await
        .map_err(|e| AppError::Internal(format!("hashing task failed: {e}")))?
    }

    async fn verify(&self, plain: &str, digest: &str) -> bool {
        let mut plain = plain.to_string();
        let digest = digest.to_string();

        tokio::task::spawn_blocking(move || {
            let outcome = match PasswordHash::new(&digest) {
                Ok(parsed) => Scrypt.verify_password(plain.as_bytes(), &parsed).is_ok(),
                Err(_) => false,
            };
            plain.zeroize();
            outcome
        })
        .await
        .unwrap_or(false)
    }
}
