// ============================
// identity-lib/src/lib.rs
// ============================
//! Core credential-management functionality: identity registration,
//! password verification and identity resolution over pluggable storage
//! and hashing capabilities.

pub mod config;
pub mod error;
pub mod hasher;
pub mod metrics;
pub mod service;
pub mod store;
pub mod validation;

pub use config::{PasswordRequirements, ScryptSettings, Settings};
pub use error::AppError;
pub use hasher::{CredentialHasher, ScryptHasher};
pub use service::CredentialService;
pub use store::{FlatFileIdentityStore, IdentityStore, InMemoryIdentityStore};

pub use identity_common::{Identity, NewIdentity, UserRole};
