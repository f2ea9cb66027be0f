// ============================
// identity-lib/src/store.rs
// ============================
//! Identity storage abstraction with in-memory and flat-file implementations.
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tokio::fs as tokio_fs;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::AppError;
use identity_common::Identity;

/// Trait for identity storage backends.
///
/// Identifier matching is exact (byte equality); any normalization such as
/// lowercasing is a caller policy applied before the store is consulted.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Look up an identity by its unique login identifier
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Identity>, AppError>;

    /// Look up an identity by its primary key
    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, AppError>;

    /// Persist a new identity, assigning its id, and return the persisted
    /// record. The store is the authority on identifier uniqueness: saving
    /// an identifier that already exists answers [`AppError::Conflict`],
    /// even when two saves race. Updates to already-persisted identities
    /// are outside this core's scope.
    async fn save(&self, identity: Identity) -> Result<Identity, AppError>;
}

/// In-memory implementation of the [`IdentityStore`] trait.
///
/// The identifier index entry is claimed atomically, so concurrent saves of
/// the same identifier cannot both succeed.
#[derive(Default)]
pub struct InMemoryIdentityStore {
    by_id: DashMap<String, Identity>,
    id_by_identifier: DashMap<String, String>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Identity>, AppError> {
        let Some(id) = self.id_by_identifier.get(identifier) else {
            return Ok(None);
        };
        Ok(self.by_id.get(id.value()).map(|entry| entry.value().clone()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, AppError> {
        Ok(self.by_id.get(id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, identity: Identity) -> Result<Identity, AppError> {
        if identity.is_persisted() {
            return Err(AppError::Internal(
                "updates to persisted identities are not supported".to_string(),
            ));
        }

        let mut persisted = identity;
        persisted.id = Uuid::new_v4().to_string();

        match self.id_by_identifier.entry(persisted.identifier.clone()) {
            Entry::Occupied(_) => Err(AppError::Conflict),
            Entry::Vacant(slot) => {
                slot.insert(persisted.id.clone());
                self.by_id.insert(persisted.id.clone(), persisted.clone());
                Ok(persisted)
            },
        }
    }
}

/// Flat-file implementation of the [`IdentityStore`] trait.
///
/// Records live in a single JSON document under the data directory. Writers
/// are serialized by an async mutex, so the uniqueness check and the write
/// happen atomically within the process.
pub struct FlatFileIdentityStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FlatFileIdentityStore {
    pub fn new<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    fn records_path(&self) -> PathBuf {
        self.root.join("identities.json")
    }

    async fn read_all(&self) -> Result<Vec<Identity>, AppError> {
        let path = self.records_path();

        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = tokio_fs::read_to_string(&path).await?;
        let identities: Vec<Identity> = serde_json::from_str(&content)?;

        Ok(identities)
    }

    async fn write_all(&self, identities: &[Identity]) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(identities)?;
        tokio_fs::write(self.records_path(), json).await?;
        Ok(())
    }
}

#[async_trait]
impl IdentityStore for FlatFileIdentityStore {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Identity>, AppError> {
        let identities = self.read_all().await?;
        Ok(identities
            .into_iter()
            .find(|identity| identity.identifier == identifier))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Identity>, AppError> {
        let identities = self.read_all().await?;
        Ok(identities.into_iter().find(|identity| identity.id == id))
    }

    async fn save(&self, identity: Identity) -> Result<Identity, AppError> {
        if identity.is_persisted() {
            return Err(AppError::Internal(
                "updates to persisted identities are not supported".to_string(),
            ));
        }

        // hold the lock across check and write
        let _guard = self.write_lock.lock().await;

        let mut identities = self.read_all().await?;
        if identities
            .iter()
            .any(|existing| existing.identifier == identity.identifier)
        {
            return Err(AppError::Conflict);
        }

        let mut persisted = identity;
        persisted.id = Uuid::new_v4().to_string();

        identities.push(persisted.clone());
        self.write_all(&identities).await?;

        Ok(persisted)
    }
}
