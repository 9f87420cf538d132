//! The signed-in user, persisted as a small file in the data directory.
//!
//! Every command except `init` and `login` resolves the current user through
//! [`Identity::current`], which fails with [`StoreError::Auth`] when nobody
//! is signed in.

use super::data_storage::DataStorage;
use crate::libs::error::{StoreError, StoreResult};
use anyhow::Result;
use std::fs;

pub const IDENTITY_FILE_NAME: &str = ".identity";

#[derive(Debug, Clone)]
pub struct Identity {
    storage: DataStorage,
}

impl Identity {
    pub fn new() -> Self {
        Self::with_storage(DataStorage::new())
    }

    pub fn with_storage(storage: DataStorage) -> Self {
        Identity { storage }
    }

    /// Id of the signed-in user.
    pub fn current(&self) -> StoreResult<String> {
        let path = self.storage.get_path(IDENTITY_FILE_NAME).map_err(|_| StoreError::Auth)?;
        let user_id = fs::read_to_string(path).map_err(|_| StoreError::Auth)?;
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(StoreError::Auth);
        }
        Ok(user_id.to_string())
    }

    pub fn login(&self, user_id: &str) -> Result<()> {
        let path = self.storage.get_path(IDENTITY_FILE_NAME)?;
        fs::write(path, user_id.trim())?;
        Ok(())
    }

    /// Forgets the signed-in user; returns `false` if nobody was signed in.
    pub fn logout(&self) -> Result<bool> {
        let path = self.storage.get_path(IDENTITY_FILE_NAME)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::new()
    }
}
