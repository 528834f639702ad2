//! In-memory repositories backed by `DashMap`.

use std::sync::Mutex;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;

use crate::domain::entities::{Mapping, NewClick};
use crate::domain::repositories::{ClickRepository, MappingRepository};
use crate::error::AppError;

/// Process-local mapping store.
///
/// Insert-if-absent goes through `DashMap::entry`, which holds the shard
/// lock for the key, so two concurrent saves of the same key cannot both
/// succeed.
#[derive(Debug, Default)]
pub struct InMemoryMappingRepository {
    storage: DashMap<String, Mapping>,
}

impl InMemoryMappingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MappingRepository for InMemoryMappingRepository {
    async fn find(&self, key: &str) -> Result<Option<Mapping>, AppError> {
        Ok(self.storage.get(key).map(|entry| entry.value().clone()))
    }

    async fn save(&self, mapping: Mapping) -> Result<(), AppError> {
        match self.storage.entry(mapping.key.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Key already exists",
                json!({ "key": mapping.key }),
            )),
            Entry::Vacant(slot) => {
                slot.insert(mapping);
                Ok(())
            }
        }
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.storage.len() as i64)
    }
}

/// Process-local click log.
#[derive(Debug, Default)]
pub struct InMemoryClickRepository {
    clicks: Mutex<Vec<NewClick>>,
}

impl InMemoryClickRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every recorded click, oldest first.
    pub fn snapshot(&self) -> Vec<NewClick> {
        self.clicks
            .lock()
            .map(|clicks| clicks.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ClickRepository for InMemoryClickRepository {
    async fn save(&self, click: NewClick) -> Result<(), AppError> {
        self.clicks
            .lock()
            .map_err(|_| AppError::internal("Click log lock poisoned", json!({})))?
            .push(click);
        Ok(())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self
            .clicks
            .lock()
            .map_err(|_| AppError::internal("Click log lock poisoned", json!({})))?
            .len() as i64)
    }
}
