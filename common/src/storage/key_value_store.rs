use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::config::{
    ConfigContentProvider, ConfigError, ConfigSerializer, FileContentConfigProvider,
    YamlConfigSerializer,
};
use crate::log_warn;

use super::StorageError;

/// Flat string-to-string store, the shape of a browser's local storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// All keys live in one YAML map, rewritten in full on every `set`.
pub struct FileKeyValueStore {
    provider: FileContentConfigProvider,
    serializer: YamlConfigSerializer,
    // Serialises read-modify-write of the whole file.
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            provider: FileContentConfigProvider::new(file_path),
            serializer: YamlConfigSerializer::new(),
            write_lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.provider.get_config_content()? {
            Some(content) if !content.trim().is_empty() => {
                Ok(self.serializer.deserialize(&content)?)
            }
            _ => Ok(BTreeMap::new()),
        }
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(StorageError::Backend(ConfigError::Deserialize(e))) => {
                log_warn!(
                    "Discarding unreadable store {}: {}",
                    self.provider.path().display(),
                    e
                );
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());
        let content = self.serializer.serialize(&entries)?;
        self.provider.set_config_content(&content)?;
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
