//! Login session persistence
//!
//! A session is two string entries in durable key-value storage: an
//! authenticated flag and the serialized family record.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::FamilyRecord;
use crate::config::Config;

/// Durable string key-value storage
pub trait LocalStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: LocalStorage + ?Sized> LocalStorage for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Storage that lives only as long as the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl LocalStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Storage backed by a JSON object on disk, rewritten on every change
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStorage {
    /// Open the storage file at `path`, starting empty if it does not exist
    ///
    /// An unreadable or corrupted file also starts empty; the next write
    /// replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Discarding unreadable storage {:?}: {:#}", path, e);
                HashMap::new()
            }
        };
        Self { path, entries }
    }

    /// Open the default storage file in the data directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(Config::data_dir()?.join("storage.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(path: &Path) -> Result<HashMap<String, String>> {
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read storage from {:?}", path))?;
        serde_json::from_str(&contents).with_context(|| "Failed to parse storage.json")
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {:?}", parent))?;
        }

        let contents = serde_json::to_string_pretty(&self.entries)
            .with_context(|| "Failed to serialize storage")?;

        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write storage to {:?}", self.path))?;

        Ok(())
    }
}

impl LocalStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.save()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }
}

/// The two storage keys one flow uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionKeys {
    /// Holds `"true"` while logged in
    pub auth: &'static str,
    /// Holds the serialized [`FamilyRecord`]
    pub record: &'static str,
}

/// Restored login state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    LoggedOut,
    Authenticated(FamilyRecord),
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn record(&self) -> Option<&FamilyRecord> {
        match self {
            Session::Authenticated(record) => Some(record),
            Session::LoggedOut => None,
        }
    }
}

/// Reads and writes one flow's session in a [`LocalStorage`]
#[derive(Debug)]
pub struct SessionStore<S: LocalStorage> {
    storage: S,
    keys: SessionKeys,
}

impl<S: LocalStorage> SessionStore<S> {
    const AUTHENTICATED: &'static str = "true";

    pub fn new(storage: S, keys: SessionKeys) -> Self {
        Self { storage, keys }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Rebuild the session from storage
    ///
    /// A record that fails to deserialize clears both keys and restores as
    /// logged out. Storage errors while clearing are logged, never returned.
    pub fn restore(&mut self) -> Session {
        let flag = self.storage.get(self.keys.auth);
        let record = self.storage.get(self.keys.record);

        let (Some(flag), Some(record)) = (flag, record) else {
            return Session::LoggedOut;
        };
        if flag != Self::AUTHENTICATED {
            return Session::LoggedOut;
        }

        match serde_json::from_str::<FamilyRecord>(&record) {
            Ok(record) => {
                tracing::info!(family = %record.family_name, "restored session");
                Session::Authenticated(record)
            }
            Err(e) => {
                tracing::warn!("Clearing corrupted session record: {}", e);
                if let Err(e) = self.clear() {
                    tracing::error!("Failed to clear session: {:#}", e);
                }
                Session::LoggedOut
            }
        }
    }

    /// Persist a successful login
    pub fn login(&mut self, record: &FamilyRecord) -> Result<()> {
        let serialized =
            serde_json::to_string(record).with_context(|| "Failed to serialize family record")?;
        self.storage.set(self.keys.auth, Self::AUTHENTICATED)?;
        self.storage.set(self.keys.record, &serialized)?;
        tracing::info!(family = %record.family_name, "session stored");
        Ok(())
    }

    /// Forget the session
    pub fn logout(&mut self) -> Result<()> {
        self.clear()?;
        tracing::info!("session cleared");
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.storage.remove(self.keys.auth)?;
        self.storage.remove(self.keys.record)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const KEYS: SessionKeys = SessionKeys { auth: "wedding-auth-cye", record: "wedding-family-cye" };

    fn record() -> FamilyRecord {
        FamilyRecord {
            personal_message: Some("Gracias por acompañarnos".into()),
            ..FamilyRecord::new("Familia1", "Familia Pérez")
        }
    }

    #[test]
    fn empty_storage_is_logged_out() {
        let mut store = SessionStore::new(MemoryStorage::default(), KEYS);
        assert_eq!(store.restore(), Session::LoggedOut);
    }

    #[test]
    fn login_then_restore_round_trips() {
        let mut store = SessionStore::new(MemoryStorage::default(), KEYS);
        store.login(&record()).unwrap();

        assert_eq!(store.storage().get(KEYS.auth).as_deref(), Some("true"));
        assert_eq!(store.restore(), Session::Authenticated(record()));
    }

    #[test]
    fn corrupted_record_clears_both_keys() {
        let mut storage = MemoryStorage::default();
        storage.set(KEYS.auth, "true").unwrap();
        storage.set(KEYS.record, "{not json").unwrap();
        let mut store = SessionStore::new(storage, KEYS);

        assert_eq!(store.restore(), Session::LoggedOut);
        assert_eq!(store.storage().get(KEYS.auth), None);
        assert_eq!(store.storage().get(KEYS.record), None);
    }

    #[test]
    fn flag_other_than_true_is_logged_out_but_kept() {
        let mut storage = MemoryStorage::default();
        storage.set(KEYS.auth, "false").unwrap();
        storage.set(KEYS.record, &serde_json::to_string(&record()).unwrap()).unwrap();
        let mut store = SessionStore::new(storage, KEYS);

        assert_eq!(store.restore(), Session::LoggedOut);
        assert!(store.storage().get(KEYS.record).is_some());
    }

    #[test]
    fn logout_removes_both_keys() {
        let mut store = SessionStore::new(MemoryStorage::default(), KEYS);
        store.login(&record()).unwrap();
        store.logout().unwrap();

        assert_eq!(store.storage().get(KEYS.auth), None);
        assert_eq!(store.storage().get(KEYS.record), None);
        assert_eq!(store.restore(), Session::LoggedOut);
    }

    #[test]
    fn file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let mut store = SessionStore::new(FileStorage::open(&path), KEYS);
        store.login(&record()).unwrap();

        let mut reopened = SessionStore::new(FileStorage::open(&path), KEYS);
        assert_eq!(reopened.restore(), Session::Authenticated(record()));
    }

    #[test]
    fn corrupted_storage_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "[[[").unwrap();

        let storage = FileStorage::open(&path);
        assert_eq!(storage.get(KEYS.auth), None);
    }
}
