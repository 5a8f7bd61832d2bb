use crate::error::StoreError;
use crate::state::TranslationState;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A saved translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub id: u64,
    pub original: String,
    pub translated: String,
    pub language: String,
    pub flag: String,
}

impl FavoriteEntry {
    fn from_state(id: u64, state: &TranslationState) -> Self {
        Self {
            id,
            original: state.original.clone(),
            translated: state.translated.clone(),
            language: state.language.clone(),
            flag: state.flag.clone(),
        }
    }
}

/// Issues creation-time ids that never repeat within one process.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn seeded(last: u64) -> Self {
        Self { last }
    }

    pub fn next_id(&mut self) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.last = now.max(self.last.saturating_add(1));
        self.last
    }
}

/// Persistent collection of favorites
pub trait FavoritesRepository {
    /// All entries in insertion order
    fn list(&self) -> Vec<FavoriteEntry>;

    /// Save the given translation as a new favorite
    fn add(&mut self, state: &TranslationState) -> Result<FavoriteEntry, StoreError>;

    /// Remove one entry; `None` when no entry has that id
    fn remove_one(&mut self, id: u64) -> Result<Option<FavoriteEntry>, StoreError>;

    /// Remove every entry, returning what was removed. Empty collections are left untouched.
    fn remove_all(&mut self) -> Result<Vec<FavoriteEntry>, StoreError>;

    /// Put previously removed entries back
    fn restore(&mut self, entries: Vec<FavoriteEntry>) -> Result<(), StoreError>;
}

fn merge_restored(current: &mut Vec<FavoriteEntry>, entries: Vec<FavoriteEntry>) {
    for entry in entries {
        if current.iter().any(|existing| existing.id == entry.id) {
            continue;
        }
        // Ids follow creation order, so this puts the entry back where it was
        let position = current
            .iter()
            .position(|existing| existing.id > entry.id)
            .unwrap_or(current.len());
        current.insert(position, entry);
    }
}

fn validate(state: &TranslationState) -> Result<(), StoreError> {
    if state.is_active() {
        Ok(())
    } else {
        Err(StoreError::NothingToSave)
    }
}

/// Favorites kept as one JSON array in a file
pub struct JsonFileStore {
    path: PathBuf,
    ids: IdGenerator,
}

impl JsonFileStore {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let mut store = Self {
            path: path.as_ref().to_path_buf(),
            ids: IdGenerator::default(),
        };
        let last = store.list().iter().map(|entry| entry.id).max().unwrap_or(0);
        store.ids = IdGenerator::seeded(last);
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<FavoriteEntry>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, entries: &[FavoriteEntry]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl FavoritesRepository for JsonFileStore {
    fn list(&self) -> Vec<FavoriteEntry> {
        match self.read() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "unreadable favorites, treating as empty");
                Vec::new()
            }
        }
    }

    fn add(&mut self, state: &TranslationState) -> Result<FavoriteEntry, StoreError> {
        validate(state)?;
        let mut entries = self.list();
        let entry = FavoriteEntry::from_state(self.ids.next_id(), state);
        entries.push(entry.clone());
        self.write(&entries)?;
        tracing::info!(id = entry.id, original = %entry.original, "favorite saved");
        Ok(entry)
    }

    fn remove_one(&mut self, id: u64) -> Result<Option<FavoriteEntry>, StoreError> {
        let mut entries = self.list();
        let removed = entries
            .iter()
            .position(|entry| entry.id == id)
            .map(|index| entries.remove(index));
        if removed.is_some() {
            self.write(&entries)?;
        }
        Ok(removed)
    }

    fn remove_all(&mut self) -> Result<Vec<FavoriteEntry>, StoreError> {
        let entries = self.list();
        if entries.is_empty() {
            return Ok(entries);
        }
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        Ok(entries)
    }

    fn restore(&mut self, entries: Vec<FavoriteEntry>) -> Result<(), StoreError> {
        let mut current = self.list();
        merge_restored(&mut current, entries);
        self.write(&current)
    }
}

/// In-memory favorites for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Vec<FavoriteEntry>,
    ids: IdGenerator,
    writes: usize,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mutations that reached storage
    pub fn writes(&self) -> usize {
        self.writes
    }
}

#[cfg(test)]
impl FavoritesRepository for MemoryStore {
    fn list(&self) -> Vec<FavoriteEntry> {
        self.entries.clone()
    }

    fn add(&mut self, state: &TranslationState) -> Result<FavoriteEntry, StoreError> {
        validate(state)?;
        let entry = FavoriteEntry::from_state(self.ids.next_id(), state);
        self.entries.push(entry.clone());
        self.writes += 1;
        Ok(entry)
    }

    fn remove_one(&mut self, id: u64) -> Result<Option<FavoriteEntry>, StoreError> {
        let removed = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .map(|index| self.entries.remove(index));
        if removed.is_some() {
            self.writes += 1;
        }
        Ok(removed)
    }

    fn remove_all(&mut self) -> Result<Vec<FavoriteEntry>, StoreError> {
        if self.entries.is_empty() {
            return Ok(Vec::new());
        }
        self.writes += 1;
        Ok(std::mem::take(&mut self.entries))
    }

    fn restore(&mut self, entries: Vec<FavoriteEntry>) -> Result<(), StoreError> {
        merge_restored(&mut self.entries, entries);
        self.writes += 1;
        Ok(())
    }
}
