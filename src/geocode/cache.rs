// src/geocode/cache.rs

use super::client::GeoPoint;
use crate::errors::BuildError;
use std::collections::HashMap;
use std::path::PathBuf;

/// Persistence for resolved addresses. An entry's value is
/// `Some(point)` for a successful lookup and `None` for a cached
/// "no result", so failed addresses are not re-queried on later builds.
/// Injected into the geocoder so tests can swap an in-memory fake.
pub trait GeoStore {
    /// `None` = never looked up; `Some(None)` = looked up, no result.
    fn get(&self, address: &str) -> Option<Option<GeoPoint>>;
    fn put(&mut self, address: String, point: Option<GeoPoint>);
    fn save(&self) -> Result<(), BuildError>;
}

/// The single piece of state shared across builds: one JSON object
/// mapping normalized address → `{lat, lng}` or `null`.
pub struct JsonFileStore {
    path: PathBuf,
    entries: HashMap<String, Option<GeoPoint>>,
}

impl JsonFileStore {
    /// Read the whole cache up front. A missing or corrupt file is an
    /// empty cache: every address gets re-resolved this run, but the
    /// build never aborts over it.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(entries) => entries,
                Err(e) => {
                    eprintln!("⚠️ Geocode cache {} unreadable ({e}), starting empty", path.display());
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self { path, entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl GeoStore for JsonFileStore {
    fn get(&self, address: &str) -> Option<Option<GeoPoint>> {
        self.entries.get(address).copied()
    }

    fn put(&mut self, address: String, point: Option<GeoPoint>) {
        self.entries.insert(address, point);
    }

    fn save(&self) -> Result<(), BuildError> {
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| BuildError::CacheIo(e.to_string()))?;
        std::fs::write(&self.path, json)
            .map_err(|e| BuildError::CacheIo(format!("write {}: {e}", self.path.display())))
    }
}

/// In-memory store for tests and dry runs.
#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<String, Option<GeoPoint>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preloaded(entries: HashMap<String, Option<GeoPoint>>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &HashMap<String, Option<GeoPoint>> {
        &self.entries
    }
}

impl GeoStore for MemoryStore {
    fn get(&self, address: &str) -> Option<Option<GeoPoint>> {
        self.entries.get(address).copied()
    }

    fn put(&mut self, address: String, point: Option<GeoPoint>) {
        self.entries.insert(address, point);
    }

    fn save(&self) -> Result<(), BuildError> {
        Ok(())
    }
}
