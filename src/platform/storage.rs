//! Record store backends
//!
//! Storage errors are logged and swallowed; a missing or corrupt record reads
//! as 0 so a broken save never stops the game.

use serde::{Deserialize, Serialize};

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

use crate::persistence::RecordStore;

/// On-disk / LocalStorage shape
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredRecords {
    all_time_best: u64,
}

fn decode(json: &str) -> u64 {
    match serde_json::from_str::<StoredRecords>(json) {
        Ok(stored) => stored.all_time_best,
        Err(e) => {
            log::warn!("Discarding unreadable record data: {}", e);
            0
        }
    }
}

fn encode(score: u64) -> Option<String> {
    serde_json::to_string(&StoredRecords {
        all_time_best: score,
    })
    .map_err(|e| log::warn!("Failed to encode records: {}", e))
    .ok()
}

/// JSON file store for native builds
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl RecordStore for JsonFileStore {
    fn load_all_time_best(&self) -> u64 {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => decode(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => {
                log::warn!("Failed to read {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save_all_time_best(&mut self, score: u64) {
        let Some(json) = encode(score) else {
            return;
        };
        match std::fs::write(&self.path, json) {
            Ok(()) => log::info!("All-time best {} saved to {}", score, self.path.display()),
            Err(e) => log::warn!("Failed to write {}: {}", self.path.display(), e),
        }
    }
}

/// LocalStorage store for the browser build
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    const STORAGE_KEY: &'static str = "flippy_bird_records";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(target_arch = "wasm32")]
impl RecordStore for LocalStore {
    fn load_all_time_best(&self) -> u64 {
        Self::storage()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten())
            .map(|json| decode(&json))
            .unwrap_or(0)
    }

    fn save_all_time_best(&mut self, score: u64) {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, all-time best not saved");
            return;
        };
        if let Some(json) = encode(score) {
            if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                log::warn!("Failed to save all-time best");
            }
        }
    }
}
