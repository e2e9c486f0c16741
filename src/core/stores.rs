//! Store lifecycle: loading from and saving to the JSON store file.
//!
//! [`Stores`] is the explicitly-owned composition root. The host constructs
//! one with [`Stores::load_or_default`] at startup, hands it to whatever
//! wires up the UI, and calls [`Stores::save`] at shutdown. Save failures
//! propagate so the host can surface [`NotedError::user_message`] to the
//! user; load failures fall back to the default state and are only logged.

use crate::core::error::{NotedError, Result};
use crate::core::store::NoteItemsStore;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the environment variable overriding the store file name.
pub const STORE_FILE_ENV: &str = "NOTED_STORE_FILE";

const DEFAULT_STORE_FILE: &str = "Store.json";

/// All application stores, persisted wholesale as one JSON document.
///
/// Serializes transparently as its single store, so the on-disk document is
/// `{"noteItems": ..., "focusId": ..., "nextId": ...}`.
#[derive(Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stores {
    pub note_items: NoteItemsStore,
}

impl Stores {
    /// Loads the stores from the default store file (see [`store_file_path`]),
    /// falling back to the default state if the file is missing or unreadable.
    pub fn load_or_default() -> Self {
        Self::load_from(store_file_path())
    }

    /// Loads the stores from `path`. A missing file starts fresh silently; a
    /// present but unparsable file logs a warning and starts fresh.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("no store file at {}, starting fresh", path.display());
            return Self::default();
        }
        match fs::read_to_string(path)
            .map_err(NotedError::from)
            .and_then(|content| serde_json::from_str(&content).map_err(NotedError::from))
        {
            Ok(stores) => stores,
            Err(e) => {
                warn!("failed to load store file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Saves the stores to the default store file.
    pub fn save(&self) -> Result<()> {
        self.save_to(store_file_path())
    }

    /// Saves the stores to `path`, creating parent directories as needed.
    /// The document is written to a sibling temp file first and renamed into
    /// place, so an existing store file is replaced atomically.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

/// Returns the path of the store file: the documents directory joined with
/// the file name from `NOTED_STORE_FILE`, or `Store.json` when unset.
pub fn store_file_path() -> PathBuf {
    let file_name =
        std::env::var(STORE_FILE_ENV).unwrap_or_else(|_| DEFAULT_STORE_FILE.to_string());
    documents_dir().join(file_name)
}

fn documents_dir() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
