//! Dictionary store
//!
//! File-backed word→description mapping, safe under concurrent callers.
//!
//! ## Concurrency Model: Single-Writer / Multiple-Reader
//!
//! - **Mutations** (add/delete): take the write lock and hold it across the
//!   persist step, so the sequence of mutations is linearized and the
//!   in-memory mirror never diverges from the file after a successful
//!   operation. A failed persist rolls the mirror back before the lock is
//!   released.
//! - **Reads** (search/list): share the read lock and observe only fully
//!   committed states.
//!
//! ## Persistence
//!
//! The backing file is one JSON array of `{word, des}` entries. Every
//! mutation rewrites it through a temp file in the same directory followed
//! by an atomic rename, so readers of the file never see a partial write
//! and a crashed mutation leaves the previous state intact.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VaultError};

/// One persisted word/description pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// Normalized (trimmed, lowercased) word, unique within the store
    pub word: String,

    /// Trimmed description
    pub des: String,
}

/// Normalize a word into its key form: trimmed and lowercased
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

/// The authoritative, durable word→description store
pub struct Dictionary {
    /// Backing file path
    path: PathBuf,

    /// In-memory mirror of the backing file
    ///
    /// BTreeMap gives `list` a stable lexicographic order for free.
    entries: RwLock<BTreeMap<String, String>>,
}

impl Dictionary {
    /// Open the dictionary at the given path
    ///
    /// Loads and parses the file if it exists, otherwise bootstraps an
    /// empty one. Entries with empty words are dropped on load; words are
    /// normalized.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let mut entries = BTreeMap::new();
        if path.exists() {
            for entry in Self::load_entries(&path)? {
                let word = normalize_word(&entry.word);
                if !word.is_empty() {
                    entries.insert(word, entry.des.trim().to_string());
                }
            }
        } else {
            Self::write_file(&path, &entries)?;
        }

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Check whether a file parses as a dictionary
    ///
    /// Used by the server binary to vet a caller-supplied path before
    /// falling back to the default.
    pub fn validate_file(path: &Path) -> bool {
        Self::load_entries(path).is_ok()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Add a word with its description
    ///
    /// Fails with `WordExists` if the normalized word is already present,
    /// or `Persistence` if the backing file cannot be rewritten (in which
    /// case the store is left exactly as it was).
    pub fn add(&self, word: &str, des: &str) -> Result<()> {
        let word = normalize_word(word);
        let des = des.trim().to_string();

        let mut entries = self.entries.write();
        if entries.contains_key(&word) {
            return Err(VaultError::WordExists);
        }

        entries.insert(word.clone(), des);
        if let Err(e) = Self::write_file(&self.path, &entries) {
            // Roll the mirror back so it never diverges from the file
            entries.remove(&word);
            return Err(e);
        }

        Ok(())
    }

    /// Delete a word
    ///
    /// Fails with `WordNotFound` if absent.
    pub fn delete(&self, word: &str) -> Result<()> {
        let word = normalize_word(word);

        let mut entries = self.entries.write();
        let des = match entries.remove(&word) {
            Some(des) => des,
            None => return Err(VaultError::WordNotFound),
        };

        if let Err(e) = Self::write_file(&self.path, &entries) {
            entries.insert(word, des);
            return Err(e);
        }

        Ok(())
    }

    /// Look up a word's description
    ///
    /// Fails with `WordNotFound` if absent.
    pub fn search(&self, word: &str) -> Result<String> {
        let word = normalize_word(word);
        self.entries
            .read()
            .get(&word)
            .cloned()
            .ok_or(VaultError::WordNotFound)
    }

    /// All words, in stable lexicographic order
    pub fn list(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    /// Number of stored words
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Load and parse the backing file
    fn load_entries(path: &Path) -> Result<Vec<DictionaryEntry>> {
        let bytes = fs::read(path)
            .map_err(|e| VaultError::Persistence(format!("Cannot read {}: {}", path.display(), e)))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| VaultError::Persistence(format!("Cannot parse {}: {}", path.display(), e)))
    }

    /// Rewrite the backing file atomically (temp file + rename)
    ///
    /// Called with the write lock held, so at most one rewrite is in
    /// flight and the temp path cannot collide with itself.
    fn write_file(path: &Path, entries: &BTreeMap<String, String>) -> Result<()> {
        let snapshot: Vec<DictionaryEntry> = entries
            .iter()
            .map(|(word, des)| DictionaryEntry {
                word: word.clone(),
                des: des.clone(),
            })
            .collect();

        let json = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| VaultError::Persistence(format!("Cannot serialize entries: {}", e)))?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, &json).map_err(|e| {
            VaultError::Persistence(format!("Cannot write {}: {}", tmp_path.display(), e))
        })?;
        fs::rename(&tmp_path, path).map_err(|e| {
            VaultError::Persistence(format!("Cannot replace {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}
