use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::{ChecklistError, Result};
use crate::storage::KeyValueStorage;

const STORAGE_FILE: &str = "storage.json";

/// Key-value storage persisted as one JSON object file in the data directory.
///
/// Every write replaces the file atomically; a failed write leaves both the
/// file and the in-memory copy untouched.
#[derive(Debug)]
pub struct FileStorage {
    pub data_dir: PathBuf,
    pub storage_path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStorage {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let data_dir = data_dir.to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        let storage_path = data_dir.join(STORAGE_FILE);
        let items = if storage_path.exists() {
            load_items(&storage_path)?
        } else {
            BTreeMap::new()
        };

        info!(
            data_dir = %data_dir.display(),
            storage = %storage_path.display(),
            keys = items.len(),
            "opened file storage"
        );

        Ok(Self {
            data_dir,
            storage_path,
            items,
        })
    }

    fn commit(&mut self, key: &str, items: BTreeMap<String, String>) -> Result<()> {
        save_items_atomic(&self.storage_path, &items).map_err(|err| ChecklistError::Storage {
            key: key.to_string(),
            reason: format!("{err:#}"),
        })?;
        self.items = items;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    #[tracing::instrument(skip(self, value), fields(len = value.len()))]
    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.items.clone();
        next.insert(key.to_string(), value.to_string());
        self.commit(key, next)
    }

    #[tracing::instrument(skip(self))]
    fn remove_item(&mut self, key: &str) -> Result<()> {
        if !self.items.contains_key(key) {
            return Ok(());
        }
        let mut next = self.items.clone();
        next.remove(key);
        self.commit(key, next)
    }
}

/// An unreadable file is treated as empty storage so the seed lists load.
#[tracing::instrument(skip(path))]
fn load_items(path: &Path) -> anyhow::Result<BTreeMap<String, String>> {
    debug!(file = %path.display(), "loading storage file");
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed reading {}", path.display()))?;
    if raw.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
        Ok(items) => Ok(items),
        Err(err) => {
            warn!(
                file = %path.display(),
                error = %err,
                "storage file is not a JSON object of strings; starting empty"
            );
            Ok(BTreeMap::new())
        }
    }
}

#[tracing::instrument(skip(path, items))]
fn save_items_atomic(path: &Path, items: &BTreeMap<String, String>) -> anyhow::Result<()> {
    debug!(file = %path.display(), keys = items.len(), "saving storage atomically");

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;
    let serialized = serde_json::to_string_pretty(items)?;
    writeln!(temp, "{serialized}")?;
    temp.flush()?;

    temp.persist(path)
        .map_err(|err| anyhow!("failed to persist {}: {}", path.display(), err))?;

    Ok(())
}
