use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

#[cfg(not(target_arch = "wasm32"))]
use anyhow::Context as _;
use serde::{Deserialize, Serialize};

/// Origin-scoped key/value text storage that survives page loads.
pub trait ExpansionStore {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Chapter identity to expanded flag, stored as one JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionRecord(BTreeMap<String, bool>);

impl ExpansionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, identity: &str) -> Option<bool> {
        self.0.get(identity).copied()
    }

    pub fn insert(&mut self, identity: impl Into<String>, expanded: bool) {
        self.0.insert(identity.into(), expanded);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, bool)> for ExpansionRecord {
    fn from_iter<T: IntoIterator<Item = (String, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Reads the record under `key`. Missing, unreadable, or malformed content
/// all read as an empty record.
pub fn load_record<S: ExpansionStore + ?Sized>(store: &S, key: &str) -> ExpansionRecord {
    match store.read(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
        Ok(None) | Err(_) => ExpansionRecord::default(),
    }
}

/// Replaces the record under `key`. Returns whether the write landed.
pub fn save_record<S: ExpansionStore + ?Sized>(
    store: &S,
    key: &str,
    record: &ExpansionRecord,
) -> bool {
    let Ok(raw) = serde_json::to_string(record) else {
        return false;
    };
    store.write(key, &raw).is_ok()
}

#[derive(Debug, Default)]
pub struct MemoryExpansionStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryExpansionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        store
    }
}

impl ExpansionStore for MemoryExpansionStore {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// One `<key>.json` file per key under `base_dir`.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct LocalFsExpansionStore {
    base_dir: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl LocalFsExpansionStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn key_path(&self, key: &str) -> anyhow::Result<PathBuf> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\'])
            && !key.contains('\0');
        if !valid {
            anyhow::bail!("storage key must be a plain file name: {key:?}");
        }
        Ok(self.base_dir.join(format!("{key}.json")))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ExpansionStore for LocalFsExpansionStore {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        let path = self.key_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("read: {}", path.display())),
        }
    }

    fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let path = self.key_path(key)?;
        write_atomic(&path, value.as_bytes())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("path has no parent: {}", path.display()))?;
    std::fs::create_dir_all(parent)
        .with_context(|| format!("create parent dir: {}", parent.display()))?;

    let tmp_path = path.with_extension(format!("tmp.{}", uuid::Uuid::new_v4().simple()));
    std::fs::write(&tmp_path, data)
        .with_context(|| format!("write tmp: {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("rename tmp to final: {}", path.display()))?;
    Ok(())
}
