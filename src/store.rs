use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::foundation::error::{CardError, CardResult};

/// Key under which the generation count is persisted.
pub const COUNT_KEY: &str = "suiImageCount";

/// Persistent store for the total number of cards generated.
///
/// Access is single-threaded; the store is read once at startup and written
/// after each successful user-triggered render.
pub trait CountStore {
    fn load(&self) -> CardResult<u64>;
    fn store(&self, count: u64) -> CardResult<()>;
}

#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
struct CountFile {
    #[serde(rename = "suiImageCount", default)]
    count: u64,
}

/// JSON-file-backed counter: `{"suiImageCount": N}`.
#[derive(Clone, Debug)]
pub struct JsonCountStore {
    path: PathBuf,
}

impl JsonCountStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl CountStore for JsonCountStore {
    /// Missing file means zero. An unreadable or corrupt file also means
    /// zero, with a warning — the counter is cosmetic and must never block
    /// startup.
    fn load(&self) -> CardResult<u64> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "counter file unreadable, starting from 0");
                return Ok(0);
            }
        };
        match serde_json::from_slice::<CountFile>(&bytes) {
            Ok(file) => Ok(file.count),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "counter file corrupt, starting from 0");
                Ok(0)
            }
        }
    }

    fn store(&self, count: u64) -> CardResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                CardError::store(format!("create store dir '{}': {e}", parent.display()))
            })?;
        }
        let body = serde_json::to_vec_pretty(&CountFile { count })
            .map_err(|e| CardError::store(format!("serialize counter: {e}")))?;
        std::fs::write(&self.path, body).map_err(|e| {
            CardError::store(format!("write counter '{}': {e}", self.path.display()))
        })
    }
}

/// In-memory counter for tests and embedding. Clones share the same value.
#[derive(Clone, Debug, Default)]
pub struct MemoryCountStore {
    value: Rc<Cell<u64>>,
}

impl MemoryCountStore {
    pub fn new(initial: u64) -> Self {
        Self {
            value: Rc::new(Cell::new(initial)),
        }
    }

    pub fn get(&self) -> u64 {
        self.value.get()
    }
}

impl CountStore for MemoryCountStore {
    fn load(&self) -> CardResult<u64> {
        Ok(self.value.get())
    }

    fn store(&self, count: u64) -> CardResult<()> {
        self.value.set(count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> JsonCountStore {
        let path = std::env::temp_dir().join(format!(
            "suicard_count_{}_{}.json",
            tag,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        JsonCountStore::new(path)
    }

    #[test]
    fn missing_file_loads_zero() {
        let store = temp_store("missing");
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn store_then_load_roundtrips_under_the_fixed_key() {
        let store = temp_store("roundtrip");
        store.store(5).unwrap();
        assert_eq!(store.load().unwrap(), 5);

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json[COUNT_KEY], 5);
        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn corrupt_file_loads_zero() {
        let store = temp_store("corrupt");
        std::fs::write(store.path(), b"{not json").unwrap();
        assert_eq!(store.load().unwrap(), 0);
        let _ = std::fs::remove_file(store.path());
    }

    #[test]
    fn memory_store_shares_value_across_clones() {
        let store = MemoryCountStore::new(4);
        let clone = store.clone();
        clone.store(5).unwrap();
        assert_eq!(store.get(), 5);
    }
}
