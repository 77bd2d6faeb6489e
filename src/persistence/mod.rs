//! Best-score persistence
//!
//! Storage is an opaque string key-value store. Reads that fail or hold
//! garbage fall back to zero; writes are best-effort and only logged on error.

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

/// Key the best score is stored under
pub const BEST_SCORE_KEY: &str = "skyhop.best";

/// Failure writing to a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backing storage could not be reached (private browsing, no window, ...)
    Unavailable,
    /// The store refused the write (quota, permissions, ...)
    Rejected(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            StoreError::Unavailable => f.write_str("storage unavailable"),
            StoreError::Rejected(msg) => write!(f, "storage rejected write: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// String key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// In-process store; the native default and the test double
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a single entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    /// Number of successful `set` calls
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Read the stored best score, treating missing or malformed values as 0
pub fn load_best<S: KeyValueStore + ?Sized>(store: &S) -> u32 {
    let Some(raw) = store.get(BEST_SCORE_KEY) else {
        return 0;
    };
    match raw.trim().parse::<u32>() {
        Ok(best) => best,
        Err(e) => {
            log::warn!("Ignoring malformed best score {:?}: {}", raw, e);
            0
        }
    }
}

/// Write the best score, logging instead of failing
pub fn save_best<S: KeyValueStore + ?Sized>(store: &mut S, best: u32) -> bool {
    match store.set(BEST_SCORE_KEY, &best.to_string()) {
        Ok(()) => {
            log::info!("Best score saved ({})", best);
            true
        }
        Err(e) => {
            log::warn!("Could not save best score {}: {}", best, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn test_load_missing() {
        assert_eq!(load_best(&MemoryStore::new()), 0);
    }

    #[test]
    fn test_load_valid() {
        assert_eq!(load_best(&MemoryStore::with_entry(BEST_SCORE_KEY, "17")), 17);
        assert_eq!(load_best(&MemoryStore::with_entry(BEST_SCORE_KEY, " 8\n")), 8);
    }

    #[test]
    fn test_load_malformed() {
        for raw in ["", "abc", "-3", "1.5", "99999999999999"] {
            assert_eq!(load_best(&MemoryStore::with_entry(BEST_SCORE_KEY, raw)), 0, "{raw:?}");
        }
    }

    #[test]
    fn test_save_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(save_best(&mut store, 12));
        assert_eq!(store.writes(), 1);
        assert_eq!(load_best(&store), 12);
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let mut store = BrokenStore;
        assert!(!save_best(&mut store, 5));
    }

    #[test]
    fn test_boxed_store() {
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        save_best(&mut store, 4);
        assert_eq!(load_best(&store), 4);
    }
}
