//! Singleton cache — instances of shared bindings, keyed by canonical name.
//!
//! The check-then-populate sequence must be atomic per canonical name:
//! under a concurrent first-access race exactly one construction runs and
//! every caller sees the same, fully built instance. Each key owns a
//! `OnceCell`; construction happens through `get_or_try_init`, outside the
//! map's shard locks, so recursive resolution of other keys cannot
//! deadlock the map.

use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use tracing::debug;

use crate::binding::Instance;
use crate::error::Result;

#[derive(Default)]
pub(crate) struct SingletonCache {
    cells: DashMap<String, Arc<OnceCell<Instance>>>,
}

impl SingletonCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self, canonical: &str) -> Arc<OnceCell<Instance>> {
        self.cells.entry(canonical.to_owned()).or_default().clone()
    }

    pub fn get(&self, canonical: &str) -> Option<Instance> {
        self.cells
            .get(canonical)
            .and_then(|cell| cell.get().cloned())
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.get(canonical).is_some()
    }

    /// Returns the cached instance, building it first if absent.
    ///
    /// At most one caller runs `build` per key; racing callers block on
    /// the cell and then observe the winner's instance. A failed build
    /// leaves the cell empty so a later call may retry.
    pub fn get_or_try_build<F>(&self, canonical: &str, build: F) -> Result<Instance>
    where
        F: FnOnce() -> Result<Instance>,
    {
        let cell = self.cell(canonical);
        cell.get_or_try_init(build).cloned()
    }

    /// Stores an instance, replacing any cached value.
    ///
    /// Used for explicit resets and for registering pre-built instances.
    pub fn put(&self, canonical: &str, instance: Instance) {
        debug!(name = canonical, "Cached shared instance");
        let _ = self
            .cells
            .insert(canonical.to_owned(), Arc::new(OnceCell::with_value(instance)));
    }

    /// Drops the cached instance for one name. Returns true if one existed.
    pub fn forget(&self, canonical: &str) -> bool {
        self.cells
            .remove(canonical)
            .is_some_and(|(_, cell)| cell.get().is_some())
    }

    pub fn flush(&self) {
        self.cells.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn boxed(value: u32) -> Instance {
        Arc::new(value)
    }

    #[test]
    fn get_or_try_build_builds_once() {
        let cache = SingletonCache::new();
        let calls = AtomicU32::new(0);

        for _ in 0..3 {
            let instance = cache
                .get_or_try_build("counter", || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(boxed(7))
                })
                .unwrap();
            assert_eq!(*instance.downcast::<u32>().unwrap(), 7);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_build_leaves_cell_empty() {
        use crate::error::{CircularDependencyError, ContainerError};

        let cache = SingletonCache::new();
        let result = cache.get_or_try_build("bad", || {
            Err(ContainerError::CircularDependency(CircularDependencyError {
                chain: vec!["bad".into(), "bad".into()],
            }))
        });
        assert!(result.is_err());
        assert!(!cache.contains("bad"));

        // Retry succeeds
        assert!(cache.get_or_try_build("bad", || Ok(boxed(1))).is_ok());
    }

    #[test]
    fn put_replaces_cached_value() {
        let cache = SingletonCache::new();
        cache.put("x", boxed(1));
        cache.put("x", boxed(2));

        let instance = cache.get("x").unwrap();
        assert_eq!(*instance.downcast::<u32>().unwrap(), 2);
    }

    #[test]
    fn forget_drops_entry() {
        let cache = SingletonCache::new();
        cache.put("x", boxed(1));

        assert!(cache.forget("x"));
        assert!(!cache.contains("x"));
        assert!(!cache.forget("x"));
    }

    #[test]
    fn concurrent_first_access_builds_exactly_once() {
        let cache = Arc::new(SingletonCache::new());
        let calls = Arc::new(AtomicU32::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                std::thread::spawn(move || {
                    let instance = cache
                        .get_or_try_build("shared", || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            Ok(boxed(99))
                        })
                        .unwrap();
                    *instance.downcast::<u32>().unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 99);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
