//! String Interning Pool and Identifiers
//!
//! Node types and property names are interned so that every occurrence of
//! the same name shares one allocation. Comparing two identifiers is then
//! usually a pointer comparison.
//!
//! Uses hash-based lookup to avoid storing duplicate string data. Names no
//! longer referenced anywhere are pruned as the pool grows.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock};

/// Pool size below which no pruning happens
const MIN_PRUNE_AT: usize = 256;

/// String interning pool
///
/// Memory layout:
/// - `buckets`: hash of string content -> pooled strings with that hash
///   (handles rare collisions)
/// - `empty`: the shared empty string, never pruned
///
/// An entry whose only owner is the pool is dropped by `prune`, which runs
/// on its own whenever the pool has doubled since the last prune.
#[derive(Debug)]
pub struct StringPool {
    empty: Arc<str>,
    buckets: HashMap<u64, Vec<Arc<str>>>,
    len: usize,
    prune_at: usize,
}

impl Default for StringPool {
    fn default() -> Self {
        Self::new()
    }
}

impl StringPool {
    /// Create a new empty string pool
    pub fn new() -> Self {
        StringPool {
            empty: Arc::from(""),
            buckets: HashMap::new(),
            len: 0,
            prune_at: MIN_PRUNE_AT,
        }
    }

    #[inline]
    fn compute_hash(s: &str) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        let mut hasher = DefaultHasher::new();
        s.hash(&mut hasher);
        hasher.finish()
    }

    /// Intern a string, returning the pooled copy
    pub fn intern(&mut self, s: &str) -> Arc<str> {
        if s.is_empty() {
            return self.empty.clone();
        }

        let hash = Self::compute_hash(s);
        let bucket = self.buckets.entry(hash).or_default();
        if let Some(pooled) = bucket.iter().find(|pooled| &***pooled == s) {
            return pooled.clone();
        }

        let pooled: Arc<str> = Arc::from(s);
        bucket.push(pooled.clone());
        self.len += 1;

        if self.len >= self.prune_at {
            self.prune();
            self.prune_at = (self.len * 2).max(MIN_PRUNE_AT);
        }
        pooled
    }

    /// Look up an already interned string without inserting it
    pub fn get(&self, s: &str) -> Option<Arc<str>> {
        if s.is_empty() {
            return Some(self.empty.clone());
        }
        self.buckets
            .get(&Self::compute_hash(s))?
            .iter()
            .find(|pooled| &***pooled == s)
            .cloned()
    }

    /// Drop every entry nobody outside the pool holds; returns how many went
    pub fn prune(&mut self) -> usize {
        let before = self.len;
        self.buckets.retain(|_, bucket| {
            bucket.retain(|pooled| Arc::strong_count(pooled) > 1);
            !bucket.is_empty()
        });
        self.len = self.buckets.values().map(Vec::len).sum();
        if before > self.len {
            tracing::trace!(removed = before - self.len, kept = self.len, "pruned string pool");
        }
        before - self.len
    }

    /// Get the number of unique non-empty strings stored
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get total bytes used by pooled strings
    pub fn bytes_used(&self) -> usize {
        self.buckets.values().flatten().map(|s| s.len()).sum()
    }
}

static GLOBAL_POOL: LazyLock<Mutex<StringPool>> = LazyLock::new(|| Mutex::new(StringPool::new()));

/// An interned, immutable name for node types and properties
#[derive(Clone)]
pub struct Identifier(Arc<str>);

impl Identifier {
    /// Intern `name` in the global pool
    pub fn new(name: &str) -> Self {
        Identifier(GLOBAL_POOL.lock().intern(name))
    }

    /// The empty identifier, returned by accessors on empty documents
    pub fn null() -> Self {
        Self::new("")
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Identifier {
    fn default() -> Self {
        Self::null()
    }
}

impl PartialEq for Identifier {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for Identifier {}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Identifier::new(s)
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Identifier::new(&s)
    }
}

impl From<&String> for Identifier {
    fn from(s: &String) -> Self {
        Identifier::new(s)
    }
}

impl From<&Identifier> for Identifier {
    fn from(id: &Identifier) -> Self {
        id.clone()
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
