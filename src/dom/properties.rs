//! Ordered property storage
//!
//! Names are unique; insertion order is kept so serialization is
//! deterministic. Re-setting a name replaces its value in place.

use super::strings::Identifier;
use crate::value::Value;

#[derive(Debug, Clone, Default)]
pub struct PropertySet {
    entries: Vec<(Identifier, Value)>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PropertySet {
            entries: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n.as_str() == name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.position(name).map(|i| &self.entries[i].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Insert or replace. Returns true if the stored value changed.
    pub fn set(&mut self, name: Identifier, value: Value) -> bool {
        match self.position(name.as_str()) {
            Some(i) => {
                let slot = &mut self.entries[i].1;
                let changed = !same_value(slot, &value);
                *slot = value;
                changed
            }
            None => {
                self.entries.push((name, value));
                true
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.position(name).map(|i| self.entries.remove(i).1)
    }

    pub fn name_at(&self, index: usize) -> Option<&Identifier> {
        self.entries.get(index).map(|(n, _)| n)
    }

    pub fn value_at(&self, index: usize) -> Option<&Value> {
        self.entries.get(index).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Identifier, &Value)> {
        self.entries.iter().map(|(n, v)| (n, v))
    }
}

/// Strict comparison, so that `Int(1)` replaced by `String("1")` counts as a change
fn same_value(a: &Value, b: &Value) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b) && a == b
}

/// Order-sensitive: same names with the same values at the same positions
impl PartialEq for PropertySet {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|((n1, v1), (n2, v2))| n1 == n2 && v1 == v2)
    }
}
