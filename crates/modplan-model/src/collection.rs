//! Identity-unique, insertion-ordered collections

use crate::error::CollectionError;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// An entity with a stable identity key
///
/// Two values with the same key are the "same" entity even when their other
/// fields differ; a `UniqueCollection` holds at most one value per key.
pub trait Identified {
    type Key: Clone + Eq + Hash + fmt::Debug + fmt::Display;

    fn key(&self) -> Self::Key;
}

/// Tombstones are compacted once they outnumber live entries past this floor
const COMPACTION_FLOOR: usize = 16;

/// A set-like container enforcing one value per identity key
///
/// Entries keep their insertion position; `replace` keeps the position of the
/// value it replaces. Lookups go through a key index, and removal leaves a
/// tombstone that is compacted lazily, so all operations are O(1) amortized.
#[derive(Clone)]
pub struct UniqueCollection<T: Identified> {
    entries: Vec<Option<T>>,
    index: HashMap<T::Key, usize>,
}

impl<T: Identified> UniqueCollection<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a collection, rejecting the first duplicate identity
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Result<Self, CollectionError> {
        let mut collection = Self::new();
        for item in items {
            collection.add(item)?;
        }
        Ok(collection)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.index.contains_key(&item.key())
    }

    pub fn contains_key(&self, key: &T::Key) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.index
            .get(key)
            .and_then(|&position| self.entries[position].as_ref())
    }

    /// Iterate live entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.iter().filter_map(Option::as_ref)
    }

    pub fn add(&mut self, item: T) -> Result<(), CollectionError> {
        let key = item.key();
        if self.index.contains_key(&key) {
            return Err(CollectionError::Duplicate {
                key: key.to_string(),
            });
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(Some(item));
        Ok(())
    }

    /// Replace the entry identified by `old` with `new`, keeping its position
    pub fn replace(&mut self, old: &T, new: T) -> Result<(), CollectionError> {
        self.replace_key(&old.key(), new)
    }

    pub fn replace_key(&mut self, old_key: &T::Key, new: T) -> Result<(), CollectionError> {
        let position = *self.index.get(old_key).ok_or_else(|| CollectionError::NotFound {
            key: old_key.to_string(),
        })?;

        let new_key = new.key();
        if &new_key != old_key {
            if self.index.contains_key(&new_key) {
                return Err(CollectionError::Duplicate {
                    key: new_key.to_string(),
                });
            }
            self.index.remove(old_key);
            self.index.insert(new_key, position);
        }

        self.entries[position] = Some(new);
        Ok(())
    }

    pub fn remove(&mut self, item: &T) -> Result<T, CollectionError> {
        self.remove_key(&item.key())
    }

    pub fn remove_key(&mut self, key: &T::Key) -> Result<T, CollectionError> {
        let position = self.index.remove(key).ok_or_else(|| CollectionError::NotFound {
            key: key.to_string(),
        })?;
        let removed = self.entries[position]
            .take()
            .ok_or_else(|| CollectionError::NotFound {
                key: key.to_string(),
            })?;
        self.compact_if_sparse();
        Ok(removed)
    }

    fn compact_if_sparse(&mut self) {
        let tombstones = self.entries.len() - self.index.len();
        if tombstones <= COMPACTION_FLOOR || tombstones <= self.index.len() {
            return;
        }

        self.entries.retain(Option::is_some);
        self.index.clear();
        for (position, entry) in self.entries.iter().enumerate() {
            if let Some(item) = entry {
                self.index.insert(item.key(), position);
            }
        }
    }
}

impl<T: Identified> Default for UniqueCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identified + PartialEq> PartialEq for UniqueCollection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Identified + Eq> Eq for UniqueCollection<T> {}

impl<T: Identified + fmt::Debug> fmt::Debug for UniqueCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T: Identified> IntoIterator for &'a UniqueCollection<T> {
    type Item = &'a T;
    type IntoIter = Box<dyn Iterator<Item = &'a T> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
