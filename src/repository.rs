use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::store::{Collection, Store, StoreError};

pub trait Record: Clone + Serialize + DeserializeOwned {
    const COLLECTION: Collection;

    fn id(&self) -> u64;
}

/// Insertion-ordered records of one collection with an id index.
///
/// A repository is a snapshot: it is loaded whole, mutated in memory and
/// saved whole, so the last `save` of a collection wins.
#[derive(Debug, Clone)]
pub struct Repository<T: Record> {
    records: Vec<T>,
    index: HashMap<u64, usize>,
}

impl<T: Record> Default for Repository<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Record> Repository<T> {
    pub fn load(store: &Store) -> Result<Self, StoreError> {
        Ok(Self::from_records(store.read(T::COLLECTION)?))
    }

    pub fn save(&self, store: &Store) -> Result<(), StoreError> {
        store.write(T::COLLECTION, &self.records)
    }

    /// Builds the index; a repeated id replaces the earlier record in place.
    pub fn from_records(records: Vec<T>) -> Self {
        let mut repo = Self::default();
        for record in records {
            if repo.index.contains_key(&record.id()) {
                log::warn!(
                    "duplicate {} id {} in stored collection; keeping the later record",
                    T::COLLECTION.noun(),
                    record.id()
                );
            }
            repo.upsert(record);
        }
        repo
    }

    pub fn get_by_id(&self, id: u64) -> Option<&T> {
        self.index.get(&id).map(|&position| &self.records[position])
    }

    pub fn list_by<P>(&self, predicate: P) -> Vec<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.records.iter().filter(|record| predicate(record)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Replaces the record with the same id in place, or appends it.
    /// Returns the replaced record.
    pub fn upsert(&mut self, record: T) -> Option<T> {
        match self.index.get(&record.id()) {
            Some(&position) => Some(std::mem::replace(&mut self.records[position], record)),
            None => {
                self.index.insert(record.id(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    pub fn delete(&mut self, id: u64) -> Option<T> {
        let position = self.index.remove(&id)?;
        let removed = self.records.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Some(removed)
    }
}
