use std::error::Error;
use std::fmt;

use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db;

/// Named collections persisted as whole JSON arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Projects,
    Tasks,
    Materials,
    Feedback,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Users,
        Collection::Projects,
        Collection::Tasks,
        Collection::Materials,
        Collection::Feedback,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Projects => "projects",
            Collection::Tasks => "tasks",
            Collection::Materials => "materials",
            Collection::Feedback => "feedback",
        }
    }

    pub fn counter_key(self) -> &'static str {
        match self {
            Collection::Users => "nextUserId",
            Collection::Projects => "nextProjectId",
            Collection::Tasks => "nextTaskId",
            Collection::Materials => "nextMaterialId",
            Collection::Feedback => "nextFeedbackId",
        }
    }

    /// Singular noun for messages.
    pub fn noun(self) -> &'static str {
        match self {
            Collection::Users => "user",
            Collection::Projects => "project",
            Collection::Tasks => "task",
            Collection::Materials => "material",
            Collection::Feedback => "feedback",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Whole-blob key-value store: every read materializes a full collection and
/// every write replaces it. Concurrent writers race with last-write-wins.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = db::open_connection(path)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn read<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, StoreError> {
        let Some(raw) = db::get_kv(&self.conn, collection.key())? else {
            log::debug!("collection '{}' absent; reading as empty", collection);
            return Ok(Vec::new());
        };
        let records: Vec<T> =
            serde_json::from_str(&raw).map_err(|source| StoreError::Decode {
                key: collection.key(),
                source,
            })?;
        log::debug!("read {} record(s) from '{}'", records.len(), collection);
        Ok(records)
    }

    pub fn write<T: Serialize>(
        &self,
        collection: Collection,
        records: &[T],
    ) -> Result<(), StoreError> {
        let raw = serde_json::to_string(records).map_err(|source| StoreError::Encode {
            key: collection.key(),
            source,
        })?;
        db::set_kv(&self.conn, collection.key(), &raw)?;
        log::debug!("wrote {} record(s) to '{}'", records.len(), collection);
        Ok(())
    }

    /// Returns the current counter value and persists the successor.
    pub fn next_id(&self, collection: Collection) -> Result<u64, StoreError> {
        let current = self.peek_counter(collection)?;
        db::set_kv(
            &self.conn,
            collection.counter_key(),
            &(current + 1).to_string(),
        )?;
        Ok(current)
    }

    pub fn peek_counter(&self, collection: Collection) -> Result<u64, StoreError> {
        let key = collection.counter_key();
        match db::get_kv(&self.conn, key)? {
            None => Ok(1),
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| StoreError::Counter {
                key,
                value: raw.clone(),
            }),
        }
    }

    pub fn set_counter(&self, collection: Collection, value: u64) -> Result<(), StoreError> {
        db::set_kv(&self.conn, collection.counter_key(), &value.to_string())?;
        Ok(())
    }

    /// True once the user collection exists, which is what `init` seeds first.
    pub fn is_initialized(&self) -> Result<bool, StoreError> {
        Ok(db::get_kv(&self.conn, Collection::Users.key())?.is_some())
    }

    /// Removes every collection and counter.
    pub fn clear(&self) -> Result<(), StoreError> {
        for collection in Collection::ALL {
            db::delete_kv(&self.conn, collection.key())?;
            db::delete_kv(&self.conn, collection.counter_key())?;
        }
        Ok(())
    }

    pub fn schema_version(&self) -> Result<Option<String>, StoreError> {
        Ok(db::get_meta(&self.conn, "schema_version")?)
    }
}

#[derive(Debug)]
pub enum StoreError {
    Db(rusqlite::Error),
    Decode {
        key: &'static str,
        source: serde_json::Error,
    },
    Encode {
        key: &'static str,
        source: serde_json::Error,
    },
    Counter {
        key: &'static str,
        value: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Db(err) => write!(f, "database error: {}", err),
            StoreError::Decode { key, source } => {
                write!(f, "stored collection '{}' is malformed: {}", key, source)
            }
            StoreError::Encode { key, source } => {
                write!(f, "failed to encode collection '{}': {}", key, source)
            }
            StoreError::Counter { key, value } => {
                write!(f, "counter '{}' holds non-integer value '{}'", key, value)
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreError::Db(err) => Some(err),
            StoreError::Decode { source, .. } => Some(source),
            StoreError::Encode { source, .. } => Some(source),
            StoreError::Counter { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        StoreError::Db(value)
    }
}

#[cfg(test)]
mod tests;
