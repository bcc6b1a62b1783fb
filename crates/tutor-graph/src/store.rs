//! Persistent relation data for the CLI.
//!
//! Each section of a [`RelationSet`] lives under its own key in the
//! `relations` tree, so an import rewrites them together in one batch.
//! A separate `meta` tree records the layout version.

use serde::de::DeserializeOwned;
use serde::Serialize;
use sled::{Batch, Db, Tree};
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use tutor_core::RelationSet;

const FORMAT_VERSION: u32 = 1;
const FORMAT_KEY: &str = "format";

const ALIASES: &str = "aliases";
const TEACHES: &str = "teaches";
const REQUIRES: &str = "requires";
const MASTERIES: &str = "masteries";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sled(#[from] sled::Error),
    #[error("Serialization error: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("Store format {found} is not supported (expected {expected}); re-run `tutor import`")]
    Format { found: u32, expected: u32 },
}

/// Persists relation data between CLI runs.
pub struct RelationStore {
    db: Db,
    sections: Tree,
    meta: Tree,
}

impl RelationStore {
    /// Opens or creates a relation store at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        let sections = db.open_tree("relations")?;
        let meta = db.open_tree("meta")?;
        Ok(Self { db, sections, meta })
    }

    /// Replaces the stored relations with `relations`.
    pub fn save_relations(&self, relations: &RelationSet) -> Result<(), StoreError> {
        let mut batch = Batch::default();
        batch.insert(ALIASES, encode(&relations.aliases)?);
        batch.insert(TEACHES, encode(&relations.teaches)?);
        batch.insert(REQUIRES, encode(&relations.requires)?);
        batch.insert(MASTERIES, encode(&relations.masteries)?);

        self.sections.apply_batch(batch)?;
        self.meta.insert(FORMAT_KEY, encode(&FORMAT_VERSION)?)?;
        self.db.flush()?;

        debug!(
            "Stored {} teaches and {} requires relations",
            relations.teaches.len(),
            relations.requires.len()
        );
        Ok(())
    }

    /// Loads the stored relations, or `None` if nothing was imported yet.
    pub fn load_relations(&self) -> Result<Option<RelationSet>, StoreError> {
        let Some(bytes) = self.meta.get(FORMAT_KEY)? else {
            return Ok(None);
        };
        let found: u32 = bincode::deserialize(&bytes)?;
        if found != FORMAT_VERSION {
            return Err(StoreError::Format {
                found,
                expected: FORMAT_VERSION,
            });
        }

        Ok(Some(RelationSet {
            aliases: self.section(ALIASES)?,
            teaches: self.section(TEACHES)?,
            requires: self.section(REQUIRES)?,
            masteries: self.section(MASTERIES)?,
        }))
    }

    /// Removes all stored relations.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.sections.clear()?;
        self.meta.remove(FORMAT_KEY)?;
        self.db.flush()?;
        Ok(())
    }

    /// A missing section reads as empty.
    fn section<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, StoreError> {
        match self.sections.get(key)? {
            Some(bytes) => Ok(bincode::deserialize(&bytes)?),
            None => Ok(T::default()),
        }
    }
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, StoreError> {
    Ok(bincode::serialize(value)?)
}
