// Rust guideline compliant 2026-02-06

//! Target id derivation and the per-conversion key registry.

use crate::{Error, RawRecord, Result};
use std::collections::HashMap;

/// Derives a target id from a source key: `PROJ-123` becomes `proj-123`.
///
/// Used for issue ids, epic ids and dependency references alike.
pub fn to_id(key: &str) -> String {
    key.to_lowercase()
}

/// Returns true if `key` can name a file under `.beads/` without leaving it.
///
/// Path separators, `..` and control characters are rejected.
pub fn is_file_safe(key: &str) -> bool {
    !key.contains(|c| c == '/' || c == '\\')
        && !key.contains("..")
        && !key.chars().any(char::is_control)
}

/// Lookup tables for one conversion run.
///
/// Borrowed from the input batch and dropped when the run ends. Every
/// lookup folds the key with [`to_id`], so `PROJ-1` and `proj-1` resolve to
/// the same entry.
#[derive(Debug, Default)]
pub struct Registry<'a> {
    records: HashMap<String, &'a RawRecord>,
    epics: HashMap<String, String>,
}

impl<'a> Registry<'a> {
    /// Indexes `records` by id and checks that their ids are distinct.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `ValidationFailure` if a record is invalid or a key repeats
    /// - `IdCollision` if two distinct keys fold to the same id
    pub fn build(records: &'a [RawRecord]) -> Result<Self> {
        let mut registry = Self::default();

        for (position, record) in records.iter().enumerate() {
            record.validate(position)?;

            let id = to_id(&record.key);
            if let Some(first) = registry.records.get(&id) {
                if first.key == record.key {
                    return Err(Error::ValidationFailure {
                        key: record.key.clone(),
                        reason: "duplicate key in input".to_string(),
                    });
                }
                return Err(Error::IdCollision {
                    id,
                    first: first.key.clone(),
                    second: record.key.clone(),
                });
            }

            registry.records.insert(id, record);
        }

        Ok(registry)
    }

    /// Looks up a record of the batch by source key.
    pub fn record(&self, key: &str) -> Option<&'a RawRecord> {
        self.records.get(&to_id(key)).copied()
    }

    /// Records that the epic with source key `key` was converted to `id`.
    pub fn register_epic(&mut self, key: &str, id: String) {
        self.epics.insert(to_id(key), id);
    }

    /// Resolves an epic source key to its converted id.
    pub fn epic_id(&self, key: &str) -> Option<&str> {
        self.epics.get(&to_id(key)).map(String::as_str)
    }
}
