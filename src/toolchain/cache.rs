//! Memo of versions reported by toolchain commands

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Command identifier to the version it reported
///
/// Entries are only ever added, so a poisoned lock still guards a
/// consistent map and is recovered rather than surfaced.
#[derive(Debug, Default)]
pub struct CommandVersionCache {
    entries: Mutex<HashMap<String, String>>,
}

impl CommandVersionCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, command: &str) -> Option<String> {
        self.lock_entries().get(command).cloned()
    }

    /// Records `version` for `command` and returns the stored value.
    ///
    /// When two queries race, the first insert wins and later ones get the
    /// existing entry back.
    pub fn insert(&self, command: &str, version: String) -> String {
        self.lock_entries()
            .entry(command.to_string())
            .or_insert(version)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
