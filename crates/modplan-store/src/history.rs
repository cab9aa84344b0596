//! Versioned store: snapshot history with commit, undo and redo
//!
//! ```text
//! history:  [S0] [S1] [S2] [S3]
//!                      ^ cursor
//! ```
//!
//! Mutations are applied to a working copy. `commit` drops every snapshot
//! after the cursor, appends the working copy and advances the cursor.
//! `undo` and `redo` only move the cursor and reset the working copy to the
//! snapshot under it.

use crate::aggregate::Aggregate;
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::mutation::Mutation;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct VersionedStore {
    history: Vec<Aggregate>,
    cursor: usize,
    working: Aggregate,
    version: u64,
    config: StoreConfig,
}

impl VersionedStore {
    /// Start a history whose only snapshot is `initial`
    pub fn new(initial: Aggregate, config: StoreConfig) -> Self {
        Self {
            history: vec![initial.clone()],
            cursor: 0,
            working: initial,
            version: 0,
            config,
        }
    }

    /// The snapshot under the cursor
    pub fn current(&self) -> &Aggregate {
        &self.history[self.cursor]
    }

    /// The aggregate mutations are applied to, including uncommitted changes
    pub fn working(&self) -> &Aggregate {
        &self.working
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Apply a mutation to the working copy
    ///
    /// On failure the working copy is left as it was.
    pub fn apply(&mut self, mutation: &Mutation) -> Result<&Aggregate, StoreError> {
        match mutation.apply(&self.working, &self.config) {
            Ok(next) => {
                self.working = next;
                Ok(&self.working)
            }
            Err(err) => {
                warn!(mutation = mutation.name(), code = err.code(), error = %err, "mutation rejected");
                Err(err)
            }
        }
    }

    /// Whether the working copy differs from the current snapshot
    pub fn is_dirty(&self) -> bool {
        &self.working != self.current()
    }

    /// Drop uncommitted changes
    pub fn discard(&mut self) {
        self.working = self.current().clone();
    }

    /// Record the working copy as a new snapshot
    pub fn commit(&mut self) {
        self.history.truncate(self.cursor + 1);
        self.history.push(self.working.clone());
        self.cursor += 1;
        self.evict();
        self.version += 1;
        info!(version = self.version, cursor = self.cursor, "committed snapshot");
    }

    /// Step back one snapshot, discarding uncommitted changes
    pub fn undo(&mut self) -> Result<&Aggregate, StoreError> {
        if !self.can_undo() {
            return Err(StoreError::NoUndoableState);
        }
        self.cursor -= 1;
        self.working = self.current().clone();
        self.version += 1;
        info!(version = self.version, cursor = self.cursor, "undo");
        Ok(self.current())
    }

    /// Step forward one snapshot, discarding uncommitted changes
    pub fn redo(&mut self) -> Result<&Aggregate, StoreError> {
        if !self.can_redo() {
            return Err(StoreError::NoRedoableState);
        }
        self.cursor += 1;
        self.working = self.current().clone();
        self.version += 1;
        info!(version = self.version, cursor = self.cursor, "redo");
        Ok(self.current())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.history.len()
    }

    /// Change counter, bumped by every commit, undo and redo
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Keep at most `history_limit` snapshots, oldest first out
    fn evict(&mut self) {
        let Some(limit) = self.config.history_limit else {
            return;
        };
        let excess = self.history.len().saturating_sub(limit.max(1));
        if excess > 0 {
            self.history.drain(..excess);
            self.cursor -= excess;
        }
    }
}
