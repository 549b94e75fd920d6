//! Versioned world state.
//!
//! Every committed key carries the block height that last wrote it. An
//! invocation is simulated against the state, its read set is captured with
//! the versions it saw, and [`WorldState::commit`] refuses the write set if
//! any of those versions moved in the meantime.

use lottery_chaincode::state::{ReadSet, StateError, StateResult, StateStore, WriteSet};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Block height at which a key was last written
pub type Version = u64;

/// Versions observed during simulation; `None` records an absent key
pub type ReadVersions = BTreeMap<String, Option<Version>>;

/// Committed value with its version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedValue {
    pub value: Vec<u8>,
    pub version: Version,
}

/// Commit validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldStateError {
    #[error("read conflict on key {key}")]
    ReadConflict { key: String },
}

/// The peer's committed key-value state
#[derive(Debug, Default)]
pub struct WorldState {
    entries: HashMap<String, VersionedValue>,
    height: u64,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed blocks
    pub fn height(&self) -> u64 {
        self.height
    }

    /// Number of keys with a committed value
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn version(&self, key: &str) -> Option<Version> {
        self.entries.get(key).map(|entry| entry.version)
    }

    /// Capture the current version of every key in `read_set`
    pub fn read_versions(&self, read_set: &ReadSet) -> ReadVersions {
        read_set
            .iter()
            .map(|key| (key.clone(), self.version(key)))
            .collect()
    }

    /// Validate `reads` against the current versions and apply `writes` as
    /// one new block
    ///
    /// # Returns
    ///
    /// The height of the committed block
    ///
    /// # Errors
    ///
    /// * `WorldStateError::ReadConflict` - A key read during simulation was
    ///   written by a block committed since
    pub fn commit(&mut self, reads: &ReadVersions, writes: WriteSet) -> Result<u64, WorldStateError> {
        if let Some((key, _)) = reads
            .iter()
            .find(|(key, seen)| self.version(key) != **seen)
        {
            return Err(WorldStateError::ReadConflict { key: key.clone() });
        }

        self.height += 1;
        for (key, value) in writes {
            self.entries.insert(
                key,
                VersionedValue {
                    value,
                    version: self.height,
                },
            );
        }

        Ok(self.height)
    }
}

/// Simulation reads go straight to the committed state; writes must go
/// through a transaction overlay.
impl StateStore for WorldState {
    fn get_state(&self, key: &str) -> StateResult<Option<Vec<u8>>> {
        Ok(self.entries.get(key).map(|entry| entry.value.clone()))
    }

    fn put_state(&mut self, key: &str, _value: Vec<u8>) -> StateResult<()> {
        Err(StateError::ReadOnly(key.to_string()))
    }
}
