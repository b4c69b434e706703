// Block Checkpoints
// =================
//
// Hard-coded (height, hash) anchors for blocks the network settled on long
// ago. A candidate block that contradicts an anchor is rejected outright,
// and a validator may skip expensive historical checks (duplicate-coinbase
// edge cases and the like) below the last anchor by trusting it instead of
// re-deriving the chain.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::hashes::BlockHash;
use crate::params::ParamsError;

/// Outcome of checking a candidate block hash against the table.
#[derive(
    Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub enum CheckpointVerdict {
    /// No anchor at this height, or the candidate matches it. Ordinary
    /// validation rules still apply.
    Accept,
    /// The candidate contradicts a hard-coded anchor. Fatal to the branch
    /// at this height; must never be retried or overridden.
    Reject {
        height: u32,
        expected: BlockHash,
        got: BlockHash,
    },
}

impl CheckpointVerdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, CheckpointVerdict::Accept)
    }
}

/// An ordered height-to-hash table, immutable after construction.
#[derive(Clone, Debug, Default)]
pub struct CheckpointTable {
    entries: Vec<(u32, BlockHash)>,
}

impl CheckpointTable {
    /// Build a table from entries sorted by strictly increasing height.
    pub fn from_entries(entries: Vec<(u32, BlockHash)>) -> Result<Self, ParamsError> {
        for pair in entries.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(ParamsError::UnsortedCheckpoints { height: pair[1].0 });
            }
        }
        Ok(CheckpointTable { entries })
    }

    /// The anchor hash at `height`, if one exists.
    pub fn lookup(&self, height: u32) -> Option<&BlockHash> {
        self.entries
            .binary_search_by_key(&height, |(h, _)| *h)
            .ok()
            .map(|i| &self.entries[i].1)
    }

    /// Check a candidate block hash against the anchor at `height`.
    ///
    /// Heights without an anchor impose no constraint and always accept.
    pub fn verify(&self, height: u32, candidate: &BlockHash) -> CheckpointVerdict {
        match self.lookup(height) {
            Some(expected) if expected != candidate => CheckpointVerdict::Reject {
                height,
                expected: *expected,
                got: *candidate,
            },
            _ => CheckpointVerdict::Accept,
        }
    }

    /// Height of the most recent anchor, if any.
    pub fn last_height(&self) -> Option<u32> {
        self.entries.last().map(|(h, _)| *h)
    }

    /// True when `height` is at or below the last anchor. Reorgs that would
    /// disconnect such blocks must be refused by the caller.
    pub fn is_checkpointed(&self, height: u32) -> bool {
        self.last_height().map_or(false, |last| height <= last)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(u32, BlockHash)> {
        self.entries.iter()
    }
}
