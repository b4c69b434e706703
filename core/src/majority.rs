// Majority Version Detection
// ==========================
//
// Soft forks before the version-bits era activated on a rolling majority of
// recent block versions: once enough of the trailing window carries the new
// version the upgrade is enforced for newly produced blocks, and at a
// higher threshold any block still carrying an older version is rejected
// outright. The gap between the two thresholds is the miners' grace period.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Count the entries of a version snapshot that are at least `min_version`.
///
/// A flat count over inclusion in the window; recency carries no weight.
pub fn count_at_least(history: &[i32], min_version: i32) -> usize {
    history.iter().filter(|v| **v >= min_version).count()
}

/// The per-network majority activation thresholds.
///
/// `history` snapshots passed to the methods are most-recent-first and owned
/// by the chain-walking caller; only the leading `window` entries of an
/// oversized snapshot are counted.
#[derive(
    Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct MajorityThresholds {
    /// Number of trailing blocks examined.
    pub window: u32,
    /// Votes required before new blocks must carry the upgraded version.
    pub enforce_upgrade: u32,
    /// Votes required before outdated blocks are rejected outright.
    pub reject_outdated: u32,
}

impl MajorityThresholds {
    fn tally(&self, history: &[i32], version: i32) -> usize {
        let window = history.get(..self.window as usize).unwrap_or(history);
        count_at_least(window, version)
    }

    /// True once enough of the window carries `version` that newly produced
    /// blocks must be upgraded.
    pub fn is_upgrade_enforced(&self, history: &[i32], version: i32) -> bool {
        self.tally(history, version) >= self.enforce_upgrade as usize
    }

    /// True once enough of the window carries `version` that any block below
    /// it is rejected.
    pub fn is_outdated_rejected(&self, history: &[i32], version: i32) -> bool {
        self.tally(history, version) >= self.reject_outdated as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLDS: MajorityThresholds = MajorityThresholds {
        window: 1000,
        enforce_upgrade: 750,
        reject_outdated: 950,
    };

    fn window(upgraded: usize, outdated: usize) -> Vec<i32> {
        let mut history = vec![2; upgraded];
        history.extend(std::iter::repeat(1).take(outdated));
        history
    }

    #[test]
    fn test_count_at_least() {
        assert_eq!(count_at_least(&[], 2), 0);
        assert_eq!(count_at_least(&[1, 2, 3, 2, 1], 2), 3);
        assert_eq!(count_at_least(&[4, 4, 4], 2), 3);
    }

    #[test]
    fn test_enforce_boundary_met_exactly() {
        // 750 of 1000 meets the enforce threshold exactly but not reject.
        let history = window(750, 250);
        assert!(THRESHOLDS.is_upgrade_enforced(&history, 2));
        assert!(!THRESHOLDS.is_outdated_rejected(&history, 2));
    }

    #[test]
    fn test_one_vote_below_enforce() {
        let history = window(749, 251);
        assert!(!THRESHOLDS.is_upgrade_enforced(&history, 2));
    }

    #[test]
    fn test_reject_boundary() {
        assert!(!THRESHOLDS.is_outdated_rejected(&window(949, 51), 2));
        assert!(THRESHOLDS.is_outdated_rejected(&window(950, 50), 2));
    }

    #[test]
    fn test_short_history_counts_what_exists() {
        // During initial sync the window is not yet full.
        let history = window(100, 0);
        assert!(!THRESHOLDS.is_upgrade_enforced(&history, 2));
    }

    #[test]
    fn test_oversized_snapshot_only_counts_window() {
        // 700 upgraded in the window, 300 more beyond it: the stale tail
        // must not push the tally over the threshold.
        let mut history = window(700, 300);
        history.extend(std::iter::repeat(2).take(300));
        assert!(!THRESHOLDS.is_upgrade_enforced(&history, 2));
    }

    #[test]
    fn test_higher_versions_count_toward_majority() {
        let history = vec![3; 1000];
        assert!(THRESHOLDS.is_upgrade_enforced(&history, 2));
        assert!(THRESHOLDS.is_outdated_rejected(&history, 2));
    }
}
