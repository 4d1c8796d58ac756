//! Navigable challenge history.
//!
//! Only the newest challenge is "live" — the one the user's edits are scored
//! against. Older entries are review-mode reconstructions: stepping back
//! applies that challenge's target values into the configuration, and the
//! user's in-progress edits on the live challenge are snapshotted so stepping
//! forward again restores them exactly.

use std::collections::BTreeSet;
use serde::{Deserialize, Serialize};

use crate::challenge_engine::config::{ConfigSnapshot, ConfigurationModel};
use crate::challenge_engine::models::Challenge;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChallengeHistory {
    entries: Vec<Challenge>,
    /// `None` while empty; otherwise an index into `entries`.
    cursor: Option<usize>,
    /// Indices already scored. Grows monotonically; an index enters at most once.
    solved: BTreeSet<usize>,
    /// Saved live-challenge edits, present only while the cursor is away from
    /// the live index.
    live_snapshot: Option<ConfigSnapshot>,
}

impl ChallengeHistory {
    pub fn new() -> Self {
        ChallengeHistory::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// True when the cursor sits on the newest entry — the only position
    /// where edits can be scored.
    pub fn is_at_live(&self) -> bool {
        match self.cursor {
            Some(c) => c + 1 == self.entries.len(),
            None => false,
        }
    }

    pub fn live_index(&self) -> Option<usize> {
        self.entries.len().checked_sub(1)
    }

    /// The challenge under the cursor (live or review).
    pub fn current(&self) -> Option<&Challenge> {
        self.cursor.and_then(|c| self.entries.get(c))
    }

    pub fn get(&self, index: usize) -> Option<&Challenge> {
        self.entries.get(index)
    }

    pub fn is_solved(&self, index: usize) -> bool {
        self.solved.contains(&index)
    }

    /// Record a solve. Returns `false` when the index was already scored —
    /// the caller must not award points again in that case.
    pub fn mark_solved(&mut self, index: usize) -> bool {
        self.solved.insert(index)
    }

    /// Append a new live challenge, move the cursor onto it, and reset the
    /// configuration to baseline so edits start from a known state.
    pub fn push(&mut self, challenge: Challenge, cfg: &mut ConfigurationModel) {
        self.entries.push(challenge);
        self.cursor = Some(self.entries.len() - 1);
        self.live_snapshot = None;
        cfg.reset_to_baseline();
    }

    /// Step to the previous challenge. No-op at the start of history.
    /// Leaving the live challenge snapshots the user's edits first.
    pub fn go_back(&mut self, cfg: &mut ConfigurationModel) {
        let Some(cursor) = self.cursor else { return };
        if cursor == 0 {
            return;
        }
        if self.is_at_live() {
            self.live_snapshot = Some(cfg.snapshot());
        }
        let dest = cursor - 1;
        self.cursor = Some(dest);
        cfg.apply_target(&self.entries[dest]);
    }

    /// Step to the next challenge. No-op at the live end. Arriving back at
    /// the live challenge restores the saved edits; any other destination is
    /// still review mode and shows that challenge's target.
    pub fn go_forward(&mut self, cfg: &mut ConfigurationModel) {
        let Some(cursor) = self.cursor else { return };
        if cursor + 1 >= self.entries.len() {
            return;
        }
        let dest = cursor + 1;
        self.cursor = Some(dest);
        if dest + 1 == self.entries.len() {
            if let Some(snapshot) = self.live_snapshot.take() {
                cfg.restore(&snapshot);
            } else {
                cfg.apply_target(&self.entries[dest]);
            }
        } else {
            cfg.apply_target(&self.entries[dest]);
        }
    }

    /// Drop everything — leaving quiz mode or restarting a session.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
        self.solved.clear();
        self.live_snapshot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenge_engine::generator::generate_challenge;
    use crate::challenge_engine::models::{DifficultyFlags, Px};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn challenge(seed: u64, cfg: &ConfigurationModel) -> Challenge {
        let mut rng = StdRng::seed_from_u64(seed);
        generate_challenge(
            &mut rng,
            &DifficultyFlags::everything(),
            cfg.baseline_items(),
            cfg.item_count(),
        )
    }

    #[test]
    fn navigation_is_bounded() {
        let mut cfg = ConfigurationModel::new(3);
        let mut history = ChallengeHistory::new();
        history.go_back(&mut cfg);
        history.go_forward(&mut cfg);
        assert_eq!(history.cursor(), None);

        history.push(challenge(1, &cfg), &mut cfg);
        history.go_back(&mut cfg);
        assert_eq!(history.cursor(), Some(0));
        history.go_forward(&mut cfg);
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn mark_solved_is_idempotent() {
        let mut history = ChallengeHistory::new();
        assert!(history.mark_solved(0));
        assert!(!history.mark_solved(0));
        assert!(history.is_solved(0));
    }

    #[test]
    fn review_applies_target_and_live_restores_edits() {
        let mut cfg = ConfigurationModel::new(3);
        let mut history = ChallengeHistory::new();
        history.push(challenge(1, &cfg), &mut cfg);
        history.push(challenge(2, &cfg), &mut cfg);

        cfg.set_gap(Px(15));
        let edited = cfg.snapshot();

        history.go_back(&mut cfg);
        let reviewed = history.current().unwrap().clone();
        assert_eq!(
            cfg.container().flex_direction,
            reviewed.container.flex_direction
        );

        history.go_forward(&mut cfg);
        assert!(history.is_at_live());
        assert_eq!(cfg.snapshot(), edited);
    }
}
