//! Match detection: deciding that the live layout reproduces the target.
//!
//! The engine is single-threaded and event-driven, so both timers here are
//! explicit millisecond counters advanced by the host's `tick` calls instead
//! of real OS timers. That keeps every transition deterministic and testable.
//!
//! Two comparison strategies exist behind [`LayoutComparator`]:
//!
//! - [`PropertyComparator`] — pure resolved-property equality using the diff
//!   rules (no rendering required; what the tests use);
//! - [`GeometryComparator`] — per-item bounding boxes from a host
//!   [`LayoutMeasurer`] against a ghost render of the target, within a small
//!   pixel tolerance.

use serde::{Deserialize, Serialize};

use crate::challenge_engine::config::ConfigurationModel;
use crate::challenge_engine::diff::compute_active_mismatch_keys;
use crate::challenge_engine::models::{Challenge, DisplayMode, Item};

/// Quiet period after the last edit before a match check fires.
pub const SETTLE_DELAY_MS: u64 = 450;
/// Success cooldown before the next challenge is issued automatically.
pub const COOLDOWN_MS: u64 = 3000;
/// Geometry comparison tolerance, per edge, in pixels.
pub const PIXEL_TOLERANCE: f32 = 2.0;

// ---------------------------------------------------------------------------
// Geometry abstraction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    /// True when every edge of `self` is within `tolerance` of `other`.
    pub fn approx_eq(&self, other: &BoundingBox, tolerance: f32) -> bool {
        (self.left - other.left).abs() <= tolerance
            && (self.top - other.top).abs() <= tolerance
            && (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}

/// Host capability: lay out a set of items and report their boxes. The live
/// configuration and the ghost target are measured through the same call, so
/// measurement must happen after the host has committed layout for the
/// current mutation.
pub trait LayoutMeasurer {
    fn measure(&self, live: &ConfigurationModel, target: &Challenge) -> MeasuredPair;
}

/// Real and ghost geometry for the same item set, in original item order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasuredPair {
    pub live: Vec<BoundingBox>,
    pub ghost: Vec<BoundingBox>,
}

// ---------------------------------------------------------------------------
// Comparators
// ---------------------------------------------------------------------------

/// Decides whether the live configuration visually matches the target.
pub trait LayoutComparator {
    fn matches(&self, live: &ConfigurationModel, target: &Challenge) -> bool;
}

/// Resolved-property equality: a match is exactly an empty mismatch set,
/// using the same resolution rules the diff and hints use. The container must
/// actually be a flex container.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyComparator;

impl LayoutComparator for PropertyComparator {
    fn matches(&self, live: &ConfigurationModel, target: &Challenge) -> bool {
        live.container().display == DisplayMode::Flex
            && compute_active_mismatch_keys(live, target).is_empty()
    }
}

/// Bounding-box equality against the ghost render, within [`PIXEL_TOLERANCE`].
pub struct GeometryComparator<M: LayoutMeasurer> {
    measurer: M,
    tolerance: f32,
}

impl<M: LayoutMeasurer> GeometryComparator<M> {
    pub fn new(measurer: M) -> Self {
        GeometryComparator { measurer, tolerance: PIXEL_TOLERANCE }
    }
}

impl<M: LayoutMeasurer> LayoutComparator for GeometryComparator<M> {
    fn matches(&self, live: &ConfigurationModel, target: &Challenge) -> bool {
        let pair = self.measurer.measure(live, target);
        pair.live.len() == pair.ghost.len()
            && pair
                .live
                .iter()
                .zip(pair.ghost.iter())
                .all(|(a, b)| a.approx_eq(b, self.tolerance))
    }
}

/// Each active item's effective target properties — what a ghost renderer
/// paints, in visual order. The sort is stable, so items sharing an `order`
/// value keep their bank sequence, exactly as CSS lays them out.
pub fn resolved_target_items(target: &Challenge, baseline: &[Item]) -> Vec<Item> {
    let mut resolved: Vec<Item> = baseline.iter().map(|b| target.target_item(b)).collect();
    resolved.sort_by_key(|i| i.order);
    resolved
}

// ---------------------------------------------------------------------------
// Settle timer + cooldown
// ---------------------------------------------------------------------------

/// Debounced match checking for the current live challenge.
///
/// Every edit while unmatched (re)schedules one check [`SETTLE_DELAY_MS`]
/// into the future; rescheduling cancels the previous one, so the check only
/// fires once edits pause. Cancellation is idempotent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchDetector {
    /// Milliseconds until the pending check fires, if one is scheduled.
    pending_ms: Option<u64>,
    matched: bool,
}

impl MatchDetector {
    pub fn new() -> Self {
        MatchDetector::default()
    }

    /// Fresh state for a new live challenge.
    pub fn reset(&mut self) {
        self.pending_ms = None;
        self.matched = false;
    }

    pub fn matched(&self) -> bool {
        self.matched
    }

    pub fn check_pending(&self) -> bool {
        self.pending_ms.is_some()
    }

    /// An edit happened on the live challenge: schedule (or reschedule) the
    /// settle check. Ignored once this challenge already matched.
    pub fn note_mutation(&mut self) {
        if !self.matched {
            self.pending_ms = Some(SETTLE_DELAY_MS);
        }
    }

    /// Drop any pending check. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        self.pending_ms = None;
    }

    /// Advance time. Returns `true` exactly when the settle delay elapses and
    /// the match check should run now.
    pub fn tick(&mut self, elapsed_ms: u64) -> bool {
        match self.pending_ms {
            Some(remaining) if remaining <= elapsed_ms => {
                self.pending_ms = None;
                true
            }
            Some(remaining) => {
                self.pending_ms = Some(remaining - elapsed_ms);
                false
            }
            None => false,
        }
    }

    /// Record the outcome of a fired check.
    pub fn record_match(&mut self) {
        self.matched = true;
        self.pending_ms = None;
    }
}

/// Pausable success countdown between a match and the next challenge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cooldown {
    remaining_ms: Option<u64>,
    paused: bool,
}

impl Cooldown {
    pub fn new() -> Self {
        Cooldown::default()
    }

    pub fn start(&mut self) {
        self.remaining_ms = Some(COOLDOWN_MS);
        self.paused = false;
    }

    pub fn cancel(&mut self) {
        self.remaining_ms = None;
        self.paused = false;
    }

    pub fn running(&self) -> bool {
        self.remaining_ms.is_some()
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if self.remaining_ms.is_some() {
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn remaining_ms(&self) -> Option<u64> {
        self.remaining_ms
    }

    /// Completed fraction in `0.0..=1.0`, for a progress bar.
    pub fn progress(&self) -> f32 {
        match self.remaining_ms {
            Some(remaining) => 1.0 - remaining as f32 / COOLDOWN_MS as f32,
            None => 0.0,
        }
    }

    /// Advance time. Returns `true` exactly once, when the countdown expires.
    pub fn tick(&mut self, elapsed_ms: u64) -> bool {
        if self.paused {
            return false;
        }
        match self.remaining_ms {
            Some(remaining) if remaining <= elapsed_ms => {
                self.remaining_ms = None;
                true
            }
            Some(remaining) => {
                self.remaining_ms = Some(remaining - elapsed_ms);
                false
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_timer_debounces() {
        let mut det = MatchDetector::new();
        det.note_mutation();
        assert!(!det.tick(200));
        det.note_mutation(); // reschedules, canceling the first
        assert!(!det.tick(400));
        assert!(det.tick(50));
        assert!(!det.tick(1000), "fires at most once per schedule");
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut det = MatchDetector::new();
        det.note_mutation();
        det.cancel();
        det.cancel();
        assert!(!det.tick(SETTLE_DELAY_MS));
    }

    #[test]
    fn no_rescheduling_after_match() {
        let mut det = MatchDetector::new();
        det.record_match();
        det.note_mutation();
        assert!(!det.check_pending());
    }

    #[test]
    fn cooldown_pauses_and_expires_once() {
        let mut cd = Cooldown::new();
        cd.start();
        assert!(!cd.tick(1000));
        cd.pause();
        assert!(!cd.tick(10_000));
        cd.resume();
        assert!(cd.tick(2000));
        assert!(!cd.tick(1));
    }
}
