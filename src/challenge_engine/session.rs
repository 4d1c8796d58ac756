//! The session context object: one place that owns the live configuration,
//! the history, hints, timers, and the score, with every mutation flowing
//! through a defined operation.
//!
//! The host drives time by calling [`QuizSession::tick`] with elapsed
//! milliseconds; everything else is ordinary synchronous calls from the UI
//! event loop. No state here is touched from more than one thread.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::challenge_engine::config::ConfigurationModel;
use crate::challenge_engine::detector::{Cooldown, LayoutComparator, MatchDetector, PropertyComparator};
use crate::challenge_engine::generator::generate_challenge;
use crate::challenge_engine::hints::{HintEngine, HintLogEntry, RevealedHint};
use crate::challenge_engine::history::ChallengeHistory;
use crate::challenge_engine::models::{
    AlignItems, AlignSelf, Challenge, ChallengeRequest, DifficultyFlags, DisplayMode,
    FlexDirection, FlexWrap, JustifyContent, Px, SessionState,
};

pub struct QuizSession {
    cfg: ConfigurationModel,
    history: ChallengeHistory,
    hints: HintEngine,
    detector: MatchDetector,
    cooldown: Cooldown,
    state: SessionState,
    flags: DifficultyFlags,
    rng: StdRng,
    comparator: Box<dyn LayoutComparator>,
}

impl QuizSession {
    /// Start a quiz session and issue its first challenge. The property
    /// comparator is the default; hosts that render can substitute a
    /// geometry-based one via [`QuizSession::with_comparator`].
    pub fn start(request: ChallengeRequest, target_question_count: usize) -> Self {
        QuizSession::with_comparator(request, target_question_count, Box::new(PropertyComparator))
    }

    pub fn with_comparator(
        request: ChallengeRequest,
        target_question_count: usize,
        comparator: Box<dyn LayoutComparator>,
    ) -> Self {
        let rng = match request.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        let mut session = QuizSession {
            cfg: ConfigurationModel::new(request.item_count),
            history: ChallengeHistory::new(),
            hints: HintEngine::new(),
            detector: MatchDetector::new(),
            cooldown: Cooldown::new(),
            state: SessionState::new(target_question_count),
            flags: request.flags,
            rng,
            comparator,
        };
        session.next_challenge();
        session
    }

    // ── reads ────────────────────────────────────────────────────────────

    pub fn config(&self) -> &ConfigurationModel {
        &self.cfg
    }

    pub fn history(&self) -> &ChallengeHistory {
        &self.history
    }

    pub fn hints(&self) -> &HintEngine {
        &self.hints
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn flags(&self) -> &DifficultyFlags {
        &self.flags
    }

    pub fn cooldown(&self) -> &Cooldown {
        &self.cooldown
    }

    pub fn current_challenge(&self) -> Option<&Challenge> {
        self.history.current()
    }

    /// True once the live challenge has been matched (the success state).
    pub fn matched(&self) -> bool {
        self.detector.matched()
    }

    // ── container edits ──────────────────────────────────────────────────

    pub fn set_display(&mut self, value: DisplayMode) {
        self.cfg.set_display(value);
        self.after_edit();
    }

    pub fn set_flex_direction(&mut self, value: FlexDirection) {
        self.cfg.set_flex_direction(value);
        self.after_edit();
    }

    pub fn set_justify_content(&mut self, value: JustifyContent) {
        self.cfg.set_justify_content(value);
        self.after_edit();
    }

    pub fn set_align_items(&mut self, value: AlignItems) {
        self.cfg.set_align_items(value);
        self.after_edit();
    }

    pub fn set_flex_wrap(&mut self, value: FlexWrap) {
        self.cfg.set_flex_wrap(value);
        self.after_edit();
    }

    pub fn set_gap(&mut self, value: Px) {
        self.cfg.set_gap(value);
        self.after_edit();
    }

    // ── item edits ───────────────────────────────────────────────────────

    pub fn set_item_count(&mut self, count: usize) {
        self.cfg.set_item_count(count);
        self.after_edit();
    }

    pub fn set_align_self(&mut self, id: u8, value: AlignSelf) {
        self.cfg.set_align_self(id, value);
        self.after_edit();
    }

    pub fn set_flex_grow(&mut self, id: u8, value: u32) {
        self.cfg.set_flex_grow(id, value);
        self.after_edit();
    }

    pub fn set_flex_shrink(&mut self, id: u8, value: u32) {
        self.cfg.set_flex_shrink(id, value);
        self.after_edit();
    }

    pub fn set_order(&mut self, id: u8, value: i32) {
        self.cfg.set_order(id, value);
        self.after_edit();
    }

    /// Edits only arm the settle timer on the live challenge; review-mode
    /// edits are never scored.
    fn after_edit(&mut self) {
        if self.history.is_at_live() && !self.state.completed {
            self.detector.note_mutation();
        }
    }

    // ── navigation ───────────────────────────────────────────────────────
    //
    // Any navigation invalidates the pending settle check and the success
    // countdown; a stale timer must never fire against the wrong challenge.

    pub fn go_back(&mut self) {
        self.detector.cancel();
        self.cooldown.cancel();
        self.history.go_back(&mut self.cfg);
    }

    pub fn go_forward(&mut self) {
        self.detector.cancel();
        self.cooldown.cancel();
        self.history.go_forward(&mut self.cfg);
    }

    // ── time ─────────────────────────────────────────────────────────────

    /// Advance all engine timers by `elapsed_ms`. Fires the settle check or
    /// the cooldown expiry when due. A settle check and a running cooldown
    /// never coexist (matches stop new checks from arming), so a cooldown
    /// started by this very tick only starts counting on the next one.
    pub fn tick(&mut self, elapsed_ms: u64) {
        if self.detector.tick(elapsed_ms) {
            self.run_match_check();
            return;
        }
        if self.cooldown.tick(elapsed_ms) {
            self.next_challenge();
        }
    }

    fn run_match_check(&mut self) {
        // The timer is canceled on navigation, but re-check anyway: scoring
        // is only ever valid at the live cursor.
        if !self.history.is_at_live() || self.state.completed {
            return;
        }
        let Some(index) = self.history.cursor() else { return };
        let Some(target) = self.history.current() else { return };
        if !self.comparator.matches(&self.cfg, target) {
            return;
        }
        self.detector.record_match();
        // Scored at most once per index, however many times a check fires.
        if !self.history.mark_solved(index) {
            return;
        }
        self.state.score += 1;
        if index + 1 == self.state.target_question_count {
            self.state.completed = true;
            self.cooldown.cancel();
        } else {
            self.cooldown.start();
        }
    }

    pub fn pause_countdown(&mut self) {
        self.cooldown.pause();
    }

    pub fn resume_countdown(&mut self) {
        self.cooldown.resume();
    }

    /// Jump straight to the next challenge, skipping whatever remains of the
    /// countdown. Also the escape hatch after a solution reveal.
    pub fn skip_to_next(&mut self) {
        if !self.state.completed {
            self.next_challenge();
        }
    }

    fn next_challenge(&mut self) {
        self.detector.cancel();
        self.cooldown.cancel();
        let challenge = generate_challenge(
            &mut self.rng,
            &self.flags,
            self.cfg.baseline_items(),
            self.cfg.item_count(),
        );
        self.history.push(challenge, &mut self.cfg);
        self.hints.reset();
        self.detector.reset();
    }

    /// Start the session over: score, history, and hint state all reset,
    /// then a fresh first challenge.
    pub fn restart(&mut self) {
        self.detector.cancel();
        self.cooldown.cancel();
        self.history.clear();
        self.state = SessionState::new(self.state.target_question_count);
        self.next_challenge();
    }

    /// Leave quiz mode: everything cleared, no new challenge issued.
    pub fn stop(&mut self) {
        self.detector.cancel();
        self.cooldown.cancel();
        self.history.clear();
        self.hints.reset();
        self.detector.reset();
        self.state = SessionState::new(self.state.target_question_count);
        self.cfg.reset_to_baseline();
    }

    // ── hints ────────────────────────────────────────────────────────────

    pub fn reveal_next_hint(&mut self) -> Option<RevealedHint> {
        let Some(target) = self.history.current() else { return None };
        self.hints.reveal_next_hint(&self.cfg, target).cloned()
    }

    pub fn toggle_hint_panel(&mut self) -> bool {
        let Some(target) = self.history.current() else { return false };
        self.hints.toggle_hint_panel(&self.cfg, target)
    }

    pub fn hint_log(&self) -> Vec<HintLogEntry> {
        match self.history.current() {
            Some(target) => self.hints.hint_log(&self.cfg, target),
            None => Vec::new(),
        }
    }

    pub fn confirm_reveal_solution(&mut self) -> bool {
        self.hints.confirm_reveal_solution()
    }
}
