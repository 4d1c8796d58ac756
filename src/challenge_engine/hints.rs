//! Progressive hints over the live-vs-target diff.
//!
//! Hints are an append-only log: a revealed hint never disappears, it is only
//! re-marked as resolved once its key drops out of the active mismatch set.
//! At most [`MAX_HINTS`] hints per challenge; after that (or once no
//! unrevealed mismatch remains) the engine offers the full solution behind an
//! explicit confirmation step.

use serde::{Deserialize, Serialize};

use crate::challenge_engine::config::ConfigurationModel;
use crate::challenge_engine::diff::{compute_active_mismatch_keys, MismatchKey};
use crate::challenge_engine::models::{Challenge, FlexWrap, ItemOverride};

pub const MAX_HINTS: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedHint {
    pub key: MismatchKey,
    pub text: String,
}

/// One row of the hint panel: the logged hint plus its current status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintLogEntry {
    pub key: MismatchKey,
    pub text: String,
    pub resolved: bool,
}

/// Per-challenge hint state. Reset on every new challenge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HintEngine {
    revealed: Vec<RevealedHint>,
    hint_count: u8,
    solution_prompt_shown: bool,
    solution_revealed: bool,
    panel_open: bool,
    panel_opened_once: bool,
}

impl HintEngine {
    pub fn new() -> Self {
        HintEngine::default()
    }

    /// Back to a clean slate for the next challenge.
    pub fn reset(&mut self) {
        *self = HintEngine::default();
    }

    pub fn hint_count(&self) -> u8 {
        self.hint_count
    }

    pub fn solution_prompt_shown(&self) -> bool {
        self.solution_prompt_shown
    }

    pub fn solution_revealed(&self) -> bool {
        self.solution_revealed
    }

    pub fn panel_open(&self) -> bool {
        self.panel_open
    }

    /// Reveal the next hint for the first unrevealed mismatch, in the diff's
    /// fixed key order. Returns the new hint, or `None` when the hint budget
    /// is spent or every mismatch is already covered — both of which flip the
    /// solution prompt on instead.
    pub fn reveal_next_hint(
        &mut self,
        live: &ConfigurationModel,
        target: &Challenge,
    ) -> Option<&RevealedHint> {
        let active = compute_active_mismatch_keys(live, target);
        let next = active
            .into_iter()
            .find(|key| !self.revealed.iter().any(|h| h.key == *key));

        let key = match next {
            Some(key) if self.hint_count < MAX_HINTS => key,
            _ => {
                self.solution_prompt_shown = true;
                return None;
            }
        };

        let text = hint_text(key, target);
        self.revealed.push(RevealedHint { key, text });
        self.hint_count += 1;
        if self.hint_count == MAX_HINTS {
            self.solution_prompt_shown = true;
        }
        self.revealed.last()
    }

    /// Open or close the hint panel. The first open on a challenge reveals
    /// one hint automatically when an unrevealed mismatch exists.
    pub fn toggle_hint_panel(
        &mut self,
        live: &ConfigurationModel,
        target: &Challenge,
    ) -> bool {
        self.panel_open = !self.panel_open;
        if self.panel_open && !self.panel_opened_once {
            self.panel_opened_once = true;
            let any_unrevealed = compute_active_mismatch_keys(live, target)
                .into_iter()
                .any(|key| !self.revealed.iter().any(|h| h.key == key));
            if any_unrevealed {
                self.reveal_next_hint(live, target);
            }
        }
        self.panel_open
    }

    /// The full log with live resolved status. Resolution is re-evaluated on
    /// every read; the log itself never shrinks.
    pub fn hint_log(
        &self,
        live: &ConfigurationModel,
        target: &Challenge,
    ) -> Vec<HintLogEntry> {
        let active = compute_active_mismatch_keys(live, target);
        self.revealed
            .iter()
            .map(|h| HintLogEntry {
                key: h.key,
                text: h.text.clone(),
                resolved: !active.contains(&h.key),
            })
            .collect()
    }

    /// Second step of the solution gate. Only succeeds after the prompt has
    /// been shown; returns whether the solution is now revealed.
    pub fn confirm_reveal_solution(&mut self) -> bool {
        if self.solution_prompt_shown {
            self.solution_revealed = true;
        }
        self.solution_revealed
    }
}

/// Human-readable hint for one mismatch key. Wording depends on whether the
/// target expects a deviation there ("change it") or expects the baseline
/// ("you added an override the target doesn't use — reset it").
fn hint_text(key: MismatchKey, target: &Challenge) -> String {
    match key {
        MismatchKey::Direction => {
            "Look at flex-direction: the target's main axis runs differently.".to_string()
        }
        MismatchKey::Justify => {
            "Check justify-content: items sit elsewhere along the main axis.".to_string()
        }
        MismatchKey::Align => {
            "Check align-items: the cross-axis alignment doesn't match yet.".to_string()
        }
        MismatchKey::Wrap => match target.container.flex_wrap {
            FlexWrap::NoWrap => {
                "The target keeps everything on one line. Check flex-wrap.".to_string()
            }
            _ => "The target flows onto more than one line. Check flex-wrap.".to_string(),
        },
        MismatchKey::Gap => "The spacing between items is off — adjust gap.".to_string(),
        MismatchKey::AlignSelf(id) => {
            if wants_override(target, id, |ov| ov.align_self.is_some()) {
                format!("Item {id} needs its own align-self, different from the container.")
            } else {
                format!("Item {id} carries an align-self override the target doesn't use — reset it to auto.")
            }
        }
        MismatchKey::Order(id) => {
            if wants_override(target, id, |ov| ov.order.is_some()) {
                format!("Item {id} appears at a different position — use order to move it.")
            } else {
                format!("Item {id} has an order value the target doesn't ask for — reset it to 0.")
            }
        }
        MismatchKey::Grow(id) => {
            if wants_override(target, id, |ov| ov.flex_grow.is_some()) {
                format!("Item {id} takes up a different share of free space — set flex-grow.")
            } else {
                format!("Item {id} has a flex-grow the target doesn't use — reset it to 0.")
            }
        }
        MismatchKey::Shrink(id) => {
            if wants_override(target, id, |ov| ov.flex_shrink.is_some()) {
                format!("Item {id} shrinks differently under pressure — set flex-shrink.")
            } else {
                format!("Item {id} has a flex-shrink the target doesn't use — reset it to 1.")
            }
        }
    }
}

fn wants_override(target: &Challenge, id: u8, field: impl Fn(&ItemOverride) -> bool) -> bool {
    target.overrides.get(&id).map(field).unwrap_or(false)
}
