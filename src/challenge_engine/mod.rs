//! Core challenge engine — generation, history, diffing, hints, and match
//! detection.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | All shared types: CSS keyword enums, items, challenges, requests |
//! | `config`    | The live `ConfigurationModel`: container + item bank over a fixed baseline |
//! | `generator` | `generate_challenge()` — randomised, bounded, never a visual no-op |
//! | `history`   | Challenge history with live/review cursor and snapshot restore |
//! | `diff`      | Symbolic mismatch keys with visual-order and alignment resolution |
//! | `hints`     | Progressive 3-hint log with a gated solution reveal |
//! | `detector`  | Settle-timer match detection, comparators, success cooldown |
//! | `session`   | `QuizSession` — the single context object owning all of the above |

pub mod config;
pub mod detector;
pub mod diff;
pub mod generator;
pub mod hints;
pub mod history;
pub mod models;
pub mod session;

// Re-export the public API surface so callers can use
// `challenge_engine::generate_challenge` without reaching into sub-modules.
pub use config::{baseline_bank, ConfigSnapshot, ConfigurationModel, MAX_ITEMS};
pub use detector::{
    BoundingBox, Cooldown, GeometryComparator, LayoutComparator, LayoutMeasurer, MatchDetector,
    MeasuredPair, PropertyComparator, resolved_target_items, COOLDOWN_MS, PIXEL_TOLERANCE,
    SETTLE_DELAY_MS,
};
pub use diff::{
    compute_active_mismatch_keys, normalize_align, resolve_align_self, visual_order, MismatchKey,
};
pub use generator::{generate_challenge, generate_challenge_from_request, WRAP_MARGIN_PX};
pub use hints::{HintEngine, HintLogEntry, RevealedHint, MAX_HINTS};
pub use history::ChallengeHistory;
pub use models::{
    AlignItems, AlignSelf, Challenge, ChallengeRequest, ConstraintAxis, ContainerConstraint,
    ContainerStyle, DifficultyFlags, DisplayMode, FlexDirection, FlexWrap, Item, ItemOverride,
    JustifyContent, Px, SessionState, TargetContainer,
};
pub use session::QuizSession;
