//! # flexbox_drill_gen
//!
//! A fully offline, deterministic challenge engine for a CSS flexbox
//! teaching tool.
//!
//! The host UI lets a user edit container and item layout properties and see
//! the effect live; in quiz mode this engine generates a randomised target
//! layout the user must reproduce. The engine owns everything with actual
//! logic in it: challenge generation, the navigable challenge history with
//! live/review separation, the symbolic property diff, the progressive hint
//! system, and debounced match detection with once-only scoring. Rendering,
//! the CSS text editor, and the rest of the chrome stay on the host side.
//!
//! ## How it works
//!
//! 1. Build a [`ChallengeRequest`] with difficulty flags, an item count, and
//!    an optional RNG seed, then call [`QuizSession::start`].
//! 2. Forward user edits through the session's setters. Edits on the live
//!    challenge arm a settle timer; drive it with [`QuizSession::tick`].
//! 3. When the settled configuration matches the target, the score advances
//!    (once per challenge, however often the check re-fires) and a pausable
//!    cooldown leads into the next challenge.
//! 4. On demand, [`QuizSession::reveal_next_hint`] diffs the live
//!    configuration against the target and reveals up to three ordered,
//!    de-duplicated hints before offering the full solution behind a
//!    confirmation step.
//!
//! ## Key features
//!
//! - **Deterministic**: pass `rng_seed: Some(u64)` to reproduce the exact
//!   same challenge sequence every time — useful for tests and replays.
//! - **Never a no-op**: every generated challenge requires at least one
//!   observable change from the baseline layout, with a deterministic
//!   fallback instead of retry loops.
//! - **Visual semantics**: `order` is compared as the visible item sequence,
//!   not raw numbers, and `stretch`/`start` alignment equivalence plus
//!   `auto` resolution happen before any mismatch is reported.
//!
//! ## Quick start
//!
//! ```rust
//! use flexbox_drill_gen::{ChallengeRequest, DifficultyFlags, QuizSession};
//!
//! let mut session = QuizSession::start(
//!     ChallengeRequest {
//!         flags: DifficultyFlags::everything(),
//!         item_count: 3,
//!         rng_seed: Some(42),
//!     },
//!     10, // questions in this session
//! );
//!
//! let target = session.current_challenge().unwrap().clone();
//! println!("challenge {}", target.challenge_id);
//!
//! session.set_flex_direction(target.container.flex_direction);
//! session.tick(450); // settle delay elapses, match check fires
//!
//! if let Some(hint) = session.reveal_next_hint() {
//!     println!("hint: {}", hint.text);
//! }
//! ```

pub mod challenge_engine;
pub mod ui_adapter;

// Convenience re-exports so callers can use `flexbox_drill_gen::QuizSession`
// directly without reaching into `challenge_engine::`.
pub use challenge_engine::{
    compute_active_mismatch_keys, generate_challenge, generate_challenge_from_request,
    AlignItems, AlignSelf, BoundingBox, Challenge, ChallengeHistory, ChallengeRequest,
    ConfigurationModel, ConstraintAxis, ContainerConstraint, ContainerStyle, Cooldown,
    DifficultyFlags, DisplayMode, FlexDirection, FlexWrap, GeometryComparator, HintEngine,
    HintLogEntry, Item, ItemOverride, JustifyContent, LayoutComparator, LayoutMeasurer,
    MatchDetector, MismatchKey, Px, PropertyComparator, QuizSession, RevealedHint,
    SessionState, TargetContainer, MAX_HINTS, MAX_ITEMS,
};
