//! Randomised challenge generation.
//!
//! `generate_challenge` is a pure function of the RNG, the difficulty flags,
//! and the baseline items, so a seeded [`ChallengeRequest`] reproduces the
//! exact same challenge every time. Generation is bounded: at most one random
//! permutation attempt, then a deterministic fallback — no retry loops.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::challenge_engine::diff::{resolve_align_self, visual_order};
use crate::challenge_engine::models::{
    AlignItems, AlignSelf, Challenge, ChallengeRequest, ConstraintAxis, ContainerConstraint,
    DifficultyFlags, FlexDirection, FlexWrap, Item, ItemOverride, JustifyContent, Px,
    TargetContainer,
};

/// Fixed allowance added to a wrap constraint for container padding
/// (30px on each side in the host layout).
pub const WRAP_MARGIN_PX: u32 = 60;

fn pick<T: Copy, R: Rng>(rng: &mut R, domain: &[T]) -> T {
    domain[rng.gen_range(0..domain.len())]
}

/// Coin flip that succeeds when the draw exceeds `threshold`.
fn coin<R: Rng>(rng: &mut R, threshold: f64) -> bool {
    rng.gen::<f64>() > threshold
}

fn make_challenge_id(rng: &mut impl RngCore) -> String {
    format!("FX-{:08X}", rng.next_u32())
}

/// In-place Fisher-Yates shuffle of an id sequence.
fn shuffle_ids<R: Rng>(rng: &mut R, ids: &mut [u8]) {
    for i in (1..ids.len()).rev() {
        let j = rng.gen_range(0..=i);
        ids.swap(i, j);
    }
}

/// Commit a visual-order permutation as per-item order overrides: the item at
/// position `p` gets `order = p`, so the stable `(order, position)` sort
/// reproduces exactly this sequence.
fn commit_permutation(overrides: &mut BTreeMap<u8, ItemOverride>, permutation: &[u8]) {
    for (position, &id) in permutation.iter().enumerate() {
        overrides.entry(id).or_default().order = Some(position as i32);
    }
}

/// Generate a randomised target layout.
///
/// `baseline` is the item bank; `item_count` selects the active prefix
/// (clamped to it). Every returned challenge requires at least one observable
/// change from the baseline configuration.
pub fn generate_challenge<R: Rng>(
    rng: &mut R,
    flags: &DifficultyFlags,
    baseline: &[Item],
    item_count: usize,
) -> Challenge {
    assert!(!baseline.is_empty(), "generate_challenge: empty item bank");
    let challenge_id = make_challenge_id(rng);
    let active = &baseline[..item_count.clamp(1, baseline.len())];

    // 1. Container draws, each uniform over its domain.
    let flex_direction = pick(rng, &FlexDirection::ALL);
    let justify_content = pick(rng, &JustifyContent::ALL);
    let align_items = pick(rng, &AlignItems::ALL);
    let gap = Px(rng.gen_range(0..=4u32) * 5);

    // 2. Wrap branch: pin the main-axis dimension well below the summed item
    // extents so the wrap is actually visible.
    let (flex_wrap, constraint) = if flags.include_flex_wrap && coin(rng, 0.4) {
        let wrap = pick(rng, &FlexWrap::WRAPPING);
        let extent: u32 = active
            .iter()
            .map(|i| i.main_extent(flex_direction))
            .sum::<u32>()
            + gap.0 * (active.len().saturating_sub(1)) as u32;
        let factor = rng.gen_range(0.50..=0.70f32);
        let limit = (extent as f32 * factor).round() as u32 + WRAP_MARGIN_PX;
        let axis = if flex_direction.is_column() {
            ConstraintAxis::Height
        } else {
            ConstraintAxis::Width
        };
        (wrap, Some(ContainerConstraint { axis, limit: Px(limit) }))
    } else {
        (FlexWrap::NoWrap, None)
    };

    let mut overrides: BTreeMap<u8, ItemOverride> = BTreeMap::new();

    // 3. Per-item draws, each behind its own coin. An override is recorded
    // only when the drawn value actually deviates from the baseline item.
    for item in active {
        if flags.include_item_props && coin(rng, 0.5) {
            let value = pick(rng, &AlignSelf::NON_AUTO);
            // "Differs from baseline" is judged after resolution: a `start`
            // override under a stretch/start container changes nothing.
            if resolve_align_self(value, align_items)
                != resolve_align_self(item.align_self, align_items)
            {
                overrides.entry(item.id).or_default().align_self = Some(value);
            }
        }
        if flags.include_shrink_grow && coin(rng, 0.5) {
            let grow = rng.gen_range(0..=3u32);
            let shrink = rng.gen_range(0..=2u32);
            if grow != item.flex_grow {
                overrides.entry(item.id).or_default().flex_grow = Some(grow);
            }
            if shrink != item.flex_shrink {
                overrides.entry(item.id).or_default().flex_shrink = Some(shrink);
            }
        }
    }

    // 4. Order branch: permute the baseline visual sequence; only commit a
    // permutation that actually moves something.
    if flags.include_order && coin(rng, 0.3) {
        let base_order = visual_order(active, |i| i.order);
        let mut permuted = base_order.clone();
        shuffle_ids(rng, &mut permuted);
        if permuted != base_order {
            commit_permutation(&mut overrides, &permuted);
        }
    }

    // 5. No-op guard: with no overrides and no wrap, force an order change so
    // the challenge is never visually equal to baseline. One shuffle attempt,
    // then a deterministic first-to-back / last-to-front swap. Overrides merge
    // additively here, last write wins. A lone item has no order to swap, so
    // it gets a grow override instead — still an observable change.
    if overrides.is_empty() && flex_wrap == FlexWrap::NoWrap {
        let base_order = visual_order(active, |i| i.order);
        let mut permuted = base_order.clone();
        shuffle_ids(rng, &mut permuted);
        if permuted != base_order {
            commit_permutation(&mut overrides, &permuted);
        } else if base_order.len() > 1 {
            let first = base_order[0];
            let last = base_order[base_order.len() - 1];
            overrides.entry(first).or_default().order = Some(1);
            overrides.entry(last).or_default().order = Some(-1);
        } else {
            overrides.entry(base_order[0]).or_default().flex_grow = Some(1);
        }
    }

    Challenge {
        challenge_id,
        container: TargetContainer {
            flex_direction,
            justify_content,
            align_items,
            flex_wrap,
            gap,
        },
        constraint,
        overrides,
    }
}

/// Seeded entry point: builds the RNG from the request and delegates.
pub fn generate_challenge_from_request(
    request: &ChallengeRequest,
    baseline: &[Item],
) -> Challenge {
    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };
    generate_challenge(&mut rng, &request.flags, baseline, request.item_count)
}
