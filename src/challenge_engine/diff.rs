//! Mismatch detection between the live configuration and a challenge target.
//!
//! The diff is symbolic: the output is an ordered list of [`MismatchKey`]s,
//! not a value-level patch. Two resolution rules make the diff match what the
//! user actually sees rather than what the raw numbers say:
//!
//! - alignment collapses `stretch`/`start` (visually identical for
//!   single-line items in this model) and resolves an item's `auto` against
//!   the owning container's `align-items`;
//! - `order` is compared as a visual permutation, never as raw numbers.

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::challenge_engine::config::ConfigurationModel;
use crate::challenge_engine::models::{AlignItems, AlignSelf, Challenge, Item};

/// One mismatched property. Variants carry the item id where applicable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MismatchKey {
    Direction,
    Justify,
    Align,
    Wrap,
    Gap,
    AlignSelf(u8),
    Order(u8),
    Grow(u8),
    Shrink(u8),
}

impl fmt::Display for MismatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MismatchKey::Direction     => write!(f, "direction"),
            MismatchKey::Justify       => write!(f, "justify"),
            MismatchKey::Align         => write!(f, "align"),
            MismatchKey::Wrap          => write!(f, "wrap"),
            MismatchKey::Gap           => write!(f, "gap"),
            MismatchKey::AlignSelf(id) => write!(f, "alignSelf-{}", id),
            MismatchKey::Order(id)     => write!(f, "order-{}", id),
            MismatchKey::Grow(id)      => write!(f, "grow-{}", id),
            MismatchKey::Shrink(id)    => write!(f, "shrink-{}", id),
        }
    }
}

/// Collapse `stretch` into `start`: for the fixed-size items in this model
/// the two are indistinguishable on a single line.
pub fn normalize_align(value: AlignItems) -> AlignItems {
    match value {
        AlignItems::Stretch => AlignItems::Start,
        other => other,
    }
}

/// An item's effective cross-axis alignment: `auto` inherits the owning
/// container's `align-items`, then the stretch/start collapse applies.
pub fn resolve_align_self(value: AlignSelf, container: AlignItems) -> AlignItems {
    let resolved = match value {
        AlignSelf::Auto     => container,
        AlignSelf::Start    => AlignItems::Start,
        AlignSelf::End      => AlignItems::End,
        AlignSelf::Center   => AlignItems::Center,
        AlignSelf::Baseline => AlignItems::Baseline,
        AlignSelf::Stretch  => AlignItems::Stretch,
    };
    normalize_align(resolved)
}

/// The sequence of item ids after sorting by `(effective order, original
/// position)` — a stable sort, so ties keep DOM order, exactly as CSS lays
/// items out.
pub fn visual_order(items: &[Item], order_of: impl Fn(&Item) -> i32) -> Vec<u8> {
    let mut indexed: Vec<(i32, usize, u8)> = items
        .iter()
        .enumerate()
        .map(|(idx, item)| (order_of(item), idx, item.id))
        .collect();
    indexed.sort_by_key(|&(order, idx, _)| (order, idx));
    indexed.into_iter().map(|(_, _, id)| id).collect()
}

/// Compute the ordered set of properties where the live configuration
/// deviates from `target`.
///
/// Key order is fixed: container keys first (direction, justify, align, wrap,
/// gap), then per-item keys in item-id order. Two keys are gated on others:
/// `gap` is suppressed while direction or justify still mismatch (a gap hint
/// is meaningless until the user can see where the gaps are), and
/// `alignSelf-{id}` is suppressed while both sides leave the item on `auto`
/// (the whole difference then lives in the container's `align`).
pub fn compute_active_mismatch_keys(
    live: &ConfigurationModel,
    target: &Challenge,
) -> Vec<MismatchKey> {
    let mut keys = Vec::new();
    let container = live.container();
    let want = &target.container;

    let direction_ok = container.flex_direction == want.flex_direction;
    let justify_ok = container.justify_content == want.justify_content;

    if !direction_ok {
        keys.push(MismatchKey::Direction);
    }
    if !justify_ok {
        keys.push(MismatchKey::Justify);
    }
    if normalize_align(container.align_items) != normalize_align(want.align_items) {
        keys.push(MismatchKey::Align);
    }
    if container.flex_wrap != want.flex_wrap {
        keys.push(MismatchKey::Wrap);
    }
    if direction_ok && justify_ok && container.gap != want.gap {
        keys.push(MismatchKey::Gap);
    }

    let items = live.active_items();
    let baseline = live.baseline_items();

    // Order is a permutation property: flag nothing when the live visual
    // sequence already equals the target sequence, whatever the raw numbers.
    let target_items: Vec<Item> = baseline.iter().map(|b| target.target_item(b)).collect();
    let live_order = visual_order(items, |i| i.order);
    let target_order = visual_order(&target_items, |i| i.order);
    let order_differs = live_order != target_order;

    for (item, want_item) in items.iter().zip(target_items.iter()) {
        // An item left on `auto` on both sides has no alignment of its own:
        // any difference it shows is the container's, already keyed as
        // `Align`. Only compare resolved values once either side overrides.
        let both_auto =
            item.align_self == AlignSelf::Auto && want_item.align_self == AlignSelf::Auto;
        let live_self = resolve_align_self(item.align_self, container.align_items);
        let want_self = resolve_align_self(want_item.align_self, want.align_items);
        if !both_auto && live_self != want_self {
            keys.push(MismatchKey::AlignSelf(item.id));
        }
        if order_differs && item.order != want_item.order {
            keys.push(MismatchKey::Order(item.id));
        }
        if item.flex_grow != want_item.flex_grow {
            keys.push(MismatchKey::Grow(item.id));
        }
        if item.flex_shrink != want_item.flex_shrink {
            keys.push(MismatchKey::Shrink(item.id));
        }
    }

    keys
}
