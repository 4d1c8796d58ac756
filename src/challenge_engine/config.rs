//! The live configuration: one container style plus a fixed bank of five
//! items, of which a clamped prefix is active. The baseline copy is immutable
//! and is what challenges and resets are measured against.

use serde::{Deserialize, Serialize};

use crate::challenge_engine::models::{
    AlignItems, AlignSelf, Challenge, ContainerStyle, DisplayMode, FlexDirection, FlexWrap, Item,
    JustifyContent, Px,
};

pub const MAX_ITEMS: usize = 5;

/// The five-item bank every session starts from. Sizes vary so alignment and
/// sizing effects are visible without any edits.
pub fn baseline_bank() -> [Item; MAX_ITEMS] {
    [
        Item::baseline(1, Px(60), Px(60)),
        Item::baseline(2, Px(80), Px(50)),
        Item::baseline(3, Px(50), Px(80)),
        Item::baseline(4, Px(70), Px(40)),
        Item::baseline(5, Px(90), Px(70)),
    ]
}

/// A saved copy of the editable state, used to preserve in-progress edits
/// while the user reviews older challenges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    container: ContainerStyle,
    items: [Item; MAX_ITEMS],
    item_count: usize,
}

/// The typed live state: container style and ordered items, with an immutable
/// baseline. All edits go through the setters here so each stays clamped to
/// its domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationModel {
    container: ContainerStyle,
    items: [Item; MAX_ITEMS],
    baseline: [Item; MAX_ITEMS],
    item_count: usize,
}

impl Default for ConfigurationModel {
    fn default() -> Self {
        ConfigurationModel::new(3)
    }
}

impl ConfigurationModel {
    pub fn new(item_count: usize) -> Self {
        let bank = baseline_bank();
        ConfigurationModel {
            container: ContainerStyle::default(),
            items: bank,
            baseline: bank,
            item_count: item_count.clamp(1, MAX_ITEMS),
        }
    }

    // ── reads ────────────────────────────────────────────────────────────

    pub fn container(&self) -> &ContainerStyle {
        &self.container
    }

    /// The active prefix of the item bank, in original (DOM) order.
    pub fn active_items(&self) -> &[Item] {
        &self.items[..self.item_count]
    }

    pub fn baseline_items(&self) -> &[Item] {
        &self.baseline[..self.item_count]
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn item(&self, id: u8) -> Option<&Item> {
        self.active_items().iter().find(|i| i.id == id)
    }

    // ── container edits ──────────────────────────────────────────────────

    pub fn set_display(&mut self, value: DisplayMode) {
        self.container.display = value;
    }

    pub fn set_flex_direction(&mut self, value: FlexDirection) {
        self.container.flex_direction = value;
    }

    pub fn set_justify_content(&mut self, value: JustifyContent) {
        self.container.justify_content = value;
    }

    pub fn set_align_items(&mut self, value: AlignItems) {
        self.container.align_items = value;
    }

    pub fn set_flex_wrap(&mut self, value: FlexWrap) {
        self.container.flex_wrap = value;
    }

    pub fn set_gap(&mut self, value: Px) {
        self.container.gap = value;
    }

    // ── item edits ───────────────────────────────────────────────────────
    //
    // Edits to an inactive or unknown id are silently dropped; there is
    // nothing on screen they could affect.

    pub fn set_item_count(&mut self, count: usize) {
        self.item_count = count.clamp(1, MAX_ITEMS);
    }

    pub fn set_align_self(&mut self, id: u8, value: AlignSelf) {
        if let Some(item) = self.active_item_mut(id) {
            item.align_self = value;
        }
    }

    pub fn set_flex_grow(&mut self, id: u8, value: u32) {
        if let Some(item) = self.active_item_mut(id) {
            item.flex_grow = value;
        }
    }

    pub fn set_flex_shrink(&mut self, id: u8, value: u32) {
        if let Some(item) = self.active_item_mut(id) {
            item.flex_shrink = value;
        }
    }

    pub fn set_order(&mut self, id: u8, value: i32) {
        if let Some(item) = self.active_item_mut(id) {
            item.order = value;
        }
    }

    fn active_item_mut(&mut self, id: u8) -> Option<&mut Item> {
        self.items[..self.item_count].iter_mut().find(|i| i.id == id)
    }

    // ── resets / navigation support ──────────────────────────────────────

    /// Reset container and items to baseline defaults. Called when a new
    /// challenge is pushed so the user always starts from the same state.
    pub fn reset_to_baseline(&mut self) {
        self.container = ContainerStyle::default();
        self.items = self.baseline;
    }

    /// Overwrite the live state with a challenge's target values — the
    /// review-mode reconstruction of a past challenge.
    pub fn apply_target(&mut self, challenge: &Challenge) {
        self.container = ContainerStyle {
            display: DisplayMode::Flex,
            flex_direction: challenge.container.flex_direction,
            justify_content: challenge.container.justify_content,
            align_items: challenge.container.align_items,
            flex_wrap: challenge.container.flex_wrap,
            gap: challenge.container.gap,
        };
        for i in 0..MAX_ITEMS {
            self.items[i] = challenge.target_item(&self.baseline[i]);
        }
    }

    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            container: self.container,
            items: self.items,
            item_count: self.item_count,
        }
    }

    pub fn restore(&mut self, snapshot: &ConfigSnapshot) {
        self.container = snapshot.container;
        self.items = snapshot.items;
        self.item_count = snapshot.item_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_count_is_clamped() {
        let mut cfg = ConfigurationModel::new(99);
        assert_eq!(cfg.item_count(), MAX_ITEMS);
        cfg.set_item_count(0);
        assert_eq!(cfg.item_count(), 1);
    }

    #[test]
    fn edits_to_inactive_items_are_dropped() {
        let mut cfg = ConfigurationModel::new(2);
        cfg.set_flex_grow(5, 3);
        assert_eq!(cfg.item(5), None);
        cfg.set_item_count(5);
        assert_eq!(cfg.item(5).map(|i| i.flex_grow), Some(0));
    }

    #[test]
    fn snapshot_restore_round_trips() {
        let mut cfg = ConfigurationModel::new(3);
        cfg.set_flex_direction(FlexDirection::ColumnReverse);
        cfg.set_gap(Px(20));
        cfg.set_order(2, -1);
        let snap = cfg.snapshot();

        cfg.reset_to_baseline();
        assert_eq!(cfg.container().gap, Px(10));

        cfg.restore(&snap);
        assert_eq!(cfg.container().flex_direction, FlexDirection::ColumnReverse);
        assert_eq!(cfg.container().gap, Px(20));
        assert_eq!(cfg.item(2).map(|i| i.order), Some(-1));
    }
}
