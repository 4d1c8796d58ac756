use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CSS keyword primitives
// ---------------------------------------------------------------------------

/// A whole-pixel CSS length, e.g. `Px(60)` renders as `60px`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Px(pub u32);

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    Flex,
    Block,
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Flex  => write!(f, "flex"),
            DisplayMode::Block => write!(f, "block"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlexDirection {
    Row,
    Column,
    RowReverse,
    ColumnReverse,
}

impl FlexDirection {
    pub const ALL: [FlexDirection; 4] = [
        FlexDirection::Row,
        FlexDirection::Column,
        FlexDirection::RowReverse,
        FlexDirection::ColumnReverse,
    ];

    /// True when the main axis runs vertically (column / column-reverse).
    pub fn is_column(self) -> bool {
        matches!(self, FlexDirection::Column | FlexDirection::ColumnReverse)
    }
}

impl fmt::Display for FlexDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlexDirection::Row           => "row",
            FlexDirection::Column        => "column",
            FlexDirection::RowReverse    => "row-reverse",
            FlexDirection::ColumnReverse => "column-reverse",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JustifyContent {
    Start,
    End,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

impl JustifyContent {
    pub const ALL: [JustifyContent; 6] = [
        JustifyContent::Start,
        JustifyContent::End,
        JustifyContent::Center,
        JustifyContent::SpaceBetween,
        JustifyContent::SpaceAround,
        JustifyContent::SpaceEvenly,
    ];
}

impl fmt::Display for JustifyContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JustifyContent::Start        => "start",
            JustifyContent::End          => "end",
            JustifyContent::Center       => "center",
            JustifyContent::SpaceBetween => "space-between",
            JustifyContent::SpaceAround  => "space-around",
            JustifyContent::SpaceEvenly  => "space-evenly",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlignItems {
    Stretch,
    Start,
    End,
    Center,
    Baseline,
}

impl AlignItems {
    pub const ALL: [AlignItems; 5] = [
        AlignItems::Stretch,
        AlignItems::Start,
        AlignItems::End,
        AlignItems::Center,
        AlignItems::Baseline,
    ];
}

impl fmt::Display for AlignItems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlignItems::Stretch  => "stretch",
            AlignItems::Start    => "start",
            AlignItems::End      => "end",
            AlignItems::Center   => "center",
            AlignItems::Baseline => "baseline",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlignSelf {
    Auto,
    Start,
    End,
    Center,
    Baseline,
    Stretch,
}

impl AlignSelf {
    pub const ALL: [AlignSelf; 6] = [
        AlignSelf::Auto,
        AlignSelf::Start,
        AlignSelf::End,
        AlignSelf::Center,
        AlignSelf::Baseline,
        AlignSelf::Stretch,
    ];

    /// The domain a challenge may draw overrides from (`auto` would be a no-op).
    pub const NON_AUTO: [AlignSelf; 5] = [
        AlignSelf::Start,
        AlignSelf::End,
        AlignSelf::Center,
        AlignSelf::Baseline,
        AlignSelf::Stretch,
    ];
}

impl fmt::Display for AlignSelf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlignSelf::Auto     => "auto",
            AlignSelf::Start    => "start",
            AlignSelf::End      => "end",
            AlignSelf::Center   => "center",
            AlignSelf::Baseline => "baseline",
            AlignSelf::Stretch  => "stretch",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlexWrap {
    NoWrap,
    Wrap,
    WrapReverse,
}

impl FlexWrap {
    /// The values a wrap challenge may pick (`nowrap` is the non-wrapping case).
    pub const WRAPPING: [FlexWrap; 2] = [FlexWrap::Wrap, FlexWrap::WrapReverse];
}

impl fmt::Display for FlexWrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlexWrap::NoWrap      => "nowrap",
            FlexWrap::Wrap        => "wrap",
            FlexWrap::WrapReverse => "wrap-reverse",
        };
        write!(f, "{}", s)
    }
}

// ---------------------------------------------------------------------------
// Container / item state
// ---------------------------------------------------------------------------

/// The full editable style of the flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerStyle {
    pub display: DisplayMode,
    pub flex_direction: FlexDirection,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub flex_wrap: FlexWrap,
    pub gap: Px,
}

impl Default for ContainerStyle {
    fn default() -> Self {
        ContainerStyle {
            display: DisplayMode::Flex,
            flex_direction: FlexDirection::Row,
            justify_content: JustifyContent::Start,
            align_items: AlignItems::Stretch,
            flex_wrap: FlexWrap::NoWrap,
            gap: Px(10),
        }
    }
}

/// One flex item. `id` is stable (1..=5) and never changes; width/height are
/// fixed per item and only copied on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u8,
    pub align_self: AlignSelf,
    pub flex_grow: u32,
    pub flex_shrink: u32,
    pub order: i32,
    pub width: Px,
    pub height: Px,
}

impl Item {
    /// A baseline item with default flex properties and the given size.
    pub fn baseline(id: u8, width: Px, height: Px) -> Self {
        Item {
            id,
            align_self: AlignSelf::Auto,
            flex_grow: 0,
            flex_shrink: 1,
            order: 0,
            width,
            height,
        }
    }

    /// The item's extent along the container's main axis.
    pub fn main_extent(&self, direction: FlexDirection) -> u32 {
        if direction.is_column() { self.height.0 } else { self.width.0 }
    }
}

/// Partial per-item deviation a challenge asks for. Absent fields mean
/// "keep the baseline value for this item".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOverride {
    pub align_self: Option<AlignSelf>,
    pub flex_grow: Option<u32>,
    pub flex_shrink: Option<u32>,
    pub order: Option<i32>,
}

impl ItemOverride {
    pub fn is_empty(&self) -> bool {
        self.align_self.is_none()
            && self.flex_grow.is_none()
            && self.flex_shrink.is_none()
            && self.order.is_none()
    }
}

// ---------------------------------------------------------------------------
// Challenge request / response types
// ---------------------------------------------------------------------------

/// Which property families a generated challenge may exercise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyFlags {
    pub include_item_props: bool,
    pub include_order: bool,
    pub include_shrink_grow: bool,
    pub include_flex_wrap: bool,
}

impl DifficultyFlags {
    /// Container-only challenges (all item-level families off).
    pub fn container_only() -> Self {
        DifficultyFlags::default()
    }

    /// Every property family enabled.
    pub fn everything() -> Self {
        DifficultyFlags {
            include_item_props: true,
            include_order: true,
            include_shrink_grow: true,
            include_flex_wrap: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeRequest {
    pub flags: DifficultyFlags,
    /// Number of active items; clamped to 1..=5 by the generator.
    pub item_count: usize,
    pub rng_seed: Option<u64>,
}

impl ChallengeRequest {
    pub fn new(flags: DifficultyFlags, item_count: usize) -> Self {
        ChallengeRequest { flags, item_count, rng_seed: None }
    }
}

/// The container dimension a wrap challenge pins down so wrapping is
/// actually observable (width for row-like directions, height for column-like).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintAxis {
    Width,
    Height,
}

impl fmt::Display for ConstraintAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintAxis::Width  => write!(f, "width"),
            ConstraintAxis::Height => write!(f, "height"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerConstraint {
    pub axis: ConstraintAxis,
    pub limit: Px,
}

/// The container properties a challenge targets. `display` is not part of a
/// challenge; quiz mode only makes sense with a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetContainer {
    pub flex_direction: FlexDirection,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub flex_wrap: FlexWrap,
    pub gap: Px,
}

/// A generated target layout. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub challenge_id: String,
    pub container: TargetContainer,
    /// Present only when the challenge exercises wrapping.
    pub constraint: Option<ContainerConstraint>,
    /// Keyed by item id; only items the challenge deviates on appear here.
    pub overrides: BTreeMap<u8, ItemOverride>,
}

impl Challenge {
    /// The effective target properties for one baseline item: the override
    /// where present, the baseline value otherwise.
    pub fn target_item(&self, baseline: &Item) -> Item {
        let mut item = *baseline;
        if let Some(ov) = self.overrides.get(&baseline.id) {
            if let Some(a) = ov.align_self  { item.align_self = a; }
            if let Some(g) = ov.flex_grow   { item.flex_grow = g; }
            if let Some(s) = ov.flex_shrink { item.flex_shrink = s; }
            if let Some(o) = ov.order       { item.order = o; }
        }
        item
    }
}

// ---------------------------------------------------------------------------
// Session bookkeeping
// ---------------------------------------------------------------------------

/// Session-level score state: not-started → in-progress → completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u32,
    pub target_question_count: usize,
    pub completed: bool,
}

impl SessionState {
    pub fn new(target_question_count: usize) -> Self {
        SessionState {
            score: 0,
            // Out-of-domain counts are clamped, not rejected.
            target_question_count: target_question_count.max(1),
            completed: false,
        }
    }
}
