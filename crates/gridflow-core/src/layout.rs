#![forbid(unsafe_code)]

//! Layout snapshots: unordered item collections with deterministic iteration.
//!
//! A [`Layout`] is logically an unordered set of [`GridItem`]s keyed by id.
//! Insertion order is preserved purely so pair enumeration, validation
//! reports, and state hashes are deterministic across runs; it carries no
//! layout meaning.
//!
//! The engine never mutates a caller's snapshot in place. Every operation
//! clones, transforms, and returns a fresh `Layout` (or hands the input back
//! unchanged on abort).

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

use crate::item::{GridItem, ItemId};

/// An in-memory snapshot of item placements on the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    items: Vec<GridItem>,
}

impl Layout {
    /// Create an empty layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a layout from an item collection, preserving order.
    pub fn from_items(items: impl IntoIterator<Item = GridItem>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the layout has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate items in deterministic (insertion) order.
    pub fn items(&self) -> impl Iterator<Item = &GridItem> {
        self.items.iter()
    }

    /// Mutable iteration, for engine-internal passes on cloned snapshots.
    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut GridItem> {
        self.items.iter_mut()
    }

    /// Items as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[GridItem] {
        &self.items
    }

    /// Look up an item by id.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&GridItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Mutable lookup by id.
    pub fn get_mut(&mut self, id: &ItemId) -> Option<&mut GridItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }

    /// Whether an item with the given id exists.
    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Append an item. Uniqueness is the validator's concern, not enforced here.
    pub fn push(&mut self, item: GridItem) {
        self.items.push(item);
    }

    /// Remove and return the item with the given id, if present.
    pub fn remove(&mut self, id: &ItemId) -> Option<GridItem> {
        let index = self.items.iter().position(|item| &item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Lowest row index below every item: `max(y + h)`, or 0 when empty.
    ///
    /// Items with negative geometry (not yet normalized) contribute nothing
    /// below row zero.
    #[must_use]
    pub fn bounding_height(&self) -> i32 {
        self.items
            .iter()
            .map(|item| item.bottom())
            .max()
            .unwrap_or(0)
            .max(0)
    }

    /// Total occupied area in cells, counting overlaps twice.
    #[must_use]
    pub fn total_item_area(&self) -> i64 {
        self.items.iter().map(GridItem::area).sum()
    }

    /// Order-insensitive fingerprint of the layout's validation-relevant
    /// state: geometry, the static flag, and size constraints.
    ///
    /// Two layouts holding the same items at the same positions with the
    /// same constraints hash equal regardless of insertion order. Used for
    /// change detection, validation memoization, and replay assertions.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut per_item: Vec<u64> = self
            .items
            .iter()
            .map(|item| {
                let mut hasher = FxHasher::default();
                item.id.hash(&mut hasher);
                item.x.hash(&mut hasher);
                item.y.hash(&mut hasher);
                item.w.hash(&mut hasher);
                item.h.hash(&mut hasher);
                item.is_static.hash(&mut hasher);
                item.constraints.hash(&mut hasher);
                hasher.finish()
            })
            .collect();
        per_item.sort_unstable();

        let mut hasher = FxHasher::default();
        per_item.hash(&mut hasher);
        hasher.finish()
    }
}

impl FromIterator<GridItem> for Layout {
    fn from_iter<T: IntoIterator<Item = GridItem>>(iter: T) -> Self {
        Self::from_items(iter)
    }
}

impl<'a> IntoIterator for &'a Layout {
    type Item = &'a GridItem;
    type IntoIter = std::slice::Iter<'a, GridItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Per-breakpoint layout snapshots derived from one base layout.
///
/// Entries are kept in descending breakpoint width order, matching the
/// derivation order of the responsive transformer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponsiveLayoutSet {
    entries: Vec<(String, Layout)>,
}

impl ResponsiveLayoutSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a derived layout for a breakpoint.
    pub fn insert(&mut self, name: impl Into<String>, layout: Layout) {
        self.entries.push((name.into(), layout));
    }

    /// Look up the layout for a breakpoint name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Layout> {
        self.entries
            .iter()
            .find(|(bp, _)| bp == name)
            .map(|(_, layout)| layout)
    }

    /// Number of breakpoints in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(breakpoint, layout)` pairs widest-first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Layout)> {
        self.entries
            .iter()
            .map(|(name, layout)| (name.as_str(), layout))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::SizeConstraints;

    fn item(id: &str, x: i32, y: i32, w: i32, h: i32) -> GridItem {
        GridItem::new(id, x, y, w, h)
    }

    #[test]
    fn empty_layout_metrics() {
        let layout = Layout::new();
        assert!(layout.is_empty());
        assert_eq!(layout.bounding_height(), 0);
        assert_eq!(layout.total_item_area(), 0);
    }

    #[test]
    fn bounding_height_is_max_bottom() {
        let layout = Layout::from_items([item("a", 0, 0, 2, 2), item("b", 2, 1, 1, 4)]);
        assert_eq!(layout.bounding_height(), 5);
    }

    #[test]
    fn lookup_and_remove() {
        let mut layout = Layout::from_items([item("a", 0, 0, 1, 1), item("b", 1, 0, 1, 1)]);
        assert!(layout.contains(&ItemId::new("a")));
        let removed = layout.remove(&ItemId::new("a")).unwrap();
        assert_eq!(removed.id.as_str(), "a");
        assert!(!layout.contains(&ItemId::new("a")));
        assert_eq!(layout.len(), 1);
    }

    #[test]
    fn state_hash_is_order_insensitive() {
        let forward = Layout::from_items([item("a", 0, 0, 1, 1), item("b", 1, 0, 1, 1)]);
        let reversed = Layout::from_items([item("b", 1, 0, 1, 1), item("a", 0, 0, 1, 1)]);
        assert_eq!(forward.state_hash(), reversed.state_hash());
    }

    #[test]
    fn state_hash_tracks_geometry() {
        let before = Layout::from_items([item("a", 0, 0, 1, 1)]);
        let after = Layout::from_items([item("a", 0, 1, 1, 1)]);
        assert_ne!(before.state_hash(), after.state_hash());
    }

    #[test]
    fn state_hash_tracks_constraints() {
        let unconstrained = Layout::from_items([item("a", 0, 0, 1, 1)]);
        let constrained = Layout::from_items([item("a", 0, 0, 1, 1).with_constraints(
            SizeConstraints {
                min_w: Some(2),
                ..SizeConstraints::NONE
            },
        )]);
        assert_ne!(unconstrained.state_hash(), constrained.state_hash());
    }

    #[test]
    fn responsive_set_lookup() {
        let mut set = ResponsiveLayoutSet::new();
        set.insert("lg", Layout::from_items([item("a", 0, 0, 2, 2)]));
        set.insert("sm", Layout::new());
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("lg").unwrap().len(), 1);
        assert!(set.get("xxl").is_none());
    }
}
