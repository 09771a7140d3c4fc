//! Bounded, insertion-ordered selection of catalog items.

use crate::catalog::ItemId;
use std::collections::HashSet;

/// Capacity used when configuration does not override it.
pub const DEFAULT_CAPACITY: usize = 3;

/// What a [`SelectionSet::toggle`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// Absent item while the set was full; nothing changed.
    Ignored,
}

/// Ordered set of selected item identifiers.
///
/// Invariants: `len() <= capacity()`, no duplicates, insertion order preserved.
/// Membership carries no history: removing and re-adding an item is a fresh entry.
#[derive(Debug, Clone)]
pub struct SelectionSet {
    capacity: usize,
    order: Vec<ItemId>,
    members: HashSet<ItemId>,
}

impl SelectionSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: Vec::with_capacity(capacity),
            members: HashSet::with_capacity(capacity),
        }
    }

    /// Remove `item` if present, otherwise append it when there is room.
    ///
    /// Adding to a full set is a silent no-op; callers are expected to disable the
    /// action but the call is always safe.
    pub fn toggle(&mut self, item: &ItemId) -> ToggleOutcome {
        if self.members.remove(item) {
            self.order.retain(|id| id != item);
            return ToggleOutcome::Removed;
        }
        if self.is_full() {
            return ToggleOutcome::Ignored;
        }
        self.members.insert(item.clone());
        self.order.push(item.clone());
        ToggleOutcome::Added
    }

    pub fn contains(&self, item: &ItemId) -> bool {
        self.members.contains(item)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.order.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn items(&self) -> &[ItemId] {
        &self.order
    }

    /// Empty the selection, returning the removed identifiers in order.
    pub fn clear(&mut self) -> Vec<ItemId> {
        self.members.clear();
        std::mem::take(&mut self.order)
    }
}

impl Default for SelectionSet {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
