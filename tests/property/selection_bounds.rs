//! Selection capacity and ordering invariants under arbitrary toggles.

use proptest::prelude::*;
use skillwright::catalog::ItemId;
use skillwright::selection::{SelectionSet, ToggleOutcome};
use std::collections::HashSet;

fn ids() -> impl Strategy<Value = Vec<ItemId>> {
    prop::collection::vec((0u8..8).prop_map(|n| ItemId::new(format!("app-{}", n))), 0..64)
}

proptest! {
    #[test]
    fn prop_size_never_exceeds_capacity(capacity in 1usize..5, toggles in ids()) {
        let mut set = SelectionSet::new(capacity);
        for id in &toggles {
            let was_full = set.is_full();
            let was_member = set.contains(id);
            let outcome = set.toggle(id);

            prop_assert!(set.len() <= capacity);
            let unique: HashSet<&ItemId> = set.items().iter().collect();
            prop_assert_eq!(unique.len(), set.len());
            if !was_member && was_full {
                prop_assert_eq!(outcome, ToggleOutcome::Ignored);
            }
        }
    }

    #[test]
    fn prop_add_then_remove_restores_order(capacity in 1usize..5, setup in ids(), probe in 8u8..16) {
        let mut set = SelectionSet::new(capacity);
        for id in &setup {
            set.toggle(id);
        }
        let before = set.items().to_vec();

        let extra = ItemId::new(format!("app-{}", probe));
        if set.toggle(&extra) == ToggleOutcome::Added {
            prop_assert_eq!(set.toggle(&extra), ToggleOutcome::Removed);
        }
        prop_assert_eq!(set.items(), before.as_slice());
    }
}
