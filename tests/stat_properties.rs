//! Property tests for the stat store

use catode::entity::stats::{Stat, StatStore, STAT_MAX, STAT_MIN};
use proptest::prelude::*;

fn any_stat() -> impl Strategy<Value = Stat> {
    (0..Stat::COUNT).prop_map(|i| Stat::ALL[i])
}

proptest! {
    #[test]
    fn add_always_lands_in_range(stat in any_stat(), start in -500.0f32..500.0, delta in -1.0e6f32..1.0e6) {
        let mut store = StatStore::new();
        store.set_stat(stat, start);
        store.add_stat(stat, delta);
        let value = store.get_stat(stat);
        prop_assert!((STAT_MIN..=STAT_MAX).contains(&value));
    }

    #[test]
    fn named_add_matches_typed_add(stat in any_stat(), delta in -200.0f32..200.0) {
        let mut by_name = StatStore::new();
        let mut typed = StatStore::new();
        by_name.add(stat.as_str(), delta);
        typed.add_stat(stat, delta);
        prop_assert_eq!(by_name, typed);
    }

    #[test]
    fn unknown_names_read_default(name in "[a-z]{3,12}", delta in -100.0f32..100.0) {
        prop_assume!(Stat::from_name(&name).is_none());
        let mut store = StatStore::new();
        store.add(&name, delta);
        prop_assert_eq!(store.get(&name), 50.0);
        prop_assert_eq!(store, StatStore::new());
    }
}
