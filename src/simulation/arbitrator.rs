//! Behavior arbitration - picks what the creature does after idling

use crate::behaviors::catalog::BehaviorKind;
use crate::core::types::Priority;
use crate::entity::stats::StatStore;
use rand::seq::SliceRandom;
use rand::Rng;

/// Every auto-selectable type whose trigger holds, with its priority
pub fn eligible(stats: &StatStore, exclude_idle: bool) -> Vec<(BehaviorKind, Priority)> {
    let idle = (!exclude_idle).then_some(BehaviorKind::Idle);
    BehaviorKind::AUTO_CANDIDATES
        .iter()
        .copied()
        .chain(idle)
        .filter(|kind| kind.can_trigger(stats))
        .map(|kind| (kind, kind.priority()))
        .collect()
}

/// Choose the next behavior type
///
/// Keeps only the triggering candidates sharing the lowest priority number
/// and picks one of them uniformly. `None` means nothing triggered and the
/// caller falls back to idle.
pub fn select_next<R: Rng + ?Sized>(
    stats: &StatStore,
    rng: &mut R,
    exclude_idle: bool,
) -> Option<BehaviorKind> {
    let candidates = eligible(stats, exclude_idle);
    let best = candidates.iter().map(|(_, priority)| *priority).min()?;
    let tied: Vec<BehaviorKind> = candidates
        .into_iter()
        .filter(|(_, priority)| *priority == best)
        .map(|(kind, _)| kind)
        .collect();

    let chosen = tied.choose(rng).copied();
    tracing::trace!(?tied, ?chosen, "arbitration");
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::stats::Stat;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Comfortable, rested, clean and uninterested: only lounging holds
    fn calm() -> StatStore {
        StatStore::new().with(Stat::Comfort, 60.0)
    }

    #[test]
    fn test_lounging_is_the_floor() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(
            select_next(&calm(), &mut rng, true),
            Some(BehaviorKind::Lounging)
        );
    }

    #[test]
    fn test_tired_cat_sleeps() {
        let stats = calm().with(Stat::Energy, 20.0).with(Stat::Playfulness, 50.0);
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            assert_eq!(select_next(&stats, &mut rng, true), Some(BehaviorKind::Sleeping));
        }
    }

    #[test]
    fn test_tie_picks_within_group() {
        let stats = calm().with(Stat::Curiosity, 80.0);
        let mut seen = Vec::new();
        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let pick = select_next(&stats, &mut rng, true).unwrap();
            assert!(matches!(
                pick,
                BehaviorKind::Investigating | BehaviorKind::Observing
            ));
            if !seen.contains(&pick) {
                seen.push(pick);
            }
        }
        assert_eq!(seen.len(), 2, "both tied candidates should come up");
    }

    #[test]
    fn test_same_seed_same_pick() {
        let stats = calm().with(Stat::Curiosity, 80.0);
        let a = select_next(&stats, &mut ChaCha8Rng::seed_from_u64(11), true);
        let b = select_next(&stats, &mut ChaCha8Rng::seed_from_u64(11), true);
        assert_eq!(a, b);
    }

    #[test]
    fn test_idle_only_when_included() {
        let stats = calm();
        let with_idle = eligible(&stats, false);
        assert!(with_idle.contains(&(BehaviorKind::Idle, 100)));
        assert!(!eligible(&stats, true)
            .iter()
            .any(|(k, _)| *k == BehaviorKind::Idle));
        // Lounging still outranks idle
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(select_next(&stats, &mut rng, false), Some(BehaviorKind::Lounging));
    }

    #[test]
    fn test_player_only_types_never_selected() {
        let player_only = [
            BehaviorKind::Eating,
            BehaviorKind::BeingGroomed,
            BehaviorKind::Affection,
            BehaviorKind::Attention,
            BehaviorKind::Snacking,
            BehaviorKind::Chattering,
            BehaviorKind::Kneading,
        ];
        let extremes = [StatStore::with_default(0.0), StatStore::with_default(100.0)];
        for stats in &extremes {
            for (kind, _) in eligible(stats, false) {
                assert!(!player_only.contains(&kind), "{} was eligible", kind);
            }
        }
    }
}
