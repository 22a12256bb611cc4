//! Integration tests for arbitration and chaining

use catode::behaviors::{Behavior, BehaviorContext, BehaviorKind};
use catode::core::config::EngineConfig;
use catode::entity::pose::PoseState;
use catode::entity::stats::{Stat, StatStore};
use catode::simulation::arbitrator::select_next;
use catode::simulation::creature::{BehaviorEvent, Creature};
use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const DT: f32 = 1.0 / 12.0;

#[test]
fn test_tie_between_investigating_and_observing() {
    let stats = StatStore::new()
        .with(Stat::Curiosity, 85.0)
        .with(Stat::Comfort, 60.0);
    for seed in 0..100 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let pick = select_next(&stats, &mut rng, true);
        assert!(
            matches!(pick, Some(BehaviorKind::Investigating | BehaviorKind::Observing)),
            "seed {} picked {:?}",
            seed,
            pick
        );
    }
}

#[test]
fn test_idle_ending_with_low_energy_selects_sleeping() {
    let stats = StatStore::new()
        .with(Stat::Energy, 20.0)
        .with(Stat::Playfulness, 50.0);
    let mut creature = Creature::with_stats(stats, EngineConfig::default(), 77);
    creature.drain_events();

    while creature.current_kind() == Some(BehaviorKind::Idle) {
        creature.update(DT);
    }

    assert_eq!(creature.current_kind(), Some(BehaviorKind::Sleeping));
    let events = creature.drain_events();
    assert!(events.contains(&BehaviorEvent::Chained {
        from: BehaviorKind::Idle,
        to: BehaviorKind::Sleeping,
    }));
}

fn finish_stretch(rng: &mut StepRng) -> Option<BehaviorKind> {
    let mut stats = StatStore::new().with(Stat::Comfort, 20.0);
    let mut pose = PoseState::default();
    let config = EngineConfig::default();
    let mut ctx = BehaviorContext {
        stats: &mut stats,
        pose: &mut pose,
        rng,
        config: &config,
    };

    let mut stretch = Behavior::new(BehaviorKind::Stretching);
    stretch.start(&mut ctx);
    let outcome = loop {
        stretch.apply_stat_effects(ctx.stats, DT);
        if let Some(outcome) = stretch.update(DT, &mut ctx) {
            break outcome;
        }
    };
    assert!(outcome.completed);
    stretch.next_behavior(&mut ctx)
}

#[test]
fn test_stretching_low_roll_always_kneads() {
    // Every draw is zero, far under the 20% cut
    let mut rng = StepRng::new(0, 0);
    for _ in 0..100 {
        assert_eq!(finish_stretch(&mut rng), Some(BehaviorKind::Kneading));
    }
}

#[test]
fn test_stretching_high_roll_falls_back_to_idle() {
    // Every draw is the maximum, never under the 20% cut
    let mut rng = StepRng::new(u64::MAX, 0);
    for _ in 0..100 {
        assert_eq!(finish_stretch(&mut rng), None);
    }
}

#[test]
fn test_creature_chains_stretch_into_knead() {
    let mut creature = Creature::with_rng(StatStore::new(), EngineConfig::default(), StepRng::new(0, 0));
    creature.trigger(Behavior::new(BehaviorKind::Stretching));
    for _ in 0..(5.5 / DT) as usize {
        creature.update(DT);
    }
    assert_eq!(creature.current_kind(), Some(BehaviorKind::Kneading));
}

#[test]
fn test_chained_successor_not_revalidated() {
    // Fully rested, yet sleeping still hands over to stretching
    let stats = StatStore::with_default(100.0);
    let mut creature = Creature::with_stats(stats, EngineConfig::default(), 2);
    creature.trigger(Behavior::new(BehaviorKind::Sleeping));
    assert!(!BehaviorKind::Stretching.can_trigger(creature.stats()));

    while creature.current_kind() == Some(BehaviorKind::Sleeping) {
        creature.update(DT);
    }
    assert_eq!(creature.current_kind(), Some(BehaviorKind::Stretching));
}

#[test]
fn test_long_run_never_leaves_creature_empty() {
    let mut creature = Creature::new(2024);
    for _ in 0..(600.0 / DT) as usize {
        creature.update(DT);
        let current = creature.current().expect("always hosting a behavior");
        assert!(current.is_active());
    }
}
