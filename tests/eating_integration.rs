//! Integration tests for meals and the food bowl

use catode::behaviors::{BehaviorKind, Meal};
use catode::core::config::BowlMetrics;
use catode::core::types::Vec2;
use catode::entity::stats::Stat;
use catode::simulation::creature::{BehaviorEvent, Creature};
use catode::simulation::interaction::PlayerAction;

const DT: f32 = 1.0 / 12.0;

fn eat(meal: Meal) -> Creature {
    let mut creature = Creature::new(12);
    creature.apply_action(PlayerAction::Meal(meal));
    while creature.current_kind() == Some(BehaviorKind::Eating) {
        creature.update(DT);
    }
    creature
}

#[test]
fn test_chicken_adds_fullness_and_energy() {
    let creature = eat(Meal::Chicken);
    assert_eq!(creature.stats().get_stat(Stat::Fullness), 80.0);
    assert_eq!(creature.stats().get_stat(Stat::Energy), 60.0);
}

#[test]
fn test_fish_adds_affection() {
    let creature = eat(Meal::Fish);
    assert_eq!(creature.stats().get_stat(Stat::Fullness), 75.0);
    assert_eq!(creature.stats().get_stat(Stat::Affection), 55.0);
}

#[test]
fn test_other_meal_plain_fullness() {
    let creature = eat(Meal::Other("tuna".into()));
    assert_eq!(creature.stats().get_stat(Stat::Fullness), 70.0);
    assert_eq!(creature.stats().get_stat(Stat::Energy), 50.0);
}

#[test]
fn test_interrupted_meal_gives_nothing() {
    let mut creature = Creature::new(4);
    creature.apply_action(PlayerAction::Meal(Meal::Chicken));
    for _ in 0..(6.0 / DT) as usize {
        creature.update(DT);
    }
    creature.apply_action(PlayerAction::Pets);
    assert_eq!(creature.stats().get_stat(Stat::Fullness), 50.0);
    assert_eq!(creature.stats().get_stat(Stat::Energy), 50.0);
}

#[test]
fn test_meal_phases_and_bowl() {
    let mut creature = Creature::new(5);
    creature.apply_action(PlayerAction::Meal(Meal::Fish));
    creature.drain_events();

    let anchor = Vec2::new(120.0, 100.0);
    let eating = creature.current().and_then(|b| b.eating_state()).unwrap();
    let (_, start_y) = eating.bowl_position(anchor, false);
    assert_eq!(start_y, 100 - 8 - 40);

    let mut phases = Vec::new();
    let mut max_frame = 0;
    while creature.current_kind() == Some(BehaviorKind::Eating) {
        creature.update(DT);
        if let Some(eating) = creature.current().and_then(|b| b.eating_state()) {
            max_frame = max_frame.max(eating.bowl_frame());
        }
        for event in creature.drain_events() {
            if let BehaviorEvent::PhaseChanged { phase, .. } = event {
                phases.push(phase);
            }
        }
    }

    assert_eq!(phases, vec!["pre_eating", "eating", "post_eating"]);
    assert_eq!(max_frame, BowlMetrics::default().frame_count - 1);
}
