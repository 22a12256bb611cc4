//! The creature that hosts one active behavior at a time

use crate::behaviors::behavior::{Behavior, BehaviorContext, BehaviorOutcome};
use crate::behaviors::catalog::BehaviorKind;
use crate::behaviors::effects::{self, Glyph, Renderer};
use crate::core::config::{self, EngineConfig};
use crate::core::types::{Seconds, Vec2};
use crate::entity::pose::PoseState;
use crate::entity::stats::StatStore;
use crate::simulation::interaction::PlayerAction;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Lifecycle notifications for the scene layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BehaviorEvent {
    Started {
        kind: BehaviorKind,
    },
    PhaseChanged {
        kind: BehaviorKind,
        phase: &'static str,
    },
    Finished {
        kind: BehaviorKind,
        completed: bool,
        progress: f32,
    },
    Chained {
        from: BehaviorKind,
        to: BehaviorKind,
    },
}

impl From<BehaviorOutcome> for BehaviorEvent {
    fn from(outcome: BehaviorOutcome) -> Self {
        BehaviorEvent::Finished {
            kind: outcome.kind,
            completed: outcome.completed,
            progress: outcome.progress,
        }
    }
}

/// A companion creature driving its stats and pose through behaviors
pub struct Creature<R: RngCore = ChaCha8Rng> {
    stats: StatStore,
    pose: PoseState,
    current: Option<Behavior>,
    rng: R,
    config: EngineConfig,
    events: Vec<BehaviorEvent>,
}

impl Creature<ChaCha8Rng> {
    /// Neutral stats, global config, seeded randomness
    pub fn new(seed: u64) -> Self {
        Self::with_stats(StatStore::new(), config::config().clone(), seed)
    }

    pub fn with_stats(stats: StatStore, config: EngineConfig, seed: u64) -> Self {
        Self::with_rng(stats, config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: RngCore> Creature<R> {
    /// Spawn idling with an explicit random source
    pub fn with_rng(stats: StatStore, config: EngineConfig, rng: R) -> Self {
        let mut creature = Self {
            stats,
            pose: PoseState::default(),
            current: None,
            rng,
            config,
            events: Vec::new(),
        };
        creature.install(Self::make_idle_behavior());
        creature
    }

    /// A fresh idle behavior, the fallback after every chain that names nothing
    pub fn make_idle_behavior() -> Behavior {
        Behavior::new(BehaviorKind::Idle)
    }

    pub fn stats(&self) -> &StatStore {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut StatStore {
        &mut self.stats
    }

    pub fn pose(&self) -> &'static str {
        self.pose.current()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn current(&self) -> Option<&Behavior> {
        self.current.as_ref()
    }

    pub fn current_kind(&self) -> Option<BehaviorKind> {
        self.current.as_ref().map(Behavior::kind)
    }

    /// Take all events since the last drain
    pub fn drain_events(&mut self) -> Vec<BehaviorEvent> {
        std::mem::take(&mut self.events)
    }

    fn ctx(&mut self) -> BehaviorContext<'_> {
        BehaviorContext {
            stats: &mut self.stats,
            pose: &mut self.pose,
            rng: &mut self.rng,
            config: &self.config,
        }
    }

    /// Replace the current behavior, interrupting it without bonuses
    pub fn trigger(&mut self, behavior: Behavior) {
        if let Some(mut old) = self.current.take() {
            if let Some(outcome) = old.stop(false, &mut self.ctx()) {
                tracing::debug!(from = %outcome.kind, to = %behavior.kind(), "behavior interrupted");
                self.events.push(outcome.into());
            }
        }
        self.install(behavior);
    }

    /// Trigger the behavior a player action maps to
    pub fn apply_action(&mut self, action: PlayerAction) {
        let behavior = action.into_behavior(self.config.default_bowl);
        self.trigger(behavior);
    }

    fn install(&mut self, mut behavior: Behavior) {
        if behavior.start(&mut self.ctx()) {
            self.events.push(BehaviorEvent::Started {
                kind: behavior.kind(),
            });
        }
        self.current = Some(behavior);
    }

    /// Advance one frame: stat effects, then the phase machine, then chaining
    pub fn update(&mut self, dt: Seconds) {
        // min/max ignore a NaN bound where clamp would panic
        let dt = if dt.is_finite() {
            dt.max(0.0).min(self.config.max_frame_delta)
        } else {
            0.0
        };
        let Some(mut behavior) = self.current.take() else {
            return;
        };

        let phase_before = behavior.phase();
        let outcome = {
            let mut ctx = self.ctx();
            behavior.apply_stat_effects(ctx.stats, dt);
            behavior.update(dt, &mut ctx)
        };

        match outcome {
            Some(outcome) => {
                self.events.push(outcome.into());
                self.chain(behavior, outcome);
            }
            None => {
                if let Some(phase) = behavior.phase().filter(|p| Some(*p) != phase_before) {
                    self.events.push(BehaviorEvent::PhaseChanged {
                        kind: behavior.kind(),
                        phase,
                    });
                }
                self.current = Some(behavior);
            }
        }
    }

    /// Install the finished behavior's successor, or idle when it names none
    fn chain(&mut self, finished: Behavior, outcome: BehaviorOutcome) {
        let next = finished.next_behavior(&mut self.ctx());
        drop(finished);

        let successor = match next {
            Some(kind) => Behavior::new(kind),
            None => Self::make_idle_behavior(),
        };
        tracing::debug!(from = %outcome.kind, to = %successor.kind(), "chaining");
        self.events.push(BehaviorEvent::Chained {
            from: outcome.kind,
            to: successor.kind(),
        });
        self.install(successor);
    }

    pub fn effect_glyphs(&self, center: Vec2, mirrored: bool) -> Vec<Glyph> {
        match &self.current {
            Some(behavior) => effects::effect_glyphs(behavior, center, mirrored),
            None => Vec::new(),
        }
    }

    pub fn draw_effects(&self, renderer: &mut dyn Renderer, center: Vec2, mirrored: bool) {
        if let Some(behavior) = &self.current {
            effects::draw_effects(behavior, renderer, center, mirrored);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::stats::Stat;

    fn step(creature: &mut Creature, seconds: f32) {
        let dt = creature.config().frame_delta();
        let frames = (seconds / dt).ceil() as usize;
        for _ in 0..frames {
            creature.update(dt);
        }
    }

    #[test]
    fn test_spawns_idle() {
        let mut creature = Creature::new(1);
        assert_eq!(creature.current_kind(), Some(BehaviorKind::Idle));
        assert!(creature.current().unwrap().is_active());
        assert_eq!(
            creature.drain_events(),
            vec![BehaviorEvent::Started { kind: BehaviorKind::Idle }]
        );
        assert!(creature.drain_events().is_empty());
    }

    #[test]
    fn test_trigger_interrupts() {
        let mut creature = Creature::new(2);
        step(&mut creature, 1.0);
        creature.drain_events();

        creature.trigger(Behavior::new(BehaviorKind::BeingGroomed));
        let events = creature.drain_events();
        assert!(matches!(
            events[0],
            BehaviorEvent::Finished { kind: BehaviorKind::Idle, completed: false, .. }
        ));
        assert_eq!(events[1], BehaviorEvent::Started { kind: BehaviorKind::BeingGroomed });
        assert_eq!(creature.pose(), "sitting.forward.neutral");
    }

    #[test]
    fn test_snack_chains_to_idle() {
        let mut creature = Creature::new(3);
        creature.apply_action(PlayerAction::Treat);
        step(&mut creature, 2.5);

        let events = creature.drain_events();
        assert!(events.contains(&BehaviorEvent::Chained {
            from: BehaviorKind::Snacking,
            to: BehaviorKind::Idle,
        }));
        assert_eq!(creature.current_kind(), Some(BehaviorKind::Idle));
    }

    #[test]
    fn test_sleep_chains_to_stretch() {
        let stats = StatStore::new().with(Stat::Energy, 10.0);
        let mut creature = Creature::with_stats(stats, EngineConfig::default(), 4);
        creature.trigger(Behavior::new(BehaviorKind::Sleeping));
        step(&mut creature, 54.0);

        assert_eq!(creature.current_kind(), Some(BehaviorKind::Stretching));
        let events = creature.drain_events();
        assert!(events.contains(&BehaviorEvent::PhaseChanged {
            kind: BehaviorKind::Sleeping,
            phase: "waking",
        }));
    }

    #[test]
    fn test_idle_hands_over_to_arbitration() {
        let stats = StatStore::new().with(Stat::Energy, 20.0).with(Stat::Playfulness, 50.0);
        let mut creature = Creature::with_stats(stats, EngineConfig::default(), 5);
        step(&mut creature, 15.1);
        assert_eq!(creature.current_kind(), Some(BehaviorKind::Sleeping));
    }

    #[test]
    fn test_large_frame_is_clamped() {
        let mut creature = Creature::new(6);
        creature.apply_action(PlayerAction::Pets);
        // A stalled 10s frame must not finish a 2s reaction in one go
        creature.update(10.0);
        assert_eq!(creature.current_kind(), Some(BehaviorKind::Affection));
    }

    #[test]
    fn test_unvalidated_nan_frame_cap_does_not_panic() {
        let config = EngineConfig {
            max_frame_delta: f32::NAN,
            ..EngineConfig::default()
        };
        let mut creature = Creature::with_stats(StatStore::new(), config, 8);
        creature.update(1.0 / 12.0);
        creature.update(f32::NAN);
        assert_eq!(creature.current_kind(), Some(BehaviorKind::Idle));
        assert!(creature.current().unwrap().phase_timer() > 0.0);
    }

    #[test]
    fn test_effects_passthrough() {
        let mut creature = Creature::new(7);
        assert!(creature.effect_glyphs(Vec2::new(50.0, 50.0), false).is_empty());
        creature.apply_action(PlayerAction::Psst);
        let glyphs = creature.effect_glyphs(Vec2::new(50.0, 50.0), false);
        assert_eq!(glyphs.len(), 1);
        assert_eq!(glyphs[0].text, "?");
    }
}
