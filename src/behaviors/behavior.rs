//! Runtime behavior instances and their phase machines
//!
//! A `Behavior` is created right before use, started once, updated every
//! frame while active and stopped exactly once, either by running out its
//! last phase or by being interrupted.

use crate::behaviors::catalog::{BehaviorDescriptor, BehaviorKind, PhaseEnd, PhasePose, PhaseSpec};
use crate::behaviors::variant::{self, Meal, Reaction, Variant};
use crate::core::config::{BowlMetrics, EngineConfig};
use crate::core::types::{Priority, Seconds, Vec2};
use crate::entity::pose::PoseState;
use crate::entity::stats::{Stat, StatStore};
use crate::simulation::arbitrator;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds the bowl takes to drop into place
const BOWL_DROP_TIME: Seconds = 0.5;

/// Everything a behavior may touch while it runs
pub struct BehaviorContext<'a> {
    pub stats: &'a mut StatStore,
    pub pose: &'a mut PoseState,
    pub rng: &'a mut dyn RngCore,
    pub config: &'a EngineConfig,
}

/// Result of a behavior's single `stop`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BehaviorOutcome {
    pub kind: BehaviorKind,
    pub completed: bool,
    pub progress: f32,
}

/// Called once when the behavior stops
pub type CompletionHook = Box<dyn FnOnce(&BehaviorOutcome)>;

/// Bowl animation state while eating
#[derive(Debug, Clone, PartialEq)]
pub struct EatingState {
    pub meal: Option<Meal>,
    pub bowl: BowlMetrics,
    bowl_frame: f32,
    bowl_drop: f32,
}

impl EatingState {
    /// Frame to draw, clamped to the bowl's last frame
    pub fn bowl_frame(&self) -> u32 {
        (self.bowl_frame as u32).min(self.bowl.frame_count.saturating_sub(1))
    }

    /// 0.0 = bowl still above the cat, 1.0 = on the floor
    pub fn bowl_drop(&self) -> f32 {
        self.bowl_drop
    }

    /// Top-left of the bowl sprite for a character anchored at `anchor`
    pub fn bowl_position(&self, anchor: Vec2, mirrored: bool) -> (i32, i32) {
        let ground_y = anchor.y as i32 - self.bowl.height;
        let start_y = ground_y - 40;
        let y = (start_y as f32 + (ground_y - start_y) as f32 * self.bowl_drop) as i32;
        let x = if mirrored {
            anchor.x as i32 + 30 - self.bowl.width / 2
        } else {
            anchor.x as i32 - 30 - self.bowl.width / 2
        };
        (x, y)
    }
}

/// Per-type state that the descriptor tables can't hold
#[derive(Debug, Clone, PartialEq)]
enum TypeState {
    Plain,
    Reaction(Reaction),
    Playing { bubble: bool },
    Eating(EatingState),
    Idle { until_pose_change: Seconds },
}

pub struct Behavior {
    kind: BehaviorKind,
    variant: Option<Variant>,
    active: bool,
    phase: Option<usize>,
    phase_timer: Seconds,
    progress: f32,
    pose_before: Option<&'static str>,
    picked_pose: Option<&'static str>,
    state: TypeState,
    on_complete: Option<CompletionHook>,
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Behavior")
            .field("kind", &self.kind)
            .field("variant", &self.variant)
            .field("active", &self.active)
            .field("phase", &self.phase())
            .field("phase_timer", &self.phase_timer)
            .field("progress", &self.progress)
            .field("state", &self.state)
            .field("has_hook", &self.on_complete.is_some())
            .finish()
    }
}

impl Behavior {
    pub fn new(kind: BehaviorKind) -> Self {
        Self {
            kind,
            variant: None,
            active: false,
            phase: None,
            phase_timer: 0.0,
            progress: 0.0,
            pose_before: None,
            picked_pose: None,
            state: TypeState::Plain,
            on_complete: None,
        }
    }

    pub fn with_variant(kind: BehaviorKind, variant: Variant) -> Self {
        let mut behavior = Self::new(kind);
        behavior.variant = Some(variant);
        behavior
    }

    /// Eating with an explicit bowl sprite
    pub fn eating(meal: Meal, bowl: BowlMetrics) -> Self {
        let mut behavior = Self::with_variant(BehaviorKind::Eating, Variant::Meal(meal.clone()));
        behavior.state = TypeState::Eating(EatingState {
            meal: Some(meal),
            bowl,
            bowl_frame: 0.0,
            bowl_drop: 0.0,
        });
        behavior
    }

    pub fn with_on_complete(mut self, hook: impl FnOnce(&BehaviorOutcome) + 'static) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    pub fn kind(&self) -> BehaviorKind {
        self.kind
    }

    pub fn descriptor(&self) -> &'static BehaviorDescriptor {
        self.kind.descriptor()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn priority(&self) -> Priority {
        self.kind.priority()
    }

    pub fn variant(&self) -> Option<&Variant> {
        self.variant.as_ref()
    }

    pub fn can_trigger(&self, stats: &StatStore) -> bool {
        self.kind.can_trigger(stats)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn phase(&self) -> Option<&'static str> {
        self.phase.map(|i| self.descriptor().phases[i].name)
    }

    pub fn phase_timer(&self) -> Seconds {
        self.phase_timer
    }

    /// Playing shows a "!" bubble while excited about a toy
    pub fn has_bubble(&self) -> bool {
        matches!(self.state, TypeState::Playing { bubble: true })
    }

    /// Bowl state, present only for eating
    pub fn eating_state(&self) -> Option<&EatingState> {
        match &self.state {
            TypeState::Eating(eating) => Some(eating),
            _ => None,
        }
    }

    /// Begin the behavior. Returns false if it was already running.
    pub fn start(&mut self, ctx: &mut BehaviorContext<'_>) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.phase_timer = 0.0;
        self.progress = 0.0;
        self.pose_before = Some(ctx.pose.current());
        self.phase = Some(0);
        self.init_state(ctx);

        let opening = self.descriptor().phases[0];
        self.enter_phase_pose(&opening, ctx);
        tracing::debug!(behavior = self.name(), variant = ?self.variant, "behavior started");
        true
    }

    fn init_state(&mut self, ctx: &mut BehaviorContext<'_>) {
        let pool = self.descriptor().pose_pool;
        self.picked_pose = pool.choose(&mut *ctx.rng).copied();

        self.state = match self.kind {
            BehaviorKind::Affection => {
                let reaction = match self.variant {
                    Some(Variant::Kiss) => variant::KISS,
                    _ => variant::PETS,
                };
                apply_deltas(ctx.stats, reaction.deltas);
                TypeState::Reaction(reaction)
            }
            BehaviorKind::Attention => {
                let reaction = match self.variant {
                    Some(Variant::PointBird) => variant::POINT_BIRD,
                    _ => variant::PSST,
                };
                apply_deltas(ctx.stats, reaction.deltas);
                TypeState::Reaction(reaction)
            }
            BehaviorKind::Snacking => {
                let deltas = match self.variant {
                    Some(Variant::Treat) => variant::TREAT,
                    _ => variant::KIBBLE,
                };
                apply_deltas(ctx.stats, deltas);
                TypeState::Plain
            }
            BehaviorKind::Playing => {
                let toy = matches!(self.variant, Some(Variant::Toy));
                if toy {
                    apply_deltas(ctx.stats, variant::TOY);
                }
                TypeState::Playing { bubble: toy }
            }
            BehaviorKind::Eating => {
                let (meal, bowl) = match &self.state {
                    TypeState::Eating(eating) => (eating.meal.clone(), eating.bowl),
                    _ => {
                        let meal = match &self.variant {
                            Some(Variant::Meal(meal)) => Some(meal.clone()),
                            _ => None,
                        };
                        (meal, ctx.config.default_bowl)
                    }
                };
                TypeState::Eating(EatingState {
                    meal,
                    bowl,
                    bowl_frame: 0.0,
                    bowl_drop: 0.0,
                })
            }
            BehaviorKind::Idle => TypeState::Idle {
                until_pose_change: idle_hold(ctx),
            },
            _ => TypeState::Plain,
        };
    }

    fn enter_phase_pose(&self, spec: &PhaseSpec, ctx: &mut BehaviorContext<'_>) {
        let pose = match spec.pose {
            PhasePose::Keep => None,
            PhasePose::Set(pose) => Some(pose),
            PhasePose::Picked => self.picked_pose,
            PhasePose::ByVariant => match &self.state {
                TypeState::Reaction(reaction) => Some(reaction.pose),
                _ => None,
            },
        };
        if let Some(pose) = pose {
            ctx.pose.set(pose);
        }
    }

    /// Continuous per-frame stat effects; call before `update`
    pub fn apply_stat_effects(&self, stats: &mut StatStore, dt: Seconds) {
        if !self.active {
            return;
        }
        for effect in self.descriptor().effects {
            stats.add_stat(effect.stat, effect.amount * dt);
        }
    }

    /// Advance the phase machine. Returns the outcome if this frame ended it.
    pub fn update(&mut self, dt: Seconds, ctx: &mut BehaviorContext<'_>) -> Option<BehaviorOutcome> {
        if !self.active {
            return None;
        }
        let index = self.phase?;
        let phases = self.descriptor().phases;
        let spec = phases[index];
        self.phase_timer += dt;

        self.tick_state(&spec, dt, ctx);

        let length = self.phase_length(&spec, ctx.config);
        if spec.tracks_progress {
            self.progress = match spec.end {
                PhaseEnd::BowlEmptied => self.bowl_progress(),
                _ => (self.phase_timer / length).min(1.0),
            };
        }

        let finished = match spec.end {
            PhaseEnd::BowlEmptied => self.bowl_progress() >= 1.0,
            _ => self.phase_timer >= length,
        };
        if !finished {
            return None;
        }

        match phases.get(index + 1) {
            Some(next) => {
                self.leave_phase(&spec);
                self.phase = Some(index + 1);
                self.phase_timer = 0.0;
                self.enter_phase_pose(next, ctx);
                tracing::debug!(behavior = self.name(), phase = next.name, "phase changed");
                None
            }
            None => self.stop(true, ctx),
        }
    }

    fn tick_state(&mut self, spec: &PhaseSpec, dt: Seconds, ctx: &mut BehaviorContext<'_>) {
        let timer = self.phase_timer;
        let pool = self.descriptor().pose_pool;
        match &mut self.state {
            TypeState::Idle { until_pose_change } => {
                *until_pose_change -= dt;
                if *until_pose_change <= 0.0 {
                    *until_pose_change = idle_hold(ctx);
                    if let Some(pose) = pool.choose(&mut *ctx.rng).copied() {
                        ctx.pose.set(pose);
                        tracing::trace!(pose, "idle pose changed");
                    }
                }
            }
            TypeState::Eating(eating) => match spec.name {
                "lowering" => eating.bowl_drop = (timer / BOWL_DROP_TIME).min(1.0),
                "eating" => eating.bowl_frame += dt * ctx.config.bowl_frames_per_second,
                _ => {}
            },
            _ => {}
        }
    }

    fn leave_phase(&mut self, spec: &PhaseSpec) {
        if spec.name == "excited" {
            if let TypeState::Playing { bubble } = &mut self.state {
                *bubble = false;
            }
        }
    }

    fn phase_length(&self, spec: &PhaseSpec, config: &EngineConfig) -> Seconds {
        match spec.end {
            PhaseEnd::After(secs) => secs,
            PhaseEnd::ReactionTime => match &self.state {
                TypeState::Reaction(reaction) => reaction.duration,
                _ => 0.0,
            },
            PhaseEnd::IdleCheck => config.idle_check_interval,
            PhaseEnd::BowlEmptied => f32::INFINITY,
        }
    }

    fn bowl_progress(&self) -> f32 {
        match &self.state {
            // A bowl with no frames is empty from the start
            TypeState::Eating(eating) if eating.bowl.frame_count == 0 => 1.0,
            TypeState::Eating(eating) => {
                (eating.bowl_frame / eating.bowl.frame_count as f32).min(1.0)
            }
            _ => 0.0,
        }
    }

    /// End the behavior. `completed` is false for interruptions, which skip
    /// completion bonuses. Returns `None` if it was not running.
    pub fn stop(&mut self, completed: bool, ctx: &mut BehaviorContext<'_>) -> Option<BehaviorOutcome> {
        if !self.active {
            return None;
        }

        if let TypeState::Eating(eating) = &mut self.state {
            eating.bowl_drop = 1.0;
            if completed {
                if let Some(meal) = &eating.meal {
                    apply_deltas(ctx.stats, meal.stat_deltas());
                }
            }
        }
        if let TypeState::Playing { bubble } = &mut self.state {
            *bubble = false;
        }

        self.active = false;
        self.phase = None;
        self.phase_timer = 0.0;

        if completed {
            if let Some(pose) = self.pose_before {
                ctx.pose.set(pose);
            }
        }
        self.pose_before = None;

        let outcome = BehaviorOutcome {
            kind: self.kind,
            completed,
            progress: self.progress,
        };
        if let Some(hook) = self.on_complete.take() {
            hook(&outcome);
        }

        if completed {
            for bonus in self.descriptor().completion_bonus {
                ctx.stats.add_stat(bonus.stat, bonus.amount * outcome.progress);
            }
        }

        tracing::debug!(
            behavior = self.name(),
            completed,
            progress = outcome.progress,
            "behavior stopped"
        );
        Some(outcome)
    }

    /// Successor after a clean finish. `None` hands over to idle.
    pub fn next_behavior(&self, ctx: &mut BehaviorContext<'_>) -> Option<BehaviorKind> {
        match self.kind {
            BehaviorKind::Sleeping => Some(BehaviorKind::Stretching),
            BehaviorKind::Stretching => {
                if ctx.rng.gen_bool(ctx.config.knead_after_stretch_chance) {
                    Some(BehaviorKind::Kneading)
                } else {
                    None
                }
            }
            BehaviorKind::Idle => arbitrator::select_next(ctx.stats, &mut *ctx.rng, true),
            _ => None,
        }
    }
}

fn apply_deltas(stats: &mut StatStore, deltas: &[(Stat, f32)]) {
    for (stat, delta) in deltas {
        stats.add_stat(*stat, *delta);
    }
}

fn idle_hold(ctx: &mut BehaviorContext<'_>) -> Seconds {
    let spread = ctx.config.idle_pose_hold_spread;
    let extra = if spread == 0 { 0 } else { ctx.rng.gen_range(0..spread) };
    ctx.config.idle_pose_hold_min + extra as f32
}
