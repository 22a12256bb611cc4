//! Behavior definitions and catalog
//!
//! One constant descriptor per behavior type. Thresholds, priorities,
//! phase lengths and stat tables are the tuned feel of the pet and are
//! kept here as plain data.

use crate::core::types::{Priority, Seconds};
use crate::entity::stats::{Stat, StatStore};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique behavior identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorKind {
    Sleeping,
    Eating,
    Napping,
    Vocalizing,
    Zoomies,
    Playing,
    Investigating,
    Observing,
    Chattering,
    SelfGrooming,
    Kneading,
    Stretching,
    BeingGroomed,
    Affection,
    Attention,
    Snacking,
    Lounging,
    Idle,
}

/// Continuous rate (per second) or one-shot total applied to a stat
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatEffect {
    pub stat: Stat,
    pub amount: f32,
}

const fn fx(stat: Stat, amount: f32) -> StatEffect {
    StatEffect { stat, amount }
}

/// Auto-selection predicate over the stat store
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    /// Player-initiated or chained only
    Never,
    /// Ambient, always eligible
    Always,
    Below(Stat, f32),
    Above(Stat, f32),
    AllOf(&'static [Trigger]),
}

impl Trigger {
    pub fn holds(&self, stats: &StatStore) -> bool {
        match self {
            Trigger::Never => false,
            Trigger::Always => true,
            Trigger::Below(stat, threshold) => stats.get_stat(*stat) < *threshold,
            Trigger::Above(stat, threshold) => stats.get_stat(*stat) > *threshold,
            Trigger::AllOf(parts) => parts.iter().all(|t| t.holds(stats)),
        }
    }
}

/// Pose applied when a phase is entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhasePose {
    Keep,
    Set(&'static str),
    /// The pose drawn from the descriptor's pool at start
    Picked,
    /// Decided by the start variant
    ByVariant,
}

/// What ends a phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseEnd {
    After(Seconds),
    /// Reaction length chosen by the start variant
    ReactionTime,
    /// The bowl animation ran past its last frame
    BowlEmptied,
    /// The engine's idle check interval
    IdleCheck,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseSpec {
    pub name: &'static str,
    pub end: PhaseEnd,
    pub pose: PhasePose,
    /// Progress follows this phase's timer
    pub tracks_progress: bool,
}

const fn phase(name: &'static str, secs: Seconds, pose: PhasePose) -> PhaseSpec {
    PhaseSpec {
        name,
        end: PhaseEnd::After(secs),
        pose,
        tracks_progress: false,
    }
}

const fn main_phase(name: &'static str, secs: Seconds, pose: PhasePose) -> PhaseSpec {
    PhaseSpec {
        name,
        end: PhaseEnd::After(secs),
        pose,
        tracks_progress: true,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorDescriptor {
    pub kind: BehaviorKind,
    pub name: &'static str,
    pub trigger: Trigger,
    pub priority: Priority,
    pub effects: &'static [StatEffect],
    pub completion_bonus: &'static [StatEffect],
    pub phases: &'static [PhaseSpec],
    pub pose_pool: &'static [&'static str],
}

use PhasePose::{ByVariant, Keep, Picked, Set};

pub const IDLE_POSES: &[&str] = &[
    "sitting.side.neutral",
    "sitting.side.happy",
    "sitting.side.aloof",
    "sitting.forward.neutral",
    "sitting.forward.happy",
    "sitting.forward.aloof",
    "standing.side.neutral",
    "standing.side.happy",
];

const SLEEPING: BehaviorDescriptor = BehaviorDescriptor {
    kind: BehaviorKind::Sleeping,
    name: "sleeping",
    trigger: Trigger::Below(Stat::Energy, 30.0),
    priority: 10,
    effects: &[fx(Stat::Energy, 2.0), fx(Stat::Comfort, 0.2)],
    completion_bonus: &[fx(Stat::Energy, 15.0), fx(Stat::Comfort, 10.0)],
    phases: &[
        phase("considering", 1.0, Set("sitting.side.looking_down")),
        phase("settling", 2.5, Set("leaning_forward.side.neutral")),
        main_phase("sleeping", 45.0, Picked),
        phase("waking", 5.0, Keep),
    ],
    pose_pool: &[
        "sleeping.side.sploot",
        "sleeping.side.modest",
        "sleeping.side.crossed",
    ],
};

const EATING: BehaviorDescriptor = BehaviorDescriptor {
    kind: BehaviorKind::Eating,
    name: "eating",
    trigger: Trigger::Never,
    priority: 10,
    effects: &[],
    // Meal stats depend on the meal and are applied by the eating state
    completion_bonus: &[],
    phases: &[
        phase("lowering", 0.5, Set("standing.side.happy")),
        phase("pre_eating", 1.5, Set("leaning_forward.side.neutral")),
        PhaseSpec {
            name: "eating",
            end: PhaseEnd::BowlEmptied,
            pose: Set("leaning_forward.side.eating"),
            tracks_progress: true,
        },
        phase("post_eating", 1.5, Set("leaning_forward.side.neutral")),
    ],
    pose_pool: &[],
};

const NAPPING: BehaviorDescriptor = BehaviorDescriptor {
    kind: BehaviorKind::Napping,
    name: "napping",
    trigger: Trigger::Below(Stat::Energy, 45.0),
    priority: 20,
    effects: &[fx(Stat::Energy, 1.0), fx(Stat::Focus, 0.5)],
    completion_bonus: &[fx(Stat::Energy, 5.0), fx(Stat::Focus, 5.0)],
    phases: &[
        phase("settling", 1.5, Set("sleeping.side.modest")),
        main_phase("napping", 20.0, Keep),
        phase("waking", 2.0, Keep),
    ],
    pose_pool: &[],
};

const VOCALIZING: BehaviorDescriptor = BehaviorDescriptor {
    kind: BehaviorKind::Vocalizing,
    name: "vocalizing",
    trigger: Trigger::AllOf(&[
        Trigger::Above(Stat::Energy, 60.0),
        Trigger::Above(Stat::Playfulness, 60.0),
    ]),
    priority: 25,
    effects: &[fx(Stat::Energy, -1.0), fx(Stat::Playfulness, -1.5)],
    completion_bonus: &[fx(Stat::Energy, -5.0), fx(Stat::Playfulness, -8.0)],
    phases: &[
        phase("winding_up", 0.5, Set("sitting.forward.aloof")),
        phase("vocalizing", 4.0, Set("sitting.forward.happy")),
        phase("settling", 1.0, Set("sitting.side.neutral")),
    ],
    pose_pool: &[],
};

const ZOOMIES: BehaviorDescriptor = BehaviorDescriptor {
    kind: BehaviorKind::Zoomies,
    name: "zoomies",
    trigger: Trigger::AllOf(&[
        Trigger::Above(Stat::Energy, 70.0),
        Trigger::Above(Stat::Playfulness, 70.0),
    ]),
    priority: 25,
    effects: &[fx(Stat::Energy, -2.0), fx(Stat::Playfulness, -3.0)],
    completion_bonus: &[fx(Stat::Energy, -10.0), fx(Stat::Playfulness, -15.0)],
    phases: &[
        phase("winding_up", 1.0, Set("sitting.side.aloof")),
        main_phase("zooming", 10.0, Set("standing.side.happy")),
        phase("collapsing", 2.0, Set("sitting.side.neutral")),
    ],
    pose_pool: &[],
};

const PLAYING: BehaviorDescriptor = BehaviorDescriptor {
    kind: BehaviorKind::Playing,
    name: "playing",
    trigger: Trigger::Above(Stat::Playfulness, 70.0),
    priority: 30,
    effects: &[fx(Stat::Playfulness, -2.0), fx(Stat::Energy, -0.5)],
    completion_bonus: &[fx(Stat::Playfulness, -25.0), fx(Stat::Fulfillment, 10.0)],
    phases: &[
        phase("excited", 1.0, Set("sitting.side.happy")),
        main_phase("playing", 5.0, Set("standing.side.happy")),
        phase("tired", 1.0, Set("sitting.side.neutral")),
    ],
    pose_pool: &[],
};

const INVESTIGATING: BehaviorDescriptor = BehaviorDescriptor {
    kind: BehaviorKind::Investigating,
    name: "investigating",
    trigger: Trigger::Above(Stat::Curiosity, 70.0),
    priority: 40,
    effects: &[fx(Stat::Curiosity, -1.0)],
    completion_bonus: &[fx(Stat::Curiosity, -20.0), fx(Stat::Fulfillment, 5.0)],
    phases: &[
        phase("approaching", 1.5, Set("standing.side.neutral")),
        phase("sniffing", 4.0, Set("leaning_forward.side.neutral")),
        phase("reacting", 1.5, Set("sitting.side.happy")),
    ],
    pose_pool: &[],
};

const OBSERVING: BehaviorDescriptor = BehaviorDescriptor {
    kind: BehaviorKind::Observing,
    name: "observing",
    trigger: Trigger::Above(Stat::Curiosity, 70.0),
    priority: 40,
    effects: &[fx(Stat::Curiosity, -0.5)],
    completion_bonus: &[fx(Stat::Curiosity, -10.0), fx(Stat::Fulfillment, 3.0)],
    phases: &[
        phase("noticing", 1.0, Set("sitting.side.aloof")),
        phase("watching", 10.0, Keep),
        phase("losing_interest", 2.0, Set("sitting.side.neutral")),
    ],
    pose_pool: &[],
};

const CHATTERING: BehaviorDescriptor = BehaviorDescriptor {
    kind: BehaviorKind::Chattering,
    name: "chattering",
    trigger: Trigger::Never,
    priority: 40,
    effects: &[fx(Stat::Curiosity, -0.5), fx(Stat::Playfulness, 0.5)],
    completion_bonus: &[fx(Stat::Curiosity, -5.0), fx(Stat::Playfulness, 5.0)],
    phases: &[
        phase("chattering", 4.0, Set("sitting.side.aloof")),
        phase("settling", 1.0, Set("sitting.side.neutral")),
    ],
    pose_pool: &[],
};

const SELF_GROOMING: BehaviorDescriptor = BehaviorDescriptor {
    kind: BehaviorKind::SelfGrooming,
    name: "self_grooming",
    trigger: Trigger::AllOf(&[
        Trigger::Below(Stat::Cleanliness, 40.0),
        Trigger::Above(Stat::Energy, 30.0),
    ]),
    priority: 45,
    effects: &[
        fx(Stat::Cleanliness, 0.5),
        fx(Stat::Energy, -0.2),
        fx(Stat::Comfort, -0.1),
        fx(Stat::Focus, -0.2),
    ],
    completion_bonus: &[
        fx(Stat::Cleanliness, 15.0),
        fx(Stat::Grace, 5.0),
        fx(Stat::Sociability, 3.0),
        fx(Stat::Affection, 2.0),
    ],
    phases: &[
        phase("preparing", 1.0, Set("sitting.forward.neutral")),
        main_phase("grooming", 12.0, Set("sitting.side.aloof")),
        phase("finishing", 1.5, Set("sitting.side.happy")),
    ],
    pose_pool: &[],
};

const KNEADING: BehaviorDescriptor = BehaviorDescriptor {
    kind: BehaviorKind::Kneading,
    name: "kneading",
    trigger: Trigger::Never,
    priority: 50,
    effects: &[fx(Stat::Serenity, 0.3), fx(Stat::Comfort, 0.2)],
    completion_bonus: &[fx(Stat::Serenity, 5.0), fx(Stat::Comfort, 3.0)],
    phases: &[
        phase("kneading", 8.0, Set("sitting.forward.happy")),
        phase("settling", 2.0, Set("sitting.side.neutral")),
    ],
    pose_pool: &[],
};

const STRETCHING: BehaviorDescriptor = BehaviorDescriptor {
    kind: BehaviorKind::Stretching,
    name: "stretching",
    trigger: Trigger::Below(Stat::Comfort, 40.0),
    priority: 50,
    effects: &[fx(Stat::Comfort, 1.5)],
    completion_bonus: &[fx(Stat::Comfort, 15.0)],
    phases: &[
        phase("preparing", 0.5, Set("standing.side.neutral")),
        phase("stretching", 3.0, Set("leaning_forward.side.neutral")),
        phase("relaxing", 1.5, Set("sitting.side.happy")),
    ],
    pose_pool: &[],
};

const BEING_GROOMED: BehaviorDescriptor = BehaviorDescriptor {
    kind: BehaviorKind::BeingGroomed,
    name: "being_groomed",
    trigger: Trigger::Never,
    priority: 5,
    effects: &[
        fx(Stat::Cleanliness, 0.5),
        fx(Stat::Affection, 0.3),
        fx(Stat::Patience, 0.2),
        fx(Stat::Focus, -0.3),
    ],
    completion_bonus: &[
        fx(Stat::Cleanliness, 15.0),
        fx(Stat::Affection, 8.0),
        fx(Stat::Grace, 3.0),
        fx(Stat::Sociability, 2.0),
    ],
    phases: &[
        phase("accepting", 1.0, Set("sitting.forward.neutral")),
        main_phase("enjoying", 8.0, Set("sitting.forward.happy")),
        phase("satisfied", 1.5, Set("sitting.side.happy")),
    ],
    pose_pool: &[],
};

const AFFECTION: BehaviorDescriptor = BehaviorDescriptor {
    kind: BehaviorKind::Affection,
    name: "affection",
    trigger: Trigger::Never,
    priority: 5,
    effects: &[],
    completion_bonus: &[],
    phases: &[PhaseSpec {
        name: "reacting",
        end: PhaseEnd::ReactionTime,
        pose: ByVariant,
        tracks_progress: true,
    }],
    pose_pool: &[],
};

const ATTENTION: BehaviorDescriptor = BehaviorDescriptor {
    kind: BehaviorKind::Attention,
    name: "attention",
    trigger: Trigger::Never,
    priority: 5,
    effects: &[],
    completion_bonus: &[],
    phases: &[PhaseSpec {
        name: "reacting",
        end: PhaseEnd::ReactionTime,
        pose: ByVariant,
        tracks_progress: true,
    }],
    pose_pool: &[],
};

const SNACKING: BehaviorDescriptor = BehaviorDescriptor {
    kind: BehaviorKind::Snacking,
    name: "snacking",
    trigger: Trigger::Never,
    priority: 5,
    effects: &[],
    completion_bonus: &[],
    phases: &[phase("reacting", 2.0, Set("sitting.forward.happy"))],
    pose_pool: &[],
};

const LOUNGING: BehaviorDescriptor = BehaviorDescriptor {
    kind: BehaviorKind::Lounging,
    name: "lounging",
    trigger: Trigger::Always,
    priority: 90,
    effects: &[fx(Stat::Comfort, -0.1), fx(Stat::Energy, -0.05)],
    completion_bonus: &[],
    phases: &[
        phase("settling", 1.0, Picked),
        main_phase("lounging", 20.0, Keep),
        phase("rousing", 1.5, Keep),
    ],
    pose_pool: &["sleeping.side.sploot", "sitting.side.aloof"],
};

const IDLE: BehaviorDescriptor = BehaviorDescriptor {
    kind: BehaviorKind::Idle,
    name: "idle",
    trigger: Trigger::Always,
    priority: 100,
    effects: &[
        fx(Stat::Curiosity, 0.1),
        fx(Stat::Energy, -0.1),
        fx(Stat::Fullness, -0.1),
        fx(Stat::Affection, -0.05),
    ],
    completion_bonus: &[],
    phases: &[PhaseSpec {
        name: "idling",
        end: PhaseEnd::IdleCheck,
        pose: Picked,
        tracks_progress: false,
    }],
    pose_pool: IDLE_POSES,
};

impl BehaviorKind {
    pub const ALL: [BehaviorKind; 18] = [
        BehaviorKind::Sleeping,
        BehaviorKind::Eating,
        BehaviorKind::Napping,
        BehaviorKind::Vocalizing,
        BehaviorKind::Zoomies,
        BehaviorKind::Playing,
        BehaviorKind::Investigating,
        BehaviorKind::Observing,
        BehaviorKind::Chattering,
        BehaviorKind::SelfGrooming,
        BehaviorKind::Kneading,
        BehaviorKind::Stretching,
        BehaviorKind::BeingGroomed,
        BehaviorKind::Affection,
        BehaviorKind::Attention,
        BehaviorKind::Snacking,
        BehaviorKind::Lounging,
        BehaviorKind::Idle,
    ];

    /// Types idle considers when it hands over, in evaluation order
    pub const AUTO_CANDIDATES: [BehaviorKind; 10] = [
        BehaviorKind::Sleeping,
        BehaviorKind::Napping,
        BehaviorKind::Zoomies,
        BehaviorKind::Vocalizing,
        BehaviorKind::Playing,
        BehaviorKind::Investigating,
        BehaviorKind::Observing,
        BehaviorKind::SelfGrooming,
        BehaviorKind::Stretching,
        BehaviorKind::Lounging,
    ];

    pub fn descriptor(&self) -> &'static BehaviorDescriptor {
        match self {
            BehaviorKind::Sleeping => &SLEEPING,
            BehaviorKind::Eating => &EATING,
            BehaviorKind::Napping => &NAPPING,
            BehaviorKind::Vocalizing => &VOCALIZING,
            BehaviorKind::Zoomies => &ZOOMIES,
            BehaviorKind::Playing => &PLAYING,
            BehaviorKind::Investigating => &INVESTIGATING,
            BehaviorKind::Observing => &OBSERVING,
            BehaviorKind::Chattering => &CHATTERING,
            BehaviorKind::SelfGrooming => &SELF_GROOMING,
            BehaviorKind::Kneading => &KNEADING,
            BehaviorKind::Stretching => &STRETCHING,
            BehaviorKind::BeingGroomed => &BEING_GROOMED,
            BehaviorKind::Affection => &AFFECTION,
            BehaviorKind::Attention => &ATTENTION,
            BehaviorKind::Snacking => &SNACKING,
            BehaviorKind::Lounging => &LOUNGING,
            BehaviorKind::Idle => &IDLE,
        }
    }

    pub fn name(&self) -> &'static str {
        self.descriptor().name
    }

    pub fn priority(&self) -> Priority {
        self.descriptor().priority
    }

    pub fn can_trigger(&self, stats: &StatStore) -> bool {
        self.descriptor().trigger.holds(stats)
    }

    /// The single stat a simple trigger watches
    pub fn trigger_stat(&self) -> Option<Stat> {
        match self.descriptor().trigger {
            Trigger::Below(stat, _) | Trigger::Above(stat, _) => Some(stat),
            _ => None,
        }
    }

    pub fn trigger_threshold(&self) -> Option<f32> {
        match self.descriptor().trigger {
            Trigger::Below(_, t) | Trigger::Above(_, t) => Some(t),
            _ => None,
        }
    }

    pub fn trigger_below(&self) -> bool {
        matches!(self.descriptor().trigger, Trigger::Below(..))
    }

    pub fn from_name(name: &str) -> Option<BehaviorKind> {
        BehaviorKind::ALL.iter().copied().find(|k| k.name() == name)
    }
}

impl fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
