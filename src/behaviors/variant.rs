//! Start variants for player-initiated behaviors

use crate::core::types::Seconds;
use crate::entity::stats::Stat;
use serde::{Deserialize, Serialize};

/// Meal served in the food bowl
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Meal {
    Chicken,
    Fish,
    /// Any other meal name, kept for display
    Other(String),
}

impl Meal {
    pub fn from_name(name: &str) -> Self {
        match name {
            "chicken" => Meal::Chicken,
            "fish" => Meal::Fish,
            other => Meal::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Meal::Chicken => "chicken",
            Meal::Fish => "fish",
            Meal::Other(name) => name,
        }
    }

    /// Stat deltas applied once when the meal is finished
    pub fn stat_deltas(&self) -> &'static [(Stat, f32)] {
        match self {
            Meal::Chicken => &[(Stat::Fullness, 30.0), (Stat::Energy, 10.0)],
            Meal::Fish => &[(Stat::Fullness, 25.0), (Stat::Affection, 5.0)],
            Meal::Other(_) => &[(Stat::Fullness, 20.0)],
        }
    }
}

/// How a player-initiated behavior was asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Affection: a kiss instead of pets
    Kiss,
    /// Attention: pointing out a bird instead of a "psst"
    PointBird,
    /// Snacking: a treat instead of plain kibble
    Treat,
    /// Playing: started with a toy
    Toy,
    /// Eating: the meal in the bowl
    Meal(Meal),
}

/// Length, pose and immediate deltas of a short reaction behavior
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reaction {
    pub duration: Seconds,
    pub pose: &'static str,
    pub deltas: &'static [(Stat, f32)],
}

pub const PETS: Reaction = Reaction {
    duration: 2.0,
    pose: "sitting.forward.happy",
    deltas: &[(Stat::Affection, 5.0)],
};

pub const KISS: Reaction = Reaction {
    duration: 2.5,
    pose: "sitting.side.happy",
    deltas: &[(Stat::Affection, 10.0)],
};

pub const PSST: Reaction = Reaction {
    duration: 1.5,
    pose: "sitting.forward.aloof",
    deltas: &[(Stat::Curiosity, 3.0)],
};

pub const POINT_BIRD: Reaction = Reaction {
    duration: 2.0,
    pose: "sitting.side.aloof",
    deltas: &[(Stat::Curiosity, 10.0)],
};

pub const KIBBLE: &[(Stat, f32)] = &[(Stat::Fullness, 10.0)];
pub const TREAT: &[(Stat, f32)] = &[(Stat::Fullness, 5.0), (Stat::Affection, 3.0)];
pub const TOY: &[(Stat, f32)] = &[(Stat::Playfulness, 15.0), (Stat::Energy, -5.0)];
