//! Player actions from the scene menus

use crate::behaviors::behavior::Behavior;
use crate::behaviors::catalog::BehaviorKind;
use crate::behaviors::variant::{Meal, Variant};
use crate::core::config::BowlMetrics;
use crate::core::error::CatodeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Something the player did to the creature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerAction {
    Pets,
    Kiss,
    Psst,
    PointBird,
    Groom,
    Meal(Meal),
    Treat,
    /// Any other inventory item is played with as a toy
    Toy(String),
}

impl PlayerAction {
    pub fn behavior_kind(&self) -> BehaviorKind {
        match self {
            PlayerAction::Pets | PlayerAction::Kiss => BehaviorKind::Affection,
            PlayerAction::Psst | PlayerAction::PointBird => BehaviorKind::Attention,
            PlayerAction::Groom => BehaviorKind::BeingGroomed,
            PlayerAction::Meal(_) => BehaviorKind::Eating,
            PlayerAction::Treat => BehaviorKind::Snacking,
            PlayerAction::Toy(_) => BehaviorKind::Playing,
        }
    }

    pub fn variant(&self) -> Option<Variant> {
        match self {
            PlayerAction::Kiss => Some(Variant::Kiss),
            PlayerAction::PointBird => Some(Variant::PointBird),
            PlayerAction::Meal(meal) => Some(Variant::Meal(meal.clone())),
            PlayerAction::Treat => Some(Variant::Treat),
            PlayerAction::Toy(_) => Some(Variant::Toy),
            PlayerAction::Pets | PlayerAction::Psst | PlayerAction::Groom => None,
        }
    }

    /// Build the behavior to hand to `Creature::trigger`
    pub fn into_behavior(self, bowl: BowlMetrics) -> Behavior {
        if let PlayerAction::Meal(meal) = self {
            return Behavior::eating(meal, bowl);
        }
        let kind = self.behavior_kind();
        match self.variant() {
            Some(variant) => Behavior::with_variant(kind, variant),
            None => Behavior::new(kind),
        }
    }
}

impl FromStr for PlayerAction {
    type Err = CatodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let action = match s {
            "pets" => PlayerAction::Pets,
            "kiss" => PlayerAction::Kiss,
            "psst" => PlayerAction::Psst,
            "point_bird" => PlayerAction::PointBird,
            "groom" => PlayerAction::Groom,
            "Treat" => PlayerAction::Treat,
            "" => return Err(CatodeError::UnknownAction(s.to_string())),
            other => match other.strip_prefix("meal:") {
                Some("") => return Err(CatodeError::UnknownAction(s.to_string())),
                Some(meal) => PlayerAction::Meal(Meal::from_name(meal)),
                None => PlayerAction::Toy(other.to_string()),
            },
        };
        Ok(action)
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerAction::Pets => f.write_str("pets"),
            PlayerAction::Kiss => f.write_str("kiss"),
            PlayerAction::Psst => f.write_str("psst"),
            PlayerAction::PointBird => f.write_str("point_bird"),
            PlayerAction::Groom => f.write_str("groom"),
            PlayerAction::Meal(meal) => write!(f, "meal:{}", meal.name()),
            PlayerAction::Treat => f.write_str("Treat"),
            PlayerAction::Toy(item) => f.write_str(item),
        }
    }
}
