//! Catode - autonomous behavior engine for a companion cat

pub mod behaviors;
pub mod core;
pub mod entity;
pub mod simulation;

pub use behaviors::{Behavior, BehaviorKind};
pub use simulation::{Creature, PlayerAction};
