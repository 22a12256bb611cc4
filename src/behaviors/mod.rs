//! Timed behavior phase machines

pub mod behavior;
pub mod catalog;
pub mod effects;
pub mod variant;

pub use behavior::{Behavior, BehaviorContext, BehaviorOutcome, CompletionHook, EatingState};
pub use catalog::{BehaviorDescriptor, BehaviorKind};
pub use effects::{Glyph, Renderer};
pub use variant::{Meal, Variant};
