//! Behavior arbitration, the creature host and the headless loop

pub mod arbitrator;
pub mod creature;
pub mod interaction;
pub mod tick;

pub use arbitrator::select_next;
pub use creature::{BehaviorEvent, Creature};
pub use interaction::PlayerAction;
pub use tick::{run_headless, RunSummary, ScheduledAction};
