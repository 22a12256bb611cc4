pub mod pose;
pub mod stats;

pub use pose::PoseState;
pub use stats::{Stat, StatStore};
