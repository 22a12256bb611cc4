//! Pose names the renderer knows how to draw

/// Every pose with sprite data behind it
pub const KNOWN_POSES: &[&str] = &[
    "sitting.forward.neutral",
    "sitting.forward.happy",
    "sitting.forward.aloof",
    "sitting.side.neutral",
    "sitting.side.happy",
    "sitting.side.aloof",
    "sitting.side.looking_down",
    "standing.side.neutral",
    "standing.side.happy",
    "leaning_forward.side.neutral",
    "leaning_forward.side.eating",
    "sleeping.side.sploot",
    "sleeping.side.modest",
    "sleeping.side.crossed",
];

pub const DEFAULT_POSE: &str = "sitting.forward.neutral";

pub fn is_known_pose(name: &str) -> bool {
    KNOWN_POSES.contains(&name)
}

/// Current pose of the creature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoseState {
    current: &'static str,
}

impl Default for PoseState {
    fn default() -> Self {
        Self { current: DEFAULT_POSE }
    }
}

impl PoseState {
    /// Start in `pose`, falling back to the default pose if it is unknown
    pub fn new(pose: &'static str) -> Self {
        let mut state = Self::default();
        state.set(pose);
        state
    }

    pub fn current(&self) -> &'static str {
        self.current
    }

    /// Returns false and keeps the current pose if `pose` is unknown
    pub fn set(&mut self, pose: &'static str) -> bool {
        if !is_known_pose(pose) {
            return false;
        }
        self.current = pose;
        true
    }
}
