//! Engine configuration with documented constants
//!
//! Behavior balance (thresholds, priorities, phase durations, stat tables)
//! lives in the behavior catalog and is not tunable here. This collects the
//! engine-wide knobs around it.

use crate::core::error::{CatodeError, Result};
use crate::entity::stats::{Stat, StatStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Configuration for the behavior engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === FRAME LOOP ===
    /// Frames per second of the host loop
    ///
    /// The handheld target redraws at 12 FPS; every behavior timer is
    /// advanced by `1 / frames_per_second` per frame.
    pub frames_per_second: u32,

    /// Largest frame delta handed to behaviors (seconds)
    ///
    /// A stalled frame would otherwise skip whole phases in one step.
    pub max_frame_delta: f32,

    // === STATS ===
    /// Baseline stat value
    ///
    /// Every stat a profile leaves out starts here, and reads of names
    /// outside the stat vocabulary return it.
    pub baseline_stat: f32,

    // === CHAINING ===
    /// Chance that a finished stretch rolls into kneading
    pub knead_after_stretch_chance: f64,

    // === EATING ===
    /// Bowl animation speed while eating (frames per second)
    ///
    /// At 0.4 a four-frame bowl is emptied in ten seconds.
    pub bowl_frames_per_second: f32,

    /// Bowl sprite used when a meal is started without one
    pub default_bowl: BowlMetrics,

    // === IDLE ===
    /// Minimum time an idle pose is held (seconds)
    pub idle_pose_hold_min: f32,

    /// Random extra hold on top of the minimum, in whole seconds
    pub idle_pose_hold_spread: u32,

    /// How long idle runs before handing over to arbitration (seconds)
    pub idle_check_interval: f32,
}

/// Size and frame count of the food bowl sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BowlMetrics {
    pub frame_count: u32,
    pub width: i32,
    pub height: i32,
}

impl Default for BowlMetrics {
    fn default() -> Self {
        Self {
            frame_count: 4,
            width: 22,
            height: 8,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frames_per_second: 12,
            max_frame_delta: 0.25,
            baseline_stat: 50.0,
            knead_after_stretch_chance: 0.2,
            bowl_frames_per_second: 0.4,
            default_bowl: BowlMetrics::default(),
            idle_pose_hold_min: 10.0,
            idle_pose_hold_spread: 20,
            idle_check_interval: 15.0,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds per frame at the configured frame rate
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.frames_per_second as f32
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.frames_per_second == 0 {
            return Err(CatodeError::InvalidConfig(
                "frames_per_second must be positive".into(),
            ));
        }

        let floats = [
            ("max_frame_delta", self.max_frame_delta),
            ("baseline_stat", self.baseline_stat),
            ("bowl_frames_per_second", self.bowl_frames_per_second),
            ("idle_pose_hold_min", self.idle_pose_hold_min),
            ("idle_check_interval", self.idle_check_interval),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(CatodeError::InvalidConfig(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }
        if !self.knead_after_stretch_chance.is_finite() {
            return Err(CatodeError::InvalidConfig(format!(
                "knead_after_stretch_chance must be a finite number, got {}",
                self.knead_after_stretch_chance
            )));
        }

        if self.max_frame_delta < self.frame_delta() {
            return Err(CatodeError::InvalidConfig(format!(
                "max_frame_delta ({}) should be >= one frame ({:.3})",
                self.max_frame_delta,
                self.frame_delta()
            )));
        }

        if !(0.0..=100.0).contains(&self.baseline_stat) {
            return Err(CatodeError::InvalidConfig(format!(
                "baseline_stat ({}) must lie in [0, 100]",
                self.baseline_stat
            )));
        }

        if !(0.0..=1.0).contains(&self.knead_after_stretch_chance) {
            return Err(CatodeError::InvalidConfig(format!(
                "knead_after_stretch_chance ({}) must lie in [0, 1]",
                self.knead_after_stretch_chance
            )));
        }

        if self.bowl_frames_per_second <= 0.0 || self.default_bowl.frame_count == 0 {
            return Err(CatodeError::InvalidConfig(
                "bowl animation needs a positive speed and at least one frame".into(),
            ));
        }

        if self.idle_pose_hold_min <= 0.0 || self.idle_check_interval <= 0.0 {
            return Err(CatodeError::InvalidConfig(
                "idle intervals must be positive".into(),
            ));
        }

        Ok(())
    }
}

/// Creature profile file: engine knobs plus starting stats
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureProfile {
    pub engine: EngineConfig,
    pub stats: BTreeMap<String, f32>,
}

impl CreatureProfile {
    /// Build the starting stat store. Stat names are checked strictly here.
    pub fn initial_stats(&self) -> Result<StatStore> {
        let mut store = StatStore::with_default(self.engine.baseline_stat);
        for (name, value) in &self.stats {
            let stat: Stat = name.parse()?;
            store.set_stat(stat, *value);
        }
        Ok(store)
    }
}

/// Load and validate a creature profile from a TOML file
pub fn load_profile(path: impl AsRef<Path>) -> Result<CreatureProfile> {
    let contents = fs::read_to_string(path.as_ref())?;
    parse_profile(&contents)
}

/// Parse and validate a creature profile from TOML text
pub fn parse_profile(contents: &str) -> Result<CreatureProfile> {
    let profile: CreatureProfile = toml::from_str(contents)?;
    profile.engine.validate()?;
    // Surface bad stat names at load time rather than at spawn
    profile.initial_stats()?;
    Ok(profile)
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Get the global engine config (initializes with defaults if not set)
pub fn config() -> &'static EngineConfig {
    CONFIG.get_or_init(EngineConfig::default)
}

/// Set the global engine config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: EngineConfig) -> std::result::Result<(), EngineConfig> {
    CONFIG.set(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_chance() {
        let config = EngineConfig {
            knead_after_stretch_chance: 1.5,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(CatodeError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_nan_fields() {
        let cases: [fn(&mut EngineConfig); 6] = [
            |c: &mut EngineConfig| c.max_frame_delta = f32::NAN,
            |c: &mut EngineConfig| c.baseline_stat = f32::NAN,
            |c: &mut EngineConfig| c.bowl_frames_per_second = f32::NAN,
            |c: &mut EngineConfig| c.idle_pose_hold_min = f32::NAN,
            |c: &mut EngineConfig| c.idle_check_interval = f32::NAN,
            |c: &mut EngineConfig| c.knead_after_stretch_chance = f64::NAN,
        ];
        for (i, poison) in cases.iter().enumerate() {
            let mut config = EngineConfig::default();
            poison(&mut config);
            assert!(
                matches!(config.validate(), Err(CatodeError::InvalidConfig(_))),
                "case {} accepted",
                i
            );
        }
    }

    #[test]
    fn test_rejects_infinite_intervals() {
        let config = EngineConfig {
            idle_check_interval: f32::INFINITY,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_profile_rejects_nan() {
        let result = parse_profile("[engine]\nmax_frame_delta = nan\n");
        assert!(matches!(result, Err(CatodeError::InvalidConfig(_))));

        let result = parse_profile("[engine]\nidle_check_interval = nan\n[stats]\nenergy = 10.0\n");
        assert!(matches!(result, Err(CatodeError::InvalidConfig(_))));
    }

    #[test]
    fn test_baseline_fills_missing_stats() {
        let profile = parse_profile("[engine]\nbaseline_stat = 30.0\n[stats]\nenergy = 80.0\n").unwrap();
        let stats = profile.initial_stats().unwrap();
        assert_eq!(stats.get("energy"), 80.0);
        assert_eq!(stats.get("comfort"), 30.0);
        assert_eq!(stats.get("happiness"), 30.0);
    }

    #[test]
    fn test_rejects_zero_fps() {
        let config = EngineConfig {
            frames_per_second: 0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_profile_with_stats() {
        let profile = parse_profile(
            r#"
            [engine]
            frames_per_second = 30

            [stats]
            energy = 20.0
            playfulness = 80.0
            "#,
        )
        .expect("profile should parse");

        assert_eq!(profile.engine.frames_per_second, 30);
        assert_eq!(profile.engine.idle_check_interval, 15.0);

        let stats = profile.initial_stats().unwrap();
        assert_eq!(stats.get("energy"), 20.0);
        assert_eq!(stats.get("playfulness"), 80.0);
        assert_eq!(stats.get("comfort"), 50.0);
    }

    #[test]
    fn test_parse_profile_rejects_unknown_stat() {
        let result = parse_profile("[stats]\nhappiness = 10.0\n");
        assert!(matches!(result, Err(CatodeError::UnknownStat(name)) if name == "happiness"));
    }

    #[test]
    fn test_parse_profile_rejects_malformed_toml() {
        let result = parse_profile("[stats\nenergy = 1");
        assert!(matches!(result, Err(CatodeError::ConfigParse(_))));
    }

    #[test]
    fn test_empty_profile_uses_defaults() {
        let profile = parse_profile("").unwrap();
        assert_eq!(profile.engine, EngineConfig::default());
        assert!(profile.stats.is_empty());
    }

    #[test]
    fn test_global_config_defaults() {
        assert!(config().frames_per_second > 0);
    }
}
