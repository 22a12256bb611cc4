//! Bounded creature stats driven by behaviors and player actions

use crate::core::error::CatodeError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const STAT_MIN: f32 = 0.0;
pub const STAT_MAX: f32 = 100.0;
pub const NEUTRAL_STAT: f32 = 50.0;

/// The fixed stat vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    // Daily
    Fullness,
    Energy,
    Comfort,
    Playfulness,
    Focus,
    // Weekly
    Health,
    Fulfillment,
    Cleanliness,
    Curiosity,
    Independence,
    Sociability,
    Routine,
    Intelligence,
    Resilience,
    Maturity,
    Grace,
    Affection,
    // Monthly
    Fitness,
    Appetite,
    Patience,
    Charisma,
    Craftiness,
    Serenity,
    // Traits
    Courage,
    Loyalty,
    Mischievousness,
    Dignity,
}

impl Stat {
    pub const COUNT: usize = 27;

    pub const ALL: [Stat; Stat::COUNT] = [
        Stat::Fullness,
        Stat::Energy,
        Stat::Comfort,
        Stat::Playfulness,
        Stat::Focus,
        Stat::Health,
        Stat::Fulfillment,
        Stat::Cleanliness,
        Stat::Curiosity,
        Stat::Independence,
        Stat::Sociability,
        Stat::Routine,
        Stat::Intelligence,
        Stat::Resilience,
        Stat::Maturity,
        Stat::Grace,
        Stat::Affection,
        Stat::Fitness,
        Stat::Appetite,
        Stat::Patience,
        Stat::Charisma,
        Stat::Craftiness,
        Stat::Serenity,
        Stat::Courage,
        Stat::Loyalty,
        Stat::Mischievousness,
        Stat::Dignity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Fullness => "fullness",
            Stat::Energy => "energy",
            Stat::Comfort => "comfort",
            Stat::Playfulness => "playfulness",
            Stat::Focus => "focus",
            Stat::Health => "health",
            Stat::Fulfillment => "fulfillment",
            Stat::Cleanliness => "cleanliness",
            Stat::Curiosity => "curiosity",
            Stat::Independence => "independence",
            Stat::Sociability => "sociability",
            Stat::Routine => "routine",
            Stat::Intelligence => "intelligence",
            Stat::Resilience => "resilience",
            Stat::Maturity => "maturity",
            Stat::Grace => "grace",
            Stat::Affection => "affection",
            Stat::Fitness => "fitness",
            Stat::Appetite => "appetite",
            Stat::Patience => "patience",
            Stat::Charisma => "charisma",
            Stat::Craftiness => "craftiness",
            Stat::Serenity => "serenity",
            Stat::Courage => "courage",
            Stat::Loyalty => "loyalty",
            Stat::Mischievousness => "mischievousness",
            Stat::Dignity => "dignity",
        }
    }

    /// Lenient lookup, `None` for names outside the vocabulary
    pub fn from_name(name: &str) -> Option<Stat> {
        Stat::ALL.iter().copied().find(|s| s.as_str() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stat {
    type Err = CatodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stat::from_name(s).ok_or_else(|| CatodeError::UnknownStat(s.to_string()))
    }
}

/// Named stat values clamped to [0, 100]
///
/// Reads of names outside the vocabulary return the store's default and
/// writes to them are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, f32>", into = "BTreeMap<String, f32>")]
pub struct StatStore {
    values: [f32; Stat::COUNT],
    unknown_default: f32,
}

impl Default for StatStore {
    fn default() -> Self {
        Self::with_default(NEUTRAL_STAT)
    }
}

impl StatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stat starts at `value`, which is also returned for unknown names
    pub fn with_default(value: f32) -> Self {
        let value = clamp_stat(value).unwrap_or(NEUTRAL_STAT);
        Self {
            values: [value; Stat::COUNT],
            unknown_default: value,
        }
    }

    /// Builder-style setter for tests and profiles
    pub fn with(mut self, stat: Stat, value: f32) -> Self {
        self.set_stat(stat, value);
        self
    }

    pub fn get(&self, name: &str) -> f32 {
        match Stat::from_name(name) {
            Some(stat) => self.get_stat(stat),
            None => self.unknown_default,
        }
    }

    pub fn set(&mut self, name: &str, value: f32) {
        if let Some(stat) = Stat::from_name(name) {
            self.set_stat(stat, value);
        }
    }

    pub fn add(&mut self, name: &str, delta: f32) {
        self.set(name, self.get(name) + delta);
    }

    pub fn get_stat(&self, stat: Stat) -> f32 {
        self.values[stat.index()]
    }

    pub fn set_stat(&mut self, stat: Stat, value: f32) {
        if let Some(v) = clamp_stat(value) {
            self.values[stat.index()] = v;
        }
    }

    pub fn add_stat(&mut self, stat: Stat, delta: f32) {
        self.set_stat(stat, self.get_stat(stat) + delta);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, f32)> + '_ {
        Stat::ALL.iter().map(move |s| (*s, self.get_stat(*s)))
    }
}

/// NaN writes are dropped; everything else is clamped into range
fn clamp_stat(value: f32) -> Option<f32> {
    if value.is_nan() {
        None
    } else {
        Some(value.clamp(STAT_MIN, STAT_MAX))
    }
}

impl From<BTreeMap<String, f32>> for StatStore {
    fn from(map: BTreeMap<String, f32>) -> Self {
        let mut store = StatStore::default();
        for (name, value) in map {
            store.set(&name, value);
        }
        store
    }
}

impl From<StatStore> for BTreeMap<String, f32> {
    fn from(store: StatStore) -> Self {
        store
            .iter()
            .map(|(stat, value)| (stat.as_str().to_string(), value))
            .collect()
    }
}
