//! Headless frame loop
//!
//! Drives a creature at the configured frame rate, applies player actions
//! at scheduled times and records every lifecycle event with a timestamp.

use crate::behaviors::catalog::BehaviorKind;
use crate::core::error::{CatodeError, Result};
use crate::core::types::Seconds;
use crate::entity::stats::StatStore;
use crate::simulation::creature::{BehaviorEvent, Creature};
use crate::simulation::interaction::PlayerAction;
use rand::RngCore;
use serde::Serialize;
use std::str::FromStr;

/// A player action applied once the clock reaches `at`
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledAction {
    pub at: Seconds,
    pub action: PlayerAction,
}

impl FromStr for ScheduledAction {
    type Err = CatodeError;

    /// `<seconds>:<action>`, e.g. `12.5:kiss` or `30:meal:chicken`
    fn from_str(s: &str) -> Result<Self> {
        let (time, action) = s
            .split_once(':')
            .ok_or_else(|| CatodeError::InvalidConfig(format!("expected <secs>:<action>, got '{}'", s)))?;
        let at: Seconds = time
            .trim()
            .parse()
            .map_err(|_| CatodeError::InvalidConfig(format!("bad action time '{}'", time)))?;
        if !at.is_finite() || at < 0.0 {
            return Err(CatodeError::InvalidConfig(format!("bad action time '{}'", time)));
        }
        Ok(Self {
            at,
            action: action.trim().parse()?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineEntry {
    pub time: Seconds,
    pub event: BehaviorEvent,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub seconds: Seconds,
    pub frames: u64,
    pub timeline: Vec<TimelineEntry>,
    pub final_behavior: Option<BehaviorKind>,
    pub final_pose: &'static str,
    pub final_stats: StatStore,
}

impl RunSummary {
    /// Completed behaviors in order, interruptions excluded
    pub fn completed(&self) -> impl Iterator<Item = BehaviorKind> + '_ {
        self.timeline.iter().filter_map(|entry| match entry.event {
            BehaviorEvent::Finished {
                kind,
                completed: true,
                ..
            } => Some(kind),
            _ => None,
        })
    }
}

/// Run `creature` for `seconds` of simulated time
pub fn run_headless<R: RngCore>(
    creature: &mut Creature<R>,
    seconds: Seconds,
    schedule: &[ScheduledAction],
) -> RunSummary {
    let dt = creature.config().frame_delta();
    let frames = (seconds.max(0.0) / dt).ceil() as u64;

    let mut pending: Vec<&ScheduledAction> = schedule.iter().collect();
    pending.sort_by(|a, b| a.at.total_cmp(&b.at));
    let mut pending = pending.into_iter().peekable();

    let mut timeline = Vec::new();
    let record = |timeline: &mut Vec<TimelineEntry>, time: Seconds, events: Vec<BehaviorEvent>| {
        timeline.extend(events.into_iter().map(|event| TimelineEntry { time, event }));
    };
    record(&mut timeline, 0.0, creature.drain_events());

    for frame in 0..frames {
        let now = frame as Seconds * dt;
        while let Some(scheduled) = pending.next_if(|s| s.at <= now) {
            tracing::info!(at = now, action = %scheduled.action, "player action");
            creature.apply_action(scheduled.action.clone());
            record(&mut timeline, now, creature.drain_events());
        }

        creature.update(dt);
        record(&mut timeline, now + dt, creature.drain_events());
    }

    RunSummary {
        seconds: frames as Seconds * dt,
        frames,
        timeline,
        final_behavior: creature.current_kind(),
        final_pose: creature.pose(),
        final_stats: creature.stats().clone(),
    }
}
