use serde::{Deserialize, Serialize};

use crate::rando::RandoFlags;
use crate::splits::SplitLedger;
use crate::waypoint::{self, Waypoint};

/// Value exposed for timestamps that were never set
pub const NOT_STARTED: i64 = -1;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
pub enum RunState {
    /// no seed picked yet
    #[default]
    None,
    /// seed picked, timer not started
    Init,
    Running,
    Paused,
    /// every checkpoint has an entry
    Ended,
}

/// One timed attempt at a seed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    pub seed: String,
    pub flags: RandoFlags,
    pub show_seed: bool,
    pub state: RunState,
    /// epoch millis of the first split press
    pub rundate: Option<i64>,
    /// millis spent paused, excluding a pause still in progress
    pub paused_time: i64,
    pub paused_at: Option<i64>,
    pub waypoint_ids: Vec<u32>,
    pub splits: SplitLedger,
}

impl Run {
    /// A run in `Init` over a known sequence, bypassing the randomizer.
    pub fn with_waypoints(seed: impl Into<String>, waypoint_ids: Vec<u32>) -> Self {
        Self {
            seed: seed.into(),
            state: RunState::Init,
            waypoint_ids,
            ..Self::default()
        }
    }

    /// Index of the next checkpoint to split
    pub fn current_index(&self) -> usize {
        self.splits.len()
    }

    pub fn current_waypoint_id(&self) -> Option<u32> {
        self.waypoint_ids.get(self.current_index()).copied()
    }

    pub fn current_waypoint(&self) -> Option<&'static Waypoint> {
        self.current_waypoint_id().and_then(waypoint::by_id)
    }

    pub fn rundate_or_sentinel(&self) -> i64 {
        self.rundate.unwrap_or(NOT_STARTED)
    }

    pub fn has_seed(&self) -> bool {
        self.state != RunState::None
    }

    pub fn has_started(&self) -> bool {
        self.rundate.is_some()
    }

    /// Every checkpoint has an entry; an empty sequence is trivially covered.
    pub fn is_finished(&self) -> bool {
        self.splits.len() >= self.waypoint_ids.len()
    }

    /// Remaining checkpoints, including the current one
    pub fn remaining(&self) -> usize {
        self.waypoint_ids.len().saturating_sub(self.splits.len())
    }
}
