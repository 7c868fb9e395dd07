//! Read-only projections of a [`Run`] for the UI.

use crate::blood_moon::{self, BloodMoonState};
use crate::run::{Run, RunState};
use crate::splits::Split;
use crate::timer;
use crate::waypoint;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitDetails {
    /// 1-based position of the current checkpoint, once the timer runs
    pub counter: Option<usize>,
    pub name: String,
    pub description: String,
}

pub fn split_details(run: &Run) -> SplitDetails {
    if run.state == RunState::Ended {
        return SplitDetails {
            counter: None,
            name: "Congratulations!".to_string(),
            description: format!("You've completed {}", run.seed),
        };
    }

    let current = run.has_started().then(|| run.current_waypoint()).flatten();
    SplitDetails {
        counter: run.has_started().then(|| run.current_index() + 1),
        name: current.map_or_else(|| "Ready to go".to_string(), |w| w.name.clone()),
        description: current.map_or_else(
            || "Start the timer to reveal the first shrine!".to_string(),
            |w| w.description.clone(),
        ),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStyle {
    Initial,
    Running,
    Paused,
    Ended,
}

pub fn timer_style(run: &Run) -> TimerStyle {
    match run.state {
        RunState::None | RunState::Init => TimerStyle::Initial,
        RunState::Running => TimerStyle::Running,
        RunState::Paused => TimerStyle::Paused,
        RunState::Ended => TimerStyle::Ended,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRow {
    pub index: usize,
    pub name: String,
    pub split: Split,
    pub segment: Option<i64>,
}

impl SplitRow {
    pub fn time_text(&self) -> String {
        match self.split {
            Split::Time(ms) => timer::format_millis(ms),
            Split::Skipped => "skipped".to_string(),
        }
    }

    pub fn segment_text(&self) -> String {
        self.segment.map(timer::format_millis).unwrap_or_default()
    }
}

/// Recorded splits, oldest first
pub fn history(run: &Run) -> Vec<SplitRow> {
    run.splits
        .iter()
        .map(|(index, split)| SplitRow {
            index,
            name: run
                .waypoint_ids
                .get(index)
                .and_then(|&id| waypoint::by_id(id))
                .map_or_else(|| format!("#{}", index + 1), |w| w.name.clone()),
            split,
            segment: run.splits.segment(index),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub title: &'static str,
    pub seed: Option<String>,
    pub progress: Option<(usize, usize)>,
    pub blood_moon: BloodMoonState,
}

pub const TITLE: &str = "BotW All Shrines Randomizer";

pub fn header(run: &Run) -> Header {
    Header {
        title: TITLE,
        seed: (run.has_seed() && run.show_seed).then(|| run.seed.clone()),
        progress: run
            .has_seed()
            .then(|| (run.splits.len(), run.waypoint_ids.len())),
        blood_moon: blood_moon::state(run),
    }
}
