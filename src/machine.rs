//! Run transitions.
//!
//! Every action maps the current [`Run`] to a new one; the input is never
//! mutated. After each action the derived state is reconciled so a run whose
//! ledger covers the whole sequence always reads as `Ended`.

use log::{debug, info};

use crate::blood_moon;
use crate::rando::{self, RandoFlags};
use crate::run::{Run, RunState};
use crate::splits::Split;

#[derive(Debug, Clone, PartialEq, Eq, strum_macros::Display)]
pub enum Action {
    AddSplit,
    UndoSplit,
    SkipSplit,
    ResetSplits,
    Pause,
    ToggleBloodMoon,
    PickSeed(String),
    SetFlags(RandoFlags),
    ToggleSeedVisibility,
    Quit,
}

/// Applies `action` at time `now` (epoch millis) and returns the next run.
pub fn apply(run: &Run, action: &Action, now: i64) -> Run {
    let mut next = run.clone();

    match action {
        Action::AddSplit => add_split(&mut next, now),
        Action::UndoSplit => undo_split(&mut next),
        Action::SkipSplit => skip_split(&mut next),
        Action::ResetSplits => reset_splits(&mut next),
        Action::Pause => pause(&mut next, now),
        Action::ToggleBloodMoon => toggle_blood_moon(&mut next),
        Action::PickSeed(seed) => pick_seed(&mut next, seed),
        Action::SetFlags(flags) => {
            if next.state == RunState::None {
                next.flags = *flags;
            }
        }
        Action::ToggleSeedVisibility => next.show_seed = !next.show_seed,
        Action::Quit => {
            next = Run {
                flags: run.flags,
                show_seed: run.show_seed,
                ..Run::default()
            };
        }
    }

    reconcile(&mut next, now);

    if next.state != run.state {
        info!("run state {} -> {} on {}", run.state, next.state, action);
    }
    next
}

fn add_split(run: &mut Run, now: i64) {
    match run.state {
        RunState::None | RunState::Ended => {}
        RunState::Paused => resume(run, now),
        RunState::Init => {
            run.rundate = Some(now);
            run.state = RunState::Running;
        }
        RunState::Running => {
            if run.is_finished() {
                return;
            }
            let rundate = run.rundate.unwrap_or(now);
            let idx = run
                .splits
                .append(Split::Time(now - rundate - run.paused_time));
            debug!("split {idx} recorded");
        }
    }
}

fn resume(run: &mut Run, now: i64) {
    if let Some(at) = run.paused_at.take() {
        run.paused_time += (now - at).max(0);
    }
    run.state = RunState::Running;
}

fn undo_split(run: &mut Run) {
    if run.splits.is_empty() {
        return;
    }
    blood_moon::remove_at_current(run);
    if let Some((idx, _)) = run.splits.remove_last() {
        debug!("split {idx} undone");
    }
}

fn skip_split(run: &mut Run) {
    if run.state == RunState::Ended || run.splits.len() >= run.waypoint_ids.len() {
        return;
    }
    let idx = run.splits.append(Split::Skipped);
    debug!("split {idx} skipped");
}

fn reset_splits(run: &mut Run) {
    if run.state == RunState::None {
        return;
    }
    blood_moon::remove_anywhere(run);
    run.splits.clear();
    run.paused_time = 0;
    run.paused_at = None;
    run.rundate = None;
    run.state = RunState::Init;
}

fn pause(run: &mut Run, now: i64) {
    if run.state == RunState::Running {
        run.paused_at = Some(now);
        run.state = RunState::Paused;
    }
}

fn toggle_blood_moon(run: &mut Run) {
    if matches!(run.state, RunState::None | RunState::Ended) || blood_moon::is_done(run) {
        return;
    }
    if blood_moon::is_injected(run) {
        blood_moon::remove_anywhere(run);
    } else {
        blood_moon::insert_at_current(run);
    }
}

fn pick_seed(run: &mut Run, seed: &str) {
    let seed = seed.trim();
    if run.state != RunState::None || seed.is_empty() {
        return;
    }
    run.waypoint_ids = rando::randomized_waypoints(seed, &run.flags);
    run.seed = seed.to_string();
    run.state = RunState::Init;
    info!(
        "seed {} picked, {} waypoints",
        run.seed,
        run.waypoint_ids.len()
    );
}

fn reconcile(run: &mut Run, now: i64) {
    match run.state {
        RunState::None | RunState::Init => {}
        RunState::Paused => {
            if run.is_finished() {
                resume(run, now);
                run.state = RunState::Ended;
            }
        }
        RunState::Running | RunState::Ended => {
            if run.rundate.is_none() {
                return;
            }
            run.state = if run.is_finished() {
                RunState::Ended
            } else {
                RunState::Running
            };
        }
    }
}
