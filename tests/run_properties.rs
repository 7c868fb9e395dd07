use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use shrinesplit::blood_moon;
use shrinesplit::machine::{apply, Action};
use shrinesplit::run::{Run, RunState};
use shrinesplit::splits::Split;
use shrinesplit::waypoint;

const ACTIONS: [Action; 6] = [
    Action::AddSplit,
    Action::UndoSplit,
    Action::SkipSplit,
    Action::ResetSplits,
    Action::Pause,
    Action::ToggleBloodMoon,
];

fn random_walk(seed: u64, steps: usize, mut check: impl FnMut(&Run, &Action, &Run)) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut run = Run::with_waypoints("xyz", vec![1, 2, 3, 4, 5]);
    let mut now = 0;

    for _ in 0..steps {
        let action = ACTIONS[rng.gen_range(0..ACTIONS.len())].clone();
        now += rng.gen_range(0..2_000);
        let next = apply(&run, &action, now);
        check(&run, &action, &next);
        run = next;
    }
}

#[test]
fn ledger_never_outgrows_sequence() {
    for seed in 0..50 {
        random_walk(seed, 300, |_, action, next| {
            assert!(
                next.splits.len() <= next.waypoint_ids.len(),
                "{action} broke the ledger bound"
            );
        });
    }
}

#[test]
fn at_most_one_blood_moon() {
    let bm = waypoint::blood_moon_id();
    for seed in 0..50 {
        random_walk(seed, 300, |_, _, next| {
            assert!(next.waypoint_ids.iter().filter(|&&id| id == bm).count() <= 1);
        });
    }
}

#[test]
fn reset_always_returns_to_init() {
    for seed in 0..20 {
        random_walk(seed, 200, |_, action, next| {
            if *action == Action::ResetSplits {
                assert_eq!(next.state, RunState::Init);
                assert!(next.splits.is_empty());
                assert_eq!(next.paused_time, 0);
                assert_eq!(next.rundate_or_sentinel(), -1);
                assert!(!blood_moon::is_injected(next));
            }
        });
    }
}

#[test]
fn skip_keeps_sequence_length() {
    for seed in 0..20 {
        random_walk(seed, 200, |prev, action, next| {
            if *action != Action::SkipSplit {
                return;
            }
            assert_eq!(prev.waypoint_ids.len(), next.waypoint_ids.len());
            if prev.state != RunState::Ended && prev.splits.len() < prev.waypoint_ids.len() {
                assert_eq!(next.splits.get(prev.splits.len()), Some(Split::Skipped));
                assert_eq!(next.splits.len(), prev.splits.len() + 1);
            }
        });
    }
}

#[test]
fn ended_is_terminal_for_add_and_skip() {
    for seed in 0..20 {
        random_walk(seed, 200, |prev, action, next| {
            if prev.state == RunState::Ended
                && matches!(action, Action::AddSplit | Action::SkipSplit)
            {
                assert_eq!(prev, next);
            }
        });
    }
}

#[test]
fn full_ledger_reads_ended() {
    for seed in 0..20 {
        random_walk(seed, 200, |_, _, next| {
            if next.has_started() && next.splits.len() == next.waypoint_ids.len() {
                assert_eq!(next.state, RunState::Ended);
            }
        });
    }
}
