use log::debug;

use crate::run::Run;
use crate::waypoint;

/// Derived from the run on demand, never stored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BloodMoonState {
    /// the checkpoint at the current index is the Blood Moon
    pub is_active: bool,
    /// the Blood Moon has already been split or skipped
    pub is_done: bool,
}

pub fn state(run: &Run) -> BloodMoonState {
    BloodMoonState {
        is_active: current_is_blood_moon(run),
        is_done: is_done(run),
    }
}

pub fn current_is_blood_moon(run: &Run) -> bool {
    run.current_waypoint_id()
        .is_some_and(|id| waypoint::registry().is_blood_moon(id))
}

fn position(run: &Run) -> Option<usize> {
    let bm = waypoint::blood_moon_id();
    run.waypoint_ids.iter().position(|&id| id == bm)
}

pub fn is_injected(run: &Run) -> bool {
    position(run).is_some()
}

pub fn is_done(run: &Run) -> bool {
    position(run).is_some_and(|idx| run.splits.contains(idx))
}

/// Inserts the Blood Moon at the current index, shifting the rest of the
/// sequence back by one.
pub fn insert_at_current(run: &mut Run) {
    let idx = run.current_index().min(run.waypoint_ids.len());
    run.waypoint_ids.insert(idx, waypoint::blood_moon_id());
    debug!("blood moon inserted at {idx}");
}

/// Removes the checkpoint at the current index if it is the Blood Moon.
pub fn remove_at_current(run: &mut Run) -> bool {
    if !current_is_blood_moon(run) {
        return false;
    }
    let idx = run.current_index();
    run.waypoint_ids.remove(idx);
    debug!("blood moon removed from {idx}");
    true
}

/// Removes the Blood Moon wherever it sits in the sequence.
pub fn remove_anywhere(run: &mut Run) -> bool {
    match position(run) {
        Some(idx) => {
            run.waypoint_ids.remove(idx);
            debug!("blood moon removed from {idx}");
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splits::Split;

    fn run() -> Run {
        Run::with_waypoints("xyz", vec![1, 2, 3, 4, 5])
    }

    #[test]
    fn test_fresh_run_inactive() {
        assert_eq!(state(&run()), BloodMoonState::default());
        assert!(!is_injected(&run()));
    }

    #[test]
    fn test_insert_at_start() {
        let mut r = run();
        insert_at_current(&mut r);

        assert_eq!(r.waypoint_ids.len(), 6);
        assert_eq!(r.waypoint_ids[0], waypoint::blood_moon_id());
        assert_eq!(
            state(&r),
            BloodMoonState {
                is_active: true,
                is_done: false
            }
        );
    }

    #[test]
    fn test_insert_after_progress_shifts() {
        let mut r = run();
        r.splits.append(Split::Time(10));
        r.splits.append(Split::Time(20));
        insert_at_current(&mut r);

        assert_eq!(r.waypoint_ids, vec![1, 2, waypoint::blood_moon_id(), 3, 4, 5]);
        assert!(state(&r).is_active);
    }

    #[test]
    fn test_done_once_split() {
        let mut r = run();
        insert_at_current(&mut r);
        r.splits.append(Split::Time(10));

        let s = state(&r);
        assert!(s.is_done);
        assert!(!s.is_active);
    }

    #[test]
    fn test_skipped_counts_as_done() {
        let mut r = run();
        insert_at_current(&mut r);
        r.splits.append(Split::Skipped);
        assert!(is_done(&r));
    }

    #[test]
    fn test_remove_at_current_only_when_current() {
        let mut r = run();
        insert_at_current(&mut r);
        r.splits.append(Split::Time(10));

        assert!(!remove_at_current(&mut r));
        assert_eq!(r.waypoint_ids.len(), 6);
    }

    #[test]
    fn test_remove_anywhere() {
        let mut r = run();
        r.splits.append(Split::Time(10));
        insert_at_current(&mut r);
        r.splits.append(Split::Time(20));
        r.splits.append(Split::Time(30));

        assert!(remove_anywhere(&mut r));
        assert_eq!(r.waypoint_ids, vec![1, 2, 3, 4, 5]);
        assert!(!remove_anywhere(&mut r));
    }
}
