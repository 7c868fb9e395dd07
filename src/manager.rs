use std::sync::mpsc::{self, Receiver, Sender};

use log::debug;

use crate::blood_moon::{self, BloodMoonState};
use crate::keyboard::RunControls;
use crate::machine::{self, Action};
use crate::rando::RandoFlags;
use crate::run::Run;
use crate::timer::{self, Clock, SystemClock};

/// Owns the latest [`Run`] and publishes a fresh snapshot after every action.
pub struct RunManager<C: Clock = SystemClock> {
    run: Run,
    clock: C,
    show_help: bool,
    subscribers: Vec<Sender<Run>>,
}

impl RunManager<SystemClock> {
    pub fn new(run: Run) -> Self {
        Self::with_clock(run, SystemClock)
    }
}

impl<C: Clock> RunManager<C> {
    pub fn with_clock(run: Run, clock: C) -> Self {
        Self {
            run,
            clock,
            show_help: false,
            subscribers: Vec::new(),
        }
    }

    pub fn run(&self) -> &Run {
        &self.run
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn blood_moon(&self) -> BloodMoonState {
        blood_moon::state(&self.run)
    }

    pub fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Run clock reading at the current time
    pub fn elapsed(&self) -> i64 {
        timer::elapsed(&self.run, self.now())
    }

    /// Receives every run produced from here on.
    pub fn subscribe(&mut self) -> Receiver<Run> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn dispatch(&mut self, action: Action) -> &Run {
        let now = self.clock.now_millis();
        let next = machine::apply(&self.run, &action, now);
        if next != self.run {
            self.run = next;
            self.publish();
        }
        &self.run
    }

    pub fn pick_seed(&mut self, seed: &str) {
        self.dispatch(Action::PickSeed(seed.to_string()));
    }

    pub fn set_flags(&mut self, flags: RandoFlags) {
        self.dispatch(Action::SetFlags(flags));
    }

    fn publish(&mut self) {
        let run = &self.run;
        let before = self.subscribers.len();
        self.subscribers.retain(|tx| tx.send(run.clone()).is_ok());
        if self.subscribers.len() != before {
            debug!(
                "dropped {} closed subscribers",
                before - self.subscribers.len()
            );
        }
    }
}

impl<C: Clock> RunControls for RunManager<C> {
    fn add_split(&mut self) {
        self.dispatch(Action::AddSplit);
    }

    fn undo_split(&mut self) {
        self.dispatch(Action::UndoSplit);
    }

    fn skip_split(&mut self) {
        self.dispatch(Action::SkipSplit);
    }

    fn reset_splits(&mut self) {
        self.dispatch(Action::ResetSplits);
    }

    fn pause(&mut self) {
        self.dispatch(Action::Pause);
    }

    fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    fn toggle_blood_moon(&mut self) {
        self.dispatch(Action::ToggleBloodMoon);
    }

    fn toggle_seed_visibility(&mut self) {
        self.dispatch(Action::ToggleSeedVisibility);
    }

    fn quit(&mut self) {
        self.show_help = false;
        self.dispatch(Action::Quit);
    }
}
