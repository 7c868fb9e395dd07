use ratatui::{buffer::Buffer, layout::Rect};

use crate::app::App;
use crate::run::{Run, RunState};
use crate::timer::Clock;
use crate::ui::{render_picker, render_run};

/// A UI screen boundary
pub trait Screen<C: Clock> {
    fn render(&self, app: &App<C>, area: Rect, buf: &mut Buffer);
}

/// Seed picker, shown before a run is loaded
pub struct PickerScreen;

impl<C: Clock> Screen<C> for PickerScreen {
    fn render(&self, app: &App<C>, area: Rect, buf: &mut Buffer) {
        render_picker(app, area, buf);
    }
}

/// Timer and splits for a loaded run
pub struct RunScreen;

impl<C: Clock> Screen<C> for RunScreen {
    fn render(&self, app: &App<C>, area: Rect, buf: &mut Buffer) {
        render_run(app, area, buf);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen<C: Clock>(run: &Run) -> Box<dyn Screen<C>> {
    match run.state {
        RunState::None => Box::new(PickerScreen),
        _ => Box::new(RunScreen),
    }
}
