use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;

use crate::config::Config;
use crate::keyboard::KeyMap;
use crate::manager::RunManager;
use crate::rando::{self, Preset};
use crate::run::{Run, RunState};
use crate::runtime::{AppEvent, Flow};
use crate::timer::{Clock, SystemClock};

/// Seed entry shown while no run is loaded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedPicker {
    pub input: String,
    pub preset: Preset,
}

impl SeedPicker {
    const MAX_LEN: usize = 32;

    pub fn push(&mut self, c: char) {
        if self.input.len() < Self::MAX_LEN && (c.is_ascii_alphanumeric() || c == '-') {
            self.input.push(c);
        }
    }
}

pub struct App<C: Clock = SystemClock> {
    pub manager: RunManager<C>,
    pub keymap: KeyMap,
    pub picker: SeedPicker,
}

impl App<SystemClock> {
    pub fn new(config: &Config, seed: Option<String>) -> Self {
        Self::with_clock(config, seed, SystemClock)
    }
}

impl<C: Clock> App<C> {
    pub fn with_clock(config: &Config, seed: Option<String>, clock: C) -> Self {
        let run = Run {
            flags: config.preset.flags(),
            show_seed: config.show_seed,
            ..Run::default()
        };
        let mut app = Self {
            manager: RunManager::with_clock(run, clock),
            keymap: KeyMap::default(),
            picker: SeedPicker {
                input: String::new(),
                preset: config.preset,
            },
        };
        if let Some(seed) = seed {
            app.manager.pick_seed(&seed);
        }
        app
    }

    pub fn run(&self) -> &Run {
        self.manager.run()
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Flow {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize | AppEvent::Tick => Flow::Continue,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Flow::Exit;
        }

        if self.run().state == RunState::None {
            self.handle_picker_key(key);
            return Flow::Continue;
        }

        if !self.keymap.dispatch(key, &mut self.manager) {
            debug!("unbound key {:?}", key.code);
        }
        Flow::Continue
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.picker.input = rando::random_seed();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.picker.push(c);
            }
            KeyCode::Backspace => {
                self.picker.input.pop();
            }
            KeyCode::Tab => {
                self.picker.preset = self.picker.preset.next();
                self.manager.set_flags(self.picker.preset.flags());
            }
            KeyCode::Enter => {
                let seed = if self.picker.input.trim().is_empty() {
                    rando::random_seed()
                } else {
                    self.picker.input.clone()
                };
                self.manager.set_flags(self.picker.preset.flags());
                self.manager.pick_seed(&seed);
                self.picker.input.clear();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualClock;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App<ManualClock> {
        App::with_clock(&Config::default(), None, ManualClock::new(0))
    }

    #[test]
    fn test_typed_seed_is_picked() {
        let mut app = app();
        for c in "xyz".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.run().state, RunState::Init);
        assert_eq!(app.run().seed, "xyz");
        assert!(app.picker.input.is_empty());
    }

    #[test]
    fn test_empty_seed_rolls_random() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.run().seed.len(), rando::SEED_LENGTH);
    }

    #[test]
    fn test_picker_ignores_symbols_and_backspaces() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('a')));
        app.handle_key(key(KeyCode::Char('!')));
        app.handle_key(key(KeyCode::Char('b')));
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.picker.input, "a");
    }

    #[test]
    fn test_tab_cycles_preset() {
        let mut app = app();
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.picker.preset, Preset::PlateauFirst);
        assert!(app.run().flags.plateau_first);
    }

    #[test]
    fn test_ctrl_r_rolls_seed() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert_eq!(app.picker.input.len(), rando::SEED_LENGTH);
    }

    #[test]
    fn test_escape_and_ctrl_c_exit() {
        let mut app = app();
        assert_eq!(app.handle_key(key(KeyCode::Esc)), Flow::Exit);
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Flow::Exit
        );
    }

    #[test]
    fn test_cli_seed_skips_picker() {
        let app = App::with_clock(&Config::default(), Some("xyz".into()), ManualClock::new(0));
        assert_eq!(app.run().state, RunState::Init);
    }

    #[test]
    fn test_keys_drive_run() {
        let mut app = App::with_clock(&Config::default(), Some("xyz".into()), ManualClock::new(0));
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(app.run().splits.len(), 1);

        app.handle_key(key(KeyCode::Char('v')));
        assert!(app.run().show_seed);

        app.handle_key(key(KeyCode::Char('q')));
        assert_eq!(app.run().state, RunState::None);
    }
}
