use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use itertools::Itertools;

/// Capabilities the input layer may invoke on a run.
///
/// Key handlers and on-screen controls receive an implementation explicitly
/// instead of looking callbacks up globally.
pub trait RunControls {
    fn add_split(&mut self);
    fn undo_split(&mut self);
    fn skip_split(&mut self);
    fn reset_splits(&mut self);
    fn pause(&mut self);
    fn toggle_help(&mut self);
    fn toggle_blood_moon(&mut self);
    fn toggle_seed_visibility(&mut self);
    fn quit(&mut self);
}

/// Named input actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum KeyAction {
    #[strum(serialize = "Start / split")]
    AddSplit,
    #[strum(serialize = "Undo last split")]
    UndoSplit,
    #[strum(serialize = "Skip split")]
    SkipSplit,
    #[strum(serialize = "Reset splits")]
    ResetSplits,
    #[strum(serialize = "Pause")]
    Pause,
    #[strum(serialize = "Show / hide help")]
    ToggleHelp,
    #[strum(serialize = "Toggle Blood Moon")]
    ToggleBloodMoon,
    #[strum(serialize = "Show / hide seed")]
    ToggleSeed,
    #[strum(serialize = "Quit run")]
    Quit,
}

impl KeyAction {
    pub fn invoke<R: RunControls + ?Sized>(self, controls: &mut R) {
        match self {
            KeyAction::AddSplit => controls.add_split(),
            KeyAction::UndoSplit => controls.undo_split(),
            KeyAction::SkipSplit => controls.skip_split(),
            KeyAction::ResetSplits => controls.reset_splits(),
            KeyAction::Pause => controls.pause(),
            KeyAction::ToggleHelp => controls.toggle_help(),
            KeyAction::ToggleBloodMoon => controls.toggle_blood_moon(),
            KeyAction::ToggleSeed => controls.toggle_seed_visibility(),
            KeyAction::Quit => controls.quit(),
        }
    }
}

/// Key code -> action bindings, in help display order
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: Vec<(KeyCode, KeyAction)>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            bindings: vec![
                (KeyCode::Char(' '), KeyAction::AddSplit),
                (KeyCode::Enter, KeyAction::AddSplit),
                (KeyCode::Backspace, KeyAction::UndoSplit),
                (KeyCode::Char('u'), KeyAction::UndoSplit),
                (KeyCode::Right, KeyAction::SkipSplit),
                (KeyCode::Char('s'), KeyAction::SkipSplit),
                (KeyCode::Char('r'), KeyAction::ResetSplits),
                (KeyCode::Char('p'), KeyAction::Pause),
                (KeyCode::Char('h'), KeyAction::ToggleHelp),
                (KeyCode::Char('b'), KeyAction::ToggleBloodMoon),
                (KeyCode::Char('v'), KeyAction::ToggleSeed),
                (KeyCode::Char('q'), KeyAction::Quit),
            ],
        }
    }
}

impl KeyMap {
    pub fn new(bindings: Vec<(KeyCode, KeyAction)>) -> Self {
        Self { bindings }
    }

    pub fn action_for(&self, code: KeyCode) -> Option<KeyAction> {
        let code = match code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == code)
            .map(|(_, action)| *action)
    }

    /// Invokes the bound action on `controls`. Returns true if the key was handled.
    pub fn dispatch<R: RunControls + ?Sized>(&self, key: KeyEvent, controls: &mut R) -> bool {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }
        match self.action_for(key.code) {
            Some(action) => {
                action.invoke(controls);
                true
            }
            None => false,
        }
    }

    /// Bound keys grouped per action, for the help overlay
    pub fn hotkeys(&self) -> Vec<(KeyAction, Vec<String>)> {
        self.bindings
            .iter()
            .into_group_map_by(|(_, action)| *action)
            .into_iter()
            .sorted_by_key(|(action, _)| {
                self.bindings
                    .iter()
                    .position(|(_, a)| a == action)
                    .unwrap_or(usize::MAX)
            })
            .map(|(action, keys)| {
                let names = keys.iter().map(|(code, _)| short_key_name(*code)).collect();
                (action, names)
            })
            .collect()
    }
}

pub fn short_key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        other => format!("{other:?}"),
    }
}
