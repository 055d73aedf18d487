//! Editing the player name after a scoring round
use crate::consts;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A single-line input field restricted to the characters allowed in player
/// names
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct NameEntry {
    name: String,
}

/// The result of a key press that finished editing
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum NameOutcome {
    /// The player confirmed a valid name
    Submit(String),
    /// The player declined to post their score
    Cancel,
}

impl NameEntry {
    /// Start editing with `initial` as the current value.  Any invalid
    /// characters in `initial` are dropped.
    pub(crate) fn new(initial: &str) -> NameEntry {
        NameEntry {
            name: initial
                .chars()
                .filter(|&ch| valid_char(ch))
                .take(consts::MAX_NAME_LEN)
                .collect(),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Handle a key press.  Characters outside the allowed set are ignored,
    /// as is Enter while the name is empty.
    pub(crate) fn handle_key(&mut self, ev: KeyEvent) -> Option<NameOutcome> {
        match ev.code {
            KeyCode::Enter => {
                if is_valid_name(&self.name) {
                    return Some(NameOutcome::Submit(self.name.clone()));
                }
            }
            KeyCode::Esc => return Some(NameOutcome::Cancel),
            KeyCode::Backspace => {
                let _ = self.name.pop();
            }
            KeyCode::Char(ch)
                if (KeyModifiers::NONE | KeyModifiers::SHIFT).contains(ev.modifiers)
                    && valid_char(ch)
                    && self.name.len() < consts::MAX_NAME_LEN =>
            {
                self.name.push(ch);
            }
            _ => (),
        }
        None
    }
}

fn valid_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

/// Is `name` acceptable as a player name?
pub(crate) fn is_valid_name(name: &str) -> bool {
    (1..=consts::MAX_NAME_LEN).contains(&name.len()) && name.chars().all(valid_char)
}
