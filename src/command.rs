use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A key press translated into something the game understands
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Pause,
    Sound,
    Continue,
    StartNormal,
    StartWrap,
    HighScores,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c' | 'q')) => Some(Command::Quit),
            (KeyModifiers::CONTROL, KeyCode::Char('p')) => Some(Command::Pause),
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => Some(Command::Sound),
            (KeyModifiers::CONTROL, KeyCode::Char('r')) => Some(Command::StartNormal),
            (KeyModifiers::CONTROL, KeyCode::Char('e')) => Some(Command::StartWrap),
            (KeyModifiers::CONTROL, KeyCode::Char('h')) => Some(Command::HighScores),
            (_, KeyCode::Up) => Some(Command::Up),
            (_, KeyCode::Down) => Some(Command::Down),
            (_, KeyCode::Left) => Some(Command::Left),
            (_, KeyCode::Right) => Some(Command::Right),
            (m, code) if normal_modifiers.contains(m) => match code {
                KeyCode::Char(' ') => Some(Command::Continue),
                KeyCode::Char('q' | 'Q') => Some(Command::Quit),
                KeyCode::Char('p' | 'P') => Some(Command::Pause),
                KeyCode::Char('s' | 'S') => Some(Command::Sound),
                KeyCode::Char('r' | 'R') => Some(Command::StartNormal),
                KeyCode::Char('e' | 'E') => Some(Command::StartWrap),
                KeyCode::Char('h' | 'H') => Some(Command::HighScores),
                _ => None,
            },
            _ => None,
        }
    }
}
