//! Input handling: key events to game commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// One of the four walkable directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDir {
    North,
    South,
    East,
    West,
}

impl MoveDir {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            MoveDir::North => (0, -1),
            MoveDir::South => (0, 1),
            MoveDir::East => (1, 0),
            MoveDir::West => (-1, 0),
        }
    }
}

/// A resolved game command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(MoveDir),
    /// Take the staircase down, when standing on it.
    Descend,
    /// Open the travel overlay.
    Travel,
    /// Describe the current position.
    Look,
    Redraw,
    Quit,
}

/// Convert a key event to a command. Vi keys and arrows both move;
/// overlay-local keys (digits, Esc) are handled in app.rs.
pub fn key_to_command(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('r') => Some(Command::Redraw),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('h') | KeyCode::Left => Some(Command::Move(MoveDir::West)),
        KeyCode::Char('j') | KeyCode::Down => Some(Command::Move(MoveDir::South)),
        KeyCode::Char('k') | KeyCode::Up => Some(Command::Move(MoveDir::North)),
        KeyCode::Char('l') | KeyCode::Right => Some(Command::Move(MoveDir::East)),

        KeyCode::Char('>') => Some(Command::Descend),
        KeyCode::Char('_') => Some(Command::Travel),
        KeyCode::Char(':') => Some(Command::Look),

        KeyCode::Char('q') => Some(Command::Quit),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_vi_keys_and_arrows_agree() {
        assert_eq!(
            key_to_command(key(KeyCode::Char('h'))),
            key_to_command(key(KeyCode::Left))
        );
        assert_eq!(
            key_to_command(key(KeyCode::Char('k'))),
            Some(Command::Move(MoveDir::North))
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(key_to_command(key(KeyCode::Char('>'))), Some(Command::Descend));
        assert_eq!(key_to_command(key(KeyCode::Char('_'))), Some(Command::Travel));
        assert_eq!(key_to_command(key(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(key_to_command(key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_ctrl_redraw() {
        let event = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert_eq!(key_to_command(event), Some(Command::Redraw));
    }
}
