//! Key mapping from terminal events to game commands.

use crate::types::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Move(Direction),
    TogglePause,
    Restart,
}

/// Map keyboard input to a game command.
pub fn map_key(key: KeyEvent) -> Option<InputCommand> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => {
            Some(InputCommand::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => {
            Some(InputCommand::Move(Direction::Right))
        }
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => {
            Some(InputCommand::Move(Direction::Down))
        }
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => {
            Some(InputCommand::Move(Direction::Rotate))
        }

        KeyCode::Char(' ' | 'p' | 'P') => Some(InputCommand::TogglePause),
        KeyCode::Char('r' | 'R') => Some(InputCommand::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Option<InputCommand> {
        map_key(KeyEvent::from(code))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(key(KeyCode::Left), Some(InputCommand::Move(Direction::Left)));
        assert_eq!(key(KeyCode::Right), Some(InputCommand::Move(Direction::Right)));
        assert_eq!(key(KeyCode::Down), Some(InputCommand::Move(Direction::Down)));
        assert_eq!(key(KeyCode::Char('H')), Some(InputCommand::Move(Direction::Left)));
        assert_eq!(key(KeyCode::Char('d')), Some(InputCommand::Move(Direction::Right)));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(key(KeyCode::Up), Some(InputCommand::Move(Direction::Rotate)));
        assert_eq!(key(KeyCode::Char('w')), Some(InputCommand::Move(Direction::Rotate)));
    }

    #[test]
    fn test_session_keys() {
        assert_eq!(key(KeyCode::Char(' ')), Some(InputCommand::TogglePause));
        assert_eq!(key(KeyCode::Char('p')), Some(InputCommand::TogglePause));
        assert_eq!(key(KeyCode::Char('r')), Some(InputCommand::Restart));
        assert_eq!(key(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }
}
