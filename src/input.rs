use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::direction::Direction;

/// High-level commands relayed from the keyboard to the controller.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    /// Space: start when idle or over, otherwise pause/resume.
    StartOrPause,
    Start,
    TogglePause,
    Reset,
    Quit,
}

/// Maps one key press to a game command.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Char(' ') => GameInput::StartOrPause,
        KeyCode::Enter => GameInput::Start,
        KeyCode::Char('p' | 'P') => GameInput::TogglePause,
        KeyCode::Char('r' | 'R') => GameInput::Reset,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

/// Keyboard input source backed by crossterm events.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Waits up to `timeout` for a key press and maps it.
    ///
    /// Key releases and repeats (reported on some platforms) are skipped so a
    /// single press never yields two commands.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::{GameInput, map_key};
    use crate::direction::Direction;

    fn press(code: KeyCode) -> Option<GameInput> {
        map_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn arrows_and_wasd_request_turns() {
        assert_eq!(press(KeyCode::Up), Some(GameInput::Direction(Direction::Up)));
        assert_eq!(
            press(KeyCode::Char('a')),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(
            press(KeyCode::Char('S')),
            Some(GameInput::Direction(Direction::Down))
        );
        assert_eq!(
            press(KeyCode::Right),
            Some(GameInput::Direction(Direction::Right))
        );
    }

    #[test]
    fn lifecycle_keys_map_to_commands() {
        assert_eq!(press(KeyCode::Char(' ')), Some(GameInput::StartOrPause));
        assert_eq!(press(KeyCode::Enter), Some(GameInput::Start));
        assert_eq!(press(KeyCode::Char('p')), Some(GameInput::TogglePause));
        assert_eq!(press(KeyCode::Char('R')), Some(GameInput::Reset));
        assert_eq!(press(KeyCode::Esc), Some(GameInput::Quit));
    }

    #[test]
    fn ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), Some(GameInput::Quit));
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        assert_eq!(press(KeyCode::Char('x')), None);
        assert_eq!(press(KeyCode::Tab), None);
    }
}
