use crate::coordinates::Direction;

/// A decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Arrow(Direction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Start,
    Turn {
        direction: Direction,
        forbidden: Direction,
    },
    Faster,
    Slower,
}

/// Maps keys to game actions. Direction keys carry the direction they would
/// reverse, so the game can refuse 180° turns.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputMapper;

impl InputMapper {
    pub fn map(&self, key: Key) -> Option<KeyAction> {
        let direction = match key {
            Key::Arrow(direction) => direction,
            Key::Char(' ') => return Some(KeyAction::Start),
            Key::Char('+') => return Some(KeyAction::Faster),
            Key::Char('-') => return Some(KeyAction::Slower),
            Key::Char(c) => match c.to_ascii_lowercase() {
                'z' | 'w' => Direction::Up,
                'q' | 'a' => Direction::Left,
                's' => Direction::Down,
                'd' => Direction::Right,
                _ => return None,
            },
        };
        Some(KeyAction::Turn {
            direction,
            forbidden: direction.opposite(),
        })
    }
}
