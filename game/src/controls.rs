//! Key state and the input dispatch table.

use std::collections::HashMap;

use engine::{InputEvent, Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Back,
    Left,
    Right,
}

/// Which movement keys are currently held.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeyState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl KeyState {
    pub fn set(&mut self, direction: Direction, down: bool) {
        match direction {
            Direction::Forward => self.forward = down,
            Direction::Back => self.back = down,
            Direction::Left => self.left = down,
            Direction::Right => self.right = down,
        }
    }

    pub fn is_down(&self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => self.forward,
            Direction::Back => self.back,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction, bool),
    ZoomIn,
    ZoomOut,
    Quit,
}

/// Maps input events to commands.
#[derive(Debug, Clone)]
pub struct Bindings {
    table: HashMap<InputEvent, Command>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        for (key, direction) in [
            (Key::W, Direction::Forward),
            (Key::S, Direction::Back),
            (Key::A, Direction::Left),
            (Key::D, Direction::Right),
        ] {
            bindings.bind(InputEvent::KeyDown(key), Command::Move(direction, true));
            bindings.bind(InputEvent::KeyUp(key), Command::Move(direction, false));
        }
        bindings.bind(InputEvent::WheelUp, Command::ZoomIn);
        bindings.bind(InputEvent::WheelDown, Command::ZoomOut);
        bindings.bind(InputEvent::KeyDown(Key::Escape), Command::Quit);
        bindings
    }
}

impl Bindings {
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Replaces any existing binding for `event`.
    pub fn bind(&mut self, event: InputEvent, command: Command) {
        self.table.insert(event, command);
    }

    pub fn command(&self, event: InputEvent) -> Option<Command> {
        self.table.get(&event).copied()
    }
}
