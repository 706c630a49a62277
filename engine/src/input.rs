//! Input translation (winit -> engine events).
//!
//! Games never see winit types; they receive [`InputEvent`]s and decide what
//! each one means.

use winit::event::{ElementState, KeyEvent, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    Space,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    WheelUp,
    WheelDown,
}

pub fn key_from_code(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::Space => Key::Space,
        KeyCode::Escape => Key::Escape,
        _ => return None,
    };
    Some(key)
}

/// Maps a physical key transition. Auto-repeat presses are dropped.
pub fn translate_key(key: PhysicalKey, state: ElementState, repeat: bool) -> Option<InputEvent> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };
    let key = key_from_code(code)?;
    match state {
        ElementState::Pressed if repeat => None,
        ElementState::Pressed => Some(InputEvent::KeyDown(key)),
        ElementState::Released => Some(InputEvent::KeyUp(key)),
    }
}

pub fn translate_key_event(event: &KeyEvent) -> Option<InputEvent> {
    translate_key(event.physical_key, event.state, event.repeat)
}

pub fn translate_wheel(delta: MouseScrollDelta) -> Option<InputEvent> {
    let y = match delta {
        MouseScrollDelta::LineDelta(_, y) => f64::from(y),
        MouseScrollDelta::PixelDelta(pos) => pos.y,
    };
    if y > 0.0 {
        Some(InputEvent::WheelUp)
    } else if y < 0.0 {
        Some(InputEvent::WheelDown)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn key_transitions() {
        assert_eq!(
            translate_key(PhysicalKey::Code(KeyCode::KeyW), ElementState::Pressed, false),
            Some(InputEvent::KeyDown(Key::W))
        );
        assert_eq!(
            translate_key(PhysicalKey::Code(KeyCode::KeyW), ElementState::Released, false),
            Some(InputEvent::KeyUp(Key::W))
        );
        assert_eq!(
            translate_key(PhysicalKey::Code(KeyCode::Escape), ElementState::Pressed, false),
            Some(InputEvent::KeyDown(Key::Escape))
        );
    }

    #[test]
    fn repeats_and_unmapped_keys_are_ignored() {
        assert_eq!(
            translate_key(PhysicalKey::Code(KeyCode::KeyD), ElementState::Pressed, true),
            None
        );
        assert_eq!(
            translate_key(PhysicalKey::Code(KeyCode::KeyQ), ElementState::Pressed, false),
            None
        );
    }

    #[test]
    fn wheel_direction() {
        assert_eq!(
            translate_wheel(MouseScrollDelta::LineDelta(0.0, 1.0)),
            Some(InputEvent::WheelUp)
        );
        assert_eq!(
            translate_wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -12.0))),
            Some(InputEvent::WheelDown)
        );
        assert_eq!(translate_wheel(MouseScrollDelta::LineDelta(3.0, 0.0)), None);
    }
}
