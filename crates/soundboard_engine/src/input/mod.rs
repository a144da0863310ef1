//! Input handling
//!
//! Window events are folded into a [`FrameInput`] snapshot once per frame, so
//! the frame loop only ever asks "was this just pressed?" and "where were the
//! clicks?".

mod collector;

pub use collector::InputCollector;

use crate::foundation::math::Point2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Input gathered during one frame
#[derive(Debug, Clone)]
pub struct FrameInput {
    /// Keys that went down this frame (repeats excluded)
    pub pressed_keys: HashSet<KeyCode>,
    /// Left-button presses this frame, in framebuffer pixels, oldest first
    pub left_clicks: Vec<Point2>,
    /// Last known cursor position in framebuffer pixels
    pub cursor: Point2,
    /// The window asked to close this frame
    pub close_requested: bool,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            left_clicks: Vec::new(),
            cursor: Point2::origin(),
            close_requested: false,
        }
    }
}

impl FrameInput {
    /// Check whether `key` was pressed this frame
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Record a key press
    pub fn press(&mut self, key: KeyCode) {
        self.pressed_keys.insert(key);
    }

    /// Record a left click at `position`
    pub fn click(&mut self, position: Point2) {
        self.cursor = position;
        self.left_clicks.push(position);
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// `=` key
    Equal,
    /// `-` key
    Minus,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// F1 function key
    F1,
    /// F11 function key
    F11,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

impl KeyCode {
    /// Map a GLFW key to an engine key code
    pub fn from_glfw(key: glfw::Key) -> Option<Self> {
        use glfw::Key;

        let code = match key {
            Key::A => Self::A,
            Key::B => Self::B,
            Key::C => Self::C,
            Key::D => Self::D,
            Key::E => Self::E,
            Key::F => Self::F,
            Key::G => Self::G,
            Key::H => Self::H,
            Key::I => Self::I,
            Key::J => Self::J,
            Key::K => Self::K,
            Key::L => Self::L,
            Key::M => Self::M,
            Key::N => Self::N,
            Key::O => Self::O,
            Key::P => Self::P,
            Key::Q => Self::Q,
            Key::R => Self::R,
            Key::S => Self::S,
            Key::T => Self::T,
            Key::U => Self::U,
            Key::V => Self::V,
            Key::W => Self::W,
            Key::X => Self::X,
            Key::Y => Self::Y,
            Key::Z => Self::Z,
            Key::Equal => Self::Equal,
            Key::Minus => Self::Minus,
            Key::Space => Self::Space,
            Key::Enter => Self::Enter,
            Key::Escape => Self::Escape,
            Key::Tab => Self::Tab,
            Key::F1 => Self::F1,
            Key::F11 => Self::F11,
            Key::Up => Self::Up,
            Key::Down => Self::Down,
            Key::Left => Self::Left,
            Key::Right => Self::Right,
            _ => return None,
        };
        Some(code)
    }
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

impl MouseButton {
    /// Map a GLFW mouse button
    pub fn from_glfw(button: glfw::MouseButton) -> Option<Self> {
        match button {
            glfw::MouseButton::Button1 => Some(Self::Left),
            glfw::MouseButton::Button2 => Some(Self::Right),
            glfw::MouseButton::Button3 => Some(Self::Middle),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_just_pressed() {
        let mut input = FrameInput::default();
        assert!(!input.just_pressed(KeyCode::Equal));

        input.press(KeyCode::Equal);
        assert!(input.just_pressed(KeyCode::Equal));
        assert!(!input.just_pressed(KeyCode::F));
    }

    #[test]
    fn test_glfw_key_mapping() {
        assert_eq!(KeyCode::from_glfw(glfw::Key::Escape), Some(KeyCode::Escape));
        assert_eq!(KeyCode::from_glfw(glfw::Key::Equal), Some(KeyCode::Equal));
        assert_eq!(KeyCode::from_glfw(glfw::Key::KpEnter), None);
        assert_eq!(
            MouseButton::from_glfw(glfw::MouseButton::Button1),
            Some(MouseButton::Left)
        );
    }
}
