//! Folds GLFW window events into per-frame input snapshots

use glfw::{Action, WindowEvent};

use super::{FrameInput, KeyCode, MouseButton};
use crate::foundation::math::Point2;

/// Accumulates window events between frames
///
/// GLFW reports the cursor in window coordinates while the canvas is sized in
/// framebuffer pixels; on high-DPI displays those differ, so positions are
/// scaled by the framebuffer/window ratio before they reach the frame loop.
pub struct InputCollector {
    current: FrameInput,
    cursor_window: (f64, f64),
    window_size: (u32, u32),
    framebuffer_size: (u32, u32),
}

impl InputCollector {
    /// Create a collector for a window of the given sizes
    pub fn new(window_size: (u32, u32), framebuffer_size: (u32, u32)) -> Self {
        Self {
            current: FrameInput::default(),
            cursor_window: (0.0, 0.0),
            window_size,
            framebuffer_size,
        }
    }

    /// Feed one window event
    pub fn process_event(&mut self, event: &WindowEvent) {
        match *event {
            WindowEvent::Key(key, _, Action::Press, _) => {
                if let Some(code) = KeyCode::from_glfw(key) {
                    self.current.press(code);
                }
            }
            WindowEvent::CursorPos(x, y) => {
                self.cursor_window = (x, y);
                self.current.cursor = self.to_framebuffer(x, y);
            }
            WindowEvent::MouseButton(button, Action::Press, _) => {
                if MouseButton::from_glfw(button) == Some(MouseButton::Left) {
                    let (x, y) = self.cursor_window;
                    let position = self.to_framebuffer(x, y);
                    self.current.click(position);
                }
            }
            WindowEvent::Size(width, height) => {
                self.window_size = (width.max(0) as u32, height.max(0) as u32);
            }
            WindowEvent::FramebufferSize(width, height) => {
                self.framebuffer_size = (width.max(0) as u32, height.max(0) as u32);
            }
            WindowEvent::Close => {
                self.current.close_requested = true;
            }
            _ => {}
        }
    }

    /// Finish the frame: return everything collected and start a fresh snapshot
    ///
    /// The cursor position carries over since it is state, not an event.
    pub fn take_frame(&mut self) -> FrameInput {
        let cursor = self.current.cursor;
        let mut next = FrameInput::default();
        next.cursor = cursor;
        std::mem::replace(&mut self.current, next)
    }

    /// Place the cursor at `position` in window coordinates
    ///
    /// Clicks use the latest known position, so seed it from the window before
    /// the first `CursorPos` event arrives.
    pub fn set_cursor(&mut self, position: (f64, f64)) {
        self.cursor_window = position;
        self.current.cursor = self.to_framebuffer(position.0, position.1);
    }

    /// Update both sizes at once, e.g. after a fullscreen switch
    pub fn set_sizes(&mut self, window_size: (u32, u32), framebuffer_size: (u32, u32)) {
        self.window_size = window_size;
        self.framebuffer_size = framebuffer_size;
    }

    fn to_framebuffer(&self, x: f64, y: f64) -> Point2 {
        let scale = |fb: u32, win: u32| {
            if win == 0 {
                1.0
            } else {
                f64::from(fb) / f64::from(win)
            }
        };
        let sx = scale(self.framebuffer_size.0, self.window_size.0);
        let sy = scale(self.framebuffer_size.1, self.window_size.1);
        Point2::new((x * sx) as f32, (y * sy) as f32)
    }
}
