//! Backend-agnostic window management trait
//!
//! Internal contract between [`WindowHandle`](super::WindowHandle) and the
//! concrete windowing library. Applications never see it.

use glfw::WindowEvent;

/// Internal trait for window backend implementations
///
/// Not `Send`: glfw windows live on the main thread.
pub(crate) trait WindowBackend {
    /// Check if the window should close
    fn should_close(&self) -> bool;

    /// Set whether the window should close
    fn set_should_close(&mut self, should_close: bool);

    /// Pump the platform event queue
    fn poll_events(&mut self);

    /// Drain the events received by the last `poll_events`
    fn event_iter(&self) -> Box<dyn Iterator<Item = (f64, WindowEvent)> + '_>;

    /// Client area size in screen coordinates
    fn get_size(&self) -> (u32, u32);

    /// Drawable size in pixels
    fn get_framebuffer_size(&self) -> (u32, u32);

    /// Cursor position in screen coordinates relative to the client area
    fn get_cursor_pos(&self) -> (f64, f64);

    /// Set the window title text
    fn set_title(&mut self, title: &str);

    /// Check if the window currently covers a monitor
    fn is_fullscreen(&self) -> bool;

    /// Move the window onto the primary monitor, or back to its windowed placement
    fn set_fullscreen(&mut self, fullscreen: bool);

    /// Get mutable access to the concrete type for downcasting
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
