//! High-level window handle for applications

use glfw::WindowEvent;

use crate::config::WindowConfig;
use crate::render::vulkan::window::{Window as GlfwWindow, WindowResult};
use crate::render::window::backend::WindowBackend;

/// Application-facing window
///
/// Wraps the platform window so the frame loop never names glfw or Vulkan
/// types beyond the events it consumes.
pub struct WindowHandle {
    backend: Box<dyn WindowBackend>,
}

impl WindowHandle {
    /// Open a window described by `config`
    pub fn new(config: &WindowConfig) -> WindowResult<Self> {
        let window = GlfwWindow::new(config)?;
        Ok(Self {
            backend: Box::new(window),
        })
    }

    /// Check if the window should close
    pub fn should_close(&self) -> bool {
        self.backend.should_close()
    }

    /// Set whether the window should close
    pub fn set_should_close(&mut self, should_close: bool) {
        self.backend.set_should_close(should_close);
    }

    /// Poll for events
    pub fn poll_events(&mut self) {
        self.backend.poll_events();
    }

    /// Events received by the last [`poll_events`](Self::poll_events)
    pub fn event_iter(&self) -> impl Iterator<Item = (f64, WindowEvent)> + '_ {
        self.backend.event_iter()
    }

    /// Client area size in screen coordinates
    pub fn get_size(&self) -> (u32, u32) {
        self.backend.get_size()
    }

    /// Drawable size in pixels; differs from `get_size` on high-DPI displays
    pub fn get_framebuffer_size(&self) -> (u32, u32) {
        self.backend.get_framebuffer_size()
    }

    /// Current cursor position in window coordinates
    pub fn get_cursor_pos(&self) -> (f64, f64) {
        self.backend.get_cursor_pos()
    }

    /// Set the window title
    pub fn set_title(&mut self, title: &str) {
        self.backend.set_title(title);
    }

    /// Check if the window is in fullscreen mode
    pub fn is_fullscreen(&self) -> bool {
        self.backend.is_fullscreen()
    }

    /// Set fullscreen mode on the primary monitor
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.backend.set_fullscreen(fullscreen);
    }

    /// The glfw window, for the Vulkan presenter's surface setup
    pub(crate) fn glfw_window_mut(&mut self) -> Option<&mut GlfwWindow> {
        self.backend.as_any_mut().downcast_mut::<GlfwWindow>()
    }
}
