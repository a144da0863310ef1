//! GLFW-based window management for Vulkan rendering
//!
//! Window lifecycle, event polling, fullscreen switching and Vulkan surface
//! creation. Kept next to the rest of the Vulkan code because the surface and
//! instance extensions tie it to this backend.

use std::any::Any;

use glfw::{ClientApiHint, WindowEvent, WindowHint, WindowMode};
use thiserror::Error;

use crate::config::WindowConfig;
use crate::render::window::backend::WindowBackend;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW could not start
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// The platform refused to open a window
    #[error("Window creation failed")]
    CreationFailed,

    /// Any other GLFW failure
    #[error("GLFW error: {0}")]
    GlfwError(String),
}

/// Result alias for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// GLFW window wrapper with proper resource management
pub struct Window {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
    fullscreen: bool,
    // Placement to restore when leaving fullscreen
    windowed_pos: (i32, i32),
    windowed_size: (i32, i32),
}

impl Window {
    /// Open a window without a client API so Vulkan can own the surface
    pub fn new(config: &WindowConfig) -> WindowResult<Self> {
        let mut glfw =
            glfw::init(glfw::log_errors).map_err(|e| WindowError::InitializationFailed(format!("{:?}", e)))?;

        glfw.window_hint(WindowHint::ClientApi(ClientApiHint::NoApi));
        glfw.window_hint(WindowHint::Resizable(config.resizable));

        let (mut window, events) = glfw
            .create_window(config.width, config.height, &config.title, WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed)?;

        window.set_key_polling(true);
        window.set_mouse_button_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_close_polling(true);
        window.set_size_polling(true);
        window.set_framebuffer_size_polling(true);

        let windowed_pos = window.get_pos();
        let windowed_size = window.get_size();

        log::info!("Created {}x{} window \"{}\"", config.width, config.height, config.title);

        Ok(Self {
            glfw,
            window,
            events,
            fullscreen: false,
            windowed_pos,
            windowed_size,
        })
    }

    /// Get required Vulkan instance extensions from GLFW
    pub fn get_required_instance_extensions(&self) -> WindowResult<Vec<String>> {
        self.glfw
            .get_required_instance_extensions()
            .ok_or_else(|| WindowError::GlfwError("Vulkan is not supported by this platform".to_string()))
    }

    /// Create Vulkan surface using GLFW's built-in functionality
    pub fn create_vulkan_surface(&mut self, instance: ash::vk::Instance) -> WindowResult<ash::vk::SurfaceKHR> {
        let mut surface = ash::vk::SurfaceKHR::null();
        let result = self.window.create_window_surface(instance, std::ptr::null(), &mut surface);

        if result == ash::vk::Result::SUCCESS {
            Ok(surface)
        } else {
            Err(WindowError::GlfwError(format!("Failed to create Vulkan surface: {:?}", result)))
        }
    }

    fn enter_fullscreen(&mut self) -> bool {
        self.windowed_pos = self.window.get_pos();
        self.windowed_size = self.window.get_size();

        let window = &mut self.window;
        let switched = self.glfw.with_primary_monitor(|_, monitor| {
            let monitor = monitor?;
            let mode = monitor.get_video_mode()?;
            window.set_monitor(
                WindowMode::FullScreen(&*monitor),
                0,
                0,
                mode.width,
                mode.height,
                Some(mode.refresh_rate),
            );
            Some((mode.width, mode.height))
        });

        match switched {
            Some((width, height)) => {
                log::info!("Fullscreen on primary monitor at {}x{}", width, height);
                true
            }
            None => {
                log::warn!("No primary monitor available; staying windowed");
                false
            }
        }
    }

    fn leave_fullscreen(&mut self) {
        let (x, y) = self.windowed_pos;
        let (width, height) = self.windowed_size;
        self.window
            .set_monitor(WindowMode::Windowed, x, y, width.max(1) as u32, height.max(1) as u32, None);
        log::info!("Back to windowed mode at {}x{}", width, height);
    }
}

impl WindowBackend for Window {
    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    fn event_iter(&self) -> Box<dyn Iterator<Item = (f64, WindowEvent)> + '_> {
        Box::new(glfw::flush_messages(&self.events))
    }

    fn get_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_size();
        (width.max(0) as u32, height.max(0) as u32)
    }

    fn get_framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width.max(0) as u32, height.max(0) as u32)
    }

    fn get_cursor_pos(&self) -> (f64, f64) {
        self.window.get_cursor_pos()
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        if fullscreen == self.fullscreen {
            return;
        }

        if fullscreen {
            self.fullscreen = self.enter_fullscreen();
        } else {
            self.leave_fullscreen();
            self.fullscreen = false;
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
