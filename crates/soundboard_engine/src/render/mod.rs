//! # Rendering System
//!
//! Frames are composed on the CPU in a [`Canvas`] and presented by a
//! [`FramePresenter`]. The Vulkan presenter copies the canvas into the
//! swapchain image with a single buffer-to-image transfer, so there are no
//! shaders or pipelines.
//!
//! ## Architecture
//!
//! - **Canvas**: RGBA8 software frame buffer with sprite blits and outlines
//! - **Window**: glfw window behind a backend-agnostic [`WindowHandle`]
//! - **Vulkan**: instance, device, swapchain and the blit presenter

pub mod canvas;
pub mod color;
pub mod vulkan;
pub mod window;

pub use canvas::Canvas;
pub use color::random_unit_color;
pub use vulkan::VulkanPresenter;
pub use window::{WindowError, WindowHandle};

use thiserror::Error;

/// What happened to a frame handed to [`FramePresenter::present`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentOutcome {
    /// The frame is queued for display
    Presented,
    /// The framebuffer has no area (minimized window); nothing was shown
    Skipped,
    /// The swapchain was stale and has been rebuilt; the frame was dropped
    Recreated,
}

/// Presentation errors
#[derive(Error, Debug)]
pub enum PresentError {
    /// Vulkan call failed
    #[error("Vulkan error: {0}")]
    Vulkan(#[from] vulkan::VulkanError),

    /// The canvas has no pixels
    #[error("Cannot present an empty canvas")]
    EmptyCanvas,
}

/// Puts a finished canvas on screen
pub trait FramePresenter {
    /// Show `canvas` in a framebuffer of `framebuffer_size` pixels
    fn present(&mut self, canvas: &Canvas, framebuffer_size: (u32, u32)) -> Result<PresentOutcome, PresentError>;

    /// Block until the GPU has finished with every submitted frame
    fn wait_idle(&mut self);
}
