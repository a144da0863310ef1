//! Vulkan presentation backend
//!
//! Low-level Vulkan wrappers with RAII cleanup, and the presenter that copies
//! a software canvas into swapchain images.

pub mod buffer;
pub mod commands;
pub mod context;
pub mod presenter;
pub mod swapchain;
pub mod sync;
pub mod window;

pub use context::VulkanContext;
pub use presenter::VulkanPresenter;
pub use swapchain::Swapchain;

use ash::vk;
use thiserror::Error;

/// Vulkan-specific error types
#[derive(Error, Debug)]
pub enum VulkanError {
    /// General Vulkan API error with result code
    #[error("Vulkan API error: {0:?}")]
    Api(vk::Result),

    /// Vulkan context initialization failed
    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    /// No suitable memory type found for allocation
    #[error("No suitable memory type found")]
    NoSuitableMemoryType,
}

/// Result type for Vulkan operations
pub type VulkanResult<T> = Result<T, VulkanError>;
