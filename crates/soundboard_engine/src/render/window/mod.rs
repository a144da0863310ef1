//! Window management subsystem
//!
//! - **`handle`**: application-facing [`WindowHandle`]
//! - **`backend`**: internal trait the platform window implements
//!
//! The glfw implementation lives in `../vulkan/window.rs` because it also
//! creates the Vulkan surface.

pub mod handle;
pub(crate) mod backend;

pub use crate::render::vulkan::window::{WindowError, WindowResult};
pub use handle::WindowHandle;
