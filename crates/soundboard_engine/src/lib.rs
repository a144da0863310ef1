//! # Soundboard Engine
//!
//! Building blocks for a clickable image soundboard: asset loading, a button
//! registry with hit testing, audio playback, and a software canvas presented
//! through Vulkan.
//!
//! ## Features
//!
//! - **Assets**: images and sounds read from disk or from embedded tables
//! - **Buttons**: ordered, non-overlapping rectangles mapped to sounds
//! - **Audio**: rodio playback with overlapping one-shot voices
//! - **Rendering**: CPU-composed frames copied into a Vulkan swapchain
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use soundboard_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SoundboardConfig::default();
//!     let source = FileSystemSource::new(&config.assets.root);
//!     let layout = ColumnLayout::from_config(&config.layout);
//!     let registry = ButtonRegistry::load(&source, &config.assets, &layout)?;
//!
//!     let mut audio = NullBackend::new();
//!     audio.initialize(&AudioBackendConfig::default())?;
//!     if let Some(id) = registry.hit_test(Point2::new(120.0, 90.0)) {
//!         registry.play(id, &mut audio)?;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod assets;
pub mod audio;
pub mod input;
pub mod render;
pub mod ui;

#[cfg(test)]
mod testing;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{AssetError, AssetSource, EmbeddedSource, FileSystemSource, ImageData},
        audio::{
            backend::{create_backend, NullBackend, RodioBackend},
            AudioBackend, AudioBackendConfig, AudioClip, AudioError, PlaybackHandle,
        },
        config::{Config, ConfigError, KeyBindings, SoundboardConfig, WindowConfig},
        foundation::{
            math::{Point2, Rect, Vec2, Vec4},
            time::{FpsCounter, FpsSample, Timer},
        },
        input::{FrameInput, InputCollector, KeyCode, MouseButton},
        render::{
            random_unit_color, Canvas, FramePresenter, PresentError, PresentOutcome, VulkanPresenter,
            WindowError, WindowHandle,
        },
        ui::{Button, ButtonRegistry, ColumnLayout, RegistryError},
    };
}
