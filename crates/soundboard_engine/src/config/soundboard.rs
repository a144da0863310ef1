//! Soundboard configuration structures
//!
//! `Default` reproduces the stock animal board: six animals in two columns of
//! an 800x600 window, JPEG pictures and MP3 clips under `assets/`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::Config;
use crate::audio::backend::AudioBackendConfig;
use crate::input::KeyCode;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SoundboardConfig {
    /// Window settings
    pub window: WindowConfig,
    /// Audio output settings
    pub audio: AudioConfig,
    /// Asset locations and the button manifest
    pub assets: AssetConfig,
    /// Button placement
    pub layout: LayoutConfig,
    /// Key bindings
    pub keys: KeyBindings,
}

impl Config for SoundboardConfig {}

/// Window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Base window title; frame statistics are appended once per second
    pub title: String,
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
    /// Whether the user may resize the window
    pub resizable: bool,
    /// Wait for vertical blank when presenting
    pub vsync: bool,
    /// Clear color (RGBA, 0.0 to 1.0)
    pub background: [f32; 4],
    /// Outline thickness of the debug overlay in pixels
    pub debug_outline_width: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "aerth animals".to_string(),
            width: 800,
            height: 600,
            resizable: false,
            vsync: true,
            background: [0.0, 0.0, 0.0, 1.0],
            debug_outline_width: 2,
        }
    }
}

/// Audio output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Preferred output sample rate in Hz
    pub sample_rate: u32,
    /// Output channel count
    pub channels: u16,
    /// Internal buffering latency in milliseconds
    pub latency_ms: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 41_000,
            channels: 2,
            latency_ms: 33,
        }
    }
}

impl AudioConfig {
    /// Convert to the backend's configuration
    pub fn backend_config(&self) -> AudioBackendConfig {
        let buffer_size = (u64::from(self.sample_rate) * u64::from(self.latency_ms) / 1000) as usize;
        AudioBackendConfig {
            sample_rate: self.sample_rate,
            channels: self.channels,
            buffer_size: buffer_size.max(1),
        }
    }
}

/// Asset locations and the ordered button manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Root directory for filesystem assets
    pub root: PathBuf,
    /// Image directory relative to the root
    pub image_dir: String,
    /// Sound directory relative to the root
    pub sound_dir: String,
    /// Image file extension
    pub image_extension: String,
    /// Sound file extension
    pub sound_extension: String,
    /// Button identifiers in priority order
    pub manifest: Vec<String>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
            image_dir: "image".to_string(),
            sound_dir: "sound".to_string(),
            image_extension: "jpg".to_string(),
            sound_extension: "mp3".to_string(),
            manifest: ["cow", "horse", "chicken", "sheep", "cat", "dog"]
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
        }
    }
}

impl AssetConfig {
    /// Relative path of the picture for `name`
    pub fn image_path(&self, name: &str) -> String {
        format!("{}/{}.{}", self.image_dir, name, self.image_extension)
    }

    /// Relative path of the sound clip for `name`
    pub fn sound_path(&self, name: &str) -> String {
        format!("{}/{}.{}", self.sound_dir, name, self.sound_extension)
    }
}

/// Button placement settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Top-left corner of the first cell
    pub origin: [f32; 2],
    /// Buttons per column before starting the next column
    pub rows_per_column: usize,
    /// Gap between cells in pixels
    pub spacing: f32,
    /// Minimum horizontal distance between column origins
    pub min_column_stride: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin: [100.0, 0.0],
            rows_per_column: 3,
            spacing: 0.0,
            min_column_stride: 320.0,
        }
    }
}

/// Key bindings for the frame loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Close the window
    pub quit: KeyCode,
    /// Toggle the debug overlay
    pub toggle_debug: KeyCode,
    /// Toggle fullscreen
    pub toggle_fullscreen: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: KeyCode::Escape,
            toggle_debug: KeyCode::Equal,
            toggle_fullscreen: KeyCode::F,
        }
    }
}
