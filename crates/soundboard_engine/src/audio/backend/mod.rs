//! Audio backend implementations
//!
//! Platform-independent abstraction over audio playback libraries.

pub mod rodio_backend;
pub mod null_backend;

pub use null_backend::NullBackend;
pub use rodio_backend::RodioBackend;

use crate::audio::{AudioClip, AudioError};

/// Handle to one playback started by [`AudioBackend::play_clip`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackHandle {
    /// Unique identifier for the playback
    pub id: u32,
    /// Generation counter for handle validation
    pub generation: u32,
}

impl PlaybackHandle {
    /// Create a new playback handle
    pub fn new(id: u32, generation: u32) -> Self {
        Self { id, generation }
    }
}

/// Hands out fresh playback handles
#[derive(Debug, Default)]
pub(crate) struct HandleAllocator {
    next_id: u32,
    generation: u32,
}

impl HandleAllocator {
    pub(crate) fn next(&mut self) -> PlaybackHandle {
        let handle = PlaybackHandle::new(self.next_id, self.generation);
        self.next_id = self.next_id.wrapping_add(1);
        if self.next_id == 0 {
            self.generation = self.generation.wrapping_add(1);
        }
        handle
    }
}

/// Audio backend trait for platform abstraction
///
/// Playback is fire-and-forget: `play_clip` returns as soon as the clip is
/// queued. Each call gets its own handle, kept in the backend's active set
/// until the clip finishes (pruned by `update`) or is stopped.
///
/// Not `Send + Sync`: the frame loop owns the backend on the main thread while
/// the output device mixes on its own.
pub trait AudioBackend {
    /// Initialize the audio backend
    fn initialize(&mut self, config: &AudioBackendConfig) -> Result<(), AudioError>;

    /// Shutdown the audio backend
    fn shutdown(&mut self);

    /// Check if backend is initialized
    fn is_initialized(&self) -> bool;

    /// Update the backend (cleanup finished playbacks)
    fn update(&mut self);

    /// Stop all playing clips
    fn stop_all(&mut self);

    /// Start playing `clip` from its first sample
    fn play_clip(&mut self, clip: &AudioClip) -> Result<PlaybackHandle, AudioError>;

    /// Stop one playback; stopping an unknown handle is a no-op
    fn stop(&mut self, handle: PlaybackHandle) -> Result<(), AudioError>;

    /// Check if a playback is still running
    fn is_playing(&self, handle: PlaybackHandle) -> bool;

    /// Number of playbacks in the active set
    fn active_count(&self) -> usize;
}

/// Configuration for audio backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioBackendConfig {
    /// Sample rate (e.g., 44100, 48000)
    pub sample_rate: u32,
    /// Number of output channels (1=mono, 2=stereo)
    pub channels: u16,
    /// Buffer size in frames
    pub buffer_size: usize,
}

impl Default for AudioBackendConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            channels: 2,
            buffer_size: 44100 / 30,
        }
    }
}

/// Create the default audio backend for the platform
pub fn create_backend(config: &AudioBackendConfig) -> Result<Box<dyn AudioBackend>, AudioError> {
    let mut backend = Box::new(RodioBackend::new());
    backend.initialize(config)?;
    Ok(backend)
}
