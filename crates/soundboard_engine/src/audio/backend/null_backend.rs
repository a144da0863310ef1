//! Silent backend
//!
//! Accepts every clip without opening a device. Headless callers and tests
//! use it in place of [`RodioBackend`](super::RodioBackend) and inspect
//! [`NullBackend::plays`] to see what would have been heard.
//! [`create_backend`](super::create_backend) never substitutes it: a missing
//! output device is an error there.

use std::collections::HashSet;

use super::{AudioBackend, AudioBackendConfig, HandleAllocator, PlaybackHandle};
use crate::audio::{AudioClip, AudioError};

/// One recorded call to `play_clip`
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPlay {
    /// Handle returned to the caller
    pub handle: PlaybackHandle,
    /// Interleaved sample count of the clip, enough to tell clips apart
    pub samples: usize,
}

/// Backend that plays nothing and remembers everything
#[derive(Debug, Default)]
pub struct NullBackend {
    initialized: bool,
    failing: bool,
    handles: HandleAllocator,
    active: HashSet<PlaybackHandle>,
    plays: Vec<RecordedPlay>,
}

impl NullBackend {
    /// Create an uninitialized backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `play_clip` fail with `PlaybackFailed`
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Every successful play, oldest first
    pub fn plays(&self) -> &[RecordedPlay] {
        &self.plays
    }
}

impl AudioBackend for NullBackend {
    fn initialize(&mut self, config: &AudioBackendConfig) -> Result<(), AudioError> {
        log::info!(
            "Null audio backend initialized ({} Hz, {} channel(s))",
            config.sample_rate,
            config.channels
        );
        self.initialized = true;
        Ok(())
    }

    fn shutdown(&mut self) {
        self.stop_all();
        self.initialized = false;
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Nothing is ever audible, so every playback has finished by the next frame
    fn update(&mut self) {
        self.active.clear();
    }

    fn stop_all(&mut self) {
        self.active.clear();
    }

    fn play_clip(&mut self, clip: &AudioClip) -> Result<PlaybackHandle, AudioError> {
        if !self.initialized {
            return Err(AudioError::BackendNotInitialized);
        }
        if self.failing {
            return Err(AudioError::PlaybackFailed("null backend set to fail".to_string()));
        }

        let handle = self.handles.next();
        self.active.insert(handle);
        self.plays.push(RecordedPlay {
            handle,
            samples: clip.len(),
        });
        Ok(handle)
    }

    fn stop(&mut self, handle: PlaybackHandle) -> Result<(), AudioError> {
        self.active.remove(&handle);
        Ok(())
    }

    fn is_playing(&self, handle: PlaybackHandle) -> bool {
        self.active.contains(&handle)
    }

    fn active_count(&self) -> usize {
        self.active.len()
    }
}
