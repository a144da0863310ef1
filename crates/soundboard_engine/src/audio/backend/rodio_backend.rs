//! Rodio audio backend implementation
//!
//! Uses the Rodio library for cross-platform audio playback. Every call to
//! `play_clip` gets its own [`Sink`], so overlapping clicks mix instead of
//! queueing behind each other.
//!
//! # Example
//!
//! ```no_run
//! use soundboard_engine::audio::{AudioBackend, AudioBackendConfig, AudioClip};
//! use soundboard_engine::audio::backend::RodioBackend;
//!
//! let mut backend = RodioBackend::new();
//! backend.initialize(&AudioBackendConfig::default()).unwrap();
//!
//! let clip = AudioClip::decode(std::fs::read("assets/sound/cow.mp3").unwrap()).unwrap();
//! let handle = backend.play_clip(&clip).unwrap();
//!
//! if backend.is_playing(handle) {
//!     println!("Moo!");
//! }
//!
//! backend.update(); // Removes finished clips
//! backend.shutdown();
//! ```

use std::collections::HashMap;

use rodio::cpal::traits::{DeviceTrait, HostTrait};
use rodio::cpal::{self, SampleRate};
use rodio::{OutputStream, OutputStreamHandle, Sink};

use super::{AudioBackend, AudioBackendConfig, HandleAllocator, PlaybackHandle};
use crate::audio::{AudioClip, AudioError};

/// Rodio-based audio backend
pub struct RodioBackend {
    /// Audio output stream (must be kept alive)
    _output_stream: Option<OutputStream>,
    /// Output stream handle for creating sinks
    stream_handle: Option<OutputStreamHandle>,
    /// One sink per active playback
    active: HashMap<PlaybackHandle, Sink>,
    handles: HandleAllocator,
    initialized: bool,
}

impl RodioBackend {
    /// Create a new Rodio backend
    pub fn new() -> Self {
        Self {
            _output_stream: None,
            stream_handle: None,
            active: HashMap::new(),
            handles: HandleAllocator::default(),
            initialized: false,
        }
    }

    /// Open the default output device at the requested format, or at the
    /// device's own default format when it cannot do that
    fn open_stream(config: &AudioBackendConfig) -> Result<(OutputStream, OutputStreamHandle), AudioError> {
        let device = cpal::default_host().default_output_device();

        if let Some(device) = device {
            let requested = SampleRate(config.sample_rate);
            let matching = device.supported_output_configs().ok().and_then(|mut configs| {
                configs.find(|range| {
                    range.channels() == config.channels
                        && range.min_sample_rate() <= requested
                        && requested <= range.max_sample_rate()
                })
            });

            if let Some(range) = matching {
                match OutputStream::try_from_device_config(&device, range.with_sample_rate(requested)) {
                    Ok(stream) => {
                        log::info!(
                            "Audio output opened at {} Hz, {} channel(s)",
                            config.sample_rate,
                            config.channels
                        );
                        return Ok(stream);
                    }
                    Err(e) => log::warn!("Requested output format rejected ({}), using device default", e),
                }
            } else {
                log::warn!(
                    "Output device does not support {} Hz with {} channel(s), using device default",
                    config.sample_rate,
                    config.channels
                );
            }
        }

        OutputStream::try_default()
            .map_err(|e| AudioError::BackendInitFailed(format!("Failed to create audio output: {}", e)))
    }
}

impl AudioBackend for RodioBackend {
    fn initialize(&mut self, config: &AudioBackendConfig) -> Result<(), AudioError> {
        if self.initialized {
            return Ok(());
        }

        let (stream, stream_handle) = Self::open_stream(config)?;

        self._output_stream = Some(stream);
        self.stream_handle = Some(stream_handle);
        self.initialized = true;

        log::info!("Rodio audio backend initialized (buffer {} frames requested)", config.buffer_size);
        Ok(())
    }

    fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }

        self.stop_all();

        self.stream_handle = None;
        self._output_stream = None;
        self.initialized = false;

        log::info!("Rodio audio backend shutdown");
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn update(&mut self) {
        self.active.retain(|_handle, sink| !sink.empty());
    }

    fn stop_all(&mut self) {
        for (_handle, sink) in self.active.drain() {
            sink.stop();
        }
    }

    fn play_clip(&mut self, clip: &AudioClip) -> Result<PlaybackHandle, AudioError> {
        let stream_handle = self.stream_handle.as_ref().ok_or(AudioError::BackendNotInitialized)?;

        let sink = Sink::try_new(stream_handle)
            .map_err(|e| AudioError::PlaybackFailed(format!("Failed to create sink: {}", e)))?;
        sink.append(clip.source());

        let handle = self.handles.next();
        self.active.insert(handle, sink);
        Ok(handle)
    }

    fn stop(&mut self, handle: PlaybackHandle) -> Result<(), AudioError> {
        if let Some(sink) = self.active.remove(&handle) {
            sink.stop();
        }
        Ok(())
    }

    fn is_playing(&self, handle: PlaybackHandle) -> bool {
        self.active
            .get(&handle)
            .map(|sink| !sink.is_paused() && !sink.empty())
            .unwrap_or(false)
    }

    fn active_count(&self) -> usize {
        self.active.len()
    }
}

impl Default for RodioBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_clip() -> AudioClip {
        AudioClip::from_samples(vec![0.0; 4_410], 1, 44_100).unwrap()
    }

    #[test]
    fn test_backend_initialization() {
        let mut backend = RodioBackend::new();
        assert!(!backend.is_initialized());

        // May fail in CI/test environments without audio device
        if backend.initialize(&AudioBackendConfig::default()).is_ok() {
            assert!(backend.is_initialized());
            backend.shutdown();
            assert!(!backend.is_initialized());
        }
    }

    #[test]
    fn test_double_initialization() {
        let mut backend = RodioBackend::new();
        let config = AudioBackendConfig::default();

        if backend.initialize(&config).is_ok() {
            assert!(backend.initialize(&config).is_ok());
            backend.shutdown();
        }
    }

    #[test]
    fn test_playback_without_initialization() {
        let mut backend = RodioBackend::new();
        let result = backend.play_clip(&short_clip());
        assert!(matches!(result, Err(AudioError::BackendNotInitialized)));
    }

    #[test]
    fn test_overlapping_plays_get_distinct_handles() {
        let mut backend = RodioBackend::new();

        if backend.initialize(&AudioBackendConfig::default()).is_ok() {
            let clip = short_clip();
            let first = backend.play_clip(&clip).unwrap();
            let second = backend.play_clip(&clip).unwrap();

            assert_ne!(first, second);
            assert_eq!(backend.active_count(), 2);

            backend.stop(first).unwrap();
            assert!(!backend.is_playing(first));
            assert_eq!(backend.active_count(), 1);

            backend.stop_all();
            assert_eq!(backend.active_count(), 0);
            backend.shutdown();
        }
    }

    #[test]
    fn test_stop_unknown_handle_is_noop() {
        let mut backend = RodioBackend::new();
        assert!(backend.stop(PlaybackHandle::new(999, 0)).is_ok());
        assert!(!backend.is_playing(PlaybackHandle::new(999, 0)));
    }

    #[test]
    fn test_update_removes_finished_playbacks() {
        let mut backend = RodioBackend::new();

        if backend.initialize(&AudioBackendConfig::default()).is_ok() {
            // An empty stopped sink stands in for a finished clip
            let handle = backend.handles.next();
            if let Some(stream_handle) = &backend.stream_handle {
                if let Ok(sink) = Sink::try_new(stream_handle) {
                    sink.stop();
                    backend.active.insert(handle, sink);
                }
            }

            backend.update();
            assert_eq!(backend.active_count(), 0);

            backend.shutdown();
        }
    }
}
