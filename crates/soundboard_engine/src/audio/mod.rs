//! Audio system
//!
//! Clips are decoded once at load time into shared sample buffers. Playing a
//! clip hands a fresh cursor over that buffer to the backend, which mixes it on
//! its own thread; the caller never waits.

pub mod backend;
mod clip;

pub use backend::{AudioBackend, AudioBackendConfig, PlaybackHandle};
pub use clip::{AudioClip, ClipSource};

use thiserror::Error;

/// Audio errors
#[derive(Error, Debug)]
pub enum AudioError {
    /// Backend initialization failed
    #[error("Audio backend initialization failed: {0}")]
    BackendInitFailed(String),

    /// Backend used before initialization
    #[error("Audio backend not initialized")]
    BackendNotInitialized,

    /// Starting playback failed
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// Audio data could not be decoded
    #[error("Failed to decode audio: {0}")]
    DecodeFailed(String),

    /// Handle does not refer to an active playback
    #[error("Invalid playback handle")]
    InvalidHandle,
}
