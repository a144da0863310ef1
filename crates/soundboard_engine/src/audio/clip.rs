//! Decoded audio clips

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use rodio::{Decoder, Source};

use super::AudioError;
use crate::assets::{AssetError, AssetSource};

/// Fully decoded audio, shared read-only between every playback of it
#[derive(Debug, Clone)]
pub struct AudioClip {
    samples: Arc<[f32]>,
    channels: u16,
    sample_rate: u32,
}

impl AudioClip {
    /// Build a clip from interleaved samples
    pub fn from_samples(samples: Vec<f32>, channels: u16, sample_rate: u32) -> Result<Self, AudioError> {
        if channels == 0 || sample_rate == 0 {
            return Err(AudioError::DecodeFailed(format!(
                "invalid stream format: {} channel(s) at {} Hz",
                channels, sample_rate
            )));
        }

        Ok(Self {
            samples: samples.into(),
            channels,
            sample_rate,
        })
    }

    /// Decode encoded audio (MP3, WAV, OGG Vorbis or FLAC) held in memory
    pub fn decode(bytes: Vec<u8>) -> Result<Self, AudioError> {
        let decoder = Decoder::new(Cursor::new(bytes))
            .map_err(|e| AudioError::DecodeFailed(e.to_string()))?;

        let channels = decoder.channels();
        let sample_rate = decoder.sample_rate();
        let samples: Vec<f32> = decoder.convert_samples::<f32>().collect();

        if samples.is_empty() {
            return Err(AudioError::DecodeFailed("stream contains no samples".to_string()));
        }

        Self::from_samples(samples, channels, sample_rate)
    }

    /// Read and decode the clip at `path` from `source`
    pub fn load(source: &dyn AssetSource, path: &str) -> Result<Self, AssetError> {
        let bytes = source.read(path)?.into_owned();
        let clip = Self::decode(bytes).map_err(|e| AssetError::DecodeFailed {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        log::info!(
            "Loaded clip {} ({} ch, {} Hz, {:.2}s)",
            path,
            clip.channels,
            clip.sample_rate,
            clip.duration().as_secs_f32()
        );
        Ok(clip)
    }

    /// Number of interleaved channels
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Total number of interleaved samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the clip holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playing time
    pub fn duration(&self) -> Duration {
        let frames = self.samples.len() as u64 / u64::from(self.channels);
        Duration::from_secs_f64(frames as f64 / f64::from(self.sample_rate))
    }

    /// A new playback cursor positioned at the first sample
    pub fn source(&self) -> ClipSource {
        ClipSource {
            samples: Arc::clone(&self.samples),
            position: 0,
            channels: self.channels,
            sample_rate: self.sample_rate,
        }
    }
}

/// Streams one clip from its first sample to its last
///
/// Cloning the clip's buffer is a reference-count bump, so many sources can
/// play the same clip at once.
#[derive(Debug, Clone)]
pub struct ClipSource {
    samples: Arc<[f32]>,
    position: usize,
    channels: u16,
    sample_rate: u32,
}

impl Iterator for ClipSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let sample = self.samples.get(self.position).copied()?;
        self.position += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.samples.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl Source for ClipSource {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.samples.len() - self.position)
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        let frames = self.samples.len() as u64 / u64::from(self.channels);
        Some(Duration::from_secs_f64(frames as f64 / f64::from(self.sample_rate)))
    }
}
