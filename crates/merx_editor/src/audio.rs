//! Audio side-cars for the PlaySound death effect
//!
//! Each referenced clip is encoded by an external codec and written to
//! `MERX_Assets/{clip}.audio` next to the artifact. Only the cue (name,
//! volume, distances) goes into the artifact itself.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use merx_core::{assets_dir, audio_sidecar_path};
use serde::{Deserialize, Serialize};

/// Codec application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpusApplication {
    Voip,
    Audio,
    RestrictedLowDelay,
}

/// Fixed parameters the runtime audio service decodes with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpusSettings {
    pub sample_rate: u32,
    pub channels: u16,
    /// Bits per second
    pub bitrate: u32,
    /// Samples per frame (10 ms at 48 kHz)
    pub frame_size: usize,
    pub application: OpusApplication,
}

impl OpusSettings {
    /// Settings every side-car is encoded with
    pub const MERX: Self = Self {
        sample_rate: 48_000,
        channels: 1,
        bitrate: 120_000,
        frame_size: 480,
        application: OpusApplication::Voip,
    };
}

impl Default for OpusSettings {
    fn default() -> Self {
        Self::MERX
    }
}

/// Raw clip data as exported by the editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioClip {
    pub name: String,
    /// Interleaved float PCM
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub frequency: u32,
    pub channels: u16,
}

impl AudioClip {
    pub fn new(name: impl Into<String>, samples: Vec<f32>, frequency: u32, channels: u16) -> Self {
        Self {
            name: name.into(),
            samples,
            frequency,
            channels,
        }
    }

    /// Mono 48 kHz clip
    pub fn mono(name: impl Into<String>, samples: Vec<f32>) -> Self {
        Self::new(name, samples, OpusSettings::MERX.sample_rate, OpusSettings::MERX.channels)
    }

    /// Whether the clip matches the codec's sample rate and channel count
    pub fn matches(&self, settings: &OpusSettings) -> bool {
        self.frequency == settings.sample_rate && self.channels == settings.channels
    }
}

/// External codec turning mono float PCM into an opaque compressed buffer
pub trait AudioEncoder {
    fn encode(&mut self, samples: &[f32], settings: &OpusSettings) -> io::Result<Vec<u8>>;
}

/// Writes encoded clips into a schematic's asset directory
pub struct SidecarWriter<'a, 'e> {
    schematic_dir: PathBuf,
    settings: OpusSettings,
    encoder: Option<&'a mut (dyn AudioEncoder + 'e)>,
}

impl<'a, 'e> SidecarWriter<'a, 'e> {
    pub fn new(schematic_dir: impl Into<PathBuf>, encoder: Option<&'a mut (dyn AudioEncoder + 'e)>) -> Self {
        Self {
            schematic_dir: schematic_dir.into(),
            settings: OpusSettings::MERX,
            encoder,
        }
    }

    /// Encode and write one clip.
    ///
    /// Returns the side-car path, or `None` if the clip was skipped because
    /// its format does not match or no encoder is available.
    pub fn write(&mut self, clip: &AudioClip) -> io::Result<Option<PathBuf>> {
        if !clip.matches(&self.settings) {
            log::error!(
                "Sound clip {} should have a frequency of {} and {} channel, got {} Hz / {} channels",
                clip.name,
                self.settings.sample_rate,
                self.settings.channels,
                clip.frequency,
                clip.channels
            );
            return Ok(None);
        }
        let Some(encoder) = self.encoder.as_deref_mut() else {
            log::error!("No audio encoder configured, skipping clip {}", clip.name);
            return Ok(None);
        };

        let encoded = encoder.encode(&clip.samples, &self.settings)?;
        fs::create_dir_all(assets_dir(&self.schematic_dir))?;
        let path = audio_sidecar_path(&self.schematic_dir, &clip.name);
        fs::write(&path, encoded)?;
        Ok(Some(path))
    }

    pub fn schematic_dir(&self) -> &Path {
        &self.schematic_dir
    }
}
