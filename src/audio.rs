//! Captured-audio handoff types and offline WAV ingestion.
//!
//! Live capture is a collaborator concern; this module only defines the shape
//! a completed recording arrives in, plus a decoder for recordings that
//! already exist as WAV files (CLI and test use).

mod decode;

pub use decode::{decode_wav, DecodeError};

/// An immutable mono recording handed off by the capture layer.
///
/// Samples are sanitized on construction: non-finite values become silence and
/// everything is clamped to [-1, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Wrap raw mono samples captured at `sample_rate` Hz.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        let samples = samples
            .into_iter()
            .map(|sample| {
                if sample.is_finite() {
                    sample.clamp(-1.0, 1.0)
                } else {
                    0.0
                }
            })
            .collect();
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_seconds(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}
