use std::path::Path;

use triagem::audio::AudioBuffer;
use triagem::symptoms::SymptomAnswers;

/// Generate a sine tone as a capture-layer handoff buffer.
pub fn sine_buffer(freq: f32, sample_rate: u32, seconds: f32, amplitude: f32) -> AudioBuffer {
    AudioBuffer::new(sine_samples(freq, sample_rate, seconds, amplitude), sample_rate)
}

pub fn sine_samples(freq: f32, sample_rate: u32, seconds: f32, amplitude: f32) -> Vec<f32> {
    let len = (sample_rate as f32 * seconds) as usize;
    (0..len)
        .map(|i| {
            amplitude * (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin()
        })
        .collect()
}

/// Write mono float samples as a WAV file for the ingestion path.
pub fn write_test_wav(path: &Path, samples: &[f32], sample_rate: u32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create wav parent dirs");
    }
    let mut writer = hound::WavWriter::create(path, spec).expect("create wav writer");
    for &sample in samples {
        writer.write_sample(sample).expect("write wav sample");
    }
    writer.finalize().expect("finalize wav");
}

/// Build an answer set from literal pairs.
pub fn answers(pairs: &[(&str, &str)]) -> SymptomAnswers {
    SymptomAnswers::from_pairs(pairs.iter().copied())
}
