//! Fundamental-frequency estimation by normalized autocorrelation.

/// Lower edge of the plausible human-voice band.
pub(crate) const PITCH_MIN_HZ: f32 = 80.0;
/// Upper edge of the plausible human-voice band.
pub(crate) const PITCH_MAX_HZ: f32 = 400.0;

/// Correlation window cap; keeps the lag search bounded on long recordings.
const PITCH_WINDOW_MAX: usize = 8192;

/// Normalized autocorrelation score below which the frame counts as unvoiced.
const VOICING_FLOOR: f64 = 0.01;

/// Estimate F0 in Hz, or 0.0 for unvoiced/silent input.
///
/// Candidate lags span `[sample_rate / PITCH_MAX_HZ, sample_rate / PITCH_MIN_HZ]`;
/// each lag is scored with `sum(x[i] * x[i + lag]) / sum(x[i]^2)` and the best
/// scoring lag wins.
pub(crate) fn estimate_pitch_hz(samples: &[f32], sample_rate: u32) -> f32 {
    if samples.len() < 2 || sample_rate == 0 {
        return 0.0;
    }
    let window = &samples[..samples.len().min(PITCH_WINDOW_MAX)];
    let sr = sample_rate as f32;
    let min_lag = ((sr / PITCH_MAX_HZ).floor() as usize).max(1);
    let max_lag = ((sr / PITCH_MIN_HZ).ceil() as usize).min(window.len().saturating_sub(1));
    if max_lag < min_lag {
        return 0.0;
    }

    let mut energy = 0.0_f64;
    for &sample in window {
        let sample = sanitize(sample) as f64;
        energy += sample * sample;
    }
    if energy <= f64::EPSILON {
        return 0.0;
    }

    let mut best_lag = 0usize;
    let mut best_score = 0.0_f64;
    for lag in min_lag..=max_lag {
        let mut acc = 0.0_f64;
        for i in 0..window.len() - lag {
            acc += sanitize(window[i]) as f64 * sanitize(window[i + lag]) as f64;
        }
        let score = acc / energy;
        if score > best_score {
            best_score = score;
            best_lag = lag;
        }
    }

    if best_lag == 0 || best_score < VOICING_FLOOR {
        return 0.0;
    }
    sr / best_lag as f32
}

fn sanitize(sample: f32) -> f32 {
    if sample.is_finite() {
        sample.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, sample_rate: u32, seconds: f32, amplitude: f32) -> Vec<f32> {
        let len = (sample_rate as f32 * seconds) as usize;
        (0..len)
            .map(|i| {
                amplitude
                    * (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin()
            })
            .collect()
    }

    #[test]
    fn sine_pitch_is_recovered_within_tolerance() {
        for &(freq, sr) in &[(150.0_f32, 44_100_u32), (100.0, 16_000), (220.0, 22_050)] {
            let samples = sine(freq, sr, 1.0, 0.5);
            let pitch = estimate_pitch_hz(&samples, sr);
            assert!(
                (pitch - freq).abs() < 5.0,
                "expected {freq} Hz, got {pitch} Hz at {sr} Hz"
            );
        }
    }

    #[test]
    fn silence_is_unvoiced() {
        let samples = vec![0.0_f32; 16_000];
        assert_eq!(estimate_pitch_hz(&samples, 16_000), 0.0);
    }

    #[test]
    fn estimate_stays_inside_the_search_band() {
        // Content above the band aliases to a subharmonic lag; the reported
        // value must still fall inside [80, 400] Hz or be unvoiced.
        let samples = sine(1_000.0, 16_000, 0.5, 0.5);
        let pitch = estimate_pitch_hz(&samples, 16_000);
        assert!(pitch == 0.0 || (PITCH_MIN_HZ..=PITCH_MAX_HZ).contains(&pitch));
    }

    #[test]
    fn short_buffers_return_zero() {
        assert_eq!(estimate_pitch_hz(&[0.5], 16_000), 0.0);
        assert_eq!(estimate_pitch_hz(&[], 16_000), 0.0);
        assert_eq!(estimate_pitch_hz(&[0.1, 0.2], 0), 0.0);
    }
}
