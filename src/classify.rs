//! Rule-based mapping from acoustic features to a voice-state assessment.
//!
//! Pure and total: every feature vector produces a label set. Degenerate
//! all-zero vectors short-circuit to the neutral assessment at the confidence
//! floor rather than tripping the silence-sensitive rules.

use serde::{Deserialize, Serialize};

use crate::analysis::FeatureVector;

/// Lowest confidence the classifier will report.
pub const CONFIDENCE_FLOOR: f32 = 0.70;
/// Highest confidence the classifier will report.
pub const CONFIDENCE_CAP: f32 = 0.95;

/// Band-energy instability above this marks spectral agitation.
const BAND_INSTABILITY_THRESHOLD: f32 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionalState {
    Neutral,
    Sadness,
    Anxiety,
    Excitement,
    Stress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreathingPattern {
    Normal,
    Shallow,
    Labored,
    Weak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceQuality {
    Clear,
    Rough,
    Hoarse,
    Weak,
}

/// Voice-state labels derived from one feature vector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AcousticAssessment {
    /// Accumulated stress indicators, clamped to 0..=10.
    pub stress_level: u8,
    pub emotional_state: EmotionalState,
    pub breathing_pattern: BreathingPattern,
    pub voice_quality: VoiceQuality,
    /// Always within `[CONFIDENCE_FLOOR, CONFIDENCE_CAP]`.
    pub confidence: f32,
}

/// Classify a feature vector into a voice-state assessment.
pub fn classify_acoustics(features: &FeatureVector) -> AcousticAssessment {
    if is_degenerate(features) {
        return AcousticAssessment {
            stress_level: 0,
            emotional_state: EmotionalState::Neutral,
            breathing_pattern: BreathingPattern::Normal,
            voice_quality: VoiceQuality::Clear,
            confidence: CONFIDENCE_FLOOR,
        };
    }

    let stress_level = stress_level(features);
    let assessment = AcousticAssessment {
        stress_level,
        emotional_state: emotional_state(features, stress_level),
        breathing_pattern: breathing_pattern(features),
        voice_quality: voice_quality(features),
        confidence: confidence(features),
    };
    tracing::debug!(
        stress = assessment.stress_level,
        emotion = ?assessment.emotional_state,
        confidence = assessment.confidence,
        "classified acoustic features"
    );
    assessment
}

fn is_degenerate(features: &FeatureVector) -> bool {
    features.pitch_hz == 0.0
        && features.loudness == 0.0
        && features.spectral_centroid_hz == 0.0
        && features.zero_crossing_rate == 0.0
        && features.band_energies.iter().all(|&band| band == 0.0)
}

fn stress_level(features: &FeatureVector) -> u8 {
    let mut level = 0i32;
    if features.pitch_hz < 80.0 || features.pitch_hz > 200.0 {
        level += 2;
    }
    if features.loudness > 0.5 {
        level += 1;
    }
    if features.zero_crossing_rate > 0.10 {
        level += 1;
    }
    if band_instability(&features.band_energies) > BAND_INSTABILITY_THRESHOLD {
        level += 1;
    }
    level.clamp(0, 10) as u8
}

/// Mean absolute successive difference across band energies.
fn band_instability(bands: &[f32]) -> f32 {
    if bands.len() < 2 {
        return 0.0;
    }
    let sum: f32 = bands.windows(2).map(|pair| (pair[1] - pair[0]).abs()).sum();
    sum / (bands.len() - 1) as f32
}

fn emotional_state(features: &FeatureVector, stress_level: u8) -> EmotionalState {
    if features.pitch_hz < 100.0 && features.loudness < 0.2 {
        EmotionalState::Sadness
    } else if features.pitch_hz > 180.0 && features.loudness > 0.4 {
        EmotionalState::Anxiety
    } else if features.pitch_hz > 150.0 && features.spectral_centroid_hz > 1_000.0 {
        EmotionalState::Excitement
    } else if stress_level > 6 {
        EmotionalState::Stress
    } else {
        EmotionalState::Neutral
    }
}

fn breathing_pattern(features: &FeatureVector) -> BreathingPattern {
    if features.duration_seconds < 2.0 {
        BreathingPattern::Shallow
    } else if features.zero_crossing_rate < 0.02 {
        BreathingPattern::Labored
    } else if features.loudness < 0.1 {
        BreathingPattern::Weak
    } else {
        BreathingPattern::Normal
    }
}

fn voice_quality(features: &FeatureVector) -> VoiceQuality {
    if features.zero_crossing_rate > 0.08 {
        VoiceQuality::Rough
    } else if features.spectral_centroid_hz < 500.0 {
        VoiceQuality::Hoarse
    } else if features.loudness < 0.15 {
        VoiceQuality::Weak
    } else {
        VoiceQuality::Clear
    }
}

fn confidence(features: &FeatureVector) -> f32 {
    let mut confidence = CONFIDENCE_FLOOR;
    if features.loudness > 0.1 {
        confidence += 0.10;
    }
    if features.duration_seconds > 1.0 {
        confidence += 0.10;
    }
    if features.pitch_hz > 80.0 && features.pitch_hz < 300.0 {
        confidence += 0.10;
    }
    confidence.min(CONFIDENCE_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::BAND_COUNT;

    fn vector() -> FeatureVector {
        FeatureVector {
            pitch_hz: 120.0,
            loudness: 0.3,
            spectral_centroid_hz: 800.0,
            zero_crossing_rate: 0.05,
            band_energies: [0.1; BAND_COUNT],
            duration_seconds: 3.0,
        }
    }

    #[test]
    fn all_zero_vector_is_neutral_at_the_confidence_floor() {
        let silent = FeatureVector {
            pitch_hz: 0.0,
            loudness: 0.0,
            spectral_centroid_hz: 0.0,
            zero_crossing_rate: 0.0,
            band_energies: [0.0; BAND_COUNT],
            duration_seconds: 2.5,
        };
        let assessment = classify_acoustics(&silent);
        assert_eq!(assessment.stress_level, 0);
        assert_eq!(assessment.emotional_state, EmotionalState::Neutral);
        assert_eq!(assessment.breathing_pattern, BreathingPattern::Normal);
        assert_eq!(assessment.voice_quality, VoiceQuality::Clear);
        assert_eq!(assessment.confidence, CONFIDENCE_FLOOR);
    }

    #[test]
    fn calm_voice_scores_low_stress() {
        let assessment = classify_acoustics(&vector());
        assert_eq!(assessment.stress_level, 0);
        assert_eq!(assessment.emotional_state, EmotionalState::Neutral);
        assert_eq!(assessment.breathing_pattern, BreathingPattern::Normal);
    }

    #[test]
    fn stress_indicators_accumulate() {
        let mut features = vector();
        features.pitch_hz = 250.0; // outside 80..=200 -> +2
        features.loudness = 0.6; // > 0.5 -> +1
        features.zero_crossing_rate = 0.12; // > 0.10 -> +1
        features.band_energies = [0.0, 0.1, 0.0, 0.1, 0.0, 0.1, 0.0, 0.1]; // unstable -> +1
        let assessment = classify_acoustics(&features);
        assert_eq!(assessment.stress_level, 5);
    }

    #[test]
    fn quiet_low_pitch_reads_as_sadness() {
        let mut features = vector();
        features.pitch_hz = 90.0;
        features.loudness = 0.1;
        assert_eq!(
            classify_acoustics(&features).emotional_state,
            EmotionalState::Sadness
        );
    }

    #[test]
    fn loud_high_pitch_reads_as_anxiety() {
        let mut features = vector();
        features.pitch_hz = 220.0;
        features.loudness = 0.5;
        assert_eq!(
            classify_acoustics(&features).emotional_state,
            EmotionalState::Anxiety
        );
    }

    #[test]
    fn bright_raised_pitch_reads_as_excitement() {
        let mut features = vector();
        features.pitch_hz = 160.0;
        features.loudness = 0.3;
        features.spectral_centroid_hz = 1_500.0;
        assert_eq!(
            classify_acoustics(&features).emotional_state,
            EmotionalState::Excitement
        );
    }

    #[test]
    fn short_recordings_read_as_shallow_breathing() {
        let mut features = vector();
        features.duration_seconds = 1.2;
        assert_eq!(
            classify_acoustics(&features).breathing_pattern,
            BreathingPattern::Shallow
        );
    }

    #[test]
    fn confidence_stays_within_invariant_bounds() {
        let mut features = vector();
        // All three bonuses apply; the cap holds the result at 0.95.
        assert_eq!(classify_acoustics(&features).confidence, CONFIDENCE_CAP);
        features.loudness = 0.05;
        features.duration_seconds = 0.5;
        features.pitch_hz = 400.0;
        let assessment = classify_acoustics(&features);
        assert!(assessment.confidence >= CONFIDENCE_FLOOR);
        assert!(assessment.confidence <= CONFIDENCE_CAP);
    }

    #[test]
    fn high_zero_crossing_rate_reads_as_rough_voice() {
        let mut features = vector();
        features.zero_crossing_rate = 0.09;
        assert_eq!(
            classify_acoustics(&features).voice_quality,
            VoiceQuality::Rough
        );
    }
}
