//! Cross-modal agreement scoring: consensus flags, conflicts, outliers.

use super::{ConsensusIndicators, FacialBiometricResult, Reliability};
use crate::classify::{AcousticAssessment, EmotionalState};
use crate::symptoms::{UrgencyAssessment, UrgencyBand};

/// Stress above this (on the 0-10 scale) counts as elevated.
const ELEVATED_STRESS: u8 = 5;
/// Heart rate above this counts as elevated.
const ELEVATED_HEART_RATE: i32 = 100;
/// Physiologically plausible heart-rate range for a seated adult.
const HEART_RATE_PLAUSIBLE: std::ops::RangeInclusive<i32> = 40..=180;

/// A disagreement strong enough to mark the session unreliable on its own.
const SHARP_PENALTY: u8 = 30;
const MODERATE_PENALTY: u8 = 20;
const MILD_PENALTY: u8 = 15;
const OUTLIER_PENALTY: u8 = 10;

pub(super) struct ConsistencyReview {
    pub(super) score: u8,
    pub(super) reliability: Reliability,
    pub(super) consensus: ConsensusIndicators,
    pub(super) conflicts: Vec<String>,
    pub(super) outliers: Vec<String>,
}

/// Compare every present pair of modalities and screen single readings for
/// plausibility. Starts from full agreement and subtracts a penalty per
/// finding; absent pairs cannot disagree.
pub(super) fn review(
    acoustic: Option<&AcousticAssessment>,
    facial: Option<&FacialBiometricResult>,
    symptoms: Option<&UrgencyAssessment>,
    overall_band: UrgencyBand,
) -> ConsistencyReview {
    let mut penalty = 0u32;
    let mut conflicts = Vec::new();
    let mut outliers = Vec::new();
    let mut consensus = ConsensusIndicators {
        stress_consensus: true,
        emotional_consensus: true,
        urgency_consensus: true,
    };

    if let (Some(acoustic), Some(facial)) = (acoustic, facial) {
        let voice_elevated = acoustic.stress_level > ELEVATED_STRESS;
        let face_elevated = facial.stress_level > ELEVATED_STRESS;
        if voice_elevated != face_elevated {
            consensus.stress_consensus = false;
            penalty += u32::from(SHARP_PENALTY);
            conflicts.push(format!(
                "voice stress {}/10 and facial stress {}/10 point in opposite directions",
                acoustic.stress_level, facial.stress_level
            ));
        }
        if acoustic.stress_level <= 3 && facial.heart_rate > ELEVATED_HEART_RATE {
            penalty += u32::from(MODERATE_PENALTY);
            conflicts.push(format!(
                "voice indicates calm but facial heart rate is elevated ({} bpm)",
                facial.heart_rate
            ));
        }
        if let Some(conflict) = emotional_contradiction(acoustic, facial) {
            consensus.emotional_consensus = false;
            penalty += u32::from(MILD_PENALTY);
            conflicts.push(conflict);
        }
    }

    if let (Some(symptoms), Some(facial)) = (symptoms, facial) {
        if symptoms.band >= UrgencyBand::High && facial.stress_level <= 2 {
            penalty += u32::from(MILD_PENALTY);
            conflicts.push(format!(
                "questionnaire urgency is {:?} but biometric stress is minimal ({}/10)",
                symptoms.band, facial.stress_level
            ));
        } else if symptoms.band == UrgencyBand::Low && facial.stress_level >= 8 {
            penalty += u32::from(MILD_PENALTY);
            conflicts.push(format!(
                "questionnaire urgency is low but biometric stress is severe ({}/10)",
                facial.stress_level
            ));
        }
    }

    if let Some(symptoms) = symptoms {
        let distance = symptoms.band.tier().abs_diff(overall_band.tier());
        if distance > 1 {
            consensus.urgency_consensus = false;
            penalty += u32::from(OUTLIER_PENALTY);
            conflicts.push(format!(
                "questionnaire band {:?} and holistic band {:?} are more than one tier apart",
                symptoms.band, overall_band
            ));
        }
    }

    if let Some(facial) = facial {
        if !HEART_RATE_PLAUSIBLE.contains(&facial.heart_rate) {
            penalty += u32::from(OUTLIER_PENALTY);
            outliers.push(format!(
                "heart rate {} bpm is outside the physiologically plausible range",
                facial.heart_rate
            ));
        }
    }

    let score = 100u32.saturating_sub(penalty) as u8;
    let reliability = if score >= 80 && conflicts.is_empty() {
        Reliability::High
    } else if score < 50 {
        Reliability::Low
    } else {
        Reliability::Medium
    };

    ConsistencyReview {
        score,
        reliability,
        consensus,
        conflicts,
        outliers,
    }
}

/// An emotional label flatly contradicted by the biometric reading: an
/// aroused label over a resting heart rate, or a flat label over a racing
/// one.
fn emotional_contradiction(
    acoustic: &AcousticAssessment,
    facial: &FacialBiometricResult,
) -> Option<String> {
    let aroused = matches!(
        acoustic.emotional_state,
        EmotionalState::Anxiety | EmotionalState::Stress | EmotionalState::Excitement
    );
    if aroused && facial.heart_rate < 70 {
        return Some(format!(
            "voice suggests {:?} but heart rate is at rest ({} bpm)",
            acoustic.emotional_state, facial.heart_rate
        ));
    }
    if !aroused && facial.heart_rate > 110 {
        return Some(format!(
            "voice suggests {:?} but heart rate is racing ({} bpm)",
            acoustic.emotional_state, facial.heart_rate
        ));
    }
    None
}
