//! Cross-modal correlation of per-modality triage results.
//!
//! Any subset of the three modalities (voice, facial/biometric,
//! questionnaire) is accepted; missing inputs only lower the reported data
//! quality. The engine never fails.

mod consistency;

use serde::{Deserialize, Serialize};

use crate::classify::AcousticAssessment;
use crate::symptoms::{UrgencyAssessment, UrgencyBand};

/// Fixed confidence contribution of the structured questionnaire modality.
const SYMPTOM_MODALITY_CONFIDENCE: f32 = 85.0;

/// Biometric reading supplied by the facial-telemetry collaborator.
///
/// Opaque beyond the three fields this engine reads; `confidence` is accepted
/// on either a 0-1 or a 0-100 scale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FacialBiometricResult {
    pub heart_rate: i32,
    /// 0-10 scale, as the other modalities report stress.
    pub stress_level: u8,
    pub confidence: f32,
}

impl FacialBiometricResult {
    /// Confidence normalized to 0-100 regardless of the supplied scale.
    pub(crate) fn confidence_percent(&self) -> f32 {
        if self.confidence <= 1.0 {
            (self.confidence.max(0.0)) * 100.0
        } else {
            self.confidence.min(100.0)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reliability {
    High,
    Medium,
    Low,
}

/// How many of the three modalities were actually available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataQuality {
    Complete,
    Good,
    Partial,
}

/// Holistic urgency recomputed across whichever modalities are present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverallUrgency {
    pub band: UrgencyBand,
    /// Total on the coarse cross-modal point scale, not the 0-100 scale.
    pub numeric_score: u8,
    pub action_text: String,
}

/// Pairwise agreement flags; vacuously true when a pair is not present.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConsensusIndicators {
    pub stress_consensus: bool,
    pub emotional_consensus: bool,
    pub urgency_consensus: bool,
}

/// The single consolidated assessment produced per triage session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConsolidatedAssessment {
    pub overall_urgency: OverallUrgency,
    /// Cross-modal agreement, 0-100.
    pub consistency_score: u8,
    pub reliability: Reliability,
    pub consensus: ConsensusIndicators,
    /// Advisory explanations of cross-modal disagreements, for human review.
    pub conflicting_metrics: Vec<String>,
    /// Advisory notes on readings outside physiologically plausible ranges.
    pub outliers: Vec<String>,
    /// Mean of the present modalities' confidences, 0-100.
    pub confidence: u8,
    pub data_quality: DataQuality,
}

/// Fuse whichever per-modality results are available into one assessment.
pub fn correlate(
    acoustic: Option<&AcousticAssessment>,
    facial: Option<&FacialBiometricResult>,
    symptoms: Option<&UrgencyAssessment>,
) -> ConsolidatedAssessment {
    let present = usize::from(acoustic.is_some())
        + usize::from(facial.is_some())
        + usize::from(symptoms.is_some());
    let data_quality = match present {
        3 => DataQuality::Complete,
        2 => DataQuality::Good,
        _ => DataQuality::Partial,
    };

    let overall_urgency = overall_urgency(acoustic, facial, symptoms);
    let review = consistency::review(acoustic, facial, symptoms, overall_urgency.band);

    if !review.conflicts.is_empty() {
        tracing::debug!(
            conflicts = review.conflicts.len(),
            outliers = review.outliers.len(),
            "cross-modal disagreement detected"
        );
    }

    ConsolidatedAssessment {
        overall_urgency,
        consistency_score: review.score,
        reliability: review.reliability,
        consensus: review.consensus,
        conflicting_metrics: review.conflicts,
        outliers: review.outliers,
        confidence: mean_confidence(acoustic, facial, symptoms),
        data_quality,
    }
}

/// Points contributed by the questionnaire band on the coarse scale.
///
/// Band identity is preserved when the questionnaire is the only modality:
/// critical maps onto the critical cut point, and so on down the table.
fn band_points(band: UrgencyBand) -> u32 {
    match band {
        UrgencyBand::Critical => 8,
        UrgencyBand::High => 5,
        UrgencyBand::Medium => 2,
        UrgencyBand::Low => 0,
    }
}

fn overall_urgency(
    acoustic: Option<&AcousticAssessment>,
    facial: Option<&FacialBiometricResult>,
    symptoms: Option<&UrgencyAssessment>,
) -> OverallUrgency {
    let mut points = symptoms.map(|s| band_points(s.band)).unwrap_or(0);
    if let Some(acoustic) = acoustic {
        if acoustic.stress_level > 7 {
            points += 3;
        }
    }
    if let Some(facial) = facial {
        if facial.stress_level > 7 {
            points += 2;
        }
        if facial.heart_rate > 100 {
            points += 2;
        }
    }
    let band = if points >= 8 {
        UrgencyBand::Critical
    } else if points >= 5 {
        UrgencyBand::High
    } else if points >= 2 {
        UrgencyBand::Medium
    } else {
        UrgencyBand::Low
    };
    OverallUrgency {
        band,
        numeric_score: points.min(u32::from(u8::MAX)) as u8,
        action_text: action_text(band).to_string(),
    }
}

fn action_text(band: UrgencyBand) -> &'static str {
    match band {
        UrgencyBand::Critical => "Seek emergency care immediately",
        UrgencyBand::High => "Seek urgent care within the next few hours",
        UrgencyBand::Medium => "Schedule a medical evaluation within 24-48 hours",
        UrgencyBand::Low => "Routine care and self-observation",
    }
}

fn mean_confidence(
    acoustic: Option<&AcousticAssessment>,
    facial: Option<&FacialBiometricResult>,
    symptoms: Option<&UrgencyAssessment>,
) -> u8 {
    let mut sum = 0.0_f32;
    let mut count = 0u32;
    if let Some(acoustic) = acoustic {
        sum += acoustic.confidence * 100.0;
        count += 1;
    }
    if let Some(facial) = facial {
        sum += facial.confidence_percent();
        count += 1;
    }
    if symptoms.is_some() {
        sum += SYMPTOM_MODALITY_CONFIDENCE;
        count += 1;
    }
    if count == 0 {
        return 0;
    }
    (sum / count as f32).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{BreathingPattern, EmotionalState, VoiceQuality};
    use std::collections::BTreeSet;

    fn acoustic(stress: u8, emotion: EmotionalState, confidence: f32) -> AcousticAssessment {
        AcousticAssessment {
            stress_level: stress,
            emotional_state: emotion,
            breathing_pattern: BreathingPattern::Normal,
            voice_quality: VoiceQuality::Clear,
            confidence,
        }
    }

    fn facial(heart_rate: i32, stress: u8, confidence: f32) -> FacialBiometricResult {
        FacialBiometricResult {
            heart_rate,
            stress_level: stress,
            confidence,
        }
    }

    fn urgency(score: u8, band: UrgencyBand) -> UrgencyAssessment {
        UrgencyAssessment {
            score,
            band,
            symptoms: BTreeSet::new(),
            recommendations: Vec::new(),
        }
    }

    #[test]
    fn zero_modalities_degrade_to_partial_quality() {
        let assessment = correlate(None, None, None);
        assert_eq!(assessment.data_quality, DataQuality::Partial);
        assert_eq!(assessment.overall_urgency.band, UrgencyBand::Low);
        assert_eq!(assessment.confidence, 0);
        assert!(assessment.conflicting_metrics.is_empty());
    }

    #[test]
    fn modality_counts_map_onto_data_quality() {
        let voice = acoustic(2, EmotionalState::Neutral, 0.9);
        let face = facial(72, 2, 0.8);
        let answers = urgency(10, UrgencyBand::Low);
        assert_eq!(
            correlate(Some(&voice), Some(&face), Some(&answers)).data_quality,
            DataQuality::Complete
        );
        assert_eq!(
            correlate(Some(&voice), Some(&face), None).data_quality,
            DataQuality::Good
        );
        assert_eq!(
            correlate(Some(&voice), None, None).data_quality,
            DataQuality::Partial
        );
    }

    #[test]
    fn questionnaire_band_is_preserved_when_it_is_the_only_modality() {
        for (band, expected) in [
            (UrgencyBand::Critical, UrgencyBand::Critical),
            (UrgencyBand::High, UrgencyBand::High),
            (UrgencyBand::Medium, UrgencyBand::Medium),
            (UrgencyBand::Low, UrgencyBand::Low),
        ] {
            let answers = urgency(50, band);
            let assessment = correlate(None, None, Some(&answers));
            assert_eq!(assessment.overall_urgency.band, expected);
            assert!(assessment.consensus.urgency_consensus);
        }
    }

    #[test]
    fn elevated_signals_escalate_the_holistic_band() {
        let voice = acoustic(9, EmotionalState::Stress, 0.9);
        let face = facial(120, 9, 0.8);
        let answers = urgency(30, UrgencyBand::Medium);
        let assessment = correlate(Some(&voice), Some(&face), Some(&answers));
        // 2 band points + 3 voice stress + 2 facial stress + 2 heart rate.
        assert_eq!(assessment.overall_urgency.numeric_score, 9);
        assert_eq!(assessment.overall_urgency.band, UrgencyBand::Critical);
    }

    #[test]
    fn confidence_averages_present_modalities() {
        let voice = acoustic(2, EmotionalState::Neutral, 0.9);
        let answers = urgency(10, UrgencyBand::Low);
        let assessment = correlate(Some(&voice), None, Some(&answers));
        // (90 + 85) / 2 = 87.5, rounded.
        assert_eq!(assessment.confidence, 88);
    }

    #[test]
    fn facial_confidence_is_normalized_from_either_scale() {
        assert_eq!(facial(70, 2, 0.8).confidence_percent(), 80.0);
        assert_eq!(facial(70, 2, 80.0).confidence_percent(), 80.0);
        assert_eq!(facial(70, 2, 140.0).confidence_percent(), 100.0);
    }

    #[test]
    fn consolidated_output_is_independent_of_which_subset_order_built_it() {
        let voice = acoustic(4, EmotionalState::Neutral, 0.85);
        let face = facial(90, 4, 0.75);
        let answers = urgency(40, UrgencyBand::Medium);
        let all = correlate(Some(&voice), Some(&face), Some(&answers));
        let again = correlate(Some(&voice), Some(&face), Some(&answers));
        assert_eq!(all, again);
    }
}
