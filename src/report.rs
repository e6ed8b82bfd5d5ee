//! Session report assembly for the presentation and export collaborators.

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::classify::AcousticAssessment;
use crate::correlate::{correlate, ConsolidatedAssessment, FacialBiometricResult};
use crate::symptoms::UrgencyAssessment;

/// Everything one triage session produced, ready to serialize.
///
/// Built fresh per session and never mutated afterwards; persistence and
/// rendering belong to the surrounding application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageReport {
    pub session_id: Uuid,
    /// RFC 3339 timestamp of report assembly, UTC.
    pub generated_at: String,
    pub acoustic: Option<AcousticAssessment>,
    pub facial: Option<FacialBiometricResult>,
    pub symptoms: Option<UrgencyAssessment>,
    pub consolidated: ConsolidatedAssessment,
}

impl TriageReport {
    /// Correlate whichever modality results are present and wrap them with
    /// session metadata.
    pub fn assemble(
        acoustic: Option<AcousticAssessment>,
        facial: Option<FacialBiometricResult>,
        symptoms: Option<UrgencyAssessment>,
    ) -> Self {
        let consolidated = correlate(acoustic.as_ref(), facial.as_ref(), symptoms.as_ref());
        Self {
            session_id: Uuid::new_v4(),
            generated_at: OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .unwrap_or_default(),
            acoustic,
            facial,
            symptoms,
            consolidated,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
