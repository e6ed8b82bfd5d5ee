use std::path::PathBuf;

use serde::Deserialize;

use super::UrgencyBand;

/// Rules file that overrides the built-in scoring table when present.
pub const TRIAGE_RULES_FILE_NAME: &str = "triage_rules.toml";

/// Data-driven weight and threshold table for the urgency scorer.
///
/// The deployed table is an open product question (two diverging tables exist
/// in the field); the default below is the canonical one and any field can be
/// overridden from `triage_rules.toml` without a rebuild.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    /// Added for an affirmative breathing-difficulty answer.
    pub breathing_weight: u8,
    /// Added for an affirmative chest-pain answer.
    pub chest_pain_weight: u8,
    /// Added for an affirmative fever answer.
    pub fever_weight: u8,
    /// Added when pain intensity is at least `pain_severe_threshold`.
    pub pain_severe_weight: u8,
    pub pain_moderate_weight: u8,
    pub pain_mild_weight: u8,
    pub pain_severe_threshold: u8,
    pub pain_moderate_threshold: u8,
    pub pain_mild_threshold: u8,
    /// Added when onset is acute and the running score exceeds the floor.
    pub acute_onset_bonus: u8,
    pub acute_onset_floor: u8,
    pub sweating_bonus: u8,
    pub dizziness_bonus: u8,
    pub headache_bonus: u8,
    /// Band cut points over the final 0-100 score.
    pub critical_cutoff: u8,
    pub high_cutoff: u8,
    pub medium_cutoff: u8,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            breathing_weight: 30,
            chest_pain_weight: 25,
            fever_weight: 20,
            pain_severe_weight: 25,
            pain_moderate_weight: 15,
            pain_mild_weight: 10,
            pain_severe_threshold: 8,
            pain_moderate_threshold: 6,
            pain_mild_threshold: 4,
            acute_onset_bonus: 15,
            acute_onset_floor: 20,
            sweating_bonus: 10,
            dizziness_bonus: 10,
            headache_bonus: 8,
            critical_cutoff: 70,
            high_cutoff: 45,
            medium_cutoff: 25,
        }
    }
}

impl ScoringRules {
    /// Map a clamped urgency score onto its ordinal band.
    pub fn band_for(&self, score: u8) -> UrgencyBand {
        if score >= self.critical_cutoff {
            UrgencyBand::Critical
        } else if score >= self.high_cutoff {
            UrgencyBand::High
        } else if score >= self.medium_cutoff {
            UrgencyBand::Medium
        } else {
            UrgencyBand::Low
        }
    }
}

/// Location of the rules override file inside the application directory.
pub fn triage_rules_path() -> Option<PathBuf> {
    let dir = crate::app_dirs::app_root_dir().ok()?;
    Some(dir.join(TRIAGE_RULES_FILE_NAME))
}

/// Load the scoring table, falling back to the defaults when the override
/// file is missing or malformed.
pub fn load_rules_from_app_dir() -> ScoringRules {
    let Some(path) = triage_rules_path() else {
        return ScoringRules::default();
    };
    let Ok(text) = std::fs::read_to_string(&path) else {
        return ScoringRules::default();
    };
    match toml::from_str::<ScoringRules>(&text) {
        Ok(rules) => rules,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                %error,
                "ignoring malformed triage rules file"
            );
            ScoringRules::default()
        }
    }
}
