//! Questionnaire urgency scoring.
//!
//! A completed answer set is scored against a data-driven rules table into a
//! 0-100 urgency score, an ordinal band, canonical symptom names, and ranked
//! recommendations. Missing or malformed answers are treated as absent and
//! never fail a scoring pass.

mod rules;
mod scorer;

pub use rules::{load_rules_from_app_dir, triage_rules_path, ScoringRules, TRIAGE_RULES_FILE_NAME};
pub use scorer::SymptomScorer;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Question identifiers the scorer reads from an answer set.
pub mod keys {
    pub const BREATHING: &str = "breathing";
    pub const CHEST_PAIN: &str = "chest_pain";
    pub const FEVER_CHECK: &str = "fever_check";
    pub const PAIN_INTENSITY: &str = "pain_intensity";
    pub const SYMPTOM_DURATION: &str = "symptom_duration";
    pub const MAIN_SYMPTOM: &str = "main_symptom";
    pub const MEDICATIONS: &str = "medications";
    pub const ASSOCIATED_SYMPTOMS: &str = "associated_symptoms";
}

/// Ordinal triage category derived from a numeric urgency score.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyBand {
    Low,
    Medium,
    High,
    Critical,
}

impl UrgencyBand {
    /// Ordinal position, used for tier-adjacency comparisons.
    pub(crate) fn tier(self) -> u8 {
        match self {
            UrgencyBand::Low => 0,
            UrgencyBand::Medium => 1,
            UrgencyBand::High => 2,
            UrgencyBand::Critical => 3,
        }
    }
}

/// Outcome of scoring one completed questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UrgencyAssessment {
    /// Accumulated urgency, clamped to 0..=100.
    pub score: u8,
    /// Pure function of `score` under the active rules table.
    pub band: UrgencyBand,
    /// Canonical names of the symptoms the answers reported.
    pub symptoms: BTreeSet<String>,
    /// Band-level guidance first, symptom-specific add-ons after.
    pub recommendations: Vec<String>,
}

/// An immutable questionnaire answer set keyed by question identifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SymptomAnswers(BTreeMap<String, String>);

impl SymptomAnswers {
    pub fn new(answers: BTreeMap<String, String>) -> Self {
        Self(answers)
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Affirmative answers are "Sim" (or "yes"), matched case-insensitively.
    pub(crate) fn is_yes(&self, key: &str) -> bool {
        self.get(key)
            .map(|value| {
                let value = value.trim();
                value.eq_ignore_ascii_case("sim") || value.eq_ignore_ascii_case("yes")
            })
            .unwrap_or(false)
    }

    /// Parse a 0-10 scale answer; malformed values count as 0, never fail.
    pub(crate) fn scale(&self, key: &str) -> u8 {
        match self.get(key) {
            None => 0,
            Some(raw) => match raw.trim().parse::<u8>() {
                Ok(value) => value.min(10),
                Err(_) => {
                    tracing::warn!(key, value = raw, "malformed scale answer treated as 0");
                    0
                }
            },
        }
    }
}
