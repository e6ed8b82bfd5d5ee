use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use super::{keys, ScoringRules, SymptomAnswers, UrgencyAssessment, UrgencyBand};

/// Scores completed questionnaires against one rules table.
#[derive(Debug, Clone)]
pub struct SymptomScorer {
    rules: ScoringRules,
}

#[derive(Clone, Copy, Debug)]
enum AssociatedKind {
    Sweating,
    Dizziness,
    Headache,
}

struct AssociatedRule {
    kind: AssociatedKind,
    regex: Regex,
}

fn associated_rules() -> &'static [AssociatedRule] {
    static RULES: OnceLock<Vec<AssociatedRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        let mut rules = Vec::new();
        let mut push = |kind: AssociatedKind, pattern: &'static str| {
            rules.push(AssociatedRule {
                kind,
                regex: Regex::new(pattern).expect("associated symptom regex must compile"),
            });
        };
        push(
            AssociatedKind::Sweating,
            r"(?i)\b(sudorese|suor(es)?|sweat\w*)\b",
        );
        push(
            AssociatedKind::Dizziness,
            r"(?i)\b(tontura|vertigem|desmaio|dizz\w*|faint\w*)\b",
        );
        push(
            AssociatedKind::Headache,
            r"(?i)(dor de cabe|cefaleia|headache)",
        );
        rules
    })
}

fn acute_onset_regex() -> &'static Regex {
    static ACUTE: OnceLock<Regex> = OnceLock::new();
    ACUTE.get_or_init(|| {
        Regex::new(r"(?i)^(menos de 1 (hora|dia)|less than (an? hour|a day))$")
            .expect("acute onset regex must compile")
    })
}

fn no_medication_regex() -> &'static Regex {
    static NONE: OnceLock<Regex> = OnceLock::new();
    NONE.get_or_init(|| {
        Regex::new(r"(?i)^(n[aã]o|no|nenhum\w*|none)$").expect("medication regex must compile")
    })
}

impl SymptomScorer {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    pub fn with_default_rules() -> Self {
        Self::new(ScoringRules::default())
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Score one completed questionnaire.
    ///
    /// Deterministic; missing or malformed answers are treated as absent.
    pub fn score(&self, answers: &SymptomAnswers) -> UrgencyAssessment {
        let breathing = answers.is_yes(keys::BREATHING);
        let chest_pain = answers.is_yes(keys::CHEST_PAIN);
        let fever = answers.is_yes(keys::FEVER_CHECK);

        let score = if breathing && chest_pain {
            // Breathing difficulty together with chest pain bypasses the
            // additive path outright.
            100
        } else {
            self.accumulate(answers, breathing, chest_pain, fever)
        };
        let band = self.rules.band_for(score);

        UrgencyAssessment {
            score,
            band,
            symptoms: extract_symptoms(answers, breathing, chest_pain, fever),
            recommendations: self.recommendations(band, answers, breathing),
        }
    }

    fn accumulate(
        &self,
        answers: &SymptomAnswers,
        breathing: bool,
        chest_pain: bool,
        fever: bool,
    ) -> u8 {
        let rules = &self.rules;
        let mut score = 0u32;
        if breathing {
            score += u32::from(rules.breathing_weight);
        }
        if chest_pain {
            score += u32::from(rules.chest_pain_weight);
        }
        if fever {
            score += u32::from(rules.fever_weight);
        }

        let pain = answers.scale(keys::PAIN_INTENSITY);
        if pain >= rules.pain_severe_threshold {
            score += u32::from(rules.pain_severe_weight);
        } else if pain >= rules.pain_moderate_threshold {
            score += u32::from(rules.pain_moderate_weight);
        } else if pain >= rules.pain_mild_threshold {
            score += u32::from(rules.pain_mild_weight);
        }

        if score > u32::from(rules.acute_onset_floor) && is_acute_onset(answers) {
            score += u32::from(rules.acute_onset_bonus);
        }

        if let Some(associated) = answers.get(keys::ASSOCIATED_SYMPTOMS) {
            for rule in associated_rules() {
                if rule.regex.is_match(associated) {
                    score += u32::from(match rule.kind {
                        AssociatedKind::Sweating => rules.sweating_bonus,
                        AssociatedKind::Dizziness => rules.dizziness_bonus,
                        AssociatedKind::Headache => rules.headache_bonus,
                    });
                }
            }
        }

        score.min(100) as u8
    }

    fn recommendations(
        &self,
        band: UrgencyBand,
        answers: &SymptomAnswers,
        breathing: bool,
    ) -> Vec<String> {
        let mut recommendations: Vec<String> = match band {
            UrgencyBand::Critical => vec![
                "Seek emergency medical care immediately".into(),
                "Call emergency services rather than driving yourself".into(),
            ],
            UrgencyBand::High => vec![
                "Visit an urgent care service within the next few hours".into(),
                "Keep monitoring symptoms continuously until seen".into(),
            ],
            UrgencyBand::Medium => vec![
                "Schedule a medical visit within the next 24-48 hours".into(),
                "Rest and track any change in symptoms".into(),
            ],
            UrgencyBand::Low => vec![
                "Symptoms suggest routine care; book a regular appointment if they persist".into(),
                "Self-care and observation are appropriate for now".into(),
            ],
        };
        if breathing {
            recommendations
                .push("Stay seated upright and avoid exertion until evaluated".into());
        }
        if has_medications(answers) {
            recommendations
                .push("Bring a list of current medications to the consultation".into());
        }
        recommendations
    }
}

fn is_acute_onset(answers: &SymptomAnswers) -> bool {
    answers
        .get(keys::SYMPTOM_DURATION)
        .map(|value| acute_onset_regex().is_match(value.trim()))
        .unwrap_or(false)
}

fn has_medications(answers: &SymptomAnswers) -> bool {
    answers
        .get(keys::MEDICATIONS)
        .map(|value| {
            let value = value.trim();
            !value.is_empty() && !no_medication_regex().is_match(value)
        })
        .unwrap_or(false)
}

fn extract_symptoms(
    answers: &SymptomAnswers,
    breathing: bool,
    chest_pain: bool,
    fever: bool,
) -> BTreeSet<String> {
    let mut symptoms = BTreeSet::new();
    if let Some(main) = answers.get(keys::MAIN_SYMPTOM) {
        let main = main.trim();
        if !main.is_empty() {
            symptoms.insert(main.to_string());
        }
    }
    if breathing {
        symptoms.insert("respiratory difficulty".to_string());
    }
    if chest_pain {
        symptoms.insert("chest pain".to_string());
    }
    if fever {
        symptoms.insert("fever".to_string());
    }
    symptoms
}
