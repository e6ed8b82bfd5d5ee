//! Core numeric pipeline for voice-and-questionnaire triage.
//!
//! Capture devices, dialogue UI, transport and document export are
//! collaborator concerns; this crate owns the synchronous path from a
//! completed recording and answer set to one consolidated urgency
//! assessment.

/// Acoustic feature extraction.
pub mod analysis;
/// Application directory resolution.
pub mod app_dirs;
/// Captured-audio types and WAV ingestion.
pub mod audio;
/// Feature-vector to voice-state classification.
pub mod classify;
/// Cross-modal correlation of per-modality results.
pub mod correlate;
/// Tracing subscriber setup.
pub mod logging;
/// Session report assembly.
pub mod report;
/// Questionnaire urgency scoring.
pub mod symptoms;
