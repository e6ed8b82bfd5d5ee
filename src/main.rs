//! Command-line entry point: run one triage session over a recorded WAV and
//! an optional questionnaire answers file, printing the report as JSON.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use triagem::analysis::extract_features;
use triagem::audio::decode_wav;
use triagem::classify::classify_acoustics;
use triagem::correlate::FacialBiometricResult;
use triagem::logging;
use triagem::report::TriageReport;
use triagem::symptoms::{load_rules_from_app_dir, SymptomAnswers, SymptomScorer};

struct Options {
    recording: PathBuf,
    answers: Option<PathBuf>,
    facial: Option<FacialBiometricResult>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let options = parse_args(std::env::args().skip(1).collect())?;
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let buffer = decode_wav(&options.recording).map_err(|err| err.to_string())?;
    tracing::info!(
        duration_seconds = buffer.duration_seconds(),
        sample_rate = buffer.sample_rate(),
        "decoded recording"
    );
    let features = extract_features(buffer).map_err(|err| err.to_string())?;
    let acoustic = classify_acoustics(&features);

    let symptoms = match &options.answers {
        Some(path) => {
            let answers = load_answers(path)?;
            let scorer = SymptomScorer::new(load_rules_from_app_dir());
            Some(scorer.score(&answers))
        }
        None => None,
    };

    let report = TriageReport::assemble(Some(acoustic), options.facial, symptoms);
    let json = report.to_json().map_err(|err| err.to_string())?;
    println!("{json}");
    Ok(())
}

fn load_answers(path: &Path) -> Result<SymptomAnswers, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| format!("Failed to read {}: {err}", path.display()))?;
    let map: BTreeMap<String, String> = serde_json::from_str(&text)
        .map_err(|err| format!("Invalid answers file {}: {err}", path.display()))?;
    Ok(SymptomAnswers::new(map))
}

fn parse_args(args: Vec<String>) -> Result<Options, String> {
    let mut recording = None;
    let mut answers = None;
    let mut facial = None;
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--facial" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--facial requires hr,stress,confidence".to_string())?;
                facial = Some(parse_facial(&value)?);
            }
            "--help" | "-h" => return Err(usage()),
            _ if recording.is_none() => recording = Some(PathBuf::from(arg)),
            _ if answers.is_none() => answers = Some(PathBuf::from(arg)),
            _ => return Err(usage()),
        }
    }
    Ok(Options {
        recording: recording.ok_or_else(usage)?,
        answers,
        facial,
    })
}

fn parse_facial(value: &str) -> Result<FacialBiometricResult, String> {
    let parts: Vec<&str> = value.split(',').collect();
    if parts.len() != 3 {
        return Err("--facial expects hr,stress,confidence".to_string());
    }
    let heart_rate = parts[0]
        .trim()
        .parse::<i32>()
        .map_err(|err| format!("Invalid heart rate: {err}"))?;
    let stress_level = parts[1]
        .trim()
        .parse::<u8>()
        .map_err(|err| format!("Invalid stress level: {err}"))?;
    let confidence = parts[2]
        .trim()
        .parse::<f32>()
        .map_err(|err| format!("Invalid confidence: {err}"))?;
    Ok(FacialBiometricResult {
        heart_rate,
        stress_level: stress_level.min(10),
        confidence,
    })
}

fn usage() -> String {
    "Usage: triagem <recording.wav> [answers.json] [--facial hr,stress,confidence]".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_recording_answers_and_facial() {
        let options = parse_args(vec![
            "voice.wav".into(),
            "answers.json".into(),
            "--facial".into(),
            "88,6,0.8".into(),
        ])
        .unwrap();
        assert_eq!(options.recording, PathBuf::from("voice.wav"));
        assert_eq!(options.answers, Some(PathBuf::from("answers.json")));
        let facial = options.facial.unwrap();
        assert_eq!(facial.heart_rate, 88);
        assert_eq!(facial.stress_level, 6);
    }

    #[test]
    fn missing_recording_is_an_error() {
        assert!(parse_args(Vec::new()).is_err());
    }

    #[test]
    fn malformed_facial_triplet_is_rejected() {
        assert!(parse_facial("90,high,0.8").is_err());
        assert!(parse_facial("90,5").is_err());
    }
}
