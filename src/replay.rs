//! Headless replay of scripted stage actions.
//!
//! A script is a JSON array of actions, e.g.
//! `[{"next": {"number": {...}}}, {"next": {"tariff": "red_m"}}, "back"]`.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

use crate::wizard::{Dispatcher, Stage, StageAction, StepData, Transition, WizardError};

/// First action the dispatcher refused
#[derive(Debug, Error)]
#[error("action #{position} rejected: {source}")]
pub struct ReplayError {
    /// 1-based position in the script
    pub position: usize,
    #[source]
    pub source: WizardError,
    /// Transitions committed before the rejection
    pub completed: Vec<Transition>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub transitions: Vec<Transition>,
    pub stage: Stage,
    pub record: StepData,
}

pub fn parse_script(json: &str) -> Result<Vec<StageAction>> {
    serde_json::from_str(json).context("Replay script must be a JSON array of actions")
}

pub fn load_script(path: &Path) -> Result<Vec<StageAction>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read replay script {}", path.display()))?;
    parse_script(&json)
}

/// Run every action through a fresh session, stopping at the first rejection
pub fn run_script(actions: Vec<StageAction>) -> Result<ReplayReport, ReplayError> {
    let mut dispatcher = Dispatcher::headless();
    let mut transitions = Vec::with_capacity(actions.len());

    for (i, action) in actions.into_iter().enumerate() {
        match dispatcher.dispatch(action) {
            Ok(transition) => transitions.push(transition),
            Err(source) => {
                return Err(ReplayError {
                    position: i + 1,
                    source,
                    completed: transitions,
                })
            }
        }
    }

    Ok(ReplayReport {
        transitions,
        stage: dispatcher.current(),
        record: dispatcher.record().clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::Callback;

    const ESIM_SCRIPT: &str = r#"[
        {"next": {"number": {"phone": "0991234567", "verificationMethod": "sms"}}},
        {"next": {"tariff": "red_m"}},
        {"next": {"sim": {"type": "esim", "isESim": true}}}
    ]"#;

    #[test]
    fn test_esim_script_reaches_status() {
        let report = run_script(parse_script(ESIM_SCRIPT).unwrap()).unwrap();
        assert_eq!(report.stage, Stage::Status);
        assert_eq!(report.transitions.len(), 3);
        assert!(report.transitions[2].skipped);
        assert_eq!(report.record.tariff.as_deref(), Some("red_m"));
    }

    #[test]
    fn test_back_on_entry_stage_is_rejected() {
        let err = run_script(parse_script(r#"["back"]"#).unwrap()).unwrap_err();
        assert_eq!(err.position, 1);
        assert!(err.completed.is_empty());
        assert!(matches!(
            err.source,
            WizardError::CallbackNotOffered {
                stage: Stage::Number,
                callback: Callback::Back
            }
        ));
    }

    #[test]
    fn test_rejection_keeps_completed_transitions() {
        let script = r#"[
            {"next": {"tariff": "red_s"}},
            "back",
            "back"
        ]"#;
        let err = run_script(parse_script(script).unwrap()).unwrap_err();
        assert_eq!(err.position, 3);
        assert_eq!(err.completed.len(), 2);
    }

    #[test]
    fn test_malformed_script_is_an_error() {
        assert!(parse_script(r#"{"next": {}}"#).is_err());
        assert!(parse_script(r#"["forward"]"#).is_err());
    }

    #[test]
    fn test_load_script_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("script.json");
        std::fs::write(&path, ESIM_SCRIPT).unwrap();
        assert_eq!(load_script(&path).unwrap().len(), 3);
        assert!(load_script(&dir.path().join("missing.json")).is_err());
    }
}
