//! Errors raised when the flow is driven outside its contract

use std::fmt;
use thiserror::Error;

use super::stage::Stage;

/// The two callbacks a stage collaborator may be given
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Callback {
    Next,
    Back,
}

impl fmt::Display for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Next => f.write_str("next"),
            Callback::Back => f.write_str("back"),
        }
    }
}

/// Caller misuse of the step flow. State is never modified when one of these
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("stage {0} is terminal and cannot advance")]
    TerminalStage(Stage),

    #[error("stage {0} is the entry stage and has no previous stage")]
    NoPreviousStage(Stage),

    #[error("stage {stage} was not offered the {callback} callback")]
    CallbackNotOffered { stage: Stage, callback: Callback },
}
