//! Session state: current stage plus the cumulative record

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::controller::StepController;
use super::error::WizardError;
use super::record::StepData;
use super::stage::Stage;

/// Direction of a committed transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

/// One committed transition, handed back to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: Stage,
    pub to: Stage,
    pub direction: Direction,
    /// True when the eSIM branch jumped over delivery
    pub skipped: bool,
    pub at: DateTime<Utc>,
}

/// State of one intake session.
///
/// The stage and the record only change together through
/// [`WizardState::advance_with`] and [`WizardState::retreat_one`]; a failed
/// call leaves both untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    current: Stage,
    record: StepData,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Stage {
        self.current
    }

    pub fn record(&self) -> &StepData {
        &self.record
    }

    /// Continue from the current stage with the stage's submission
    pub fn advance_with(&mut self, submission: StepData) -> Result<Transition, WizardError> {
        let from = self.current;
        let to = StepController::advance(from, &submission)?;

        self.record.merge(submission);
        self.current = to;

        Ok(Self::commit(from, to, Direction::Forward))
    }

    /// Go back one stage; the record is kept as is
    pub fn retreat_one(&mut self) -> Result<Transition, WizardError> {
        let from = self.current;
        let to = StepController::retreat(from)?;

        self.current = to;

        Ok(Self::commit(from, to, Direction::Backward))
    }

    /// Start over with an empty record at the entry stage
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn commit(from: Stage, to: Stage, direction: Direction) -> Transition {
        let skipped = direction == Direction::Forward && StepController::is_skip(from, to);
        tracing::info!(
            from = from.index(),
            to = to.index(),
            ?direction,
            skipped,
            "stage transition"
        );
        Transition {
            from,
            to,
            direction,
            skipped,
            at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::record::{NumberData, SimData, SimType, VerificationMethod};

    fn number_submission() -> StepData {
        StepData::with_number(NumberData {
            phone: "0991234567".to_string(),
            verification_method: VerificationMethod::Sms,
        })
    }

    #[test]
    fn test_new_state_starts_at_entry_with_empty_record() {
        let state = WizardState::new();
        assert_eq!(state.current(), Stage::Number);
        assert!(state.record().is_empty());
    }

    #[test]
    fn test_advance_merges_and_moves_together() {
        let mut state = WizardState::new();
        let transition = state.advance_with(number_submission()).unwrap();

        assert_eq!(transition.from, Stage::Number);
        assert_eq!(transition.to, Stage::Tariff);
        assert!(!transition.skipped);
        assert_eq!(state.current(), Stage::Tariff);
        assert!(state.record().number.is_some());
    }

    #[test]
    fn test_retreat_keeps_record() {
        let mut state = WizardState::new();
        state.advance_with(number_submission()).unwrap();
        state.advance_with(StepData::with_tariff("Red M")).unwrap();
        let before = state.record().clone();

        state.retreat_one().unwrap();
        assert_eq!(state.current(), Stage::Tariff);
        assert_eq!(state.record(), &before);
    }

    #[test]
    fn test_failed_retreat_leaves_state_untouched() {
        let mut state = WizardState::new();
        let err = state.retreat_one().unwrap_err();
        assert_eq!(err, WizardError::NoPreviousStage(Stage::Number));
        assert_eq!(state.current(), Stage::Number);
    }

    #[test]
    fn test_failed_advance_does_not_merge() {
        let mut state = WizardState::new();
        state.advance_with(number_submission()).unwrap();
        state.advance_with(StepData::with_tariff("Red M")).unwrap();
        state
            .advance_with(StepData::with_sim(SimData::new(SimType::Esim)))
            .unwrap();
        assert_eq!(state.current(), Stage::Status);

        let err = state
            .advance_with(StepData::with_tariff("Red XL"))
            .unwrap_err();
        assert_eq!(err, WizardError::TerminalStage(Stage::Status));
        assert_eq!(state.record().tariff.as_deref(), Some("Red M"));
    }

    #[test]
    fn test_esim_transition_is_marked_as_skip() {
        let mut state = WizardState::new();
        state.advance_with(number_submission()).unwrap();
        state.advance_with(StepData::with_tariff("Red M")).unwrap();
        let transition = state
            .advance_with(StepData::with_sim(SimData::new(SimType::Esim)))
            .unwrap();
        assert!(transition.skipped);
        assert_eq!(transition.to, Stage::Status);
        assert_eq!(transition.direction, Direction::Forward);
    }

    #[test]
    fn test_reset_returns_to_initial_state() {
        let mut state = WizardState::new();
        state.advance_with(number_submission()).unwrap();
        state.reset();
        assert_eq!(state.current(), Stage::Number);
        assert!(state.record().is_empty());
    }

    #[test]
    fn test_back_and_forth_leaves_nothing_behind() {
        let mut once = WizardState::new();
        once.advance_with(number_submission()).unwrap();

        let mut cycled = once.clone();
        for _ in 0..1_000 {
            cycled.retreat_one().unwrap();
            cycled.advance_with(number_submission()).unwrap();
        }
        assert_eq!(cycled, once);
    }
}
