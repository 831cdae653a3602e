//! Transition rules between stages

use super::error::WizardError;
use super::record::StepData;
use super::stage::Stage;

/// Decides which stage follows the current one.
///
/// Stateless: the current stage and the submission that completed it are
/// all the rules need.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepController;

impl StepController {
    /// Stage reached by continuing from `current` with `submission`.
    ///
    /// Continuing from the SIM stage with an eSIM selected goes straight to
    /// the status stage, skipping delivery. Submissions are not validated
    /// here; a SIM submission without the `sim` key takes the default edge.
    pub fn advance(current: Stage, submission: &StepData) -> Result<Stage, WizardError> {
        if current == Stage::Sim && submission.selects_esim() {
            return Ok(Stage::Status);
        }
        current.next().ok_or(WizardError::TerminalStage(current))
    }

    /// Stage reached by going back from `current`.
    ///
    /// Always the linear predecessor: going back from status lands on
    /// delivery even when the eSIM branch skipped it on the way in.
    pub fn retreat(current: Stage) -> Result<Stage, WizardError> {
        current.prev().ok_or(WizardError::NoPreviousStage(current))
    }

    /// Whether `from -> to` jumped over at least one stage
    pub fn is_skip(from: Stage, to: Stage) -> bool {
        to.index() > from.index() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::record::{NumberData, SimData, SimType, VerificationMethod};

    fn any_submissions() -> Vec<StepData> {
        vec![
            StepData::default(),
            StepData::with_number(NumberData {
                phone: "0501112233".to_string(),
                verification_method: VerificationMethod::Call,
            }),
            StepData::with_tariff("Red M"),
            StepData::with_sim(SimData::new(SimType::Esim)),
        ]
    }

    #[test]
    fn test_advance_default_edges() {
        for stage in [Stage::Number, Stage::Tariff, Stage::Delivery] {
            for submission in any_submissions() {
                let next = StepController::advance(stage, &submission).unwrap();
                assert_eq!(next.index(), stage.index() + 1);
            }
        }
    }

    #[test]
    fn test_advance_sim_physical_goes_to_delivery() {
        let submission = StepData::with_sim(SimData::new(SimType::Physical));
        assert_eq!(
            StepController::advance(Stage::Sim, &submission),
            Ok(Stage::Delivery)
        );
    }

    #[test]
    fn test_advance_sim_esim_skips_delivery() {
        let submission = StepData::with_sim(SimData::new(SimType::Esim));
        assert_eq!(
            StepController::advance(Stage::Sim, &submission),
            Ok(Stage::Status)
        );
    }

    #[test]
    fn test_advance_sim_without_sim_key_takes_default_edge() {
        assert_eq!(
            StepController::advance(Stage::Sim, &StepData::default()),
            Ok(Stage::Delivery)
        );
    }

    #[test]
    fn test_advance_from_status_is_rejected() {
        assert_eq!(
            StepController::advance(Stage::Status, &StepData::default()),
            Err(WizardError::TerminalStage(Stage::Status))
        );
    }

    #[test]
    fn test_retreat_edges() {
        assert_eq!(StepController::retreat(Stage::Tariff), Ok(Stage::Number));
        assert_eq!(StepController::retreat(Stage::Sim), Ok(Stage::Tariff));
        assert_eq!(StepController::retreat(Stage::Delivery), Ok(Stage::Sim));
        assert_eq!(StepController::retreat(Stage::Status), Ok(Stage::Delivery));
    }

    #[test]
    fn test_retreat_from_entry_is_rejected_not_clamped() {
        assert_eq!(
            StepController::retreat(Stage::Number),
            Err(WizardError::NoPreviousStage(Stage::Number))
        );
    }

    #[test]
    fn test_is_skip() {
        assert!(StepController::is_skip(Stage::Sim, Stage::Status));
        assert!(!StepController::is_skip(Stage::Sim, Stage::Delivery));
        assert!(!StepController::is_skip(Stage::Status, Stage::Delivery));
    }
}
