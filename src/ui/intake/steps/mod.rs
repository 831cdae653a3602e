//! Stage collaborators, one view per stage of the intake flow

use crossterm::event::KeyCode;
use ratatui::{layout::Rect, Frame};

use crate::wizard::{StageAction, StageContract};

mod delivery;
mod number;
mod sim;
mod status;
mod tariff;

pub use delivery::DeliveryStage;
pub use number::NumberStage;
pub use sim::SimStage;
pub use status::StatusStage;
pub use tariff::TariffStage;

/// Capabilities every stage view provides to the intake screen
pub trait StageView {
    /// Draw the stage body into `area`
    fn render(&mut self, frame: &mut Frame, area: Rect, contract: &StageContract<'_>);

    /// Handle a key press; returns the callback to invoke, if any.
    ///
    /// Views only emit actions the contract offers.
    fn handle_key(&mut self, key: KeyCode, contract: &StageContract<'_>) -> Option<StageAction>;

    /// Clear any entered input
    fn reset(&mut self);

    /// Footer hints for this stage
    fn hints(&self, contract: &StageContract<'_>) -> Vec<(&'static str, &'static str)> {
        let mut hints = Vec::new();
        if contract.on_next {
            hints.push(("Enter", "continue"));
            hints.push(("Tab", "next field"));
        }
        if contract.on_back {
            hints.push(("Esc", "back"));
        }
        hints.push(("Ctrl+C", "quit"));
        hints
    }
}

/// Esc maps to the back callback when the stage was given one
pub(crate) fn back_action(key: KeyCode, contract: &StageContract<'_>) -> Option<StageAction> {
    (key == KeyCode::Esc && contract.on_back).then_some(StageAction::Back)
}
