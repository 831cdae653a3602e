//! Step-flow core of the porting intake wizard.
//!
//! Tracks the active stage, accumulates what each stage submits, and decides
//! where the flow goes next. Nothing here touches the terminal.

pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod record;
pub mod stage;
pub mod state;

pub use controller::StepController;
pub use dispatcher::{Dispatcher, StageAction, StageContract, StageRegistry};
pub use error::{Callback, WizardError};
pub use record::{
    DeliveryData, DeliveryMethod, NovaPoshtaData, NumberData, SimData, SimType, StepData,
    VerificationMethod,
};
pub use stage::Stage;
pub use state::{Direction, Transition, WizardState};
