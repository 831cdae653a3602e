pub mod form_field;
pub mod intake;
mod layout;
pub mod stepper;
pub mod terminal_guard;

pub use intake::{IntakeResult, IntakeScreen};
