//! numport - terminal intake wizard for porting a mobile number.
//!
//! The [`wizard`] module holds the step-flow core and has no terminal
//! dependency; [`ui`] and [`app`] put a ratatui front end on it.

pub mod app;
pub mod config;
pub mod logging;
pub mod replay;
pub mod ui;
pub mod wizard;
