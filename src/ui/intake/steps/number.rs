//! Phone number stage

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};

use super::{back_action, StageView};
use crate::ui::form_field::{Form, FormField};
use crate::wizard::{NumberData, StageAction, StageContract, StepData, VerificationMethod};

const PHONE: usize = 0;
const METHOD: usize = 1;

/// Ukrainian national format: 0 followed by nine digits
const PHONE_DIGITS: usize = 10;

pub struct NumberStage {
    form: Form,
    error: Option<String>,
}

impl NumberStage {
    pub fn new() -> Self {
        let methods = VerificationMethod::all()
            .iter()
            .map(|m| m.label().to_string())
            .collect();
        Self {
            form: Form::new(vec![
                FormField::digits("Number to port", "0XXXXXXXXX", PHONE_DIGITS),
                FormField::choice("Verification", methods),
            ]),
            error: None,
        }
    }

    fn validate_phone(phone: &str) -> Result<(), String> {
        if phone.len() != PHONE_DIGITS {
            return Err(format!("Phone number must have {PHONE_DIGITS} digits"));
        }
        if !phone.starts_with('0') {
            return Err("Phone number must start with 0".to_string());
        }
        Ok(())
    }

    fn submission(&self) -> StepData {
        let method = VerificationMethod::all()[self.form.field(METHOD).selected()];
        StepData::with_number(NumberData {
            phone: self.form.field(PHONE).value(),
            verification_method: method,
        })
    }
}

impl Default for NumberStage {
    fn default() -> Self {
        Self::new()
    }
}

impl StageView for NumberStage {
    fn render(&mut self, frame: &mut Frame, area: Rect, _contract: &StageContract<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Intro
                Constraint::Min(8),    // Form
                Constraint::Length(1), // Error
            ])
            .split(area);

        frame.render_widget(
            Paragraph::new("Enter the number you want to move to us and how to confirm it."),
            chunks[0],
        );
        self.form.render(frame, chunks[1]);

        if let Some(error) = &self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
                chunks[2],
            );
        }
    }

    fn handle_key(&mut self, key: KeyCode, contract: &StageContract<'_>) -> Option<StageAction> {
        if key == KeyCode::Enter {
            if !self.form.is_last_field() {
                self.form.next_field();
                return None;
            }
            return match Self::validate_phone(&self.form.field(PHONE).value()) {
                Ok(()) => {
                    self.error = None;
                    Some(StageAction::Next(self.submission()))
                }
                Err(message) => {
                    self.error = Some(message);
                    None
                }
            };
        }

        if let Some(action) = back_action(key, contract) {
            return Some(action);
        }
        self.form.handle_key(key);
        None
    }

    fn reset(&mut self) {
        self.form.reset();
        self.error = None;
    }
}
