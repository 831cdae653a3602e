//! Delivery stage for physical SIM cards

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
use crate::wizard::{
    DeliveryData, DeliveryMethod, NovaPoshtaData, StageAction, StageContract, StepData,
};

const METHOD: usize = 0;
const FIRST_NAME: usize = 1;
const LAST_NAME: usize = 2;
const CITY: usize = 3;
const WAREHOUSE: usize = 4;

pub struct DeliveryStage {
    form: Form,
    error: Option<String>,
}

impl DeliveryStage {
    pub fn new() -> Self {
        let methods = DeliveryMethod::all()
            .iter()
            .map(|m| m.label().to_string())
            .collect();
        let mut stage = Self {
            form: Form::new(vec![
                FormField::choice("Delivery method", methods),
                FormField::text("First name", "Ім'я"),
                FormField::text("Last name", "Прізвище"),
                FormField::text("City", "Київ"),
                FormField::digits("Warehouse number", "1", 5),
            ]),
            error: None,
        };
        stage.sync_visibility();
        stage
    }

    fn method(&self) -> DeliveryMethod {
        DeliveryMethod::all()[self.form.field(METHOD).selected()]
    }

    /// Nova Poshta fields are only shown for warehouse delivery
    fn sync_visibility(&mut self) {
        let hide = self.method() != DeliveryMethod::NovaPoshta;
        self.form.set_hidden(CITY, hide);
        self.form.set_hidden(WAREHOUSE, hide);
    }

    fn submission(&self) -> StepData {
        let method = self.method();
        let nova_poshta_data = (method == DeliveryMethod::NovaPoshta).then(|| NovaPoshtaData {
            city: self.form.field(CITY).value(),
            warehouse: self.form.field(WAREHOUSE).value(),
        });
        StepData::with_delivery(DeliveryData {
            method,
            first_name: self.form.field(FIRST_NAME).value(),
            last_name: self.form.field(LAST_NAME).value(),
            nova_poshta_data,
        })
    }
}

impl Default for DeliveryStage {
    fn default() -> Self {
        Self::new()
    }
}

impl StageView for DeliveryStage {
    fn render(&mut self, frame: &mut Frame, area: Rect, _contract: &StageContract<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Intro
                Constraint::Min(10),   // Form
                Constraint::Length(1), // Error
            ])
            .split(area);

        frame.render_widget(
            Paragraph::new("Where should we send your new SIM card?"),
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
            if !self.form.is_valid() {
                self.error = Some("Please fill in every field".to_string());
                return None;
            }
            self.error = None;
            return Some(StageAction::Next(self.submission()));
        }

        if let Some(action) = back_action(key, contract) {
            return Some(action);
        }
        if self.form.handle_key(key) && self.form.focused_index() == METHOD {
            self.sync_visibility();
        }
        None
    }

    fn reset(&mut self) {
        self.form.reset();
        self.sync_visibility();
        self.error = None;
    }
}
