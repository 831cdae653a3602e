//! Summary stage showing everything collected for the porting request

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{back_action, StageView};
use crate::config::TariffOption;
use crate::wizard::{StageAction, StageContract, StepData};

pub struct StatusStage {
    tariffs: Vec<TariffOption>,
}

impl StatusStage {
    pub fn new(tariffs: Vec<TariffOption>) -> Self {
        Self { tariffs }
    }

    fn tariff_name(&self, id: &str) -> String {
        TariffOption::find(&self.tariffs, id)
            .map(|t| format!("{} ({} грн/міс)", t.name, t.monthly_fee))
            .unwrap_or_else(|| id.to_string())
    }

    /// Label/value rows for the collected record
    pub fn summary_rows(&self, record: &StepData) -> Vec<(&'static str, String)> {
        const MISSING: &str = "—";
        let mut rows = Vec::new();

        match &record.number {
            Some(number) => {
                rows.push(("Number", number.phone.clone()));
                rows.push(("Verification", number.verification_method.label().to_string()));
            }
            None => rows.push(("Number", MISSING.to_string())),
        }

        rows.push((
            "Tariff",
            record
                .tariff
                .as_deref()
                .map_or_else(|| MISSING.to_string(), |id| self.tariff_name(id)),
        ));

        rows.push((
            "SIM",
            record
                .sim
                .as_ref()
                .map_or_else(|| MISSING.to_string(), |sim| sim.sim_type.label().to_string()),
        ));

        let delivery = match (&record.delivery, record.selects_esim()) {
            (Some(delivery), _) => {
                let mut text = format!(
                    "{}: {} {}",
                    delivery.method.label(),
                    delivery.first_name,
                    delivery.last_name
                );
                if let Some(np) = &delivery.nova_poshta_data {
                    text.push_str(&format!(", {} #{}", np.city, np.warehouse));
                }
                text
            }
            (None, true) => "Not needed for eSIM".to_string(),
            (None, false) => MISSING.to_string(),
        };
        rows.push(("Delivery", delivery));

        rows
    }
}

impl StageView for StatusStage {
    fn render(&mut self, frame: &mut Frame, area: Rect, contract: &StageContract<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Headline
                Constraint::Min(6),    // Summary
            ])
            .split(area);

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Your porting request is ready",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            chunks[0],
        );

        let empty = StepData::default();
        let record = contract.record.unwrap_or(&empty);
        let lines: Vec<Line> = self
            .summary_rows(record)
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{label:<14}"), Style::default().fg(Color::Gray)),
                    Span::styled(value, Style::default().fg(Color::White)),
                ])
            })
            .collect();

        let summary = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" Summary ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(summary, chunks[1]);
    }

    fn handle_key(&mut self, key: KeyCode, contract: &StageContract<'_>) -> Option<StageAction> {
        back_action(key, contract)
    }

    fn reset(&mut self) {}

    fn hints(&self, _contract: &StageContract<'_>) -> Vec<(&'static str, &'static str)> {
        vec![("Esc", "back"), ("r", "start over"), ("q", "finish")]
    }
}
