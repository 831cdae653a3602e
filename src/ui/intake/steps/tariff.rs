//! Tariff selection stage

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::{back_action, StageView};
use crate::config::TariffOption;
use crate::wizard::{StageAction, StageContract, StepData};

pub struct TariffStage {
    tariffs: Vec<TariffOption>,
    list_state: ListState,
}

impl TariffStage {
    pub fn new(tariffs: Vec<TariffOption>) -> Self {
        let mut list_state = ListState::default();
        list_state.select((!tariffs.is_empty()).then_some(0));
        Self {
            tariffs,
            list_state,
        }
    }

    fn highlighted(&self) -> Option<&TariffOption> {
        self.list_state.selected().and_then(|i| self.tariffs.get(i))
    }

    fn select_next(&mut self) {
        let len = self.tariffs.len();
        if len == 0 {
            return;
        }
        let i = self.list_state.selected().map_or(0, |i| (i + 1) % len);
        self.list_state.select(Some(i));
    }

    fn select_prev(&mut self) {
        let len = self.tariffs.len();
        if len == 0 {
            return;
        }
        let i = self
            .list_state
            .selected()
            .map_or(0, |i| if i == 0 { len - 1 } else { i - 1 });
        self.list_state.select(Some(i));
    }
}

impl StageView for TariffStage {
    fn render(&mut self, frame: &mut Frame, area: Rect, _contract: &StageContract<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Intro
                Constraint::Min(5),    // Tariff list
                Constraint::Length(4), // Details
            ])
            .split(area);

        frame.render_widget(Paragraph::new("Choose the tariff for your number."), chunks[0]);

        let items: Vec<ListItem> = self
            .tariffs
            .iter()
            .map(|t| {
                ListItem::new(Line::from(vec![
                    Span::styled(t.name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(
                        format!("  {} грн/міс", t.monthly_fee),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .highlight_style(Style::default().fg(Color::Cyan))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, chunks[1], &mut self.list_state);

        let details = self
            .highlighted()
            .map(|t| t.description.clone())
            .unwrap_or_else(|| "No tariffs configured".to_string());
        frame.render_widget(
            Paragraph::new(details)
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true }),
            chunks[2],
        );
    }

    fn handle_key(&mut self, key: KeyCode, contract: &StageContract<'_>) -> Option<StageAction> {
        match key {
            KeyCode::Enter => self
                .highlighted()
                .map(|t| StageAction::Next(StepData::with_tariff(t.id.clone()))),
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
                self.select_prev();
                None
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.select_next();
                None
            }
            _ => back_action(key, contract),
        }
    }

    fn reset(&mut self) {
        self.list_state
            .select((!self.tariffs.is_empty()).then_some(0));
    }

    fn hints(&self, _contract: &StageContract<'_>) -> Vec<(&'static str, &'static str)> {
        vec![
            ("Enter", "select"),
            ("↑/↓", "browse"),
            ("Esc", "back"),
            ("Ctrl+C", "quit"),
        ]
    }
}
