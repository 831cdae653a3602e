//! SIM type stage

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::{back_action, StageView};
use crate::wizard::{SimData, SimType, StageAction, StageContract, StepData};

pub struct SimStage {
    list_state: ListState,
}

impl SimStage {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { list_state }
    }

    fn highlighted(&self) -> SimType {
        let options = SimType::all();
        self.list_state
            .selected()
            .and_then(|i| options.get(i).copied())
            .unwrap_or_default()
    }
}

impl Default for SimStage {
    fn default() -> Self {
        Self::new()
    }
}

impl StageView for SimStage {
    fn render(&mut self, frame: &mut Frame, area: Rect, _contract: &StageContract<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Intro
                Constraint::Length(6), // Options
                Constraint::Min(1),    // Note
            ])
            .split(area);

        frame.render_widget(Paragraph::new("Which SIM do you need?"), chunks[0]);

        let items: Vec<ListItem> = SimType::all()
            .iter()
            .map(|sim| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        sim.label(),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("  {}", sim.description()),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
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

        if self.highlighted() == SimType::Esim {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Delivery is not needed for eSIM; you will go straight to the summary.",
                    Style::default().fg(Color::Yellow),
                )),
                chunks[2],
            );
        }
    }

    fn handle_key(&mut self, key: KeyCode, contract: &StageContract<'_>) -> Option<StageAction> {
        let len = SimType::all().len();
        match key {
            KeyCode::Enter => Some(StageAction::Next(StepData::with_sim(SimData::new(
                self.highlighted(),
            )))),
            KeyCode::Up | KeyCode::Down | KeyCode::Tab | KeyCode::BackTab | KeyCode::Char(' ') => {
                let i = self.list_state.selected().map_or(0, |i| (i + 1) % len);
                self.list_state.select(Some(i));
                None
            }
            _ => back_action(key, contract),
        }
    }

    fn reset(&mut self) {
        self.list_state.select(Some(0));
    }

    fn hints(&self, _contract: &StageContract<'_>) -> Vec<(&'static str, &'static str)> {
        vec![
            ("Enter", "select"),
            ("↑/↓", "switch"),
            ("Esc", "back"),
            ("Ctrl+C", "quit"),
        ]
    }
}
