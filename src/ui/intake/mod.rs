//! Number porting intake screen: header, stepper and the active stage

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::config::{BrandingConfig, Config};
use crate::ui::layout::{centered_rect, key_hints};
use crate::ui::stepper::{render_header, render_stepper};
use crate::wizard::{Dispatcher, Stage, StageRegistry, StepData, Transition, WizardError};

pub mod steps;

use steps::{DeliveryStage, NumberStage, SimStage, StageView, StatusStage, TariffStage};

#[cfg(test)]
mod tests;

/// Result of intake screen key handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeResult {
    /// Stay on the screen
    Continue,
    /// Moved to another stage
    Moved(Transition),
    /// User finished from the status stage
    Finish,
}

/// One intake session rendered as a full-screen wizard
pub struct IntakeScreen {
    dispatcher: Dispatcher<Box<dyn StageView>>,
    branding: BrandingConfig,
    panel_width_percent: u16,
    /// Last rejected action, shown above the footer
    notice: Option<String>,
}

fn build_view(stage: Stage, config: &Config) -> Box<dyn StageView> {
    match stage {
        Stage::Number => Box::new(NumberStage::new()),
        Stage::Tariff => Box::new(TariffStage::new(config.tariffs.clone())),
        Stage::Sim => Box::new(SimStage::new()),
        Stage::Delivery => Box::new(DeliveryStage::new()),
        Stage::Status => Box::new(StatusStage::new(config.tariffs.clone())),
    }
}

impl IntakeScreen {
    pub fn new(config: &Config) -> Self {
        let registry = StageRegistry::from_fn(|stage| build_view(stage, config));
        Self {
            dispatcher: Dispatcher::new(registry),
            branding: config.branding.clone(),
            panel_width_percent: config.ui.panel_width_percent.clamp(30, 100),
            notice: None,
        }
    }

    pub fn current(&self) -> Stage {
        self.dispatcher.current()
    }

    pub fn record(&self) -> &StepData {
        self.dispatcher.record()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Throw away the session and every entered value
    pub fn restart(&mut self) {
        self.dispatcher.reset();
        for (_, view) in self.dispatcher.registry_mut().iter_mut() {
            view.reset();
        }
        self.notice = None;
    }

    pub fn handle_key(&mut self, key: KeyCode) -> IntakeResult {
        if self.current().is_terminal() {
            match key {
                KeyCode::Char('q' | 'Q') => return IntakeResult::Finish,
                KeyCode::Char('r' | 'R') => {
                    self.restart();
                    return IntakeResult::Continue;
                }
                _ => {}
            }
        }

        let (view, contract) = self.dispatcher.active();
        let Some(action) = view.handle_key(key, &contract) else {
            return IntakeResult::Continue;
        };

        match self.dispatcher.dispatch(action) {
            Ok(transition) => {
                self.notice = None;
                IntakeResult::Moved(transition)
            }
            Err(err) => {
                self.notice = Some(Self::describe(&err));
                IntakeResult::Continue
            }
        }
    }

    fn describe(err: &WizardError) -> String {
        format!("Action ignored: {err}")
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = centered_rect(self.panel_width_percent, 90, frame.area());
        frame.render_widget(Clear, area);

        let stage = self.current();
        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    format!("Step {} of {}", stage.index(), Stage::COUNT),
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" {} ", stage.title())),
            ]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Length(1), // Spacer
                Constraint::Length(2), // Stepper
                Constraint::Length(1), // Spacer
                Constraint::Min(8),    // Stage body
                Constraint::Length(1), // Notice
                Constraint::Length(1), // Footer
            ])
            .split(inner);

        render_header(frame, chunks[0], &self.branding);
        render_stepper(frame, chunks[2], stage);

        let (view, contract) = self.dispatcher.active();
        view.render(frame, chunks[4], &contract);
        let hints = view.hints(&contract);

        if let Some(notice) = &self.notice {
            frame.render_widget(
                Paragraph::new(Span::styled(notice.as_str(), Style::default().fg(Color::Red))),
                chunks[5],
            );
        }

        frame.render_widget(
            Paragraph::new(key_hints(&hints)).alignment(Alignment::Center),
            chunks[6],
        );
    }
}
