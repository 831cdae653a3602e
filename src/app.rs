use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::config::Config;
use crate::ui::intake::{IntakeResult, IntakeScreen};
use crate::ui::terminal_guard::{install_panic_hook, TerminalGuard};
use crate::wizard::{Stage, StepData};

/// How a wizard session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// User confirmed the summary on the status stage
    Finished(StepData),
    /// User quit early; carries whatever was collected
    Aborted { stage: Stage, record: StepData },
}

impl Outcome {
    pub fn record(&self) -> &StepData {
        match self {
            Outcome::Finished(record) | Outcome::Aborted { record, .. } => record,
        }
    }
}

pub struct App {
    config: Config,
    intake: IntakeScreen,
    should_quit: bool,
    finished: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        let intake = IntakeScreen::new(&config);
        Self {
            config,
            intake,
            should_quit: false,
            finished: false,
        }
    }

    pub fn run(mut self) -> Result<Outcome> {
        install_panic_hook();
        let guard = TerminalGuard::new()?;
        let mut terminal = guard.terminal()?;

        let tick_rate = Duration::from_millis(self.config.ui.tick_rate_ms);
        tracing::info!(stage = %self.intake.current(), "intake session started");

        while !self.should_quit {
            terminal.draw(|f| self.intake.render(f))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }

        drop(terminal);
        drop(guard);
        Ok(self.into_outcome())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.intake.handle_key(key.code) == IntakeResult::Finish {
            self.finished = true;
            self.should_quit = true;
        }
    }

    fn into_outcome(self) -> Outcome {
        let record = self.intake.record().clone();
        if self.finished {
            tracing::info!(keys = ?record.keys(), "intake session finished");
            Outcome::Finished(record)
        } else {
            let stage = self.intake.current();
            tracing::info!(stage = %stage, "intake session aborted");
            Outcome::Aborted { stage, record }
        }
    }
}
