//! Brand header and the five-bubble progress stepper

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::config::BrandingConfig;
use crate::wizard::Stage;

/// Width of one stepper cell: connector, bubble, connector
const CELL_WIDTH: usize = 12;
const BUBBLE_WIDTH: usize = 3;

fn bubble_style(reached: bool) -> Style {
    if reached {
        Style::default()
            .fg(Color::White)
            .bg(Color::LightRed)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray).bg(Color::DarkGray)
    }
}

fn connector_style(passed: bool) -> Style {
    if passed {
        Style::default().fg(Color::LightRed)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Bubble row and caption row for the given current stage.
///
/// Bubbles up to and including the current stage are highlighted; a
/// connector is highlighted once the stage on its left has been passed.
pub fn stepper_lines(current: Stage) -> [Line<'static>; 2] {
    let left = (CELL_WIDTH - BUBBLE_WIDTH) / 2;
    let right = CELL_WIDTH - BUBBLE_WIDTH - left;

    let mut bubbles = Vec::new();
    let mut captions = Vec::new();

    for stage in Stage::all().iter().copied() {
        let incoming = match stage.prev() {
            Some(prev) => Span::styled("─".repeat(left), connector_style(prev < current)),
            None => Span::raw(" ".repeat(left)),
        };
        let outgoing = if stage.is_terminal() {
            Span::raw(" ".repeat(right))
        } else {
            Span::styled("─".repeat(right), connector_style(stage < current))
        };

        bubbles.push(incoming);
        bubbles.push(Span::styled(
            format!(" {} ", stage.index()),
            bubble_style(stage <= current),
        ));
        bubbles.push(outgoing);

        let caption_style = if stage == current {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        captions.push(Span::styled(
            format!("{:^width$}", stage.label(), width = CELL_WIDTH),
            caption_style,
        ));
    }

    [Line::from(bubbles), Line::from(captions)]
}

/// Brand on the left, flow title on the right
pub fn render_header(frame: &mut Frame, area: Rect, branding: &BrandingConfig) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let brand = Paragraph::new(Span::styled(
        branding.brand.as_str(),
        Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(brand, chunks[0]);

    let title = Paragraph::new(Span::styled(
        branding.title.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Right);
    frame.render_widget(title, chunks[1]);
}

pub fn render_stepper(frame: &mut Frame, area: Rect, current: Stage) {
    let para = Paragraph::new(stepper_lines(current).to_vec()).alignment(Alignment::Center);
    frame.render_widget(para, area);
}
