//! Reusable form field widgets for the stage forms

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// A single input on a stage form
pub enum FormField {
    /// Single-line text input
    TextInput {
        label: String,
        value: String,
        /// Cursor position in characters, not bytes
        cursor_pos: usize,
        placeholder: String,
        max_length: Option<usize>,
        digits_only: bool,
        required: bool,
    },
    /// One-of-many selection
    Choice {
        label: String,
        options: Vec<String>,
        selected: usize,
        list_state: ListState,
    },
}

fn byte_offset(value: &str, char_pos: usize) -> usize {
    value
        .char_indices()
        .nth(char_pos)
        .map_or(value.len(), |(i, _)| i)
}

impl FormField {
    pub fn text(label: &str, placeholder: &str) -> Self {
        FormField::TextInput {
            label: label.to_string(),
            value: String::new(),
            cursor_pos: 0,
            placeholder: placeholder.to_string(),
            max_length: None,
            digits_only: false,
            required: true,
        }
    }

    /// Required text input that only accepts ASCII digits
    pub fn digits(label: &str, placeholder: &str, max_length: usize) -> Self {
        FormField::TextInput {
            label: label.to_string(),
            value: String::new(),
            cursor_pos: 0,
            placeholder: placeholder.to_string(),
            max_length: Some(max_length),
            digits_only: true,
            required: true,
        }
    }

    pub fn choice(label: &str, options: Vec<String>) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        FormField::Choice {
            label: label.to_string(),
            options,
            selected: 0,
            list_state,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FormField::TextInput { label, .. } | FormField::Choice { label, .. } => label,
        }
    }

    /// Current value; the option label for choices
    pub fn value(&self) -> String {
        match self {
            FormField::TextInput { value, .. } => value.trim().to_string(),
            FormField::Choice {
                options, selected, ..
            } => options.get(*selected).cloned().unwrap_or_default(),
        }
    }

    /// Index of the selected option (always 0 for text inputs)
    pub fn selected(&self) -> usize {
        match self {
            FormField::TextInput { .. } => 0,
            FormField::Choice { selected, .. } => *selected,
        }
    }

    pub fn set_value(&mut self, new_value: &str) {
        match self {
            FormField::TextInput {
                value, cursor_pos, ..
            } => {
                *value = new_value.to_string();
                *cursor_pos = value.chars().count();
            }
            FormField::Choice {
                options,
                selected,
                list_state,
                ..
            } => {
                if let Some(idx) = options.iter().position(|o| o == new_value) {
                    *selected = idx;
                    list_state.select(Some(idx));
                }
            }
        }
    }

    pub fn clear(&mut self) {
        match self {
            FormField::TextInput {
                value, cursor_pos, ..
            } => {
                value.clear();
                *cursor_pos = 0;
            }
            FormField::Choice {
                selected,
                list_state,
                ..
            } => {
                *selected = 0;
                list_state.select(Some(0));
            }
        }
    }

    /// Non-empty for required text inputs; choices are always valid
    pub fn is_valid(&self) -> bool {
        match self {
            FormField::TextInput {
                value, required, ..
            } => !*required || !value.trim().is_empty(),
            FormField::Choice { options, .. } => !options.is_empty(),
        }
    }

    /// Handle a key event, returns true if the key was consumed
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match self {
            FormField::TextInput {
                value,
                cursor_pos,
                max_length,
                digits_only,
                ..
            } => match key {
                KeyCode::Char(c) => {
                    if *digits_only && !c.is_ascii_digit() {
                        return true;
                    }
                    if max_length.map(|m| value.chars().count() < m).unwrap_or(true) {
                        let at = byte_offset(value, *cursor_pos);
                        value.insert(at, c);
                        *cursor_pos += 1;
                    }
                    true
                }
                KeyCode::Backspace => {
                    if *cursor_pos > 0 {
                        *cursor_pos -= 1;
                        let at = byte_offset(value, *cursor_pos);
                        value.remove(at);
                    }
                    true
                }
                KeyCode::Delete => {
                    if *cursor_pos < value.chars().count() {
                        let at = byte_offset(value, *cursor_pos);
                        value.remove(at);
                    }
                    true
                }
                KeyCode::Left => {
                    if *cursor_pos > 0 {
                        *cursor_pos -= 1;
                    }
                    true
                }
                KeyCode::Right => {
                    if *cursor_pos < value.chars().count() {
                        *cursor_pos += 1;
                    }
                    true
                }
                KeyCode::Home => {
                    *cursor_pos = 0;
                    true
                }
                KeyCode::End => {
                    *cursor_pos = value.chars().count();
                    true
                }
                _ => false,
            },
            FormField::Choice {
                options,
                selected,
                list_state,
                ..
            } => match key {
                KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => {
                    if *selected > 0 {
                        *selected -= 1;
                        list_state.select(Some(*selected));
                    }
                    true
                }
                KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => {
                    if *selected < options.len().saturating_sub(1) {
                        *selected += 1;
                        list_state.select(Some(*selected));
                    }
                    true
                }
                _ => false,
            },
        }
    }

    /// Height needed to render this field, label included
    pub fn render_height(&self) -> u16 {
        match self {
            FormField::TextInput { .. } => 4,
            FormField::Choice { options, .. } => (options.len() as u16).min(6) + 3,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let border_color = if focused { Color::Cyan } else { Color::Gray };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(area);

        let label_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(self.label().to_string(), label_style)),
            chunks[0],
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        match self {
            FormField::TextInput {
                value,
                cursor_pos,
                placeholder,
                max_length,
                ..
            } => {
                let content = if value.is_empty() && !focused {
                    Line::from(Span::styled(
                        placeholder.as_str(),
                        Style::default().fg(Color::DarkGray),
                    ))
                } else {
                    let mut text = value.clone();
                    if focused {
                        let at = byte_offset(&text, *cursor_pos);
                        text.insert(at, '|');
                    }
                    let suffix = max_length
                        .map(|m| format!(" ({}/{})", value.chars().count(), m))
                        .unwrap_or_default();
                    Line::from(vec![
                        Span::raw(text),
                        Span::styled(suffix, Style::default().fg(Color::DarkGray)),
                    ])
                };

                let para = Paragraph::new(content).block(block).style(
                    Style::default().fg(if focused { Color::White } else { Color::Gray }),
                );
                frame.render_widget(para, chunks[1]);
            }
            FormField::Choice {
                options,
                selected,
                list_state,
                ..
            } => {
                let items: Vec<ListItem> = options
                    .iter()
                    .enumerate()
                    .map(|(i, opt)| {
                        let style = if i == *selected {
                            Style::default().add_modifier(Modifier::BOLD)
                        } else {
                            Style::default().fg(Color::Gray)
                        };
                        ListItem::new(Span::styled(opt.as_str(), style))
                    })
                    .collect();

                let list = List::new(items)
                    .block(block)
                    .highlight_style(Style::default().fg(Color::Cyan))
                    .highlight_symbol("> ");

                frame.render_stateful_widget(list, chunks[1], list_state);
            }
        }
    }
}

/// Ordered fields of one stage with keyboard focus
pub struct Form {
    pub fields: Vec<FormField>,
    hidden: Vec<bool>,
    focused_index: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        let hidden = vec![false; fields.len()];
        Self {
            fields,
            hidden,
            focused_index: 0,
        }
    }

    pub fn field(&self, index: usize) -> &FormField {
        &self.fields[index]
    }

    pub fn focused_index(&self) -> usize {
        self.focused_index
    }

    /// Hidden fields are skipped by focus, validation and rendering
    pub fn set_hidden(&mut self, index: usize, hidden: bool) {
        if let Some(slot) = self.hidden.get_mut(index) {
            *slot = hidden;
        }
    }

    pub fn is_hidden(&self, index: usize) -> bool {
        self.hidden.get(index).copied().unwrap_or(true)
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focused_index)
    }

    fn visible_indices(&self) -> Vec<usize> {
        (0..self.fields.len()).filter(|i| !self.is_hidden(*i)).collect()
    }

    pub fn next_field(&mut self) {
        if let Some(next) = self
            .visible_indices()
            .into_iter()
            .find(|i| *i > self.focused_index)
        {
            self.focused_index = next;
        }
    }

    pub fn prev_field(&mut self) {
        if let Some(prev) = self
            .visible_indices()
            .into_iter()
            .rev()
            .find(|i| *i < self.focused_index)
        {
            self.focused_index = prev;
        }
    }

    pub fn is_last_field(&self) -> bool {
        self.visible_indices()
            .last()
            .map_or(true, |last| self.focused_index >= *last)
    }

    /// Check that every visible field is valid
    pub fn is_valid(&self) -> bool {
        self.visible_indices()
            .into_iter()
            .all(|i| self.fields[i].is_valid())
    }

    /// Route a key to the focused field; Tab and BackTab move focus
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Tab => {
                self.next_field();
                true
            }
            KeyCode::BackTab => {
                self.prev_field();
                true
            }
            _ => self
                .focused_field_mut()
                .is_some_and(|field| field.handle_key(key)),
        }
    }

    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.focused_index = 0;
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let visible = self.visible_indices();
        let mut constraints: Vec<Constraint> = visible
            .iter()
            .map(|i| Constraint::Length(self.fields[*i].render_height()))
            .collect();
        constraints.push(Constraint::Min(0));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (slot, index) in visible.into_iter().enumerate() {
            let focused = index == self.focused_index;
            self.fields[index].render(frame, chunks[slot], focused);
        }
    }
}
