use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::EntityKind;

pub enum FormAction {
    Cancel,
    Save,
}

pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub required: bool,
    /// Shown next to empty fields, e.g. the accepted values of an enumeration.
    pub hint: Option<String>,
}

impl FormField {
    pub fn required(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            required: true,
            hint: None,
        }
    }

    pub fn optional(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            required: false,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// A create/edit form for one record. `record_id` is set when editing.
pub struct FormState {
    kind: EntityKind,
    record_id: Option<String>,
    fields: Vec<FormField>,
    current_field: usize,
    editing: bool,
    error: Option<String>,
}

impl FormState {
    pub fn new(kind: EntityKind, record_id: Option<String>, fields: Vec<FormField>) -> Self {
        Self {
            kind,
            record_id,
            fields,
            current_field: 0,
            editing: false,
            error: None,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    /// Value of the field with `label`, trimmed. Unknown labels read as empty.
    pub fn value(&self, label: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.trim())
            .unwrap_or("")
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.current_field = (self.current_field + 1) % self.fields.len();
        }
    }

    pub fn previous_field(&mut self) {
        if !self.fields.is_empty() {
            self.current_field = (self.current_field + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        let Some(field) = self.fields.get_mut(self.current_field) else {
            return;
        };

        match key {
            KeyCode::Char(c) => {
                field.value.push(c);
            }
            KeyCode::Backspace => {
                field.value.pop();
            }
            _ => {}
        }
    }

    /// Labels of required fields that are still blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.required && f.value.trim().is_empty())
            .map(|f| f.label)
            .collect()
    }
}

pub fn render_form<B: Backend>(f: &mut Frame<B>, area: Rect, state: &FormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    let title_text = match state.record_id {
        Some(_) => format!("Edit {}", state.kind.name()),
        None => format!("New {}", state.kind.name()),
    };

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    render_fields(f, state, chunks[1]);

    if let Some(error) = state.error() {
        let error = Paragraph::new(error).style(Style::default().fg(Color::Red));
        f.render_widget(error, chunks[2]);
    }

    let help_text = if state.editing {
        "Enter - Save field | Esc - Stop editing"
    } else {
        "Enter - Edit field | Up/Down - Navigate fields | S - Save | Esc - Cancel"
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);
}

fn render_fields<B: Backend>(f: &mut Frame<B>, state: &FormState, area: Rect) {
    let items: Vec<ListItem> = state
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let selected = i == state.current_field;
            let marker = if field.required { "*" } else { "" };
            let label_style = if selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };

            let value = if selected && state.editing {
                Span::styled(
                    format!("{}|", field.value),
                    Style::default().add_modifier(Modifier::BOLD),
                )
            } else if field.value.is_empty() {
                Span::styled(
                    field.hint.clone().unwrap_or_default(),
                    Style::default().fg(Color::DarkGray),
                )
            } else {
                Span::raw(field.value.as_str())
            };

            ListItem::new(Spans::from(vec![
                Span::styled(format!("{}{}: ", field.label, marker), label_style),
                value,
            ]))
        })
        .collect();

    let form_list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("{} Details", state.kind.name())),
    );

    f.render_widget(form_list, area);
}

pub fn handle_input(state: &mut FormState) -> Result<Option<FormAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, key.code));
    }
    Ok(None)
}

fn handle_key(state: &mut FormState, code: KeyCode) -> Option<FormAction> {
    match code {
        KeyCode::Esc => {
            if state.editing {
                state.toggle_editing();
            } else {
                return Some(FormAction::Cancel);
            }
        }
        KeyCode::Enter => state.toggle_editing(),
        KeyCode::Up if !state.editing => state.previous_field(),
        KeyCode::Down | KeyCode::Tab if !state.editing => state.next_field(),
        KeyCode::Char('s') if !state.editing => {
            let missing = state.missing_fields();
            if missing.is_empty() {
                state.error = None;
                return Some(FormAction::Save);
            }
            state.set_error(format!("Required: {}", missing.join(", ")));
        }
        _ if state.editing => state.edit_current_field(code),
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> FormState {
        FormState::new(
            EntityKind::Client,
            None,
            vec![
                FormField::required("Company Name", ""),
                FormField::optional("Notes", ""),
            ],
        )
    }

    fn type_text(state: &mut FormState, text: &str) {
        for c in text.chars() {
            handle_key(state, KeyCode::Char(c));
        }
    }

    #[test]
    fn typing_only_changes_fields_while_editing() {
        let mut state = form();
        handle_key(&mut state, KeyCode::Char('x'));
        assert_eq!(state.value("Company Name"), "");

        handle_key(&mut state, KeyCode::Enter);
        type_text(&mut state, "Acmee");
        handle_key(&mut state, KeyCode::Backspace);
        handle_key(&mut state, KeyCode::Enter);
        assert_eq!(state.value("Company Name"), "Acme");
    }

    #[test]
    fn save_is_blocked_until_required_fields_are_filled() {
        let mut state = form();
        assert!(handle_key(&mut state, KeyCode::Char('s')).is_none());
        assert_eq!(state.error(), Some("Required: Company Name"));

        handle_key(&mut state, KeyCode::Enter);
        type_text(&mut state, "Acme");
        handle_key(&mut state, KeyCode::Enter);
        assert!(matches!(handle_key(&mut state, KeyCode::Char('s')), Some(FormAction::Save)));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn navigation_wraps_and_escape_cancels() {
        let mut state = form();
        handle_key(&mut state, KeyCode::Up);
        handle_key(&mut state, KeyCode::Enter);
        type_text(&mut state, "gate code 4411");
        handle_key(&mut state, KeyCode::Esc);
        assert_eq!(state.value("Notes"), "gate code 4411");
        assert!(matches!(handle_key(&mut state, KeyCode::Esc), Some(FormAction::Cancel)));
    }
}
