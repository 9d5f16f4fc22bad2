use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::models::{Client, Document, EntityKind, Expense, Project, Worker};
use crate::service::Services;
use crate::store::Keyed;
use crate::ui::components::render_confirmation;

/// How a record type is laid out as a table row.
pub trait Tabular: Keyed {
    const HEADERS: &'static [&'static str];
    /// Column widths as percentages of the table width.
    const WIDTHS: &'static [u16];

    fn cells(&self) -> Vec<String>;
}

impl Tabular for Project {
    const HEADERS: &'static [&'static str] =
        &["Name", "Status", "Phase", "Deadline", "Budget", "Spent"];
    const WIDTHS: &'static [u16] = &[30, 12, 12, 14, 16, 16];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.status.to_string(),
            self.phase.to_string(),
            self.deadline.format("%Y-%m-%d").to_string(),
            format!("${:.2}", self.budget),
            format!("${:.2}", self.spent),
        ]
    }
}

impl Tabular for Client {
    const HEADERS: &'static [&'static str] = &["Company", "Contact", "Email", "Phone", "Projects"];
    const WIDTHS: &'static [u16] = &[28, 20, 26, 16, 10];

    fn cells(&self) -> Vec<String> {
        vec![
            self.company_name.clone(),
            self.contact_person.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.project_ids.len().to_string(),
        ]
    }
}

impl Tabular for Expense {
    const HEADERS: &'static [&'static str] =
        &["Date", "Category", "Amount", "Project", "Description"];
    const WIDTHS: &'static [u16] = &[12, 16, 14, 10, 48];

    fn cells(&self) -> Vec<String> {
        vec![
            self.date.format("%Y-%m-%d").to_string(),
            self.category.to_string(),
            format!("${:.2}", self.amount),
            self.project_id.clone(),
            self.description.clone(),
        ]
    }
}

impl Tabular for Worker {
    const HEADERS: &'static [&'static str] = &["Name", "Role", "Daily Rate", "Projects", "Skills"];
    const WIDTHS: &'static [u16] = &[22, 24, 12, 10, 32];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.role.clone(),
            format!("${:.2}", self.daily_rate),
            self.project_ids.len().to_string(),
            self.skills.join(", "),
        ]
    }
}

impl Tabular for Document {
    const HEADERS: &'static [&'static str] = &["Name", "Category", "Tags", "Uploaded", "Size"];
    const WIDTHS: &'static [u16] = &[36, 14, 24, 14, 12];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.category.to_string(),
            self.tags.join(", "),
            self.upload_date.format("%Y-%m-%d").to_string(),
            format!("{} KB", self.size),
        ]
    }
}

struct RecordRow {
    id: String,
    cells: Vec<String>,
}

/// The table screen for one entity type.
pub struct RecordsState {
    kind: EntityKind,
    headers: &'static [&'static str],
    widths: &'static [u16],
    rows: Vec<RecordRow>,
    table_state: TableState,
    show_delete_confirmation: bool,
}

impl RecordsState {
    pub fn new<T: Tabular>(kind: EntityKind, records: &[T]) -> Self {
        let rows: Vec<RecordRow> = records
            .iter()
            .map(|record| RecordRow {
                id: record.id().to_string(),
                cells: record.cells(),
            })
            .collect();

        let mut table_state = TableState::default();
        if !rows.is_empty() {
            table_state.select(Some(0));
        }

        Self {
            kind,
            headers: T::HEADERS,
            widths: T::WIDTHS,
            rows,
            table_state,
            show_delete_confirmation: false,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn next(&mut self) {
        if self.rows.is_empty() {
            return;
        }

        let i = match self.table_state.selected() {
            Some(i) if i + 1 < self.rows.len() => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.rows.is_empty() {
            return;
        }

        let i = match self.table_state.selected() {
            Some(0) | None => self.rows.len() - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    pub fn toggle_delete_confirmation(&mut self) {
        self.show_delete_confirmation = !self.show_delete_confirmation;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.table_state
            .selected()
            .and_then(|i| self.rows.get(i))
            .map(|row| row.id.as_str())
    }
}

pub enum RecordAction {
    Back,
    New(EntityKind),
    Edit(EntityKind, String),
    Delete(EntityKind, String),
}

/// Replaces each client's stored project links with the projects that name it as their client.
fn link_projects(clients: &mut [Client], projects: &[Project]) {
    for client in clients {
        client.project_ids = projects
            .iter()
            .filter(|p| p.client_id == client.id)
            .map(|p| p.id.clone())
            .collect();
    }
}

/// Fetches the current collection for `kind`.
pub async fn load_records(services: &Services, kind: EntityKind) -> RecordsState {
    match kind {
        EntityKind::Project => RecordsState::new(kind, &services.projects.get_all().await),
        EntityKind::Client => {
            let (mut clients, projects) =
                tokio::join!(services.clients.get_all(), services.projects.get_all());
            link_projects(&mut clients, &projects);
            RecordsState::new(kind, &clients)
        }
        EntityKind::Expense => RecordsState::new(kind, &services.expenses.get_all().await),
        EntityKind::Worker => RecordsState::new(kind, &services.workers.get_all().await),
        EntityKind::Document => RecordsState::new(kind, &services.documents.get_all().await),
    }
}

pub fn render_records<B: Backend>(frame: &mut Frame<B>, area: Rect, state: &mut RecordsState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    let header = Row::new(state.headers.iter().map(|h| Cell::from(*h)))
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows = state
        .rows
        .iter()
        .map(|row| Row::new(row.cells.iter().map(|c| Cell::from(c.as_str()))));

    let widths: Vec<Constraint> = state.widths.iter().map(|w| Constraint::Percentage(*w)).collect();

    let table = Table::new(rows)
        .header(header)
        .block(
            Block::default()
                .title(format!("{} ({})", state.kind.plural(), state.len()))
                .borders(Borders::ALL),
        )
        .widths(&widths)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(table, chunks[0], &mut state.table_state);

    let name = state.kind.name();
    let buttons_text = if state.selected_id().is_some() {
        format!("<N> New {name} | <E> Edit {name} | <D> Delete {name} | <Esc> Back")
    } else {
        format!("<N> New {name} | <Esc> Back")
    };

    let buttons = Paragraph::new(buttons_text)
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));

    frame.render_widget(buttons, chunks[1]);

    if state.show_delete_confirmation {
        let question = format!("Are you sure you want to delete this {}?", name.to_lowercase());
        render_confirmation(frame, area, &question);
    }
}

pub fn handle_input(state: &mut RecordsState) -> Result<Option<RecordAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, key.code));
    }
    Ok(None)
}

fn handle_key(state: &mut RecordsState, code: KeyCode) -> Option<RecordAction> {
    let kind = state.kind;
    match code {
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('n')
            if state.show_delete_confirmation =>
        {
            state.toggle_delete_confirmation();
        }
        KeyCode::Char('y') if state.show_delete_confirmation => {
            state.toggle_delete_confirmation();
            if let Some(id) = state.selected_id() {
                return Some(RecordAction::Delete(kind, id.to_string()));
            }
        }
        _ if state.show_delete_confirmation => {}
        KeyCode::Char('q') | KeyCode::Esc => return Some(RecordAction::Back),
        KeyCode::Char('n') => return Some(RecordAction::New(kind)),
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(id) = state.selected_id() {
                return Some(RecordAction::Edit(kind, id.to_string()));
            }
        }
        KeyCode::Char('d') => {
            if state.selected_id().is_some() {
                state.toggle_delete_confirmation();
            }
        }
        KeyCode::Down => state.next(),
        KeyCode::Up => state.previous(),
        _ => {}
    }
    None
}
