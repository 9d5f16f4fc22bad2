use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::clock::Clock;
use crate::models::EntityKind;
use crate::reports::{self, DashboardKpis, Overview, Snapshot};
use crate::service::Services;

// Represents the state of the dashboard, the first screen of the app
pub struct DashboardState {
    kpis: DashboardKpis,
    overview: Overview,
    list_state: ListState,
}

impl DashboardState {
    pub fn new(snapshot: &Snapshot, today: NaiveDate) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            kpis: reports::dashboard(snapshot, today),
            overview: reports::overview(snapshot),
            list_state,
        }
    }

    pub fn kpis(&self) -> &DashboardKpis {
        &self.kpis
    }

    pub fn next(&mut self) {
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < EntityKind::ALL.len() => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let i = match self.list_state.selected() {
            Some(0) | None => EntityKind::ALL.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    pub fn selected_kind(&self) -> Option<EntityKind> {
        self.list_state.selected().and_then(|i| EntityKind::ALL.get(i).copied())
    }
}

pub enum DashboardAction {
    Exit,
    Refresh,
    Open(EntityKind),
}

pub async fn load_dashboard(services: &Services, clock: &dyn Clock) -> DashboardState {
    let snapshot = services.snapshot().await;
    DashboardState::new(&snapshot, clock.today())
}

fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}

pub fn render_dashboard<B: Backend>(frame: &mut Frame<B>, area: Rect, state: &mut DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(1)])
        .split(chunks[0]);

    let items: Vec<ListItem> = EntityKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| ListItem::new(format!("{} {}", i + 1, kind.plural())))
        .collect();

    let menu = List::new(items)
        .block(Block::default().title("Sections").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_stateful_widget(menu, columns[0], &mut state.list_state);

    let panels = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(1)])
        .split(columns[1]);

    render_kpis(frame, panels[0], state.kpis());
    render_breakdowns(frame, panels[1], &state.overview);

    let buttons = Paragraph::new("<Enter> Open | <1-5> Jump to section | <R> Refresh | <Esc> Exit")
        .block(Block::default().borders(Borders::TOP))
        .style(Style::default().fg(Color::White));
    frame.render_widget(buttons, chunks[1]);
}

fn kpi_line(label: &str, value: String) -> Spans<'static> {
    Spans::from(vec![
        Span::styled(format!("{label:<22}"), Style::default().fg(Color::Yellow)),
        Span::raw(value),
    ])
}

fn render_kpis<B: Backend>(frame: &mut Frame<B>, area: Rect, kpis: &DashboardKpis) {
    let lines = vec![
        kpi_line(
            "Active projects",
            format!("{} of {}", kpis.active_projects, kpis.total_projects),
        ),
        kpi_line(
            "Budget remaining",
            format!("{} of {}", money(kpis.budget_remaining), money(kpis.total_budget)),
        ),
        kpi_line(
            "Available workers",
            format!("{} of {}", kpis.available_workers, kpis.total_workers),
        ),
        kpi_line("Upcoming deadlines", kpis.upcoming_deadlines.to_string()),
        kpi_line("Expenses this month", money(kpis.expenses_this_month)),
    ];

    let panel =
        Paragraph::new(lines).block(Block::default().title("Dashboard").borders(Borders::ALL));
    frame.render_widget(panel, area);
}

fn render_breakdowns<B: Backend>(frame: &mut Frame<B>, area: Rect, overview: &Overview) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let by_category: Vec<ListItem> = overview
        .expenses_by_category
        .iter()
        .map(|(category, total)| {
            ListItem::new(format!("{:<16}{}", category.as_str(), money(*total)))
        })
        .collect();
    frame.render_widget(
        List::new(by_category)
            .block(Block::default().title("Expenses by Category").borders(Borders::ALL)),
        halves[0],
    );

    let by_status: Vec<ListItem> = overview
        .projects_by_status
        .iter()
        .map(|(status, count)| ListItem::new(format!("{:<16}{}", status.as_str(), count)))
        .collect();
    frame.render_widget(
        List::new(by_status)
            .block(Block::default().title("Projects by Status").borders(Borders::ALL)),
        halves[1],
    );
}

pub fn handle_input(state: &mut DashboardState) -> Result<Option<DashboardAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(handle_key(state, key.code));
    }
    Ok(None)
}

fn handle_key(state: &mut DashboardState, code: KeyCode) -> Option<DashboardAction> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(DashboardAction::Exit),
        KeyCode::Char('r') => return Some(DashboardAction::Refresh),
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            return EntityKind::ALL.get(index).copied().map(DashboardAction::Open);
        }
        KeyCode::Enter => return state.selected_kind().map(DashboardAction::Open),
        KeyCode::Down => state.next(),
        KeyCode::Up => state.previous(),
        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::{services, today};

    #[tokio::test]
    async fn loads_kpis_for_the_clock_date() {
        let (services, clock) = services();
        let state = load_dashboard(&services, &*clock).await;
        assert_eq!(state.kpis().total_projects, 4);
        assert_eq!(state.kpis().active_projects, 1);
        assert_eq!(state.kpis().available_workers, 1);
        assert_eq!(state.kpis().expenses_this_month, 6_800.0 + 3_150.0);
        assert_eq!(clock.today(), today());
    }

    #[test]
    fn keys_open_sections() {
        let mut state = DashboardState::new(&Snapshot::default(), today());
        assert!(matches!(
            handle_key(&mut state, KeyCode::Char('3')),
            Some(DashboardAction::Open(EntityKind::Expense))
        ));
        assert!(handle_key(&mut state, KeyCode::Char('9')).is_none());

        handle_key(&mut state, KeyCode::Up);
        assert_eq!(state.selected_kind(), Some(EntityKind::Document));
        handle_key(&mut state, KeyCode::Down);
        assert!(matches!(
            handle_key(&mut state, KeyCode::Enter),
            Some(DashboardAction::Open(EntityKind::Project))
        ));
        assert!(matches!(
            handle_key(&mut state, KeyCode::Char('r')),
            Some(DashboardAction::Refresh)
        ));
        assert!(matches!(handle_key(&mut state, KeyCode::Esc), Some(DashboardAction::Exit)));
    }
}
