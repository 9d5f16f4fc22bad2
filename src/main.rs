mod cli;
mod clock;
mod config;
mod logging;
mod models;
mod reports;
mod seed;
mod service;
mod store;
mod ui;

use std::io;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::cli::{Cli, Command};
use crate::clock::{Clock, SystemClock};
use crate::models::EntityKind;
use crate::seed::SeedData;
use crate::service::Services;
use crate::ui::{
    components::{render_notice, Notice},
    dashboard::{
        handle_input as handle_dashboard_input, load_dashboard, render_dashboard, DashboardAction,
        DashboardState,
    },
    form::{handle_input as handle_form_input, render_form, FormAction, FormState},
    forms::{self, SubmitError},
    records::{
        handle_input as handle_records_input, load_records, render_records, RecordAction,
        RecordsState,
    },
};

// Represents the current screen in the app
enum AppScreen {
    Dashboard,
    Records(EntityKind),
    Form(EntityKind),
}

// Main application state
struct AppState {
    services: Services,
    clock: Arc<dyn Clock>,
    screen: AppScreen,
    dashboard_state: Option<DashboardState>,
    records_state: Option<RecordsState>,
    form_state: Option<FormState>,
    notice: Option<Notice>,
}

impl AppState {
    fn new(services: Services, clock: Arc<dyn Clock>) -> Self {
        Self {
            services,
            clock,
            screen: AppScreen::Dashboard,
            dashboard_state: None,
            records_state: None,
            form_state: None,
            notice: None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::init(cli.overrides())?;
    let command = cli.command.unwrap_or(Command::Dashboard);

    match &command {
        Command::Dashboard => {
            if let Some(path) = &config.log_file {
                logging::init_file(path)?;
            }
        }
        _ => logging::init_stderr(),
    }

    let seed = SeedData::load(config.seed_dir()).await?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(config.latency_scale));
    let services = Services::new(seed, clock.clone());

    match command {
        Command::Dashboard => run_dashboard(services, clock).await,
        Command::Report { kind, json } => {
            let snapshot = services.snapshot().await;
            print!("{}", cli::report(kind, json, &snapshot, clock.today())?);
            Ok(())
        }
        Command::List {
            entity,
            search,
            category,
            json,
        } => {
            let snapshot = services.snapshot().await;
            let out = cli::list(
                entity.into(),
                search.as_deref(),
                category.as_deref(),
                json,
                &snapshot,
            )?;
            print!("{}", out);
            Ok(())
        }
    }
}

async fn run_dashboard(services: Services, clock: Arc<dyn Clock>) -> Result<()> {
    println!("Loading construction manager...");

    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::new(services, clock);
    load_dashboard_screen(&mut app_state).await;

    let result = run_app(&mut terminal, &mut app_state).await;

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "terminal UI stopped");
        println!("Error: {}", err);
    }

    println!("Thanks for using Construction Manager!");

    result
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app_state: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(f.size());

            match app_state.screen {
                AppScreen::Dashboard => {
                    if let Some(state) = &mut app_state.dashboard_state {
                        render_dashboard(f, chunks[0], state);
                    }
                }
                AppScreen::Records(_) => {
                    if let Some(state) = &mut app_state.records_state {
                        render_records(f, chunks[0], state);
                    }
                }
                AppScreen::Form(_) => {
                    if let Some(state) = &app_state.form_state {
                        render_form(f, chunks[0], state);
                    }
                }
            }

            render_notice(f, chunks[1], app_state.notice.as_ref());
        })?;

        let should_quit = match app_state.screen {
            AppScreen::Dashboard => handle_dashboard_screen(app_state).await?,
            AppScreen::Records(_) => handle_records_screen(app_state).await?,
            AppScreen::Form(_) => handle_form_screen(app_state).await?,
        };

        if should_quit {
            break;
        }
    }

    Ok(())
}

async fn load_dashboard_screen(app_state: &mut AppState) {
    let state = load_dashboard(&app_state.services, &*app_state.clock).await;
    app_state.dashboard_state = Some(state);
    app_state.screen = AppScreen::Dashboard;
}

async fn load_records_screen(app_state: &mut AppState, kind: EntityKind) {
    let state = load_records(&app_state.services, kind).await;
    app_state.records_state = Some(state);
    app_state.form_state = None;
    app_state.screen = AppScreen::Records(kind);
}

async fn handle_dashboard_screen(app_state: &mut AppState) -> Result<bool> {
    let action = match &mut app_state.dashboard_state {
        Some(state) => handle_dashboard_input(state)?,
        None => None,
    };

    match action {
        Some(DashboardAction::Exit) => return Ok(true),
        Some(DashboardAction::Refresh) => {
            app_state.notice = None;
            load_dashboard_screen(app_state).await;
        }
        Some(DashboardAction::Open(kind)) => {
            app_state.notice = None;
            load_records_screen(app_state, kind).await;
        }
        None => {}
    }

    Ok(false)
}

async fn handle_records_screen(app_state: &mut AppState) -> Result<bool> {
    let action = match &mut app_state.records_state {
        Some(state) => handle_records_input(state)?,
        None => None,
    };

    match action {
        Some(RecordAction::Back) => {
            app_state.notice = None;
            load_dashboard_screen(app_state).await;
        }
        Some(RecordAction::New(kind)) => {
            app_state.notice = None;
            app_state.form_state = Some(forms::blank(kind, &*app_state.clock));
            app_state.screen = AppScreen::Form(kind);
        }
        Some(RecordAction::Edit(kind, id)) => {
            match forms::open(&app_state.services, kind, &id).await {
                Ok(form) => {
                    app_state.notice = None;
                    app_state.form_state = Some(form);
                    app_state.screen = AppScreen::Form(kind);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "could not open record for editing");
                    let text = format!("Failed to load {}: {}", kind.name().to_lowercase(), err);
                    app_state.notice = Some(Notice::failure(text));
                    load_records_screen(app_state, kind).await;
                }
            }
        }
        Some(RecordAction::Delete(kind, id)) => {
            app_state.notice = Some(match app_state.services.delete(kind, &id).await {
                Ok(()) => Notice::success(format!("{} deleted successfully", kind.name())),
                Err(err) => {
                    tracing::warn!(error = %err, "delete failed");
                    let entity = kind.name().to_lowercase();
                    Notice::failure(format!("Failed to delete {}: {}", entity, err))
                }
            });
            load_records_screen(app_state, kind).await;
        }
        None => {}
    }

    Ok(false)
}

async fn handle_form_screen(app_state: &mut AppState) -> Result<bool> {
    let AppScreen::Form(kind) = app_state.screen else {
        return Ok(false);
    };

    let action = match &mut app_state.form_state {
        Some(state) => handle_form_input(state)?,
        None => None,
    };

    match action {
        Some(FormAction::Cancel) => {
            app_state.notice = None;
            load_records_screen(app_state, kind).await;
        }
        Some(FormAction::Save) => {
            let Some(form) = &app_state.form_state else {
                return Ok(false);
            };
            let verb = if form.record_id().is_some() { "update" } else { "create" };

            match forms::submit(&app_state.services, form).await {
                Ok(message) => {
                    app_state.notice = Some(Notice::success(message));
                    load_records_screen(app_state, kind).await;
                }
                Err(SubmitError::Form(err)) => {
                    if let Some(form) = &mut app_state.form_state {
                        form.set_error(err.to_string());
                    }
                }
                Err(SubmitError::Service(err)) => {
                    tracing::warn!(error = %err, "save failed");
                    let entity = kind.name().to_lowercase();
                    let text = format!("Failed to {} {}: {}", verb, entity, err);
                    app_state.notice = Some(Notice::failure(text));
                    load_records_screen(app_state, kind).await;
                }
            }
        }
        None => {}
    }

    Ok(false)
}
