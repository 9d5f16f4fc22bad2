use std::fmt::Write;
use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::config::Overrides;
use crate::models::{DocumentCategory, EntityKind, ExpenseCategory};
use crate::reports::{self, Snapshot};
use crate::ui::records::Tabular;

#[derive(Debug, Parser)]
#[command(
    name = "construction-manager",
    version,
    about = "Construction project management in the terminal"
)]
pub struct Cli {
    /// Directory with projects.json, clients.json, expenses.json, workers.json and documents.json
    #[arg(long, global = true)]
    pub seed_dir: Option<PathBuf>,
    /// Skip the simulated service latency
    #[arg(long, global = true)]
    pub no_latency: bool,
    /// Append log output to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            seed_dir: self.seed_dir.clone(),
            no_latency: self.no_latency,
            log_file: self.log_file.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the terminal dashboard (default)
    Dashboard,
    /// Print a report
    Report {
        #[arg(long, value_enum, default_value = "overview")]
        kind: ReportKind,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the records of one type
    List {
        #[arg(value_enum)]
        entity: EntityArg,
        /// Name or tag search, documents only
        #[arg(long)]
        search: Option<String>,
        /// Category filter, expenses and documents only
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    Overview,
    Projects,
    Expenses,
    Workers,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityArg {
    Projects,
    Clients,
    Expenses,
    Workers,
    Documents,
}

impl From<EntityArg> for EntityKind {
    fn from(arg: EntityArg) -> Self {
        match arg {
            EntityArg::Projects => EntityKind::Project,
            EntityArg::Clients => EntityKind::Client,
            EntityArg::Expenses => EntityKind::Expense,
            EntityArg::Workers => EntityKind::Worker,
            EntityArg::Documents => EntityKind::Document,
        }
    }
}

fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}

fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn report(
    kind: ReportKind,
    as_json: bool,
    snapshot: &Snapshot,
    today: NaiveDate,
) -> Result<String> {
    let mut out = String::new();
    match kind {
        ReportKind::Overview => {
            let overview = reports::overview(snapshot);
            if as_json {
                return json(&overview);
            }
            writeln!(
                out,
                "Projects:     {} ({} active, {} completed)",
                overview.total_projects, overview.active_projects, overview.completed_projects
            )?;
            writeln!(out, "Clients:      {}", overview.total_clients)?;
            writeln!(
                out,
                "Workers:      {} ({} available)",
                overview.total_workers, overview.available_workers
            )?;
            writeln!(out, "Budget:       {}", money(overview.total_budget))?;
            writeln!(
                out,
                "Expenses:     {} ({:.1}% of budget)",
                money(overview.total_expenses),
                overview.budget_utilization
            )?;
            writeln!(out, "\nExpenses by category")?;
            for (category, total) in &overview.expenses_by_category {
                writeln!(out, "  {:<16}{}", category.as_str(), money(*total))?;
            }
            writeln!(out, "\nProjects by status")?;
            for (status, count) in &overview.projects_by_status {
                writeln!(out, "  {:<16}{}", status.as_str(), count)?;
            }
        }
        ReportKind::Projects => {
            let summaries = reports::project_summaries(snapshot);
            if as_json {
                return json(&summaries);
            }
            for summary in &summaries {
                writeln!(
                    out,
                    "{:<36}{:<12}{:>16} of {:<16}{:>6.1}%  {} expenses",
                    summary.name,
                    summary.status.as_str(),
                    money(summary.total_spent),
                    money(summary.budget),
                    summary.budget_utilization,
                    summary.expense_count
                )?;
            }
        }
        ReportKind::Expenses => {
            let breakdown = reports::expense_breakdown(snapshot);
            if as_json {
                return json(&breakdown);
            }
            writeln!(out, "By category")?;
            for (category, tally) in &breakdown.by_category {
                let total = money(tally.total);
                writeln!(out, "  {:<16}{:>16}  ({})", category.as_str(), total, tally.count)?;
            }
            writeln!(out, "\nBy project")?;
            for (project, tally) in &breakdown.by_project {
                writeln!(out, "  {:<36}{:>16}  ({})", project, money(tally.total), tally.count)?;
            }
        }
        ReportKind::Workers => {
            let assignments = reports::worker_assignments(snapshot);
            if as_json {
                return json(&assignments);
            }
            for worker in &assignments {
                let projects = if worker.assigned_projects.is_empty() {
                    "available".to_string()
                } else {
                    worker.assigned_projects.join(", ")
                };
                writeln!(out, "{:<20}{:<24}{}", worker.name, worker.role, projects)?;
            }
        }
        ReportKind::Dashboard => {
            let kpis = reports::dashboard(snapshot, today);
            if as_json {
                return json(&kpis);
            }
            let (active, total) = (kpis.active_projects, kpis.total_projects);
            writeln!(out, "Active projects:     {} of {}", active, total)?;
            let (remaining, budget) = (money(kpis.budget_remaining), money(kpis.total_budget));
            writeln!(out, "Budget remaining:    {} of {}", remaining, budget)?;
            let (available, workers) = (kpis.available_workers, kpis.total_workers);
            writeln!(out, "Available workers:   {} of {}", available, workers)?;
            writeln!(out, "Upcoming deadlines:  {}", kpis.upcoming_deadlines)?;
            writeln!(out, "Expenses this month: {}", money(kpis.expenses_this_month))?;
        }
    }
    Ok(out)
}

fn table<T: Tabular + Serialize>(records: &[T], as_json: bool) -> Result<String> {
    if as_json {
        return json(records);
    }
    let mut out = String::new();
    writeln!(out, "{:<6}{}", "ID", T::HEADERS.join(" | "))?;
    for record in records {
        writeln!(out, "{:<6}{}", record.id(), record.cells().join(" | "))?;
    }
    Ok(out)
}

/// Records of one type, with the documents search and the category filters applied.
pub fn list(
    kind: EntityKind,
    search: Option<&str>,
    category: Option<&str>,
    as_json: bool,
    snapshot: &Snapshot,
) -> Result<String> {
    if search.is_some() && kind != EntityKind::Document {
        bail!("--search only applies to documents");
    }
    if category.is_some() && !matches!(kind, EntityKind::Expense | EntityKind::Document) {
        bail!("--category only applies to expenses and documents");
    }

    match kind {
        EntityKind::Project => table(&snapshot.projects, as_json),
        EntityKind::Client => table(&snapshot.clients, as_json),
        EntityKind::Worker => table(&snapshot.workers, as_json),
        EntityKind::Expense => {
            let category = category.map(str::parse::<ExpenseCategory>).transpose()?;
            table(&reports::filter_expenses(&snapshot.expenses, category), as_json)
        }
        EntityKind::Document => {
            let category = category.map(str::parse::<DocumentCategory>).transpose()?;
            let term = search.unwrap_or("");
            let documents = reports::search_documents(&snapshot.documents, term, category);
            table(&documents, as_json)
        }
    }
}
