mod filters;

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{Client, Document, Expense, ExpenseCategory, Project, ProjectStatus, Worker};

pub use filters::{filter_expenses, search_documents};

/// Label used wherever a reference points at a project that no longer exists.
pub const UNKNOWN_PROJECT: &str = "Unknown Project";

/// Deadlines this many days out, or fewer, count as upcoming.
const UPCOMING_DEADLINE_DAYS: i64 = 7;

/// Every collection, loaded at one point in time.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub projects: Vec<Project>,
    pub clients: Vec<Client>,
    pub expenses: Vec<Expense>,
    pub workers: Vec<Worker>,
    pub documents: Vec<Document>,
}

impl Snapshot {
    fn project_name(&self, id: &str) -> &str {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
            .unwrap_or(UNKNOWN_PROJECT)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_projects: usize,
    pub active_projects: usize,
    pub completed_projects: usize,
    pub total_budget: f64,
    pub total_expenses: f64,
    pub total_workers: usize,
    pub available_workers: usize,
    pub total_clients: usize,
    /// Expenses as a percentage of total budget, 0 when there is no budget.
    pub budget_utilization: f64,
    pub expenses_by_category: BTreeMap<ExpenseCategory, f64>,
    pub projects_by_status: BTreeMap<ProjectStatus, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub status: ProjectStatus,
    pub budget: f64,
    pub total_spent: f64,
    pub budget_utilization: f64,
    pub expense_count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Tally {
    pub total: f64,
    pub count: usize,
}

impl Tally {
    fn add(&mut self, amount: f64) {
        self.total += amount;
        self.count += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseBreakdown {
    pub by_category: BTreeMap<ExpenseCategory, Tally>,
    /// Keyed by project name.
    pub by_project: BTreeMap<String, Tally>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Utilization {
    Assigned,
    Available,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerAssignment {
    pub id: String,
    pub name: String,
    pub role: String,
    pub assigned_projects: Vec<String>,
    pub project_count: usize,
    pub utilization: Utilization,
}

/// The headline numbers on the dashboard screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardKpis {
    pub active_projects: usize,
    pub total_projects: usize,
    pub total_budget: f64,
    pub budget_remaining: f64,
    pub available_workers: usize,
    pub total_workers: usize,
    pub upcoming_deadlines: usize,
    pub expenses_this_month: f64,
}

fn percentage(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole * 100.0 } else { 0.0 }
}

fn count_status(projects: &[Project], status: ProjectStatus) -> usize {
    projects.iter().filter(|p| p.status == status).count()
}

fn total_expenses(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

fn total_budget(projects: &[Project]) -> f64 {
    projects.iter().map(|p| p.budget).sum()
}

pub fn overview(snapshot: &Snapshot) -> Overview {
    let total_budget = total_budget(&snapshot.projects);
    let total_expenses = total_expenses(&snapshot.expenses);

    let mut expenses_by_category = BTreeMap::new();
    for expense in &snapshot.expenses {
        *expenses_by_category.entry(expense.category).or_insert(0.0) += expense.amount;
    }

    let mut projects_by_status = BTreeMap::new();
    for project in &snapshot.projects {
        *projects_by_status.entry(project.status).or_insert(0) += 1;
    }

    Overview {
        total_projects: snapshot.projects.len(),
        active_projects: count_status(&snapshot.projects, ProjectStatus::Active),
        completed_projects: count_status(&snapshot.projects, ProjectStatus::Completed),
        total_budget,
        total_expenses,
        total_workers: snapshot.workers.len(),
        available_workers: snapshot.workers.iter().filter(|w| w.is_available()).count(),
        total_clients: snapshot.clients.len(),
        budget_utilization: percentage(total_expenses, total_budget),
        expenses_by_category,
        projects_by_status,
    }
}

/// Spending per project, computed from its expense records rather than the stored `spent` field.
pub fn project_summaries(snapshot: &Snapshot) -> Vec<ProjectSummary> {
    snapshot
        .projects
        .iter()
        .map(|project| {
            let mut tally = Tally::default();
            for expense in snapshot.expenses.iter().filter(|e| e.project_id == project.id) {
                tally.add(expense.amount);
            }
            ProjectSummary {
                id: project.id.clone(),
                name: project.name.clone(),
                status: project.status,
                budget: project.budget,
                total_spent: tally.total,
                budget_utilization: percentage(tally.total, project.budget),
                expense_count: tally.count,
            }
        })
        .collect()
}

pub fn expense_breakdown(snapshot: &Snapshot) -> ExpenseBreakdown {
    let mut by_category: BTreeMap<ExpenseCategory, Tally> = BTreeMap::new();
    let mut by_project: BTreeMap<String, Tally> = BTreeMap::new();

    for expense in &snapshot.expenses {
        by_category.entry(expense.category).or_default().add(expense.amount);
        by_project
            .entry(snapshot.project_name(&expense.project_id).to_string())
            .or_default()
            .add(expense.amount);
    }

    ExpenseBreakdown {
        by_category,
        by_project,
    }
}

pub fn worker_assignments(snapshot: &Snapshot) -> Vec<WorkerAssignment> {
    snapshot
        .workers
        .iter()
        .map(|worker| WorkerAssignment {
            id: worker.id.clone(),
            name: worker.name.clone(),
            role: worker.role.clone(),
            assigned_projects: worker
                .project_ids
                .iter()
                .map(|id| snapshot.project_name(id).to_string())
                .collect(),
            project_count: worker.project_ids.len(),
            utilization: if worker.is_available() {
                Utilization::Available
            } else {
                Utilization::Assigned
            },
        })
        .collect()
}

pub fn dashboard(snapshot: &Snapshot, today: NaiveDate) -> DashboardKpis {
    let total_budget = total_budget(&snapshot.projects);

    let upcoming_deadlines = snapshot
        .projects
        .iter()
        .filter(|p| (0..=UPCOMING_DEADLINE_DAYS).contains(&(p.deadline - today).num_days()))
        .count();

    let expenses_this_month = snapshot
        .expenses
        .iter()
        .filter(|e| e.date.year() == today.year() && e.date.month() == today.month())
        .map(|e| e.amount)
        .sum();

    DashboardKpis {
        active_projects: count_status(&snapshot.projects, ProjectStatus::Active),
        total_projects: snapshot.projects.len(),
        total_budget,
        budget_remaining: total_budget - total_expenses(&snapshot.expenses),
        available_workers: snapshot.workers.iter().filter(|w| w.is_available()).count(),
        total_workers: snapshot.workers.len(),
        upcoming_deadlines,
        expenses_this_month,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;

    fn snapshot() -> Snapshot {
        let seed = SeedData::bundled().unwrap();
        Snapshot {
            projects: seed.projects,
            clients: seed.clients,
            expenses: seed.expenses,
            workers: seed.workers,
            documents: seed.documents,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn overview_counts_and_totals() {
        let overview = overview(&snapshot());
        assert_eq!(overview.total_projects, 4);
        assert_eq!(overview.active_projects, 1);
        assert_eq!(overview.completed_projects, 1);
        assert_eq!(overview.total_budget, 4_670_000.0);
        assert_eq!(overview.total_expenses, 91_676.25);
        assert_eq!(overview.available_workers, 1);
        assert_eq!(overview.total_clients, 3);
        assert!((overview.budget_utilization - 1.963_089).abs() < 1e-3);
        assert_eq!(overview.expenses_by_category[&ExpenseCategory::Labor], 22_400.0);
        assert_eq!(overview.projects_by_status[&ProjectStatus::OnHold], 1);
        assert_eq!(overview.expenses_by_category.len(), 6);
    }

    #[test]
    fn empty_snapshot_has_zero_utilization() {
        let overview = overview(&Snapshot::default());
        assert_eq!(overview.budget_utilization, 0.0);
        assert!(overview.projects_by_status.is_empty());
    }

    #[test]
    fn project_summaries_sum_their_expenses() {
        let summaries = project_summaries(&snapshot());
        let harbor = summaries.iter().find(|s| s.id == "1").unwrap();
        assert_eq!(harbor.expense_count, 3);
        assert_eq!(harbor.total_spent, 77_450.75);
        assert!((harbor.budget_utilization - 3.161_255).abs() < 1e-3);
    }

    #[test]
    fn dangling_project_references_are_labelled_unknown() {
        let mut snapshot = snapshot();
        snapshot.projects.retain(|p| p.id != "4");

        let breakdown = expense_breakdown(&snapshot);
        assert_eq!(breakdown.by_project[UNKNOWN_PROJECT], Tally { total: 9_800.0, count: 1 });
        assert_eq!(breakdown.by_category[&ExpenseCategory::Materials].count, 1);

        snapshot.workers[4].project_ids.push("4".to_string());
        let operator = &worker_assignments(&snapshot)[4];
        assert_eq!(operator.assigned_projects, [UNKNOWN_PROJECT]);
        assert_eq!(operator.utilization, Utilization::Assigned);
    }

    #[test]
    fn worker_assignments_resolve_project_names() {
        let assignments = worker_assignments(&snapshot());
        assert_eq!(assignments[0].assigned_projects, ["Harbor View Condominiums"]);
        assert_eq!(assignments[4].utilization, Utilization::Available);
        assert_eq!(assignments[4].project_count, 0);
    }

    #[test]
    fn dashboard_kpis_depend_on_today() {
        let snapshot = snapshot();

        let kpis = dashboard(&snapshot, date(2024, 12, 15));
        assert_eq!(kpis.upcoming_deadlines, 1);
        assert_eq!(kpis.expenses_this_month, 0.0);
        assert_eq!(kpis.budget_remaining, 4_670_000.0 - 91_676.25);

        let june = dashboard(&snapshot, date(2024, 6, 25));
        assert_eq!(june.upcoming_deadlines, 0);
        assert_eq!(june.expenses_this_month, 6_800.0 + 3_150.0);

        // deadline 2024-12-20: exactly seven days out counts, past deadlines do not
        assert_eq!(dashboard(&snapshot, date(2024, 12, 13)).upcoming_deadlines, 1);
        assert_eq!(dashboard(&snapshot, date(2024, 12, 12)).upcoming_deadlines, 0);
        assert_eq!(dashboard(&snapshot, date(2024, 12, 21)).upcoming_deadlines, 0);
    }
}
