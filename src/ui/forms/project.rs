use chrono::NaiveDate;

use crate::models::{EntityKind, NewProject, Project, ProjectPatch, ProjectPhase, ProjectStatus};
use crate::ui::form::{FormField, FormState};

use super::{amount_or_zero, choice, date, list, options, required, text, FormError};

fn fields(project: Option<&Project>, today: NaiveDate) -> Vec<FormField> {
    let status = project.map_or(ProjectStatus::Planning, |p| p.status);
    let phase = project.map_or(ProjectPhase::Planning, |p| p.phase);
    vec![
        FormField::required("Name", project.map_or("", |p| p.name.as_str())),
        FormField::required("Client ID", project.map_or("", |p| p.client_id.as_str())),
        FormField::required(
            "Start Date",
            project.map_or(today, |p| p.start_date).format("%Y-%m-%d").to_string(),
        )
        .with_hint("YYYY-MM-DD"),
        FormField::required(
            "Deadline",
            project.map(|p| p.deadline.format("%Y-%m-%d").to_string()).unwrap_or_default(),
        )
        .with_hint("YYYY-MM-DD"),
        FormField::required("Status", status.as_str())
            .with_hint(options(&ProjectStatus::ALL, ProjectStatus::as_str)),
        FormField::required("Phase", phase.as_str())
            .with_hint(options(&ProjectPhase::ALL, ProjectPhase::as_str)),
        FormField::optional("Budget", project.map(|p| p.budget.to_string()).unwrap_or_default()),
        FormField::optional(
            "Worker IDs",
            project.map(|p| p.worker_ids.join(", ")).unwrap_or_default(),
        )
            .with_hint("comma separated"),
        FormField::optional("Notes", project.map_or("", |p| p.notes.as_str())),
    ]
}

pub fn blank(today: NaiveDate) -> FormState {
    FormState::new(EntityKind::Project, None, fields(None, today))
}

pub fn filled(project: &Project) -> FormState {
    FormState::new(
        EntityKind::Project,
        Some(project.id.clone()),
        fields(Some(project), project.start_date),
    )
}

pub fn new(form: &FormState) -> Result<NewProject, FormError> {
    Ok(NewProject {
        name: required(form, "Name")?,
        client_id: required(form, "Client ID")?,
        start_date: date(form, "Start Date")?,
        deadline: date(form, "Deadline")?,
        status: choice(form, "Status")?,
        phase: choice(form, "Phase")?,
        budget: amount_or_zero(form, "Budget")?,
        worker_ids: list(form, "Worker IDs"),
        notes: text(form, "Notes"),
    })
}

/// Every form field is written back; `spent` is not on the form and is left alone.
pub fn patch(form: &FormState) -> Result<ProjectPatch, FormError> {
    let fields = new(form)?;
    Ok(ProjectPatch {
        name: Some(fields.name),
        client_id: Some(fields.client_id),
        start_date: Some(fields.start_date),
        deadline: Some(fields.deadline),
        status: Some(fields.status),
        budget: Some(fields.budget),
        spent: None,
        worker_ids: Some(fields.worker_ids),
        phase: Some(fields.phase),
        notes: Some(fields.notes),
    })
}
