use crate::models::{EntityKind, NewWorker, Worker, WorkerPatch};
use crate::ui::form::{FormField, FormState};

use super::{amount_or_zero, list, required, FormError};

const COMMON_ROLES: &str = "Site Manager, Foreman, Carpenter, Electrician, Plumber, Laborer";
const COMMON_SKILLS: &str = "Framing, Concrete, Welding, Drywall, Roofing, Equipment Operation";

fn fields(worker: Option<&Worker>) -> Vec<FormField> {
    let value = |get: fn(&Worker) -> &str| worker.map_or("", get).to_string();
    vec![
        FormField::required("Name", value(|w| w.name.as_str())),
        FormField::required("Role", value(|w| w.role.as_str())).with_hint(COMMON_ROLES),
        FormField::required("Phone", value(|w| w.phone.as_str())),
        FormField::required("Email", value(|w| w.email.as_str())),
        FormField::optional(
            "Daily Rate",
            worker.map(|w| w.daily_rate.to_string()).unwrap_or_default(),
        ),
        FormField::optional(
            "Project IDs",
            worker.map(|w| w.project_ids.join(", ")).unwrap_or_default(),
        )
            .with_hint("comma separated, blank for available"),
        FormField::optional("Skills", worker.map(|w| w.skills.join(", ")).unwrap_or_default())
            .with_hint(COMMON_SKILLS),
    ]
}

pub fn blank() -> FormState {
    FormState::new(EntityKind::Worker, None, fields(None))
}

pub fn filled(worker: &Worker) -> FormState {
    FormState::new(EntityKind::Worker, Some(worker.id.clone()), fields(Some(worker)))
}

pub fn new(form: &FormState) -> Result<NewWorker, FormError> {
    Ok(NewWorker {
        name: required(form, "Name")?,
        role: required(form, "Role")?,
        phone: required(form, "Phone")?,
        email: required(form, "Email")?,
        daily_rate: amount_or_zero(form, "Daily Rate")?,
        project_ids: Some(list(form, "Project IDs")),
        skills: list(form, "Skills"),
    })
}

pub fn patch(form: &FormState) -> Result<WorkerPatch, FormError> {
    let fields = new(form)?;
    Ok(WorkerPatch {
        name: Some(fields.name),
        role: Some(fields.role),
        phone: Some(fields.phone),
        email: Some(fields.email),
        daily_rate: Some(fields.daily_rate),
        project_ids: fields.project_ids,
        skills: Some(fields.skills),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;

    #[test]
    fn blank_rate_reads_as_zero() {
        let seed = SeedData::bundled().unwrap();
        let mut worker = seed.workers[4].clone();
        worker.daily_rate = 0.0;
        let mut form = filled(&worker);
        assert_eq!(form.value("Project IDs"), "");

        form.toggle_editing();
        for _ in 0..4 {
            form.next_field();
        }
        form.edit_current_field(crossterm::event::KeyCode::Backspace);
        assert_eq!(form.value("Daily Rate"), "");

        let parsed = new(&form).unwrap();
        assert_eq!(parsed.daily_rate, 0.0);
        assert_eq!(parsed.project_ids, Some(Vec::new()));
    }
}
