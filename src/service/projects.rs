use crate::clock::Clock;
use crate::models::{EntityKind, NewProject, Project, ProjectPatch};
use crate::store::Keyed;

use super::{EntityService, Record};

pub type ProjectService = EntityService<Project>;

impl Keyed for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Project {
    const KIND: EntityKind = EntityKind::Project;

    type New = NewProject;
    type Patch = ProjectPatch;

    fn create(id: String, fields: NewProject, _clock: &dyn Clock) -> Self {
        Project {
            id,
            name: fields.name,
            client_id: fields.client_id,
            start_date: fields.start_date,
            deadline: fields.deadline,
            status: fields.status,
            budget: fields.budget,
            spent: 0.0,
            worker_ids: fields.worker_ids,
            phase: fields.phase,
            notes: fields.notes,
        }
    }

    fn apply(&mut self, patch: ProjectPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(client_id) = patch.client_id {
            self.client_id = client_id;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(deadline) = patch.deadline {
            self.deadline = deadline;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(budget) = patch.budget {
            self.budget = budget;
        }
        if let Some(spent) = patch.spent {
            self.spent = spent;
        }
        if let Some(worker_ids) = patch.worker_ids {
            self.worker_ids = worker_ids;
        }
        if let Some(phase) = patch.phase {
            self.phase = phase;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
    }
}
