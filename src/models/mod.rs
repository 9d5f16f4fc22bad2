mod project;
mod client;
mod expense;
mod worker;
mod document;

use std::fmt;

use thiserror::Error;

pub use project::{NewProject, Project, ProjectPatch, ProjectPhase, ProjectStatus};
pub use client::{Client, ClientPatch, NewClient};
pub use expense::{Expense, ExpenseCategory, ExpensePatch, NewExpense};
pub use worker::{NewWorker, Worker, WorkerPatch};
pub use document::{Document, DocumentCategory, DocumentPatch, NewDocument};

/// Raised when a string does not name a member of one of the enumerated sets.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// The five record types the application manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Project,
    Client,
    Expense,
    Worker,
    Document,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Project,
        EntityKind::Client,
        EntityKind::Expense,
        EntityKind::Worker,
        EntityKind::Document,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Project => "Project",
            EntityKind::Client => "Client",
            EntityKind::Expense => "Expense",
            EntityKind::Worker => "Worker",
            EntityKind::Document => "Document",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Project => "Projects",
            EntityKind::Client => "Clients",
            EntityKind::Expense => "Expenses",
            EntityKind::Worker => "Workers",
            EntityKind::Document => "Documents",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Shared by the enumerated fields: look a display string up in a fixed table.
pub(crate) fn parse_variant<T: Copy>(
    kind: &'static str,
    all: &[T],
    label: impl Fn(T) -> &'static str,
    value: &str,
) -> Result<T, ParseEnumError> {
    let wanted = value.trim();
    all.iter()
        .copied()
        .find(|v| label(*v).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| ParseEnumError {
            kind,
            value: value.to_string(),
        })
}
