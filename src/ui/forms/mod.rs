mod project;
mod client;
mod expense;
mod worker;
mod document;

use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;

use crate::clock::Clock;
use crate::models::{EntityKind, ParseEnumError};
use crate::service::{ServiceError, Services};
use crate::ui::form::FormState;

/// A form value that cannot be turned into a record field.
#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("{field} is required")]
    Missing { field: &'static str },
    #[error("{field}: '{value}' is not a valid amount")]
    Number { field: &'static str, value: String },
    #[error("{field}: '{value}' is not a date (expected YYYY-MM-DD)")]
    Date { field: &'static str, value: String },
    #[error("{field}: {source}")]
    Choice {
        field: &'static str,
        #[source]
        source: ParseEnumError,
    },
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

fn text(form: &FormState, field: &'static str) -> String {
    form.value(field).to_string()
}

fn required(form: &FormState, field: &'static str) -> Result<String, FormError> {
    match form.value(field) {
        "" => Err(FormError::Missing { field }),
        value => Ok(value.to_string()),
    }
}

/// Non-negative amount. A leading `$` and thousands separators are accepted.
fn amount(form: &FormState, field: &'static str) -> Result<f64, FormError> {
    let raw = required(form, field)?;
    let cleaned: String = raw.trim_start_matches('$').chars().filter(|c| *c != ',').collect();
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(FormError::Number { field, value: raw }),
    }
}

/// Like [`amount`], but a blank field reads as zero.
fn amount_or_zero(form: &FormState, field: &'static str) -> Result<f64, FormError> {
    if form.value(field).is_empty() {
        return Ok(0.0);
    }
    amount(form, field)
}

fn date(form: &FormState, field: &'static str) -> Result<NaiveDate, FormError> {
    let raw = required(form, field)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| FormError::Date { field, value: raw })
}

fn choice<T>(form: &FormState, field: &'static str) -> Result<T, FormError>
where
    T: FromStr<Err = ParseEnumError>,
{
    required(form, field)?
        .parse()
        .map_err(|source| FormError::Choice { field, source })
}

/// Comma-separated list with blank entries dropped.
fn list(form: &FormState, field: &'static str) -> Vec<String> {
    form.value(field)
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn optional(form: &FormState, field: &'static str) -> Option<String> {
    match form.value(field) {
        "" => None,
        value => Some(value.to_string()),
    }
}

fn options<T: Copy>(all: &[T], label: fn(T) -> &'static str) -> String {
    all.iter().map(|v| label(*v)).collect::<Vec<_>>().join(" / ")
}

/// An empty form for a new record of `kind`.
pub fn blank(kind: EntityKind, clock: &dyn Clock) -> FormState {
    match kind {
        EntityKind::Project => project::blank(clock.today()),
        EntityKind::Client => client::blank(),
        EntityKind::Expense => expense::blank(clock.today()),
        EntityKind::Worker => worker::blank(),
        EntityKind::Document => document::blank(),
    }
}

/// A form pre-filled from the stored record, or `NotFound` when it is gone.
pub async fn open(
    services: &Services,
    kind: EntityKind,
    id: &str,
) -> Result<FormState, ServiceError> {
    let missing = || ServiceError::not_found(kind, id);
    let form = match kind {
        EntityKind::Project => {
            project::filled(&services.projects.get_by_id(id).await.ok_or_else(missing)?)
        }
        EntityKind::Client => {
            client::filled(&services.clients.get_by_id(id).await.ok_or_else(missing)?)
        }
        EntityKind::Expense => {
            expense::filled(&services.expenses.get_by_id(id).await.ok_or_else(missing)?)
        }
        EntityKind::Worker => {
            worker::filled(&services.workers.get_by_id(id).await.ok_or_else(missing)?)
        }
        EntityKind::Document => {
            document::filled(&services.documents.get_by_id(id).await.ok_or_else(missing)?)
        }
    };
    Ok(form)
}

/// Parses the form and creates or updates the record. Returns the success message.
pub async fn submit(services: &Services, form: &FormState) -> Result<String, SubmitError> {
    let kind = form.kind();
    let verb = match form.record_id() {
        Some(id) => {
            match kind {
                EntityKind::Project => {
                    services.projects.update(id, project::patch(form)?).await?;
                }
                EntityKind::Client => {
                    services.clients.update(id, client::patch(form)?).await?;
                }
                EntityKind::Expense => {
                    services.expenses.update(id, expense::patch(form)?).await?;
                }
                EntityKind::Worker => {
                    services.workers.update(id, worker::patch(form)?).await?;
                }
                EntityKind::Document => {
                    services.documents.update(id, document::patch(form)?).await?;
                }
            }
            "updated"
        }
        None => {
            match kind {
                EntityKind::Project => {
                    services.projects.create(project::new(form)?).await;
                }
                EntityKind::Client => {
                    services.clients.create(client::new(form)?).await;
                }
                EntityKind::Expense => {
                    services.expenses.create(expense::new(form)?).await;
                }
                EntityKind::Worker => {
                    services.workers.create(worker::new(form)?).await;
                }
                EntityKind::Document => {
                    services.documents.create(document::new(form)?).await;
                }
            }
            "created"
        }
    };
    Ok(format!("{} {} successfully", kind.name(), verb))
}
