use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{parse_variant, ParseEnumError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    Planning,
    Active,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Planning,
        ProjectStatus::Active,
        ProjectStatus::Completed,
        ProjectStatus::OnHold,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Planning => "Planning",
            ProjectStatus::Active => "Active",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::OnHold => "On Hold",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("project status", &Self::ALL, Self::as_str, s)
    }
}

/// Construction phase a project is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProjectPhase {
    Planning,
    Foundation,
    Framing,
    Finishing,
    Completed,
}

impl ProjectPhase {
    pub const ALL: [ProjectPhase; 5] = [
        ProjectPhase::Planning,
        ProjectPhase::Foundation,
        ProjectPhase::Framing,
        ProjectPhase::Finishing,
        ProjectPhase::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectPhase::Planning => "Planning",
            ProjectPhase::Foundation => "Foundation",
            ProjectPhase::Framing => "Framing",
            ProjectPhase::Finishing => "Finishing",
            ProjectPhase::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProjectPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectPhase {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("project phase", &Self::ALL, Self::as_str, s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub client_id: String,
    pub start_date: NaiveDate,
    pub deadline: NaiveDate,
    pub status: ProjectStatus,
    pub budget: f64,
    pub spent: f64,
    #[serde(default)]
    pub worker_ids: Vec<String>,
    pub phase: ProjectPhase,
    #[serde(default)]
    pub notes: String,
}

/// Caller-supplied fields for a new project. `spent` always starts at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub client_id: String,
    pub start_date: NaiveDate,
    pub deadline: NaiveDate,
    pub status: ProjectStatus,
    pub budget: f64,
    pub worker_ids: Vec<String>,
    pub phase: ProjectPhase,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub client_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    pub status: Option<ProjectStatus>,
    pub budget: Option<f64>,
    pub spent: Option<f64>,
    pub worker_ids: Option<Vec<String>>,
    pub phase: Option<ProjectPhase>,
    pub notes: Option<String>,
}
