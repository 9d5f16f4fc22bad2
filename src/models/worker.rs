use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: String,
    pub name: String,
    pub role: String,
    pub phone: String,
    pub email: String,
    pub daily_rate: f64,
    #[serde(default)]
    pub project_ids: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl Worker {
    /// A worker with no project assignments counts as available.
    pub fn is_available(&self) -> bool {
        self.project_ids.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewWorker {
    pub name: String,
    pub role: String,
    pub phone: String,
    pub email: String,
    pub daily_rate: f64,
    pub project_ids: Option<Vec<String>>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkerPatch {
    pub name: Option<String>,
    pub role: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub daily_rate: Option<f64>,
    pub project_ids: Option<Vec<String>>,
    pub skills: Option<Vec<String>>,
}
