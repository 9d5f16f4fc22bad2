use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{Client, Document, Expense, Project, Worker};

const PROJECTS: &str = include_str!("../../fixtures/projects.json");
const CLIENTS: &str = include_str!("../../fixtures/clients.json");
const EXPENSES: &str = include_str!("../../fixtures/expenses.json");
const WORKERS: &str = include_str!("../../fixtures/workers.json");
const DOCUMENTS: &str = include_str!("../../fixtures/documents.json");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed seed data in {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Initial contents of the five collections.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub projects: Vec<Project>,
    pub clients: Vec<Client>,
    pub expenses: Vec<Expense>,
    pub workers: Vec<Worker>,
    pub documents: Vec<Document>,
}

impl SeedData {
    /// The fixtures compiled into the binary.
    pub fn bundled() -> Result<Self, SeedError> {
        Ok(Self {
            projects: parse("projects.json", PROJECTS)?,
            clients: parse("clients.json", CLIENTS)?,
            expenses: parse("expenses.json", EXPENSES)?,
            workers: parse("workers.json", WORKERS)?,
            documents: parse("documents.json", DOCUMENTS)?,
        })
    }

    /// Reads `projects.json`, `clients.json`, `expenses.json`, `workers.json`
    /// and `documents.json` from `dir`. All five must be present.
    pub async fn from_dir(dir: &Path) -> Result<Self, SeedError> {
        Ok(Self {
            projects: read(dir, "projects.json").await?,
            clients: read(dir, "clients.json").await?,
            expenses: read(dir, "expenses.json").await?,
            workers: read(dir, "workers.json").await?,
            documents: read(dir, "documents.json").await?,
        })
    }

    /// Seed from `dir` when one is configured, otherwise the bundled fixtures.
    pub async fn load(dir: Option<&Path>) -> Result<Self, SeedError> {
        let seed = match dir {
            Some(dir) => Self::from_dir(dir).await?,
            None => Self::bundled()?,
        };
        tracing::info!(
            source = %dir.map(|d| d.display().to_string()).unwrap_or_else(|| "bundled".to_string()),
            projects = seed.projects.len(),
            clients = seed.clients.len(),
            expenses = seed.expenses.len(),
            workers = seed.workers.len(),
            documents = seed.documents.len(),
            "seed data loaded"
        );
        Ok(seed)
    }
}

fn parse<T: DeserializeOwned>(name: &str, json: &str) -> Result<Vec<T>, SeedError> {
    serde_json::from_str(json).map_err(|source| SeedError::Parse {
        name: name.to_string(),
        source,
    })
}

async fn read<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Vec<T>, SeedError> {
    let path = dir.join(name);
    let json = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| SeedError::Io { path: path.clone(), source })?;
    parse(&path.display().to_string(), &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectStatus;

    #[test]
    fn bundled_fixtures_parse() {
        let seed = SeedData::bundled().unwrap();
        assert_eq!(seed.projects.len(), 4);
        assert_eq!(seed.clients.len(), 3);
        assert_eq!(seed.expenses.len(), 6);
        assert_eq!(seed.workers.len(), 5);
        assert_eq!(seed.documents.len(), 4);
        assert!(seed.projects.iter().any(|p| p.status == ProjectStatus::OnHold));
        assert_eq!(seed.expenses[1].receipt, None);
    }

    #[tokio::test]
    async fn missing_directory_is_an_io_error() {
        let root = tempfile::tempdir().unwrap();
        let err = SeedData::from_dir(&root.path().join("missing")).await.unwrap_err();
        assert!(matches!(err, SeedError::Io { ref path, .. } if path.ends_with("projects.json")));
    }

    #[tokio::test]
    async fn malformed_file_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("projects.json"), "[]").await.unwrap();
        tokio::fs::write(dir.path().join("clients.json"), "{ not json").await.unwrap();

        let err = SeedData::from_dir(dir.path()).await.unwrap_err();
        match err {
            SeedError::Parse { name, .. } => assert!(name.ends_with("clients.json")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
