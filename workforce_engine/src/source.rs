//! Data sources for the three base relations.
//!
//! A [`WorkforceSource`] supplies employees, projects and work
//! assignments, possibly asynchronously.  The engines must never see a
//! partial dataset, so [`load_snapshot`] fetches all three relations
//! concurrently and only returns once every fetch has succeeded and
//! the joined snapshot has passed validation.

use crate::models::{Employee, Project, Snapshot, WorkAssignment};
use crate::validate::validate_snapshot;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Supplier of the base relations.
#[async_trait]
pub trait WorkforceSource: Send + Sync {
    async fn employees(&self) -> Result<Vec<Employee>>;
    async fn projects(&self) -> Result<Vec<Project>>;
    async fn work_assignments(&self) -> Result<Vec<WorkAssignment>>;
}

/// Fetches every relation from `source` and joins them into a
/// validated [`Snapshot`].
///
/// The first failing fetch aborts the whole load.
pub async fn load_snapshot(source: &dyn WorkforceSource) -> Result<Snapshot> {
    let (employees, projects, work_assignments) = tokio::try_join!(
        source.employees(),
        source.projects(),
        source.work_assignments()
    )?;
    let snapshot = Snapshot {
        employees,
        projects,
        work_assignments,
    };
    if let Err(err) = validate_snapshot(&snapshot) {
        warn!(error = %err, "rejecting snapshot");
        return Err(err).context("snapshot failed validation");
    }
    info!(
        employees = snapshot.employees.len(),
        projects = snapshot.projects.len(),
        assignments = snapshot.work_assignments.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

/// Serves a fixed, in-memory snapshot.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    snapshot: Snapshot,
}

impl MemorySource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }
}

#[async_trait]
impl WorkforceSource for MemorySource {
    async fn employees(&self) -> Result<Vec<Employee>> {
        Ok(self.snapshot.employees.clone())
    }

    async fn projects(&self) -> Result<Vec<Project>> {
        Ok(self.snapshot.projects.clone())
    }

    async fn work_assignments(&self) -> Result<Vec<WorkAssignment>> {
        Ok(self.snapshot.work_assignments.clone())
    }
}

/// Reads a snapshot from a single JSON file of the form
/// `{"employees": [...], "projects": [...], "workAssignments": [...]}`.
///
/// The file is read and parsed once, on the first request; every
/// relation is served from that one parse.
#[derive(Debug)]
pub struct JsonFileSource {
    path: PathBuf,
    snapshot: OnceCell<Snapshot>,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            snapshot: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn snapshot(&self) -> Result<&Snapshot> {
        self.snapshot
            .get_or_try_init(|| read_snapshot(&self.path))
            .await
    }
}

async fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let data = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read dataset {:?}", path))?;
    serde_json::from_str(&data).with_context(|| format!("failed to parse dataset {:?}", path))
}

#[async_trait]
impl WorkforceSource for JsonFileSource {
    async fn employees(&self) -> Result<Vec<Employee>> {
        Ok(self.snapshot().await?.employees.clone())
    }

    async fn projects(&self) -> Result<Vec<Project>> {
        Ok(self.snapshot().await?.projects.clone())
    }

    async fn work_assignments(&self) -> Result<Vec<WorkAssignment>> {
        Ok(self.snapshot().await?.work_assignments.clone())
    }
}
