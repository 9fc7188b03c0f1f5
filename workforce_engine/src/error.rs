//! Error types for the Workforce Engine.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while ingesting a snapshot or running the engines.
///
/// Degenerate divisors (no employees, no remaining months) are not
/// errors; the affected averages come back as `0`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("work assignment on project {project_id} references unknown employee {employee_id}")]
    UnknownEmployee { employee_id: u32, project_id: u32 },

    #[error("unknown project {project_id}")]
    UnknownProject { project_id: u32 },

    #[error("duplicate employee id {0}")]
    DuplicateEmployee(u32),

    #[error("duplicate project id {0}")]
    DuplicateProject(u32),

    #[error("employee {employee_id} full name {found:?} does not match {expected:?}")]
    NameMismatch {
        employee_id: u32,
        expected: String,
        found: String,
    },

    #[error("project {project_id} ends ({end}) before it starts ({start})")]
    InvalidDateRange {
        project_id: u32,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("unknown project status {0:?}")]
    UnknownStatus(String),

    #[error("{entity} id must be positive, found {id}")]
    InvalidId { entity: &'static str, id: u32 },

    /// `record` names the offending row, e.g. `employee 4` or
    /// `assignment of employee 4 to project 2`.
    #[error("{record} has negative or non-finite {field}: {value}")]
    InvalidAmount {
        record: String,
        field: &'static str,
        value: f64,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
