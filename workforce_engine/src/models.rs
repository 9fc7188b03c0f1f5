//! Data models for the Workforce Engine.
//!
//! The `models` module defines the serialisable structs and enums
//! for employees, projects and the work assignments that link them,
//! along with the derived result types produced by the aggregation
//! and projection engines.  Base records derive `Deserialize` so a
//! snapshot can be read straight from JSON; derived records derive
//! `Serialize` so a presentation layer can consume them as-is.  Field
//! names are camelCase on the wire.

use crate::error::EngineError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents an employee who may be assigned to projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique positive identifier.
    pub id: u32,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Always `first_name + " " + last_name`.  The field is carried
    /// redundantly because upstream datasets ship it; ingestion checks
    /// that it agrees with the two parts.
    pub full_name: String,
    /// Annual salary in currency units.  Non-negative.
    pub annual_salary: f64,
    /// Hourly rate in currency units.  Non-negative.  Informational
    /// only: assignment values are never recomputed from it.
    pub hourly_rate: f64,
}

impl Employee {
    /// Builds an employee, deriving `full_name` from its parts.
    pub fn new(
        id: u32,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        annual_salary: f64,
        hourly_rate: f64,
    ) -> Self {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let full_name = format!("{} {}", first_name, last_name);
        Self {
            id,
            first_name,
            last_name,
            full_name,
            annual_salary,
            hourly_rate,
        }
    }

    /// Label shown for this employee in chart series.
    pub fn label(&self) -> &str {
        &self.full_name
    }
}

/// Lifecycle status of a project.
///
/// Upstream data spells these as free-form strings (`"In Progress"`,
/// `"completed"`, ...).  They are normalised into this enum once, when
/// a record is deserialised, so the engines only ever match on
/// variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ProjectStatus {
    /// Work has finished.  Excluded from the forward projection.
    Completed,
    /// Work is under way.
    InProgress,
    /// Scheduled but not yet started.
    Planning,
}

impl ProjectStatus {
    /// Canonical display string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Completed => "Completed",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Planning => "Planning",
        }
    }

    /// A project is active, and therefore part of the forward
    /// projection, unless it has been completed.
    pub fn is_active(&self) -> bool {
        *self != ProjectStatus::Completed
    }
}

impl FromStr for ProjectStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalised.as_str() {
            "completed" => Ok(ProjectStatus::Completed),
            "inprogress" => Ok(ProjectStatus::InProgress),
            "planning" => Ok(ProjectStatus::Planning),
            _ => Err(EngineError::UnknownStatus(s.to_string())),
        }
    }
}

impl TryFrom<String> for ProjectStatus {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProjectStatus> for String {
    fn from(status: ProjectStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A project that employees log work against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique positive identifier.
    pub id: u32,
    /// Display name, used as the label in project chart series.
    pub name: String,
    /// Free-text description.  Optional in the input; empty when absent.
    #[serde(default)]
    pub description: String,
    /// Normalised lifecycle status.  Completed projects are excluded
    /// from the forward projection.
    pub status: ProjectStatus,
    /// First day of work on the project.
    pub start_date: NaiveDate,
    /// When present, never earlier than `start_date`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// A fact linking one employee to one project.
///
/// `monetary_value` is supplied independently of
/// `hours_worked * hourly_rate` and is treated as authoritative.
/// Datasets carry one row per (employee, project) pair; duplicate
/// pairs are summed, so callers must not repeat them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkAssignment {
    /// The [`Project`] the work was logged against.
    pub project_id: u32,
    /// The [`Employee`] who did the work.
    pub employee_id: u32,
    /// Hours worked on the project.  Non-negative.
    pub hours_worked: f64,
    /// Value of the work in currency units.  Non-negative.
    pub monetary_value: f64,
}

/// The three base relations, loaded together.
///
/// The engines are only ever handed a complete snapshot; see
/// [`crate::source::load_snapshot`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Every known employee.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Every known project, in display order.
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Work logged by employees against projects.
    #[serde(default)]
    pub work_assignments: Vec<WorkAssignment>,
}

/// Per-project rollup of hours and value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    /// Id of the summarised project.
    pub project_id: u32,
    /// Name of the summarised project.
    pub project_name: String,
    /// Status of the summarised project.
    pub project_status: ProjectStatus,
    /// Sum of `hours_worked` over the project's assignments.
    pub total_hours: f64,
    /// Sum of `monetary_value` over the project's assignments.
    pub total_value: f64,
    /// Number of distinct employees with assignments on the project.
    pub employee_count: usize,
    /// `total_hours / employee_count`, or `0` with no employees.
    pub average_hours_per_employee: f64,
    /// `total_value / employee_count`, or `0` with no employees.
    pub average_value_per_employee: f64,
}

/// Sums of the project summaries.
///
/// `total_employees` is a plain sum of the per-project counts, so an
/// employee assigned to two projects is counted twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallTotals {
    /// Sum of every project's total hours.
    pub total_hours: f64,
    /// Sum of every project's total value.
    pub total_value: f64,
    /// Sum of every project's employee count.
    pub total_employees: usize,
}

/// Per-employee rollup across every project the employee worked on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    /// Id of the summarised employee.
    pub employee_id: u32,
    /// Display label, the employee's full name.
    pub label: String,
    /// Hours worked across all projects.
    pub total_hours: f64,
    /// Value of the work across all projects.
    pub total_value: f64,
    /// Number of distinct projects the employee has assignments on.
    pub project_count: usize,
    /// `total_hours / project_count`, or `0` with no projects.
    pub average_hours_per_project: f64,
    /// `total_value / project_count`, or `0` with no projects.
    pub average_value_per_project: f64,
}

/// Chart series of the employees assigned to a single project.
///
/// The three vectors are parallel.  A project without assignments
/// yields three empty vectors, never an absent value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentSeries {
    /// Employee full names, by ascending employee id.
    pub employee_labels: Vec<String>,
    /// Hours each employee worked on the project.
    pub hours: Vec<f64>,
    /// Value of each employee's work on the project.
    pub values: Vec<f64>,
}

impl AssignmentSeries {
    pub fn is_empty(&self) -> bool {
        self.employee_labels.is_empty()
    }
}

/// Chart series with one point per project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSeries {
    /// Project names.
    pub project_labels: Vec<String>,
    /// Total hours per project.
    pub hours: Vec<f64>,
    /// Total value per project.
    pub values: Vec<f64>,
}

/// One month of the year-end projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyProjection {
    /// English month name of `month_index mod 12`.
    pub month: String,
    /// Zero-based month index.  Not wrapped; values of 12 and above
    /// belong to the following year.
    pub month_index: u32,
    /// Hours expected in this month.  The same for every month.
    pub projected_hours: f64,
    /// Value expected in this month.  The same for every month.
    pub projected_value: f64,
    /// Hours expected from the current month through this one.
    pub cumulative_hours: f64,
    /// Value expected from the current month through this one.
    pub cumulative_value: f64,
}

/// Linear projection of hours and value to the end of the year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearProjection {
    /// Hours expected over the remaining months.
    pub total_projected_hours: f64,
    /// Value expected over the remaining months.
    pub total_projected_value: f64,
    /// Number of projects that are not completed.
    pub active_projects: usize,
    /// Distinct employees with assignments on active projects.
    pub active_employees: usize,
    /// Projected hours per month: the per-employee run-rate times
    /// `active_employees`.
    pub average_hours_per_month: f64,
    /// Projected value per month, derived like the hours.
    pub average_value_per_month: f64,
    /// Months left in the year, counting the current one.
    pub remaining_months: u32,
    /// One entry per remaining month, in calendar order.
    pub monthly_breakdown: Vec<MonthlyProjection>,
}
