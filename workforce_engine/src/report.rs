//! Dashboard report assembly.
//!
//! Bundles every engine output for one snapshot into a single
//! serialisable value.

use crate::aggregation::{
    compute_assignment_series_for_project, compute_employee_summaries, compute_overall_totals,
    compute_project_series, compute_project_summaries,
};
use crate::error::{EngineError, Result};
use crate::models::{
    AssignmentSeries, EmployeeSummary, OverallTotals, ProjectSeries, ProjectSummary, Snapshot,
    YearProjection,
};
use crate::projection::compute_year_projection;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything a dashboard needs to render one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    /// The date the projection was computed for.
    pub generated_for: NaiveDate,
    pub summaries: Vec<ProjectSummary>,
    pub totals: OverallTotals,
    pub employees: Vec<EmployeeSummary>,
    pub project_series: ProjectSeries,
    /// Per-employee series for the requested project, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment_series: Option<AssignmentSeries>,
    pub projection: YearProjection,
}

/// Runs every engine over `snapshot` as of `current_date`.
///
/// `series_project` selects the project whose per-employee series is
/// included; it must name a project in the snapshot.
pub fn build_report(
    current_date: NaiveDate,
    snapshot: &Snapshot,
    series_project: Option<u32>,
) -> Result<DashboardReport> {
    let summaries = compute_project_summaries(&snapshot.projects, &snapshot.work_assignments);
    let totals = compute_overall_totals(&summaries);
    let employees = compute_employee_summaries(&snapshot.employees, &snapshot.work_assignments)?;
    let project_series = compute_project_series(&summaries);

    let assignment_series = match series_project {
        Some(project_id) => {
            if !snapshot.projects.iter().any(|p| p.id == project_id) {
                return Err(EngineError::UnknownProject { project_id });
            }
            Some(compute_assignment_series_for_project(
                project_id,
                &snapshot.employees,
                &snapshot.work_assignments,
            )?)
        }
        None => None,
    };

    let projection = compute_year_projection(
        &current_date,
        &snapshot.employees,
        &snapshot.projects,
        &snapshot.work_assignments,
    )?;

    Ok(DashboardReport {
        generated_for: current_date,
        summaries,
        totals,
        employees,
        project_series,
        assignment_series,
        projection,
    })
}
