//! Aggregation engine.
//!
//! The `aggregation` module turns the base relations of a
//! [`Snapshot`](crate::models::Snapshot) into per-project summaries,
//! overall totals, per-employee rollups and the chart series a
//! dashboard draws from them.  Every function here is pure: it reads
//! the slices it is given and returns a freshly built value.
//!
//! Floating-point sums are always accumulated in input order so the
//! same inputs produce bit-identical results.

use crate::error::{EngineError, Result};
use crate::models::{
    AssignmentSeries, Employee, EmployeeSummary, OverallTotals, Project, ProjectSeries,
    ProjectSummary, WorkAssignment,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// Divides `total` by `count`, yielding `0` when there is nothing to
/// divide by.
pub(crate) fn per_head(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Builds one summary per project, preserving the order of `projects`.
///
/// Assignments whose `project_id` matches no project are not counted
/// anywhere here; run [`crate::validate::validate_snapshot`] first if
/// that should be an error.
pub fn compute_project_summaries(
    projects: &[Project],
    work_assignments: &[WorkAssignment],
) -> Vec<ProjectSummary> {
    debug!(
        projects = projects.len(),
        assignments = work_assignments.len(),
        "computing project summaries"
    );
    projects
        .iter()
        .map(|project| {
            let mut total_hours = 0.0;
            let mut total_value = 0.0;
            let mut employees = HashSet::new();
            for assignment in work_assignments
                .iter()
                .filter(|a| a.project_id == project.id)
            {
                total_hours += assignment.hours_worked;
                total_value += assignment.monetary_value;
                employees.insert(assignment.employee_id);
            }
            let employee_count = employees.len();
            ProjectSummary {
                project_id: project.id,
                project_name: project.name.clone(),
                project_status: project.status,
                total_hours,
                total_value,
                employee_count,
                average_hours_per_employee: per_head(total_hours, employee_count),
                average_value_per_employee: per_head(total_value, employee_count),
            }
        })
        .collect()
}

/// Sums hours, value and employee counts across `summaries`.
pub fn compute_overall_totals(summaries: &[ProjectSummary]) -> OverallTotals {
    summaries
        .iter()
        .fold(OverallTotals::default(), |acc, summary| OverallTotals {
            total_hours: acc.total_hours + summary.total_hours,
            total_value: acc.total_value + summary.total_value,
            total_employees: acc.total_employees + summary.employee_count,
        })
}

/// Builds the hours/value series of the employees assigned to
/// `project_id`, ordered by ascending employee id.
///
/// Only employees with an assignment on the project appear.  A project
/// without assignments yields an empty series.  An assignment whose
/// employee is missing from `employees` is an
/// [`EngineError::UnknownEmployee`]; the series is never silently
/// truncated.
pub fn compute_assignment_series_for_project(
    project_id: u32,
    employees: &[Employee],
    work_assignments: &[WorkAssignment],
) -> Result<AssignmentSeries> {
    let by_id = index_employees(employees);

    let mut per_employee: BTreeMap<u32, (f64, f64)> = BTreeMap::new();
    for assignment in work_assignments
        .iter()
        .filter(|a| a.project_id == project_id)
    {
        let entry = per_employee.entry(assignment.employee_id).or_insert((0.0, 0.0));
        entry.0 += assignment.hours_worked;
        entry.1 += assignment.monetary_value;
    }

    let mut series = AssignmentSeries::default();
    for (employee_id, (hours, value)) in per_employee {
        let employee = by_id
            .get(&employee_id)
            .ok_or(EngineError::UnknownEmployee {
                employee_id,
                project_id,
            })?;
        series.employee_labels.push(employee.label().to_string());
        series.hours.push(hours);
        series.values.push(value);
    }
    debug!(project_id, points = series.hours.len(), "built assignment series");
    Ok(series)
}

/// Rolls every employee's assignments up across projects, preserving
/// the order of `employees`.
///
/// Employees without assignments get a zeroed summary.  Any assignment
/// pointing at an employee outside `employees` is an error.
pub fn compute_employee_summaries(
    employees: &[Employee],
    work_assignments: &[WorkAssignment],
) -> Result<Vec<EmployeeSummary>> {
    let by_id = index_employees(employees);
    if let Some(orphan) = work_assignments
        .iter()
        .find(|a| !by_id.contains_key(&a.employee_id))
    {
        return Err(EngineError::UnknownEmployee {
            employee_id: orphan.employee_id,
            project_id: orphan.project_id,
        });
    }

    let summaries = employees
        .iter()
        .map(|employee| {
            let mut total_hours = 0.0;
            let mut total_value = 0.0;
            let mut projects = HashSet::new();
            for assignment in work_assignments
                .iter()
                .filter(|a| a.employee_id == employee.id)
            {
                total_hours += assignment.hours_worked;
                total_value += assignment.monetary_value;
                projects.insert(assignment.project_id);
            }
            let project_count = projects.len();
            EmployeeSummary {
                employee_id: employee.id,
                label: employee.label().to_string(),
                total_hours,
                total_value,
                project_count,
                average_hours_per_project: per_head(total_hours, project_count),
                average_value_per_project: per_head(total_value, project_count),
            }
        })
        .collect();
    Ok(summaries)
}

/// Projects the summaries into a per-project chart series, in summary
/// order.
pub fn compute_project_series(summaries: &[ProjectSummary]) -> ProjectSeries {
    ProjectSeries {
        project_labels: summaries.iter().map(|s| s.project_name.clone()).collect(),
        hours: summaries.iter().map(|s| s.total_hours).collect(),
        values: summaries.iter().map(|s| s.total_value).collect(),
    }
}

fn index_employees(employees: &[Employee]) -> HashMap<u32, &Employee> {
    employees.iter().map(|e| (e.id, e)).collect()
}
