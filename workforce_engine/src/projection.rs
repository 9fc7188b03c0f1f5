//! Year-end projection engine.
//!
//! Estimates hours and monetary value for the rest of the calendar
//! year by linear extrapolation of the historical run-rate.  There is
//! no seasonality: every remaining month receives the same estimate.
//!
//! Two employee populations are involved and they are deliberately
//! different.  The run-rate is computed over every employee that has
//! ever logged work, while the forward estimate is scaled by the
//! headcount on active projects only.

use crate::aggregation::per_head;
use crate::error::{EngineError, Result};
use crate::models::{Employee, MonthlyProjection, Project, WorkAssignment, YearProjection};
use chrono::{Datelike, Month};
use std::collections::HashSet;
use tracing::{debug, info};

const MONTHS_PER_YEAR: u32 = 12;

/// English name of the month at `index`, wrapping indices of 12 and
/// above into the following year.
pub fn month_name(index: u32) -> &'static str {
    (0..index % MONTHS_PER_YEAR)
        .fold(Month::January, |month, _| month.succ())
        .name()
}

/// Projects the remainder of the year containing `current_date`.
pub fn compute_year_projection<D: Datelike>(
    current_date: &D,
    employees: &[Employee],
    projects: &[Project],
    work_assignments: &[WorkAssignment],
) -> Result<YearProjection> {
    project_from_month(current_date.month0(), employees, projects, work_assignments)
}

/// Projects the remainder of the year from a zero-based month index.
///
/// `12 - month_index` months remain.  An index of 12 or more leaves no
/// months and yields a projection with an empty breakdown and zero
/// totals.
///
/// Fails with [`EngineError::UnknownEmployee`] or
/// [`EngineError::UnknownProject`] if an assignment does not resolve.
pub fn project_from_month(
    month_index: u32,
    employees: &[Employee],
    projects: &[Project],
    work_assignments: &[WorkAssignment],
) -> Result<YearProjection> {
    check_references(employees, projects, work_assignments)?;

    let active_ids: HashSet<u32> = projects
        .iter()
        .filter(|p| p.status.is_active())
        .map(|p| p.id)
        .collect();
    let remaining_months = MONTHS_PER_YEAR.saturating_sub(month_index);

    let (historical_hours, historical_value) = work_assignments
        .iter()
        .fold((0.0, 0.0), |(hours, value), a| {
            (hours + a.hours_worked, value + a.monetary_value)
        });
    let unique_employees = work_assignments
        .iter()
        .map(|a| a.employee_id)
        .collect::<HashSet<_>>()
        .len();

    // Run-rate per employee per month, over all historical work.
    let employee_months = unique_employees * MONTHS_PER_YEAR as usize;
    let hours_rate = per_head(historical_hours, employee_months);
    let value_rate = per_head(historical_value, employee_months);

    let active_employees = work_assignments
        .iter()
        .filter(|a| active_ids.contains(&a.project_id))
        .map(|a| a.employee_id)
        .collect::<HashSet<_>>()
        .len();

    let hours_per_month = hours_rate * active_employees as f64;
    let value_per_month = value_rate * active_employees as f64;
    debug!(
        unique_employees,
        active_employees, hours_rate, value_rate, "derived run-rate"
    );

    let monthly_breakdown = (0..remaining_months)
        .map(|i| {
            let month_index = month_index + i;
            let elapsed = f64::from(i + 1);
            MonthlyProjection {
                month: month_name(month_index).to_string(),
                month_index,
                projected_hours: hours_per_month,
                projected_value: value_per_month,
                cumulative_hours: hours_per_month * elapsed,
                cumulative_value: value_per_month * elapsed,
            }
        })
        .collect();

    let projection = YearProjection {
        total_projected_hours: hours_per_month * f64::from(remaining_months),
        total_projected_value: value_per_month * f64::from(remaining_months),
        active_projects: active_ids.len(),
        active_employees,
        average_hours_per_month: hours_per_month,
        average_value_per_month: value_per_month,
        remaining_months,
        monthly_breakdown,
    };
    info!(
        remaining_months,
        active_projects = projection.active_projects,
        total_projected_hours = projection.total_projected_hours,
        "year projection computed"
    );
    Ok(projection)
}

fn check_references(
    employees: &[Employee],
    projects: &[Project],
    work_assignments: &[WorkAssignment],
) -> Result<()> {
    let employee_ids: HashSet<u32> = employees.iter().map(|e| e.id).collect();
    let project_ids: HashSet<u32> = projects.iter().map(|p| p.id).collect();
    for assignment in work_assignments {
        if !project_ids.contains(&assignment.project_id) {
            return Err(EngineError::UnknownProject {
                project_id: assignment.project_id,
            });
        }
        if !employee_ids.contains(&assignment.employee_id) {
            return Err(EngineError::UnknownEmployee {
                employee_id: assignment.employee_id,
                project_id: assignment.project_id,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectStatus;
    use chrono::NaiveDate;

    fn project(id: u32, status: ProjectStatus) -> Project {
        Project {
            id,
            name: format!("Project {}", id),
            description: String::new(),
            status,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: None,
        }
    }

    fn assignment(project_id: u32, employee_id: u32, hours: f64, value: f64) -> WorkAssignment {
        WorkAssignment {
            project_id,
            employee_id,
            hours_worked: hours,
            monetary_value: value,
        }
    }

    /// One completed and one in-progress project, each with its own
    /// employee logging 120 hours / 4800.
    fn two_project_fixture() -> (Vec<Employee>, Vec<Project>, Vec<WorkAssignment>) {
        (
            vec![
                Employee::new(1, "Alice", "Smith", 80_000.0, 40.0),
                Employee::new(2, "Bob", "Jones", 80_000.0, 40.0),
            ],
            vec![
                project(1, ProjectStatus::Completed),
                project(2, ProjectStatus::InProgress),
            ],
            vec![assignment(1, 1, 120.0, 4800.0), assignment(2, 2, 120.0, 4800.0)],
        )
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {} to be within 1e-9 of {}",
            actual,
            expected
        );
    }

    #[test]
    fn month_names_wrap() {
        assert_eq!(month_name(0), "January");
        assert_eq!(month_name(11), "December");
        assert_eq!(month_name(12), "January");
        assert_eq!(month_name(14), "March");
    }

    #[test]
    fn january_projects_full_year() {
        let (employees, projects, assignments) = two_project_fixture();
        let january = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let projection =
            compute_year_projection(&january, &employees, &projects, &assignments).unwrap();

        assert_eq!(projection.remaining_months, 12);
        assert_eq!(projection.active_projects, 1);
        assert_eq!(projection.active_employees, 1);
        // 240 hours over 2 employees * 12 months.
        assert_eq!(projection.average_hours_per_month, 10.0);
        assert_eq!(projection.average_value_per_month, 400.0);
        assert_eq!(projection.total_projected_hours, 120.0);
        assert_eq!(projection.total_projected_value, 4800.0);

        let breakdown = &projection.monthly_breakdown;
        assert_eq!(breakdown.len(), 12);
        assert_eq!(breakdown[0].month, "January");
        assert_eq!(breakdown[0].cumulative_hours, 10.0);
        assert_eq!(breakdown[11].month, "December");
        assert_eq!(breakdown[11].month_index, 11);
        assert_eq!(breakdown[11].cumulative_hours, 120.0);
        assert_eq!(breakdown[11].cumulative_value, 4800.0);
        assert!(breakdown.iter().all(|m| m.projected_hours == 10.0));
    }

    #[test]
    fn december_leaves_one_month() {
        let (employees, projects, assignments) = two_project_fixture();
        let december = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        let projection =
            compute_year_projection(&december, &employees, &projects, &assignments).unwrap();
        assert_eq!(projection.remaining_months, 1);
        assert_eq!(projection.monthly_breakdown.len(), 1);
        assert_eq!(projection.monthly_breakdown[0].month, "December");
        assert_eq!(projection.monthly_breakdown[0].month_index, 11);
        assert_eq!(projection.total_projected_hours, 10.0);
    }

    #[test]
    fn breakdown_indices_are_not_wrapped() {
        let (employees, projects, assignments) = two_project_fixture();
        let projection = project_from_month(9, &employees, &projects, &assignments).unwrap();
        let indices: Vec<u32> = projection
            .monthly_breakdown
            .iter()
            .map(|m| m.month_index)
            .collect();
        assert_eq!(indices, vec![9, 10, 11]);
        assert_eq!(projection.monthly_breakdown[0].month, "October");
    }

    #[test]
    fn no_remaining_months_yields_empty_breakdown() {
        let (employees, projects, assignments) = two_project_fixture();
        let projection = project_from_month(12, &employees, &projects, &assignments).unwrap();
        assert_eq!(projection.remaining_months, 0);
        assert!(projection.monthly_breakdown.is_empty());
        assert_eq!(projection.total_projected_hours, 0.0);
        assert_eq!(projection.total_projected_value, 0.0);
        // The monthly rate itself is still reported.
        assert_eq!(projection.average_hours_per_month, 10.0);
    }

    #[test]
    fn no_history_yields_zero_rates() {
        let employees = vec![Employee::new(1, "Alice", "Smith", 1.0, 1.0)];
        let projects = vec![project(1, ProjectStatus::Planning)];
        let projection = project_from_month(3, &employees, &projects, &[]).unwrap();
        assert_eq!(projection.active_projects, 1);
        assert_eq!(projection.active_employees, 0);
        assert_eq!(projection.average_hours_per_month, 0.0);
        assert_eq!(projection.average_value_per_month, 0.0);
        assert_eq!(projection.monthly_breakdown.len(), 9);
        assert!(projection
            .monthly_breakdown
            .iter()
            .all(|m| m.cumulative_hours == 0.0 && !m.cumulative_value.is_nan()));
    }

    #[test]
    fn rate_uses_all_employees_but_scale_uses_active_ones() {
        let employees = vec![
            Employee::new(1, "A", "A", 0.0, 0.0),
            Employee::new(2, "B", "B", 0.0, 0.0),
            Employee::new(3, "C", "C", 0.0, 0.0),
            Employee::new(4, "D", "D", 0.0, 0.0),
        ];
        let projects = vec![
            project(1, ProjectStatus::Completed),
            project(2, ProjectStatus::Planning),
        ];
        // Four employees historically, two of them on the active project.
        let assignments = vec![
            assignment(1, 1, 240.0, 2400.0),
            assignment(1, 2, 240.0, 2400.0),
            assignment(2, 3, 0.0, 0.0),
            assignment(2, 4, 0.0, 0.0),
        ];
        let projection = project_from_month(0, &employees, &projects, &assignments).unwrap();
        // 480 / (4 * 12) = 10 per employee-month, times 2 active employees.
        assert_eq!(projection.active_employees, 2);
        assert_eq!(projection.average_hours_per_month, 20.0);
        assert_eq!(projection.average_value_per_month, 200.0);
    }

    #[test]
    fn uneven_run_rate_sums_back_to_history() {
        let employees = vec![
            Employee::new(1, "A", "A", 0.0, 0.0),
            Employee::new(2, "B", "B", 0.0, 0.0),
            Employee::new(3, "C", "C", 0.0, 0.0),
        ];
        let projects = vec![project(1, ProjectStatus::Planning)];
        let assignments = vec![
            assignment(1, 1, 50.0, 1000.0),
            assignment(1, 2, 30.0, 700.0),
            assignment(1, 3, 20.0, 300.0),
        ];
        let projection = project_from_month(0, &employees, &projects, &assignments).unwrap();
        // 100 hours / 36 employee-months, scaled by 3 active employees.
        assert_close(projection.average_hours_per_month, 100.0 / 12.0);
        assert_close(projection.average_value_per_month, 2000.0 / 12.0);
        assert_close(projection.total_projected_hours, 100.0);
        assert_close(projection.total_projected_value, 2000.0);
        assert_close(projection.monthly_breakdown[2].cumulative_hours, 25.0);
    }

    #[test]
    fn unknown_references_fail_loudly() {
        let (employees, projects, mut assignments) = two_project_fixture();
        assignments.push(assignment(2, 77, 1.0, 1.0));
        assert_eq!(
            project_from_month(0, &employees, &projects, &assignments).unwrap_err(),
            EngineError::UnknownEmployee {
                employee_id: 77,
                project_id: 2
            }
        );

        let (employees, projects, mut assignments) = two_project_fixture();
        assignments.push(assignment(9, 1, 1.0, 1.0));
        assert_eq!(
            project_from_month(0, &employees, &projects, &assignments).unwrap_err(),
            EngineError::UnknownProject { project_id: 9 }
        );
    }
}
