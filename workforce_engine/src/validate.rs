//! Ingestion-boundary checks for a [`Snapshot`].
//!
//! Status strings are already normalised by deserialisation; this
//! module covers ids, amounts and the invariants that span records.
//! A snapshot that
//! passes here can be handed to any engine function without tripping a
//! referential-integrity error.

use crate::error::{EngineError, Result};
use crate::models::Snapshot;
use std::collections::HashSet;

/// Validates `snapshot`, returning the first violation found.
///
/// Checks run per relation, employees first, then projects, then work
/// assignments.  Ids must be positive and unique, full names must
/// agree with their parts, date ranges must be ordered, amounts must
/// be finite and non-negative, and every assignment must reference a
/// known project and employee.
pub fn validate_snapshot(snapshot: &Snapshot) -> Result<()> {
    let mut employee_ids = HashSet::new();
    for employee in &snapshot.employees {
        check_id("employee", employee.id)?;
        let record = || format!("employee {}", employee.id);
        check_amount(&record, "annualSalary", employee.annual_salary)?;
        check_amount(&record, "hourlyRate", employee.hourly_rate)?;
        if !employee_ids.insert(employee.id) {
            return Err(EngineError::DuplicateEmployee(employee.id));
        }
        let expected = format!("{} {}", employee.first_name, employee.last_name);
        if employee.full_name != expected {
            return Err(EngineError::NameMismatch {
                employee_id: employee.id,
                expected,
                found: employee.full_name.clone(),
            });
        }
    }

    let mut project_ids = HashSet::new();
    for project in &snapshot.projects {
        check_id("project", project.id)?;
        if !project_ids.insert(project.id) {
            return Err(EngineError::DuplicateProject(project.id));
        }
        if let Some(end) = project.end_date {
            if end < project.start_date {
                return Err(EngineError::InvalidDateRange {
                    project_id: project.id,
                    start: project.start_date,
                    end,
                });
            }
        }
    }

    for assignment in &snapshot.work_assignments {
        let record = || {
            format!(
                "assignment of employee {} to project {}",
                assignment.employee_id, assignment.project_id
            )
        };
        check_amount(&record, "hoursWorked", assignment.hours_worked)?;
        check_amount(&record, "monetaryValue", assignment.monetary_value)?;
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

fn check_id(entity: &'static str, id: u32) -> Result<()> {
    if id == 0 {
        return Err(EngineError::InvalidId { entity, id });
    }
    Ok(())
}

fn check_amount(record: &dyn Fn() -> String, field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::InvalidAmount {
            record: record(),
            field,
            value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, Project, ProjectStatus, WorkAssignment};
    use chrono::NaiveDate;

    fn snapshot() -> Snapshot {
        Snapshot {
            employees: vec![Employee::new(1, "Alice", "Smith", 80_000.0, 40.0)],
            projects: vec![Project {
                id: 1,
                name: "Alpha".into(),
                description: String::new(),
                status: ProjectStatus::InProgress,
                start_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2024, 8, 1),
            }],
            work_assignments: vec![WorkAssignment {
                project_id: 1,
                employee_id: 1,
                hours_worked: 10.0,
                monetary_value: 400.0,
            }],
        }
    }

    #[test]
    fn accepts_consistent_snapshot() {
        assert_eq!(validate_snapshot(&snapshot()), Ok(()));
        assert_eq!(validate_snapshot(&Snapshot::default()), Ok(()));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut s = snapshot();
        s.employees.push(s.employees[0].clone());
        assert_eq!(validate_snapshot(&s), Err(EngineError::DuplicateEmployee(1)));

        let mut s = snapshot();
        s.projects.push(s.projects[0].clone());
        assert_eq!(validate_snapshot(&s), Err(EngineError::DuplicateProject(1)));
    }

    #[test]
    fn rejects_inconsistent_full_name() {
        let mut s = snapshot();
        s.employees[0].full_name = "Alice J. Smith".into();
        assert!(matches!(
            validate_snapshot(&s),
            Err(EngineError::NameMismatch { employee_id: 1, .. })
        ));
    }

    #[test]
    fn rejects_end_before_start() {
        let mut s = snapshot();
        s.projects[0].end_date = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert!(matches!(
            validate_snapshot(&s),
            Err(EngineError::InvalidDateRange { project_id: 1, .. })
        ));
    }

    #[test]
    fn same_day_end_is_allowed() {
        let mut s = snapshot();
        s.projects[0].end_date = Some(s.projects[0].start_date);
        assert!(validate_snapshot(&s).is_ok());
    }

    #[test]
    fn rejects_zero_ids() {
        let mut s = snapshot();
        s.employees[0] = Employee::new(0, "Alice", "Smith", 80_000.0, 40.0);
        assert_eq!(
            validate_snapshot(&s),
            Err(EngineError::InvalidId {
                entity: "employee",
                id: 0
            })
        );

        let mut s = snapshot();
        s.projects[0].id = 0;
        assert_eq!(
            validate_snapshot(&s),
            Err(EngineError::InvalidId {
                entity: "project",
                id: 0
            })
        );
    }

    #[test]
    fn rejects_negative_employee_pay() {
        let mut s = snapshot();
        s.employees[0].hourly_rate = -5.0;
        assert_eq!(
            validate_snapshot(&s),
            Err(EngineError::InvalidAmount {
                record: "employee 1".into(),
                field: "hourlyRate",
                value: -5.0
            })
        );

        let mut s = snapshot();
        s.employees[0].annual_salary = -1.0;
        assert!(matches!(
            validate_snapshot(&s),
            Err(EngineError::InvalidAmount { field: "annualSalary", .. })
        ));
    }

    #[test]
    fn rejects_negative_or_non_finite_work() {
        let mut s = snapshot();
        s.work_assignments[0].hours_worked = -40.0;
        assert_eq!(
            validate_snapshot(&s),
            Err(EngineError::InvalidAmount {
                record: "assignment of employee 1 to project 1".into(),
                field: "hoursWorked",
                value: -40.0
            })
        );

        let mut s = snapshot();
        s.work_assignments[0].monetary_value = f64::INFINITY;
        assert!(matches!(
            validate_snapshot(&s),
            Err(EngineError::InvalidAmount { field: "monetaryValue", .. })
        ));
    }

    #[test]
    fn zero_amounts_are_allowed() {
        let mut s = snapshot();
        s.work_assignments[0].hours_worked = 0.0;
        s.work_assignments[0].monetary_value = 0.0;
        s.employees[0].annual_salary = 0.0;
        assert!(validate_snapshot(&s).is_ok());
    }

    #[test]
    fn rejects_dangling_assignments() {
        let mut s = snapshot();
        s.work_assignments[0].employee_id = 5;
        assert_eq!(
            validate_snapshot(&s),
            Err(EngineError::UnknownEmployee {
                employee_id: 5,
                project_id: 1
            })
        );

        let mut s = snapshot();
        s.work_assignments[0].project_id = 3;
        assert_eq!(
            validate_snapshot(&s),
            Err(EngineError::UnknownProject { project_id: 3 })
        );
    }
}
